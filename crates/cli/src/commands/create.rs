//! create command - Create a new archive
//!
//! Provisions an SSH archive inside a safe. The safe is created on the fly
//! when it does not exist yet. The new archive's uuid is the only output.

use async_trait::async_trait;
use c14_core::{CreateBucketRequest, CryptoMode, NameGenerator, OnlineApi};
use clap::builder::BoolishValueParser;
use clap::{Arg, ArgAction, ArgMatches};

use super::{Command, Context, Metadata, positional_args};
use crate::error::{ExecutionError, UsageError};
use crate::output;

/// Default parity mode
const DEFAULT_PARITY: &str = "standard";

/// Platform selector for the DC2 datacenter
const PLATFORM_DC2: &str = "1";

/// Days before a new archive is locked
const DEFAULT_LOCK_DAYS: u32 = 7;

/// Placeholder description; the API rejects an empty one
const BLANK_DESCRIPTION: &str = " ";

/// Options as given on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOptions {
    pub name: Option<String>,
    pub description: Option<String>,
    pub safe_name: Option<String>,
    pub quiet: bool,
    pub parity: String,
    pub large_bucket: bool,
    pub crypto_enabled: bool,
}

impl Default for CreateOptions {
    fn default() -> Self {
        Self {
            name: None,
            description: None,
            safe_name: None,
            quiet: false,
            parity: DEFAULT_PARITY.to_string(),
            large_bucket: false,
            crypto_enabled: true,
        }
    }
}

impl CreateOptions {
    /// Read options out of parsed flags
    ///
    /// Empty strings count as not given.
    pub fn from_matches(flags: &ArgMatches) -> Self {
        let text = |id: &str| {
            flags
                .get_one::<String>(id)
                .filter(|value| !value.is_empty())
                .cloned()
        };

        Self {
            name: text("name"),
            description: text("description"),
            safe_name: text("save"),
            quiet: flags.get_flag("quiet"),
            parity: text("parity").unwrap_or_else(|| DEFAULT_PARITY.to_string()),
            large_bucket: flags.get_flag("large"),
            crypto_enabled: flags.get_one::<bool>("crypto").copied().unwrap_or(true),
        }
    }

    /// Fill in the name and description defaults
    ///
    /// The name generator is consulted only when no name was given.
    pub fn resolve(self, names: &dyn NameGenerator) -> ResolvedOptions {
        let name = match self.name {
            Some(name) => name,
            None => {
                let generated = names.random_name();
                tracing::debug!(name = %generated, "generated archive name");
                generated
            }
        };

        ResolvedOptions {
            name,
            description: self
                .description
                .unwrap_or_else(|| BLANK_DESCRIPTION.to_string()),
            safe_name: self.safe_name,
            quiet: self.quiet,
            parity: self.parity,
            large_bucket: self.large_bucket,
            crypto: CryptoMode::from_enabled(self.crypto_enabled),
        }
    }
}

/// Options after default resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub name: String,
    pub description: String,
    pub safe_name: Option<String>,
    pub quiet: bool,
    pub parity: String,
    pub large_bucket: bool,
    pub crypto: CryptoMode,
}

impl ResolvedOptions {
    /// Safe to create or reuse: the given one, or `<name>_safe`
    pub fn safe_name(&self) -> String {
        self.safe_name
            .clone()
            .unwrap_or_else(|| format!("{}_safe", self.name))
    }

    /// Request for the remote create, authorized by a single SSH key
    pub fn bucket_request(&self, ssh_key: String) -> CreateBucketRequest {
        CreateBucketRequest {
            safe_name: self.safe_name(),
            archive_name: self.name.clone(),
            description: self.description.clone(),
            ssh_keys: vec![ssh_key],
            platforms: vec![PLATFORM_DC2.to_string()],
            days: DEFAULT_LOCK_DAYS,
            quiet: self.quiet,
            parity: self.parity.clone(),
            large_bucket: self.large_bucket,
            crypto: self.crypto,
        }
    }
}

/// Create an archive and return its uuid
///
/// Uses the first SSH key the account lists. Nothing is created when the
/// account has no key.
pub async fn provision(
    api: &dyn OnlineApi,
    options: &ResolvedOptions,
) -> Result<String, ExecutionError> {
    let keys = api
        .list_ssh_keys()
        .await
        .map_err(ExecutionError::api("create:list_ssh_keys"))?;

    let Some(key) = keys.into_iter().next() else {
        return Err(ExecutionError::NoCredentials);
    };

    let request = options.bucket_request(key.uuid_ref);
    tracing::debug!(
        archive = %request.archive_name,
        safe = %request.safe_name,
        crypto = %request.crypto,
        parity = %request.parity,
        "creating archive"
    );

    let created = api
        .create_ssh_bucket_from_scratch(&request)
        .await
        .map_err(ExecutionError::api("create:create_ssh_bucket_from_scratch"))?;

    Ok(created.archive_uuid)
}

/// The `create` command
#[derive(Debug, Default)]
pub struct Create {
    resolved: Option<ResolvedOptions>,
}

#[async_trait(?Send)]
impl Command for Create {
    fn name(&self) -> &'static str {
        "create"
    }

    fn metadata(&self) -> Metadata {
        Metadata {
            usage_line: "create [OPTIONS]",
            description: "Create a new archive",
            help: "Create a new archive, by default with a random name, standard storage \
                   (0.0002€/GB/month), automatically locked in 7 days, and your data will be \
                   stored at DC2.",
            examples: "    $ c14 create\n    \
                       $ c14 create --name \"MyBooks\" --description \"hardware books\"\n    \
                       $ c14 create --name \"MyBooks\" --description \"hardware books\" --save \"Bookshelf\"",
        }
    }

    fn declare_flags(&self, flags: clap::Command) -> clap::Command {
        flags
            .arg(
                Arg::new("name")
                    .short('n')
                    .long("name")
                    .value_name("NAME")
                    .help("Assigns a name"),
            )
            .arg(
                Arg::new("description")
                    .short('d')
                    .long("description")
                    .value_name("DESCRIPTION")
                    .help("Assigns a description"),
            )
            .arg(
                Arg::new("quiet")
                    .short('q')
                    .long("quiet")
                    .action(ArgAction::SetTrue)
                    .help("Don't display the waiting loop"),
            )
            .arg(
                Arg::new("save")
                    .short('s')
                    .long("save")
                    .value_name("SAFE")
                    .help("Name of the safe to use. If it doesn't exist it will be created"),
            )
            .arg(
                Arg::new("parity")
                    .short('p')
                    .long("parity")
                    .value_name("PARITY")
                    .default_value(DEFAULT_PARITY)
                    .help("Specify a parity to use"),
            )
            .arg(
                Arg::new("large")
                    .short('l')
                    .long("large")
                    .action(ArgAction::SetTrue)
                    .help("Ask for a large bucket"),
            )
            .arg(
                Arg::new("crypto")
                    .short('c')
                    .long("crypto")
                    .value_name("BOOL")
                    .num_args(0..=1)
                    .require_equals(true)
                    .default_value("true")
                    .default_missing_value("true")
                    .value_parser(BoolishValueParser::new())
                    .help("Enable aes-256-cbc cryptography"),
            )
    }

    fn validate(&mut self, flags: &ArgMatches, ctx: &mut Context<'_>) -> Result<(), UsageError> {
        let args = positional_args(flags);
        if !args.is_empty() {
            let _ = self.print_usage(ctx.err);
            return Err(UsageError::UnexpectedArguments(args));
        }

        self.resolved = Some(CreateOptions::from_matches(flags).resolve(ctx.services.names));
        Ok(())
    }

    async fn execute(&mut self, ctx: &mut Context<'_>) -> Result<(), ExecutionError> {
        let options = self
            .resolved
            .take()
            .ok_or(ExecutionError::NotValidated("create"))?;

        let api = ctx
            .services
            .connector
            .connect()
            .await
            .map_err(ExecutionError::Connect)?;

        let archive = provision(api.as_ref(), &options).await?;
        output::result_line(ctx.out, &archive)?;
        Ok(())
    }
}
