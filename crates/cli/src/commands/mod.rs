//! CLI command definitions
//!
//! Every subcommand implements [`Command`] and is registered with the
//! [`Dispatcher`](crate::dispatcher::Dispatcher) once at startup. A command
//! declares its metadata and flags, validates the parsed flags (resolving
//! defaults), then executes.

use std::io::{self, Write};

use async_trait::async_trait;
use c14_core::{Connector, NameGenerator};
use clap::{Arg, ArgAction, ArgMatches};

use crate::error::{ExecutionError, UsageError};

mod create;
mod help;

pub use create::{Create, CreateOptions, ResolvedOptions};
pub use help::Help;

/// Id of the catch-all positional every command parser carries
const POSITIONAL: &str = "args";

/// Static description of a command, used by help output
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    /// Usage line without the binary name, e.g. `create [OPTIONS]`
    pub usage_line: &'static str,

    /// One-line description shown in the command list
    pub description: &'static str,

    /// Longer help shown by `c14 help <command>`
    pub help: &'static str,

    /// Example invocations
    pub examples: &'static str,
}

/// What the help command knows about each registered command
#[derive(Debug, Clone)]
pub struct CommandSummary {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: String,
}

/// External capabilities handed to commands
#[derive(Clone, Copy)]
pub struct Services<'a> {
    pub connector: &'a dyn Connector,
    pub names: &'a dyn NameGenerator,
}

/// Per-invocation state a command runs against
pub struct Context<'a> {
    pub services: Services<'a>,
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
    pub catalog: &'a [CommandSummary],
}

/// A named subcommand with a uniform lifecycle
///
/// The dispatcher builds the flag parser from [`Command::flag_parser`],
/// then calls [`Command::validate`] followed by [`Command::execute`]. An
/// instance is invoked at most once.
#[async_trait(?Send)]
pub trait Command {
    /// Unique name used for dispatch
    fn name(&self) -> &'static str;

    fn metadata(&self) -> Metadata;

    /// Register the command's own flags
    fn declare_flags(&self, flags: clap::Command) -> clap::Command {
        flags
    }

    /// Check the parsed flags and resolve defaults
    ///
    /// On a malformed invocation the usage text is printed before the error
    /// is returned.
    fn validate(&mut self, flags: &ArgMatches, ctx: &mut Context<'_>) -> Result<(), UsageError>;

    async fn execute(&mut self, ctx: &mut Context<'_>) -> Result<(), ExecutionError>;

    /// Flag parser for this command, positional arguments included
    fn flag_parser(&self) -> clap::Command {
        let meta = self.metadata();
        let mut parser = clap::Command::new(self.name())
            .no_binary_name(true)
            .about(meta.description)
            .override_usage(format!("c14 {}", meta.usage_line))
            .arg(
                Arg::new(POSITIONAL)
                    .num_args(1..)
                    .action(ArgAction::Append)
                    .hide(true),
            );
        if !meta.help.is_empty() {
            parser = parser.long_about(meta.help);
        }
        if !meta.examples.is_empty() {
            parser = parser.after_long_help(format!("Examples:\n{}", meta.examples));
        }
        self.declare_flags(parser)
    }

    /// Full usage text
    fn usage(&self) -> String {
        self.flag_parser().render_long_help().to_string()
    }

    fn print_usage(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", self.usage().trim_end())
    }

    fn summary(&self) -> CommandSummary {
        CommandSummary {
            name: self.name(),
            description: self.metadata().description,
            usage: self.usage(),
        }
    }
}

/// Positional arguments left over after flag parsing
pub fn positional_args(flags: &ArgMatches) -> Vec<String> {
    flags
        .get_many::<String>(POSITIONAL)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

/// The commands shipped with c14, in help display order
pub fn default_commands() -> Vec<Box<dyn Command>> {
    vec![Box::new(Help::default()), Box::new(Create::default())]
}
