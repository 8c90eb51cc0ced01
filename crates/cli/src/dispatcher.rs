//! Command dispatch
//!
//! The dispatcher owns the registered commands, parses the global options
//! that precede the command name, and routes the rest of the arguments to
//! exactly one command.

use std::io::Write;

use clap::error::ErrorKind;
use clap::{Arg, ArgAction};

use crate::commands::{Command, CommandSummary, Context, Services, default_commands};
use crate::error::{DispatchError, UsageError};
use crate::logging;

/// Environment variable that forces debug logging when set to `1`
pub const DEBUG_ENV: &str = "C14_DEBUG";

/// Options given before the command name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalOptions {
    /// Verbose diagnostic logging
    pub debug: bool,

    /// Plain diagnostics without ANSI styling
    pub no_color: bool,
}

impl GlobalOptions {
    /// Split `args` into global options and the command invocation
    ///
    /// Parsing stops at the first token that is not a global flag.
    /// `debug_override` is OR'd with the `--debug` flag.
    pub fn parse(
        args: &[String],
        debug_override: bool,
    ) -> Result<(Self, Vec<String>), clap::Error> {
        let mut parser = root_parser();
        let matches = parser.try_get_matches_from_mut(args)?;

        let globals = Self {
            debug: matches.get_flag("debug") || debug_override,
            no_color: matches.get_flag("no-color"),
        };
        let rest: Vec<String> = matches
            .get_many::<String>("command")
            .map(|values| values.cloned().collect())
            .unwrap_or_default();

        // The command catch-all accepts hyphens, so an unknown global flag lands here
        if let Some(flag) = rest.first().filter(|arg| arg.starts_with('-')) {
            return Err(parser.error(
                ErrorKind::UnknownArgument,
                format!("unexpected argument '{flag}' found"),
            ));
        }

        Ok((globals, rest))
    }

    /// Install logging and colour settings
    pub fn apply(&self) {
        if self.no_color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }
        logging::init(self);
    }
}

/// Whether `C14_DEBUG=1` is set
pub fn debug_from_env() -> bool {
    std::env::var(DEBUG_ENV).is_ok_and(|value| value == "1")
}

fn root_parser() -> clap::Command {
    clap::Command::new("c14")
        .bin_name("c14")
        .no_binary_name(true)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Interact with C14 from the command line")
        .override_usage("c14 [OPTIONS] COMMAND [arg...]")
        .after_help("Run 'c14 help' for the list of commands.")
        .arg(
            Arg::new("debug")
                .short('D')
                .long("debug")
                .action(ArgAction::SetTrue)
                .help("Enable debug mode"),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .action(ArgAction::SetTrue)
                .help("Disable colored output"),
        )
        .arg(
            Arg::new("command")
                .num_args(1..)
                .trailing_var_arg(true)
                .allow_hyphen_values(true)
                .hide(true),
        )
}

/// Registry of commands and the routing between them
pub struct Dispatcher {
    commands: Vec<Box<dyn Command>>,
    debug_override: bool,
}

impl Dispatcher {
    /// Empty dispatcher
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            debug_override: false,
        }
    }

    /// Dispatcher with the built-in commands registered
    pub fn with_default_commands() -> Self {
        let mut dispatcher = Self::new();
        dispatcher.register(default_commands());
        dispatcher
    }

    /// Force debug logging on, as `C14_DEBUG=1` does
    pub fn debug_override(mut self, enabled: bool) -> Self {
        self.debug_override = enabled;
        self
    }

    /// Add commands; registration order is help display order
    pub fn register(&mut self, commands: impl IntoIterator<Item = Box<dyn Command>>) {
        self.commands.extend(commands);
    }

    /// Names of the registered commands, in registration order
    pub fn command_names(&self) -> Vec<&'static str> {
        self.commands.iter().map(|c| c.name()).collect()
    }

    fn catalog(&self) -> Vec<CommandSummary> {
        self.commands.iter().map(|c| c.summary()).collect()
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut Box<dyn Command>> {
        self.commands.iter_mut().find(|c| c.name() == name)
    }

    /// Parse global options and run the matching command
    ///
    /// `args` excludes the binary name. A usage problem has already been
    /// reported to `err` when `DispatchError::Usage` comes back.
    pub async fn dispatch(
        &mut self,
        args: &[String],
        services: Services<'_>,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<(), DispatchError> {
        let (globals, rest) = GlobalOptions::parse(args, self.debug_override)?;
        globals.apply();
        tracing::debug!(?globals, args = ?rest, "dispatching");

        let catalog = self.catalog();
        let mut ctx = Context {
            services,
            out,
            err,
            catalog: &catalog,
        };

        let Some((name, command_args)) = rest.split_first() else {
            if let Some(help) = self.find_mut("help") {
                help.execute(&mut ctx).await?;
            }
            return Err(UsageError::MissingCommand.into());
        };

        let Some(command) = self.find_mut(name) else {
            return Err(DispatchError::UnknownCommand(name.clone()));
        };

        let flags = command.flag_parser().try_get_matches_from(command_args)?;
        command.validate(&flags, &mut ctx)?;
        command.execute(&mut ctx).await?;
        Ok(())
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::with_default_commands()
    }
}
