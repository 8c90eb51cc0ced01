//! help command - List commands or show one command's usage

use std::io::Write;

use async_trait::async_trait;
use clap::ArgMatches;

use super::{Command, CommandSummary, Context, Metadata, positional_args};
use crate::error::{ExecutionError, UsageError};

/// The `help` command
#[derive(Debug, Default)]
pub struct Help {
    topic: Option<String>,
}

#[async_trait(?Send)]
impl Command for Help {
    fn name(&self) -> &'static str {
        "help"
    }

    fn metadata(&self) -> Metadata {
        Metadata {
            usage_line: "help [COMMAND]",
            description: "Help of the c14 command line",
            help: "Help prints help information about c14 and its commands. By default, \
                   help lists available commands with a short description. When invoked \
                   with a command name, it prints the usage and the help of the command.",
            examples: "    $ c14 help\n    $ c14 help create",
        }
    }

    fn validate(&mut self, flags: &ArgMatches, ctx: &mut Context<'_>) -> Result<(), UsageError> {
        let mut args = positional_args(flags);
        if args.len() > 1 {
            let _ = self.print_usage(ctx.err);
            return Err(UsageError::UnexpectedArguments(args.split_off(1)));
        }
        self.topic = args.pop();
        Ok(())
    }

    async fn execute(&mut self, ctx: &mut Context<'_>) -> Result<(), ExecutionError> {
        match self.topic.take() {
            None => write_overview(ctx.out, ctx.catalog)?,
            Some(topic) => {
                let entry = ctx
                    .catalog
                    .iter()
                    .find(|entry| entry.name == topic)
                    .ok_or(ExecutionError::UnknownHelpTopic(topic))?;
                writeln!(ctx.out, "{}", entry.usage.trim_end())?;
            }
        }
        Ok(())
    }
}

/// Print the top-level usage and the command list
fn write_overview(out: &mut dyn Write, catalog: &[CommandSummary]) -> std::io::Result<()> {
    writeln!(out, "Usage: c14 [OPTIONS] COMMAND [arg...]")?;
    writeln!(out)?;
    writeln!(out, "Interact with C14 from the command line.")?;
    writeln!(out)?;
    writeln!(out, "Options:")?;
    writeln!(out, "  -D, --debug     Enable debug mode")?;
    writeln!(out, "      --no-color  Disable colored output")?;
    writeln!(out, "  -h, --help      Print help")?;
    writeln!(out, "  -V, --version   Print version")?;
    writeln!(out)?;
    writeln!(out, "Commands:")?;

    let width = catalog.iter().map(|c| c.name.len()).max().unwrap_or(0);
    for command in catalog {
        writeln!(
            out,
            "    {:<width$}  {}",
            command.name, command.description
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Run 'c14 COMMAND --help' for more information on a command.")
}
