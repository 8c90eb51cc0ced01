//! c14 - C14 archive CLI client
//!
//! A command-line interface for provisioning Online.net C14 cold-storage
//! archives.

use c14_api::OnlineConnector;
use c14_cli::commands::Services;
use c14_cli::dispatcher::debug_from_env;
use c14_cli::{DispatchError, Dispatcher, ExitCode, output};
use c14_core::RandomNames;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let connector = OnlineConnector::from_env();
    let services = Services {
        connector: &connector,
        names: &RandomNames,
    };

    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let mut dispatcher = Dispatcher::with_default_commands().debug_override(debug_from_env());

    let exit_code = match dispatcher
        .dispatch(&args, services, &mut stdout, &mut stderr)
        .await
    {
        Ok(()) => ExitCode::Success,
        // Usage text is already out; exit without a diagnostic line
        Err(DispatchError::Usage(_)) => std::process::exit(ExitCode::UsageError.as_i32()),
        Err(DispatchError::Flags(e)) => e.exit(),
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            let _ = output::error_line(&mut stderr, &e.to_string());
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}
