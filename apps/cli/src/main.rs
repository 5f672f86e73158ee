//! # Shopkeep CLI Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load both stores from the working directory
//! 3. Build the AppContext (accounts, inventory, cart, session)
//! 4. Run the menu loop until Exit
//!
//! ## Shutdown
//! - Explicit Exit choice: exit code 0
//! - Closed stdin (piped input ran out): also a clean exit
//! - Anything else (stores unreadable, terminal I/O failure): code 1

use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use shopkeep_store::StorePaths;

mod context;
mod error;
mod menu;
mod prompt;
mod session;

use context::AppContext;
use error::CliError;

fn main() -> ExitCode {
    init_tracing();

    let mut ctx = match AppContext::load(StorePaths::default()) {
        Ok(ctx) => ctx,
        Err(err) => {
            error!(%err, "Failed to load stores");
            eprintln!("Failed to start: {}", err);
            return ExitCode::FAILURE;
        }
    };
    info!("Shopkeep started");

    match menu::run(&mut ctx) {
        Ok(()) => ExitCode::SUCCESS,
        // EOF on stdin is how scripted sessions end; not a failure
        Err(CliError::InputClosed) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Fatal: {}", err);
            ExitCode::FAILURE
        }
    }
}

/// Initializes logging.
///
/// Default level keeps the console quiet (warn) so log lines don't
/// interleave with menu prompts; override with RUST_LOG as usual.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,shopkeep=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
