//! Main entry point for paramlab
//!
//! Launches the playground configuration GUI with structured logging
//! routed to the persistent log file.

use anyhow::Result;
use paramlab_core::logging::{LoggingDestination, init_logging};

fn main() -> Result<()> {
    if let Err(e) = init_logging(LoggingDestination::FileAndStderr) {
        // The GUI is still usable without a log sink.
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    tracing::info!("Starting paramlab GUI");

    paramlab_gui::run().map_err(|e| anyhow::anyhow!("GUI error: {}", e))?;

    Ok(())
}
