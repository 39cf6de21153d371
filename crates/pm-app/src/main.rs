//! Demo entry point
//!
//! Loads every bundled dataset and walks it through the sequence control,
//! logging what a map layer would draw at each step.

use anyhow::Result;
use tracing::{error, info};

mod demo;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let dir = demo::data_dir();
    info!("Replaying bundled datasets from {}", dir.display());

    let mut failures = 0;
    for dataset in demo::bundled() {
        let outcome = match demo::open(&dataset, &dir).await {
            Ok(mut session) => demo::replay(&mut session).map(|updates| updates.len()),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(steps) => info!("'{}' replayed over {} views", dataset.config.name, steps),
            Err(e) => {
                error!("'{}' failed: {:#}", dataset.config.name, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} dataset(s) failed to replay", failures);
    }
    Ok(())
}
