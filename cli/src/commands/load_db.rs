//! Load-db command - check that a signature database loads.

use std::path::Path;

use anyhow::{Context, Result};
use die_core::Detector;
use tracing::info;

pub fn run(path: &Path) -> Result<()> {
    let detector = Detector::new(super::engine()?);

    detector
        .load_database(path)
        .with_context(|| format!("Failed to load signature database {}", path.display()))?;

    info!(database = %path.display(), "Signature database loaded");
    println!("Signature database loaded: {}", path.display());
    Ok(())
}
