// One module per CLI subcommand; main.rs stays focused on parsing and
// dispatch.

pub mod mine;
pub mod sell;

use anyhow::{bail, Result};

/// Shared numeric sanity checks for constraint options.
pub fn validate_positive(name: &str, value: f64) -> Result<()> {
    if !(value.is_finite() && value > 0.0) {
        bail!("{name} must be a positive number, got {value}");
    }
    Ok(())
}
