//! Command: print the inbox tool catalog.
use std::io::Write;

use anyhow::{Context as _, Result};

use crate::mail::tools::catalog;

/// Write the tool catalog to `out` as pretty JSON.
///
/// # Errors
///
/// Returns an error if the catalog cannot be encoded or written.
pub fn run(out: &mut dyn Write) -> Result<()> {
    let json = serde_json::to_string_pretty(&catalog()).context("encode tool catalog")?;
    writeln!(out, "{json}")?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_valid_json() {
        let mut out = Vec::new();
        run(&mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 3);
        assert_eq!(value[1]["name"], "delete_email");
    }
}
