//! Defaults command implementation
//!
//! Prints the default configuration as TOML, ready to be edited and passed
//! back with `--config`.

use std::io::Write;

use crate::config::ValuationConfig;
use crate::Result;

/// Run the defaults command
pub fn run() -> Result<()> {
    let stdout = std::io::stdout();
    write_defaults(&mut stdout.lock())
}

fn write_defaults<W: Write>(out: &mut W) -> Result<()> {
    let text = ValuationConfig::default().to_toml_string()?;
    out.write_all(text.as_bytes())?;
    Ok(())
}
