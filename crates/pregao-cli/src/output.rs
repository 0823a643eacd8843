use std::io::Write;

use serde_json::Value;

use crate::error::CliError;

/// Write one JSON document to stdout, optionally indented.
pub fn render(value: &Value, pretty: bool) -> Result<(), CliError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    Ok(())
}
