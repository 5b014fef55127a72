use serde::Serialize;

use crate::cli::OutputFormat;

/// Render a serializable response as pretty JSON.
pub fn render_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Print a response: JSON when requested, otherwise the given text lines.
pub fn output<T: Serialize>(
    value: &T,
    format: OutputFormat,
    text: impl FnOnce(&T) -> Vec<String>,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", render_json(value)?),
        OutputFormat::Text => {
            for line in text(value) {
                println!("{line}");
            }
        }
    }
    Ok(())
}
