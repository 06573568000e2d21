use std::io::IsTerminal;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub pretty: bool,
    pub use_color: bool,
}

impl OutputOptions {
    /// Prints `value` as JSON, or the text produced by `render` otherwise.
    pub fn emit<T: Serialize>(
        &self,
        value: &T,
        render: impl FnOnce(&T, bool) -> String,
    ) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let json = if self.pretty {
                    serde_json::to_string_pretty(value)?
                } else {
                    serde_json::to_string(value)?
                };
                println!("{}", json);
            }
            OutputFormat::Text => println!("{}", render(value, self.use_color)),
        }
        Ok(())
    }
}

pub fn parse_format(value: Option<&str>) -> OutputFormat {
    match value {
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Text,
    }
}

/// Resolves whether to colorize output from the `--no-color` flag, the
/// configured `color` setting (auto|always|never), `NO_COLOR` and whether
/// stdout is a terminal.
pub fn detect_color(color_flag: bool, setting: &str) -> bool {
    if !color_flag {
        return false;
    }
    match setting {
        "always" => true,
        "never" => false,
        _ => std::env::var("NO_COLOR").is_err() && std::io::stdout().is_terminal(),
    }
}
