const CONFIG_DIR_FLAG: &str = "--config-dir";

/// Recovers the install directory from a storage node service command line,
/// i.e. the argument of `--config-dir`.
///
/// A quoted argument is returned verbatim up to the closing quote, so any
/// trailing backslashes in the command line are kept as-is. Returns `None`
/// for a missing or empty command line and when the flag is absent.
pub fn extract_install_dir(service_cmd: Option<&str>) -> Option<String> {
    let service_cmd = service_cmd.filter(|s| !s.is_empty())?;

    let arg = flag_argument(service_cmd)?;

    let dir = match arg.strip_prefix('"') {
        Some(quoted) => quoted.split('"').next().unwrap_or(quoted),
        None => arg.split_whitespace().next().unwrap_or(""),
    };

    if dir.is_empty() {
        return None;
    }
    Some(dir.to_string())
}

/// Text following the first `--config-dir` that stands as its own token,
/// either `--config-dir X` or `--config-dir=X`. Quoted text is skipped while
/// scanning, so a path containing the flag name does not match.
fn flag_argument(service_cmd: &str) -> Option<&str> {
    let mut in_quotes = false;
    let mut token_start = true;
    for (i, c) in service_cmd.char_indices() {
        if c == '"' {
            in_quotes = !in_quotes;
        } else if !in_quotes && token_start {
            if let Some(rest) = service_cmd[i..].strip_prefix(CONFIG_DIR_FLAG) {
                if let Some(value) = rest.strip_prefix('=') {
                    return Some(value);
                }
                if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                    return Some(rest.trim_start());
                }
            }
        }
        token_start = !in_quotes && c.is_whitespace();
    }
    None
}
