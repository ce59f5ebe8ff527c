use std::path::PathBuf;

/// Resolve the data directory: `-C` flag, then `$BB2_HOME`, then
/// `$HOME/.bb2do`.
pub fn resolve(flag: Option<&str>) -> Result<PathBuf, String> {
    if let Some(dir) = flag {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(dir) = std::env::var("BB2_HOME") {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    match std::env::var("HOME") {
        Ok(home) if !home.is_empty() => Ok(PathBuf::from(home).join(".bb2do")),
        _ => Err("cannot locate data directory: set $BB2_HOME or pass --data-dir".to_string()),
    }
}
