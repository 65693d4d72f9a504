//! # Config Loader
//!
//! Locates and reads `key=value` configuration files. Interpreting the
//! values is left to the caller.
//!
//! ```no_run
//! use config_loader::{find_config_file, load_config_file, parse_entries};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let path = find_config_file("firewatch.conf", &[".", "./config"])?;
//!     let content = load_config_file(&path)?;
//!     for entry in parse_entries(&content)? {
//!         println!("{} = {}", entry.key, entry.value);
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;

pub use error::{ConfigError, Result};

use std::fs;
use std::path::{Path, PathBuf};

/// One `key=value` line of a configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    /// 1-based line number in the source file.
    pub line: usize,
    pub key: String,
    pub value: String,
}

/// Reads a configuration file into memory.
pub fn load_config_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();

    if !path.is_file() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    fs::read_to_string(path).map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))
}

/// Returns the first `<dir>/<filename>` that exists, trying `dirs` in order.
pub fn find_config_file<D: AsRef<Path>>(filename: &str, dirs: &[D]) -> Result<PathBuf> {
    for dir in dirs {
        let candidate = dir.as_ref().join(filename);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    let searched: Vec<String> = dirs
        .iter()
        .map(|d| d.as_ref().join(filename).display().to_string())
        .collect();
    Err(ConfigError::FileNotFound(format!(
        "'{}' (searched: {})",
        filename,
        searched.join(", ")
    )))
}

/// Splits file content into entries.
///
/// Blank lines and lines starting with `#` are skipped. Keys and values are
/// trimmed; the value keeps any further `=` characters.
pub fn parse_entries(content: &str) -> Result<Vec<ConfigEntry>> {
    let mut entries = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(ConfigError::Syntax {
                line: idx + 1,
                content: line.to_string(),
            });
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(ConfigError::Syntax {
                line: idx + 1,
                content: line.to_string(),
            });
        }

        entries.push(ConfigEntry {
            line: idx + 1,
            key: key.to_string(),
            value: value.trim().to_string(),
        });
    }

    Ok(entries)
}

/// `find_config_file` followed by `load_config_file` and `parse_entries`.
pub fn find_and_parse<D: AsRef<Path>>(
    filename: &str,
    dirs: &[D],
) -> Result<(PathBuf, Vec<ConfigEntry>)> {
    let path = find_config_file(filename, dirs)?;
    let content = load_config_file(&path)?;
    let entries = parse_entries(&content)?;
    Ok((path, entries))
}
