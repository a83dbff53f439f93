//! The user's ordered list of desired resolutions.
//!
//! The file is plain UTF-8 text with one `"<width> <height>"` line per
//! resolution. Line order is menu order. Anything unreadable is treated as if
//! the file did not exist, and [`load_or_init`] rewrites it with
//! [`DEFAULT_RESOLUTIONS`].

use std::path::{Path, PathBuf};
use std::{fs, io};

use crate::resolution::{res, Resolution};

/// Written on first run, in priority order.
pub const DEFAULT_RESOLUTIONS: [Resolution; 4] = [
    res(5120, 1440),
    res(3440, 1440),
    res(2560, 1440),
    res(1920, 1080),
];

/// Environment variable holding the per-user application data directory.
pub const APP_DATA_VAR: &str = "LOCALAPPDATA";
pub const APP_FOLDER: &str = "KRes";
pub const FILE_NAME: &str = "config.txt";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("LOCALAPPDATA is not set")]
    NoAppData,

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: {content:?} is not `<width> <height>`")]
    Parse { line: usize, content: String },
}

/// `<base>/KRes/config.txt`
pub fn config_path_in(base: impl AsRef<Path>) -> PathBuf {
    base.as_ref().join(APP_FOLDER).join(FILE_NAME)
}

/// Config location under the directory named by [`APP_DATA_VAR`].
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    match std::env::var_os(APP_DATA_VAR) {
        Some(base) if !base.is_empty() => Ok(config_path_in(base)),
        _ => Err(ConfigError::NoAppData),
    }
}

/// Parse config text. A leading byte-order mark and blank lines are skipped;
/// any other malformed line fails the whole file.
pub fn parse(text: &str) -> Result<Vec<Resolution>, ConfigError> {
    // Notepad may save UTF-8 with a BOM.
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            line.parse::<Resolution>().map_err(|_| ConfigError::Parse {
                line: i + 1,
                content: line.to_owned(),
            })
        })
        .collect()
}

/// One newline-terminated line per resolution.
pub fn render(resolutions: &[Resolution]) -> String {
    resolutions
        .iter()
        .map(|r| r.to_line() + "\n")
        .collect()
}

pub fn read(path: &Path) -> Result<Vec<Resolution>, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_owned(),
        source,
    })?;
    parse(&text)
}

/// Reads the configured list.
///
/// A missing, empty, unreadable or malformed file all come back as an empty
/// list.
pub fn load(path: &Path) -> Vec<Resolution> {
    match read(path) {
        Ok(resolutions) => resolutions,
        Err(ConfigError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            log::debug!("No config at {}", path.display());
            Vec::new()
        }
        Err(err) => {
            log::warn!("Ignoring config {}: {}", path.display(), err);
            Vec::new()
        }
    }
}

pub fn save(path: &Path, resolutions: &[Resolution]) -> Result<(), ConfigError> {
    let io_err = |source| ConfigError::Io {
        path: path.to_owned(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, render(resolutions)).map_err(io_err)
}

/// Write `defaults` to `path`, creating missing parent directories.
pub fn ensure_defaults(path: &Path, defaults: &[Resolution]) -> Result<(), ConfigError> {
    save(path, defaults)?;
    log::info!("Wrote {} default resolutions to {}", defaults.len(), path.display());
    Ok(())
}

/// Startup entry point: the configured list, or the defaults (persisted) if
/// there is nothing usable on disk.
pub fn load_or_init(path: &Path) -> Vec<Resolution> {
    let resolutions = load(path);
    if !resolutions.is_empty() {
        log::info!("Loaded {} resolutions from {}", resolutions.len(), path.display());
        return resolutions;
    }

    if let Err(err) = ensure_defaults(path, &DEFAULT_RESOLUTIONS) {
        log::error!("Failed to write default config: {}", err);
    }
    DEFAULT_RESOLUTIONS.to_vec()
}
