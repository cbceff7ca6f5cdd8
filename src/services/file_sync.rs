use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LoadCause, SyncError};
use crate::model::profile::{self, LanguageProfile};
use crate::model::record::Record;
use crate::services::encoding::{self, TextEncoding};
use crate::services::rebuild;

#[cfg(target_os = "macos")]
const MACOS_DIR_NAME: &str = "DKST LLM Chat";

/// Decoded lines of a dictionary file and the encoding that worked.
#[derive(Debug)]
pub struct LoadedFile {
    pub lines: Vec<String>,
    pub encoding: TextEncoding,
}

/// Picks the directory holding the dictionary files, creating it if needed.
pub fn resolve_base_dir(override_dir: Option<&Path>) -> Result<PathBuf, SyncError> {
    let cwd = std::env::current_dir().ok();
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf));

    let dir = override_dir
        .map(Path::to_path_buf)
        .or_else(|| cwd.clone().filter(|d| has_known_file(d)))
        .or_else(platform_dir)
        .or(exe_dir)
        .or(cwd)
        .unwrap_or_else(|| PathBuf::from("."));

    ensure_dir(&dir)?;
    log::info!("dictionary directory: {}", dir.display());
    Ok(dir)
}

/// True when `dir` already holds at least one profile's file.
pub fn has_known_file(dir: &Path) -> bool {
    profile::filenames().any(|name| dir.join(name).is_file())
}

#[cfg(target_os = "macos")]
fn platform_dir() -> Option<PathBuf> {
    directories::UserDirs::new()
        .and_then(|dirs| dirs.document_dir().map(Path::to_path_buf))
        .map(|docs| docs.join(MACOS_DIR_NAME))
}

#[cfg(not(target_os = "macos"))]
fn platform_dir() -> Option<PathBuf> {
    None
}

pub fn ensure_dir(dir: &Path) -> Result<(), SyncError> {
    fs::create_dir_all(dir).map_err(|source| SyncError::Create {
        path: dir.to_path_buf(),
        source,
    })
}

pub fn profile_path(base_dir: &Path, profile: &LanguageProfile) -> PathBuf {
    base_dir.join(profile.filename)
}

/// Creates an empty file at `path` when nothing is there yet.
/// Returns whether the file was created.
pub fn bootstrap(path: &Path) -> Result<bool, SyncError> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }

    fs::write(path, b"").map_err(|source| SyncError::Create {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!("created empty dictionary {}", path.display());
    Ok(true)
}

/// Bootstraps then reads `path`, trying each known encoding in turn.
pub fn read_lines(path: &Path) -> Result<LoadedFile, SyncError> {
    bootstrap(path)?;

    let bytes = fs::read(path).map_err(|e| SyncError::Load {
        path: path.to_path_buf(),
        cause: LoadCause::Io(e),
    })?;

    let decoded = encoding::decode(&bytes).map_err(|failure| SyncError::Load {
        path: path.to_path_buf(),
        cause: LoadCause::Undecodable {
            tried: failure.tried,
            last: failure.last,
        },
    })?;

    Ok(LoadedFile {
        lines: split_lines(&decoded.text),
        encoding: decoded.encoding,
    })
}

/// Splits on `\r\n`, `\n` and a bare `\r` alike.
fn split_lines(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .lines()
        .map(str::to_string)
        .collect()
}

/// Writes already-cleaned records as UTF-8 with LF line endings.
pub fn write_records(path: &Path, records: &[Record]) -> Result<(), SyncError> {
    let text = rebuild::rebuild(records);
    write_atomic(path, text.as_bytes()).map_err(|source| SyncError::Save {
        path: path.to_path_buf(),
        source,
    })
}

fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let tmp = tmp_path(path);

    if let Some(parent) = tmp.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(&tmp, bytes)?;

    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }

    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut p = path.to_path_buf();
    let file_name = match path.file_name().and_then(|s| s.to_str()) {
        Some(n) => n.to_string(),
        None => "dictionary".to_string(),
    };
    p.set_file_name(format!("{file_name}.tmp"));
    p
}
