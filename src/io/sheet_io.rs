use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Error type for reading sheets and writing results
#[derive(Debug, thiserror::Error)]
pub enum SheetIoError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not read stdin: {0}")]
    StdinError(#[source] io::Error),
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: io::Error,
    },
    #[error("io error: {0}")]
    IoError(#[from] io::Error),
}

/// Read a sheet from `path`, or from stdin when no path is given
pub fn read_sheet(path: Option<&Path>) -> Result<String, SheetIoError> {
    match path {
        Some(path) => {
            log::debug!("reading sheet from {}", path.display());
            fs::read_to_string(path).map_err(|e| SheetIoError::ReadError {
                path: path.to_path_buf(),
                source: e,
            })
        }
        None => {
            log::debug!("reading sheet from stdin");
            read_sheet_from(io::stdin().lock()).map_err(SheetIoError::StdinError)
        }
    }
}

pub fn read_sheet_from(mut reader: impl Read) -> io::Result<String> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(text)
}

/// Write a result to `path`, or to stdout when no path is given.
/// A final newline is added when missing.
pub fn write_output(path: Option<&Path>, content: &str) -> Result<(), SheetIoError> {
    let content = with_trailing_newline(content);
    match path {
        Some(path) => {
            log::debug!("writing {} bytes to {}", content.len(), path.display());
            atomic_write(path, content.as_bytes()).map_err(|e| SheetIoError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

fn with_trailing_newline(content: &str) -> String {
    let mut out = content.to_string();
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
