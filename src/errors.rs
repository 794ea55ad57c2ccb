use miette::Diagnostic;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum FileOperation {
    #[error("reading a file")]
    Read,
    #[error("writing a file")]
    Write,
    #[error("creating a directory")]
    Mkdir,
    #[error("removing a path")]
    Remove,
    #[error("copying a file")]
    Copy,
}

#[derive(Debug, Error, Diagnostic)]
#[error("I/O error: {operation} on path '{path}'")]
#[diagnostic(
    code(create_litpress::io),
    help("Check file permissions, disk space, or that the path is correct.")
)]
pub struct IoError {
    pub operation: FileOperation,
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}
impl IoError {
    pub fn new(operation: FileOperation, path: PathBuf, error: std::io::Error) -> Self {
        Self {
            operation,
            path,
            source: error,
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
#[error("unable to parse toml file at '{path}'")]
#[diagnostic(code(create_litpress::parse_toml), help("Review the toml file"))]
pub struct ParseError {
    pub path: PathBuf,
    #[source]
    pub source: toml::de::Error,
}

/// Failure to load a toml document from disk.
#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),
}

pub fn read_text(path: &Path) -> Result<String, IoError> {
    std::fs::read_to_string(path)
        .map_err(|error| IoError::new(FileOperation::Read, path.to_path_buf(), error))
}

pub fn write_text(path: &Path, contents: &str) -> Result<(), IoError> {
    std::fs::write(path, contents)
        .map_err(|error| IoError::new(FileOperation::Write, path.to_path_buf(), error))
}

/// Creates `path` and any missing parents. Existing directories are fine.
pub fn create_dir(path: &Path) -> Result<(), IoError> {
    std::fs::create_dir_all(path)
        .map_err(|error| IoError::new(FileOperation::Mkdir, path.to_path_buf(), error))
}

/// Reads and deserializes the toml document at `path`.
pub fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let content = read_text(path)?;

    let parsed = toml::from_str(&content).map_err(|error| ParseError {
        path: path.to_path_buf(),
        source: error,
    })?;

    Ok(parsed)
}
