use std::path::PathBuf;

/// Failures while loading inputs. The engine itself cannot fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to parse JSON source file ({}): {source}", path.display())]
    Json { path: PathBuf, source: serde_json::Error },
    #[error("failed to parse NDJSON record ({}, line {line}): {source}", path.display())]
    NdjsonLine { path: PathBuf, line: usize, source: serde_json::Error },
    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("unreadable glob match: {0}")]
    Glob(#[from] glob::GlobError),
    #[error("glob pattern matched no files: {0}")]
    NoMatch(String),
    #[error("JSON pointer {pointer} selects nothing in {}", path.display())]
    Pointer { path: PathBuf, pointer: String },
    #[error("failed to apply jq expression to source file ({}): {message}", path.display())]
    Jq { path: PathBuf, message: String },
    #[error("invalid settings file ({}): {message}", path.display())]
    Settings { path: PathBuf, message: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
