use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Conversion of {} failed: {message}", .path.display())]
    Conversion { path: PathBuf, message: String },

    #[error("{} has no index.md", .0.display())]
    MissingIndex(PathBuf),

    #[error("{} is neither a markdown file nor a directory", .0.display())]
    InvalidUnit(PathBuf),
}

impl CompileError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CompileError>;
