use crate::error::{CompileError, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

pub const INDEX_FILE: &str = "index.md";
pub const STATIC_DIR: &str = "static";

/// One compilable item directly under the content root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentUnit {
    /// A single markdown file.
    Page(PathBuf),
    /// A directory holding `index.md` and its assets.
    Bundle(PathBuf),
}

impl ContentUnit {
    /// Classifies `path`, or returns `None` for anything that is not a
    /// directory or a `.md` file.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        if path.is_dir() {
            Some(Self::Bundle(path))
        } else if path.is_file() && path.extension() == Some(OsStr::new("md")) {
            Some(Self::Page(path))
        } else {
            None
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Page(path) | Self::Bundle(path) => path,
        }
    }

    /// The file whose contents become `index.html`.
    pub fn markdown_source(&self) -> PathBuf {
        match self {
            Self::Page(path) => path.clone(),
            Self::Bundle(dir) => dir.join(INDEX_FILE),
        }
    }

    /// `<output_root>/<stem>`, e.g. `posts/foo.md` and `posts/foo/` both map
    /// to `out/foo`.
    pub fn output_dir(&self, output_root: &Path) -> Result<PathBuf> {
        let stem = self
            .path()
            .file_stem()
            .ok_or_else(|| CompileError::InvalidUnit(self.path().to_path_buf()))?;
        Ok(output_root.join(stem))
    }

    /// Units whose content root is called `static` get no `raw.md` copy.
    /// Directories above the content root do not count.
    pub fn keeps_raw_copy(&self) -> bool {
        self.path()
            .parent()
            .and_then(Path::file_name)
            .map_or(true, |root| root != STATIC_DIR)
    }
}
