use crate::error::{CompileError, Result};
use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;

/// Modification times of `path` itself if it is a file, or of every file
/// below it if it is a directory. A missing path has no times.
pub fn modification_times(path: &Path) -> Result<Vec<SystemTime>> {
    let mut times = Vec::new();
    collect_times(path, &mut times).map_err(|e| CompileError::io(path, e))?;
    Ok(times)
}

fn collect_times(path: &Path, times: &mut Vec<SystemTime>) -> io::Result<()> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };

    if metadata.is_file() {
        times.push(metadata.modified()?);
    } else if metadata.is_dir() {
        for entry in fs::read_dir(path)? {
            collect_times(&entry?.path(), times)?;
        }
    }

    Ok(())
}

/// Whether a unit has to be regenerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Forced,
    /// The output directory is missing or empty.
    NoOutput,
    /// The source has no files to compare.
    NoInput,
    Stale,
    UpToDate,
}

impl Freshness {
    pub fn needs_rebuild(self) -> bool {
        !matches!(self, Self::UpToDate)
    }
}

/// Compares the newest input against the oldest existing output.
///
/// The unit is up to date only when every input is strictly older than
/// every output.
pub fn check_freshness(source: &Path, output: &Path, force: bool) -> Result<Freshness> {
    if force {
        return Ok(Freshness::Forced);
    }

    let Some(min_output) = modification_times(output)?.into_iter().min() else {
        return Ok(Freshness::NoOutput);
    };
    let Some(max_input) = modification_times(source)?.into_iter().max() else {
        return Ok(Freshness::NoInput);
    };

    if max_input < min_output {
        Ok(Freshness::UpToDate)
    } else {
        Ok(Freshness::Stale)
    }
}

pub fn needs_rebuild(source: &Path, output: &Path, force: bool) -> Result<bool> {
    Ok(check_freshness(source, output, force)?.needs_rebuild())
}
