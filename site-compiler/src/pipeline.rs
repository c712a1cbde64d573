use crate::error::{CompileError, Result};
use crate::staleness::check_freshness;
use crate::unit::{ContentUnit, INDEX_FILE};
use interfaces::defs::MarkdownConverter;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

pub const RAW_FILE: &str = "raw.md";
pub const HTML_FILE: &str = "index.html";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitOutcome {
    Generated,
    Skipped,
}

#[derive(Debug, Default)]
pub struct CompileReport {
    pub generated: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

impl CompileReport {
    pub fn total(&self) -> usize {
        self.generated.len() + self.skipped.len() + self.failed.len()
    }
}

/// Compiles a content tree into an output tree, regenerating only stale units.
pub struct CompilePipeline<C> {
    converter: C,
    force: bool,
}

impl<C: MarkdownConverter> CompilePipeline<C> {
    pub fn new(converter: C) -> Self {
        Self {
            converter,
            force: false,
        }
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }

    /// Compiles every markdown file and directory directly under
    /// `content_root`. A failing unit is recorded and does not stop the rest.
    pub fn compile_all(&self, content_root: &Path, output_root: &Path) -> Result<CompileReport> {
        fs::create_dir_all(output_root).map_err(|e| CompileError::io(output_root, e))?;

        let mut paths = fs::read_dir(content_root)
            .map_err(|e| CompileError::io(content_root, e))?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<io::Result<Vec<_>>>()
            .map_err(|e| CompileError::io(content_root, e))?;
        paths.sort();

        let mut report = CompileReport::default();
        for path in paths {
            let Some(unit) = ContentUnit::from_path(&path) else {
                debug!("Ignoring {}", path.display());
                continue;
            };

            match self.compile_unit(&unit, output_root) {
                Ok(UnitOutcome::Generated) => report.generated.push(path),
                Ok(UnitOutcome::Skipped) => report.skipped.push(path),
                Err(e) => {
                    error!("Failed to compile {}: {}", path.display(), e);
                    report.failed.push((path, e.to_string()));
                }
            }
        }

        info!(
            "Compiled {} units: {} generated, {} skipped, {} failed",
            report.total(),
            report.generated.len(),
            report.skipped.len(),
            report.failed.len()
        );
        Ok(report)
    }

    pub fn compile_unit(&self, unit: &ContentUnit, output_root: &Path) -> Result<UnitOutcome> {
        let post_dir = unit.output_dir(output_root)?;

        let freshness = check_freshness(unit.path(), &post_dir, self.force)?;
        if !freshness.needs_rebuild() {
            info!("Skipping {}", unit.path().display());
            return Ok(UnitOutcome::Skipped);
        }

        info!("Generating {} ({:?})", unit.path().display(), freshness);

        let source_md = unit.markdown_source();
        if matches!(unit, ContentUnit::Bundle(_)) && !source_md.is_file() {
            return Err(CompileError::MissingIndex(unit.path().to_path_buf()));
        }

        // Convert first so a failing unit leaves its previous output alone.
        let markdown = fs::read_to_string(&source_md).map_err(|e| CompileError::io(&source_md, e))?;
        let html = self
            .converter
            .convert(&markdown)
            .map_err(|e| CompileError::Conversion {
                path: source_md.clone(),
                message: format!("{:#}", e),
            })?;

        fs::create_dir_all(&post_dir).map_err(|e| CompileError::io(&post_dir, e))?;

        if let ContentUnit::Bundle(dir) = unit {
            copy_assets(dir, &post_dir)?;
        }

        if unit.keeps_raw_copy() {
            let raw = post_dir.join(RAW_FILE);
            copy_file(&source_md, &raw)?;
        }

        let target = post_dir.join(HTML_FILE);
        fs::write(&target, html).map_err(|e| CompileError::io(&target, e))?;

        Ok(UnitOutcome::Generated)
    }
}

/// Copies everything in a bundle except `index.md`. Nested directories are
/// copied as they are.
fn copy_assets(source_dir: &Path, target_dir: &Path) -> Result<()> {
    for entry in fs::read_dir(source_dir).map_err(|e| CompileError::io(source_dir, e))? {
        let path = entry.map_err(|e| CompileError::io(source_dir, e))?.path();
        let Some(name) = path.file_name() else {
            continue;
        };
        if name == INDEX_FILE {
            continue;
        }
        copy_recursive(&path, &target_dir.join(name))?;
    }
    Ok(())
}

fn copy_recursive(source: &Path, target: &Path) -> Result<()> {
    if source.is_dir() {
        fs::create_dir_all(target).map_err(|e| CompileError::io(target, e))?;
        for entry in fs::read_dir(source).map_err(|e| CompileError::io(source, e))? {
            let path = entry.map_err(|e| CompileError::io(source, e))?.path();
            if let Some(name) = path.file_name() {
                copy_recursive(&path, &target.join(name))?;
            }
        }
    } else {
        copy_file(source, target)?;
    }
    Ok(())
}

/// Copies contents only. The copy gets a fresh modification time, which the
/// staleness check relies on.
fn copy_file(source: &Path, target: &Path) -> Result<()> {
    let mut reader = File::open(source).map_err(|e| CompileError::io(source, e))?;
    let mut writer = File::create(target).map_err(|e| CompileError::io(target, e))?;
    io::copy(&mut reader, &mut writer).map_err(|e| CompileError::io(target, e))?;
    Ok(())
}
