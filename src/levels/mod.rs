//! Pattern library
//!
//! Levels are ordered lists of pattern entries (an item group followed by a gap). They are
//! loaded from `*.json` / `*.txt` files in a levels directory, or come from the built-in set
//! when nothing usable is found. The library is never empty.

pub mod builtin;
pub mod parse;

use std::path::{Path, PathBuf};

use crate::catalog::{Catalog, ItemKind};
use crate::clamp_index;
use crate::error::LevelLoadError;

/// One item group and the gap that follows it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternEntry {
    /// Resolved items, in placement order (never empty)
    pub items: Vec<ItemKind>,
    /// Horizontal gap after the group
    pub spacing: u32,
}

/// A named level (never empty once built)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelDefinition {
    pub name: String,
    pub patterns: Vec<PatternEntry>,
}

/// Encoding of a level source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Text,
}

impl SourceFormat {
    /// Format for a file extension (`json` / `txt`, case-insensitive)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(SourceFormat::Json),
            "txt" => Some(SourceFormat::Text),
            _ => None,
        }
    }
}

/// Raw contents of one level source
#[derive(Debug, Clone)]
pub struct LevelSource {
    /// Default level name (file stem)
    pub stem: String,
    pub format: SourceFormat,
    pub contents: String,
}

impl LevelSource {
    /// Read a level file. Returns `Ok(None)` for files that are not level sources.
    pub fn read(path: &Path) -> Result<Option<Self>, LevelLoadError> {
        let Some(format) = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(SourceFormat::from_extension)
        else {
            return Ok(None);
        };
        let contents = std::fs::read_to_string(path).map_err(|source| LevelLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Some(Self {
            stem,
            format,
            contents,
        }))
    }

    pub fn parse(&self, catalog: &Catalog) -> Result<LevelDefinition, LevelLoadError> {
        match self.format {
            SourceFormat::Json => parse::parse_json(&self.stem, &self.contents, catalog),
            SourceFormat::Text => parse::parse_text(&self.stem, &self.contents, catalog),
        }
    }
}

/// Ordered, non-empty collection of levels
#[derive(Debug, Clone)]
pub struct LevelLibrary {
    levels: Vec<LevelDefinition>,
}

impl Default for LevelLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LevelLibrary {
    /// The built-in level set
    pub fn builtin() -> Self {
        Self {
            levels: builtin::default_levels(),
        }
    }

    /// Load every level file in `dir` (sorted by path). Bad files are skipped; if none
    /// survive, the built-in set is used.
    pub fn load(dir: &Path, catalog: &Catalog) -> Self {
        let sources = match level_files(dir) {
            Ok(paths) => paths
                .iter()
                .filter_map(|path| match LevelSource::read(path) {
                    Ok(source) => source,
                    Err(e) => {
                        log::warn!("Skipping level file: {}", e);
                        None
                    }
                })
                .collect(),
            Err(e) => {
                log::info!("No level directory at {} ({})", dir.display(), e);
                Vec::new()
            }
        };
        Self::from_sources(sources, catalog)
    }

    /// Build a library from already-read sources, in the given order
    pub fn from_sources(sources: impl IntoIterator<Item = LevelSource>, catalog: &Catalog) -> Self {
        let levels: Vec<_> = sources
            .into_iter()
            .filter_map(|source| match source.parse(catalog) {
                Ok(level) => Some(level),
                Err(e) => {
                    log::warn!("Skipping level '{}': {}", source.stem, e);
                    None
                }
            })
            .collect();

        if levels.is_empty() {
            log::info!("No valid level files, using built-in levels");
            return Self::builtin();
        }
        log::info!("Loaded {} level(s)", levels.len());
        Self { levels }
    }

    /// Number of levels (always ≥ 1)
    pub fn count(&self) -> usize {
        self.levels.len()
    }

    /// Level at `index`, clamped into range
    pub fn get(&self, index: i64) -> &LevelDefinition {
        &self.levels[self.clamp(index)]
    }

    /// Name of the level at `index`, clamped into range
    pub fn name(&self, index: i64) -> &str {
        &self.get(index).name
    }

    /// Clamp a level index into `[0, count - 1]`
    pub fn clamp(&self, index: i64) -> usize {
        clamp_index(index, self.levels.len())
    }

    pub fn levels(&self) -> &[LevelDefinition] {
        &self.levels
    }
}

/// `*.json` and `*.txt` files in `dir`, sorted by path
fn level_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .and_then(SourceFormat::from_extension)
                    .is_some()
        })
        .collect();
    paths.sort();
    Ok(paths)
}
