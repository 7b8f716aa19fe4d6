// src/source/pairs.rs

use anyhow::{bail, Context, Result};
use glob::{glob, Pattern};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};
use tracing::{debug, trace, warn};

pub const SCHEMA_EXT: &str = "csv";
pub const DATA_EXT: &str = "txt";

/// A schema file and the data file that shares its stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePair {
    pub name: String,
    pub schema_path: PathBuf,
    pub data_path: PathBuf,
}

/// Result of matching `<schemas>/*.csv` against `<data>/*.txt`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    /// Sorted by name.
    pub pairs: Vec<FilePair>,
    pub orphan_schemas: Vec<PathBuf>,
    pub orphan_data: Vec<PathBuf>,
}

impl Discovery {
    pub fn orphans(&self) -> usize {
        self.orphan_schemas.len() + self.orphan_data.len()
    }
}

/// Both halves of a pair, read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairText {
    pub schema: String,
    pub data: String,
}

/// Collect `stem → path` for every `*.<ext>` file directly inside `dir`.
fn files_by_stem(dir: &Path, ext: &str) -> Result<BTreeMap<String, PathBuf>> {
    if !dir.is_dir() {
        bail!("{} is not a directory", dir.display());
    }
    let pattern = format!("{}/*.{}", Pattern::escape(&dir.to_string_lossy()), ext);
    let mut out = BTreeMap::new();
    for entry in glob(&pattern).with_context(|| format!("bad glob pattern {pattern}"))? {
        let path = match entry {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !path.is_file() {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            trace!(path = %path.display(), "found");
            out.insert(stem.to_string(), path.clone());
        }
    }
    Ok(out)
}

/// Pair every schema file with the data file of the same stem.
///
/// Files without a counterpart are returned as orphans rather than failing
/// the whole discovery; a missing directory is an error.
pub fn discover_pairs(schemas_dir: &Path, data_dir: &Path) -> Result<Discovery> {
    let schemas = files_by_stem(schemas_dir, SCHEMA_EXT)
        .with_context(|| format!("listing schemas in {}", schemas_dir.display()))?;
    let mut data = files_by_stem(data_dir, DATA_EXT)
        .with_context(|| format!("listing data files in {}", data_dir.display()))?;

    let mut discovery = Discovery::default();
    for (name, schema_path) in schemas {
        match data.remove(&name) {
            Some(data_path) => discovery.pairs.push(FilePair {
                name,
                schema_path,
                data_path,
            }),
            None => discovery.orphan_schemas.push(schema_path),
        }
    }
    discovery.orphan_data = data.into_values().collect();

    debug!(
        pairs = discovery.pairs.len(),
        orphans = discovery.orphans(),
        "discovered file pairs"
    );
    Ok(discovery)
}

/// Read both files of `pair` as UTF-8.
pub async fn read_pair(pair: &FilePair) -> Result<PairText> {
    let schema = tokio::fs::read_to_string(&pair.schema_path)
        .await
        .with_context(|| format!("reading schema {}", pair.schema_path.display()))?;
    let data = tokio::fs::read_to_string(&pair.data_path)
        .await
        .with_context(|| format!("reading data {}", pair.data_path.display()))?;
    Ok(PairText { schema, data })
}
