//! Dataset persistence: snapshot round-trip and triple export files.

use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use synthkg_datasets::{Dataset, ExportOptions, GraphGenerator, Triple};
use tracing::info;

pub const SNAPSHOT_FILE: &str = "dataset.bin";
pub const PARAMETERS_FILE: &str = "parameters.json";
pub const NODE_CATEGORY_FILE: &str = "node_category.json";

/// Opaque snapshot wrapper. The kind tag is checked on restore so a snapshot
/// can only come back as the family that wrote it.
#[derive(Serialize, Deserialize)]
struct SnapshotEnvelope {
    kind: String,
    payload: Vec<u8>,
}

/// Controls for [`save_triples`].
#[derive(Debug, Clone)]
pub struct TripleFileOptions {
    /// Write under `root/<identity-hash>/` (the default) instead of directly
    /// under `root`.
    pub use_hash: bool,
    /// Give every split file the entire unsplit triple set.
    pub only_train: bool,
    /// Additionally export this many random triples from the last split as
    /// `test_random_<N>.txt`. Zero disables.
    pub random_subset_size: usize,
}

impl Default for TripleFileOptions {
    fn default() -> Self {
        Self {
            use_hash: true,
            only_train: false,
            random_subset_size: 0,
        }
    }
}

/// Save the full dataset under `root/<identity-hash>/`: the human-readable
/// parameter record plus the opaque snapshot. Returns the folder written.
pub fn save_dataset<G: GraphGenerator>(
    dataset: &Dataset<G>,
    root: &Path,
) -> Result<PathBuf, StorageError> {
    let folder = root.join(dataset.identity());
    fs::create_dir_all(&folder)?;
    info!(folder = %folder.display(), kind = dataset.kind(), "saving dataset");

    let record: Vec<(&str, String)> = dataset.identity_record();
    let mut parameters = serde_json::Map::new();
    for (key, value) in record {
        parameters.insert(key.to_string(), serde_json::Value::String(value));
    }
    fs::write(
        folder.join(PARAMETERS_FILE),
        serde_json::to_string_pretty(&parameters)?,
    )?;

    let envelope = SnapshotEnvelope {
        kind: dataset.kind().to_string(),
        payload: bincode::serialize(dataset)?,
    };
    fs::write(folder.join(SNAPSHOT_FILE), bincode::serialize(&envelope)?)?;

    Ok(folder)
}

/// Restore a dataset from a folder written by [`save_dataset`]. Fails with
/// [`StorageError::KindMismatch`] when the snapshot belongs to a different
/// family than `G`.
pub fn load_dataset<G: GraphGenerator>(folder: &Path) -> Result<Dataset<G>, StorageError> {
    let bytes = fs::read(folder.join(SNAPSHOT_FILE))?;
    let envelope: SnapshotEnvelope = bincode::deserialize(&bytes)?;
    if envelope.kind != G::KIND {
        return Err(StorageError::KindMismatch {
            expected: G::KIND,
            found: envelope.kind,
        });
    }
    let dataset = bincode::deserialize(&envelope.payload)?;
    info!(folder = %folder.display(), kind = G::KIND, "restored dataset");
    Ok(dataset)
}

/// Export the shuffled, split triple files.
///
/// Writes per split `<name>.txt` (tab-separated head/relation/tail rows) and
/// `<name>_explanations.txt` (one comma-flattened triple sequence per row),
/// plus the node-category map and, when requested, the random test subset.
/// Returns the folder written.
pub fn save_triples<G: GraphGenerator>(
    dataset: &Dataset<G>,
    root: &Path,
    options: &TripleFileOptions,
) -> Result<PathBuf, StorageError> {
    let folder = if options.use_hash {
        root.join(dataset.identity())
    } else {
        root.to_path_buf()
    };
    fs::create_dir_all(&folder)?;

    let export = dataset.export(&ExportOptions {
        only_train: options.only_train,
        random_subset_size: options.random_subset_size,
    })?;

    for split in &export.splits {
        let path = folder.join(format!("{}.txt", split.name));
        info!(path = %path.display(), triples = split.triples.len(), "writing split");
        let mut file = fs::File::create(&path)?;
        for (head, relation, tail) in &split.triples {
            writeln!(file, "{head}\t{relation}\t{tail}")?;
        }

        let path = folder.join(format!("{}_explanations.txt", split.name));
        let mut file = fs::File::create(&path)?;
        for explanation in &split.explanations {
            let flat: Vec<&str> = explanation
                .iter()
                .flat_map(|(h, r, t)| [h.as_str(), r.as_str(), t.as_str()])
                .collect();
            writeln!(file, "{}", flat.join(","))?;
        }
    }

    if let Some((requested, subset)) = &export.random_subset {
        let path = folder.join(format!("test_random_{requested}.txt"));
        let mut file = fs::File::create(&path)?;
        for (head, relation, tail) in subset {
            writeln!(file, "{head}\t{relation}\t{tail}")?;
        }
    }

    let mut categories = serde_json::Map::new();
    for (id, node) in dataset.graph().nodes() {
        categories.insert(id.to_string(), serde_json::to_value(node.category)?);
    }
    fs::write(
        folder.join(NODE_CATEGORY_FILE),
        serde_json::to_string_pretty(&categories)?,
    )?;

    Ok(folder)
}

/// Parse a `<split>_explanations.txt` file back into triple sequences.
pub fn load_explanations(path: &Path) -> Result<Vec<Vec<Triple>>, StorageError> {
    let file = fs::File::open(path)?;
    let mut explanations = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() % 3 != 0 {
            return Err(StorageError::MalformedExplanations {
                path: path.to_path_buf(),
                reason: format!("row of {} fields is not a triple sequence", fields.len()),
            });
        }
        let explanation = fields
            .chunks(3)
            .map(|t| (t[0].to_string(), t[1].to_string(), t[2].to_string()))
            .collect();
        explanations.push(explanation);
    }
    Ok(explanations)
}

/// Like [`load_explanations`], but keyed by each sequence's leading triple
/// (the explained edge itself).
pub fn load_explanations_keyed(
    path: &Path,
) -> Result<HashMap<Triple, Vec<Triple>>, StorageError> {
    let mut keyed = HashMap::new();
    for mut explanation in load_explanations(path)? {
        if explanation.is_empty() {
            continue;
        }
        let key = explanation.remove(0);
        keyed.insert(key, explanation);
    }
    Ok(keyed)
}
