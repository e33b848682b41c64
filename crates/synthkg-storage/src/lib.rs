//! Synthkg storage layer
//!
//! Owns everything that touches the filesystem:
//!
//! - **Snapshot round-trip**: a dataset is saved under `root/<identity-hash>/`
//!   as a human-readable `parameters.json` plus an opaque `dataset.bin`
//!   (bincode inside a kind-tagged envelope, so restoring a FRUNI snapshot as
//!   an FTREE dataset fails loudly instead of deserializing garbage).
//! - **Triple export files**: per-split tab-separated `<split>.txt`,
//!   comma-flattened `<split>_explanations.txt`, an optional
//!   `test_random_<N>.txt` subset, and `node_category.json` mapping every
//!   node id to its category tag.
//! - **Key/value file logger**: the pluggable `log(key, value)` collaborator;
//!   a file-backed implementation and a no-op one.

pub mod error;
pub mod logger;
pub mod persistence;


pub use error::StorageError;
pub use logger::{FsLogger, KeyValueLog, NullLogger};
pub use persistence::{
    load_dataset, load_explanations, load_explanations_keyed, save_dataset, save_triples,
    TripleFileOptions, NODE_CATEGORY_FILE, PARAMETERS_FILE, SNAPSHOT_FILE,
};
