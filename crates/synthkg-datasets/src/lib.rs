//! Synthetic explainable knowledge-graph generators
//!
//! Three independent dataset families, each a deterministic function of a
//! small parameter record plus a seed:
//!
//! - **FRUNI** (`fruni`): universities, students, friends; collaboration
//!   edges between universities; fully bipartite friend cross-links inside
//!   the first `n_f` universities.
//! - **FTREE** (`ftree`): family trees; progenitor, kid chains of sampled
//!   length, a sentiment edge whose relation name carries the chain length.
//! - **User-Item-Attr** (`uia`): attributes with one-hot features, items
//!   holding sampled attributes, users buying items reachable through a
//!   sampled taste attribute.
//!
//! For every generated edge the matching explanation engine reconstructs the
//! ordered list of triples that justify it, re-deriving intermediate
//! identifiers from the id hierarchy instead of consulting stored state.
//!
//! ## Determinism
//!
//! Every random draw goes through one explicit `StdRng` seeded from the
//! dataset seed, in a fixed order; never a hidden global stream. Two builds
//! with the same parameters and seed produce identical graphs, and identical
//! shuffled triple exports.

pub mod dataset;
pub mod error;
pub mod fruni;
pub mod ftree;
pub mod sampling;
pub mod uia;

pub use dataset::{Dataset, ExportOptions, SplitExport, TripleExport};
pub use error::DatasetError;
pub use fruni::{Fruni, FruniParams};
pub use ftree::{Ftree, FtreeParams};
pub use uia::{Uia, UiaParams};

use rand::rngs::StdRng;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use synthkg_model::DirectedGraph;

/// A `(head, relation, tail)` directed labeled edge in exported form.
pub type Triple = (String, String, String);

/// Parameter record of one dataset family.
pub trait DatasetParams: Clone + fmt::Debug + Serialize + DeserializeOwned {
    /// Check numeric preconditions. Runs before any random draw.
    fn validate(&self) -> Result<(), DatasetError>;

    /// Ordered `key=value` fields that feed the identity hash. Order is part
    /// of the wire contract: changing it changes every hash.
    fn id_fields(&self) -> Vec<(&'static str, String)>;
}

/// One dataset family: a graph builder paired with its inverse explanation
/// function. `Dataset` composes against this trait.
pub trait GraphGenerator {
    /// Stable family tag, recorded in snapshots so a restore as the wrong
    /// family fails loudly.
    const KIND: &'static str;

    type Params: DatasetParams;

    /// Build the full graph from validated parameters. Draw order against
    /// `rng` is fixed; see the module docs.
    fn build(params: &Self::Params, rng: &mut StdRng) -> Result<DirectedGraph, DatasetError>;

    /// Reconstruct the ordered justification for one existing edge.
    fn explain(
        graph: &DirectedGraph,
        head: &str,
        relation: &str,
        tail: &str,
    ) -> Result<Vec<Triple>, DatasetError>;
}
