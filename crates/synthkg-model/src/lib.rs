//! Synthkg graph model
//!
//! Leaf crate shared by the generators and the storage layer:
//!
//! - **Entity categories and relations**: the closed vocabulary of node
//!   categories (`uni`, `st`, `fr`, ...) and relation names (`enrolls`,
//!   `friend_of`, `sent_<n>`, ...) used by every synthetic dataset family.
//! - **Hierarchical node identifiers**: `NodeId` is a typed
//!   `category + integer path` record with a stable `tag-i-j-k` wire form.
//!   The path is the *only* place parentage is recorded, so the explanation
//!   engines parse and re-format ids instead of consulting side indexes.
//! - **Identifier allocator**: per-family, per-category counters, owned by a
//!   single dataset build (never process-global) so independent builds can
//!   run concurrently without colliding ids.
//! - **Directed attributed graph**: insertion-ordered nodes and edges with
//!   optional feature vectors, multiple relations between a node pair, and a
//!   hard no-duplicate-triple invariant.

pub mod entity;
pub mod error;
pub mod graph;
pub mod ident;
pub mod relation;

pub use entity::{EntityType, GeneratorFamily};
pub use error::ModelError;
pub use graph::{DirectedGraph, Edge, Node};
pub use ident::{IdAllocator, NodeId};
