use crate::entity::{EntityType, GeneratorFamily};
use thiserror::Error;

/// Errors raised by the model layer: identifier allocation and parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("entity category `{category}` is not known to the {family} family")]
    UnsupportedCategory {
        family: GeneratorFamily,
        category: EntityType,
    },

    #[error("category `{category}` takes {expected} path component(s), got {got}")]
    WrongArity {
        category: EntityType,
        expected: usize,
        got: usize,
    },

    #[error("unknown entity tag `{tag}`")]
    UnknownTag { tag: String },

    #[error("malformed node id `{id}`: {reason}")]
    MalformedId { id: String, reason: String },
}
