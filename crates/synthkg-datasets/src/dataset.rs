//! The dataset container.
//!
//! Owns exactly one generated graph (built eagerly at construction, immutable
//! afterwards), the split percentages, and the seed. The identity hash is a
//! function of the construction parameters alone, never of the generated
//! graph content, so it can key directories and dedup runs.

use crate::error::DatasetError;
use crate::{DatasetParams, GraphGenerator, Triple};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use synthkg_model::DirectedGraph;
use tracing::debug;

/// Tolerance for the percentages-sum-to-one check; CLI-parsed floats are not
/// exactly representable.
const PERCENTAGE_SUM_EPS: f64 = 1e-9;

/// Split names by percentage-vector length.
fn split_names(n: usize) -> Option<&'static [&'static str]> {
    match n {
        2 => Some(&["train", "test"]),
        3 => Some(&["train", "valid", "test"]),
        _ => None,
    }
}

/// Export controls for [`Dataset::export`].
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Give every split the entire unsplit triple set (debugging superset
    /// export) instead of its slice.
    pub only_train: bool,
    /// Additionally draw this many triples without replacement from the last
    /// split. Zero disables; larger than the split is an integrity error.
    pub random_subset_size: usize,
}

/// One named split with its parallel explanation list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitExport {
    pub name: String,
    pub triples: Vec<Triple>,
    pub explanations: Vec<Vec<Triple>>,
}

/// The result of [`Dataset::export`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripleExport {
    pub splits: Vec<SplitExport>,
    /// `(requested size, triples)` when a random subset was asked for.
    pub random_subset: Option<(usize, Vec<Triple>)>,
}

/// A generated synthetic dataset of family `G`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "G::Params: Serialize",
    deserialize = "G::Params: Deserialize<'de>"
))]
pub struct Dataset<G: GraphGenerator> {
    params: G::Params,
    percentages: Vec<f64>,
    seed: u64,
    graph: DirectedGraph,
}

impl<G: GraphGenerator> Dataset<G> {
    /// Validate parameters, then build the graph exactly once.
    ///
    /// `percentages` must be 2 or 3 nonnegative values summing to 1.0,
    /// mapping to train/test or train/valid/test. All validation happens
    /// before the first random draw.
    pub fn new(params: G::Params, percentages: Vec<f64>, seed: u64) -> Result<Self, DatasetError> {
        if split_names(percentages.len()).is_none() {
            return Err(DatasetError::InvalidParameter {
                name: "percentages",
                reason: format!("expected 2 or 3 splits, got {}", percentages.len()),
            });
        }
        if percentages.iter().any(|p| *p < 0.0 || !p.is_finite()) {
            return Err(DatasetError::InvalidParameter {
                name: "percentages",
                reason: format!("all values must be nonnegative, got {percentages:?}"),
            });
        }
        let sum: f64 = percentages.iter().sum();
        if (sum - 1.0).abs() > PERCENTAGE_SUM_EPS {
            return Err(DatasetError::InvalidParameter {
                name: "percentages",
                reason: format!("must sum to 1.0, got {sum}"),
            });
        }
        params.validate()?;

        let mut rng = StdRng::seed_from_u64(seed);
        let graph = G::build(&params, &mut rng)?;
        debug!(
            kind = G::KIND,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            seed,
            "built synthetic graph"
        );

        Ok(Self {
            params,
            percentages,
            seed,
            graph,
        })
    }

    pub fn params(&self) -> &G::Params {
        &self.params
    }

    pub fn percentages(&self) -> &[f64] {
        &self.percentages
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn graph(&self) -> &DirectedGraph {
        &self.graph
    }

    /// Family tag recorded in snapshots.
    pub fn kind(&self) -> &'static str {
        G::KIND
    }

    /// Explanation for one edge of this dataset's graph.
    pub fn explain(
        &self,
        head: &str,
        relation: &str,
        tail: &str,
    ) -> Result<Vec<Triple>, DatasetError> {
        G::explain(&self.graph, head, relation, tail)
    }

    /// The canonical ordered identity record: `percentages` and `seed`
    /// first, then the family's own fields.
    pub fn identity_record(&self) -> Vec<(&'static str, String)> {
        let percentages = self
            .percentages
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join("_");
        let mut record = vec![("percentages", percentages), ("seed", self.seed.to_string())];
        record.extend(self.params.id_fields());
        record
    }

    /// Stable identity hash: SHA-256 over the joined `key=value` record.
    ///
    /// A pure function of the construction parameters — the generated graph
    /// never feeds the digest.
    pub fn identity(&self) -> String {
        let id_str = self
            .identity_record()
            .into_iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("-");
        let digest = Sha256::digest(id_str.as_bytes());
        format!("{digest:x}")
    }

    /// Flatten every edge into a triple, compute its explanation, shuffle
    /// both lists in parallel with a stream seeded from the dataset seed,
    /// and slice into named splits.
    ///
    /// Split sizes are `floor(percentage * total)` for every split but the
    /// last, which absorbs the rounding leftover, so the splits always
    /// partition the full edge set.
    pub fn export(&self, options: &ExportOptions) -> Result<TripleExport, DatasetError> {
        let mut triples = Vec::with_capacity(self.graph.edge_count());
        let mut explanations = Vec::with_capacity(self.graph.edge_count());
        for edge in self.graph.edges() {
            let (head, relation, tail) = edge.triple();
            explanations.push(self.explain(&head, &relation, &tail)?);
            triples.push((head, relation, tail));
        }

        // A fresh stream keyed by the dataset seed: repeated exports of one
        // dataset (or of a restored snapshot) come out identical.
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut order: Vec<usize> = (0..triples.len()).collect();
        order.shuffle(&mut rng);
        let triples: Vec<Triple> = order.iter().map(|&i| triples[i].clone()).collect();
        let explanations: Vec<Vec<Triple>> =
            order.iter().map(|&i| explanations[i].clone()).collect();

        let names = split_names(self.percentages.len()).expect("validated at construction");
        let total = triples.len();
        let mut sizes: Vec<usize> = self
            .percentages
            .iter()
            .map(|p| (p * total as f64).floor() as usize)
            .collect();
        let assigned: usize = sizes.iter().take(sizes.len() - 1).sum();
        *sizes.last_mut().expect("at least two splits") = total - assigned;

        let mut splits = Vec::with_capacity(sizes.len());
        let mut start = 0;
        for (name, size) in names.iter().zip(&sizes) {
            let end = start + size;
            let (split_triples, split_explanations) = if options.only_train {
                (triples.clone(), explanations.clone())
            } else {
                (
                    triples[start..end].to_vec(),
                    explanations[start..end].to_vec(),
                )
            };
            start = end;
            splits.push(SplitExport {
                name: name.to_string(),
                triples: split_triples,
                explanations: split_explanations,
            });
        }

        let random_subset = if options.random_subset_size > 0 {
            let last = splits.last().expect("at least two splits");
            let available = last.triples.len();
            if options.random_subset_size > available {
                return Err(DatasetError::Integrity(format!(
                    "random subset of {} requested but the last split has only {available} triples",
                    options.random_subset_size
                )));
            }
            let picked = crate::sampling::sample_without_replacement(
                &mut rng,
                available,
                options.random_subset_size,
            );
            let subset = picked.into_iter().map(|i| last.triples[i].clone()).collect();
            Some((options.random_subset_size, subset))
        } else {
            None
        };

        Ok(TripleExport {
            splits,
            random_subset,
        })
    }
}
