//! FTREE: the family-tree family.
//!
//! Each tree grows a Poisson-sized set of branches from one progenitor. A
//! branch is a chain of kids of uniformly sampled length, capped by a
//! `last kid` node and a hobby node whose sentiment relation name carries the
//! chain length. That length is what the explanation engine decodes to
//! regenerate the whole ancestor chain positionally.

use crate::error::DatasetError;
use crate::sampling::poisson_at_least;
use crate::{DatasetParams, GraphGenerator, Triple};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use synthkg_model::{
    relation, DirectedGraph, Edge, EntityType, GeneratorFamily, IdAllocator, Node, NodeId,
};

/// FTREE construction parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FtreeParams {
    /// Number of family trees (> 0).
    pub n_t: u32,
    /// Mean branches per tree (> 0).
    pub lambda_b: f64,
    /// Number of distinct branch lengths; lengths are drawn uniformly from
    /// `1..=n_d` (>= 2).
    pub n_d: u32,
}

impl FtreeParams {
    /// Every relation name the generated graph can contain: `ancestor_of`
    /// plus one sentiment relation per available branch length.
    pub fn relation_names(&self) -> Vec<String> {
        let mut names = vec![relation::ANCESTOR_OF.to_string()];
        names.extend((1..=self.n_d).map(relation::sentiment));
        names
    }
}

impl DatasetParams for FtreeParams {
    fn validate(&self) -> Result<(), DatasetError> {
        if self.n_t == 0 {
            return Err(DatasetError::InvalidParameter {
                name: "n_t",
                reason: "must be > 0".to_string(),
            });
        }
        if !(self.lambda_b > 0.0) || !self.lambda_b.is_finite() {
            return Err(DatasetError::InvalidParameter {
                name: "lambda_b",
                reason: format!("must be a positive finite rate, got {}", self.lambda_b),
            });
        }
        if self.n_d < 2 {
            return Err(DatasetError::InvalidParameter {
                name: "n_d",
                reason: format!("must be >= 2, got {}", self.n_d),
            });
        }
        Ok(())
    }

    fn id_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("n_t", self.n_t.to_string()),
            ("lambda_b", self.lambda_b.to_string()),
            ("n_d", self.n_d.to_string()),
        ]
    }
}

/// The FTREE generator.
#[derive(Debug, Clone, Copy)]
pub struct Ftree;

impl GraphGenerator for Ftree {
    const KIND: &'static str = "ftree";
    type Params = FtreeParams;

    fn build(params: &FtreeParams, rng: &mut StdRng) -> Result<DirectedGraph, DatasetError> {
        let mut alloc = IdAllocator::new(GeneratorFamily::Ftree);
        alloc.reset(None);
        let mut graph = DirectedGraph::new();

        for tree_id in 0..params.n_t {
            let progenitor_name = alloc
                .generate(EntityType::Progenitor, &[tree_id])?
                .to_string();
            graph.add_node(&progenitor_name, Node::new(EntityType::Progenitor));

            let num_branches = poisson_at_least(rng, params.lambda_b, 2)?;
            for branch_id in 0..num_branches {
                let b_len = rng.gen_range(1..=params.n_d);

                // Chain of kids, first one hanging off the progenitor.
                let mut prev_name = progenitor_name.clone();
                for kid_id in 0..b_len {
                    let kid_name = alloc
                        .generate(EntityType::Kid, &[tree_id, branch_id as u32, kid_id])?
                        .to_string();
                    graph.add_node(&kid_name, Node::new(EntityType::Kid));
                    graph.add_edge(Edge::new(&prev_name, &kid_name, relation::ANCESTOR_OF));
                    prev_name = kid_name;
                }

                let hobby_name = alloc
                    .generate(EntityType::Hobby, &[tree_id, branch_id as u32])?
                    .to_string();
                graph.add_node(&hobby_name, Node::new(EntityType::Hobby));
                graph.add_edge(Edge::new(
                    &prev_name,
                    &hobby_name,
                    relation::sentiment(b_len),
                ));

                let last_kid_name = alloc
                    .generate(EntityType::LastKid, &[tree_id, branch_id as u32])?
                    .to_string();
                graph.add_node(&last_kid_name, Node::new(EntityType::LastKid));
                graph.add_edge(Edge::new(&prev_name, &last_kid_name, relation::ANCESTOR_OF));
            }
        }

        Ok(graph)
    }

    fn explain(
        _graph: &DirectedGraph,
        head: &str,
        relation_name: &str,
        tail: &str,
    ) -> Result<Vec<Triple>, DatasetError> {
        let this: Triple = (
            head.to_string(),
            relation_name.to_string(),
            tail.to_string(),
        );

        if relation_name == relation::ANCESTOR_OF {
            return Ok(vec![this]);
        }

        let Some(b_len) = relation::sentiment_branch_length(relation_name) else {
            return Err(DatasetError::unrecognized(
                head,
                relation_name,
                tail,
                "relation is neither ancestor_of nor a sentiment relation",
            ));
        };

        let head_id: NodeId = head
            .parse()
            .map_err(|e| DatasetError::unrecognized(head, relation_name, tail, format!("{e}")))?;
        let tail_id: NodeId = tail
            .parse()
            .map_err(|e| DatasetError::unrecognized(head, relation_name, tail, format!("{e}")))?;

        let (EntityType::Kid, [h_tree, h_branch, _]) = (head_id.category, &head_id.path[..])
        else {
            return Err(DatasetError::unrecognized(
                head,
                relation_name,
                tail,
                "sentiment head must be a kid with three path components",
            ));
        };
        let (EntityType::Hobby, [t_tree, t_branch]) = (tail_id.category, &tail_id.path[..]) else {
            return Err(DatasetError::unrecognized(
                head,
                relation_name,
                tail,
                "sentiment tail must be a hobby with two path components",
            ));
        };
        if h_tree != t_tree || h_branch != t_branch {
            return Err(DatasetError::unrecognized(
                head,
                relation_name,
                tail,
                "head and tail disagree on tree/branch ids",
            ));
        }

        // Regenerate the whole ancestor chain positionally. The tree id is
        // preserved at every position, including the previous-kid link.
        let tree = *t_tree;
        let branch = *t_branch;
        let mut explanation = vec![this];
        let mut prev_name = NodeId::new(EntityType::Progenitor, vec![tree]).to_string();
        for kid_id in 0..b_len {
            let kid_name = NodeId::new(EntityType::Kid, vec![tree, branch, kid_id]).to_string();
            explanation.push((
                prev_name,
                relation::ANCESTOR_OF.to_string(),
                kid_name.clone(),
            ));
            prev_name = kid_name;
        }

        Ok(explanation)
    }
}
