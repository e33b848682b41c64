//! User-Item-Attr: the recommendation-shaped family.
//!
//! Attributes carry one-hot feature vectors; items hold a sampled subset of
//! attributes; each user samples one taste attribute and buys items reachable
//! through it. A purchase is justified by the taste attribute holding each
//! bought item plus the purchases themselves, which the explanation engine
//! verifies against the graph edge by edge.

use crate::error::DatasetError;
use crate::sampling::{poisson_at_least, sample_without_replacement};
use crate::{DatasetParams, GraphGenerator, Triple};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use synthkg_model::{
    relation, DirectedGraph, Edge, EntityType, GeneratorFamily, IdAllocator, Node, NodeId,
};

/// Fixed 2-dim one-hot relation embeddings carried on every edge.
pub const HELD_BY_EMBEDDING: [f64; 2] = [1.0, 0.0];
pub const BOUGHT_BY_EMBEDDING: [f64; 2] = [0.0, 1.0];

/// User-item-attribute construction parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiaParams {
    /// Number of attribute nodes (>= 2).
    pub num_attrs: u32,
    /// Number of item nodes (>= 2).
    pub num_items: u32,
    /// Number of user nodes (>= 2).
    pub num_users: u32,
    /// Mean attributes per item (>= 0; 0 means exactly one).
    pub lambda_a: f64,
    /// Mean items bought per user (>= 0).
    pub lambda_i: f64,
}

impl DatasetParams for UiaParams {
    fn validate(&self) -> Result<(), DatasetError> {
        for (name, value) in [
            ("num_attrs", self.num_attrs),
            ("num_items", self.num_items),
            ("num_users", self.num_users),
        ] {
            if value < 2 {
                return Err(DatasetError::InvalidParameter {
                    name,
                    reason: format!("must be >= 2, got {value}"),
                });
            }
        }
        for (name, value) in [("lambda_a", self.lambda_a), ("lambda_i", self.lambda_i)] {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(DatasetError::InvalidParameter {
                    name,
                    reason: format!("must be a nonnegative finite rate, got {value}"),
                });
            }
        }
        Ok(())
    }

    fn id_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("num_attr", self.num_attrs.to_string()),
            ("num_it", self.num_items.to_string()),
            ("num_u", self.num_users.to_string()),
            ("lambda_a", self.lambda_a.to_string()),
            ("lambda_i", self.lambda_i.to_string()),
        ]
    }
}

/// The user-item-attr generator.
#[derive(Debug, Clone, Copy)]
pub struct Uia;

impl GraphGenerator for Uia {
    const KIND: &'static str = "user-item-attr";
    type Params = UiaParams;

    fn build(params: &UiaParams, rng: &mut StdRng) -> Result<DirectedGraph, DatasetError> {
        let mut alloc = IdAllocator::new(GeneratorFamily::UserItemAttr);
        alloc.reset(None);
        let mut graph = DirectedGraph::new();

        let num_attrs = params.num_attrs as usize;
        let mut attr_names = Vec::with_capacity(num_attrs);
        for i in 0..num_attrs {
            let mut features = vec![0.0; num_attrs];
            features[i] = 1.0;
            let attr_name = alloc.generate(EntityType::Attribute, &[])?.to_string();
            graph.add_node(
                &attr_name,
                Node::new(EntityType::Attribute).with_features(features),
            );
            attr_names.push(attr_name);
        }

        for _ in 0..params.num_items {
            let n = if params.lambda_a > 0.0 {
                poisson_at_least(rng, params.lambda_a, 1)?
            } else {
                1
            };
            let n = (n as usize).min(num_attrs);

            let item_name = alloc.generate(EntityType::Item, &[])?.to_string();
            graph.add_node(
                &item_name,
                Node::new(EntityType::Item).with_features(vec![0.0; num_attrs]),
            );
            for attr_idx in sample_without_replacement(rng, num_attrs, n) {
                graph.add_edge(
                    Edge::new(&attr_names[attr_idx], &item_name, relation::HELD_BY)
                        .with_features(HELD_BY_EMBEDDING.to_vec()),
                );
            }
        }

        for _ in 0..params.num_users {
            let user_name = alloc.generate(EntityType::User, &[])?.to_string();
            let taste = attr_names[rng.gen_range(0..num_attrs)].clone();
            graph.add_node(
                &user_name,
                Node::new(EntityType::User)
                    .with_features(vec![-1.0; num_attrs])
                    .with_annotation(&taste),
            );

            // Only items reachable through the taste attribute are buyable.
            // A taste with zero linked items clamps to zero purchases; the
            // user still exists.
            let buyable: Vec<String> = graph
                .successors(&taste, relation::HELD_BY)
                .into_iter()
                .map(str::to_string)
                .collect();
            let n = poisson_at_least(rng, params.lambda_i, 1)?;
            let n = (n as usize).min(buyable.len());
            for item_idx in sample_without_replacement(rng, buyable.len(), n) {
                graph.add_edge(
                    Edge::new(&buyable[item_idx], &user_name, relation::BOUGHT_BY)
                        .with_features(BOUGHT_BY_EMBEDDING.to_vec()),
                );
            }
        }

        Ok(graph)
    }

    fn explain(
        graph: &DirectedGraph,
        head: &str,
        relation_name: &str,
        tail: &str,
    ) -> Result<Vec<Triple>, DatasetError> {
        let this: Triple = (
            head.to_string(),
            relation_name.to_string(),
            tail.to_string(),
        );

        if relation_name == relation::HELD_BY {
            return Ok(vec![this]);
        }
        if relation_name != relation::BOUGHT_BY {
            return Err(DatasetError::unrecognized(
                head,
                relation_name,
                tail,
                "relation is neither held_by nor bought_by",
            ));
        }

        let tail_id: NodeId = tail
            .parse()
            .map_err(|e| DatasetError::unrecognized(head, relation_name, tail, format!("{e}")))?;
        if tail_id.category != EntityType::User {
            return Err(DatasetError::unrecognized(
                head,
                relation_name,
                tail,
                "bought_by tail must be a user",
            ));
        }

        let user_node = graph.node(tail).ok_or_else(|| {
            DatasetError::Integrity(format!("user node `{tail}` is not in the graph"))
        })?;
        let taste = user_node.annotation.as_deref().ok_or_else(|| {
            DatasetError::Integrity(format!("user node `{tail}` has no taste attribute"))
        })?;

        let mut explanation = vec![this];
        for item in graph.predecessors(tail, relation::BOUGHT_BY) {
            if !graph.has_edge(taste, relation::HELD_BY, item) {
                return Err(DatasetError::Integrity(format!(
                    "justifying edge ({taste}, held_by, {item}) is missing"
                )));
            }
            if !graph.has_edge(item, relation::BOUGHT_BY, tail) {
                return Err(DatasetError::Integrity(format!(
                    "justifying edge ({item}, bought_by, {tail}) is missing"
                )));
            }
            explanation.push((
                taste.to_string(),
                relation::HELD_BY.to_string(),
                item.to_string(),
            ));
            explanation.push((
                item.to_string(),
                relation::BOUGHT_BY.to_string(),
                tail.to_string(),
            ));
        }

        Ok(explanation)
    }
}
