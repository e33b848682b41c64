//! FRUNI: the friendship / university interaction family.
//!
//! Every university enrolls exactly two students; each student has a
//! Poisson-sized circle of friends. Inside the first `n_f` universities the
//! two friend circles are cross-linked fully bipartitely, which is what makes
//! friend-friend edges explainable: the justification walks back through each
//! friend's student and, across circles, through the shared university.

use crate::error::DatasetError;
use crate::sampling::{coin, poisson_at_least};
use crate::{DatasetParams, GraphGenerator, Triple};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use synthkg_model::{
    relation, DirectedGraph, Edge, EntityType, GeneratorFamily, IdAllocator, Node, NodeId,
};

/// Students enrolled per university. Constant, but part of the identity
/// record so hashes stay stable if it ever becomes a parameter.
pub const NUM_STUDENTS: u32 = 2;

/// FRUNI construction parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FruniParams {
    /// Number of universities (> 0).
    pub n_u: u32,
    /// Mean friends per student (> 0).
    pub lambda_f: f64,
    /// Inter-university collaboration probability (in [0, 1]).
    pub alpha_u: f64,
    /// Number of universities whose friend circles are cross-linked
    /// (in [0, n_u]).
    pub n_f: u32,
}

impl FruniParams {
    /// `n_f` defaults to `n_u / 2` when not given.
    pub fn new(n_u: u32, lambda_f: f64, alpha_u: f64, n_f: Option<u32>) -> Self {
        Self {
            n_u,
            lambda_f,
            alpha_u,
            n_f: n_f.unwrap_or(n_u / 2),
        }
    }
}

impl DatasetParams for FruniParams {
    fn validate(&self) -> Result<(), DatasetError> {
        if self.n_u == 0 {
            return Err(DatasetError::InvalidParameter {
                name: "n_u",
                reason: "must be > 0".to_string(),
            });
        }
        if !(self.lambda_f > 0.0) || !self.lambda_f.is_finite() {
            return Err(DatasetError::InvalidParameter {
                name: "lambda_f",
                reason: format!("must be a positive finite rate, got {}", self.lambda_f),
            });
        }
        if !(0.0..=1.0).contains(&self.alpha_u) {
            return Err(DatasetError::InvalidParameter {
                name: "alpha_u",
                reason: format!("must be a probability in [0, 1], got {}", self.alpha_u),
            });
        }
        if self.n_f > self.n_u {
            return Err(DatasetError::InvalidParameter {
                name: "n_f",
                reason: format!("must be <= n_u ({}), got {}", self.n_u, self.n_f),
            });
        }
        Ok(())
    }

    fn id_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("n_u", self.n_u.to_string()),
            ("lambda_f", self.lambda_f.to_string()),
            ("alpha_u", self.alpha_u.to_string()),
            ("n_f", self.n_f.to_string()),
            ("num_students", NUM_STUDENTS.to_string()),
        ]
    }
}

/// The FRUNI generator.
#[derive(Debug, Clone, Copy)]
pub struct Fruni;

impl GraphGenerator for Fruni {
    const KIND: &'static str = "fruni";
    type Params = FruniParams;

    fn build(params: &FruniParams, rng: &mut StdRng) -> Result<DirectedGraph, DatasetError> {
        let mut alloc = IdAllocator::new(GeneratorFamily::Fruni);
        alloc.reset(None);
        let mut graph = DirectedGraph::new();
        let mut uni_names = Vec::with_capacity(params.n_u as usize);

        for uni_id in 0..params.n_u {
            let uni_name = alloc
                .generate(EntityType::University, &[uni_id])?
                .to_string();
            graph.add_node(&uni_name, Node::new(EntityType::University));

            let mut friends_of_student: Vec<Vec<String>> = Vec::with_capacity(NUM_STUDENTS as usize);

            for student_id in 0..NUM_STUDENTS {
                let student_name = alloc
                    .generate(EntityType::Student, &[uni_id, student_id])?
                    .to_string();
                graph.add_node(&student_name, Node::new(EntityType::Student));
                graph.add_edge(Edge::new(&uni_name, &student_name, relation::ENROLLS));

                let num_friends = poisson_at_least(rng, params.lambda_f, 1)?;
                let mut friend_list = Vec::with_capacity(num_friends as usize);
                for fr_id in 0..num_friends {
                    let friend_name = alloc
                        .generate(EntityType::Friend, &[uni_id, student_id, fr_id as u32])?
                        .to_string();
                    graph.add_node(&friend_name, Node::new(EntityType::Friend));
                    graph.add_edge(Edge::new(&student_name, &friend_name, relation::FRIEND_OF));
                    friend_list.push(friend_name);
                }
                friends_of_student.push(friend_list);
            }

            // First n_f universities: fully bipartite friendship between the
            // friend circles of different students.
            if uni_id < params.n_f {
                for (student_i, friends_i) in friends_of_student.iter().enumerate() {
                    for friend_i in friends_i {
                        for (student_j, friends_j) in friends_of_student.iter().enumerate() {
                            if student_i == student_j {
                                continue;
                            }
                            for friend_j in friends_j {
                                graph.add_edge(Edge::new(friend_i, friend_j, relation::FRIEND_OF));
                            }
                        }
                    }
                }
            }

            uni_names.push(uni_name);
        }

        // Independent collaboration coin per ordered pair of distinct
        // universities. Draws happen after all universities are built, so
        // the friend-sampling stream is unaffected by alpha_u.
        if params.alpha_u > 0.0 {
            for i in 0..uni_names.len() {
                for j in 0..uni_names.len() {
                    if i == j {
                        continue;
                    }
                    if coin(rng, params.alpha_u) {
                        graph.add_edge(Edge::new(
                            &uni_names[i],
                            &uni_names[j],
                            relation::COLLABORATES_WITH,
                        ));
                    }
                }
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
        let head_id: NodeId = head
            .parse()
            .map_err(|e| DatasetError::unrecognized(head, relation_name, tail, format!("{e}")))?;
        let tail_id: NodeId = tail
            .parse()
            .map_err(|e| DatasetError::unrecognized(head, relation_name, tail, format!("{e}")))?;

        let this: Triple = (
            head.to_string(),
            relation_name.to_string(),
            tail.to_string(),
        );

        use EntityType::{Friend, Student, University};
        match (head_id.category, tail_id.category) {
            (University, University)
            | (University, Student)
            | (Student, Friend)
            | (Friend, Student) => Ok(vec![this]),

            (Friend, Friend) => {
                let [uni_h, st_h, _] = head_id.path[..] else {
                    return Err(DatasetError::unrecognized(
                        head,
                        relation_name,
                        tail,
                        "friend id does not have three path components",
                    ));
                };
                let [uni_t, st_t, _] = tail_id.path[..] else {
                    return Err(DatasetError::unrecognized(
                        head,
                        relation_name,
                        tail,
                        "friend id does not have three path components",
                    ));
                };
                if uni_h != uni_t {
                    return Err(DatasetError::unrecognized(
                        head,
                        relation_name,
                        tail,
                        "friends belong to different universities",
                    ));
                }

                let st_h_name = NodeId::new(Student, vec![uni_h, st_h]).to_string();
                let st_t_name = NodeId::new(Student, vec![uni_t, st_t]).to_string();

                let mut explanation = vec![
                    this,
                    (
                        head.to_string(),
                        relation::FRIEND_OF.to_string(),
                        st_h_name.clone(),
                    ),
                    (
                        tail.to_string(),
                        relation::FRIEND_OF.to_string(),
                        st_t_name.clone(),
                    ),
                ];

                // Friends of different students justify through the shared
                // university; same-student pairs do not arise in generation
                // but would need no enrollment step.
                if st_h != st_t {
                    let uni_name = NodeId::new(University, vec![uni_h]).to_string();
                    explanation.push((st_h_name, relation::ENROLLS.to_string(), uni_name.clone()));
                    explanation.push((st_t_name, relation::ENROLLS.to_string(), uni_name));
                }
                Ok(explanation)
            }

            (head_cat, tail_cat) => Err(DatasetError::unrecognized(
                head,
                relation_name,
                tail,
                format!("no rule for category pattern ({head_cat}, {tail_cat})"),
            )),
        }
    }
}
