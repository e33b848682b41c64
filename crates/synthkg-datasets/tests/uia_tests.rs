//! User-item-attr generation and explanation tests.

use synthkg_datasets::{Dataset, DatasetError, GraphGenerator, Uia, UiaParams};
use synthkg_model::{relation, EntityType};

fn params(num_attrs: u32, num_items: u32, num_users: u32, lambda_a: f64, lambda_i: f64) -> UiaParams {
    UiaParams {
        num_attrs,
        num_items,
        num_users,
        lambda_a,
        lambda_i,
    }
}

fn build(p: UiaParams, seed: u64) -> Dataset<Uia> {
    Dataset::new(p, vec![0.8, 0.2], seed).unwrap()
}

#[test]
fn node_counts_match_parameters() {
    let ds = build(params(4, 6, 3, 2.0, 1.5), 42);
    let g = ds.graph();
    assert_eq!(g.nodes_of_category(EntityType::Attribute).len(), 4);
    assert_eq!(g.nodes_of_category(EntityType::Item).len(), 6);
    assert_eq!(g.nodes_of_category(EntityType::User).len(), 3);
}

#[test]
fn attribute_features_are_one_hot() {
    let ds = build(params(3, 2, 2, 1.0, 1.0), 1);
    let g = ds.graph();
    for (i, attr) in g.nodes_of_category(EntityType::Attribute).iter().enumerate() {
        let features = g.node(attr).unwrap().features.as_ref().unwrap();
        let mut expected = vec![0.0; 3];
        expected[i] = 1.0;
        assert_eq!(features, &expected);
    }
}

#[test]
fn zero_lambda_a_gives_every_item_exactly_one_attribute() {
    let ds = build(params(5, 8, 2, 0.0, 1.0), 13);
    let g = ds.graph();
    for item in g.nodes_of_category(EntityType::Item) {
        assert_eq!(g.predecessors(item, relation::HELD_BY).len(), 1);
    }
}

#[test]
fn item_attributes_are_distinct_and_clamped() {
    // lambda_a far above num_attrs: the draw clamps, so every item holds
    // every attribute exactly once.
    let ds = build(params(3, 4, 2, 50.0, 1.0), 3);
    let g = ds.graph();
    for item in g.nodes_of_category(EntityType::Item) {
        let mut held_by = g.predecessors(item, relation::HELD_BY);
        held_by.sort_unstable();
        assert_eq!(held_by, vec!["attr-0", "attr-1", "attr-2"]);
    }
}

#[test]
fn users_buy_only_through_their_taste_attribute() {
    let ds = build(params(4, 6, 5, 1.0, 2.0), 21);
    let g = ds.graph();
    for user in g.nodes_of_category(EntityType::User) {
        let taste = g.node(user).unwrap().annotation.clone().unwrap();
        let buyable = g.successors(&taste, relation::HELD_BY);
        for bought in g.predecessors(user, relation::BOUGHT_BY) {
            assert!(buyable.contains(&bought));
        }
    }
}

#[test]
fn edge_features_carry_relation_embeddings() {
    let ds = build(params(3, 4, 2, 1.0, 1.0), 8);
    for edge in ds.graph().edges() {
        let features = edge.features.as_ref().unwrap();
        match edge.relation.as_str() {
            "held_by" => assert_eq!(features, &vec![1.0, 0.0]),
            "bought_by" => assert_eq!(features, &vec![0.0, 1.0]),
            other => panic!("unexpected relation {other}"),
        }
    }
}

#[test]
fn same_seed_reproduces_the_same_graph() {
    let a = build(params(4, 6, 5, 1.5, 2.0), 77);
    let b = build(params(4, 6, 5, 1.5, 2.0), 77);
    assert_eq!(a.graph(), b.graph());
}

#[test]
fn parameter_validation_fails_fast() {
    for p in [
        params(1, 4, 4, 1.0, 1.0),
        params(4, 1, 4, 1.0, 1.0),
        params(4, 4, 1, 1.0, 1.0),
        params(4, 4, 4, -0.5, 1.0),
        params(4, 4, 4, 1.0, -2.0),
    ] {
        let err = Dataset::<Uia>::new(p, vec![0.8, 0.2], 0).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidParameter { .. }));
    }
}

// ----------------------------------------------------------------------------
// Explanations
// ----------------------------------------------------------------------------

#[test]
fn held_by_explains_as_itself() {
    let ds = build(params(3, 4, 2, 1.0, 1.0), 5);
    let explanation = ds.explain("attr-0", "held_by", "it-0");
    // Whether or not attr-0 holds it-0 in this build, held_by is its own
    // justification and never consults the graph.
    assert_eq!(
        explanation.unwrap(),
        vec![("attr-0".into(), "held_by".into(), "it-0".into())]
    );
}

#[test]
fn bought_by_unpacks_every_purchase_of_the_user() {
    // lambda_a clamps to all attributes, so every user's taste reaches every
    // item and every user buys at least one.
    let ds = build(params(3, 5, 4, 50.0, 2.0), 19);
    let g = ds.graph();
    for user in g.nodes_of_category(EntityType::User) {
        let bought = g.predecessors(user, relation::BOUGHT_BY);
        assert!(!bought.is_empty());
        let item = bought[0];
        let explanation = ds.explain(item, "bought_by", user).unwrap();
        assert_eq!(explanation.len(), 1 + 2 * bought.len());
        let taste = g.node(user).unwrap().annotation.clone().unwrap();
        for pair in explanation[1..].chunks(2) {
            let (ref attr, ref held, ref held_item) = pair[0];
            assert_eq!((attr.as_str(), held.as_str()), (taste.as_str(), "held_by"));
            let (ref bought_item, ref bought_rel, ref bought_user) = pair[1];
            assert_eq!(bought_item, held_item);
            assert_eq!(bought_rel, "bought_by");
            assert_eq!(bought_user, user);
        }
    }
}

#[test]
fn bought_by_with_non_user_tail_is_rejected() {
    let ds = build(params(3, 4, 2, 1.0, 1.0), 2);
    let err = ds.explain("it-0", "bought_by", "attr-1").unwrap_err();
    assert!(matches!(err, DatasetError::UnrecognizedTriple { .. }));
}

#[test]
fn foreign_relations_are_rejected() {
    let ds = build(params(3, 4, 2, 1.0, 1.0), 2);
    let err = ds.explain("it-0", "enrolls", "user-0").unwrap_err();
    assert!(matches!(err, DatasetError::UnrecognizedTriple { .. }));
}

#[test]
fn explanation_without_taste_annotation_is_an_integrity_error() {
    use synthkg_model::{DirectedGraph, Edge, Node};

    let mut g = DirectedGraph::new();
    g.add_node("user-0", Node::new(EntityType::User));
    g.add_node("it-0", Node::new(EntityType::Item));
    g.add_edge(Edge::new("it-0", "user-0", relation::BOUGHT_BY));
    let err = Uia::explain(&g, "it-0", "bought_by", "user-0").unwrap_err();
    assert!(matches!(err, DatasetError::Integrity(_)));
}
