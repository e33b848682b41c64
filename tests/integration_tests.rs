//! Integration tests for the complete synthkg pipeline
//!
//! These tests verify end-to-end functionality across crates:
//! - Generator -> Dataset -> snapshot round-trip
//! - Dataset -> triple export files -> explanation reload
//!
//! Run with: cargo test --test integration_tests

use std::fs;
use tempfile::tempdir;

use synthkg_datasets::{Dataset, Fruni, FruniParams, Ftree, FtreeParams, Uia, UiaParams};
use synthkg_storage::{
    load_dataset, load_explanations_keyed, save_dataset, save_triples, TripleFileOptions,
};

// ============================================================================
// Generate -> persist -> restore
// ============================================================================

#[test]
fn test_fruni_snapshot_round_trip() {
    let dir = tempdir().unwrap();
    let dataset =
        Dataset::<Fruni>::new(FruniParams::new(4, 2.0, 0.5, Some(2)), vec![0.8, 0.2], 42).unwrap();

    let folder = save_dataset(&dataset, dir.path()).unwrap();
    let restored: Dataset<Fruni> = load_dataset(&folder).unwrap();

    assert_eq!(restored.identity(), dataset.identity());
    assert_eq!(restored.graph(), dataset.graph());
    // A restored dataset exports exactly what the saved one exports.
    let options = TripleFileOptions::default();
    let a = save_triples(&dataset, dir.path().join("a").as_path(), &options).unwrap();
    let b = save_triples(&restored, dir.path().join("b").as_path(), &options).unwrap();
    assert_eq!(
        fs::read_to_string(a.join("train.txt")).unwrap(),
        fs::read_to_string(b.join("train.txt")).unwrap()
    );
}

#[test]
fn test_ftree_export_explanations_reload() {
    let dir = tempdir().unwrap();
    let dataset = Dataset::<Ftree>::new(
        FtreeParams {
            n_t: 3,
            lambda_b: 2.5,
            n_d: 3,
        },
        vec![0.8, 0.2],
        7,
    )
    .unwrap();

    let folder = save_triples(&dataset, dir.path(), &TripleFileOptions::default()).unwrap();

    // Every exported triple's explanation reloads and starts from the triple
    // itself; sentiment explanations carry their reconstructed chains.
    for split in ["train", "test"] {
        let keyed =
            load_explanations_keyed(&folder.join(format!("{split}_explanations.txt"))).unwrap();
        let rows = fs::read_to_string(folder.join(format!("{split}.txt"))).unwrap();
        for row in rows.lines() {
            let mut fields = row.split('\t');
            let triple = (
                fields.next().unwrap().to_string(),
                fields.next().unwrap().to_string(),
                fields.next().unwrap().to_string(),
            );
            let rest = keyed.get(&triple).unwrap();
            if let Some(b_len) = synthkg_model::relation::sentiment_branch_length(&triple.1) {
                assert_eq!(rest.len(), b_len as usize);
                assert!(rest[0].0.starts_with("pr-"));
            } else {
                assert!(rest.is_empty());
            }
        }
    }
}

#[test]
fn test_uia_full_pipeline() {
    let dir = tempdir().unwrap();
    let dataset = Dataset::<Uia>::new(
        UiaParams {
            num_attrs: 4,
            num_items: 8,
            num_users: 6,
            lambda_a: 1.5,
            lambda_i: 2.0,
        },
        vec![0.6, 0.2, 0.2],
        3,
    )
    .unwrap();

    let folder = save_dataset(&dataset, dir.path()).unwrap();
    save_triples(&dataset, dir.path(), &TripleFileOptions::default()).unwrap();

    for file in [
        "dataset.bin",
        "parameters.json",
        "train.txt",
        "valid.txt",
        "test.txt",
        "train_explanations.txt",
        "valid_explanations.txt",
        "test_explanations.txt",
        "node_category.json",
    ] {
        assert!(folder.join(file).exists(), "missing {file}");
    }

    let mut total = 0;
    for split in ["train", "valid", "test"] {
        total += fs::read_to_string(folder.join(format!("{split}.txt")))
            .unwrap()
            .lines()
            .count();
    }
    assert_eq!(total, dataset.graph().edge_count());
}
