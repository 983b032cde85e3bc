//! Accuracy regression tests for warpline-dtw.
//!
//! Fixed scenarios pin distances and exact warping paths, including the
//! diagonal > up > left tie-break. Seeded random inputs check the algebraic
//! properties every alignment must satisfy.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use warpline_dtw::{AlignError, Aligner, Argument, Sequence, WarpingPath};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn abs_i64() -> Aligner<i64> {
    Aligner::with_distance(|a: &i64, b: &i64| (a - b).abs() as f64)
}

fn abs_f64() -> Aligner<f64> {
    Aligner::with_distance(|a: &f64, b: &f64| (a - b).abs())
}

fn random_series(rng: &mut ChaCha8Rng, max_len: usize) -> Vec<i64> {
    let len = rng.gen_range(1..=max_len);
    (0..len).map(|_| rng.gen_range(-20..=20)).collect()
}

fn assert_well_formed(path: &WarpingPath, rows: usize, cols: usize) {
    let steps = path.steps();
    assert_eq!(steps.first().map(|s| (s.row, s.col)), Some((0, 0)));
    assert_eq!(steps.last().map(|s| (s.row, s.col)), Some((rows - 1, cols - 1)));
    for pair in steps.windows(2) {
        let dr = pair[1].row - pair[0].row;
        let dc = pair[1].col - pair[0].col;
        assert!(
            matches!((dr, dc), (1, 0) | (0, 1) | (1, 1)),
            "illegal step {:?} -> {:?}",
            pair[0],
            pair[1]
        );
    }
}

// ---------------------------------------------------------------------------
// a) reference scenarios
// ---------------------------------------------------------------------------

const S: [i64; 10] = [1, 3, 4, 9, 8, 2, 1, 5, 7, 3];
const T: [i64; 10] = [1, 6, 2, 3, 0, 9, 4, 3, 6, 3];
const ST_PATH: [(usize, usize); 12] = [
    (0, 0),
    (1, 1),
    (1, 2),
    (1, 3),
    (2, 4),
    (3, 5),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 8),
    (8, 8),
    (9, 9),
];

#[test]
fn integer_series_match_reference() {
    let mut aligner = abs_i64();
    let dist = aligner.compute(S, T).unwrap();
    assert_eq!(dist.value(), 15.0);
    assert_eq!(aligner.path().unwrap().to_pairs(), ST_PATH.to_vec());
}

#[test]
fn float_series_match_reference() {
    let s: Vec<f64> = S.iter().map(|&v| v as f64).collect();
    let t: Vec<f64> = T.iter().map(|&v| v as f64).collect();
    let mut aligner = abs_f64();
    let dist = aligner.compute(s, t).unwrap();
    assert!((dist.value() - 15.0).abs() < 1e-10);
    assert_eq!(aligner.path().unwrap().to_pairs(), ST_PATH.to_vec());
}

#[test]
fn equal_length_arguments_reversed_transpose_the_path() {
    // Equal lengths keep the first argument as rows, so swapping the
    // arguments transposes the matrix. Distance is unchanged.
    let mut aligner = abs_i64();
    let dist = aligner.compute(T, S).unwrap();
    assert_eq!(dist.value(), 15.0);
    assert_eq!(
        aligner.path().unwrap().to_pairs(),
        vec![
            (0, 0),
            (1, 1),
            (2, 1),
            (3, 1),
            (4, 2),
            (5, 3),
            (5, 4),
            (6, 5),
            (7, 6),
            (8, 7),
            (8, 8),
            (9, 9),
        ]
    );
}

#[test]
fn same_series() {
    let mut aligner = abs_i64();
    let dist = aligner.compute([1, 2, 3], [1, 2, 3]).unwrap();
    assert_eq!(dist.value(), 0.0);
    assert_eq!(aligner.path().unwrap().to_pairs(), vec![(0, 0), (1, 1), (2, 2)]);
}

#[test]
fn different_lengths_use_longer_as_rows() {
    let mut aligner = abs_i64();
    let dist = aligner.compute([1, 2, 3], [1, 2, 3, 4]).unwrap();
    assert_eq!(dist.value(), 1.0);
    assert_eq!(aligner.is_swapped(), Some(true));
    assert_eq!(
        aligner.path().unwrap().to_pairs(),
        vec![(0, 0), (1, 1), (2, 2), (3, 2)]
    );

    // Argument order does not change the outcome once roles are assigned.
    let dist = aligner.compute([1, 2, 3, 4], [1, 2, 3]).unwrap();
    assert_eq!(dist.value(), 1.0);
    assert_eq!(aligner.is_swapped(), Some(false));
    assert_eq!(
        aligner.path().unwrap().to_pairs(),
        vec![(0, 0), (1, 1), (2, 2), (3, 2)]
    );
}

#[test]
fn offset_series() {
    let mut aligner = abs_i64();
    let dist = aligner.compute([1, 3, 5], [2, 4, 6]).unwrap();
    assert_eq!(dist.value(), 3.0);
    assert_eq!(aligner.path().unwrap().to_pairs(), vec![(0, 0), (1, 1), (2, 2)]);
}

#[test]
fn stretched_series_warps() {
    let mut aligner = abs_i64();
    let dist = aligner.compute([0, 0, 1, 2, 1, 0], [0, 1, 2, 1]).unwrap();
    assert_eq!(dist.value(), 1.0);
    assert_eq!(
        aligner.path().unwrap().to_pairs(),
        vec![(0, 0), (1, 0), (2, 1), (3, 2), (4, 3), (5, 3)]
    );
}

#[test]
fn symbolic_elements() {
    let mut aligner: Aligner<char> =
        Aligner::with_distance(|a: &char, b: &char| if a == b { 0.0 } else { 1.0 });
    let kitten: Vec<char> = "kitten".chars().collect();
    let sitting: Vec<char> = "sitting".chars().collect();
    let dist = aligner.compute(kitten, sitting).unwrap();
    assert_eq!(dist.value(), 3.0);
    assert_eq!(
        aligner.path().unwrap().to_pairs(),
        vec![(0, 0), (1, 1), (2, 2), (3, 3), (4, 4), (5, 5), (6, 5)]
    );
}

// ---------------------------------------------------------------------------
// b) input errors
// ---------------------------------------------------------------------------

#[test]
fn empty_series_rejected() {
    let mut aligner = abs_i64();
    let result = aligner.compute(Vec::<i64>::new(), Vec::<i64>::new());
    assert!(matches!(
        result,
        Err(AlignError::EmptySequence { argument: Argument::First })
    ));
    assert!(aligner.distance().is_none());
    assert!(matches!(aligner.path(), Err(AlignError::NotComputed)));
}

#[test]
fn missing_distance_function_rejected() {
    let mut aligner: Aligner<i64> = Aligner::new();
    let result = aligner.compute([1, 2], [1, 3]);
    assert!(matches!(result, Err(AlignError::InvalidDistanceFunction)));
    assert!(matches!(aligner.path(), Err(AlignError::NotComputed)));
}

#[test]
fn json_input_must_be_an_array() {
    let value = serde_json::json!({"values": [1, 2, 3]});
    let result = Sequence::<i64>::from_json(value, Argument::Second);
    assert!(matches!(
        result,
        Err(AlignError::NotASequence { argument: Argument::Second, .. })
    ));
}

#[test]
fn json_sequences_align() {
    let s = Sequence::<i64>::from_json(serde_json::json!(S), Argument::First).unwrap();
    let t = Sequence::<i64>::from_json(serde_json::json!(T), Argument::Second).unwrap();
    let mut aligner = abs_i64();
    assert_eq!(aligner.compute(s, t).unwrap().value(), 15.0);
}

// ---------------------------------------------------------------------------
// c) properties over seeded random inputs
// ---------------------------------------------------------------------------

#[test]
fn distance_is_invariant_to_argument_order() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut aligner = abs_i64();
    for i in 0..200 {
        let a = random_series(&mut rng, 12);
        let b = random_series(&mut rng, 12);
        let forward = aligner.compute(a.clone(), b.clone()).unwrap().value();
        let backward = aligner.compute(b.clone(), a.clone()).unwrap().value();
        assert_eq!(forward, backward, "case {i}: {a:?} vs {b:?}");
    }
}

#[test]
fn self_alignment_is_free_and_diagonal() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut aligner = abs_i64();
    for _ in 0..100 {
        let a = random_series(&mut rng, 15);
        let dist = aligner.compute(a.clone(), a.clone()).unwrap();
        assert_eq!(dist.value(), 0.0);
        for step in &aligner.path().unwrap() {
            assert_eq!(step.row, step.col, "self-alignment left the diagonal for {a:?}");
        }
    }
}

#[test]
fn paths_are_monotone_and_connected() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let mut aligner = abs_i64();
    for _ in 0..200 {
        let a = random_series(&mut rng, 10);
        let b = random_series(&mut rng, 10);
        aligner.compute(a.clone(), b.clone()).unwrap();
        let rows = a.len().max(b.len());
        let cols = a.len().min(b.len());
        assert_well_formed(&aligner.path().unwrap(), rows, cols);
    }
}

#[test]
fn path_cost_equals_distance() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let mut aligner = abs_i64();
    for _ in 0..200 {
        let a = random_series(&mut rng, 10);
        let b = random_series(&mut rng, 10);
        let dist = aligner.compute(a, b).unwrap().value();
        let long = aligner.long().unwrap();
        let short = aligner.short().unwrap();
        let summed: f64 = aligner
            .path()
            .unwrap()
            .steps()
            .iter()
            .map(|s| (long[s.row] - short[s.col]).abs() as f64)
            .sum();
        assert_eq!(summed, dist);
    }
}

#[test]
fn path_is_stable_across_calls() {
    let mut aligner = abs_i64();
    aligner.compute(S, T).unwrap();
    let first = aligner.path().unwrap();
    let second = aligner.path().unwrap();
    assert_eq!(first, second);
    let mut rendered = Vec::new();
    aligner.render(&mut rendered).unwrap();
    assert_eq!(aligner.path().unwrap(), first);
    assert_eq!(
        String::from_utf8(rendered).unwrap().matches('[').count(),
        first.len()
    );
}
