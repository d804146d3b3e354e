use chm_perfect_hash::{BuildConfig, Builder, MphError, Mphf, build, query};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn seeded(seed: u64) -> Builder {
    Builder::new().with_config(BuildConfig {
        max_attempts: 1000,
        seed: Some(seed),
    })
}

fn assert_bijection<K: AsRef<[u8]>>(mph: &Mphf, keys: &[K]) {
    let n = keys.len() as u64;
    let mut seen = vec![false; keys.len()];
    for k in keys {
        let v = query(mph, k.as_ref());
        assert!(v < n, "index {v} outside [0, {n})");
        assert!(!seen[v as usize], "index {v} handed out twice");
        seen[v as usize] = true;
    }
    assert!(seen.iter().all(|&s| s));
}

/// Distinct printable ASCII keys of length 1..=12.
fn random_keys(count: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut set = HashSet::with_capacity(count * 2);
    let mut keys = Vec::with_capacity(count);
    while keys.len() < count {
        let len = rng.gen_range(1..=12);
        let s: String = (0..len)
            .map(|_| rng.gen_range(b'!'..=b'~') as char)
            .collect();
        if set.insert(s.clone()) {
            keys.push(s);
        }
    }
    keys
}

#[test]
fn single_key_maps_to_zero() {
    init_logger();
    let mph = build(["x"]).unwrap();
    assert_eq!(mph.index(b"x"), 0);
    assert_eq!(mph.len(), 1);
    assert_eq!(mph.table_size(), 2);
}

#[test]
fn small_known_set() {
    init_logger();
    let keys = ["cat", "dog", "bird", "fish"];
    let mph = build(keys).unwrap();
    let got: HashSet<u64> = keys.iter().map(|k| mph.index_str(k)).collect();
    assert_eq!(got, HashSet::from([0, 1, 2, 3]));
    assert_bijection(&mph, &keys);
}

#[test]
fn duplicate_keys_are_rejected() {
    init_logger();
    let err = build(["a", "a"]).unwrap_err();
    assert!(matches!(err, MphError::DuplicateKey));

    let err = build(["x", "y", "z", "y"]).unwrap_err();
    assert!(matches!(err, MphError::DuplicateKey));
}

#[test]
fn empty_key_is_a_real_key() {
    init_logger();
    let mph = seeded(3).build(["", "a"]).unwrap();
    assert_ne!(mph.index(b""), mph.index(b"a"));
    assert_bijection(&mph, &["", "a"]);
}

#[test]
fn prefix_keys_are_distinct() {
    init_logger();
    let keys = ["a", "aa", "aaa", "", "aaaa"];
    let mph = seeded(11).build(keys).unwrap();
    assert_bijection(&mph, &keys);
}

#[test]
fn binary_keys() {
    init_logger();
    let keys: Vec<Vec<u8>> = (0u16..300).map(|i| i.to_le_bytes().to_vec()).collect();
    let mph = seeded(5).build(&keys).unwrap();
    assert_bijection(&mph, &keys);
    mph.verify(&keys).unwrap();
}

#[test]
fn index_is_input_position() {
    init_logger();
    let keys = random_keys(2_000, 17);
    let mph = seeded(23).build(&keys).unwrap();
    for (i, k) in keys.iter().enumerate() {
        assert_eq!(mph.index_str(k), i as u64);
    }
}

#[test]
fn repeated_queries_agree() {
    init_logger();
    let keys = random_keys(1_000, 1);
    let mph = seeded(2).build(&keys).unwrap();
    let first: Vec<u64> = keys.iter().map(|k| mph.index_str(k)).collect();
    for _ in 0..3 {
        let again: Vec<u64> = keys.iter().map(|k| mph.index_str(k)).collect();
        assert_eq!(first, again);
    }
}

#[test]
fn unknown_keys_stay_in_range() {
    init_logger();
    let keys = random_keys(100, 9);
    let mph = seeded(10).build(&keys).unwrap();
    for probe in ["not-a-member", "", "\u{1F600}", "zzzzzzzzzzzzzzzzzzzzzz"] {
        assert!(mph.index_str(probe) < 100);
    }
}

#[test]
fn injected_generator_is_reproducible() {
    init_logger();
    let keys = random_keys(1_000, 4);
    let a = Builder::new()
        .build_with_rng(&keys, &mut StdRng::seed_from_u64(99))
        .unwrap();
    let b = Builder::new()
        .build_with_rng(&keys, &mut StdRng::seed_from_u64(99))
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn displacements_only_on_touched_vertices() {
    init_logger();
    let keys = random_keys(64, 8);
    let mph = seeded(8).build(&keys).unwrap();
    let (s1, s2) = mph.seeds();
    let ts = mph.table_size() as u32;
    let mut touched = vec![false; mph.table_size()];
    for k in &keys {
        touched[chm_perfect_hash::bucket(k.as_bytes(), s1, ts) as usize] = true;
        touched[chm_perfect_hash::bucket(k.as_bytes(), s2, ts) as usize] = true;
    }
    for (v, &g) in mph.displacements().iter().enumerate() {
        if !touched[v] {
            assert_eq!(g, 0, "untouched vertex {v} carries {g}");
        }
    }
}

#[test]
fn verify_catches_a_foreign_key_set() {
    init_logger();
    let keys = random_keys(200, 12);
    let mph = seeded(13).build(&keys).unwrap();
    mph.verify(&keys).unwrap();

    // more keys than slots must collide somewhere
    let more = random_keys(201, 14);
    assert!(matches!(
        mph.verify(&more),
        Err(MphError::Collision { .. })
    ));
}

#[test]
fn scale_hundred_thousand() {
    init_logger();
    let keys = random_keys(100_000, 2024);
    let mph = seeded(31).build(&keys).unwrap();
    assert_eq!(mph.len(), 100_000);
    assert_bijection(&mph, &keys);
}
