//! Integration test: pipeline output properties against a reference sort.
//!
//! Exercises the testable properties of the sort pipeline: permutation +
//! adjacent ordering, idempotence, read/write round trips, and the
//! capacity boundaries.
//!
//! Run: cargo test -p linesort-harness --test sort_conformance_test

use std::io::Cursor;

use linesort_core::{LineStore, ReadError, SortMode, StoreConfig, quicksort};

fn lcg(state: &mut u64) -> u64 {
    *state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
    *state
}

fn random_lines(count: usize, rng: &mut u64) -> Vec<String> {
    (0..count)
        .map(|_| {
            let r = lcg(rng);
            match r % 3 {
                0 => format!("{}", r % 10_000),
                1 => format!("{}.{}", r % 100, (r >> 8) % 100),
                _ => format!("word{}", r % 50),
            }
        })
        .collect()
}

fn read_all(store: &mut LineStore, lines: &[String]) -> Result<usize, ReadError> {
    let mut input = Vec::new();
    for line in lines {
        input.extend_from_slice(line.as_bytes());
        input.push(b'\n');
    }
    store.read_from(&mut Cursor::new(input))
}

fn big_store() -> LineStore {
    LineStore::new(StoreConfig {
        arena_capacity: 1 << 16,
        ..StoreConfig::default()
    })
}

fn collected(store: &LineStore) -> Vec<Vec<u8>> {
    store.lines().map(<[u8]>::to_vec).collect()
}

#[test]
fn output_is_an_ordered_permutation_in_both_modes() {
    let mut rng = 0xA5A5_5A5A_DEAD_BEEF_u64;
    for mode in [SortMode::Lexicographic, SortMode::Numeric] {
        for _ in 0..10 {
            let lines = random_lines((lcg(&mut rng) % 200) as usize, &mut rng);
            let mut store = big_store();
            read_all(&mut store, &lines).expect("input fits");
            store.sort_by(|a, b| mode.compare(a, b));

            let output = collected(&store);
            assert!(
                output
                    .windows(2)
                    .all(|w| mode.compare(&w[0], &w[1]) != std::cmp::Ordering::Greater),
                "adjacent pair out of order under {mode:?}"
            );

            let mut canon_in: Vec<Vec<u8>> =
                lines.iter().map(|l| l.as_bytes().to_vec()).collect();
            let mut canon_out = output.clone();
            canon_in.sort_unstable();
            canon_out.sort_unstable();
            assert_eq!(canon_in, canon_out, "output is not a permutation of input");
        }
    }
}

#[test]
fn sorting_twice_is_idempotent() {
    let mut rng = 0x1357_9BDF_u64;
    let lines = random_lines(150, &mut rng);
    let mut store = big_store();
    read_all(&mut store, &lines).expect("input fits");

    store.sort_by(|a, b| SortMode::Numeric.compare(a, b));
    let first = collected(&store);
    store.sort_by(|a, b| SortMode::Numeric.compare(a, b));
    assert_eq!(collected(&store), first);
}

#[test]
fn read_then_write_round_trips_unsorted_input() {
    let input = "pear\napple\n\nfig\n";
    let mut store = big_store();
    store
        .read_from(&mut Cursor::new(input.as_bytes().to_vec()))
        .expect("input fits");
    let mut out = Vec::new();
    store.write_to(&mut out).expect("write succeeds");
    assert_eq!(out, input.as_bytes());
}

#[test]
fn capacity_boundary_is_exact() {
    let lines: Vec<String> = (0..8).map(|i| format!("l{i}")).collect();

    let mut at_limit = LineStore::new(StoreConfig {
        max_lines: 8,
        arena_capacity: 1 << 10,
        ..StoreConfig::default()
    });
    assert_eq!(read_all(&mut at_limit, &lines).expect("at limit"), 8);

    let mut past_limit = LineStore::new(StoreConfig {
        max_lines: 7,
        arena_capacity: 1 << 10,
        ..StoreConfig::default()
    });
    let err = read_all(&mut past_limit, &lines).expect_err("one past limit");
    assert!(matches!(err, ReadError::TooManyLines { limit: 7 }));
}

#[test]
fn generic_sort_agrees_with_reference_on_integers() {
    let mut v = [5, 3, 8, 1, 9, 2];
    quicksort(&mut v, i32::cmp);
    assert_eq!(v, [1, 2, 3, 5, 8, 9]);

    let mut rng = 0x2468_ACE0_u64;
    for _ in 0..10 {
        let len = (lcg(&mut rng) % 300) as usize;
        let mut ours: Vec<i64> = (0..len).map(|_| (lcg(&mut rng) % 500) as i64).collect();
        let mut reference = ours.clone();
        quicksort(&mut ours, i64::cmp);
        reference.sort_unstable();
        assert_eq!(ours, reference);
    }
}

#[test]
fn numeric_and_lexicographic_modes_order_differently() {
    let lines = ["10".to_string(), "2".to_string(), "1".to_string()];

    let mut numeric = big_store();
    read_all(&mut numeric, &lines).expect("fits");
    numeric.sort_by(|a, b| SortMode::Numeric.compare(a, b));
    assert_eq!(
        collected(&numeric),
        vec![b"1".to_vec(), b"2".to_vec(), b"10".to_vec()]
    );

    let mut lex = big_store();
    read_all(&mut lex, &lines).expect("fits");
    lex.sort_by(|a, b| SortMode::Lexicographic.compare(a, b));
    assert_eq!(
        collected(&lex),
        vec![b"1".to_vec(), b"10".to_vec(), b"2".to_vec()]
    );
}
