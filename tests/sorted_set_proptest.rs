//! Property-based tests for the sorted set.

use std::collections::BTreeMap;

use proptest::prelude::*;
use rankset::Config;
use rankset::SortedSet;

// =============================================================================
// Test helpers
// =============================================================================

#[derive(Clone, Debug)]
enum SetOp {
    Add { score: i32, member: u16 },
    Remove { member: u16 },
}

fn arbitrary_set_op() -> impl Strategy<Value = SetOp> {
    prop_oneof![
        // Narrow score and member ranges so ties and moves are common.
        3 => (-20..20i32, 0..64u16).prop_map(|(score, member)| SetOp::Add { score, member }),
        1 => (0..64u16).prop_map(|member| SetOp::Remove { member }),
    ]
}

fn new_set(seed: u64, max_level: usize) -> SortedSet<i32, u16> {
    SortedSet::with_config(Config::new().seed(seed).max_level(max_level)).unwrap()
}

fn apply(set: &mut SortedSet<i32, u16>, reference: &mut BTreeMap<u16, i32>, op: &SetOp) {
    match *op {
        SetOp::Add { score, member } => {
            set.add(score, member).unwrap();
            reference.insert(member, score);
        }
        SetOp::Remove { member } => {
            set.remove(&member);
            reference.remove(&member);
        }
    }
}

/// Reference contents in (score, member) order.
fn sorted(reference: &BTreeMap<u16, i32>) -> Vec<(i32, u16)> {
    let mut pairs: Vec<(i32, u16)> = reference.iter().map(|(m, s)| (*s, *m)).collect();
    pairs.sort();
    pairs
}

fn contents(set: &SortedSet<i32, u16>) -> Vec<(i32, u16)> {
    set.iter().map(|(s, m)| (*s, *m)).collect()
}

// =============================================================================
// Structural properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// verify() holds after every single operation, at any level count.
    #[test]
    fn invariants_hold_after_every_op(
        ops in prop::collection::vec(arbitrary_set_op(), 1..120),
        seed in any::<u64>(),
        max_level in 0usize..12,
    ) {
        let mut set = new_set(seed, max_level);
        let mut reference = BTreeMap::new();
        for op in &ops {
            apply(&mut set, &mut reference, op);
            if let Err(err) = set.verify() {
                return Err(TestCaseError::fail(format!("after {:?}: {}", op, err)));
            }
        }
    }

    /// Iteration is ascending by score, ties by member, and holds exactly the
    /// reference members at the reference scores.
    #[test]
    fn iteration_matches_reference(
        ops in prop::collection::vec(arbitrary_set_op(), 0..120),
        seed in any::<u64>(),
    ) {
        let mut set = new_set(seed, 10);
        let mut reference = BTreeMap::new();
        for op in &ops {
            apply(&mut set, &mut reference, op);
        }
        prop_assert_eq!(contents(&set), sorted(&reference));
        prop_assert_eq!(set.len(), reference.len());
        for (member, score) in &reference {
            prop_assert_eq!(set.score(member), Some(score));
        }
    }

    /// rank(m) counts the entries strictly before (score(m), m).
    #[test]
    fn rank_counts_smaller_entries(
        ops in prop::collection::vec(arbitrary_set_op(), 0..120),
        seed in any::<u64>(),
        probe in 0..64u16,
    ) {
        let mut set = new_set(seed, 10);
        let mut reference = BTreeMap::new();
        for op in &ops {
            apply(&mut set, &mut reference, op);
        }
        let expected = reference.get(&probe).map(|score| {
            reference.iter().filter(|&(m, s)| (s, m) < (score, &probe)).count()
        });
        prop_assert_eq!(set.rank(&probe), expected);
        if let Some(rank) = expected {
            prop_assert_eq!(set.by_rank(rank), Some((&reference[&probe], &probe)));
        }
    }
}

// =============================================================================
// Upsert and inverse properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Adding the same (score, member) twice equals adding it once.
    #[test]
    fn add_is_idempotent(
        ops in prop::collection::vec(arbitrary_set_op(), 0..80),
        seed in any::<u64>(),
        score in -20..20i32,
        member in 0..64u16,
    ) {
        let mut set = new_set(seed, 10);
        let mut reference = BTreeMap::new();
        for op in &ops {
            apply(&mut set, &mut reference, op);
        }

        set.add(score, member).unwrap();
        let once = contents(&set);
        let len = set.len();
        set.add(score, member).unwrap();
        prop_assert_eq!(contents(&set), once);
        prop_assert_eq!(set.len(), len);
        prop_assert!(set.verify().is_ok());
    }

    /// add then remove of a new member restores the previous contents.
    #[test]
    fn add_then_remove_is_inverse(
        ops in prop::collection::vec(arbitrary_set_op(), 0..80),
        seed in any::<u64>(),
        score in -20..20i32,
    ) {
        let mut set = new_set(seed, 10);
        let mut reference = BTreeMap::new();
        for op in &ops {
            apply(&mut set, &mut reference, op);
        }

        let before = contents(&set);
        let fresh = 1000u16;
        prop_assert_eq!(set.add(score, fresh), Ok(None));
        prop_assert_eq!(set.remove(&fresh), Some(score));
        prop_assert_eq!(contents(&set), before);
        prop_assert!(set.verify().is_ok());
    }

    /// Moving a member keeps exactly one entry for it.
    #[test]
    fn moving_keeps_one_entry(
        scores in prop::collection::vec(-20..20i32, 1..30),
        seed in any::<u64>(),
    ) {
        let mut set = new_set(seed, 10);
        set.add(0, 7u16).unwrap();
        for &score in &scores {
            set.add(score, 7u16).unwrap();
            prop_assert_eq!(set.len(), 1);
            prop_assert_eq!(set.score(&7u16), Some(&score));
            prop_assert_eq!(set.rank(&7u16), Some(0));
        }
        prop_assert!(set.verify().is_ok());
    }
}
