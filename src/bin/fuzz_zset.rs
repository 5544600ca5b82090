//! AFL Fuzz harness for the sorted set
//!
//! Drives a `SortedSet` and a `BTreeMap` reference model with the same
//! operations and checks after every step that:
//! 1. `verify()` passes (order, widths, keystore agreement)
//! 2. Iteration matches the reference sorted by (score, member)
//! 3. `rank` and `by_rank` agree with the reference positions
//!
//! The first input byte picks the level generator, so the fuzzer also covers
//! the flat-list and full-tower shapes.

use std::collections::BTreeMap;

use afl::fuzz;
use rankset::SortedSet;
use rankset::skiplist::LevelGenerator;
use rankset::skiplist::level::Fixed;
use rankset::skiplist::level::Geometric;
use rankset::skiplist::level::Uniform;

const MAX_LEVEL: usize = 6;

/// Operation types the fuzzer can generate
#[derive(Debug, Clone, Copy)]
enum FuzzOp {
    /// Add or move a member
    Add { score: u8, member: u8 },
    /// Remove a member (may be absent)
    Remove { member: u8 },
    /// Move every member to a shifted score
    Shift { delta: u8 },
}

impl FuzzOp {
    fn from_bytes(bytes: &[u8]) -> Option<(FuzzOp, &[u8])> {
        if bytes.is_empty() {
            return None;
        }

        let op_type = bytes[0] % 3;
        let rest = &bytes[1..];

        match op_type {
            0 if rest.len() >= 2 => {
                let op = FuzzOp::Add {
                    score: rest[0] % 32, // small range forces ties
                    member: rest[1] % 64,
                };
                Some((op, &rest[2..]))
            }
            1 if !rest.is_empty() => Some((FuzzOp::Remove { member: rest[0] % 64 }, &rest[1..])),
            2 if !rest.is_empty() => Some((FuzzOp::Shift { delta: rest[0] % 8 }, &rest[1..])),
            _ => None,
        }
    }
}

fn generator(selector: u8) -> Box<dyn LevelGenerator> {
    match selector % 4 {
        0 => Box::new(Geometric::from_seed(selector as u64)),
        1 => Box::new(Uniform::from_seed(selector as u64)),
        2 => Box::new(Fixed(0)),
        _ => Box::new(Fixed(MAX_LEVEL)),
    }
}

fn check(set: &SortedSet<u8, u8, Box<dyn LevelGenerator>>, reference: &BTreeMap<u8, u8>) {
    set.verify().expect("structural invariant violated");

    let mut expected: Vec<(u8, u8)> = reference.iter().map(|(m, s)| (*s, *m)).collect();
    expected.sort();
    let actual: Vec<(u8, u8)> = set.iter().map(|(s, m)| (*s, *m)).collect();
    assert_eq!(actual, expected, "iteration diverged from reference");

    for (rank, (score, member)) in expected.iter().enumerate() {
        assert_eq!(set.rank(member), Some(rank), "rank of {}", member);
        assert_eq!(set.by_rank(rank), Some((score, member)), "by_rank {}", rank);
    }
}

fn main() {
    fuzz!(|data: &[u8]| {
        let Some((&selector, mut remaining)) = data.split_first() else {
            return;
        };
        let mut set = SortedSet::with_levels(MAX_LEVEL, generator(selector))
            .expect("max level within limit");
        let mut reference: BTreeMap<u8, u8> = BTreeMap::new();

        while let Some((op, rest)) = FuzzOp::from_bytes(remaining) {
            remaining = rest;

            match op {
                FuzzOp::Add { score, member } => {
                    let previous = set.add(score, member).expect("level in bounds");
                    assert_eq!(previous, reference.insert(member, score));
                }
                FuzzOp::Remove { member } => {
                    assert_eq!(set.remove(&member), reference.remove(&member));
                }
                FuzzOp::Shift { delta } => {
                    for (member, score) in reference.iter_mut() {
                        *score = score.wrapping_add(delta) % 32;
                        set.add(*score, *member).expect("level in bounds");
                    }
                }
            }

            check(&set, &reference);
        }
    });
}
