//! Reproduce AFL crashes without AFL instrumentation
//!
//! Usage: cargo run --bin repro_crash -- <crash_file>
//!
//! Replays the input op by op, printing the operation, the list dump, and the
//! first verification failure. Set `RUST_LOG=rankset=trace` to see each
//! descent.

use std::collections::BTreeMap;
use std::fs;

use rankset::SortedSet;
use rankset::skiplist::LevelGenerator;
use rankset::skiplist::level::Fixed;
use rankset::skiplist::level::Geometric;
use rankset::skiplist::level::Uniform;
use tracing_subscriber::EnvFilter;

const MAX_LEVEL: usize = 6;

#[derive(Debug, Clone, Copy)]
enum FuzzOp {
    Add { score: u8, member: u8 },
    Remove { member: u8 },
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
                    score: rest[0] % 32,
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

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <crash_file>", args[0]);
        std::process::exit(1);
    }
    let data = match fs::read(&args[1]) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("Failed to read {}: {}", args[1], err);
            std::process::exit(1);
        }
    };

    eprintln!("Input: {} bytes", data.len());
    eprintln!("Hex: {}", data.iter().map(|b| format!("{:02x}", b)).collect::<Vec<_>>().join(" "));

    let Some((&selector, mut remaining)) = data.split_first() else {
        eprintln!("Empty input");
        return;
    };
    eprintln!("Level generator: {}", selector % 4);

    let mut set = match SortedSet::with_levels(MAX_LEVEL, generator(selector)) {
        Ok(set) => set,
        Err(err) => {
            eprintln!("Bad config: {}", err);
            std::process::exit(1);
        }
    };
    let mut reference: BTreeMap<u8, u8> = BTreeMap::new();
    let mut op_num = 0;

    while let Some((op, rest)) = FuzzOp::from_bytes(remaining) {
        remaining = rest;
        op_num += 1;
        eprintln!("Op {}: {:?}", op_num, op);

        let outcome = match op {
            FuzzOp::Add { score, member } => {
                reference.insert(member, score);
                set.add(score, member).map(|_| ())
            }
            FuzzOp::Remove { member } => {
                reference.remove(&member);
                set.remove(&member);
                Ok(())
            }
            FuzzOp::Shift { delta } => {
                let mut outcome = Ok(());
                for (member, score) in reference.iter_mut() {
                    *score = score.wrapping_add(delta) % 32;
                    outcome = outcome.and(set.add(*score, *member).map(|_| ()));
                }
                outcome
            }
        };
        if let Err(err) = outcome {
            eprintln!("  Add failed: {}", err);
        }

        eprintln!("{}", set.dump());
        if let Err(err) = set.verify() {
            eprintln!("  Verify failed after op {}: {}", op_num, err);
            std::process::exit(2);
        }

        let mut expected: Vec<(u8, u8)> = reference.iter().map(|(m, s)| (*s, *m)).collect();
        expected.sort();
        let actual: Vec<(u8, u8)> = set.iter().map(|(s, m)| (*s, *m)).collect();
        if actual != expected {
            eprintln!("  Diverged from reference:");
            eprintln!("    expected {:?}", expected);
            eprintln!("    actual   {:?}", actual);
            std::process::exit(2);
        }
        for (rank, (_, member)) in expected.iter().enumerate() {
            if set.rank(member) != Some(rank) {
                eprintln!("  rank({}) = {:?}, expected {}", member, set.rank(member), rank);
                std::process::exit(2);
            }
        }
    }

    eprintln!("No failure reproduced after {} ops", op_num);
}
