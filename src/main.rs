//! Walk-through of the sorted set: builds a small leaderboard, moves and
//! removes members, and prints the level structure after each step.
//!
//! `RUST_LOG=rankset=trace` shows every step of every descent.

use rankset::Config;
use rankset::SortedSet;
use tracing_subscriber::EnvFilter;

const PLAYERS: &[(u32, &str)] = &[
    (200, "andrew"),
    (100, "ryan"),
    (300, "sciampacone"),
    (100, "vanessa"),
    (200, "maya"),
    (500, "debra"),
    (50, "jean"),
    (900, "rae"),
    (500, "ann"),
    (150, "rachel"),
    (325, "tony"),
    (450, "anthony"),
];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(1);
    let config = Config::new().max_level(4).seed(seed);
    let mut set = match SortedSet::with_config(config) {
        Ok(set) => set,
        Err(err) => {
            eprintln!("bad config: {}", err);
            std::process::exit(1);
        }
    };

    for &(score, name) in PLAYERS {
        if let Err(err) = set.add(score, name) {
            eprintln!("add {} failed: {}", name, err);
            std::process::exit(1);
        }
        println!("after add({}, {:?}): rank {:?}", score, name, set.rank(name));
    }
    println!("{}", set.dump());

    for name in ["maya", "andrew", "vanessa"] {
        println!("remove({:?}) -> {:?}", name, set.remove(name));
    }
    println!("{}", set.dump());

    if let Ok(previous) = set.add(1000, "jean") {
        println!("moved jean from {:?} to rank {:?}", previous, set.rank("jean"));
    }
    println!("{}", set.dump());

    match set.verify() {
        Ok(()) => println!("verify: ok ({} members)", set.len()),
        Err(err) => {
            eprintln!("verify: {}", err);
            std::process::exit(1);
        }
    }
}
