//! Rank-Augmented Skip List
//!
//! An ordered list of (score, member) entries where every forward link records
//! how many level-0 positions it skips. One descent from the head finds a key,
//! collects the predecessor at every level, and sums the widths it crossed,
//! which is the key's rank.
//!
//! # Width Semantics
//!
//! - `node.links[level].width` = level-0 hops from this node to
//!   `node.links[level].next`
//! - a link with no next node has width 0
//! - the head sits at position 0, the first entry at position 1
//!
//! # Operations
//!
//! - `insert(score, member)`: O(log n) expected, fails on an exact duplicate
//! - `remove(score, member)`: O(log n) expected, fails if absent
//! - `rank(score, member)`: O(log n) expected
//! - `by_rank(rank)`: O(log n) expected
//! - `iter()` / `iter_from(rank)`: ascending walk along level 0
//! - `verify()`: O(n * levels) structural check
//!
//! All bounds are probabilistic. A level generator that always returns 0
//! degrades every operation to O(n).
//!
//! # Structure
//!
//! ```text
//! Level 2: HEAD ---------------4--------------> D -------> NULL
//! Level 1: HEAD --1--> A ------2-------> C --1--> D -------> NULL
//! Level 0: HEAD --1--> A --1--> B --1--> C --1--> D -------> NULL
//! ```
//!
//! Nodes live in a `Vec` arena and refer to each other by `u32` index, so a
//! node linked on several levels is never aliased by more than plain integers.
//! Removed slots go on a free list and are reused by later inserts.

mod dump;
mod iter;
pub mod level;
mod list;
mod node;
mod verify;

pub use dump::Dump;
pub use iter::Iter;
pub use level::LevelGenerator;
pub use list::SkipList;
pub use node::Entry;
