//! rankset - a sorted set with O(log n) rank queries.
//!
//! Members are unique and ordered by (score, member). The order lives in a
//! rank-augmented skip list; a hash map from member to score sits beside it so
//! that re-adding a member moves it instead of duplicating it.
//!
//! # Quick Start
//!
//! ```
//! use rankset::SortedSet;
//!
//! let mut set = SortedSet::new();
//! set.add(50, "one").unwrap();
//! set.add(100, "two").unwrap();
//! set.add(100, "three").unwrap();
//!
//! // Equal scores order by member.
//! assert_eq!(set.rank("three"), Some(1));
//! assert_eq!(set.rank("two"), Some(2));
//!
//! // Adding an existing member moves it.
//! set.add(10, "two").unwrap();
//! assert_eq!(set.rank("two"), Some(0));
//!
//! assert_eq!(set.remove("one"), Some(50));
//! assert_eq!(set.rank("one"), None);
//! set.verify().unwrap();
//! ```

pub mod config;
pub mod error;
pub mod skiplist;
pub mod sorted_set;

pub use config::Config;
pub use error::SkipListError;
pub use error::VerifyError;
pub use skiplist::SkipList;
pub use sorted_set::SortedSet;
