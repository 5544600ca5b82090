//! Error types for the skip list engine and its verification oracle.

/// Misuse of the raw skip list engine.
///
/// `SortedSet` never surfaces `DuplicateKey` or `NotFound`: it checks its
/// keystore before touching the engine.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipListError {
    /// Insert of a (score, member) pair that is already present.
    #[error("[SkipList]Key Already Exists")]
    DuplicateKey,
    /// Removal of a (score, member) pair that is not present.
    #[error("[SkipList]Key Is Not Exist")]
    NotFound,
    /// The level generator drew a height above the structural bound.
    #[error("[SkipList]Height {height} Exceeds Max Level {max_level}")]
    HeightBoundExceeded { height: usize, max_level: usize },
    /// Configuration asked for more levels than the engine supports.
    #[error("[Config]Max Level {requested} Out Of Range (limit {limit})")]
    InvalidMaxLevel { requested: usize, limit: usize },
}

/// A structural invariant that `verify()` found broken.
///
/// Nodes are identified by their zero-based position on level 0; the head is
/// reported as `None`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("head has {found} levels, expected {expected}")]
    HeadLevels { found: usize, expected: usize },
    #[error("node {node:?} has height {height} above max level {max_level}")]
    NodeTooTall {
        node: Option<usize>,
        height: usize,
        max_level: usize,
    },
    #[error("node {node:?} has no next node at level {level} but width {width}")]
    DanglingWidth {
        node: Option<usize>,
        level: usize,
        width: usize,
    },
    #[error("node {node:?} at level {level} links to a node not on level 0")]
    UnreachableLink { node: Option<usize>, level: usize },
    #[error("node {node:?} at level {level} has width {width} but its next node is {actual} hops away")]
    WidthMismatch {
        node: Option<usize>,
        level: usize,
        width: usize,
        actual: usize,
    },
    #[error("entry at position {position} is not ordered after its predecessor")]
    OutOfOrder { position: usize },
    #[error("level 0 holds {counted} entries but len() is {len}")]
    LengthMismatch { counted: usize, len: usize },
    #[error("member at position {position} appears more than once")]
    DuplicateMember { position: usize },
    #[error("member at position {position} is missing from the keystore")]
    MissingFromKeystore { position: usize },
    #[error("member at position {position} has a different score in the keystore")]
    ScoreMismatch { position: usize },
    #[error("skip list holds {list} members but keystore holds {keystore}")]
    MemberCountMismatch { list: usize, keystore: usize },
}
