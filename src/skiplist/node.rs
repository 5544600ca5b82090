//! Arena node layout.

use smallvec::SmallVec;
use smallvec::smallvec;

/// Node index type. u32 saves space vs usize on 64-bit.
pub(crate) type Idx = u32;

/// Null index marker.
pub(crate) const NULL: Idx = Idx::MAX;

/// Link columns up to this height stay inline. Most nodes are short.
const INLINE_LINKS: usize = 4;

/// A (score, member) pair held by one node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entry<S, M> {
    pub score: S,
    pub member: M,
}

impl<S: Ord, M: Ord> Entry<S, M> {
    pub fn new(score: S, member: M) -> Self {
        Entry { score, member }
    }

    pub fn into_pair(self) -> (S, M) {
        (self.score, self.member)
    }

    /// True if this entry orders strictly before the target. With no target
    /// member, an equal score does not count as before.
    pub(crate) fn precedes(&self, score: &S, member: Option<&M>) -> bool {
        match self.score.cmp(score) {
            std::cmp::Ordering::Less => true,
            std::cmp::Ordering::Greater => false,
            std::cmp::Ordering::Equal => match member {
                Some(member) => self.member < *member,
                None => false,
            },
        }
    }

    pub(crate) fn matches(&self, score: &S, member: &M) -> bool {
        self.score == *score && self.member == *member
    }
}

/// One forward pointer and the number of level-0 hops it spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Link {
    pub next: Idx,
    pub width: usize,
}

impl Link {
    pub const EMPTY: Link = Link {
        next: NULL,
        width: 0,
    };
}

/// A node in the arena. The head carries no entry; freed slots have their
/// entry taken and sit on the free list.
pub(crate) struct Node<S, M> {
    pub entry: Option<Entry<S, M>>,
    /// One link per level the node participates in: `links.len() - 1` is the
    /// node's level.
    pub links: SmallVec<[Link; INLINE_LINKS]>,
}

impl<S, M> Node<S, M> {
    pub fn new(entry: Entry<S, M>, level: usize) -> Self {
        Node {
            entry: Some(entry),
            links: smallvec![Link::EMPTY; level + 1],
        }
    }

    pub fn new_head(levels: usize) -> Self {
        Node {
            entry: None,
            links: smallvec![Link::EMPTY; levels],
        }
    }

    /// Number of levels this node is linked on.
    pub fn height(&self) -> usize {
        self.links.len()
    }

    /// Link at `level`, or an empty link above the node's height.
    pub fn link(&self, level: usize) -> Link {
        self.links.get(level).copied().unwrap_or(Link::EMPTY)
    }
}
