use smallvec::SmallVec;
use smallvec::smallvec;
use tracing::debug;
use tracing::trace;

use super::iter::Iter;
use super::level::Geometric;
use super::level::LevelGenerator;
use super::node::Entry;
use super::node::Idx;
use super::node::Link;
use super::node::NULL;
use super::node::Node;
use crate::config::Config;
use crate::error::SkipListError;

/// Per-level stacks stay inline up to this many levels.
const STACK_INLINE: usize = 16;

/// The result of one descent through the list.
pub(crate) struct Path {
    /// First node whose key is >= the target, or NULL.
    pub successor: Idx,
    /// The node the descent ended on at level 0.
    pub predecessor: Idx,
    /// Last node visited at each level before dropping down.
    pub update: SmallVec<[Idx; STACK_INLINE]>,
    /// Level-0 hops consumed at each level before dropping down.
    pub distance: SmallVec<[usize; STACK_INLINE]>,
}

impl Path {
    /// Number of entries strictly before the successor.
    pub fn rank(&self) -> usize {
        self.distance.iter().sum()
    }
}

/// A skip list of (score, member) entries with O(log n) rank queries.
///
/// Nodes live in an arena and link to each other by index. Every link carries
/// a width: the number of level-0 hops it spans. Summing the widths crossed on
/// the way down gives the rank of wherever the descent stops.
pub struct SkipList<S, M, G = Geometric> {
    /// Arena of nodes.
    pub(crate) nodes: Vec<Node<S, M>>,
    /// Index of the head node.
    pub(crate) head: Idx,
    /// Number of entries (not counting head).
    len: usize,
    /// Highest level index; the head has `max_level + 1` links.
    max_level: usize,
    /// Free list for reusing removed node slots.
    free_list: Vec<Idx>,
    /// Source of node heights.
    levels: G,
}

impl<S, M> SkipList<S, M> {
    /// Empty list with the default configuration and an entropy-seeded
    /// level generator.
    pub fn new() -> Self {
        let config = Config::default();
        return SkipList::with_levels(config.max_level, Geometric::from_entropy())
            .unwrap_or_else(|_| unreachable!("default config is valid"));
    }

    /// Empty list built from `config`. A seed makes heights reproducible.
    pub fn with_config(config: Config) -> Result<Self, SkipListError> {
        let levels = match config.seed {
            Some(seed) => Geometric::from_seed(seed),
            None => Geometric::from_entropy(),
        };
        return SkipList::with_levels(config.max_level, levels);
    }
}

impl<S, M, G> SkipList<S, M, G> {
    /// Empty list drawing node heights from `levels`.
    pub fn with_levels(max_level: usize, levels: G) -> Result<Self, SkipListError> {
        Config::new().max_level(max_level).validate()?;
        Ok(SkipList {
            nodes: vec![Node::new_head(max_level + 1)],
            head: 0,
            len: 0,
            max_level,
            free_list: Vec::new(),
            levels,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn max_level(&self) -> usize {
        self.max_level
    }

    /// Number of levels, head included.
    pub fn levels(&self) -> usize {
        self.max_level + 1
    }

    /// Drop every entry. Configuration and level generator are kept.
    pub fn clear(&mut self) {
        let levels = self.levels();
        self.nodes.clear();
        self.nodes.push(Node::new_head(levels));
        self.head = 0;
        self.free_list.clear();
        self.len = 0;
    }

    /// Iterate entries in ascending (score, member) order.
    pub fn iter(&self) -> Iter<'_, S, M> {
        Iter::new(&self.nodes, self.node(self.head).link(0).next, self.len)
    }

    // --- Node access helpers ---

    pub(crate) fn node(&self, idx: Idx) -> &Node<S, M> {
        &self.nodes[idx as usize]
    }

    fn node_mut(&mut self, idx: Idx) -> &mut Node<S, M> {
        &mut self.nodes[idx as usize]
    }

    pub(crate) fn entry(&self, idx: Idx) -> &Entry<S, M> {
        match &self.node(idx).entry {
            Some(entry) => entry,
            None => unreachable!("node {} is linked but holds no entry", idx),
        }
    }

    fn alloc_node(&mut self, entry: Entry<S, M>, level: usize) -> Idx {
        if let Some(idx) = self.free_list.pop() {
            *self.node_mut(idx) = Node::new(entry, level);
            idx
        } else {
            let idx = self.nodes.len() as Idx;
            self.nodes.push(Node::new(entry, level));
            idx
        }
    }

    fn release_node(&mut self, idx: Idx) -> Entry<S, M> {
        let node = self.node_mut(idx);
        node.links.clear();
        let entry = match node.entry.take() {
            Some(entry) => entry,
            None => unreachable!("node {} released twice", idx),
        };
        self.free_list.push(idx);
        entry
    }

    /// Node at zero-based position `rank`, or NULL.
    fn node_at(&self, rank: usize) -> Idx {
        if rank >= self.len {
            return NULL;
        }
        // The head sits at position 0, so entry `rank` is `rank + 1` hops out.
        let target = rank + 1;
        let mut current = self.head;
        let mut traversed = 0usize;
        for level in (0..self.levels()).rev() {
            loop {
                let link = self.node(current).link(level);
                if link.next == NULL || traversed + link.width > target {
                    break;
                }
                traversed += link.width;
                current = link.next;
            }
            if traversed == target {
                return current;
            }
        }
        NULL
    }

    /// Entry at zero-based position `rank`.
    pub fn by_rank(&self, rank: usize) -> Option<(&S, &M)> {
        match self.node_at(rank) {
            NULL => None,
            idx => {
                let entry = self.entry(idx);
                Some((&entry.score, &entry.member))
            }
        }
    }

    /// Iterate from zero-based position `rank` to the end.
    pub fn iter_from(&self, rank: usize) -> Iter<'_, S, M> {
        let start = self.node_at(rank);
        Iter::new(&self.nodes, start, self.len.saturating_sub(rank))
    }

    pub fn first(&self) -> Option<(&S, &M)> {
        self.by_rank(0)
    }

    pub fn last(&self) -> Option<(&S, &M)> {
        match self.len {
            0 => None,
            len => self.by_rank(len - 1),
        }
    }
}

impl<S: Ord, M: Ord, G> SkipList<S, M, G> {
    /// Descend from the head towards (score, member).
    ///
    /// At each level, advance while the next node orders strictly before the
    /// target, then drop down. Without a member the descent stops at the first
    /// node of equal score.
    pub(crate) fn locate(&self, score: &S, member: Option<&M>) -> Path {
        let levels = self.levels();
        let mut update: SmallVec<[Idx; STACK_INLINE]> = smallvec![self.head; levels];
        let mut distance: SmallVec<[usize; STACK_INLINE]> = smallvec![0; levels];
        let mut current = self.head;

        for level in (0..levels).rev() {
            loop {
                let link = self.node(current).link(level);
                if link.next == NULL || !self.entry(link.next).precedes(score, member) {
                    break;
                }
                trace!(level, from = current, to = link.next, width = link.width, "advance");
                distance[level] += link.width;
                current = link.next;
            }
            update[level] = current;
        }

        Path {
            successor: self.node(current).link(0).next,
            predecessor: current,
            update,
            distance,
        }
    }

    /// Successor of a path if it is exactly (score, member).
    fn exact(&self, path: &Path, score: &S, member: &M) -> Option<Idx> {
        if path.successor != NULL && self.entry(path.successor).matches(score, member) {
            Some(path.successor)
        } else {
            None
        }
    }

    pub fn contains(&self, score: &S, member: &M) -> bool {
        let path = self.locate(score, Some(member));
        self.exact(&path, score, member).is_some()
    }

    /// First entry whose score is >= `score`.
    pub fn first_at_or_after(&self, score: &S) -> Option<(&S, &M)> {
        let path = self.locate(score, None);
        if path.successor == NULL {
            return None;
        }
        let entry = self.entry(path.successor);
        Some((&entry.score, &entry.member))
    }

    /// Zero-based position of (score, member), if present.
    pub fn rank(&self, score: &S, member: &M) -> Option<usize> {
        let path = self.locate(score, Some(member));
        self.exact(&path, score, member).map(|_| path.rank())
    }

    /// Remove (score, member). Fails with `NotFound` if it is not present.
    pub fn remove(&mut self, score: &S, member: &M) -> Result<Entry<S, M>, SkipListError> {
        let path = self.locate(score, Some(member));
        let target = self
            .exact(&path, score, member)
            .ok_or(SkipListError::NotFound)?;

        for level in 0..self.levels() {
            let pred = path.update[level];
            let link = self.node(pred).link(level);
            if link.next == target {
                let removed = self.node(target).link(level);
                let width = if removed.next == NULL {
                    0
                } else {
                    link.width + removed.width - 1
                };
                self.node_mut(pred).links[level] = Link {
                    next: removed.next,
                    width,
                };
            } else if link.width != 0 {
                // The removed node sat under this span without ending it.
                self.node_mut(pred).links[level].width -= 1;
            }
        }

        let rank = path.rank();
        let entry = self.release_node(target);
        self.len -= 1;
        debug!(rank, len = self.len, "remove");
        Ok(entry)
    }
}

impl<S: Ord, M: Ord, G: LevelGenerator> SkipList<S, M, G> {
    /// Insert (score, member) and return the rank it landed at.
    ///
    /// Fails with `DuplicateKey` if the pair is already present, and with
    /// `HeightBoundExceeded` if the level generator overshoots; the list is
    /// untouched in both cases.
    pub fn insert(&mut self, score: S, member: M) -> Result<usize, SkipListError> {
        let path = self.locate(&score, Some(&member));
        if self.exact(&path, &score, &member).is_some() {
            return Err(SkipListError::DuplicateKey);
        }

        let height = self.levels.level(self.max_level);
        if height > self.max_level {
            return Err(SkipListError::HeightBoundExceeded {
                height,
                max_level: self.max_level,
            });
        }

        let new_idx = self.alloc_node(Entry::new(score, member), height);

        // Hops from update[level] down to update[0], accumulated bottom-up.
        let mut consumed = 0usize;
        for level in 0..=height {
            let pred = path.update[level];
            let old = self.node(pred).link(level);
            let width = if old.next == NULL { 0 } else { old.width - consumed };
            trace!(level, pred, old_width = old.width, consumed, "splice");
            self.node_mut(new_idx).links[level] = Link {
                next: old.next,
                width,
            };
            self.node_mut(pred).links[level] = Link {
                next: new_idx,
                width: consumed + 1,
            };
            consumed += path.distance[level];
        }

        // Spans above the new node now cover one more entry.
        for level in height + 1..self.levels() {
            let link = &mut self.node_mut(path.update[level]).links[level];
            if link.width != 0 {
                link.width += 1;
            }
        }

        self.len += 1;
        let rank = path.rank();
        debug!(rank, level = height, after = path.predecessor, len = self.len, "insert");
        Ok(rank)
    }
}

impl<S, M> Default for SkipList<S, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: std::fmt::Debug, M: std::fmt::Debug, G> std::fmt::Debug for SkipList<S, M, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, S, M, G> IntoIterator for &'a SkipList<S, M, G> {
    type Item = (&'a S, &'a M);
    type IntoIter = Iter<'a, S, M>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
