//! Member-addressed sorted set.
//!
//! Pairs a [`SkipList`] with a `member -> score` keystore. The keystore gives
//! O(1) membership and score lookups, and tells `add` and `remove` which exact
//! (score, member) key to hand the skip list, so the list never sees a
//! duplicate insert or a missing removal.

use std::borrow::Borrow;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::config::Config;
use crate::error::SkipListError;
use crate::error::VerifyError;
use crate::skiplist::Dump;
use crate::skiplist::Iter;
use crate::skiplist::LevelGenerator;
use crate::skiplist::SkipList;
use crate::skiplist::level::Geometric;

/// A set of unique members ordered by (score, member).
///
/// Ties on score are broken by member ascending, so ranks are stable for a
/// given contents regardless of insertion order.
pub struct SortedSet<S, M, G = Geometric> {
    list: SkipList<S, M, G>,
    keystore: FxHashMap<M, S>,
}

impl<S, M> SortedSet<S, M> {
    pub fn new() -> Self {
        SortedSet {
            list: SkipList::new(),
            keystore: FxHashMap::default(),
        }
    }

    pub fn with_config(config: Config) -> Result<Self, SkipListError> {
        Ok(SortedSet {
            list: SkipList::with_config(config)?,
            keystore: FxHashMap::default(),
        })
    }
}

impl<S, M, G> SortedSet<S, M, G> {
    /// Empty set drawing node heights from `levels`.
    pub fn with_levels(max_level: usize, levels: G) -> Result<Self, SkipListError> {
        Ok(SortedSet {
            list: SkipList::with_levels(max_level, levels)?,
            keystore: FxHashMap::default(),
        })
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Iterate (score, member) pairs in ascending order.
    pub fn iter(&self) -> Iter<'_, S, M> {
        self.list.iter()
    }

    /// Iterate from zero-based position `rank` to the end.
    pub fn iter_from(&self, rank: usize) -> Iter<'_, S, M> {
        self.list.iter_from(rank)
    }

    /// Entry at zero-based position `rank`.
    pub fn by_rank(&self, rank: usize) -> Option<(&S, &M)> {
        self.list.by_rank(rank)
    }

    pub fn first(&self) -> Option<(&S, &M)> {
        self.list.first()
    }

    pub fn last(&self) -> Option<(&S, &M)> {
        self.list.last()
    }

    pub fn clear(&mut self) {
        self.list.clear();
        self.keystore.clear();
    }

    pub fn dump(&self) -> Dump<'_, S, M, G> {
        self.list.dump()
    }

    /// The underlying skip list, read-only.
    pub fn skip_list(&self) -> &SkipList<S, M, G> {
        &self.list
    }
}

impl<S: Ord, M: Ord + Hash, G> SortedSet<S, M, G> {
    /// Recorded score of `member`.
    pub fn score<Q>(&self, member: &Q) -> Option<&S>
    where
        M: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.keystore.get(member)
    }

    pub fn contains<Q>(&self, member: &Q) -> bool
    where
        M: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.keystore.contains_key(member)
    }

    /// Zero-based position of `member`, or `None` if it is not in the set.
    pub fn rank<Q>(&self, member: &Q) -> Option<usize>
    where
        M: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (member, score) = self.keystore.get_key_value(member)?;
        self.list.rank(score, member)
    }

    /// Remove `member`, returning the score it had. Absent members are a
    /// no-op and return `None`.
    pub fn remove<Q>(&mut self, member: &Q) -> Option<S>
    where
        M: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (member, score) = self.keystore.remove_entry(member)?;
        if let Err(err) = self.list.remove(&score, &member) {
            unreachable!("keystore member missing from skip list: {}", err);
        }
        debug!(len = self.list.len(), "remove member");
        Some(score)
    }

    /// Check the skip list invariants, then that the skip list and the
    /// keystore hold the same members at the same scores.
    pub fn verify(&self) -> Result<(), VerifyError> {
        self.list.verify()?;

        let mut seen: FxHashSet<&M> = FxHashSet::default();
        for (position, (score, member)) in self.list.iter().enumerate() {
            if !seen.insert(member) {
                return Err(VerifyError::DuplicateMember { position });
            }
            match self.keystore.get(member) {
                None => return Err(VerifyError::MissingFromKeystore { position }),
                Some(stored) if stored != score => {
                    return Err(VerifyError::ScoreMismatch { position });
                }
                Some(_) => {}
            }
        }

        if seen.len() != self.keystore.len() {
            return Err(VerifyError::MemberCountMismatch {
                list: seen.len(),
                keystore: self.keystore.len(),
            });
        }
        Ok(())
    }
}

impl<S: Ord + Clone, M: Ord + Hash + Clone, G: LevelGenerator> SortedSet<S, M, G> {
    /// Insert `member` at `score`, or move it there if it is already present.
    /// Returns the previous score.
    ///
    /// Re-adding a member at its current score changes nothing. The only
    /// error is a level generator drawing past `max_level`, in which case the
    /// set is left as it was.
    pub fn add(&mut self, score: S, member: M) -> Result<Option<S>, SkipListError> {
        let previous = match self.keystore.get(&member) {
            Some(old) if *old == score => return Ok(Some(score)),
            Some(old) => Some(old.clone()),
            None => None,
        };

        // New key first: it differs from the old one by score, and a failed
        // insert leaves the old entry in place.
        let rank = self.list.insert(score.clone(), member.clone())?;
        if let Some(old) = &previous {
            if let Err(err) = self.list.remove(old, &member) {
                unreachable!("keystore member missing from skip list: {}", err);
            }
        }
        self.keystore.insert(member, score);

        debug!(rank, moved = previous.is_some(), len = self.list.len(), "add member");
        Ok(previous)
    }
}

impl<S, M> Default for SortedSet<S, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Ord + Clone, M: Ord + Hash + Clone> Extend<(S, M)> for SortedSet<S, M> {
    fn extend<I: IntoIterator<Item = (S, M)>>(&mut self, iter: I) {
        for (score, member) in iter {
            if let Err(err) = self.add(score, member) {
                unreachable!("geometric levels stay within max_level: {}", err);
            }
        }
    }
}

impl<S: Ord + Clone, M: Ord + Hash + Clone> FromIterator<(S, M)> for SortedSet<S, M> {
    fn from_iter<I: IntoIterator<Item = (S, M)>>(iter: I) -> Self {
        let mut set = SortedSet::new();
        set.extend(iter);
        set
    }
}

impl<S: std::fmt::Debug, M: std::fmt::Debug, G> std::fmt::Debug for SortedSet<S, M, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.list.iter()).finish()
    }
}

impl<'a, S, M, G> IntoIterator for &'a SortedSet<S, M, G> {
    type Item = (&'a S, &'a M);
    type IntoIter = Iter<'a, S, M>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
