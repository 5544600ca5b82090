//! Structural self-check.
//!
//! Re-derives every width from the raw level-0 chain instead of trusting the
//! bookkeeping that insert and remove maintain:
//!
//! - the head is linked on every level
//! - level 0 is strictly ascending by (score, member) and holds `len()` entries
//! - a link with no next node has width 0
//! - a link's width equals the level-0 distance to its next node
//!
//! Nothing here mutates the list. Violations come back as [`VerifyError`].

use super::list::SkipList;
use super::node::Idx;
use super::node::NULL;
use crate::error::VerifyError;

/// Position marker for arena slots not on the level-0 chain.
const UNLINKED: usize = usize::MAX;

impl<S: Ord, M: Ord, G> SkipList<S, M, G> {
    pub fn verify(&self) -> Result<(), VerifyError> {
        let levels = self.levels();
        let head = self.node(self.head);
        if head.height() != levels {
            return Err(VerifyError::HeadLevels {
                found: head.height(),
                expected: levels,
            });
        }

        // Level-0 position of every linked slot; the head is position 0.
        let mut position = vec![UNLINKED; self.nodes.len()];
        let mut chain: Vec<Idx> = vec![self.head];
        position[self.head as usize] = 0;

        let mut idx = head.link(0).next;
        while idx != NULL {
            let rank = chain.len() - 1;
            if position[idx as usize] != UNLINKED || chain.len() > self.nodes.len() {
                // Revisiting a slot means level 0 loops back on itself.
                return Err(VerifyError::OutOfOrder { position: rank });
            }
            if let Some(&prev) = chain.last() {
                if prev != self.head && self.entry(prev) >= self.entry(idx) {
                    return Err(VerifyError::OutOfOrder { position: rank });
                }
            }
            position[idx as usize] = chain.len();
            chain.push(idx);
            idx = self.node(idx).link(0).next;
        }

        let counted = chain.len() - 1;
        if counted != self.len() {
            return Err(VerifyError::LengthMismatch {
                counted,
                len: self.len(),
            });
        }

        for &idx in &chain {
            let node = self.node(idx);
            let id = if idx == self.head {
                None
            } else {
                Some(position[idx as usize] - 1)
            };
            if node.height() > levels {
                return Err(VerifyError::NodeTooTall {
                    node: id,
                    height: node.height() - 1,
                    max_level: self.max_level(),
                });
            }
            for level in 0..levels {
                let link = node.link(level);
                if link.next == NULL {
                    if link.width != 0 {
                        return Err(VerifyError::DanglingWidth {
                            node: id,
                            level,
                            width: link.width,
                        });
                    }
                    continue;
                }
                let target = match position.get(link.next as usize) {
                    Some(&p) if p != UNLINKED => p,
                    _ => return Err(VerifyError::UnreachableLink { node: id, level }),
                };
                let actual = match target.checked_sub(position[idx as usize]) {
                    Some(hops) if hops > 0 => hops,
                    _ => return Err(VerifyError::UnreachableLink { node: id, level }),
                };
                if actual != link.width {
                    return Err(VerifyError::WidthMismatch {
                        node: id,
                        level,
                        width: link.width,
                        actual,
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::error::VerifyError;
    use crate::skiplist::SkipList;
    use crate::skiplist::level::Fixed;

    fn tower() -> SkipList<i32, char, Fixed> {
        let mut list = SkipList::with_levels(3, Fixed(3)).unwrap();
        for (i, c) in ['a', 'b', 'c', 'd'].iter().enumerate() {
            list.insert(i as i32, *c).unwrap();
        }
        list.verify().unwrap();
        list
    }

    #[test]
    fn empty_list_verifies() {
        let list: SkipList<i32, i32> = SkipList::with_config(Config::new().seed(1)).unwrap();
        assert_eq!(list.verify(), Ok(()));
    }

    #[test]
    fn detects_corrupt_width() {
        let mut list = tower();
        list.nodes[list.head as usize].links[2].width += 1;
        assert_eq!(
            list.verify(),
            Err(VerifyError::WidthMismatch {
                node: None,
                level: 2,
                width: 2,
                actual: 1,
            })
        );
    }

    #[test]
    fn detects_dangling_width() {
        let mut list = tower();
        let last = list.nodes.len() - 1;
        list.nodes[last].links[1].width = 3;
        assert_eq!(
            list.verify(),
            Err(VerifyError::DanglingWidth {
                node: Some(3),
                level: 1,
                width: 3,
            })
        );
    }

    #[test]
    fn detects_out_of_order_entries() {
        let mut list = tower();
        if let Some(entry) = list.nodes[1].entry.as_mut() {
            entry.score = 10;
        }
        assert_eq!(list.verify(), Err(VerifyError::OutOfOrder { position: 1 }));
    }

    #[test]
    fn detects_backward_link() {
        let mut list = tower();
        // Point the last node's level-2 link back at the first node.
        let last = list.nodes.len() - 1;
        list.nodes[last].links[2].next = 1;
        list.nodes[last].links[2].width = 1;
        assert_eq!(
            list.verify(),
            Err(VerifyError::UnreachableLink {
                node: Some(3),
                level: 2,
            })
        );
    }
}
