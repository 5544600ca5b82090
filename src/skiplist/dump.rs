//! Text rendering of the level structure, for debugging.
//!
//! ```text
//! size: 3
//! == entries
//! 0: (50, "one")
//! 1: (100, "three")
//! 2: (100, "two")
//! == structure
//! ++        1     1     0  head
//! ++        1     0     0  0
//! +         1     0     0  1
//! +         0     0     0  2
//! ```
//!
//! One row per node, head first. The first block has a column per level:
//! `+` where the node is linked, `|` where a link on that level passes over
//! the node, blank once the level has no more links. The second block is the
//! node's width per level (0 above its height).

use std::fmt;

use super::list::SkipList;
use super::node::NULL;

/// Display adapter returned by [`SkipList::dump`].
pub struct Dump<'a, S, M, G> {
    list: &'a SkipList<S, M, G>,
}

impl<S, M, G> SkipList<S, M, G> {
    pub fn dump(&self) -> Dump<'_, S, M, G> {
        Dump { list: self }
    }
}

impl<S: fmt::Debug, M: fmt::Debug, G> fmt::Display for Dump<'_, S, M, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list = self.list;
        let levels = list.levels();

        writeln!(f, "size: {}", list.len())?;
        writeln!(f, "== entries")?;
        for (rank, (score, member)) in list.iter().enumerate() {
            writeln!(f, "{}: ({:?}, {:?})", rank, score, member)?;
        }

        writeln!(f, "== structure")?;
        let head = list.node(list.head);
        let mut pending: Vec<_> = (0..levels).map(|level| head.link(level).next).collect();

        for level in 0..levels {
            f.write_str(if pending[level] == NULL { " " } else { "+" })?;
        }
        write_widths(f, (0..levels).map(|level| head.link(level).width))?;
        writeln!(f, "  head")?;

        let mut idx = head.link(0).next;
        let mut rank = 0usize;
        while idx != NULL {
            let node = list.node(idx);
            for level in 0..levels {
                let mark = if pending[level] == idx {
                    pending[level] = node.link(level).next;
                    "+"
                } else if pending[level] == NULL {
                    " "
                } else {
                    "|"
                };
                f.write_str(mark)?;
            }
            write_widths(f, (0..levels).map(|level| node.link(level).width))?;
            writeln!(f, "  {}", rank)?;
            idx = node.link(0).next;
            rank += 1;
        }
        Ok(())
    }
}

fn write_widths(f: &mut fmt::Formatter<'_>, widths: impl Iterator<Item = usize>) -> fmt::Result {
    f.write_str("  ")?;
    for width in widths {
        write!(f, " {:>5}", width)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::skiplist::SkipList;
    use crate::skiplist::level::Fixed;
    use crate::skiplist::level::LevelGenerator;

    #[test]
    fn dump_flat_list() {
        let mut list = SkipList::with_levels(1, Fixed(0)).unwrap();
        list.insert(2, "b").unwrap();
        list.insert(1, "a").unwrap();
        let text = list.dump().to_string();
        let expected = "\
size: 2
== entries
0: (1, \"a\")
1: (2, \"b\")
== structure
+        1     0  head
+        1     0  0
+        0     0  1
";
        assert_eq!(text, expected);
    }

    #[test]
    fn dump_marks_passed_over_nodes() {
        let script = Script(vec![1, 0, 1].into_iter());
        let mut list = SkipList::with_levels(1, script).unwrap();
        list.insert(1, 'a').unwrap();
        list.insert(2, 'b').unwrap();
        list.insert(3, 'c').unwrap();
        list.verify().unwrap();

        let text = list.dump().to_string();
        assert!(text.contains("++       1     1  head\n"), "{}", text);
        assert!(text.contains("++       1     2  0\n"), "{}", text);
        assert!(text.contains("+|       1     0  1\n"), "{}", text);
        assert!(text.contains("++       0     0  2\n"), "{}", text);
    }

    struct Script(std::vec::IntoIter<usize>);

    impl LevelGenerator for Script {
        fn level(&mut self, _max_level: usize) -> usize {
            self.0.next().unwrap_or(0)
        }
    }
}
