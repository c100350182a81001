//! # Step enumeration for a level transition.
//!
//! A transition from `current` to `target` is decomposed into single-level
//! steps. Each [`Step`] is one `level_changing` / `level_changed` pair.
//!
//! ```text
//! 0 → 3 :  (0,1) (1,2) (2,3)
//! 5 → 2 :  (5,4) (4,3) (3,2)
//! 2 → 2 :  (2,2)
//! ```
//!
//! ## Rules
//! - `new` values are strictly monotonic and cover every level between the
//!   ends exactly once; nothing is skipped or revisited.
//! - An unchanged level still yields exactly one no-op step.

use std::iter::FusedIterator;

use crate::level::Level;

/// One single-level move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Level before the step.
    pub old: Level,
    /// Level after the step.
    pub new: Level,
}

impl Step {
    /// True for the confirmation step of a same-level request.
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.old == self.new
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Up,
    Down,
    Stay { done: bool },
}

/// Iterator over the steps between two levels. See [`steps`].
#[derive(Debug, Clone)]
pub struct Steps {
    cursor: u32,
    target: u32,
    direction: Direction,
}

/// Enumerates the steps that move `current` to `target`.
///
/// # Example
/// ```
/// use levelvisor::{Level, steps};
///
/// let news: Vec<u32> = steps(Level::new(5), Level::new(2)).map(|s| s.new.get()).collect();
/// assert_eq!(news, vec![4, 3, 2]);
/// ```
pub fn steps(current: Level, target: Level) -> Steps {
    let (cursor, target) = (current.get(), target.get());
    let direction = match cursor.cmp(&target) {
        std::cmp::Ordering::Less => Direction::Up,
        std::cmp::Ordering::Greater => Direction::Down,
        std::cmp::Ordering::Equal => Direction::Stay { done: false },
    };
    Steps {
        cursor,
        target,
        direction,
    }
}

impl Iterator for Steps {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let old = Level::new(self.cursor);
        let new = match &mut self.direction {
            Direction::Up if self.cursor < self.target => old.next()?,
            Direction::Down if self.cursor > self.target => old.prev()?,
            Direction::Stay { done } if !*done => {
                *done = true;
                old
            }
            _ => return None,
        };
        self.cursor = new.get();
        Some(Step { old, new })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = match self.direction {
            Direction::Up | Direction::Down => self.cursor.abs_diff(self.target) as usize,
            Direction::Stay { done } => usize::from(!done),
        };
        (n, Some(n))
    }
}

impl ExactSizeIterator for Steps {}
impl FusedIterator for Steps {}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(current: u32, target: u32) -> Vec<(u32, u32)> {
        steps(Level::new(current), Level::new(target))
            .map(|s| (s.old.get(), s.new.get()))
            .collect()
    }

    #[test]
    fn ascending_walk() {
        assert_eq!(pairs(0, 3), vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn descending_walk() {
        assert_eq!(pairs(5, 2), vec![(5, 4), (4, 3), (3, 2)]);
    }

    #[test]
    fn same_level_yields_one_noop() {
        let all: Vec<Step> = steps(Level::new(2), Level::new(2)).collect();
        assert_eq!(all.len(), 1);
        assert!(all[0].is_noop());
        assert_eq!(all[0].old, Level::new(2));
    }

    #[test]
    fn exact_size_matches_output() {
        let it = steps(Level::new(7), Level::new(1));
        assert_eq!(it.len(), 6);
        assert_eq!(steps(Level::new(3), Level::new(3)).len(), 1);
    }

    #[test]
    fn walks_up_to_the_top_level() {
        let top = u32::MAX;
        assert_eq!(pairs(top - 2, top), vec![(top - 2, top - 1), (top - 1, top)]);
    }

    #[test]
    fn fused_after_exhaustion() {
        let mut it = steps(Level::new(1), Level::new(1));
        assert!(it.next().is_some());
        assert!(it.next().is_none());
        assert!(it.next().is_none());
    }
}
