//! Snake body that can never be empty.

use std::collections::VecDeque;

use snake_core::Coord;

/// Ordered body cells, head first. The head is stored apart from the rest so
/// the body always holds at least one segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Body {
    head: Coord,
    rest: VecDeque<Coord>,
}

impl Body {
    /// Builds a body from head-first segments, or `None` when there are none.
    pub(crate) fn from_segments(segments: impl IntoIterator<Item = Coord>) -> Option<Self> {
        let mut segments = segments.into_iter();
        let head = segments.next()?;
        Some(Self {
            head,
            rest: segments.collect(),
        })
    }

    pub(crate) const fn head(&self) -> Coord {
        self.head
    }

    pub(crate) fn len(&self) -> usize {
        self.rest.len() + 1
    }

    pub(crate) fn contains(&self, cell: Coord) -> bool {
        self.head == cell || self.rest.contains(&cell)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        std::iter::once(self.head).chain(self.rest.iter().copied())
    }

    /// Prepends `head` and keeps the tail in place.
    pub(crate) fn grow_to(&mut self, head: Coord) {
        self.rest.push_front(self.head);
        self.head = head;
    }

    /// Prepends `head`, drops the tail and returns the vacated cell.
    pub(crate) fn move_to(&mut self, head: Coord) -> Coord {
        self.grow_to(head);
        // grow_to just pushed the old head, so `rest` holds at least one cell.
        self.rest.pop_back().unwrap_or(head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(cells: &[(i32, i32)]) -> Body {
        Body::from_segments(cells.iter().map(|&(x, y)| Coord::new(x, y))).expect("non-empty")
    }

    #[test]
    fn empty_segments_build_no_body() {
        assert_eq!(Body::from_segments(Vec::new()), None);
    }

    #[test]
    fn single_segment_moves_by_vacating_itself() {
        let mut body = body(&[(0, 0)]);

        assert_eq!(body.move_to(Coord::new(1, 0)), Coord::new(0, 0));
        assert_eq!(body.iter().collect::<Vec<_>>(), vec![Coord::new(1, 0)]);
        assert_eq!(body.len(), 1);
    }

    #[test]
    fn move_keeps_length_and_grow_adds_one() {
        let mut body = body(&[(2, 2), (1, 2), (0, 2)]);

        assert_eq!(body.move_to(Coord::new(3, 2)), Coord::new(0, 2));
        assert_eq!(body.len(), 3);

        body.grow_to(Coord::new(4, 2));
        assert_eq!(
            body.iter().collect::<Vec<_>>(),
            vec![
                Coord::new(4, 2),
                Coord::new(3, 2),
                Coord::new(2, 2),
                Coord::new(1, 2),
            ],
        );
        assert!(body.contains(Coord::new(4, 2)));
        assert!(body.contains(Coord::new(1, 2)));
        assert!(!body.contains(Coord::new(0, 2)));
    }
}
