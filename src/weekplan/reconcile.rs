//! # Reconciler
//!
//! The single move primitive behind every reorder in the planner: weeks in
//! the week store, sections in a week, and notes within or across sections.
//!
//! A drag-and-drop surface reports a [`DragResult`]: where the item came from
//! and, if it was dropped somewhere valid, where it landed. [`apply`] removes
//! the item at the source position and inserts it at the destination,
//! keeping the relative order of everything else.
//!
//! Anything addressable by container key and index can take part by
//! implementing [`Containers`]. A plain `Vec<T>` is a single container keyed
//! by `()`.
//!
//! Every check happens before the source is touched, so a rejected move
//! never leaves an item half-moved.

use crate::error::{Outcome, Rejection};

/// Identifies one container inside a [`Containers`] implementation.
pub trait ContainerKey: PartialEq {
    fn label(&self) -> String;
}

impl ContainerKey for () {
    fn label(&self) -> String {
        String::new()
    }
}

impl ContainerKey for String {
    fn label(&self) -> String {
        self.clone()
    }
}

/// Ordered containers addressable by key.
pub trait Containers {
    type Key: ContainerKey;
    type Item;

    /// Number of items in the container, or `None` if there is no such container.
    fn len_of(&self, key: &Self::Key) -> Option<usize>;

    /// Removes the item at `index`, if there is one.
    fn remove_at(&mut self, key: &Self::Key, index: usize) -> Option<Self::Item>;

    /// Inserts `item` at `index`. Callers guarantee `index <= len`.
    fn insert_at(&mut self, key: &Self::Key, index: usize, item: Self::Item);
}

impl<T> Containers for Vec<T> {
    type Key = ();
    type Item = T;

    fn len_of(&self, _key: &()) -> Option<usize> {
        Some(self.len())
    }

    fn remove_at(&mut self, _key: &(), index: usize) -> Option<T> {
        (index < self.len()).then(|| self.remove(index))
    }

    fn insert_at(&mut self, _key: &(), index: usize, item: T) {
        self.insert(index, item);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position<K> {
    pub container: K,
    pub index: usize,
}

impl<K> Position<K> {
    pub fn new(container: K, index: usize) -> Self {
        Self { container, index }
    }
}

/// What a drag-and-drop surface reports when a drag ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragResult<K> {
    pub source: Position<K>,
    /// `None` when the item was dropped outside any container.
    pub destination: Option<Position<K>>,
}

impl<K> DragResult<K> {
    pub fn new(source: Position<K>, destination: Position<K>) -> Self {
        Self {
            source,
            destination: Some(destination),
        }
    }

    pub fn cancelled(source: Position<K>) -> Self {
        Self {
            source,
            destination: None,
        }
    }
}

impl DragResult<()> {
    pub fn within(from: usize, to: usize) -> Self {
        Self::new(Position::new((), from), Position::new((), to))
    }
}

/// Applies a drag to `containers`.
pub fn apply<C>(containers: &mut C, drag: &DragResult<C::Key>) -> Outcome
where
    C: Containers + ?Sized,
{
    let Some(dest) = &drag.destination else {
        return Rejection::Cancelled.into();
    };
    let source = &drag.source;

    let Some(source_len) = containers.len_of(&source.container) else {
        return Rejection::NotFound(source.container.label()).into();
    };
    let Some(dest_len) = containers.len_of(&dest.container) else {
        return Rejection::NotFound(dest.container.label()).into();
    };
    if source.index >= source_len {
        return Rejection::OutOfRange {
            index: source.index,
            len: source_len,
        }
        .into();
    }

    let same_container = source.container == dest.container;
    let dest_len_after_removal = if same_container {
        source_len - 1
    } else {
        dest_len
    };
    if dest.index > dest_len_after_removal {
        return Rejection::OutOfRange {
            index: dest.index,
            len: dest_len_after_removal,
        }
        .into();
    }
    if same_container && source.index == dest.index {
        return Rejection::NoChange.into();
    }

    let Some(item) = containers.remove_at(&source.container, source.index) else {
        return Rejection::NotFound(source.container.label()).into();
    };
    containers.insert_at(&dest.container, dest.index, item);
    Outcome::Applied
}

/// Moves one element of a single ordered sequence.
pub fn reorder<T>(items: &mut Vec<T>, from: usize, to: usize) -> Outcome {
    apply(items, &DragResult::within(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    /// Minimal multi-container fixture keyed by name.
    #[derive(Debug, Default)]
    struct Columns(BTreeMap<String, Vec<char>>);

    impl Columns {
        fn with(entries: &[(&str, &str)]) -> Self {
            Self(
                entries
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.chars().collect()))
                    .collect(),
            )
        }

        fn get(&self, key: &str) -> String {
            self.0[key].iter().collect()
        }
    }

    impl Containers for Columns {
        type Key = String;
        type Item = char;

        fn len_of(&self, key: &String) -> Option<usize> {
            self.0.get(key).map(Vec::len)
        }

        fn remove_at(&mut self, key: &String, index: usize) -> Option<char> {
            Some(self.0.get_mut(key)?.remove(index))
        }

        fn insert_at(&mut self, key: &String, index: usize, item: char) {
            self.0.get_mut(key).unwrap().insert(index, item);
        }
    }

    fn drag(from: (&str, usize), to: (&str, usize)) -> DragResult<String> {
        DragResult::new(
            Position::new(from.0.to_string(), from.1),
            Position::new(to.0.to_string(), to.1),
        )
    }

    #[test]
    fn reorder_moves_forward_and_backward() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        assert_eq!(reorder(&mut items, 0, 2), Outcome::Applied);
        assert_eq!(items, vec!['b', 'c', 'a', 'd']);

        assert_eq!(reorder(&mut items, 3, 0), Outcome::Applied);
        assert_eq!(items, vec!['d', 'b', 'c', 'a']);
    }

    #[test]
    fn same_position_is_no_change() {
        let mut items = vec![1, 2, 3];
        assert_eq!(
            reorder(&mut items, 1, 1),
            Outcome::Rejected(Rejection::NoChange)
        );
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn out_of_range_leaves_sequence_untouched() {
        let mut items = vec![1, 2, 3];
        assert_eq!(
            reorder(&mut items, 3, 0),
            Outcome::Rejected(Rejection::OutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            reorder(&mut items, 0, 3),
            Outcome::Rejected(Rejection::OutOfRange { index: 3, len: 2 })
        );
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn cancelled_drag_does_nothing() {
        let mut items = vec![1, 2];
        let outcome = apply(&mut items, &DragResult::cancelled(Position::new((), 0)));
        assert_eq!(outcome, Outcome::Rejected(Rejection::Cancelled));
        assert_eq!(items, vec![1, 2]);
    }

    #[test]
    fn cross_container_move_preserves_relative_order() {
        let mut cols = Columns::with(&[("mon", "xy"), ("tue", "pq")]);
        assert_eq!(apply(&mut cols, &drag(("mon", 0), ("tue", 1))), Outcome::Applied);
        assert_eq!(cols.get("mon"), "y");
        assert_eq!(cols.get("tue"), "pxq");
    }

    #[test]
    fn cross_container_allows_append_at_end() {
        let mut cols = Columns::with(&[("mon", "xy"), ("tue", "")]);
        assert_eq!(apply(&mut cols, &drag(("mon", 1), ("tue", 0))), Outcome::Applied);
        assert_eq!(cols.get("mon"), "x");
        assert_eq!(cols.get("tue"), "y");
    }

    #[test]
    fn unknown_container_is_not_found() {
        let mut cols = Columns::with(&[("mon", "xy")]);
        assert_eq!(
            apply(&mut cols, &drag(("mon", 0), ("sun", 0))),
            Outcome::Rejected(Rejection::NotFound("sun".into()))
        );
        assert_eq!(cols.get("mon"), "xy");
    }

    #[test]
    fn cross_container_destination_past_end_is_rejected() {
        let mut cols = Columns::with(&[("mon", "xy"), ("tue", "p")]);
        assert_eq!(
            apply(&mut cols, &drag(("mon", 0), ("tue", 2))),
            Outcome::Rejected(Rejection::OutOfRange { index: 2, len: 1 })
        );
        assert_eq!(cols.get("mon"), "xy");
        assert_eq!(cols.get("tue"), "p");
    }
}
