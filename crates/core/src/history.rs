//! Navigable input history with an in-place draft slot.
//!
//! The buffer always holds at least one entry and a cursor that addresses
//! one of them. The entry under the cursor is whatever the input box is
//! currently showing, whether it was ever submitted or not.

use tracing::trace;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryBuffer<T> {
    entries: Vec<T>,
    cursor: usize,
}

impl<T> HistoryBuffer<T> {
    /// Create a buffer holding a single `initial` entry with the cursor on it.
    pub fn new(initial: T) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    /// Append `item` and move the cursor onto it.
    pub fn push(&mut self, item: T) {
        self.entries.push(item);
        self.cursor = self.entries.len() - 1;
    }

    /// Drop the last entry. The last remaining entry is never removed.
    pub fn pop(&mut self) {
        if self.entries.len() <= 1 {
            trace!(target: "history", "pop on single entry ignored");
            return;
        }
        self.entries.pop();
        self.cursor = self.cursor.min(self.entries.len() - 1);
    }

    /// Snap the cursor back to the newest entry, abandoning any browsing.
    pub fn restore(&mut self) {
        self.cursor = self.entries.len() - 1;
    }

    /// Step towards older entries; stays put at the oldest one.
    pub fn back(&mut self) -> &T {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
        &self.entries[self.cursor]
    }

    /// Step towards newer entries; stays put at the newest one.
    pub fn forward(&mut self) -> &T {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
        }
        &self.entries[self.cursor]
    }

    /// Overwrite the entry under the cursor.
    ///
    /// This edits in place wherever the cursor is, so editing while browsing
    /// rewrites that older entry.
    pub fn set_current_state(&mut self, item: T) {
        self.entries[self.cursor] = item;
    }

    pub fn current(&self) -> &T {
        &self.entries[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: a buffer keeps at least one entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_at_tail(&self) -> bool {
        self.cursor + 1 == self.entries.len()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }
}

impl<T: Default> Default for HistoryBuffer<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn buf(items: &[&str]) -> HistoryBuffer<String> {
        let mut h = HistoryBuffer::new(items[0].to_string());
        for s in &items[1..] {
            h.push(s.to_string());
        }
        h
    }

    #[test]
    fn starts_with_single_default_entry() {
        let h: HistoryBuffer<String> = HistoryBuffer::default();
        assert_eq!(h.as_slice(), &[String::new()]);
        assert_eq!(h.cursor(), 0);
        assert!(!h.is_empty());
        assert!(h.is_at_tail());
    }

    #[test]
    fn push_moves_cursor_to_new_tail() {
        let mut h = buf(&[""]);
        h.push("a".into());
        assert_eq!(h.cursor(), 1);
        assert_eq!(h.current(), "a");
        h.back();
        h.push("b".into());
        assert_eq!(h.as_slice(), &["", "a", "b"]);
        assert_eq!(h.cursor(), 2);
    }

    #[test]
    fn pop_keeps_last_entry() {
        let mut h = buf(&["seed"]);
        h.pop();
        assert_eq!(h.as_slice(), &["seed"]);
        assert_eq!(h.cursor(), 0);
    }

    #[test]
    fn pop_clamps_cursor_only_when_past_end() {
        let mut h = buf(&["", "a", "b"]);
        h.pop();
        assert_eq!(h.as_slice(), &["", "a"]);
        assert_eq!(h.cursor(), 1);

        let mut h = buf(&["", "a", "b"]);
        h.back();
        h.back();
        h.pop();
        assert_eq!(h.cursor(), 0);
    }

    #[test]
    fn restore_moves_cursor_without_touching_entries() {
        let mut h = buf(&["", "a", "b"]);
        h.back();
        h.back();
        h.restore();
        assert_eq!(h.cursor(), 2);
        assert_eq!(h.as_slice(), &["", "a", "b"]);
    }

    #[test]
    fn navigation_stops_at_both_ends() {
        let mut h = buf(&["", "a"]);
        assert_eq!(h.forward(), "a");
        assert_eq!(h.cursor(), 1);
        assert_eq!(h.back(), "");
        assert_eq!(h.back(), "");
        assert_eq!(h.cursor(), 0);
    }

    #[test]
    fn browse_and_edit_scenario() {
        let mut h = buf(&[""]);
        h.push("a".into());
        assert_eq!((h.as_slice().len(), h.cursor()), (2, 1));
        h.push("b".into());
        assert_eq!(h.cursor(), 2);
        assert_eq!(h.back(), "a");
        assert_eq!(h.cursor(), 1);
        h.set_current_state("a-edited".into());
        assert_eq!(h.as_slice(), &["", "a-edited", "b"]);
        assert_eq!(h.cursor(), 1);
        assert_eq!(h.forward(), "b");
        assert_eq!(h.cursor(), 2);
    }

    #[test]
    fn editing_a_past_entry_rewrites_it() {
        let mut h = buf(&["", "ls", ""]);
        h.back();
        h.set_current_state("ls -la".into());
        assert_eq!(h.as_slice(), &["", "ls -la", ""]);
        assert_eq!(h.len(), 3);
    }

    #[test]
    fn submit_protocol_on_seed_buffer() {
        let mut h = buf(&[""]);
        h.pop();
        assert_eq!(h.as_slice(), &[""]);
        h.restore();
        assert_eq!(h.cursor(), 0);
        h.push("world".into());
        assert_eq!(h.as_slice(), &["", "world"]);
        assert_eq!(h.cursor(), 1);
        h.push(String::new());
        assert_eq!(h.as_slice(), &["", "world", ""]);
        assert_eq!(h.cursor(), 2);
    }

    #[test]
    fn submit_protocol_drops_draft_slot() {
        let mut h = buf(&["", "hello", ""]);
        h.set_current_state("world".into());
        h.pop();
        h.restore();
        h.push("world".into());
        h.push(String::new());
        assert_eq!(h.as_slice(), &["", "hello", "world", ""]);
        assert_eq!(h.cursor(), 3);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Push(u8),
        Pop,
        Restore,
        Back,
        Forward,
        Set(u8),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<u8>().prop_map(Op::Push),
            Just(Op::Pop),
            Just(Op::Restore),
            Just(Op::Back),
            Just(Op::Forward),
            any::<u8>().prop_map(Op::Set),
        ]
    }

    proptest! {
        #[test]
        fn cursor_stays_in_bounds(ops in prop::collection::vec(op(), 0..64)) {
            let mut h = HistoryBuffer::new(0u8);
            for op in ops {
                let len = h.len();
                let cursor = h.cursor();
                match op {
                    Op::Push(v) => {
                        h.push(v);
                        prop_assert_eq!(*h.current(), v);
                        prop_assert_eq!(h.cursor(), h.len() - 1);
                    }
                    Op::Pop => {
                        h.pop();
                        prop_assert_eq!(h.len(), if len > 1 { len - 1 } else { 1 });
                    }
                    Op::Restore => {
                        let before = h.as_slice().to_vec();
                        h.restore();
                        prop_assert_eq!(h.cursor(), h.len() - 1);
                        prop_assert_eq!(h.as_slice(), &before[..]);
                    }
                    Op::Back => {
                        h.back();
                        prop_assert_eq!(h.cursor(), cursor.saturating_sub(1));
                    }
                    Op::Forward => {
                        h.forward();
                        prop_assert_eq!(h.cursor(), (cursor + 1).min(len - 1));
                    }
                    Op::Set(v) => {
                        h.set_current_state(v);
                        prop_assert_eq!(*h.current(), v);
                        prop_assert_eq!(h.len(), len);
                        prop_assert_eq!(h.cursor(), cursor);
                    }
                }
                prop_assert!(h.len() >= 1);
                prop_assert!(h.cursor() < h.len());
            }
        }

        #[test]
        fn repeated_steps_saturate(extra in 0usize..8, n in 0usize..16, m in 0usize..16) {
            let mut h = HistoryBuffer::new(0usize);
            for i in 1..=extra {
                h.push(i);
            }
            let c = h.cursor();
            for _ in 0..n {
                h.back();
            }
            prop_assert_eq!(h.cursor(), c.saturating_sub(n));
            let c = h.cursor();
            for _ in 0..m {
                h.forward();
            }
            prop_assert_eq!(h.cursor(), (c + m).min(h.len() - 1));
        }
    }
}
