//! Committed annotation history with fading and redo.

use super::mark::CompletedMark;
use std::time::Duration;

/// Strength at or below which a fading mark is removed. Repeated
/// subtraction leaves float residue just above zero.
const EXHAUSTED: f64 = 1e-9;

/// Result of one decay step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecayOutcome {
    /// Marks whose strength changed (including removed ones)
    pub decayed: usize,
    /// Marks removed because their strength reached zero
    pub removed: usize,
    /// Marks moved from pending into fading
    pub started: usize,
}

impl DecayOutcome {
    /// Whether anything visible changed on the committed surface.
    pub fn visible_change(&self) -> bool {
        self.decayed > 0
    }
}

/// All committed marks for the session.
///
/// Every mark in `fading` is older than every mark in `marks`, so `fading`
/// followed by `marks` is commit order.
#[derive(Debug, Clone, Default)]
pub struct History {
    /// Freshly committed, not yet decaying
    marks: Vec<CompletedMark>,
    /// Currently decaying
    fading: Vec<CompletedMark>,
    /// Undone marks, last undone on top
    redo: Vec<CompletedMark>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marks(&self) -> &[CompletedMark] {
        &self.marks
    }

    pub fn fading(&self) -> &[CompletedMark] {
        &self.fading
    }

    pub fn redo_stack(&self) -> &[CompletedMark] {
        &self.redo
    }

    /// Whether neither `marks` nor `fading` holds anything.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty() && self.fading.is_empty()
    }

    /// Number of visible committed marks.
    pub fn len(&self) -> usize {
        self.marks.len() + self.fading.len()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Committed marks in commit order.
    pub fn iter(&self) -> impl Iterator<Item = &CompletedMark> {
        self.fading.iter().chain(self.marks.iter())
    }

    /// Appends a freshly completed mark.
    pub fn commit(&mut self, mark: CompletedMark) {
        self.marks.push(mark);
    }

    /// Abandons the redo branch.
    pub fn clear_redo(&mut self) {
        self.redo.clear();
    }

    /// Moves the most recent mark onto the redo stack. Returns `false` when
    /// there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.marks.pop().or_else(|| self.fading.pop()) {
            Some(mark) => {
                self.redo.push(mark);
                true
            }
            None => false,
        }
    }

    /// Moves the last undone mark back into `marks`. Returns `false` when
    /// the redo stack is empty.
    pub fn redo(&mut self) -> bool {
        match self.redo.pop() {
            Some(mark) => {
                self.marks.push(mark);
                true
            }
            None => false,
        }
    }

    /// Drops every committed, fading and undone mark.
    pub fn clear(&mut self) {
        self.marks.clear();
        self.fading.clear();
        self.redo.clear();
    }

    /// Advances fading by one step.
    ///
    /// `amount` is subtracted from every fading mark and marks at or below
    /// zero are removed. Pending marks count down their hold by `step`; the
    /// ready prefix of `marks` then starts fading.
    pub fn decay(&mut self, amount: f64, step: Duration) -> DecayOutcome {
        let mut outcome = DecayOutcome::default();

        for mark in &mut self.fading {
            mark.strength -= amount;
            outcome.decayed += 1;
        }
        let before = self.fading.len();
        self.fading.retain(|mark| mark.strength > EXHAUSTED);
        outcome.removed = before - self.fading.len();

        for mark in &mut self.marks {
            mark.hold = mark.hold.saturating_sub(step);
        }
        let ready = self
            .marks
            .iter()
            .take_while(|mark| mark.hold.is_zero())
            .count();
        if ready > 0 {
            self.fading.extend(self.marks.drain(..ready));
            outcome.started = ready;
        }

        outcome
    }

    /// Returns every decaying mark to full strength in `marks` and re-arms
    /// its hold. Commit order is preserved.
    pub fn restore_all(&mut self, hold: Duration) {
        let mut restored = std::mem::take(&mut self.fading);
        restored.append(&mut self.marks);
        for mark in &mut restored {
            mark.strength = 1.0;
            mark.hold = hold;
        }
        self.marks = restored;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputSample, ToolKind, ToolSettings};
    use crate::draw::Mark;

    fn completed(id: u64, hold_ms: u64) -> CompletedMark {
        Mark::begin(
            ToolKind::Rect,
            InputSample::mouse(id as f64, 0.0),
            &ToolSettings::default(),
        )
        .complete(id, Duration::from_millis(hold_ms))
    }

    fn ids(history: &History) -> Vec<u64> {
        history.iter().map(|m| m.id).collect()
    }

    #[test]
    fn undo_twice_then_redo_once() {
        let mut history = History::new();
        history.commit(completed(1, 0));
        history.commit(completed(2, 0));

        assert!(history.undo());
        assert!(history.undo());
        assert!(history.is_empty());
        let redo: Vec<u64> = history.redo_stack().iter().map(|m| m.id).collect();
        assert_eq!(redo, vec![2, 1]);

        assert!(history.redo());
        assert_eq!(ids(&history), vec![1]);
        let redo: Vec<u64> = history.redo_stack().iter().map(|m| m.id).collect();
        assert_eq!(redo, vec![2]);
    }

    #[test]
    fn undo_and_redo_on_empty_are_noops() {
        let mut history = History::new();
        assert!(!history.undo());
        assert!(!history.redo());
        assert!(history.is_empty());
    }

    #[test]
    fn undo_falls_back_to_fading() {
        let mut history = History::new();
        history.commit(completed(1, 0));
        history.decay(0.0, Duration::from_millis(16));
        assert_eq!(history.fading().len(), 1);
        assert!(history.marks().is_empty());

        assert!(history.undo());
        assert!(history.is_empty());
        assert_eq!(history.redo_stack()[0].id, 1);
    }

    #[test]
    fn undo_redo_round_trip_preserves_order() {
        let mut history = History::new();
        for id in 1..=4 {
            history.commit(completed(id, if id <= 2 { 0 } else { 1000 }));
        }
        history.decay(0.1, Duration::from_millis(16));
        assert_eq!(history.fading().len(), 2);
        let before: Vec<(u64, f64)> = history.iter().map(|m| (m.id, m.strength)).collect();

        for _ in 0..4 {
            assert!(history.undo());
        }
        for _ in 0..4 {
            assert!(history.redo());
        }
        let after: Vec<(u64, f64)> = history.iter().map(|m| (m.id, m.strength)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn decay_removes_exhausted_marks() {
        let mut history = History::new();
        history.commit(completed(1, 0));
        history.decay(0.5, Duration::from_millis(16));
        assert_eq!(history.fading()[0].strength, 1.0);

        let outcome = history.decay(0.5, Duration::from_millis(16));
        assert_eq!(outcome.decayed, 1);
        assert_eq!(outcome.removed, 0);
        let outcome = history.decay(0.5, Duration::from_millis(16));
        assert_eq!(outcome.removed, 1);
        assert!(history.is_empty());
    }

    #[test]
    fn pending_marks_wait_for_their_hold() {
        let mut history = History::new();
        history.commit(completed(1, 40));
        let step = Duration::from_millis(16);
        assert_eq!(history.decay(0.1, step).started, 0);
        assert_eq!(history.decay(0.1, step).started, 0);
        assert_eq!(history.decay(0.1, step).started, 1);
        assert_eq!(history.fading().len(), 1);
    }

    #[test]
    fn restore_all_resets_strength_and_order() {
        let mut history = History::new();
        history.commit(completed(1, 0));
        history.commit(completed(2, 500));
        history.decay(0.0, Duration::from_millis(16));
        history.decay(0.3, Duration::from_millis(16));
        assert_eq!(history.fading().len(), 1);

        history.restore_all(Duration::from_millis(200));
        assert!(history.fading().is_empty());
        assert_eq!(ids(&history), vec![1, 2]);
        assert!(history.marks().iter().all(|m| m.strength == 1.0));
        assert!(history.marks().iter().all(|m| m.hold == Duration::from_millis(200)));
    }

    #[test]
    fn clear_wipes_everything() {
        let mut history = History::new();
        history.commit(completed(1, 0));
        history.commit(completed(2, 0));
        history.undo();
        history.clear();
        assert!(history.is_empty());
        assert!(!history.can_redo());
    }
}
