//! Fade region and its periodic decay task.

use std::time::Duration;

use log::{debug, info};

use super::core::{EngineError, Overlay};
use super::regions::FadeState;
use crate::backend::Shell;

/// Fixed virtual time step of one decay tick.
pub const FADE_STEP: Duration = Duration::from_millis(16);

/// The cancellable periodic decay task.
///
/// Created on entering `HasMarks` and dropped on leaving it; dropping it is
/// the cancellation.
#[derive(Debug, Clone)]
pub struct FadeTask {
    /// Strength removed per tick
    amount: f64,
    /// Host time not yet consumed by whole ticks
    pending: Duration,
}

impl FadeTask {
    pub fn new(duration: Duration) -> Self {
        let duration = duration.max(FADE_STEP).as_secs_f64();
        Self {
            amount: FADE_STEP.as_secs_f64() / duration,
            pending: Duration::ZERO,
        }
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Accumulates elapsed host time and returns how many whole ticks are due.
    ///
    /// A backlog beyond `u32::MAX` ticks is dropped; only the sub-step
    /// remainder carries over.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.pending = self.pending.saturating_add(elapsed);
        let step = FADE_STEP.as_nanos();
        let due = self.pending.as_nanos() / step;
        self.pending = Duration::from_nanos((self.pending.as_nanos() % step) as u64);
        u32::try_from(due).unwrap_or(u32::MAX)
    }
}

impl<S: Shell> Overlay<S> {
    /// Feeds elapsed host time to the decay task and runs every tick that is
    /// due. Returns the number of ticks run.
    pub fn advance(&mut self, elapsed: Duration) -> Result<u32, EngineError> {
        let Some(task) = self.fade_task.as_mut() else {
            return Ok(0);
        };
        let due = task.advance(elapsed);

        let mut ran = 0;
        for _ in 0..due {
            if !self.tick()? {
                break;
            }
            ran += 1;
        }
        Ok(ran)
    }

    /// Runs one decay tick. Returns `false` when no decay task is alive.
    ///
    /// Ticks are silent: they neither log nor enter the event trace.
    pub fn tick(&mut self) -> Result<bool, EngineError> {
        let Some(amount) = self.fade_task.as_ref().map(FadeTask::amount) else {
            return Ok(false);
        };

        let session = self.session_mut()?;
        let outcome = session.history.decay(amount, FADE_STEP);
        if outcome.visible_change() {
            session.redraw_committed()?;
        }
        if session.history.is_empty() {
            self.set_fade_state(FadeState::NoMarks)?;
        }
        Ok(true)
    }

    /// Entry point of `HasMarks`, which immediately falls back to `NoMarks`
    /// when history is empty or to `NotFading` when fading is switched off.
    pub(super) fn enter_has_marks(&mut self) -> Result<(), EngineError> {
        let empty = self.history().is_none_or(|h| h.is_empty());
        let target = if empty {
            FadeState::NoMarks
        } else if !self.fading_enabled {
            FadeState::NotFading
        } else {
            FadeState::HasMarks
        };
        self.set_fade_state(target)
    }

    /// After undo or redo: leave for `NoMarks` when history emptied, or pick
    /// decaying back up when marks returned.
    pub(super) fn refresh_fade_region(&mut self) -> Result<(), EngineError> {
        let empty = self.history().is_none_or(|h| h.is_empty());
        if empty {
            self.set_fade_state(FadeState::NoMarks)
        } else if self.fade == FadeState::NoMarks {
            self.enter_has_marks()
        } else {
            Ok(())
        }
    }

    pub(super) fn set_fade_state(&mut self, to: FadeState) -> Result<(), EngineError> {
        if self.fade == to {
            return Ok(());
        }
        debug!("Fade {} -> {}", self.fade.name(), to.name());
        self.fade = to;

        match to {
            FadeState::HasMarks => {
                self.fade_task = Some(FadeTask::new(self.options.fade_duration));
            }
            FadeState::NotFading => self.fade_task = None,
            FadeState::NoMarks => {
                self.fade_task = None;
                if let Some(session) = self.session.as_ref() {
                    session.redraw_committed()?;
                }
            }
        }
        Ok(())
    }

    /// Switches fading on or off. Switching off returns every mark to full
    /// strength at once.
    pub(super) fn toggle_fading(&mut self) -> Result<(), EngineError> {
        self.fading_enabled = !self.fading_enabled;
        info!(
            "Fading {}",
            if self.fading_enabled { "enabled" } else { "disabled" }
        );

        if self.fading_enabled {
            return self.enter_has_marks();
        }

        let hold = self.options.fade_delay;
        if let Some(session) = self.session.as_mut() {
            session.history.restore_all(hold);
            session.redraw_committed()?;
        }
        self.set_fade_state(FadeState::NotFading)
    }
}
