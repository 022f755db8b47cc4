//! Interactive playback of a precomputed state trace.
//!
//! The controller is a small state machine; the only recurring operation
//! in the whole library is its tick timer, which lives in [`ticker`] and
//! must be cancelled exactly once per session.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use crate::{automaton::trace::Trace, config::PlaybackConfig, playback::ticker::Ticker};

pub mod ticker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    /// No trace loaded.
    Idle,
    /// A trace is loaded and the cursor sits at the start.
    Armed,
    /// The ticker is advancing the cursor.
    Playing,
    /// Playback is halted mid-trace; stepping is allowed.
    Paused,
    /// The cursor reached the last entry while playing.
    Finished,
}

type StateListener = Box<dyn Fn(Option<&str>) + Send>;

pub(crate) struct PlaybackState {
    trace: Option<Trace>,
    cursor: usize,
    phase: PlaybackPhase,
    listener: Option<StateListener>,
}

impl PlaybackState {
    fn emit_current(&self) {
        if let (Some(listener), Some(trace)) = (&self.listener, &self.trace)
            && let Some(entry) = trace.get(self.cursor)
        {
            listener(Some(&entry.state));
        }
    }

    fn emit_none(&self) {
        if let Some(listener) = &self.listener {
            listener(None);
        }
    }

    /// One timer tick. Returns false when the ticker should stop.
    pub(crate) fn advance(&mut self) -> bool {
        if self.phase != PlaybackPhase::Playing {
            return false;
        }
        let Some(trace) = &self.trace else {
            return false;
        };

        if self.cursor + 1 >= trace.len() {
            self.phase = PlaybackPhase::Finished;
            return false;
        }

        self.cursor += 1;
        self.emit_current();

        if self.cursor == trace.len() - 1 {
            self.phase = PlaybackPhase::Finished;
            false
        } else {
            true
        }
    }
}

/// Steps a trace interactively: play/pause on a fixed tick interval, or
/// manual single-stepping while paused.
///
/// At most one trace is active per controller; starting a new simulation
/// fully stops the previous one first, so two timers can never emit
/// conflicting states.
pub struct PlaybackController {
    state: Arc<Mutex<PlaybackState>>,
    ticker: Option<Ticker>,
    tick_interval: Duration,
}

impl PlaybackController {
    pub fn new(config: &PlaybackConfig) -> Self {
        PlaybackController {
            state: Arc::new(Mutex::new(PlaybackState {
                trace: None,
                cursor: 0,
                phase: PlaybackPhase::Idle,
                listener: None,
            })),
            ticker: None,
            tick_interval: config.tick_interval,
        }
    }

    /// Registers the state-change callback. It receives the state name at
    /// every cursor move, or [None] when no simulation is active.
    pub fn on_state_change(&mut self, listener: impl Fn(Option<&str>) + Send + 'static) {
        self.state.lock().unwrap().listener = Some(Box::new(listener));
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.state.lock().unwrap().phase
    }

    pub fn cursor(&self) -> usize {
        self.state.lock().unwrap().cursor
    }

    pub fn current_state(&self) -> Option<String> {
        let state = self.state.lock().unwrap();
        state
            .trace
            .as_ref()
            .and_then(|trace| trace.get(state.cursor))
            .map(|entry| entry.state.clone())
    }

    /// Arms a new trace. Any active simulation is fully stopped first
    /// (which emits [None]), then the cursor resets and the first state
    /// is emitted.
    pub fn start(&mut self, trace: Trace) {
        self.stop();

        let mut state = self.state.lock().unwrap();
        state.trace = Some(trace);
        state.cursor = 0;
        state.phase = PlaybackPhase::Armed;
        state.emit_current();
    }

    /// Begins ticking. Only valid while armed or paused.
    pub fn play(&mut self) {
        {
            let mut state = self.state.lock().unwrap();
            if !matches!(state.phase, PlaybackPhase::Armed | PlaybackPhase::Paused) {
                return;
            }
            state.phase = PlaybackPhase::Playing;
        }

        self.cancel_ticker();
        self.ticker = Some(Ticker::spawn(self.tick_interval, Arc::clone(&self.state)));
    }

    /// Halts ticking, keeping the cursor in place.
    pub fn pause(&mut self) {
        {
            let mut state = self.state.lock().unwrap();
            if state.phase != PlaybackPhase::Playing {
                return;
            }
            state.phase = PlaybackPhase::Paused;
        }

        self.cancel_ticker();
    }

    /// Moves the cursor one entry forward, clamped to the end of the
    /// trace, and emits the state there. No-op unless armed or paused.
    pub fn step_forward(&mut self) {
        let mut state = self.state.lock().unwrap();
        if !matches!(state.phase, PlaybackPhase::Armed | PlaybackPhase::Paused) {
            return;
        }
        let Some(last) = state.trace.as_ref().map(|trace| trace.len() - 1) else {
            return;
        };

        state.cursor = (state.cursor + 1).min(last);
        state.emit_current();
    }

    /// Moves the cursor one entry back, clamped to the start of the
    /// trace, and emits the state there. No-op unless armed or paused.
    pub fn step_backward(&mut self) {
        let mut state = self.state.lock().unwrap();
        if !matches!(state.phase, PlaybackPhase::Armed | PlaybackPhase::Paused) {
            return;
        }
        if state.trace.is_none() {
            return;
        }

        state.cursor = state.cursor.saturating_sub(1);
        state.emit_current();
    }

    /// Cancels any pending tick, unloads the trace, and emits [None].
    /// Safe to call in any phase, repeatedly.
    pub fn stop(&mut self) {
        self.cancel_ticker();

        let mut state = self.state.lock().unwrap();
        let was_active = state.phase != PlaybackPhase::Idle;
        state.trace = None;
        state.cursor = 0;
        state.phase = PlaybackPhase::Idle;
        if was_active {
            state.emit_none();
        }
    }

    fn cancel_ticker(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}
