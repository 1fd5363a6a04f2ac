//! Fixed timestep driver
//!
//! Turns variable frame times into whole simulation steps. Render rate and
//! simulation rate stay independent, and a long hitch is clamped instead of
//! replayed as a burst of catch-up steps.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::sim::{GameState, TickInput, tick};

/// Frame time accumulator
#[derive(Debug, Clone, Default)]
pub struct FixedStepper {
    accumulator: f32,
}

impl FixedStepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time carried over to the next frame (always below one step after a
    /// full frame)
    pub fn pending(&self) -> f32 {
        self.accumulator
    }

    /// Fraction of a step carried over, for render interpolation
    pub fn alpha(&self) -> f32 {
        (self.accumulator / SIM_DT).clamp(0.0, 1.0)
    }

    /// Run as many fixed steps as `frame_dt` covers.
    ///
    /// `state.events` is cleared on entry and then holds every event from the
    /// steps of this frame. One-shot intents (jump, attack, pause, restart,
    /// advance) are cleared after the first step that sees them. Returns the
    /// number of steps run.
    pub fn advance(&mut self, state: &mut GameState, input: &mut TickInput, frame_dt: f32) -> u32 {
        let frame_dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += frame_dt;
        state.events.clear();

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(state, input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            input.clear_one_shots();
        }

        // Drop what the substep cap could not consume
        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::trace!("Dropping {:.3}s of backlog", self.accumulator);
            self.accumulator %= SIM_DT;
        }
        substeps
    }
}
