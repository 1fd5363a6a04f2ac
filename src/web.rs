//! Browser bindings
//!
//! The page owns the canvas, audio and input polling. It hands over an input
//! bitmask and the frame time each animation frame, then draws from the JSON
//! snapshot.

use wasm_bindgen::prelude::*;

use crate::driver::FixedStepper;
use crate::sim::{GameState, TickInput};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by the page
        return;
    }
    log::info!("Mini Kong starting...");
}

/// One running game, driven from `requestAnimationFrame`
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    stepper: FixedStepper,
    input: TickInput,
}

impl WebGame {
    fn from_state(state: GameState) -> WebGame {
        WebGame {
            state,
            stepper: FixedStepper::new(),
            input: TickInput::default(),
        }
    }
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: f64) -> WebGame {
        Self::from_state(GameState::new(seed as u64))
    }

    /// Start with a tuning table given as JSON
    pub fn with_tuning(seed: f64, json: &str) -> Result<WebGame, JsValue> {
        let tuning = Tuning::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::from_state(GameState::with_tuning(seed as u64, tuning)))
    }

    /// Latest input sample. Presses are kept until a step consumes them, so
    /// a tap between two frames is not lost.
    pub fn set_input(&mut self, bits: u32) {
        self.input.latch(&TickInput::from_bits(bits));
    }

    /// Advance by the frame time in seconds; returns the steps run
    pub fn frame(&mut self, dt: f32) -> u32 {
        self.stepper.advance(&mut self.state, &mut self.input, dt)
    }

    /// Interpolation factor between the last two steps
    pub fn alpha(&self) -> f32 {
        self.stepper.alpha()
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state.snapshot())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Events from every step of the last `frame` call, for sound effects
    pub fn events_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state.events)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn score(&self) -> f64 {
        self.state.score as f64
    }

    pub fn lives(&self) -> u32 {
        self.state.lives
    }

    pub fn level(&self) -> u32 {
        self.state.level
    }
}
