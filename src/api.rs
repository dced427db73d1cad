use wasm_bindgen::prelude::*;
use web_time::{Duration, Instant};

use crate::board::{NUM_POINTS, POINT_COORDS, Side};
use crate::game::GameEngine;
use crate::types::Position;

/// How long a rejection notice stays in the snapshot before it expires.
const NOTICE_TTL: Duration = Duration::from_secs(4);

/// One game session, constructed and owned by the hosting view.
#[wasm_bindgen]
pub struct MorrisGame {
    engine: GameEngine,
    notice: Option<(String, Instant)>,
}

#[wasm_bindgen]
impl MorrisGame {
    /// Creates a fresh game: empty board, white places first.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            engine: GameEngine::new(),
            notice: None,
        }
    }

    /// Handles a click on point `index` and returns the updated state.
    /// Rule rejections are reported through the state's `message` field,
    /// not as errors.
    #[wasm_bindgen(js_name = "selectPosition")]
    pub fn select_position(&mut self, index: u8) -> Result<JsValue, JsError> {
        if usize::from(index) >= NUM_POINTS {
            return Err(JsError::new("invalid index: expected 0-23"));
        }

        match self.engine.select_position(usize::from(index)) {
            Ok(()) => self.notice = None,
            Err(rejection) => self.notice = Some((rejection.to_string(), Instant::now())),
        }
        self.state()
    }

    /// Resigns for the given side (1=white, 2=black); the other side wins.
    pub fn resign(&mut self, side: u8) -> Result<JsValue, JsError> {
        let side =
            Side::from_code(side).ok_or_else(|| JsError::new("invalid side: expected 1 or 2"))?;
        self.engine.resign(side);
        self.notice = None;
        self.state()
    }

    /// Current game state snapshot.
    pub fn state(&self) -> Result<JsValue, JsError> {
        let mut state = self.engine.to_game_state();
        state.message = self.current_notice();
        serde_wasm_bindgen::to_value(&state).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Final result: winner code and remaining piece counts.
    pub fn result(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.engine.to_game_result())
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Grid coordinates of the 24 points, for rendering the board.
    pub fn layout() -> Result<JsValue, JsError> {
        let points: Vec<Position> = POINT_COORDS
            .iter()
            .map(|&(row, col)| Position { row, col })
            .collect();
        serde_wasm_bindgen::to_value(&points).map_err(|e| JsError::new(&e.to_string()))
    }

    /// True while navigating away would abandon a game in progress.
    #[wasm_bindgen(js_name = "shouldConfirmLeave")]
    pub fn should_confirm_leave(&self) -> bool {
        self.engine.should_confirm_leave()
    }

    fn current_notice(&self) -> Option<String> {
        self.notice
            .as_ref()
            .filter(|(_, raised)| raised.elapsed() < NOTICE_TTL)
            .map(|(text, _)| text.clone())
    }
}

impl Default for MorrisGame {
    fn default() -> Self {
        Self::new()
    }
}
