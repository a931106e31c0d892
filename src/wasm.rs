use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::RuleConfig;
use crate::game::GameState;
use crate::persist;
use crate::types::Square;

/// Error object thrown to JS: `{ kind, message }`.
#[derive(Debug, Serialize)]
struct ErrorView {
    kind: &'static str,
    message: String,
}

fn js_error(kind: &'static str, message: String) -> JsValue {
    let view = ErrorView { kind, message };
    serde_wasm_bindgen::to_value(&view).unwrap_or_else(|_| JsValue::from_str(&view.message))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

/// One game owned by the JS side. Dropping it frees the game.
#[wasm_bindgen]
pub struct HasamiGame {
    state: GameState,
    last_captured: Vec<Square>,
}

#[wasm_bindgen]
impl HasamiGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            state: GameState::new(),
            last_captured: Vec::new(),
        }
    }

    /// `rules` is a plain object such as `{ capture_threshold: 8 }`;
    /// missing fields use the defaults.
    #[wasm_bindgen(js_name = withRules)]
    pub fn with_rules(rules: JsValue) -> Result<HasamiGame, JsValue> {
        let rules: RuleConfig = if rules.is_undefined() || rules.is_null() {
            RuleConfig::default()
        } else {
            serde_wasm_bindgen::from_value(rules)
                .map_err(|err| js_error("invalidConfig", err.to_string()))?
        };
        Ok(Self {
            state: GameState::with_rules(rules),
            last_captured: Vec::new(),
        })
    }

    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.state.to_view(&self.last_captured))
    }

    /// Destinations as `[{ row, col }, ...]`; empty for squares off the board.
    #[wasm_bindgen(js_name = getValidMoves)]
    pub fn get_valid_moves(&self, row: i32, col: i32) -> Result<JsValue, JsValue> {
        to_js(&self.state.legal_destinations_at(row, col))
    }

    #[wasm_bindgen(js_name = makeMove)]
    pub fn make_move(
        &mut self,
        from_row: i32,
        from_col: i32,
        to_row: i32,
        to_col: i32,
    ) -> Result<JsValue, JsValue> {
        let outcome = self
            .state
            .apply_move_at(from_row, from_col, to_row, to_col)
            .map_err(|err| js_error(err.kind(), err.to_string()))?;
        self.last_captured = outcome.captured;
        self.get_state()
    }

    #[wasm_bindgen(js_name = startNewGame)]
    pub fn start_new_game(&mut self) {
        self.state.start_new_game();
        self.last_captured.clear();
    }

    #[wasm_bindgen(js_name = getResult)]
    pub fn get_result(&self) -> Result<JsValue, JsValue> {
        to_js(&self.state.to_game_result())
    }

    #[wasm_bindgen(js_name = saveGame)]
    pub fn save_game(&self) -> Vec<u8> {
        persist::encode(&self.state)
    }

    /// Replaces the current game only if `bytes` decode completely.
    #[wasm_bindgen(js_name = loadGame)]
    pub fn load_game(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        let state = persist::decode(bytes).map_err(|err| js_error(err.kind(), err.to_string()))?;
        self.replace(state);
        Ok(())
    }

    #[wasm_bindgen(js_name = saveGameText)]
    pub fn save_game_text(&self) -> String {
        persist::encode_text(&self.state)
    }

    #[wasm_bindgen(js_name = loadGameText)]
    pub fn load_game_text(&mut self, text: &str) -> Result<(), JsValue> {
        let state =
            persist::decode_text(text).map_err(|err| js_error(err.kind(), err.to_string()))?;
        self.replace(state);
        Ok(())
    }
}

impl HasamiGame {
    fn replace(&mut self, state: GameState) {
        self.state = state;
        self.last_captured.clear();
    }
}

impl Default for HasamiGame {
    fn default() -> Self {
        Self::new()
    }
}
