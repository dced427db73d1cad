#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use morris::api::MorrisGame;

fn field(value: &JsValue, key: &str) -> JsValue {
    js_sys::Reflect::get(value, &key.into()).unwrap()
}

#[wasm_bindgen_test]
fn module_is_ready() {
    assert!(morris::wasm_ready());
}

#[wasm_bindgen_test]
fn fresh_game_state() {
    let game = MorrisGame::new();
    let state = game.state().unwrap();

    assert_eq!(field(&state, "phase").as_f64(), Some(0.0));
    assert_eq!(field(&state, "current_player").as_f64(), Some(1.0));
    assert_eq!(field(&state, "capture_pending").as_bool(), Some(false));
    assert_eq!(field(&state, "winner").as_f64(), Some(0.0));
    assert!(field(&state, "message").is_null() || field(&state, "message").is_undefined());
}

#[wasm_bindgen_test]
fn placement_updates_board_and_turn() {
    let mut game = MorrisGame::new();
    let state = game.select_position(0).unwrap();

    let board = js_sys::Array::from(&field(&state, "board"));
    assert_eq!(board.length(), 24);
    assert_eq!(board.get(0).as_f64(), Some(1.0));
    assert_eq!(field(&state, "white_placed").as_f64(), Some(1.0));
    assert_eq!(field(&state, "current_player").as_f64(), Some(2.0));
}

#[wasm_bindgen_test]
fn rejected_click_raises_a_message() {
    let mut game = MorrisGame::new();
    game.select_position(0).unwrap();

    let state = game.select_position(0).unwrap();

    assert_eq!(
        field(&state, "message").as_string().as_deref(),
        Some("that spot is occupied")
    );
    assert_eq!(field(&state, "black_placed").as_f64(), Some(0.0));
}

#[wasm_bindgen_test]
fn out_of_range_index_errors() {
    let mut game = MorrisGame::new();
    assert!(game.select_position(24).is_err());
}

#[wasm_bindgen_test]
fn invalid_resign_code_errors() {
    let mut game = MorrisGame::new();
    assert!(game.resign(0).is_err());
    assert!(game.resign(3).is_err());
}

#[wasm_bindgen_test]
fn resignation_ends_the_game() {
    let mut game = MorrisGame::new();
    let state = game.resign(2).unwrap();

    assert_eq!(field(&state, "phase").as_f64(), Some(2.0));
    assert_eq!(field(&state, "winner").as_f64(), Some(1.0));

    let result = game.result().unwrap();
    assert_eq!(field(&result, "winner").as_f64(), Some(1.0));
    assert_eq!(field(&result, "white_remaining").as_f64(), Some(9.0));
}

#[wasm_bindgen_test]
fn layout_lists_all_points() {
    let layout = MorrisGame::layout().unwrap();
    let points = js_sys::Array::from(&layout);

    assert_eq!(points.length(), 24);
    let first = points.get(0);
    assert_eq!(field(&first, "row").as_f64(), Some(0.0));
    assert_eq!(field(&first, "col").as_f64(), Some(0.0));
}

#[wasm_bindgen_test]
fn leave_guard_follows_the_session() {
    let mut game = MorrisGame::new();
    assert!(!game.should_confirm_leave());

    game.select_position(4).unwrap();
    assert!(game.should_confirm_leave());

    game.resign(1).unwrap();
    assert!(!game.should_confirm_leave());
}
