use serde::Serialize;

/// Drawing coordinate of a board point on the 7x7 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// 24 cells: 0=empty, 1=white, 2=black.
    pub board: Vec<u8>,
    pub current_player: u8,
    /// 0=placing, 1=moving, 2=over.
    pub phase: u8,
    /// True while the active side owes a capture for a completed mill.
    pub capture_pending: bool,
    pub white_placed: u8,
    pub black_placed: u8,
    /// Pieces white has lost to captures.
    pub white_captured: u8,
    /// Pieces black has lost to captures.
    pub black_captured: u8,
    /// Point index of the piece picked up for moving, if any.
    pub selected: Option<u8>,
    /// Contract:
    /// - While a piece is selected: the empty points it may slide to.
    /// - Otherwise: an empty list.
    pub movable: Vec<u8>,
    /// Contract:
    /// - While a capture is owed: the opponent pieces that may be removed.
    /// - Otherwise: an empty list.
    pub removable: Vec<u8>,
    /// Winner once `phase` is 2: 1=white, 2=black. 0 while the game runs.
    pub winner: u8,
    /// Short-lived advisory raised by a rejected click. Cleared by the
    /// next accepted transition, or expires on its own.
    pub message: Option<String>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub winner: u8,
    pub white_remaining: u8,
    pub black_remaining: u8,
}
