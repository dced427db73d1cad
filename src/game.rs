use tracing::debug;

use crate::board::{Board, NUM_POINTS, Side};
use crate::types::{GameResult, GameState};

/// Pieces each side starts with.
pub const PIECES_PER_SIDE: u8 = 9;
/// Remaining-piece count at which a side has lost.
const LOSS_THRESHOLD: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Opening phase: sides alternate dropping pieces onto empty points.
    Placing,
    /// All pieces are down; pieces slide to adjacent empty points.
    Moving,
    /// A winner has been decided. Terminal.
    Over,
}

impl Phase {
    /// Phase code used across the WASM boundary.
    pub fn code(self) -> u8 {
        match self {
            Phase::Placing => 0,
            Phase::Moving => 1,
            Phase::Over => 2,
        }
    }
}

/// Why a click was turned away. Advisory only: the engine stays in its
/// previously committed state after any rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectError {
    /// Placement target already holds a piece.
    Occupied,
    /// The chosen piece has no empty adjacent point.
    PieceBlocked,
    /// The chosen piece belongs to the opponent.
    NotYourPiece,
    /// A piece is held (or a capture is owed) and the click landed
    /// somewhere other than a highlighted point.
    InvalidTarget,
    /// Movement-phase click on an empty point with no piece selected.
    NothingSelected,
    /// Point index outside the board.
    OutOfRange,
}

impl std::fmt::Display for SelectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            SelectError::Occupied => "that spot is occupied",
            SelectError::PieceBlocked => "that piece is blocked",
            SelectError::NotYourPiece => "not your piece",
            SelectError::InvalidTarget => "choose a highlighted spot",
            SelectError::NothingSelected => "select your piece first",
            SelectError::OutOfRange => "position out of range",
        };
        write!(f, "{message}")
    }
}

impl std::error::Error for SelectError {}

/// The single authority over game state. One instance per play session,
/// owned by the hosting view and discarded with it.
#[derive(Debug, Clone)]
pub struct GameEngine {
    board: Board,
    phase: Phase,
    current: Side,
    /// Pieces each side has put on the board, indexed by `Side::index`.
    placed: [u8; 2],
    /// Pieces each side has lost to captures.
    captured: [u8; 2],
    /// Set when the last placement or move completed a mill; the active
    /// side must remove an opponent piece before the turn passes.
    capture_pending: bool,
    /// Piece picked up for moving, if any. At most one at a time.
    selected: Option<usize>,
    winner: Option<Side>,
}

impl GameEngine {
    /// Creates a fresh game: empty board, white places first.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            phase: Phase::Placing,
            current: Side::White,
            placed: [0; 2],
            captured: [0; 2],
            capture_pending: false,
            selected: None,
            winner: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current(&self) -> Side {
        self.current
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn capture_pending(&self) -> bool {
        self.capture_pending
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Handles a click on point `pos`, the sole interaction entry point.
    /// Every accepted click commits exactly one transition; a rejected
    /// click changes nothing. Clicks after the game has ended are
    /// accepted no-ops.
    pub fn select_position(&mut self, pos: usize) -> Result<(), SelectError> {
        if pos >= NUM_POINTS {
            return Err(SelectError::OutOfRange);
        }
        if self.phase == Phase::Over {
            return Ok(());
        }
        if self.capture_pending {
            return self.resolve_capture(pos);
        }
        match self.phase {
            Phase::Placing => self.place_piece(pos),
            Phase::Moving => self.move_phase_click(pos),
            Phase::Over => unreachable!("handled above"),
        }
    }

    /// Ends the game in favor of the opponent of `side`, from any phase.
    /// Ignored once the game is over.
    pub fn resign(&mut self, side: Side) {
        if self.phase == Phase::Over {
            return;
        }
        debug!(?side, "resigned");
        self.finish(side.opponent());
    }

    /// True while navigating away would abandon a game in progress.
    pub fn should_confirm_leave(&self) -> bool {
        self.placed[0] + self.placed[1] > 0 && self.phase != Phase::Over
    }

    /// Snapshot for the UI layer. The highlight lists are derived fresh
    /// on every call rather than stored per point.
    pub fn to_game_state(&self) -> GameState {
        let movable = match self.selected {
            Some(origin) => mask_to_indices(self.board.legal_destinations(origin)),
            None => Vec::new(),
        };
        let removable = if self.capture_pending {
            mask_to_indices(self.board.capturable(self.current))
        } else {
            Vec::new()
        };

        GameState {
            board: self.board.to_array().to_vec(),
            current_player: self.current.code(),
            phase: self.phase.code(),
            capture_pending: self.capture_pending,
            white_placed: self.placed[Side::White.index()],
            black_placed: self.placed[Side::Black.index()],
            white_captured: self.captured[Side::White.index()],
            black_captured: self.captured[Side::Black.index()],
            selected: self.selected.map(|pos| pos as u8),
            movable,
            removable,
            winner: self.winner.map_or(0, Side::code),
            message: None,
        }
    }

    pub fn to_game_result(&self) -> GameResult {
        GameResult {
            winner: self.winner.map_or(0, Side::code),
            white_remaining: PIECES_PER_SIDE - self.captured[Side::White.index()],
            black_remaining: PIECES_PER_SIDE - self.captured[Side::Black.index()],
        }
    }

    fn place_piece(&mut self, pos: usize) -> Result<(), SelectError> {
        if !self.board.place(pos, self.current) {
            return Err(SelectError::Occupied);
        }
        self.placed[self.current.index()] += 1;
        debug!(pos, side = ?self.current, "placed");
        self.after_touch(pos);
        Ok(())
    }

    fn move_phase_click(&mut self, pos: usize) -> Result<(), SelectError> {
        if self.board.occupant(pos) == Some(self.current) {
            if self.selected == Some(pos) {
                // Re-clicking the held piece puts it back down.
                self.selected = None;
                return Ok(());
            }
            if self.board.legal_destinations(pos) == 0 {
                return Err(SelectError::PieceBlocked);
            }
            self.selected = Some(pos);
            return Ok(());
        }

        if let Some(origin) = self.selected {
            if (self.board.legal_destinations(origin) & (1u32 << pos)) == 0 {
                return Err(SelectError::InvalidTarget);
            }
            self.board.slide(origin, pos, self.current);
            self.selected = None;
            debug!(from = origin, to = pos, side = ?self.current, "moved");
            self.after_touch(pos);
            return Ok(());
        }

        if self.board.occupant(pos).is_some() {
            Err(SelectError::NotYourPiece)
        } else {
            Err(SelectError::NothingSelected)
        }
    }

    fn resolve_capture(&mut self, pos: usize) -> Result<(), SelectError> {
        if (self.board.capturable(self.current) & (1u32 << pos)) == 0 {
            return Err(SelectError::InvalidTarget);
        }

        let victim = self.current.opponent();
        self.board.remove(pos);
        self.captured[victim.index()] += 1;
        self.capture_pending = false;
        debug!(pos, ?victim, "captured");

        if PIECES_PER_SIDE - self.captured[victim.index()] <= LOSS_THRESHOLD {
            self.finish(self.current);
            return Ok(());
        }
        self.pass_turn();
        Ok(())
    }

    /// Common tail of a committed placement or move: either the touched
    /// piece completed a mill and a capture is now owed, or the turn
    /// passes. Only mills containing the touched piece grant a capture;
    /// a mill that was already standing never re-triggers.
    fn after_touch(&mut self, pos: usize) {
        if self.board.completes_mill(pos, self.current) {
            self.capture_pending = true;
        } else {
            self.pass_turn();
        }
    }

    fn pass_turn(&mut self) {
        if self.phase == Phase::Placing && self.placed[0] + self.placed[1] == 2 * PIECES_PER_SIDE {
            self.phase = Phase::Moving;
            debug!("all pieces placed, movement begins");
        }
        self.current = self.current.opponent();
        if self.phase == Phase::Moving && !self.board.has_any_move(self.current) {
            debug!(side = ?self.current, "no legal moves left");
            self.finish(self.current.opponent());
        }
    }

    fn finish(&mut self, winner: Side) {
        self.winner = Some(winner);
        self.phase = Phase::Over;
        self.capture_pending = false;
        self.selected = None;
        debug!(?winner, "game over");
    }

    #[cfg(test)]
    fn set_state_for_test(
        &mut self,
        board: Board,
        current: Side,
        phase: Phase,
        placed: [u8; 2],
        captured: [u8; 2],
    ) {
        self.board = board;
        self.current = current;
        self.phase = phase;
        self.placed = placed;
        self.captured = captured;
        self.capture_pending = false;
        self.selected = None;
        self.winner = None;
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn mask_to_indices(mask: u32) -> Vec<u8> {
    let mut bits = mask;
    let mut out = Vec::new();

    while bits != 0 {
        out.push(bits.trailing_zeros() as u8);
        bits &= bits - 1;
    }

    out
}
