//! 局面状態（StateInfo）

use crate::types::{Move, Piece};

/// do_move 時に積み、undo_move 時に取り出して局面を復元するための情報
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateInfo {
    /// 捕獲した駒（成駒は成ったまま保持する）
    pub captured_piece: Piece,
    /// この状態を作った指し手
    pub last_move: Move,
}

impl StateInfo {
    pub const fn new(last_move: Move, captured_piece: Piece) -> Self {
        StateInfo { captured_piece, last_move }
    }
}
