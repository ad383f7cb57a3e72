//! 基本型モジュール
//!
//! # 型の依存関係
//!
//! ```text
//! Color
//!   ↓
//! File, Rank
//!   ↓
//! Square
//!   ↓
//! PieceType
//!   ↓
//! Piece ← Move
//!   ↓
//! Hand
//!
//! Value と JSON 表現は独立
//! ```

mod color;
mod file;
mod hand;
pub mod json;
mod moves;
mod piece;
mod piece_type;
mod rank;
mod square;
mod value;

pub use color::Color;
pub use file::File;
pub use hand::Hand;
pub use json::{AiResponse, BoardStateJson, CellJson, HandJson, MoveJson, PieceJson, RankJson};
pub use moves::Move;
pub use piece::Piece;
pub use piece_type::PieceType;
pub use rank::Rank;
pub use square::Square;
pub use value::Value;
