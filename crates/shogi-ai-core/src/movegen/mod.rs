//! 指し手生成モジュール

mod generator;
mod movelist;

pub use generator::generate_legal;
pub use movelist::{MAX_MOVES, MoveList};
