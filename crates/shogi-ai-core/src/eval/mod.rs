//! 評価関数モジュール

pub mod material;

pub use material::{MaterialEvaluator, base_piece_value};

use crate::position::Position;
use crate::types::Value;

/// 局面の静的評価
///
/// 戻り値は常に先手から見た値（正なら先手有利）。手番は考慮しない。
pub trait Evaluator<P = Position> {
    fn evaluate(&self, pos: &P) -> Value;
}

impl<P, E: Evaluator<P> + ?Sized> Evaluator<P> for &E {
    fn evaluate(&self, pos: &P) -> Value {
        (**self).evaluate(pos)
    }
}
