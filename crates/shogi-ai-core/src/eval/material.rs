//! 駒割評価

use crate::position::Position;
use crate::types::{Color, PieceType, Value};

use super::Evaluator;

/// 生駒の価値（玉は0）
///
/// 成駒は元の駒の価値で数える（成りによる加点はしない）。
pub const fn base_piece_value(pt: PieceType) -> i32 {
    match pt.unpromote() {
        PieceType::Pawn => 1,
        PieceType::Lance | PieceType::Knight => 3,
        PieceType::Silver | PieceType::Gold => 5,
        PieceType::Bishop => 8,
        PieceType::Rook => 10,
        _ => 0,
    }
}

/// 盤上の駒だけを数える駒割評価（手駒は数えない）
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialEvaluator;

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, pos: &Position) -> Value {
        pos.pieces().fold(Value::ZERO, |acc, (_, pc)| {
            let v = base_piece_value(pc.piece_type());
            match pc.color() {
                Color::Black => acc + Value::new(v),
                Color::White => acc + Value::new(-v),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::SFEN_HIRATE;

    #[test]
    fn test_base_piece_value() {
        assert_eq!(base_piece_value(PieceType::Pawn), 1);
        assert_eq!(base_piece_value(PieceType::Lance), 3);
        assert_eq!(base_piece_value(PieceType::Knight), 3);
        assert_eq!(base_piece_value(PieceType::Silver), 5);
        assert_eq!(base_piece_value(PieceType::Gold), 5);
        assert_eq!(base_piece_value(PieceType::Bishop), 8);
        assert_eq!(base_piece_value(PieceType::Rook), 10);
        assert_eq!(base_piece_value(PieceType::King), 0);
        assert_eq!(base_piece_value(PieceType::Dragon), 10);
        assert_eq!(base_piece_value(PieceType::ProPawn), 1);
    }

    #[test]
    fn test_hirate_is_balanced() {
        let pos = Position::from_sfen(SFEN_HIRATE).unwrap();
        assert_eq!(MaterialEvaluator.evaluate(&pos), Value::ZERO);
    }

    #[test]
    fn test_hand_is_ignored() {
        let pos = Position::from_sfen("4k4/9/9/9/9/9/9/9/4K4 b 2R 1").unwrap();
        assert_eq!(MaterialEvaluator.evaluate(&pos), Value::ZERO);
    }

    #[test]
    fn test_sign_follows_owner_not_side_to_move() {
        let black = Position::from_sfen("4k4/9/9/9/4+R4/9/9/9/4K4 w - 1").unwrap();
        assert_eq!(MaterialEvaluator.evaluate(&black), Value::new(10));

        let white = Position::from_sfen("4k4/9/9/9/4s4/9/9/9/4K4 b - 1").unwrap();
        assert_eq!(MaterialEvaluator.evaluate(&white), Value::new(-5));
    }
}
