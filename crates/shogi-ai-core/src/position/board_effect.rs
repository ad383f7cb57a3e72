//! 駒の利き
//!
//! 方向は先手から見た (筋の増分, 段の増分)。段の増分が負なら先手の前方。
//! 後手の駒は符号を反転して用いる。テーブルの並びがそのまま指し手の生成順になる。

use crate::types::{Color, Piece, PieceType, Square};

use super::Position;

type Delta = (i8, i8);

const NONE: &[Delta] = &[];
const PAWN_STEPS: &[Delta] = &[(0, -1)];
const KNIGHT_STEPS: &[Delta] = &[(-1, -2), (1, -2)];
const SILVER_STEPS: &[Delta] = &[(-1, -1), (0, -1), (1, -1), (-1, 1), (1, 1)];
const GOLD_STEPS: &[Delta] = &[(-1, -1), (0, -1), (1, -1), (-1, 0), (1, 0), (0, 1)];
const KING_STEPS: &[Delta] =
    &[(-1, -1), (0, -1), (1, -1), (-1, 0), (1, 0), (-1, 1), (0, 1), (1, 1)];
const DIAGONALS: &[Delta] = &[(-1, -1), (1, -1), (-1, 1), (1, 1)];
const ORTHOGONALS: &[Delta] = &[(0, -1), (-1, 0), (1, 0), (0, 1)];

/// 駒種ごとの (1マスだけ動く方向, 走る方向)
const fn directions(pt: PieceType) -> (&'static [Delta], &'static [Delta]) {
    match pt {
        PieceType::Pawn => (PAWN_STEPS, NONE),
        PieceType::Lance => (NONE, PAWN_STEPS),
        PieceType::Knight => (KNIGHT_STEPS, NONE),
        PieceType::Silver => (SILVER_STEPS, NONE),
        PieceType::Gold
        | PieceType::ProPawn
        | PieceType::ProLance
        | PieceType::ProKnight
        | PieceType::ProSilver => (GOLD_STEPS, NONE),
        PieceType::King => (KING_STEPS, NONE),
        PieceType::Bishop => (NONE, DIAGONALS),
        PieceType::Rook => (NONE, ORTHOGONALS),
        PieceType::Horse => (ORTHOGONALS, DIAGONALS),
        PieceType::Dragon => (DIAGONALS, ORTHOGONALS),
    }
}

/// 手番に合わせて向きを反転
#[inline]
const fn oriented((df, dr): Delta, color: Color) -> Delta {
    match color {
        Color::Black => (df, dr),
        Color::White => (-df, -dr),
    }
}

impl Position {
    /// `from` にいる駒 `pc` の移動先を生成順に列挙する（自駒のマスは除く）
    pub(crate) fn for_each_destination(&self, pc: Piece, from: Square, mut f: impl FnMut(Square)) {
        let color = pc.color();
        let (steps, slides) = directions(pc.piece_type());

        for &d in steps {
            let (df, dr) = oriented(d, color);
            if let Some(to) = from.offset(df, dr) {
                let target = self.piece_on(to);
                if target.is_none() || target.color() != color {
                    f(to);
                }
            }
        }

        for &d in slides {
            let (df, dr) = oriented(d, color);
            let mut cur = from;
            while let Some(to) = cur.offset(df, dr) {
                let target = self.piece_on(to);
                if target.is_some() && target.color() == color {
                    break;
                }
                f(to);
                if target.is_some() {
                    break;
                }
                cur = to;
            }
        }
    }

    /// `by` 側の駒が `sq` に利いているか
    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        Square::all().any(|from| {
            let pc = self.piece_on(from);
            pc.is_some() && pc.color() == by && self.piece_attacks(pc, from, sq)
        })
    }

    /// 駒 `pc`（`from` に存在）が `target` に利いているか
    fn piece_attacks(&self, pc: Piece, from: Square, target: Square) -> bool {
        let color = pc.color();
        let (steps, slides) = directions(pc.piece_type());

        if steps.iter().any(|&d| {
            let (df, dr) = oriented(d, color);
            from.offset(df, dr) == Some(target)
        }) {
            return true;
        }

        slides.iter().any(|&d| {
            let (df, dr) = oriented(d, color);
            let mut cur = from;
            while let Some(to) = cur.offset(df, dr) {
                if to == target {
                    return true;
                }
                if self.piece_on(to).is_some() {
                    return false;
                }
                cur = to;
            }
            false
        })
    }

    /// `color` 側の玉が相手の駒に利かされているか（玉がなければ false）
    pub fn is_king_attacked(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(ksq) => self.is_attacked(ksq, color.opponent()),
            None => false,
        }
    }
}
