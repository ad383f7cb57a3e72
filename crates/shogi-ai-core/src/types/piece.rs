//! 駒（Piece）
//!
//! 内部表現は 5bit ラッパー。
//! - bit 0-3: `PieceType`（1..=14）。0 は `Piece::NONE` のみで使用される。
//! - bit 4: `Color`（0 = Black, 1 = White）。
//!
//! `piece_type()` / `color()` は `Piece::NONE` に対して呼ばないのが契約。

use super::{Color, PieceType};

/// 駒（先後の区別あり）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Piece(u8);

impl Piece {
    /// 駒なし
    pub const NONE: Piece = Piece(0);

    // 先手の駒
    pub const B_PAWN: Piece = Piece(1);
    pub const B_LANCE: Piece = Piece(2);
    pub const B_BISHOP: Piece = Piece(5);
    pub const B_ROOK: Piece = Piece(6);
    pub const B_GOLD: Piece = Piece(7);
    pub const B_KING: Piece = Piece(8);
    pub const B_PRO_PAWN: Piece = Piece(9);

    // 後手の駒（+16）
    pub const W_PAWN: Piece = Piece(17);
    pub const W_GOLD: Piece = Piece(23);
    pub const W_KING: Piece = Piece(24);
    pub const W_HORSE: Piece = Piece(29);
    pub const W_DRAGON: Piece = Piece(30);

    /// ColorとPieceTypeから生成
    #[inline]
    pub const fn new(color: Color, piece_type: PieceType) -> Piece {
        Piece(piece_type as u8 | ((color as u8) << 4))
    }

    /// 駒種を取得
    #[inline]
    pub const fn piece_type(self) -> PieceType {
        debug_assert!(self.is_some(), "piece_type() called on Piece::NONE");
        match PieceType::from_u8(self.0 & 0x0F) {
            Some(pt) => pt,
            // NONE 以外は常に有効な駒種を持つ
            None => PieceType::Pawn,
        }
    }

    /// 手番を取得
    #[inline]
    pub const fn color(self) -> Color {
        if (self.0 >> 4) & 1 == 0 { Color::Black } else { Color::White }
    }

    /// 駒がないか
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// 駒があるか
    #[inline]
    pub const fn is_some(self) -> bool {
        self.0 != 0
    }

    /// 成り駒を返す
    #[inline]
    pub const fn promote(self) -> Option<Piece> {
        match self.piece_type().promote() {
            Some(pt) => Some(Piece::new(self.color(), pt)),
            None => None,
        }
    }

    /// 生駒を返す
    #[inline]
    pub const fn unpromote(self) -> Piece {
        Piece::new(self.color(), self.piece_type().unpromote())
    }

    /// 先後を入れ替えた駒
    #[inline]
    pub const fn flip(self) -> Piece {
        if self.is_none() { self } else { Piece(self.0 ^ 0x10) }
    }
}

impl Default for Piece {
    fn default() -> Self {
        Piece::NONE
    }
}
