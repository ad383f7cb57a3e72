//! 指し手（Move）

use super::{PieceType, Square};

/// 指し手（16bit）
///
/// - bit 0-6:  移動先 (to)
/// - bit 7-13: 移動元 (from) / 駒打ちの場合はPieceType
/// - bit 14:   駒打ちフラグ
/// - bit 15:   成りフラグ
///
/// 生成は `new_move` / `new_drop` のみで行い、各フィールドは常に有効な値を持つ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Move(u16);

impl Move {
    /// 無効な指し手
    pub const NONE: Move = Move(0);

    const TO_MASK: u16 = 0x007F;
    const FROM_MASK: u16 = 0x3F80;
    const FROM_SHIFT: u16 = 7;
    const DROP_FLAG: u16 = 0x4000;
    const PROMOTE_FLAG: u16 = 0x8000;

    /// 盤上の駒を動かす指し手を生成
    #[inline]
    pub const fn new_move(from: Square, to: Square, promote: bool) -> Move {
        let mut m = (to.raw() as u16) | ((from.raw() as u16) << Self::FROM_SHIFT);
        if promote {
            m |= Self::PROMOTE_FLAG;
        }
        Move(m)
    }

    /// 駒打ちの指し手を生成
    #[inline]
    pub const fn new_drop(piece_type: PieceType, to: Square) -> Move {
        Move((to.raw() as u16) | ((piece_type as u16) << Self::FROM_SHIFT) | Self::DROP_FLAG)
    }

    /// 移動先を取得
    #[inline]
    pub const fn to(self) -> Square {
        // SAFETY: to は new_move / new_drop で有効な Square から設定される
        unsafe { Square::from_u8_unchecked((self.0 & Self::TO_MASK) as u8) }
    }

    /// 移動元を取得（駒打ちの場合は無効）
    #[inline]
    pub const fn from(self) -> Square {
        debug_assert!(!self.is_drop(), "from() called on drop move");
        // SAFETY: 駒打ちでなければ from は new_move で有効な Square から設定される
        unsafe { Square::from_u8_unchecked(((self.0 & Self::FROM_MASK) >> Self::FROM_SHIFT) as u8) }
    }

    /// 打つ駒種を取得（駒打ちでない場合は無効）
    #[inline]
    pub const fn drop_piece_type(self) -> PieceType {
        debug_assert!(self.is_drop());
        match PieceType::from_u8(((self.0 & Self::FROM_MASK) >> Self::FROM_SHIFT) as u8) {
            Some(pt) => pt,
            None => PieceType::Pawn,
        }
    }

    /// 駒打ちかどうか
    #[inline]
    pub const fn is_drop(self) -> bool {
        (self.0 & Self::DROP_FLAG) != 0
    }

    /// 成りかどうか
    #[inline]
    pub const fn is_promote(self) -> bool {
        (self.0 & Self::PROMOTE_FLAG) != 0
    }

    /// 無効な指し手かどうか
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// USI形式の文字列に変換
    pub fn to_usi(self) -> String {
        if self.is_none() {
            return "none".to_string();
        }
        if self.is_drop() {
            let pt_char = match self.drop_piece_type() {
                PieceType::Lance => 'L',
                PieceType::Knight => 'N',
                PieceType::Silver => 'S',
                PieceType::Gold => 'G',
                PieceType::Bishop => 'B',
                PieceType::Rook => 'R',
                _ => 'P',
            };
            format!("{pt_char}*{}", self.to().to_usi())
        } else {
            let promote = if self.is_promote() { "+" } else { "" };
            format!("{}{}{promote}", self.from().to_usi(), self.to().to_usi())
        }
    }

    /// USI形式の文字列からMoveに変換
    pub fn from_usi(s: &str) -> Option<Move> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() < 4 {
            return None;
        }

        // 駒打ち（"P*7f" 形式）
        if chars[1] == '*' {
            let pt = match chars[0] {
                'P' => PieceType::Pawn,
                'L' => PieceType::Lance,
                'N' => PieceType::Knight,
                'S' => PieceType::Silver,
                'G' => PieceType::Gold,
                'B' => PieceType::Bishop,
                'R' => PieceType::Rook,
                _ => return None,
            };
            let to_str: String = chars[2..4].iter().collect();
            let to = Square::from_usi(&to_str)?;
            return Some(Move::new_drop(pt, to));
        }

        // 通常の移動（"7g7f" または "7g7f+" 形式）
        let from_str: String = chars[0..2].iter().collect();
        let to_str: String = chars[2..4].iter().collect();
        let from = Square::from_usi(&from_str)?;
        let to = Square::from_usi(&to_str)?;
        let promote = chars.len() >= 5 && chars[4] == '+';
        Some(Move::new_move(from, to, promote))
    }
}

impl Default for Move {
    fn default() -> Self {
        Move::NONE
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_usi())
    }
}
