//! 升目（Square）

use super::{Color, File, Rank};

/// 升目（0-80）
///
/// 配置: SQ_11(1一)=0, SQ_12(1二)=1, ..., SQ_19(1九)=8, SQ_21(2一)=9, ...
///
/// 外部の盤面表現（先手陣が1〜3段）とは180度回転の関係にあり、
/// 外部座標 (筋 f, 段 r) は内部の (10 - f 筋, 10 - r 段) に対応する。
/// すなわち内部インデックスは `(9 - f) * 9 + (9 - r)`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Square(u8);

impl Square {
    /// 升目の数
    pub const NUM: usize = 81;

    /// 1一
    pub const SQ_11: Square = Square(0);
    /// 5五（中央）
    pub const SQ_55: Square = Square(40);
    /// 9九
    pub const SQ_99: Square = Square(80);

    /// FileとRankからSquareを生成
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Square {
        Square(file as u8 * 9 + rank as u8)
    }

    /// 筋を取得
    #[inline]
    pub const fn file(self) -> File {
        File::ALL[(self.0 / 9) as usize]
    }

    /// 段を取得
    #[inline]
    pub const fn rank(self) -> Rank {
        Rank::ALL[(self.0 % 9) as usize]
    }

    /// インデックスとして使用
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// 内部値を取得
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// u8から生成（範囲チェックあり）
    #[inline]
    pub const fn from_u8(n: u8) -> Option<Square> {
        if n < 81 { Some(Square(n)) } else { None }
    }

    /// u8から生成（範囲チェックなし）
    ///
    /// # Safety
    /// n < 81 でなければならない
    #[inline]
    pub const unsafe fn from_u8_unchecked(n: u8) -> Square {
        debug_assert!(n < 81);
        Square(n)
    }

    /// 180度回転
    #[inline]
    pub const fn inverse(self) -> Square {
        Square(80 - self.0)
    }

    /// 筋・段方向に (df, dr) だけずらした升目（盤外ならNone）
    ///
    /// df は筋番号が増える向き、dr は段番号が増える向き（先手から見て後ろ）。
    #[inline]
    pub const fn offset(self, df: i8, dr: i8) -> Option<Square> {
        let file = (self.0 / 9) as i8 + df;
        let rank = (self.0 % 9) as i8 + dr;
        if file < 0 || file > 8 || rank < 0 || rank > 8 {
            None
        } else {
            Some(Square((file * 9 + rank) as u8))
        }
    }

    /// 敵陣（成れる升目）かどうか
    #[inline]
    pub const fn can_promote(self, color: Color) -> bool {
        self.rank().can_promote(color)
    }

    /// 外部表現の (筋, 段)（いずれも1-9）から生成
    #[inline]
    pub const fn from_external(file: u8, rank: u8) -> Option<Square> {
        match (File::from_external(file), Rank::from_external(rank)) {
            (Some(f), Some(r)) => Some(Square::new(f, r)),
            _ => None,
        }
    }

    /// 外部表現の (筋, 段) に変換
    #[inline]
    pub const fn to_external(self) -> (u8, u8) {
        (self.file().external(), self.rank().external())
    }

    /// USI形式の文字列（"7g"等）に変換
    pub fn to_usi(self) -> String {
        let file = self.file().to_usi_char();
        let rank = self.rank().to_usi_char();
        format!("{file}{rank}")
    }

    /// USI形式の文字列からSquareに変換
    pub fn from_usi(s: &str) -> Option<Square> {
        let mut chars = s.chars();
        let file = File::from_usi_char(chars.next()?)?;
        let rank = Rank::from_usi_char(chars.next()?)?;
        Some(Square::new(file, rank))
    }

    /// 全ての升を返すイテレータ
    pub fn all() -> impl Iterator<Item = Square> {
        (0..81).map(Square)
    }
}
