//! 段（Rank）
//!
//! 内部の段は USI の段文字の順（一段 = 'a'）で、先手陣は七〜九段。
//! 外部盤面では先手陣が1〜3段なので、外部の r 段は内部の (10 - r) 段になる。

use super::Color;

/// 段（一段〜九段）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Rank {
    Rank1 = 0,
    Rank2 = 1,
    Rank3 = 2,
    Rank4 = 3,
    Rank5 = 4,
    Rank6 = 5,
    Rank7 = 6,
    Rank8 = 7,
    Rank9 = 8,
}

impl Rank {
    pub const NUM: usize = 9;

    /// 一段から九段の順（SFEN の行の順）
    pub const ALL: [Rank; 9] = [
        Rank::Rank1,
        Rank::Rank2,
        Rank::Rank3,
        Rank::Rank4,
        Rank::Rank5,
        Rank::Rank6,
        Rank::Rank7,
        Rank::Rank8,
        Rank::Rank9,
    ];

    #[inline]
    const fn nth(idx: u8) -> Option<Rank> {
        if (idx as usize) < Rank::NUM { Some(Rank::ALL[idx as usize]) } else { None }
    }

    /// `color` から見て相手陣の最奥を0とした段の距離
    ///
    /// 行き所のない升（歩・香は0、桂は0と1）と敵陣（0〜2）の判定に使う。
    #[inline]
    pub const fn depth_for(self, color: Color) -> u8 {
        match color {
            Color::Black => self as u8,
            Color::White => 8 - self as u8,
        }
    }

    /// 敵陣（成れる段）か
    #[inline]
    pub const fn can_promote(self, color: Color) -> bool {
        self.depth_for(color) < 3
    }

    /// USIの段文字（'a'〜'i'）
    #[inline]
    pub const fn to_usi_char(self) -> char {
        (b'a' + self as u8) as char
    }

    #[inline]
    pub const fn from_usi_char(c: char) -> Option<Rank> {
        if !c.is_ascii_lowercase() {
            return None;
        }
        Rank::nth(c as u8 - b'a')
    }

    /// 外部盤面の段番号（1〜9）から
    #[inline]
    pub const fn from_external(n: u8) -> Option<Rank> {
        if n == 0 { None } else { Rank::nth(9u8.wrapping_sub(n)) }
    }

    /// 外部盤面の段番号（1〜9）
    #[inline]
    pub const fn external(self) -> u8 {
        9 - self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_external_is_mirrored() {
        // 外部の1段目は先手の最下段（九段）
        assert_eq!(Rank::from_external(1), Some(Rank::Rank9));
        assert_eq!(Rank::from_external(9), Some(Rank::Rank1));
        assert_eq!(Rank::from_external(0), None);
        assert_eq!(Rank::Rank7.external(), 3);
    }

    #[test]
    fn test_rank_usi_char() {
        assert_eq!(Rank::Rank9.to_usi_char(), 'i');
        assert_eq!(Rank::from_usi_char('a'), Some(Rank::Rank1));
        assert_eq!(Rank::from_usi_char('j'), None);
        assert_eq!(Rank::from_usi_char('A'), None);
    }

    #[test]
    fn test_rank_depth_and_promotion_zone() {
        assert_eq!(Rank::Rank1.depth_for(Color::Black), 0);
        assert_eq!(Rank::Rank9.depth_for(Color::White), 0);
        assert_eq!(Rank::Rank2.depth_for(Color::White), 7);

        assert!(Rank::Rank3.can_promote(Color::Black));
        assert!(!Rank::Rank4.can_promote(Color::Black));
        assert!(!Rank::Rank6.can_promote(Color::White));
        assert!(Rank::Rank7.can_promote(Color::White));
    }
}
