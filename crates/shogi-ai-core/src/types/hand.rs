//! 手駒（Hand）

use super::PieceType;

/// 片方の手駒
///
/// 駒打ちの生成順（歩香桂銀金角飛）に枚数を並べる。各枚数は `PieceType::hand_max` 以下。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hand([u8; 7]);

impl Hand {
    pub const EMPTY: Hand = Hand([0; 7]);

    const fn slot(pt: PieceType) -> Option<usize> {
        match pt {
            PieceType::Pawn => Some(0),
            PieceType::Lance => Some(1),
            PieceType::Knight => Some(2),
            PieceType::Silver => Some(3),
            PieceType::Gold => Some(4),
            PieceType::Bishop => Some(5),
            PieceType::Rook => Some(6),
            _ => None,
        }
    }

    /// 枚数（手駒にならない駒種は常に0）
    #[inline]
    pub const fn count(self, pt: PieceType) -> u32 {
        match Hand::slot(pt) {
            Some(i) => self.0[i] as u32,
            None => 0,
        }
    }

    #[inline]
    pub const fn has(self, pt: PieceType) -> bool {
        self.count(pt) > 0
    }

    /// 枚数を設定する（上限を超える枚数と手駒にならない駒種は無視）
    pub fn set(mut self, pt: PieceType, count: u32) -> Hand {
        if let Some(i) = Hand::slot(pt) {
            if count <= pt.hand_max() {
                self.0[i] = count as u8;
            }
        }
        self
    }

    pub fn add(self, pt: PieceType) -> Hand {
        debug_assert!(self.count(pt) < pt.hand_max());
        self.set(pt, self.count(pt) + 1)
    }

    pub fn sub(self, pt: PieceType) -> Hand {
        debug_assert!(self.has(pt));
        self.set(pt, self.count(pt).saturating_sub(1))
    }

    pub fn is_empty(self) -> bool {
        self.0.iter().all(|&n| n == 0)
    }

    /// 持っている駒を (駒種, 枚数) で駒打ちの生成順に列挙
    pub fn iter(self) -> impl DoubleEndedIterator<Item = (PieceType, u32)> {
        PieceType::HAND_PIECES
            .into_iter()
            .map(move |pt| (pt, self.count(pt)))
            .filter(|&(_, n)| n > 0)
    }
}
