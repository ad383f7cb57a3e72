//! 局面（Position）

use crate::types::{Color, Hand, Move, Piece, PieceType, Square};

use super::state::StateInfo;

/// 将棋の局面
///
/// 盤面・手駒・手番と、`undo_move` のための状態スタックを持つ。
/// 1リクエストごとに生成され、複数の呼び出し間で共有しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    // === 盤面 ===
    /// 各マスの駒 [Square]
    pub(super) board: [Piece; Square::NUM],

    // === 手駒 ===
    /// 手駒 [Color]
    pub(super) hand: [Hand; Color::NUM],

    // === 状態 ===
    /// 手番
    pub(super) side_to_move: Color,
    /// 手数（SFEN の4番目のフィールド）
    pub(super) game_ply: i32,
    /// 玉の位置 [Color]（玉がなければNone）
    pub(super) king_square: [Option<Square>; Color::NUM],
    /// do_move で積まれた状態
    pub(super) states: Vec<StateInfo>,
}

impl Position {
    // ========== 局面設定 ==========

    /// 空の局面を生成
    pub fn new() -> Self {
        Position {
            board: [Piece::NONE; Square::NUM],
            hand: [Hand::EMPTY; Color::NUM],
            side_to_move: Color::Black,
            game_ply: 1,
            king_square: [None; Color::NUM],
            states: Vec::new(),
        }
    }

    // ========== 盤面アクセス ==========

    /// 指定マスの駒を取得
    #[inline]
    pub fn piece_on(&self, sq: Square) -> Piece {
        self.board[sq.index()]
    }

    /// 手駒を取得
    #[inline]
    pub fn hand(&self, c: Color) -> Hand {
        self.hand[c.index()]
    }

    /// 玉の位置
    #[inline]
    pub fn king_square(&self, c: Color) -> Option<Square> {
        self.king_square[c.index()]
    }

    /// 手番
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// 盤上の駒を (升, 駒) の組で列挙
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().map(|sq| (sq, self.piece_on(sq))).filter(|(_, pc)| pc.is_some())
    }

    /// 指定した筋に手番側の歩（成っていない）があるか
    pub fn has_pawn_on_file(&self, c: Color, sq: Square) -> bool {
        let pawn = Piece::new(c, PieceType::Pawn);
        let base = sq.index() / 9 * 9;
        self.board[base..base + 9].contains(&pawn)
    }

    // ========== 駒の配置 ==========

    /// 駒を配置
    pub(super) fn put_piece(&mut self, pc: Piece, sq: Square) {
        debug_assert!(self.board[sq.index()].is_none());
        self.board[sq.index()] = pc;
        if pc.piece_type() == PieceType::King {
            self.king_square[pc.color().index()] = Some(sq);
        }
    }

    /// 駒を除去
    pub(super) fn remove_piece(&mut self, sq: Square) -> Piece {
        let pc = self.board[sq.index()];
        debug_assert!(pc.is_some());
        self.board[sq.index()] = Piece::NONE;
        pc
    }

    // ========== 指し手の実行 ==========

    /// 指し手を実行
    ///
    /// 合法性は検査しない（`generate_legal` が返した手のみを渡すこと）。
    pub fn do_move(&mut self, m: Move) {
        let us = self.side_to_move;

        let captured = if m.is_drop() {
            let pt = m.drop_piece_type();
            self.hand[us.index()] = self.hand[us.index()].sub(pt);
            self.put_piece(Piece::new(us, pt), m.to());
            Piece::NONE
        } else {
            let from = m.from();
            let to = m.to();

            let captured = self.piece_on(to);
            if captured.is_some() {
                self.remove_piece(to);
                // 手駒に追加（成駒は生駒に戻す）。玉は手駒にならない
                let captured_pt = captured.piece_type().unpromote();
                if captured_pt == PieceType::King {
                    self.king_square[captured.color().index()] = None;
                } else {
                    self.hand[us.index()] = self.hand[us.index()].add(captured_pt);
                }
            }

            let pc = self.remove_piece(from);
            let moved_pc = if m.is_promote() { pc.promote().unwrap_or(pc) } else { pc };
            self.put_piece(moved_pc, to);
            captured
        };

        self.states.push(StateInfo::new(m, captured));
        self.side_to_move = us.opponent();
        self.game_ply += 1;
    }

    /// 指し手を戻す
    pub fn undo_move(&mut self, m: Move) {
        debug_assert!(!self.states.is_empty(), "undo_move called without do_move");
        let Some(state) = self.states.pop() else {
            return;
        };
        debug_assert_eq!(state.last_move, m);

        self.side_to_move = self.side_to_move.opponent();
        self.game_ply -= 1;
        let us = self.side_to_move;

        if m.is_drop() {
            let pt = m.drop_piece_type();
            self.remove_piece(m.to());
            self.hand[us.index()] = self.hand[us.index()].add(pt);
        } else {
            let from = m.from();
            let to = m.to();
            let moved_pc = self.remove_piece(to);
            let original_pc = if m.is_promote() { moved_pc.unpromote() } else { moved_pc };
            self.put_piece(original_pc, from);

            let captured = state.captured_piece;
            if captured.is_some() {
                self.put_piece(captured, to);
                let cap_pt = captured.piece_type().unpromote();
                if cap_pt != PieceType::King {
                    self.hand[us.index()] = self.hand[us.index()].sub(cap_pt);
                }
            }
        }
    }

    /// 先後を入れ替えて盤面を180度回転した局面
    pub fn mirrored(&self) -> Position {
        let mut pos = Position::new();
        for (sq, pc) in self.pieces() {
            pos.put_piece(pc.flip(), sq.inverse());
        }
        pos.hand = [self.hand[Color::White.index()], self.hand[Color::Black.index()]];
        pos.side_to_move = self.side_to_move.opponent();
        pos.game_ply = self.game_ply;
        pos
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::SFEN_HIRATE;
    use crate::types::{File, Rank};

    #[test]
    fn test_do_undo_restores_position() {
        let mut pos = Position::from_sfen(SFEN_HIRATE).unwrap();
        let before = pos.clone();
        let m = Move::from_usi("7g7f").unwrap();

        pos.do_move(m);
        assert_eq!(pos.side_to_move(), Color::White);
        assert_eq!(pos.hand(Color::Black), before.hand(Color::Black));
        assert!(pos.piece_on(Square::new(File::File7, Rank::Rank7)).is_none());
        assert_eq!(pos.piece_on(Square::new(File::File7, Rank::Rank6)), Piece::B_PAWN);

        pos.undo_move(m);
        assert_eq!(pos, before);
    }

    #[test]
    fn test_capture_promoted_piece_goes_to_hand_unpromoted() {
        // 後手の龍（5五）を先手の金（5六）が取る
        let mut pos = Position::from_sfen("4k4/9/9/9/4+r4/4G4/9/9/4K4 b - 1").unwrap();
        let before = pos.clone();
        let m = Move::from_usi("5f5e").unwrap();

        pos.do_move(m);
        assert_eq!(pos.hand(Color::Black).count(PieceType::Rook), 1);
        assert_eq!(pos.piece_on(Square::SQ_55), Piece::B_GOLD);

        pos.undo_move(m);
        assert_eq!(pos, before);
        assert_eq!(pos.piece_on(Square::SQ_55), Piece::W_DRAGON);
    }

    #[test]
    fn test_drop_and_promotion_undo() {
        let mut pos = Position::from_sfen("4k4/9/9/4P4/9/9/9/9/4K4 b P 1").unwrap();
        let before = pos.clone();

        let promote = Move::from_usi("5d5c+").unwrap();
        pos.do_move(promote);
        assert_eq!(pos.piece_on(Square::from_usi("5c").unwrap()), Piece::B_PRO_PAWN);

        let drop = Move::from_usi("P*1e").unwrap();
        pos.side_to_move = Color::Black;
        pos.do_move(drop);
        assert!(pos.hand(Color::Black).is_empty());

        pos.undo_move(drop);
        pos.side_to_move = Color::White;
        pos.undo_move(promote);
        assert_eq!(pos, before);
    }

    #[test]
    fn test_has_pawn_on_file() {
        let pos = Position::from_sfen(SFEN_HIRATE).unwrap();
        let sq = Square::new(File::File5, Rank::Rank5);
        assert!(pos.has_pawn_on_file(Color::Black, sq));
        assert!(pos.has_pawn_on_file(Color::White, sq));

        let pos = Position::from_sfen("4k4/9/9/9/9/9/9/9/4K4 b - 1").unwrap();
        assert!(!pos.has_pawn_on_file(Color::Black, sq));
    }

    #[test]
    fn test_mirrored_swaps_sides() {
        let pos = Position::from_sfen("4k4/9/9/9/9/9/9/9/3GK4 b 2Pr 1").unwrap();
        let m = pos.mirrored();
        assert_eq!(m.side_to_move(), Color::White);
        assert_eq!(m.piece_on(Square::new(File::File4, Rank::Rank1)), Piece::W_GOLD);
        assert_eq!(m.hand(Color::White).count(PieceType::Pawn), 2);
        assert_eq!(m.hand(Color::Black).count(PieceType::Rook), 1);
        assert_eq!(m.king_square(Color::Black), Some(Square::new(File::File5, Rank::Rank9)));
    }
}
