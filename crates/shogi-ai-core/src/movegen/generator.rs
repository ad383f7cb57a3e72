//! 合法手生成
//!
//! 生成順は決定的:
//! 1. 盤上の駒の移動（移動元の升インデックス昇順、駒ごとの方向テーブル順、走り駒は近い升から）。
//!    成りが任意の場合は成る手を先に置く。
//! 2. 駒打ち（歩香桂銀金角飛の順、移動先の升インデックス昇順）。

use crate::position::Position;
use crate::types::{Color, Move, PieceType, Square};

use super::movelist::MoveList;

/// 行き所のない升か（歩・香は最奥の1段、桂は2段）
#[inline]
fn is_dead_square(pt: PieceType, to: Square, us: Color) -> bool {
    to.rank().depth_for(us) < pt.dead_ranks()
}

/// 王手放置や二歩などを考慮しない指し手を生成する
fn generate_pseudo_legal(pos: &Position, list: &mut MoveList) {
    let us = pos.side_to_move();

    for (from, pc) in pos.pieces() {
        if pc.color() != us {
            continue;
        }
        let pt = pc.piece_type();
        pos.for_each_destination(pc, from, |to| {
            let promotable = pt.can_promote() && (from.can_promote(us) || to.can_promote(us));
            if promotable {
                list.push(Move::new_move(from, to, true));
            }
            if !is_dead_square(pt, to, us) {
                list.push(Move::new_move(from, to, false));
            }
        });
    }

    let hand = pos.hand(us);
    for pt in PieceType::HAND_PIECES {
        if !hand.has(pt) {
            continue;
        }
        for to in Square::all() {
            if pos.piece_on(to).is_some() || is_dead_square(pt, to, us) {
                continue;
            }
            // 二歩
            if pt == PieceType::Pawn && pos.has_pawn_on_file(us, to) {
                continue;
            }
            list.push(Move::new_drop(pt, to));
        }
    }
}

/// 指した側の玉が取られる状態になっていないか（pos は指した後の局面）
#[inline]
fn leaves_king_safe(pos: &Position) -> bool {
    !pos.is_king_attacked(pos.side_to_move().opponent())
}

/// 手番側に合法手が1つでもあるか
///
/// 打ち歩詰めの判定から呼ばれる。歩による王手は合駒できないため、
/// ここでは打ち歩詰めの検査を行わない。
fn has_any_legal_move(pos: &mut Position) -> bool {
    let mut pseudo = MoveList::new();
    generate_pseudo_legal(pos, &mut pseudo);

    pseudo.iter().any(|&m| {
        pos.do_move(m);
        let ok = leaves_king_safe(pos);
        pos.undo_move(m);
        ok
    })
}

/// 打ち歩詰めか（pos は歩を打った後の局面）
fn is_drop_pawn_mate(pos: &mut Position, m: Move) -> bool {
    let them = pos.side_to_move();
    let us = them.opponent();
    let forward = match us {
        Color::Black => -1,
        Color::White => 1,
    };
    let gives_check = pos.king_square(them).is_some_and(|ksq| m.to().offset(0, forward) == Some(ksq));

    gives_check && !has_any_legal_move(pos)
}

/// 合法手を生成する
pub fn generate_legal(pos: &Position, list: &mut MoveList) {
    let mut pseudo = MoveList::new();
    generate_pseudo_legal(pos, &mut pseudo);

    let mut scratch = pos.clone();
    for &m in pseudo.iter() {
        scratch.do_move(m);
        let mut legal = leaves_king_safe(&scratch);
        if legal && m.is_drop() && m.drop_piece_type() == PieceType::Pawn {
            legal = !is_drop_pawn_mate(&mut scratch, m);
        }
        scratch.undo_move(m);

        if legal {
            list.push(m);
        }
    }
}

impl Position {
    /// 合法手の一覧
    pub fn legal_moves(&self) -> MoveList {
        let mut list = MoveList::new();
        generate_legal(self, &mut list);
        list
    }
}
