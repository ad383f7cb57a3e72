//! 外部盤面（JSON）と局面の相互変換

use log::warn;
use serde::Deserialize;

use crate::error::MalformedPosition;
use crate::types::json::{BoardStateJson, CellJson, HandJson, MoveJson, PieceJson, RankJson};
use crate::types::{Color, Move, Piece, PieceType, Square};

use super::sfen::base_letter;
use super::Position;

/// 外部表現の駒タグと駒種の対応（不変）
pub const PIECE_TAGS: [(&str, PieceType); 15] = [
    ("fu", PieceType::Pawn),
    ("kyosha", PieceType::Lance),
    ("keima", PieceType::Knight),
    ("gin", PieceType::Silver),
    ("kin", PieceType::Gold),
    ("kaku", PieceType::Bishop),
    ("hisha", PieceType::Rook),
    ("gyoku", PieceType::King),
    ("ou", PieceType::King),
    ("tokin", PieceType::ProPawn),
    ("nkyosha", PieceType::ProLance),
    ("nkeima", PieceType::ProKnight),
    ("ngin", PieceType::ProSilver),
    ("uma", PieceType::Horse),
    ("ryu", PieceType::Dragon),
];

/// 1エントリあたりにエンコードする持ち駒の上限。これを超える時点で局面としては不正。
const HAND_ENCODE_LIMIT: i64 = 100;

/// 駒タグから駒種
pub fn piece_type_from_tag(tag: &str) -> Option<PieceType> {
    PIECE_TAGS.iter().find(|(t, _)| *t == tag).map(|&(_, pt)| pt)
}

/// 駒種から駒タグ（盤上の表現。玉は "gyoku"）
pub fn tag_from_piece_type(pt: PieceType) -> &'static str {
    PIECE_TAGS.iter().find(|&&(_, p)| p == pt).map_or("fu", |&(t, _)| t)
}

/// 打つ駒の駒タグ（玉は "ou"）
pub fn drop_tag(pt: PieceType) -> &'static str {
    match pt {
        PieceType::Lance => "kyosha",
        PieceType::Knight => "keima",
        PieceType::Silver => "gin",
        PieceType::Gold => "kin",
        PieceType::Bishop => "kaku",
        PieceType::Rook => "hisha",
        PieceType::King => "ou",
        _ => "fu",
    }
}

/// 駒タグの SFEN 表記（先手・大文字）。不明なタグは歩として扱う。
fn tag_to_sfen(tag: &str) -> String {
    let pt = piece_type_from_tag(tag).unwrap_or(PieceType::Pawn);
    let letter = base_letter(pt);
    if pt.is_promoted() { format!("+{letter}") } else { letter.to_string() }
}

/// 外部盤面を符号化局面文字列にエンコードする
///
/// 失敗しない。9段目から1段目へ、各段は1筋から9筋の順に並べる。
/// 持ち駒は手番を区別せず常に小文字で出力する。
pub fn encode_board_state(state: &BoardStateJson) -> String {
    let mut board = String::new();

    for rank in (1..=9).rev() {
        let row = state.board.get(&rank.to_string());
        let mut empty_count = 0;

        for file in 1..=9 {
            match row.and_then(|r: &RankJson| r.piece_at(&file.to_string())) {
                Some(piece) => {
                    if empty_count > 0 {
                        board.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    let symbol = tag_to_sfen(&piece.piece_type);
                    if piece.color == Color::Black.owner_tag() {
                        board.push_str(&symbol);
                    } else {
                        board.push_str(&symbol.to_ascii_lowercase());
                    }
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            board.push_str(&empty_count.to_string());
        }
        if rank > 1 {
            board.push('/');
        }
    }

    let turn = if state.turn.as_str() == Some(Color::Black.owner_tag()) { "b" } else { "w" };

    let mut hand = String::new();
    for pieces in state.hand.values() {
        for (tag, count) in HandJson::from_value(pieces).entries() {
            let symbol = tag_to_sfen(tag).to_ascii_lowercase();
            for _ in 0..count.min(HAND_ENCODE_LIMIT) {
                hand.push_str(&symbol);
            }
        }
    }
    if hand.is_empty() {
        hand.push('-');
    }

    format!("{board} {turn} {hand} 0 0")
}

/// 外部盤面の JSON から局面を構築する
pub fn load_position(value: &serde_json::Value) -> Result<Position, MalformedPosition> {
    let state = BoardStateJson::deserialize(value)?;
    let sfen = encode_board_state(&state);
    match Position::from_sfen(&sfen) {
        Ok(pos) => Ok(pos),
        Err(source) => Err(MalformedPosition::Sfen { sfen, source }),
    }
}

/// 外部盤面の JSON から局面を構築し、失敗した場合は平手初期局面を返す
pub fn position_or_startpos(value: &serde_json::Value) -> Position {
    match load_position(value) {
        Ok(pos) => pos,
        Err(e) => {
            warn!("Falling back to the starting position: {e}");
            Position::hirate()
        }
    }
}

impl Position {
    /// 現在の局面を外部盤面の JSON 表現に変換する
    ///
    /// 全マスを出力し、空きマスは null。持ち駒は手番ごとに `{タグ: 枚数}`。
    pub fn to_board_state_json(&self) -> BoardStateJson {
        let mut state = BoardStateJson::default();

        for rank in 1..=9u8 {
            let mut cells = std::collections::BTreeMap::new();
            for file in 1..=9u8 {
                let cell = Square::from_external(file, rank)
                    .map(|sq| self.piece_on(sq))
                    .filter(|pc| pc.is_some())
                    .map_or(CellJson::Other(serde_json::Value::Null), |pc| {
                        CellJson::Piece(piece_to_json(pc))
                    });
                cells.insert(file.to_string(), cell);
            }
            state.board.insert(rank.to_string(), RankJson::Cells(cells));
        }

        state.turn = serde_json::Value::from(self.side_to_move().owner_tag());

        for color in Color::ALL {
            let counts: serde_json::Map<String, serde_json::Value> = self
                .hand(color)
                .iter()
                .map(|(pt, n)| (tag_from_piece_type(pt).to_string(), n.into()))
                .collect();
            state.hand.insert(color.owner_tag().to_string(), counts.into());
        }

        state
    }

    /// 指し手を外部表現に変換する（self は指す前の局面）
    pub fn move_to_json(&self, m: Move) -> MoveJson {
        let (to_file, to_rank) = m.to().to_external();
        if m.is_drop() {
            MoveJson::Drop {
                is_drop: true,
                to_file,
                to_rank,
                piece_type: drop_tag(m.drop_piece_type()).to_string(),
            }
        } else {
            let (from_file, from_rank) = m.from().to_external();
            MoveJson::Normal {
                is_drop: false,
                from_file,
                from_rank,
                to_file,
                to_rank,
                promote: m.is_promote(),
            }
        }
    }
}

fn piece_to_json(pc: Piece) -> PieceJson {
    PieceJson {
        piece_type: tag_from_piece_type(pc.piece_type()).to_string(),
        color: pc.color().owner_tag().to_string(),
    }
}
