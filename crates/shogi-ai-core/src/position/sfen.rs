//! SFEN形式（符号化局面文字列）の解析・出力
//!
//! 受け付ける形式: `<盤面> <b|w> <持ち駒|-> [手数] [指し手番号]`。
//! 外部盤面のエンコード結果は末尾に ` 0 0` を持つため、5フィールドまで許容する。

use crate::types::{Color, File, Piece, PieceType, Rank, Square};

use super::pos::Position;

/// 平手初期局面のSFEN
pub const SFEN_HIRATE: &str = "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1";

/// 一組の駒の枚数（生駒に換算）。盤上と手駒の合計がこれを超える局面は受け付けない。
const PIECE_SET: [(PieceType, u32); 7] = [
    (PieceType::Pawn, 18),
    (PieceType::Lance, 4),
    (PieceType::Knight, 4),
    (PieceType::Silver, 4),
    (PieceType::Gold, 4),
    (PieceType::Bishop, 2),
    (PieceType::Rook, 2),
];

/// SFENパースエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SfenError {
    /// フィールド数が不正
    Fields(usize),
    /// 盤面の形式が不正
    Board(String),
    /// 手番の形式が不正
    SideToMove(String),
    /// 手駒の形式が不正
    Hand(String),
    /// 手数の形式が不正
    Ply(String),
    /// 駒の枚数が一組を超えている
    PieceCount(String),
}

impl std::fmt::Display for SfenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SfenError::Fields(n) => write!(f, "Expected 3 to 5 fields, got {n}"),
            SfenError::Board(s) => write!(f, "Invalid board: {s}"),
            SfenError::SideToMove(s) => write!(f, "Invalid side to move: {s}"),
            SfenError::Hand(s) => write!(f, "Invalid hand: {s}"),
            SfenError::Ply(s) => write!(f, "Invalid ply: {s}"),
            SfenError::PieceCount(s) => write!(f, "Too many pieces: {s}"),
        }
    }
}

impl std::error::Error for SfenError {}

impl Position {
    /// 平手初期局面
    pub fn hirate() -> Position {
        let mut pos = Position::new();
        pos.set_hirate();
        pos
    }

    /// SFEN文字列から局面を生成
    pub fn from_sfen(sfen: &str) -> Result<Position, SfenError> {
        let mut pos = Position::new();
        pos.set_sfen(sfen)?;
        Ok(pos)
    }

    /// SFEN文字列から局面を設定
    ///
    /// 失敗した場合、局面は空の状態になる。
    pub fn set_sfen(&mut self, sfen: &str) -> Result<(), SfenError> {
        *self = Position::new();

        let parts: Vec<&str> = sfen.split_whitespace().collect();
        if !(3..=5).contains(&parts.len()) {
            return Err(SfenError::Fields(parts.len()));
        }

        let result = self.parse_fields(&parts);
        if result.is_err() {
            *self = Position::new();
        }
        result
    }

    fn parse_fields(&mut self, parts: &[&str]) -> Result<(), SfenError> {
        // 1. 盤面
        self.parse_board(parts[0])?;

        // 2. 手番
        self.side_to_move = match parts[1] {
            "b" => Color::Black,
            "w" => Color::White,
            other => {
                return Err(SfenError::SideToMove(format!("Expected 'b' or 'w', got '{other}'")));
            }
        };

        // 3. 手駒
        self.parse_hand(parts[2])?;

        // 4. 手数と指し手番号（いずれも省略可、整数のみ）
        if let Some(ply) = parts.get(3) {
            self.game_ply = ply.parse().map_err(|_| SfenError::Ply(ply.to_string()))?;
        }
        if let Some(number) = parts.get(4) {
            number.parse::<i64>().map_err(|_| SfenError::Ply(number.to_string()))?;
        }

        self.check_piece_counts()
    }

    /// 現局面のSFEN文字列を取得
    pub fn to_sfen(&self) -> String {
        let mut result = String::new();

        // 1. 盤面（1段目から、各段は9筋から）
        for (rank_idx, &rank) in Rank::ALL.iter().enumerate() {
            let mut empty_count = 0;
            for &file in File::ALL.iter().rev() {
                let pc = self.piece_on(Square::new(file, rank));
                if pc.is_none() {
                    empty_count += 1;
                    continue;
                }
                if empty_count > 0 {
                    result.push_str(&empty_count.to_string());
                    empty_count = 0;
                }
                result.push_str(&piece_to_sfen(pc));
            }
            if empty_count > 0 {
                result.push_str(&empty_count.to_string());
            }
            if rank_idx < Rank::NUM - 1 {
                result.push('/');
            }
        }

        // 2. 手番
        result.push(' ');
        result.push(match self.side_to_move {
            Color::Black => 'b',
            Color::White => 'w',
        });

        // 3. 手駒
        result.push(' ');
        let hand_str = self.hand_to_sfen();
        if hand_str.is_empty() {
            result.push('-');
        } else {
            result.push_str(&hand_str);
        }

        // 4. 手数
        result.push(' ');
        result.push_str(&self.game_ply.to_string());

        result
    }

    /// 平手初期局面を設定
    fn set_hirate(&mut self) {
        // 定数の局面なので失敗しない
        if let Err(e) = self.set_sfen(SFEN_HIRATE) {
            debug_assert!(false, "SFEN_HIRATE must parse: {e}");
        }
    }

    /// 盤面部分をパース
    fn parse_board(&mut self, board_str: &str) -> Result<(), SfenError> {
        let rows: Vec<&str> = board_str.split('/').collect();
        if rows.len() != Rank::NUM {
            return Err(SfenError::Board(format!("Expected 9 ranks, got {}", rows.len())));
        }

        for (&rank, row) in Rank::ALL.iter().zip(&rows) {
            // 9筋から1筋へ向かって埋める
            let mut filled = 0usize;
            let mut promoted = false;

            for c in row.chars() {
                if c == '+' {
                    if promoted {
                        return Err(SfenError::Board(format!("Repeated '+' in '{row}'")));
                    }
                    promoted = true;
                    continue;
                }

                if let Some(digit) = c.to_digit(10) {
                    if promoted || digit == 0 {
                        return Err(SfenError::Board(format!("Unexpected '{c}' in '{row}'")));
                    }
                    filled += digit as usize;
                    if filled > File::NUM {
                        return Err(SfenError::Board(format!("Too many squares in '{row}'")));
                    }
                    continue;
                }

                if filled >= File::NUM {
                    return Err(SfenError::Board(format!("Too many pieces in '{row}'")));
                }
                let pc = sfen_char_to_piece(c, promoted)?;
                let file = File::ALL[File::NUM - 1 - filled];
                let sq = Square::new(file, rank);

                if pc.piece_type() == PieceType::King && self.king_square(pc.color()).is_some() {
                    return Err(SfenError::Board(format!("More than one king for {:?}", pc.color())));
                }
                self.put_piece(pc, sq);

                promoted = false;
                filled += 1;
            }

            if promoted || filled != File::NUM {
                return Err(SfenError::Board(format!("Rank '{row}' has wrong number of squares")));
            }
        }

        Ok(())
    }

    /// 手駒部分をパース
    fn parse_hand(&mut self, hand_str: &str) -> Result<(), SfenError> {
        if hand_str == "-" {
            return Ok(());
        }

        let mut count: Option<u32> = None;
        for c in hand_str.chars() {
            if let Some(digit) = c.to_digit(10) {
                let next = count.unwrap_or(0).saturating_mul(10).saturating_add(digit);
                count = Some(next);
                continue;
            }

            let (color, pt) = sfen_hand_char_to_piece(c)?;
            let hand = self.hand[color.index()];
            let total = hand.count(pt).saturating_add(count.unwrap_or(1));
            if count == Some(0) || total > pt.hand_max() {
                return Err(SfenError::Hand(format!("Bad count for '{c}' in '{hand_str}'")));
            }
            self.hand[color.index()] = hand.set(pt, total);
            count = None;
        }

        if count.is_some() {
            return Err(SfenError::Hand(format!("Dangling count in '{hand_str}'")));
        }
        Ok(())
    }

    /// 盤上と手駒の合計が一組の枚数に収まっているか
    fn check_piece_counts(&self) -> Result<(), SfenError> {
        for (pt, limit) in PIECE_SET {
            let on_board = self
                .pieces()
                .filter(|(_, pc)| pc.piece_type().unpromote() == pt)
                .count() as u32;
            let in_hand: u32 = Color::ALL.iter().map(|&c| self.hand(c).count(pt)).sum();
            if on_board + in_hand > limit {
                return Err(SfenError::PieceCount(format!(
                    "{pt:?}: {} (max {limit})",
                    on_board + in_hand
                )));
            }
        }
        Ok(())
    }

    /// 手駒をSFEN文字列に変換（先手→後手、飛角金銀桂香歩の順）
    fn hand_to_sfen(&self) -> String {
        let mut result = String::new();
        for color in Color::ALL {
            for (pt, cnt) in self.hand(color).iter().rev() {
                if cnt > 1 {
                    result.push_str(&cnt.to_string());
                }
                let letter = base_letter(pt);
                result.push(match color {
                    Color::Black => letter,
                    Color::White => letter.to_ascii_lowercase(),
                });
            }
        }
        result
    }
}

/// 生駒のSFEN文字（先手・大文字）
pub(crate) const fn base_letter(pt: PieceType) -> char {
    match pt.unpromote() {
        PieceType::Lance => 'L',
        PieceType::Knight => 'N',
        PieceType::Silver => 'S',
        PieceType::Gold => 'G',
        PieceType::Bishop => 'B',
        PieceType::Rook => 'R',
        PieceType::King => 'K',
        _ => 'P',
    }
}

/// 大文字のSFEN文字から生駒の種類
pub(crate) const fn piece_type_from_letter(c: char) -> Option<PieceType> {
    match c {
        'P' => Some(PieceType::Pawn),
        'L' => Some(PieceType::Lance),
        'N' => Some(PieceType::Knight),
        'S' => Some(PieceType::Silver),
        'G' => Some(PieceType::Gold),
        'B' => Some(PieceType::Bishop),
        'R' => Some(PieceType::Rook),
        'K' => Some(PieceType::King),
        _ => None,
    }
}

/// 駒をSFEN文字列に変換
fn piece_to_sfen(pc: Piece) -> String {
    let pt = pc.piece_type();
    let letter = match pc.color() {
        Color::Black => base_letter(pt),
        Color::White => base_letter(pt).to_ascii_lowercase(),
    };
    if pt.is_promoted() { format!("+{letter}") } else { letter.to_string() }
}

/// SFEN文字を駒に変換
fn sfen_char_to_piece(c: char, promoted: bool) -> Result<Piece, SfenError> {
    let color = if c.is_ascii_uppercase() { Color::Black } else { Color::White };
    let base_pt = piece_type_from_letter(c.to_ascii_uppercase())
        .ok_or_else(|| SfenError::Board(format!("Unknown piece: {c}")))?;

    let pt = if promoted {
        base_pt.promote().ok_or_else(|| SfenError::Board(format!("Cannot promote: {c}")))?
    } else {
        base_pt
    };

    Ok(Piece::new(color, pt))
}

/// SFEN手駒文字を駒種に変換
fn sfen_hand_char_to_piece(c: char) -> Result<(Color, PieceType), SfenError> {
    let color = if c.is_ascii_uppercase() { Color::Black } else { Color::White };
    match piece_type_from_letter(c.to_ascii_uppercase()) {
        Some(pt) if pt != PieceType::King => Ok((color, pt)),
        _ => Err(SfenError::Hand(format!("Unknown hand piece: {c}"))),
    }
}
