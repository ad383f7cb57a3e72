//! 局面表現モジュール
//!
//! - `Position`: 局面
//! - `StateInfo`: do_move / undo_move のための状態
//! - SFEN形式の解析・出力
//! - 外部盤面（JSON）との変換と、不正入力時の初期局面へのフォールバック

mod board_effect;
mod json_conversion;
mod pos;
mod sfen;
mod state;

pub use json_conversion::{
    PIECE_TAGS, drop_tag, encode_board_state, load_position, piece_type_from_tag,
    position_or_startpos, tag_from_piece_type,
};
pub use pos::Position;
pub use sfen::{SFEN_HIRATE, SfenError};
pub use state::StateInfo;
