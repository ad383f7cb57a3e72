//! # shogi-ai-core
//!
//! 外部（PHP側）の盤面 JSON を受け取り、1手読みの駒割評価で指し手を1つ推薦する。
//!
//! ## モジュール構成
//!
//! - `types`: 基本型（Color, Square, Piece, Move, Value）と外部 JSON 表現
//! - `position`: 局面表現、do_move/undo_move、SFEN、外部盤面との変換
//! - `movegen`: 合法手生成
//! - `eval`: 駒割評価
//! - `search`: 指し手選択
//! - `engine`: 1リクエスト分の処理

pub mod engine;
pub mod error;
pub mod eval;
pub mod movegen;
pub mod position;
pub mod search;
pub mod types;

pub use engine::{EngineConfig, ShogiAi};
pub use error::{EngineError, EngineResult, MalformedPosition};
pub use position::Position;
pub use types::{AiResponse, BoardStateJson, Color, Move, MoveJson, Piece, PieceType, Square, Value};
