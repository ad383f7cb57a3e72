//! 外部（PHP側）の盤面・指し手の JSON 表現
//!
//! 盤面は `{"board": {"<段>": {"<筋>": {"type": "fu", "color": "sente"}}}, "turn": ..., "hand": ...}`。
//! PHP は空の連想配列を `[]` で出力するため、段や持ち駒は配列を含む複数の形を許容する。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 駒の JSON 表現
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PieceJson {
    /// "fu" | "kyosha" | ... | "ryu"
    #[serde(rename = "type")]
    pub piece_type: String,
    /// "sente" | "gote"
    pub color: String,
}

/// 盤面の1マス（駒オブジェクト以外は空きマスとして扱う）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CellJson {
    Piece(PieceJson),
    Other(serde_json::Value),
}

impl CellJson {
    /// 駒があれば返す
    pub fn piece(&self) -> Option<&PieceJson> {
        match self {
            CellJson::Piece(piece) => Some(piece),
            CellJson::Other(_) => None,
        }
    }
}

/// 1段分（筋の文字列 → マス）。オブジェクト以外（PHPの空配列など）は空の段。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RankJson {
    Cells(BTreeMap<String, CellJson>),
    Other(serde_json::Value),
}

impl RankJson {
    /// 指定した筋の駒
    pub fn piece_at(&self, file: &str) -> Option<&PieceJson> {
        match self {
            RankJson::Cells(cells) => cells.get(file).and_then(CellJson::piece),
            RankJson::Other(_) => None,
        }
    }
}

/// 片方の持ち駒
///
/// `{"fu": 2}` 形式、または `["fu", "fu"]` のような列形式。それ以外は無視する。
#[derive(Debug, Clone, PartialEq)]
pub enum HandJson<'a> {
    Counts(&'a serde_json::Map<String, serde_json::Value>),
    Sequence(&'a [serde_json::Value]),
    Ignored,
}

impl<'a> HandJson<'a> {
    /// JSON 値から持ち駒の形を判別する
    pub fn from_value(value: &'a serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(map) => HandJson::Counts(map),
            serde_json::Value::Array(items) => HandJson::Sequence(items),
            _ => HandJson::Ignored,
        }
    }

    /// (駒タグ, 枚数) を入力順に列挙する
    ///
    /// 枚数が整数でないもの・0以下のものは除外する。列形式は1要素1枚。
    pub fn entries(&self) -> Vec<(&'a str, i64)> {
        match *self {
            HandJson::Counts(map) => map
                .iter()
                .filter_map(|(tag, count)| count.as_i64().map(|c| (tag.as_str(), c)))
                .filter(|&(_, c)| c > 0)
                .collect(),
            HandJson::Sequence(items) => {
                items.iter().filter_map(|item| item.as_str()).map(|tag| (tag, 1)).collect()
            }
            HandJson::Ignored => Vec::new(),
        }
    }
}

/// 盤面全体の状態
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BoardStateJson {
    /// 段の文字列（"1"〜"9"）→ 段
    #[serde(default)]
    pub board: BTreeMap<String, RankJson>,
    /// 手番: "sente" | "gote"（"sente" 以外は後手番として扱う）
    #[serde(default)]
    pub turn: serde_json::Value,
    /// 手番タグ → 持ち駒（入力の順序を保持する）
    #[serde(default)]
    pub hand: serde_json::Map<String, serde_json::Value>,
}

/// 外部表現の指し手
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum MoveJson {
    /// 駒打ち
    Drop {
        is_drop: bool,
        to_file: u8,
        to_rank: u8,
        piece_type: String,
    },
    /// 盤上の駒の移動
    Normal {
        is_drop: bool,
        from_file: u8,
        from_rank: u8,
        to_file: u8,
        to_rank: u8,
        promote: bool,
    },
}

/// 応答エンベロープ `{success, move}` / `{success, error}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AiResponse {
    pub success: bool,
    #[serde(rename = "move", skip_serializing_if = "Option::is_none")]
    pub mv: Option<MoveJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AiResponse {
    /// 成功応答
    pub fn ok(mv: MoveJson) -> Self {
        AiResponse { success: true, mv: Some(mv), error: None }
    }

    /// 失敗応答
    pub fn failure(error: impl Into<String>) -> Self {
        AiResponse { success: false, mv: None, error: Some(error.into()) }
    }
}
