//! コマンドラインの入出力契約

use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::Value;
use std::process::Command;

const STARTPOS_MOVE: &str = r#"{"success":true,"move":{"is_drop":false,"from_file":9,"from_rank":3,"to_file":9,"to_rank":4,"promote":false}}"#;

fn shogi_ai() -> Command {
    let mut cmd = Command::cargo_bin("shogi-ai").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn stdout_json(args: &[&str]) -> (Value, Option<i32>) {
    let output = shogi_ai().args(args).output().unwrap();
    let text = String::from_utf8(output.stdout).unwrap();
    assert_eq!(text.lines().count(), 1, "stdout must be one JSON line: {text}");
    (serde_json::from_str(&text).unwrap(), output.status.code())
}

/// PHP 側が送る平手初期局面
fn initial_board() -> String {
    let back = ["kyosha", "keima", "gin", "kin", "gyoku", "kin", "gin", "keima", "kyosha"];
    let mut board = serde_json::Map::new();
    for rank in 1..=9usize {
        let mut row = serde_json::Map::new();
        for file in 1..=9usize {
            let cell = match (rank, file) {
                (1, f) => serde_json::json!({"type": back[f - 1], "color": "sente"}),
                (9, f) => serde_json::json!({"type": back[f - 1], "color": "gote"}),
                (2, 2) => serde_json::json!({"type": "kaku", "color": "sente"}),
                (2, 8) => serde_json::json!({"type": "hisha", "color": "sente"}),
                (8, 2) => serde_json::json!({"type": "hisha", "color": "gote"}),
                (8, 8) => serde_json::json!({"type": "kaku", "color": "gote"}),
                (3, _) => serde_json::json!({"type": "fu", "color": "sente"}),
                (7, _) => serde_json::json!({"type": "fu", "color": "gote"}),
                _ => Value::Null,
            };
            row.insert(file.to_string(), cell);
        }
        board.insert(rank.to_string(), Value::Object(row));
    }
    serde_json::json!({"board": board, "turn": "sente", "hand": {"sente": [], "gote": []}})
        .to_string()
}

#[test]
fn test_no_arguments() {
    shogi_ai()
        .assert()
        .code(1)
        .stdout(predicate::eq("{\"error\":\"No board state provided\"}\n"));
}

#[test]
fn test_startpos_move() {
    shogi_ai()
        .arg(initial_board())
        .assert()
        .success()
        .stdout(predicate::str::contains(STARTPOS_MOVE))
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_omitted_depth_equals_depth_three() {
    let board = initial_board();
    let (without, code_a) = stdout_json(&[&board]);
    let (with, code_b) = stdout_json(&[&board, "3"]);
    let (other, _) = stdout_json(&[&board, "8"]);
    assert_eq!(without, with);
    assert_eq!(without, other);
    assert_eq!(code_a, Some(0));
    assert_eq!(code_b, Some(0));
}

#[test]
fn test_invalid_json() {
    let (value, code) = stdout_json(&["{\"board\": "]);
    assert_eq!(code, Some(1));
    assert_eq!(value["success"], Value::Bool(false));
    assert!(value["error"].is_string());
}

#[test]
fn test_invalid_depth() {
    let (value, code) = stdout_json(&["{}", "three"]);
    assert_eq!(code, Some(1));
    assert_eq!(value["success"], Value::Bool(false));
    assert_eq!(value["error"], "Invalid depth: 'three'");
}

#[test]
fn test_checkmate_reports_no_legal_move() {
    let board = serde_json::json!({
        "board": {
            "9": {"1": {"type": "gyoku", "color": "gote"}},
            "8": {"1": {"type": "kin", "color": "sente"}},
            "7": {"1": {"type": "fu", "color": "sente"}},
            "1": {"5": {"type": "gyoku", "color": "sente"}}
        },
        "turn": "gote",
        "hand": {"sente": [], "gote": []}
    });
    let (value, code) = stdout_json(&[&board.to_string()]);
    assert_eq!(code, Some(0));
    assert_eq!(value, serde_json::json!({"success": false, "error": "No legal move found"}));
}

#[test]
fn test_unparseable_board_falls_back_to_startpos() {
    let board = r#"{"board": {"1": {"1": {"type": "gyoku", "color": "sente"}, "2": {"type": "gyoku", "color": "sente"}}}, "turn": "gote"}"#;
    shogi_ai()
        .arg(board)
        .assert()
        .success()
        .stdout(predicate::str::contains(STARTPOS_MOVE));
}

#[test]
fn test_debug_logs_go_to_stderr() {
    shogi_ai()
        .arg("--debug")
        .arg(initial_board())
        .assert()
        .success()
        .stdout(predicate::str::contains(STARTPOS_MOVE))
        .stderr(predicate::str::contains("[DEBUG]"));
}

#[test]
fn test_unknown_flags_still_answer_in_json() {
    for flag in ["-x", "--help", "--version"] {
        let output = shogi_ai().arg(flag).output().unwrap();
        assert_eq!(output.status.code(), Some(1), "{flag}");
        assert!(output.stderr.is_empty(), "{flag}");
        let text = String::from_utf8(output.stdout).unwrap();
        assert_eq!(text.lines().count(), 1, "{flag}: {text}");
        let json: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains(flag));
    }
}
