//! 指し手推薦のリクエストハンドラ
//!
//! `shogi-ai '<盤面JSON>' [深さ]` の結果を標準出力に JSON 1行で返す。
//! 診断ログは全て標準エラー出力へ。呼び出し側は標準エラー出力も併せて読むため、
//! 既定ではエラー以外のログを出さない（`--debug` または `RUST_LOG` で変更）。
//! 引数の誤りやパニックも JSON の失敗応答として返す。

use std::io::Write;

use anyhow::{Result, anyhow};
use clap::Parser;
use shogi_ai_core::{AiResponse, EngineConfig, EngineError, ShogiAi};

const NO_BOARD_STATE: &str = "No board state provided";

#[derive(Parser, Debug)]
#[command(
    about,
    long_about = None,
    allow_negative_numbers = true,
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Args {
    /// Board state JSON: {"board": {...}, "turn": "sente"|"gote", "hand": {...}}
    board_state: Option<String>,

    /// Search depth (accepted for compatibility, not used by the selector)
    depth: Option<String>,

    /// Ignored trailing arguments
    #[arg(hide = true, num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
    extra: Vec<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

/// 標準出力に書く内容と終了コード
#[derive(Debug, PartialEq)]
enum Output {
    /// 盤面が渡されなかった（`{"error": ...}` のみ）
    MissingBoard,
    /// 通常の応答エンベロープ
    Envelope(AiResponse),
}

impl Output {
    fn to_json(&self) -> String {
        let value = match self {
            Output::MissingBoard => serde_json::json!({ "error": NO_BOARD_STATE }),
            Output::Envelope(response) => match serde_json::to_value(response) {
                Ok(v) => v,
                Err(e) => serde_json::json!({ "success": false, "error": e.to_string() }),
            },
        };
        value.to_string()
    }
}

fn main() {
    let (output, code) = match Args::try_parse() {
        Ok(args) => {
            init_logging(args.debug);
            install_panic_hook();
            guarded(|| handle_request(&args))
        }
        Err(e) => {
            init_logging(false);
            usage_error(&e)
        }
    };

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{}", output.to_json()) {
        log::error!("Failed to write response: {e}");
        std::process::exit(1);
    }
    let _ = stdout.flush();
    drop(stdout);
    std::process::exit(code);
}

fn init_logging(debug: bool) {
    let log_level = if debug { "debug" } else { "error" };
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    );
    builder
        .format(|buf, record| {
            writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args())
        })
        .write_style(env_logger::WriteStyle::Never)
        .target(env_logger::Target::Stderr);
    // テストなどで二重に初期化されても無視する
    let _ = builder.try_init();
}

/// パニックの既定メッセージを標準エラー出力に直接書かず、ログに流す
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| log::error!("Panic: {info}")));
}

/// パニックを内部エラーの応答に変える
fn guarded<F>(f: F) -> (Output, i32)
where
    F: FnOnce() -> (Output, i32) + std::panic::UnwindSafe,
{
    match std::panic::catch_unwind(f) {
        Ok(result) => result,
        Err(_) => {
            log::error!("Unhandled internal failure");
            (Output::Envelope(AiResponse::failure("Internal error")), 1)
        }
    }
}

/// 引数の解釈に失敗した（未知のフラグなど）
fn usage_error(e: &clap::Error) -> (Output, i32) {
    let rendered = e.to_string();
    log::debug!("{rendered}");
    let message = rendered.lines().next().unwrap_or("Invalid arguments").to_string();
    (Output::Envelope(AiResponse::failure(message)), 1)
}

/// 深さを解釈する（省略時は既定値）
fn parse_depth(raw: Option<&str>) -> Result<i32> {
    match raw {
        None => Ok(EngineConfig::DEFAULT_DEPTH),
        Some(s) => s.trim().parse().map_err(|_| anyhow!("Invalid depth: '{s}'")),
    }
}

/// 1リクエストを処理し、出力と終了コードを返す
fn handle_request(args: &Args) -> (Output, i32) {
    if !args.extra.is_empty() {
        log::debug!("Ignoring {} trailing argument(s)", args.extra.len());
    }

    let Some(raw) = args.board_state.as_deref() else {
        return (Output::MissingBoard, 1);
    };

    let board_state: serde_json::Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            log::debug!("Invalid board state JSON: {e}");
            return (Output::Envelope(AiResponse::failure(e.to_string())), 1);
        }
    };

    let depth = match parse_depth(args.depth.as_deref()) {
        Ok(d) => d,
        Err(e) => {
            log::debug!("{e}");
            return (Output::Envelope(AiResponse::failure(e.to_string())), 1);
        }
    };

    let ai = ShogiAi::new(EngineConfig::with_depth(depth));
    match ai.best_move(&board_state) {
        Ok(mv) => (Output::Envelope(AiResponse::ok(mv)), 0),
        Err(e @ EngineError::NoLegalMove) => (Output::Envelope(AiResponse::failure(e.to_string())), 0),
        Err(e) => {
            log::debug!("{e}");
            (Output::Envelope(AiResponse::failure(e.to_string())), 1)
        }
    }
}
