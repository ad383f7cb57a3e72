//! AI対局ログ（`ai_matches/*.json`）の読み込みと集計
//!
//! 1ファイル = 1回の対局コマンド実行。ヘッダは旧形式では `config`、
//! 対局コマンドが書き出す形式では `meta` に入っている。

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// ログディレクトリの既定値（アプリケーションルートからの相対パス）
pub const DEFAULT_LOG_DIR: &str = "storage/app/private/ai_matches";

/// 終局理由が記録されていない対局の集計キー
pub const UNKNOWN_REASON: &str = "unknown";

// ---------------------------------------------------------------------------
// ログファイルの構造（デシリアライズ用）
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct MatchLog {
    #[serde(default, alias = "meta")]
    pub config: MatchConfig,
    #[serde(default)]
    pub results: MatchResults,
    #[serde(default)]
    pub elo: Option<EloRatings>,
}

/// 対局設定。値の型は書き出し側によって揺れるのでそのまま保持する
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MatchConfig {
    #[serde(default)]
    pub php_depth: Option<Value>,
    #[serde(default)]
    pub external_type: Option<String>,
    #[serde(default)]
    pub external_depth: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MatchResults {
    #[serde(default)]
    pub games: Vec<GameRecord>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GameRecord {
    #[serde(default)]
    pub winner: Option<String>,
    #[serde(default)]
    pub moves: u32,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct EloRatings {
    pub php: f64,
    pub external: f64,
}

/// 勝者タグ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    Php,
    External,
    Draw,
}

impl Winner {
    pub fn from_tag(tag: &str) -> Option<Winner> {
        match tag {
            "PHP" => Some(Winner::Php),
            "External" => Some(Winner::External),
            "draw" => Some(Winner::Draw),
            _ => None,
        }
    }
}

impl GameRecord {
    pub fn winner(&self) -> Option<Winner> {
        self.winner.as_deref().and_then(Winner::from_tag)
    }

    pub fn reason(&self) -> &str {
        self.reason.as_deref().unwrap_or(UNKNOWN_REASON)
    }
}

// ---------------------------------------------------------------------------
// 読み込み
// ---------------------------------------------------------------------------

/// `dir` 直下の `*.json` をファイル名順に列挙する
pub fn collect_log_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let pattern = format!("{}/*.json", escaped.trim_end_matches('/'));
    let mut files = Vec::new();
    for entry in glob::glob(&pattern).with_context(|| format!("不正なパターン: {pattern}"))? {
        let path = entry.context("ディレクトリの走査に失敗")?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

pub fn read_match_log(path: &Path) -> Result<MatchLog> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("ファイルを開けません: {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("JSONパースエラー: {}", path.display()))
}

// ---------------------------------------------------------------------------
// 集計
// ---------------------------------------------------------------------------

/// 1ファイル分の集計
#[derive(Debug, Clone, Serialize)]
pub struct FileSummary {
    pub file: String,
    pub config: MatchConfig,
    pub games: u32,
    pub php_wins: u32,
    pub external_wins: u32,
    pub draws: u32,
    pub avg_moves: f64,
    pub end_reasons: BTreeMap<String, u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elo: Option<EloRatings>,
    #[serde(skip)]
    move_counts: Vec<u32>,
}

impl FileSummary {
    pub fn from_log(file: impl Into<String>, log: &MatchLog) -> FileSummary {
        let games = &log.results.games;
        let count = |w: Winner| games.iter().filter(|g| g.winner() == Some(w)).count() as u32;

        let move_counts: Vec<u32> = games.iter().map(|g| g.moves).collect();
        let avg_moves = average(&move_counts).unwrap_or(0.0);

        let mut end_reasons = BTreeMap::new();
        for game in games {
            *end_reasons.entry(game.reason().to_string()).or_insert(0) += 1;
        }

        FileSummary {
            file: file.into(),
            config: log.config.clone(),
            games: games.len() as u32,
            php_wins: count(Winner::Php),
            external_wins: count(Winner::External),
            draws: count(Winner::Draw),
            avg_moves,
            end_reasons,
            elo: log.elo,
            move_counts,
        }
    }

    /// PHP側の勝率（%）。対局が無ければ `None`
    pub fn php_win_rate(&self) -> Option<f64> {
        (self.games > 0).then(|| self.php_wins as f64 / self.games as f64 * 100.0)
    }

    /// 外部AI側の勝率（%）。対局が無ければ `None`
    pub fn external_win_rate(&self) -> Option<f64> {
        (self.games > 0).then(|| self.external_wins as f64 / self.games as f64 * 100.0)
    }
}

/// 手数の統計
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoveStats {
    pub avg: f64,
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReasonCount {
    pub reason: String,
    pub count: u32,
}

/// 全ファイルの集計結果
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub files: Vec<FileSummary>,
    pub total_games: u32,
    pub php_wins: u32,
    pub external_wins: u32,
    pub draws: u32,
    pub moves: Option<MoveStats>,
    /// 頻度降順（同数は理由名の昇順）
    pub end_reasons: Vec<ReasonCount>,
}

impl MatchReport {
    pub fn build(files: Vec<FileSummary>) -> MatchReport {
        let total_games = files.iter().map(|f| f.games).sum();
        let php_wins = files.iter().map(|f| f.php_wins).sum();
        let external_wins = files.iter().map(|f| f.external_wins).sum();
        let draws = files.iter().map(|f| f.draws).sum();

        let all_moves: Vec<u32> = files.iter().flat_map(|f| f.move_counts.iter().copied()).collect();
        let moves = match (average(&all_moves), all_moves.iter().min(), all_moves.iter().max()) {
            (Some(avg), Some(&min), Some(&max)) => Some(MoveStats { avg, min, max }),
            _ => None,
        };

        let mut reasons: BTreeMap<&str, u32> = BTreeMap::new();
        for file in &files {
            for (reason, count) in &file.end_reasons {
                *reasons.entry(reason.as_str()).or_insert(0) += count;
            }
        }
        let mut end_reasons: Vec<ReasonCount> = reasons
            .into_iter()
            .map(|(reason, count)| ReasonCount {
                reason: reason.to_string(),
                count,
            })
            .collect();
        // BTreeMap 由来の昇順を保ったまま安定ソート
        end_reasons.sort_by(|a, b| b.count.cmp(&a.count));

        MatchReport {
            files,
            total_games,
            php_wins,
            external_wins,
            draws,
            moves,
            end_reasons,
        }
    }

    /// 総対局数に対する割合（%）。0局のときも 0 除算しない
    pub fn percent(&self, count: u32) -> f64 {
        count as f64 / self.total_games.max(1) as f64 * 100.0
    }
}

fn average(values: &[u32]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: u64 = values.iter().map(|&v| u64::from(v)).sum();
    Some(sum as f64 / values.len() as f64)
}

/// 設定値の表示用文字列（未記録は `None`）
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "None".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(v) => v.to_string(),
    }
}
