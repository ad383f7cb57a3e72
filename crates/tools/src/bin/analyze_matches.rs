/// AI対局ログの集計ツール
///
/// 使い方:
///   # 既定のログディレクトリ（storage/app/private/ai_matches）
///   analyze_matches
///
///   # ディレクトリ指定
///   analyze_matches --dir /var/www/app/storage/app/private/ai_matches
///
///   # JSON出力モード
///   analyze_matches --json
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tools::match_log::{
    DEFAULT_LOG_DIR, FileSummary, MatchReport, collect_log_files, display_value, read_match_log,
};

#[derive(Parser)]
#[command(about = "AI対局結果の集計")]
struct Cli {
    /// ログディレクトリ（*.json を読む）
    #[arg(long, default_value = DEFAULT_LOG_DIR)]
    dir: PathBuf,

    /// JSON出力モード
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    let paths = collect_log_files(&cli.dir)?;
    if paths.is_empty() {
        println!("ログファイルが見つかりません");
        return Ok(());
    }

    let mut files = Vec::with_capacity(paths.len());
    for path in &paths {
        match read_match_log(path) {
            Ok(log) => {
                let name = path.file_name().map_or_else(
                    || path.display().to_string(),
                    |n| n.to_string_lossy().into_owned(),
                );
                files.push(FileSummary::from_log(name, &log));
            }
            Err(e) => log::warn!("スキップ: {e:#}"),
        }
    }
    let report = MatchReport::build(files);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(paths.len(), &report);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// テキスト出力
// ---------------------------------------------------------------------------

fn print_text(file_count: usize, report: &MatchReport) {
    println!("=== AI対局結果分析 ===");
    println!("ログファイル数: {file_count}");
    println!();

    for f in &report.files {
        println!("--- {} ---", f.file);
        println!("  ゲーム数: {}", f.games);
        println!(
            "  PHP depth: {}, External: {} depth={}",
            display_value(f.config.php_depth.as_ref()),
            f.config.external_type.as_deref().unwrap_or("None"),
            display_value(f.config.external_depth.as_ref()),
        );
        println!("  PHP勝: {}, External勝: {}, 引き分け: {}", f.php_wins, f.external_wins, f.draws);
        println!("  平均手数: {:.1}", f.avg_moves);
        let reasons: Vec<String> =
            f.end_reasons.iter().map(|(reason, count)| format!("{reason}: {count}")).collect();
        println!("  終局理由: {{{}}}", reasons.join(", "));
        if let Some(elo) = f.elo {
            println!("  Elo: PHP {:.2} / External {:.2}", elo.php, elo.external);
        }
        println!();
    }

    println!();
    println!("=== 全体統計 ===");
    println!("総ゲーム数: {}", report.total_games);
    println!("PHP勝: {} ({:.1}%)", report.php_wins, report.percent(report.php_wins));
    println!(
        "External勝: {} ({:.1}%)",
        report.external_wins,
        report.percent(report.external_wins)
    );
    println!("引き分け: {} ({:.1}%)", report.draws, report.percent(report.draws));

    if let Some(moves) = report.moves {
        println!();
        println!("平均手数: {:.1} (最小: {}, 最大: {})", moves.avg, moves.min, moves.max);
    }

    println!();
    println!("終局理由別統計:");
    for r in &report.end_reasons {
        println!("  {}: {} ({:.1}%)", r.reason, r.count, report.percent(r.count));
    }

    println!();
    println!("=== 設定別勝率 ===");
    for f in &report.files {
        let (Some(php), Some(ext)) = (f.php_win_rate(), f.external_win_rate()) else {
            continue;
        };
        let name: String = f.file.chars().take(30).collect();
        let external = f.config.external_type.as_deref().unwrap_or("None");
        println!("{name}: PHP {php:.0}% vs {external} {ext:.0}%");
    }
}
