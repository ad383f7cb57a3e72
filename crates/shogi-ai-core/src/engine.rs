//! 1リクエスト分の指し手推薦
//!
//! 外部盤面の読み込み（不正なら平手初期局面）→ 指し手選択 → 外部表現への変換。
//! 呼び出し間で状態を共有しない。

use log::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::eval::MaterialEvaluator;
use crate::position::{Position, load_position, position_or_startpos};
use crate::search::{SelectorConfig, select_best_with_report};
use crate::types::{AiResponse, MoveJson};

/// エンジン設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// 探索深さ（受け付けるが指し手選択には使わない）
    pub depth: i32,
    /// 指し手選択の設定
    pub selector: SelectorConfig,
    /// 盤面が不正なとき平手初期局面で代替するか
    pub fallback_to_startpos: bool,
}

impl EngineConfig {
    pub const DEFAULT_DEPTH: i32 = 3;

    /// 深さを指定した設定
    pub fn with_depth(depth: i32) -> Self {
        Self { depth, ..Self::default() }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: Self::DEFAULT_DEPTH,
            selector: SelectorConfig::default(),
            fallback_to_startpos: true,
        }
    }
}

/// 指し手推薦エンジン
#[derive(Debug, Clone, Default)]
pub struct ShogiAi {
    config: EngineConfig,
    evaluator: MaterialEvaluator,
}

impl ShogiAi {
    pub fn new(config: EngineConfig) -> Self {
        Self { config, evaluator: MaterialEvaluator }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// 外部盤面の JSON から局面を用意する
    fn prepare(&self, board_state: &serde_json::Value) -> EngineResult<Position> {
        if self.config.fallback_to_startpos {
            Ok(position_or_startpos(board_state))
        } else {
            Ok(load_position(board_state)?)
        }
    }

    /// 最善手を外部表現で返す
    pub fn best_move(&self, board_state: &serde_json::Value) -> EngineResult<MoveJson> {
        let mut pos = self.prepare(board_state)?;
        debug!("position: {} (depth {} is not used)", pos.to_sfen(), self.config.depth);

        let report = select_best_with_report(&mut pos, &self.evaluator, &self.config.selector);
        info!(
            "examined {}/{} moves, best {:?} score {:?}",
            report.examined,
            report.legal_moves,
            report.best_move.map(|m| m.to_usi()),
            report.best_score.map(|v| v.raw()),
        );

        let best = report.best_move.ok_or(EngineError::NoLegalMove)?;
        Ok(pos.move_to_json(best))
    }

    /// 応答エンベロープを返す
    pub fn respond(&self, board_state: &serde_json::Value) -> AiResponse {
        match self.best_move(board_state) {
            Ok(mv) => AiResponse::ok(mv),
            Err(e) => AiResponse::failure(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.depth, 3);
        assert_eq!(config.selector.max_candidates, 50);
        assert!(config.fallback_to_startpos);
        assert_eq!(EngineConfig::with_depth(7).depth, 7);
    }

    #[test]
    fn test_depth_does_not_change_result() {
        let state = Position::hirate().to_board_state_json();
        let state = serde_json::to_value(state).unwrap();
        let a = ShogiAi::new(EngineConfig::with_depth(1)).best_move(&state).unwrap();
        let b = ShogiAi::new(EngineConfig::with_depth(9)).best_move(&state).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_strict_mode_reports_malformed_input() {
        let config = EngineConfig { fallback_to_startpos: false, ..EngineConfig::default() };
        let err = ShogiAi::new(config).best_move(&json!({"board": "x"})).unwrap_err();
        assert!(matches!(err, EngineError::Malformed(_)));
    }

    #[test]
    fn test_respond_no_legal_move() {
        let pos = Position::from_sfen("8k/8G/8P/9/9/9/9/9/4K4 w - 1").unwrap();
        let state = serde_json::to_value(pos.to_board_state_json()).unwrap();
        let response = ShogiAi::default().respond(&state);
        assert_eq!(response, AiResponse::failure("No legal move found"));
    }
}
