//! 1手読みの指し手選択
//!
//! 合法手を生成順に先頭から最大 `max_candidates` 手まで調べ、指した後の局面を評価して
//! 最大値の手を選ぶ。比較は厳密な `>` なので同点なら先に調べた手が残る。
//! 評価値は手番に関係なく先手から見た値のまま最大化する。

use log::trace;

use crate::eval::Evaluator;
use crate::movegen::MoveList;
use crate::position::Position;
use crate::types::{Move, Value};

/// 指し手選択に必要なルールエンジンの操作
pub trait RulesEngine {
    /// 手番側の合法手（決定的な順序）
    fn legal_moves(&self) -> MoveList;
    /// 指し手を実行
    fn do_move(&mut self, m: Move);
    /// 指し手を戻す（直前の do_move と対になる）
    fn undo_move(&mut self, m: Move);
}

impl RulesEngine for Position {
    fn legal_moves(&self) -> MoveList {
        Position::legal_moves(self)
    }

    fn do_move(&mut self, m: Move) {
        Position::do_move(self, m);
    }

    fn undo_move(&mut self, m: Move) {
        Position::undo_move(self, m);
    }
}

/// 指し手選択の設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorConfig {
    /// 評価する候補手の上限（生成順の先頭から）
    pub max_candidates: usize,
}

impl SelectorConfig {
    pub const DEFAULT_MAX_CANDIDATES: usize = 50;
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self { max_candidates: Self::DEFAULT_MAX_CANDIDATES }
    }
}

/// 指し手選択の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionReport {
    /// 選ばれた手（合法手がなければNone）
    pub best_move: Option<Move>,
    /// 選ばれた手を指した後の評価値
    pub best_score: Option<Value>,
    /// 合法手の総数
    pub legal_moves: usize,
    /// 実際に評価した手の数
    pub examined: usize,
}

/// 最善手を選ぶ
pub fn select_best<P, E>(pos: &mut P, eval: &E, config: &SelectorConfig) -> Option<Move>
where
    P: RulesEngine,
    E: Evaluator<P> + ?Sized,
{
    select_best_with_report(pos, eval, config).best_move
}

/// 最善手を選び、調べた手数などを併せて返す
pub fn select_best_with_report<P, E>(
    pos: &mut P,
    eval: &E,
    config: &SelectorConfig,
) -> SelectionReport
where
    P: RulesEngine,
    E: Evaluator<P> + ?Sized,
{
    let moves = pos.legal_moves();
    let mut best: Option<(Move, Value)> = None;
    let mut examined = 0;

    for &m in moves.iter().take(config.max_candidates) {
        pos.do_move(m);
        let score = eval.evaluate(pos);
        pos.undo_move(m);
        examined += 1;

        trace!("candidate {} score {}", m.to_usi(), score);
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((m, score));
        }
    }

    SelectionReport {
        best_move: best.map(|(m, _)| m),
        best_score: best.map(|(_, v)| v),
        legal_moves: moves.len(),
        examined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::MaterialEvaluator;
    use crate::position::SFEN_HIRATE;

    #[test]
    fn test_hirate_picks_first_generated_move() {
        let mut pos = Position::from_sfen(SFEN_HIRATE).unwrap();
        let report = select_best_with_report(&mut pos, &MaterialEvaluator, &SelectorConfig::default());
        assert_eq!(report.best_move.map(|m| m.to_usi()).as_deref(), Some("1g1f"));
        assert_eq!(report.best_score, Some(Value::ZERO));
        assert_eq!(report.legal_moves, 30);
        assert_eq!(report.examined, 30);
    }

    #[test]
    fn test_capture_is_preferred() {
        // 先手の飛車で後手の金を取れる
        let mut pos = Position::from_sfen("4k4/9/9/9/4g4/9/9/9/K3R4 b - 1").unwrap();
        let best = select_best(&mut pos, &MaterialEvaluator, &SelectorConfig::default());
        assert_eq!(best.map(|m| m.to_usi()).as_deref(), Some("5i5e"));
    }

    #[test]
    fn test_position_is_restored() {
        let mut pos = Position::from_sfen("4k4/9/9/9/4g4/9/9/9/K3R4 b P 1").unwrap();
        let before = pos.clone();
        select_best(&mut pos, &MaterialEvaluator, &SelectorConfig::default());
        assert_eq!(pos, before);
    }

    #[test]
    fn test_no_legal_move() {
        let mut pos = Position::from_sfen("8k/8G/8P/9/9/9/9/9/4K4 w - 1").unwrap();
        let report = select_best_with_report(&mut pos, &MaterialEvaluator, &SelectorConfig::default());
        assert_eq!(report.best_move, None);
        assert_eq!(report.best_score, None);
        assert_eq!(report.examined, 0);
    }
}
