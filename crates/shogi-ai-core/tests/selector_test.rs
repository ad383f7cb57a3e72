//! 指し手選択: 候補数の上限、同点時の先着優先、評価の符号

use shogi_ai_core::eval::{Evaluator, MaterialEvaluator};
use shogi_ai_core::movegen::MoveList;
use shogi_ai_core::search::{RulesEngine, SelectorConfig, select_best, select_best_with_report};
use shogi_ai_core::{Move, PieceType, Position, Square, Value};

/// 指定した評価値を持つ手を並べるだけの局面
struct ScriptedRules {
    scores: Vec<i32>,
    applied: Vec<Move>,
    do_count: usize,
}

impl ScriptedRules {
    fn new(scores: Vec<i32>) -> Self {
        assert!(scores.len() <= Square::NUM);
        Self { scores, applied: Vec::new(), do_count: 0 }
    }

    fn move_at(i: usize) -> Move {
        Move::new_drop(PieceType::Gold, Square::from_u8(i as u8).unwrap())
    }
}

impl RulesEngine for ScriptedRules {
    fn legal_moves(&self) -> MoveList {
        let mut list = MoveList::new();
        for i in 0..self.scores.len() {
            list.push(Self::move_at(i));
        }
        list
    }

    fn do_move(&mut self, m: Move) {
        self.do_count += 1;
        self.applied.push(m);
    }

    fn undo_move(&mut self, m: Move) {
        assert_eq!(self.applied.pop(), Some(m));
    }
}

struct ScriptedEval;

impl Evaluator<ScriptedRules> for ScriptedEval {
    fn evaluate(&self, pos: &ScriptedRules) -> Value {
        let last = pos.applied.last().expect("evaluated without a move applied");
        Value::new(pos.scores[last.to().index()])
    }
}

#[test]
fn test_only_first_50_candidates_are_examined() {
    // 最大値は51手目以降にある
    let mut scores: Vec<i32> = (0..60).map(|i| i % 10).collect();
    scores[55] = 100;
    let mut rules = ScriptedRules::new(scores);

    let report = select_best_with_report(&mut rules, &ScriptedEval, &SelectorConfig::default());

    assert_eq!(report.legal_moves, 60);
    assert_eq!(report.examined, 50);
    assert_eq!(rules.do_count, 50);
    assert_eq!(report.best_score, Some(Value::new(9)));
    // 同点の 9 のうち最初の手（10手目）
    assert_eq!(report.best_move, Some(ScriptedRules::move_at(9)));
    assert!(rules.applied.is_empty());
}

#[test]
fn test_candidate_limit_is_configurable() {
    let mut rules = ScriptedRules::new(vec![1, 2, 3, 4]);
    let config = SelectorConfig { max_candidates: 2 };
    assert_eq!(select_best(&mut rules, &ScriptedEval, &config), Some(ScriptedRules::move_at(1)));
}

#[test]
fn test_ties_keep_the_earliest_candidate() {
    let mut rules = ScriptedRules::new(vec![1, 5, 5, 3]);
    let best = select_best(&mut rules, &ScriptedEval, &SelectorConfig::default());
    assert_eq!(best, Some(ScriptedRules::move_at(1)));

    let mut rules = ScriptedRules::new(vec![-7; 12]);
    let best = select_best(&mut rules, &ScriptedEval, &SelectorConfig::default());
    assert_eq!(best, Some(ScriptedRules::move_at(0)));
}

#[test]
fn test_empty_move_list_selects_nothing() {
    let mut rules = ScriptedRules::new(Vec::new());
    let report = select_best_with_report(&mut rules, &ScriptedEval, &SelectorConfig::default());
    assert_eq!(report.best_move, None);
    assert_eq!(rules.do_count, 0);
}

#[test]
fn test_selection_is_deterministic() {
    let sfen = "ln1gk2nl/1r1s2gb1/p1ppppspp/1p4p2/9/2P1P4/PP1P1PPPP/1BG1S2R1/LNS1KG1NL b - 1";
    let first = {
        let mut pos = Position::from_sfen(sfen).unwrap();
        select_best(&mut pos, &MaterialEvaluator, &SelectorConfig::default())
    };
    for _ in 0..5 {
        let mut pos = Position::from_sfen(sfen).unwrap();
        assert_eq!(select_best(&mut pos, &MaterialEvaluator, &SelectorConfig::default()), first);
    }
    assert!(first.is_some());
}

#[test]
fn test_white_still_maximises_black_score() {
    // 後手番でも先手から見た評価を最大化するため、駒を取らない手が選ばれる
    let mut pos = Position::from_sfen("4k4/9/9/4r4/4G4/9/9/9/K8 w - 1").unwrap();
    let report = select_best_with_report(&mut pos, &MaterialEvaluator, &SelectorConfig::default());
    let best = report.best_move.unwrap();
    assert_ne!(best.to_usi(), "5d5e");
    assert_eq!(report.best_score, Some(Value::new(-5)));
}

#[test]
fn test_material_is_antisymmetric_under_mirroring() {
    let sfens = [
        "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1",
        "4k4/9/9/9/4+R4/9/9/9/4K4 w - 1",
        "8l/1l+R2P3/p2pBG1pp/kps1p4/Nn1P2G2/P1P1P2PP/1PS6/1KSG3+r1/LN2+p3L w Sbgn3p 124",
        "4k4/9/2s6/9/9/9/6+B2/9/4K4 b 3P 1",
    ];
    for sfen in sfens {
        let pos = Position::from_sfen(sfen).unwrap();
        let mirrored = pos.mirrored();
        assert_eq!(
            MaterialEvaluator.evaluate(&pos),
            -MaterialEvaluator.evaluate(&mirrored),
            "{sfen}"
        );
    }
}
