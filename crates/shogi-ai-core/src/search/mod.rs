//! 指し手選択モジュール

mod selector;

pub use selector::{
    RulesEngine, SelectionReport, SelectorConfig, select_best, select_best_with_report,
};
