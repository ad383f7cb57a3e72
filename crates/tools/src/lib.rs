//! 対局ログ解析ツール群

pub mod match_log;
