//! Telecare の各パッケージで共有するユーティリティ。
//!
//! - `logger`: tracing subscriber の初期化
//! - `time`: UTC タイムスタンプとテスト用の Clock 抽象

pub mod logger;
pub mod time;
