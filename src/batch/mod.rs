//! # 批量处理模块
//!
//! 收集结构文件并并行转换，附带进度反馈与统计。
//!
//! ## 依赖关系
//! - 被 `commands/xsf.rs` 使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod runner;

pub use collector::FileCollector;
pub use runner::{BatchResult, BatchRunner, ProcessResult};
