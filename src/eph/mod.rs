//! # 电声耦合后处理模块
//!
//! α²F(ω) 谱分析与超导临界温度估计。
//!
//! ## 子模块
//! - `a2f`: 谱函数、谱矩、McMillan Tc、反解 µ*
//! - `file`: 按 q 点采样组织的计算结果容器
//! - `export`: CSV 数据导出
//! - `plot`: 图表生成
//!
//! ## 依赖关系
//! - 被 `commands/a2f.rs`, `commands/eph.rs` 使用
//! - 使用 `parsers/a2f.rs` 读取文本数据

pub mod a2f;
pub mod export;
pub mod file;
pub mod plot;

pub use a2f::{SpectralFunction, EV_TO_KELVIN};
pub use file::{EphFile, QSampling};
