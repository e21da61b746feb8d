//! # ephkit - 电声耦合后处理与 Xcrysden 文件工具
//!
//! ## 模块
//! - `eph`: α²F 谱函数分析（谱矩、λ、ω_log、McMillan Tc、反解 µ*）
//! - `xsf`: Xcrysden 结构、体数据、能带网格写出
//! - `models`: 晶格与结构、体数据、k 网格能带
//! - `parsers`: POSCAR / CHGCAR / α²F 文本读取
//!
//! ## 依赖关系
//! ```text
//! lib.rs
//!   ├── eph/      ──> parsers/, models/
//!   ├── xsf/      ──> models/
//!   ├── parsers/  ──> models/
//!   ├── batch/    (文件收集与并行执行)
//!   ├── cli/, commands/ (命令行)
//!   ├── utils/    (终端输出)
//!   └── error.rs  (错误处理)
//! ```

pub mod batch;
pub mod cli;
pub mod commands;
pub mod eph;
pub mod error;
pub mod models;
pub mod parsers;
pub mod utils;
pub mod xsf;

pub use error::{EphkitError, Result};
