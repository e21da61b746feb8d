//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `eph/`, `xsf/`, `utils/`
//! - 子模块: a2f, eph, xsf, density

pub mod a2f;
pub mod density;
pub mod eph;
pub mod xsf;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::A2f(args) => a2f::execute(args),
        Commands::Eph(args) => eph::execute(args),
        Commands::Xsf(args) => xsf::execute(args),
        Commands::Density(args) => density::execute(args),
    }
}
