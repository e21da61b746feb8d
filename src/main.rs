//! # ephkit 命令行入口
//!
//! ## 子命令
//! - `a2f` - α²F 分析与 Tc 估计
//! - `eph` - 按 q 点采样汇总
//! - `xsf` - 结构转换为 XSF
//! - `density` - CHGCAR 转换为 XSF 数据网格

use clap::Parser;
use ephkit::cli::Cli;
use ephkit::{commands, utils};

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
