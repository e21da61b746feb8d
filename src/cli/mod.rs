//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `a2f`: 单个 α²F 文件分析（λ, ω_log, Tc, µ* 扫描）
//! - `eph`: 按 q 点采样汇总一次计算的全部 α²F
//! - `xsf`: 结构文件批量转换为 XSF
//! - `density`: CHGCAR 转换为 XSF 数据网格
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: a2f, xsf

pub mod a2f;
pub mod xsf;

use clap::{Parser, Subcommand};

/// ephkit - 电声耦合后处理与 Xcrysden 文件工具
#[derive(Parser)]
#[command(name = "ephkit")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Electron-phonon a2F analysis and Xcrysden file writers", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Analyze an Eliashberg function a2F(w): lambda, omega_log, McMillan Tc
    A2f(a2f::A2fArgs),

    /// Summarize all a2F samplings of an electron-phonon run
    Eph(a2f::EphArgs),

    /// Convert structure files (POSCAR/CONTCAR) to Xcrysden XSF
    Xsf(xsf::XsfArgs),

    /// Convert a CHGCAR volumetric grid to an XSF DATAGRID_3D file
    Density(xsf::DensityArgs),
}
