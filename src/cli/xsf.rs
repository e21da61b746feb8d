//! # xsf / density 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/xsf.rs`, `commands/density.rs`

use clap::Args;
use std::path::PathBuf;

/// xsf 子命令参数
#[derive(Args, Debug)]
pub struct XsfArgs {
    /// Input: structure file or directory containing structure files
    pub input: PathBuf,

    /// Output: file (single/merge mode) or directory (batch mode)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Glob patterns for input files (batch mode, comma separated)
    #[arg(long, default_value = "POSCAR*,CONTCAR*,*.vasp")]
    pub pattern: String,

    /// Recurse into subdirectories (batch mode)
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    /// Number of parallel jobs (0 = auto, batch mode only)
    #[arg(short, long, env = "EPHKIT_JOBS", default_value_t = 0)]
    pub jobs: usize,

    /// Write all structures into one multi-frame XSF file
    #[arg(long, default_value_t = false)]
    pub merge: bool,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}

/// density 子命令参数
#[derive(Args, Debug)]
pub struct DensityArgs {
    /// CHGCAR / PARCHG / LOCPOT file
    pub input: PathBuf,

    /// Output XSF file (default: <input>.xsf)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Do not append periodic replicas to close the grid
    #[arg(long, default_value_t = false)]
    pub no_replicas: bool,
}
