//! # a2f / eph 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/a2f.rs`, `commands/eph.rs`

use crate::error::{EphkitError, Result};

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 图像输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum PlotFormat {
    /// PNG image
    Png,
    /// SVG vector image
    Svg,
}

impl std::fmt::Display for PlotFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlotFormat::Png => write!(f, "png"),
            PlotFormat::Svg => write!(f, "svg"),
        }
    }
}

// ─────────────────────────────────────────────────────────────
// a2f 子命令
// ─────────────────────────────────────────────────────────────

/// a2f 子命令参数
#[derive(Args, Debug)]
pub struct A2fArgs {
    /// a2F text file: columns "omega a2F_up [a2F_down]" with a "# nmodes: N" header (omega in eV)
    pub file: PathBuf,

    /// Coulomb pseudopotential mu* used for the McMillan Tc
    #[arg(short, long, env = "EPHKIT_MUSTAR", default_value_t = 0.1)]
    pub mustar: f64,

    /// Solve for the mu* that reproduces this Tc (in K)
    #[arg(long)]
    pub tc: Option<f64>,

    /// Scan Tc over a mu* range (e.g., "0.05-0.20")
    #[arg(long)]
    pub scan: Option<String>,

    /// Number of mu* points in the scan
    #[arg(long, default_value_t = 16)]
    pub steps: usize,

    /// Export a2F and cumulative lambda to CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Plot a2F (and Tc vs mu* when --scan is given) to this file
    #[arg(long)]
    pub plot: Option<PathBuf>,

    /// Plot format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<PlotFormat>,

    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 800)]
    pub height: u32,
}

// ─────────────────────────────────────────────────────────────
// eph 子命令
// ─────────────────────────────────────────────────────────────

/// eph 子命令参数
#[derive(Args, Debug)]
pub struct EphArgs {
    /// Directory holding <prefix>_A2F_QCOARSE.dat, <prefix>_A2F_QINTP.dat, ...
    pub dir: PathBuf,

    /// File name prefix of the a2F files
    #[arg(short, long, default_value = "out")]
    pub prefix: String,

    /// Coulomb pseudopotential mu* used for the McMillan Tc
    #[arg(short, long, env = "EPHKIT_MUSTAR", default_value_t = 0.1)]
    pub mustar: f64,
}

/// 解析 µ* 范围 "min-max"，要求 0 <= min < max < 1
pub fn parse_mustar_range(range: &str) -> Result<(f64, f64)> {
    let parts: Vec<&str> = range.split('-').collect();
    if parts.len() != 2 {
        return Err(EphkitError::InvalidRange(range.to_string()));
    }

    let min: f64 = parts[0]
        .trim()
        .parse()
        .map_err(|_| EphkitError::InvalidRange(range.to_string()))?;
    let max: f64 = parts[1]
        .trim()
        .parse()
        .map_err(|_| EphkitError::InvalidRange(range.to_string()))?;

    if min < 0.0 || max <= min || max >= 1.0 {
        return Err(EphkitError::InvalidRange(format!(
            "{} (must be 0 <= min < max < 1)",
            range
        )));
    }

    Ok((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mustar_range() {
        assert_eq!(parse_mustar_range("0.05-0.2").unwrap(), (0.05, 0.2));
        assert_eq!(parse_mustar_range("0 - 0.3").unwrap(), (0.0, 0.3));
    }

    #[test]
    fn test_parse_mustar_range_invalid() {
        for bad in ["0.1", "0.2-0.1", "0.1-1.5", "a-b", "0.1-0.2-0.3"] {
            assert!(
                matches!(parse_mustar_range(bad), Err(EphkitError::InvalidRange(_))),
                "{}",
                bad
            );
        }
    }
}
