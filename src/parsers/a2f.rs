//! # α²F(ω) 文本格式解析器
//!
//! ## 格式说明
//! ```text
//! # nmodes: 3              # 必需：声子支数
//! # omega(eV)  a2F_up  [a2F_down]
//! 0.0000  0.0000
//! 0.0001  0.0012
//! ...
//! ```
//! 以 `#` 开头的行为注释；第一列为频率，其余一或两列为各自旋通道的 α²F。
//!
//! ## 依赖关系
//! - 被 `eph/file.rs`, `commands/a2f.rs` 使用
//! - 使用 `regex` 解析头部

use crate::eph::SpectralFunction;
use crate::error::{EphkitError, Result};

use ndarray::Array2;
use regex::Regex;
use std::fs;
use std::path::Path;

/// 解析 α²F 文件
pub fn parse_a2f_file(path: &Path) -> Result<SpectralFunction> {
    let content = fs::read_to_string(path).map_err(|e| EphkitError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_a2f_content(&content, &path.display().to_string())
}

/// 从字符串内容解析 α²F
pub fn parse_a2f_content(content: &str, source: &str) -> Result<SpectralFunction> {
    let parse_error = |reason: String| EphkitError::ParseError {
        format: "a2f".to_string(),
        path: source.to_string(),
        reason,
    };

    let nmodes_re = Regex::new(r"(?i)nmodes\s*[:=]\s*(\d+)").expect("valid regex");

    let mut nmodes = None;
    let mut mesh = Vec::new();
    let mut columns: Vec<Vec<f64>> = Vec::new();

    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(comment) = line.strip_prefix('#') {
            if let Some(caps) = nmodes_re.captures(comment) {
                nmodes = caps[1].parse::<usize>().ok();
            }
            continue;
        }

        let values: Vec<f64> = line
            .split_whitespace()
            .map(|s| s.parse::<f64>())
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| parse_error(format!("line {}: {}", lineno + 1, e)))?;

        let nsppol = values.len().saturating_sub(1);
        if nsppol == 0 || nsppol > 2 {
            return Err(parse_error(format!(
                "line {}: expected 2 or 3 columns, got {}",
                lineno + 1,
                values.len()
            )));
        }

        if columns.is_empty() {
            columns = vec![Vec::new(); nsppol];
        } else if columns.len() != nsppol {
            return Err(parse_error(format!(
                "line {}: inconsistent number of spin columns",
                lineno + 1
            )));
        }

        mesh.push(values[0]);
        for (col, v) in columns.iter_mut().zip(&values[1..]) {
            col.push(*v);
        }
    }

    let nmodes = nmodes.ok_or_else(|| parse_error("missing '# nmodes: N' header".to_string()))?;

    if mesh.is_empty() {
        return Err(parse_error("no data rows".to_string()));
    }

    let nsppol = columns.len();
    let flat: Vec<f64> = columns.into_iter().flatten().collect();
    let values_spin = Array2::from_shape_vec((nsppol, mesh.len()), flat)
        .map_err(|e| parse_error(e.to_string()))?;

    SpectralFunction::new(mesh, values_spin, nmodes)
}
