//! # VASP CHGCAR 格式解析器
//!
//! 读取 CHGCAR/PARCHG/LOCPOT 中的结构与第一个（总）体数据网格。
//!
//! ## CHGCAR 格式说明
//! ```text
//! <POSCAR block>
//!                          # blank line
//! nx ny nz
//! v v v v v                # nx*ny*nz values, x fastest, ρ·V
//! ...
//! augmentation occupancies ... / second spin block (ignored)
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/density.rs` 使用
//! - 使用 `parsers/poscar.rs` 解析结构部分

use crate::error::{EphkitError, Result};
use crate::models::Structure;
use crate::parsers::poscar;

use ndarray::{Array3, ShapeBuilder};
use std::fs;
use std::path::Path;

/// 解析 CHGCAR 文件
pub fn parse_chgcar_file(path: &Path) -> Result<(Structure, Array3<f64>)> {
    let content = fs::read_to_string(path).map_err(|e| EphkitError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_chgcar_content(
        &content,
        path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("CHGCAR"),
    )
}

/// 从字符串内容解析 CHGCAR，返回结构与 `[nx, ny, nz]` 密度（已除以体积）
pub fn parse_chgcar_content(content: &str, default_name: &str) -> Result<(Structure, Array3<f64>)> {
    let parse_error = |reason: String| EphkitError::ParseError {
        format: "chgcar".to_string(),
        path: default_name.to_string(),
        reason,
    };

    let lines: Vec<&str> = content.lines().collect();
    let (structure, consumed) = poscar::parse_poscar_lines(&lines, default_name)?;

    let mut rest = lines[consumed..]
        .iter()
        .skip_while(|l| l.trim().is_empty());

    let dims: Vec<usize> = rest
        .next()
        .ok_or_else(|| parse_error("Missing grid dimensions".to_string()))?
        .split_whitespace()
        .filter_map(|s| s.parse().ok())
        .collect();
    if dims.len() != 3 || dims.iter().any(|&n| n == 0) {
        return Err(parse_error(format!("Invalid grid dimensions: {:?}", dims)));
    }

    let npts = dims[0]
        .checked_mul(dims[1])
        .and_then(|n| n.checked_mul(dims[2]))
        .ok_or_else(|| parse_error(format!("Grid dimensions overflow: {:?}", dims)))?;
    // 预分配不超过文件中可能包含的数值个数
    let mut values = Vec::with_capacity(npts.min(content.len() / 2 + 1));
    for line in rest {
        for token in line.split_whitespace() {
            if values.len() == npts {
                break;
            }
            let v: f64 = token
                .parse()
                .map_err(|_| parse_error(format!("Invalid grid value '{}'", token)))?;
            values.push(v);
        }
        if values.len() == npts {
            break;
        }
    }

    if values.len() != npts {
        return Err(parse_error(format!(
            "Expected {} grid values, found {}",
            npts,
            values.len()
        )));
    }

    let volume = structure.lattice.volume().abs();
    let grid = Array3::from_shape_vec((dims[0], dims[1], dims[2]).f(), values)
        .map_err(|e| parse_error(e.to_string()))?
        .mapv(|v| v / volume);

    Ok((structure, grid))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHGCAR: &str = r#"Al
1.0
2.0 0.0 0.0
0.0 2.0 0.0
0.0 0.0 2.0
Al
1
Direct
0.0 0.0 0.0

  2  3  2
 8.0 16.0 24.0 32.0 40.0
 48.0 56.0 64.0 72.0 80.0
 88.0 96.0
augmentation occupancies 1 4
 0.1 0.2 0.3 0.4
"#;

    #[test]
    fn test_parse_chgcar_grid() {
        let (s, grid) = parse_chgcar_content(CHGCAR, "CHGCAR").unwrap();

        assert_eq!(s.atomic_numbers, vec![13]);
        assert_eq!(grid.dim(), (2, 3, 2));
        // x 变化最快：第二个值对应 (1, 0, 0)，除以体积 8
        assert_eq!(grid[[0, 0, 0]], 1.0);
        assert_eq!(grid[[1, 0, 0]], 2.0);
        assert_eq!(grid[[0, 1, 0]], 3.0);
        assert_eq!(grid[[0, 0, 1]], 7.0);
        assert_eq!(grid[[1, 2, 1]], 12.0);
    }

    #[test]
    fn test_parse_chgcar_huge_dimensions() {
        let huge = CHGCAR.replace("  2  3  2\n", "  100000 100000 100000\n");
        assert!(matches!(
            parse_chgcar_content(&huge, "CHGCAR"),
            Err(EphkitError::ParseError { .. })
        ));

        let overflow = CHGCAR.replace(
            "  2  3  2\n",
            &format!("  {} {} 2\n", usize::MAX, usize::MAX),
        );
        match parse_chgcar_content(&overflow, "CHGCAR") {
            Err(EphkitError::ParseError { reason, .. }) => assert!(reason.contains("overflow")),
            other => panic!("unexpected: {:?}", other.map(|(s, _)| s.name)),
        }
    }

    #[test]
    fn test_parse_chgcar_truncated() {
        let truncated = CHGCAR.split("augmentation").next().unwrap();
        let short = truncated.replace(" 88.0 96.0\n", "");
        assert!(matches!(
            parse_chgcar_content(&short, "CHGCAR"),
            Err(EphkitError::ParseError { .. })
        ));
    }
}
