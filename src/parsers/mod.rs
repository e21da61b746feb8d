//! # 解析器模块
//!
//! 将外部文本格式读入内存模型，供 `eph/` 与 `xsf/` 使用。
//!
//! ## 依赖关系
//! - 被 `commands/` 与 `eph/file.rs` 使用
//! - 使用 `models/` 数据模型
//! - 子模块: poscar, chgcar, a2f

pub mod a2f;
pub mod chgcar;
pub mod poscar;

use crate::error::{EphkitError, Result};
use crate::models::Structure;
use std::path::Path;

/// 从文件路径推断格式并解析结构
pub fn parse_structure_file(path: &Path) -> Result<Structure> {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    if name.starts_with("POSCAR") || name.starts_with("CONTCAR") || ext == "vasp" {
        poscar::parse_poscar_file(path)
    } else if name.starts_with("CHGCAR") || name.starts_with("PARCHG") || name.starts_with("LOCPOT") {
        chgcar::parse_chgcar_file(path).map(|(structure, _)| structure)
    } else {
        Err(EphkitError::UnsupportedFormat(format!(
            "Cannot determine format for: {}",
            path.display()
        )))
    }
}
