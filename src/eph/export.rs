//! # α²F 数据导出
//!
//! ## 支持格式
//! - α²F 曲线 CSV：omega, a2f_total, a2f_spin*, lambda_cumulative
//! - Tc(µ*) 表 CSV：mustar, tc, tc_kelvin
//!
//! ## 依赖关系
//! - 被 `commands/a2f.rs` 调用
//! - 使用 `csv` 库写入 CSV 文件

use crate::eph::{SpectralFunction, EV_TO_KELVIN};
use crate::error::{EphkitError, Result};

use std::path::Path;

/// 导出 α²F 曲线（从零频点 iw0 开始）为 CSV
pub fn a2f_to_csv(a2f: &SpectralFunction, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    let mut header = vec!["omega".to_string(), "a2f_total".to_string()];
    if a2f.nsppol() > 1 {
        header.extend((0..a2f.nsppol()).map(|s| format!("a2f_spin{}", s + 1)));
    }
    header.push("lambda_cumulative".to_string());
    wtr.write_record(&header)?;

    let iw0 = a2f.iw0();
    let total = a2f.values();
    let cumulative = a2f.get_moment_cumulative(1, None)?;
    let values_spin = a2f.values_spin();

    for (offset, (&w, lam)) in a2f.mesh()[iw0..].iter().zip(&cumulative).enumerate() {
        let i = iw0 + offset;
        let mut record = vec![format!("{:.8}", w), format!("{:.8e}", total[i])];
        if a2f.nsppol() > 1 {
            record.extend((0..a2f.nsppol()).map(|s| format!("{:.8e}", values_spin[[s, i]])));
        }
        record.push(format!("{:.8}", lam));
        wtr.write_record(&record)?;
    }

    wtr.flush().map_err(|e| EphkitError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 导出 Tc(µ*) 表为 CSV（Tc 同时以网格单位和 K 给出，假定网格为 eV）
pub fn tc_table_to_csv(table: &[(f64, f64)], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record(["mustar", "tc", "tc_kelvin"])?;
    for (mustar, tc) in table {
        wtr.write_record(&[
            format!("{:.4}", mustar),
            format!("{:.8e}", tc),
            format!("{:.4}", tc * EV_TO_KELVIN),
        ])?;
    }

    wtr.flush().map_err(|e| EphkitError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
