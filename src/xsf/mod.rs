//! # Xcrysden 文件写出
//!
//! 将内存中的结构、体数据和能带网格写成 Xcrysden 文本格式。
//! 所有写出器只依赖 `std::io::Write`，输入校验均在写出任何字节之前完成。
//!
//! ## 子模块
//! - `structure`: CRYSTAL / PRIMVEC / PRIMCOORD 块
//! - `datagrid`: BEGIN_BLOCK_DATAGRID_3D 块
//! - `bandgrid`: BEGIN_BLOCK_BANDGRID_3D（.bxsf）
//!
//! ## 依赖关系
//! - 被 `commands/xsf.rs`, `commands/density.rs` 使用
//! - 使用 `models/`

pub mod bandgrid;
pub mod datagrid;
pub mod structure;

pub use bandgrid::write_band_grid;
pub use datagrid::write_field;
pub use structure::{write_structure, write_structures};

/// 仿照 `%.{prec}e` 的科学计数法：尾数后跟带符号、至少两位的指数
pub(crate) fn format_sci(value: f64, prec: usize) -> String {
    python_exponent(&format!("{:.*e}", prec, value))
}

/// 与 Python `str(float)` 一致的最短表示：`5.25`, `2.0`, `1e+20`, `1.5e-05`
pub(crate) fn format_py_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let abs = value.abs();
    if abs != 0.0 && !(1e-4..1e16).contains(&abs) {
        python_exponent(&format!("{:e}", value))
    } else {
        format!("{:?}", value)
    }
}

/// `1.5e-5` -> `1.5e-05`
fn python_exponent(s: &str) -> String {
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exp.abs())
        }
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_sci() {
        assert_eq!(format_sci(1.5, 3), "1.500e+00");
        assert_eq!(format_sci(-0.00125, 2), "-1.25e-03");
        assert_eq!(format_sci(6.02e23, 1), "6.0e+23");
        assert_eq!(format_sci(0.0, 18), "0.000000000000000000e+00");
    }

    #[test]
    fn test_format_py_float() {
        assert_eq!(format_py_float(5.25), "5.25");
        assert_eq!(format_py_float(2.0), "2.0");
        assert_eq!(format_py_float(0.0), "0.0");
        assert_eq!(format_py_float(0.0001), "0.0001");
        assert_eq!(format_py_float(1e20), "1e+20");
        assert_eq!(format_py_float(1.5e-5), "1.5e-05");
        assert_eq!(format_py_float(-3e-7), "-3e-07");
        assert_eq!(format_py_float(1e16), "1e+16");
        assert_eq!(format_py_float(f64::NAN), "nan");
    }
}
