//! # 体数据模型
//!
//! 规则网格上的实数或复数标量场，rank 3 为单个网格 `[nx, ny, nz]`，
//! rank 4 为堆叠网格 `[ngrids, nx, ny, nz]`（如自旋分辨密度）。
//!
//! ## 依赖关系
//! - 被 `xsf/datagrid.rs`, `parsers/chgcar.rs` 使用
//! - 使用 `ndarray` 存储稠密数组，`num-complex` 表示复数

use crate::error::{EphkitError, Result};

use ndarray::{concatenate, ArrayD, Axis, IxDyn};
use num_complex::Complex64;
use std::str::FromStr;

/// 复数数据的约化方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplexMode {
    /// 实部
    Re,
    /// 虚部
    Im,
    /// 模
    Abs,
}

impl FromStr for ComplexMode {
    type Err = EphkitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "re" => Ok(ComplexMode::Re),
            "im" => Ok(ComplexMode::Im),
            "abs" => Ok(ComplexMode::Abs),
            _ => Err(EphkitError::InvalidComplexMode {
                mode: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ComplexMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComplexMode::Re => write!(f, "re"),
            ComplexMode::Im => write!(f, "im"),
            ComplexMode::Abs => write!(f, "abs"),
        }
    }
}

impl ComplexMode {
    /// 对复数数组逐元素约化
    pub fn reduce(self, data: &ArrayD<Complex64>) -> ArrayD<f64> {
        match self {
            ComplexMode::Re => data.mapv(|c| c.re),
            ComplexMode::Im => data.mapv(|c| c.im),
            ComplexMode::Abs => data.mapv(|c| c.norm()),
        }
    }
}

/// 体数据
#[derive(Debug, Clone, PartialEq)]
pub enum VolumetricField {
    Real(ArrayD<f64>),
    Complex(ArrayD<Complex64>),
}

impl VolumetricField {
    pub fn ndim(&self) -> usize {
        match self {
            VolumetricField::Real(a) => a.ndim(),
            VolumetricField::Complex(a) => a.ndim(),
        }
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            VolumetricField::Real(a) => a.shape(),
            VolumetricField::Complex(a) => a.shape(),
        }
    }

    /// 转为实数数组：实数数据忽略 `cplx_mode`，复数数据必须提供
    pub fn to_real(&self, cplx_mode: Option<&str>) -> Result<ArrayD<f64>> {
        match self {
            VolumetricField::Real(a) => Ok(a.clone()),
            VolumetricField::Complex(a) => {
                let mode: ComplexMode = cplx_mode.ok_or(EphkitError::MissingComplexMode)?.parse()?;
                Ok(mode.reduce(a))
            }
        }
    }
}

/// 在最后三个轴上追加首个切片，得到周期闭合的 `(..., nx+1, ny+1, nz+1)` 数组
pub fn add_periodic_replicas<T: Clone>(data: &ArrayD<T>) -> Result<ArrayD<T>> {
    let ndim = data.ndim();
    if ndim < 3 {
        return Err(EphkitError::UnsupportedRank { ndim });
    }
    check_grid_not_empty(data.shape())?;

    let mut padded = data.clone();
    for ax in (ndim - 3)..ndim {
        let first = padded.index_axis(Axis(ax), 0).insert_axis(Axis(ax)).to_owned();
        let closed = concatenate(Axis(ax), &[padded.view(), first.view()])
            .map_err(|e| EphkitError::ShapeMismatch(e.to_string()))?;
        padded = closed;
    }

    Ok(padded)
}

/// 最后三个（网格）轴的长度必须非零
pub fn check_grid_not_empty(shape: &[usize]) -> Result<()> {
    let grid = &shape[shape.len().saturating_sub(3)..];
    if grid.contains(&0) {
        return Err(EphkitError::ShapeMismatch(format!(
            "grid axes must be non-empty, got shape {:?}",
            shape
        )));
    }
    Ok(())
}

/// 交换最后三个轴：`(..., x, y, z)` -> `(..., z, y, x)`
pub fn transpose_last3<T: Clone>(data: &ArrayD<T>) -> Result<ArrayD<T>> {
    let ndim = data.ndim();
    if ndim < 3 {
        return Err(EphkitError::UnsupportedRank { ndim });
    }

    let mut axes: Vec<usize> = (0..ndim).collect();
    axes.swap(ndim - 3, ndim - 1);

    Ok(data
        .view()
        .permuted_axes(IxDyn(&axes))
        .as_standard_layout()
        .into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{s, Array3};

    fn ramp(nx: usize, ny: usize, nz: usize) -> ArrayD<f64> {
        Array3::from_shape_fn((nx, ny, nz), |(i, j, k)| (100 * i + 10 * j + k) as f64).into_dyn()
    }

    #[test]
    fn test_complex_mode_parse() {
        assert_eq!("re".parse::<ComplexMode>().unwrap(), ComplexMode::Re);
        assert_eq!("IM".parse::<ComplexMode>().unwrap(), ComplexMode::Im);
        assert_eq!("Abs".parse::<ComplexMode>().unwrap(), ComplexMode::Abs);

        match "phase".parse::<ComplexMode>() {
            Err(EphkitError::InvalidComplexMode { mode }) => assert_eq!(mode, "phase"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_complex_reduction() {
        let data = ArrayD::from_shape_vec(
            IxDyn(&[1, 1, 2]),
            vec![Complex64::new(3.0, -4.0), Complex64::new(-1.0, 2.0)],
        )
        .unwrap();
        let field = VolumetricField::Complex(data);

        let re = field.to_real(Some("re")).unwrap();
        let im = field.to_real(Some("im")).unwrap();
        let abs = field.to_real(Some("abs")).unwrap();
        assert_eq!(re.as_slice().unwrap(), &[3.0, -1.0]);
        assert_eq!(im.as_slice().unwrap(), &[-4.0, 2.0]);
        assert!((abs[[0, 0, 0]] - 5.0).abs() < 1e-12);
        assert!((abs[[0, 0, 1]] - 5f64.sqrt()).abs() < 1e-12);

        assert!(matches!(
            field.to_real(None),
            Err(EphkitError::MissingComplexMode)
        ));
    }

    #[test]
    fn test_real_field_ignores_mode() {
        let field = VolumetricField::Real(ramp(2, 2, 2));
        assert_eq!(field.to_real(Some("bogus")).unwrap(), ramp(2, 2, 2));
    }

    #[test]
    fn test_periodic_replicas_rank3() {
        let data = ramp(2, 3, 4);
        let padded = add_periodic_replicas(&data).unwrap();

        assert_eq!(padded.shape(), &[3, 4, 5]);
        let p = padded.into_dimensionality::<ndarray::Ix3>().unwrap();
        assert_eq!(p.slice(s![2, .., ..]), p.slice(s![0, .., ..]));
        assert_eq!(p.slice(s![.., 3, ..]), p.slice(s![.., 0, ..]));
        assert_eq!(p.slice(s![.., .., 4]), p.slice(s![.., .., 0]));
        assert_eq!(p[[1, 2, 3]], 123.0);
    }

    #[test]
    fn test_periodic_replicas_rank4_keeps_leading_axis() {
        let data = ArrayD::<f64>::zeros(IxDyn(&[2, 3, 3, 3]));
        let padded = add_periodic_replicas(&data).unwrap();
        assert_eq!(padded.shape(), &[2, 4, 4, 4]);
    }

    #[test]
    fn test_transpose_last3() {
        let data = ramp(2, 3, 4);
        let t = transpose_last3(&data).unwrap();

        assert_eq!(t.shape(), &[4, 3, 2]);
        assert_eq!(t[[3, 2, 1]], data[[1, 2, 3]]);
    }

    #[test]
    fn test_low_rank_rejected() {
        let data = ArrayD::<f64>::zeros(IxDyn(&[4, 4]));
        assert!(matches!(
            add_periodic_replicas(&data),
            Err(EphkitError::UnsupportedRank { ndim: 2 })
        ));
    }

    #[test]
    fn test_empty_grid_axis_rejected() {
        for shape in [[0, 2, 2], [2, 0, 2], [2, 2, 0]] {
            let data = ArrayD::<f64>::zeros(IxDyn(&shape));
            assert!(matches!(
                add_periodic_replicas(&data),
                Err(EphkitError::ShapeMismatch(_))
            ));
        }

        // 前导网格轴为空不影响三个空间轴的检查
        assert!(check_grid_not_empty(&[0, 2, 2, 2]).is_ok());
        assert!(check_grid_not_empty(&[1, 2, 0, 2]).is_err());
    }
}
