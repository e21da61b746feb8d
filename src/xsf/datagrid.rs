//! # XSF 三维数据网格块
//!
//! ```text
//! BEGIN_BLOCK_DATAGRID_3D
//!  data
//!  BEGIN_DATAGRID_3Dgrid#1
//! nx ny nz
//! 0.000000 0.000000 0.000000      # origin
//! a1 a2 a3                        # lattice
//! ...
//! v(x=0..nx) for each (z, y), blank line between z-slices
//!  END_DATAGRID_3D
//! END_BLOCK_DATAGRID_3D
//! ```
//! Xcrysden 按 Fortran 顺序读取（x 最快），因此写出前把最后三个轴
//! 从 (x, y, z) 转置为 (z, y, x)。
//!
//! ## 依赖关系
//! - 被 `commands/density.rs` 使用
//! - 使用 `models/field.rs` 的补齐与转置

use crate::error::{EphkitError, Result};
use crate::models::field::{add_periodic_replicas, check_grid_not_empty, transpose_last3};
use crate::models::{Space, Structure, VolumetricField};

use ndarray::{ArrayD, Axis, Ix4};
use std::io::Write;

/// 写出体数据
///
/// - `add_replicas`: 在每个方向追加首个切片，得到周期闭合的网格
/// - `cplx_mode`: 复数数据必需，取值 "re" / "im" / "abs"（不区分大小写）
pub fn write_field<W: Write>(
    w: &mut W,
    structure: &Structure,
    field: &VolumetricField,
    add_replicas: bool,
    cplx_mode: Option<&str>,
) -> Result<()> {
    let ndim = field.ndim();
    if ndim != 3 && ndim != 4 {
        return Err(EphkitError::UnsupportedRank { ndim });
    }
    check_grid_not_empty(field.shape())?;

    let mut data = field.to_real(cplx_mode)?;
    if add_replicas {
        data = add_periodic_replicas(&data)?;
    }

    let grids = stack_grids(data)?;
    let shape = grids.shape().to_vec();
    let dims = [shape[1], shape[2], shape[3]];

    // (g, x, y, z) -> (g, z, y, x)
    let fdata = transpose_last3(&grids.into_dyn())?
        .into_dimensionality::<Ix4>()
        .map_err(|e| EphkitError::ShapeMismatch(e.to_string()))?;

    let cell = structure.lattice_vectors(Space::Real);

    writeln!(w, "BEGIN_BLOCK_DATAGRID_3D")?;
    writeln!(w, " data")?;

    for (dg, grid) in fdata.outer_iter().enumerate() {
        writeln!(w, " BEGIN_DATAGRID_3Dgrid#{}", dg + 1)?;
        writeln!(w, "{} {} {}", dims[0], dims[1], dims[2])?;

        writeln!(w, "{:.6} {:.6} {:.6}", 0.0, 0.0, 0.0)?;
        for row in &cell {
            writeln!(w, "{:.6} {:.6} {:.6}", row[0], row[1], row[2])?;
        }

        for zslice in grid.outer_iter() {
            for xrow in zslice.outer_iter() {
                let line = xrow
                    .iter()
                    .map(|v| format!("{:.6}", v))
                    .collect::<Vec<_>>()
                    .join(" ");
                writeln!(w, "{}", line)?;
            }
            writeln!(w)?;
        }

        writeln!(w, " END_DATAGRID_3D")?;
    }
    writeln!(w, "END_BLOCK_DATAGRID_3D")?;

    Ok(())
}

/// rank 3 数据加一个长度为 1 的网格轴，rank 4 原样返回
fn stack_grids(data: ArrayD<f64>) -> Result<ndarray::Array4<f64>> {
    let data = if data.ndim() == 3 {
        data.insert_axis(Axis(0))
    } else {
        data
    };

    data.into_dimensionality::<Ix4>()
        .map_err(|e| EphkitError::ShapeMismatch(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Lattice;
    use ndarray::{Array3, IxDyn};
    use num_complex::Complex64;

    fn cubic() -> Structure {
        let lattice = Lattice::from_vectors([[2.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 2.0]]);
        Structure::new("X", lattice, vec![1], vec![[0.0; 3]]).unwrap()
    }

    fn render(field: &VolumetricField, add_replicas: bool, mode: Option<&str>) -> Result<String> {
        let mut buf = Vec::new();
        write_field(&mut buf, &cubic(), field, add_replicas, mode)?;
        Ok(String::from_utf8(buf).unwrap())
    }

    /// 值 = 100x + 10y + z
    fn ramp(nx: usize, ny: usize, nz: usize) -> VolumetricField {
        VolumetricField::Real(
            Array3::from_shape_fn((nx, ny, nz), |(i, j, k)| (100 * i + 10 * j + k) as f64)
                .into_dyn(),
        )
    }

    #[test]
    fn test_single_grid_layout() {
        let text = render(&ramp(2, 2, 2), false, None).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "BEGIN_BLOCK_DATAGRID_3D");
        assert_eq!(lines[1], " data");
        assert_eq!(lines[2], " BEGIN_DATAGRID_3Dgrid#1");
        assert_eq!(lines[3], "2 2 2");
        assert_eq!(lines[4], "0.000000 0.000000 0.000000");
        assert_eq!(lines[5], "2.000000 0.000000 0.000000");
        // z=0: y=0, y=1 行，x 在行内变化
        assert_eq!(lines[8], "0.000000 100.000000");
        assert_eq!(lines[9], "10.000000 110.000000");
        assert_eq!(lines[10], "");
        assert_eq!(lines[11], "1.000000 101.000000");
        assert_eq!(lines[14], " END_DATAGRID_3D");
        assert_eq!(lines[15], "END_BLOCK_DATAGRID_3D");
    }

    #[test]
    fn test_replicas_extend_dimensions() {
        let text = render(&ramp(2, 3, 4), true, None).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[3], "3 4 5");
        // 第一行 (z=0, y=0)：x = 0, 1, 0(replica)
        assert_eq!(lines[8], "0.000000 100.000000 0.000000");
        // 5 个 z 切片，每个 4 行加空行
        assert_eq!(lines.len(), 8 + 5 * 5 + 2);
    }

    #[test]
    fn test_stacked_grids() {
        let data = ArrayD::from_shape_fn(IxDyn(&[2, 2, 2, 2]), |ix| ix[0] as f64);
        let text = render(&VolumetricField::Real(data), false, None).unwrap();

        assert!(text.contains(" BEGIN_DATAGRID_3Dgrid#1\n"));
        assert!(text.contains(" BEGIN_DATAGRID_3Dgrid#2\n"));
        assert_eq!(text.matches(" END_DATAGRID_3D\n").count(), 2);
        assert_eq!(text.matches("END_BLOCK_DATAGRID_3D").count(), 1);
    }

    #[test]
    fn test_complex_requires_mode() {
        let data = ArrayD::from_elem(IxDyn(&[2, 2, 2]), Complex64::new(1.0, -2.0));
        let field = VolumetricField::Complex(data);

        assert!(matches!(
            render(&field, true, None),
            Err(EphkitError::MissingComplexMode)
        ));
        match render(&field, true, Some("angle")) {
            Err(EphkitError::InvalidComplexMode { mode }) => assert_eq!(mode, "angle"),
            other => panic!("unexpected: {:?}", other),
        }

        let text = render(&field, false, Some("IM")).unwrap();
        assert!(text.contains("-2.000000 -2.000000\n"));
    }

    #[test]
    fn test_unsupported_rank_writes_nothing() {
        let field = VolumetricField::Real(ArrayD::zeros(IxDyn(&[4, 4])));
        let mut buf = Vec::new();

        let err = write_field(&mut buf, &cubic(), &field, true, None).unwrap_err();
        assert!(matches!(err, EphkitError::UnsupportedRank { ndim: 2 }));
        assert!(buf.is_empty());

        let field5 = VolumetricField::Real(ArrayD::zeros(IxDyn(&[1, 1, 2, 2, 2])));
        assert!(matches!(
            write_field(&mut buf, &cubic(), &field5, false, None),
            Err(EphkitError::UnsupportedRank { ndim: 5 })
        ));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_empty_grid_writes_nothing() {
        let field = VolumetricField::Real(ArrayD::zeros(IxDyn(&[0, 2, 2])));

        for add_replicas in [true, false] {
            let mut buf = Vec::new();
            let err = write_field(&mut buf, &cubic(), &field, add_replicas, None).unwrap_err();
            assert!(matches!(err, EphkitError::ShapeMismatch(_)));
            assert!(buf.is_empty());
        }
    }
}
