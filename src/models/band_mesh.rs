//! # 全布里渊区能带网格
//!
//! 在完整（未约化）k 网格上的能带能量 `[nsppol, nband, n1, n2, n3]`，
//! 附带存储顺序、周期边界标志与网格平移。
//!
//! ## 依赖关系
//! - 被 `xsf/bandgrid.rs` 使用
//! - 使用 `ndarray` 存储能量

use crate::error::{EphkitError, Result};

use ndarray::{Array5, Axis};
use std::str::FromStr;

/// k 网格的展平顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshOrder {
    /// 行优先（最后一个下标变化最快）
    C,
    /// 列优先（第一个下标变化最快）
    Fortran,
}

impl FromStr for MeshOrder {
    type Err = EphkitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "c" => Ok(MeshOrder::C),
            "f" | "fortran" => Ok(MeshOrder::Fortran),
            _ => Err(EphkitError::InvalidMeshOrder(s.to_string())),
        }
    }
}

impl std::fmt::Display for MeshOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeshOrder::C => write!(f, "c"),
            MeshOrder::Fortran => write!(f, "f"),
        }
    }
}

/// 三维能带网格
#[derive(Debug, Clone)]
pub struct BandMesh3D {
    /// 能带能量 (eV)，形状 [nsppol, nband, n1, n2, n3]
    energies: Array5<f64>,
    /// 展平顺序
    pub order: MeshOrder,
    /// 各方向是否包含冗余的周期边界点
    pub pbc: [bool; 3],
    /// 网格平移（约化坐标）
    pub shifts: [f64; 3],
}

impl BandMesh3D {
    pub fn new(energies: Array5<f64>, order: MeshOrder, pbc: [bool; 3], shifts: [f64; 3]) -> Result<Self> {
        let nsppol = energies.len_of(Axis(0));
        if nsppol != 1 && nsppol != 2 {
            return Err(EphkitError::ShapeMismatch(format!(
                "nsppol must be 1 or 2, got {}",
                nsppol
            )));
        }

        Ok(BandMesh3D {
            energies,
            order,
            pbc,
            shifts,
        })
    }

    pub fn nsppol(&self) -> usize {
        self.energies.len_of(Axis(0))
    }

    pub fn nband(&self) -> usize {
        self.energies.len_of(Axis(1))
    }

    /// 网格点数 [n1, n2, n3]（含边界点）
    pub fn grid_shape(&self) -> [usize; 3] {
        let s = self.energies.shape();
        [s[2], s[3], s[4]]
    }

    pub fn energies(&self) -> &Array5<f64> {
        &self.energies
    }

    /// 给定 (spin, band) 的全网格能量，按网格自身顺序展平
    pub fn enebz(&self, spin: usize, band: usize) -> Result<Vec<f64>> {
        if spin >= self.nsppol() {
            return Err(EphkitError::SpinOutOfRange {
                spin,
                nsppol: self.nsppol(),
            });
        }
        if band >= self.nband() {
            return Err(EphkitError::InvalidArgument(format!(
                "band index {} out of range [0, {})",
                band,
                self.nband()
            )));
        }

        let grid = self
            .energies
            .index_axis(Axis(0), spin)
            .index_axis_move(Axis(0), band);

        Ok(match self.order {
            MeshOrder::C => grid.iter().copied().collect(),
            MeshOrder::Fortran => grid.reversed_axes().iter().copied().collect(),
        })
    }

    /// 检查 BANDGRID_3D 输出的前置条件
    pub fn check_bxsf_compatible(&self) -> Result<()> {
        if !self.pbc.iter().all(|&p| p) {
            return Err(EphkitError::BandMeshNotPeriodic);
        }

        if self.order != MeshOrder::C {
            return Err(EphkitError::BandMeshOrder {
                order: self.order.to_string(),
            });
        }

        if self.shifts.iter().any(|&s| s != 0.0) {
            return Err(EphkitError::BandMeshShifted {
                shifts: format!("{:?}", self.shifts),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mesh(order: MeshOrder) -> BandMesh3D {
        let energies = Array5::from_shape_fn((1, 2, 2, 2, 3), |(_, b, i, j, k)| {
            (1000 * b + 100 * i + 10 * j + k) as f64
        });
        BandMesh3D::new(energies, order, [true; 3], [0.0; 3]).unwrap()
    }

    #[test]
    fn test_mesh_order_parse() {
        assert_eq!("C".parse::<MeshOrder>().unwrap(), MeshOrder::C);
        assert_eq!("f".parse::<MeshOrder>().unwrap(), MeshOrder::Fortran);
        assert!(matches!(
            "z".parse::<MeshOrder>(),
            Err(EphkitError::InvalidMeshOrder(_))
        ));
    }

    #[test]
    fn test_enebz_native_order() {
        let c = mesh(MeshOrder::C).enebz(0, 1).unwrap();
        assert_eq!(&c[..4], &[1000.0, 1001.0, 1002.0, 1010.0]);

        let f = mesh(MeshOrder::Fortran).enebz(0, 1).unwrap();
        assert_eq!(&f[..4], &[1000.0, 1100.0, 1010.0, 1110.0]);
        assert_eq!(f.len(), 12);
    }

    #[test]
    fn test_enebz_bounds() {
        let m = mesh(MeshOrder::C);
        assert!(matches!(
            m.enebz(1, 0),
            Err(EphkitError::SpinOutOfRange { spin: 1, nsppol: 1 })
        ));
        assert!(m.enebz(0, 2).is_err());
    }

    #[test]
    fn test_bxsf_preconditions() {
        let mut m = mesh(MeshOrder::C);
        assert!(m.check_bxsf_compatible().is_ok());

        m.shifts = [0.5, 0.0, 0.0];
        assert!(matches!(
            m.check_bxsf_compatible(),
            Err(EphkitError::BandMeshShifted { .. })
        ));

        m.shifts = [0.0; 3];
        m.pbc = [true, false, true];
        assert!(matches!(
            m.check_bxsf_compatible(),
            Err(EphkitError::BandMeshNotPeriodic)
        ));

        let f = mesh(MeshOrder::Fortran);
        match f.check_bxsf_compatible() {
            Err(EphkitError::BandMeshOrder { order }) => assert_eq!(order, "f"),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
