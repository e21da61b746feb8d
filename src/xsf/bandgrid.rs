//! # BXSF 能带网格（费米面可视化）
//!
//! ```text
//! BEGIN_INFO
//!   ... banner ...
//!  Fermi Energy: <ef>
//! END_INFO
//!
//! BEGIN_BLOCK_BANDGRID_3D
//!  band_energies
//!  BEGIN_BANDGRID_3D
//! nsppol*nband
//! n1 n2 n3
//! 0 0 0
//! b1 / b2 / b3 (Å⁻¹)
//!  BAND: 1
//! e ...
//!  END_BANDGRID_3D
//! END_BLOCK_BANDGRID_3D
//! ```
//! 仅支持含冗余周期点、C 顺序、Γ 中心的 k 网格。
//!
//! ## 依赖关系
//! - 使用 `models/band_mesh.rs`, `models/structure.rs`

use crate::error::Result;
use crate::models::{BandMesh3D, Space, Structure};
use crate::xsf::{format_py_float, format_sci};

use std::io::Write;

/// 写出 .bxsf 能带网格，完成后 flush
pub fn write_band_grid<W: Write>(
    w: &mut W,
    band_mesh: &BandMesh3D,
    structure: &Structure,
    fermi_energy: f64,
) -> Result<()> {
    band_mesh.check_bxsf_compatible()?;

    writeln!(w, "BEGIN_INFO")?;
    writeln!(w, "# Band-XCRYSDEN-Structure-File for Visualization of Fermi Surface generated by the ABINIT package")?;
    writeln!(w, "# NOTE: the first band is relative to spin-up electrons,")?;
    writeln!(w, "#       the second band to spin-down electrons (if any) and so on ...\n#")?;
    writeln!(w, "# Launch as: xcrysden --bxsf\n#")?;
    writeln!(w, " Fermi Energy: {}", format_py_float(fermi_energy))?;
    writeln!(w, "END_INFO\n")?;
    writeln!(w, "BEGIN_BLOCK_BANDGRID_3D")?;
    writeln!(w, " band_energies")?;
    writeln!(w, " BEGIN_BANDGRID_3D")?;

    let (nsppol, nband) = (band_mesh.nsppol(), band_mesh.nband());
    let [n1, n2, n3] = band_mesh.grid_shape();

    writeln!(w, "{}", nsppol * nband)?;
    writeln!(w, "{} {} {}", n1, n2, n3)?;
    writeln!(w, "0 0 0")?;

    for row in &structure.lattice_vectors(Space::Reciprocal) {
        writeln!(w, "{:.6} {:.6} {:.6}", row[0], row[1], row[2])?;
    }

    // 能带在外、自旋在内
    let mut idx = 0;
    for band in 0..nband {
        for spin in 0..nsppol {
            idx += 1;
            writeln!(w, " BAND: {}", idx)?;
            for e in band_mesh.enebz(spin, band)? {
                writeln!(w, "{}", format_sci(e, 18))?;
            }
        }
    }

    writeln!(w, " END_BANDGRID_3D")?;
    writeln!(w, "END_BLOCK_BANDGRID_3D")?;

    w.flush()?;
    Ok(())
}
