//! # XSF 结构块
//!
//! ```text
//! CRYSTAL
//! # Primitive lattice vectors in Angstrom
//! PRIMVEC 1
//!  a1 a2 a3
//!  ...
//! # Cartesian coordinates in Angstrom.
//! PRIMCOORD 1
//!  natoms 1
//!  Z x y z
//! ```
//! 多个结构依次编号（从 1 开始），用于动画。受力列暂不输出。
//!
//! ## 依赖关系
//! - 被 `commands/xsf.rs`, `commands/density.rs` 使用

use crate::error::Result;
use crate::models::{Space, Structure};

use std::io::Write;

/// 写出单个结构
pub fn write_structure<W: Write>(w: &mut W, structure: &Structure) -> Result<()> {
    write_structures(w, std::slice::from_ref(structure))
}

/// 写出一组结构
pub fn write_structures<W: Write>(w: &mut W, structures: &[Structure]) -> Result<()> {
    writeln!(w, "CRYSTAL")?;

    for (n, structure) in structures.iter().enumerate() {
        let cell = structure.lattice_vectors(Space::Real);

        writeln!(w, "# Primitive lattice vectors in Angstrom")?;
        writeln!(w, "PRIMVEC {}", n + 1)?;
        for row in &cell {
            writeln!(w, " {:.14} {:.14} {:.14}", row[0], row[1], row[2])?;
        }

        writeln!(w, "# Cartesian coordinates in Angstrom.")?;
        writeln!(w, "PRIMCOORD {}", n + 1)?;
        writeln!(w, " {} 1", structure.num_sites())?;

        for (z, pos) in structure.atomic_numbers.iter().zip(&structure.cart_coords) {
            writeln!(w, " {:2} {:20.14} {:20.14} {:20.14}", z, pos[0], pos[1], pos[2])?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Lattice;

    fn cubic_al() -> Structure {
        let lattice = Lattice::from_vectors([[4.05, 0.0, 0.0], [0.0, 4.05, 0.0], [0.0, 0.0, 4.05]]);
        Structure::new("Al", lattice, vec![13], vec![[0.0, 0.0, 0.0]]).unwrap()
    }

    fn render(structures: &[Structure]) -> String {
        let mut buf = Vec::new();
        write_structures(&mut buf, structures).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_single_atom_cubic() {
        let text = render(&[cubic_al()]);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "CRYSTAL");
        assert_eq!(lines[2], "PRIMVEC 1");
        assert_eq!(lines[3], " 4.05000000000000 0.00000000000000 0.00000000000000");
        assert_eq!(lines[7], "PRIMCOORD 1");
        assert_eq!(lines[8], " 1 1");
        assert_eq!(
            lines[9].split_whitespace().collect::<Vec<_>>(),
            vec!["13", "0.00000000000000", "0.00000000000000", "0.00000000000000"]
        );
        assert_eq!(
            lines[9],
            " 13     0.00000000000000     0.00000000000000     0.00000000000000"
        );
        assert_eq!(lines.len(), 10);
    }

    #[test]
    fn test_multiple_frames_numbered() {
        let mut shifted = cubic_al();
        shifted.cart_coords[0] = [0.1, 0.0, -0.1];

        let text = render(&[cubic_al(), shifted]);
        assert_eq!(text.matches("CRYSTAL").count(), 1);
        assert!(text.contains("PRIMVEC 2\n"));
        assert!(text.contains("PRIMCOORD 2\n"));
        assert!(text.contains("    -0.10000000000000\n"));
    }

    #[test]
    fn test_forces_not_written() {
        let with_forces = cubic_al().with_forces(vec![[1.0, 2.0, 3.0]]).unwrap();
        assert_eq!(render(&[with_forces]), render(&[cubic_al()]));
    }
}
