//! # VASP POSCAR 格式解析器
//!
//! 解析 VASP POSCAR/CONTCAR 文件格式，得到笛卡尔坐标与原子序数。
//!
//! ## POSCAR 格式说明
//! ```text
//! Comment line (structure name)
//! 1.0                    # scaling factor
//! a1 a2 a3               # lattice vector a
//! b1 b2 b3               # lattice vector b
//! c1 c2 c3               # lattice vector c
//! Element1 Element2 ...  # element symbols (VASP 5+, required)
//! n1 n2 ...              # number of atoms per element
//! Selective dynamics     # optional
//! Direct/Cartesian       # coordinate type
//! x1 y1 z1               # atom positions
//! ...
//! ```
//!
//! ## 依赖关系
//! - 被 `parsers/chgcar.rs`, `eph/file.rs`, `commands/xsf.rs` 使用
//! - 使用 `models/structure.rs`, `models/element.rs`

use crate::error::{EphkitError, Result};
use crate::models::{element, Lattice, Structure};
use std::fs;
use std::path::Path;

/// 解析 POSCAR/CONTCAR 文件
pub fn parse_poscar_file(path: &Path) -> Result<Structure> {
    let content = fs::read_to_string(path).map_err(|e| EphkitError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_poscar_content(
        &content,
        path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown"),
    )
}

/// 从字符串内容解析 POSCAR 格式
pub fn parse_poscar_content(content: &str, default_name: &str) -> Result<Structure> {
    let lines: Vec<&str> = content.lines().collect();
    let (structure, _) = parse_poscar_lines(&lines, default_name)?;
    Ok(structure)
}

/// 解析 POSCAR 行，返回结构以及已消耗的行数
pub(crate) fn parse_poscar_lines(lines: &[&str], default_name: &str) -> Result<(Structure, usize)> {
    let parse_error = |reason: String| EphkitError::ParseError {
        format: "poscar".to_string(),
        path: default_name.to_string(),
        reason,
    };

    if lines.len() < 8 {
        return Err(parse_error("File too short".to_string()));
    }

    // Line 0: Comment/name
    let name = match lines[0].trim() {
        "" => default_name.to_string(),
        n => n.to_string(),
    };

    // Line 1: 缩放因子，负值表示目标体积
    let scale: f64 = lines[1]
        .split_whitespace()
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| parse_error("Invalid scaling factor".to_string()))?;

    // Lines 2-4: Lattice vectors
    let mut matrix = [[0.0; 3]; 3];
    for (i, row) in matrix.iter_mut().enumerate() {
        let parts: Vec<f64> = lines[2 + i]
            .split_whitespace()
            .filter_map(|s| s.parse().ok())
            .collect();
        if parts.len() < 3 {
            return Err(parse_error(format!(
                "Invalid lattice vector at line {}",
                3 + i
            )));
        }
        *row = [parts[0], parts[1], parts[2]];
    }

    let scale = if scale < 0.0 {
        (-scale / Lattice::from_vectors(matrix).volume().abs()).cbrt()
    } else {
        scale
    };
    for row in matrix.iter_mut() {
        for x in row.iter_mut() {
            *x *= scale;
        }
    }
    let lattice = Lattice::from_vectors(matrix);

    // Line 5: Element symbols, line 6: counts
    let symbols: Vec<&str> = lines[5].split_whitespace().collect();
    if symbols.first().map_or(true, |s| s.parse::<usize>().is_ok()) {
        return Err(parse_error(
            "Element symbols line is required (VASP 5 format)".to_string(),
        ));
    }

    let numbers = symbols
        .iter()
        .map(|s| {
            element::atomic_number(s)
                .ok_or_else(|| parse_error(format!("Unknown element symbol '{}'", s)))
        })
        .collect::<Result<Vec<u32>>>()?;

    let counts: Vec<usize> = lines[6]
        .split_whitespace()
        .filter_map(|s| s.parse().ok())
        .collect();
    if counts.len() != numbers.len() {
        return Err(parse_error(format!(
            "{} element symbols but {} counts",
            numbers.len(),
            counts.len()
        )));
    }

    // Check for "Selective dynamics" line
    let mut coord_line = 7;
    if lines.len() > coord_line
        && lines[coord_line]
            .trim()
            .to_lowercase()
            .starts_with('s')
    {
        coord_line += 1;
    }

    if lines.len() <= coord_line {
        return Err(parse_error("Missing coordinate type line".to_string()));
    }

    let coord_type = lines[coord_line].trim().to_lowercase();
    let is_cartesian = coord_type.starts_with('c') || coord_type.starts_with('k');

    let natoms: usize = counts.iter().sum();
    let first = coord_line + 1;
    if lines.len() < first + natoms {
        return Err(parse_error(format!(
            "Expected {} atomic positions, found {}",
            natoms,
            lines.len().saturating_sub(first)
        )));
    }

    let mut atomic_numbers = Vec::with_capacity(natoms);
    let mut cart_coords = Vec::with_capacity(natoms);

    let species = numbers
        .iter()
        .zip(&counts)
        .flat_map(|(&z, &n)| std::iter::repeat(z).take(n));

    for (offset, z) in species.enumerate() {
        let parts: Vec<f64> = lines[first + offset]
            .split_whitespace()
            .take(3)
            .filter_map(|s| s.parse().ok())
            .collect();
        if parts.len() < 3 {
            return Err(parse_error(format!(
                "Invalid atomic position at line {}",
                first + offset + 1
            )));
        }

        let position = [parts[0], parts[1], parts[2]];
        let cart = if is_cartesian {
            [position[0] * scale, position[1] * scale, position[2] * scale]
        } else {
            lattice.frac_to_cart(position)
        };

        atomic_numbers.push(z);
        cart_coords.push(cart);
    }

    let structure = Structure::new(name, lattice, atomic_numbers, cart_coords)?;
    Ok((structure, first + natoms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_poscar_vasp5() {
        let content = r#"NaCl
1.0
5.64 0.0 0.0
0.0 5.64 0.0
0.0 0.0 5.64
Na Cl
4 4
Direct
0.0 0.0 0.0
0.5 0.5 0.0
0.5 0.0 0.5
0.0 0.5 0.5
0.5 0.0 0.0
0.0 0.5 0.0
0.0 0.0 0.5
0.5 0.5 0.5
"#;
        let s = parse_poscar_content(content, "NaCl").unwrap();
        assert_eq!(s.name, "NaCl");
        assert_eq!(s.num_sites(), 8);
        assert_eq!(s.atomic_numbers.iter().filter(|&&z| z == 11).count(), 4);
        assert_eq!(s.atomic_numbers[7], 17);
        assert!((s.cart_coords[7][2] - 2.82).abs() < 1e-12);
    }

    #[test]
    fn test_parse_poscar_with_scale_and_cartesian() {
        let content = r#"Si
2.0
2.0 0.0 0.0
0.0 2.0 0.0
0.0 0.0 2.0
Si
2
Cartesian
0.0 0.0 0.0
0.5 0.5 0.5
"#;
        let s = parse_poscar_content(content, "Si").unwrap();
        let (a, _, _, _, _, _) = s.lattice.parameters();

        assert!((a - 4.0).abs() < 1e-12);
        assert!((s.cart_coords[1][0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_parse_poscar_selective_dynamics() {
        let content = r#"Fe with selective
1.0
2.87 0.0 0.0
0.0 2.87 0.0
0.0 0.0 2.87
Fe_pv
2
Selective dynamics
Direct
0.0 0.0 0.0 T T T
0.5 0.5 0.5 F F F
"#;
        let s = parse_poscar_content(content, "Fe").unwrap();
        assert_eq!(s.atomic_numbers, vec![26, 26]);
        assert!((s.cart_coords[1][1] - 1.435).abs() < 1e-12);
    }

    #[test]
    fn test_parse_poscar_requires_symbols() {
        let content = "old\n1.0\n1 0 0\n0 1 0\n0 0 1\n1\nDirect\n0 0 0\n";
        assert!(matches!(
            parse_poscar_content(content, "old"),
            Err(EphkitError::ParseError { .. })
        ));
    }

    #[test]
    fn test_parse_poscar_truncated_positions() {
        let content = "Al\n1.0\n4.05 0 0\n0 4.05 0\n0 0 4.05\nAl\n4\nDirect\n0 0 0\n";
        assert!(parse_poscar_content(content, "Al").is_err());
    }
}
