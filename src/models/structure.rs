//! # 晶体结构数据模型
//!
//! XSF 写出器所需的只读晶体结构：实空间/倒空间晶格向量、
//! 笛卡尔坐标（Å）与原子序数。
//!
//! ## 依赖关系
//! - 被 `parsers/` 和 `xsf/` 使用
//! - 使用 `models/element.rs` 生成化学式

use crate::error::{EphkitError, Result};
use crate::models::element;

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// 晶格向量所在空间
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Space {
    /// 实空间 (Å)
    Real,
    /// 倒空间 (Å⁻¹，包含 2π 因子)
    Reciprocal,
}

/// 晶格参数表示
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lattice {
    /// 晶格向量矩阵 (3x3)，行向量表示 a, b, c
    pub matrix: [[f64; 3]; 3],
}

impl Lattice {
    /// 从晶格参数 (a, b, c, alpha, beta, gamma) 创建晶格
    /// 角度单位：度
    pub fn from_parameters(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Self {
        let (cos_alpha, cos_beta) = (alpha.to_radians().cos(), beta.to_radians().cos());
        let (sin_gamma, cos_gamma) = gamma.to_radians().sin_cos();

        let c1 = c * cos_beta;
        let c2 = c * (cos_alpha - cos_beta * cos_gamma) / sin_gamma;
        let c3 = (c * c - c1 * c1 - c2 * c2).sqrt();

        Lattice {
            matrix: [
                [a, 0.0, 0.0],
                [b * cos_gamma, b * sin_gamma, 0.0],
                [c1, c2, c3],
            ],
        }
    }

    /// 从晶格向量矩阵创建
    pub fn from_vectors(matrix: [[f64; 3]; 3]) -> Self {
        Lattice { matrix }
    }

    /// 获取晶格参数 (a, b, c, alpha, beta, gamma)
    pub fn parameters(&self) -> (f64, f64, f64, f64, f64, f64) {
        let [a_vec, b_vec, c_vec] = self.matrix;
        let (a, b, c) = (norm(&a_vec), norm(&b_vec), norm(&c_vec));

        let alpha = (dot(&b_vec, &c_vec) / (b * c)).acos().to_degrees();
        let beta = (dot(&a_vec, &c_vec) / (a * c)).acos().to_degrees();
        let gamma = (dot(&a_vec, &b_vec) / (a * b)).acos().to_degrees();

        (a, b, c, alpha, beta, gamma)
    }

    /// 晶胞体积（带符号，右手系为正）
    pub fn volume(&self) -> f64 {
        let [a, b, c] = self.matrix;
        dot(&a, &cross(&b, &c))
    }

    /// 倒格矢：b1 = 2π(b×c)/V, b2 = 2π(c×a)/V, b3 = 2π(a×b)/V
    pub fn reciprocal(&self) -> Lattice {
        let [a, b, c] = self.matrix;
        let volume = self.volume();
        if volume.abs() < 1e-10 {
            return Lattice::from_vectors([[0.0; 3]; 3]);
        }

        let factor = 2.0 * PI / volume;
        let scale = |v: [f64; 3]| [v[0] * factor, v[1] * factor, v[2] * factor];

        Lattice::from_vectors([
            scale(cross(&b, &c)),
            scale(cross(&c, &a)),
            scale(cross(&a, &b)),
        ])
    }

    /// 分数坐标转笛卡尔坐标
    pub fn frac_to_cart(&self, frac: [f64; 3]) -> [f64; 3] {
        let m = self.matrix;
        [
            frac[0] * m[0][0] + frac[1] * m[1][0] + frac[2] * m[2][0],
            frac[0] * m[0][1] + frac[1] * m[1][1] + frac[2] * m[2][1],
            frac[0] * m[0][2] + frac[1] * m[1][2] + frac[2] * m[2][2],
        ]
    }

    /// 笛卡尔坐标转分数坐标
    ///
    /// 利用 frac_i = (cart · b_i) / 2π，b_i 为倒格矢。
    pub fn cart_to_frac(&self, cart: [f64; 3]) -> [f64; 3] {
        let g = self.reciprocal().matrix;
        [
            dot(&cart, &g[0]) / (2.0 * PI),
            dot(&cart, &g[1]) / (2.0 * PI),
            dot(&cart, &g[2]) / (2.0 * PI),
        ]
    }
}

/// 晶体结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Structure {
    /// 结构名称
    pub name: String,

    /// 晶格
    pub lattice: Lattice,

    /// 原子序数
    pub atomic_numbers: Vec<u32>,

    /// 笛卡尔坐标 (Å)
    pub cart_coords: Vec<[f64; 3]>,

    /// 可选：笛卡尔受力 (Hartree/Å)，XSF 写出器目前不输出
    pub cart_forces: Option<Vec<[f64; 3]>>,
}

impl Structure {
    pub fn new(
        name: impl Into<String>,
        lattice: Lattice,
        atomic_numbers: Vec<u32>,
        cart_coords: Vec<[f64; 3]>,
    ) -> Result<Self> {
        if atomic_numbers.len() != cart_coords.len() {
            return Err(EphkitError::ShapeMismatch(format!(
                "{} atomic numbers but {} coordinates",
                atomic_numbers.len(),
                cart_coords.len()
            )));
        }

        Ok(Structure {
            name: name.into(),
            lattice,
            atomic_numbers,
            cart_coords,
            cart_forces: None,
        })
    }

    /// 从分数坐标创建
    pub fn from_fractional(
        name: impl Into<String>,
        lattice: Lattice,
        atomic_numbers: Vec<u32>,
        frac_coords: &[[f64; 3]],
    ) -> Result<Self> {
        let cart_coords = frac_coords
            .iter()
            .map(|&f| lattice.frac_to_cart(f))
            .collect();
        Structure::new(name, lattice, atomic_numbers, cart_coords)
    }

    pub fn with_forces(mut self, forces: Vec<[f64; 3]>) -> Result<Self> {
        if forces.len() != self.cart_coords.len() {
            return Err(EphkitError::ShapeMismatch(format!(
                "{} forces for {} atoms",
                forces.len(),
                self.cart_coords.len()
            )));
        }
        self.cart_forces = Some(forces);
        Ok(self)
    }

    /// 实空间或倒空间的晶格向量（行向量）
    pub fn lattice_vectors(&self, space: Space) -> [[f64; 3]; 3] {
        match space {
            Space::Real => self.lattice.matrix,
            Space::Reciprocal => self.lattice.reciprocal().matrix,
        }
    }

    /// 原子数
    pub fn num_sites(&self) -> usize {
        self.atomic_numbers.len()
    }

    /// 计算化学式（按元素符号排序，计数总是写出，如 "Al1"）
    pub fn formula(&self) -> String {
        use std::collections::BTreeMap;
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();

        for &z in &self.atomic_numbers {
            *counts.entry(element::symbol(z).unwrap_or("X")).or_insert(0) += 1;
        }

        counts
            .into_iter()
            .map(|(el, count)| format!("{}{}", el, count))
            .collect::<Vec<_>>()
            .join("")
    }
}

fn dot(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn norm(a: &[f64; 3]) -> f64 {
    dot(a, a).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fcc_al() -> Structure {
        let a = 4.05;
        let lattice = Lattice::from_vectors([
            [0.0, a / 2.0, a / 2.0],
            [a / 2.0, 0.0, a / 2.0],
            [a / 2.0, a / 2.0, 0.0],
        ]);
        Structure::new("Al", lattice, vec![13], vec![[0.0, 0.0, 0.0]]).unwrap()
    }

    #[test]
    fn test_lattice_from_parameters_hexagonal() {
        let lattice = Lattice::from_parameters(3.0, 3.0, 5.0, 90.0, 90.0, 120.0);
        let (a, b, c, alpha, beta, gamma) = lattice.parameters();

        assert!((a - 3.0).abs() < 1e-8);
        assert!((b - 3.0).abs() < 1e-8);
        assert!((c - 5.0).abs() < 1e-8);
        assert!((alpha - 90.0).abs() < 1e-6);
        assert!((beta - 90.0).abs() < 1e-6);
        assert!((gamma - 120.0).abs() < 1e-6);
    }

    #[test]
    fn test_reciprocal_is_dual_basis() {
        let lattice = fcc_al().lattice;
        let g = lattice.reciprocal().matrix;

        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 2.0 * PI } else { 0.0 };
                assert!((dot(&lattice.matrix[i], &g[j]) - expected).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn test_frac_cart_round_trip() {
        let lattice = Lattice::from_parameters(3.1, 4.2, 5.3, 80.0, 95.0, 110.0);
        let frac = [0.25, 0.5, 0.75];
        let back = lattice.cart_to_frac(lattice.frac_to_cart(frac));

        for k in 0..3 {
            assert!((back[k] - frac[k]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_structure_formula_and_sites() {
        let s = fcc_al();
        assert_eq!(s.formula(), "Al1");
        assert_eq!(s.num_sites(), 1);

        let lattice = Lattice::from_vectors([[5.64, 0.0, 0.0], [0.0, 5.64, 0.0], [0.0, 0.0, 5.64]]);
        let nacl = Structure::from_fractional(
            "NaCl",
            lattice,
            vec![11, 17, 11, 17],
            &[
                [0.0, 0.0, 0.0],
                [0.5, 0.0, 0.0],
                [0.5, 0.5, 0.0],
                [0.0, 0.5, 0.0],
            ],
        )
        .unwrap();
        assert_eq!(nacl.formula(), "Cl2Na2");
        assert!((nacl.cart_coords[2][1] - 2.82).abs() < 1e-12);
    }

    #[test]
    fn test_structure_length_mismatch() {
        let lattice = Lattice::from_vectors([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        let err = Structure::new("bad", lattice, vec![1, 1], vec![[0.0; 3]]).unwrap_err();
        assert!(matches!(err, EphkitError::ShapeMismatch(_)));
    }

    #[test]
    fn test_lattice_vectors_space() {
        let s = fcc_al();
        assert_eq!(s.lattice_vectors(Space::Real), s.lattice.matrix);
        let g = s.lattice_vectors(Space::Reciprocal);
        // fcc 的倒格子是 bcc，|b_i| = 2π·√3/a
        let expected = 2.0 * PI * 3f64.sqrt() / 4.05;
        assert!((norm(&g[0]) - expected).abs() < 1e-10);
    }
}
