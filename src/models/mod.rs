//! # 数据模型模块
//!
//! 定义晶体结构、体数据和能带网格等只读数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`、`xsf/` 和 `eph/` 使用
//! - 子模块: structure, element, field, band_mesh

pub mod band_mesh;
pub mod element;
pub mod field;
pub mod structure;

pub use band_mesh::{BandMesh3D, MeshOrder};
pub use field::{ComplexMode, VolumetricField};
pub use structure::{Lattice, Space, Structure};
