//! # 电声计算结果容器
//!
//! 按 q 点采样方式（粗网格 / 插值网格）组织 α²F(ω) 与可选的
//! 输运谱函数 α²F_tr(ω)。未计算的量以 `None` 表示，`has_a2ftr`
//! 显式告知调用方输运谱函数是否可用。
//!
//! ## 目录布局
//! ```text
//! <dir>/<prefix>_A2F_QCOARSE.dat     必需其一
//! <dir>/<prefix>_A2F_QINTP.dat
//! <dir>/<prefix>_A2FTR_QCOARSE.dat   可选
//! <dir>/<prefix>_A2FTR_QINTP.dat
//! <dir>/POSCAR                        可选
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/eph.rs` 使用
//! - 使用 `eph/a2f.rs`, `parsers/a2f.rs`, `parsers/poscar.rs`

use crate::eph::SpectralFunction;
use crate::error::{EphkitError, Result};
use crate::models::Structure;
use crate::parsers::{a2f as a2f_parser, poscar};

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

/// q 点采样方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QSampling {
    /// 粗 q 网格（直接 DFPT 计算）
    QCoarse,
    /// 插值到细 q 网格
    QIntp,
}

impl QSampling {
    pub const ALL: [QSampling; 2] = [QSampling::QCoarse, QSampling::QIntp];

    pub fn as_str(&self) -> &'static str {
        match self {
            QSampling::QCoarse => "qcoarse",
            QSampling::QIntp => "qintp",
        }
    }
}

impl FromStr for QSampling {
    type Err = EphkitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "qcoarse" => Ok(QSampling::QCoarse),
            "qintp" => Ok(QSampling::QIntp),
            _ => Err(EphkitError::UnknownSampling(s.to_string())),
        }
    }
}

impl std::fmt::Display for QSampling {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 电声计算结果
#[derive(Debug, Clone, Default)]
pub struct EphFile {
    /// 晶体结构（若可用）
    pub structure: Option<Structure>,
    a2f: BTreeMap<QSampling, SpectralFunction>,
    a2ftr: BTreeMap<QSampling, SpectralFunction>,
}

impl EphFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_structure(mut self, structure: Structure) -> Self {
        self.structure = Some(structure);
        self
    }

    /// 设置某种采样下的 α²F
    pub fn insert_a2f(&mut self, qsamp: QSampling, a2f: SpectralFunction) {
        self.a2f.insert(qsamp, a2f);
    }

    /// 设置某种采样下的输运谱函数
    pub fn insert_a2ftr(&mut self, qsamp: QSampling, a2ftr: SpectralFunction) {
        self.a2ftr.insert(qsamp, a2ftr);
    }

    pub fn get_a2f_qsamp(&self, qsamp: QSampling) -> Option<&SpectralFunction> {
        self.a2f.get(&qsamp)
    }

    pub fn a2f_qcoarse(&self) -> Option<&SpectralFunction> {
        self.get_a2f_qsamp(QSampling::QCoarse)
    }

    pub fn a2f_qintp(&self) -> Option<&SpectralFunction> {
        self.get_a2f_qsamp(QSampling::QIntp)
    }

    pub fn has_a2ftr(&self) -> bool {
        !self.a2ftr.is_empty()
    }

    pub fn get_a2ftr_qsamp(&self, qsamp: QSampling) -> Option<&SpectralFunction> {
        self.a2ftr.get(&qsamp)
    }

    pub fn a2ftr_qcoarse(&self) -> Option<&SpectralFunction> {
        self.get_a2ftr_qsamp(QSampling::QCoarse)
    }

    pub fn a2ftr_qintp(&self) -> Option<&SpectralFunction> {
        self.get_a2ftr_qsamp(QSampling::QIntp)
    }

    /// 已加载的 α²F 采样方式（按固定顺序）
    pub fn samplings(&self) -> impl Iterator<Item = (QSampling, &SpectralFunction)> {
        self.a2f.iter().map(|(q, a)| (*q, a))
    }

    /// 自旋通道数（取自任一 α²F）
    pub fn nsppol(&self) -> Option<usize> {
        self.a2f.values().next().map(|a| a.nsppol())
    }

    /// 从目录加载
    pub fn from_dir(dir: &Path, prefix: &str) -> Result<Self> {
        if !dir.is_dir() {
            return Err(EphkitError::DirectoryNotFound {
                path: dir.display().to_string(),
            });
        }

        let mut file = EphFile::new();

        for qsamp in QSampling::ALL {
            let tag = qsamp.as_str().to_uppercase();

            let a2f_path = dir.join(format!("{}_A2F_{}.dat", prefix, tag));
            if a2f_path.is_file() {
                file.insert_a2f(qsamp, a2f_parser::parse_a2f_file(&a2f_path)?);
            }

            let a2ftr_path = dir.join(format!("{}_A2FTR_{}.dat", prefix, tag));
            if a2ftr_path.is_file() {
                file.insert_a2ftr(qsamp, a2f_parser::parse_a2f_file(&a2ftr_path)?);
            }
        }

        if file.a2f.is_empty() {
            return Err(EphkitError::NoFilesFound {
                pattern: dir.join(format!("{}_A2F_*.dat", prefix)).display().to_string(),
            });
        }

        let poscar_path = dir.join("POSCAR");
        if poscar_path.is_file() {
            file = file.with_structure(poscar::parse_poscar_file(&poscar_path)?);
        }

        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;
    use std::fs;

    fn flat_a2f(nsppol: usize) -> SpectralFunction {
        let mesh = vec![0.0, 0.01, 0.02, 0.03];
        SpectralFunction::new(mesh, Array2::from_elem((nsppol, 4), 10.0), 3).unwrap()
    }

    #[test]
    fn test_qsampling_parse() {
        assert_eq!("qcoarse".parse::<QSampling>().unwrap(), QSampling::QCoarse);
        assert_eq!("QINTP".parse::<QSampling>().unwrap(), QSampling::QIntp);
        assert!(matches!(
            "qfine".parse::<QSampling>(),
            Err(EphkitError::UnknownSampling(_))
        ));
    }

    #[test]
    fn test_lookup_by_sampling() {
        let mut file = EphFile::new();
        file.insert_a2f(QSampling::QCoarse, flat_a2f(1));

        let a2f = file.a2f_qcoarse().unwrap();
        assert!(std::ptr::eq(
            file.get_a2f_qsamp(QSampling::QCoarse).unwrap(),
            a2f
        ));
        assert!(file.a2f_qintp().is_none());
        assert_eq!(file.nsppol(), Some(1));
    }

    #[test]
    fn test_missing_transport_function() {
        let mut file = EphFile::new();
        file.insert_a2f(QSampling::QIntp, flat_a2f(1));

        assert!(!file.has_a2ftr());
        assert!(file.a2ftr_qcoarse().is_none());
        assert!(file.a2ftr_qintp().is_none());
        assert!(file.get_a2ftr_qsamp(QSampling::QCoarse).is_none());

        file.insert_a2ftr(QSampling::QCoarse, flat_a2f(1));
        assert!(file.has_a2ftr());
        assert!(file.a2ftr_qcoarse().is_some());
    }

    #[test]
    fn test_from_dir() {
        let dir = std::env::temp_dir().join(format!("ephkit_ephfile_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let body = "# nmodes: 3\n0.000 0.0\n0.010 5.0\n0.020 10.0\n0.030 5.0\n";
        fs::write(dir.join("al_A2F_QCOARSE.dat"), body).unwrap();
        fs::write(dir.join("al_A2F_QINTP.dat"), body).unwrap();

        let file = EphFile::from_dir(&dir, "al").unwrap();
        assert!(file.a2f_qcoarse().is_some());
        assert!(file.a2f_qintp().is_some());
        assert!(!file.has_a2ftr());
        assert!(file.structure.is_none());
        assert_eq!(file.samplings().count(), 2);

        assert!(matches!(
            EphFile::from_dir(&dir, "missing"),
            Err(EphkitError::NoFilesFound { .. })
        ));

        fs::write(
            dir.join("POSCAR"),
            "Al\n1.0\n4.05 0 0\n0 4.05 0\n0 0 4.05\nAl\n1\nDirect\n0 0 0\n",
        )
        .unwrap();
        let with_poscar = EphFile::from_dir(&dir, "al").unwrap();
        let structure = with_poscar.structure.as_ref().unwrap();
        assert_eq!(structure.formula(), "Al1");

        fs::remove_dir_all(&dir).ok();
    }
}
