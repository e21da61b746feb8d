//! # 统一错误处理模块
//!
//! 定义 ephkit 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 错误分类
//! - 取值错误：非法选项、不支持的数组维度、不满足前置条件的 k 网格
//! - 用法错误：复数数据缺少 `cplx_mode`
//! - 定义域错误：自旋索引越界、McMillan 方程无解
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// ephkit 统一错误类型
#[derive(Error, Debug)]
pub enum EphkitError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    // ─────────────────────────────────────────────────────────────
    // 取值错误
    // ─────────────────────────────────────────────────────────────
    #[error("Wrong value for cplx_mode: {mode}")]
    InvalidComplexMode { mode: String },

    #[error("ndim {ndim} is not supported")]
    UnsupportedRank { ndim: usize },

    #[error("The k-mesh does not contain redundant data points.")]
    BandMeshNotPeriodic,

    #[error("The k-mesh must be in C-order, got: {order}")]
    BandMeshOrder { order: String },

    #[error("The k-mesh must be Gamma-centered, got shifts: {shifts}")]
    BandMeshShifted { shifts: String },

    #[error("Invalid mesh order: {0}")]
    InvalidMeshOrder(String),

    #[error("Unknown q-sampling: {0} (expected qcoarse or qintp)")]
    UnknownSampling(String),

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Invalid spectral function: {0}")]
    InvalidSpectralFunction(String),

    // ─────────────────────────────────────────────────────────────
    // 用法错误
    // ─────────────────────────────────────────────────────────────
    #[error("cplx_mode must be specified when data is a complex array.")]
    MissingComplexMode,

    // ─────────────────────────────────────────────────────────────
    // 定义域错误
    // ─────────────────────────────────────────────────────────────
    #[error("Spin index {spin} out of range [0, {nsppol})")]
    SpinOutOfRange { spin: usize, nsppol: usize },

    #[error("No superconducting solution for lambda={lambda:.6} and mustar={mustar:.6}")]
    NoSuperconductingSolution { lambda: f64, mustar: f64 },

    #[error("Tc={tc} cannot be reproduced for mustar in the physical range (max Tc {tc_max})")]
    TcOutOfRange { tc: f64, tc_max: f64 },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid range format: {0}")]
    InvalidRange(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("No matching files found with pattern: {pattern}")]
    NoFilesFound { pattern: String },

    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, EphkitError>;
