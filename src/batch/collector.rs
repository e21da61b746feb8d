//! # 文件收集器
//!
//! 根据输入路径和文件名模式收集待转换的结构文件。
//!
//! ## 功能
//! - 支持单文件和目录输入
//! - 逗号分隔的多个 glob 模式（如 `POSCAR*,*.vasp`）
//! - 可选递归
//!
//! ## 依赖关系
//! - 被 `commands/xsf.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配文件名

use crate::error::{EphkitError, Result};

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 文件收集器
pub struct FileCollector {
    input: PathBuf,
    patterns: Vec<Pattern>,
    recursive: bool,
}

impl FileCollector {
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            patterns: Vec::new(),
            recursive: false,
        }
    }

    /// 设置匹配模式（逗号分隔），空串表示匹配全部
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        self.patterns = pattern
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                Pattern::new(s).map_err(|e| {
                    EphkitError::InvalidArgument(format!("Invalid pattern '{}': {}", s, e))
                })
            })
            .collect::<Result<_>>()?;
        Ok(self)
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有匹配的文件（按路径排序）
    pub fn collect(&self) -> Vec<PathBuf> {
        if self.input.is_file() {
            return vec![self.input.clone()];
        }

        if !self.input.is_dir() {
            return vec![];
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };

        let mut files: Vec<PathBuf> = WalkDir::new(&self.input)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|entry| self.matches_patterns(entry.path()))
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort();
        files
    }

    fn matches_patterns(&self, path: &Path) -> bool {
        let filename = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => return false,
        };

        self.patterns.is_empty() || self.patterns.iter().any(|p| p.matches(filename))
    }
}
