//! # 批量执行器
//!
//! 在独立的 rayon 线程池中并行执行文件转换，显示进度并汇总结果。
//!
//! ## 依赖关系
//! - 被 `commands/xsf.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::error::{EphkitError, Result};
use crate::utils::progress;

use rayon::prelude::*;
use std::path::PathBuf;

/// 单个文件处理结果
#[derive(Debug, Clone)]
pub enum ProcessResult {
    Success(String),
    /// 跳过（如输出已存在）
    Skipped(String),
    /// (文件路径, 错误信息)
    Failed(String, String),
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchResult {
    pub success: usize,
    pub skipped: usize,
    pub failed: usize,
    pub failures: Vec<(String, String)>,
}

impl BatchResult {
    pub fn merge(&mut self, result: ProcessResult) {
        match result {
            ProcessResult::Success(_) => self.success += 1,
            ProcessResult::Skipped(_) => self.skipped += 1,
            ProcessResult::Failed(path, err) => {
                self.failed += 1;
                self.failures.push((path, err));
            }
        }
    }

    pub fn total(&self) -> usize {
        self.success + self.skipped + self.failed
    }
}

/// 批量执行器
pub struct BatchRunner {
    jobs: usize,
}

impl BatchRunner {
    /// `jobs = 0` 时使用全部 CPU 核
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 并行处理文件列表，结果顺序与输入一致
    pub fn run<F>(&self, files: Vec<PathBuf>, processor: F) -> Result<BatchResult>
    where
        F: Fn(&PathBuf) -> ProcessResult + Sync + Send,
    {
        let pb = progress::create_progress_bar(files.len() as u64, "Converting");

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| EphkitError::Other(format!("Failed to build thread pool: {}", e)))?;

        let results: Vec<ProcessResult> = pool.install(|| {
            files
                .par_iter()
                .map(|file| {
                    let result = processor(file);
                    pb.inc(1);
                    result
                })
                .collect()
        });

        pb.finish_and_clear();

        let mut batch_result = BatchResult::default();
        for result in results {
            batch_result.merge(result);
        }

        Ok(batch_result)
    }
}
