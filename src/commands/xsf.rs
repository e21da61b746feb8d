//! # xsf 子命令实现
//!
//! 结构文件转换为 Xcrysden XSF（CRYSTAL 块）。
//!
//! ## 模式
//! - 单文件：`POSCAR` -> `POSCAR.xsf`
//! - 批量：目录中每个匹配文件各写一个 XSF（并行）
//! - 合并：目录中全部结构按文件名顺序写入同一个多帧 XSF
//!
//! ## 依赖关系
//! - 使用 `cli/xsf.rs` 定义的 XsfArgs
//! - 使用 `batch/` 模块进行批量处理
//! - 使用 `xsf/structure.rs` 写出

use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::xsf::XsfArgs;
use crate::error::{EphkitError, Result};
use crate::models::Structure;
use crate::parsers;
use crate::utils::output;
use crate::xsf;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// 执行 XSF 转换
pub fn execute(args: XsfArgs) -> Result<()> {
    output::print_header("Structure -> XSF Conversion");

    if args.input.is_file() {
        execute_single_file(&args)
    } else if args.input.is_dir() {
        if args.merge {
            execute_merge(&args)
        } else {
            execute_batch(&args)
        }
    } else {
        Err(EphkitError::FileNotFound {
            path: args.input.display().to_string(),
        })
    }
}

fn execute_single_file(args: &XsfArgs) -> Result<()> {
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| xsf_path_for(&args.input, None));

    match convert_file(&args.input, &output_path, args.overwrite) {
        ProcessResult::Success(msg) => {
            output::print_success(&msg);
            Ok(())
        }
        ProcessResult::Skipped(msg) => {
            output::print_warning(&msg);
            Ok(())
        }
        ProcessResult::Failed(_, err) => Err(EphkitError::Other(err)),
    }
}

fn execute_batch(args: &XsfArgs) -> Result<()> {
    output::print_info(&format!("Batch mode: directory '{}'", args.input.display()));

    let files = collect_files(args)?;
    if files.is_empty() {
        output::print_warning(&format!(
            "No matching files found with pattern '{}'",
            args.pattern
        ));
        return Ok(());
    }
    output::print_info(&format!("Found {} structure files", files.len()));

    let output_dir = args.output.clone();
    if let Some(dir) = &output_dir {
        fs::create_dir_all(dir).map_err(|e| EphkitError::FileWriteError {
            path: dir.display().to_string(),
            source: e,
        })?;
    }

    let runner = BatchRunner::new(args.jobs);
    output::print_info(&format!("Using {} parallel jobs", runner.jobs()));

    let result = runner.run(files, |file| {
        let out = xsf_path_for(file, output_dir.as_deref());
        convert_file(file, &out, args.overwrite)
    })?;

    output::print_separator();
    output::print_success(&format!(
        "Batch complete: {} success, {} skipped, {} failed",
        result.success, result.skipped, result.failed
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed files:");
        for (path, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", path, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    Ok(())
}

fn execute_merge(args: &XsfArgs) -> Result<()> {
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.join("structures.xsf"));

    if output_path.exists() && !args.overwrite {
        output::print_warning(&format!(
            "Output exists, use --overwrite: {}",
            output_path.display()
        ));
        return Ok(());
    }

    let files = collect_files(args)?;
    if files.is_empty() {
        return Err(EphkitError::NoFilesFound {
            pattern: args.pattern.clone(),
        });
    }

    let structures = files
        .iter()
        .map(|f| parsers::parse_structure_file(f))
        .collect::<Result<Vec<Structure>>>()?;

    write_xsf_file(&structures, &output_path)?;
    output::print_success(&format!(
        "{} frames written to '{}'",
        structures.len(),
        output_path.display()
    ));

    Ok(())
}

fn collect_files(args: &XsfArgs) -> Result<Vec<PathBuf>> {
    Ok(FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect())
}

/// 转换单个结构文件
fn convert_file(input: &Path, output_path: &Path, overwrite: bool) -> ProcessResult {
    if output_path.exists() && !overwrite {
        return ProcessResult::Skipped(format!(
            "Output exists, skipping: {}",
            output_path.display()
        ));
    }

    let written = parsers::parse_structure_file(input)
        .and_then(|s| write_xsf_file(std::slice::from_ref(&s), output_path));

    match written {
        Ok(()) => ProcessResult::Success(format!(
            "{} -> {}",
            input.display(),
            output_path.display()
        )),
        Err(e) => ProcessResult::Failed(input.display().to_string(), e.to_string()),
    }
}

fn write_xsf_file(structures: &[Structure], path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| EphkitError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;
    let mut w = BufWriter::new(file);

    xsf::write_structures(&mut w, structures)?;
    w.flush().map_err(|e| EphkitError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// `dir/POSCAR` -> `<out_dir or dir>/POSCAR.xsf`
fn xsf_path_for(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let name = input
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("structure");
    let file_name = format!("{}.xsf", name);

    match output_dir {
        Some(dir) => dir.join(file_name),
        None => input.with_file_name(file_name),
    }
}
