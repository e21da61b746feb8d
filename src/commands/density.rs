//! # density 子命令实现
//!
//! CHGCAR/PARCHG/LOCPOT -> XSF（CRYSTAL 块 + DATAGRID_3D 块）。
//!
//! ## 依赖关系
//! - 使用 `cli/xsf.rs` 定义的 DensityArgs
//! - 使用 `parsers/chgcar.rs` 读取数据
//! - 使用 `xsf/` 写出

use crate::cli::xsf::DensityArgs;
use crate::error::{EphkitError, Result};
use crate::models::VolumetricField;
use crate::parsers::chgcar;
use crate::utils::output;
use crate::xsf;

use std::fs::File;
use std::io::{BufWriter, Write};

/// 执行体数据转换
pub fn execute(args: DensityArgs) -> Result<()> {
    output::print_header("Volumetric Data -> XSF");

    if !args.input.is_file() {
        return Err(EphkitError::FileNotFound {
            path: args.input.display().to_string(),
        });
    }

    let (structure, density) = chgcar::parse_chgcar_file(&args.input)?;
    let [nx, ny, nz] = [density.shape()[0], density.shape()[1], density.shape()[2]];
    output::print_success(&format!(
        "Loaded {} ({} atoms), grid {} x {} x {}",
        structure.formula(),
        structure.num_sites(),
        nx,
        ny,
        nz
    ));

    let output_path = args.output.clone().unwrap_or_else(|| {
        let name = args
            .input
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("CHGCAR");
        args.input.with_file_name(format!("{}.xsf", name))
    });

    let field = VolumetricField::Real(density.into_dyn());

    let file = File::create(&output_path).map_err(|e| EphkitError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;
    let mut w = BufWriter::new(file);

    xsf::write_structure(&mut w, &structure)?;
    xsf::write_field(&mut w, &structure, &field, !args.no_replicas, None)?;
    w.flush().map_err(|e| EphkitError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    output::print_conversion(
        &args.input.display().to_string(),
        &output_path.display().to_string(),
    );
    Ok(())
}
