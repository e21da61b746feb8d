//! # eph 子命令实现
//!
//! 加载一次电声计算输出目录中的全部 α²F / α²F_tr，
//! 按 q 点采样方式汇总 λ、ω_log 和 McMillan Tc。
//!
//! ## 依赖关系
//! - 使用 `cli/a2f.rs` 定义的 EphArgs
//! - 使用 `eph/file.rs` 的 EphFile

use crate::cli::a2f::EphArgs;
use crate::eph::{EphFile, SpectralFunction, EV_TO_KELVIN};
use crate::error::{EphkitError, Result};
use crate::utils::{output, progress};

use tabled::{Table, Tabled};

#[derive(Tabled)]
struct SamplingRow {
    #[tabled(rename = "Sampling")]
    sampling: String,
    #[tabled(rename = "Function")]
    function: String,
    #[tabled(rename = "lambda")]
    lambda: String,
    #[tabled(rename = "omega_log (K)")]
    omega_log: String,
    #[tabled(rename = "Tc (K)")]
    tc: String,
}

/// 执行 eph 汇总
pub fn execute(args: EphArgs) -> Result<()> {
    output::print_header("Electron-Phonon Summary");

    let spinner = progress::create_spinner(&format!("Loading '{}'", args.dir.display()));
    let loaded = EphFile::from_dir(&args.dir, &args.prefix);
    spinner.finish_and_clear();
    let file = loaded?;

    if let Some(structure) = &file.structure {
        output::print_success(&format!(
            "Structure: {} ({} atoms)",
            structure.formula(),
            structure.num_sites()
        ));
    }
    if let Some(nsppol) = file.nsppol() {
        output::print_info(&format!("nsppol = {}", nsppol));
    }
    output::print_info(&format!("Using mu* = {}", args.mustar));

    let mut rows = Vec::new();
    for (qsamp, a2f) in file.samplings() {
        rows.push(make_row(qsamp.as_str(), "a2F", a2f, Some(args.mustar))?);
        if let Some(a2ftr) = file.get_a2ftr_qsamp(qsamp) {
            rows.push(make_row(qsamp.as_str(), "a2F_tr", a2ftr, None)?);
        }
    }

    println!("{}", Table::new(&rows));

    if !file.has_a2ftr() {
        output::print_warning("No transport spectral functions (A2FTR) found");
    }

    output::print_done(&format!("{} sampling(s) summarized", file.samplings().count()));
    Ok(())
}

/// `mustar = None` 时不计算 Tc（输运谱函数）
fn make_row(
    sampling: &str,
    function: &str,
    a2f: &SpectralFunction,
    mustar: Option<f64>,
) -> Result<SamplingRow> {
    let tc = match mustar.map(|mu| a2f.get_mcmillan_tc(mu)) {
        Some(Ok(tc)) => format!("{:.3}", tc * EV_TO_KELVIN),
        Some(Err(EphkitError::NoSuperconductingSolution { .. })) | None => "-".to_string(),
        Some(Err(e)) => return Err(e),
    };

    Ok(SamplingRow {
        sampling: sampling.to_string(),
        function: function.to_string(),
        lambda: format!("{:.4}", a2f.lambda_iso()),
        omega_log: format!("{:.1}", a2f.omega_log() * EV_TO_KELVIN),
        tc,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn a2f() -> SpectralFunction {
        let mesh = vec![0.0, 0.01, 0.02, 0.03];
        SpectralFunction::new(mesh, Array2::from_elem((1, 4), 20.0), 3).unwrap()
    }

    #[test]
    fn test_transport_row_has_no_tc() {
        let row = make_row("qcoarse", "a2F_tr", &a2f(), None).unwrap();
        assert_eq!(row.tc, "-");
        assert_eq!(row.lambda, format!("{:.4}", a2f().lambda_iso()));
        assert_eq!(row.omega_log, format!("{:.1}", a2f().omega_log() * EV_TO_KELVIN));
    }

    #[test]
    fn test_a2f_row_reports_tc() {
        let row = make_row("qcoarse", "a2F", &a2f(), Some(0.1)).unwrap();
        let tc = a2f().get_mcmillan_tc(0.1).unwrap();
        assert_eq!(row.tc, format!("{:.3}", tc * EV_TO_KELVIN));

        let unsolvable = make_row("qcoarse", "a2F", &a2f(), Some(0.99)).unwrap();
        assert_eq!(unsolvable.tc, "-");
    }
}
