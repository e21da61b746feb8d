//! # a2f 子命令实现
//!
//! 读取 α²F 文本文件，计算 λ、ω_log 与 McMillan Tc，可选反解 µ*、
//! 扫描 Tc(µ*)、导出 CSV 和绘图。网格频率按 eV 解释。
//!
//! ## 依赖关系
//! - 使用 `cli/a2f.rs` 定义的 A2fArgs
//! - 使用 `parsers/a2f.rs` 读取数据
//! - 使用 `eph/` 进行计算、导出和绘图

use crate::cli::a2f::{parse_mustar_range, A2fArgs, PlotFormat};
use crate::eph::{self, SpectralFunction, EV_TO_KELVIN};
use crate::error::{EphkitError, Result};
use crate::parsers;
use crate::utils::output;

use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Quantity")]
    quantity: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct TcRow {
    #[tabled(rename = "µ*")]
    mustar: String,
    #[tabled(rename = "Tc (K)")]
    tc: String,
}

/// 执行 a2f 分析
pub fn execute(args: A2fArgs) -> Result<()> {
    output::print_header("Eliashberg Function Analysis");

    if !args.file.is_file() {
        return Err(EphkitError::FileNotFound {
            path: args.file.display().to_string(),
        });
    }

    let a2f = parsers::a2f::parse_a2f_file(&args.file)?;
    output::print_success(&format!(
        "Loaded a2F: {} points, nsppol = {}, nmodes = {}",
        a2f.mesh().len(),
        a2f.nsppol(),
        a2f.nmodes()
    ));

    print_summary(&a2f, args.mustar)?;

    if let Some(tc_kelvin) = args.tc {
        let mustar = a2f.get_mustar_from_tc(tc_kelvin / EV_TO_KELVIN)?;
        output::print_info(&format!(
            "mu* reproducing Tc = {:.3} K: {:.4}",
            tc_kelvin, mustar
        ));
    }

    let table = match &args.scan {
        Some(range) => {
            let (min, max) = parse_mustar_range(range)?;
            let table = a2f.tc_vs_mustar(min, max, args.steps);
            print_tc_table(&table);
            if table.len() < args.steps {
                output::print_warning(&format!(
                    "{} mu* values above {:.4} have no superconducting solution",
                    args.steps - table.len(),
                    a2f.mustar_max()
                ));
            }
            Some(table)
        }
        None => None,
    };

    if let Some(csv_path) = &args.csv {
        eph::export::a2f_to_csv(&a2f, csv_path)?;
        output::print_conversion(&args.file.display().to_string(), &csv_path.display().to_string());

        if let Some(table) = &table {
            let tc_path = with_suffix(csv_path, "_tc");
            eph::export::tc_table_to_csv(table, &tc_path)?;
            output::print_conversion("Tc(mu*)", &tc_path.display().to_string());
        }
    }

    if let Some(plot_path) = &args.plot {
        let format = args
            .format
            .unwrap_or_else(|| guess_format_from_extension(plot_path));
        let use_svg = format == PlotFormat::Svg;
        let title = args
            .file
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("a2F")
            .to_string();

        eph::plot::plot_a2f(&a2f, plot_path, &title, args.width, args.height, use_svg)?;
        output::print_success(&format!("a2F plot saved to '{}'", plot_path.display()));

        if let Some(table) = table.as_deref().filter(|t| !t.is_empty()) {
            let tc_plot = with_suffix(plot_path, "_tc");
            eph::plot::plot_tc_vs_mustar(
                table,
                &tc_plot,
                &format!("{}: Tc vs µ*", title),
                args.width,
                args.height,
                use_svg,
            )?;
            output::print_success(&format!("Tc plot saved to '{}'", tc_plot.display()));
        }
    }

    output::print_done("a2F analysis complete");
    Ok(())
}

fn print_summary(a2f: &SpectralFunction, mustar: f64) -> Result<()> {
    let lambda = a2f.lambda_iso();
    let omega_log = a2f.omega_log();

    let mut rows = vec![SummaryRow {
        quantity: "lambda".to_string(),
        value: format!("{:.4}", lambda),
    }];

    if a2f.nsppol() > 1 {
        for spin in 0..a2f.nsppol() {
            rows.push(SummaryRow {
                quantity: format!("lambda (spin {})", spin + 1),
                value: format!("{:.4}", a2f.get_moment(1, Some(spin))?),
            });
        }
    }

    rows.push(SummaryRow {
        quantity: "omega_log".to_string(),
        value: format!("{:.3} meV ({:.1} K)", omega_log * 1000.0, omega_log * EV_TO_KELVIN),
    });

    let tc = match a2f.get_mcmillan_tc(mustar) {
        Ok(tc) => format!("{:.3} K", tc * EV_TO_KELVIN),
        Err(EphkitError::NoSuperconductingSolution { .. }) => "no solution".to_string(),
        Err(e) => return Err(e),
    };
    rows.push(SummaryRow {
        quantity: format!("Tc (McMillan, mu* = {})", mustar),
        value: tc,
    });

    println!("{}", Table::new(&rows));
    Ok(())
}

fn print_tc_table(table: &[(f64, f64)]) {
    let rows: Vec<TcRow> = table
        .iter()
        .map(|(mu, tc)| TcRow {
            mustar: format!("{:.4}", mu),
            tc: format!("{:.3}", tc * EV_TO_KELVIN),
        })
        .collect();

    if !rows.is_empty() {
        output::print_header("McMillan Tc vs mu*");
        println!("{}", Table::new(&rows));
    }
}

/// `a2f.csv` -> `a2f_tc.csv`
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
    let name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext),
        None => format!("{}{}", stem, suffix),
    };
    path.with_file_name(name)
}

fn guess_format_from_extension(path: &Path) -> PlotFormat {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .as_deref()
    {
        Some("svg") => PlotFormat::Svg,
        _ => PlotFormat::Png,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_suffix() {
        assert_eq!(
            with_suffix(Path::new("out/a2f.csv"), "_tc"),
            PathBuf::from("out/a2f_tc.csv")
        );
        assert_eq!(with_suffix(Path::new("plot"), "_tc"), PathBuf::from("plot_tc"));
    }

    #[test]
    fn test_guess_format() {
        assert_eq!(guess_format_from_extension(Path::new("a.SVG")), PlotFormat::Svg);
        assert_eq!(guess_format_from_extension(Path::new("a.png")), PlotFormat::Png);
        assert_eq!(guess_format_from_extension(Path::new("a")), PlotFormat::Png);
    }
}
