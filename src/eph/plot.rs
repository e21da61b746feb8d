//! # α²F 图表生成
//!
//! 使用 `plotters` 生成 α²F(ω) 谱图和 Tc(µ*) 曲线，支持 PNG 和 SVG 输出。
//!
//! ## 依赖关系
//! - 被 `commands/a2f.rs` 调用
//! - 使用 `eph/a2f.rs` 的 SpectralFunction
//! - 使用 `plotters` 渲染图表

use crate::eph::{SpectralFunction, EV_TO_KELVIN};
use crate::error::{EphkitError, Result};

use plotters::prelude::*;
use std::path::Path;

/// α²F(ω) 谱图：填充曲线为 α²F，右轴为累积 λ(ω)
pub fn plot_a2f(
    a2f: &SpectralFunction,
    output_path: &Path,
    title: &str,
    width: u32,
    height: u32,
    use_svg: bool,
) -> Result<()> {
    if use_svg {
        let root = SVGBackend::new(output_path, (width, height)).into_drawing_area();
        draw_a2f_chart(&root, a2f, title)?;
        root.present()
            .map_err(|e| EphkitError::Other(e.to_string()))?;
    } else {
        let root = BitMapBackend::new(output_path, (width, height)).into_drawing_area();
        draw_a2f_chart(&root, a2f, title)?;
        root.present()
            .map_err(|e| EphkitError::Other(e.to_string()))?;
    }
    Ok(())
}

/// Tc(µ*) 曲线，Tc 以 K 表示（假定网格单位为 eV）
pub fn plot_tc_vs_mustar(
    table: &[(f64, f64)],
    output_path: &Path,
    title: &str,
    width: u32,
    height: u32,
    use_svg: bool,
) -> Result<()> {
    if table.is_empty() {
        return Err(EphkitError::InvalidArgument(
            "No (mu*, Tc) points to plot".to_string(),
        ));
    }

    if use_svg {
        let root = SVGBackend::new(output_path, (width, height)).into_drawing_area();
        draw_tc_chart(&root, table, title)?;
        root.present()
            .map_err(|e| EphkitError::Other(e.to_string()))?;
    } else {
        let root = BitMapBackend::new(output_path, (width, height)).into_drawing_area();
        draw_tc_chart(&root, table, title)?;
        root.present()
            .map_err(|e| EphkitError::Other(e.to_string()))?;
    }
    Ok(())
}

fn draw_a2f_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    a2f: &SpectralFunction,
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| EphkitError::Other(format!("{:?}", e)))?;

    let iw0 = a2f.iw0();
    let wmesh = &a2f.mesh()[iw0..];
    let values = a2f.values();
    let curve: Vec<(f64, f64)> = wmesh.iter().copied().zip(values[iw0..].iter().copied()).collect();
    let lambda_w: Vec<(f64, f64)> = wmesh
        .iter()
        .copied()
        .zip(a2f.get_moment_cumulative(1, None)?)
        .collect();

    let x_min = wmesh[0];
    let x_max = wmesh[wmesh.len() - 1];
    let y_max = curve.iter().map(|(_, y)| *y).fold(0.0_f64, f64::max).max(1e-12) * 1.1;
    let lambda_max = lambda_w.last().map(|(_, l)| *l).unwrap_or(1.0).max(1e-12) * 1.1;

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .right_y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)
        .map_err(|e| EphkitError::Other(format!("{:?}", e)))?
        .set_secondary_coord(x_min..x_max, 0.0..lambda_max);

    chart
        .configure_mesh()
        .x_desc("ω")
        .y_desc("α²F(ω)")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(|e| EphkitError::Other(format!("{:?}", e)))?;

    chart
        .configure_secondary_axes()
        .y_desc("λ(ω)")
        .label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(|e| EphkitError::Other(format!("{:?}", e)))?;

    let fill_color = RGBColor(0, 102, 204).mix(0.2);
    chart
        .draw_series(AreaSeries::new(curve.iter().copied(), 0.0, fill_color))
        .map_err(|e| EphkitError::Other(format!("{:?}", e)))?;

    let line_color = RGBColor(0, 102, 204);
    chart
        .draw_series(LineSeries::new(curve.iter().copied(), line_color.stroke_width(2)))
        .map_err(|e| EphkitError::Other(format!("{:?}", e)))?;

    let lambda_color = RGBColor(204, 51, 0);
    chart
        .draw_secondary_series(LineSeries::new(
            lambda_w.iter().copied(),
            lambda_color.stroke_width(2),
        ))
        .map_err(|e| EphkitError::Other(format!("{:?}", e)))?;

    let info = format!("λ = {:.3}, ω_log = {:.4}", a2f.lambda_iso(), a2f.omega_log());
    chart
        .draw_series(std::iter::once(Text::new(
            info,
            (x_min + 0.05 * (x_max - x_min), y_max * 0.95),
            ("sans-serif", 14).into_font().color(&BLACK),
        )))
        .map_err(|e| EphkitError::Other(format!("{:?}", e)))?;

    Ok(())
}

fn draw_tc_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    table: &[(f64, f64)],
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| EphkitError::Other(format!("{:?}", e)))?;

    let points: Vec<(f64, f64)> = table.iter().map(|(mu, tc)| (*mu, tc * EV_TO_KELVIN)).collect();

    let x_min = points[0].0;
    let mut x_max = points[points.len() - 1].0;
    if x_max <= x_min {
        x_max = x_min + 0.01;
    }
    let y_max = points.iter().map(|(_, t)| *t).fold(0.0_f64, f64::max).max(1e-6) * 1.1;

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)
        .map_err(|e| EphkitError::Other(format!("{:?}", e)))?;

    chart
        .configure_mesh()
        .x_desc("µ*")
        .y_desc("Tc (K)")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(|e| EphkitError::Other(format!("{:?}", e)))?;

    let line_color = RGBColor(0, 102, 204);
    chart
        .draw_series(LineSeries::new(points.iter().copied(), line_color.stroke_width(2)))
        .map_err(|e| EphkitError::Other(format!("{:?}", e)))?;

    chart
        .draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 3, line_color.filled())),
        )
        .map_err(|e| EphkitError::Other(format!("{:?}", e)))?;

    Ok(())
}
