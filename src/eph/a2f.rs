//! # Eliashberg 谱函数 α²F(ω)
//!
//! 在频率网格上采样的电声耦合谱函数（已对声子支求和），
//! 以及由其导出的标量：谱矩、ω_log、McMillan Tc 和反解 µ*。
//!
//! ## 约定
//! - `iw0` 为最后一个非正频率点（零频点）的下标，网格全为正时为 0
//! - 第 n 阶矩：λ_n = 2 ∫_{ω>0} α²F(ω) ω^{n-1} dω，梯形积分，积分下限为 `mesh[iw0]`；
//!   n < 1 的积分核与 ln ω 在非正频率处发散，从其后一个点开始积分
//! - 总耦合常数 λ = λ_1
//! - ω_log = exp[(2/λ) ∫_{ω>0} α²F(ω) ln ω dω]，与 λ 使用同一积分核
//! - 未指定自旋时先对自旋通道求和再积分
//! - Tc 与频率网格单位相同
//!
//! ## 依赖关系
//! - 被 `eph/file.rs`, `eph/export.rs`, `eph/plot.rs`, `commands/a2f.rs` 使用
//! - 使用 `ndarray` 存储 values_spin

use crate::error::{EphkitError, Result};

use ndarray::{Array2, Axis};
use std::fmt;

/// eV -> K 换算因子
pub const EV_TO_KELVIN: f64 = 11604.518_121_550_082;

/// 反解 µ* 的二分迭代上限
const MAX_BISECTION_STEPS: usize = 200;

/// α²F(ω) 谱函数（构造后不可变）
#[derive(Debug, Clone)]
pub struct SpectralFunction {
    /// 频率网格，严格递增
    mesh: Vec<f64>,
    /// α²F 值，形状 [nsppol, mesh.len()]
    values_spin: Array2<f64>,
    /// 声子支数 = 3 × 原子数
    nmodes: usize,
    /// 零频（或最后一个非正频率）点的下标
    iw0: usize,
}

impl SpectralFunction {
    pub fn new(mesh: Vec<f64>, values_spin: Array2<f64>, nmodes: usize) -> Result<Self> {
        if mesh.is_empty() {
            return Err(EphkitError::InvalidSpectralFunction(
                "empty frequency mesh".to_string(),
            ));
        }

        let (nsppol, nw) = values_spin.dim();
        if nw != mesh.len() {
            return Err(EphkitError::ShapeMismatch(format!(
                "values_spin has {} points, mesh has {}",
                nw,
                mesh.len()
            )));
        }
        if nsppol != 1 && nsppol != 2 {
            return Err(EphkitError::InvalidSpectralFunction(format!(
                "nsppol must be 1 or 2, got {}",
                nsppol
            )));
        }

        if mesh.windows(2).any(|w| w[1] <= w[0]) {
            return Err(EphkitError::InvalidSpectralFunction(
                "frequency mesh must be strictly increasing".to_string(),
            ));
        }

        let npositive = mesh.iter().filter(|&&w| w > 0.0).count();
        if npositive < 2 {
            return Err(EphkitError::InvalidSpectralFunction(
                "at least two positive frequencies are needed for integration".to_string(),
            ));
        }
        let iw0 = mesh.iter().rposition(|&w| w <= 0.0).unwrap_or(0);

        Ok(SpectralFunction {
            mesh,
            values_spin,
            nmodes,
            iw0,
        })
    }

    pub fn mesh(&self) -> &[f64] {
        &self.mesh
    }

    pub fn values_spin(&self) -> &Array2<f64> {
        &self.values_spin
    }

    pub fn nsppol(&self) -> usize {
        self.values_spin.nrows()
    }

    pub fn nmodes(&self) -> usize {
        self.nmodes
    }

    pub fn iw0(&self) -> usize {
        self.iw0
    }

    /// 对自旋求和后的 α²F(ω)
    pub fn values(&self) -> Vec<f64> {
        self.values_spin.sum_axis(Axis(0)).to_vec()
    }

    /// 第 n 阶矩 λ_n = 2 ∫_{ω>0} α²F(ω) ω^{n-1} dω
    pub fn get_moment(&self, n: i32, spin: Option<usize>) -> Result<f64> {
        let start = self.moment_start(n);
        let integrand = self.moment_integrand(n, spin, start)?;
        Ok(trapz(&self.mesh[start..], &integrand))
    }

    /// 第 n 阶矩的累积积分，首元素为 0，末元素等于 `get_moment`
    ///
    /// n >= 1 时与 `mesh[iw0..]` 逐点对应。
    pub fn get_moment_cumulative(&self, n: i32, spin: Option<usize>) -> Result<Vec<f64>> {
        let start = self.moment_start(n);
        let integrand = self.moment_integrand(n, spin, start)?;
        Ok(cumtrapz(&self.mesh[start..], &integrand))
    }

    /// 总电声耦合常数 λ
    pub fn lambda_iso(&self) -> f64 {
        let integrand = self.kernel(&self.spin_summed(self.iw0), 1, self.iw0);
        trapz(&self.mesh[self.iw0..], &integrand)
    }

    /// 对数平均频率 ω_log
    pub fn omega_log(&self) -> f64 {
        let start = self.positive_start();
        let wmesh = &self.mesh[start..];
        let fw: Vec<f64> = self
            .kernel(&self.spin_summed(start), 1, start)
            .iter()
            .zip(wmesh)
            .map(|(k, w)| k * w.ln())
            .collect();

        (trapz(wmesh, &fw) / self.lambda_iso()).exp()
    }

    /// McMillan 公式：Tc = (ω_log / 1.2) · exp[−1.04(1+λ) / (λ − µ*(1+0.62λ))]
    pub fn get_mcmillan_tc(&self, mustar: f64) -> Result<f64> {
        let lambda = self.lambda_iso();
        mcmillan_tc(lambda, self.omega_log(), mustar)
            .ok_or(EphkitError::NoSuperconductingSolution { lambda, mustar })
    }

    /// µ* 的物理上限 λ/(1+0.62λ)，此时 McMillan 分母为零
    pub fn mustar_max(&self) -> f64 {
        let lambda = self.lambda_iso();
        lambda / (1.0 + 0.62 * lambda)
    }

    /// 反解：给定 Tc，在 (0, λ/(1+0.62λ)) 内二分求 µ*
    ///
    /// Tc(µ*) 在该区间内单调递减，因此根唯一。
    pub fn get_mustar_from_tc(&self, tc: f64) -> Result<f64> {
        let lambda = self.lambda_iso();
        let omega_log = self.omega_log();

        let tc_max = mcmillan_tc(lambda, omega_log, 0.0)
            .ok_or(EphkitError::NoSuperconductingSolution { lambda, mustar: 0.0 })?;
        if !(tc > 0.0 && tc <= tc_max) {
            return Err(EphkitError::TcOutOfRange { tc, tc_max });
        }

        let (mut lo, mut hi) = (0.0_f64, self.mustar_max());
        for _ in 0..MAX_BISECTION_STEPS {
            let mid = 0.5 * (lo + hi);
            if mid <= lo || mid >= hi {
                break;
            }
            // mid < hi 保证分母为正
            let tc_mid = mcmillan_tc(lambda, omega_log, mid).unwrap_or(0.0);
            if tc_mid > tc {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        Ok(0.5 * (lo + hi))
    }

    /// µ* 均匀网格上的 (µ*, Tc) 表，无解的点被略去
    pub fn tc_vs_mustar(&self, mustar_min: f64, mustar_max: f64, num: usize) -> Vec<(f64, f64)> {
        let lambda = self.lambda_iso();
        let omega_log = self.omega_log();

        linspace(mustar_min, mustar_max, num)
            .into_iter()
            .filter_map(|mu| mcmillan_tc(lambda, omega_log, mu).map(|tc| (mu, tc)))
            .collect()
    }

    /// 第一个严格正频率点
    fn positive_start(&self) -> usize {
        if self.mesh[self.iw0] > 0.0 {
            self.iw0
        } else {
            self.iw0 + 1
        }
    }

    fn moment_start(&self, n: i32) -> usize {
        if n < 1 {
            self.positive_start()
        } else {
            self.iw0
        }
    }

    fn spin_summed(&self, start: usize) -> Vec<f64> {
        self.values_spin
            .slice(ndarray::s![.., start..])
            .sum_axis(Axis(0))
            .to_vec()
    }

    fn spin_values(&self, spin: Option<usize>, start: usize) -> Result<Vec<f64>> {
        match spin {
            None => Ok(self.spin_summed(start)),
            Some(s) if s < self.nsppol() => {
                Ok(self.values_spin.row(s).iter().skip(start).copied().collect())
            }
            Some(s) => Err(EphkitError::SpinOutOfRange {
                spin: s,
                nsppol: self.nsppol(),
            }),
        }
    }

    /// 2 α²F(ω) ω^{n-1}，从 `start` 开始
    fn kernel(&self, a2f: &[f64], n: i32, start: usize) -> Vec<f64> {
        a2f.iter()
            .zip(&self.mesh[start..])
            .map(|(a, w)| 2.0 * a * w.powi(n - 1))
            .collect()
    }

    fn moment_integrand(&self, n: i32, spin: Option<usize>, start: usize) -> Result<Vec<f64>> {
        let a2f = self.spin_values(spin, start)?;
        Ok(self.kernel(&a2f, n, start))
    }
}

impl fmt::Display for SpectralFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Eliashberg function a2F(w)")?;
        writeln!(f, "  nsppol: {}, nmodes: {}", self.nsppol(), self.nmodes)?;
        writeln!(
            f,
            "  mesh: {} points in [{:.6}, {:.6}], iw0: {}",
            self.mesh.len(),
            self.mesh[0],
            self.mesh[self.mesh.len() - 1],
            self.iw0
        )?;
        writeln!(f, "  lambda: {:.6}", self.lambda_iso())?;
        write!(f, "  omega_log: {:.6}", self.omega_log())
    }
}

/// McMillan Tc，分母非正时返回 None
pub fn mcmillan_tc(lambda: f64, omega_log: f64, mustar: f64) -> Option<f64> {
    let denom = lambda - mustar * (1.0 + 0.62 * lambda);
    if !(denom > 0.0) {
        return None;
    }
    Some(omega_log / 1.2 * (-1.04 * (1.0 + lambda) / denom).exp())
}

/// 梯形积分
pub fn trapz(x: &[f64], y: &[f64]) -> f64 {
    x.windows(2)
        .zip(y.windows(2))
        .map(|(xw, yw)| 0.5 * (xw[1] - xw[0]) * (yw[0] + yw[1]))
        .sum()
}

/// 累积梯形积分（首元素为 0）
pub fn cumtrapz(x: &[f64], y: &[f64]) -> Vec<f64> {
    let mut acc = 0.0;
    let mut out = Vec::with_capacity(x.len());
    out.push(0.0);
    for (xw, yw) in x.windows(2).zip(y.windows(2)) {
        acc += 0.5 * (xw[1] - xw[0]) * (yw[0] + yw[1]);
        out.push(acc);
    }
    out
}

fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            (0..num).map(|i| start + step * i as f64).collect()
        }
    }
}
