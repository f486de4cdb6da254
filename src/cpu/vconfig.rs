//! 向量配置合法性检查与 vl 计算
//!
//! - `HardwareVectorParams`: 每次运行固定的 VLEN / ELEN
//! - `validate`: 把候选 vtype 折叠为合法配置或 `vill`
//! - `resolve_vl`: vset* 的四路 vl 选择策略

use std::cmp::min;

use num_rational::Ratio;

use super::vtype::VType;
use crate::error::VecError;

pub const DEFAULT_VLEN: u32 = 1024;
pub const DEFAULT_ELEN: u32 = 64;
pub const MAX_VLEN: u32 = 65536;

/// 硬件向量参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HardwareVectorParams {
    vlen: u32,
    elen: u32,
}

impl HardwareVectorParams {
    pub fn new(vlen: u32, elen: u32) -> Result<Self, VecError> {
        if !elen.is_power_of_two() || !(8..=64).contains(&elen) {
            return Err(VecError::InvalidHwParams(format!(
                "ELEN {} must be a power of two in 8..=64",
                elen
            )));
        }
        if !vlen.is_power_of_two() || vlen < elen || vlen > MAX_VLEN {
            return Err(VecError::InvalidHwParams(format!(
                "VLEN {} must be a power of two in {}..={}",
                vlen, elen, MAX_VLEN
            )));
        }
        Ok(Self { vlen, elen })
    }

    /// 从 CSR 回读的值构造，调用方保证它们来自已校验的参数
    pub(crate) const fn from_validated(vlen: u32, elen: u32) -> Self {
        Self { vlen, elen }
    }

    pub fn vlen(&self) -> u32 {
        self.vlen
    }

    pub fn elen(&self) -> u32 {
        self.elen
    }

    pub fn vlenb(&self) -> u32 {
        self.vlen / 8
    }
}

impl Default for HardwareVectorParams {
    fn default() -> Self {
        Self::from_validated(DEFAULT_VLEN, DEFAULT_ELEN)
    }
}

/// 合法时返回 SEW（bit）
fn legal_sew(candidate: &VType, hw: &HardwareVectorParams) -> Option<u32> {
    if candidate.vill || candidate.has_reserved_bits() {
        return None;
    }
    let m = candidate.vlmul.ratio();
    if m < Ratio::new(1, 8) || m > Ratio::from_integer(8) {
        return None;
    }
    let sew = candidate.vsew.bits()?;
    let bound = min(m, Ratio::from_integer(1)) * hw.elen;
    if Ratio::from_integer(sew) > bound {
        return None;
    }
    Some(sew)
}

/// 检查候选配置
///
/// 合法时原样返回候选值与 `vlmax = floor((vlen / sew) * m)`，
/// 非法时返回 `(VType::illegal(), 0)`。
pub fn validate(candidate: VType, hw: &HardwareVectorParams) -> (VType, u32) {
    match legal_sew(&candidate, hw) {
        Some(sew) => {
            let vlmax = (Ratio::from_integer(hw.vlen / sew) * candidate.vlmul.ratio()).to_integer();
            (candidate, vlmax)
        }
        None => (VType::illegal(), 0),
    }
}

/// 只读形式：非法 vtype 的 vlmax 为 0
pub fn vlmax(vtype: &VType, hw: &HardwareVectorParams) -> u32 {
    validate(*vtype, hw).1
}

/// 按 rd / rs1 是否为 x0 选择新的 vl
///
/// vsetivli 的立即数 AVL 总是按 rs1 != x0 处理。
pub fn resolve_vl(
    requested_vl: u32,
    rd_is_x0: bool,
    rs1_is_x0: bool,
    current_vl: u32,
    vlmax: u32,
) -> u32 {
    if vlmax == 0 {
        0
    } else if rs1_is_x0 && rd_is_x0 {
        // 保持当前 vl
        min(current_vl, vlmax)
    } else if rs1_is_x0 {
        vlmax
    } else {
        min(requested_vl, vlmax)
    }
}
