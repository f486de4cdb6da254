//! 执行上下文接口
//!
//! 向量配置指令只通过 `ExecContext` 读写架构状态，
//! 上游流水线（或本 crate 的 `Hart`）负责提供实现。

use super::csr_def::{CSR_VL, CSR_VLENB, CSR_VTYPE};

/// 向量引擎访问的杂项寄存器
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MiscReg {
    Vl,
    Vtype,
    Vlenb,
    /// 硬件参数，不对应任何 CSR 地址
    Elen,
}

impl MiscReg {
    pub fn csr_addr(self) -> Option<u16> {
        match self {
            MiscReg::Vl => Some(CSR_VL),
            MiscReg::Vtype => Some(CSR_VTYPE),
            MiscReg::Vlenb => Some(CSR_VLENB),
            MiscReg::Elen => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MiscReg::Vl => "vl",
            MiscReg::Vtype => "vtype",
            MiscReg::Vlenb => "vlenb",
            MiscReg::Elen => "elen",
        }
    }
}

/// 单个 hart 的架构状态访问接口
pub trait ExecContext {
    fn read_misc_reg(&self, reg: MiscReg) -> u64;

    fn set_misc_reg(&mut self, reg: MiscReg, value: u64);

    fn read_int_reg(&self, reg: u8) -> u32;

    /// 写 x0 必须被丢弃
    fn set_int_reg(&mut self, reg: u8, value: u32);
}
