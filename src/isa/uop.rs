//! 宏指令与微指令
//!
//! 一条向量指令（宏指令）按寄存器组拆分成若干微指令：
//! 第 i 条微指令的向量寄存器字段前移 i，只处理该寄存器内的元素。
//! `vl == 0` 时只产生一条空操作微指令。

use std::cmp::{max, min};

use num_rational::Ratio;

use super::disasm::{self, NOP_MNEMONIC};
use super::instr::{DecodedInstr, VariantKind, VecInstr};
use super::regnames::RegNameTable;
use crate::cpu::vconfig::{self, HardwareVectorParams};
use crate::cpu::vtype::{ElementWidth, VType};
use crate::error::VecError;

/// 指令发射时生效的向量配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveConfig {
    pub vtype: VType,
    pub vl: u32,
}

/// 宏指令：只能由合法解码结果构造
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacroOp {
    raw: u32,
    instr: VecInstr,
}

/// 微指令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicroOp {
    Op {
        raw: u32,
        instr: VecInstr,
        index: u8,
        micro_vl: u32,
    },
    Nop {
        raw: u32,
    },
}

/// 寄存器组必须按组大小对齐
fn check_group(reg: u8, group: u32) -> Result<(), VecError> {
    if (reg as u32) % group != 0 {
        return Err(VecError::MisalignedGroup { reg, group });
    }
    Ok(())
}

impl MacroOp {
    pub fn new(decoded: DecodedInstr) -> Result<Self, VecError> {
        if decoded.instr.is_illegal() {
            return Err(VecError::NotAVectorInstr(decoded.raw));
        }
        Ok(Self {
            raw: decoded.raw,
            instr: decoded.instr,
        })
    }

    pub fn raw(&self) -> u32 {
        self.raw
    }

    pub fn instr(&self) -> &VecInstr {
        &self.instr
    }

    pub fn kind(&self) -> VariantKind {
        self.instr.kind()
    }

    pub fn disassemble(&self, names: &RegNameTable) -> String {
        disasm::render(self.raw, &self.instr, names)
    }

    /// 当前 vtype 合法时返回 SEW（bit）
    fn require_sew(&self, cfg: &ActiveConfig, hw: &HardwareVectorParams) -> Result<u32, VecError> {
        let (vtype, _) = vconfig::validate(cfg.vtype, hw);
        if vtype.vill {
            return Err(VecError::IllegalVtype(self.raw));
        }
        vtype.vsew.bits().ok_or(VecError::IllegalVtype(self.raw))
    }

    /// 访存操作数的有效分组倍数 EMUL = EEW / SEW * LMUL
    fn emul(&self, eew: ElementWidth, sew: u32, cfg: &ActiveConfig) -> Result<Ratio<u32>, VecError> {
        let eew_bits = eew.bits().ok_or(VecError::NotAVectorInstr(self.raw))?;
        let emul = Ratio::new(eew_bits, sew) * cfg.vtype.vlmul.ratio();
        if emul < Ratio::new(1, 8) || emul > Ratio::from_integer(8) {
            return Err(VecError::EmulOutOfRange {
                raw: self.raw,
                emul: emul.to_string(),
            });
        }
        Ok(emul)
    }

    fn micro(&self, index: u8, index_reg_step: u8, micro_vl: u32) -> MicroOp {
        MicroOp::Op {
            raw: self.raw,
            instr: self.instr.advance(index, index_reg_step),
            index,
            micro_vl,
        }
    }

    /// 按寄存器拆分 vl 个元素，元素耗尽即停止
    fn split(&self, vl: u32, regs: u32, elems_per_reg: u32, index_step: impl Fn(u32) -> u8) -> Vec<MicroOp> {
        if vl == 0 {
            return vec![MicroOp::Nop { raw: self.raw }];
        }
        let mut ops = Vec::with_capacity(regs as usize);
        let mut remaining = vl;
        for i in 0..regs {
            if remaining == 0 {
                break;
            }
            let micro_vl = min(remaining, elems_per_reg);
            ops.push(self.micro(i as u8, index_step(i), micro_vl));
            remaining -= micro_vl;
        }
        ops
    }

    /// 展开为微指令序列
    pub fn expand(&self, cfg: &ActiveConfig, hw: &HardwareVectorParams) -> Result<Vec<MicroOp>, VecError> {
        match self.instr {
            VecInstr::Vsetvli { .. } | VecInstr::Vsetivli { .. } | VecInstr::Vsetvl { .. } => {
                Ok(vec![self.micro(0, 0, cfg.vl)])
            }
            // 整寄存器搬移与 vtype/vl 无关
            VecInstr::WholeRegMove { nr, vd, vs2, .. } => {
                check_group(vd, nr as u32)?;
                check_group(vs2, nr as u32)?;
                Ok((0..nr).map(|i| self.micro(i, 0, hw.vlenb())).collect())
            }
            VecInstr::Illegal { raw } => Err(VecError::NotAVectorInstr(raw)),
            VecInstr::UnaryToScalar { .. } => {
                self.require_sew(cfg, hw)?;
                Ok(vec![self.micro(0, 0, 1)])
            }
            VecInstr::UnaryFromScalar { .. } => {
                self.require_sew(cfg, hw)?;
                if cfg.vl == 0 {
                    Ok(vec![MicroOp::Nop { raw: self.raw }])
                } else {
                    Ok(vec![self.micro(0, 0, 1)])
                }
            }
            VecInstr::OpIvi { vd, vs2, .. } | VecInstr::OpVx { vd, vs2, .. } => {
                let sew = self.require_sew(cfg, hw)?;
                let regs = cfg.vtype.vlmul.group_regs();
                check_group(vd, regs)?;
                check_group(vs2, regs)?;
                Ok(self.split(cfg.vl, regs, hw.vlen() / sew, |_| 0))
            }
            VecInstr::OpVv { vd, vs2, vs1, .. } => {
                let sew = self.require_sew(cfg, hw)?;
                let regs = cfg.vtype.vlmul.group_regs();
                check_group(vd, regs)?;
                check_group(vs2, regs)?;
                check_group(vs1, regs)?;
                Ok(self.split(cfg.vl, regs, hw.vlen() / sew, |_| 0))
            }
            VecInstr::Reduction { vs2, .. } => {
                let sew = self.require_sew(cfg, hw)?;
                let regs = cfg.vtype.vlmul.group_regs();
                check_group(vs2, regs)?;
                Ok(self.split(cfg.vl, regs, hw.vlen() / sew, |_| 0))
            }
            VecInstr::MaskUnary { vd, .. } => {
                let sew = self.require_sew(cfg, hw)?;
                let regs = cfg.vtype.vlmul.group_regs();
                check_group(vd, regs)?;
                Ok(self.split(cfg.vl, regs, hw.vlen() / sew, |_| 0))
            }
            VecInstr::UnitStrideLoad { eew, vd: reg, .. } | VecInstr::UnitStrideStore { eew, vs3: reg, .. } => {
                let sew = self.require_sew(cfg, hw)?;
                let emul = self.emul(eew, sew, cfg)?;
                let regs = max(1, emul.to_integer());
                check_group(reg, regs)?;
                let eew_bits = eew.bits().ok_or(VecError::NotAVectorInstr(self.raw))?;
                Ok(self.split(cfg.vl, regs, hw.vlen() / eew_bits, |_| 0))
            }
            VecInstr::IndexedLoad { eew, vd: reg, vs2, .. } | VecInstr::IndexedStore { eew, vs3: reg, vs2, .. } => {
                let sew = self.require_sew(cfg, hw)?;
                let index_emul = self.emul(eew, sew, cfg)?;
                let data_regs = cfg.vtype.vlmul.group_regs();
                check_group(reg, data_regs)?;
                check_group(vs2, max(1, index_emul.to_integer()))?;
                let eew_bits = eew.bits().ok_or(VecError::NotAVectorInstr(self.raw))?;
                Ok(self.split(cfg.vl, data_regs, hw.vlen() / sew, |i| (i * eew_bits / sew) as u8))
            }
        }
    }
}

impl MicroOp {
    pub fn raw(&self) -> u32 {
        match *self {
            MicroOp::Op { raw, .. } | MicroOp::Nop { raw } => raw,
        }
    }

    /// 空操作没有指令体
    pub fn instr(&self) -> Option<&VecInstr> {
        match self {
            MicroOp::Op { instr, .. } => Some(instr),
            MicroOp::Nop { .. } => None,
        }
    }

    pub fn index(&self) -> u8 {
        match *self {
            MicroOp::Op { index, .. } => index,
            MicroOp::Nop { .. } => 0,
        }
    }

    pub fn micro_vl(&self) -> u32 {
        match *self {
            MicroOp::Op { micro_vl, .. } => micro_vl,
            MicroOp::Nop { .. } => 0,
        }
    }

    pub fn is_nop(&self) -> bool {
        matches!(self, MicroOp::Nop { .. })
    }

    pub fn disassemble(&self, names: &RegNameTable) -> String {
        match self {
            MicroOp::Op { raw, instr, .. } => disasm::render(*raw, instr, names),
            MicroOp::Nop { .. } => NOP_MNEMONIC.to_string(),
        }
    }
}
