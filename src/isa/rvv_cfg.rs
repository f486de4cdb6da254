//! 向量配置指令（OPCFG）解码器
//!
//! vsetvli / vsetivli / vsetvl 共用 OP-V funct3 = 111，按高位区分：
//! - bit31 = 0: vsetvli，zimm[10:0] 在 [30:20]
//! - bit31:30 = 11: vsetivli，uimm 在 rs1 位置，zimm[9:0] 在 [29:20]
//! - bit31:25 = 1000000: vsetvl

use crate::isa::fields::*;
use crate::isa::instr::VecInstr;
use crate::isa::instr_def::{InstrDef, TableDrivenDecoder, VSETIVLI_MASK, VSETVLI_MASK, VSETVL_MASK};

const CFG_MATCH: u32 = (OPCFG << 12) | OP_V;

/// 配置指令定义表
pub static RVV_CFG_INSTRS: &[InstrDef] = &[
    InstrDef::new("vsetvli", VSETVLI_MASK, CFG_MATCH, |raw| VecInstr::Vsetvli {
        rd: rd(raw),
        rs1: rs1(raw),
        vtypei: zimm11(raw),
    }),
    InstrDef::new("vsetivli", VSETIVLI_MASK, 0xC000_0000 | CFG_MATCH, |raw| VecInstr::Vsetivli {
        rd: rd(raw),
        uimm: rs1(raw),
        vtypei: zimm10(raw),
    }),
    InstrDef::new("vsetvl", VSETVL_MASK, 0x8000_0000 | CFG_MATCH, |raw| VecInstr::Vsetvl {
        rd: rd(raw),
        rs1: rs1(raw),
        rs2: rs2(raw),
    }),
];

pub static RVV_CFG_OPCODES: [u32; 1] = [OP_V];

/// 配置指令解码器，与算术解码器共享 OP-V
pub static RVV_CFG_DECODER: TableDrivenDecoder =
    TableDrivenDecoder::new("rvv-cfg", RVV_CFG_INSTRS, Some(&RVV_CFG_OPCODES), true);
