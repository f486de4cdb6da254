//! 向量整数算术指令解码器
//!
//! 覆盖 OPIVV / OPIVX / OPIVI / OPMVV / OPMVX 中的整数运算、
//! 归约、标量搬移、vid.v 与整寄存器搬移。
//! funct6 决定运算，funct3 决定操作数形状。

use crate::isa::fields::*;
use crate::isa::instr::VecInstr;
use crate::isa::instr_def::{
    InstrDef, TableDrivenDecoder, OPV_ARITH_MASK, OPV_UNARY_MASK, OPV_VS1_FIXED_MASK,
    OPV_VS2_FIXED_MASK, opv_match,
};

// ========== 操作数形状 ==========

fn vv(mnemonic: &'static str, raw: u32) -> VecInstr {
    VecInstr::OpVv { mnemonic, vd: rd(raw), vs2: rs2(raw), vs1: rs1(raw), vm: vm(raw) }
}

fn vx(mnemonic: &'static str, raw: u32) -> VecInstr {
    VecInstr::OpVx { mnemonic, vd: rd(raw), vs2: rs2(raw), rs1: rs1(raw), vm: vm(raw) }
}

fn vi(mnemonic: &'static str, raw: u32) -> VecInstr {
    VecInstr::OpIvi { mnemonic, vd: rd(raw), vs2: rs2(raw), imm: simm5(raw), vm: vm(raw) }
}

/// 移位量为无符号立即数
fn vi_shift(mnemonic: &'static str, raw: u32) -> VecInstr {
    VecInstr::OpIvi { mnemonic, vd: rd(raw), vs2: rs2(raw), imm: uimm5(raw) as i8, vm: vm(raw) }
}

fn vs(mnemonic: &'static str, raw: u32) -> VecInstr {
    VecInstr::Reduction { mnemonic, vd: rd(raw), vs2: rs2(raw), vs1: rs1(raw), vm: vm(raw) }
}

fn whole_reg(mnemonic: &'static str, nr: u8, raw: u32) -> VecInstr {
    VecInstr::WholeRegMove { mnemonic, nr, vd: rd(raw), vs2: rs2(raw) }
}

/// vmv<nr>r.v 的 match 值：simm5 = nr - 1，vm = 1
const fn whole_reg_match(nr: u32) -> u32 {
    opv_match(0b100111, OPIVI) | (1 << 25) | ((nr - 1) << 15)
}

// ========== 算术指令定义表 ==========

pub static RVV_ARITH_INSTRS: &[InstrDef] = &[
    // ========== 加减 ==========
    InstrDef::new("vadd.vv", OPV_ARITH_MASK, opv_match(0b000000, OPIVV), |raw| vv("vadd.vv", raw)),
    InstrDef::new("vadd.vx", OPV_ARITH_MASK, opv_match(0b000000, OPIVX), |raw| vx("vadd.vx", raw)),
    InstrDef::new("vadd.vi", OPV_ARITH_MASK, opv_match(0b000000, OPIVI), |raw| vi("vadd.vi", raw)),
    InstrDef::new("vsub.vv", OPV_ARITH_MASK, opv_match(0b000010, OPIVV), |raw| vv("vsub.vv", raw)),
    InstrDef::new("vsub.vx", OPV_ARITH_MASK, opv_match(0b000010, OPIVX), |raw| vx("vsub.vx", raw)),
    InstrDef::new("vrsub.vx", OPV_ARITH_MASK, opv_match(0b000011, OPIVX), |raw| vx("vrsub.vx", raw)),
    InstrDef::new("vrsub.vi", OPV_ARITH_MASK, opv_match(0b000011, OPIVI), |raw| vi("vrsub.vi", raw)),

    // ========== 最值 ==========
    InstrDef::new("vminu.vv", OPV_ARITH_MASK, opv_match(0b000100, OPIVV), |raw| vv("vminu.vv", raw)),
    InstrDef::new("vminu.vx", OPV_ARITH_MASK, opv_match(0b000100, OPIVX), |raw| vx("vminu.vx", raw)),
    InstrDef::new("vmin.vv", OPV_ARITH_MASK, opv_match(0b000101, OPIVV), |raw| vv("vmin.vv", raw)),
    InstrDef::new("vmin.vx", OPV_ARITH_MASK, opv_match(0b000101, OPIVX), |raw| vx("vmin.vx", raw)),
    InstrDef::new("vmaxu.vv", OPV_ARITH_MASK, opv_match(0b000110, OPIVV), |raw| vv("vmaxu.vv", raw)),
    InstrDef::new("vmaxu.vx", OPV_ARITH_MASK, opv_match(0b000110, OPIVX), |raw| vx("vmaxu.vx", raw)),
    InstrDef::new("vmax.vv", OPV_ARITH_MASK, opv_match(0b000111, OPIVV), |raw| vv("vmax.vv", raw)),
    InstrDef::new("vmax.vx", OPV_ARITH_MASK, opv_match(0b000111, OPIVX), |raw| vx("vmax.vx", raw)),

    // ========== 逻辑 ==========
    InstrDef::new("vand.vv", OPV_ARITH_MASK, opv_match(0b001001, OPIVV), |raw| vv("vand.vv", raw)),
    InstrDef::new("vand.vx", OPV_ARITH_MASK, opv_match(0b001001, OPIVX), |raw| vx("vand.vx", raw)),
    InstrDef::new("vand.vi", OPV_ARITH_MASK, opv_match(0b001001, OPIVI), |raw| vi("vand.vi", raw)),
    InstrDef::new("vor.vv", OPV_ARITH_MASK, opv_match(0b001010, OPIVV), |raw| vv("vor.vv", raw)),
    InstrDef::new("vor.vx", OPV_ARITH_MASK, opv_match(0b001010, OPIVX), |raw| vx("vor.vx", raw)),
    InstrDef::new("vor.vi", OPV_ARITH_MASK, opv_match(0b001010, OPIVI), |raw| vi("vor.vi", raw)),
    InstrDef::new("vxor.vv", OPV_ARITH_MASK, opv_match(0b001011, OPIVV), |raw| vv("vxor.vv", raw)),
    InstrDef::new("vxor.vx", OPV_ARITH_MASK, opv_match(0b001011, OPIVX), |raw| vx("vxor.vx", raw)),
    InstrDef::new("vxor.vi", OPV_ARITH_MASK, opv_match(0b001011, OPIVI), |raw| vi("vxor.vi", raw)),

    // ========== 移位 ==========
    InstrDef::new("vsll.vv", OPV_ARITH_MASK, opv_match(0b100101, OPIVV), |raw| vv("vsll.vv", raw)),
    InstrDef::new("vsll.vx", OPV_ARITH_MASK, opv_match(0b100101, OPIVX), |raw| vx("vsll.vx", raw)),
    InstrDef::new("vsll.vi", OPV_ARITH_MASK, opv_match(0b100101, OPIVI), |raw| vi_shift("vsll.vi", raw)),
    InstrDef::new("vsrl.vv", OPV_ARITH_MASK, opv_match(0b101000, OPIVV), |raw| vv("vsrl.vv", raw)),
    InstrDef::new("vsrl.vx", OPV_ARITH_MASK, opv_match(0b101000, OPIVX), |raw| vx("vsrl.vx", raw)),
    InstrDef::new("vsrl.vi", OPV_ARITH_MASK, opv_match(0b101000, OPIVI), |raw| vi_shift("vsrl.vi", raw)),
    InstrDef::new("vsra.vv", OPV_ARITH_MASK, opv_match(0b101001, OPIVV), |raw| vv("vsra.vv", raw)),
    InstrDef::new("vsra.vx", OPV_ARITH_MASK, opv_match(0b101001, OPIVX), |raw| vx("vsra.vx", raw)),
    InstrDef::new("vsra.vi", OPV_ARITH_MASK, opv_match(0b101001, OPIVI), |raw| vi_shift("vsra.vi", raw)),

    // ========== 乘除 (OPM) ==========
    InstrDef::new("vmul.vv", OPV_ARITH_MASK, opv_match(0b100101, OPMVV), |raw| vv("vmul.vv", raw)),
    InstrDef::new("vmul.vx", OPV_ARITH_MASK, opv_match(0b100101, OPMVX), |raw| vx("vmul.vx", raw)),
    InstrDef::new("vmulh.vv", OPV_ARITH_MASK, opv_match(0b100111, OPMVV), |raw| vv("vmulh.vv", raw)),
    InstrDef::new("vmulh.vx", OPV_ARITH_MASK, opv_match(0b100111, OPMVX), |raw| vx("vmulh.vx", raw)),
    InstrDef::new("vmulhu.vv", OPV_ARITH_MASK, opv_match(0b100100, OPMVV), |raw| vv("vmulhu.vv", raw)),
    InstrDef::new("vmulhu.vx", OPV_ARITH_MASK, opv_match(0b100100, OPMVX), |raw| vx("vmulhu.vx", raw)),
    InstrDef::new("vdivu.vv", OPV_ARITH_MASK, opv_match(0b100000, OPMVV), |raw| vv("vdivu.vv", raw)),
    InstrDef::new("vdivu.vx", OPV_ARITH_MASK, opv_match(0b100000, OPMVX), |raw| vx("vdivu.vx", raw)),
    InstrDef::new("vdiv.vv", OPV_ARITH_MASK, opv_match(0b100001, OPMVV), |raw| vv("vdiv.vv", raw)),
    InstrDef::new("vdiv.vx", OPV_ARITH_MASK, opv_match(0b100001, OPMVX), |raw| vx("vdiv.vx", raw)),
    InstrDef::new("vremu.vv", OPV_ARITH_MASK, opv_match(0b100010, OPMVV), |raw| vv("vremu.vv", raw)),
    InstrDef::new("vremu.vx", OPV_ARITH_MASK, opv_match(0b100010, OPMVX), |raw| vx("vremu.vx", raw)),
    InstrDef::new("vrem.vv", OPV_ARITH_MASK, opv_match(0b100011, OPMVV), |raw| vv("vrem.vv", raw)),
    InstrDef::new("vrem.vx", OPV_ARITH_MASK, opv_match(0b100011, OPMVX), |raw| vx("vrem.vx", raw)),

    // ========== 归约 ==========
    InstrDef::new("vredsum.vs", OPV_ARITH_MASK, opv_match(0b000000, OPMVV), |raw| vs("vredsum.vs", raw)),

    // ========== 单操作数 ==========
    InstrDef::new("vmv.x.s", OPV_VS1_FIXED_MASK, opv_match(0b010000, OPMVV) | (1 << 25), |raw| {
        VecInstr::UnaryToScalar { mnemonic: "vmv.x.s", rd: rd(raw), vs2: rs2(raw), vm: vm(raw) }
    }),
    InstrDef::new("vmv.s.x", OPV_VS2_FIXED_MASK, opv_match(0b010000, OPMVX) | (1 << 25), |raw| {
        VecInstr::UnaryFromScalar { mnemonic: "vmv.s.x", vd: rd(raw), rs1: rs1(raw), vm: vm(raw) }
    }),
    InstrDef::new("vid.v", OPV_UNARY_MASK, opv_match(0b010100, OPMVV) | (0b10001 << 15), |raw| {
        VecInstr::MaskUnary { mnemonic: "vid.v", vd: rd(raw), vm: vm(raw) }
    }),

    // ========== 整寄存器搬移 ==========
    InstrDef::new("vmv1r.v", OPV_VS1_FIXED_MASK, whole_reg_match(1), |raw| whole_reg("vmv1r.v", 1, raw)),
    InstrDef::new("vmv2r.v", OPV_VS1_FIXED_MASK, whole_reg_match(2), |raw| whole_reg("vmv2r.v", 2, raw)),
    InstrDef::new("vmv4r.v", OPV_VS1_FIXED_MASK, whole_reg_match(4), |raw| whole_reg("vmv4r.v", 4, raw)),
    InstrDef::new("vmv8r.v", OPV_VS1_FIXED_MASK, whole_reg_match(8), |raw| whole_reg("vmv8r.v", 8, raw)),
];

pub static RVV_ARITH_OPCODES: [u32; 1] = [OP_V];

/// 算术指令解码器，与配置解码器共享 OP-V
pub static RVV_ARITH_DECODER: TableDrivenDecoder =
    TableDrivenDecoder::new("rvv-arith", RVV_ARITH_INSTRS, Some(&RVV_ARITH_OPCODES), true);
