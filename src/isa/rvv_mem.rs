//! 向量访存指令解码器
//!
//! 向量访存复用 LOAD-FP / STORE-FP opcode，width 为 000/101/110/111。
//! 只支持 nf = 0、mew = 0 的单位步长与索引（有序/无序）形式。

use crate::cpu::vtype::ElementWidth;
use crate::cpu::vtype::ElementWidth::{E8, E16, E32, E64};
use crate::isa::fields::*;
use crate::isa::instr::VecInstr;
use crate::isa::instr_def::{InstrDef, TableDrivenDecoder, INDEXED_MASK, UNIT_STRIDE_MASK, mem_match};

const W8: u32 = 0b000;
const W16: u32 = 0b101;
const W32: u32 = 0b110;
const W64: u32 = 0b111;

fn unit_load(mnemonic: &'static str, eew: ElementWidth, raw: u32) -> VecInstr {
    VecInstr::UnitStrideLoad { mnemonic, eew, vd: rd(raw), rs1: rs1(raw), vm: vm(raw) }
}

fn unit_store(mnemonic: &'static str, eew: ElementWidth, raw: u32) -> VecInstr {
    VecInstr::UnitStrideStore { mnemonic, eew, vs3: rd(raw), rs1: rs1(raw), vm: vm(raw) }
}

fn indexed_load(mnemonic: &'static str, ordered: bool, eew: ElementWidth, raw: u32) -> VecInstr {
    VecInstr::IndexedLoad { mnemonic, ordered, eew, vd: rd(raw), rs1: rs1(raw), vs2: rs2(raw), vm: vm(raw) }
}

fn indexed_store(mnemonic: &'static str, ordered: bool, eew: ElementWidth, raw: u32) -> VecInstr {
    VecInstr::IndexedStore { mnemonic, ordered, eew, vs3: rd(raw), rs1: rs1(raw), vs2: rs2(raw), vm: vm(raw) }
}

/// 访存指令定义表
pub static RVV_MEM_INSTRS: &[InstrDef] = &[
    // ========== 单位步长加载 ==========
    InstrDef::new("vle8.v", UNIT_STRIDE_MASK, mem_match(MOP_UNIT_STRIDE, W8, OP_LOAD_FP), |raw| unit_load("vle8.v", E8, raw)),
    InstrDef::new("vle16.v", UNIT_STRIDE_MASK, mem_match(MOP_UNIT_STRIDE, W16, OP_LOAD_FP), |raw| unit_load("vle16.v", E16, raw)),
    InstrDef::new("vle32.v", UNIT_STRIDE_MASK, mem_match(MOP_UNIT_STRIDE, W32, OP_LOAD_FP), |raw| unit_load("vle32.v", E32, raw)),
    InstrDef::new("vle64.v", UNIT_STRIDE_MASK, mem_match(MOP_UNIT_STRIDE, W64, OP_LOAD_FP), |raw| unit_load("vle64.v", E64, raw)),

    // ========== 单位步长存储 ==========
    InstrDef::new("vse8.v", UNIT_STRIDE_MASK, mem_match(MOP_UNIT_STRIDE, W8, OP_STORE_FP), |raw| unit_store("vse8.v", E8, raw)),
    InstrDef::new("vse16.v", UNIT_STRIDE_MASK, mem_match(MOP_UNIT_STRIDE, W16, OP_STORE_FP), |raw| unit_store("vse16.v", E16, raw)),
    InstrDef::new("vse32.v", UNIT_STRIDE_MASK, mem_match(MOP_UNIT_STRIDE, W32, OP_STORE_FP), |raw| unit_store("vse32.v", E32, raw)),
    InstrDef::new("vse64.v", UNIT_STRIDE_MASK, mem_match(MOP_UNIT_STRIDE, W64, OP_STORE_FP), |raw| unit_store("vse64.v", E64, raw)),

    // ========== 无序索引 ==========
    InstrDef::new("vluxei8.v", INDEXED_MASK, mem_match(MOP_INDEXED_UNORDERED, W8, OP_LOAD_FP), |raw| indexed_load("vluxei8.v", false, E8, raw)),
    InstrDef::new("vluxei16.v", INDEXED_MASK, mem_match(MOP_INDEXED_UNORDERED, W16, OP_LOAD_FP), |raw| indexed_load("vluxei16.v", false, E16, raw)),
    InstrDef::new("vluxei32.v", INDEXED_MASK, mem_match(MOP_INDEXED_UNORDERED, W32, OP_LOAD_FP), |raw| indexed_load("vluxei32.v", false, E32, raw)),
    InstrDef::new("vluxei64.v", INDEXED_MASK, mem_match(MOP_INDEXED_UNORDERED, W64, OP_LOAD_FP), |raw| indexed_load("vluxei64.v", false, E64, raw)),
    InstrDef::new("vsuxei8.v", INDEXED_MASK, mem_match(MOP_INDEXED_UNORDERED, W8, OP_STORE_FP), |raw| indexed_store("vsuxei8.v", false, E8, raw)),
    InstrDef::new("vsuxei16.v", INDEXED_MASK, mem_match(MOP_INDEXED_UNORDERED, W16, OP_STORE_FP), |raw| indexed_store("vsuxei16.v", false, E16, raw)),
    InstrDef::new("vsuxei32.v", INDEXED_MASK, mem_match(MOP_INDEXED_UNORDERED, W32, OP_STORE_FP), |raw| indexed_store("vsuxei32.v", false, E32, raw)),
    InstrDef::new("vsuxei64.v", INDEXED_MASK, mem_match(MOP_INDEXED_UNORDERED, W64, OP_STORE_FP), |raw| indexed_store("vsuxei64.v", false, E64, raw)),

    // ========== 有序索引 ==========
    InstrDef::new("vloxei8.v", INDEXED_MASK, mem_match(MOP_INDEXED_ORDERED, W8, OP_LOAD_FP), |raw| indexed_load("vloxei8.v", true, E8, raw)),
    InstrDef::new("vloxei16.v", INDEXED_MASK, mem_match(MOP_INDEXED_ORDERED, W16, OP_LOAD_FP), |raw| indexed_load("vloxei16.v", true, E16, raw)),
    InstrDef::new("vloxei32.v", INDEXED_MASK, mem_match(MOP_INDEXED_ORDERED, W32, OP_LOAD_FP), |raw| indexed_load("vloxei32.v", true, E32, raw)),
    InstrDef::new("vloxei64.v", INDEXED_MASK, mem_match(MOP_INDEXED_ORDERED, W64, OP_LOAD_FP), |raw| indexed_load("vloxei64.v", true, E64, raw)),
    InstrDef::new("vsoxei8.v", INDEXED_MASK, mem_match(MOP_INDEXED_ORDERED, W8, OP_STORE_FP), |raw| indexed_store("vsoxei8.v", true, E8, raw)),
    InstrDef::new("vsoxei16.v", INDEXED_MASK, mem_match(MOP_INDEXED_ORDERED, W16, OP_STORE_FP), |raw| indexed_store("vsoxei16.v", true, E16, raw)),
    InstrDef::new("vsoxei32.v", INDEXED_MASK, mem_match(MOP_INDEXED_ORDERED, W32, OP_STORE_FP), |raw| indexed_store("vsoxei32.v", true, E32, raw)),
    InstrDef::new("vsoxei64.v", INDEXED_MASK, mem_match(MOP_INDEXED_ORDERED, W64, OP_STORE_FP), |raw| indexed_store("vsoxei64.v", true, E64, raw)),
];

pub static RVV_MEM_OPCODES: [u32; 2] = [OP_LOAD_FP, OP_STORE_FP];

/// 访存解码器，独占 LOAD-FP / STORE-FP 中的向量 width 编码
pub static RVV_MEM_DECODER: TableDrivenDecoder =
    TableDrivenDecoder::new("rvv-mem", RVV_MEM_INSTRS, Some(&RVV_MEM_OPCODES), false);
