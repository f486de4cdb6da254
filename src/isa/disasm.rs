//! 反汇编输出
//!
//! 每行格式：`0x<8 位小写十六进制> <助记符> <操作数>`。
//! vm 位为 0 时在操作数末尾追加 `, v0`。

use super::instr::VecInstr;
use super::regnames::RegNameTable;
use crate::cpu::vtype::VType;

/// 空操作微指令的助记符
pub const NOP_MNEMONIC: &str = "vnop";

fn mask_suffix(vm: bool) -> &'static str {
    if vm { "" } else { ", v0" }
}

/// 生成操作数部分（不含助记符），无操作数时返回空串
pub fn operands(instr: &VecInstr, names: &RegNameTable) -> String {
    let x = |r: u8| names.int(r);
    let v = |r: u8| names.vec(r);
    match *instr {
        VecInstr::Vsetvli { rd, rs1, vtypei } => {
            format!("{}, {}, {}", x(rd), x(rs1), VType::decode(vtypei as u32))
        }
        VecInstr::Vsetivli { rd, uimm, vtypei } => {
            format!("{}, {}, {}", x(rd), uimm, VType::decode(vtypei as u32))
        }
        VecInstr::Vsetvl { rd, rs1, rs2 } => format!("{}, {}, {}", x(rd), x(rs1), v(rs2)),
        VecInstr::OpIvi { vd, vs2, imm, vm, .. } => {
            format!("{}, {}, {}{}", v(vd), v(vs2), imm, mask_suffix(vm))
        }
        VecInstr::OpVv { vd, vs2, vs1, vm, .. } | VecInstr::Reduction { vd, vs2, vs1, vm, .. } => {
            format!("{}, {}, {}{}", v(vd), v(vs2), v(vs1), mask_suffix(vm))
        }
        VecInstr::OpVx { vd, vs2, rs1, vm, .. } => {
            format!("{}, {}, {}{}", v(vd), v(vs2), x(rs1), mask_suffix(vm))
        }
        VecInstr::UnaryFromScalar { vd, rs1, vm, .. } => {
            format!("{}, {}{}", v(vd), x(rs1), mask_suffix(vm))
        }
        VecInstr::UnaryToScalar { rd, vs2, vm, .. } => {
            format!("{}, {}{}", x(rd), v(vs2), mask_suffix(vm))
        }
        VecInstr::MaskUnary { vd, vm, .. } => format!("{}{}", v(vd), mask_suffix(vm)),
        VecInstr::WholeRegMove { vd, vs2, .. } => format!("{}, {}", v(vd), v(vs2)),
        VecInstr::UnitStrideLoad { vd: reg, rs1, vm, .. }
        | VecInstr::UnitStrideStore { vs3: reg, rs1, vm, .. } => {
            format!("{}, ({}){}", v(reg), x(rs1), mask_suffix(vm))
        }
        VecInstr::IndexedLoad { vd: reg, rs1, vs2, vm, .. }
        | VecInstr::IndexedStore { vs3: reg, rs1, vs2, vm, .. } => {
            format!("{}, ({}), {}{}", v(reg), x(rs1), v(vs2), mask_suffix(vm))
        }
        VecInstr::Illegal { .. } => String::new(),
    }
}

/// 渲染一条完整的反汇编行
pub fn render(raw: u32, instr: &VecInstr, names: &RegNameTable) -> String {
    let ops = operands(instr, names);
    if ops.is_empty() {
        format!("0x{:08x} {}", raw, instr.mnemonic())
    } else {
        format!("0x{:08x} {} {}", raw, instr.mnemonic(), ops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_polarity() {
        let names = RegNameTable::default();
        let masked = VecInstr::OpVv { mnemonic: "vadd.vv", vd: 1, vs2: 2, vs1: 3, vm: false };
        let unmasked = VecInstr::OpVv { mnemonic: "vadd.vv", vd: 1, vs2: 2, vs1: 3, vm: true };
        assert_eq!(render(0x002180D7, &masked, &names), "0x002180d7 vadd.vv v1, v2, v3, v0");
        assert_eq!(render(0x022180D7, &unmasked, &names), "0x022180d7 vadd.vv v1, v2, v3");
    }

    #[test]
    fn test_whole_reg_move_has_no_mask() {
        let names = RegNameTable::default();
        let mv = VecInstr::WholeRegMove { mnemonic: "vmv2r.v", nr: 2, vd: 2, vs2: 6 };
        assert_eq!(render(0x9E60B157, &mv, &names), "0x9e60b157 vmv2r.v v2, v6");
    }

    #[test]
    fn test_illegal_renders_mnemonic_only() {
        let names = RegNameTable::default();
        assert_eq!(
            render(0xFFFF_FFFF, &VecInstr::Illegal { raw: 0xFFFF_FFFF }, &names),
            "0xffffffff illegal"
        );
    }

    #[test]
    fn test_numeric_int_names() {
        let names = RegNameTable::NUMERIC;
        let ld = VecInstr::UnitStrideLoad {
            mnemonic: "vle32.v",
            eew: crate::cpu::vtype::ElementWidth::E32,
            vd: 4,
            rs1: 10,
            vm: true,
        };
        assert_eq!(render(0x02056207, &ld, &names), "0x02056207 vle32.v v4, (x10)");
    }
}
