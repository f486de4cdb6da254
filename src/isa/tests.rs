//! ISA 模块测试：解码与反汇编金标准

use super::*;
use crate::cpu::vtype::ElementWidth;

fn disasm(raw: u32) -> String {
    MacroOp::new(decode(raw)).unwrap().disassemble(&RegNameTable::ABI)
}

#[test]
fn test_decode_vsetvli() {
    let decoded = decode(0x0505F557); // vsetvli a0, a1, e32, ta, m1, mu
    assert_eq!(decoded.instr, VecInstr::Vsetvli { rd: 10, rs1: 11, vtypei: 0x50 });
}

#[test]
fn test_decode_vsetivli() {
    let decoded = decode(0xCCA8F2D7); // vsetivli t0, 17, e16, ta, m4, ma
    assert_eq!(decoded.instr, VecInstr::Vsetivli { rd: 5, uimm: 17, vtypei: 0xCA });
}

#[test]
fn test_decode_vsetvl() {
    let decoded = decode(0x80C5F557); // vsetvl a0, a1, a2
    assert_eq!(decoded.instr, VecInstr::Vsetvl { rd: 10, rs1: 11, rs2: 12 });
}

#[test]
fn test_decode_vadd_vi_negative_imm() {
    let decoded = decode(0x028EB257); // vadd.vi v4, v8, -3
    assert_eq!(
        decoded.instr,
        VecInstr::OpIvi { mnemonic: "vadd.vi", vd: 4, vs2: 8, imm: -3, vm: true }
    );
}

#[test]
fn test_disasm_shift_immediate_is_unsigned() {
    assert_eq!(disasm(0x968FB257), "0x968fb257 vsll.vi v4, v8, 31");
    assert_eq!(disasm(0xA2883257), "0xa2883257 vsrl.vi v4, v8, 16");
    assert_eq!(disasm(0xA68FB257), "0xa68fb257 vsra.vi v4, v8, 31");
    // 非移位的 .vi 仍按 simm5 处理
    assert_eq!(disasm(0x028FB257), "0x028fb257 vadd.vi v4, v8, -1");
}

#[test]
fn test_decode_indexed_ordering() {
    match decode(0x0E666107).instr {
        VecInstr::IndexedLoad { ordered, eew, vd, rs1, vs2, vm, .. } => {
            assert!(ordered);
            assert_eq!(eew, ElementWidth::E32);
            assert_eq!((vd, rs1, vs2, vm), (2, 12, 6, true));
        }
        other => panic!("unexpected {:?}", other),
    }
    match decode(0x065681A7).instr {
        VecInstr::IndexedStore { ordered, eew, .. } => {
            assert!(!ordered);
            assert_eq!(eew, ElementWidth::E8);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_decode_non_vector_is_illegal() {
    assert!(decode(0x00000013).instr.is_illegal()); // addi x0, x0, 0
    assert!(decode(0x00052087).instr.is_illegal()); // flw ft1, 0(a0)
    // 分段加载 nf = 1 不支持
    assert!(decode(0x22056207).instr.is_illegal());
    // 跨步访存 mop = 10 不支持
    assert!(decode(0x0A056207).instr.is_illegal());
    // vmv.x.s 要求 vm = 1
    assert!(decode(0x40202557).instr.is_illegal());
}

#[test]
fn test_registry_matches_free_function() {
    let registry = DecoderRegistry::with_rvv();
    for raw in [0x002180D7, 0x0505F557, 0x02056207, 0x9E7030D7, 0x00000013, 0x0CA774A7] {
        assert_eq!(registry.decode(raw), decode(raw), "raw 0x{:08x}", raw);
    }
}

#[test]
fn test_disasm_config() {
    assert_eq!(disasm(0x0505F557), "0x0505f557 vsetvli a0, a1, e32, ta, m1, mu");
    assert_eq!(disasm(0x08707057), "0x08707057 vsetvli zero, zero, e8, tu, mf2, ma");
    assert_eq!(disasm(0x0DB67357), "0x0db67357 vsetvli t1, a2, e64, ta, m8, ma");
    assert_eq!(disasm(0xCCA8F2D7), "0xcca8f2d7 vsetivli t0, 17, e16, ta, m4, ma");
    // rs2 字段按向量寄存器名显示
    assert_eq!(disasm(0x80C5F557), "0x80c5f557 vsetvl a0, a1, v12");
}

#[test]
fn test_disasm_reserved_lmul_has_no_token() {
    // vtypei = 0x004：e8, tu, vlmul=100, mu
    assert_eq!(disasm(0x0045F557), "0x0045f557 vsetvli a0, a1, e8, tu, mu");
}

#[test]
fn test_disasm_arith() {
    assert_eq!(disasm(0x002180D7), "0x002180d7 vadd.vv v1, v2, v3, v0");
    assert_eq!(disasm(0x022180D7), "0x022180d7 vadd.vv v1, v2, v3");
    assert_eq!(disasm(0x028EB257), "0x028eb257 vadd.vi v4, v8, -3");
    assert_eq!(disasm(0x0082B257), "0x0082b257 vadd.vi v4, v8, 5, v0");
    assert_eq!(disasm(0x0A454157), "0x0a454157 vsub.vx v2, v4, a0");
    assert_eq!(disasm(0x970C2457), "0x970c2457 vmul.vv v8, v16, v24");
    assert_eq!(disasm(0x9502E457), "0x9502e457 vmul.vx v8, v16, t0, v0");
    assert_eq!(disasm(0x0221A0D7), "0x0221a0d7 vredsum.vs v1, v2, v3");
}

#[test]
fn test_disasm_moves() {
    assert_eq!(disasm(0x42202557), "0x42202557 vmv.x.s a0, v2");
    assert_eq!(disasm(0x4205E1D7), "0x4205e1d7 vmv.s.x v3, a1");
    assert_eq!(disasm(0x5008A2D7), "0x5008a2d7 vid.v v5, v0");
    assert_eq!(disasm(0x5208A257), "0x5208a257 vid.v v4");
    assert_eq!(disasm(0x9E7030D7), "0x9e7030d7 vmv1r.v v1, v7");
    assert_eq!(disasm(0x9E60B157), "0x9e60b157 vmv2r.v v2, v6");
    assert_eq!(disasm(0x9E81B257), "0x9e81b257 vmv4r.v v4, v8");
}

#[test]
fn test_disasm_memory() {
    assert_eq!(disasm(0x02056207), "0x02056207 vle32.v v4, (a0)");
    assert_eq!(disasm(0x00010087), "0x00010087 vle8.v v1, (sp), v0");
    assert_eq!(disasm(0x0205F427), "0x0205f427 vse64.v v8, (a1)");
    assert_eq!(disasm(0x04855207), "0x04855207 vluxei16.v v4, (a0), v8, v0");
    assert_eq!(disasm(0x0E666107), "0x0e666107 vloxei32.v v2, (a2), v6");
    assert_eq!(disasm(0x065681A7), "0x065681a7 vsuxei8.v v3, (a3), v5");
    assert_eq!(disasm(0x0CA774A7), "0x0ca774a7 vsoxei64.v v9, (a4), v10, v0");
}

#[test]
fn test_every_table_entry_decodes_to_its_name() {
    for table in [RVV_CFG_INSTRS, RVV_ARITH_INSTRS, RVV_MEM_INSTRS] {
        for def in table {
            assert_eq!(decode(def.match_val).instr.mnemonic(), def.name, "{:?}", def);
        }
    }
}
