use crate::cpu::context::{ExecContext, MiscReg};
use crate::cpu::vconfig::{self, HardwareVectorParams};
use crate::cpu::vtype::VType;
use crate::isa::VecInstr;

/// vset* 的公共写回逻辑，返回新的 vl
///
/// 请求的 vtype 与当前值不同时重新校验并写回 VTYPE；
/// 相同时沿用当前 vtype（当前非法则 vlmax 仍为 0）。
pub fn set_vsetvl_csr(
    xc: &mut dyn ExecContext,
    rd: u8,
    rs1_is_x0: bool,
    requested_vl: u32,
    requested_vtype: u32,
) -> u32 {
    let vlen = (xc.read_misc_reg(MiscReg::Vlenb) * 8) as u32;
    let elen = xc.read_misc_reg(MiscReg::Elen) as u32;
    let hw = HardwareVectorParams::from_validated(vlen, elen);

    let current = xc.read_misc_reg(MiscReg::Vtype) as u32;
    let (vtype, vlmax) = if current != requested_vtype {
        let (vtype, vlmax) = vconfig::validate(VType::decode(requested_vtype), &hw);
        xc.set_misc_reg(MiscReg::Vtype, vtype.encode() as u64);
        (vtype, vlmax)
    } else {
        let vtype = VType::decode(current);
        (vtype, vconfig::vlmax(&vtype, &hw))
    };

    let current_vl = xc.read_misc_reg(MiscReg::Vl) as u32;
    let vl = vconfig::resolve_vl(requested_vl, rd == 0, rs1_is_x0, current_vl, vlmax);
    xc.set_misc_reg(MiscReg::Vl, vl as u64);

    log::debug!(
        "vset: rd=x{} avl={} vtype=0x{:08x} ({}) vlmax={} -> vl={}",
        rd,
        requested_vl,
        vtype.encode(),
        vtype,
        vlmax,
        vl
    );
    vl
}

/// Execute vector configuration instructions. Returns true if handled.
pub fn execute(xc: &mut dyn ExecContext, instr: VecInstr) -> bool {
    match instr {
        VecInstr::Vsetvli { rd, rs1, vtypei } => {
            let avl = xc.read_int_reg(rs1);
            let vl = set_vsetvl_csr(xc, rd, rs1 == 0, avl, vtypei as u32);
            xc.set_int_reg(rd, vl);
        }
        VecInstr::Vsetivli { rd, uimm, vtypei } => {
            let vl = set_vsetvl_csr(xc, rd, false, uimm as u32, vtypei as u32);
            xc.set_int_reg(rd, vl);
        }
        VecInstr::Vsetvl { rd, rs1, rs2 } => {
            let avl = xc.read_int_reg(rs1);
            let vtype = xc.read_int_reg(rs2);
            let vl = set_vsetvl_csr(xc, rd, rs1 == 0, avl, vtype);
            xc.set_int_reg(rd, vl);
        }
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::vtype::VILL_BIT;

    /// 最小的执行上下文，便于单独测试写回逻辑
    struct MockContext {
        vl: u64,
        vtype: u64,
        vlenb: u64,
        elen: u64,
        x: [u32; 32],
    }

    impl MockContext {
        fn new(vlen: u64, elen: u64) -> Self {
            Self {
                vl: 0,
                vtype: VILL_BIT as u64,
                vlenb: vlen / 8,
                elen,
                x: [0; 32],
            }
        }
    }

    impl ExecContext for MockContext {
        fn read_misc_reg(&self, reg: MiscReg) -> u64 {
            match reg {
                MiscReg::Vl => self.vl,
                MiscReg::Vtype => self.vtype,
                MiscReg::Vlenb => self.vlenb,
                MiscReg::Elen => self.elen,
            }
        }

        fn set_misc_reg(&mut self, reg: MiscReg, value: u64) {
            match reg {
                MiscReg::Vl => self.vl = value,
                MiscReg::Vtype => self.vtype = value,
                MiscReg::Vlenb => self.vlenb = value,
                MiscReg::Elen => self.elen = value,
            }
        }

        fn read_int_reg(&self, reg: u8) -> u32 {
            if reg == 0 { 0 } else { self.x[reg as usize] }
        }

        fn set_int_reg(&mut self, reg: u8, value: u32) {
            if reg != 0 {
                self.x[reg as usize] = value;
            }
        }
    }

    #[test]
    fn test_vsetvli_writes_vl_and_vtype() {
        let mut xc = MockContext::new(256, 64);
        xc.x[11] = 5;
        // vsetvli a0, a1, e32, ta, m1, mu
        assert!(execute(&mut xc, VecInstr::Vsetvli { rd: 10, rs1: 11, vtypei: 0x50 }));
        assert_eq!(xc.vl, 5);
        assert_eq!(xc.vtype, 0x50);
        assert_eq!(xc.x[10], 5);
    }

    #[test]
    fn test_rs1_x0_rd_nonzero_sets_vlmax() {
        let mut xc = MockContext::new(256, 64);
        execute(&mut xc, VecInstr::Vsetvli { rd: 5, rs1: 0, vtypei: 0x50 });
        assert_eq!(xc.vl, 8);
        assert_eq!(xc.x[5], 8);
    }

    #[test]
    fn test_keep_vl_when_both_x0() {
        let mut xc = MockContext::new(256, 64);
        xc.x[3] = 5;
        execute(&mut xc, VecInstr::Vsetvli { rd: 1, rs1: 3, vtypei: 0x50 });
        assert_eq!(xc.vl, 5);
        // e16 m1: vlmax = 16, vl 保持 5
        execute(&mut xc, VecInstr::Vsetvli { rd: 0, rs1: 0, vtypei: 0x48 });
        assert_eq!(xc.vl, 5);
        assert_eq!(xc.vtype, 0x48);
    }

    #[test]
    fn test_vsetivli_uses_immediate() {
        let mut xc = MockContext::new(256, 64);
        // uimm = 0 也按 rs1 != x0 处理
        execute(&mut xc, VecInstr::Vsetivli { rd: 5, uimm: 0, vtypei: 0x50 });
        assert_eq!(xc.vl, 0);
        execute(&mut xc, VecInstr::Vsetivli { rd: 5, uimm: 17, vtypei: 0x50 });
        assert_eq!(xc.vl, 8);
        assert_eq!(xc.x[5], 8);
    }

    #[test]
    fn test_illegal_then_legal() {
        let mut xc = MockContext::new(256, 64);
        xc.x[11] = 100;
        xc.x[12] = 0x20; // e256 保留
        execute(&mut xc, VecInstr::Vsetvl { rd: 10, rs1: 11, rs2: 12 });
        assert_eq!(xc.vtype, VILL_BIT as u64);
        assert_eq!(xc.vl, 0);
        assert_eq!(xc.x[10], 0);

        xc.x[12] = 0x03; // e8 m8
        execute(&mut xc, VecInstr::Vsetvl { rd: 10, rs1: 11, rs2: 12 });
        assert_eq!(xc.vtype, 0x03);
        assert_eq!(xc.vl, 100);
    }

    #[test]
    fn test_unchanged_illegal_vtype_keeps_vlmax_zero() {
        let mut xc = MockContext::new(256, 64);
        xc.x[12] = VILL_BIT;
        xc.x[11] = 4;
        execute(&mut xc, VecInstr::Vsetvl { rd: 10, rs1: 11, rs2: 12 });
        assert_eq!(xc.vtype, VILL_BIT as u64);
        assert_eq!(xc.vl, 0);
    }

    #[test]
    fn test_rd_x0_result_dropped() {
        let mut xc = MockContext::new(128, 32);
        xc.x[11] = 3;
        let vl = set_vsetvl_csr(&mut xc, 0, false, 3, 0x50);
        assert_eq!(vl, 3);
        assert_eq!(xc.x[0], 0);
    }

    #[test]
    fn test_non_config_not_handled() {
        let mut xc = MockContext::new(128, 32);
        assert!(!execute(&mut xc, VecInstr::Illegal { raw: 0 }));
        assert_eq!(xc.vtype, VILL_BIT as u64);
    }
}
