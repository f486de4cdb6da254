//! 向量 hart 与发射引擎
//!
//! 本模块定义单个 hart 的向量配置状态 `Hart`：
//! 整数寄存器文件、向量 CSR 以及指令解码器。
//! 每条指令经过 解码 → 执行 vset* → 按当前配置拆分微指令 三步，
//! 不维护向量寄存器数据。

use std::sync::Arc;

use crate::isa::{ActiveConfig, DecodedInstr, DecoderRegistry, MacroOp, MicroOp};
use crate::error::VecError;

mod exu;
pub mod context;
pub mod csr_def;
pub mod vconfig;
pub mod vtype;
mod status;
mod builder;

use context::{ExecContext, MiscReg};
use csr_def::{CSR_VL, CSR_VLENB, CSR_VTYPE, V_CSRS};
use status::Status;
use vconfig::HardwareVectorParams;
use vtype::VType;

pub use builder::HartBuilder;
pub use exu::vcfg::set_vsetvl_csr;
pub use status::{CsrEntry, StatusSnapshot};

/// hart 执行状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HartState {
    /// 正常运行中
    Running,
    /// 遇到非法指令（含当前配置下无法发射的向量指令）
    IllegalInstruction(u32),
}

/// 一次成功发射的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issued {
    pub macro_op: MacroOp,
    pub micro_ops: Vec<MicroOp>,
}

/// 单个 hart 的向量配置状态
///
/// 设计约定：
/// - x0 永远为 0，写入时丢弃
/// - 复位后 vtype = vill，vl = 0，vlenb = VLEN/8
/// - 遇到非法指令后停止发射，直到调用 `set_state` 恢复
pub struct Hart {
    /// 架构状态（整数寄存器 + 向量 CSR）
    status: Status,
    hw: HardwareVectorParams,
    state: HartState,
    decoder: Arc<DecoderRegistry>,
    /// 已成功发射的宏指令数
    retired: u64,
}

impl Hart {
    /// 使用完整向量解码器创建 hart
    ///
    /// # 示例
    ///
    /// ```
    /// use rvv_sim::cpu::Hart;
    /// use rvv_sim::cpu::vconfig::HardwareVectorParams;
    ///
    /// let hart = Hart::new(HardwareVectorParams::new(256, 64).unwrap());
    /// assert_eq!(hart.vl(), 0);
    /// assert!(hart.vtype().vill);
    /// ```
    pub fn new(hw: HardwareVectorParams) -> Self {
        let mut status = Status::new();
        status.csr.register(V_CSRS);
        status.csr_write(CSR_VLENB, hw.vlenb());
        Self::with_config(status, hw, Arc::new(DecoderRegistry::with_rvv()))
    }

    /// 使用预配置的状态和解码器创建 hart
    pub(crate) fn with_config(status: Status, hw: HardwareVectorParams, decoder: Arc<DecoderRegistry>) -> Self {
        Hart {
            status,
            hw,
            state: HartState::Running,
            decoder,
            retired: 0,
        }
    }

    pub fn hw(&self) -> &HardwareVectorParams {
        &self.hw
    }

    pub fn state(&self) -> HartState {
        self.state
    }

    /// 设置 hart 状态（用于从非法指令中恢复）
    pub fn set_state(&mut self, state: HartState) {
        self.state = state;
    }

    pub fn retired(&self) -> u64 {
        self.retired
    }

    /// 读取 x0 总是返回 0
    pub fn read_reg(&self, reg: u8) -> u32 {
        self.status.int_read(reg)
    }

    pub fn write_reg(&mut self, reg: u8, value: u32) {
        self.status.int_write(reg, value)
    }

    pub fn csr_read(&self, csr: u16) -> u32 {
        self.status.csr_read(csr)
    }

    pub fn vl(&self) -> u32 {
        self.status.csr_read(CSR_VL)
    }

    pub fn vtype(&self) -> VType {
        VType::decode(self.status.csr_read(CSR_VTYPE))
    }

    /// 当前生效的 vtype/vl
    pub fn active_config(&self) -> ActiveConfig {
        ActiveConfig {
            vtype: self.vtype(),
            vl: self.vl(),
        }
    }

    pub fn decode(&self, raw: u32) -> DecodedInstr {
        self.decoder.decode(raw)
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        self.status.snapshot()
    }

    /// 发射一条指令
    ///
    /// # 流程
    ///
    /// 1. 解码，非向量指令进入非法状态
    /// 2. vset* 更新 vtype/vl 并写回 rd
    /// 3. 按更新后的配置拆分微指令
    ///
    /// hart 不在运行状态或发射失败时返回 `None`
    pub fn step(&mut self, raw: u32) -> Option<Issued> {
        if self.state != HartState::Running {
            return None;
        }

        let decoded = self.decoder.decode(raw);
        let macro_op = match MacroOp::new(decoded) {
            Ok(op) => op,
            Err(e) => {
                self.trap_illegal(raw, e);
                return None;
            }
        };

        exu::vcfg::execute(self, *macro_op.instr());

        match macro_op.expand(&self.active_config(), &self.hw) {
            Ok(micro_ops) => {
                self.retired += 1;
                Some(Issued { macro_op, micro_ops })
            }
            Err(e) => {
                self.trap_illegal(raw, e);
                None
            }
        }
    }

    /// 依次发射一段指令字
    ///
    /// # 返回
    ///
    /// 成功发射的指令数量和最终状态；遇到非法指令即停止
    pub fn run(&mut self, program: &[u32]) -> (u64, HartState) {
        let mut issued = 0;
        for &raw in program {
            if self.step(raw).is_none() {
                break;
            }
            issued += 1;
        }
        (issued, self.state)
    }

    fn trap_illegal(&mut self, raw: u32, err: VecError) {
        log::warn!("illegal instruction 0x{:08x}: {}", raw, err);
        self.state = HartState::IllegalInstruction(raw);
    }

    /// 打印所有存在的状态（用于调试）
    pub fn dump_regs(&self) {
        println!("═══════════════════════════════════════════════════════════════════");
        println!("Hart Status Dump");
        println!("═══════════════════════════════════════════════════════════════════");

        println!(
            "State: {:?}  VLEN: {}  ELEN: {}  Retired: {}",
            self.state,
            self.hw.vlen(),
            self.hw.elen(),
            self.retired
        );
        println!("vtype: {}  vl: {}", self.vtype(), self.vl());
        println!();

        println!("─── Integer Registers (x0-x31) ───────────────────────────────────");
        for i in 0..32 {
            if i % 4 == 0 {
                print!("  ");
            }
            print!("x{:02}: 0x{:08x}  ", i, self.read_reg(i as u8));
            if i % 4 == 3 {
                println!();
            }
        }

        let snapshot = self.status.snapshot();
        if !snapshot.csr.is_empty() {
            println!();
            println!("─── Vector CSRs ──────────────────────────────────────────────────");
            let mut csr_list: Vec<_> = snapshot.csr.iter().collect();
            csr_list.sort_by_key(|(addr, _)| **addr);
            for (addr, value) in csr_list {
                let name = csr_def::csr_name(*addr).unwrap_or("?");
                println!("  {:<7} (0x{:03x}): 0x{:08x}", name, addr, value);
            }
        }

        println!("═══════════════════════════════════════════════════════════════════");
    }
}

impl ExecContext for Hart {
    fn read_misc_reg(&self, reg: MiscReg) -> u64 {
        match reg.csr_addr() {
            Some(addr) => self.status.csr_read(addr) as u64,
            None => self.hw.elen() as u64,
        }
    }

    fn set_misc_reg(&mut self, reg: MiscReg, value: u64) {
        match (reg, reg.csr_addr()) {
            (MiscReg::Vl | MiscReg::Vtype, Some(addr)) => self.status.csr_write(addr, value as u32),
            _ => log::warn!("ignored write to read-only {}", reg.name()),
        }
    }

    fn read_int_reg(&self, reg: u8) -> u32 {
        self.status.int_read(reg)
    }

    fn set_int_reg(&mut self, reg: u8, value: u32) {
        self.status.int_write(reg, value)
    }
}

impl Default for Hart {
    fn default() -> Self {
        Self::new(HardwareVectorParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::VecInstr;
    use super::vtype::VILL_BIT;

    // vsetvli a0, a1, e32, ta, m1, mu
    const VSETVLI_E32_M1: u32 = 0x0505F557;
    // vsetvli t1, a2, e64, ta, m8, ma
    const VSETVLI_E64_M8: u32 = 0x0DB67357;
    // vadd.vv v1, v2, v3
    const VADD_VV: u32 = 0x022180D7;
    // vadd.vv v8, v16, v24
    const VADD_VV_V8: u32 = 0x030C0457;

    fn hart(vlen: u32) -> Hart {
        Hart::new(HardwareVectorParams::new(vlen, 64).unwrap())
    }

    #[test]
    fn test_reset_state() {
        let hart = hart(128);
        assert_eq!(hart.state(), HartState::Running);
        assert_eq!(hart.vl(), 0);
        assert_eq!(hart.csr_read(CSR_VTYPE), VILL_BIT);
        assert_eq!(hart.csr_read(CSR_VLENB), 16);
        assert_eq!(hart.retired(), 0);
    }

    #[test]
    fn test_vsetvli_writes_rd_and_csrs() {
        let mut hart = hart(128);
        hart.write_reg(11, 100);

        let issued = hart.step(VSETVLI_E32_M1).expect("vsetvli 应发射");
        // VLEN=128, SEW=32, LMUL=1 → VLMAX=4
        assert_eq!(hart.vl(), 4);
        assert_eq!(hart.read_reg(10), 4);
        assert_eq!(hart.csr_read(CSR_VTYPE), 0x50);
        assert_eq!(issued.micro_ops.len(), 1);
        assert_eq!(issued.micro_ops[0].micro_vl(), 4);
    }

    #[test]
    fn test_vector_op_before_vset_is_illegal() {
        let mut hart = hart(128);
        assert!(hart.step(VADD_VV).is_none());
        assert_eq!(hart.state(), HartState::IllegalInstruction(VADD_VV));

        // 停机后不再发射
        assert!(hart.step(VSETVLI_E32_M1).is_none());
        assert_eq!(hart.retired(), 0);
    }

    #[test]
    fn test_non_vector_instruction_is_illegal() {
        let mut hart = hart(128);
        assert!(hart.step(0x00000013).is_none()); // addi x0, x0, 0
        assert_eq!(hart.state(), HartState::IllegalInstruction(0x00000013));
    }

    #[test]
    fn test_recover_after_illegal() {
        let mut hart = hart(128);
        hart.step(VADD_VV);
        hart.set_state(HartState::Running);
        hart.write_reg(11, 3);
        assert!(hart.step(VSETVLI_E32_M1).is_some());
        assert_eq!(hart.vl(), 3);
    }

    #[test]
    fn test_lmul8_expansion() {
        let mut hart = hart(128);
        hart.write_reg(12, 13);
        hart.step(VSETVLI_E64_M8).expect("vsetvli 应发射");
        // VLMAX = 128 / 64 * 8 = 16，AVL=13
        assert_eq!(hart.vl(), 13);
        assert_eq!(hart.read_reg(6), 13);

        let issued = hart.step(VADD_VV_V8).expect("vadd 应发射");
        // 每个寄存器 2 个元素，13 个元素需要 7 条微指令
        assert_eq!(issued.micro_ops.len(), 7);
        assert_eq!(issued.micro_ops[6].micro_vl(), 1);
        match issued.micro_ops[3].instr() {
            Some(VecInstr::OpVv { vd, vs2, vs1, .. }) => assert_eq!((*vd, *vs2, *vs1), (11, 19, 27)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_misaligned_group_is_illegal() {
        let mut hart = hart(128);
        hart.write_reg(12, 16);
        hart.step(VSETVLI_E64_M8);
        // LMUL=8 时 v1 不对齐
        assert!(hart.step(VADD_VV).is_none());
        assert_eq!(hart.state(), HartState::IllegalInstruction(VADD_VV));
    }

    #[test]
    fn test_run_stops_at_illegal() {
        let mut hart = hart(256);
        hart.write_reg(11, 8);
        let (issued, state) = hart.run(&[VSETVLI_E32_M1, VADD_VV, 0x00000013, VADD_VV]);
        assert_eq!(issued, 2);
        assert_eq!(state, HartState::IllegalInstruction(0x00000013));
        assert_eq!(hart.retired(), 2);
    }

    #[test]
    fn test_vl_only_changes_through_vset() {
        let mut hart = hart(128);
        for avl in [100, 3, 0, 17] {
            hart.write_reg(11, avl);
            hart.step(VSETVLI_E32_M1).expect("vsetvli 应发射");
            let vl = hart.vl();
            assert!(vl <= 4);
            assert_eq!(hart.csr_read(CSR_VLENB), hart.hw().vlenb());

            // 微指令覆盖的元素数恰好等于 vl
            let issued = hart.step(VADD_VV).expect("vadd 应发射");
            let covered: u32 = issued.micro_ops.iter().map(MicroOp::micro_vl).sum();
            assert_eq!(covered, vl);
        }
    }

    #[test]
    fn test_read_only_misc_regs() {
        let mut hart = hart(512);
        hart.set_misc_reg(MiscReg::Vlenb, 4);
        hart.set_misc_reg(MiscReg::Elen, 8);
        assert_eq!(hart.read_misc_reg(MiscReg::Vlenb), 64);
        assert_eq!(hart.read_misc_reg(MiscReg::Elen), 64);
    }

    #[test]
    fn test_x0_always_zero() {
        let mut hart = hart(128);
        hart.write_reg(0, 42);
        assert_eq!(hart.read_reg(0), 0);
        hart.set_int_reg(0, 7);
        assert_eq!(hart.read_int_reg(0), 0);
    }

    #[test]
    fn test_builder_matches_new() {
        let built = HartBuilder::new().with_vlen(256).with_rvv().build().expect("配置无冲突");
        let direct = hart(256);
        assert_eq!(built.snapshot(), direct.snapshot());
    }
}
