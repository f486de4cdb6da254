//! 定义向量指令的语义表示，用于解码、展开和反汇编

use crate::cpu::vtype::ElementWidth;

/// 向量指令的语义化表示
///
/// 每个变体携带助记符、寄存器编号、立即数（如有）以及原始的 vm 位。
/// 解码后不可变；微操作通过 `advance` 产生寄存器偏移后的副本。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VecInstr {
    // ========== 配置指令 ==========
    /// vsetvli rd, rs1, vtypei
    Vsetvli { rd: u8, rs1: u8, vtypei: u16 },
    /// vsetivli rd, uimm, vtypei
    Vsetivli { rd: u8, uimm: u8, vtypei: u16 },
    /// vsetvl rd, rs1, rs2
    Vsetvl { rd: u8, rs1: u8, rs2: u8 },

    // ========== 整数算术 ==========
    /// .vi: vd = vs2 op imm（移位为 uimm5，其余为 simm5）
    OpIvi { mnemonic: &'static str, vd: u8, vs2: u8, imm: i8, vm: bool },
    /// .vv: vd = vs2 op vs1
    OpVv { mnemonic: &'static str, vd: u8, vs2: u8, vs1: u8, vm: bool },
    /// .vx: vd = vs2 op x[rs1]
    OpVx { mnemonic: &'static str, vd: u8, vs2: u8, rs1: u8, vm: bool },
    /// .vs 归约：vd[0] = vs1[0] op vs2[*]
    Reduction { mnemonic: &'static str, vd: u8, vs2: u8, vs1: u8, vm: bool },

    // ========== 标量/向量搬移 ==========
    /// vmv.s.x: vd[0] = x[rs1]
    UnaryFromScalar { mnemonic: &'static str, vd: u8, rs1: u8, vm: bool },
    /// vmv.x.s: x[rd] = vs2[0]
    UnaryToScalar { mnemonic: &'static str, rd: u8, vs2: u8, vm: bool },
    /// vid.v
    MaskUnary { mnemonic: &'static str, vd: u8, vm: bool },
    /// vmv<nr>r.v
    WholeRegMove { mnemonic: &'static str, nr: u8, vd: u8, vs2: u8 },

    // ========== 访存 ==========
    UnitStrideLoad { mnemonic: &'static str, eew: ElementWidth, vd: u8, rs1: u8, vm: bool },
    UnitStrideStore { mnemonic: &'static str, eew: ElementWidth, vs3: u8, rs1: u8, vm: bool },
    /// 索引加载，`eew` 为索引元素宽度
    IndexedLoad { mnemonic: &'static str, ordered: bool, eew: ElementWidth, vd: u8, rs1: u8, vs2: u8, vm: bool },
    IndexedStore { mnemonic: &'static str, ordered: bool, eew: ElementWidth, vs3: u8, rs1: u8, vs2: u8, vm: bool },

    /// 解码失败
    Illegal { raw: u32 },
}

/// 指令变体分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantKind {
    ConfigSet,
    ImmediateOp,
    RegisterRegisterOp,
    UnaryFromScalar,
    UnaryToScalar,
    MaskUnaryOp,
    WholeRegisterMove,
    UnitStrideLoad,
    UnitStrideStore,
    IndexedLoad,
    IndexedStore,
    Illegal,
}

impl VecInstr {
    pub fn mnemonic(&self) -> &'static str {
        match *self {
            VecInstr::Vsetvli { .. } => "vsetvli",
            VecInstr::Vsetivli { .. } => "vsetivli",
            VecInstr::Vsetvl { .. } => "vsetvl",
            VecInstr::OpIvi { mnemonic, .. }
            | VecInstr::OpVv { mnemonic, .. }
            | VecInstr::OpVx { mnemonic, .. }
            | VecInstr::Reduction { mnemonic, .. }
            | VecInstr::UnaryFromScalar { mnemonic, .. }
            | VecInstr::UnaryToScalar { mnemonic, .. }
            | VecInstr::MaskUnary { mnemonic, .. }
            | VecInstr::WholeRegMove { mnemonic, .. }
            | VecInstr::UnitStrideLoad { mnemonic, .. }
            | VecInstr::UnitStrideStore { mnemonic, .. }
            | VecInstr::IndexedLoad { mnemonic, .. }
            | VecInstr::IndexedStore { mnemonic, .. } => mnemonic,
            VecInstr::Illegal { .. } => "illegal",
        }
    }

    pub fn kind(&self) -> VariantKind {
        match self {
            VecInstr::Vsetvli { .. } | VecInstr::Vsetivli { .. } | VecInstr::Vsetvl { .. } => {
                VariantKind::ConfigSet
            }
            VecInstr::OpIvi { .. } => VariantKind::ImmediateOp,
            VecInstr::OpVv { .. } | VecInstr::OpVx { .. } | VecInstr::Reduction { .. } => {
                VariantKind::RegisterRegisterOp
            }
            VecInstr::UnaryFromScalar { .. } => VariantKind::UnaryFromScalar,
            VecInstr::UnaryToScalar { .. } => VariantKind::UnaryToScalar,
            VecInstr::MaskUnary { .. } => VariantKind::MaskUnaryOp,
            VecInstr::WholeRegMove { .. } => VariantKind::WholeRegisterMove,
            VecInstr::UnitStrideLoad { .. } => VariantKind::UnitStrideLoad,
            VecInstr::UnitStrideStore { .. } => VariantKind::UnitStrideStore,
            VecInstr::IndexedLoad { .. } => VariantKind::IndexedLoad,
            VecInstr::IndexedStore { .. } => VariantKind::IndexedStore,
            VecInstr::Illegal { .. } => VariantKind::Illegal,
        }
    }

    pub fn is_config(&self) -> bool {
        self.kind() == VariantKind::ConfigSet
    }

    pub fn is_illegal(&self) -> bool {
        matches!(self, VecInstr::Illegal { .. })
    }

    /// 原始 vm 位；配置指令与整寄存器搬移没有 vm 位
    pub fn vm(&self) -> Option<bool> {
        match *self {
            VecInstr::OpIvi { vm, .. }
            | VecInstr::OpVv { vm, .. }
            | VecInstr::OpVx { vm, .. }
            | VecInstr::Reduction { vm, .. }
            | VecInstr::UnaryFromScalar { vm, .. }
            | VecInstr::UnaryToScalar { vm, .. }
            | VecInstr::MaskUnary { vm, .. }
            | VecInstr::UnitStrideLoad { vm, .. }
            | VecInstr::UnitStrideStore { vm, .. }
            | VecInstr::IndexedLoad { vm, .. }
            | VecInstr::IndexedStore { vm, .. } => Some(vm),
            _ => None,
        }
    }

    /// 生成第 i 个微操作的寄存器视图
    ///
    /// 数据寄存器前移 `data`，索引寄存器前移 `index`；
    /// 标量寄存器、立即数和归约的标量操作数保持不变。
    pub(crate) fn advance(self, data: u8, index: u8) -> Self {
        match self {
            VecInstr::OpIvi { mnemonic, vd, vs2, imm, vm } => {
                VecInstr::OpIvi { mnemonic, vd: vd + data, vs2: vs2 + data, imm, vm }
            }
            VecInstr::OpVv { mnemonic, vd, vs2, vs1, vm } => {
                VecInstr::OpVv { mnemonic, vd: vd + data, vs2: vs2 + data, vs1: vs1 + data, vm }
            }
            VecInstr::OpVx { mnemonic, vd, vs2, rs1, vm } => {
                VecInstr::OpVx { mnemonic, vd: vd + data, vs2: vs2 + data, rs1, vm }
            }
            VecInstr::Reduction { mnemonic, vd, vs2, vs1, vm } => {
                VecInstr::Reduction { mnemonic, vd, vs2: vs2 + data, vs1, vm }
            }
            VecInstr::MaskUnary { mnemonic, vd, vm } => VecInstr::MaskUnary { mnemonic, vd: vd + data, vm },
            VecInstr::WholeRegMove { mnemonic, nr, vd, vs2 } => {
                VecInstr::WholeRegMove { mnemonic, nr, vd: vd + data, vs2: vs2 + data }
            }
            VecInstr::UnitStrideLoad { mnemonic, eew, vd, rs1, vm } => {
                VecInstr::UnitStrideLoad { mnemonic, eew, vd: vd + data, rs1, vm }
            }
            VecInstr::UnitStrideStore { mnemonic, eew, vs3, rs1, vm } => {
                VecInstr::UnitStrideStore { mnemonic, eew, vs3: vs3 + data, rs1, vm }
            }
            VecInstr::IndexedLoad { mnemonic, ordered, eew, vd, rs1, vs2, vm } => VecInstr::IndexedLoad {
                mnemonic,
                ordered,
                eew,
                vd: vd + data,
                rs1,
                vs2: vs2 + index,
                vm,
            },
            VecInstr::IndexedStore { mnemonic, ordered, eew, vs3, rs1, vs2, vm } => VecInstr::IndexedStore {
                mnemonic,
                ordered,
                eew,
                vs3: vs3 + data,
                rs1,
                vs2: vs2 + index,
                vm,
            },
            other => other,
        }
    }
}

/// 解码结果
///
/// 包含原始编码与解码后的语义信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedInstr {
    /// 原始 32-bit 指令编码
    pub raw: u32,
    /// 解码后的语义表示
    pub instr: VecInstr,
}
