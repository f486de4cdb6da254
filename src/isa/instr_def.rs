//! 指令定义结构
//!
//! 统一的指令定义，同时用于解码和冲突检测

use super::decoder::InstrDecoder;
use super::fields::OP_V;
use super::instr::{DecodedInstr, VecInstr};

/// 指令定义
///
/// 一处定义，两处使用：
/// - 解码：通过 mask/match 匹配后调用 decode 函数
/// - 冲突检测：通过 mask/match 判断两条指令是否可能冲突
#[derive(Clone)]
pub struct InstrDef {
    /// 指令名称（即助记符）
    pub name: &'static str,
    /// 匹配掩码：哪些位需要检查
    pub mask: u32,
    /// 匹配值：这些位应该是什么
    pub match_val: u32,
    /// 解码函数：从原始编码提取字段并构造 VecInstr
    pub decode: fn(u32) -> VecInstr,
}

impl InstrDef {
    pub const fn new(
        name: &'static str,
        mask: u32,
        match_val: u32,
        decode: fn(u32) -> VecInstr,
    ) -> Self {
        Self {
            name,
            mask,
            match_val,
            decode,
        }
    }

    /// 检查指令是否匹配此定义
    #[inline]
    pub fn matches(&self, raw: u32) -> bool {
        (raw & self.mask) == self.match_val
    }

    #[inline]
    pub fn decode_instr(&self, raw: u32) -> DecodedInstr {
        DecodedInstr {
            raw,
            instr: (self.decode)(raw),
        }
    }

    /// 检查两个指令定义是否冲突
    ///
    /// 两个定义冲突当且仅当存在某个指令字同时匹配两者
    pub fn conflicts_with(&self, other: &InstrDef) -> bool {
        let common_mask = self.mask & other.mask;
        (self.match_val & common_mask) == (other.match_val & common_mask)
    }
}

impl std::fmt::Debug for InstrDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstrDef")
            .field("name", &self.name)
            .field("mask", &format_args!("0x{:08X}", self.mask))
            .field("match_val", &format_args!("0x{:08X}", self.match_val))
            .finish()
    }
}

// ========== 类型掩码常量 ==========

/// OP-V 算术指令（检查 opcode + funct3 + funct6，vm 与寄存器字段自由）
pub const OPV_ARITH_MASK: u32 = 0xFC00707F;

/// vsetvli：bit31 = 0
pub const VSETVLI_MASK: u32 = 0x8000707F;

/// vsetivli：bit31:30 = 11
pub const VSETIVLI_MASK: u32 = 0xC000707F;

/// vsetvl：bit31:25 = 1000000
pub const VSETVL_MASK: u32 = 0xFE00707F;

/// vs1 字段固定的单操作数形式（vmv.x.s、vmv<nr>r.v），vm 也固定
pub const OPV_VS1_FIXED_MASK: u32 = 0xFE0FF07F;

/// vs2 字段固定的单操作数形式（vmv.s.x），vm 也固定
pub const OPV_VS2_FIXED_MASK: u32 = 0xFFF0707F;

/// vs2 与 vs1 均固定、vm 自由（vid.v）
pub const OPV_UNARY_MASK: u32 = 0xFDFFF07F;

/// 单位步长访存（检查 nf + mew + mop + lumop + width + opcode）
pub const UNIT_STRIDE_MASK: u32 = 0xFDF0707F;

/// 索引访存（检查 nf + mew + mop + width + opcode）
pub const INDEXED_MASK: u32 = 0xFC00707F;

// ========== 辅助函数：构造 match 值 ==========

/// 构造 OP-V 的 match 值
#[inline]
pub const fn opv_match(funct6: u32, funct3: u32) -> u32 {
    (funct6 << 26) | (funct3 << 12) | OP_V
}

/// 构造向量访存的 match 值
#[inline]
pub const fn mem_match(mop: u32, width: u32, opcode: u32) -> u32 {
    (mop << 26) | (width << 12) | opcode
}

// ========== 表驱动解码器 ==========

/// 表驱动解码器
///
/// 通用解码器，使用 InstrDef 数组进行解码
#[derive(Clone, Copy)]
pub struct TableDrivenDecoder {
    name: &'static str,
    instrs: &'static [InstrDef],
    /// 处理的 opcode（用于优化）
    opcodes: Option<&'static [u32]>,
    /// 是否允许 opcode 共享（配置指令与算术指令共用 OP-V）
    allow_overlap: bool,
}

impl TableDrivenDecoder {
    pub const fn new(
        name: &'static str,
        instrs: &'static [InstrDef],
        opcodes: Option<&'static [u32]>,
        allow_overlap: bool,
    ) -> Self {
        Self { name, instrs, opcodes, allow_overlap }
    }

    /// 获取指令定义表
    pub fn instrs(&self) -> &'static [InstrDef] {
        self.instrs
    }
}

impl InstrDecoder for TableDrivenDecoder {
    fn name(&self) -> &str {
        self.name
    }

    fn decode(&self, raw: u32) -> Option<DecodedInstr> {
        self.instrs
            .iter()
            .find(|def| def.matches(raw))
            .map(|def| def.decode_instr(raw))
    }

    fn handled_opcodes(&self) -> Option<&[u32]> {
        self.opcodes
    }

    fn allow_opcode_overlap(&self) -> bool {
        self.allow_overlap
    }
}
