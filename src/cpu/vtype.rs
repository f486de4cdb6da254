//! vtype 寄存器编解码
//!
//! vtype 编码格式（XLEN = 32）：
//! ```text
//! 31   30                8  7    6    5    3 2     0
//! ┌────┬───────────────────┬────┬────┬──────┬───────┐
//! │vill│     reserved      │vma │vta │ vsew │ vlmul │
//! └────┴───────────────────┴────┴────┴──────┴───────┘
//! ```
//!
//! 非法配置不是解码错误：保留位、保留编码都可以被表示出来，
//! 由 `vconfig::validate` 统一折叠为 `vill`。

use std::fmt;

use num_rational::Ratio;

use crate::error::VecError;

pub const VLMUL_MASK: u32 = 0x7;
pub const VSEW_SHIFT: u32 = 3;
pub const VSEW_MASK: u32 = 0x7 << VSEW_SHIFT;
pub const VTA_BIT: u32 = 1 << 6;
pub const VMA_BIT: u32 = 1 << 7;
/// 保留位 [30:8]
pub const VTYPE_RESERVED_MASK: u32 = 0x7FFF_FF00;
pub const VILL_BIT: u32 = 1 << 31;

/// 元素宽度选择（vsew 字段，也用于访存指令的 EEW）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementWidth {
    E8,
    E16,
    E32,
    E64,
    /// vsew = 4..=7
    Reserved(u8),
}

impl ElementWidth {
    /// 从 3-bit vsew 编码解码
    pub fn from_vsew(code: u32) -> Self {
        match code & 0x7 {
            0 => ElementWidth::E8,
            1 => ElementWidth::E16,
            2 => ElementWidth::E32,
            3 => ElementWidth::E64,
            c => ElementWidth::Reserved(c as u8),
        }
    }

    pub fn vsew(self) -> u32 {
        match self {
            ElementWidth::E8 => 0,
            ElementWidth::E16 => 1,
            ElementWidth::E32 => 2,
            ElementWidth::E64 => 3,
            ElementWidth::Reserved(c) => (c & 0x7) as u32,
        }
    }

    /// 从访存指令的 width 字段 [14:12] 解码 EEW
    ///
    /// 000/101/110/111 分别对应 8/16/32/64，其余属于标量浮点访存
    pub fn from_mem_width(width: u32) -> Option<Self> {
        match width & 0x7 {
            0b000 => Some(ElementWidth::E8),
            0b101 => Some(ElementWidth::E16),
            0b110 => Some(ElementWidth::E32),
            0b111 => Some(ElementWidth::E64),
            _ => None,
        }
    }

    /// 位宽，保留编码返回 None
    pub fn bits(self) -> Option<u32> {
        match self {
            ElementWidth::E8 => Some(8),
            ElementWidth::E16 => Some(16),
            ElementWidth::E32 => Some(32),
            ElementWidth::E64 => Some(64),
            ElementWidth::Reserved(_) => None,
        }
    }

    /// 反汇编时显示的位宽，保留编码按 `8 << vsew` 显示
    pub fn display_bits(self) -> u32 {
        8 << self.vsew()
    }
}

/// 寄存器分组倍数 LMUL
///
/// 内部保存 vlmul 的有符号指数：非负表示 2^n，负数表示 1/2^-n。
/// 3-bit 补码范围为 -4..=3，其中 -4（1/16）是保留编码。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lmul(i8);

impl Lmul {
    pub const MF8: Lmul = Lmul(-3);
    pub const MF4: Lmul = Lmul(-2);
    pub const MF2: Lmul = Lmul(-1);
    pub const M1: Lmul = Lmul(0);
    pub const M2: Lmul = Lmul(1);
    pub const M4: Lmul = Lmul(2);
    pub const M8: Lmul = Lmul(3);

    /// 从 3-bit vlmul 编码解码（补码符号扩展）
    pub fn from_vlmul(code: u32) -> Self {
        Lmul(((((code & VLMUL_MASK) as u8) << 5) as i8) >> 5)
    }

    pub fn vlmul(self) -> u32 {
        (self.0 as u8 as u32) & VLMUL_MASK
    }

    pub fn exponent(self) -> i8 {
        self.0
    }

    /// 精确的分组倍数
    pub fn ratio(self) -> Ratio<u32> {
        if self.0 >= 0 {
            Ratio::from_integer(1u32 << self.0)
        } else {
            Ratio::new(1, 1u32 << -self.0)
        }
    }

    /// 一个寄存器组占用的物理寄存器数（分数 LMUL 占 1 个）
    pub fn group_regs(self) -> u32 {
        if self.0 > 0 { 1 << self.0 } else { 1 }
    }

    /// 汇编记号；保留编码 100 没有记号
    pub fn token(self) -> Option<&'static str> {
        match self.0 {
            3 => Some("m8"),
            2 => Some("m4"),
            1 => Some("m2"),
            0 => Some("m1"),
            -1 => Some("mf2"),
            -2 => Some("mf4"),
            -3 => Some("mf8"),
            _ => None,
        }
    }
}

/// 尾部元素策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TailPolicy {
    Undisturbed,
    Agnostic,
}

impl TailPolicy {
    pub fn token(self) -> &'static str {
        match self {
            TailPolicy::Undisturbed => "tu",
            TailPolicy::Agnostic => "ta",
        }
    }
}

/// 掩码关闭元素策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaskPolicy {
    Undisturbed,
    Agnostic,
}

impl MaskPolicy {
    pub fn token(self) -> &'static str {
        match self {
            MaskPolicy::Undisturbed => "mu",
            MaskPolicy::Agnostic => "ma",
        }
    }
}

/// 解码后的 vtype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VType {
    pub vsew: ElementWidth,
    pub vlmul: Lmul,
    pub vta: TailPolicy,
    pub vma: MaskPolicy,
    pub vill: bool,
    /// 原位保留的 [30:8] 位
    pub reserved: u32,
}

impl VType {
    /// 构造一个不带保留位的 vtype
    pub fn new(vsew: ElementWidth, vlmul: Lmul, vta: TailPolicy, vma: MaskPolicy) -> Self {
        Self {
            vsew,
            vlmul,
            vta,
            vma,
            vill: false,
            reserved: 0,
        }
    }

    /// 非法配置：除 vill 外全部清零，编码为 0x8000_0000
    pub const fn illegal() -> Self {
        Self {
            vsew: ElementWidth::E8,
            vlmul: Lmul::M1,
            vta: TailPolicy::Undisturbed,
            vma: MaskPolicy::Undisturbed,
            vill: true,
            reserved: 0,
        }
    }

    /// 宽松解码，任何 32-bit 值都能表示
    pub fn decode(word: u32) -> Self {
        Self {
            vsew: ElementWidth::from_vsew((word & VSEW_MASK) >> VSEW_SHIFT),
            vlmul: Lmul::from_vlmul(word),
            vta: if word & VTA_BIT != 0 { TailPolicy::Agnostic } else { TailPolicy::Undisturbed },
            vma: if word & VMA_BIT != 0 { MaskPolicy::Agnostic } else { MaskPolicy::Undisturbed },
            vill: word & VILL_BIT != 0,
            reserved: word & VTYPE_RESERVED_MASK,
        }
    }

    /// 严格解码：保留位非零时返回 `InvalidEncoding`
    pub fn decode_strict(word: u32) -> Result<Self, VecError> {
        let reserved = word & VTYPE_RESERVED_MASK;
        if reserved != 0 {
            return Err(VecError::InvalidEncoding { word, reserved });
        }
        Ok(Self::decode(word))
    }

    pub fn encode(&self) -> u32 {
        let mut word = self.vlmul.vlmul() | (self.vsew.vsew() << VSEW_SHIFT);
        if self.vta == TailPolicy::Agnostic {
            word |= VTA_BIT;
        }
        if self.vma == MaskPolicy::Agnostic {
            word |= VMA_BIT;
        }
        if self.vill {
            word |= VILL_BIT;
        }
        word | (self.reserved & VTYPE_RESERVED_MASK)
    }

    pub fn has_reserved_bits(&self) -> bool {
        self.reserved != 0
    }
}

/// 按汇编语法输出：`e32, ta, m1, mu`；非法时输出 `vill`
///
/// 保留的 vlmul 编码不输出分组记号，如 `e8, ta, mu`
impl fmt::Display for VType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.vill {
            return write!(f, "vill");
        }
        write!(f, "e{}, {}, ", self.vsew.display_bits(), self.vta.token())?;
        if let Some(lmul) = self.vlmul.token() {
            write!(f, "{}, ", lmul)?;
        }
        write!(f, "{}", self.vma.token())
    }
}
