//! 寄存器名称表
//!
//! 反汇编使用的整数与向量寄存器名称。整数寄存器默认使用 ABI 名称。

pub const INT_ABI_NAMES: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2",
    "s0", "s1", "a0", "a1", "a2", "a3", "a4", "a5",
    "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7",
    "s8", "s9", "s10", "s11", "t3", "t4", "t5", "t6",
];

pub const INT_NUMERIC_NAMES: [&str; 32] = [
    "x0", "x1", "x2", "x3", "x4", "x5", "x6", "x7",
    "x8", "x9", "x10", "x11", "x12", "x13", "x14", "x15",
    "x16", "x17", "x18", "x19", "x20", "x21", "x22", "x23",
    "x24", "x25", "x26", "x27", "x28", "x29", "x30", "x31",
];

pub const VEC_NAMES: [&str; 32] = [
    "v0", "v1", "v2", "v3", "v4", "v5", "v6", "v7",
    "v8", "v9", "v10", "v11", "v12", "v13", "v14", "v15",
    "v16", "v17", "v18", "v19", "v20", "v21", "v22", "v23",
    "v24", "v25", "v26", "v27", "v28", "v29", "v30", "v31",
];

/// 整数寄存器命名风格
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegNameStyle {
    #[default]
    Abi,
    Numeric,
}

/// 寄存器名称表
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegNameTable {
    int: &'static [&'static str; 32],
    vec: &'static [&'static str; 32],
}

impl RegNameTable {
    pub const ABI: RegNameTable = RegNameTable { int: &INT_ABI_NAMES, vec: &VEC_NAMES };
    pub const NUMERIC: RegNameTable = RegNameTable { int: &INT_NUMERIC_NAMES, vec: &VEC_NAMES };

    pub fn from_style(style: RegNameStyle) -> Self {
        match style {
            RegNameStyle::Abi => Self::ABI,
            RegNameStyle::Numeric => Self::NUMERIC,
        }
    }

    #[inline]
    pub fn int(&self, reg: u8) -> &'static str {
        self.int[(reg & 0x1F) as usize]
    }

    #[inline]
    pub fn vec(&self, reg: u8) -> &'static str {
        self.vec[(reg & 0x1F) as usize]
    }
}

impl Default for RegNameTable {
    fn default() -> Self {
        Self::ABI
    }
}

/// 按 ABI 名称或 xN 查找整数寄存器编号（`fp` 是 `s0` 的别名）
pub fn lookup_int(name: &str) -> Option<u8> {
    let name = name.trim().to_ascii_lowercase();
    if name == "fp" {
        return Some(8);
    }
    INT_ABI_NAMES
        .iter()
        .position(|&n| n == name)
        .or_else(|| INT_NUMERIC_NAMES.iter().position(|&n| n == name))
        .map(|i| i as u8)
}
