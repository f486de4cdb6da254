//! 错误类型
//!
//! - `VecError`: 向量语义引擎内部的前置条件错误
//! - `SimError`: 仿真环境（文件、ELF、配置）错误

use std::io;

use thiserror::Error;

use crate::isa::IsaBuildError;

/// 向量引擎错误
///
/// 非法 vtype 配置不是错误，而是架构状态（`vill`），不会出现在这里。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VecError {
    /// 严格模式解码时 vtype 保留位非零
    #[error("invalid vtype encoding 0x{word:08x}: reserved bits 0x{reserved:08x} set")]
    InvalidEncoding { word: u32, reserved: u32 },

    /// 硬件参数不合法（VLEN/ELEN）
    #[error("invalid vector hardware parameters: {0}")]
    InvalidHwParams(String),

    /// 试图用非法编码构造宏指令
    #[error("0x{0:08x} is not a vector instruction")]
    NotAVectorInstr(u32),

    /// 当前 vtype 非法（vill=1）时执行了依赖 vtype 的指令
    #[error("vector instruction 0x{0:08x} issued while vtype.vill is set")]
    IllegalVtype(u32),

    /// 寄存器组未按组大小对齐
    #[error("register v{reg} is not aligned to a group of {group} registers")]
    MisalignedGroup { reg: u8, group: u32 },

    /// 访存有效分组倍数 EMUL 超出 [1/8, 8]
    #[error("effective LMUL {emul} of instruction 0x{raw:08x} is out of range")]
    EmulOutOfRange { raw: u32, emul: String },
}

/// 仿真环境错误
#[derive(Debug, Error)]
pub enum SimError {
    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// ELF 解析错误
    #[error("ELF parse error: {0}")]
    ElfParse(String),
    /// 配置错误
    #[error("Config error: {0}")]
    Config(String),
    /// 解码器配置冲突
    #[error("ISA config error: {0}")]
    IsaConflict(#[from] IsaBuildError),
    /// 向量引擎错误
    #[error(transparent)]
    Vector(#[from] VecError),
}
