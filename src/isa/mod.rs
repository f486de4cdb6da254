//! RISC-V 向量 ISA 抽象与解码框架
//!
//! 本模块提供可扩展的向量指令解码系统：
//! - `VecInstr`: 指令的语义表示
//! - `InstrDecoder`: 解码器 trait，允许插件式扩展
//! - `DecoderRegistry`: 解码器注册表，支持运行时注册
//! - `InstrDef`: 统一的指令定义，同时用于解码和冲突检测
//! - `IsaConfig`: ISA 配置构建器，支持冲突检测
//! - `MacroOp` / `MicroOp`: 宏指令与按寄存器组拆分的微指令
//! - `disasm`: 反汇编输出

use std::sync::LazyLock;

mod decoder;
mod instr;
mod fields;
mod instr_def;
mod rvv_cfg;
mod rvv_arith;
mod rvv_mem;
mod config;
mod uop;
pub mod disasm;
pub mod regnames;

pub use decoder::{InstrDecoder, DecoderRegistry};
pub use instr::{VecInstr, VariantKind, DecodedInstr};
pub use fields::*;
pub use instr_def::{InstrDef, TableDrivenDecoder};
pub use rvv_cfg::{RVV_CFG_DECODER, RVV_CFG_INSTRS, RVV_CFG_OPCODES};
pub use rvv_arith::{RVV_ARITH_DECODER, RVV_ARITH_INSTRS, RVV_ARITH_OPCODES};
pub use rvv_mem::{RVV_MEM_DECODER, RVV_MEM_INSTRS, RVV_MEM_OPCODES};
pub use config::{IsaConfig, IsaExtension, IsaBuildError, InstrSignature, ConflictInfo};
pub use uop::{ActiveConfig, MacroOp, MicroOp};
pub use regnames::{RegNameStyle, RegNameTable};

static RVV_REGISTRY: LazyLock<DecoderRegistry> = LazyLock::new(DecoderRegistry::with_rvv);

/// 便捷函数：使用全局的完整向量解码器，不匹配时返回 `Illegal`
pub fn decode(raw: u32) -> DecodedInstr {
    RVV_REGISTRY.decode(raw)
}

#[cfg(test)]
mod tests;
