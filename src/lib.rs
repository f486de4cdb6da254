//! rvv_sim: RISC-V 向量扩展配置语义与微指令拆分库
//!
//! 本库实现 vtype/vl 的配置语义（vset* 三条指令）、向量指令的解码与反汇编，
//! 以及按寄存器组把宏指令拆分为微指令，供上层流水线模型调用。
//!
//! # 模块结构
//!
//! - `isa`: 向量指令解码、反汇编、宏指令与微指令
//! - `cpu`: vtype 编解码、配置校验、vl 计算以及 hart 状态
//! - `error`: 错误类型
//! - `sim_env`: 仿真环境（配置、ELF 加载、trace）

pub mod cpu;
pub mod error;
pub mod isa;
pub mod sim_env;
