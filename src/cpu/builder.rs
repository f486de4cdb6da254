//! Hart 配置器
//!
//! 提供统一的接口来配置 hart 的向量参数、解码器和架构状态。
//!
//! # 示例
//!
//! ```
//! use rvv_sim::cpu::HartBuilder;
//!
//! let hart = HartBuilder::new()
//!     .with_vlen(256)
//!     .with_arith()
//!     .build()
//!     .expect("配置无冲突");
//! assert_eq!(hart.hw().vlenb(), 32);
//! ```

use std::sync::Arc;

use super::csr_def::{self, CSR_VLENB};
use super::status::Status;
use super::vconfig::{HardwareVectorParams, DEFAULT_ELEN, DEFAULT_VLEN};
use super::Hart;
use crate::error::SimError;
use crate::isa::{ConflictInfo, IsaConfig};

/// Hart 构建器
///
/// 根据指定的向量参数和指令组，统一配置：
/// - 解码器 (decoder)
/// - 架构状态 (status): 整数寄存器文件、向量 CSR
pub struct HartBuilder {
    vlen: u32,
    elen: u32,
    isa_config: IsaConfig,
}

impl HartBuilder {
    /// 创建新的构建器
    ///
    /// 默认只启用 vset* 配置指令
    pub fn new() -> Self {
        Self {
            vlen: DEFAULT_VLEN,
            elen: DEFAULT_ELEN,
            isa_config: IsaConfig::new(),
        }
    }

    pub fn with_vlen(mut self, vlen: u32) -> Self {
        self.vlen = vlen;
        self
    }

    pub fn with_elen(mut self, elen: u32) -> Self {
        self.elen = elen;
        self
    }

    pub fn with_hw(mut self, hw: HardwareVectorParams) -> Self {
        self.vlen = hw.vlen();
        self.elen = hw.elen();
        self
    }

    /// 启用整数算术、归约、搬移指令
    pub fn with_arith(mut self) -> Self {
        self.isa_config = self.isa_config.with_arith();
        self
    }

    /// 启用单位步长与索引访存指令
    pub fn with_mem(mut self) -> Self {
        self.isa_config = self.isa_config.with_mem();
        self
    }

    /// 启用全部向量指令组
    pub fn with_rvv(self) -> Self {
        self.with_arith().with_mem()
    }

    /// 检测配置中的指令冲突
    pub fn detect_conflicts(&self) -> Vec<ConflictInfo> {
        self.isa_config.detect_conflicts()
    }

    /// 配置摘要，如 "vcfg_varith_vmem VLEN=1024 ELEN=64"
    pub fn extensions_summary(&self) -> String {
        format!("{} VLEN={} ELEN={}", self.isa_config.isa_string(), self.vlen, self.elen)
    }

    /// 构建 hart
    ///
    /// 硬件参数非法或检测到指令冲突时返回 `Err`
    pub fn build(self) -> Result<Hart, SimError> {
        // 1. 校验硬件参数
        let hw = HardwareVectorParams::new(self.vlen, self.elen)?;

        // 2. 构建解码器
        let decoder = Arc::new(self.isa_config.build()?);

        // 3. 构建架构状态
        let mut status = Status::new();
        status.csr.register(csr_def::V_CSRS);
        status.csr_write(CSR_VLENB, hw.vlenb());

        Ok(Hart::with_config(status, hw, decoder))
    }
}

impl Default for HartBuilder {
    fn default() -> Self {
        Self::new()
    }
}
