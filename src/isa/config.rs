//! ISA 配置与冲突检测
//!
//! 提供向量指令组的配置管理和冲突检测机制

use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;

use super::decoder::{DecoderRegistry, InstrDecoder};
use super::instr_def::InstrDef;
use super::rvv_arith::{RVV_ARITH_DECODER, RVV_ARITH_INSTRS};
use super::rvv_cfg::{RVV_CFG_DECODER, RVV_CFG_INSTRS};
use super::rvv_mem::{RVV_MEM_DECODER, RVV_MEM_INSTRS};

/// 支持的向量指令组
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IsaExtension {
    /// 配置指令 vset*（必选）
    Vcfg,
    /// 整数算术、归约、搬移
    Varith,
    /// 单位步长与索引访存
    Vmem,
    /// 自定义扩展
    Custom(&'static str),
}

impl std::fmt::Display for IsaExtension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IsaExtension::Vcfg => write!(f, "vcfg"),
            IsaExtension::Varith => write!(f, "varith"),
            IsaExtension::Vmem => write!(f, "vmem"),
            IsaExtension::Custom(name) => write!(f, "x{}", name),
        }
    }
}

/// 指令模式描述（用于冲突检测）
#[derive(Debug, Clone)]
pub struct InstrSignature {
    pub extension: IsaExtension,
    pub name: &'static str,
    pub mask: u32,
    pub match_val: u32,
}

impl InstrSignature {
    pub const fn new(extension: IsaExtension, name: &'static str, mask: u32, match_val: u32) -> Self {
        Self {
            extension,
            name,
            mask,
            match_val,
        }
    }

    /// 从 InstrDef 创建签名
    pub fn from_def(def: &InstrDef, extension: IsaExtension) -> Self {
        Self {
            extension,
            name: def.name,
            mask: def.mask,
            match_val: def.match_val,
        }
    }

    /// 存在某个指令字同时匹配两者即冲突
    pub fn conflicts_with(&self, other: &InstrSignature) -> bool {
        let common_mask = self.mask & other.mask;
        (self.match_val & common_mask) == (other.match_val & common_mask)
    }
}

/// 冲突信息
#[derive(Debug, Clone)]
pub struct ConflictInfo {
    pub instr1: InstrSignature,
    pub instr2: InstrSignature,
    /// 冲突的示例指令编码
    pub example_raw: u32,
}

impl std::fmt::Display for ConflictInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "冲突: {}:{} 与 {}:{} (示例: 0x{:08X})",
            self.instr1.extension,
            self.instr1.name,
            self.instr2.extension,
            self.instr2.name,
            self.example_raw
        )
    }
}

/// 构建解码器注册表失败
#[derive(Debug, Error)]
pub enum IsaBuildError {
    #[error("{} decode conflict(s)", .0.len())]
    Conflicts(Vec<ConflictInfo>),
    #[error("decoder registration failed: {0}")]
    Registration(String),
}

/// ISA 配置构建器
///
/// 用于配置启用的向量指令组，检测冲突，并构建解码器
///
/// # 示例
///
/// ```
/// use rvv_sim::isa::IsaConfig;
///
/// let registry = IsaConfig::new()
///     .with_arith()
///     .with_mem()
///     .build()
///     .expect("无冲突");
/// assert_eq!(registry.decoder_count(), 3);
/// ```
pub struct IsaConfig {
    extensions: HashSet<IsaExtension>,
    custom_decoders: Vec<(IsaExtension, Arc<dyn InstrDecoder>, Vec<InstrSignature>)>,
    signatures: Vec<InstrSignature>,
}

impl IsaConfig {
    /// 创建新的配置（默认只有 vset*）
    pub fn new() -> Self {
        let mut config = Self {
            extensions: HashSet::new(),
            custom_decoders: Vec::new(),
            signatures: Vec::new(),
        };
        config.extensions.insert(IsaExtension::Vcfg);
        config.signatures.extend(signatures(RVV_CFG_INSTRS, IsaExtension::Vcfg));
        config
    }

    /// 全部向量指令组
    pub fn rvv() -> Self {
        Self::new().with_arith().with_mem()
    }

    pub fn with_arith(mut self) -> Self {
        if self.extensions.insert(IsaExtension::Varith) {
            self.signatures.extend(signatures(RVV_ARITH_INSTRS, IsaExtension::Varith));
        }
        self
    }

    pub fn with_mem(mut self) -> Self {
        if self.extensions.insert(IsaExtension::Vmem) {
            self.signatures.extend(signatures(RVV_MEM_INSTRS, IsaExtension::Vmem));
        }
        self
    }

    /// 添加自定义解码器
    ///
    /// `signatures` 是该解码器处理的指令签名，用于冲突检测
    pub fn with_custom_decoder(
        mut self,
        extension: IsaExtension,
        decoder: Arc<dyn InstrDecoder>,
        signatures: Vec<InstrSignature>,
    ) -> Self {
        self.extensions.insert(extension);
        self.signatures.extend(signatures.iter().cloned());
        self.custom_decoders.push((extension, decoder, signatures));
        self
    }

    /// 检测跨扩展的指令冲突
    pub fn detect_conflicts(&self) -> Vec<ConflictInfo> {
        let mut conflicts = Vec::new();

        for (i, sig1) in self.signatures.iter().enumerate() {
            for sig2 in self.signatures.iter().skip(i + 1) {
                // 同一扩展内按表顺序匹配，不检测
                if sig1.extension == sig2.extension {
                    continue;
                }
                if sig1.conflicts_with(sig2) {
                    let example = (sig1.match_val & sig1.mask) | (sig2.match_val & sig2.mask);
                    conflicts.push(ConflictInfo {
                        instr1: sig1.clone(),
                        instr2: sig2.clone(),
                        example_raw: example,
                    });
                }
            }
        }

        conflicts
    }

    pub fn is_valid(&self) -> bool {
        self.detect_conflicts().is_empty()
    }

    /// 已启用扩展的字符串，如 "vcfg_varith_vmem"
    pub fn isa_string(&self) -> String {
        let mut exts: Vec<&IsaExtension> = self.extensions.iter().collect();
        exts.sort();
        exts.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("_")
    }

    /// 构建解码器注册表，存在冲突时返回错误
    pub fn build(self) -> Result<DecoderRegistry, IsaBuildError> {
        let conflicts = self.detect_conflicts();
        if !conflicts.is_empty() {
            return Err(IsaBuildError::Conflicts(conflicts));
        }

        let mut registry = DecoderRegistry::new();
        registry
            .register(Arc::new(RVV_CFG_DECODER))
            .map_err(IsaBuildError::Registration)?;

        if self.extensions.contains(&IsaExtension::Varith) {
            registry
                .register(Arc::new(RVV_ARITH_DECODER))
                .map_err(IsaBuildError::Registration)?;
        }
        if self.extensions.contains(&IsaExtension::Vmem) {
            registry
                .register(Arc::new(RVV_MEM_DECODER))
                .map_err(IsaBuildError::Registration)?;
        }
        for (_, decoder, _) in self.custom_decoders {
            registry.register(decoder).map_err(IsaBuildError::Registration)?;
        }

        Ok(registry)
    }

    /// 配置摘要
    pub fn summary(&self) -> String {
        let mut s = format!("ISA: {}\n", self.isa_string());
        s.push_str(&format!("指令签名数: {}\n", self.signatures.len()));

        let conflicts = self.detect_conflicts();
        if conflicts.is_empty() {
            s.push_str("状态: ✓ 无冲突\n");
        } else {
            s.push_str(&format!("状态: ✗ {} 个冲突\n", conflicts.len()));
            for c in &conflicts {
                s.push_str(&format!("  - {}\n", c));
            }
        }
        s
    }
}

impl Default for IsaConfig {
    fn default() -> Self {
        Self::rvv()
    }
}

fn signatures(defs: &[InstrDef], extension: IsaExtension) -> Vec<InstrSignature> {
    defs.iter().map(|def| InstrSignature::from_def(def, extension)).collect()
}
