//! 仿真环境初始化模块
//!
//! 本模块负责：
//! - 读取并解析仿真配置（VLEN/ELEN、ISA 字符串、初始寄存器）
//! - 解析 ELF 文件或原始二进制
//! - 构建 hart 与程序镜像
//! - 按地址顺序发射向量指令并生成 trace
//!
//! # 示例
//!
//! ```no_run
//! use rvv_sim::sim_env::{SimEnv, SimConfig};
//!
//! let config = SimConfig::default()
//!     .with_elf_path("program.elf")
//!     .with_vlen(256);
//!
//! let mut env = SimEnv::from_config(config).expect("Failed to create sim env");
//! for entry in env.run_trace() {
//!     println!("{}", entry);
//! }
//! ```

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use elf::abi::{EM_RISCV, PF_W, PF_X, PT_LOAD};
use elf::endian::AnyEndian;
use elf::ElfBytes;

use crate::cpu::vconfig::{HardwareVectorParams, DEFAULT_ELEN, DEFAULT_VLEN};
use crate::cpu::vtype::VType;
use crate::cpu::{Hart, HartBuilder};
use crate::error::SimError;
use crate::isa::{is_vector_opcode, MacroOp, RegNameStyle, RegNameTable};

/// ISA 字符串中与向量相关的扩展
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VectorExtensions {
    /// 完整 V 扩展（ELEN = 64，VLEN ≥ 128）
    pub v: bool,
    /// 嵌入式子集 Zve32x（ELEN = 32）
    pub zve32x: bool,
    /// 嵌入式子集 Zve64x（ELEN = 64，隐含 Zve32x）
    pub zve64x: bool,
    /// Zvl<N>b 给出的最小 VLEN
    pub min_vlen: Option<u32>,
}

impl VectorExtensions {
    /// RV32GCV 配置
    pub fn rv32gcv() -> Self {
        Self {
            v: true,
            min_vlen: Some(128),
            ..Default::default()
        }
    }

    pub fn has_vector(&self) -> bool {
        self.v || self.zve32x || self.zve64x
    }

    /// 扩展允许的最大 ELEN
    pub fn max_elen(&self) -> u32 {
        if self.v || self.zve64x { 64 } else { 32 }
    }

    fn require_vlen(&mut self, vlen: u32) {
        self.min_vlen = Some(self.min_vlen.map_or(vlen, |cur| cur.max(vlen)));
    }

    fn parse_multi_letter(&mut self, ext: &str) -> Result<(), SimError> {
        match ext {
            "zve32x" => self.zve32x = true,
            "zve64x" => {
                self.zve32x = true;
                self.zve64x = true;
            }
            _ => {
                if let Some(bits) = ext.strip_prefix("zvl").and_then(|s| s.strip_suffix('b')) {
                    let vlen: u32 = bits
                        .parse()
                        .map_err(|_| SimError::Config(format!("bad Zvl extension '{}'", ext)))?;
                    self.require_vlen(vlen);
                }
                // 其余多字母扩展与向量无关，忽略
            }
        }
        Ok(())
    }

    /// 由 ISA 字符串与请求的 VLEN/ELEN 得到硬件参数
    ///
    /// ELEN 被扩展上限截断；VLEN 低于 Zvl 要求时报错
    pub fn resolve_hw(&self, vlen: u32, elen: u32) -> Result<HardwareVectorParams, SimError> {
        if let Some(min) = self.min_vlen {
            if vlen < min {
                return Err(SimError::Config(format!(
                    "VLEN {} is below the {} required by the ISA string",
                    vlen, min
                )));
            }
        }
        Ok(HardwareVectorParams::new(vlen, elen.min(self.max_elen()))?)
    }
}

impl FromStr for VectorExtensions {
    type Err = SimError;

    /// 格式示例: "rv32gcv", "zve32x", "rv32imac_zve64x_zvl256b"
    fn from_str(s: &str) -> Result<Self, SimError> {
        let lower = s.to_lowercase();
        let body = lower
            .strip_prefix("rv32")
            .or_else(|| lower.strip_prefix("rv64"))
            .unwrap_or(&lower);

        let mut ext = Self::default();
        for (i, segment) in body.split('_').filter(|seg| !seg.is_empty()).enumerate() {
            let multi_letter = segment.starts_with(['z', 's', 'x']);
            if i == 0 && !multi_letter {
                // 单字母扩展
                if segment.contains('v') {
                    ext.v = true;
                    ext.require_vlen(128);
                }
            } else {
                ext.parse_multi_letter(segment)?;
            }
        }

        if !ext.has_vector() {
            return Err(SimError::Config(format!("ISA string '{}' has no vector extension", s)));
        }
        Ok(ext)
    }
}

/// 仿真配置
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// ELF 文件路径（可选，也可以直接提供二进制）
    pub elf_path: Option<String>,
    /// 二进制文件路径（可选）
    pub bin_path: Option<String>,
    /// 二进制加载地址（用于 bin_path）
    pub bin_load_addr: u32,
    pub vlen: u32,
    pub elen: u32,
    /// 向量扩展
    pub extensions: VectorExtensions,
    /// 初始整数寄存器值
    pub init_regs: Vec<(u8, u32)>,
    /// 反汇编寄存器命名风格
    pub reg_names: RegNameStyle,
    /// 最大发射指令数（0 表示无限制）
    pub max_instructions: u64,
    /// trace 中附带微指令
    pub verbose: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            elf_path: None,
            bin_path: None,
            bin_load_addr: 0,
            vlen: DEFAULT_VLEN,
            elen: DEFAULT_ELEN,
            extensions: VectorExtensions::rv32gcv(),
            init_regs: Vec::new(),
            reg_names: RegNameStyle::default(),
            max_instructions: 0,
            verbose: false,
        }
    }
}

impl SimConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置 ELF 文件路径
    pub fn with_elf_path(mut self, path: impl Into<String>) -> Self {
        self.elf_path = Some(path.into());
        self
    }

    /// 设置二进制文件路径
    pub fn with_bin_path(mut self, path: impl Into<String>, load_addr: u32) -> Self {
        self.bin_path = Some(path.into());
        self.bin_load_addr = load_addr;
        self
    }

    pub fn with_vlen(mut self, vlen: u32) -> Self {
        self.vlen = vlen;
        self
    }

    pub fn with_elen(mut self, elen: u32) -> Self {
        self.elen = elen;
        self
    }

    /// 设置向量扩展
    pub fn with_extensions(mut self, ext: VectorExtensions) -> Self {
        self.extensions = ext;
        self
    }

    /// 从字符串设置 ISA 扩展
    pub fn with_isa(mut self, isa: &str) -> Result<Self, SimError> {
        self.extensions = isa.parse()?;
        Ok(self)
    }

    /// 设置初始整数寄存器
    pub fn with_reg(mut self, reg: u8, value: u32) -> Self {
        self.init_regs.push((reg, value));
        self
    }

    pub fn with_reg_names(mut self, style: RegNameStyle) -> Self {
        self.reg_names = style;
        self
    }

    /// 设置最大发射指令数
    pub fn with_max_instructions(mut self, max: u64) -> Self {
        self.max_instructions = max;
        self
    }

    /// 启用详细输出
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// ELF 程序段信息
#[derive(Debug, Clone)]
pub struct ElfSegment {
    /// 虚拟地址
    pub vaddr: u32,
    /// 内存中的大小
    pub mem_size: usize,
    /// 段数据（文件部分）
    pub data: Vec<u8>,
    /// 是否可执行
    pub executable: bool,
    /// 是否可写
    pub writable: bool,
}

/// ELF 文件解析结果
#[derive(Debug, Clone)]
pub struct ElfInfo {
    /// 入口点地址
    pub entry: u32,
    /// PT_LOAD 程序段
    pub segments: Vec<ElfSegment>,
    /// 是否为小端序
    pub is_little_endian: bool,
    /// 机器类型（应为 RISC-V = 0xF3）
    pub machine: u16,
}

impl ElfInfo {
    /// 解析 ELF 文件
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self, SimError> {
        let file = File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;

        Self::parse_bytes(&data)
    }

    /// 从字节数组解析 ELF（使用 elf crate）
    pub fn parse_bytes(data: &[u8]) -> Result<Self, SimError> {
        let elf_file = ElfBytes::<AnyEndian>::minimal_parse(data)
            .map_err(|e| SimError::ElfParse(format!("Failed to parse ELF: {}", e)))?;

        let header = &elf_file.ehdr;

        if header.e_machine != EM_RISCV {
            return Err(SimError::ElfParse(format!(
                "Not a RISC-V ELF (machine type: 0x{:x}, expected 0x{:x})",
                header.e_machine, EM_RISCV
            )));
        }

        if header.class != elf::file::Class::ELF32 {
            return Err(SimError::ElfParse("Only 32-bit ELF is supported".into()));
        }

        let is_little_endian = header.endianness == AnyEndian::Little;
        if !is_little_endian {
            return Err(SimError::ElfParse("Only little-endian ELF is supported".into()));
        }

        let mut segments = Vec::new();
        if let Some(phdrs) = elf_file.segments() {
            for phdr in phdrs {
                // 只处理 PT_LOAD 类型的段
                if phdr.p_type != PT_LOAD {
                    continue;
                }

                let data = elf_file
                    .segment_data(&phdr)
                    .map_err(|e| SimError::ElfParse(format!("Failed to read segment data: {}", e)))?
                    .to_vec();

                segments.push(ElfSegment {
                    vaddr: phdr.p_vaddr as u32,
                    mem_size: phdr.p_memsz as usize,
                    data,
                    executable: (phdr.p_flags & PF_X) != 0,
                    writable: (phdr.p_flags & PF_W) != 0,
                });
            }
        }

        Ok(ElfInfo {
            entry: header.e_entry as u32,
            segments,
            is_little_endian,
            machine: header.e_machine,
        })
    }
}

/// 程序镜像：按地址排列的 32 位指令字
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramImage {
    pub entry: u32,
    words: Vec<(u32, u32)>,
}

impl ProgramImage {
    /// 从小端字节流切分指令字，跳过 16 位压缩指令
    pub fn from_bytes(base: u32, data: &[u8]) -> Self {
        let mut image = Self {
            entry: base,
            words: Vec::new(),
        };
        image.append_bytes(base, data);
        image
    }

    pub fn from_words(base: u32, words: &[u32]) -> Self {
        Self {
            entry: base,
            words: words
                .iter()
                .enumerate()
                .map(|(i, &w)| (base.wrapping_add(4 * i as u32), w))
                .collect(),
        }
    }

    /// 收集全部可执行段
    pub fn from_elf(elf: &ElfInfo) -> Self {
        let mut text: Vec<&ElfSegment> = elf.segments.iter().filter(|s| s.executable).collect();
        text.sort_by_key(|s| s.vaddr);

        let mut image = Self {
            entry: elf.entry,
            words: Vec::new(),
        };
        for seg in text {
            image.append_bytes(seg.vaddr, &seg.data);
        }
        image
    }

    fn append_bytes(&mut self, base: u32, data: &[u8]) {
        let mut offset = 0;
        while offset + 2 <= data.len() {
            let low = u16::from_le_bytes([data[offset], data[offset + 1]]);
            if low & 0b11 != 0b11 {
                offset += 2;
                continue;
            }
            if offset + 4 > data.len() {
                break;
            }
            let word = u32::from_le_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]]);
            self.words.push((base.wrapping_add(offset as u32), word));
            offset += 4;
        }
    }

    /// (pc, 指令字) 序列
    pub fn words(&self) -> &[(u32, u32)] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// 一条 trace 记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry {
    pub pc: u32,
    /// 宏指令反汇编，verbose 时后跟缩进的微指令行
    pub text: String,
    /// 发射后的 vl
    pub vl: u32,
    /// 发射后的 vtype
    pub vtype: VType,
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = self.text.lines();
        let head = lines.next().unwrap_or_default();
        write!(f, "{:08x}: {:<48} # vl={} vtype={}", self.pc, head, self.vl, self.vtype)?;
        for line in lines {
            write!(f, "\n{:10}{}", "", line)?;
        }
        Ok(())
    }
}

/// 仿真环境
pub struct SimEnv {
    hart: Hart,
    program: ProgramImage,
    config: SimConfig,
}

impl SimEnv {
    /// 从配置创建仿真环境
    pub fn from_config(config: SimConfig) -> Result<Self, SimError> {
        let program = if let Some(ref elf_path) = config.elf_path {
            let elf = ElfInfo::parse(elf_path)?;
            log::info!(
                "loaded ELF {}: entry 0x{:08x}, {} segment(s)",
                elf_path,
                elf.entry,
                elf.segments.len()
            );
            ProgramImage::from_elf(&elf)
        } else if let Some(ref bin_path) = config.bin_path {
            let data = std::fs::read(bin_path)?;
            log::info!(
                "loaded binary {}: {} bytes at 0x{:08x}",
                bin_path,
                data.len(),
                config.bin_load_addr
            );
            ProgramImage::from_bytes(config.bin_load_addr, &data)
        } else {
            return Err(SimError::Config("no ELF or binary program given".into()));
        };

        Self::from_program(config, program)
    }

    /// 使用已准备好的程序镜像创建仿真环境
    pub fn from_program(config: SimConfig, program: ProgramImage) -> Result<Self, SimError> {
        let hw = config.extensions.resolve_hw(config.vlen, config.elen)?;
        let mut hart = HartBuilder::new().with_hw(hw).with_rvv().build()?;
        for &(reg, value) in &config.init_regs {
            hart.write_reg(reg, value);
        }

        log::info!(
            "hart ready: VLEN={} ELEN={}, {} instruction word(s) from 0x{:08x}",
            hw.vlen(),
            hw.elen(),
            program.len(),
            program.entry
        );

        Ok(SimEnv { hart, program, config })
    }

    pub fn hart(&self) -> &Hart {
        &self.hart
    }

    pub fn hart_mut(&mut self) -> &mut Hart {
        &mut self.hart
    }

    pub fn program(&self) -> &ProgramImage {
        &self.program
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    fn names(&self) -> RegNameTable {
        RegNameTable::from_style(self.config.reg_names)
    }

    /// 列出程序中的向量指令，不改变 hart 状态
    pub fn disassembly(&self) -> Vec<String> {
        let names = self.names();
        self.program
            .words()
            .iter()
            .filter_map(|&(pc, raw)| {
                let op = MacroOp::new(self.hart.decode(raw)).ok()?;
                Some(format!("{:08x}: {}", pc, op.disassemble(&names)))
            })
            .collect()
    }

    /// 按地址顺序发射向量指令
    ///
    /// 标量指令（含共用 LOAD-FP/STORE-FP 主操作码的浮点访存）被跳过；
    /// hart 进入非法状态或达到指令上限时停止
    pub fn run_trace(&mut self) -> Vec<TraceEntry> {
        let names = self.names();
        let limit = self.config.max_instructions;
        let mut trace = Vec::new();

        for &(pc, raw) in self.program.words() {
            if limit != 0 && trace.len() as u64 >= limit {
                break;
            }
            if !is_vector_opcode(raw) || self.hart.decode(raw).instr.is_illegal() {
                log::debug!("skip non-vector word 0x{:08x} at 0x{:08x}", raw, pc);
                continue;
            }

            let Some(issued) = self.hart.step(raw) else {
                log::warn!("trace stopped at 0x{:08x}: {:?}", pc, self.hart.state());
                break;
            };

            let mut text = issued.macro_op.disassemble(&names);
            if self.config.verbose {
                for uop in &issued.micro_ops {
                    text.push_str("\n    ");
                    text.push_str(&uop.disassemble(&names));
                }
            }
            trace.push(TraceEntry {
                pc,
                text,
                vl: self.hart.vl(),
                vtype: self.hart.vtype(),
            });
        }

        trace
    }

    /// 打印 hart 状态
    pub fn dump(&self) {
        self.hart.dump_regs();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::HartState;

    // vsetvli a0, a1, e32, ta, m1, mu
    const VSETVLI: u32 = 0x0505F557;
    // vadd.vv v1, v2, v3
    const VADD_VV: u32 = 0x022180D7;
    // addi x0, x0, 0
    const NOP: u32 = 0x00000013;

    /// 构造只有一个可执行 PT_LOAD 段的 ELF32 RISC-V 文件
    fn tiny_elf(vaddr: u32, code: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&[0x7F, b'E', b'L', b'F', 1, 1, 1, 0]);
        out.extend_from_slice(&[0; 8]);
        out.extend_from_slice(&2u16.to_le_bytes()); // e_type = EXEC
        out.extend_from_slice(&0xF3u16.to_le_bytes()); // e_machine = RISC-V
        out.extend_from_slice(&1u32.to_le_bytes()); // e_version
        out.extend_from_slice(&vaddr.to_le_bytes()); // e_entry
        out.extend_from_slice(&52u32.to_le_bytes()); // e_phoff
        out.extend_from_slice(&0u32.to_le_bytes()); // e_shoff
        out.extend_from_slice(&0u32.to_le_bytes()); // e_flags
        out.extend_from_slice(&52u16.to_le_bytes()); // e_ehsize
        out.extend_from_slice(&32u16.to_le_bytes()); // e_phentsize
        out.extend_from_slice(&1u16.to_le_bytes()); // e_phnum
        out.extend_from_slice(&40u16.to_le_bytes()); // e_shentsize
        out.extend_from_slice(&0u16.to_le_bytes()); // e_shnum
        out.extend_from_slice(&0u16.to_le_bytes()); // e_shstrndx

        let len = code.len() as u32;
        for field in [PT_LOAD, 84, vaddr, vaddr, len, len, PF_X | 0x4, 4] {
            out.extend_from_slice(&field.to_le_bytes());
        }
        out.extend_from_slice(code);
        out
    }

    fn words_to_bytes(words: &[u32]) -> Vec<u8> {
        words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    #[test]
    fn test_vector_extensions_parse() {
        let ext: VectorExtensions = "rv32gcv".parse().unwrap();
        assert!(ext.v);
        assert_eq!(ext.max_elen(), 64);
        assert_eq!(ext.min_vlen, Some(128));

        let ext: VectorExtensions = "zve32x".parse().unwrap();
        assert!(ext.zve32x && !ext.zve64x);
        assert_eq!(ext.max_elen(), 32);

        let ext: VectorExtensions = "RV32IMAC_Zve64x_Zvl256b".parse().unwrap();
        assert!(ext.zve64x && ext.zve32x);
        assert_eq!(ext.min_vlen, Some(256));

        assert!(matches!("rv32imac".parse::<VectorExtensions>(), Err(SimError::Config(_))));
        assert!(matches!("rv32i_zvlxb".parse::<VectorExtensions>(), Err(SimError::Config(_))));
    }

    #[test]
    fn test_resolve_hw() {
        let zve32x: VectorExtensions = "zve32x".parse().unwrap();
        let hw = zve32x.resolve_hw(256, 64).unwrap();
        assert_eq!((hw.vlen(), hw.elen()), (256, 32));

        let v = VectorExtensions::rv32gcv();
        assert!(matches!(v.resolve_hw(64, 64), Err(SimError::Config(_))));
        assert!(matches!(v.resolve_hw(300, 64), Err(SimError::Vector(_))));
    }

    #[test]
    fn test_sim_config_builder() {
        let config = SimConfig::new()
            .with_vlen(512)
            .with_elen(32)
            .with_reg(11, 7)
            .with_reg_names(RegNameStyle::Numeric)
            .with_max_instructions(1000);

        assert_eq!(config.vlen, 512);
        assert_eq!(config.elen, 32);
        assert_eq!(config.init_regs, vec![(11, 7)]);
        assert_eq!(config.reg_names, RegNameStyle::Numeric);
        assert_eq!(config.max_instructions, 1000);
        assert!(SimConfig::new().with_isa("rv32imc").is_err());
    }

    #[test]
    fn test_program_image_skips_compressed() {
        // c.nop (0x0001) 之后跟一条 32 位向量指令
        let mut data = vec![0x01, 0x00];
        data.extend_from_slice(&VSETVLI.to_le_bytes());
        data.push(0x57); // 尾部残缺字节
        let image = ProgramImage::from_bytes(0x100, &data);
        assert_eq!(image.words(), &[(0x102, VSETVLI)]);
    }

    #[test]
    fn test_elf_parse_and_image() {
        let elf_bytes = tiny_elf(0x8000_0000, &words_to_bytes(&[VSETVLI, NOP, VADD_VV]));
        let elf = ElfInfo::parse_bytes(&elf_bytes).expect("Failed to parse ELF");
        assert_eq!(elf.machine, EM_RISCV);
        assert_eq!(elf.entry, 0x8000_0000);
        assert_eq!(elf.segments.len(), 1);
        assert!(elf.segments[0].executable);
        assert!(!elf.segments[0].writable);

        let image = ProgramImage::from_elf(&elf);
        assert_eq!(image.len(), 3);
        assert_eq!(image.words()[2], (0x8000_0008, VADD_VV));
    }

    #[test]
    fn test_elf_parse_rejects_garbage() {
        assert!(matches!(ElfInfo::parse_bytes(b"not an elf"), Err(SimError::ElfParse(_))));
    }

    #[test]
    fn test_from_config_requires_program() {
        assert!(matches!(SimEnv::from_config(SimConfig::new()), Err(SimError::Config(_))));
    }

    #[test]
    fn test_run_trace_skips_scalar() {
        let config = SimConfig::new().with_vlen(128).with_reg(11, 100);
        let program = ProgramImage::from_words(0, &[VSETVLI, NOP, VADD_VV]);
        let mut env = SimEnv::from_program(config, program).unwrap();

        let trace = env.run_trace();
        assert_eq!(trace.len(), 2);
        assert_eq!(trace[0].pc, 0);
        assert_eq!(trace[0].vl, 4);
        assert_eq!(trace[0].text, "0x0505f557 vsetvli a0, a1, e32, ta, m1, mu");
        assert_eq!(trace[1].pc, 8);
        assert_eq!(trace[1].vtype.to_string(), "e32, ta, m1, mu");
        assert_eq!(env.hart().read_reg(10), 4);
    }

    #[test]
    fn test_run_trace_stops_on_illegal() {
        let config = SimConfig::new().with_vlen(128);
        // 未配置 vtype 时的 vadd 非法
        let program = ProgramImage::from_words(0, &[VADD_VV, VSETVLI]);
        let mut env = SimEnv::from_program(config, program).unwrap();

        assert!(env.run_trace().is_empty());
        assert_eq!(env.hart().state(), HartState::IllegalInstruction(VADD_VV));
    }

    #[test]
    fn test_run_trace_limit_and_verbose() {
        let config = SimConfig::new()
            .with_vlen(128)
            .with_reg(11, 8)
            .with_max_instructions(2)
            .with_verbose(true);
        // vsetvli e32 m1 之后 vl=4，vadd 只占一个寄存器
        let program = ProgramImage::from_words(0x1000, &[VSETVLI, VADD_VV, VADD_VV]);
        let mut env = SimEnv::from_program(config, program).unwrap();

        let trace = env.run_trace();
        assert_eq!(trace.len(), 2);
        assert_eq!(
            trace[1].text,
            "0x022180d7 vadd.vv v1, v2, v3\n    0x022180d7 vadd.vv v1, v2, v3"
        );
        let shown = trace[1].to_string();
        assert!(shown.starts_with("00001004: 0x022180d7 vadd.vv v1, v2, v3"));
        assert!(shown.contains("# vl=4 vtype=e32, ta, m1, mu"));
    }

    #[test]
    fn test_disassembly_lists_vector_words() {
        let config = SimConfig::new().with_reg_names(RegNameStyle::Numeric);
        let program = ProgramImage::from_words(0x200, &[NOP, VSETVLI]);
        let env = SimEnv::from_program(config, program).unwrap();
        assert_eq!(
            env.disassembly(),
            vec!["00000204: 0x0505f557 vsetvli x10, x11, e32, ta, m1, mu".to_string()]
        );
        // 列表不改变状态
        assert_eq!(env.hart().vl(), 0);
    }
}
