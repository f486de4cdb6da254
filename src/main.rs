//! rvv_sim 命令行入口
//!
//! - `decode`: 反汇编命令行给出的指令字
//! - `disasm`: 列出程序中的向量指令
//! - `trace`: 在 hart 上发射程序中的向量指令并打印 vl/vtype

use std::process;

use clap::{Parser, Subcommand};

use rvv_sim::cpu::HartState;
use rvv_sim::error::SimError;
use rvv_sim::isa::regnames::lookup_int;
use rvv_sim::isa::{self, disasm, RegNameStyle, RegNameTable};
use rvv_sim::sim_env::{SimConfig, SimEnv};

#[derive(Parser)]
#[command(name = "rvv_sim", version, about = "RISC-V vector configuration and micro-op simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct ProgramArgs {
    /// Path to program (ELF, or raw binary with --bin)
    file: String,

    /// Treat the file as a raw little-endian binary
    #[arg(long)]
    bin: bool,

    /// Load address for raw binary (hex or decimal)
    #[arg(long, default_value = "0", value_parser = parse_u32)]
    load_addr: u32,

    /// Print integer registers as x0..x31 instead of ABI names
    #[arg(long)]
    numeric: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Disassemble raw instruction words
    Decode {
        /// Instruction words in hex (0x prefix optional)
        #[arg(required = true, value_parser = parse_hex)]
        words: Vec<u32>,

        #[arg(long)]
        numeric: bool,
    },
    /// List the vector instructions of a program
    Disasm {
        #[command(flatten)]
        program: ProgramArgs,
    },
    /// Issue the vector instructions of a program and print vl/vtype after each
    Trace {
        #[command(flatten)]
        program: ProgramArgs,

        /// Vector register width in bits
        #[arg(long, default_value = "1024")]
        vlen: u32,

        /// Maximum element width in bits
        #[arg(long, default_value = "64")]
        elen: u32,

        /// ISA string, e.g. rv32gcv, zve32x, zve64x
        #[arg(long, default_value = "rv32gcv")]
        isa: String,

        /// Initial integer register value, e.g. --reg a1=0x40
        #[arg(long = "reg", value_parser = parse_reg)]
        regs: Vec<(u8, u32)>,

        /// Stop after N vector instructions (0 = no limit)
        #[arg(long, default_value = "0")]
        max: u64,

        /// Also print the micro-ops of each instruction
        #[arg(short, long)]
        verbose: bool,

        /// Dump hart state at the end
        #[arg(long)]
        dump: bool,
    },
}

fn parse_hex(s: &str) -> Result<u32, String> {
    let digits = s.trim_start_matches("0x").trim_start_matches("0X").replace('_', "");
    u32::from_str_radix(&digits, 16).map_err(|e| format!("invalid hex word '{}': {}", s, e))
}

fn parse_u32(s: &str) -> Result<u32, String> {
    if s.starts_with("0x") || s.starts_with("0X") {
        parse_hex(s)
    } else {
        s.parse().map_err(|e| format!("invalid number '{}': {}", s, e))
    }
}

fn parse_reg(s: &str) -> Result<(u8, u32), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{}'", s))?;
    let reg = lookup_int(name).ok_or_else(|| format!("unknown register '{}'", name))?;
    Ok((reg, parse_u32(value.trim())?))
}

fn style(numeric: bool) -> RegNameStyle {
    if numeric { RegNameStyle::Numeric } else { RegNameStyle::Abi }
}

fn program_config(args: &ProgramArgs) -> SimConfig {
    let config = SimConfig::new().with_reg_names(style(args.numeric));
    if args.bin {
        config.with_bin_path(args.file.clone(), args.load_addr)
    } else {
        config.with_elf_path(args.file.clone())
    }
}

fn cmd_decode(words: &[u32], numeric: bool) -> Result<(), SimError> {
    let names = RegNameTable::from_style(style(numeric));
    for &raw in words {
        let decoded = isa::decode(raw);
        println!("{}", disasm::render(raw, &decoded.instr, &names));
    }
    Ok(())
}

fn cmd_disasm(program: &ProgramArgs) -> Result<(), SimError> {
    let env = SimEnv::from_config(program_config(program))?;
    for line in env.disassembly() {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_trace(config: SimConfig, dump: bool) -> Result<(), SimError> {
    let mut env = SimEnv::from_config(config)?;
    let trace = env.run_trace();
    for entry in &trace {
        println!("{}", entry);
    }

    println!("issued {} vector instruction(s)", trace.len());
    if let HartState::IllegalInstruction(raw) = env.hart().state() {
        println!("stopped at illegal instruction 0x{:08x}", raw);
    }
    if dump {
        env.dump();
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), SimError> {
    match cli.command {
        Commands::Decode { words, numeric } => cmd_decode(&words, numeric),
        Commands::Disasm { program } => cmd_disasm(&program),
        Commands::Trace {
            program,
            vlen,
            elen,
            isa,
            regs,
            max,
            verbose,
            dump,
        } => {
            let mut config = program_config(&program)
                .with_vlen(vlen)
                .with_elen(elen)
                .with_isa(&isa)?
                .with_max_instructions(max)
                .with_verbose(verbose);
            for (reg, value) in regs {
                config = config.with_reg(reg, value);
            }
            cmd_trace(config, dump)
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
