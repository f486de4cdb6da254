//! Execution units split by ISA modules
pub mod vcfg;
