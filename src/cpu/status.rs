//! Hart architectural state: integer register file and vector CSR bank.
//!
//! Vector register contents are not modelled; the engine only tracks the
//! configuration state (`vl`, `vtype`, ...) that governs decoding and
//! micro-op expansion.

use std::collections::HashMap;

/// Integer register file x0..x31. x0 is hard-wired to zero.
#[derive(Clone, Default)]
pub struct RegFile {
    regs: [u32; 32],
}

impl RegFile {
    pub fn new() -> Self {
        Self { regs: [0; 32] }
    }

    #[inline]
    pub fn read(&self, reg: u8) -> u32 {
        match reg & 0x1F {
            0 => 0,
            r => self.regs[r as usize],
        }
    }

    #[inline]
    pub fn write(&mut self, reg: u8, value: u32) {
        let r = reg & 0x1F;
        if r != 0 {
            self.regs[r as usize] = value;
        }
    }

    pub fn snapshot(&self) -> &[u32; 32] {
        &self.regs
    }
}

/// Table entry for CSR declaration: name, address, reset value.
#[derive(Clone, Copy, Debug)]
pub struct CsrEntry {
    pub name: &'static str,
    pub addr: u16,
    pub reset: u32,
}

/// Simple CSR bank: a hash table indexed by address.
#[derive(Clone, Default)]
pub struct CsrBank {
    table: HashMap<u16, u32>,
}

impl CsrBank {
    pub fn new() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Register a batch of CSRs declared as a table.
    pub fn register(&mut self, entries: &[CsrEntry]) {
        for e in entries {
            self.table.insert(e.addr, e.reset);
        }
    }

    pub fn is_registered(&self, addr: u16) -> bool {
        self.table.contains_key(&addr)
    }

    /// Unregistered addresses read as zero.
    #[inline]
    pub fn read(&self, addr: u16) -> u32 {
        self.table.get(&addr).copied().unwrap_or(0)
    }

    #[inline]
    pub fn write(&mut self, addr: u16, value: u32) {
        self.table.insert(addr, value);
    }
}

/// Aggregated architectural state of one hart.
#[derive(Clone, Default)]
pub struct Status {
    pub int: RegFile,
    pub csr: CsrBank,
}

impl Status {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn int_read(&self, reg: u8) -> u32 {
        self.int.read(reg)
    }

    #[inline]
    pub fn int_write(&mut self, reg: u8, value: u32) {
        self.int.write(reg, value)
    }

    #[inline]
    pub fn csr_read(&self, addr: u16) -> u32 {
        self.csr.read(addr)
    }

    #[inline]
    pub fn csr_write(&mut self, addr: u16, value: u32) {
        self.csr.write(addr, value)
    }

    /// Snapshot all architectural state at once.
    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            int: *self.int.snapshot(),
            csr: self.csr.table.clone(),
        }
    }
}

/// Snapshot of all architectural state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub int: [u32; 32],
    pub csr: HashMap<u16, u32>,
}
