//! Vector CSR definitions.
//!
//! Each CSR gets an address constant `CSR_XXX`; `V_CSRS` uses those constants
//! for registration in the `CsrBank`.

use super::status::CsrEntry;
use super::vtype::VILL_BIT;

// ============================================================================
// V Extension CSR Addresses
// ============================================================================

pub const CSR_VSTART: u16 = 0x008;
pub const CSR_VXSAT: u16 = 0x009;
pub const CSR_VXRM: u16 = 0x00A;
pub const CSR_VCSR: u16 = 0x00F;
pub const CSR_VL: u16 = 0xC20;
pub const CSR_VTYPE: u16 = 0xC21;
pub const CSR_VLENB: u16 = 0xC22;

/// Vector CSRs. `vlenb` is overwritten with VLEN/8 when the hart is built.
pub const V_CSRS: &[CsrEntry] = &[
    CsrEntry { name: "vstart", addr: CSR_VSTART, reset: 0 },
    CsrEntry { name: "vxsat",  addr: CSR_VXSAT,  reset: 0 },
    CsrEntry { name: "vxrm",   addr: CSR_VXRM,   reset: 0 },
    CsrEntry { name: "vcsr",   addr: CSR_VCSR,   reset: 0 },
    CsrEntry { name: "vl",     addr: CSR_VL,     reset: 0 },
    CsrEntry { name: "vtype",  addr: CSR_VTYPE,  reset: VILL_BIT },
    CsrEntry { name: "vlenb",  addr: CSR_VLENB,  reset: 0 },
];

/// Look up a vector CSR name by address.
pub fn csr_name(addr: u16) -> Option<&'static str> {
    V_CSRS.iter().find(|e| e.addr == addr).map(|e| e.name)
}
