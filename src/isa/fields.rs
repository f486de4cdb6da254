//! 指令字段提取辅助函数
//!
//! 提供从 32-bit 向量指令字中提取各字段的工具函数。
//! OP-V 与向量访存共用 rd/vd、rs1/vs1、rs2/vs2 的位置。

/// 提取 opcode 字段 [6:0]
#[inline]
pub fn opcode(raw: u32) -> u32 {
    raw & 0x7F
}

/// 提取 rd / vd / vs3 字段 [11:7]
#[inline]
pub fn rd(raw: u32) -> u8 {
    ((raw >> 7) & 0x1F) as u8
}

/// 提取 funct3 字段 [14:12]（访存指令中为 width）
#[inline]
pub fn funct3(raw: u32) -> u32 {
    (raw >> 12) & 0x7
}

/// 提取 rs1 / vs1 字段 [19:15]
#[inline]
pub fn rs1(raw: u32) -> u8 {
    ((raw >> 15) & 0x1F) as u8
}

/// 提取 rs2 / vs2 字段 [24:20]
#[inline]
pub fn rs2(raw: u32) -> u8 {
    ((raw >> 20) & 0x1F) as u8
}

/// 提取 vm 位 [25]，1 表示不使用掩码
#[inline]
pub fn vm(raw: u32) -> bool {
    (raw >> 25) & 0x1 != 0
}

/// 提取 funct6 字段 [31:26]
#[inline]
pub fn funct6(raw: u32) -> u32 {
    (raw >> 26) & 0x3F
}

/// 提取 OPIVI 的 5-bit 立即数 [19:15] 并符号扩展
#[inline]
pub fn simm5(raw: u32) -> i8 {
    ((rs1(raw) << 3) as i8) >> 3
}

/// 提取 OPIVI 的 5-bit 无符号立即数 [19:15]（移位量）
#[inline]
pub fn uimm5(raw: u32) -> u8 {
    rs1(raw)
}

/// 提取 vsetvli 的 zimm[10:0] [30:20]
#[inline]
pub fn zimm11(raw: u32) -> u16 {
    ((raw >> 20) & 0x7FF) as u16
}

/// 提取 vsetivli 的 zimm[9:0] [29:20]
#[inline]
pub fn zimm10(raw: u32) -> u16 {
    ((raw >> 20) & 0x3FF) as u16
}

/// 提取访存寻址模式 mop [27:26]
#[inline]
pub fn mop(raw: u32) -> u32 {
    (raw >> 26) & 0x3
}

/// 提取段数 nf [31:29]
#[inline]
pub fn nf(raw: u32) -> u32 {
    (raw >> 29) & 0x7
}

// ========== Opcode 常量 ==========
pub const OP_V: u32 = 0b1010111;
pub const OP_LOAD_FP: u32 = 0b0000111;
pub const OP_STORE_FP: u32 = 0b0100111;

// ========== OP-V funct3 ==========
pub const OPIVV: u32 = 0b000;
pub const OPMVV: u32 = 0b010;
pub const OPIVI: u32 = 0b011;
pub const OPIVX: u32 = 0b100;
pub const OPMVX: u32 = 0b110;
pub const OPCFG: u32 = 0b111;

// ========== 访存 mop ==========
pub const MOP_UNIT_STRIDE: u32 = 0b00;
pub const MOP_INDEXED_UNORDERED: u32 = 0b01;
pub const MOP_INDEXED_ORDERED: u32 = 0b11;

/// 判断指令字是否属于向量 opcode 空间
///
/// LOAD-FP / STORE-FP 只有 width 为 000/101/110/111 时才是向量访存。
pub fn is_vector_opcode(raw: u32) -> bool {
    match opcode(raw) {
        OP_V => true,
        OP_LOAD_FP | OP_STORE_FP => matches!(funct3(raw), 0b000 | 0b101 | 0b110 | 0b111),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simm5_sign_extension() {
        let raw = 0x028EB257; // vadd.vi v4, v8, -3
        assert_eq!(simm5(raw), -3);
        let raw = 0x0082B257; // vadd.vi v4, v8, 5, v0.t
        assert_eq!(simm5(raw), 5);
    }

    #[test]
    fn test_uimm5_shift_amount() {
        let raw = 0x968FB257; // vsll.vi v4, v8, 31
        assert_eq!(uimm5(raw), 31);
        assert_eq!(simm5(raw), -1);
    }

    #[test]
    fn test_vm_bit() {
        assert!(!vm(0x002180D7));
        assert!(vm(0x022180D7));
    }

    #[test]
    fn test_zimm() {
        assert_eq!(zimm11(0x0505F557), 0x50); // vsetvli a0, a1, e32, ta, m1, mu
        assert_eq!(zimm10(0xCCA8F2D7), 0xCA); // vsetivli t0, 17, e16, ta, m4, ma
        assert_eq!(rs1(0xCCA8F2D7), 17);
    }

    #[test]
    fn test_mem_fields() {
        let raw = 0x0E666107; // vloxei32.v v2, (a2), v6
        assert_eq!(mop(raw), MOP_INDEXED_ORDERED);
        assert_eq!(nf(raw), 0);
        assert_eq!(funct3(raw), 0b110);
        assert_eq!(rs2(raw), 6);
    }

    #[test]
    fn test_is_vector_opcode() {
        assert!(is_vector_opcode(0x002180D7));
        assert!(is_vector_opcode(0x02056207)); // vle32.v
        assert!(!is_vector_opcode(0x00052087)); // flw ft1, 0(a0)
        assert!(!is_vector_opcode(0x00000013)); // nop
    }
}
