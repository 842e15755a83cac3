//! LS-8 instruction set.
//!
//! Every opcode byte carries its own metadata:
//!
//! ```text
//! bit  7 6 | 5   | 4       | 3 2 1 0
//!      n   | ALU | sets PC | identity
//! ```
//!
//! where `n` is the number of operand bytes that follow the opcode.

/// Number of operand bytes following `byte`.
#[inline]
pub const fn operand_count(byte: u8) -> u8 {
    byte >> 6
}

/// Whether `byte` is routed through the ALU.
#[inline]
pub const fn is_alu(byte: u8) -> bool {
    (byte >> 5) & 1 == 1
}

/// Whether the handler for `byte` sets PC itself.
#[inline]
pub const fn sets_pc(byte: u8) -> bool {
    (byte >> 4) & 1 == 1
}

/// Bit-field view of an opcode byte.
///
/// Computed fresh every cycle since programs may rewrite their own code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoded {
    pub byte: u8,
    pub operand_count: u8,
    pub is_alu: bool,
    pub sets_pc: bool,
}

impl Decoded {
    #[inline]
    pub const fn new(byte: u8) -> Self {
        Self {
            byte,
            operand_count: operand_count(byte),
            is_alu: is_alu(byte),
            sets_pc: sets_pc(byte),
        }
    }

    /// Instruction length in bytes (`n + 1`).
    #[inline]
    pub const fn len(self) -> u8 {
        self.operand_count + 1
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    // Other
    Nop = 0b0000_0000,
    Hlt = 0b0000_0001,
    Ldi = 0b1000_0010,
    Ld = 0b1000_0011,
    St = 0b1000_0100,
    Push = 0b0100_0101,
    Pop = 0b0100_0110,
    Prn = 0b0100_0111,
    Pra = 0b0100_1000,

    // PC mutators
    Call = 0b0101_0000,
    Ret = 0b0001_0001,
    Jmp = 0b0101_0100,
    Jeq = 0b0101_0101,
    Jne = 0b0101_0110,
    Jgt = 0b0101_0111,
    Jlt = 0b0101_1000,
    Jle = 0b0101_1001,
    Jge = 0b0101_1010,

    // ALU
    Add = 0b1010_0000,
    Sub = 0b1010_0001,
    Mul = 0b1010_0010,
    Div = 0b1010_0011,
    Mod = 0b1010_0100,
    Inc = 0b0110_0101,
    Dec = 0b0110_0110,
    Cmp = 0b1010_0111,
    And = 0b1010_1000,
    Not = 0b0110_1001,
    Or = 0b1010_1010,
    Xor = 0b1010_1011,
    Shl = 0b1010_1100,
    Shr = 0b1010_1101,
}

impl Opcode {
    pub const ALL: [Opcode; 32] = [
        Opcode::Nop,
        Opcode::Hlt,
        Opcode::Ldi,
        Opcode::Ld,
        Opcode::St,
        Opcode::Push,
        Opcode::Pop,
        Opcode::Prn,
        Opcode::Pra,
        Opcode::Call,
        Opcode::Ret,
        Opcode::Jmp,
        Opcode::Jeq,
        Opcode::Jne,
        Opcode::Jgt,
        Opcode::Jlt,
        Opcode::Jle,
        Opcode::Jge,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::Div,
        Opcode::Mod,
        Opcode::Inc,
        Opcode::Dec,
        Opcode::Cmp,
        Opcode::And,
        Opcode::Not,
        Opcode::Or,
        Opcode::Xor,
        Opcode::Shl,
        Opcode::Shr,
    ];

    #[inline]
    pub const fn byte(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn decoded(self) -> Decoded {
        Decoded::new(self as u8)
    }

    pub const fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Nop => "NOP",
            Opcode::Hlt => "HLT",
            Opcode::Ldi => "LDI",
            Opcode::Ld => "LD",
            Opcode::St => "ST",
            Opcode::Push => "PUSH",
            Opcode::Pop => "POP",
            Opcode::Prn => "PRN",
            Opcode::Pra => "PRA",
            Opcode::Call => "CALL",
            Opcode::Ret => "RET",
            Opcode::Jmp => "JMP",
            Opcode::Jeq => "JEQ",
            Opcode::Jne => "JNE",
            Opcode::Jgt => "JGT",
            Opcode::Jlt => "JLT",
            Opcode::Jle => "JLE",
            Opcode::Jge => "JGE",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
            Opcode::Div => "DIV",
            Opcode::Mod => "MOD",
            Opcode::Inc => "INC",
            Opcode::Dec => "DEC",
            Opcode::Cmp => "CMP",
            Opcode::And => "AND",
            Opcode::Not => "NOT",
            Opcode::Or => "OR",
            Opcode::Xor => "XOR",
            Opcode::Shl => "SHL",
            Opcode::Shr => "SHR",
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Opcode byte → instruction lookup, one slot per possible byte.
///
/// Built once from [`Opcode::ALL`]; the enum's explicit discriminants make a
/// second registration of the same byte a compile error.
#[derive(Clone)]
pub struct DispatchTable {
    entries: [Option<Opcode>; 256],
}

impl DispatchTable {
    pub const fn new() -> Self {
        let mut entries = [None; 256];
        let mut i = 0;
        while i < Opcode::ALL.len() {
            let op = Opcode::ALL[i];
            entries[op as usize] = Some(op);
            i += 1;
        }
        Self { entries }
    }

    #[inline]
    pub fn lookup(&self, byte: u8) -> Option<Opcode> {
        self.entries[byte as usize]
    }

    /// Number of registered opcodes.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DispatchTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(
                self.entries
                    .iter()
                    .enumerate()
                    .filter_map(|(byte, op)| op.map(|op| (byte, op))),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn field_extraction() {
        // LDI: two operands, not ALU, advances normally
        let ldi = Decoded::new(0b1000_0010);
        assert_eq!(ldi.operand_count, 2);
        assert!(!ldi.is_alu);
        assert!(!ldi.sets_pc);
        assert_eq!(ldi.len(), 3);

        let call = Opcode::Call.decoded();
        assert_eq!(call.operand_count, 1);
        assert!(call.sets_pc);

        let mul = Opcode::Mul.decoded();
        assert!(mul.is_alu);
        assert!(!mul.sets_pc);
    }

    #[test]
    fn table_registers_every_opcode_once() {
        let table = DispatchTable::new();
        let bytes: HashSet<u8> = Opcode::ALL.iter().map(|op| op.byte()).collect();
        assert_eq!(bytes.len(), Opcode::ALL.len());
        assert_eq!(table.len(), Opcode::ALL.len());

        for op in Opcode::ALL {
            assert_eq!(table.lookup(op.byte()), Some(op));
        }
    }

    #[test]
    fn reserved_and_unused_bytes_are_absent() {
        let table = DispatchTable::new();
        // INT / IRET
        assert_eq!(table.lookup(0b0101_0010), None);
        assert_eq!(table.lookup(0b0001_0011), None);
        assert_eq!(table.lookup(0xFF), None);
        // ALU class byte with no operation behind it
        assert_eq!(table.lookup(0b1010_0101), None);
    }

    #[test]
    fn alu_class_matches_group() {
        let alu: Vec<_> = Opcode::ALL
            .iter()
            .filter(|op| op.decoded().is_alu)
            .map(|op| op.mnemonic())
            .collect();
        assert_eq!(
            alu,
            [
                "ADD", "SUB", "MUL", "DIV", "MOD", "INC", "DEC", "CMP", "AND", "NOT", "OR", "XOR",
                "SHL", "SHR"
            ]
        );
    }

    #[test]
    fn pc_mutators() {
        for op in Opcode::ALL {
            let expected = matches!(
                op,
                Opcode::Call
                    | Opcode::Ret
                    | Opcode::Jmp
                    | Opcode::Jeq
                    | Opcode::Jne
                    | Opcode::Jgt
                    | Opcode::Jlt
                    | Opcode::Jle
                    | Opcode::Jge
            );
            assert_eq!(op.decoded().sets_pc, expected, "{}", op);
        }
    }
}
