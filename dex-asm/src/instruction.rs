use std::fmt;
use std::sync::Arc;

use dex_types::{Literal, RegisterId, TypeDescriptor};

use crate::opcode::Opcode;
use crate::reference::{FieldRef, MethodRef};

/// A decoded instruction: an opcode plus its operands.
///
/// The operand shape is determined by the opcode's format; constructors in
/// [`crate::op`] produce well-formed pairs. Consumers that receive
/// instructions from elsewhere must treat a shape mismatch as malformed
/// bytecode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// The opcode.
    pub opcode: Opcode,
    /// The operands, shaped by the opcode's format.
    pub operands: Operands,
}

impl Instruction {
    /// Assemble an instruction from its parts.
    pub fn new(opcode: Opcode, operands: Operands) -> Self {
        Self { opcode, operands }
    }

    /// Encoded size in 16-bit code units.
    ///
    /// Format-determined for regular instructions; data-determined for the
    /// payload pseudo-instructions.
    pub fn size_in_code_units(&self) -> usize {
        match &self.operands {
            Operands::Payload(payload) => payload.size_in_code_units(),
            // non-payload opcodes always have a format-determined size
            _ => self.opcode.format().code_units().unwrap_or(1),
        }
    }

    /// The first register operand, which is the destination for every
    /// register-writing opcode.
    pub fn first_register(&self) -> Option<RegisterId> {
        self.operands.first_register()
    }

    /// The relative branch target, for branching opcodes.
    pub fn branch_offset(&self) -> Option<i32> {
        match self.operands {
            Operands::Branch { offset }
            | Operands::RegBranch { offset, .. }
            | Operands::RegPairBranch { offset, .. } => Some(offset),
            _ => None,
        }
    }

    /// The relative offset of the associated payload, for `fill-array-data`
    /// and the switch opcodes.
    pub fn payload_offset(&self) -> Option<i32> {
        match self.operands {
            Operands::RegPayload { offset, .. } => Some(offset),
            _ => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.opcode.fmt(f)
    }
}

/// Operand storage, grouped by shape rather than by exact format: all
/// two-register moves share a variant whether encoded as 12x, 22x or 32x.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operands {
    /// No operands (`nop`, `return-void`).
    None,
    /// A single register (11x).
    Reg {
        /// The register.
        a: RegisterId,
    },
    /// Destination and source registers (12x, 22x, 32x).
    RegPair {
        /// Destination register.
        a: RegisterId,
        /// Source register.
        b: RegisterId,
    },
    /// Three registers (23x): destination plus two sources.
    RegTriple {
        /// Destination register.
        a: RegisterId,
        /// First source register.
        b: RegisterId,
        /// Second source register.
        c: RegisterId,
    },
    /// Register and literal (11n, 21s, 21h, 31i, 51l). `high16` literals are
    /// stored already shifted.
    RegLiteral {
        /// Destination register.
        a: RegisterId,
        /// The literal, sign-extended.
        literal: Literal,
    },
    /// Two registers and a literal (22s, 22b).
    RegPairLiteral {
        /// Destination register.
        a: RegisterId,
        /// Source register.
        b: RegisterId,
        /// The literal, sign-extended.
        literal: Literal,
    },
    /// Bare branch offset (10t, 20t, 30t).
    Branch {
        /// Relative target in code units.
        offset: i32,
    },
    /// Register and branch offset (21t).
    RegBranch {
        /// Tested register.
        a: RegisterId,
        /// Relative target in code units.
        offset: i32,
    },
    /// Two registers and a branch offset (22t).
    RegPairBranch {
        /// First tested register.
        a: RegisterId,
        /// Second tested register.
        b: RegisterId,
        /// Relative target in code units.
        offset: i32,
    },
    /// Register and payload offset (31t).
    RegPayload {
        /// Operand register.
        a: RegisterId,
        /// Relative payload location in code units.
        offset: i32,
    },
    /// Register and string constant (21c, 31c).
    RegString {
        /// Destination register.
        a: RegisterId,
        /// The referenced string.
        string: Arc<str>,
    },
    /// Register and type reference (21c).
    RegType {
        /// Destination register.
        a: RegisterId,
        /// The referenced type.
        ty: TypeDescriptor,
    },
    /// Two registers and a type reference (22c).
    RegPairType {
        /// Destination register.
        a: RegisterId,
        /// Source register.
        b: RegisterId,
        /// The referenced type.
        ty: TypeDescriptor,
    },
    /// Register and field reference (21c static field access).
    RegField {
        /// Value register.
        a: RegisterId,
        /// The referenced field.
        field: FieldRef,
    },
    /// Two registers and a field reference (22c instance field access).
    RegPairField {
        /// Value register.
        a: RegisterId,
        /// Object register.
        b: RegisterId,
        /// The referenced field.
        field: FieldRef,
    },
    /// Argument list and method reference (35c invokes).
    RegListMethod {
        /// Argument registers, at most five.
        registers: Vec<RegisterId>,
        /// The invoked method.
        method: MethodRef,
    },
    /// Argument range and method reference (3rc invokes).
    RegRangeMethod {
        /// First argument register.
        start: RegisterId,
        /// Number of argument registers.
        count: u16,
        /// The invoked method.
        method: MethodRef,
    },
    /// Argument list and type reference (35c `filled-new-array`).
    RegListType {
        /// Element registers, at most five.
        registers: Vec<RegisterId>,
        /// The array type.
        ty: TypeDescriptor,
    },
    /// Argument range and type reference (3rc `filled-new-array/range`).
    RegRangeType {
        /// First element register.
        start: RegisterId,
        /// Number of element registers.
        count: u16,
        /// The array type.
        ty: TypeDescriptor,
    },
    /// Inline data for one of the payload pseudo-instructions.
    Payload(Payload),
}

impl Operands {
    /// The first register operand, if any.
    pub fn first_register(&self) -> Option<RegisterId> {
        match self {
            Self::Reg { a }
            | Self::RegPair { a, .. }
            | Self::RegTriple { a, .. }
            | Self::RegLiteral { a, .. }
            | Self::RegPairLiteral { a, .. }
            | Self::RegBranch { a, .. }
            | Self::RegPairBranch { a, .. }
            | Self::RegPayload { a, .. }
            | Self::RegString { a, .. }
            | Self::RegType { a, .. }
            | Self::RegPairType { a, .. }
            | Self::RegField { a, .. }
            | Self::RegPairField { a, .. } => Some(*a),
            _ => None,
        }
    }
}

/// Inline data carried by the payload pseudo-instructions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Jump table for `packed-switch`: consecutive keys starting at
    /// `first_key`.
    PackedSwitch {
        /// Key matching the first target.
        first_key: i32,
        /// Relative branch targets, in code units from the switch opcode.
        targets: Vec<i32>,
    },
    /// Jump table for `sparse-switch`: sorted keys with matching targets.
    SparseSwitch {
        /// Sorted case keys.
        keys: Vec<i32>,
        /// Relative branch targets, one per key.
        targets: Vec<i32>,
    },
    /// Element data for `fill-array-data`.
    ArrayData {
        /// Width of one element in bytes: 1, 2, 4 or 8.
        element_width: u16,
        /// Number of elements.
        element_count: u32,
    },
}

impl Payload {
    /// Encoded size in 16-bit code units, per the bytecode reference.
    pub fn size_in_code_units(&self) -> usize {
        match self {
            Self::PackedSwitch { targets, .. } => targets.len() * 2 + 4,
            Self::SparseSwitch { keys, .. } => keys.len() * 4 + 2,
            Self::ArrayData {
                element_width,
                element_count,
            } => {
                let data_bytes = *element_width as usize * *element_count as usize;
                (data_bytes + 1) / 2 + 4
            }
        }
    }

    /// The relative branch targets, for the switch payloads.
    pub fn targets(&self) -> &[i32] {
        match self {
            Self::PackedSwitch { targets, .. } | Self::SparseSwitch { targets, .. } => targets,
            Self::ArrayData { .. } => &[],
        }
    }
}
