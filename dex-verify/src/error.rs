//! Verifier error implementation.

use dex_types::{CodeAddress, DescriptorError, TypeDescriptor};
use thiserror::Error;

/// Verifier error variants.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The bytecode is well-formed but semantically invalid: an operand
    /// category mismatch, a broken wide pair, a missing payload and the like.
    #[error("invalid bytecode at {address:#x}: {message}")]
    Validation {
        /// Address of the offending instruction, in code units.
        address: CodeAddress,
        /// Description naming the offending register or type.
        message: String,
    },
    /// A referenced descriptor has no definition in the class path.
    #[error("cannot resolve class {0}")]
    UnresolvedClass(TypeDescriptor),
    /// The method is structurally broken before any instruction can be
    /// blamed: no code item, bad register counts, misnamed constructors.
    #[error("malformed method: {0}")]
    Malformed(String),
    /// A type descriptor violates the descriptor grammar.
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
}

impl VerifyError {
    /// A validation error blaming the instruction at `address`.
    pub(crate) fn validation(address: CodeAddress, message: impl Into<String>) -> Self {
        Self::Validation {
            address,
            message: message.into(),
        }
    }
}
