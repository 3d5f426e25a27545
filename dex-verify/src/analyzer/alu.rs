//! Arithmetic, logic, comparison-free unary/binary forms and their literal
//! variants.

use dex_asm::Operands;
use dex_types::{Literal, RegisterId};

use super::MethodAnalyzer;
use crate::error::VerifyError;
use crate::regtype::{CategorySet, RegisterType};

impl<'a> MethodAnalyzer<'a> {
    fn operands_reg_triple(
        &self,
        node: usize,
    ) -> Result<(RegisterId, RegisterId, RegisterId), VerifyError> {
        match self.instruction(node).operands {
            Operands::RegTriple { a, b, c } => Ok((a, b, c)),
            _ => Err(self.malformed_operands(node)),
        }
    }

    fn operands_reg_pair_literal(
        &self,
        node: usize,
    ) -> Result<(RegisterId, RegisterId, Literal), VerifyError> {
        match self.instruction(node).operands {
            Operands::RegPairLiteral { a, b, literal } => Ok((a, b, literal)),
            _ => Err(self.malformed_operands(node)),
        }
    }

    /// 32-bit source; the result decides whether a pair is written.
    pub(super) fn verify_unary(
        &mut self,
        node: usize,
        result: RegisterType,
    ) -> Result<(), VerifyError> {
        let (_, source) = self.operands_reg_pair(node)?;
        self.check_register(node, source, CategorySet::PRIMITIVE_32)?;
        self.set_destination(node, result)
    }

    /// Wide-pair source; the result decides whether a pair is written.
    pub(super) fn verify_unary_wide(
        &mut self,
        node: usize,
        result: RegisterType,
    ) -> Result<(), VerifyError> {
        let (_, source) = self.operands_reg_pair(node)?;
        self.check_wide_pair(node, source)?;
        self.set_destination(node, result)
    }

    /// Two 32-bit sources. With `boolean_refinement`, two boolean operands
    /// produce a boolean: `and`/`or`/`xor` preserve the value range.
    pub(super) fn verify_binary(
        &mut self,
        node: usize,
        result: RegisterType,
        boolean_refinement: bool,
    ) -> Result<(), VerifyError> {
        let (_, b, c) = self.operands_reg_triple(node)?;
        let tb = self.check_register(node, b, CategorySet::PRIMITIVE_32)?;
        let tc = self.check_register(node, c, CategorySet::PRIMITIVE_32)?;

        let result = if boolean_refinement
            && tb.is(CategorySet::BOOLEAN_VALUES)
            && tc.is(CategorySet::BOOLEAN_VALUES)
        {
            RegisterType::Boolean
        } else {
            result
        };
        self.set_destination(node, result)
    }

    /// Two wide sources, wide result.
    pub(super) fn verify_binary_wide(
        &mut self,
        node: usize,
        result: RegisterType,
    ) -> Result<(), VerifyError> {
        let (_, b, c) = self.operands_reg_triple(node)?;
        self.check_wide_pair(node, b)?;
        self.check_wide_pair(node, c)?;
        self.set_destination(node, result)
    }

    /// Wide value shifted by a 32-bit amount.
    pub(super) fn verify_shift_wide(&mut self, node: usize) -> Result<(), VerifyError> {
        let (_, b, c) = self.operands_reg_triple(node)?;
        self.check_wide_pair(node, b)?;
        self.check_register(node, c, CategorySet::PRIMITIVE_32)?;
        self.set_destination(node, RegisterType::LongLo)
    }

    /// In-place form of [`Self::verify_binary`]: the destination doubles as
    /// the first source.
    pub(super) fn verify_binary_2addr(
        &mut self,
        node: usize,
        result: RegisterType,
        boolean_refinement: bool,
    ) -> Result<(), VerifyError> {
        let (a, b) = self.operands_reg_pair(node)?;
        let ta = self.check_register(node, a, CategorySet::PRIMITIVE_32)?;
        let tb = self.check_register(node, b, CategorySet::PRIMITIVE_32)?;

        let result = if boolean_refinement
            && ta.is(CategorySet::BOOLEAN_VALUES)
            && tb.is(CategorySet::BOOLEAN_VALUES)
        {
            RegisterType::Boolean
        } else {
            result
        };
        self.set_destination(node, result)
    }

    /// In-place wide binary form.
    pub(super) fn verify_binary_wide_2addr(
        &mut self,
        node: usize,
        result: RegisterType,
    ) -> Result<(), VerifyError> {
        let (a, b) = self.operands_reg_pair(node)?;
        self.check_wide_pair(node, a)?;
        self.check_wide_pair(node, b)?;
        self.set_destination(node, result)
    }

    /// In-place wide shift.
    pub(super) fn verify_shift_wide_2addr(&mut self, node: usize) -> Result<(), VerifyError> {
        let (a, b) = self.operands_reg_pair(node)?;
        self.check_wide_pair(node, a)?;
        self.check_register(node, b, CategorySet::PRIMITIVE_32)?;
        self.set_destination(node, RegisterType::LongLo)
    }

    /// Literal binary form. With `boolean_refinement`, a boolean source
    /// and a 0/1 literal produce a boolean.
    pub(super) fn verify_binary_literal(
        &mut self,
        node: usize,
        boolean_refinement: bool,
    ) -> Result<(), VerifyError> {
        let (_, b, literal) = self.operands_reg_pair_literal(node)?;
        let tb = self.check_register(node, b, CategorySet::PRIMITIVE_32)?;

        let result = if boolean_refinement
            && tb.is(CategorySet::BOOLEAN_VALUES)
            && matches!(literal, 0 | 1)
        {
            RegisterType::Boolean
        } else {
            RegisterType::Integer
        };
        self.set_destination(node, result)
    }
}
