//! Moves, result/exception reads and the constant family.

use dex_asm::Operands;
use dex_types::RegisterId;

use super::MethodAnalyzer;
use crate::error::VerifyError;
use crate::regtype::{CategorySet, RegisterType};

impl<'a> MethodAnalyzer<'a> {
    fn operands_reg(&self, node: usize) -> Result<RegisterId, VerifyError> {
        match self.instruction(node).operands {
            Operands::Reg { a } => Ok(a),
            _ => Err(self.malformed_operands(node)),
        }
    }

    pub(super) fn operands_reg_pair(
        &self,
        node: usize,
    ) -> Result<(RegisterId, RegisterId), VerifyError> {
        match self.instruction(node).operands {
            Operands::RegPair { a, b } => Ok((a, b)),
            _ => Err(self.malformed_operands(node)),
        }
    }

    pub(super) fn verify_move(
        &mut self,
        node: usize,
        allowed: CategorySet,
    ) -> Result<(), VerifyError> {
        let (_, source) = self.operands_reg_pair(node)?;
        let ty = self.check_register(node, source, allowed)?;
        self.set_destination(node, ty)
    }

    pub(super) fn verify_move_wide(&mut self, node: usize) -> Result<(), VerifyError> {
        let (_, source) = self.operands_reg_pair(node)?;
        let low = self.check_wide_pair(node, source)?;
        self.set_destination(node, low)
    }

    /// `move-result*` reads the value stored by the instruction directly
    /// before it in the stream, which must be an invoke or
    /// `filled-new-array` of the matching family.
    pub(super) fn verify_move_result(
        &mut self,
        node: usize,
        allowed: CategorySet,
    ) -> Result<(), VerifyError> {
        self.operands_reg(node)?;
        let address = self.address(node);
        let instruction = self.instruction(node);

        // node ids are stream-ordered, so the previous node is node - 1;
        // node 1 is the first instruction and has nothing before it
        if node <= 1 {
            return Err(VerifyError::validation(
                address,
                format!("{instruction} must immediately follow an invoke or filled-new-array"),
            ));
        }
        let previous = node - 1;
        let previous_instruction = self.instruction(previous);
        if !previous_instruction.opcode.sets_result() {
            return Err(VerifyError::validation(
                address,
                format!("{instruction} must immediately follow an invoke or filled-new-array"),
            ));
        }

        let Some(result) = self.nodes[previous].result_type().cloned() else {
            return Err(VerifyError::validation(
                address,
                format!("{previous_instruction} does not store a result"),
            ));
        };
        if !result.is(allowed) {
            return Err(VerifyError::validation(
                address,
                format!(
                    "the result of {previous_instruction} is {result} but {instruction} \
                     requires one of: {allowed}"
                ),
            ));
        }
        self.set_destination(node, result)
    }

    /// `move-exception` is typed by the join of every exception caught at
    /// its address; a catch-all clause contributes `java/lang/Throwable`.
    pub(super) fn verify_move_exception(&mut self, node: usize) -> Result<(), VerifyError> {
        self.operands_reg(node)?;
        let address = self.address(node);

        let Some(caught_types) = self.handler_types.get(&address).cloned() else {
            return Err(VerifyError::validation(
                address,
                "move-exception is not at an exception handler address",
            ));
        };

        let throwable = self.classpath.throwable().clone();
        let mut caught = RegisterType::Unknown;
        for descriptor in caught_types {
            let descriptor = descriptor.unwrap_or_else(|| throwable.clone());
            self.classpath.ensure_resolvable(&descriptor)?;
            if !self.classpath.extends(&descriptor, &throwable)? {
                return Err(VerifyError::validation(
                    address,
                    format!("caught type {descriptor} does not extend {throwable}"),
                ));
            }
            caught = caught.join(&RegisterType::Reference(descriptor), self.classpath)?;
        }
        self.set_destination(node, caught)
    }

    pub(super) fn verify_const(&mut self, node: usize) -> Result<(), VerifyError> {
        let literal = match self.instruction(node).operands {
            Operands::RegLiteral { literal, .. } => literal,
            _ => return Err(self.malformed_operands(node)),
        };
        self.set_destination(node, RegisterType::for_literal(literal))
    }

    pub(super) fn verify_const_wide(&mut self, node: usize) -> Result<(), VerifyError> {
        match self.instruction(node).operands {
            Operands::RegLiteral { .. } => {}
            _ => return Err(self.malformed_operands(node)),
        }
        self.set_destination(node, RegisterType::LongLo)
    }

    pub(super) fn verify_const_string(&mut self, node: usize) -> Result<(), VerifyError> {
        match self.instruction(node).operands {
            Operands::RegString { .. } => {}
            _ => return Err(self.malformed_operands(node)),
        }
        let string = self.classpath.string().clone();
        self.set_destination(node, RegisterType::Reference(string))
    }

    pub(super) fn verify_const_class(&mut self, node: usize) -> Result<(), VerifyError> {
        let ty = match &self.instruction(node).operands {
            Operands::RegType { ty, .. } => ty.clone(),
            _ => return Err(self.malformed_operands(node)),
        };
        self.classpath.ensure_resolvable(&ty)?;

        let class = self.classpath.class_type().clone();
        self.set_destination(node, RegisterType::Reference(class))
    }
}
