//! Array access verification: length, element reads/writes, allocation and
//! bulk initialization.

use dex_asm::{Opcode, Operands, Payload};
use dex_types::{RegisterId, TypeDescriptor};

use super::MethodAnalyzer;
use crate::error::VerifyError;
use crate::regtype::{CategorySet, RegisterType};

impl<'a> MethodAnalyzer<'a> {
    pub(super) fn verify_array_length(&mut self, node: usize) -> Result<(), VerifyError> {
        let (_, array) = self.operands_reg_pair(node)?;
        let ty = self.check_register(node, array, CategorySet::ANY_REFERENCE)?;

        if let Some(descriptor) = ty.reference_type() {
            if !descriptor.is_array() {
                return Err(VerifyError::validation(
                    self.address(node),
                    format!("cannot use array-length on non-array type {descriptor}"),
                ));
            }
        }
        self.set_destination(node, RegisterType::Integer)
    }

    pub(super) fn verify_new_array(&mut self, node: usize) -> Result<(), VerifyError> {
        let (size, ty) = match &self.instruction(node).operands {
            Operands::RegPairType { b, ty, .. } => (*b, ty.clone()),
            _ => return Err(self.malformed_operands(node)),
        };
        if !ty.is_array() {
            return Err(VerifyError::validation(
                self.address(node),
                format!("new-array type {ty} is not an array"),
            ));
        }
        self.classpath.ensure_resolvable(&ty)?;
        self.check_register(node, size, CategorySet::PRIMITIVE_32)?;
        self.set_destination(node, RegisterType::Reference(ty))
    }

    /// Registers and array type of a `filled-new-array(/range)`.
    fn filled_array_arguments(
        &self,
        node: usize,
    ) -> Result<(Vec<RegisterId>, TypeDescriptor), VerifyError> {
        match &self.instruction(node).operands {
            Operands::RegListType { registers, ty } => Ok((registers.clone(), ty.clone())),
            Operands::RegRangeType { start, count, ty } => {
                let end = u32::from(*start) + u32::from(*count);
                if end > u32::from(u16::MAX) + 1 {
                    return Err(VerifyError::validation(
                        self.address(node),
                        format!(
                            "register range v{start} plus {count} registers exceeds the \
                             16-bit register space"
                        ),
                    ));
                }
                Ok(((0..*count).map(|i| start + i).collect(), ty.clone()))
            }
            _ => Err(self.malformed_operands(node)),
        }
    }

    pub(super) fn verify_filled_new_array(&mut self, node: usize) -> Result<(), VerifyError> {
        let (registers, ty) = self.filled_array_arguments(node)?;
        let address = self.address(node);

        let Some(element) = ty.element_type() else {
            return Err(VerifyError::validation(
                address,
                format!("filled-new-array type {ty} is not an array"),
            ));
        };
        if element.is_wide() {
            return Err(VerifyError::validation(
                address,
                format!("filled-new-array cannot hold wide elements of type {element}"),
            ));
        }
        self.classpath.ensure_resolvable(&ty)?;

        for register in registers {
            let value = self.register_type(node, register)?;
            if !value.can_be_assigned_to(&element, self.classpath)? {
                return Err(VerifyError::validation(
                    address,
                    format!(
                        "register v{register} holds {value} which is not assignable to the \
                         element type {element}"
                    ),
                ));
            }
        }

        self.nodes[node].result = Some(RegisterType::Reference(ty));
        Ok(())
    }

    pub(super) fn verify_fill_array_data(&mut self, node: usize) -> Result<(), VerifyError> {
        let (register, offset) = match self.instruction(node).operands {
            Operands::RegPayload { a, offset } => (a, offset),
            _ => return Err(self.malformed_operands(node)),
        };
        let address = self.address(node);
        let ty = self.check_register(node, register, CategorySet::ANY_REFERENCE)?;

        let payload_index = self.branch_target(self.index_of(node), offset)?;
        let payload_width = match &self.code.instructions[payload_index].operands {
            Operands::Payload(Payload::ArrayData { element_width, .. }) => *element_width,
            _ => {
                return Err(VerifyError::validation(
                    address,
                    format!(
                        "fill-array-data expects an array payload at {:#x}",
                        self.addresses[payload_index]
                    ),
                ));
            }
        };

        // a null array raises at runtime; the element width is unknowable
        let Some(descriptor) = ty.reference_type() else {
            return Ok(());
        };
        let element = descriptor.element_type();
        let expected_width = match element.as_ref().map(TypeDescriptor::as_str) {
            Some("Z" | "B") if descriptor.array_dimensions() == 1 => 1,
            Some("C" | "S") if descriptor.array_dimensions() == 1 => 2,
            Some("I" | "F") if descriptor.array_dimensions() == 1 => 4,
            Some("J" | "D") if descriptor.array_dimensions() == 1 => 8,
            _ => {
                return Err(VerifyError::validation(
                    address,
                    format!("cannot use fill-array-data with array type {descriptor}"),
                ));
            }
        };
        if payload_width != expected_width {
            return Err(VerifyError::validation(
                address,
                format!(
                    "array payload with {payload_width}-byte elements cannot fill {descriptor}"
                ),
            ));
        }
        Ok(())
    }

    fn array_access_operands(
        &self,
        node: usize,
    ) -> Result<(RegisterId, RegisterId, RegisterId), VerifyError> {
        match self.instruction(node).operands {
            Operands::RegTriple { a, b, c } => Ok((a, b, c)),
            _ => Err(self.malformed_operands(node)),
        }
    }

    pub(super) fn verify_aget(&mut self, node: usize) -> Result<(), VerifyError> {
        let (_, array, index) = self.array_access_operands(node)?;
        let opcode = self.instruction(node).opcode;
        let address = self.address(node);

        self.check_register(node, index, CategorySet::PRIMITIVE_32)?;
        let array_type = self.check_register(node, array, CategorySet::ANY_REFERENCE)?;

        let Some(descriptor) = array_type.reference_type().cloned() else {
            // reading from null raises at runtime; assume the widest
            // destination the opcode can produce
            let destination = match opcode {
                Opcode::Aget => RegisterType::Integer,
                Opcode::AgetWide => RegisterType::LongLo,
                Opcode::AgetObject => RegisterType::Null,
                Opcode::AgetBoolean => RegisterType::Boolean,
                Opcode::AgetByte => RegisterType::Byte,
                Opcode::AgetChar => RegisterType::Char,
                _ => RegisterType::Short,
            };
            return self.set_destination(node, destination);
        };

        let element = descriptor.element_type().ok_or_else(|| {
            VerifyError::validation(
                address,
                format!("cannot use {opcode} with non-array type {descriptor}"),
            )
        })?;

        if opcode == Opcode::AgetObject {
            if !element.is_reference() {
                return Err(VerifyError::validation(
                    address,
                    format!("Cannot use aget-object with array type {descriptor}"),
                ));
            }
            return self.set_destination(node, RegisterType::Reference(element));
        }

        let destination = match (opcode, element.as_str()) {
            (Opcode::Aget, "I") => RegisterType::Integer,
            (Opcode::Aget, "F") => RegisterType::Float,
            (Opcode::AgetWide, "J") => RegisterType::LongLo,
            (Opcode::AgetWide, "D") => RegisterType::DoubleLo,
            (Opcode::AgetBoolean, "Z") => RegisterType::Boolean,
            (Opcode::AgetByte, "B") => RegisterType::Byte,
            (Opcode::AgetChar, "C") => RegisterType::Char,
            (Opcode::AgetShort, "S") => RegisterType::Short,
            _ => {
                return Err(VerifyError::validation(
                    address,
                    format!("Cannot use {opcode} with array type {descriptor}"),
                ));
            }
        };
        self.set_destination(node, destination)
    }

    pub(super) fn verify_aput(&mut self, node: usize) -> Result<(), VerifyError> {
        let (source, array, index) = self.array_access_operands(node)?;
        let opcode = self.instruction(node).opcode;
        let address = self.address(node);

        self.check_register(node, index, CategorySet::PRIMITIVE_32)?;
        let array_type = self.check_register(node, array, CategorySet::ANY_REFERENCE)?;

        let Some(descriptor) = array_type.reference_type().cloned() else {
            // writing to null raises at runtime; the source must still fit
            // the opcode family
            match opcode {
                Opcode::Aput => self.check_register(node, source, CategorySet::PRIMITIVE_32)?,
                Opcode::AputWide => self.check_wide_pair(node, source)?,
                Opcode::AputObject => {
                    self.check_register(node, source, CategorySet::ANY_REFERENCE)?
                }
                Opcode::AputBoolean => {
                    self.check_register(node, source, CategorySet::BOOLEAN_VALUES)?
                }
                Opcode::AputByte => self.check_register(node, source, CategorySet::BYTE_VALUES)?,
                Opcode::AputChar => self.check_register(node, source, CategorySet::CHAR_VALUES)?,
                _ => self.check_register(node, source, CategorySet::SHORT_VALUES)?,
            };
            return Ok(());
        };

        let element = descriptor.element_type().ok_or_else(|| {
            VerifyError::validation(
                address,
                format!("cannot use {opcode} with non-array type {descriptor}"),
            )
        })?;

        match (opcode, element.as_str()) {
            (Opcode::Aput, "I" | "F") => {
                self.check_register(node, source, CategorySet::PRIMITIVE_32)?;
            }
            (Opcode::AputWide, "J") => {
                let low = self.check_wide_pair(node, source)?;
                if low != RegisterType::LongLo {
                    return Err(VerifyError::validation(
                        address,
                        format!("register v{source} holds {low} but {descriptor} stores longs"),
                    ));
                }
            }
            (Opcode::AputWide, "D") => {
                let low = self.check_wide_pair(node, source)?;
                if low != RegisterType::DoubleLo {
                    return Err(VerifyError::validation(
                        address,
                        format!("register v{source} holds {low} but {descriptor} stores doubles"),
                    ));
                }
            }
            (Opcode::AputObject, _) if element.is_reference() => {
                self.check_register(node, source, CategorySet::ANY_REFERENCE)?;
            }
            (Opcode::AputBoolean, "Z") => {
                self.check_register(node, source, CategorySet::BOOLEAN_VALUES)?;
            }
            (Opcode::AputByte, "B") => {
                self.check_register(node, source, CategorySet::BYTE_VALUES)?;
            }
            (Opcode::AputChar, "C") => {
                self.check_register(node, source, CategorySet::CHAR_VALUES)?;
            }
            (Opcode::AputShort, "S") => {
                self.check_register(node, source, CategorySet::SHORT_VALUES)?;
            }
            _ => {
                return Err(VerifyError::validation(
                    address,
                    format!("Cannot use {opcode} with array type {descriptor}"),
                ));
            }
        }
        Ok(())
    }
}
