//! Instance and static field access verification.

use dex_asm::{FieldRef, Opcode, Operands};
use dex_types::RegisterId;

use super::MethodAnalyzer;
use crate::error::VerifyError;
use crate::regtype::{CategorySet, RegisterType};

impl<'a> MethodAnalyzer<'a> {
    fn instance_field_operands(
        &self,
        node: usize,
    ) -> Result<(RegisterId, RegisterId, FieldRef), VerifyError> {
        match &self.instruction(node).operands {
            Operands::RegPairField { a, b, field } => Ok((*a, *b, field.clone())),
            _ => Err(self.malformed_operands(node)),
        }
    }

    fn static_field_operands(&self, node: usize) -> Result<(RegisterId, FieldRef), VerifyError> {
        match &self.instruction(node).operands {
            Operands::RegField { a, field } => Ok((*a, field.clone())),
            _ => Err(self.malformed_operands(node)),
        }
    }

    /// The receiver must be a reference compatible with the class declaring
    /// the field; null receivers raise at runtime instead.
    fn check_receiver(
        &self,
        node: usize,
        object: RegisterId,
        field: &FieldRef,
    ) -> Result<(), VerifyError> {
        let ty = self.check_register(node, object, CategorySet::ANY_REFERENCE)?;
        if let Some(descriptor) = ty.reference_type() {
            if !self.classpath.is_assignable(descriptor, &field.class)? {
                return Err(VerifyError::validation(
                    self.address(node),
                    format!(
                        "receiver v{object} of type {descriptor} is not compatible with {}",
                        field.class
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Check the field's declared type against the opcode family; int and
    /// float are interchangeable for the plain get/put forms.
    fn check_field_family(&self, node: usize, field: &FieldRef) -> Result<(), VerifyError> {
        let opcode = self.instruction(node).opcode;
        let matches = match opcode {
            Opcode::Iget | Opcode::Iput | Opcode::Sget | Opcode::Sput => {
                matches!(field.field_type.as_str(), "I" | "F")
            }
            Opcode::IgetWide | Opcode::IputWide | Opcode::SgetWide | Opcode::SputWide => {
                field.field_type.is_wide()
            }
            Opcode::IgetObject | Opcode::IputObject | Opcode::SgetObject
            | Opcode::SputObject => field.field_type.is_reference(),
            Opcode::IgetBoolean | Opcode::IputBoolean | Opcode::SgetBoolean
            | Opcode::SputBoolean => field.field_type.as_str() == "Z",
            Opcode::IgetByte | Opcode::IputByte | Opcode::SgetByte | Opcode::SputByte => {
                field.field_type.as_str() == "B"
            }
            Opcode::IgetChar | Opcode::IputChar | Opcode::SgetChar | Opcode::SputChar => {
                field.field_type.as_str() == "C"
            }
            _ => field.field_type.as_str() == "S",
        };
        if !matches {
            return Err(VerifyError::validation(
                self.address(node),
                format!("Cannot use {opcode} with field type {}", field.field_type),
            ));
        }
        Ok(())
    }

    /// The value flowing into a put must fit the declared field type. The
    /// runtime tolerates byte values stored into boolean fields, so `Z`
    /// accepts the byte range here.
    fn check_put_source(
        &self,
        node: usize,
        source: RegisterId,
        field: &FieldRef,
    ) -> Result<(), VerifyError> {
        if field.field_type.is_wide() {
            let low = self.check_wide_pair(node, source)?;
            let matches = matches!(
                (field.field_type.as_str(), &low),
                ("J", RegisterType::LongLo) | ("D", RegisterType::DoubleLo)
            );
            if !matches {
                return Err(VerifyError::validation(
                    self.address(node),
                    format!(
                        "register v{source} holds {low} which cannot be stored into a field \
                         of type {}",
                        field.field_type
                    ),
                ));
            }
            return Ok(());
        }

        if field.field_type.as_str() == "Z" {
            self.check_register(node, source, CategorySet::BYTE_VALUES)?;
            return Ok(());
        }

        let ty = self.register_type(node, source)?;
        if !ty.can_be_assigned_to(&field.field_type, self.classpath)? {
            return Err(VerifyError::validation(
                self.address(node),
                format!(
                    "register v{source} holds {ty} which cannot be stored into a field of \
                     type {}",
                    field.field_type
                ),
            ));
        }
        Ok(())
    }

    pub(super) fn verify_instance_field_get(&mut self, node: usize) -> Result<(), VerifyError> {
        let (_, object, field) = self.instance_field_operands(node)?;
        self.classpath.ensure_resolvable(&field.class)?;
        self.check_receiver(node, object, &field)?;
        self.check_field_family(node, &field)?;
        let destination = RegisterType::for_descriptor(&field.field_type)?;
        self.set_destination(node, destination)
    }

    pub(super) fn verify_instance_field_put(&mut self, node: usize) -> Result<(), VerifyError> {
        let (source, object, field) = self.instance_field_operands(node)?;
        self.classpath.ensure_resolvable(&field.class)?;
        self.check_receiver(node, object, &field)?;
        self.check_field_family(node, &field)?;
        self.check_put_source(node, source, &field)
    }

    pub(super) fn verify_static_field_get(&mut self, node: usize) -> Result<(), VerifyError> {
        let (_, field) = self.static_field_operands(node)?;
        self.classpath.ensure_resolvable(&field.class)?;
        self.check_field_family(node, &field)?;
        let destination = RegisterType::for_descriptor(&field.field_type)?;
        self.set_destination(node, destination)
    }

    pub(super) fn verify_static_field_put(&mut self, node: usize) -> Result<(), VerifyError> {
        let (source, field) = self.static_field_operands(node)?;
        self.classpath.ensure_resolvable(&field.class)?;
        self.check_field_family(node, &field)?;
        self.check_put_source(node, source, &field)
    }
}
