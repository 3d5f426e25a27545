//! Control-transfer verification: returns, throws, branches, switches,
//! monitors, casts and allocation.

use dex_asm::Operands;
use dex_types::RegisterId;

use super::MethodAnalyzer;
use crate::error::VerifyError;
use crate::regtype::{CategorySet, RegisterType};

impl<'a> MethodAnalyzer<'a> {
    fn return_register(&self, node: usize) -> Result<RegisterId, VerifyError> {
        match self.instruction(node).operands {
            Operands::Reg { a } => Ok(a),
            _ => Err(self.malformed_operands(node)),
        }
    }

    /// Inside `<init>`, no path may reach a return while `this` is still
    /// the uninitialized allocation handed to the constructor.
    fn check_constructor_initialized(&self, node: usize) -> Result<(), VerifyError> {
        if self.method.is_static() || !self.method.is_constructor() {
            return Ok(());
        }
        let register_count = self.code.register_count as usize;
        let this_register = register_count - self.method.proto.parameter_register_count() - 1;

        if matches!(
            self.nodes[node].pre[this_register],
            RegisterType::UninitRef { site: None, .. }
        ) {
            return Err(VerifyError::validation(
                self.address(node),
                "Returning from constructor without calling the superclass' <init>",
            ));
        }
        Ok(())
    }

    pub(super) fn verify_return_void(&mut self, node: usize) -> Result<(), VerifyError> {
        if !self.method.proto.return_type.is_void() {
            return Err(VerifyError::validation(
                self.address(node),
                format!(
                    "return-void on a method returning {}",
                    self.method.proto.return_type
                ),
            ));
        }
        self.check_constructor_initialized(node)
    }

    pub(super) fn verify_return(&mut self, node: usize) -> Result<(), VerifyError> {
        let source = self.return_register(node)?;
        let return_type = &self.method.proto.return_type;
        if !matches!(return_type.as_str(), "Z" | "B" | "S" | "C" | "I" | "F") {
            return Err(VerifyError::validation(
                self.address(node),
                format!("return does not match the declared return type {return_type}"),
            ));
        }

        let ty = self.check_register(node, source, CategorySet::PRIMITIVE_32)?;
        if !ty.can_be_assigned_to(return_type, self.classpath)? {
            return Err(VerifyError::validation(
                self.address(node),
                format!("register v{source} holds {ty} which cannot be returned as {return_type}"),
            ));
        }
        self.check_constructor_initialized(node)
    }

    pub(super) fn verify_return_wide(&mut self, node: usize) -> Result<(), VerifyError> {
        let source = self.return_register(node)?;
        let return_type = &self.method.proto.return_type;
        if !return_type.is_wide() {
            return Err(VerifyError::validation(
                self.address(node),
                format!("return-wide does not match the declared return type {return_type}"),
            ));
        }

        let low = self.check_wide_pair(node, source)?;
        let matches = matches!(
            (return_type.as_str(), &low),
            ("J", RegisterType::LongLo) | ("D", RegisterType::DoubleLo)
        );
        if !matches {
            return Err(VerifyError::validation(
                self.address(node),
                format!("register v{source} holds {low} which cannot be returned as {return_type}"),
            ));
        }
        self.check_constructor_initialized(node)
    }

    pub(super) fn verify_return_object(&mut self, node: usize) -> Result<(), VerifyError> {
        let source = self.return_register(node)?;
        let return_type = self.method.proto.return_type.clone();
        if !return_type.is_reference() {
            return Err(VerifyError::validation(
                self.address(node),
                format!("return-object does not match the declared return type {return_type}"),
            ));
        }

        let ty = self.check_register(node, source, CategorySet::ANY_REFERENCE)?;
        if !ty.can_be_assigned_to(&return_type, self.classpath)? {
            return Err(VerifyError::validation(
                self.address(node),
                format!("register v{source} holds {ty} which cannot be returned as {return_type}"),
            ));
        }
        self.check_constructor_initialized(node)
    }

    pub(super) fn verify_throw(&mut self, node: usize) -> Result<(), VerifyError> {
        let source = self.return_register(node)?;
        let ty = self.check_register(node, source, CategorySet::ANY_REFERENCE)?;

        if let Some(thrown) = ty.reference_type() {
            let throwable = self.classpath.throwable();
            if !self.classpath.extends(thrown, throwable)? {
                return Err(VerifyError::validation(
                    self.address(node),
                    format!("register v{source} holds {thrown} which does not extend {throwable}"),
                ));
            }
        }
        Ok(())
    }

    pub(super) fn verify_monitor(&mut self, node: usize) -> Result<(), VerifyError> {
        let source = self.return_register(node)?;
        self.check_register(node, source, CategorySet::ANY_REFERENCE)
            .map(drop)
    }

    pub(super) fn verify_check_cast(&mut self, node: usize) -> Result<(), VerifyError> {
        let (register, ty) = match &self.instruction(node).operands {
            Operands::RegType { a, ty } => (*a, ty.clone()),
            _ => return Err(self.malformed_operands(node)),
        };
        if !ty.is_reference() {
            return Err(VerifyError::validation(
                self.address(node),
                format!("check-cast to non-reference type {ty}"),
            ));
        }
        self.classpath.ensure_resolvable(&ty)?;
        self.check_register(node, register, CategorySet::ANY_REFERENCE)?;
        self.set_destination(node, RegisterType::Reference(ty))
    }

    pub(super) fn verify_instance_of(&mut self, node: usize) -> Result<(), VerifyError> {
        let (source, ty) = match &self.instruction(node).operands {
            Operands::RegPairType { b, ty, .. } => (*b, ty.clone()),
            _ => return Err(self.malformed_operands(node)),
        };
        if !ty.is_reference() {
            return Err(VerifyError::validation(
                self.address(node),
                format!("instance-of against non-reference type {ty}"),
            ));
        }
        self.classpath.ensure_resolvable(&ty)?;
        self.check_register(node, source, CategorySet::ANY_REFERENCE)?;
        self.set_destination(node, RegisterType::Boolean)
    }

    pub(super) fn verify_new_instance(&mut self, node: usize) -> Result<(), VerifyError> {
        let ty = match &self.instruction(node).operands {
            Operands::RegType { ty, .. } => ty.clone(),
            _ => return Err(self.malformed_operands(node)),
        };
        let address = self.address(node);
        if !ty.is_class() {
            return Err(VerifyError::validation(
                address,
                format!("new-instance cannot instantiate {ty}"),
            ));
        }
        self.classpath.ensure_resolvable(&ty)?;

        let uninit = RegisterType::UninitRef {
            class: ty,
            site: Some(address),
        };
        // a live allocation from this site means the previous iteration
        // never called <init> on it
        for (register, ty) in self.nodes[node].pre.iter().enumerate() {
            if ty == &uninit {
                return Err(VerifyError::validation(
                    address,
                    format!(
                        "register v{register} still holds the uninitialized allocation from \
                         {address:#x}"
                    ),
                ));
            }
        }
        self.set_destination(node, uninit)
    }

    pub(super) fn verify_switch(&mut self, node: usize) -> Result<(), VerifyError> {
        let register = match self.instruction(node).operands {
            Operands::RegPayload { a, .. } => a,
            _ => return Err(self.malformed_operands(node)),
        };
        self.check_register(node, register, CategorySet::PRIMITIVE_32)
            .map(drop)
    }

    pub(super) fn verify_cmp(&mut self, node: usize, wide: bool) -> Result<(), VerifyError> {
        let (_, b, c) = match self.instruction(node).operands {
            Operands::RegTriple { a, b, c } => (a, b, c),
            _ => return Err(self.malformed_operands(node)),
        };
        if wide {
            self.check_wide_pair(node, b)?;
            self.check_wide_pair(node, c)?;
        } else {
            self.check_register(node, b, CategorySet::PRIMITIVE_32)?;
            self.check_register(node, c, CategorySet::PRIMITIVE_32)?;
        }
        self.set_destination(node, RegisterType::Byte)
    }

    pub(super) fn verify_if_eq_ne(&mut self, node: usize) -> Result<(), VerifyError> {
        let (a, b) = match self.instruction(node).operands {
            Operands::RegPairBranch { a, b, .. } => (a, b),
            _ => return Err(self.malformed_operands(node)),
        };
        let comparable = CategorySet::PRIMITIVE_32 | CategorySet::ANY_REFERENCE;
        let ta = self.check_register(node, a, comparable)?;
        let tb = self.check_register(node, b, comparable)?;

        let both_primitive =
            ta.is(CategorySet::PRIMITIVE_32) && tb.is(CategorySet::PRIMITIVE_32);
        let both_reference =
            ta.is(CategorySet::ANY_REFERENCE) && tb.is(CategorySet::ANY_REFERENCE);
        if !both_primitive && !both_reference {
            return Err(VerifyError::validation(
                self.address(node),
                format!(
                    "{} on dissimilar operand categories: v{a} is {ta}, v{b} is {tb}",
                    self.instruction(node)
                ),
            ));
        }
        Ok(())
    }

    pub(super) fn verify_if_cmp(&mut self, node: usize) -> Result<(), VerifyError> {
        let (a, b) = match self.instruction(node).operands {
            Operands::RegPairBranch { a, b, .. } => (a, b),
            _ => return Err(self.malformed_operands(node)),
        };
        self.check_register(node, a, CategorySet::PRIMITIVE_32)?;
        self.check_register(node, b, CategorySet::PRIMITIVE_32)?;
        Ok(())
    }

    pub(super) fn verify_if_zero(
        &mut self,
        node: usize,
        allow_reference: bool,
    ) -> Result<(), VerifyError> {
        let register = match self.instruction(node).operands {
            Operands::RegBranch { a, .. } => a,
            _ => return Err(self.malformed_operands(node)),
        };
        let allowed = if allow_reference {
            CategorySet::PRIMITIVE_32 | CategorySet::ANY_REFERENCE
        } else {
            CategorySet::PRIMITIVE_32
        };
        self.check_register(node, register, allowed).map(drop)
    }

}
