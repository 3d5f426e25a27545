//! Invoke verification: arity, kind constraints, receiver and parameter
//! compatibility, and the `<init>` promotion of uninitialized references.

use dex_asm::{MethodRef, Opcode, Operands};
use dex_types::RegisterId;

use super::MethodAnalyzer;
use crate::error::VerifyError;
use crate::regtype::{CategorySet, RegisterType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InvokeKind {
    Virtual,
    Super,
    Direct,
    Static,
    Interface,
}

impl<'a> MethodAnalyzer<'a> {
    /// Argument registers and callee of an invoke, with the range form
    /// expanded and bounds-checked.
    fn invoke_arguments(&self, node: usize) -> Result<(Vec<RegisterId>, MethodRef), VerifyError> {
        match &self.instruction(node).operands {
            Operands::RegListMethod { registers, method } => {
                Ok((registers.clone(), method.clone()))
            }
            Operands::RegRangeMethod {
                start,
                count,
                method,
            } => {
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
                Ok(((0..*count).map(|i| start + i).collect(), method.clone()))
            }
            _ => Err(self.malformed_operands(node)),
        }
    }

    pub(super) fn verify_invoke(&mut self, node: usize) -> Result<(), VerifyError> {
        let address = self.address(node);
        let opcode = self.instruction(node).opcode;
        let (registers, method) = self.invoke_arguments(node)?;

        let kind = match opcode {
            Opcode::InvokeVirtual | Opcode::InvokeVirtualRange => InvokeKind::Virtual,
            Opcode::InvokeSuper | Opcode::InvokeSuperRange => InvokeKind::Super,
            Opcode::InvokeDirect | Opcode::InvokeDirectRange => InvokeKind::Direct,
            Opcode::InvokeStatic | Opcode::InvokeStaticRange => InvokeKind::Static,
            _ => InvokeKind::Interface,
        };
        let is_init = kind == InvokeKind::Direct && method.is_instance_initializer();

        // the <…> names are only reachable through invoke-direct <init>
        if method.has_special_name() && !is_init {
            return Err(VerifyError::validation(
                address,
                format!("only invoke-direct may call {}", method.name),
            ));
        }

        let implicit_this = usize::from(kind != InvokeKind::Static);
        let expected = method.proto.parameter_register_count() + implicit_this;
        if registers.len() != expected {
            return Err(VerifyError::validation(
                address,
                format!(
                    "{opcode} passes {} registers but {method} takes {expected}",
                    registers.len()
                ),
            ));
        }

        // interface-ness of the declaring class must match the invoke kind;
        // array targets get a pass for the Object methods they inherit
        if method.class.is_class() {
            let interface = self.classpath.is_interface(&method.class)?;
            if kind == InvokeKind::Interface && !interface {
                return Err(VerifyError::validation(
                    address,
                    format!("invoke-interface on non-interface class {}", method.class),
                ));
            }
            if kind != InvokeKind::Interface && interface {
                return Err(VerifyError::validation(
                    address,
                    format!("{opcode} on interface class {}", method.class),
                ));
            }
        }

        if kind == InvokeKind::Super {
            let superclass = self
                .classpath
                .superclass_of(&self.method.defining_class)?
                .ok_or_else(|| {
                    VerifyError::validation(
                        address,
                        format!("{} has no superclass to dispatch to", self.method.defining_class),
                    )
                })?;
            if !self
                .classpath
                .has_virtual_method(&superclass, &method.name, &method.proto)?
            {
                return Err(VerifyError::validation(
                    address,
                    format!(
                        "{superclass} has no virtual method {}{}",
                        method.name, method.proto
                    ),
                ));
            }
        }

        let mut cursor = 0;
        let mut init_receiver = None;
        if kind != InvokeKind::Static {
            let receiver = registers[0];
            cursor = 1;

            let ty = self.check_register(node, receiver, CategorySet::ANY_REFERENCE_OR_UNINIT)?;
            match &ty {
                RegisterType::UninitRef { class, .. } => {
                    if !is_init {
                        return Err(VerifyError::validation(
                            address,
                            format!(
                                "uninitialized register v{receiver} used as the receiver of \
                                 {opcode}"
                            ),
                        ));
                    }
                    if !self.classpath.extends(class, &method.class)? {
                        return Err(VerifyError::validation(
                            address,
                            format!("cannot call {method} on an uninitialized {class}"),
                        ));
                    }
                    init_receiver = Some(ty.clone());
                }
                RegisterType::Reference(descriptor) => {
                    if !self.classpath.is_assignable(descriptor, &method.class)? {
                        return Err(VerifyError::validation(
                            address,
                            format!(
                                "receiver v{receiver} of type {descriptor} is not compatible \
                                 with {}",
                                method.class
                            ),
                        ));
                    }
                }
                // a null receiver raises at runtime
                _ => {}
            }
        }

        for parameter in &method.proto.parameters {
            let register = registers[cursor];
            if parameter.is_wide() {
                let next = registers[cursor + 1];
                if u32::from(next) != u32::from(register) + 1 {
                    return Err(VerifyError::validation(
                        address,
                        format!(
                            "wide argument at v{register} must be followed by v{}",
                            u32::from(register) + 1
                        ),
                    ));
                }
                let low = self.check_wide_pair(node, register)?;
                let matches = matches!(
                    (parameter.as_str(), &low),
                    ("J", RegisterType::LongLo) | ("D", RegisterType::DoubleLo)
                );
                if !matches {
                    return Err(VerifyError::validation(
                        address,
                        format!("register v{register} holds {low} but {method} declares {parameter}"),
                    ));
                }
                cursor += 2;
            } else {
                let ty = self.register_type(node, register)?;
                if !ty.can_be_assigned_to(parameter, self.classpath)? {
                    return Err(VerifyError::validation(
                        address,
                        format!(
                            "register v{register} holds {ty} which is not assignable to the \
                             parameter type {parameter}"
                        ),
                    ));
                }
                cursor += 1;
            }
        }

        self.nodes[node].result = if method.proto.return_type.is_void() {
            None
        } else {
            Some(RegisterType::for_descriptor(&method.proto.return_type)?)
        };

        // a successful <init> initializes the receiver and every register
        // aliasing the same allocation
        if let Some(uninit) = init_receiver {
            let initialized = match &uninit {
                RegisterType::UninitRef { class, .. } => RegisterType::Reference(class.clone()),
                _ => unreachable!("init receivers are uninitialized references"),
            };
            let register_count = self.code.register_count as usize;
            for register in 0..register_count {
                if self.nodes[node].pre[register] == uninit {
                    self.replace_post_register(node, register, initialized.clone())?;
                }
            }
        }
        Ok(())
    }
}
