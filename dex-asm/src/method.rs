use std::sync::Arc;

use dex_types::{AccessFlags, CodeAddress, TypeDescriptor};

use crate::instruction::Instruction;
use crate::reference::Prototype;

/// A decoded method: identity, signature and (for non-abstract methods) its
/// code item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    /// Access flags of the method.
    pub access_flags: AccessFlags,
    /// The class declaring the method.
    pub defining_class: TypeDescriptor,
    /// Method name; `<init>`/`<clinit>` for constructors.
    pub name: Arc<str>,
    /// Method signature.
    pub proto: Prototype,
    /// The method body; `None` for abstract and native methods.
    pub code: Option<CodeItem>,
}

impl Method {
    /// Assemble a method from its parts.
    pub fn new(
        access_flags: AccessFlags,
        defining_class: TypeDescriptor,
        name: impl AsRef<str>,
        proto: Prototype,
        code: Option<CodeItem>,
    ) -> Self {
        Self {
            access_flags,
            defining_class,
            name: Arc::from(name.as_ref()),
            proto,
            code,
        }
    }

    /// Whether the method is static.
    pub fn is_static(&self) -> bool {
        self.access_flags.is_static()
    }

    /// Whether the method carries the `CONSTRUCTOR` flag.
    pub fn is_constructor(&self) -> bool {
        self.access_flags.is_constructor()
    }
}

/// The body of a method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeItem {
    /// Total number of virtual registers in the frame.
    pub register_count: u16,
    /// The instruction stream.
    pub instructions: Vec<Instruction>,
    /// Protected regions with their handlers.
    pub tries: Vec<TryBlock>,
}

impl CodeItem {
    /// A body with `register_count` registers and no protected regions.
    pub fn new(register_count: u16, instructions: Vec<Instruction>) -> Self {
        Self {
            register_count,
            instructions,
            tries: Vec::new(),
        }
    }

    /// Attach protected regions to the body.
    pub fn with_tries(mut self, tries: Vec<TryBlock>) -> Self {
        self.tries = tries;
        self
    }
}

/// A protected `[start, start + count)` code range with its handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TryBlock {
    /// First covered address, in code units.
    pub start_address: CodeAddress,
    /// Length of the covered range, in code units.
    pub code_unit_count: u32,
    /// Typed catch handlers, in declaration order.
    pub handlers: Vec<ExceptionHandler>,
    /// Address of the catch-all handler, if any.
    pub catch_all: Option<CodeAddress>,
}

impl TryBlock {
    /// A protected range with no handlers attached yet.
    pub fn new(start_address: CodeAddress, code_unit_count: u32) -> Self {
        Self {
            start_address,
            code_unit_count,
            handlers: Vec::new(),
            catch_all: None,
        }
    }

    /// Add a typed catch handler.
    pub fn with_handler(mut self, exception: TypeDescriptor, handler_address: CodeAddress) -> Self {
        self.handlers.push(ExceptionHandler {
            exception,
            handler_address,
        });
        self
    }

    /// Set the catch-all handler address.
    pub fn with_catch_all(mut self, handler_address: CodeAddress) -> Self {
        self.catch_all = Some(handler_address);
        self
    }

    /// Whether `address` lies inside the protected range.
    pub fn covers(&self, address: CodeAddress) -> bool {
        address >= self.start_address && address - self.start_address < self.code_unit_count
    }

    /// All handler addresses, the catch-all last.
    pub fn handler_addresses(&self) -> impl Iterator<Item = CodeAddress> + '_ {
        self.handlers
            .iter()
            .map(|handler| handler.handler_address)
            .chain(self.catch_all)
    }
}

/// A typed catch clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionHandler {
    /// The caught exception type.
    pub exception: TypeDescriptor,
    /// Address of the handler's first instruction.
    pub handler_address: CodeAddress,
}
