//! Whole-method register-type analysis.
//!
//! [`MethodAnalyzer`] builds a control-flow graph over a decoded method,
//! seeds the entry state from the method signature and runs a worklist to a
//! fixed point, verifying every reachable instruction against the register
//! types flowing into it. The per-opcode rules live in the submodules,
//! grouped by instruction family.

use std::collections::BTreeSet;

use dex_asm::{CodeItem, Instruction, Method, Opcode, Operands};
use dex_types::{CodeAddress, RegisterId, TypeDescriptor};
use hashbrown::HashMap;
use tracing::debug;

use crate::classpath::ClassPath;
use crate::error::VerifyError;
use crate::regtype::{CategorySet, RegisterType};

mod alu;
mod array;
mod cfg;
mod field;
mod flow;
mod invoke;
mod literals;
mod node;
mod propagation;
mod verify;

pub use node::AnalyzedInstruction;

/// Node id of the synthetic start-of-method node.
const ENTRY_NODE: usize = 0;

/// Node id of the instruction at `index`.
fn node_id(index: usize) -> usize {
    index + 1
}

/// The whole-method dataflow analyzer.
///
/// One analyzer instance is built per method; the class path it borrows is
/// read-only, so distinct methods can be analyzed concurrently against a
/// shared hierarchy.
#[derive(Debug)]
pub struct MethodAnalyzer<'a> {
    method: &'a Method,
    code: &'a CodeItem,
    classpath: &'a ClassPath,
    /// Arena of nodes; index 0 is the start-of-method node, instruction `i`
    /// lives at index `i + 1`.
    nodes: Vec<AnalyzedInstruction<'a>>,
    /// Instruction index to code-unit address.
    addresses: Vec<CodeAddress>,
    /// Code-unit address to instruction index.
    address_index: HashMap<CodeAddress, usize>,
    /// Handler address to the exception types caught there; `None` marks a
    /// catch-all clause.
    handler_types: HashMap<CodeAddress, Vec<Option<TypeDescriptor>>>,
    /// Node ids awaiting (re-)verification, drained in ascending order.
    worklist: BTreeSet<usize>,
    /// Nodes verified at least once.
    verified: Vec<bool>,
}

impl<'a> MethodAnalyzer<'a> {
    /// Prepare an analyzer for `method`, which must have a code item.
    pub fn new(classpath: &'a ClassPath, method: &'a Method) -> Result<Self, VerifyError> {
        let code = method.code.as_ref().ok_or_else(|| {
            VerifyError::Malformed(format!("method {} has no code to analyze", method.name))
        })?;
        if code.instructions.is_empty() {
            return Err(VerifyError::Malformed(format!(
                "method {} has an empty instruction stream",
                method.name
            )));
        }

        Ok(Self {
            method,
            code,
            classpath,
            nodes: Vec::new(),
            addresses: Vec::new(),
            address_index: HashMap::new(),
            handler_types: HashMap::new(),
            worklist: BTreeSet::new(),
            verified: Vec::new(),
        })
    }

    /// Run the analysis to its fixed point.
    ///
    /// On success every reachable instruction has been verified against the
    /// types flowing into it and the returned [`MethodAnalysis`] exposes the
    /// per-instruction register vectors. The first rule violation aborts the
    /// run with a [`VerifyError`] naming the offending address.
    pub fn analyze(mut self) -> Result<MethodAnalysis<'a>, VerifyError> {
        debug!(
            method = %self.method.name,
            class = %self.method.defining_class,
            "analyzing method"
        );

        self.check_method_shape()?;
        self.build_cfg()?;
        self.seed_entry_state()?;

        let register_count = self.code.register_count as usize;
        for successor in self.nodes[ENTRY_NODE].successors.clone() {
            self.worklist.insert(successor);
            for register in 0..register_count {
                self.propagate_register(successor, register)?;
            }
        }

        while let Some(node) = self.worklist.pop_first() {
            self.verify_instruction(node)?;
            self.verified[node] = true;
            for successor in self.nodes[node].successors.clone() {
                if !self.verified[successor] {
                    self.worklist.insert(successor);
                }
            }
        }

        Ok(MethodAnalysis {
            nodes: self.nodes,
            addresses: self.addresses,
        })
    }

    /// Constructor naming invariants, checked before anything else.
    fn check_method_shape(&self) -> Result<(), VerifyError> {
        let name = &*self.method.name;
        if self.method.is_static() {
            if self.method.is_constructor() && name != "<clinit>" {
                return Err(VerifyError::Malformed(format!(
                    "static constructor is named {name:?} instead of \"<clinit>\""
                )));
            }
        } else {
            if self.method.is_constructor() && name != "<init>" {
                return Err(VerifyError::Malformed(format!(
                    "constructor is named {name:?} instead of \"<init>\""
                )));
            }
            if name == "<init>" && !self.method.is_constructor() {
                return Err(VerifyError::Malformed(
                    "<init> does not carry the constructor access flag".to_owned(),
                ));
            }
        }
        Ok(())
    }

    /// The instruction behind a real node.
    fn instruction(&self, node: usize) -> &'a Instruction {
        match self.nodes[node].instruction {
            Some(instruction) => instruction,
            None => unreachable!("the start-of-method node is never verified"),
        }
    }

    /// Address of a real node, in code units.
    fn address(&self, node: usize) -> CodeAddress {
        self.nodes[node].address
    }

    /// Instruction index of a real node.
    fn index_of(&self, node: usize) -> usize {
        node - 1
    }

    /// Whether `node` authors the post-type of `register`: either through
    /// its destination or, for an `invoke-direct` of `<init>`, by
    /// initializing every register aliasing the receiver.
    fn sets_register(&self, node: usize, register: usize) -> bool {
        if self.nodes[node].writes_register(register) {
            return true;
        }
        match self.init_invoke_receiver(node) {
            Some(receiver) => self.nodes[node].pre.get(register) == Some(&receiver),
            None => false,
        }
    }

    /// The uninitialized receiver of an `invoke-direct <init>` node, if
    /// that is what `node` is.
    fn init_invoke_receiver(&self, node: usize) -> Option<RegisterType> {
        let instruction = self.nodes[node].instruction?;
        let receiver = match (&instruction.opcode, &instruction.operands) {
            (Opcode::InvokeDirect, Operands::RegListMethod { registers, method })
                if method.is_instance_initializer() =>
            {
                registers.first().copied()?
            }
            (Opcode::InvokeDirectRange, Operands::RegRangeMethod { start, count, method })
                if method.is_instance_initializer() && *count > 0 =>
            {
                *start
            }
            _ => return None,
        };
        let ty = self.nodes[node].pre.get(receiver as usize)?;

        matches!(ty, RegisterType::UninitRef { .. }).then(|| ty.clone())
    }

    /// The pre-type of `register` at `node`, with only a bounds check.
    fn register_type(&self, node: usize, register: RegisterId) -> Result<RegisterType, VerifyError> {
        self.nodes[node]
            .pre
            .get(register as usize)
            .cloned()
            .ok_or_else(|| {
                VerifyError::validation(
                    self.address(node),
                    format!(
                        "register v{register} is out of range for a frame of {} registers",
                        self.code.register_count
                    ),
                )
            })
    }

    /// The pre-type of `register`, required to be in `allowed`.
    fn check_register(
        &self,
        node: usize,
        register: RegisterId,
        allowed: CategorySet,
    ) -> Result<RegisterType, VerifyError> {
        let ty = self.register_type(node, register)?;
        if !ty.is(allowed) {
            return Err(VerifyError::validation(
                self.address(node),
                format!(
                    "register v{register} holds {ty} but {} requires one of: {allowed}",
                    self.instruction(node)
                ),
            ));
        }
        Ok(ty)
    }

    /// The pre-type of a wide source: `register` must hold a wide low half
    /// and `register + 1` the matching high half.
    fn check_wide_pair(
        &self,
        node: usize,
        register: RegisterId,
    ) -> Result<RegisterType, VerifyError> {
        let low = self.check_register(node, register, CategorySet::WIDE_LO)?;
        let high = register
            .checked_add(1)
            .map(|high| self.register_type(node, high))
            .transpose()?
            .ok_or_else(|| {
                VerifyError::validation(
                    self.address(node),
                    format!("v{register} is not a valid wide register pair"),
                )
            })?;
        if low.wide_high().as_ref() != Some(&high) {
            return Err(VerifyError::validation(
                self.address(node),
                format!("v{register} is not a valid wide register pair"),
            ));
        }
        Ok(low)
    }

    /// Write the destination register of `node`, placing the matching high
    /// half for wide values.
    fn set_destination(&mut self, node: usize, ty: RegisterType) -> Result<(), VerifyError> {
        let register_count = self.code.register_count as usize;
        let destination = self.nodes[node]
            .destination_register()
            .ok_or_else(|| self.malformed_operands(node))? as usize;

        if let Some(high) = ty.wide_high() {
            if destination + 1 >= register_count {
                return Err(VerifyError::validation(
                    self.address(node),
                    format!("wide destination v{destination} has no second register"),
                ));
            }
            self.set_post_register(node, destination + 1, high)?;
        } else if destination >= register_count {
            return Err(VerifyError::validation(
                self.address(node),
                format!(
                    "register v{destination} is out of range for a frame of {register_count} registers"
                ),
            ));
        }
        self.set_post_register(node, destination, ty)
    }

    fn malformed_operands(&self, node: usize) -> VerifyError {
        VerifyError::validation(
            self.address(node),
            format!("{} carries malformed operands", self.instruction(node)),
        )
    }
}

/// The result of a successful analysis: one node per instruction, exposing
/// the register vectors before and after each one.
#[derive(Debug)]
pub struct MethodAnalysis<'a> {
    nodes: Vec<AnalyzedInstruction<'a>>,
    addresses: Vec<CodeAddress>,
}

impl<'a> MethodAnalysis<'a> {
    /// Number of instructions analyzed.
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    /// Whether the method had no instructions; never true for a successful
    /// analysis.
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// The node for the instruction at `index`.
    pub fn node(&self, index: usize) -> &AnalyzedInstruction<'a> {
        &self.nodes[node_id(index)]
    }

    /// Address of the instruction at `index`, in code units.
    pub fn address_of(&self, index: usize) -> CodeAddress {
        self.addresses[index]
    }

    /// Register types flowing into the instruction at `index`.
    pub fn pre_types(&self, index: usize) -> &[RegisterType] {
        self.node(index).pre_types()
    }

    /// Register types after the instruction at `index`.
    pub fn post_types(&self, index: usize) -> &[RegisterType] {
        self.node(index).post_types()
    }

    /// Instruction indices the instruction at `index` may transfer control
    /// to, including exception edges.
    pub fn successors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.nodes[node_id(index)]
            .successors
            .iter()
            .map(|node| node - 1)
    }

    /// Instruction indices that may transfer control to the instruction at
    /// `index`; the start-of-method node is omitted.
    pub fn predecessors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.nodes[node_id(index)]
            .predecessors
            .iter()
            .filter(|&&node| node != ENTRY_NODE)
            .map(|node| node - 1)
    }

    /// Whether the instruction at `index` is entered from the top of the
    /// method.
    pub fn is_entry_successor(&self, index: usize) -> bool {
        self.nodes[node_id(index)].predecessors.contains(&ENTRY_NODE)
    }
}
