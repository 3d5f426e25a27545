use std::collections::BTreeSet;

use dex_asm::Instruction;
use dex_types::{CodeAddress, RegisterId};

use crate::regtype::RegisterType;

/// Per-instruction analysis state: position in the graph plus the register
/// vectors before and after the instruction executes.
///
/// Node 0 of every analysis is the synthetic start-of-method node: it has no
/// instruction, produces no register writes and its post vector encodes the
/// method entry state.
#[derive(Debug, Clone)]
pub struct AnalyzedInstruction<'a> {
    pub(crate) instruction: Option<&'a Instruction>,
    pub(crate) address: CodeAddress,
    pub(crate) predecessors: BTreeSet<usize>,
    pub(crate) successors: BTreeSet<usize>,
    pub(crate) pre: Vec<RegisterType>,
    pub(crate) post: Vec<RegisterType>,
    pub(crate) result: Option<RegisterType>,
}

impl<'a> AnalyzedInstruction<'a> {
    pub(crate) fn new(
        instruction: Option<&'a Instruction>,
        address: CodeAddress,
        register_count: usize,
    ) -> Self {
        Self {
            instruction,
            address,
            predecessors: BTreeSet::new(),
            successors: BTreeSet::new(),
            pre: vec![RegisterType::Unknown; register_count],
            post: vec![RegisterType::Unknown; register_count],
            result: None,
        }
    }

    /// The analyzed instruction; `None` for the start-of-method node.
    pub fn instruction(&self) -> Option<&'a Instruction> {
        self.instruction
    }

    /// Address of the instruction, in code units.
    pub fn address(&self) -> CodeAddress {
        self.address
    }

    /// Register types just before the instruction executes, merged over all
    /// predecessors.
    pub fn pre_types(&self) -> &[RegisterType] {
        &self.pre
    }

    /// Register types just after the instruction executes.
    pub fn post_types(&self) -> &[RegisterType] {
        &self.post
    }

    /// The type stored for a following `move-result*`, if the instruction
    /// produces one.
    pub fn result_type(&self) -> Option<&RegisterType> {
        self.result.as_ref()
    }

    /// The register this instruction writes, if its opcode writes one.
    pub fn destination_register(&self) -> Option<RegisterId> {
        let instruction = self.instruction?;
        if !instruction.opcode.sets_register() {
            return None;
        }
        instruction.first_register()
    }

    /// Whether the instruction writes `register` through its destination,
    /// including the high half of a wide destination. The `<init>` aliasing
    /// rule is layered on top by the analyzer, which can see the receiver.
    pub(crate) fn writes_register(&self, register: usize) -> bool {
        let Some(destination) = self.destination_register() else {
            return false;
        };
        let destination = destination as usize;
        let wide = self
            .instruction
            .map(|instruction| instruction.opcode.sets_wide_register())
            .unwrap_or(false);

        register == destination || (wide && register == destination + 1)
    }
}
