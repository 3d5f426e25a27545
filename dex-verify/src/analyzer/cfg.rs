//! Control-flow graph construction: addressing, exception coverage and
//! edge wiring.

use dex_asm::{Opcode, Operands, Payload};
use dex_types::CodeAddress;
use itertools::Itertools;

use super::{node_id, AnalyzedInstruction, MethodAnalyzer, ENTRY_NODE};
use crate::error::VerifyError;

impl<'a> MethodAnalyzer<'a> {
    pub(super) fn build_cfg(&mut self) -> Result<(), VerifyError> {
        let code = self.code;
        let register_count = code.register_count as usize;

        // addressing: accumulate code-unit offsets
        let mut address: CodeAddress = 0;
        for (index, instruction) in code.instructions.iter().enumerate() {
            self.addresses.push(address);
            self.address_index.insert(address, index);
            address += instruction.size_in_code_units() as CodeAddress;
        }

        // one node per instruction plus the start-of-method node
        self.nodes
            .push(AnalyzedInstruction::new(None, 0, register_count));
        for (index, instruction) in code.instructions.iter().enumerate() {
            self.nodes.push(AnalyzedInstruction::new(
                Some(instruction),
                self.addresses[index],
                register_count,
            ));
        }
        self.verified = vec![false; self.nodes.len()];

        // exception coverage: per instruction, the handlers protecting it
        let mut exception_handlers: Vec<Vec<usize>> = vec![Vec::new(); code.instructions.len()];
        for try_block in code
            .tries
            .iter()
            .sorted_by_key(|try_block| try_block.start_address)
        {
            let mut handler_indices = Vec::new();
            for handler_address in try_block.handler_addresses() {
                handler_indices.push(self.index_at(handler_address).ok_or_else(|| {
                    VerifyError::Malformed(format!(
                        "exception handler address {handler_address:#x} is not an instruction boundary"
                    ))
                })?);
            }

            for handler in &try_block.handlers {
                self.handler_types
                    .entry(handler.handler_address)
                    .or_default()
                    .push(Some(handler.exception.clone()));
            }
            if let Some(handler_address) = try_block.catch_all {
                self.handler_types
                    .entry(handler_address)
                    .or_default()
                    .push(None);
            }

            for (index, instruction) in code.instructions.iter().enumerate() {
                if try_block.covers(self.addresses[index]) && instruction.opcode.can_throw() {
                    exception_handlers[index].extend(handler_indices.iter().copied());
                }
            }
        }

        // entry edge
        self.add_edge(ENTRY_NODE, 0, &exception_handlers, false)?;

        // per-instruction edges
        for (index, instruction) in code.instructions.iter().enumerate() {
            let address = self.addresses[index];
            let opcode = instruction.opcode;

            if opcode.can_continue() {
                if index + 1 == code.instructions.len() {
                    return Err(VerifyError::validation(
                        address,
                        "execution can continue past the last instruction",
                    ));
                }
                self.add_edge(node_id(index), index + 1, &exception_handlers, false)?;
            }

            if let Some(offset) = instruction.branch_offset() {
                let target = self.branch_target(index, offset)?;
                self.add_edge(node_id(index), target, &exception_handlers, false)?;
            }

            if matches!(opcode, Opcode::PackedSwitch | Opcode::SparseSwitch) {
                for target in self.switch_targets(index)? {
                    self.add_edge(node_id(index), target, &exception_handlers, false)?;
                }
            }
        }

        Ok(())
    }

    /// Instruction index at an absolute code-unit address.
    pub(super) fn index_at(&self, address: CodeAddress) -> Option<usize> {
        self.address_index.get(&address).copied()
    }

    /// Resolve a relative offset from the instruction at `from_index` to an
    /// instruction index.
    pub(super) fn branch_target(
        &self,
        from_index: usize,
        offset: i32,
    ) -> Result<usize, VerifyError> {
        let from = self.addresses[from_index];
        let target = i64::from(from) + i64::from(offset);

        u32::try_from(target)
            .ok()
            .and_then(|address| self.index_at(address))
            .ok_or_else(|| {
                VerifyError::validation(
                    from,
                    format!("branch target {target:#x} is not an instruction boundary"),
                )
            })
    }

    /// The branch targets of a switch instruction, read from its payload.
    fn switch_targets(&self, index: usize) -> Result<Vec<usize>, VerifyError> {
        let instruction = &self.code.instructions[index];
        let address = self.addresses[index];
        let offset = instruction
            .payload_offset()
            .ok_or_else(|| VerifyError::validation(address, "switch without a payload offset"))?;
        let payload_index = self.branch_target(index, offset)?;

        let targets = match (&instruction.opcode, &self.code.instructions[payload_index].operands)
        {
            (Opcode::PackedSwitch, Operands::Payload(Payload::PackedSwitch { targets, .. })) => {
                targets
            }
            (Opcode::SparseSwitch, Operands::Payload(Payload::SparseSwitch { keys, targets })) => {
                if keys.len() != targets.len() {
                    return Err(VerifyError::validation(
                        address,
                        "sparse-switch payload has mismatched key and target counts",
                    ));
                }
                targets
            }
            _ => {
                return Err(VerifyError::validation(
                    address,
                    format!(
                        "{} expects a matching switch payload at {:#x}",
                        instruction, self.addresses[payload_index]
                    ),
                ));
            }
        };

        targets
            .iter()
            .map(|&target| self.branch_target(index, target))
            .collect()
    }

    /// Wire an edge from `predecessor` to the instruction at
    /// `successor_index`. Whenever the successor can throw,
    /// edges to each handler covering it are added from the same
    /// predecessor, so a handler sees the state *entering* the instruction
    /// that raised.
    fn add_edge(
        &mut self,
        predecessor: usize,
        successor_index: usize,
        exception_handlers: &[Vec<usize>],
        exception: bool,
    ) -> Result<(), VerifyError> {
        let successor_node = node_id(successor_index);
        let opcode = self.code.instructions[successor_index].opcode;

        if !exception && opcode == Opcode::MoveException {
            return Err(VerifyError::validation(
                self.addresses[successor_index],
                "move-exception must be the first instruction of an exception handler",
            ));
        }

        if !self.nodes[successor_node].predecessors.insert(predecessor) {
            // already wired; avoids retracing handler chains
            return Ok(());
        }
        self.nodes[predecessor].successors.insert(successor_node);

        if opcode.can_throw() {
            for handler_index in exception_handlers[successor_index].clone() {
                self.add_edge(predecessor, handler_index, exception_handlers, true)?;
            }
        }
        Ok(())
    }
}
