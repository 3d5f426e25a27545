//! Entry-state seeding and the monotone propagation of register types
//! along the graph.

use tracing::trace;

use super::{MethodAnalyzer, ENTRY_NODE};
use crate::error::VerifyError;
use crate::regtype::RegisterType;

impl<'a> MethodAnalyzer<'a> {
    /// Encode the method entry state into the start-of-method node:
    /// parameters occupy the trailing registers, preceded by `this` for
    /// instance methods, which is still uninitialized inside `<init>`.
    pub(super) fn seed_entry_state(&mut self) -> Result<(), VerifyError> {
        let register_count = self.code.register_count as usize;
        let parameter_registers = self.method.proto.parameter_register_count();
        let implicit = usize::from(!self.method.is_static());

        if register_count < parameter_registers + implicit {
            return Err(VerifyError::Malformed(format!(
                "a frame of {register_count} registers cannot hold {} parameter registers",
                parameter_registers + implicit
            )));
        }

        if !self.method.is_static() {
            let this_register = register_count - parameter_registers - 1;
            let this_type = if self.method.is_constructor() {
                RegisterType::UninitRef {
                    class: self.method.defining_class.clone(),
                    site: None,
                }
            } else {
                RegisterType::Reference(self.method.defining_class.clone())
            };
            self.nodes[ENTRY_NODE].post[this_register] = this_type;
        }

        let mut register = register_count - parameter_registers;
        for parameter in &self.method.proto.parameters {
            let ty = RegisterType::for_descriptor(parameter)?;
            if let Some(high) = ty.wide_high() {
                self.nodes[ENTRY_NODE].post[register + 1] = high;
            }
            self.nodes[ENTRY_NODE].post[register] = ty;
            register += parameter.register_width();
        }
        Ok(())
    }

    /// Re-merge the predecessors' post-types for `register` into `node`.
    ///
    /// The pre-type always absorbs the merge; the post-type follows it only
    /// when the node does not author that register itself. Any change queues
    /// the node for re-verification and pushes onward to its successors.
    pub(super) fn propagate_register(
        &mut self,
        node: usize,
        register: usize,
    ) -> Result<(), VerifyError> {
        let merged = self.merged_predecessor_type(node, register)?;
        if self.nodes[node].pre[register] == merged {
            return Ok(());
        }
        trace!(node, register, ty = %merged, "pre-type changed");

        self.nodes[node].pre[register] = merged.clone();
        self.worklist.insert(node);

        if self.sets_register(node, register) {
            // the node's own write shadows its predecessors
            return Ok(());
        }
        self.nodes[node].post[register] = merged;

        for successor in self.nodes[node].successors.clone() {
            self.propagate_register(successor, register)?;
        }
        Ok(())
    }

    /// The join of `postRegisterMap[register]` over all predecessors.
    fn merged_predecessor_type(
        &self,
        node: usize,
        register: usize,
    ) -> Result<RegisterType, VerifyError> {
        let mut merged = RegisterType::Unknown;
        for &predecessor in &self.nodes[node].predecessors {
            merged = merged.join(&self.nodes[predecessor].post[register], self.classpath)?;
        }
        Ok(merged)
    }

    /// Join `ty` into the authored post-type of `register` at `node` and
    /// push any change to the successors.
    pub(super) fn set_post_register(
        &mut self,
        node: usize,
        register: usize,
        ty: RegisterType,
    ) -> Result<(), VerifyError> {
        let joined = self.nodes[node].post[register].join(&ty, self.classpath)?;
        if self.nodes[node].post[register] == joined {
            return Ok(());
        }
        self.nodes[node].post[register] = joined;

        for successor in self.nodes[node].successors.clone() {
            self.propagate_register(successor, register)?;
        }
        Ok(())
    }

    /// Overwrite the post-type of `register` at `node`, bypassing the join.
    ///
    /// Only the `<init>` rewrite uses this: promoting an uninitialized
    /// reference to its initialized type moves sideways in the lattice, not
    /// upward.
    pub(super) fn replace_post_register(
        &mut self,
        node: usize,
        register: usize,
        ty: RegisterType,
    ) -> Result<(), VerifyError> {
        if self.nodes[node].post[register] == ty {
            return Ok(());
        }
        self.nodes[node].post[register] = ty;

        for successor in self.nodes[node].successors.clone() {
            self.propagate_register(successor, register)?;
        }
        Ok(())
    }
}
