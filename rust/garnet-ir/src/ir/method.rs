//! Method scopes: one method body's compile-time frame.
//!
//! Besides the instruction stream and variable table every scope has, a
//! method keeps two argument views that are deliberately independent:
//!
//! - the **call signature**, derived only by observing receive-argument
//!   instructions as they are appended, in append order;
//! - the **argument descriptors**, declared explicitly by the builder for
//!   introspection (`[:req, "a"], [:opt, "b"], ...`).
//!
//! Nothing cross-checks the two; consumers must not assume they line up.

use crate::ir::args::{ArgumentDescriptor, ArgumentKind};
use crate::ir::classify::signature_entry;
use crate::ir::instr::Instr;
use crate::ir::operands::{LocalVariable, Operand, BLOCK_VARIABLE_NAME};
use crate::ir::scope::{Scope, ScopeHeader, ScopeId, StaticScopeId};
use crate::ir::static_scope::StaticScope;
use crate::ir::variables::VariableTable;
use crate::IrOptions;
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub struct MethodScope {
    header: ScopeHeader,
    is_instance_method: bool,
    local_vars: VariableTable,
    instrs: Vec<Instr>,
    call_args: Vec<Operand>,
    arg_desc: Vec<ArgumentDescriptor>,
    trace_signature: bool,
}

impl MethodScope {
    /// Create a method scope nested in `lexical_parent`, inheriting its file.
    ///
    /// When a static scope is supplied it is back-linked to the new method,
    /// unless the options request IR generation only.
    pub fn new(
        id: ScopeId,
        lexical_parent: &dyn Scope,
        name: &str,
        is_instance_method: bool,
        line: u32,
        static_scope: Option<&mut StaticScope>,
        options: &IrOptions,
    ) -> Self {
        let static_scope_id = static_scope.as_ref().map(|s| s.id());
        if let Some(ss) = static_scope {
            if !options.ir_gen_only {
                ss.set_ir_scope(id);
                tracing::debug!(method = name, %id, static_scope = %ss.id(), "back-linked static scope");
            }
        }
        tracing::debug!(
            method = name,
            %id,
            parent = %lexical_parent.id(),
            line,
            is_instance_method,
            "created method scope"
        );
        Self {
            header: ScopeHeader {
                id,
                lexical_parent: Some(lexical_parent.id()),
                name: name.to_string(),
                file: lexical_parent.file(),
                line,
                static_scope: static_scope_id,
            },
            is_instance_method,
            local_vars: VariableTable::new(),
            instrs: Vec::new(),
            call_args: Vec::new(),
            arg_desc: Vec::new(),
            trace_signature: options.trace_signature,
        }
    }

    pub fn name(&self) -> &str {
        &self.header.name
    }

    pub fn is_instance_method(&self) -> bool {
        self.is_instance_method
    }

    pub fn line(&self) -> u32 {
        self.header.line
    }

    pub fn lexical_parent(&self) -> Option<ScopeId> {
        self.header.lexical_parent
    }

    pub fn static_scope(&self) -> Option<StaticScopeId> {
        self.header.static_scope
    }

    /// Append `instr` to the body, recording it in the call signature when
    /// it receives an argument.
    pub fn append_instruction(&mut self, instr: Instr) {
        if let Some(entry) = signature_entry(&instr) {
            if self.trace_signature {
                tracing::trace!(method = %self.header.name, position = self.call_args.len(), entry = %entry, "call signature entry");
            }
            self.call_args.push(entry);
        }
        self.instrs.push(instr);
    }

    pub fn register_argument_descriptor(&mut self, kind: ArgumentKind, name: &str) {
        self.arg_desc.push(ArgumentDescriptor::new(kind, name));
    }

    /// Call-signature operands in the order their receipts were appended.
    pub fn call_signature(&self) -> &[Operand] {
        &self.call_args
    }

    pub fn argument_descriptors(&self) -> &[ArgumentDescriptor] {
        &self.arg_desc
    }

    /// Get-or-create `name` in this method's frame.
    ///
    /// # Panics
    ///
    /// Panics when `depth` is not 0. A method frame is flat; a non-zero depth
    /// means the caller computed lexical nesting for the wrong scope.
    pub fn resolve_variable(&mut self, name: &str, depth: u32) -> LocalVariable {
        assert_flat_depth(&self.header.name, name, depth);
        self.local_vars.get_or_create(name)
    }

    /// The variable holding the method's implicit block, allocated on first use.
    pub fn implicit_block_parameter(&mut self) -> LocalVariable {
        self.resolve_variable(BLOCK_VARIABLE_NAME, 0)
    }

    pub fn variables(&self) -> Vec<&LocalVariable> {
        self.local_vars.variables()
    }

    /// Serializable snapshot for dumps and reflective metadata.
    pub fn summary(&self, file_name: &str) -> MethodSummary {
        MethodSummary {
            id: self.header.id,
            name: self.header.name.clone(),
            scope: self.scope_name().to_string(),
            instance_method: self.is_instance_method,
            file: file_name.to_string(),
            line: self.header.line,
            lexical_parent: self.header.lexical_parent,
            variables: self.variables().into_iter().cloned().collect(),
            call_signature: self.call_args.iter().map(|op| op.to_string()).collect(),
            argument_descriptors: self.arg_desc.clone(),
            instructions: self.instrs.iter().map(|i| i.to_string()).collect(),
        }
    }
}

fn assert_flat_depth(method: &str, name: &str, depth: u32) {
    assert!(
        depth == 0,
        "local variable depth in method '{}' must be 0, got {} for '{}'",
        method,
        depth,
        name
    );
}

impl Scope for MethodScope {
    fn header(&self) -> &ScopeHeader {
        &self.header
    }

    fn scope_name(&self) -> &'static str {
        "Method"
    }

    fn instrs(&self) -> &[Instr] {
        &self.instrs
    }

    fn add_instr(&mut self, instr: Instr) {
        self.append_instruction(instr);
    }

    fn find_existing_local_variable(&self, name: &str, depth: u32) -> Option<&LocalVariable> {
        assert_flat_depth(&self.header.name, name, depth);
        self.local_vars.lookup(name)
    }

    fn local_variable(&mut self, name: &str, depth: u32) -> LocalVariable {
        self.resolve_variable(name, depth)
    }

    fn variable_count(&self) -> usize {
        self.local_vars.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSummary {
    pub id: ScopeId,
    pub name: String,
    pub scope: String,
    pub instance_method: bool,
    pub file: String,
    pub line: u32,
    pub lexical_parent: Option<ScopeId>,
    pub variables: Vec<LocalVariable>,
    pub call_signature: Vec<String>,
    pub argument_descriptors: Vec<ArgumentDescriptor>,
    pub instructions: Vec<String>,
}
