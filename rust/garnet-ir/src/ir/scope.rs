//! Lexical scopes. Every scope owns its variable table and instruction
//! stream; parents are referenced by arena id, never owned.

use crate::ir::instr::Instr;
use crate::ir::operands::LocalVariable;
use garnet_core::FileId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a scope in its [`IrManager`](crate::ir::manager::IrManager).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScopeId(pub u32);

/// Index of a parser-side static scope descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StaticScopeId(pub u32);

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scope#{}", self.0)
    }
}

impl fmt::Display for StaticScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "static_scope#{}", self.0)
    }
}

/// Data shared by every scope kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeHeader {
    pub id: ScopeId,
    pub lexical_parent: Option<ScopeId>,
    pub name: String,
    pub file: FileId,
    pub line: u32,
    pub static_scope: Option<StaticScopeId>,
}

pub trait Scope: fmt::Debug {
    fn header(&self) -> &ScopeHeader;

    /// Human-readable scope kind, e.g. `"Method"`.
    fn scope_name(&self) -> &'static str;

    fn instrs(&self) -> &[Instr];

    fn add_instr(&mut self, instr: Instr);

    /// Look up `name` at `depth` without declaring it.
    fn find_existing_local_variable(&self, name: &str, depth: u32) -> Option<&LocalVariable>;

    /// Look up `name` at `depth`, declaring it when absent.
    fn local_variable(&mut self, name: &str, depth: u32) -> LocalVariable;

    /// Number of local slots allocated in this scope's frame.
    fn variable_count(&self) -> usize;

    fn id(&self) -> ScopeId {
        self.header().id
    }

    fn file(&self) -> FileId {
        self.header().file
    }
}
