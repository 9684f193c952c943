//! Parser-side scope descriptor. It knows which IR scope was built from it
//! through a single back-link so later phases can recover scope metadata.

use crate::ir::scope::{ScopeId, StaticScopeId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticScope {
    id: StaticScopeId,
    ir_scope: Option<ScopeId>,
}

impl StaticScope {
    pub fn new(id: StaticScopeId) -> Self {
        Self { id, ir_scope: None }
    }

    pub fn id(&self) -> StaticScopeId {
        self.id
    }

    pub fn set_ir_scope(&mut self, scope: ScopeId) {
        self.ir_scope = Some(scope);
    }

    pub fn ir_scope(&self) -> Option<ScopeId> {
        self.ir_scope
    }
}
