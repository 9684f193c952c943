//! Top-level script scope: the root that methods nest under.

use crate::ir::instr::Instr;
use crate::ir::operands::LocalVariable;
use crate::ir::scope::{Scope, ScopeHeader, ScopeId};
use crate::ir::variables::VariableTable;
use garnet_core::FileId;

#[derive(Debug)]
pub struct ScriptScope {
    header: ScopeHeader,
    local_vars: VariableTable,
    instrs: Vec<Instr>,
}

impl ScriptScope {
    pub fn new(id: ScopeId, file: FileId, line: u32) -> Self {
        Self {
            header: ScopeHeader {
                id,
                lexical_parent: None,
                name: "__file__".to_string(),
                file,
                line,
                static_scope: None,
            },
            local_vars: VariableTable::new(),
            instrs: Vec::new(),
        }
    }
}

impl Scope for ScriptScope {
    fn header(&self) -> &ScopeHeader {
        &self.header
    }

    fn scope_name(&self) -> &'static str {
        "Script"
    }

    fn instrs(&self) -> &[Instr] {
        &self.instrs
    }

    fn add_instr(&mut self, instr: Instr) {
        self.instrs.push(instr);
    }

    fn find_existing_local_variable(&self, name: &str, depth: u32) -> Option<&LocalVariable> {
        assert!(
            depth == 0,
            "script scope has no enclosing frame: cannot resolve '{}' at depth {}",
            name,
            depth
        );
        self.local_vars.lookup(name)
    }

    fn local_variable(&mut self, name: &str, depth: u32) -> LocalVariable {
        assert!(
            depth == 0,
            "script scope has no enclosing frame: cannot resolve '{}' at depth {}",
            name,
            depth
        );
        self.local_vars.get_or_create(name)
    }

    fn variable_count(&self) -> usize {
        self.local_vars.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_is_a_root() {
        let mut script = ScriptScope::new(ScopeId(0), FileId(0), 1);
        assert_eq!(script.header().lexical_parent, None);
        assert_eq!(script.scope_name(), "Script");
        assert_eq!(script.local_variable("x", 0).slot, 0);
        assert_eq!(script.local_variable("x", 0).slot, 0);
        assert_eq!(script.variable_count(), 1);
    }

    #[test]
    #[should_panic(expected = "script scope has no enclosing frame")]
    fn test_script_rejects_outer_depth() {
        let mut script = ScriptScope::new(ScopeId(0), FileId(0), 1);
        script.local_variable("x", 1);
    }
}
