//! Per-scope variable table. Assigns each name a frame slot on first use.

use crate::ir::operands::LocalVariable;
use std::collections::HashMap;

/// Name → slot state for a single scope
#[derive(Debug)]
pub struct VariableTable {
    next_slot: u32,
    bindings: HashMap<String, LocalVariable>,
}

impl Default for VariableTable {
    fn default() -> Self {
        Self::new()
    }
}

impl VariableTable {
    pub fn new() -> Self {
        Self {
            next_slot: 0,
            bindings: HashMap::new(),
        }
    }

    /// Return the variable bound to `name`, allocating the next slot if the
    /// name has not been seen in this scope.
    pub fn get_or_create(&mut self, name: &str) -> LocalVariable {
        if let Some(lv) = self.bindings.get(name) {
            return lv.clone();
        }
        let lv = LocalVariable::new(name, 0, self.next_slot);
        self.next_slot += 1;
        self.bindings.insert(name.to_string(), lv.clone());
        lv
    }

    /// Look up a named variable without allocating
    pub fn lookup(&self, name: &str) -> Option<&LocalVariable> {
        self.bindings.get(name)
    }

    /// Number of slots handed out so far
    pub fn len(&self) -> usize {
        self.next_slot as usize
    }

    pub fn is_empty(&self) -> bool {
        self.next_slot == 0
    }

    /// All variables in slot order
    pub fn variables(&self) -> Vec<&LocalVariable> {
        let mut vars: Vec<&LocalVariable> = self.bindings.values().collect();
        vars.sort_by_key(|lv| lv.slot);
        vars
    }
}
