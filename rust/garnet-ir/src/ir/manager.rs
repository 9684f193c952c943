//! Scope arena for one compilation unit.
//!
//! Scopes and static scopes refer to each other by id, so the method ↔
//! static-scope back-link never forms an ownership cycle. Everything is
//! released together when the manager is dropped.

use crate::ir::method::{MethodScope, MethodSummary};
use crate::ir::scope::{Scope, ScopeId, StaticScopeId};
use crate::ir::script::ScriptScope;
use crate::ir::static_scope::StaticScope;
use crate::{IrError, IrOptions};
use garnet_core::{FileId, StringTable};

#[derive(Debug)]
enum ScopeSlot {
    Script(ScriptScope),
    Method(MethodScope),
}

impl ScopeSlot {
    fn as_scope(&self) -> &dyn Scope {
        match self {
            ScopeSlot::Script(s) => s,
            ScopeSlot::Method(m) => m,
        }
    }

    fn as_scope_mut(&mut self) -> &mut dyn Scope {
        match self {
            ScopeSlot::Script(s) => s,
            ScopeSlot::Method(m) => m,
        }
    }
}

#[derive(Debug, Default)]
pub struct IrManager {
    options: IrOptions,
    files: StringTable,
    scopes: Vec<ScopeSlot>,
    static_scopes: Vec<StaticScope>,
}

impl IrManager {
    pub fn new(options: IrOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &IrOptions {
        &self.options
    }

    /// Create the root scope for `file_name`.
    pub fn new_script(&mut self, file_name: &str, line: u32) -> ScopeId {
        let file = self.files.intern_file(file_name);
        let id = self.next_scope_id();
        tracing::debug!(%id, file = file_name, "created script scope");
        self.scopes.push(ScopeSlot::Script(ScriptScope::new(id, file, line)));
        id
    }

    pub fn new_static_scope(&mut self) -> StaticScopeId {
        let id = StaticScopeId(self.static_scopes.len() as u32);
        self.static_scopes.push(StaticScope::new(id));
        id
    }

    /// Begin a method body nested in `parent`.
    pub fn new_method(
        &mut self,
        parent: ScopeId,
        name: &str,
        is_instance_method: bool,
        line: u32,
        static_scope: Option<StaticScopeId>,
    ) -> Result<ScopeId, IrError> {
        let id = self.next_scope_id();
        let parent_scope = self
            .scopes
            .get(parent.0 as usize)
            .map(ScopeSlot::as_scope)
            .ok_or(IrError::UnknownScope(parent))?;
        let static_scope = match static_scope {
            Some(sid) => Some(
                self.static_scopes
                    .get_mut(sid.0 as usize)
                    .ok_or(IrError::UnknownStaticScope(sid))?,
            ),
            None => None,
        };
        let method = MethodScope::new(
            id,
            parent_scope,
            name,
            is_instance_method,
            line,
            static_scope,
            &self.options,
        );
        self.scopes.push(ScopeSlot::Method(method));
        Ok(id)
    }

    pub fn scope(&self, id: ScopeId) -> Option<&dyn Scope> {
        self.scopes.get(id.0 as usize).map(ScopeSlot::as_scope)
    }

    pub fn scope_mut(&mut self, id: ScopeId) -> Option<&mut dyn Scope> {
        self.scopes.get_mut(id.0 as usize).map(ScopeSlot::as_scope_mut)
    }

    pub fn method(&self, id: ScopeId) -> Result<&MethodScope, IrError> {
        match self.scopes.get(id.0 as usize) {
            Some(ScopeSlot::Method(m)) => Ok(m),
            Some(_) => Err(IrError::NotAMethod(id)),
            None => Err(IrError::UnknownScope(id)),
        }
    }

    pub fn method_mut(&mut self, id: ScopeId) -> Result<&mut MethodScope, IrError> {
        match self.scopes.get_mut(id.0 as usize) {
            Some(ScopeSlot::Method(m)) => Ok(m),
            Some(_) => Err(IrError::NotAMethod(id)),
            None => Err(IrError::UnknownScope(id)),
        }
    }

    /// All method scopes in creation order.
    pub fn methods(&self) -> impl Iterator<Item = &MethodScope> + '_ {
        self.scopes.iter().filter_map(|slot| match slot {
            ScopeSlot::Method(m) => Some(m),
            ScopeSlot::Script(_) => None,
        })
    }

    pub fn static_scope(&self, id: StaticScopeId) -> Option<&StaticScope> {
        self.static_scopes.get(id.0 as usize)
    }

    /// The IR scope built from a static scope, once back-linked.
    pub fn scope_for_static(&self, id: StaticScopeId) -> Option<ScopeId> {
        self.static_scope(id).and_then(StaticScope::ir_scope)
    }

    pub fn file_name(&self, file: FileId) -> Result<&str, IrError> {
        self.files.resolve_file(file).ok_or(IrError::UnknownFile(file))
    }

    pub fn summarize(&self, id: ScopeId) -> Result<MethodSummary, IrError> {
        let method = self.method(id)?;
        let file_name = self.file_name(method.file())?;
        Ok(method.summary(file_name))
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    fn next_scope_id(&self) -> ScopeId {
        ScopeId(self.scopes.len() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::args::ArgumentKind;
    use crate::ir::instr::Instr;

    #[test]
    fn test_method_under_script() {
        let mut mgr = IrManager::default();
        let script = mgr.new_script("app.rb", 1);
        let foo = mgr.new_method(script, "foo", true, 3, None).unwrap();
        assert_ne!(script, foo);
        let m = mgr.method(foo).unwrap();
        assert_eq!(m.lexical_parent(), Some(script));
        assert_eq!(mgr.file_name(m.file()).unwrap(), "app.rb");
        assert_eq!(mgr.scope(script).map(|s| s.scope_name()), Some("Script"));
        assert_eq!(mgr.methods().count(), 1);
    }

    #[test]
    fn test_unknown_parent() {
        let mut mgr = IrManager::default();
        let err = mgr.new_method(ScopeId(7), "foo", true, 1, None).unwrap_err();
        assert!(matches!(err, IrError::UnknownScope(ScopeId(7))));
        assert_eq!(mgr.scope_count(), 0);
    }

    #[test]
    fn test_unknown_static_scope() {
        let mut mgr = IrManager::default();
        let script = mgr.new_script("a.rb", 1);
        let err = mgr
            .new_method(script, "foo", true, 1, Some(StaticScopeId(0)))
            .unwrap_err();
        assert!(matches!(err, IrError::UnknownStaticScope(StaticScopeId(0))));
    }

    #[test]
    fn test_script_is_not_a_method() {
        let mut mgr = IrManager::default();
        let script = mgr.new_script("a.rb", 1);
        assert!(matches!(mgr.method(script), Err(IrError::NotAMethod(_))));
        assert!(matches!(mgr.method_mut(ScopeId(9)), Err(IrError::UnknownScope(_))));
    }

    #[test]
    fn test_back_link_through_arena() {
        let mut mgr = IrManager::default();
        let script = mgr.new_script("a.rb", 1);
        let ss = mgr.new_static_scope();
        let foo = mgr.new_method(script, "foo", false, 2, Some(ss)).unwrap();
        assert_eq!(mgr.scope_for_static(ss), Some(foo));
        assert_eq!(mgr.method(foo).unwrap().static_scope(), Some(ss));
    }

    #[test]
    fn test_back_link_skipped_in_ir_gen_only_mode() {
        let mut mgr = IrManager::new(IrOptions {
            ir_gen_only: true,
            ..IrOptions::default()
        });
        let script = mgr.new_script("a.rb", 1);
        let ss = mgr.new_static_scope();
        mgr.new_method(script, "foo", false, 2, Some(ss)).unwrap();
        assert_eq!(mgr.scope_for_static(ss), None);
    }

    #[test]
    fn test_build_through_scope_trait() {
        let mut mgr = IrManager::default();
        let script = mgr.new_script("a.rb", 1);
        let foo = mgr.new_method(script, "foo", true, 2, None).unwrap();
        {
            let scope = mgr.scope_mut(foo).unwrap();
            let a = scope.local_variable("a", 0);
            scope.add_instr(Instr::ReceivePreReqdArg { result: a.into(), index: 0 });
        }
        let m = mgr.method_mut(foo).unwrap();
        m.register_argument_descriptor(ArgumentKind::Required, "a");
        let summary = mgr.summarize(foo).unwrap();
        assert_eq!(summary.call_signature, vec!["a".to_string()]);
        assert_eq!(summary.file, "a.rb");
    }
}
