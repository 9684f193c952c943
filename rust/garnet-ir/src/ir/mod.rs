pub mod args;
pub mod classify;
pub mod instr;
pub mod manager;
pub mod method;
pub mod operands;
pub mod scope;
pub mod script;
pub mod static_scope;
pub mod variables;
