//! Operands: the values instructions read and write.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name under which a method's implicit block parameter is bound.
/// The `%` prefix keeps it out of reach of user identifiers.
pub const BLOCK_VARIABLE_NAME: &str = "%block";

/// Returns true for names that only the compiler may mint.
pub fn is_reserved_name(name: &str) -> bool {
    name.starts_with('%')
}

/// A named local, addressed by its frame slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalVariable {
    pub name: String,
    /// Lexical distance to the owning scope. Always 0 inside a method.
    pub depth: u32,
    pub slot: u32,
}

impl LocalVariable {
    pub fn new(name: &str, depth: u32, slot: u32) -> Self {
        Self {
            name: name.to_string(),
            depth,
            slot,
        }
    }
}

/// Compiler temporary (`%v_N`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemporaryVariable {
    pub index: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Variable {
    Local(LocalVariable),
    Temporary(TemporaryVariable),
}

impl Variable {
    pub fn as_local(&self) -> Option<&LocalVariable> {
        match self {
            Variable::Local(lv) => Some(lv),
            Variable::Temporary(_) => None,
        }
    }
}

impl From<LocalVariable> for Variable {
    fn from(lv: LocalVariable) -> Self {
        Variable::Local(lv)
    }
}

impl From<TemporaryVariable> for Variable {
    fn from(tv: TemporaryVariable) -> Self {
        Variable::Temporary(tv)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variable::Local(lv) => write!(f, "{}", lv.name),
            Variable::Temporary(tv) => write!(f, "%v_{}", tv.index),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Operand {
    Variable(Variable),
    /// Remaining positional arguments collected into one value.
    Splat(Box<Operand>),
    Nil,
    Fixnum(i64),
    Str(String),
    SelfValue,
}

impl Operand {
    pub fn splat(inner: Operand) -> Self {
        Operand::Splat(Box::new(inner))
    }

    pub fn is_splat(&self) -> bool {
        matches!(self, Operand::Splat(_))
    }

    /// The variable this operand names, looking through a splat.
    pub fn variable(&self) -> Option<&Variable> {
        match self {
            Operand::Variable(v) => Some(v),
            Operand::Splat(inner) => inner.variable(),
            _ => None,
        }
    }
}

impl From<Variable> for Operand {
    fn from(v: Variable) -> Self {
        Operand::Variable(v)
    }
}

impl From<LocalVariable> for Operand {
    fn from(lv: LocalVariable) -> Self {
        Operand::Variable(Variable::Local(lv))
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Variable(v) => write!(f, "{}", v),
            Operand::Splat(inner) => write!(f, "*{}", inner),
            Operand::Nil => write!(f, "nil"),
            Operand::Fixnum(n) => write!(f, "{}", n),
            Operand::Str(s) => write!(f, "{:?}", s),
            Operand::SelfValue => write!(f, "%self"),
        }
    }
}
