//! The IR instruction set.
//!
//! The set is closed: anything that needs to know whether an instruction
//! binds an incoming call argument matches on [`Instr::arg_receipt`] instead
//! of inspecting instruction types at runtime.

use crate::ir::operands::{Operand, Variable};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Instr {
    /// Bind the required positional argument at `index`.
    ReceivePreReqdArg { result: Variable, index: u32 },
    /// Bind an optional positional argument; unset when fewer than
    /// `min_args` arguments were passed.
    ReceiveOptArg {
        result: Variable,
        index: u32,
        min_args: u32,
    },
    ReceiveKeywordArg { result: Variable, name: String },
    /// Bind a required argument that follows a rest parameter.
    ReceivePostReqdArg {
        result: Variable,
        index: u32,
        pre_count: u32,
    },
    /// Bind every positional argument from `index` onwards as one array.
    ReceiveRestArg { result: Variable, index: u32 },
    ReceiveClosure { result: Variable },
    ReceiveSelf { result: Variable },
    Copy { result: Variable, value: Operand },
    Call {
        result: Variable,
        receiver: Operand,
        name: String,
        args: Vec<Operand>,
    },
    Return { value: Operand },
    LineNumber { line: u32 },
}

/// How an instruction binds an incoming call argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgReceipt<'a> {
    /// One positional or keyword argument.
    Single(&'a Variable),
    /// The remaining positional arguments.
    Rest(&'a Variable),
}

impl<'a> ArgReceipt<'a> {
    pub fn destination(&self) -> &'a Variable {
        match *self {
            ArgReceipt::Single(v) | ArgReceipt::Rest(v) => v,
        }
    }
}

impl Instr {
    /// Describe the argument this instruction receives, if it receives one.
    /// Closure and self receipts are frame setup, not call arguments.
    pub fn arg_receipt(&self) -> Option<ArgReceipt<'_>> {
        match self {
            Instr::ReceivePreReqdArg { result, .. }
            | Instr::ReceiveOptArg { result, .. }
            | Instr::ReceiveKeywordArg { result, .. }
            | Instr::ReceivePostReqdArg { result, .. } => Some(ArgReceipt::Single(result)),
            Instr::ReceiveRestArg { result, .. } => Some(ArgReceipt::Rest(result)),
            Instr::ReceiveClosure { .. }
            | Instr::ReceiveSelf { .. }
            | Instr::Copy { .. }
            | Instr::Call { .. }
            | Instr::Return { .. }
            | Instr::LineNumber { .. } => None,
        }
    }

    pub fn is_arg_receipt(&self) -> bool {
        self.arg_receipt().is_some()
    }

    /// The variable this instruction writes, if any.
    pub fn result(&self) -> Option<&Variable> {
        match self {
            Instr::ReceivePreReqdArg { result, .. }
            | Instr::ReceiveOptArg { result, .. }
            | Instr::ReceiveKeywordArg { result, .. }
            | Instr::ReceivePostReqdArg { result, .. }
            | Instr::ReceiveRestArg { result, .. }
            | Instr::ReceiveClosure { result }
            | Instr::ReceiveSelf { result }
            | Instr::Copy { result, .. }
            | Instr::Call { result, .. } => Some(result),
            Instr::Return { .. } | Instr::LineNumber { .. } => None,
        }
    }
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instr::ReceivePreReqdArg { result, index } => {
                write!(f, "{} = recv_pre_reqd_arg({})", result, index)
            }
            Instr::ReceiveOptArg {
                result,
                index,
                min_args,
            } => write!(f, "{} = recv_opt_arg({}, min={})", result, index, min_args),
            Instr::ReceiveKeywordArg { result, name } => {
                write!(f, "{} = recv_kw_arg({})", result, name)
            }
            Instr::ReceivePostReqdArg {
                result,
                index,
                pre_count,
            } => write!(f, "{} = recv_post_reqd_arg({}, pre={})", result, index, pre_count),
            Instr::ReceiveRestArg { result, index } => {
                write!(f, "{} = recv_rest_arg({})", result, index)
            }
            Instr::ReceiveClosure { result } => write!(f, "{} = recv_closure", result),
            Instr::ReceiveSelf { result } => write!(f, "{} = recv_self", result),
            Instr::Copy { result, value } => write!(f, "{} = copy({})", result, value),
            Instr::Call {
                result,
                receiver,
                name,
                args,
            } => {
                let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
                write!(f, "{} = call({}, {}, [{}])", result, receiver, name, args.join(", "))
            }
            Instr::Return { value } => write!(f, "return({})", value),
            Instr::LineNumber { line } => write!(f, "line_num({})", line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::operands::{LocalVariable, TemporaryVariable};

    fn local(name: &str, slot: u32) -> Variable {
        LocalVariable::new(name, 0, slot).into()
    }

    #[test]
    fn test_receive_kinds_are_receipts() {
        let a = local("a", 0);
        let cases = vec![
            Instr::ReceivePreReqdArg { result: a.clone(), index: 0 },
            Instr::ReceiveOptArg { result: a.clone(), index: 1, min_args: 1 },
            Instr::ReceiveKeywordArg { result: a.clone(), name: "a".into() },
            Instr::ReceivePostReqdArg { result: a.clone(), index: 0, pre_count: 1 },
        ];
        for instr in &cases {
            assert_eq!(instr.arg_receipt(), Some(ArgReceipt::Single(&a)), "{}", instr);
        }
        let rest = Instr::ReceiveRestArg { result: a.clone(), index: 2 };
        assert_eq!(rest.arg_receipt(), Some(ArgReceipt::Rest(&a)));
        assert_eq!(rest.arg_receipt().map(|r| r.destination()), Some(&a));
    }

    #[test]
    fn test_frame_setup_is_not_a_receipt() {
        let b = local("%block", 0);
        assert!(!Instr::ReceiveClosure { result: b.clone() }.is_arg_receipt());
        assert!(!Instr::ReceiveSelf { result: b }.is_arg_receipt());
        assert!(!Instr::LineNumber { line: 3 }.is_arg_receipt());
    }

    #[test]
    fn test_result_and_display() {
        let t: Variable = TemporaryVariable { index: 0 }.into();
        let call = Instr::Call {
            result: t.clone(),
            receiver: Operand::SelfValue,
            name: "puts".into(),
            args: vec![Operand::Fixnum(1), Operand::Str("x".into())],
        };
        assert_eq!(call.result(), Some(&t));
        assert_eq!(call.to_string(), "%v_0 = call(%self, puts, [1, \"x\"])");
        assert_eq!(Instr::Return { value: Operand::Nil }.result(), None);
    }
}
