//! Projects argument-receiving instructions into a method's call signature.

use crate::ir::instr::{ArgReceipt, Instr};
use crate::ir::operands::Operand;

/// The call-signature entry contributed by `instr`, if any.
///
/// A rest receipt contributes its destination wrapped in a splat; every
/// other argument receipt contributes its destination as-is.
pub fn signature_entry(instr: &Instr) -> Option<Operand> {
    match instr.arg_receipt()? {
        ArgReceipt::Rest(dest) => Some(Operand::splat(Operand::Variable(dest.clone()))),
        ArgReceipt::Single(dest) => Some(Operand::Variable(dest.clone())),
    }
}
