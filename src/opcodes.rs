//! Handler traits, one per instruction arity, and the control-flow signal a
//! handler returns to the interpreter.
//!
//! A handler is a unit of behavior bound to one (segment, opcode id) pair.
//! It receives the current frame and the host-supplied context and never
//! sees the interpreter itself, so the call stack can only be manipulated
//! through the returned [`Flow`] value. The three traits form a capability
//! split by arity rather than a hierarchy: segments 0, 2, and 3 dispatch to
//! `Opcode1`, segments 1 and 4 to `Opcode2`, and segment 5 to `Opcode0`.

use crate::bytecode::Word;
use crate::error::Error;
use crate::runtime::Runtime;

/// What the interpreter should do after a handler executes.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Flow {
  /// Proceed to the instruction at the current program counter.
  Continue,
  /// Suspend the current frame and continue in a fresh frame at the given
  /// program counter, with an empty evaluation stack.
  Call(usize),
  /// Pop the call stack and resume the suspended frame there. If the call
  /// stack is empty the run terminates normally.
  Return,
  /// Terminate the run immediately.
  Halt,
}

/// A handler for segment 5 instructions (26 bit opcode, no argument).
pub trait Opcode0<C> {
  fn execute(&self, runtime: &mut Runtime<'_>, context: &mut C) -> Result<Flow, Error>;
}

/// A handler for segment 0, 2, or 3 instructions (one argument).
pub trait Opcode1<C> {
  fn execute(&self, runtime: &mut Runtime<'_>, arg0: Word, context: &mut C)
    -> Result<Flow, Error>;
}

/// A handler for segment 1 or 4 instructions (two arguments).
pub trait Opcode2<C> {
  fn execute(&self, runtime: &mut Runtime<'_>, arg0: Word, arg1: Word, context: &mut C)
    -> Result<Flow, Error>;
}
