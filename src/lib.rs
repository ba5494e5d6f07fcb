//! An embedded bytecode virtual machine for interactive simulation scripting.
//!
//! The machine executes already-compiled instruction streams. Code is a flat
//! buffer of 32 bit words. Each word selects one of six encoding segments via
//! its high bits, and each segment pairs an opcode id with zero, one, or two
//! packed numeric arguments (see the `bytecode` module for the exact layout).
//!
//! Behavior is not baked into the machine. Instead, an [`Interpreter`] holds
//! six registries mapping opcode ids to installed handler objects, one
//! registry per segment. The host application installs its instruction set
//! before the first run and then drives scripts with [`Interpreter::run`],
//! supplying a context value of its choosing; handlers are the only code that
//! ever touches the context. Subroutine calls are expressed by handlers
//! returning a [`Flow`] signal, which the interpreter turns into call-stack
//! pushes and pops.

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

mod bytecode;
mod data;
mod error;
mod interpreter;
mod opcodes;
mod runtime;

pub use bytecode::{
  encode_segment0, encode_segment1, encode_segment2, encode_segment3,
  encode_segment4, encode_segment5, try_decode_instruction, Instruction,
  Segment, Word,
};
pub use data::Data;
pub use error::Error;
pub use interpreter::{Interpreter, DEFAULT_CALL_DEPTH_LIMIT};
pub use opcodes::{Flow, Opcode0, Opcode1, Opcode2};
pub use runtime::Runtime;
