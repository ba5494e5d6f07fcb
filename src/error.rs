//! Fatal conditions raised during installation or execution. None of these
//! are recoverable within a run: malformed or inconsistent bytecode is a
//! programming error upstream, so the machine fails loudly at the offending
//! instruction instead of skipping it and corrupting later decoding. Aborting
//! never terminates the hosting process; the error unwinds out of `run` and
//! the caller decides.

use std::fmt::{Display, Formatter};

use crate::bytecode::{Segment, Word};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
  /// The word's high bits select no segment.
  UnknownSegment {
    code: Word,
    pc: usize
  },
  /// The segment is valid but no handler is installed for the opcode id.
  UnknownOpcode {
    segment: Segment,
    opcode: Word,
    pc: usize
  },
  /// A handler popped from an empty evaluation stack.
  StackUnderflow {
    pc: usize
  },
  /// The program counter left the code buffer (truncated or malformed code).
  CodeOutOfRange {
    pc: usize,
    size: usize
  },
  /// The configured call depth limit was reached.
  CallDepthExceeded {
    limit: usize,
    pc: usize
  },
  /// Installation: the opcode id does not fit the segment's id width.
  OpcodeOutOfRange {
    segment: Segment,
    opcode: Word
  },
  /// Installation: a handler is already bound to this (segment, opcode) pair.
  DuplicateOpcode {
    segment: Segment,
    opcode: Word
  },
}

impl Display for Error {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {

      Error::UnknownSegment { code, pc } => {
        write!(f, "unknown segment in instruction word {:#010X} at pc {}", code, pc)
      }

      Error::UnknownOpcode { segment, opcode, pc } => {
        write!(f, "no handler installed for opcode {:#x} in {} at pc {}", opcode, segment, pc)
      }

      Error::StackUnderflow { pc } => {
        write!(f, "evaluation stack underflow at pc {}", pc)
      }

      Error::CodeOutOfRange { pc, size } => {
        write!(f, "program counter {} outside code buffer of {} words", pc, size)
      }

      Error::CallDepthExceeded { limit, pc } => {
        write!(f, "call stack exhausted: depth limit {} reached at pc {}", limit, pc)
      }

      Error::OpcodeOutOfRange { segment, opcode } => {
        write!(f, "opcode {:#x} does not fit in {}", opcode, segment)
      }

      Error::DuplicateOpcode { segment, opcode } => {
        write!(f, "{} opcode {:#x} already has a handler installed", segment, opcode)
      }

    }
  }
}

impl std::error::Error for Error {}
