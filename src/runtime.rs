//! One execution frame of the machine: the program counter, the evaluation
//! stack, and a borrow of the active code buffer. Exactly one `Runtime` is
//! current at any time; when a handler performs a subroutine call, the
//! current frame's mutable state is saved as a `Frame` on the interpreter's
//! call stack and the same `Runtime` continues as a fresh frame for the
//! callee. All frames of one run share the same code buffer borrow.

use crate::bytecode::Word;
use crate::data::Data;
use crate::error::Error;

pub struct Runtime<'c> {
  code: &'c [Word],
  pc: usize,
  stack: Vec<Data>,
}

/// The saved state of a suspended `Runtime`: everything but the code borrow,
/// which the resumed frame reacquires from the run in progress.
pub(crate) struct Frame {
  pc: usize,
  stack: Vec<Data>,
}

impl<'c> Runtime<'c> {

  pub(crate) fn new(code: &'c [Word]) -> Runtime<'c> {
    Runtime {
      code,
      pc: 0,
      stack: Vec::new()
    }
  }

  // region Program counter and code access

  pub fn pc(&self) -> usize {
    self.pc
  }

  /// Overwrites the program counter. Used by handlers for intra-stream jumps.
  pub fn set_pc(&mut self, pc: usize) {
    self.pc = pc;
  }

  /// Reads the word at the program counter and advances past it. The counter
  /// therefore points at the *following* word while a handler executes, so a
  /// saved frame resumes after the instruction that suspended it.
  pub fn fetch(&mut self) -> Result<Word, Error> {
    match self.code.get(self.pc) {
      Some(word) => {
        self.pc += 1;
        Ok(*word)
      }
      None => Err(Error::CodeOutOfRange { pc: self.pc, size: self.code.len() })
    }
  }

  /// Bounds-checked random access into the code buffer, for handlers that
  /// read inline literals.
  pub fn code_at(&self, index: usize) -> Result<Word, Error> {
    match self.code.get(index) {
      Some(word) => Ok(*word),
      None       => Err(Error::CodeOutOfRange { pc: index, size: self.code.len() })
    }
  }

  pub fn code_size(&self) -> usize {
    self.code.len()
  }

  // endregion

  // region Evaluation stack

  pub fn push(&mut self, data: Data) {
    self.stack.push(data);
  }

  /// Popping an empty stack is a script or handler-authoring bug, never a
  /// condition to paper over with a default value.
  pub fn pop(&mut self) -> Result<Data, Error> {
    match self.stack.pop() {
      Some(data) => Ok(data),
      None       => Err(Error::StackUnderflow { pc: self.pc })
    }
  }

  pub fn stack(&self) -> &[Data] {
    &self.stack
  }

  // endregion

  /// Saves the mutable state of this frame and restarts it as a fresh callee
  /// frame at `entry` with an empty evaluation stack.
  pub(crate) fn suspend(&mut self, entry: usize) -> Frame {
    let frame = Frame {
      pc: self.pc,
      stack: std::mem::replace(&mut self.stack, Vec::new())
    };
    self.pc = entry;
    frame
  }

  /// Reinstates a previously suspended frame as the current one.
  pub(crate) fn resume(&mut self, frame: Frame) {
    self.pc = frame.pc;
    self.stack = frame.stack;
  }

}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fetch_walks_the_buffer(){
    let code = [10u32, 20, 30];
    let mut runtime = Runtime::new(&code);
    assert_eq!(runtime.fetch(), Ok(10));
    assert_eq!(runtime.fetch(), Ok(20));
    assert_eq!(runtime.pc(), 2);
    assert_eq!(runtime.fetch(), Ok(30));
    assert_eq!(
      runtime.fetch(),
      Err(Error::CodeOutOfRange { pc: 3, size: 3 })
    );
  }

  #[test]
  fn pop_empty_is_underflow(){
    let code = [0u32];
    let mut runtime = Runtime::new(&code);
    runtime.push(Data::from_int(7));
    assert_eq!(runtime.pop().unwrap().as_int(), 7);
    assert_eq!(runtime.pop(), Err(Error::StackUnderflow { pc: 0 }));
  }

  #[test]
  fn suspend_and_resume_round_trip(){
    let code = [0u32; 8];
    let mut runtime = Runtime::new(&code);
    runtime.set_pc(3);
    runtime.push(Data::from_int(1));
    runtime.push(Data::from_int(2));

    let frame = runtime.suspend(6);
    assert_eq!(runtime.pc(), 6);
    assert!(runtime.stack().is_empty());

    runtime.push(Data::from_int(9));
    runtime.resume(frame);
    assert_eq!(runtime.pc(), 3);
    let values: Vec<i32> = runtime.stack().iter().map(|d| d.as_int()).collect();
    assert_eq!(values, vec![1, 2]);
  }

  #[test]
  fn code_at_is_bounds_checked(){
    let code = [5u32, 6];
    let runtime = Runtime::new(&code);
    assert_eq!(runtime.code_at(1), Ok(6));
    assert_eq!(runtime.code_at(2), Err(Error::CodeOutOfRange { pc: 2, size: 2 }));
  }
}
