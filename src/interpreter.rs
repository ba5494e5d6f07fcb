//! The interpreter: six handler registries, the call stack, and the
//! fetch-decode-dispatch-execute loop.
//!
//! A host application installs its instruction set once, before the first
//! run, and then executes any number of code buffers sequentially against
//! contexts of its choosing. The interpreter itself never inspects the
//! context; it only threads it through to handlers. An `Interpreter` is
//! deliberately not `Clone`: duplicating the handler registry and any saved
//! frames has no meaning.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

#[cfg(feature = "trace_computation")]
use prettytable::{format as TableFormat, Table};

use crate::bytecode::{try_decode_instruction, Instruction, Segment, Word};
#[cfg(feature = "trace_computation")]
use crate::data::Data;
use crate::error::Error;
use crate::opcodes::{Flow, Opcode0, Opcode1, Opcode2};
use crate::runtime::{Frame, Runtime};

/// Scripts that recurse without bound are a realistic failure mode, so call
/// depth is capped rather than left to exhaust memory.
pub const DEFAULT_CALL_DEPTH_LIMIT: usize = 1024;

pub struct Interpreter<C> {

  // Handler registries, one per segment //
  segment0: HashMap<Word, Box<dyn Opcode1<C>>>,
  segment1: HashMap<Word, Box<dyn Opcode2<C>>>,
  segment2: HashMap<Word, Box<dyn Opcode1<C>>>,
  segment3: HashMap<Word, Box<dyn Opcode1<C>>>,
  segment4: HashMap<Word, Box<dyn Opcode2<C>>>,
  segment5: HashMap<Word, Box<dyn Opcode0<C>>>,

  // Run state //
  call_stack: Vec<Frame>,
  call_depth_limit: usize,
  running: bool,

}

/// Binds `handler` to `opcode` in one segment's registry. The id must fit
/// the segment's opcode width, and rebinding an occupied id is rejected:
/// setup code that installs the same pair twice is a bug worth surfacing.
fn install<H>(
    table   : &mut HashMap<Word, H>,
    segment : Segment,
    opcode  : Word,
    handler : H
  ) -> Result<(), Error>
{
  if opcode >= segment.opcode_limit() {
    return Err(Error::OpcodeOutOfRange { segment, opcode });
  }
  match table.entry(opcode) {

    Entry::Vacant(entry) => {
      entry.insert(handler);
      Ok(())
    }

    Entry::Occupied(_entry) => Err(Error::DuplicateOpcode { segment, opcode })

  }
}

impl<C> Interpreter<C> {

  pub fn new() -> Interpreter<C> {
    Interpreter {
      segment0         :  HashMap::new(),
      segment1         :  HashMap::new(),
      segment2         :  HashMap::new(),
      segment3         :  HashMap::new(),
      segment4         :  HashMap::new(),
      segment5         :  HashMap::new(),
      call_stack       :  Vec::new(),
      call_depth_limit :  DEFAULT_CALL_DEPTH_LIMIT,
      running          :  false,
    }
  }

  pub fn set_call_depth_limit(&mut self, limit: usize) {
    self.call_depth_limit = limit;
  }

  /// Current subroutine nesting depth. Zero outside a run.
  pub fn call_depth(&self) -> usize {
    self.call_stack.len()
  }

  // region Handler installation

  /// Add a segment 0 instruction (6b opcode, 24b argument).
  pub fn install_segment0(&mut self, opcode: Word, handler: Box<dyn Opcode1<C>>)
    -> Result<(), Error>
  {
    install(&mut self.segment0, Segment::Zero, opcode, handler)
  }

  /// Add a segment 1 instruction (6b opcode, 12b argument, 12b argument).
  pub fn install_segment1(&mut self, opcode: Word, handler: Box<dyn Opcode2<C>>)
    -> Result<(), Error>
  {
    install(&mut self.segment1, Segment::One, opcode, handler)
  }

  /// Add a segment 2 instruction (10b opcode, 20b argument).
  pub fn install_segment2(&mut self, opcode: Word, handler: Box<dyn Opcode1<C>>)
    -> Result<(), Error>
  {
    install(&mut self.segment2, Segment::Two, opcode, handler)
  }

  /// Add a segment 3 instruction (18b opcode, 8b argument).
  pub fn install_segment3(&mut self, opcode: Word, handler: Box<dyn Opcode1<C>>)
    -> Result<(), Error>
  {
    install(&mut self.segment3, Segment::Three, opcode, handler)
  }

  /// Add a segment 4 instruction (10b opcode, 8b argument, 8b argument).
  pub fn install_segment4(&mut self, opcode: Word, handler: Box<dyn Opcode2<C>>)
    -> Result<(), Error>
  {
    install(&mut self.segment4, Segment::Four, opcode, handler)
  }

  /// Add a segment 5 instruction (26b opcode, no argument).
  pub fn install_segment5(&mut self, opcode: Word, handler: Box<dyn Opcode0<C>>)
    -> Result<(), Error>
  {
    install(&mut self.segment5, Segment::Five, opcode, handler)
  }

  // endregion

  // region Execution

  /**
    Executes `code` to completion or fatal abort, threading `context` through
    to every handler. The call stack is empty on entry and on exit, whether
    the run terminated normally (a handler returned [`Flow::Halt`], or
    [`Flow::Return`] with no suspended frame) or aborted with an error.

    A single interpreter may run many buffers sequentially; the handler
    registry persists across runs. Overlapping runs are unrepresentable: the
    receiver is exclusive and handlers never see the interpreter, only the
    current frame and the context.
  */
  pub fn run(&mut self, code: &[Word], context: &mut C) -> Result<(), Error> {
    debug_assert!(!self.running, "run invoked while a run is in progress");
    self.running = true;
    let result = self.run_loop(code, context);
    self.call_stack.clear();
    self.running = false;
    result
  }

  fn run_loop(&mut self, code: &[Word], context: &mut C) -> Result<(), Error> {
    let mut runtime = Runtime::new(code);

    loop {
      let at = runtime.pc();
      let word = runtime.fetch()?;
      let instruction =
        match try_decode_instruction(word) {
          Some(instruction) => instruction,
          None => return Err(Error::UnknownSegment { code: word, pc: at })
        };

      #[cfg(feature = "trace_computation")] self.trace(&runtime, &instruction, at);

      match self.dispatch(&mut runtime, word, &instruction, context, at)? {

        Flow::Continue => {}

        Flow::Call(entry) => {
          if self.call_stack.len() >= self.call_depth_limit {
            return Err(Error::CallDepthExceeded { limit: self.call_depth_limit, pc: at });
          }
          self.call_stack.push(runtime.suspend(entry));
        }

        Flow::Return => {
          match self.call_stack.pop() {
            Some(frame) => runtime.resume(frame),
            None        => return Ok(())
          }
        }

        Flow::Halt => return Ok(())

      }
    }
  }

  /// Routes one decoded instruction to its installed handler. A lookup miss
  /// is an unknown opcode in a known segment; a segment arriving with the
  /// wrong argument shape would be a codec/registry mismatch and is reported
  /// as an unknown segment.
  fn dispatch(
      &self,
      runtime     : &mut Runtime<'_>,
      word        : Word,
      instruction : &Instruction,
      context     : &mut C,
      at          : usize
    ) -> Result<Flow, Error>
  {
    match *instruction {

      Instruction::Unary { segment, opcode, arg } => {
        let table = match segment {
          Segment::Zero  => &self.segment0,
          Segment::Two   => &self.segment2,
          Segment::Three => &self.segment3,
          _              => return Err(Error::UnknownSegment { code: word, pc: at })
        };
        match table.get(&opcode) {
          Some(handler) => handler.execute(runtime, arg, context),
          None          => Err(Error::UnknownOpcode { segment, opcode, pc: at })
        }
      }

      Instruction::Binary { segment, opcode, arg0, arg1 } => {
        let table = match segment {
          Segment::One  => &self.segment1,
          Segment::Four => &self.segment4,
          _             => return Err(Error::UnknownSegment { code: word, pc: at })
        };
        match table.get(&opcode) {
          Some(handler) => handler.execute(runtime, arg0, arg1, context),
          None          => Err(Error::UnknownOpcode { segment, opcode, pc: at })
        }
      }

      Instruction::Nullary { segment: Segment::Five, opcode } => {
        match self.segment5.get(&opcode) {
          Some(handler) => handler.execute(runtime, context),
          None          => Err(Error::UnknownOpcode { segment: Segment::Five, opcode, pc: at })
        }
      }

      Instruction::Nullary { .. } => Err(Error::UnknownSegment { code: word, pc: at })

    }
  }

  // endregion

  // region Trace display

  #[cfg(feature = "trace_computation")]
  fn make_stack_table(name: char, values: &[Data]) -> Table {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Slot", ubl->"Contents"]);

    for (i, value) in values.iter().enumerate().rev() {
      match i + 1 == values.len() {

        true  => {
          table.add_row(
            row![r->format!("* --> {}[{}] =", name, i), format!("{}", value)]
          );
        }

        false => {
          table.add_row(
            row![r->format!("{}[{}] =", name, i), format!("{}", value)]
          );
        }

      } // end match on highlight
    } // end for
    table
  }

  #[cfg(feature = "trace_computation")]
  fn trace(&self, runtime: &Runtime<'_>, instruction: &Instruction, at: usize) {
    println!(
      "[{:>4}] {}  (call depth {})",
      at,
      instruction,
      self.call_stack.len()
    );
    println!("{}", Interpreter::<C>::make_stack_table('S', runtime.stack()));
  }

  // endregion

}

impl<C> Default for Interpreter<C> {
  fn default() -> Interpreter<C> {
    Interpreter::new()
  }
}

#[cfg(feature = "trace_computation")]
lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}
