
use std::fmt::{Display, Formatter};

use strum_macros::Display as StrumDisplay;
use num_enum::{TryFromPrimitive, IntoPrimitive};

use crate::bytecode::Word;

/**
  The six instruction encoding segments of the virtual machine.

  Rust stores enum variants as bytes. As in C, enum values are represented by
  consecutive natural numbers and can be treated as numeric types. The
  discriminant of each variant below is the segment number carried in the
  high bits of an instruction word, so segment selection during decoding is a
  trivial numeric conversion. Consequently, the order the segments are listed
  below is significant.
  Order-dependencies:
      ```
      Segment::arity()
      Segment::opcode_limit()
      binary::try_decode_instruction()
      ```
*/
#[derive(
StrumDisplay, TryFromPrimitive, IntoPrimitive,
Clone,        Copy,             Eq, PartialEq, Debug, Hash
)]
#[repr(u8)]
pub enum Segment {
  // One argument segments //
  #[strum(serialize = "segment 0")]
  Zero,              // [00][opcode:6][arg:24]
  // Two argument segment
  #[strum(serialize = "segment 1")]
  One,               // [01][opcode:6][arg:12][arg:12]
  // One argument segments
  #[strum(serialize = "segment 2")]
  Two,               // [10][opcode:10][arg:20]
  #[strum(serialize = "segment 3")]
  Three,             // [110000][opcode:18][arg:8]
  // Two argument segment
  #[strum(serialize = "segment 4")]
  Four,              // [110001][opcode:10][arg:8][arg:8]
  // No argument segment
  #[strum(serialize = "segment 5")]
  Five,              // [110010][opcode:26]
}

impl Segment {
  pub fn number(&self) -> u8 {
    Into::<u8>::into(*self)
  }

  /// Number of argument fields packed into an instruction of this segment.
  pub fn arity(&self) -> u32 {
    match self {
      Segment::One | Segment::Four                  => 2,
      Segment::Zero | Segment::Two | Segment::Three => 1,
      Segment::Five                                 => 0
    }
  }

  /// One past the largest opcode id of this segment, i.e. 2^(opcode bits).
  pub fn opcode_limit(&self) -> Word {
    match self {
      Segment::Zero | Segment::One  => 0x40,
      Segment::Two  | Segment::Four => 0x400,
      Segment::Three                => 0x4_0000,
      Segment::Five                 => 0x400_0000
    }
  }
}

/// Holds the unencoded components of an instruction. As such, it enumerates
/// the possible instruction argument combinations.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Instruction {
  /// Segments 1 and 4
  Binary {
    segment: Segment,
    opcode: Word,
    arg0: Word,
    arg1: Word
  },
  /// Segments 0, 2, and 3
  Unary {
    segment: Segment,
    opcode: Word,
    arg: Word
  },
  /// Segment 5
  Nullary {
    segment: Segment,
    opcode: Word
  },
}

impl Instruction {
  pub fn segment(&self) -> Segment {
    match self {
      | Instruction::Binary  { segment, .. }
      | Instruction::Unary   { segment, .. }
      | Instruction::Nullary { segment, .. } => *segment
    }
  }

  pub fn opcode(&self) -> Word {
    match self {
      | Instruction::Binary  { opcode, .. }
      | Instruction::Unary   { opcode, .. }
      | Instruction::Nullary { opcode, .. } => *opcode
    }
  }
}

impl Display for Instruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self{

      Instruction::Binary{segment, opcode, arg0, arg1} => {
        write!(f, "{}:{:#x}({}, {})", segment, opcode, arg0, arg1)
      }

      Instruction::Unary{segment, opcode, arg} => {
        write!(f, "{}:{:#x}({})", segment, opcode, arg)
      }

      Instruction::Nullary{segment, opcode} => {
        write!(f, "{}:{:#x}", segment, opcode)
      }

    }
  }
}


#[cfg(test)]
mod tests {
  use std::convert::TryFrom;

  use super::*;

  #[test]
  fn segment_numbers_are_consecutive(){
    for number in 0u8..6u8 {
      let segment = Segment::try_from(number).unwrap();
      assert_eq!(segment.number(), number);
    }
    assert!(Segment::try_from(6u8).is_err());
  }

  #[test]
  fn opcode_limits_match_bit_widths(){
    assert_eq!(Segment::Zero.opcode_limit(),  1 << 6);
    assert_eq!(Segment::One.opcode_limit(),   1 << 6);
    assert_eq!(Segment::Two.opcode_limit(),   1 << 10);
    assert_eq!(Segment::Three.opcode_limit(), 1 << 18);
    assert_eq!(Segment::Four.opcode_limit(),  1 << 10);
    assert_eq!(Segment::Five.opcode_limit(),  1 << 26);
  }

  #[test]
  fn arity_by_segment(){
    assert_eq!(Segment::Zero.arity(),  1);
    assert_eq!(Segment::One.arity(),   2);
    assert_eq!(Segment::Two.arity(),   1);
    assert_eq!(Segment::Three.arity(), 1);
    assert_eq!(Segment::Four.arity(),  2);
    assert_eq!(Segment::Five.arity(),  0);
  }
}
