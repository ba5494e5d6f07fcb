/*!
  This module is responsible for the encoding and decoding of binary instructions.

*/
use std::convert::TryFrom;

use super::{Instruction, Segment};

// If you change this you must also change the `encode_segment*` functions and
// `try_decode_instruction`.
pub type Word = u32;

// Field masks per segment.
const ARG24_MASK:  Word = 0x00FF_FFFF;
const ARG20_MASK:  Word = 0x000F_FFFF;
const ARG12_MASK:  Word = 0x0000_0FFF;
const ARG8_MASK:   Word = 0x0000_00FF;
const OP6_MASK:    Word = 0x3F;
const OP10_MASK:   Word = 0x3FF;
const OP18_MASK:   Word = 0x0003_FFFF;
const OP26_MASK:   Word = 0x03FF_FFFF;

// Six bit selectors of the extended (`11`-prefixed) segments.
const SEGMENT3_SELECTOR: Word = 0x30;
const SEGMENT4_SELECTOR: Word = 0x31;
const SEGMENT5_SELECTOR: Word = 0x32;

/**
  Decodes an instruction word into its segment, opcode id, and argument
  fields. Returns `None` exactly when the word carries a segment selector
  that maps to no segment (top six bits in `110011..=111111`); every other
  word decodes to exactly one `Instruction`.

  Note that this function does not check whether a handler is installed for
  the decoded opcode id. That is a dispatch-time concern.
*/
pub fn try_decode_instruction(code: Word) -> Option<Instruction> {
  let number =
    match code >> 30 {
      0b11   => 3 + (((code >> 26) & 0x0F) as u8),
      prefix => prefix as u8
    };
  let segment = match Segment::try_from(number) {
    Ok(v) => v,
    Err(_e) => return None
  };

  let instruction =
    match segment {

      Segment::Zero =>
        // [00][opcode:6][arg:24]
        Instruction::Unary {
          segment,
          opcode: (code >> 24) & OP6_MASK,
          arg: code & ARG24_MASK
        },

      Segment::One =>
        // [01][opcode:6][arg:12][arg:12]
        Instruction::Binary {
          segment,
          opcode: (code >> 24) & OP6_MASK,
          arg0: (code >> 12) & ARG12_MASK,
          arg1: code & ARG12_MASK
        },

      Segment::Two =>
        // [10][opcode:10][arg:20]
        Instruction::Unary {
          segment,
          opcode: (code >> 20) & OP10_MASK,
          arg: code & ARG20_MASK
        },

      Segment::Three =>
        // [110000][opcode:18][arg:8]
        Instruction::Unary {
          segment,
          opcode: (code >> 8) & OP18_MASK,
          arg: code & ARG8_MASK
        },

      Segment::Four =>
        // [110001][opcode:10][arg:8][arg:8]
        Instruction::Binary {
          segment,
          opcode: (code >> 16) & OP10_MASK,
          arg0: (code >> 8) & ARG8_MASK,
          arg1: code & ARG8_MASK
        },

      Segment::Five =>
        // [110010][opcode:26]
        Instruction::Nullary {
          segment,
          opcode: code & OP26_MASK
        },

    };

  Some(instruction)
}

/**
  The `encode_segment*` functions pack pre-split (opcode id, argument) fields
  into an instruction word. Each field is masked to its width; it is the
  caller's responsibility to pass values within range.
*/
pub fn encode_segment0(opcode: Word, arg0: Word) -> Word {
  // [00][opcode:6][arg:24]
  ((opcode & OP6_MASK) << 24) | (arg0 & ARG24_MASK)
}

pub fn encode_segment1(opcode: Word, arg0: Word, arg1: Word) -> Word {
  // [01][opcode:6][arg:12][arg:12]
  (0b01 << 30)
    | ((opcode & OP6_MASK) << 24)
    | ((arg0 & ARG12_MASK) << 12)
    | (arg1 & ARG12_MASK)
}

pub fn encode_segment2(opcode: Word, arg0: Word) -> Word {
  // [10][opcode:10][arg:20]
  (0b10 << 30) | ((opcode & OP10_MASK) << 20) | (arg0 & ARG20_MASK)
}

pub fn encode_segment3(opcode: Word, arg0: Word) -> Word {
  // [110000][opcode:18][arg:8]
  (SEGMENT3_SELECTOR << 26) | ((opcode & OP18_MASK) << 8) | (arg0 & ARG8_MASK)
}

pub fn encode_segment4(opcode: Word, arg0: Word, arg1: Word) -> Word {
  // [110001][opcode:10][arg:8][arg:8]
  (SEGMENT4_SELECTOR << 26)
    | ((opcode & OP10_MASK) << 16)
    | ((arg0 & ARG8_MASK) << 8)
    | (arg1 & ARG8_MASK)
}

pub fn encode_segment5(opcode: Word) -> Word {
  // [110010][opcode:26]
  (SEGMENT5_SELECTOR << 26) | (opcode & OP26_MASK)
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn every_selector_decodes_or_is_rejected(){
    // Sweep all 64 possible six bit prefixes with arbitrary low bits.
    for selector in 0u32..64u32 {
      let word = (selector << 26) | 0x012_3456;
      let decoded = try_decode_instruction(word);
      match selector >> 4 {
        0b00 | 0b01 | 0b10 => assert!(decoded.is_some(), "selector {:#x}", selector),
        _ => {
          match selector {
            SEGMENT3_SELECTOR | SEGMENT4_SELECTOR | SEGMENT5_SELECTOR =>
              assert!(decoded.is_some(), "selector {:#x}", selector),
            _ =>
              assert!(decoded.is_none(), "selector {:#x}", selector)
          }
        }
      }
    }
  }

  #[test]
  fn decoded_arity_matches_segment(){
    let words = [
      encode_segment0(1, 2),
      encode_segment1(1, 2, 3),
      encode_segment2(1, 2),
      encode_segment3(1, 2),
      encode_segment4(1, 2, 3),
      encode_segment5(1),
    ];
    for word in words.iter() {
      let instruction = try_decode_instruction(*word).unwrap();
      let arity = match instruction {
        Instruction::Nullary { .. } => 0,
        Instruction::Unary   { .. } => 1,
        Instruction::Binary  { .. } => 2
      };
      assert_eq!(arity, instruction.segment().arity());
    }
  }

  #[test]
  fn round_trip_segment0(){
    for &(opcode, arg) in &[(0, 0), (1, 1), (0x3F, 0xFF_FFFF), (0x20, 0x80_0000)] {
      let word = encode_segment0(opcode, arg);
      assert_eq!(
        try_decode_instruction(word),
        Some(Instruction::Unary { segment: Segment::Zero, opcode, arg })
      );
    }
  }

  #[test]
  fn round_trip_segment1(){
    for &(opcode, arg0, arg1) in &[(0, 0, 0), (3, 0x123, 0xABC), (0x3F, 0xFFF, 0xFFF)] {
      let word = encode_segment1(opcode, arg0, arg1);
      assert_eq!(
        try_decode_instruction(word),
        Some(Instruction::Binary { segment: Segment::One, opcode, arg0, arg1 })
      );
    }
  }

  #[test]
  fn round_trip_segment2(){
    for &(opcode, arg) in &[(0, 0), (0x155, 0x5_5555), (0x3FF, 0xF_FFFF)] {
      let word = encode_segment2(opcode, arg);
      assert_eq!(
        try_decode_instruction(word),
        Some(Instruction::Unary { segment: Segment::Two, opcode, arg })
      );
    }
  }

  #[test]
  fn round_trip_segment3(){
    for &(opcode, arg) in &[(0, 0), (0x2_AAAA, 0x55), (0x3_FFFF, 0xFF)] {
      let word = encode_segment3(opcode, arg);
      assert_eq!(
        try_decode_instruction(word),
        Some(Instruction::Unary { segment: Segment::Three, opcode, arg })
      );
    }
  }

  #[test]
  fn round_trip_segment4(){
    for &(opcode, arg0, arg1) in &[(0, 0, 0), (0x2AA, 0x12, 0x34), (0x3FF, 0xFF, 0xFF)] {
      let word = encode_segment4(opcode, arg0, arg1);
      assert_eq!(
        try_decode_instruction(word),
        Some(Instruction::Binary { segment: Segment::Four, opcode, arg0, arg1 })
      );
    }
  }

  #[test]
  fn round_trip_segment5(){
    for &opcode in &[0, 1, 0x200_0000, 0x3FF_FFFF] {
      let word = encode_segment5(opcode);
      assert_eq!(
        try_decode_instruction(word),
        Some(Instruction::Nullary { segment: Segment::Five, opcode })
      );
    }
  }

  #[test]
  fn all_zeros_and_all_ones(){
    // The zero word is a valid segment 0 instruction.
    assert_eq!(
      try_decode_instruction(0),
      Some(Instruction::Unary { segment: Segment::Zero, opcode: 0, arg: 0 })
    );
    // The all-ones word carries selector 0b111111, which is no segment.
    assert_eq!(try_decode_instruction(Word::max_value()), None);
  }
}
