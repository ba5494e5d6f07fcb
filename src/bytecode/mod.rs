/*!

  The VM uses a 32 bit word size, and every instruction is exactly one word.
  The high bits of a word select one of six encoding segments; the remaining
  bits split into an opcode id and zero, one, or two argument fields of fixed
  width. The layouts are:

    Segment 0:  [00]    [opcode:6]  [arg:24]
    Segment 1:  [01]    [opcode:6]  [arg:12][arg:12]
    Segment 2:  [10]    [opcode:10] [arg:20]
    Segment 3:  [110000][opcode:18] [arg:8]
    Segment 4:  [110001][opcode:10] [arg:8][arg:8]
    Segment 5:  [110010][opcode:26]

  Words whose top six bits fall in `110011..=111111` belong to no segment and
  are rejected during decoding. An opcode id is only meaningful relative to
  its segment; the per-segment split between opcode and argument width trades
  opcode-space size against operand precision per instruction family, so that
  a large family of operand-free instructions (segment 5) coexists with
  wide-immediate (segments 0 and 2) and two-operand (segments 1 and 4) forms
  in a single fixed-width word.

  One design decision that needed to be made is whether decoding should fail
  on an opcode id that has no installed handler. It must not: the codec cannot
  know what the host application has installed, and keeping decoding a pure
  function of the word keeps it total over every word with a valid segment
  selector. A missing handler is a dispatch-time error reported by the
  interpreter, never a decode-time one.

*/

mod binary;
mod instruction;

pub use binary::{
  encode_segment0, encode_segment1, encode_segment2, encode_segment3,
  encode_segment4, encode_segment5, try_decode_instruction, Word,
};
pub use instruction::{Instruction, Segment};
