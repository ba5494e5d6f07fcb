//! The value type held by a runtime's evaluation stack. A `Data` is a raw 32
//! bit payload that handlers view as a signed integer or a float via bit
//! casts, mirroring how the code stream itself stores immediates. The machine
//! core never interprets the payload; only handlers assign it meaning.

use std::fmt::{Display, Formatter};

use crate::bytecode::Word;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Data(Word);

impl Data {

  pub fn from_word(value: Word) -> Data {
    Data(value)
  }

  pub fn from_int(value: i32) -> Data {
    Data(value as Word)
  }

  pub fn from_float(value: f32) -> Data {
    Data(value.to_bits())
  }

  pub fn as_word(self) -> Word {
    self.0
  }

  pub fn as_int(self) -> i32 {
    self.0 as i32
  }

  pub fn as_float(self) -> f32 {
    f32::from_bits(self.0)
  }

}

impl Display for Data {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{:#010X}", self.0)
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn int_round_trip(){
    for &value in &[0i32, 1, -1, i32::max_value(), i32::min_value()] {
      assert_eq!(Data::from_int(value).as_int(), value);
    }
  }

  #[test]
  fn float_round_trip(){
    for &value in &[0.0f32, 1.5, -2.25, f32::MAX, f32::MIN_POSITIVE] {
      assert_eq!(Data::from_float(value).as_float(), value);
    }
  }

  #[test]
  fn word_is_raw_payload(){
    assert_eq!(Data::from_word(0xDEAD_BEEF).as_word(), 0xDEAD_BEEF);
    assert_eq!(Data::from_int(-1).as_word(), 0xFFFF_FFFF);
  }
}
