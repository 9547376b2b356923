//! Fixed-width bit containers.
//!
//! Every register, address, and control signal in the simulator is a `Bits<N>`:
//! a value of `N` bits (1 to 64) stored in a `u64` and kept masked to its width.
//! It provides:
//! 1. **Masked construction:** `new` truncates, `try_new` rejects out-of-width values.
//! 2. **Sub-ranges:** `range::<HI, LO, W>()` extracts bits `[LO..=HI]` as a `Bits<W>`,
//!    with the range and width checked when the call is monomorphized.
//! 3. **Range views:** `range_mut` returns a writable view whose writes land in the parent.
//! 4. **Extension:** sign and zero extension from an arbitrary bit position.
//! 5. **Wrapping arithmetic:** all operators wrap modulo `2^N`, mirroring hardware truncation.

use std::fmt;
use std::ops::{Add, BitAnd, BitOr, BitXor, Not, Shl, Shr, Sub};

use crate::common::error::BitsError;

/// A value of exactly `N` bits, where `1 <= N <= 64`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Bits<const N: u32>(u64);

/// Single bit.
pub type Bit = Bits<1>;
/// 2-bit mux selects.
pub type Bits2 = Bits<2>;
/// 3-bit register ids and condition-code triples.
pub type Bits3 = Bits<3>;
/// 6-bit control-store addresses.
pub type Bits6 = Bits<6>;
/// Bytes.
pub type Bits8 = Bits<8>;
/// LC-3b machine words.
pub type Word = Bits<16>;

/// Mask covering the low `width` bits.
const fn mask_for(width: u32) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

impl<const N: u32> Bits<N> {
    /// Width of this container in bits.
    pub const WIDTH: u32 = N;

    /// Mask covering every bit of the container.
    pub const MASK: u64 = mask_for(N);

    /// The all-zero value.
    pub const ZERO: Self = Self(0);

    /// Builds a value, truncating `value` to `N` bits.
    #[inline]
    pub const fn new(value: u64) -> Self {
        const { assert!(N >= 1 && N <= 64, "bit width must be in 1..=64") };
        Self(value & Self::MASK)
    }

    /// Builds a value, rejecting anything that does not fit in `N` bits.
    ///
    /// # Errors
    ///
    /// Returns [`BitsError::Overflow`] when `value` has bits set at or above `N`.
    pub const fn try_new(value: u64) -> Result<Self, BitsError> {
        if value & !Self::MASK != 0 {
            return Err(BitsError::Overflow { value, width: N });
        }
        Ok(Self::new(value))
    }

    /// Builds a value from a boolean (`1` or `0`).
    #[inline]
    pub const fn from_bool(bit: bool) -> Self {
        Self::new(bit as u64)
    }

    /// Parses an MSB-first string of exactly `N` `'0'`/`'1'` characters.
    ///
    /// # Errors
    ///
    /// Returns [`BitsError::LengthMismatch`] when the string is not `N` characters long and
    /// [`BitsError::InvalidDigit`] on any character other than `'0'` or `'1'`.
    pub fn from_bit_str(text: &str) -> Result<Self, BitsError> {
        let len = text.chars().count();
        if len != N as usize {
            return Err(BitsError::LengthMismatch {
                expected: N,
                found: len,
            });
        }
        let mut value = 0u64;
        for (position, c) in text.chars().enumerate() {
            let bit = match c {
                '0' => 0,
                '1' => 1,
                other => {
                    return Err(BitsError::InvalidDigit {
                        digit: other,
                        position,
                    });
                }
            };
            value = (value << 1) | bit;
        }
        Ok(Self::new(value))
    }

    /// Returns the raw value, always below `2^N`.
    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns the value as a `usize`, for table indexing.
    #[inline]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Interprets the value as an `N`-bit two's-complement integer.
    pub const fn to_signed(self) -> i64 {
        if N == 64 {
            return self.0 as i64;
        }
        let shift = 64 - N;
        ((self.0 << shift) as i64) >> shift
    }

    /// Returns `true` when every bit is clear.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Most significant bit.
    #[inline]
    pub const fn msb(self) -> bool {
        (self.0 >> (N - 1)) & 1 == 1
    }

    /// Reads bit `I`, with `I` checked against the width at compile time.
    #[inline]
    pub const fn at<const I: u32>(self) -> bool {
        const { assert!(I < N, "bit index out of range") };
        (self.0 >> I) & 1 == 1
    }

    /// Reads bit `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BitsError::IndexOutOfRange`] when `index >= N`.
    pub const fn bit(self, index: u32) -> Result<bool, BitsError> {
        if index >= N {
            return Err(BitsError::IndexOutOfRange { index, width: N });
        }
        Ok((self.0 >> index) & 1 == 1)
    }

    /// Writes bit `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BitsError::IndexOutOfRange`] when `index >= N`.
    pub const fn set_bit(&mut self, index: u32, bit: bool) -> Result<(), BitsError> {
        if index >= N {
            return Err(BitsError::IndexOutOfRange { index, width: N });
        }
        self.0 = (self.0 & !(1u64 << index)) | ((bit as u64) << index);
        Ok(())
    }

    /// Extracts bits `[LO..=HI]` as a `W`-bit value.
    ///
    /// `HI >= LO`, `HI < N` and `W == HI - LO + 1` are enforced when the call is
    /// instantiated, so `ir.range::<11, 9, 3>()` compiles and `ir.range::<11, 9, 4>()` does not.
    #[inline]
    pub const fn range<const HI: u32, const LO: u32, const W: u32>(self) -> Bits<W> {
        const {
            assert!(HI >= LO && HI < N, "range bounds out of order or out of width");
            assert!(W == HI - LO + 1, "range width does not match destination width");
        };
        Bits::<W>::new(self.0 >> LO)
    }

    /// Writes `value` into bits `[LO..=HI]`, leaving every other bit untouched.
    #[inline]
    pub const fn set_range<const HI: u32, const LO: u32, const W: u32>(&mut self, value: Bits<W>) {
        const {
            assert!(HI >= LO && HI < N, "range bounds out of order or out of width");
            assert!(W == HI - LO + 1, "range width does not match destination width");
        };
        let field = Bits::<W>::MASK << LO;
        self.0 = (self.0 & !field) | (value.0 << LO);
    }

    /// Borrows bits `[LO..=HI]` as a writable view.
    pub const fn range_mut<const HI: u32, const LO: u32, const W: u32>(
        &mut self,
    ) -> RangeMut<'_, N, W> {
        const {
            assert!(HI >= LO && HI < N, "range bounds out of order or out of width");
            assert!(W == HI - LO + 1, "range width does not match destination width");
        };
        RangeMut {
            parent: self,
            lo: LO,
        }
    }

    /// Replicates bit `from_bit` into every higher position.
    ///
    /// A `from_bit` at or past the top bit leaves the value unchanged.
    pub const fn sign_extend(self, from_bit: u32) -> Self {
        if from_bit + 1 >= N {
            return self;
        }
        let upper = Self::MASK & !mask_for(from_bit + 1);
        if (self.0 >> from_bit) & 1 == 1 {
            Self(self.0 | upper)
        } else {
            Self(self.0 & !upper)
        }
    }

    /// Clears every bit above `from_bit`.
    pub const fn zero_extend(self, from_bit: u32) -> Self {
        if from_bit + 1 >= N {
            return self;
        }
        Self(self.0 & mask_for(from_bit + 1))
    }

    /// Reinterprets the value at width `M`, zero-filling or truncating as needed.
    #[inline]
    pub const fn resize<const M: u32>(self) -> Bits<M> {
        Bits::<M>::new(self.0)
    }

    /// Renders the value MSB-first as exactly `N` binary digits.
    pub fn to_bit_string(self) -> String {
        format!("{:0width$b}", self.0, width = N as usize)
    }
}

impl<const N: u32> From<Bits<N>> for u64 {
    fn from(bits: Bits<N>) -> Self {
        bits.0
    }
}

impl From<bool> for Bit {
    fn from(bit: bool) -> Self {
        Self::from_bool(bit)
    }
}

/// Writable view over a sub-range of a parent `Bits<N>`.
#[derive(Debug)]
pub struct RangeMut<'a, const N: u32, const W: u32> {
    parent: &'a mut Bits<N>,
    lo: u32,
}

impl<const N: u32, const W: u32> RangeMut<'_, N, W> {
    /// Reads the viewed bits.
    pub const fn get(&self) -> Bits<W> {
        Bits::<W>::new(self.parent.0 >> self.lo)
    }

    /// Overwrites the viewed bits in the parent.
    pub const fn set(&mut self, value: Bits<W>) {
        let field = Bits::<W>::MASK << self.lo;
        self.parent.0 = (self.parent.0 & !field) | (value.0 << self.lo);
    }
}

/// Conversion to the smallest native unsigned integer that holds the width.
pub trait ToNative {
    /// `u8` for widths up to 8, `u16` up to 16, `u32` up to 32, otherwise `u64`.
    type Native;

    /// Returns the value as its native integer type.
    fn to_number(self) -> Self::Native;
}

macro_rules! impl_to_native {
    ($native:ty => $($width:literal)*) => {
        $(
            impl ToNative for Bits<$width> {
                type Native = $native;

                #[inline]
                fn to_number(self) -> $native {
                    self.0 as $native
                }
            }
        )*
    };
}

impl_to_native!(u8 => 1 2 3 4 5 6 7 8);
impl_to_native!(u16 => 9 10 11 12 13 14 15 16);
impl_to_native!(u32 => 17 18 19 20 21 22 23 24 25 26 27 28 29 30 31 32);
impl_to_native!(u64 => 33 34 35 36 37 38 39 40 41 42 43 44 45 46 47 48
    49 50 51 52 53 54 55 56 57 58 59 60 61 62 63 64);

impl<const N: u32> Add for Bits<N> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.0.wrapping_add(rhs.0))
    }
}

impl<const N: u32> Sub for Bits<N> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.0.wrapping_sub(rhs.0))
    }
}

impl<const N: u32> BitAnd for Bits<N> {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl<const N: u32> BitOr for Bits<N> {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl<const N: u32> BitXor for Bits<N> {
    type Output = Self;
    fn bitxor(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl<const N: u32> Not for Bits<N> {
    type Output = Self;
    fn not(self) -> Self {
        Self::new(!self.0)
    }
}

impl<const N: u32> Shl<u32> for Bits<N> {
    type Output = Self;
    fn shl(self, amount: u32) -> Self {
        if amount >= N {
            return Self::ZERO;
        }
        Self::new(self.0 << amount)
    }
}

impl<const N: u32> Shr<u32> for Bits<N> {
    type Output = Self;
    fn shr(self, amount: u32) -> Self {
        if amount >= N {
            return Self::ZERO;
        }
        Self(self.0 >> amount)
    }
}

impl<const N: u32> fmt::Debug for Bits<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bits<{N}>({:#x})", self.0)
    }
}

impl<const N: u32> fmt::Display for Bits<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl<const N: u32> fmt::LowerHex for Bits<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl<const N: u32> fmt::UpperHex for Bits<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

impl<const N: u32> fmt::Binary for Bits<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Binary::fmt(&self.0, f)
    }
}
