// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Provides [`Half`], an IEEE-754 binary16 floating-point value.
//!
//! Conversions from `f32` and `f64` round to nearest, ties to even, and
//! handle denormals, signed zeros, infinities and NaN at the bit level.
//! Arithmetic is performed by widening to `f32`, operating, and rounding
//! back. This double rounding is not bit-exact with a native fp16 unit for
//! every input.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};
use std::str::FromStr;

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::error::MathError;

const SIGN_MASK: u16 = 0x8000;
const EXPONENT_SHIFT: u32 = 10;
const EXPONENT_MASK: u16 = 0x1f;
const SIGNIFICAND_MASK: u16 = 0x3ff;
const EXPONENT_BIAS: i32 = 15;
const ABS_MASK: u16 = 0x7fff;
const CANONICAL_NAN: u16 = 0x7e00;
const INFINITY_BITS: u16 = 0x7c00;

/// A 16-bit IEEE-754 floating-point value (1 sign bit, 5 exponent bits,
/// 10 significand bits).
///
/// `Half` is ordered with [`Ord`]: every NaN collapses to a single canonical
/// NaN that sorts above `+∞`, and `-0 < +0`. Use the `ieee_*` predicates for
/// IEEE comparison semantics.
#[derive(
    Clone,
    Copy,
    Default,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
    Encode,
    Decode,
)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Half(u16);

impl Half {
    /// Positive zero.
    pub const ZERO: Half = Half(0x0000);
    /// Negative zero.
    pub const NEG_ZERO: Half = Half(0x8000);
    /// `1.0`.
    pub const ONE: Half = Half(0x3c00);
    /// `-1.0`.
    pub const NEG_ONE: Half = Half(0xbc00);
    /// Difference between `1.0` and the next representable value (`2⁻¹⁰`).
    pub const EPSILON: Half = Half(0x1400);
    /// Smallest positive denormal value (`2⁻²⁴`).
    pub const MIN_POSITIVE: Half = Half(0x0001);
    /// Smallest positive normal value (`2⁻¹⁴`).
    pub const MIN_POSITIVE_NORMAL: Half = Half(0x0400);
    /// Largest finite value (`65504`).
    pub const MAX: Half = Half(0x7bff);
    /// Most negative finite value (`-65504`).
    pub const LOWEST: Half = Half(0xfbff);
    /// Positive infinity.
    pub const INFINITY: Half = Half(INFINITY_BITS);
    /// Negative infinity.
    pub const NEG_INFINITY: Half = Half(0xfc00);
    /// Canonical quiet NaN.
    pub const NAN: Half = Half(CANONICAL_NAN);
    /// Minimum unbiased exponent of a normal value.
    pub const MIN_EXP: i32 = -14;
    /// Maximum unbiased exponent of a finite value.
    pub const MAX_EXP: i32 = 15;
    /// Size of the representation in bits.
    pub const BITS: u32 = 16;

    /// Builds a `Half` from its raw bit pattern.
    #[inline]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Returns the raw bit pattern.
    #[inline]
    pub const fn to_bits(self) -> u16 {
        self.0
    }

    /// Converts an `f32` to the nearest `Half`, ties to even.
    ///
    /// NaN becomes a quiet NaN with the sign preserved, values that round to
    /// `65520` or above saturate to infinity, and values below half of
    /// [`Half::MIN_POSITIVE`] flush to a signed zero.
    pub fn from_f32(value: f32) -> Self {
        let bits = value.to_bits();
        let sign = (bits >> 31) as u16;
        let mut exponent = ((bits >> 23) & 0xff) as i32;
        let significand = bits & 0x007f_ffff;

        let mut out_e = 0u32;
        let mut out_m = 0u32;

        if exponent == 0xff {
            out_e = 0x1f;
            out_m = if significand != 0 { 0x200 } else { 0 };
        } else {
            exponent = exponent - 127 + EXPONENT_BIAS;
            if exponent >= 0x1f {
                out_e = 0x1f;
            } else if exponent <= 0 {
                // Denormal, or small enough to flush.
                if exponent >= -10 {
                    let m = significand | 0x0080_0000;
                    let shift = (14 - exponent) as u32;
                    out_m = m >> shift;

                    let lowest = m & ((1 << shift) - 1);
                    let halfway = 1 << (shift - 1);
                    if lowest + (out_m & 1) > halfway {
                        out_m += 1;
                    }
                }
            } else {
                out_e = exponent as u32;
                out_m = significand >> 13;
                if (significand & 0x1fff) + (out_m & 1) > 0x1000 {
                    out_m += 1;
                }
            }
        }

        // A significand carry propagates into the exponent, possibly up to infinity.
        Self((sign << 15) | ((out_e << EXPONENT_SHIFT) + out_m) as u16)
    }

    /// Converts an `f64` to the nearest `Half`, ties to even.
    ///
    /// The conversion reads the `f64` bits directly, so the value is rounded
    /// once rather than through an intermediate `f32`.
    pub fn from_f64(value: f64) -> Self {
        let bits = value.to_bits();
        let sign = (bits >> 63) as u16;
        let mut exponent = ((bits >> 52) & 0x7ff) as i32;
        let significand = bits & 0x000f_ffff_ffff_ffff;

        let mut out_e = 0u64;
        let mut out_m = 0u64;

        if exponent == 0x7ff {
            out_e = 0x1f;
            out_m = if significand != 0 { 0x200 } else { 0 };
        } else {
            exponent = exponent - 1023 + EXPONENT_BIAS;
            if exponent >= 0x1f {
                out_e = 0x1f;
            } else if exponent <= 0 {
                if exponent >= -10 {
                    let m = significand | 0x0010_0000_0000_0000;
                    let shift = (43 - exponent) as u32;
                    out_m = m >> shift;

                    let lowest = m & ((1 << shift) - 1);
                    let halfway = 1 << (shift - 1);
                    if lowest + (out_m & 1) > halfway {
                        out_m += 1;
                    }
                }
            } else {
                out_e = exponent as u64;
                out_m = significand >> 42;
                if (significand & 0x3ff_ffff_ffff) + (out_m & 1) > 0x200_0000_0000 {
                    out_m += 1;
                }
            }
        }

        Self((sign << 15) | ((out_e << EXPONENT_SHIFT) + out_m) as u16)
    }

    /// Widens to `f32`. Every `Half` is exactly representable; a signaling
    /// NaN is quieted.
    pub fn to_f32(self) -> f32 {
        let bits = self.0 as u32;
        let sign = bits & 0x8000;
        let exponent = (bits >> EXPONENT_SHIFT) & 0x1f;
        let significand = bits & 0x3ff;

        if exponent == 0 {
            if significand == 0 {
                return f32::from_bits(sign << 16);
            }
            // Embed the denormal significand below a known exponent and
            // subtract that exponent's leading one.
            let magic = f32::from_bits(126 << 23);
            let value = f32::from_bits((126 << 23) + significand) - magic;
            return if sign != 0 { -value } else { value };
        }

        let mut out_m = significand << 13;
        let out_e = if exponent == 0x1f {
            if out_m != 0 {
                out_m |= 0x0040_0000;
            }
            0xff
        } else {
            exponent + 127 - EXPONENT_BIAS as u32
        };
        f32::from_bits((sign << 16) | (out_e << 23) | out_m)
    }

    /// Widens to `f64`. Exact for every non-NaN value.
    #[inline]
    pub fn to_f64(self) -> f64 {
        f64::from(self.to_f32())
    }

    // --- Classification ---

    /// Returns `true` for any NaN bit pattern.
    #[inline]
    pub const fn is_nan(self) -> bool {
        self.0 & ABS_MASK > INFINITY_BITS
    }

    /// Returns `true` for `+∞` or `-∞`.
    #[inline]
    pub const fn is_infinite(self) -> bool {
        self.0 & ABS_MASK == INFINITY_BITS
    }

    /// Returns `true` if the value is neither infinite nor NaN.
    #[inline]
    pub const fn is_finite(self) -> bool {
        self.0 & ABS_MASK < INFINITY_BITS
    }

    /// Returns `true` for `+0` and `-0`.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 & ABS_MASK == 0
    }

    /// Returns `true` if the value is neither zero, denormal, infinite nor NaN.
    #[inline]
    pub const fn is_normal(self) -> bool {
        let e = (self.0 >> EXPONENT_SHIFT) & EXPONENT_MASK;
        e != 0 && e != EXPONENT_MASK
    }

    /// Returns `true` if the sign bit is set, including for `-0` and negative NaNs.
    #[inline]
    pub const fn is_sign_negative(self) -> bool {
        self.0 & SIGN_MASK != 0
    }

    /// Returns the unbiased exponent. Zero and denormals report `MIN_EXP - 1`,
    /// infinities and NaN report `MAX_EXP + 1`.
    #[inline]
    pub const fn exponent(self) -> i32 {
        ((self.0 >> EXPONENT_SHIFT) & EXPONENT_MASK) as i32 - EXPONENT_BIAS
    }

    /// Returns the 10 stored significand bits.
    #[inline]
    pub const fn significand(self) -> u16 {
        self.0 & SIGNIFICAND_MASK
    }

    // --- Sign manipulation ---

    /// Clears the sign bit.
    #[inline]
    pub const fn abs(self) -> Self {
        Self(self.0 & ABS_MASK)
    }

    /// Returns `self` with the sign bit of `sign`.
    #[inline]
    pub const fn copysign(self, sign: Self) -> Self {
        Self((self.0 & ABS_MASK) | (sign.0 & SIGN_MASK))
    }

    /// Returns `±1` with the sign of `self`, `self` for zeros and NaN for NaN.
    #[inline]
    pub fn signum(self) -> Self {
        if self.is_nan() {
            Self::NAN
        } else if self.is_zero() {
            self
        } else {
            Self::ONE.copysign(self)
        }
    }

    /// Returns the square root, computed in `f32` and rounded back.
    #[inline]
    pub fn sqrt(self) -> Self {
        Self::from_f32(self.to_f32().sqrt())
    }

    // --- Rounding ---
    //
    // The four rounding operations work on the bit pattern. Values with
    // |x| >= 1024 have no fractional bits and pass through unchanged. A NaN
    // result is OR-ed with the canonical NaN bits, which matches how ARM64
    // quiets NaN operands.

    /// Rounds to the nearest integer, ties away from zero.
    pub fn round(self) -> Self {
        let bits = self.0 as u32;
        let abs = bits & ABS_MASK as u32;
        let mut result = bits;

        if abs < 0x3c00 {
            result &= SIGN_MASK as u32;
            if abs >= 0x3800 {
                result |= 0x3c00;
            }
        } else if abs < 0x6400 {
            let exp = 25 - (abs >> EXPONENT_SHIFT);
            let mask = (1 << exp) - 1;
            result += 1 << (exp - 1);
            result &= !mask;
        }

        Self::quiet_rounded(result as u16)
    }

    /// Rounds towards negative infinity.
    pub fn floor(self) -> Self {
        let bits = self.0 as i32;
        let abs = bits & ABS_MASK as i32;
        let mut result = bits;

        if abs < 0x3c00 {
            result &= SIGN_MASK as i32;
            if bits > 0x8000 {
                result |= 0x3c00;
            }
        } else if abs < 0x6400 {
            let exp = 25 - (abs >> EXPONENT_SHIFT);
            let mask = (1 << exp) - 1;
            result += mask & -(bits >> 15);
            result &= !mask;
        }

        Self::quiet_rounded(result as u16)
    }

    /// Rounds towards positive infinity.
    pub fn ceil(self) -> Self {
        let bits = self.0 as i32;
        let abs = bits & ABS_MASK as i32;
        let mut result = bits;

        if abs < 0x3c00 {
            result &= SIGN_MASK as i32;
            if bits >> 15 == 0 && abs != 0 {
                result |= 0x3c00;
            }
        } else if abs < 0x6400 {
            let exp = 25 - (abs >> EXPONENT_SHIFT);
            let mask = (1 << exp) - 1;
            result += mask & ((bits >> 15) - 1);
            result &= !mask;
        }

        Self::quiet_rounded(result as u16)
    }

    /// Rounds towards zero.
    pub fn trunc(self) -> Self {
        let bits = self.0 as u32;
        let abs = bits & ABS_MASK as u32;
        let mut result = bits;

        if abs < 0x3c00 {
            result &= SIGN_MASK as u32;
        } else if abs < 0x6400 {
            let exp = 25 - (abs >> EXPONENT_SHIFT);
            let mask = (1u32 << exp) - 1;
            result &= !mask;
        }

        Self::quiet_rounded(result as u16)
    }

    #[inline]
    fn quiet_rounded(bits: u16) -> Self {
        let h = Self(bits);
        if h.is_nan() {
            Self(bits | CANONICAL_NAN)
        } else {
            h
        }
    }

    // --- Comparison ---

    // Maps the sign-magnitude encoding onto a monotonic integer; -0 and +0
    // share key 0.
    #[inline]
    const fn ordered_key(self) -> i32 {
        if self.0 & SIGN_MASK != 0 {
            0x8000 - self.0 as i32
        } else {
            self.0 as i32
        }
    }

    // All NaNs collapse to the canonical NaN; signed so that -0 sorts below +0.
    #[inline]
    const fn canonical_key(self) -> i16 {
        if self.is_nan() {
            CANONICAL_NAN as i16
        } else {
            self.0 as i16
        }
    }

    /// IEEE equality: NaN is unequal to everything and `-0 == +0`.
    #[inline]
    pub const fn ieee_eq(self, other: Self) -> bool {
        if self.is_nan() || other.is_nan() {
            return false;
        }
        self.0 == other.0 || (self.0 | other.0) & ABS_MASK == 0
    }

    /// IEEE `<`; `false` if either operand is NaN.
    #[inline]
    pub const fn ieee_lt(self, other: Self) -> bool {
        if self.is_nan() || other.is_nan() {
            return false;
        }
        self.ordered_key() < other.ordered_key()
    }

    /// IEEE `<=`; `false` if either operand is NaN.
    #[inline]
    pub const fn ieee_le(self, other: Self) -> bool {
        if self.is_nan() || other.is_nan() {
            return false;
        }
        self.ordered_key() <= other.ordered_key()
    }

    /// IEEE `>`; `false` if either operand is NaN.
    #[inline]
    pub const fn ieee_gt(self, other: Self) -> bool {
        other.ieee_lt(self)
    }

    /// IEEE `>=`; `false` if either operand is NaN.
    #[inline]
    pub const fn ieee_ge(self, other: Self) -> bool {
        other.ieee_le(self)
    }

    /// Returns the smaller value. NaN if either operand is NaN;
    /// `min(-0, +0)` is `-0`.
    pub fn min(self, other: Self) -> Self {
        if self.is_nan() || other.is_nan() {
            return Self::NAN;
        }
        if (self.0 | other.0) & ABS_MASK == 0 {
            return if self.is_sign_negative() { self } else { other };
        }
        if self.ordered_key() < other.ordered_key() {
            self
        } else {
            other
        }
    }

    /// Returns the larger value. NaN if either operand is NaN;
    /// `max(-0, +0)` is `+0`.
    pub fn max(self, other: Self) -> Self {
        if self.is_nan() || other.is_nan() {
            return Self::NAN;
        }
        if (self.0 | other.0) & ABS_MASK == 0 {
            return if self.is_sign_negative() { other } else { self };
        }
        if self.ordered_key() > other.ordered_key() {
            self
        } else {
            other
        }
    }

    // --- Stepping ---

    /// Returns the next representable value towards `+∞`.
    pub fn next_up(self) -> Self {
        if self.is_nan() {
            Self::NAN
        } else if self.0 == INFINITY_BITS {
            self
        } else if self.is_zero() {
            Self::MIN_POSITIVE
        } else if self.is_sign_negative() {
            Self(self.0 - 1)
        } else {
            Self(self.0 + 1)
        }
    }

    /// Returns the next representable value towards `-∞`.
    pub fn next_down(self) -> Self {
        if self.is_nan() {
            Self::NAN
        } else if self.0 == Self::NEG_INFINITY.0 {
            self
        } else if self.is_zero() {
            -Self::MIN_POSITIVE
        } else if self.is_sign_negative() {
            Self(self.0 + 1)
        } else {
            Self(self.0 - 1)
        }
    }

    /// Returns the next representable value from `self` towards `target`,
    /// or `target` itself when both compare equal.
    pub fn next_towards(self, target: Self) -> Self {
        if self.is_nan() || target.is_nan() {
            Self::NAN
        } else if self.ieee_eq(target) {
            target
        } else if target.ieee_gt(self) {
            self.next_up()
        } else {
            self.next_down()
        }
    }

    /// Returns the distance between `|self|` and the next larger magnitude.
    ///
    /// `ulp(±MAX)` is `32` and `ulp(±∞)` is `+∞`.
    pub fn ulp(self) -> Self {
        if self.is_nan() {
            return Self::NAN;
        }
        if self.is_infinite() {
            return Self::INFINITY;
        }
        let magnitude = self.abs();
        if magnitude.0 == Self::MAX.0 {
            // 2^(15 - 10)
            return Self(0x5000);
        }
        magnitude.next_up() - magnitude
    }

    // --- Formatting ---

    /// Formats the value as a hexadecimal floating-point literal, for example
    /// `0x1.3ffp15` for [`Half::MAX`] or `0x0.1p-14` for
    /// [`Half::MIN_POSITIVE`].
    pub fn to_hex_string(self) -> String {
        let exponent = (self.0 >> EXPONENT_SHIFT) & EXPONENT_MASK;
        let significand = self.0 & SIGNIFICAND_MASK;

        if exponent == EXPONENT_MASK {
            return match (significand, self.is_sign_negative()) {
                (0, false) => "Infinity".to_string(),
                (0, true) => "-Infinity".to_string(),
                _ => "NaN".to_string(),
            };
        }

        let sign = if self.is_sign_negative() { "-" } else { "" };
        let digits = format!("{significand:x}");
        let digits = trim_hex_zeros(&digits);
        match (exponent, significand) {
            (0, 0) => format!("{sign}0x0.0p0"),
            (0, _) => format!("{sign}0x0.{digits}p{}", Self::MIN_EXP),
            _ => format!("{sign}0x1.{digits}p{}", exponent as i32 - EXPONENT_BIAS),
        }
    }
}

// Strips a trailing run of at least two zeros.
fn trim_hex_zeros(digits: &str) -> &str {
    let trimmed = digits.trim_end_matches('0');
    if digits.len() - trimmed.len() >= 2 {
        trimmed
    } else {
        digits
    }
}

// --- Trait implementations ---

impl PartialEq for Half {
    /// Equality consistent with [`Ord`]: all NaNs are equal, `-0 != +0`.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.canonical_key() == other.canonical_key()
    }
}

impl Eq for Half {}

impl PartialOrd for Half {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Half {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.ieee_lt(*other) {
            Ordering::Less
        } else if self.ieee_gt(*other) {
            Ordering::Greater
        } else {
            self.canonical_key().cmp(&other.canonical_key())
        }
    }
}

impl Hash for Half {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_key().hash(state);
    }
}

impl fmt::Debug for Half {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_f32(), f)
    }
}

impl fmt::Display for Half {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_f32(), f)
    }
}

impl FromStr for Half {
    type Err = MathError;

    /// Parses a decimal or special literal (`inf`, `NaN`) as an `f32` and
    /// narrows the result, matching `Half::from_f32(s.parse()?)`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f32 = s.trim().parse()?;
        Ok(Self::from_f32(value))
    }
}

impl From<Half> for f32 {
    #[inline]
    fn from(h: Half) -> Self {
        h.to_f32()
    }
}

impl From<Half> for f64 {
    #[inline]
    fn from(h: Half) -> Self {
        h.to_f64()
    }
}

impl Neg for Half {
    type Output = Self;
    /// Flips the sign bit, including on zeros and NaNs.
    #[inline]
    fn neg(self) -> Self::Output {
        Self(self.0 ^ SIGN_MASK)
    }
}

macro_rules! impl_half_binary_op {
    ($op:ident, $method:ident, $assign_op:ident, $assign_method:ident, $sym:tt) => {
        impl $op for Half {
            type Output = Self;
            #[inline]
            fn $method(self, rhs: Self) -> Self::Output {
                Self::from_f32(self.to_f32() $sym rhs.to_f32())
            }
        }

        impl $assign_op for Half {
            #[inline]
            fn $assign_method(&mut self, rhs: Self) {
                *self = *self $sym rhs;
            }
        }
    };
}

impl_half_binary_op!(Add, add, AddAssign, add_assign, +);
impl_half_binary_op!(Sub, sub, SubAssign, sub_assign, -);
impl_half_binary_op!(Mul, mul, MulAssign, mul_assign, *);
impl_half_binary_op!(Div, div, DivAssign, div_assign, /);
impl_half_binary_op!(Rem, rem, RemAssign, rem_assign, %);
