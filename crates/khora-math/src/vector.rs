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

//! Provides 2D, 3D and 4D `f32` vectors, boolean comparison masks, and the
//! GLSL-style operations defined on them.

use approx::{AbsDiffEq, RelativeEq};
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::error::MathError;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Not, Sub, SubAssign,
};

/// Names a vector component using any of the GLSL component sets.
///
/// `X`/`R`/`S` address the first component, `Y`/`G`/`T` the second,
/// `Z`/`B`/`P` the third and `W`/`A`/`Q` the fourth. Not every component
/// exists on every vector width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VectorComponent {
    /// First component (position).
    X,
    /// Second component (position).
    Y,
    /// Third component (position).
    Z,
    /// Fourth component (position).
    W,
    /// First component (color).
    R,
    /// Second component (color).
    G,
    /// Third component (color).
    B,
    /// Fourth component (color).
    A,
    /// First component (texture).
    S,
    /// Second component (texture).
    T,
    /// Third component (texture).
    P,
    /// Fourth component (texture).
    Q,
}

impl VectorComponent {
    /// Returns the storage slot this component aliases, from 0 to 3.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::X | Self::R | Self::S => 0,
            Self::Y | Self::G | Self::T => 1,
            Self::Z | Self::B | Self::P => 2,
            Self::W | Self::A | Self::Q => 3,
        }
    }
}

// Component-wise operators and GLSL helpers shared by every float vector.
macro_rules! impl_float_vector {
    ($ty:ident, $mask:ident, $len:literal, $($field:ident),+) => {
        impl $ty {
            /// Creates a vector with every component set to `v`.
            #[inline]
            pub const fn splat(v: f32) -> Self {
                Self { $($field: v),+ }
            }

            /// Creates a vector from an array of components.
            #[inline]
            pub const fn from_array(a: [f32; $len]) -> Self {
                let [$($field),+] = a;
                Self { $($field),+ }
            }

            /// Returns the components as an array.
            #[inline]
            pub const fn to_array(self) -> [f32; $len] {
                [$(self.$field),+]
            }

            /// Applies `f` to every component.
            #[inline]
            pub fn map(self, f: impl Fn(f32) -> f32) -> Self {
                Self { $($field: f(self.$field)),+ }
            }

            #[inline]
            fn zip_with(self, rhs: Self, f: impl Fn(f32, f32) -> f32) -> Self {
                Self { $($field: f(self.$field, rhs.$field)),+ }
            }

            /// Calculates the squared length (magnitude) of the vector.
            #[inline]
            pub fn length_squared(&self) -> f32 {
                self.dot(*self)
            }

            /// Calculates the length (magnitude) of the vector.
            #[inline]
            pub fn length(&self) -> f32 {
                self.length_squared().sqrt()
            }

            /// Calculates the distance between this vector and another.
            #[inline]
            pub fn distance(&self, other: Self) -> f32 {
                (*self - other).length()
            }

            /// Returns the vector scaled to a length of 1.
            ///
            /// A zero-length vector yields `NaN` components.
            #[inline]
            pub fn normalize(&self) -> Self {
                *self * (1.0 / self.length())
            }

            /// Returns a new vector with the absolute value of each component.
            #[inline]
            pub fn abs(self) -> Self {
                self.map(f32::abs)
            }

            /// Component-wise minimum.
            #[inline]
            pub fn min(self, rhs: Self) -> Self {
                self.zip_with(rhs, f32::min)
            }

            /// Component-wise maximum.
            #[inline]
            pub fn max(self, rhs: Self) -> Self {
                self.zip_with(rhs, f32::max)
            }

            /// Clamps every component to `[min, max]`.
            #[inline]
            pub fn clamp(self, min: f32, max: f32) -> Self {
                self.map(|v| crate::scalar::clamp(v, min, max))
            }

            /// Linearly blends towards `rhs` by `x` (unclamped).
            #[inline]
            pub fn mix(self, rhs: Self, x: f32) -> Self {
                self.zip_with(rhs, |a, b| crate::scalar::mix(a, b, x))
            }

            /// Reflects the incident vector `self` about the normal `n`.
            ///
            /// `n` should be normalized.
            #[inline]
            pub fn reflect(self, n: Self) -> Self {
                self - 2.0 * n.dot(self) * n
            }

            /// Refracts the incident vector `self` through a surface of normal
            /// `n` with the ratio of indices of refraction `eta`.
            ///
            /// Returns the zero vector on total internal reflection.
            #[inline]
            pub fn refract(self, n: Self, eta: f32) -> Self {
                let d = n.dot(self);
                let k = 1.0 - eta * eta * (1.0 - d * d);
                if k < 0.0 {
                    Self::splat(0.0)
                } else {
                    eta * self - (eta * d + k.sqrt()) * n
                }
            }

            /// Component-wise `<`.
            #[inline]
            pub fn less_than(self, rhs: Self) -> $mask {
                $mask { $($field: self.$field < rhs.$field),+ }
            }

            /// Component-wise `<=`.
            #[inline]
            pub fn less_than_equal(self, rhs: Self) -> $mask {
                $mask { $($field: self.$field <= rhs.$field),+ }
            }

            /// Component-wise `>`.
            #[inline]
            pub fn greater_than(self, rhs: Self) -> $mask {
                $mask { $($field: self.$field > rhs.$field),+ }
            }

            /// Component-wise `>=`.
            #[inline]
            pub fn greater_than_equal(self, rhs: Self) -> $mask {
                $mask { $($field: self.$field >= rhs.$field),+ }
            }

            /// Component-wise `==`.
            #[inline]
            pub fn equal(self, rhs: Self) -> $mask {
                $mask { $($field: self.$field == rhs.$field),+ }
            }

            /// Component-wise `!=`.
            #[inline]
            pub fn not_equal(self, rhs: Self) -> $mask {
                $mask { $($field: self.$field != rhs.$field),+ }
            }
        }

        impl Add for $ty {
            type Output = Self;
            #[inline]
            fn add(self, rhs: Self) -> Self::Output {
                Self { $($field: self.$field + rhs.$field),+ }
            }
        }

        impl Add<f32> for $ty {
            type Output = Self;
            #[inline]
            fn add(self, rhs: f32) -> Self::Output {
                Self { $($field: self.$field + rhs),+ }
            }
        }

        impl Sub for $ty {
            type Output = Self;
            #[inline]
            fn sub(self, rhs: Self) -> Self::Output {
                Self { $($field: self.$field - rhs.$field),+ }
            }
        }

        impl Sub<f32> for $ty {
            type Output = Self;
            #[inline]
            fn sub(self, rhs: f32) -> Self::Output {
                Self { $($field: self.$field - rhs),+ }
            }
        }

        impl Mul for $ty {
            type Output = Self;
            /// Multiplies two vectors component-wise.
            #[inline]
            fn mul(self, rhs: Self) -> Self::Output {
                Self { $($field: self.$field * rhs.$field),+ }
            }
        }

        impl Mul<f32> for $ty {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: f32) -> Self::Output {
                Self { $($field: self.$field * rhs),+ }
            }
        }

        impl Mul<$ty> for f32 {
            type Output = $ty;
            #[inline]
            fn mul(self, rhs: $ty) -> Self::Output {
                rhs * self
            }
        }

        impl Div for $ty {
            type Output = Self;
            /// Divides two vectors component-wise.
            #[inline]
            fn div(self, rhs: Self) -> Self::Output {
                Self { $($field: self.$field / rhs.$field),+ }
            }
        }

        impl Div<f32> for $ty {
            type Output = Self;
            #[inline]
            fn div(self, rhs: f32) -> Self::Output {
                Self { $($field: self.$field / rhs),+ }
            }
        }

        impl Div<$ty> for f32 {
            type Output = $ty;
            #[inline]
            fn div(self, rhs: $ty) -> Self::Output {
                $ty { $($field: self / rhs.$field),+ }
            }
        }

        impl Neg for $ty {
            type Output = Self;
            #[inline]
            fn neg(self) -> Self::Output {
                Self { $($field: -self.$field),+ }
            }
        }

        impl AddAssign for $ty {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl SubAssign for $ty {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl MulAssign<f32> for $ty {
            #[inline]
            fn mul_assign(&mut self, rhs: f32) {
                *self = *self * rhs;
            }
        }

        impl DivAssign<f32> for $ty {
            #[inline]
            fn div_assign(&mut self, rhs: f32) {
                *self = *self / rhs;
            }
        }

        impl AbsDiffEq for $ty {
            type Epsilon = f32;

            fn default_epsilon() -> f32 {
                f32::EPSILON
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
                $(self.$field.abs_diff_eq(&other.$field, epsilon))&&+
            }
        }

        impl RelativeEq for $ty {
            fn default_max_relative() -> f32 {
                f32::EPSILON
            }

            fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
                $(self.$field.relative_eq(&other.$field, epsilon, max_relative))&&+
            }
        }

        impl From<[f32; $len]> for $ty {
            #[inline]
            fn from(a: [f32; $len]) -> Self {
                Self::from_array(a)
            }
        }

        impl From<$ty> for [f32; $len] {
            #[inline]
            fn from(v: $ty) -> Self {
                v.to_array()
            }
        }

        impl Index<VectorComponent> for $ty {
            type Output = f32;
            /// # Panics
            /// Panics if the component does not exist on this vector width.
            #[inline]
            fn index(&self, component: VectorComponent) -> &Self::Output {
                let index = component.index();
                if index >= $len {
                    panic!(
                        "component {:?} does not exist on {}",
                        component,
                        stringify!($ty)
                    );
                }
                &self[index]
            }
        }

        impl IndexMut<VectorComponent> for $ty {
            /// # Panics
            /// Panics if the component does not exist on this vector width.
            #[inline]
            fn index_mut(&mut self, component: VectorComponent) -> &mut Self::Output {
                let index = component.index();
                if index >= $len {
                    panic!(
                        "component {:?} does not exist on {}",
                        component,
                        stringify!($ty)
                    );
                }
                &mut self[index]
            }
        }
    };
}

// Boolean masks returned by the component-wise comparisons.
macro_rules! impl_bool_vector {
    ($ty:ident, $($field:ident),+) => {
        impl $ty {
            /// Returns `true` if any component is `true`.
            #[inline]
            pub const fn any(self) -> bool {
                $(self.$field)||+
            }

            /// Returns `true` if every component is `true`.
            #[inline]
            pub const fn all(self) -> bool {
                $(self.$field)&&+
            }
        }

        impl Not for $ty {
            type Output = Self;
            #[inline]
            fn not(self) -> Self::Output {
                Self { $($field: !self.$field),+ }
            }
        }
    };
}

// --- Float2 ---

/// A 2-dimensional vector with `f32` components.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
    Encode,
    Decode,
)]
#[repr(C)]
pub struct Float2 {
    /// The x component of the vector.
    pub x: f32,
    /// The y component of the vector.
    pub y: f32,
}

impl Float2 {
    /// A vector with all components set to `0.0`.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    /// A vector with all components set to `1.0`.
    pub const ONE: Self = Self { x: 1.0, y: 1.0 };
    /// The unit vector pointing along the positive X-axis.
    pub const X: Self = Self { x: 1.0, y: 0.0 };
    /// The unit vector pointing along the positive Y-axis.
    pub const Y: Self = Self { x: 0.0, y: 1.0 };

    /// Creates a new `Float2` with the specified components.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculates the dot product of this vector and another.
    #[inline]
    pub fn dot(&self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y
    }

    /// Retrieves a component by name.
    pub fn component(&self, component: VectorComponent) -> Result<f32, MathError> {
        match component.index() {
            0 => Ok(self.x),
            1 => Ok(self.y),
            _ => Err(MathError::InvalidComponent {
                target: "Float2",
                component,
            }),
        }
    }
}

impl_float_vector!(Float2, Bool2, 2, x, y);

impl Index<usize> for Float2 {
    type Output = f32;
    /// Allows accessing a vector component by index (`v[0]`, `v[1]`).
    ///
    /// # Panics
    /// Panics if `index` is not 0 or 1.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Index out of bounds for Float2"),
        }
    }
}

impl IndexMut<usize> for Float2 {
    /// Allows mutably accessing a vector component by index (`v[0] = ...`).
    ///
    /// # Panics
    /// Panics if `index` is not 0 or 1.
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => panic!("Index out of bounds for Float2"),
        }
    }
}

// --- Float3 ---

/// A 3-dimensional vector with `f32` components.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
    Encode,
    Decode,
)]
#[repr(C)]
pub struct Float3 {
    /// The x component of the vector.
    pub x: f32,
    /// The y component of the vector.
    pub y: f32,
    /// The z component of the vector.
    pub z: f32,
}

impl Float3 {
    /// A vector with all components set to `0.0`.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    /// A vector with all components set to `1.0`.
    pub const ONE: Self = Self {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };
    /// The unit vector pointing along the positive X-axis.
    pub const X: Self = Self {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };
    /// The unit vector pointing along the positive Y-axis.
    pub const Y: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };
    /// The unit vector pointing along the positive Z-axis.
    pub const Z: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    /// Creates a new `Float3` with the specified components.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Creates a `Float3` from a `Float2` and a `z` component.
    #[inline]
    pub const fn from_float2(v: Float2, z: f32) -> Self {
        Self::new(v.x, v.y, z)
    }

    /// Returns the `[x, y]` components as a `Float2`.
    #[inline]
    pub const fn xy(&self) -> Float2 {
        Float2::new(self.x, self.y)
    }

    /// Calculates the dot product of this vector and another.
    #[inline]
    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Computes the cross product of this vector and another.
    #[inline]
    pub fn cross(&self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Retrieves a component by name.
    pub fn component(&self, component: VectorComponent) -> Result<f32, MathError> {
        match component.index() {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            _ => Err(MathError::InvalidComponent {
                target: "Float3",
                component,
            }),
        }
    }
}

impl_float_vector!(Float3, Bool3, 3, x, y, z);

impl Index<usize> for Float3 {
    type Output = f32;
    /// Allows accessing a vector component by index.
    /// # Panics
    /// Panics if `index` is not 0, 1, or 2.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Index out of bounds for Float3"),
        }
    }
}

impl IndexMut<usize> for Float3 {
    /// Allows mutably accessing a vector component by index.
    /// # Panics
    /// Panics if `index` is not 0, 1, or 2.
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Index out of bounds for Float3"),
        }
    }
}

// --- Float4 ---

/// A 4-dimensional vector with `f32` components, often used for homogeneous coordinates.
///
/// `Float4` represents points (`w`=1.0) and directions (`w`=0.0) in homogeneous
/// space, and is the column type of [`Mat4`](crate::Mat4).
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
    Encode,
    Decode,
)]
#[repr(C)]
pub struct Float4 {
    /// The x component of the vector.
    pub x: f32,
    /// The y component of the vector.
    pub y: f32,
    /// The z component of the vector.
    pub z: f32,
    /// The w component, used for homogeneous coordinates.
    pub w: f32,
}

impl Float4 {
    /// A vector with all components set to `0.0`.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 0.0,
    };
    /// A vector with all components set to `1.0`.
    pub const ONE: Self = Self {
        x: 1.0,
        y: 1.0,
        z: 1.0,
        w: 1.0,
    };
    /// The unit vector pointing along the positive X-axis.
    pub const X: Self = Self {
        x: 1.0,
        y: 0.0,
        z: 0.0,
        w: 0.0,
    };
    /// The unit vector pointing along the positive Y-axis.
    pub const Y: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
        w: 0.0,
    };
    /// The unit vector pointing along the positive Z-axis.
    pub const Z: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
        w: 0.0,
    };
    /// The unit vector pointing along the positive W-axis.
    pub const W: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Creates a new `Float4` with the specified components.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Creates a `Float4` from a `Float3` and a `w` component.
    #[inline]
    pub const fn from_float3(v: Float3, w: f32) -> Self {
        Self::new(v.x, v.y, v.z, w)
    }

    /// Returns the `[x, y]` components as a `Float2`.
    #[inline]
    pub const fn xy(&self) -> Float2 {
        Float2::new(self.x, self.y)
    }

    /// Returns the `[x, y, z]` components of the vector as a `Float3`, discarding `w`.
    #[inline]
    pub const fn xyz(&self) -> Float3 {
        Float3::new(self.x, self.y, self.z)
    }

    /// Calculates the dot product of this vector and another.
    #[inline]
    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Retrieves a component by name. Every component exists on a `Float4`.
    pub fn component(&self, component: VectorComponent) -> Result<f32, MathError> {
        Ok(self[component.index()])
    }
}

impl_float_vector!(Float4, Bool4, 4, x, y, z, w);

impl Index<usize> for Float4 {
    type Output = f32;
    /// Allows accessing a vector component by index.
    /// # Panics
    /// Panics if `index` is not between 0 and 3.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("Index out of bounds for Float4"),
        }
    }
}

impl IndexMut<usize> for Float4 {
    /// Allows mutably accessing a vector component by index.
    /// # Panics
    /// Panics if `index` is not between 0 and 3.
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            3 => &mut self.w,
            _ => panic!("Index out of bounds for Float4"),
        }
    }
}

// --- Boolean masks ---

/// The result of a component-wise comparison of two `Float2`.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode,
)]
pub struct Bool2 {
    /// The x component of the mask.
    pub x: bool,
    /// The y component of the mask.
    pub y: bool,
}

/// The result of a component-wise comparison of two `Float3`.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode,
)]
pub struct Bool3 {
    /// The x component of the mask.
    pub x: bool,
    /// The y component of the mask.
    pub y: bool,
    /// The z component of the mask.
    pub z: bool,
}

/// The result of a component-wise comparison of two `Float4`.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode,
)]
pub struct Bool4 {
    /// The x component of the mask.
    pub x: bool,
    /// The y component of the mask.
    pub y: bool,
    /// The z component of the mask.
    pub z: bool,
    /// The w component of the mask.
    pub w: bool,
}

impl_bool_vector!(Bool2, x, y);
impl_bool_vector!(Bool3, x, y, z);
impl_bool_vector!(Bool4, x, y, z, w);

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::{approx_eq, EPSILON};
    use approx::assert_relative_eq;

    #[test]
    fn test_float2_ops() {
        let a = Float2::new(1.0, 2.0);
        let b = Float2::new(3.0, 5.0);
        assert_eq!(a + b, Float2::new(4.0, 7.0));
        assert_eq!(b - a, Float2::new(2.0, 3.0));
        assert_eq!(a * 2.0, Float2::new(2.0, 4.0));
        assert_eq!(2.0 * a, Float2::new(2.0, 4.0));
        assert_eq!(a * b, Float2::new(3.0, 10.0));
        assert_eq!(b / 2.0, Float2::new(1.5, 2.5));
        assert_eq!(1.0 / Float2::new(2.0, 4.0), Float2::new(0.5, 0.25));
        assert_eq!(-a, Float2::new(-1.0, -2.0));
        assert_eq!(a + 1.0, Float2::new(2.0, 3.0));
        assert!(approx_eq(a.dot(b), 13.0));
    }

    #[test]
    fn test_constants() {
        assert_eq!(Float3::ZERO, Float3::new(0.0, 0.0, 0.0));
        assert_eq!(Float3::ONE, Float3::splat(1.0));
        assert_eq!(Float4::W, Float4::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(Float2::default(), Float2::ZERO);
    }

    #[test]
    fn test_assign_ops() {
        let mut v = Float3::new(1.0, 2.0, 3.0);
        v += Float3::ONE;
        v -= Float3::new(0.0, 1.0, 2.0);
        v *= 4.0;
        v /= 2.0;
        assert_eq!(v, Float3::new(4.0, 4.0, 4.0));
    }

    #[test]
    fn test_length_and_distance() {
        let v = Float3::new(3.0, 4.0, 0.0);
        assert!(approx_eq(v.length_squared(), 25.0));
        assert!(approx_eq(v.length(), 5.0));
        assert!(approx_eq(v.distance(Float3::ZERO), 5.0));
    }

    #[test]
    fn test_cross() {
        assert_eq!(Float3::X.cross(Float3::Y), Float3::Z);
        assert_eq!(Float3::Y.cross(Float3::Z), Float3::X);
        assert_eq!(Float3::Z.cross(Float3::X), Float3::Y);
        assert_eq!(Float3::Y.cross(Float3::X), -Float3::Z);
    }

    #[test]
    fn test_normalize() {
        let v = Float3::new(1.0, 2.0, 2.0).normalize();
        assert_relative_eq!(v.length(), 1.0, epsilon = EPSILON);
        assert_relative_eq!(v, Float3::new(1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0), epsilon = EPSILON);
    }

    #[test]
    fn test_normalize_zero_propagates_nan() {
        let n = Float3::ZERO.normalize();
        assert!(n.x.is_nan() && n.y.is_nan() && n.z.is_nan());
    }

    #[test]
    fn test_reflect() {
        let i = Float3::new(1.0, -1.0, 0.0);
        let r = i.reflect(Float3::Y);
        assert_relative_eq!(r, Float3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_refract() {
        // eta = 1 leaves the direction unchanged.
        let i = Float3::new(1.0, -1.0, 0.0).normalize();
        assert_relative_eq!(i.refract(Float3::Y, 1.0), i, epsilon = EPSILON);

        // Grazing ray leaving a dense medium is totally reflected.
        let grazing = Float3::new(1.0, -0.1, 0.0).normalize();
        assert_eq!(grazing.refract(Float3::Y, 1.5), Float3::ZERO);
    }

    #[test]
    fn test_min_max_clamp_mix() {
        let a = Float4::new(1.0, 5.0, -2.0, 0.5);
        let b = Float4::new(2.0, 3.0, -4.0, 0.5);
        assert_eq!(a.min(b), Float4::new(1.0, 3.0, -4.0, 0.5));
        assert_eq!(a.max(b), Float4::new(2.0, 5.0, -2.0, 0.5));
        assert_eq!(a.clamp(0.0, 1.0), Float4::new(1.0, 1.0, 0.0, 0.5));
        assert_eq!(a.mix(b, 0.5), Float4::new(1.5, 4.0, -3.0, 0.5));
        assert_eq!(a.abs(), Float4::new(1.0, 5.0, 2.0, 0.5));
    }

    #[test]
    fn test_comparisons() {
        let a = Float3::new(1.0, 2.0, 3.0);
        let b = Float3::new(1.0, 0.0, 4.0);
        let lt = a.less_than(b);
        assert_eq!(lt, Bool3 { x: false, y: false, z: true });
        assert!(lt.any());
        assert!(!lt.all());
        assert!(a.less_than_equal(a).all());
        assert!(a.greater_than_equal(a).all());
        assert!(!a.greater_than(a).any());
        assert_eq!(a.equal(b), Bool3 { x: true, y: false, z: false });
        assert_eq!(!a.equal(b), a.not_equal(b));
    }

    #[test]
    fn test_components() {
        let mut v = Float3::new(1.0, 2.0, 3.0);
        assert_eq!(v[VectorComponent::X], 1.0);
        assert_eq!(v[VectorComponent::G], 2.0);
        assert_eq!(v[VectorComponent::P], 3.0);
        v[VectorComponent::Z] = 9.0;
        assert_eq!(v.z, 9.0);
        assert_eq!(v.component(VectorComponent::B), Ok(9.0));
        assert_eq!(
            v.component(VectorComponent::W),
            Err(MathError::InvalidComponent {
                target: "Float3",
                component: VectorComponent::W,
            })
        );
        assert_eq!(
            Float2::new(1.0, 2.0).component(VectorComponent::Z),
            Err(MathError::InvalidComponent {
                target: "Float2",
                component: VectorComponent::Z,
            })
        );
        assert_eq!(
            Float4::new(1.0, 2.0, 3.0, 4.0).component(VectorComponent::Q),
            Ok(4.0)
        );
    }

    #[test]
    #[should_panic(expected = "component A does not exist on Float3")]
    fn test_component_out_of_range_panics() {
        let v = Float3::ONE;
        let _ = v[VectorComponent::A];
    }

    #[test]
    #[should_panic]
    fn test_float2_index_out_of_bounds() {
        let v = Float2::new(1.0, 2.0);
        let _ = v[2];
    }

    #[test]
    fn test_truncation_and_arrays() {
        let v = Float4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v.xyz(), Float3::new(1.0, 2.0, 3.0));
        assert_eq!(v.xy(), Float2::new(1.0, 2.0));
        assert_eq!(Float4::from_float3(v.xyz(), 4.0), v);
        assert_eq!(v.to_array(), [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(Float4::from([1.0, 2.0, 3.0, 4.0]), v);
        assert_eq!(Float3::from_float2(Float2::ONE, 2.0), Float3::new(1.0, 1.0, 2.0));
    }

    #[test]
    fn test_pod_layout() {
        let v = Float3::new(1.0, 2.0, 3.0);
        let raw: &[f32; 3] = bytemuck::cast_ref(&v);
        assert_eq!(raw, &[1.0, 2.0, 3.0]);
    }
}
