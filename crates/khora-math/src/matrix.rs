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

//! Defines the `Mat2`, `Mat3` and `Mat4` types and associated operations.
//!
//! All matrices are stored column-major. Inverses never check for
//! singularity: a zero determinant yields `±∞` and `NaN` entries.
//! Euler-angle construction and decomposition live in [`crate::rotation`].

use approx::{AbsDiffEq, RelativeEq};
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::error::MathError;
use crate::quaternion::Quaternion;
use crate::scalar::degrees_to_radians;
use crate::vector::{Float2, Float3, Float4};
use std::ops::{Index, IndexMut, Mul};

// Shared approx impls; every matrix compares column by column.
macro_rules! impl_matrix_approx {
    ($ty:ident) => {
        impl AbsDiffEq for $ty {
            type Epsilon = f32;

            fn default_epsilon() -> f32 {
                f32::EPSILON
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
                self.cols
                    .iter()
                    .zip(other.cols.iter())
                    .all(|(a, b)| a.abs_diff_eq(b, epsilon))
            }
        }

        impl RelativeEq for $ty {
            fn default_max_relative() -> f32 {
                f32::EPSILON
            }

            fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
                self.cols
                    .iter()
                    .zip(other.cols.iter())
                    .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
            }
        }
    };
}

// --- Mat2 ---

/// A 2x2 column-major matrix.
#[derive(
    Debug,
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
pub struct Mat2 {
    /// The columns of the matrix.
    pub cols: [Float2; 2],
}

impl Mat2 {
    /// The 2x2 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [Float2::X, Float2::Y],
    };

    /// A 2x2 matrix with all elements set to 0.
    pub const ZERO: Self = Self {
        cols: [Float2::ZERO; 2],
    };

    /// Creates a new matrix from two column vectors.
    #[inline]
    pub const fn from_cols(c0: Float2, c1: Float2) -> Self {
        Self { cols: [c0, c1] }
    }

    /// Builds a matrix from exactly 4 values given in row-major order.
    pub fn of(values: &[f32]) -> Result<Self, MathError> {
        let a = <&[f32; 4]>::try_from(values).map_err(|_| MathError::InvalidLength {
            target: "Mat2",
            expected: 4,
            actual: values.len(),
        })?;
        Ok(Self::from_cols(Float2::new(a[0], a[2]), Float2::new(a[1], a[3])))
    }

    /// Returns a row of the matrix as a `Float2`.
    #[inline]
    pub fn row(&self, index: usize) -> Float2 {
        Float2::new(self.cols[0][index], self.cols[1][index])
    }

    /// Computes the determinant of the matrix.
    #[inline]
    pub fn determinant(&self) -> f32 {
        self.cols[0].x * self.cols[1].y - self.cols[1].x * self.cols[0].y
    }

    /// Returns the transpose of the matrix.
    #[inline]
    pub fn transpose(&self) -> Self {
        Self::from_cols(self.row(0), self.row(1))
    }

    /// Computes the inverse of the matrix. A singular matrix yields
    /// non-finite entries.
    pub fn inverse(&self) -> Self {
        let [a, b] = self.cols;
        let det = self.determinant();
        Self::from_cols(Float2::new(b.y, -a.y) / det, Float2::new(-b.x, a.x) / det)
    }

    /// Returns the elements in row-major order.
    pub fn to_row_major_array(&self) -> [f32; 4] {
        let [r0, r1] = [self.row(0), self.row(1)];
        [r0.x, r0.y, r1.x, r1.y]
    }

    /// Returns the elements in column-major (storage) order.
    pub fn to_col_major_array(&self) -> [f32; 4] {
        bytemuck::cast(*self)
    }
}

impl Default for Mat2 {
    /// Returns the 2x2 identity matrix.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Mat2> for Mat2 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Mat2) -> Self::Output {
        Self::from_cols(self * rhs.cols[0], self * rhs.cols[1])
    }
}

impl Mul<Float2> for Mat2 {
    type Output = Float2;
    #[inline]
    fn mul(self, v: Float2) -> Self::Output {
        self.cols[0] * v.x + self.cols[1] * v.y
    }
}

impl Index<usize> for Mat2 {
    type Output = Float2;
    /// Allows accessing a matrix column by index.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.cols[index]
    }
}

impl IndexMut<usize> for Mat2 {
    /// Allows mutably accessing a matrix column by index.
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.cols[index]
    }
}

impl_matrix_approx!(Mat2);

// --- Mat3 ---

/// A 3x3 column-major matrix.
///
/// Its primary role is as the upper-left rotation and scale part of a `Mat4`.
#[derive(
    Debug,
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
pub struct Mat3 {
    /// The columns of the matrix. `cols[0]` is the first column, and so on.
    pub cols: [Float3; 3],
}

impl Mat3 {
    /// The 3x3 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [Float3::X, Float3::Y, Float3::Z],
    };

    /// A 3x3 matrix with all elements set to 0.
    pub const ZERO: Self = Self {
        cols: [Float3::ZERO; 3],
    };

    /// Creates a new matrix from three column vectors.
    #[inline]
    pub const fn from_cols(c0: Float3, c1: Float3, c2: Float3) -> Self {
        Self { cols: [c0, c1, c2] }
    }

    /// Builds a matrix from exactly 9 values given in row-major order.
    pub fn of(values: &[f32]) -> Result<Self, MathError> {
        let a = <&[f32; 9]>::try_from(values).map_err(|_| MathError::InvalidLength {
            target: "Mat3",
            expected: 9,
            actual: values.len(),
        })?;
        Ok(Self::from_cols(
            Float3::new(a[0], a[3], a[6]),
            Float3::new(a[1], a[4], a[7]),
            Float3::new(a[2], a[5], a[8]),
        ))
    }

    /// Returns a row of the matrix as a `Float3`.
    #[inline]
    pub fn row(&self, index: usize) -> Float3 {
        Float3::new(self.cols[0][index], self.cols[1][index], self.cols[2][index])
    }

    /// Creates a 3D scaling matrix.
    #[inline]
    pub fn from_scale(scale: Float3) -> Self {
        Self {
            cols: [
                Float3::new(scale.x, 0.0, 0.0),
                Float3::new(0.0, scale.y, 0.0),
                Float3::new(0.0, 0.0, scale.z),
            ],
        }
    }

    /// Creates a rotation matrix from an axis and an angle.
    ///
    /// # Arguments
    ///
    /// * `axis`: The axis of rotation. It is normalized first.
    /// * `angle_degrees`: The angle of rotation in degrees.
    #[inline]
    pub fn from_axis_angle(axis: Float3, angle_degrees: f32) -> Self {
        let m = Mat4::from_axis_angle(axis, angle_degrees);
        Self::from_mat4(&m)
    }

    /// Creates a rotation matrix from a quaternion.
    /// The quaternion is normalized before conversion to ensure a valid rotation matrix.
    #[inline]
    pub fn from_quat(q: Quaternion) -> Self {
        Self::from_mat4(&Mat4::from_quat(q))
    }

    /// Creates a `Mat3` from the upper-left 3x3 corner of a [`Mat4`].
    /// This extracts the rotation and scale components, discarding translation.
    #[inline]
    pub fn from_mat4(m4: &Mat4) -> Self {
        Self::from_cols(m4.cols[0].xyz(), m4.cols[1].xyz(), m4.cols[2].xyz())
    }

    /// Computes the determinant of the matrix.
    #[inline]
    pub fn determinant(&self) -> f32 {
        let [c0, c1, c2] = self.cols;
        c0.x * (c1.y * c2.z - c2.y * c1.z) - c1.x * (c0.y * c2.z - c2.y * c0.z)
            + c2.x * (c0.y * c1.z - c1.y * c0.z)
    }

    /// Returns the transpose of the matrix, where rows and columns are swapped.
    #[inline]
    pub fn transpose(&self) -> Self {
        Self::from_cols(self.row(0), self.row(1), self.row(2))
    }

    /// Computes the inverse through the adjugate (cofactors of 2x2 minors)
    /// divided by the determinant.
    ///
    /// There is no singularity check: a zero determinant yields `±∞`/`NaN`.
    pub fn inverse(&self) -> Self {
        let [c0, c1, c2] = self.cols;
        let m00 = c1.y * c2.z - c2.y * c1.z;
        let m10 = c2.y * c0.z - c0.y * c2.z;
        let m20 = c0.y * c1.z - c1.y * c0.z;
        let det = c0.x * m00 + c1.x * m10 + c2.x * m20;

        let m01 = c2.x * c1.z - c1.x * c2.z;
        let m11 = c0.x * c2.z - c2.x * c0.z;
        let m21 = c1.x * c0.z - c0.x * c1.z;
        let m02 = c1.x * c2.y - c2.x * c1.y;
        let m12 = c2.x * c0.y - c0.x * c2.y;
        let m22 = c0.x * c1.y - c1.x * c0.y;

        Self::from_cols(
            Float3::new(m00, m10, m20) / det,
            Float3::new(m01, m11, m21) / det,
            Float3::new(m02, m12, m22) / det,
        )
    }

    /// Converts this `Mat3` into a [`Mat4`], preserving its values in the upper-left corner.
    /// The new fourth column and row are set to `(0, 0, 0, 1)`.
    #[inline]
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_cols(
            Float4::from_float3(self.cols[0], 0.0),
            Float4::from_float3(self.cols[1], 0.0),
            Float4::from_float3(self.cols[2], 0.0),
            Float4::W,
        )
    }

    /// Returns the elements in row-major order.
    pub fn to_row_major_array(&self) -> [f32; 9] {
        bytemuck::cast(self.transpose())
    }

    /// Returns the elements in column-major (storage) order.
    pub fn to_col_major_array(&self) -> [f32; 9] {
        bytemuck::cast(*self)
    }
}

// --- Operator Overloads ---

impl Default for Mat3 {
    /// Returns the 3x3 identity matrix.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Mat3> for Mat3 {
    type Output = Self;
    /// Multiplies this matrix by another `Mat3`.
    #[inline]
    fn mul(self, rhs: Mat3) -> Self::Output {
        Self::from_cols(self * rhs.cols[0], self * rhs.cols[1], self * rhs.cols[2])
    }
}

impl Mul<Float3> for Mat3 {
    type Output = Float3;
    /// Transforms a `Float3` by this matrix.
    #[inline]
    fn mul(self, v: Float3) -> Self::Output {
        self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z
    }
}

impl Index<usize> for Mat3 {
    type Output = Float3;
    /// Allows accessing a matrix column by index.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.cols[index]
    }
}

impl IndexMut<usize> for Mat3 {
    /// Allows mutably accessing a matrix column by index.
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.cols[index]
    }
}

impl_matrix_approx!(Mat3);

// --- Mat4 ---

/// A 4x4 column-major matrix, used for 3D affine transformations.
///
/// The columns of a rigid transform are the right, up and forward basis
/// vectors followed by the translation. It is also used for camera and
/// projection matrices.
#[derive(
    Debug,
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
pub struct Mat4 {
    /// The columns of the matrix. `cols[0]` is the first column, and so on.
    pub cols: [Float4; 4],
}

impl Mat4 {
    /// The 4x4 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [Float4::X, Float4::Y, Float4::Z, Float4::W],
    };

    /// A 4x4 matrix with all elements set to 0.
    pub const ZERO: Self = Self {
        cols: [Float4::ZERO; 4],
    };

    /// The conventional world up direction for [`Mat4::look_at`] (`+Z`).
    pub const LOOK_AT_UP: Float3 = Float3::Z;

    /// Creates a new matrix from four column vectors.
    #[inline]
    pub const fn from_cols(c0: Float4, c1: Float4, c2: Float4, c3: Float4) -> Self {
        Self {
            cols: [c0, c1, c2, c3],
        }
    }

    /// Builds a matrix from exactly 16 values given in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::InvalidLength`] for any other number of values.
    pub fn of(values: &[f32]) -> Result<Self, MathError> {
        let a = <&[f32; 16]>::try_from(values).map_err(|_| MathError::InvalidLength {
            target: "Mat4",
            expected: 16,
            actual: values.len(),
        })?;
        Ok(Self::from_cols(
            Float4::new(a[0], a[4], a[8], a[12]),
            Float4::new(a[1], a[5], a[9], a[13]),
            Float4::new(a[2], a[6], a[10], a[14]),
            Float4::new(a[3], a[7], a[11], a[15]),
        ))
    }

    /// Returns a row of the matrix as a `Float4`.
    #[inline]
    pub fn row(&self, index: usize) -> Float4 {
        Float4::new(
            self.cols[0][index],
            self.cols[1][index],
            self.cols[2][index],
            self.cols[3][index],
        )
    }

    /// The first basis vector (X axis of the transform).
    #[inline]
    pub fn right(&self) -> Float3 {
        self.cols[0].xyz()
    }

    /// The second basis vector (Y axis of the transform).
    #[inline]
    pub fn up(&self) -> Float3 {
        self.cols[1].xyz()
    }

    /// The third basis vector (Z axis of the transform).
    #[inline]
    pub fn forward(&self) -> Float3 {
        self.cols[2].xyz()
    }

    /// The translation stored in the fourth column.
    #[inline]
    pub fn position(&self) -> Float3 {
        self.cols[3].xyz()
    }

    /// Creates a translation matrix.
    ///
    /// # Arguments
    ///
    /// * `v`: The translation vector to apply.
    #[inline]
    pub fn from_translation(v: Float3) -> Self {
        Self {
            cols: [Float4::X, Float4::Y, Float4::Z, Float4::from_float3(v, 1.0)],
        }
    }

    /// Creates a non-uniform scaling matrix.
    #[inline]
    pub fn from_scale(scale: Float3) -> Self {
        Self {
            cols: [
                Float4::new(scale.x, 0.0, 0.0, 0.0),
                Float4::new(0.0, scale.y, 0.0, 0.0),
                Float4::new(0.0, 0.0, scale.z, 0.0),
                Float4::W,
            ],
        }
    }

    /// Creates a rotation matrix from an axis and an angle using Rodrigues'
    /// formula.
    ///
    /// # Arguments
    ///
    /// * `axis`: The axis of rotation. It is normalized first.
    /// * `angle_degrees`: The angle of rotation in degrees.
    pub fn from_axis_angle(axis: Float3, angle_degrees: f32) -> Self {
        let Float3 { x, y, z } = axis.normalize();
        let (s, c) = degrees_to_radians(angle_degrees).sin_cos();
        let d = 1.0 - c;

        Self::from_cols(
            Float4::new(x * x * d + c, y * x * d + z * s, z * x * d - y * s, 0.0),
            Float4::new(x * y * d - z * s, y * y * d + c, z * y * d + x * s, 0.0),
            Float4::new(x * z * d + y * s, y * z * d - x * s, z * z * d + c, 0.0),
            Float4::W,
        )
    }

    /// Creates a rotation matrix from a quaternion.
    /// The quaternion is normalized before conversion.
    pub fn from_quat(q: Quaternion) -> Self {
        let Quaternion { x, y, z, w } = q.normalize();
        let x2 = x + x;
        let y2 = y + y;
        let z2 = z + z;
        let xx = x * x2;
        let xy = x * y2;
        let xz = x * z2;
        let yy = y * y2;
        let yz = y * z2;
        let zz = z * z2;
        let wx = w * x2;
        let wy = w * y2;
        let wz = w * z2;

        Self::from_cols(
            Float4::new(1.0 - (yy + zz), xy + wz, xz - wy, 0.0),
            Float4::new(xy - wz, 1.0 - (xx + zz), yz + wx, 0.0),
            Float4::new(xz + wy, yz - wx, 1.0 - (xx + yy), 0.0),
            Float4::W,
        )
    }

    /// Returns the rotation part of the matrix: the three basis columns
    /// normalized to strip scale, without translation.
    pub fn extract_rotation(&self) -> Self {
        Self::from_cols(
            Float4::from_float3(self.right().normalize(), 0.0),
            Float4::from_float3(self.up().normalize(), 0.0),
            Float4::from_float3(self.forward().normalize(), 0.0),
            Float4::W,
        )
    }

    /// Returns the matrix that transforms normals for this transform.
    ///
    /// Each basis column is divided by its squared length, which inverts the
    /// scale while keeping the rotation; translation is removed.
    pub fn normal_matrix(&self) -> Self {
        let rescale = |v: Float3| Float4::from_float3(v / v.length_squared(), 0.0);
        Self::from_cols(
            rescale(self.right()),
            rescale(self.up()),
            rescale(self.forward()),
            Float4::W,
        )
    }

    /// Creates a right-handed OpenGL-style perspective projection (clip-space
    /// depth in `[-1, 1]`).
    ///
    /// # Arguments
    ///
    /// * `fov_degrees`: Vertical field of view in degrees.
    /// * `aspect_ratio`: Width divided by height of the viewport.
    /// * `near`: Distance to the near clipping plane.
    /// * `far`: Distance to the far clipping plane.
    pub fn perspective(fov_degrees: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (degrees_to_radians(fov_degrees) * 0.5).tan();
        let range = near - far;

        Self::from_cols(
            Float4::new(f / aspect_ratio, 0.0, 0.0, 0.0),
            Float4::new(0.0, f, 0.0, 0.0),
            Float4::new(0.0, 0.0, (far + near) / range, -1.0),
            Float4::new(0.0, 0.0, 2.0 * far * near / range, 0.0),
        )
    }

    /// Creates a right-handed OpenGL-style orthographic projection
    /// (clip-space depth in `[-1, 1]`).
    pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let rml = right - left;
        let tmb = top - bottom;
        let fmn = far - near;

        Self::from_cols(
            Float4::new(2.0 / rml, 0.0, 0.0, 0.0),
            Float4::new(0.0, 2.0 / tmb, 0.0, 0.0),
            Float4::new(0.0, 0.0, -2.0 / fmn, 0.0),
            Float4::new(
                -(right + left) / rml,
                -(top + bottom) / tmb,
                -(far + near) / fmn,
                1.0,
            ),
        )
    }

    /// Creates the transform of a camera placed at `eye` and looking at `target`.
    ///
    /// See [`Mat4::look_towards`]; [`Mat4::LOOK_AT_UP`] is the conventional `up`.
    #[inline]
    pub fn look_at(eye: Float3, target: Float3, up: Float3) -> Self {
        Self::look_towards(eye, target - eye, up)
    }

    /// Creates the transform of a camera placed at `eye` and looking along
    /// `forward`.
    ///
    /// The columns are `(right, up, -forward, eye)`: the camera looks down its
    /// own negative Z axis. Degenerate inputs (`forward` parallel to `up`, or
    /// zero) propagate `NaN`.
    pub fn look_towards(eye: Float3, forward: Float3, up: Float3) -> Self {
        let f = forward.normalize();
        let r = f.cross(up).normalize();
        let u = r.cross(f).normalize();

        Self::from_cols(
            Float4::from_float3(r, 0.0),
            Float4::from_float3(u, 0.0),
            Float4::from_float3(-f, 0.0),
            Float4::from_float3(eye, 1.0),
        )
    }

    /// Returns the transpose of the matrix, where rows and columns are swapped.
    #[inline]
    pub fn transpose(&self) -> Self {
        Self::from_cols(self.row(0), self.row(1), self.row(2), self.row(3))
    }

    /// Computes the determinant of the matrix.
    pub fn determinant(&self) -> f32 {
        let [c0, c1, c2, c3] = self.cols;

        let m00 = c1.y * (c2.z * c3.w - c3.z * c2.w) - c2.y * (c1.z * c3.w - c3.z * c1.w)
            + c3.y * (c1.z * c2.w - c2.z * c1.w);
        let m01 = c0.y * (c2.z * c3.w - c3.z * c2.w) - c2.y * (c0.z * c3.w - c3.z * c0.w)
            + c3.y * (c0.z * c2.w - c2.z * c0.w);
        let m02 = c0.y * (c1.z * c3.w - c3.z * c1.w) - c1.y * (c0.z * c3.w - c3.z * c0.w)
            + c3.y * (c0.z * c1.w - c1.z * c0.w);
        let m03 = c0.y * (c1.z * c2.w - c2.z * c1.w) - c1.y * (c0.z * c2.w - c2.z * c0.w)
            + c2.y * (c0.z * c1.w - c1.z * c0.w);

        c0.x * m00 - c1.x * m01 + c2.x * m02 - c3.x * m03
    }

    /// Computes the inverse by cofactor expansion over paired 2x2 products,
    /// divided by the determinant.
    ///
    /// There is no singularity check: a non-invertible matrix produces
    /// `±∞`/`NaN` entries rather than an error.
    pub fn inverse(&self) -> Self {
        let [x, y, z, w] = self.cols;

        // Products of the lower two rows.
        let p0 = z.z * w.w;
        let p1 = w.z * z.w;
        let p2 = y.z * w.w;
        let p3 = w.z * y.w;
        let p4 = y.z * z.w;
        let p5 = z.z * y.w;
        let p6 = x.z * w.w;
        let p7 = w.z * x.w;
        let p8 = x.z * z.w;
        let p9 = z.z * x.w;
        let p10 = x.z * y.w;
        let p11 = y.z * x.w;

        let c0 = Float4::new(
            (p0 * y.y + p3 * z.y + p4 * w.y) - (p1 * y.y + p2 * z.y + p5 * w.y),
            (p1 * x.y + p6 * z.y + p9 * w.y) - (p0 * x.y + p7 * z.y + p8 * w.y),
            (p2 * x.y + p7 * y.y + p10 * w.y) - (p3 * x.y + p6 * y.y + p11 * w.y),
            (p5 * x.y + p8 * y.y + p11 * z.y) - (p4 * x.y + p9 * y.y + p10 * z.y),
        );
        let c1 = Float4::new(
            (p1 * y.x + p2 * z.x + p5 * w.x) - (p0 * y.x + p3 * z.x + p4 * w.x),
            (p0 * x.x + p7 * z.x + p8 * w.x) - (p1 * x.x + p6 * z.x + p9 * w.x),
            (p3 * x.x + p6 * y.x + p11 * w.x) - (p2 * x.x + p7 * y.x + p10 * w.x),
            (p4 * x.x + p9 * y.x + p10 * z.x) - (p5 * x.x + p8 * y.x + p11 * z.x),
        );

        // Products of the upper two rows.
        let p0 = z.x * w.y;
        let p1 = w.x * z.y;
        let p2 = y.x * w.y;
        let p3 = w.x * y.y;
        let p4 = y.x * z.y;
        let p5 = z.x * y.y;
        let p6 = x.x * w.y;
        let p7 = w.x * x.y;
        let p8 = x.x * z.y;
        let p9 = z.x * x.y;
        let p10 = x.x * y.y;
        let p11 = y.x * x.y;

        let c2 = Float4::new(
            (p0 * y.w + p3 * z.w + p4 * w.w) - (p1 * y.w + p2 * z.w + p5 * w.w),
            (p1 * x.w + p6 * z.w + p9 * w.w) - (p0 * x.w + p7 * z.w + p8 * w.w),
            (p2 * x.w + p7 * y.w + p10 * w.w) - (p3 * x.w + p6 * y.w + p11 * w.w),
            (p5 * x.w + p8 * y.w + p11 * z.w) - (p4 * x.w + p9 * y.w + p10 * z.w),
        );
        let c3 = Float4::new(
            (p2 * z.z + p5 * w.z + p1 * y.z) - (p4 * w.z + p0 * y.z + p3 * z.z),
            (p8 * w.z + p0 * x.z + p7 * z.z) - (p6 * z.z + p9 * w.z + p1 * x.z),
            (p6 * y.z + p11 * w.z + p3 * x.z) - (p10 * w.z + p2 * x.z + p7 * y.z),
            (p10 * z.z + p4 * x.z + p9 * y.z) - (p8 * y.z + p11 * z.z + p5 * x.z),
        );

        let det = x.x * c0.x + y.x * c0.y + z.x * c0.z + w.x * c0.w;

        Self::from_cols(c0 / det, c1 / det, c2 / det, c3 / det)
    }

    /// Returns the elements in row-major order.
    pub fn to_row_major_array(&self) -> [f32; 16] {
        bytemuck::cast(self.transpose())
    }

    /// Returns the elements in column-major (storage) order.
    pub fn to_col_major_array(&self) -> [f32; 16] {
        bytemuck::cast(*self)
    }
}

// --- Operators Overloading ---

impl Default for Mat4 {
    /// Returns the 4x4 identity matrix.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Mat4> for Mat4 {
    type Output = Self;
    /// Multiplies this matrix by another `Mat4`. Note that matrix multiplication is not commutative.
    #[inline]
    fn mul(self, rhs: Mat4) -> Self::Output {
        Self::from_cols(
            self * rhs.cols[0],
            self * rhs.cols[1],
            self * rhs.cols[2],
            self * rhs.cols[3],
        )
    }
}

impl Mul<Float4> for Mat4 {
    type Output = Float4;
    /// Transforms a `Float4` by this matrix.
    #[inline]
    fn mul(self, rhs: Float4) -> Self::Output {
        self.cols[0] * rhs.x + self.cols[1] * rhs.y + self.cols[2] * rhs.z + self.cols[3] * rhs.w
    }
}

impl Index<usize> for Mat4 {
    type Output = Float4;
    /// Allows accessing a matrix column by index.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.cols[index]
    }
}

impl IndexMut<usize> for Mat4 {
    /// Allows mutably accessing a matrix column by index.
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.cols[index]
    }
}

impl_matrix_approx!(Mat4);

// --- Tests ---
