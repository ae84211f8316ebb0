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

//! # Khora Math
//!
//! Graphics math value types with GLSL-style operations: `Float2/3/4` vectors,
//! column-major `Mat2/3/4` matrices, `Quaternion` rotations, Euler angles in
//! six axis orders, and the `Half` binary16 float.
//!
//! Every type is a plain `Copy` value. Degenerate inputs (a singular matrix,
//! a zero-length vector) propagate `NaN` or infinity instead of failing; only
//! construction from slices, component lookup and parsing return a
//! [`MathError`].

#![warn(missing_docs)]

pub mod error;
pub mod half;
pub mod matrix;
pub mod quaternion;
pub mod rotation;
pub mod scalar;
pub mod vector;

pub use error::MathError;
pub use self::half::Half;
pub use matrix::{Mat2, Mat3, Mat4};
pub use quaternion::Quaternion;
pub use rotation::RotationsOrder;
pub use scalar::*;
pub use vector::{Bool2, Bool3, Bool4, Float2, Float3, Float4, VectorComponent};
