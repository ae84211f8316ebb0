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

//! Defines the error type for fallible constructors and accessors.
//!
//! Numeric degeneracy (a singular matrix, a zero-length vector) is never an
//! error: it propagates as `NaN` or infinity like any other IEEE value. Only
//! contract violations at construction or access time are reported here.

use std::num::ParseFloatError;

use crate::vector::VectorComponent;

/// An error raised when a value cannot be built or accessed as requested.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MathError {
    /// A slice did not hold the number of values a type needs.
    #[error("{target} requires exactly {expected} values, got {actual}")]
    InvalidLength {
        /// The type that was being constructed.
        target: &'static str,
        /// The number of values the type needs.
        expected: usize,
        /// The number of values that were provided.
        actual: usize,
    },
    /// A component name does not exist on a vector of this width.
    #[error("component {component:?} does not exist on {target}")]
    InvalidComponent {
        /// The vector type that was accessed.
        target: &'static str,
        /// The component that was requested.
        component: VectorComponent,
    },
    /// A string could not be parsed as a half-precision value.
    #[error("invalid half-precision literal: {0}")]
    ParseHalf(#[from] ParseFloatError),
}
