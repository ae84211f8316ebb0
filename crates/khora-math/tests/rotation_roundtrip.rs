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

//! Round trips through the Euler / quaternion / matrix rotation pipeline.

use anyhow::Result;
use approx::{assert_relative_eq, relative_eq};
use khora_math::{Float3, Float4, Mat4, Quaternion, RotationsOrder};
use proptest::prelude::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn unit_quaternion() -> impl Strategy<Value = Quaternion> {
    (-1.0f32..1.0, -1.0f32..1.0, -1.0f32..1.0, -1.0f32..1.0)
        .prop_filter("length too small to normalize", |(x, y, z, w)| {
            x * x + y * y + z * z + w * w > 0.01
        })
        .prop_map(|(x, y, z, w)| Quaternion::new(x, y, z, w).normalize())
}

fn euler_input() -> impl Strategy<Value = (RotationsOrder, Float3)> {
    (
        prop::sample::select(RotationsOrder::ALL.to_vec()),
        -179.0f32..179.0,
        -85.0f32..85.0,
        -179.0f32..179.0,
    )
        .prop_map(|(order, yaw, pitch, roll)| {
            let mut d = Float3::ZERO;
            d[order.yaw()] = yaw;
            d[order.pitch()] = pitch;
            d[order.roll()] = roll;
            (order, d)
        })
}

#[test]
fn small_angles_round_trip_in_every_order() {
    init_logging();
    let d = Float3::new(1.0, 2.0, 3.0);
    for order in RotationsOrder::ALL {
        let m = Mat4::from_euler(d, order);
        assert_relative_eq!(m.euler_angles(order), d, epsilon = 1e-3);

        let q = Quaternion::from_euler(d, order);
        assert_relative_eq!(q.euler_angles(order), d, epsilon = 1e-3);
        assert_relative_eq!(Quaternion::from_mat4(&m), q, epsilon = 1e-5);
    }
}

#[test]
fn gimbal_lock_folds_roll_into_yaw() {
    init_logging();
    let d = Float3::new(10.0, 90.0, 0.0);

    let xyz = Mat4::from_euler(d, RotationsOrder::XYZ).euler_angles(RotationsOrder::XYZ);
    assert_relative_eq!(xyz, Float3::new(10.0, 90.0, 0.0), epsilon = 1e-3);

    let zyx = Mat4::from_euler(d, RotationsOrder::ZYX).euler_angles(RotationsOrder::ZYX);
    assert_relative_eq!(zyx, Float3::new(0.0, 90.0, -10.0), epsilon = 1e-3);
}

#[test]
fn default_order_is_shared_by_builders_and_decomposition() {
    let d = Float3::new(5.0, -15.0, 25.0);
    let order = RotationsOrder::default();
    let angles = Mat4::from_euler(d, order).euler_angles(order);
    assert_relative_eq!(angles, d, epsilon = 1e-3);
}

#[test]
fn singular_inverse_propagates_non_finite_values() {
    let m = Mat4::from_cols(
        Float4::new(1.0, 1.0, 0.0, 0.0),
        Float4::new(1.0, 1.0, 0.0, 0.0),
        Float4::new(0.0, 0.0, 1.0, 2.0),
        Float4::new(0.0, 0.0, 0.0, 1.0),
    );
    let inf = f32::INFINITY;
    let nan = f32::NAN;
    let expected = [
        [inf, -inf, nan, nan],
        [-inf, inf, nan, nan],
        [nan; 4],
        [nan; 4],
    ];

    let inverse = m.inverse();
    for (col, expected_col) in inverse.cols.iter().zip(expected.iter()) {
        for (actual, expected) in col.to_array().iter().zip(expected_col.iter()) {
            if expected.is_nan() {
                assert!(actual.is_nan(), "{inverse:?}");
            } else {
                assert_eq!(actual, expected, "{inverse:?}");
            }
        }
    }
}

#[test]
fn rotation_between_directions() -> Result<()> {
    init_logging();
    let from = Float3::new(1.0, 2.0, -0.5).normalize();
    let to = Float3::new(-3.0, 0.25, 1.0).normalize();

    let q = Quaternion::from_rotation(from, to);
    assert_relative_eq!(q * from, to, epsilon = 1e-5);

    let m = Mat4::of(&q.to_mat4().to_row_major_array())?;
    assert_relative_eq!((m * Float4::from_float3(from, 0.0)).xyz(), to, epsilon = 1e-5);

    let axis = Float3::new(0.0, 0.6, 0.8);
    let reversed = Quaternion::from_rotation(axis, -axis);
    assert_relative_eq!(reversed * axis, -axis, epsilon = 1e-5);
    Ok(())
}

#[test]
fn slerp_reaches_both_ends() {
    init_logging();
    let a = Quaternion::from_euler(Float3::new(10.0, 20.0, 30.0), RotationsOrder::ZYX);
    let b = Quaternion::from_euler(Float3::new(-120.0, 45.0, 170.0), RotationsOrder::ZYX);

    assert_relative_eq!(Quaternion::slerp(a, b, 0.0), a, epsilon = 1e-5);
    let end = Quaternion::slerp(a, b, 1.0);
    assert!(relative_eq!(end, b, epsilon = 1e-5) || relative_eq!(end, -b, epsilon = 1e-5));

    // Nearly identical inputs take the nlerp path.
    let c = Quaternion::from_euler(Float3::new(10.0, 20.0, 30.5), RotationsOrder::ZYX);
    assert_relative_eq!(Quaternion::slerp(a, c, 0.5).length(), 1.0, epsilon = 1e-5);
}

proptest! {
    #[test]
    fn quaternion_survives_matrix_round_trip(q in unit_quaternion()) {
        let back = Quaternion::from_mat4(&Mat4::from_quat(q));
        let back = if back.dot(q) < 0.0 { -back } else { back };
        prop_assert!(relative_eq!(back, q, epsilon = 1e-4), "{:?} -> {:?}", q, back);
    }

    #[test]
    fn euler_decomposition_rebuilds_the_matrix((order, d) in euler_input()) {
        let m = Mat4::from_euler(d, order);
        let rebuilt = Mat4::from_euler(m.euler_angles(order), order);
        prop_assert!(relative_eq!(rebuilt, m, epsilon = 1e-4), "{:?} {:?}", order, d);
    }

    #[test]
    fn quaternion_and_matrix_builders_agree((order, d) in euler_input()) {
        let from_q = Quaternion::from_euler(d, order).to_mat4();
        prop_assert!(relative_eq!(from_q, Mat4::from_euler(d, order), epsilon = 1e-4));
    }

    #[test]
    fn slerp_stays_on_the_unit_sphere(a in unit_quaternion(), b in unit_quaternion(), t in 0.0f32..1.0) {
        let q = Quaternion::slerp(a, b, t);
        prop_assert!(relative_eq!(q.length(), 1.0, epsilon = 1e-4));
    }
}
