//! Small scalar helpers shared by gameplay and camera code.

use std::ops::{Add, Mul};

use crate::scalar::{Real, Scalar};

/// Single-precision π.
pub const PI: f32 = std::f32::consts::PI;

/// Wrap an angle in radians into `(-π, π]` by whole turns.
///
/// Non-finite input yields NaN.
pub fn wrap_angle<T: Real>(angle: T) -> T {
    let turn = T::PI + T::PI;
    let angle = angle.rem_euclid(turn);
    if angle > T::PI { angle - turn } else { angle }
}

/// `1`, `-1` or `0` according to the sign of `x`.
pub fn sign<T: Scalar>(x: T) -> T {
    if x > T::ZERO {
        T::ONE
    } else if x < T::ZERO {
        -T::ONE
    } else {
        T::ZERO
    }
}

/// Linear interpolation `a·(1−x) + b·x`. Works for scalars and vectors alike.
pub fn lerp<V, T>(a: V, b: V, x: T) -> V
where
    T: Scalar,
    V: Mul<T, Output = V> + Add<Output = V>,
{
    a * (T::ONE - x) + b * x
}

/// Saturate `x` to `[min, max]`.
pub fn clamp<T: PartialOrd>(x: T, min: T, max: T) -> T {
    if x > max {
        max
    } else if x < min {
        min
    } else {
        x
    }
}
