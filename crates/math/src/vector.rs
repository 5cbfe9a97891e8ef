//! Fixed-size N-dimensional vectors.
//!
//! # Invariants
//! - Storage is a single `[T; N]`; named accessors (`x`, `y`, `z`, `w`) index
//!   into it and exist only for N ∈ {2, 3, 4}.
//! - All arithmetic operators are componentwise.
//! - `normalize` divides by `length()` without checking for zero.

use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

use approx::{AbsDiffEq, RelativeEq};

use crate::scalar::{Real, Scalar};

/// An N-component vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector<T, const N: usize>(pub [T; N]);

pub type Vec2 = Vector<f32, 2>;
pub type Vec3 = Vector<f32, 3>;
pub type Vec4 = Vector<f32, 4>;

pub type Vec2d = Vector<f64, 2>;
pub type Vec3d = Vector<f64, 3>;
pub type Vec4d = Vector<f64, 4>;

pub type Vec2i = Vector<i32, 2>;
pub type Vec3i = Vector<i32, 3>;
pub type Vec4i = Vector<i32, 4>;

impl<T: Scalar, const N: usize> Vector<T, N> {
    /// Every component set to `value`.
    pub fn splat(value: T) -> Self {
        Self([value; N])
    }

    pub fn zero() -> Self {
        Self::splat(T::ZERO)
    }

    pub fn as_array(&self) -> &[T; N] {
        &self.0
    }

    pub fn into_array(self) -> [T; N] {
        self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    /// Apply `f` to every component.
    pub fn map(self, f: impl Fn(T) -> T) -> Self {
        Self(self.0.map(f))
    }

    /// `Σ self_i · other_i`
    pub fn dot(&self, other: &Self) -> T {
        self.0
            .iter()
            .zip(other.0.iter())
            .fold(T::ZERO, |sum, (&a, &b)| sum + a * b)
    }

    pub fn length_squared(&self) -> T {
        self.dot(self)
    }

    fn zip_with(self, other: Self, f: impl Fn(T, T) -> T) -> Self {
        Self(std::array::from_fn(|i| f(self.0[i], other.0[i])))
    }
}

impl<T: Real, const N: usize> Vector<T, N> {
    pub fn length(&self) -> T {
        self.length_squared().sqrt()
    }

    /// Scale to unit length in place. The caller guarantees `length() > 0`.
    pub fn normalize(&mut self) {
        let length = self.length();
        for c in self.0.iter_mut() {
            *c /= length;
        }
    }

    pub fn normalized(&self) -> Self {
        let mut v = *self;
        v.normalize();
        v
    }
}

impl<T: Scalar> Vector<T, 2> {
    pub fn new(x: T, y: T) -> Self {
        Self([x, y])
    }

    pub fn x(&self) -> T {
        self.0[0]
    }

    pub fn y(&self) -> T {
        self.0[1]
    }

    pub fn x_mut(&mut self) -> &mut T {
        &mut self.0[0]
    }

    pub fn y_mut(&mut self) -> &mut T {
        &mut self.0[1]
    }

    /// 2-D cross product: the z component of the 3-D cross of `(x, y, 0)` vectors.
    pub fn cross(&self, other: &Self) -> T {
        self.x() * other.y() - self.y() * other.x()
    }
}

impl<T: Scalar> Vector<T, 3> {
    pub fn new(x: T, y: T, z: T) -> Self {
        Self([x, y, z])
    }

    pub fn x(&self) -> T {
        self.0[0]
    }

    pub fn y(&self) -> T {
        self.0[1]
    }

    pub fn z(&self) -> T {
        self.0[2]
    }

    pub fn x_mut(&mut self) -> &mut T {
        &mut self.0[0]
    }

    pub fn y_mut(&mut self) -> &mut T {
        &mut self.0[1]
    }

    pub fn z_mut(&mut self) -> &mut T {
        &mut self.0[2]
    }

    /// Right-handed cross product.
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y() * other.z() - self.z() * other.y(),
            self.z() * other.x() - self.x() * other.z(),
            self.x() * other.y() - self.y() * other.x(),
        )
    }

    /// Homogeneous extension with the given `w`.
    pub fn extend(&self, w: T) -> Vector<T, 4> {
        Vector::<T, 4>::new(self.x(), self.y(), self.z(), w)
    }
}

impl<T: Scalar> Vector<T, 4> {
    pub fn new(x: T, y: T, z: T, w: T) -> Self {
        Self([x, y, z, w])
    }

    pub fn x(&self) -> T {
        self.0[0]
    }

    pub fn y(&self) -> T {
        self.0[1]
    }

    pub fn z(&self) -> T {
        self.0[2]
    }

    pub fn w(&self) -> T {
        self.0[3]
    }

    pub fn x_mut(&mut self) -> &mut T {
        &mut self.0[0]
    }

    pub fn y_mut(&mut self) -> &mut T {
        &mut self.0[1]
    }

    pub fn z_mut(&mut self) -> &mut T {
        &mut self.0[2]
    }

    pub fn w_mut(&mut self) -> &mut T {
        &mut self.0[3]
    }

    /// Drop the `w` component.
    pub fn truncate(&self) -> Vector<T, 3> {
        Vector::<T, 3>::new(self.x(), self.y(), self.z())
    }
}

/// Angle of the direction from `from` to `to`, in radians.
pub fn angle_between<T: Real>(to: &Vector<T, 2>, from: &Vector<T, 2>) -> T {
    (to.y() - from.y()).atan2(to.x() - from.x())
}

impl<T: Scalar, const N: usize> Default for Vector<T, N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T, N> {
    fn from(data: [T; N]) -> Self {
        Self(data)
    }
}

impl<T, const N: usize> From<Vector<T, N>> for [T; N] {
    fn from(v: Vector<T, N>) -> Self {
        v.0
    }
}

impl<T, const N: usize> Index<usize> for Vector<T, N> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.0[index]
    }
}

impl<T, const N: usize> IndexMut<usize> for Vector<T, N> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.0[index]
    }
}

impl<T: Scalar, const N: usize> Neg for Vector<T, N> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|c| -c)
    }
}

macro_rules! impl_componentwise {
    ($($op:ident :: $method:ident, $op_assign:ident :: $method_assign:ident, $sym:tt);* $(;)?) => {
        $(
            impl<T: Scalar, const N: usize> $op for Vector<T, N> {
                type Output = Self;

                fn $method(self, rhs: Self) -> Self {
                    self.zip_with(rhs, |a, b| a $sym b)
                }
            }

            impl<T: Scalar, const N: usize> $op<T> for Vector<T, N> {
                type Output = Self;

                fn $method(self, rhs: T) -> Self {
                    self.map(|a| a $sym rhs)
                }
            }

            impl<T: Scalar, const N: usize> $op_assign for Vector<T, N> {
                fn $method_assign(&mut self, rhs: Self) {
                    *self = $op::$method(*self, rhs);
                }
            }

            impl<T: Scalar, const N: usize> $op_assign<T> for Vector<T, N> {
                fn $method_assign(&mut self, rhs: T) {
                    *self = $op::$method(*self, rhs);
                }
            }
        )*
    };
}

impl_componentwise! {
    Add::add, AddAssign::add_assign, +;
    Sub::sub, SubAssign::sub_assign, -;
    Mul::mul, MulAssign::mul_assign, *;
    Div::div, DivAssign::div_assign, /;
}

impl<T, const N: usize> AbsDiffEq for Vector<T, N>
where
    T: AbsDiffEq,
    T::Epsilon: Copy,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<T, const N: usize> RelativeEq for Vector<T, N>
where
    T: RelativeEq,
    T::Epsilon: Copy,
{
    fn default_max_relative() -> Self::Epsilon {
        T::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
