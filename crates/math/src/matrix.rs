//! Fixed-size row-major matrices.
//!
//! # Invariants
//! - `Matrix::new()` / `Default` is identity-biased: `1` where row == col,
//!   `0` elsewhere, for square and non-square shapes alike.
//! - Multiplication shapes are checked by the type system; embedding a larger
//!   matrix into a smaller one is rejected at compile time.

use std::ops::{Index, IndexMut, Mul, MulAssign};

use approx::{AbsDiffEq, RelativeEq};

use crate::scalar::Scalar;
use crate::vector::Vector;

/// A `R × C` matrix stored row by row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix<T, const R: usize, const C: usize> {
    rows: [[T; C]; R],
}

pub type Mat3 = Matrix<f32, 3, 3>;
pub type Mat4 = Matrix<f32, 4, 4>;
pub type Mat3d = Matrix<f64, 3, 3>;
pub type Mat4d = Matrix<f64, 4, 4>;

impl<T: Scalar, const R: usize, const C: usize> Matrix<T, R, C> {
    /// Identity-biased matrix.
    pub fn new() -> Self {
        Self {
            rows: std::array::from_fn(|r| {
                std::array::from_fn(|c| if r == c { T::ONE } else { T::ZERO })
            }),
        }
    }

    pub fn zero() -> Self {
        Self {
            rows: [[T::ZERO; C]; R],
        }
    }

    pub fn from_rows(rows: [[T; C]; R]) -> Self {
        Self { rows }
    }

    /// Copy `smaller` into the top-left block; every other cell follows the
    /// identity rule.
    pub fn embed<const R2: usize, const C2: usize>(smaller: &Matrix<T, R2, C2>) -> Self {
        const {
            assert!(
                R2 <= R && C2 <= C,
                "embedded matrix must not be larger than the target"
            )
        };
        let mut m = Self::new();
        for r in 0..R2 {
            for c in 0..C2 {
                m.rows[r][c] = smaller.rows[r][c];
            }
        }
        m
    }

    pub fn at(&self, row: usize, col: usize) -> T {
        self.rows[row][col]
    }

    pub fn at_mut(&mut self, row: usize, col: usize) -> &mut T {
        &mut self.rows[row][col]
    }

    pub fn row(&self, row: usize) -> Vector<T, C> {
        Vector(self.rows[row])
    }

    pub fn col(&self, col: usize) -> Vector<T, R> {
        Vector(std::array::from_fn(|r| self.rows[r][col]))
    }

    pub fn rows(&self) -> &[[T; C]; R] {
        &self.rows
    }

    pub fn transposed(&self) -> Matrix<T, C, R> {
        Matrix {
            rows: std::array::from_fn(|c| std::array::from_fn(|r| self.rows[r][c])),
        }
    }

    /// Flattened row-major copy, as uploaded with a "transpose" flag.
    pub fn to_row_major(&self) -> Vec<T> {
        self.rows.iter().flatten().copied().collect()
    }
}

impl<T: Scalar, const R: usize, const C: usize> Default for Matrix<T, R, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const R: usize, const C: usize> Index<(usize, usize)> for Matrix<T, R, C> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.rows[row][col]
    }
}

impl<T, const R: usize, const C: usize> IndexMut<(usize, usize)> for Matrix<T, R, C> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.rows[row][col]
    }
}

impl<T: Scalar, const R: usize, const I: usize, const C: usize> Mul<Matrix<T, I, C>>
    for Matrix<T, R, I>
{
    type Output = Matrix<T, R, C>;

    fn mul(self, rhs: Matrix<T, I, C>) -> Matrix<T, R, C> {
        let mut result = Matrix::<T, R, C>::zero();
        for row in 0..R {
            for col in 0..C {
                let mut sum = T::ZERO;
                for i in 0..I {
                    sum += self.rows[row][i] * rhs.rows[i][col];
                }
                result.rows[row][col] = sum;
            }
        }
        result
    }
}

impl<T: Scalar, const R: usize, const C: usize> Mul<Vector<T, C>> for Matrix<T, R, C> {
    type Output = Vector<T, R>;

    fn mul(self, rhs: Vector<T, C>) -> Vector<T, R> {
        Vector(std::array::from_fn(|r| self.row(r).dot(&rhs)))
    }
}

impl<T: Scalar, const N: usize> MulAssign for Matrix<T, N, N> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<T, const R: usize, const C: usize> AbsDiffEq for Matrix<T, R, C>
where
    T: AbsDiffEq,
    T::Epsilon: Copy,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.rows
            .iter()
            .flatten()
            .zip(other.rows.iter().flatten())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<T, const R: usize, const C: usize> RelativeEq for Matrix<T, R, C>
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
        self.rows
            .iter()
            .flatten()
            .zip(other.rows.iter().flatten())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
