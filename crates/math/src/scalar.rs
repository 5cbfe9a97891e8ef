use std::fmt::Debug;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Numeric element type usable inside [`Vector`](crate::Vector) and
/// [`Matrix`](crate::Matrix).
pub trait Scalar:
    Copy
    + Debug
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
{
    const ZERO: Self;
    const ONE: Self;
}

/// Floating-point scalars: everything that needs `sqrt` or trigonometry.
pub trait Real: Scalar {
    const PI: Self;

    fn sqrt(self) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn tan(self) -> Self;
    fn atan2(self, x: Self) -> Self;
    fn rem_euclid(self, rhs: Self) -> Self;
}

macro_rules! impl_scalar {
    ($($t:ty => $zero:expr, $one:expr);* $(;)?) => {
        $(
            impl Scalar for $t {
                const ZERO: Self = $zero;
                const ONE: Self = $one;
            }
        )*
    };
}

macro_rules! impl_real {
    ($($t:ident),*) => {
        $(
            impl Real for $t {
                const PI: Self = std::$t::consts::PI;

                fn sqrt(self) -> Self {
                    $t::sqrt(self)
                }

                fn sin(self) -> Self {
                    $t::sin(self)
                }

                fn cos(self) -> Self {
                    $t::cos(self)
                }

                fn tan(self) -> Self {
                    $t::tan(self)
                }

                fn atan2(self, x: Self) -> Self {
                    $t::atan2(self, x)
                }

                fn rem_euclid(self, rhs: Self) -> Self {
                    $t::rem_euclid(self, rhs)
                }
            }
        )*
    };
}

impl_scalar! {
    f32 => 0.0, 1.0;
    f64 => 0.0, 1.0;
    i32 => 0, 1;
}

impl_real!(f32, f64);
