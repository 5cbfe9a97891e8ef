//! Numeric kernel: fixed-dimension vectors and matrices plus the transform
//! builders the scene graph composes (translation, scale, rotation, look-at,
//! perspective and orthographic projection).
//!
//! # Invariants
//! - Dimensions are const generics; mismatched products do not type-check.
//! - Matrices are row-major and act on column vectors (`M · v`).
//! - No operation guards against degenerate input (zero-length normalize).

pub mod interop;
pub mod matrix;
pub mod scalar;
pub mod transform;
pub mod utils;
pub mod vector;

pub use matrix::{Mat3, Mat3d, Mat4, Mat4d, Matrix};
pub use scalar::{Real, Scalar};
pub use transform::{
    look_at, orthographic, orthographic_default, perspective, rotate, rotate3, scale, scale_vec,
    scale_vec2, translate, translate_vec, translate_vec2,
};
pub use utils::{PI, clamp, lerp, sign, wrap_angle};
pub use vector::{
    Vec2, Vec2d, Vec2i, Vec3, Vec3d, Vec3i, Vec4, Vec4d, Vec4i, Vector, angle_between,
};

pub fn crate_info() -> &'static str {
    "lumen-math v0.1.0"
}
