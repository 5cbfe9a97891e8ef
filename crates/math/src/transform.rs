//! Pure builders for affine, view and projection matrices.
//!
//! Conventions: column vectors (`M · v`), translation in column 3, a
//! left-handed view space looking down +Z, and a `0..1` depth range for
//! [`perspective`].

use crate::matrix::Matrix;
use crate::scalar::{Real, Scalar};
use crate::vector::Vector;

/// Identity with column 3 set to `(x, y, z)`.
pub fn translate<T: Scalar>(x: T, y: T, z: T) -> Matrix<T, 4, 4> {
    let mut m = Matrix::new();
    m[(0, 3)] = x;
    m[(1, 3)] = y;
    m[(2, 3)] = z;
    m
}

pub fn translate_vec<T: Scalar>(v: &Vector<T, 3>) -> Matrix<T, 4, 4> {
    translate(v.x(), v.y(), v.z())
}

pub fn translate_vec2<T: Scalar>(v: &Vector<T, 2>) -> Matrix<T, 4, 4> {
    translate(v.x(), v.y(), T::ZERO)
}

/// Identity with the diagonal set to `(x, y, z)`.
pub fn scale<T: Scalar>(x: T, y: T, z: T) -> Matrix<T, 4, 4> {
    let mut m = Matrix::new();
    m[(0, 0)] = x;
    m[(1, 1)] = y;
    m[(2, 2)] = z;
    m
}

pub fn scale_vec<T: Scalar>(v: &Vector<T, 3>) -> Matrix<T, 4, 4> {
    scale(v.x(), v.y(), v.z())
}

pub fn scale_vec2<T: Scalar>(v: &Vector<T, 2>) -> Matrix<T, 4, 4> {
    scale(v.x(), v.y(), T::ONE)
}

/// Rodrigues rotation of `angle` radians about `axis`.
///
/// `axis` must already be unit length; it is not normalised here.
pub fn rotate3<T: Real>(angle: T, axis: &Vector<T, 3>) -> Matrix<T, 3, 3> {
    let c = angle.cos();
    let s = angle.sin();
    let t = T::ONE - c;
    let (x, y, z) = (axis.x(), axis.y(), axis.z());

    Matrix::from_rows([
        [c + x * x * t, x * y * t - z * s, x * z * t + y * s],
        [x * y * t + z * s, c + y * y * t, y * z * t - x * s],
        [x * z * t - y * s, y * z * t + x * s, c + z * z * t],
    ])
}

/// [`rotate3`] promoted to a 4×4 affine matrix.
pub fn rotate<T: Real>(angle: T, axis: &Vector<T, 3>) -> Matrix<T, 4, 4> {
    Matrix::embed(&rotate3(angle, axis))
}

/// View matrix for an eye at `position` looking at `target`.
///
/// Rows 0..3 hold the camera basis `x` (right), `y` (up), `z` (forward) and
/// column 3 holds `-dot(basis, position)`, i.e. the inverse of the camera's
/// world placement.
pub fn look_at<T: Real>(
    position: &Vector<T, 3>,
    target: &Vector<T, 3>,
    up: &Vector<T, 3>,
) -> Matrix<T, 4, 4> {
    let z = (*target - *position).normalized();
    let x = up.cross(&z).normalized();
    let y = z.cross(&x).normalized();

    let mut m = Matrix::new();
    for (row, basis) in [x, y, z].iter().enumerate() {
        m[(row, 0)] = basis.x();
        m[(row, 1)] = basis.y();
        m[(row, 2)] = basis.z();
        m[(row, 3)] = -basis.dot(position);
    }
    m
}

/// Symmetric-frustum perspective projection with a `0..1` depth range.
pub fn perspective<T: Real>(fov: T, aspect: T, near: T, far: T) -> Matrix<T, 4, 4> {
    let two = T::ONE + T::ONE;
    let t = (fov / two).tan();

    let mut m = Matrix::new();
    m[(0, 0)] = T::ONE / (aspect * t);
    m[(1, 1)] = T::ONE / t;
    m[(2, 2)] = far / (far - near);
    m[(2, 3)] = -(far * near) / (far - near);
    m[(3, 2)] = T::ONE;
    m[(3, 3)] = T::ZERO;
    m
}

/// Axis-aligned orthographic projection.
pub fn orthographic<T: Real>(
    left: T,
    top: T,
    right: T,
    bottom: T,
    near: T,
    far: T,
) -> Matrix<T, 4, 4> {
    let two = T::ONE + T::ONE;

    let mut m = Matrix::new();
    m[(0, 0)] = two / (right - left);
    m[(0, 3)] = -(right + left) / (right - left);
    m[(1, 1)] = two / (top - bottom);
    m[(1, 3)] = -(top + bottom) / (top - bottom);
    m[(2, 2)] = -two / (far - near);
    m[(2, 3)] = -(far + near) / (far - near);
    m
}

/// [`orthographic`] over the default `0..1` depth slab.
pub fn orthographic_default<T: Real>(left: T, top: T, right: T, bottom: T) -> Matrix<T, 4, 4> {
    orthographic(left, top, right, bottom, T::ZERO, T::ONE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mat3, Mat4, Vec3, Vec4};
    use approx::assert_abs_diff_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn translate_moves_origin() {
        for &(x, y, z) in &[(1.0, 2.0, 3.0), (-4.0, 0.5, 9.0), (0.0, 0.0, 0.0)] {
            let p = translate(x, y, z) * Vec4::new(0.0, 0.0, 0.0, 1.0);
            assert_eq!(p, Vec4::new(x, y, z, 1.0));
        }
        let m = translate_vec2(&crate::Vec2::new(3.0_f32, 4.0));
        assert_eq!(m.col(3), Vec4::new(3.0, 4.0, 0.0, 1.0));
    }

    #[test]
    fn translate_leaves_directions_alone() {
        let d = translate(5.0, 6.0, 7.0) * Vec4::new(1.0, 2.0, 3.0, 0.0);
        assert_eq!(d, Vec4::new(1.0, 2.0, 3.0, 0.0));
    }

    #[test]
    fn scale_sets_diagonal() {
        let m = scale_vec(&Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(m * Vec4::new(1.0, 1.0, 1.0, 1.0), Vec4::new(2.0, 3.0, 4.0, 1.0));
        assert_eq!(scale_vec2(&crate::Vec2::new(2.0_f32, 3.0)).at(2, 2), 1.0);
    }

    #[test]
    fn rotate_quarter_turn_about_y() {
        let r = rotate(FRAC_PI_2, &Vec3::new(0.0, 1.0, 0.0));
        let v = r * Vec4::new(1.0, 0.0, 0.0, 0.0);
        assert_abs_diff_eq!(v, Vec4::new(0.0, 0.0, -1.0, 0.0), epsilon = 1e-6);
        assert_eq!(r.row(3), Vec4::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn rotate_about_x_is_counter_clockwise() {
        let r = rotate3(FRAC_PI_2, &Vec3::new(1.0, 0.0, 0.0));
        let v = r * Vec3::new(0.0, 1.0, 0.0);
        assert_abs_diff_eq!(v, Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn rotation_is_orthonormal() {
        let axis = Vec3::new(1.0, 2.0, -0.5).normalized();
        let r = rotate3(0.83, &axis);
        assert_abs_diff_eq!(r * r.transposed(), Mat3::new(), epsilon = 1e-5);
        assert_abs_diff_eq!(r * axis, axis, epsilon = 1e-5);
    }

    #[test]
    fn look_at_maps_eye_to_origin() {
        let cases = [
            (Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 1.0, 0.0)),
            (Vec3::new(-5.0, 2.0, -3.0), Vec3::new(5.0, 0.0, 3.0), Vec3::new(0.0, 1.0, 0.0)),
            (Vec3::new(10.0, -4.0, 0.5), Vec3::new(-1.0, -1.0, 2.0), Vec3::new(0.2, 1.0, 0.1)),
        ];
        for (p, d, up) in cases {
            let view = look_at(&p, &(p + d), &up);
            let eye = view * p.extend(1.0);
            assert_abs_diff_eq!(eye, Vec4::new(0.0, 0.0, 0.0, 1.0), epsilon = 1e-4);

            let ahead = view * (p + d.normalized()).extend(1.0);
            assert_abs_diff_eq!(ahead, Vec4::new(0.0, 0.0, 1.0, 1.0), epsilon = 1e-4);
        }
    }

    #[test]
    fn perspective_depth_range() {
        let proj = perspective(FRAC_PI_2, 1.0, 1.0, 100.0);
        let near = proj * Vec4::new(0.0, 0.0, 1.0, 1.0);
        let far = proj * Vec4::new(0.0, 0.0, 100.0, 1.0);
        assert_abs_diff_eq!(near.z() / near.w(), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(far.z() / far.w(), 1.0, epsilon = 1e-6);
        assert_eq!(proj.at(3, 3), 0.0);
        assert_eq!(proj.at(3, 2), 1.0);
    }

    #[test]
    fn orthographic_maps_box_to_clip_cube() {
        let ortho: Mat4 = orthographic(0.0, 0.0, 800.0, 600.0, -1.0, 1.0);
        let corner = ortho * Vec4::new(800.0, 600.0, 0.0, 1.0);
        assert_abs_diff_eq!(corner, Vec4::new(1.0, -1.0, 0.0, 1.0), epsilon = 1e-6);
        let origin = ortho * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_abs_diff_eq!(origin, Vec4::new(-1.0, 1.0, 0.0, 1.0), epsilon = 1e-6);

        let slab: Mat4 = orthographic_default(-1.0, 1.0, 1.0, -1.0);
        assert_abs_diff_eq!(slab.at(2, 2), -2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(slab.at(2, 3), -1.0, epsilon = 1e-6);
    }
}
