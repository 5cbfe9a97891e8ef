//! Conversions to and from `glam`, for hosts that already speak glam types.

use crate::matrix::Mat4;
use crate::vector::{Vec3, Vec4};

impl From<Mat4> for glam::Mat4 {
    fn from(m: Mat4) -> Self {
        // glam is column-major: its column arrays are our rows transposed.
        glam::Mat4::from_cols_array_2d(m.transposed().rows())
    }
}

impl From<glam::Mat4> for Mat4 {
    fn from(m: glam::Mat4) -> Self {
        Mat4::from_rows(m.transpose().to_cols_array_2d())
    }
}

impl From<Vec3> for glam::Vec3 {
    fn from(v: Vec3) -> Self {
        glam::Vec3::from_array(v.0)
    }
}

impl From<glam::Vec3> for Vec3 {
    fn from(v: glam::Vec3) -> Self {
        Vec3::from(v.to_array())
    }
}

impl From<Vec4> for glam::Vec4 {
    fn from(v: Vec4) -> Self {
        glam::Vec4::from_array(v.0)
    }
}

impl From<glam::Vec4> for Vec4 {
    fn from(v: glam::Vec4) -> Self {
        Vec4::from(v.to_array())
    }
}

#[cfg(test)]
mod tests {
    use crate::transform::{look_at, perspective, rotate, translate};
    use crate::{Mat4, Vec3, Vec4};
    use approx::assert_abs_diff_eq;

    fn assert_matches_glam(ours: Mat4, theirs: glam::Mat4) {
        assert_abs_diff_eq!(ours, Mat4::from(theirs), epsilon = 1e-5);
    }

    #[test]
    fn conversion_keeps_translation_in_column_three() {
        let g: glam::Mat4 = translate(1.0, 2.0, 3.0).into();
        assert_eq!(g.w_axis, glam::Vec4::new(1.0, 2.0, 3.0, 1.0));
        let back = Mat4::from(g);
        assert_eq!(back, translate(1.0, 2.0, 3.0));
    }

    #[test]
    fn look_at_agrees_with_glam_left_handed() {
        let eye = Vec3::new(-5.0, 2.0, -3.0);
        let target = Vec3::new(0.0, 1.0, 0.5);
        let up = Vec3::new(0.0, 1.0, 0.0);
        assert_matches_glam(
            look_at(&eye, &target, &up),
            glam::Mat4::look_at_lh(eye.into(), target.into(), up.into()),
        );
    }

    #[test]
    fn perspective_agrees_with_glam_left_handed() {
        assert_matches_glam(
            perspective(1.1, 16.0 / 9.0, 0.5, 250.0),
            glam::Mat4::perspective_lh(1.1, 16.0 / 9.0, 0.5, 250.0),
        );
    }

    #[test]
    fn rotate_agrees_with_glam_axis_angle() {
        let axis = Vec3::new(0.3, -0.7, 0.2).normalized();
        assert_matches_glam(
            rotate(2.1, &axis),
            glam::Mat4::from_axis_angle(axis.into(), 2.1),
        );
    }

    #[test]
    fn vectors_roundtrip() {
        let v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        let g: glam::Vec4 = v.into();
        assert_eq!(Vec4::from(g), v);
    }
}
