// camera.rs — 相机：由经纬度求出观察位置与 view-projection 矩阵

use crate::panorama::Orientation;
use glam::{Mat4, Vec3};

/// Distance of the eye from the sphere centre. Must stay well inside the sphere radius.
pub const CAMERA_DISTANCE: f32 = 100.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 1000.0;

/// Eye position on the orbit sphere for the given orientation.
pub fn eye_position(orientation: Orientation) -> Vec3 {
    let phi = orientation.phi();
    let theta = orientation.theta();
    Vec3::new(
        CAMERA_DISTANCE * phi.sin() * theta.cos(),
        CAMERA_DISTANCE * phi.cos(),
        CAMERA_DISTANCE * phi.sin() * theta.sin(),
    )
}

/// View-projection for a camera at `eye_position(orientation)` aimed at the origin.
pub fn view_projection(orientation: Orientation, fov_deg: f32, aspect: f32) -> Mat4 {
    let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
    let view = Mat4::look_at_rh(eye_position(orientation), Vec3::ZERO, Vec3::Y);
    let proj = Mat4::perspective_rh(fov_deg.to_radians(), aspect, Z_NEAR, Z_FAR);
    proj * view
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn test_eye_on_equator() {
        let eye = eye_position(Orientation { lon: 0.0, lat: 0.0 });
        assert!(approx(eye, Vec3::new(CAMERA_DISTANCE, 0.0, 0.0)));

        let eye = eye_position(Orientation { lon: 90.0, lat: 0.0 });
        assert!(approx(eye, Vec3::new(0.0, 0.0, CAMERA_DISTANCE)));
    }

    #[test]
    fn test_eye_distance_is_fixed() {
        for (lon, lat) in [(0.0, 85.0), (123.0, -40.0), (-720.0, 12.5)] {
            let eye = eye_position(Orientation { lon, lat });
            assert!((eye.length() - CAMERA_DISTANCE).abs() < 1e-2);
        }
    }

    #[test]
    fn test_positive_latitude_raises_eye() {
        let eye = eye_position(Orientation { lon: 0.0, lat: 45.0 });
        assert!(eye.y > 0.0);
    }

    #[test]
    fn test_origin_projects_to_screen_centre() {
        let vp = view_projection(Orientation { lon: 37.0, lat: -20.0 }, 75.0, 16.0 / 9.0);
        let clip = vp * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-4);
        assert!(ndc.y.abs() < 1e-4);
        assert!(ndc.z >= 0.0 && ndc.z <= 1.0);
    }

    #[test]
    fn test_degenerate_aspect_does_not_produce_nan() {
        let vp = view_projection(Orientation::default(), 75.0, 0.0);
        assert!(vp.is_finite());
    }
}
