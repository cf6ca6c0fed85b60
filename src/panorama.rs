// panorama.rs — 视角状态：经纬度、拖拽、缩放、自动旋转

pub const DEFAULT_FOV: f32 = 75.0;
pub const MIN_FOV: f32 = 30.0;
pub const MAX_FOV: f32 = 90.0;

/// Latitude is kept short of the poles, the look-at basis flips at ±90°.
pub const LAT_LIMIT: f32 = 85.0;

/// Degrees of rotation per pixel of drag.
pub const DRAG_SENSITIVITY: f32 = 0.1;

/// Degrees of field of view per pixel of wheel delta.
pub const WHEEL_ZOOM_SPEED: f32 = 0.05;

/// Degrees of longitude per rendered frame (not per second).
pub const AUTO_ROTATE_SPEED: f32 = 0.1;

/// Look direction of the camera, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    pub lon: f32,
    pub lat: f32,
}

impl Orientation {
    /// Polar angle measured from +Y, radians.
    pub fn phi(&self) -> f32 {
        (90.0 - self.lat).to_radians()
    }

    /// Azimuth around +Y, radians.
    pub fn theta(&self) -> f32 {
        self.lon.to_radians()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragAnchor {
    x: f32,
    y: f32,
    lon: f32,
    lat: f32,
}

pub struct PanoramaViewer3D {
    pub orientation: Orientation,
    pub fov: f32,
    is_user_interacting: bool,
    auto_rotate: bool,
    anchor: DragAnchor,
}

impl Default for PanoramaViewer3D {
    fn default() -> Self {
        Self::new()
    }
}

impl PanoramaViewer3D {
    pub fn new() -> Self {
        Self {
            orientation: Orientation::default(),
            fov: DEFAULT_FOV,
            is_user_interacting: false,
            auto_rotate: true,
            anchor: DragAnchor {
                x: 0.0,
                y: 0.0,
                lon: 0.0,
                lat: 0.0,
            },
        }
    }

    pub fn is_user_interacting(&self) -> bool {
        self.is_user_interacting
    }

    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    /// Starts a drag. Auto-rotation is switched off for the rest of the mount.
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.is_user_interacting = true;
        self.auto_rotate = false;
        self.anchor = DragAnchor {
            x,
            y,
            lon: self.orientation.lon,
            lat: self.orientation.lat,
        };
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if !self.is_user_interacting {
            return;
        }
        self.orientation.lon = (self.anchor.x - x) * DRAG_SENSITIVITY + self.anchor.lon;
        self.orientation.lat = (y - self.anchor.y) * DRAG_SENSITIVITY + self.anchor.lat;
    }

    pub fn pointer_up(&mut self) {
        self.is_user_interacting = false;
    }

    /// `delta_y` follows the browser convention: positive scrolls down and zooms out.
    pub fn wheel(&mut self, delta_y: f32) {
        if !delta_y.is_finite() {
            return;
        }
        self.fov = (self.fov + delta_y * WHEEL_ZOOM_SPEED).clamp(MIN_FOV, MAX_FOV);
    }

    /// Restores the zoom only; the look direction is left where the user put it.
    pub fn reset(&mut self) {
        self.fov = DEFAULT_FOV;
    }

    /// One render-loop step. Returns the orientation the camera should use this frame.
    pub fn advance_frame(&mut self) -> Orientation {
        if self.auto_rotate {
            self.orientation.lon += AUTO_ROTATE_SPEED;
        }
        self.orientation.lat = self.orientation.lat.clamp(-LAT_LIMIT, LAT_LIMIT);
        self.orientation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let viewer = PanoramaViewer3D::new();
        assert_eq!(viewer.fov, DEFAULT_FOV);
        assert_eq!(viewer.orientation, Orientation::default());
        assert!(viewer.auto_rotate());
        assert!(!viewer.is_user_interacting());
    }

    #[test]
    fn test_auto_rotate_advances_per_frame() {
        let mut viewer = PanoramaViewer3D::new();
        for _ in 0..10 {
            viewer.advance_frame();
        }
        assert!((viewer.orientation.lon - 10.0 * AUTO_ROTATE_SPEED).abs() < 1e-4);
        assert_eq!(viewer.orientation.lat, 0.0);
    }

    #[test]
    fn test_drag_updates_orientation_from_anchor() {
        let mut viewer = PanoramaViewer3D::new();
        viewer.orientation = Orientation { lon: 20.0, lat: 5.0 };

        viewer.pointer_down(100.0, 100.0);
        viewer.pointer_move(50.0, 130.0);
        assert!((viewer.orientation.lon - 25.0).abs() < 1e-4);
        assert!((viewer.orientation.lat - 8.0).abs() < 1e-4);

        // Relative to the anchor, not to the previous move.
        viewer.pointer_move(100.0, 100.0);
        assert!((viewer.orientation.lon - 20.0).abs() < 1e-4);
        assert!((viewer.orientation.lat - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_move_without_press_is_ignored() {
        let mut viewer = PanoramaViewer3D::new();
        viewer.pointer_move(500.0, 500.0);
        assert_eq!(viewer.orientation, Orientation::default());
    }

    #[test]
    fn test_pointer_up_keeps_orientation() {
        let mut viewer = PanoramaViewer3D::new();
        viewer.pointer_down(0.0, 0.0);
        viewer.pointer_move(-300.0, 200.0);
        viewer.pointer_up();
        let after_drag = viewer.orientation;

        viewer.pointer_move(0.0, 0.0);
        viewer.advance_frame();
        assert_eq!(viewer.orientation, after_drag);
        assert!(!viewer.is_user_interacting());
    }

    #[test]
    fn test_auto_rotate_never_resumes_after_drag() {
        let mut viewer = PanoramaViewer3D::new();
        viewer.pointer_down(10.0, 10.0);
        viewer.pointer_move(20.0, 10.0);
        viewer.pointer_up();
        assert!(!viewer.auto_rotate());

        let lon = viewer.orientation.lon;
        for _ in 0..100 {
            viewer.advance_frame();
        }
        assert!(!viewer.auto_rotate());
        assert_eq!(viewer.orientation.lon, lon);
    }

    #[test]
    fn test_latitude_clamped_for_rendering() {
        let mut viewer = PanoramaViewer3D::new();
        viewer.pointer_down(0.0, 0.0);

        viewer.pointer_move(0.0, 10_000.0);
        assert_eq!(viewer.advance_frame().lat, LAT_LIMIT);

        viewer.pointer_move(0.0, -10_000.0);
        assert_eq!(viewer.advance_frame().lat, -LAT_LIMIT);

        viewer.pointer_move(0.0, 300.0);
        assert!((viewer.advance_frame().lat - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_longitude_is_unbounded() {
        let mut viewer = PanoramaViewer3D::new();
        viewer.pointer_down(0.0, 0.0);
        viewer.pointer_move(-7200.0, 0.0);
        assert!((viewer.advance_frame().lon - 720.0).abs() < 1e-3);
    }

    #[test]
    fn test_wheel_fov_always_in_range() {
        let mut viewer = PanoramaViewer3D::new();
        for delta in [1e9, -1e9, 100.0, -100.0, 0.5, -3000.0, f32::MAX, f32::MIN] {
            viewer.wheel(delta);
            assert!(viewer.fov >= MIN_FOV && viewer.fov <= MAX_FOV, "fov {}", viewer.fov);
        }

        viewer.fov = DEFAULT_FOV;
        viewer.wheel(100.0);
        assert!((viewer.fov - 80.0).abs() < 1e-4);
        viewer.wheel(-1000.0);
        assert_eq!(viewer.fov, MIN_FOV);
    }

    #[test]
    fn test_wheel_ignores_non_finite_delta() {
        let mut viewer = PanoramaViewer3D::new();
        viewer.wheel(f32::NAN);
        viewer.wheel(f32::INFINITY);
        assert_eq!(viewer.fov, DEFAULT_FOV);
    }

    // Reset restores zoom only. Whether orientation should also snap back is
    // undecided; this pins the current behaviour.
    #[test]
    fn test_reset_restores_fov_but_not_orientation() {
        let mut viewer = PanoramaViewer3D::new();
        viewer.pointer_down(0.0, 0.0);
        viewer.pointer_move(-400.0, 250.0);
        viewer.pointer_up();
        viewer.wheel(-500.0);
        let orientation = viewer.advance_frame();

        viewer.reset();
        assert_eq!(viewer.fov, DEFAULT_FOV);
        assert_eq!(viewer.orientation, orientation);
    }

    #[test]
    fn test_phi_theta() {
        let o = Orientation { lon: 180.0, lat: 0.0 };
        assert!((o.phi() - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert!((o.theta() - std::f32::consts::PI).abs() < 1e-6);
    }
}
