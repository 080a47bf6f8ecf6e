use std::f32::consts::PI;

use glam::{Vec2, Vec3};

use crate::scene::host::{DollyRange, OrbitLimits};

/// Pointer input accumulated since the last frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrbitInput {
    /// Drag distance in pixels with the rotate button held.
    pub rotate: Vec2,
    /// Wheel / pinch steps, positive moves the camera closer.
    pub scroll: f32,
    /// Drag distance in pixels with the pan button held.
    pub pan: Vec2,
    /// Viewport height in pixels, used to turn pixels into angles.
    pub screen_height: f32,
}

/// Camera orbiting a fixed target on a sphere, three.js style:
/// azimuth `theta` around +Y measured from +Z, polar `phi` from +Y.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub damping_factor: f32,
    pub enable_damping: bool,
    pub enable_pan: bool,

    pub limits: OrbitLimits,
    pub distance: DollyRange,

    pub center: Vec3,
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,

    rotate_delta: Vec2,
    dolly_delta: f32,
}

impl OrbitControls {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            rotate_speed: 1.0,
            zoom_speed: 0.05,
            damping_factor: 0.05,
            enable_damping: true,
            enable_pan: false,

            limits: OrbitLimits {
                min_azimuth: f32::NEG_INFINITY,
                max_azimuth: f32::INFINITY,
                min_polar: 0.0,
                max_polar: PI,
            },
            distance: DollyRange { min: 0.0, max: f32::INFINITY },

            center,
            radius,
            theta: 0.0,
            phi: std::f32::consts::FRAC_PI_2,

            rotate_delta: Vec2::ZERO,
            dolly_delta: 0.0,
        }
    }

    /// Replaces the interaction bounds and damping.
    pub fn configure(&mut self, limits: OrbitLimits, distance: DollyRange, damping_factor: f32) {
        self.limits = limits;
        self.distance = distance;
        self.damping_factor = damping_factor;
    }

    /// Places the camera at `position` looking at `target`, dropping any
    /// motion still being damped.
    pub fn sync_from(&mut self, position: Vec3, target: Vec3) {
        self.center = target;
        let offset = position - target;
        self.radius = offset.length();
        if self.radius > f32::EPSILON {
            self.theta = offset.x.atan2(offset.z);
            self.phi = (offset.y / self.radius).clamp(-1.0, 1.0).acos();
        }
        self.rotate_delta = Vec2::ZERO;
        self.dolly_delta = 0.0;
    }

    pub fn rotate(&mut self, pixels: Vec2, screen_height: f32) {
        let rotate_per_pixel = 2.0 * PI / screen_height.max(1.0);
        self.rotate_delta -= pixels * rotate_per_pixel * self.rotate_speed;
    }

    pub fn dolly(&mut self, steps: f32) {
        self.dolly_delta += steps;
    }

    /// Returns whether the pan was applied.
    pub fn pan(&mut self, pixels: Vec2) -> bool {
        if !self.enable_pan {
            if pixels != Vec2::ZERO {
                log::debug!("Pan input ignored: panning is disabled");
            }
            return false;
        }
        // Pan is only ever enabled by embedders driving the controls directly.
        let offset = self.offset_direction();
        let forward = -offset;
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward).normalize_or_zero();
        self.center += (right * -pixels.x + up * pixels.y) * 0.001 * self.radius;
        true
    }

    pub fn apply_input(&mut self, input: &OrbitInput) {
        if input.rotate != Vec2::ZERO {
            self.rotate(input.rotate, input.screen_height);
        }
        if input.scroll != 0.0 {
            self.dolly(input.scroll);
        }
        if input.pan != Vec2::ZERO {
            self.pan(input.pan);
        }
    }

    /// Advances damped motion by `dt` seconds and returns the camera position.
    pub fn update(&mut self, dt: f32) -> Vec3 {
        let (rotate_apply, dolly_apply) = if self.enable_damping {
            let target_fps = 60.0;
            let retention = (1.0 - self.damping_factor).powf(dt * target_fps);

            let rotate_apply = self.rotate_delta * (1.0 - retention);
            let dolly_apply = self.dolly_delta * (1.0 - retention);
            self.rotate_delta *= retention;
            self.dolly_delta *= retention;
            (rotate_apply, dolly_apply)
        } else {
            let applied = (self.rotate_delta, self.dolly_delta);
            self.rotate_delta = Vec2::ZERO;
            self.dolly_delta = 0.0;
            applied
        };

        self.theta = self.limits.clamp_azimuth(self.theta + rotate_apply.x);

        const EPS: f32 = 0.0001;
        self.phi = self
            .limits
            .clamp_polar(self.phi + rotate_apply.y)
            .clamp(EPS, PI - EPS);

        if dolly_apply != 0.0 {
            self.radius *= (1.0 - self.zoom_speed).powf(dolly_apply);
        }
        self.radius = self.distance.clamp(self.radius);

        self.center + self.offset_direction() * self.radius
    }

    /// Whether damped motion is still pending.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.rotate_delta.length_squared() > 1e-10 || self.dolly_delta.abs() > 1e-5
    }

    fn offset_direction(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounded() -> OrbitControls {
        let mut controls = OrbitControls::new(Vec3::ZERO, 2.0);
        controls.configure(
            OrbitLimits {
                min_azimuth: -PI,
                max_azimuth: 0.0,
                min_polar: PI / 3.0,
                max_polar: PI / 2.0,
            },
            DollyRange { min: 1.0, max: 5.0 },
            0.1,
        );
        controls
    }

    #[test]
    fn test_sync_from_recovers_position() {
        let mut controls = bounded();
        let target = Vec3::new(0.5, 0.0, 0.0);
        let position = Vec3::new(0.5 - 1.0, 1.0, -1.0);
        controls.sync_from(position, target);

        assert!((controls.radius - 3.0_f32.sqrt()).abs() < 1e-5);
        let recovered = controls.center + controls.offset_direction() * controls.radius;
        assert!(recovered.abs_diff_eq(position, 1e-5));
    }

    #[test]
    fn test_rotation_stays_within_limits() {
        let mut controls = bounded();
        controls.sync_from(Vec3::new(-1.0, 0.5, -1.0), Vec3::ZERO);

        for _ in 0..50 {
            controls.rotate(Vec2::new(-5000.0, -5000.0), 600.0);
            controls.update(1.0 / 60.0);
            assert!(controls.theta >= -PI && controls.theta <= 0.0);
            assert!(controls.phi >= PI / 3.0 - 1e-6 && controls.phi <= PI / 2.0 + 1e-6);
        }
        for _ in 0..50 {
            controls.rotate(Vec2::new(5000.0, 5000.0), 600.0);
            controls.update(1.0 / 60.0);
            assert!(controls.theta >= -PI && controls.theta <= 0.0);
            assert!(controls.phi >= PI / 3.0 - 1e-6 && controls.phi <= PI / 2.0 + 1e-6);
        }
    }

    #[test]
    fn test_unbounded_polar_stops_short_of_poles() {
        let mut controls = OrbitControls::new(Vec3::ZERO, 2.0);
        for _ in 0..100 {
            controls.rotate(Vec2::new(0.0, 5000.0), 600.0);
            controls.update(1.0 / 60.0);
        }
        assert!(controls.phi > 0.0 && controls.phi < 0.001);

        for _ in 0..100 {
            controls.rotate(Vec2::new(0.0, -5000.0), 600.0);
            controls.update(1.0 / 60.0);
        }
        assert!(controls.phi < PI && controls.phi > PI - 0.001);
    }

    #[test]
    fn test_dolly_clamped_to_range() {
        let mut controls = bounded();
        controls.dolly(1000.0);
        for _ in 0..200 {
            controls.update(1.0 / 60.0);
        }
        assert!((controls.radius - 1.0).abs() < 1e-5);

        controls.dolly(-1000.0);
        for _ in 0..200 {
            controls.update(1.0 / 60.0);
        }
        assert!((controls.radius - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_damping_spreads_motion_over_frames() {
        let mut controls = bounded();
        controls.sync_from(Vec3::new(-1.0, 0.0, -1.0), Vec3::ZERO);
        let start = controls.theta;

        controls.rotate(Vec2::new(10.0, 0.0), 600.0);
        controls.update(1.0 / 60.0);
        let first = controls.theta;
        assert!(controls.is_moving());

        controls.update(1.0 / 60.0);
        let second = controls.theta;

        let step1 = (first - start).abs();
        let step2 = (second - first).abs();
        assert!(step1 > 0.0);
        // Damping factor 0.1 at 60 fps keeps 90% of the remaining motion
        assert!((step2 / step1 - 0.9).abs() < 1e-3);
    }

    #[test]
    fn test_pan_disabled_keeps_target() {
        let mut controls = bounded();
        let input = OrbitInput {
            pan: Vec2::new(100.0, 50.0),
            screen_height: 600.0,
            ..Default::default()
        };
        controls.apply_input(&input);
        controls.update(1.0 / 60.0);
        assert_eq!(controls.center, Vec3::ZERO);
    }
}
