use bevy::{
    input::mouse::AccumulatedMouseMotion,
    prelude::*,
    window::PrimaryWindow,
};
use std::f32::consts::{PI, TAU};

/// Keeps the polar angle away from the poles so `look_at` never degenerates
const POLE_EPSILON: f32 = 1.0e-6;

/// Position on a sphere around a focus point.
/// `theta` is measured around +Y from +Z, `phi` down from +Y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,
}

impl Spherical {
    pub fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self {
                radius,
                theta: 0.0,
                phi: 0.0,
            };
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_offset(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        vec3(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }

    pub fn make_safe(&mut self) {
        self.phi = self.phi.clamp(POLE_EPSILON, PI - POLE_EPSILON);
    }
}

/// Damped orbit controller, rotation only.
/// Drag input accumulates as a pending rotation which is applied a
/// `damping_factor` fraction at a time, so motion eases out after release.
/// The camera's current translation is re-read every frame, so other systems
/// may move the camera after `OrbitCameraSystems` and the orbit follows.
#[derive(Component, Clone, Debug)]
pub struct OrbitCamera {
    pub focus: Vec3,
    pub enabled: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pending_theta: f32,
    pending_phi: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            enabled: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            pending_theta: 0.0,
            pending_phi: 0.0,
        }
    }
}

impl OrbitCamera {
    pub fn rotate_left(&mut self, angle: f32) {
        self.pending_theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.pending_phi -= angle;
    }

    /// Integrates pending input into `translation` and returns the new camera position
    pub fn advance(&mut self, translation: Vec3) -> Vec3 {
        let mut spherical = Spherical::from_offset(translation - self.focus);

        spherical.theta += self.pending_theta * self.damping_factor;
        spherical.phi += self.pending_phi * self.damping_factor;
        spherical.make_safe();

        self.pending_theta *= 1.0 - self.damping_factor;
        self.pending_phi *= 1.0 - self.damping_factor;

        self.focus + spherical.to_offset()
    }
}

pub(crate) fn orbit_input_system(
    mut query: Query<&mut OrbitCamera>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let height = window.height().max(1.0);

    if !mouse_buttons.pressed(MouseButton::Left) || mouse_motion.delta == Vec2::ZERO {
        return;
    }
    let drag = mouse_motion.delta;

    for mut orbit in &mut query {
        if !orbit.enabled {
            continue;
        }
        let speed = orbit.rotate_speed;
        orbit.rotate_left(TAU * drag.x / height * speed);
        orbit.rotate_up(TAU * drag.y / height * speed);
    }
}

pub(crate) fn orbit_update_system(mut query: Query<(&mut Transform, &mut OrbitCamera)>) {
    for (mut transform, mut orbit) in &mut query {
        transform.translation = orbit.advance(transform.translation);
        transform.look_at(orbit.focus, Vec3::Y);
    }
}
