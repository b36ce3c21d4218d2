use bevy::{prelude::*, transform::TransformSystem};
use orbit_camera::{OrbitCamera, OrbitCameraPlugin, OrbitCameraSystems};

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(OrbitCameraPlugin)
            .add_systems(Startup, spawn_camera)
            .add_systems(
                PostUpdate,
                camera_bob_system
                    .after(OrbitCameraSystems)
                    .before(TransformSystem::TransformPropagate),
            );
    }
}

fn spawn_camera(mut commands: Commands, mut clearcolor: ResMut<ClearColor>) {
    *clearcolor = ClearColor(Color::BLACK);
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: 75f32.to_radians(),
            near: 0.1,
            far: 100.0,
            ..default()
        }),
        Transform::from_xyz(0.0, 5.2, 0.0).looking_at(Vec3::ZERO, Vec3::Y),
        OrbitCamera::default(),
        CameraBob::default(),
    ));
}

/// Vertical oscillation layered on top of the orbit controls
#[derive(Component, Clone)]
pub struct CameraBob {
    pub frequency: f32,
    pub amplitude: f32,
    pub height: f32,
}

impl Default for CameraBob {
    fn default() -> Self {
        Self {
            frequency: 3.0,
            amplitude: 1.0,
            height: 4.0,
        }
    }
}

impl CameraBob {
    fn height_at(&self, elapsed_secs: f32) -> f32 {
        (elapsed_secs * self.frequency).sin() * self.amplitude + self.height
    }
}

fn camera_bob_system(
    time: Res<Time>,
    mut query: Query<(&mut Transform, &CameraBob, &OrbitCamera)>,
) {
    for (mut transform, bob, orbit) in &mut query {
        transform.translation.y = bob.height_at(time.elapsed_secs());
        transform.look_at(orbit.focus, Vec3::Y);
    }
}
