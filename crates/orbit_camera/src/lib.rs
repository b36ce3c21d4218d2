use bevy::prelude::*;
mod orbit;

pub use orbit::{OrbitCamera, Spherical};

/// Systems that move `OrbitCamera` entities. Order camera overrides `.after` this set.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrbitCameraSystems;

pub struct OrbitCameraPlugin;

impl Plugin for OrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PostUpdate,
            (orbit::orbit_input_system, orbit::orbit_update_system)
                .chain()
                .in_set(OrbitCameraSystems)
                .before(bevy::transform::TransformSystem::TransformPropagate),
        );
    }
}
