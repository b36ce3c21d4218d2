use bevy::prelude::*;

mod point_sprite;

pub use point_sprite::{build_point_mesh, PointSpriteMaterial};

pub struct GraphicsPlugin;

impl Plugin for GraphicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(point_sprite::PointSpritePlugin);
    }
}
