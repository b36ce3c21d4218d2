use bevy::prelude::*;

mod galaxy_config;
mod point_set;
pub mod spiral;

pub use galaxy_config::{
    CommitGalaxyConfig, CommitSystems, GalaxyConfig, GalaxyConfigPlugin, GalaxyConfigUi,
    GalaxyParameters,
};
pub use point_set::PointSetPlugin;

/// Number of points in the live galaxy
#[derive(Resource)]
pub struct PointCount {
    pub count: usize,
}
