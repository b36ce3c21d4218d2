use bevy::prelude::*;

/// The five tunable values that shape the galaxy
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct GalaxyParameters {
    pub count: u32,
    pub size: f32,
    pub radius: f32,
    pub branches: u32,
    pub spin: f32,
}

impl Default for GalaxyParameters {
    fn default() -> Self {
        Self {
            count: 100_000,
            size: 0.01,
            radius: 16.63,
            branches: 13,
            spin: 0.07,
        }
    }
}

impl GalaxyParameters {
    pub const MIN: Self = Self {
        count: 100,
        size: 0.001,
        radius: 0.01,
        branches: 2,
        spin: -5.0,
    };
    pub const MAX: Self = Self {
        count: 100_000,
        size: 0.1,
        radius: 20.0,
        branches: 20,
        spin: 5.0,
    };
    pub const STEP: Self = Self {
        count: 100,
        size: 0.001,
        radius: 0.01,
        branches: 1,
        spin: 0.001,
    };
}

/// Committed parameters, read by the point set builder.
/// `generation` increments on every commit, the builder rebuilds whenever it moves.
#[derive(Resource, Clone, PartialEq, Debug)]
pub struct GalaxyConfig {
    pub generation: i32,
    pub parameters: GalaxyParameters,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            generation: 0,
            parameters: GalaxyParameters::default(),
        }
    }
}

/// Draft parameters bound to the panel sliders, may differ from `GalaxyConfig` mid-edit
#[derive(Resource, Clone, Copy, PartialEq, Debug, Default)]
pub struct GalaxyConfigUi(pub GalaxyParameters);

/// Sent when the user finishes editing a control
#[derive(Event, Clone, Copy, Debug, Default)]
pub struct CommitGalaxyConfig;

/// Applies committed edits. Readers of `GalaxyConfig` run `.after` this set.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitSystems;

pub struct GalaxyConfigPlugin;

impl Plugin for GalaxyConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GalaxyConfig>()
            .init_resource::<GalaxyConfigUi>()
            .add_event::<CommitGalaxyConfig>()
            .add_systems(Update, commit_ui_updates.in_set(CommitSystems));
    }
}

/// Copies the draft into the committed config.
/// A commit always bumps the generation, even if no value changed.
fn commit_ui_updates(
    mut commits: EventReader<CommitGalaxyConfig>,
    galaxy_config_ui: Res<GalaxyConfigUi>,
    mut galaxy_config: ResMut<GalaxyConfig>,
) {
    if commits.read().count() == 0 {
        return;
    }

    galaxy_config.parameters = galaxy_config_ui.0;
    galaxy_config.generation += 1;

    info!(
        "Galaxy config committed (generation {}): {:?}",
        galaxy_config.generation, galaxy_config.parameters
    );
}
