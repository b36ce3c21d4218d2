use super::spiral;
use crate::graphics::{build_point_mesh, PointSpriteMaterial};
use crate::prelude::*;
use bevy::{prelude::*, render::view::NoFrustumCulling};

pub struct PointSetPlugin;

impl Plugin for PointSetPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(PointSetControl {
            generation: -1,
            live: None,
        })
        .insert_resource(PointCount { count: 0 })
        .add_systems(Update, manage_point_set.after(CommitSystems));
    }
}

/// Marks the entity drawing the galaxy
#[derive(Component)]
pub struct GalaxyPoints;

/// The rendered galaxy. Owns its mesh and material until released.
pub struct PointSet {
    entity: Entity,
    mesh: Handle<Mesh>,
    material: Handle<PointSpriteMaterial>,
}

impl PointSet {
    fn spawn(
        commands: &mut Commands,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<PointSpriteMaterial>,
        positions: &[f32],
        size: f32,
    ) -> Self {
        let mesh = meshes.add(build_point_mesh(positions));
        let material = materials.add(PointSpriteMaterial::new(size));

        let visibility = if positions.is_empty() {
            Visibility::Hidden
        } else {
            Visibility::Inherited
        };
        let entity = commands
            .spawn((
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material.clone()),
                Transform::IDENTITY,
                visibility,
                GalaxyPoints,
                NoFrustumCulling,
            ))
            .id();

        Self {
            entity,
            mesh,
            material,
        }
    }

    /// Frees the GPU-side assets and detaches the entity from the scene
    fn release(
        self,
        commands: &mut Commands,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<PointSpriteMaterial>,
    ) {
        meshes.remove(&self.mesh);
        materials.remove(&self.material);
        commands.entity(self.entity).despawn();
        debug!("Released galaxy point set {}", self.entity);
    }
}

#[derive(Resource)]
pub struct PointSetControl {
    generation: i32,
    live: Option<PointSet>,
}

/// Rebuilds the galaxy whenever the committed config moves to a new generation.
/// The old set is released before the new one is queued, both land in the same
/// command flush so no frame ever draws two galaxies.
fn manage_point_set(
    mut commands: Commands,
    mut point_count: ResMut<PointCount>,
    galaxy_config: Res<GalaxyConfig>,
    mut control: ResMut<PointSetControl>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<PointSpriteMaterial>>,
) {
    if control.generation == galaxy_config.generation {
        return;
    }
    control.generation = galaxy_config.generation;

    if let Some(old) = control.live.take() {
        old.release(&mut commands, &mut meshes, &mut materials);
    }

    let params = &galaxy_config.parameters;
    let positions = spiral::generate_positions(params);
    info!(
        "Regenerating galaxy: {} points, {} branches, radius {}, spin {}",
        params.count, params.branches, params.radius, params.spin
    );

    control.live = Some(PointSet::spawn(
        &mut commands,
        &mut meshes,
        &mut materials,
        &positions,
        params.size,
    ));
    point_count.count = positions.len() / 3;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::galaxy::GalaxyConfigPlugin;

    fn app() -> App {
        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<PointSpriteMaterial>>()
            .add_plugins((GalaxyConfigPlugin, PointSetPlugin));
        app
    }

    fn live_entities(app: &mut App) -> Vec<Entity> {
        let mut query = app
            .world_mut()
            .query_filtered::<Entity, With<GalaxyPoints>>();
        query.iter(app.world()).collect()
    }

    fn commit(app: &mut App, edit: impl FnOnce(&mut GalaxyParameters)) {
        edit(&mut app.world_mut().resource_mut::<GalaxyConfigUi>().0);
        app.world_mut().send_event(CommitGalaxyConfig);
        app.update();
    }

    fn asset_counts(app: &App) -> (usize, usize) {
        (
            app.world().resource::<Assets<Mesh>>().len(),
            app.world().resource::<Assets<PointSpriteMaterial>>().len(),
        )
    }

    #[test]
    fn first_frame_builds_the_galaxy() {
        let mut app = app();
        app.update();

        assert_eq!(live_entities(&mut app).len(), 1);
        assert_eq!(asset_counts(&app), (1, 1));
        assert_eq!(
            app.world().resource::<PointCount>().count,
            GalaxyParameters::default().count as usize
        );
    }

    #[test]
    fn regenerating_leaves_exactly_one_point_set() {
        let mut app = app();
        app.update();
        commit(&mut app, |p| p.count = 500);
        commit(&mut app, |p| p.branches = 3);

        assert_eq!(live_entities(&mut app).len(), 1);
        assert_eq!(asset_counts(&app), (1, 1));
        assert_eq!(app.world().resource::<PointCount>().count, 500);
    }

    #[test]
    fn size_change_rebuilds_everything() {
        let mut app = app();
        app.update();
        let before = live_entities(&mut app)[0];
        let old_mesh = app.world().get::<Mesh3d>(before).map(|m| m.id());

        commit(&mut app, |p| p.size = 0.05);

        let after = live_entities(&mut app);
        assert_eq!(after.len(), 1);
        assert_ne!(after[0], before);
        assert!(app.world().get_entity(before).is_err());

        let new_mesh = app.world().get::<Mesh3d>(after[0]).map(|m| m.id());
        assert_ne!(new_mesh, old_mesh);
        let material = app
            .world()
            .get::<MeshMaterial3d<PointSpriteMaterial>>(after[0])
            .and_then(|m| {
                app.world()
                    .resource::<Assets<PointSpriteMaterial>>()
                    .get(&m.0)
            })
            .map(|m| m.sprite.size);
        assert_eq!(material, Some(0.05));
        assert_eq!(asset_counts(&app), (1, 1));
    }

    #[test]
    fn idle_frames_do_not_regenerate() {
        let mut app = app();
        app.update();
        let before = live_entities(&mut app);

        app.world_mut().resource_mut::<GalaxyConfigUi>().0.count = 100;
        app.update();
        app.update();

        assert_eq!(live_entities(&mut app), before);
    }

    #[test]
    fn empty_galaxy_is_spawned_hidden() {
        let mut app = app();
        app.update();
        commit(&mut app, |p| p.count = 0);

        let entities = live_entities(&mut app);
        assert_eq!(entities.len(), 1);
        assert_eq!(
            app.world().get::<Visibility>(entities[0]),
            Some(&Visibility::Hidden)
        );
        assert_eq!(app.world().resource::<PointCount>().count, 0);
    }
}
