use crate::prelude::*;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use orbit_camera::OrbitCamera;

pub struct ConfigEguiPlugin;

impl Plugin for ConfigEguiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, configure_visuals_system)
            .add_systems(Update, ui_system.before(CommitSystems));
    }
}

fn configure_visuals_system(mut contexts: EguiContexts) {
    contexts.ctx_mut().set_visuals(egui::Visuals {
        window_corner_radius: 0.0.into(),
        ..Default::default()
    });
}

/// A value counts as edited once the user lets go of the slider, or on a
/// discrete change such as a click on the track or a typed value
fn finished_editing(response: &egui::Response) -> bool {
    response.drag_stopped() || (response.changed() && !response.dragged())
}

fn galaxy_ui(params: &mut GalaxyParameters, ui: &mut egui::Ui) -> bool {
    let (minval, maxval, step) = (
        GalaxyParameters::MIN,
        GalaxyParameters::MAX,
        GalaxyParameters::STEP,
    );
    let mut finished = false;

    finished |= finished_editing(
        &ui.add(
            egui::Slider::new(&mut params.count, minval.count..=maxval.count)
                .step_by(step.count as f64)
                .text("count"),
        ),
    );
    finished |= finished_editing(
        &ui.add(
            egui::Slider::new(&mut params.size, minval.size..=maxval.size)
                .step_by(step.size as f64)
                .max_decimals(3)
                .text("size"),
        ),
    );
    finished |= finished_editing(
        &ui.add(
            egui::Slider::new(&mut params.radius, minval.radius..=maxval.radius)
                .step_by(step.radius as f64)
                .max_decimals(2)
                .text("radius"),
        ),
    );
    finished |= finished_editing(
        &ui.add(
            egui::Slider::new(&mut params.branches, minval.branches..=maxval.branches)
                .step_by(step.branches as f64)
                .text("branches"),
        ),
    );
    finished |= finished_editing(
        &ui.add(
            egui::Slider::new(&mut params.spin, minval.spin..=maxval.spin)
                .step_by(step.spin as f64)
                .max_decimals(3)
                .text("spin"),
        ),
    );

    finished
}

fn ui_system(
    mut contexts: EguiContexts,
    mut galaxy_config_ui: ResMut<GalaxyConfigUi>,
    mut commits: EventWriter<CommitGalaxyConfig>,
    mut orbit_query: Query<&mut OrbitCamera>,
) {
    let ctx = contexts.ctx_mut();
    let mut finished = false;

    egui::SidePanel::left("side_panel")
        .default_width(300.0)
        .show(ctx, |ui| {
            ui.heading("Galaxy");
            finished = galaxy_ui(&mut galaxy_config_ui.0, ui);
        });

    if finished {
        commits.write(CommitGalaxyConfig);
    }

    // dragging on the panel shouldn't spin the camera
    let pointer_on_panel = ctx.is_pointer_over_area() || ctx.wants_pointer_input();
    for mut orbit in &mut orbit_query {
        orbit.enabled = !pointer_on_panel;
    }
}
