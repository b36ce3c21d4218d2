use crate::prelude::*;
use bevy::diagnostic::DiagnosticsStore;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use orbit_camera::OrbitCamera;

pub struct FpsWidgetPlugin;

impl Plugin for FpsWidgetPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_widget)
            .add_systems(Update, update_widget_system)
            .add_plugins(FrameTimeDiagnosticsPlugin::default());
    }
}

#[derive(Component)]
struct StatsWidget;

fn setup_widget(mut commands: Commands) {
    commands
        .spawn((
            Node {
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::FlexStart,
                position_type: PositionType::Absolute,
                justify_content: JustifyContent::FlexStart,
                width: Val::Px(260.),
                right: Val::Percent(1.),
                top: Val::Percent(1.),
                bottom: Val::Auto,
                left: Val::Auto,
                padding: UiRect::all(Val::Px(8.0)),
                ..default()
            },
            BackgroundColor(Color::linear_rgba(0.0, 0.03, 0.08, 0.5)),
            GlobalZIndex(i32::MAX - 1),
        ))
        .with_children(|parent| {
            parent.spawn((
                StatsWidget,
                Text(" N/A".to_string()),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
            ));
        });
}

fn update_widget_system(
    diagnostics: Res<DiagnosticsStore>,
    point_count: Res<PointCount>,
    camera_query: Query<&Transform, With<OrbitCamera>>,
    mut query: Query<&mut Text, With<StatsWidget>>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed())
        .unwrap_or(0.0);
    let frame_time = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FRAME_TIME)
        .and_then(|fps| fps.smoothed())
        .unwrap_or(0.0);
    let Ok(camera) = camera_query.single() else {
        return;
    };
    let camera = camera.translation;

    for mut text in &mut query {
        text.0 = format!(
            "{:>8} {fps:.1} ({frame_time:.2} ms)\n{:>8} {}\n{:>8} ({:.2}, {:.2}, {:.2})",
            "FPS:", "Points:", point_count.count, "Camera:", camera.x, camera.y, camera.z
        );
    }
}
