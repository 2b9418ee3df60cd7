use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::window::{PresentMode, WindowTheme};
use bevy_egui::EguiPlugin;

mod galaxy;
mod graphics;
mod ui;

mod prelude;

/// Fixes the generation seed so a galaxy can be reproduced
const SEED_ENV_VAR: &str = "GALAXY_SEED";

fn main() {
    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Galaxy Points".into(),
                    name: Some("bevy.app".into()),
                    present_mode: PresentMode::AutoVsync,
                    fit_canvas_to_parent: true,
                    prevent_default_event_handling: false,
                    window_theme: Some(WindowTheme::Dark),
                    ..default()
                }),
                ..default()
            })
            .set(LogPlugin {
                filter: "wgpu=error,naga=warn,galaxy_points=info".into(),
                ..default()
            }),
    );

    // read after LogPlugin so a rejected value is reported
    let seed = parse_seed(std::env::var(SEED_ENV_VAR).ok().as_deref());

    app.add_plugins(EguiPlugin {
        enable_multipass_for_primary_context: false,
    })
    .add_plugins((
        galaxy::GalaxyPlugin { seed },
        graphics::GraphicsPlugin,
        ui::UiPlugin,
    ))
    .run();
}

fn parse_seed(value: Option<&str>) -> Option<u64> {
    let value = value?;
    match value.trim().parse::<u64>() {
        Ok(seed) => Some(seed),
        Err(err) => {
            warn!("Ignoring {SEED_ENV_VAR}={value:?} ({err}), seeding from the OS instead");
            None
        }
    }
}
