use bevy::prelude::*;

mod points_material;
mod time_feed;

pub use points_material::{
    GalaxyPointsMaterial, ATTRIBUTE_RANDOMNESS, ATTRIBUTE_STAR_COLOR, ATTRIBUTE_STAR_SCALE,
};
pub use time_feed::ShaderTimePlugin;

pub struct GraphicsPlugin;

impl Plugin for GraphicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            MaterialPlugin::<GalaxyPointsMaterial> {
                prepass_enabled: false,
                shadows_enabled: false,
                ..default()
            },
            ShaderTimePlugin,
        ));
    }
}
