use crate::prelude::*;
use bevy::prelude::*;

/// Feeds elapsed time into the live galaxy material every frame
pub struct ShaderTimePlugin;

impl Plugin for ShaderTimePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PostUpdate, feed_shader_time);
    }
}

fn feed_shader_time(
    time: Res<Time>,
    live_galaxy: Res<LiveGalaxy>,
    mut materials: ResMut<Assets<GalaxyPointsMaterial>>,
) {
    // nothing generated yet
    let Some(cloud) = live_galaxy.current() else {
        return;
    };
    let Some(mat) = materials.get_mut(&cloud.material) else {
        return;
    };
    mat.uniforms.time = time.elapsed_secs();
}
