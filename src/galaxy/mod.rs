use bevy::prelude::*;

mod galaxy_config;
mod point_cloud;
mod regeneration;

pub use galaxy_config::{GalaxyConfigPlugin, GalaxyRng, ParametersCommitted};
pub use point_cloud::{GalaxyPointCloud, GalaxyPoints, GALAXY_SCALE, GALAXY_TRANSLATION};
pub use regeneration::{LiveGalaxy, RegenerationPlugin, RegenerationStatus};

#[cfg(test)]
pub(crate) use regeneration::tests::test_app;

/// Parameters, generation and the live point cloud
pub struct GalaxyPlugin {
    pub seed: Option<u64>,
}

impl Plugin for GalaxyPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            GalaxyConfigPlugin { seed: self.seed },
            RegenerationPlugin,
        ));
    }
}
