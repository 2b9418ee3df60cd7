use crate::prelude::*;
use bevy::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

/// A full parameter snapshot the control panel wants applied.
/// Each event regenerates the whole galaxy.
#[derive(Event, Clone, Debug)]
pub struct ParametersCommitted(pub GalaxyParameters);

/// Random source every regeneration draws from
#[derive(Resource)]
pub struct GalaxyRng(pub StdRng);

#[derive(Default)]
pub struct GalaxyConfigPlugin {
    /// Fixed seed for reproducible galaxies, otherwise seeded from the OS
    pub seed: Option<u64>,
}

impl Plugin for GalaxyConfigPlugin {
    fn build(&self, app: &mut App) {
        let rng = match self.seed {
            Some(seed) => {
                info!("Seeding galaxy generation with {seed}");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };

        app.insert_resource(GalaxyParameters::default())
            .insert_resource(GalaxyRng(rng))
            .add_event::<ParametersCommitted>()
            .add_systems(Startup, commit_initial_parameters);
    }
}

fn commit_initial_parameters(
    params: Res<GalaxyParameters>,
    mut commits: EventWriter<ParametersCommitted>,
) {
    commits.write(ParametersCommitted(params.clone()));
}
