use super::point_cloud::GalaxyPointCloud;
use crate::prelude::*;
use bevy::prelude::*;

pub struct RegenerationPlugin;

impl Plugin for RegenerationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LiveGalaxy>()
            .init_resource::<RegenerationStatus>()
            .add_systems(Update, regenerate_galaxy);
    }
}

/// Slot for the one galaxy currently in the scene. Empty only before the
/// first successful generation.
#[derive(Resource, Default)]
pub struct LiveGalaxy {
    cloud: Option<GalaxyPointCloud>,
}

impl LiveGalaxy {
    pub fn current(&self) -> Option<&GalaxyPointCloud> {
        self.cloud.as_ref()
    }

    fn replace(&mut self, cloud: GalaxyPointCloud) -> Option<GalaxyPointCloud> {
        self.cloud.replace(cloud)
    }
}

/// Outcome of the latest commit, shown in the control panel
#[derive(Resource, Default, Debug)]
pub struct RegenerationStatus {
    pub generation: u32,
    pub live_points: usize,
    pub last_error: Option<GalaxyError>,
}

/// Replaces the live galaxy for every committed parameter snapshot.
///
/// Generation runs before anything is touched, so a rejected snapshot leaves
/// the current galaxy in place. Spawning the new entity and despawning the
/// old one go through the same command queue and land together.
fn regenerate_galaxy(
    mut commands: Commands,
    mut commits: EventReader<ParametersCommitted>,
    mut live_galaxy: ResMut<LiveGalaxy>,
    mut status: ResMut<RegenerationStatus>,
    mut rng: ResMut<GalaxyRng>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<GalaxyPointsMaterial>>,
) {
    for ParametersCommitted(snapshot) in commits.read() {
        let buffers = match generate_galaxy(snapshot, &mut rng.0) {
            Ok(buffers) => buffers,
            Err(err) => {
                warn!("Galaxy parameters rejected, keeping current galaxy: {err}");
                status.last_error = Some(err);
                continue;
            }
        };

        let generation = status.generation + 1;
        info!(
            "Galaxy parameters committed, regenerating {} points (generation {generation})",
            buffers.len()
        );

        let cloud = GalaxyPointCloud::spawn(
            &mut commands,
            &mut meshes,
            &mut materials,
            &buffers,
            snapshot,
            generation,
        );
        if let Some(previous) = live_galaxy.replace(cloud) {
            debug!(
                "Releasing galaxy generation {} ({} points)",
                previous.generation, previous.point_count
            );
            previous.release(&mut commands, &mut meshes, &mut materials);
        }

        status.generation = generation;
        status.live_points = buffers.len();
        status.last_error = None;
    }
}
