use crate::graphics::{
    GalaxyPointsMaterial, ATTRIBUTE_RANDOMNESS, ATTRIBUTE_STAR_COLOR, ATTRIBUTE_STAR_SCALE,
};
use crate::prelude::*;
use bevy::{
    pbr::NotShadowCaster,
    prelude::*,
    render::{
        mesh::{Indices, PrimitiveTopology},
        render_asset::RenderAssetUsages,
        view::NoFrustumCulling,
    },
};
use rayon::prelude::*;

/// Where the galaxy sits in the scene. Fixed, not part of the parameters.
pub const GALAXY_TRANSLATION: Vec3 = Vec3::new(-10.0, 0.5, 0.0);
pub const GALAXY_SCALE: f32 = 10.0;

// uv of each sprite corner, the vertex shader expands around the point
const QUAD_CORNERS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

#[derive(Component, Debug)]
pub struct GalaxyPoints {
    pub generation: u32,
}

/// One generation's drawable: the entity in the scene plus the mesh and
/// material assets it owns.
///
/// Deliberately not `Clone`; [`GalaxyPointCloud::release`] consumes it, so
/// each cloud can only be released once.
#[derive(Debug)]
pub struct GalaxyPointCloud {
    pub entity: Entity,
    pub mesh: Handle<Mesh>,
    pub material: Handle<GalaxyPointsMaterial>,
    pub generation: u32,
    pub point_count: usize,
}

impl GalaxyPointCloud {
    pub fn spawn(
        commands: &mut Commands,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<GalaxyPointsMaterial>,
        buffers: &GalaxyBuffers,
        params: &GalaxyParameters,
        generation: u32,
    ) -> Self {
        let mesh = meshes.add(build_points_mesh(buffers));
        let material = materials.add(GalaxyPointsMaterial::new(params.point_size));

        let entity = commands
            .spawn((
                Name::new(format!("Galaxy #{generation}")),
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material.clone()),
                Transform::from_translation(GALAXY_TRANSLATION)
                    .with_scale(Vec3::splat(GALAXY_SCALE)),
                GalaxyPoints { generation },
                NotShadowCaster,
                // offsets and animation move points outside the mesh bounds
                NoFrustumCulling,
            ))
            .id();

        Self {
            entity,
            mesh,
            material,
            generation,
            point_count: buffers.len(),
        }
    }

    /// Detaches the cloud from the scene and frees its assets
    pub fn release(
        self,
        commands: &mut Commands,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<GalaxyPointsMaterial>,
    ) {
        commands.entity(self.entity).despawn();
        // the mesh may already live only in the render world
        meshes.remove(&self.mesh);
        let released = materials.remove(&self.material);
        debug_assert!(
            released.is_some(),
            "galaxy #{} material was already released",
            self.generation
        );
    }
}

/// Expands every point into a camera-facing quad.
///
/// The four corners of a quad carry identical point data and differ only in
/// their uv, which the vertex shader uses to offset them in view space.
pub fn build_points_mesh(buffers: &GalaxyBuffers) -> Mesh {
    let count = buffers.len();

    let positions: Vec<[f32; 3]> = buffers
        .positions
        .par_iter()
        .flat_map_iter(|p| [*p; 4])
        .collect();
    let colors: Vec<[f32; 3]> = buffers
        .colors
        .par_iter()
        .flat_map_iter(|c| [*c; 4])
        .collect();
    let scales: Vec<f32> = buffers.scales.par_iter().flat_map_iter(|s| [*s; 4]).collect();
    let randomness: Vec<[f32; 3]> = buffers
        .randomness
        .par_iter()
        .flat_map_iter(|r| [*r; 4])
        .collect();
    let corners: Vec<[f32; 2]> = (0..count)
        .into_par_iter()
        .flat_map_iter(|_| QUAD_CORNERS)
        .collect();

    let indices: Vec<u32> = (0..count as u32)
        .into_par_iter()
        .flat_map_iter(|point| {
            let base = point * 4;
            [base, base + 1, base + 2, base, base + 2, base + 3]
        })
        .collect();

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(ATTRIBUTE_STAR_COLOR, colors)
    .with_inserted_attribute(ATTRIBUTE_STAR_SCALE, scales)
    .with_inserted_attribute(ATTRIBUTE_RANDOMNESS, randomness)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, corners)
    .with_inserted_indices(Indices::U32(indices))
}
