use bevy::{
    pbr::{MaterialPipeline, MaterialPipelineKey},
    prelude::*,
    reflect::TypePath,
    render::{
        mesh::{MeshVertexAttribute, MeshVertexBufferLayoutRef},
        render_resource::{
            AsBindGroup, RenderPipelineDescriptor, ShaderRef, ShaderType,
            SpecializedMeshPipelineError, VertexFormat,
        },
    },
};
use bytemuck::{Pod, Zeroable};

const SHADER_ASSET_PATH: &str = "shaders/galaxy_points.wgsl";

// Per-point attributes, duplicated on the four corners of each sprite quad
pub const ATTRIBUTE_STAR_COLOR: MeshVertexAttribute =
    MeshVertexAttribute::new("Vertex_StarColor", 917_640_211, VertexFormat::Float32x3);
pub const ATTRIBUTE_STAR_SCALE: MeshVertexAttribute =
    MeshVertexAttribute::new("Vertex_StarScale", 917_640_212, VertexFormat::Float32);
pub const ATTRIBUTE_RANDOMNESS: MeshVertexAttribute =
    MeshVertexAttribute::new("Vertex_Randomness", 917_640_213, VertexFormat::Float32x3);

// This struct is duplicated in galaxy_points.wgsl, so make sure to update both
#[derive(ShaderType, Pod, Zeroable, Clone, Copy, Debug, Default)]
#[repr(C)]
pub struct PointUniforms {
    /// Seconds since startup, written every frame
    pub time: f32,
    pub size: f32,
    pad: Vec2,
}

impl PointUniforms {
    pub fn new(size: f32) -> Self {
        Self {
            time: 0.0,
            size,
            pad: Vec2::ZERO,
        }
    }
}

/// Additive, depth-write-free material for the generated point sprites.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct GalaxyPointsMaterial {
    #[uniform(0)]
    pub uniforms: PointUniforms,
    pub alpha_mode: AlphaMode,
}

impl GalaxyPointsMaterial {
    pub fn new(point_size: f32) -> Self {
        Self {
            uniforms: PointUniforms::new(point_size),
            alpha_mode: AlphaMode::Add,
        }
    }
}

impl Material for GalaxyPointsMaterial {
    fn vertex_shader() -> ShaderRef {
        SHADER_ASSET_PATH.into()
    }

    fn fragment_shader() -> ShaderRef {
        SHADER_ASSET_PATH.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        self.alpha_mode
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        let vertex_layout = layout.0.get_layout(&[
            Mesh::ATTRIBUTE_POSITION.at_shader_location(0),
            ATTRIBUTE_STAR_COLOR.at_shader_location(1),
            ATTRIBUTE_STAR_SCALE.at_shader_location(2),
            ATTRIBUTE_RANDOMNESS.at_shader_location(3),
            Mesh::ATTRIBUTE_UV_0.at_shader_location(4),
        ])?;
        descriptor.vertex.buffers = vec![vertex_layout];

        if let Some(depth_stencil) = descriptor.depth_stencil.as_mut() {
            depth_stencil.depth_write_enabled = false;
        }
        Ok(())
    }
}
