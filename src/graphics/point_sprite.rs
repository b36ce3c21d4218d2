use bevy::{
    pbr::{MaterialPipeline, MaterialPipelineKey},
    prelude::*,
    reflect::TypePath,
    render::{
        mesh::{Indices, MeshVertexBufferLayoutRef, PrimitiveTopology},
        render_asset::RenderAssetUsages,
        render_resource::{
            AsBindGroup, BlendComponent, BlendFactor, BlendOperation, BlendState,
            RenderPipelineDescriptor, ShaderRef, ShaderType, SpecializedMeshPipelineError,
        },
    },
};

const SHADER_ASSET_PATH: &str = "shaders/point_sprite.wgsl";

/// WebGL-style floor on rasterized point size, keeps distant points visible
const MIN_SPRITE_PIXELS: f32 = 1.0;

/// Quad corners on screen, wound counter-clockwise
const CORNERS: [[f32; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

pub struct PointSpritePlugin;

impl Plugin for PointSpritePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<PointSpriteMaterial> {
            prepass_enabled: false,
            shadows_enabled: false,
            ..default()
        });
    }
}

/// Builds one camera-facing quad per point.
/// Every corner carries the point centre as its position and the corner offset as uv,
/// the vertex shader pushes the corner out in clip space.
pub fn build_point_mesh(positions: &[f32]) -> Mesh {
    let centres: &[[f32; 3]] = bytemuck::cast_slice(positions);

    let mut vertices = Vec::with_capacity(centres.len() * 4);
    let mut corners = Vec::with_capacity(centres.len() * 4);
    let mut indices = Vec::with_capacity(centres.len() * 6);

    for (i, centre) in centres.iter().enumerate() {
        let base = i as u32 * 4;
        vertices.extend_from_slice(&[*centre; 4]);
        corners.extend_from_slice(&CORNERS);
        indices.extend(QUAD_INDICES.iter().map(|index| base + index));
    }

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, vertices)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, corners)
    .with_inserted_indices(Indices::U32(indices))
}

// Duplicated in point_sprite.wgsl
#[derive(ShaderType, Clone, Copy, Debug)]
pub struct PointSpriteUniform {
    pub color: LinearRgba,
    /// Edge length in pixels is `size * (viewport height / 2) / depth`
    pub size: f32,
    pub min_pixels: f32,
}

/// Additive, depth-write-free sprite material
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct PointSpriteMaterial {
    #[uniform(0)]
    pub sprite: PointSpriteUniform,
}

impl PointSpriteMaterial {
    pub fn new(size: f32) -> Self {
        Self {
            sprite: PointSpriteUniform {
                color: LinearRgba::WHITE,
                size,
                min_pixels: MIN_SPRITE_PIXELS,
            },
        }
    }
}

impl Material for PointSpriteMaterial {
    fn vertex_shader() -> ShaderRef {
        SHADER_ASSET_PATH.into()
    }

    fn fragment_shader() -> ShaderRef {
        SHADER_ASSET_PATH.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Add
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        let vertex_layout = layout.0.get_layout(&[
            Mesh::ATTRIBUTE_POSITION.at_shader_location(0),
            Mesh::ATTRIBUTE_UV_0.at_shader_location(1),
        ])?;
        descriptor.vertex.buffers = vec![vertex_layout];
        descriptor.primitive.cull_mode = None;

        if let Some(depth_stencil) = descriptor.depth_stencil.as_mut() {
            depth_stencil.depth_write_enabled = false;
        }
        if let Some(fragment) = descriptor.fragment.as_mut() {
            for target in fragment.targets.iter_mut().flatten() {
                target.blend = Some(BlendState {
                    color: BlendComponent {
                        src_factor: BlendFactor::SrcAlpha,
                        dst_factor: BlendFactor::One,
                        operation: BlendOperation::Add,
                    },
                    alpha: BlendComponent::OVER,
                });
            }
        }
        Ok(())
    }
}
