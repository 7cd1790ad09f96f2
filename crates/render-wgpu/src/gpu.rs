use crate::shaders;
use crate::texture::{Texture, TextureError};
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use meshview_camera::{OrientationCamera, Projection};
use meshview_common::{Color, MeshId};
use meshview_mesh::MeshData;
use meshview_scene::{Paint, Scene, SceneObject};
use std::collections::HashMap;
use wgpu::util::DeviceExt;

/// Errors from the wgpu backend.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Texture(#[from] TextureError),
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
    color: [f32; 4],
    uv: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct InstanceData {
    model_0: [f32; 4],
    model_1: [f32; 4],
    model_2: [f32; 4],
    model_3: [f32; 4],
    tint: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct GridVertex {
    position: [f32; 3],
    color: [f32; 4],
}

/// Flatten triangulated faces into the GPU vertex layout. Corners without a
/// UV index sample the texture at (0, 0), which is exact for the white
/// fallback texture.
fn flatten_mesh(mesh: &MeshData, base_color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for tri in mesh.triangles() {
        for corner in tri {
            let position = mesh.positions[corner.position as usize];
            let uv = corner
                .uv
                .map(|i| mesh.uvs[i as usize])
                .unwrap_or(glam::Vec2::ZERO);
            vertices.push(Vertex {
                position: position.to_array(),
                color: base_color,
                uv: uv.to_array(),
            });
        }
    }
    vertices
}

/// Generate grid floor line vertices.
fn grid_mesh(half_extent: i32, spacing: f32) -> Vec<GridVertex> {
    let mut verts = Vec::new();
    let color = [0.4, 0.4, 0.4, 1.0];
    let extent = half_extent as f32 * spacing;

    for i in -half_extent..=half_extent {
        let offset = i as f32 * spacing;
        // Lines along X
        verts.push(GridVertex {
            position: [-extent, 0.0, offset],
            color,
        });
        verts.push(GridVertex {
            position: [extent, 0.0, offset],
            color,
        });
        // Lines along Z
        verts.push(GridVertex {
            position: [offset, 0.0, -extent],
            color,
        });
        verts.push(GridVertex {
            position: [offset, 0.0, extent],
            color,
        });
    }
    verts
}

/// Uploaded mesh data cached per scene object.
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    texture: Texture,
}

/// wgpu-based scene renderer.
pub struct WgpuRenderer {
    mesh_pipeline: wgpu::RenderPipeline,
    grid_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    texture_layout: wgpu::BindGroupLayout,
    grid_vertex_buffer: wgpu::Buffer,
    grid_vertex_count: u32,
    instance_buffer: wgpu::Buffer,
    max_instances: u32,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
    meshes: HashMap<MeshId, GpuMesh>,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        // Uniform buffer
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        // Mesh pipeline
        let mesh_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mesh_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::MESH_SHADER.into()),
        });

        let mesh_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mesh_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &mesh_shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<Vertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![
                            0 => Float32x3,
                            1 => Float32x4,
                            2 => Float32x2,
                        ],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<InstanceData>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &wgpu::vertex_attr_array![
                            3 => Float32x4,
                            4 => Float32x4,
                            5 => Float32x4,
                            6 => Float32x4,
                            7 => Float32x4,
                        ],
                    },
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &mesh_shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                // Imported meshes have no guaranteed winding; draw both sides.
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        // Grid pipeline
        let grid_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("grid_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::GRID_SHADER.into()),
        });

        let grid_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("grid_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let grid_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("grid_pipeline"),
            layout: Some(&grid_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &grid_shader,
                entry_point: Some("vs_grid"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<GridVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x4,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &grid_shader,
                entry_point: Some("fs_grid"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        // Grid mesh
        let grid_verts = grid_mesh(50, 1.0);
        let grid_vertex_count = grid_verts.len() as u32;
        let grid_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("grid_vertex_buffer"),
            contents: bytemuck::cast_slice(&grid_verts),
            usage: wgpu::BufferUsages::VERTEX,
        });

        // Instance buffer (pre-allocated)
        let max_instances = 1024u32;
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_buffer"),
            size: (max_instances as u64) * std::mem::size_of::<InstanceData>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            mesh_pipeline,
            grid_pipeline,
            uniform_buffer,
            uniform_bind_group,
            texture_layout,
            grid_vertex_buffer,
            grid_vertex_count,
            instance_buffer,
            max_instances,
            depth_texture,
            surface_format,
            meshes: HashMap::new(),
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Drop the cached GPU buffers for an object, forcing a re-upload on the
    /// next frame. Call after changing its paint.
    pub fn invalidate(&mut self, id: MeshId) {
        self.meshes.remove(&id);
    }

    /// Render one frame: grid floor + scene meshes.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        camera: &OrientationCamera,
        projection: &Projection,
        scene: &Scene,
        selected: Option<MeshId>,
        background: Color,
    ) -> Result<(), RenderError> {
        let vp = projection.view_projection(camera);
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                view_proj: vp.to_cols_array_2d(),
            }),
        );

        // Drop cache entries for removed objects, then upload anything new.
        self.meshes.retain(|id, _| scene.get(*id).is_some());
        for (id, object) in scene.objects() {
            if !self.meshes.contains_key(id) {
                let gpu_mesh = self.upload(device, queue, object)?;
                self.meshes.insert(*id, gpu_mesh);
            }
        }

        // Per-object instance data, in scene iteration order.
        let mut instances: Vec<InstanceData> = Vec::new();
        let mut draws: Vec<MeshId> = Vec::new();
        for (id, object) in scene.objects() {
            if instances.len() >= self.max_instances as usize {
                tracing::warn!("instance budget exceeded, dropping remaining objects");
                break;
            }
            let t = &object.transform;
            let model = Mat4::from_scale_rotation_translation(t.scale, t.rotation, t.position);
            let cols = model.to_cols_array_2d();

            let tint = if selected == Some(*id) {
                [1.0, 0.8, 0.2, 1.0] // Highlight for selection
            } else {
                [1.0, 1.0, 1.0, 1.0]
            };

            instances.push(InstanceData {
                model_0: cols[0],
                model_1: cols[1],
                model_2: cols[2],
                model_3: cols[3],
                tint,
            });
            draws.push(*id);
        }

        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }

        let [r, g, b, _] = background.as_rgba_f32();
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            // Draw grid floor
            pass.set_pipeline(&self.grid_pipeline);
            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            pass.set_vertex_buffer(0, self.grid_vertex_buffer.slice(..));
            pass.draw(0..self.grid_vertex_count, 0..1);

            // Draw scene meshes, one instance slot each
            pass.set_pipeline(&self.mesh_pipeline);
            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            for (index, id) in draws.iter().enumerate() {
                let Some(mesh) = self.meshes.get(id) else {
                    continue;
                };
                pass.set_bind_group(1, &mesh.texture.bind_group, &[]);
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                let instance = index as u32;
                pass.draw(0..mesh.vertex_count, instance..instance + 1);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
        Ok(())
    }

    /// Upload an object's flattened vertices and resolve its paint into a
    /// vertex color + texture pair.
    fn upload(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        object: &SceneObject,
    ) -> Result<GpuMesh, RenderError> {
        let (base_color, texture) = match &object.paint {
            Paint::Solid(color) => (
                color.as_rgba_f32(),
                Texture::white(device, queue, &self.texture_layout),
            ),
            Paint::Textured(path) => (
                [1.0, 1.0, 1.0, 1.0],
                Texture::from_path(device, queue, &self.texture_layout, path)?,
            ),
        };

        let vertices = flatten_mesh(&object.mesh, base_color);
        let vertex_count = vertices.len() as u32;
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("mesh_{}", object.name)),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        tracing::debug!("uploaded {} ({} vertices)", object.name, vertex_count);

        Ok(GpuMesh {
            vertex_buffer,
            vertex_count,
            texture,
        })
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_duplicates_corners_per_triangle() {
        let cube = MeshData::unit_cube();
        let vertices = flatten_mesh(&cube, [1.0, 1.0, 1.0, 1.0]);
        // 6 quads -> 12 triangles -> 36 vertices.
        assert_eq!(vertices.len(), 36);
    }

    #[test]
    fn flatten_applies_base_color_and_uvs() {
        let cube = MeshData::unit_cube();
        let vertices = flatten_mesh(&cube, [0.5, 0.25, 0.0, 1.0]);
        assert!(vertices.iter().all(|v| v.color == [0.5, 0.25, 0.0, 1.0]));
        // The cube carries per-face UVs, so some corner must hit (1, 1).
        assert!(vertices.iter().any(|v| v.uv == [1.0, 1.0]));
    }

    #[test]
    fn grid_mesh_vertex_count() {
        let verts = grid_mesh(2, 1.0);
        // 5 lines each way, 2 vertices per line, 2 directions.
        assert_eq!(verts.len(), 20);
        assert!(verts.iter().all(|v| v.position[1] == 0.0));
    }

    #[test]
    fn grid_mesh_spans_extent() {
        let verts = grid_mesh(3, 2.0);
        let max_x = verts
            .iter()
            .map(|v| v.position[0])
            .fold(f32::MIN, f32::max);
        assert_eq!(max_x, 6.0);
    }
}
