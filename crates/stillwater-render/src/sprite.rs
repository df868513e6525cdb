//! GPU sprite pipelines for water particles
//!
//! Instance data comes from a storage buffer; quads are camera-facing and
//! drawn with a shared index buffer. Two pipelines share the shader module:
//! the primary additive water-sprite path and a flat-color alpha fallback
//! used when the soft-circle material is unavailable.

use crate::buffers::AttributeBuffers;
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

/// GPU instance data for a single sprite — matches WGSL struct layout.
/// 32 bytes, 16-byte aligned (2 x vec4).
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct SpriteInstance {
    pub pos_size: [f32; 4],      // xyz = position, w = display size
    pub color_opacity: [f32; 4], // rgb = color, a = display opacity
}

impl SpriteInstance {
    /// Build the instance array from the frame's packed attribute buffers
    pub fn from_buffers(buffers: &AttributeBuffers) -> Vec<SpriteInstance> {
        let positions = buffers.positions();
        let colors = buffers.colors();
        let sizes = buffers.sizes();
        let opacities = buffers.opacities();
        (0..buffers.len())
            .map(|i| SpriteInstance {
                pos_size: [
                    positions[i * 3],
                    positions[i * 3 + 1],
                    positions[i * 3 + 2],
                    sizes[i],
                ],
                color_opacity: [colors[i * 3], colors[i * 3 + 1], colors[i * 3 + 2], opacities[i]],
            })
            .collect()
    }
}

/// Camera uniforms shared across all sprite draws in a frame
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct SpriteUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_right: [f32; 4],
    pub camera_up: [f32; 4],
    pub camera_pos: [f32; 4],
}

/// The water sprite pipelines (additive primary + flat-color fallback)
pub struct WaterSpritePipeline {
    pub additive_pipeline: wgpu::RenderPipeline,
    pub fallback_pipeline: wgpu::RenderPipeline,
    pub uniform_bind_group_layout: wgpu::BindGroupLayout,
    pub instance_bind_group_layout: wgpu::BindGroupLayout,
    pub quad_index_buffer: wgpu::Buffer,
    pub uniform_buffer: wgpu::Buffer,
    pub uniform_bind_group: wgpu::BindGroup,
}

impl WaterSpritePipeline {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Water Sprite Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("water_sprite.wgsl").into()),
        });

        // Group 0: SpriteUniforms (camera data)
        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
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
                label: Some("Sprite Uniform Bind Group Layout"),
            });

        // Group 1: Instance storage buffer (read-only)
        let instance_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some("Sprite Instance Bind Group Layout"),
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Water Sprite Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout, &instance_bind_group_layout],
            push_constant_ranges: &[],
        });

        let primitive = wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        };

        // Additive blend (src_alpha + One), depth test disabled
        let additive_blend = wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
        };

        let additive_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Water Sprite Additive Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_sprite"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_sprite"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(additive_blend),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive,
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        // Fallback: flat color with standard alpha blending
        let fallback_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Water Sprite Fallback Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_sprite"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_flat"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive,
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        // Shared quad index buffer
        let quad_indices: [u32; 6] = [0, 1, 2, 2, 1, 3];
        let quad_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sprite Quad Index Buffer"),
            contents: bytemuck::cast_slice(&quad_indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        // Persistent uniform buffer for camera data
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sprite Uniform Buffer"),
            contents: bytemuck::cast_slice(&[SpriteUniforms {
                view_proj: [[0.0; 4]; 4],
                camera_right: [1.0, 0.0, 0.0, 0.0],
                camera_up: [0.0, 1.0, 0.0, 0.0],
                camera_pos: [0.0, 0.0, 0.0, 0.0],
            }]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("Sprite Uniform Bind Group"),
        });

        Self {
            additive_pipeline,
            fallback_pipeline,
            uniform_bind_group_layout,
            instance_bind_group_layout,
            quad_index_buffer,
            uniform_buffer,
            uniform_bind_group,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stillwater_core::Vec3;
    use stillwater_lakes::{LakeCategory, LakeTypeConfig};
    use stillwater_sim::{Particle, SimRng};

    #[test]
    fn instance_layout_is_gpu_compatible() {
        assert_eq!(std::mem::size_of::<SpriteInstance>(), 32);
        assert_eq!(std::mem::align_of::<SpriteInstance>(), 4);
        assert_eq!(std::mem::size_of::<SpriteUniforms>(), 112);
    }

    #[test]
    fn instances_mirror_the_attribute_buffers() {
        let mut buffers = AttributeBuffers::new(8);
        let mut rng = SimRng::new(5);
        let mut p = Particle::dormant(1);
        p.init(
            &mut rng,
            Vec3::ZERO,
            10.0,
            &LakeTypeConfig::for_category(LakeCategory::Salt),
        );
        buffers.push(&p);

        let instances = SpriteInstance::from_buffers(&buffers);
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].pos_size[3], p.display_size);
        assert_eq!(instances[0].color_opacity[3], p.display_opacity);
        assert_eq!(instances[0].color_opacity[0], p.color.r);
    }
}
