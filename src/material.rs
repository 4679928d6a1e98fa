//! Mirror compositing material: the shading-stage contract.
//!
//! The reflection core parameterizes this stage with three uniform inputs
//! (texture matrix, tint color, opacity) plus two samplers: the offscreen
//! reflection buffer (sampled projectively) and the surface's own diffuse
//! texture (direct UV). The compositing formula is:
//!
//! ```text
//! rgb = mix(surface.rgb, overlay(reflection.rgb, color), opacity)
//! a   = 1.0
//! ```
//!
//! where `overlay` is the per-channel photographic overlay operator. The
//! WGSL implementation lives in `shaders/mirror.wgsl`; [`overlay_blend`]
//! is the CPU reference of the same operator.

use std::borrow::Cow;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};

use crate::settings::ReflectorSettings;
use crate::target::ReflectionTarget;

/// GL clip space (z in [-1, 1]) to wgpu clip space (z in [0, 1]).
///
/// The core math operates in the GL convention; hosts multiply this in
/// front of view-projection matrices before upload.
pub const GL_TO_WGPU_DEPTH: Mat4 = Mat4::from_cols(
    Vec4::new(1.0, 0.0, 0.0, 0.0),
    Vec4::new(0.0, 1.0, 0.0, 0.0),
    Vec4::new(0.0, 0.0, 0.5, 0.0),
    Vec4::new(0.0, 0.0, 0.5, 1.0),
);

/// Per-channel photographic overlay: dark base channels multiply, bright
/// base channels screen.
///
/// Satisfies `overlay(0, x) = 0`, `overlay(1, x) = 1` and
/// `overlay(0.5, x) = x`; both branches agree at `base = 0.5`.
#[must_use]
pub fn overlay_blend(base: Vec3, blend: Vec3) -> Vec3 {
    fn channel(base: f32, blend: f32) -> f32 {
        if base < 0.5 {
            2.0 * base * blend
        } else {
            1.0 - 2.0 * (1.0 - base) * (1.0 - blend)
        }
    }

    Vec3::new(
        channel(base.x, blend.x),
        channel(base.y, blend.y),
        channel(base.z, blend.z),
    )
}

// ============================================================================
// GPU Uniform Struct
// ============================================================================

/// Uniform inputs the shading stage consumes, recomputed each frame.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct MirrorUniforms {
    /// Surface-local point → offscreen texture coordinates.
    pub texture_matrix: Mat4,
    /// Reflection tint color.
    pub color: Vec3,
    /// Compositing opacity.
    pub opacity: f32,
}

impl MirrorUniforms {
    #[must_use]
    pub fn from_settings(settings: &ReflectorSettings) -> Self {
        Self {
            texture_matrix: Mat4::IDENTITY,
            color: settings.color,
            opacity: settings.opacity,
        }
    }
}

impl Default for MirrorUniforms {
    fn default() -> Self {
        Self::from_settings(&ReflectorSettings::default())
    }
}

// ============================================================================
// Material
// ============================================================================

/// Compiled compositing resources: uniform buffer, bind group layouts and
/// the render pipeline that samples the reflection buffer projectively.
///
/// Group 0 is the host's frame data (view-projection + model matrices,
/// see `shaders/mirror.wgsl`); group 1 is owned here.
pub struct MirrorMaterial {
    frame_layout: wgpu::BindGroupLayout,
    material_layout: wgpu::BindGroupLayout,
    uniform_buffer: wgpu::Buffer,
    pipeline: Option<wgpu::RenderPipeline>,
    disposed: bool,
}

impl MirrorMaterial {
    pub fn new(device: &wgpu::Device, settings: &ReflectorSettings) -> Self {
        let source: Cow<'static, str> = match &settings.shader_override {
            Some(wgsl) => wgsl.clone(),
            None => Cow::Borrowed(include_str!("shaders/mirror.wgsl")),
        };

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Mirror Shader"),
            source: wgpu::ShaderSource::Wgsl(source),
        });

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Mirror Frame Layout"),
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

        let material_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Mirror Material Layout"),
            entries: &[
                // Binding 0: MirrorUniforms
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                // Binding 1/2: reflection buffer (projective)
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                // Binding 3/4: surface diffuse texture (direct UV)
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 4,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Mirror Pipeline Layout"),
            bind_group_layouts: &[Some(&frame_layout), Some(&material_layout)],
            immediate_size: 0,
        });

        let blend = if settings.transparent {
            Some(wgpu::BlendState::ALPHA_BLENDING)
        } else {
            Some(wgpu::BlendState::REPLACE)
        };

        // Vertex layout: position (vec3) + uv (vec2), interleaved
        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: (3 + 2) * std::mem::size_of::<f32>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 3 * std::mem::size_of::<f32>() as wgpu::BufferAddress,
                    shader_location: 1,
                },
            ],
        };

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Mirror Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[vertex_layout],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: wgpu::TextureFormat::Bgra8UnormSrgb,
                    blend,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: Some(wgpu::DepthStencilState {
                format: ReflectionTarget::DEPTH_FORMAT,
                depth_write_enabled: Some(true),
                depth_compare: Some(wgpu::CompareFunction::Less),
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Mirror Uniforms"),
            size: std::mem::size_of::<MirrorUniforms>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            frame_layout,
            material_layout,
            uniform_buffer,
            pipeline: Some(pipeline),
            disposed: false,
        }
    }

    /// Uploads this frame's uniform inputs.
    pub fn write_uniforms(&self, queue: &wgpu::Queue, uniforms: &MirrorUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    /// Builds the material bind group against the current frame's
    /// reflection target and the surface's diffuse texture.
    #[must_use]
    pub fn create_bind_group(
        &self,
        device: &wgpu::Device,
        target: &ReflectionTarget,
        surface_texture: &wgpu::TextureView,
        surface_sampler: &wgpu::Sampler,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Mirror Material Bind Group"),
            layout: &self.material_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: self.uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(target.color_view()),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(target.sampler()),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::TextureView(surface_texture),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: wgpu::BindingResource::Sampler(surface_sampler),
                },
            ],
        })
    }

    /// Layout of group 0, for hosts building the frame uniform buffer.
    #[must_use]
    pub fn frame_layout(&self) -> &wgpu::BindGroupLayout {
        &self.frame_layout
    }

    #[must_use]
    pub fn pipeline(&self) -> Option<&wgpu::RenderPipeline> {
        self.pipeline.as_ref()
    }

    /// Releases the compiled pipeline and the uniform buffer's GPU memory.
    /// Idempotent: a second call is a no-op.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.pipeline = None;
        self.uniform_buffer.destroy();
        self.disposed = true;
        log::debug!("disposed mirror material");
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}
