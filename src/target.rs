//! Offscreen reflection target.
//!
//! Color + depth textures the mirrored view is rendered into, written once
//! per frame by the reflection render and read once per frame by the
//! compositing pass. A wgpu host uses this as its
//! [`HostRenderer::Target`](crate::HostRenderer::Target).

use crate::errors::{ReflectorError, Result};

/// GPU offscreen target: color attachment, depth attachment, and the
/// sampler the compositing shader reads the color attachment with.
pub struct ReflectionTarget {
    color: wgpu::Texture,
    color_view: wgpu::TextureView,
    depth: wgpu::Texture,
    depth_view: wgpu::TextureView,
    sampler: wgpu::Sampler,

    width: u32,
    height: u32,
    disposed: bool,
}

impl ReflectionTarget {
    pub const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ReflectorError::InvalidTargetSize { width, height });
        }

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let color = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Reflection Color"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::COLOR_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let color_view = color.create_view(&wgpu::TextureViewDescriptor::default());

        let depth = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Reflection Depth"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let depth_view = depth.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Reflection Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        log::debug!("created reflection target {width}x{height}");

        Ok(Self {
            color,
            color_view,
            depth,
            depth_view,
            sampler,
            width,
            height,
            disposed: false,
        })
    }

    /// Color attachment for the offscreen render pass. Loads with a clear
    /// so nothing blends against the previous frame's contents.
    #[must_use]
    pub fn color_attachment(&self) -> wgpu::RenderPassColorAttachment<'_> {
        wgpu::RenderPassColorAttachment {
            view: &self.color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn color_view(&self) -> &wgpu::TextureView {
        &self.color_view
    }

    #[inline]
    #[must_use]
    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_view
    }

    #[inline]
    #[must_use]
    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Frees the underlying GPU memory. Idempotent: a second call is a
    /// no-op.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.color.destroy();
        self.depth.destroy();
        self.disposed = true;
        log::debug!("destroyed reflection target {}x{}", self.width, self.height);
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Drop for ReflectionTarget {
    fn drop(&mut self) {
        self.dispose();
    }
}
