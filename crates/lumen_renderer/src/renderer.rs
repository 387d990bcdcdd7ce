//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with a bounce cap
//! - Anti-aliasing via jittered multi-sampling
//! - Gamma-2 correction of the averaged samples

use crate::sampling::gen_f64;
use crate::{Camera, Color, Hittable, Ray, RenderError, RenderResult};
use lumen_math::Interval;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Bounce cap used by `RenderConfig::default()`.
pub const DEFAULT_MAX_DEPTH: u32 = 50;

/// Self-intersection epsilon used by `RenderConfig::default()`.
pub const DEFAULT_T_MIN: f64 = 1e-4;

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Number of scatter events before a path is cut off (returns black)
    pub max_depth: u32,
    /// Hits closer than this along a ray are ignored
    pub t_min: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 200,
            samples_per_pixel: 100,
            max_depth: DEFAULT_MAX_DEPTH,
            t_min: DEFAULT_T_MIN,
        }
    }
}

impl RenderConfig {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set samples per pixel.
    pub fn with_samples(mut self, samples: u32) -> Self {
        self.samples_per_pixel = samples;
        self
    }

    /// Set the bounce cap.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Width / height, for building a matching camera.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Reject settings that cannot produce an image.
    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::ZeroSamples);
        }
        if self.max_depth == 0 {
            return Err(RenderError::ZeroDepth);
        }
        if !(self.t_min.is_finite() && self.t_min >= 0.0) {
            return Err(RenderError::InvalidEpsilon(self.t_min));
        }
        Ok(())
    }
}

/// Compute the color seen by a ray.
///
/// `depth` counts scatter events so far. Paths that are absorbed, or that
/// reach `config.max_depth` bounces, contribute black.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let Some(rec) = world.hit(ray, Interval::from_min(config.t_min)) else {
        return sky_gradient(ray);
    };

    // Check the cap before recursing
    if depth >= config.max_depth {
        return Color::ZERO;
    }

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            result.attenuation * ray_color(&result.scattered, world, depth + 1, config, rng)
        }
        None => Color::ZERO,
    }
}

/// Compute sky gradient background.
///
/// Blends white (looking down) into sky blue (looking up).
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Gamma-correct a linear color and clamp it to [0, 1].
pub fn gamma_correct(color: Color) -> Color {
    let intensity = Interval::new(0.0, 1.0);
    Color::new(
        intensity.clamp(linear_to_gamma(color.x)),
        intensity.clamp(linear_to_gamma(color.y)),
        intensity.clamp(linear_to_gamma(color.z)),
    )
}

/// Average linear color of pixel (x, y), row 0 being the top of the image.
///
/// Fails if `config` is invalid or the pixel lies outside the image.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> RenderResult<Color> {
    config.validate()?;
    if x >= config.width || y >= config.height {
        return Err(RenderError::PixelOutOfBounds {
            x,
            y,
            width: config.width,
            height: config.height,
        });
    }
    Ok(sample_pixel(camera, world, x, y, config, rng))
}

/// `render_pixel` for a validated config and an in-bounds pixel.
fn sample_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;
    let width = config.width as f64;
    let height = config.height as f64;
    // Image plane v runs bottom to top
    let row_from_bottom = (config.height - 1 - y) as f64;

    for _ in 0..config.samples_per_pixel {
        let u = (x as f64 + gen_f64(rng)) / width;
        let v = (row_from_bottom + gen_f64(rng)) / height;
        let ray = camera.get_ray(u, v, rng);
        pixel_color += ray_color(&ray, world, 0, config, rng);
    }

    // Average the samples
    pixel_color / config.samples_per_pixel as f64
}

/// Gamma-corrected image, row-major, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width as usize) * (height as usize)],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.pixels.chunks(self.width.max(1) as usize)
    }

    /// Convert to packed 8-bit RGB (for display or saving).
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb8(*color));
        }
        bytes
    }
}

/// Convert a gamma-corrected color to 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let channel = |c: f64| (255.99 * c.clamp(0.0, 1.0)) as u8;
    [channel(color.x), channel(color.y), channel(color.z)]
}

/// Render the entire scene to an image buffer.
///
/// Single-threaded; the pixel order, and therefore the random sequence each
/// pixel sees, is fixed, so a seeded `rng` reproduces the image exactly.
pub fn render(
    world: &dyn Hittable,
    camera: &Camera,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> RenderResult<ImageBuffer> {
    config.validate()?;

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth
    );
    let start = Instant::now();

    let mut image = ImageBuffer::new(config.width, config.height);
    for y in 0..config.height {
        log::debug!("Scanline {}/{}", y + 1, config.height);
        for x in 0..config.width {
            let color = sample_pixel(camera, world, x, y, config, rng);
            image.set(x, y, gamma_correct(color));
        }
    }

    log::info!("Rendered in {:?}", start.elapsed());
    Ok(image)
}
