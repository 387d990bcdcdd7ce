//! Simple path tracer example.
//!
//! Renders a small scene with every primitive and material and saves it as
//! PPM, or PNG when the output path ends in `.png`.
//!
//! Usage: `simple_render [settings.json]`
//!
//! The optional JSON file may override any of:
//! `{ "render": {..}, "camera": {..}, "seed": 7, "output": "out.png" }`

use anyhow::{Context, Result};
use lumen_renderer::{
    render, CameraSettings, Color, Cube, Dielectric, HittableList, ImageBuffer, Lambertian,
    Material, Metal, Plane, RenderConfig, Sphere, Torus, Vec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DemoSettings {
    render: RenderConfig,
    camera: CameraSettings,
    seed: u64,
    output: PathBuf,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            camera: CameraSettings {
                look_from: [3.0, 2.0, 2.0],
                look_at: [0.0, 0.0, -1.0],
                vfov: 40.0,
                aperture: 0.05,
                ..Default::default()
            },
            seed: 7,
            output: PathBuf::from("output.ppm"),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = match std::env::args().nth(1) {
        Some(path) => load_settings(Path::new(&path))?,
        None => DemoSettings::default(),
    };

    let world = build_scene();
    log::info!("Scene has {} objects", world.len());

    let camera = settings
        .camera
        .build(settings.render.aspect_ratio())
        .context("Failed to build camera")?;

    let mut rng = StdRng::seed_from_u64(settings.seed);
    let image = render(&world, &camera, &settings.render, &mut rng)?;

    save_image(&image, &settings.output)?;
    log::info!("Saved to {}", settings.output.display());
    Ok(())
}

fn load_settings(path: &Path) -> Result<DemoSettings> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid settings in {}", path.display()))
}

fn build_scene() -> HittableList {
    let ground: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.8, 0.8, 0.0)));
    let matte: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.1, 0.2, 0.5)));
    let gold: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 0.3));
    let mirror: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.9, 0.9, 0.9), 0.0));
    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    let clay: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.7, 0.3, 0.3)));

    let mut world = HittableList::new();

    world.add(Box::new(Plane::new(Vec3::Y, Vec3::new(0.0, -0.5, 0.0), ground)));
    world.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, matte)));
    world.add(Box::new(Sphere::new(Vec3::new(1.0, 0.0, -1.0), 0.5, gold)));
    world.add(Box::new(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), 0.5, glass)));

    let mut cube = Cube::with_center(Vec3::new(-0.2, -0.3, 0.2), 0.2, clay);
    cube.rotate_y(30.0);
    world.add(Box::new(cube));

    world.add(Box::new(Torus::new(
        Vec3::new(0.9, -0.35, 0.0),
        Vec3::Y,
        0.3,
        0.1,
        mirror,
    )));

    world
}

fn save_image(image: &ImageBuffer, path: &Path) -> Result<()> {
    let is_png = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));

    if is_png {
        let rgb = image::RgbImage::from_raw(image.width, image.height, image.to_rgb8())
            .context("Image buffer size does not match its dimensions")?;
        rgb.save(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    } else {
        save_ppm(image, path)?;
    }
    Ok(())
}

fn save_ppm(image: &ImageBuffer, path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for row in image.rows() {
        for &color in row {
            let [r, g, b] = lumen_renderer::color_to_rgb8(color);
            writeln!(writer, "{} {} {}", r, g, b)?;
        }
    }

    writer.flush()?;
    Ok(())
}
