//! Built-in demo scenes.
//!
//! Each builder returns the BVH-wrapped world and a camera configured for
//! it; the caller overrides resolution and sampling from the command line.

use std::sync::Arc;

use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::SeedableRng;

use lumen_core::{CheckerTexture, ImageTexture, NoiseTexture, Perlin};
use lumen_math::Vec3;
use lumen_renderer::{
    gen_f32, make_box, Background, BvhNode, Camera, Color, ConstantMedium, Dielectric,
    DiffuseLight, Hittable, HittableList, Lambertian, Material, Metal, Quad, Rotate, Sphere,
    Translate,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SceneKind {
    /// Checkered ground and three spheres: diffuse, glass, metal
    Spheres,
    /// Moving spheres over a checkerboard, motion blur and defocus
    Bouncing,
    /// Cornell box with two rotated boxes of smoke
    Cornell,
    /// Planar shapes, noise and image textures under an area light
    Showcase,
}

pub fn build(kind: SceneKind, seed: u64) -> (Arc<dyn Hittable>, Camera) {
    match kind {
        SceneKind::Spheres => spheres(),
        SceneKind::Bouncing => bouncing(seed),
        SceneKind::Cornell => cornell(),
        SceneKind::Showcase => showcase(seed),
    }
}

fn spheres() -> (Arc<dyn Hittable>, Camera) {
    let mut world = HittableList::new();

    let ground: Arc<dyn Material> = Arc::new(Lambertian::from_texture(Arc::new(
        CheckerTexture::from_colors(0.5, Color::new(0.2, 0.6, 0.2), Color::new(0.9, 0.9, 0.9)),
    )));
    let center: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.5, 0.1, 0.2)));
    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.7));
    let metal: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.7, 0.2, 0.7), 0.05));

    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, -100.5, -1.0),
        100.0,
        ground,
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, 0.0, -1.0),
        0.5,
        center,
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(-1.0, 0.0, -1.0),
        0.5,
        glass,
    )));
    world.add(Arc::new(Sphere::new(Vec3::new(1.0, 0.0, -1.0), 0.5, metal)));

    let camera = Camera::new()
        .with_resolution(800, 16.0 / 9.0)
        .with_position(Vec3::new(-2.0, 2.0, 1.0), Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
        .with_lens(30.0, 0.0, 3.4)
        .with_background(Background::SkyGradient);

    (Arc::new(BvhNode::from_list(world)), camera)
}

fn bouncing(seed: u64) -> (Arc<dyn Hittable>, Camera) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut world = HittableList::new();

    let ground: Arc<dyn Material> = Arc::new(Lambertian::from_texture(Arc::new(
        CheckerTexture::from_colors(1.0, Color::new(0.1, 0.1, 0.1), Color::new(0.8, 0.8, 0.8)),
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        ground,
    )));

    for a in -7..7 {
        for b in -7..7 {
            let choice = gen_f32(&mut rng);
            let center = Vec3::new(
                a as f32 + 0.9 * gen_f32(&mut rng),
                0.2,
                b as f32 + 0.9 * gen_f32(&mut rng),
            );

            if (center - Vec3::new(4.0, 0.2, 0.0)).length() < 0.9 {
                continue;
            }

            if choice < 0.6 {
                let albedo = Color::new(
                    gen_f32(&mut rng),
                    gen_f32(&mut rng),
                    gen_f32(&mut rng),
                );
                let material: Arc<dyn Material> = Arc::new(Lambertian::new(albedo));
                let center2 =
                    center + Vec3::new(0.0, 0.5 * gen_f32(&mut rng), 0.0);
                world.add(Arc::new(Sphere::moving(center, center2, 0.2, material)));
            } else if choice < 0.85 {
                let albedo = Color::new(
                    0.5 + 0.5 * gen_f32(&mut rng),
                    0.5 + 0.5 * gen_f32(&mut rng),
                    0.5 + 0.5 * gen_f32(&mut rng),
                );
                let material: Arc<dyn Material> = Arc::new(Metal::new(albedo, 0.05));
                world.add(Arc::new(Sphere::new(center, 0.2, material)));
            } else {
                let material: Arc<dyn Material> = Arc::new(Dielectric::new(1.7));
                world.add(Arc::new(Sphere::new(center, 0.2, material)));
            }
        }
    }

    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    world.add(Arc::new(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, glass)));
    let matte: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1)));
    world.add(Arc::new(Sphere::new(Vec3::new(-4.0, 1.0, 0.0), 1.0, matte)));
    let steel: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0));
    world.add(Arc::new(Sphere::new(Vec3::new(4.0, 1.0, 0.0), 1.0, steel)));

    let camera = Camera::new()
        .with_resolution(800, 16.0 / 9.0)
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.6, 10.0)
        .with_background(Background::SkyGradient);

    (Arc::new(BvhNode::from_list(world)), camera)
}

fn cornell() -> (Arc<dyn Hittable>, Camera) {
    let mut world = HittableList::new();

    let red: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.65, 0.05, 0.05)));
    let white: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.73, 0.73, 0.73)));
    let green: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.12, 0.45, 0.15)));
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::new(7.0, 7.0, 7.0)));

    // Walls
    world.add(Arc::new(Quad::new(
        Vec3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 555.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        green,
    )));
    world.add(Arc::new(Quad::new(
        Vec3::ZERO,
        Vec3::new(0.0, 555.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        red,
    )));
    world.add(Arc::new(Quad::new(
        Vec3::new(113.0, 554.0, 127.0),
        Vec3::new(330.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 305.0),
        light,
    )));
    world.add(Arc::new(Quad::new(
        Vec3::ZERO,
        Vec3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        white.clone(),
    )));
    world.add(Arc::new(Quad::new(
        Vec3::new(555.0, 555.0, 555.0),
        Vec3::new(-555.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -555.0),
        white.clone(),
    )));
    world.add(Arc::new(Quad::new(
        Vec3::new(0.0, 0.0, 555.0),
        Vec3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 555.0, 0.0),
        white.clone(),
    )));

    // Two boxes, rotated and translated, filled with smoke
    let box1: Arc<dyn Hittable> = Arc::new(make_box(
        Vec3::ZERO,
        Vec3::new(165.0, 330.0, 165.0),
        white.clone(),
    ));
    let box1: Arc<dyn Hittable> = Arc::new(Translate::new(
        Arc::new(Rotate::about_y(box1, 15.0)),
        Vec3::new(265.0, 0.0, 295.0),
    ));
    world.add(Arc::new(ConstantMedium::new(box1, 0.01, Color::ZERO)));

    let box2: Arc<dyn Hittable> = Arc::new(make_box(
        Vec3::ZERO,
        Vec3::new(165.0, 165.0, 165.0),
        white,
    ));
    let box2: Arc<dyn Hittable> = Arc::new(Translate::new(
        Arc::new(Rotate::about_y(box2, -18.0)),
        Vec3::new(130.0, 0.0, 65.0),
    ));
    world.add(Arc::new(ConstantMedium::new(box2, 0.01, Color::ONE)));

    let camera = Camera::new()
        .with_resolution(600, 1.0)
        .with_position(
            Vec3::new(278.0, 278.0, -800.0),
            Vec3::new(278.0, 278.0, 0.0),
            Vec3::Y,
        )
        .with_lens(40.0, 0.0, 800.0)
        .with_background(Background::Color(Color::ZERO));

    (Arc::new(BvhNode::from_list(world)), camera)
}

fn showcase(seed: u64) -> (Arc<dyn Hittable>, Camera) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut world = HittableList::new();

    let light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::new(5.0, 5.0, 5.0)));
    world.add(Arc::new(Quad::new(
        Vec3::new(-3.0, 6.0, -3.0),
        Vec3::new(6.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 6.0),
        light,
    )));

    let ground: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.48, 0.83, 0.53)));
    world.add(Arc::new(Quad::new(
        Vec3::new(-20.0, 0.0, -20.0),
        Vec3::new(40.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 40.0),
        ground,
    )));

    // Planar shapes standing upright
    let back: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(1.0, 0.2, 0.2)));
    world.add(Arc::new(Quad::triangle(
        Vec3::new(-4.0, 0.0, -2.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(0.0, 3.0, 0.0),
        back.clone(),
    )));
    world.add(Arc::new(Quad::ellipse(
        Vec3::new(0.0, 1.5, -2.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.5, 0.0),
        back.clone(),
    )));
    world.add(Arc::new(Quad::annulus(
        Vec3::new(3.0, 1.5, -2.0),
        Vec3::new(1.2, 0.0, 0.0),
        Vec3::new(0.0, 1.2, 0.0),
        0.5,
        back,
    )));

    // Textured spheres: marble noise and an image-mapped globe
    let marble: Arc<dyn Material> = Arc::new(Lambertian::from_texture(Arc::new(
        NoiseTexture::new(Perlin::new(&mut rng), 4.0),
    )));
    world.add(Arc::new(Sphere::new(Vec3::new(-2.0, 1.0, 1.5), 1.0, marble)));

    let globe: Arc<dyn Material> = Arc::new(Lambertian::from_texture(Arc::new(
        ImageTexture::open("assets/earth.png"),
    )));
    world.add(Arc::new(Sphere::new(Vec3::new(2.0, 1.0, 1.5), 1.0, globe)));

    // A glass sphere wrapped in thin fog
    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    let core: Arc<dyn Hittable> = Arc::new(Sphere::new(Vec3::new(0.0, 1.0, 3.5), 0.8, glass));
    world.add(core.clone());
    world.add(Arc::new(ConstantMedium::with_texture(
        core,
        0.2,
        Arc::new(lumen_core::SolidColor::new(Color::new(0.2, 0.4, 0.9))),
    )));

    let camera = Camera::new()
        .with_resolution(800, 16.0 / 9.0)
        .with_position(Vec3::new(0.0, 3.0, 9.0), Vec3::new(0.0, 1.5, 0.0), Vec3::Y)
        .with_lens(40.0, 0.0, 9.0)
        .with_background(Background::Color(Color::new(0.01, 0.01, 0.01)));

    (Arc::new(BvhNode::from_list(world)), camera)
}
