//! Renders a demo scene graph to a PNG.
//!
//! Usage: glint [WIDTH HEIGHT] [OUTPUT]
//!
//! Builds a small nested scene (sphere, box, one light, one active
//! camera), runs the extraction pass, raytraces a frame, and writes
//! the RGBA buffer to disk.

use anyhow::{Context, Result};
use glint_math::{Transform, Vec3, Vec4};
use glint_render::{render_frame_parallel, ShadingParams};
use glint_scene::{extract, AaBoxNode, CameraNode, GroupNode, LightNode, Node, SphereNode};

const DEFAULT_SIZE: u32 = 350;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (width, height, output) = parse_args(&args)?;

    let scene = build_scene();

    let start = std::time::Instant::now();
    let extracted = extract(&scene).context("extracting camera and lights")?;
    log::info!(
        "extracted camera at {:?} and {} light(s) in {:?}",
        extracted.camera.eye,
        extracted.lights.len(),
        start.elapsed()
    );

    let start = std::time::Instant::now();
    let frame = render_frame_parallel(
        &scene,
        &extracted.camera,
        &extracted.lights,
        &ShadingParams::default(),
        width,
        height,
    )
    .context("rendering frame")?;
    log::info!("rendered {}x{} frame in {:?}", width, height, start.elapsed());

    let image = image::RgbaImage::from_raw(width, height, frame.into_raw())
        .context("frame buffer has unexpected size")?;
    image
        .save(&output)
        .with_context(|| format!("writing {output}"))?;
    log::info!("wrote {output}");

    Ok(())
}

fn parse_args(args: &[String]) -> Result<(u32, u32, String)> {
    let mut width = DEFAULT_SIZE;
    let mut height = DEFAULT_SIZE;
    let mut output = String::from("glint.png");

    match args {
        [] => {}
        [out] => output = out.clone(),
        [w, h, rest @ ..] => {
            width = w.parse().context("parsing WIDTH")?;
            height = h.parse().context("parsing HEIGHT")?;
            if let Some(out) = rest.first() {
                output = out.clone();
            }
        }
    }

    Ok((width, height, output))
}

/// Build the demo graph:
///
/// ```text
///         root
///     +-----+-----+------+
///   T(gn1)     T(gn2)  T(cam)
///     |          |       |
///   Sphere     R(gn3)  Camera   (plus a light above the sphere)
///                |
///               Box
/// ```
fn build_scene() -> Node {
    let mut root = GroupNode::new(Transform::IDENTITY);

    let mut gn1 = GroupNode::new(Transform::translation(Vec3::new(-0.75, -0.75, -3.0)));
    gn1.add(SphereNode::new(Vec4::new(0.8, 0.4, 0.1, 1.0)));
    root.add(gn1);

    let mut gn2 = GroupNode::new(Transform::translation(Vec3::new(0.2, 0.2, -2.0)));
    let mut gn3 = GroupNode::new(Transform::rotation_y(0.6));
    gn3.add(AaBoxNode::new(Vec4::new(0.2, 0.5, 0.9, 1.0), true));
    gn2.add(gn3);
    root.add(gn2);

    let mut light = GroupNode::new(Transform::translation(Vec3::new(1.0, 1.0, 0.0)));
    light.add(LightNode::new());
    root.add(light);

    let mut camera = GroupNode::new(Transform::translation(Vec3::new(0.0, 0.0, 2.0)));
    camera.add(CameraNode::new(true));
    root.add(camera);

    Node::from(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args_defaults() {
        let (w, h, out) = parse_args(&[]).unwrap();
        assert_eq!((w, h), (DEFAULT_SIZE, DEFAULT_SIZE));
        assert_eq!(out, "glint.png");
    }

    #[test]
    fn test_parse_args_full() {
        let args: Vec<String> = ["640", "480", "out.png"].iter().map(|s| s.to_string()).collect();
        let (w, h, out) = parse_args(&args).unwrap();
        assert_eq!((w, h), (640, 480));
        assert_eq!(out, "out.png");
    }

    #[test]
    fn test_demo_scene_extracts() {
        let scene = build_scene();
        let extracted = extract(&scene).unwrap();
        assert_eq!(extracted.lights.len(), 1);
        assert!((extracted.camera.eye - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-6);
    }
}
