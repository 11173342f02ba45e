//! Builds a small light rig, mutates it, tears it down, and prints what a
//! renderer would see each "frame".
//!
//! Run with `RUST_LOG=debug` to see component lifecycle logging.

use std::rc::Rc;

use lumen::{
    AmbientLightConfig, Component, ComponentConfig, DirLightConfig, LightConfig, LightSource,
    RedrawFlag, Scene, Space,
};

fn render_frame(scene: &Scene, redraw: &RedrawFlag, frame: u32) {
    if !redraw.take() {
        log::info!("frame {frame}: nothing changed");
        return;
    }
    log::info!("frame {frame}: redraw (version {})", redraw.version());
    for light in scene.enumerate_lights() {
        log::info!(
            "  {:<12} {:<10} color={:?} intensity={}",
            light.type_name(),
            light.id(),
            light.color().to_array(),
            light.intensity()
        );
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let redraw = Rc::new(RedrawFlag::new());
    let mut scene = Scene::new(redraw.clone());

    let rig = scene.create_component(None, ComponentConfig::with_id("rig"))?;

    scene.create_light(
        Some(rig),
        AmbientLightConfig {
            color: Some([0.8, 0.8, 0.8]),
            intensity: Some(0.5),
            ..Default::default()
        },
    )?;
    scene.create_light(
        Some(rig),
        DirLightConfig {
            base: ComponentConfig::with_id("key"),
            dir: Some([-0.8, -0.4, -0.4]),
            color: Some([0.4, 0.4, 0.5]),
            intensity: Some(0.5),
            space: Some(Space::View),
        },
    )?;
    let fill = scene.create_light(
        None,
        LightConfig::from_json(r#"{ "type": "dir", "id": "fill", "dir": [0.2, -0.8, 0.8] }"#)?,
    )?;

    render_frame(&scene, &redraw, 0);
    render_frame(&scene, &redraw, 1);

    if let Some(mut light) = scene.light_mut(fill) {
        light.set_intensity(Some(0.25));
        light.set_color(None);
    }
    render_frame(&scene, &redraw, 2);

    scene.destroy(rig);
    render_frame(&scene, &redraw, 3);

    Ok(())
}
