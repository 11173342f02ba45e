//! Scene Integration Tests
//!
//! Tests for:
//! - Id assignment: explicit, generated, duplicate rejection, reuse after destroy
//! - Light registry: lookup by id, enumeration order, restartable enumeration
//! - Component queries: by key, by id, registration order
//! - Scene clear

use std::rc::Rc;

use lumen::scene::Lights;
use lumen::{
    AmbientLightConfig, Component, ComponentConfig, ComponentKey, DirLightConfig, LightSource,
    PointLightConfig, RedrawFlag, Scene, SceneError,
};

fn ambient(id: &str) -> AmbientLightConfig {
    AmbientLightConfig {
        base: ComponentConfig::with_id(id),
        ..Default::default()
    }
}

fn light_ids(lights: Lights<'_>) -> Vec<String> {
    lights.map(|light| light.id().to_owned()).collect()
}

// ============================================================================
// Id Assignment
// ============================================================================

#[test]
fn scene_explicit_id_is_used() {
    let mut scene = Scene::default();
    let key = scene.create_light(None, ambient("fill")).unwrap();

    assert_eq!(scene.component(key).unwrap().id(), "fill");
    assert_eq!(scene.component_key("fill"), Some(key));
    assert!(scene.contains_id("fill"));
}

#[test]
fn scene_generated_id_is_registered() {
    let mut scene = Scene::default();
    let key = scene.create_light(None, AmbientLightConfig::default()).unwrap();

    let id = scene.component(key).unwrap().id().to_owned();
    assert!(!id.is_empty());
    assert_eq!(scene.component_key(&id), Some(key));
    assert_eq!(scene.light_by_id(&id).map(|l| l.key()), Some(key));
}

#[test]
fn scene_duplicate_light_id_fails_and_keeps_first() {
    let mut scene = Scene::default();
    let first = scene
        .create_light(
            None,
            AmbientLightConfig {
                base: ComponentConfig::with_id("main"),
                intensity: Some(0.4),
                ..Default::default()
            },
        )
        .unwrap();

    let err = scene.create_light(None, ambient("main")).unwrap_err();
    assert_eq!(err, SceneError::DuplicateId("main".into()));

    assert_eq!(scene.len(), 1);
    assert_eq!(scene.light_count(), 1);
    let light = scene.light_by_id("main").unwrap();
    assert_eq!(light.key(), first);
    assert!((light.intensity() - 0.4).abs() < 1e-6);
}

#[test]
fn scene_duplicate_id_across_component_types() {
    let mut scene = Scene::default();
    scene
        .create_component(None, ComponentConfig::with_id("shared"))
        .unwrap();

    let result = scene.create_light(None, ambient("shared"));
    assert!(matches!(result, Err(SceneError::DuplicateId(id)) if id == "shared"));
    assert_eq!(scene.light_count(), 0);
}

#[test]
fn scene_duplicate_id_does_not_signal_redraw() {
    let redraw = Rc::new(RedrawFlag::new());
    let mut scene = Scene::new(redraw.clone());
    scene.create_light(None, ambient("a")).unwrap();
    redraw.take();

    assert!(scene.create_light(None, ambient("a")).is_err());
    assert!(!redraw.is_dirty());
}

#[test]
fn scene_id_reusable_after_destroy() {
    let mut scene = Scene::default();
    let old = scene.create_light(None, ambient("lamp")).unwrap();
    scene.destroy(old);

    let new = scene.create_light(None, ambient("lamp")).unwrap();
    assert_ne!(old, new);
    assert_eq!(scene.light_by_id("lamp").map(|l| l.key()), Some(new));
    assert!(scene.light(old).is_none());
}

#[test]
fn scene_unique_ids() {
    let s1 = Scene::default();
    let s2 = Scene::default();
    assert_ne!(s1.id, s2.id, "Each scene should have a unique ID");
}

// ============================================================================
// Light Enumeration
// ============================================================================

#[test]
fn scene_enumerate_lights_in_registration_order() {
    let mut scene = Scene::default();
    scene.create_light(None, ambient("a")).unwrap();
    scene
        .create_light(
            None,
            DirLightConfig {
                base: ComponentConfig::with_id("b"),
                ..Default::default()
            },
        )
        .unwrap();
    scene
        .create_light(
            None,
            PointLightConfig {
                base: ComponentConfig::with_id("c"),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(light_ids(scene.enumerate_lights()), ["a", "b", "c"]);
}

#[test]
fn scene_new_light_appends_after_removal() {
    let mut scene = Scene::default();
    scene.create_light(None, ambient("a")).unwrap();
    let b = scene.create_light(None, ambient("b")).unwrap();
    scene.create_light(None, ambient("c")).unwrap();

    scene.destroy(b);
    assert_eq!(light_ids(scene.enumerate_lights()), ["a", "c"]);

    scene.create_light(None, ambient("d")).unwrap();
    assert_eq!(light_ids(scene.enumerate_lights()), ["a", "c", "d"]);
}

#[test]
fn scene_enumerate_lights_is_restartable() {
    let mut scene = Scene::default();
    scene.create_light(None, ambient("a")).unwrap();
    scene.create_light(None, ambient("b")).unwrap();

    let first = light_ids(scene.enumerate_lights());
    let second = light_ids(scene.enumerate_lights());
    assert_eq!(first, second);

    let mut lights = scene.enumerate_lights();
    lights.next();
    let rest = lights.clone();
    assert_eq!(light_ids(rest), ["b"]);
    assert_eq!(light_ids(lights), ["b"]);
}

#[test]
fn scene_enumerate_skips_plain_components() {
    let mut scene = Scene::default();
    scene
        .create_component(None, ComponentConfig::with_id("group"))
        .unwrap();
    scene.create_light(None, ambient("a")).unwrap();

    assert_eq!(scene.len(), 2);
    assert_eq!(scene.light_count(), 1);
    assert_eq!(light_ids(scene.enumerate_lights()), ["a"]);
    assert!(scene.light_by_id("group").is_none());
}

#[test]
fn scene_empty_enumeration() {
    let scene = Scene::default();
    assert_eq!(scene.enumerate_lights().count(), 0);
    assert!(scene.is_empty());
}

// ============================================================================
// Component Queries
// ============================================================================

#[test]
fn scene_components_in_registration_order() {
    let mut scene = Scene::default();
    let group = scene
        .create_component(None, ComponentConfig::with_id("group"))
        .unwrap();
    let light = scene.create_light(Some(group), ambient("light")).unwrap();

    let listed: Vec<(ComponentKey, &str)> = scene
        .components()
        .map(|(key, record)| (key, record.type_name()))
        .collect();
    assert_eq!(listed, [(group, "Component"), (light, "AmbientLight")]);

    assert_eq!(scene.component_by_id("light").unwrap().owner(), Some(group));
    assert!(scene.component_by_id("light").unwrap().is_light());
    assert!(scene.component_by_id("missing").is_none());
}

// ============================================================================
// Clear
// ============================================================================

#[test]
fn scene_clear_destroys_everything() {
    let mut scene = Scene::default();
    let group = scene.create_component(None, ComponentConfig::default()).unwrap();
    let owned = scene.create_light(Some(group), ambient("owned")).unwrap();
    let free = scene.create_light(None, ambient("free")).unwrap();

    scene.clear();

    assert!(scene.is_empty());
    assert_eq!(scene.light_count(), 0);
    for key in [group, owned, free] {
        assert!(scene.is_destroyed(key));
    }

    // Scene stays usable.
    scene.create_light(None, ambient("owned")).unwrap();
    assert_eq!(scene.light_count(), 1);
}
