//! # Lumen Scene
//!
//! Component lifecycle, scene registry and light sources for a real-time 3D
//! scene graph.
//!
//! A [`Scene`] owns every component by id. Components are created through the
//! scene, optionally naming an owner that is responsible for destroying them,
//! and are referred to by [`ComponentKey`]. Lights keep their render state in
//! an arena owned by the scene so the shading pipeline can read it by stable
//! handle, and every state mutation raises a redraw request on the scene's
//! [`RedrawSink`].
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use lumen::{AmbientLightConfig, RedrawFlag, Scene};
//!
//! let redraw = Rc::new(RedrawFlag::new());
//! let mut scene = Scene::new(redraw.clone());
//!
//! let key = scene.create_light(None, AmbientLightConfig {
//!     color: Some([0.8, 0.8, 0.8]),
//!     intensity: Some(0.5),
//!     ..Default::default()
//! })?;
//!
//! scene.light_mut(key).unwrap().set_intensity(Some(0.9));
//! assert!(redraw.take());
//! ```

pub mod core;
pub mod errors;
pub mod scene;
pub mod utils;

pub use crate::core::{
    Component, ComponentConfig, ComponentKey, Lifecycle, Meta, RedrawFlag, RedrawSink,
};
pub use crate::errors::{Result, SceneError};
pub use crate::scene::{
    AmbientLightConfig, Attenuation, DirLightConfig, LightConfig, LightKind, LightSource,
    LightType, PointLightConfig, Scene, Space, SpotLightConfig,
};
