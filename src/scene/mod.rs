//! Scene registry and light sources.
//!
//! - [`Scene`]: owns components by id and the render state of its lights
//! - [`Light`]: ambient, directional, point and spot light components

pub mod light;
pub mod scene;

pub use light::{
    AmbientLightConfig, Attenuation, DirLightConfig, Light, LightConfig, LightKind, LightMut,
    LightSource, LightState, LightStateKey, LightType, LightView, PointLightConfig, Space,
    SpotLightConfig,
};
pub use scene::{Lights, Scene};
