//! Light sources.
//!
//! A light is a component whose render state record lives in the scene's
//! light-state arena. The component holds only the [`LightStateKey`]; the
//! record is mutated in place for the light's whole lifetime, so anything
//! that resolves the key sees current values without re-fetching the light.

use glam::Vec3;
use serde::Deserialize;
use slotmap::new_key_type;

use crate::core::component::{Component, ComponentKey, ComponentRecord, Lifecycle};
use crate::core::config::{ComponentConfig, Meta, or_default};
use crate::core::redraw::RedrawSink;
use crate::utils::math;

new_key_type! {
    /// Handle to a [`LightState`] in the scene's render-state arena.
    pub struct LightStateKey;
}

pub const DEFAULT_COLOR: [f32; 3] = [0.7, 0.7, 0.8];
pub const DEFAULT_INTENSITY: f32 = 1.0;
pub const DEFAULT_POS: [f32; 3] = [1.0, 1.0, 1.0];
pub const DEFAULT_DIR_LIGHT_DIR: [f32; 3] = [1.0, 1.0, 1.0];
pub const DEFAULT_SPOT_LIGHT_DIR: [f32; 3] = [0.0, 0.0, -1.0];

/// Discriminator of a light, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightType {
    Ambient,
    Directional,
    Point,
    Spot,
}

impl LightType {
    /// Component class name.
    #[must_use]
    pub fn type_name(self) -> &'static str {
        match self {
            LightType::Ambient => "AmbientLight",
            LightType::Directional => "DirLight",
            LightType::Point => "PointLight",
            LightType::Spot => "SpotLight",
        }
    }

    /// Short tag used by the shading pipeline.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LightType::Ambient => "ambient",
            LightType::Directional => "dir",
            LightType::Point => "point",
            LightType::Spot => "spot",
        }
    }

    #[must_use]
    pub fn has_direction(self) -> bool {
        matches!(self, LightType::Directional | LightType::Spot)
    }

    #[must_use]
    pub fn has_position(self) -> bool {
        matches!(self, LightType::Point | LightType::Spot)
    }
}

/// Coordinate space in which the renderer interprets `pos` and `dir`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Space {
    #[default]
    View,
    World,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLight {
    pub dir: Vec3,
    pub space: Space,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    pub pos: Vec3,
    pub attenuation: Attenuation,
    pub space: Space,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpotLight {
    pub pos: Vec3,
    pub dir: Vec3,
    pub attenuation: Attenuation,
    pub space: Space,
}

/// Variant-specific render state.
#[derive(Debug, Clone, PartialEq)]
pub enum LightKind {
    Ambient,
    Directional(DirectionalLight),
    Point(PointLight),
    Spot(SpotLight),
}

impl LightKind {
    fn with_defaults(light_type: LightType) -> Self {
        match light_type {
            LightType::Ambient => LightKind::Ambient,
            LightType::Directional => LightKind::Directional(DirectionalLight {
                dir: math::vec3(DEFAULT_DIR_LIGHT_DIR),
                space: Space::default(),
            }),
            LightType::Point => LightKind::Point(PointLight {
                pos: math::vec3(DEFAULT_POS),
                attenuation: Attenuation::default(),
                space: Space::default(),
            }),
            LightType::Spot => LightKind::Spot(SpotLight {
                pos: math::vec3(DEFAULT_POS),
                dir: math::vec3(DEFAULT_SPOT_LIGHT_DIR),
                attenuation: Attenuation::default(),
                space: Space::default(),
            }),
        }
    }

    #[must_use]
    pub fn light_type(&self) -> LightType {
        match self {
            LightKind::Ambient => LightType::Ambient,
            LightKind::Directional(_) => LightType::Directional,
            LightKind::Point(_) => LightType::Point,
            LightKind::Spot(_) => LightType::Spot,
        }
    }

    #[must_use]
    pub fn dir(&self) -> Option<&Vec3> {
        match self {
            LightKind::Directional(l) => Some(&l.dir),
            LightKind::Spot(l) => Some(&l.dir),
            LightKind::Ambient | LightKind::Point(_) => None,
        }
    }

    #[must_use]
    pub fn pos(&self) -> Option<&Vec3> {
        match self {
            LightKind::Point(l) => Some(&l.pos),
            LightKind::Spot(l) => Some(&l.pos),
            LightKind::Ambient | LightKind::Directional(_) => None,
        }
    }

    #[must_use]
    pub fn attenuation(&self) -> Option<Attenuation> {
        match self {
            LightKind::Point(l) => Some(l.attenuation),
            LightKind::Spot(l) => Some(l.attenuation),
            LightKind::Ambient | LightKind::Directional(_) => None,
        }
    }

    #[must_use]
    pub fn space(&self) -> Option<Space> {
        match self {
            LightKind::Directional(l) => Some(l.space),
            LightKind::Point(l) => Some(l.space),
            LightKind::Spot(l) => Some(l.space),
            LightKind::Ambient => None,
        }
    }

    fn dir_mut(&mut self) -> Option<&mut Vec3> {
        match self {
            LightKind::Directional(l) => Some(&mut l.dir),
            LightKind::Spot(l) => Some(&mut l.dir),
            LightKind::Ambient | LightKind::Point(_) => None,
        }
    }

    fn pos_mut(&mut self) -> Option<&mut Vec3> {
        match self {
            LightKind::Point(l) => Some(&mut l.pos),
            LightKind::Spot(l) => Some(&mut l.pos),
            LightKind::Ambient | LightKind::Directional(_) => None,
        }
    }

    fn attenuation_mut(&mut self) -> Option<&mut Attenuation> {
        match self {
            LightKind::Point(l) => Some(&mut l.attenuation),
            LightKind::Spot(l) => Some(&mut l.attenuation),
            LightKind::Ambient | LightKind::Directional(_) => None,
        }
    }

    fn space_mut(&mut self) -> Option<&mut Space> {
        match self {
            LightKind::Directional(l) => Some(&mut l.space),
            LightKind::Point(l) => Some(&mut l.space),
            LightKind::Spot(l) => Some(&mut l.space),
            LightKind::Ambient => None,
        }
    }
}

/// Render state record consumed by the shading pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct LightState {
    kind: LightKind,
    color: Vec3,
    intensity: f32,
}

impl LightState {
    pub(crate) fn new(light_type: LightType) -> Self {
        Self {
            kind: LightKind::with_defaults(light_type),
            color: math::vec3(DEFAULT_COLOR),
            intensity: DEFAULT_INTENSITY,
        }
    }

    #[must_use]
    pub fn light_type(&self) -> LightType {
        self.kind.light_type()
    }

    #[must_use]
    pub fn kind(&self) -> &LightKind {
        &self.kind
    }

    /// Live color storage. Values change in place on every `set_color`.
    #[must_use]
    pub fn color(&self) -> &Vec3 {
        &self.color
    }

    #[must_use]
    pub fn intensity(&self) -> f32 {
        self.intensity
    }
}

/// Light part of a component: the immutable discriminator and the handle to
/// its render state.
#[derive(Debug, Clone)]
pub struct Light {
    light_type: LightType,
    state: LightStateKey,
}

impl Light {
    pub(crate) fn new(light_type: LightType, state: LightStateKey) -> Self {
        Self { light_type, state }
    }

    #[must_use]
    pub fn light_type(&self) -> LightType {
        self.light_type
    }

    #[must_use]
    pub fn state_key(&self) -> LightStateKey {
        self.state
    }
}

/// Capability shared by read and write views of a light.
pub trait LightSource {
    fn render_state(&self) -> &LightState;

    fn light_type(&self) -> LightType {
        self.render_state().light_type()
    }

    fn kind(&self) -> &LightKind {
        self.render_state().kind()
    }

    fn color(&self) -> &Vec3 {
        self.render_state().color()
    }

    fn intensity(&self) -> f32 {
        self.render_state().intensity()
    }
}

// ============================================================================
// Configuration
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AmbientLightConfig {
    #[serde(flatten)]
    pub base: ComponentConfig,
    #[serde(default, deserialize_with = "or_default")]
    pub color: Option<[f32; 3]>,
    #[serde(default, deserialize_with = "or_default")]
    pub intensity: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DirLightConfig {
    #[serde(flatten)]
    pub base: ComponentConfig,
    #[serde(default, deserialize_with = "or_default")]
    pub color: Option<[f32; 3]>,
    #[serde(default, deserialize_with = "or_default")]
    pub intensity: Option<f32>,
    #[serde(default, deserialize_with = "or_default")]
    pub dir: Option<[f32; 3]>,
    #[serde(default, deserialize_with = "or_default")]
    pub space: Option<Space>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PointLightConfig {
    #[serde(flatten)]
    pub base: ComponentConfig,
    #[serde(default, deserialize_with = "or_default")]
    pub color: Option<[f32; 3]>,
    #[serde(default, deserialize_with = "or_default")]
    pub intensity: Option<f32>,
    #[serde(default, deserialize_with = "or_default")]
    pub pos: Option<[f32; 3]>,
    #[serde(default, deserialize_with = "or_default")]
    pub attenuation: Option<Attenuation>,
    #[serde(default, deserialize_with = "or_default")]
    pub space: Option<Space>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpotLightConfig {
    #[serde(flatten)]
    pub base: ComponentConfig,
    #[serde(default, deserialize_with = "or_default")]
    pub color: Option<[f32; 3]>,
    #[serde(default, deserialize_with = "or_default")]
    pub intensity: Option<f32>,
    #[serde(default, deserialize_with = "or_default")]
    pub pos: Option<[f32; 3]>,
    #[serde(default, deserialize_with = "or_default")]
    pub dir: Option<[f32; 3]>,
    #[serde(default, deserialize_with = "or_default")]
    pub attenuation: Option<Attenuation>,
    #[serde(default, deserialize_with = "or_default")]
    pub space: Option<Space>,
}

/// Configuration for any light variant.
///
/// Deserializes from a record tagged by `"type"`:
///
/// ```rust,ignore
/// let cfg = LightConfig::from_json(r#"{ "type": "dir", "dir": [0.2, -0.8, 0.8] }"#)?;
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum LightConfig {
    #[serde(rename = "ambient")]
    Ambient(AmbientLightConfig),
    #[serde(rename = "dir")]
    Directional(DirLightConfig),
    #[serde(rename = "point")]
    Point(PointLightConfig),
    #[serde(rename = "spot")]
    Spot(SpotLightConfig),
}

/// Flattened view of a light configuration, applied field by field through
/// the setters during initialisation.
#[derive(Debug, Clone, Default)]
pub(crate) struct LightSettings {
    pub color: Option<[f32; 3]>,
    pub intensity: Option<f32>,
    pub dir: Option<[f32; 3]>,
    pub pos: Option<[f32; 3]>,
    pub attenuation: Option<Attenuation>,
    pub space: Option<Space>,
}

impl LightConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn light_type(&self) -> LightType {
        match self {
            LightConfig::Ambient(_) => LightType::Ambient,
            LightConfig::Directional(_) => LightType::Directional,
            LightConfig::Point(_) => LightType::Point,
            LightConfig::Spot(_) => LightType::Spot,
        }
    }

    #[must_use]
    pub fn base(&self) -> &ComponentConfig {
        match self {
            LightConfig::Ambient(c) => &c.base,
            LightConfig::Directional(c) => &c.base,
            LightConfig::Point(c) => &c.base,
            LightConfig::Spot(c) => &c.base,
        }
    }

    pub(crate) fn into_parts(self) -> (LightType, ComponentConfig, LightSettings) {
        let light_type = self.light_type();
        match self {
            LightConfig::Ambient(c) => (
                light_type,
                c.base,
                LightSettings {
                    color: c.color,
                    intensity: c.intensity,
                    ..Default::default()
                },
            ),
            LightConfig::Directional(c) => (
                light_type,
                c.base,
                LightSettings {
                    color: c.color,
                    intensity: c.intensity,
                    dir: c.dir,
                    space: c.space,
                    ..Default::default()
                },
            ),
            LightConfig::Point(c) => (
                light_type,
                c.base,
                LightSettings {
                    color: c.color,
                    intensity: c.intensity,
                    pos: c.pos,
                    attenuation: c.attenuation,
                    space: c.space,
                    ..Default::default()
                },
            ),
            LightConfig::Spot(c) => (
                light_type,
                c.base,
                LightSettings {
                    color: c.color,
                    intensity: c.intensity,
                    dir: c.dir,
                    pos: c.pos,
                    attenuation: c.attenuation,
                    space: c.space,
                },
            ),
        }
    }
}

impl From<AmbientLightConfig> for LightConfig {
    fn from(config: AmbientLightConfig) -> Self {
        LightConfig::Ambient(config)
    }
}

impl From<DirLightConfig> for LightConfig {
    fn from(config: DirLightConfig) -> Self {
        LightConfig::Directional(config)
    }
}

impl From<PointLightConfig> for LightConfig {
    fn from(config: PointLightConfig) -> Self {
        LightConfig::Point(config)
    }
}

impl From<SpotLightConfig> for LightConfig {
    fn from(config: SpotLightConfig) -> Self {
        LightConfig::Spot(config)
    }
}

// ============================================================================
// Views
// ============================================================================

/// Read-only view of a registered light.
#[derive(Debug, Clone, Copy)]
pub struct LightView<'a> {
    pub(crate) key: ComponentKey,
    pub(crate) record: &'a ComponentRecord,
    pub(crate) light: &'a Light,
    pub(crate) state: &'a LightState,
}

impl<'a> LightView<'a> {
    #[must_use]
    pub fn key(&self) -> ComponentKey {
        self.key
    }

    #[must_use]
    pub fn state_key(&self) -> LightStateKey {
        self.light.state
    }

    /// Render state with the lifetime of the scene borrow.
    #[must_use]
    pub fn state(&self) -> &'a LightState {
        self.state
    }

    #[must_use]
    pub fn meta(&self) -> &'a Meta {
        &self.record.meta
    }
}

impl Component for LightView<'_> {
    fn id(&self) -> &str {
        &self.record.id
    }

    fn owner(&self) -> Option<ComponentKey> {
        self.record.owner
    }

    fn type_name(&self) -> &'static str {
        self.light.light_type.type_name()
    }

    fn lifecycle(&self) -> Lifecycle {
        self.record.lifecycle
    }
}

impl LightSource for LightView<'_> {
    fn render_state(&self) -> &LightState {
        self.state
    }
}

/// Mutable view of a registered light.
///
/// Every setter writes into the existing state record and then emits exactly
/// one redraw request, whether or not the value actually changed.
pub struct LightMut<'a> {
    pub(crate) key: ComponentKey,
    pub(crate) record: &'a ComponentRecord,
    pub(crate) state: &'a mut LightState,
    pub(crate) redraw: &'a dyn RedrawSink,
}

impl LightMut<'_> {
    #[must_use]
    pub fn key(&self) -> ComponentKey {
        self.key
    }

    /// Sets the color, or resets it to [`DEFAULT_COLOR`] when `None`.
    pub fn set_color(&mut self, color: Option<[f32; 3]>) {
        math::assign_vec3_or(&mut self.state.color, color, DEFAULT_COLOR);
        self.redraw.request_redraw();
    }

    /// Sets the intensity, or resets it to [`DEFAULT_INTENSITY`] when `None`.
    /// Values outside `[0, 1]` are stored as given.
    pub fn set_intensity(&mut self, intensity: Option<f32>) {
        self.state.intensity = intensity.unwrap_or(DEFAULT_INTENSITY);
        self.redraw.request_redraw();
    }

    /// Sets the direction of a directional or spot light. Returns `false`
    /// without signalling for variants that have no direction.
    pub fn set_dir(&mut self, dir: Option<[f32; 3]>) -> bool {
        let fallback = match self.state.light_type() {
            LightType::Spot => DEFAULT_SPOT_LIGHT_DIR,
            _ => DEFAULT_DIR_LIGHT_DIR,
        };
        let Some(target) = self.state.kind.dir_mut() else {
            self.reject("dir");
            return false;
        };
        math::assign_vec3_or(target, dir, fallback);
        self.redraw.request_redraw();
        true
    }

    /// Sets the position of a point or spot light.
    pub fn set_pos(&mut self, pos: Option<[f32; 3]>) -> bool {
        let Some(target) = self.state.kind.pos_mut() else {
            self.reject("pos");
            return false;
        };
        math::assign_vec3_or(target, pos, DEFAULT_POS);
        self.redraw.request_redraw();
        true
    }

    /// Sets the attenuation factors of a point or spot light.
    pub fn set_attenuation(&mut self, attenuation: Option<Attenuation>) -> bool {
        let Some(target) = self.state.kind.attenuation_mut() else {
            self.reject("attenuation");
            return false;
        };
        *target = attenuation.unwrap_or_default();
        self.redraw.request_redraw();
        true
    }

    pub fn set_space(&mut self, space: Option<Space>) -> bool {
        let Some(target) = self.state.kind.space_mut() else {
            self.reject("space");
            return false;
        };
        *target = space.unwrap_or_default();
        self.redraw.request_redraw();
        true
    }

    fn reject(&self, field: &str) {
        log::warn!(
            "{} '{}' has no '{}' property; ignoring",
            self.record.type_name(),
            self.record.id,
            field
        );
    }

    pub(crate) fn apply(&mut self, settings: LightSettings) {
        let light_type = self.state.light_type();

        self.set_color(settings.color);
        self.set_intensity(settings.intensity);
        if light_type.has_direction() {
            self.set_dir(settings.dir);
        }
        if light_type.has_position() {
            self.set_pos(settings.pos);
            self.set_attenuation(settings.attenuation);
        }
        if light_type != LightType::Ambient {
            self.set_space(settings.space);
        }
    }
}

impl Component for LightMut<'_> {
    fn id(&self) -> &str {
        &self.record.id
    }

    fn owner(&self) -> Option<ComponentKey> {
        self.record.owner
    }

    fn type_name(&self) -> &'static str {
        self.state.light_type().type_name()
    }

    fn lifecycle(&self) -> Lifecycle {
        self.record.lifecycle
    }
}

impl LightSource for LightMut<'_> {
    fn render_state(&self) -> &LightState {
        self.state
    }
}
