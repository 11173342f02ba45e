use std::iter::FusedIterator;
use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering};

use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use uuid::Uuid;

use crate::core::component::{Component, ComponentBody, ComponentKey, ComponentRecord, Lifecycle};
use crate::core::config::ComponentConfig;
use crate::core::redraw::{RedrawFlag, RedrawSink};
use crate::errors::{Result, SceneError};
use crate::scene::light::{
    Light, LightConfig, LightMut, LightSettings, LightState, LightStateKey, LightType, LightView,
};

static NEXT_SCENE_ID: AtomicU32 = AtomicU32::new(1);

/// Scene registry
///
/// Owns every component of one scene graph, keyed by id, plus the render
/// state arena for its lights. The scene is single-threaded: all mutation
/// happens synchronously on the thread that drives the render loop.
///
/// Every mutation of render state is reported to the [`RedrawSink`] given at
/// construction; the renderer consumes that signal once per frame.
pub struct Scene {
    pub id: u32,

    // ==== Component registry ====
    components: SlotMap<ComponentKey, ComponentRecord>,
    ids: FxHashMap<String, ComponentKey>,
    /// Live components in registration order.
    order: Vec<ComponentKey>,

    // ==== Light registry ====
    lights: FxHashMap<String, ComponentKey>,
    /// Live lights in registration order; shading accumulates in this order.
    light_order: Vec<ComponentKey>,
    light_states: SlotMap<LightStateKey, LightState>,

    redraw: Rc<dyn RedrawSink>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Rc::new(RedrawFlag::new()))
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("id", &self.id)
            .field("components", &self.order.len())
            .field("lights", &self.light_order.len())
            .finish_non_exhaustive()
    }
}

impl Scene {
    #[must_use]
    pub fn new(redraw: Rc<dyn RedrawSink>) -> Self {
        Self {
            id: NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed),
            components: SlotMap::with_key(),
            ids: FxHashMap::default(),
            order: Vec::new(),
            lights: FxHashMap::default(),
            light_order: Vec::new(),
            light_states: SlotMap::with_key(),
            redraw,
        }
    }

    /// Flags cached render output as stale.
    pub fn request_redraw(&self) {
        self.redraw.request_redraw();
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Creates a generic component, typically used as an owner for others.
    pub fn create_component(
        &mut self,
        owner: Option<ComponentKey>,
        config: ComponentConfig,
    ) -> Result<ComponentKey> {
        let key = self.construct(owner, config)?;
        self.mark_initialized(key);
        Ok(key)
    }

    /// Creates a light and registers it in the light map.
    ///
    /// Omitted configuration fields take their defaults. Fails only when an
    /// explicit id is already registered.
    pub fn create_light(
        &mut self,
        owner: Option<ComponentKey>,
        config: impl Into<LightConfig>,
    ) -> Result<ComponentKey> {
        let (light_type, base, settings) = config.into().into_parts();
        let key = self.construct(owner, base)?;
        self.init_light(key, light_type, settings);
        self.mark_initialized(key);
        Ok(key)
    }

    fn construct(
        &mut self,
        owner: Option<ComponentKey>,
        config: ComponentConfig,
    ) -> Result<ComponentKey> {
        let owner = owner.filter(|&owner| {
            let live = self.components.contains_key(owner);
            if !live {
                log::warn!("Owner {owner:?} is already destroyed; creating component unowned");
            }
            live
        });

        let id = match config.id {
            Some(id) => id,
            None => self.generate_id(),
        };

        let key = self.register(ComponentRecord::new(id, owner, config.meta))?;

        if let Some(owner) = owner
            && let Some(owner_record) = self.components.get_mut(owner)
        {
            owner_record.owned.push(key);
        }

        Ok(key)
    }

    fn init_light(&mut self, key: ComponentKey, light_type: LightType, settings: LightSettings) {
        let state = self.light_states.insert(LightState::new(light_type));
        if let Some(record) = self.components.get_mut(key) {
            record.body = ComponentBody::Light(Light::new(light_type, state));
        }
        self.light_created(key);

        if let Some(mut light) = self.light_mut(key) {
            light.apply(settings);
        }
    }

    fn mark_initialized(&mut self, key: ComponentKey) {
        if let Some(record) = self.components.get_mut(key) {
            record.lifecycle = Lifecycle::Initialized;
            log::debug!("Created {} '{}'", record.type_name(), record.id);
        }
    }

    fn generate_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !self.ids.contains_key(&id) {
                return id;
            }
        }
    }

    // ========================================================================
    // Registry primitives
    // ========================================================================

    fn register(&mut self, record: ComponentRecord) -> Result<ComponentKey> {
        if self.ids.contains_key(&record.id) {
            return Err(SceneError::DuplicateId(record.id));
        }

        let id = record.id.clone();
        let is_light = record.is_light();
        let key = self.components.insert(record);

        self.ids.insert(id.clone(), key);
        self.order.push(key);
        if is_light {
            self.lights.insert(id, key);
            self.light_order.push(key);
        }
        Ok(key)
    }

    /// Registration hook for lights whose body is installed after
    /// [`register`](Self::register).
    fn light_created(&mut self, key: ComponentKey) {
        let Some(record) = self.components.get(key) else {
            return;
        };
        if self.lights.insert(record.id.clone(), key).is_none() {
            self.light_order.push(key);
        }
    }

    fn deregister(&mut self, id: &str) -> Option<ComponentKey> {
        let key = self.ids.remove(id)?;
        self.order.retain(|&k| k != key);
        if self.lights.remove(id).is_some() {
            self.light_order.retain(|&k| k != key);
        }
        Some(key)
    }

    // ========================================================================
    // Destruction
    // ========================================================================

    /// Destroys a component and, transitively, every component it owns.
    ///
    /// Children are destroyed in the order they were registered, depth-first.
    /// Destroying an already destroyed component is a no-op.
    pub fn destroy(&mut self, key: ComponentKey) {
        let Some(record) = self.components.get(key) else {
            log::trace!("Ignoring destroy of already destroyed component {key:?}");
            return;
        };

        let owner = record.owner;
        if let Some(owner) = owner
            && let Some(owner_record) = self.components.get_mut(owner)
        {
            owner_record.owned.retain(|&k| k != key);
        }

        for current in self.cascade_order(key) {
            let Some(record) = self.components.remove(current) else {
                continue;
            };

            self.deregister(&record.id);
            if let ComponentBody::Light(light) = &record.body {
                self.light_states.remove(light.state_key());
                self.redraw.request_redraw();
            }
            log::debug!("Destroyed {} '{}'", record.type_name(), record.id);
        }
    }

    /// `key` followed by everything it owns, transitively: depth-first
    /// pre-order, siblings in registration order.
    fn cascade_order(&self, key: ComponentKey) -> Vec<ComponentKey> {
        let mut order = Vec::new();
        let mut pending = vec![key];
        while let Some(current) = pending.pop() {
            let Some(record) = self.components.get(current) else {
                continue;
            };
            order.push(current);
            pending.extend(record.owned.iter().rev());
        }
        order
    }

    /// Destroys every component. The scene itself stays usable.
    pub fn clear(&mut self) {
        let roots: Vec<ComponentKey> = self
            .order
            .iter()
            .copied()
            .filter(|&key| self.components.get(key).is_some_and(|r| r.owner.is_none()))
            .collect();

        for key in roots {
            self.destroy(key);
        }

        debug_assert!(self.components.is_empty());
        debug_assert!(self.light_states.is_empty());
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Lifecycle of `key`; stale keys report [`Lifecycle::Destroyed`].
    #[must_use]
    pub fn lifecycle(&self, key: ComponentKey) -> Lifecycle {
        self.components
            .get(key)
            .map_or(Lifecycle::Destroyed, |record| record.lifecycle)
    }

    #[must_use]
    pub fn is_destroyed(&self, key: ComponentKey) -> bool {
        self.lifecycle(key) == Lifecycle::Destroyed
    }

    #[must_use]
    pub fn component(&self, key: ComponentKey) -> Option<&ComponentRecord> {
        self.components.get(key)
    }

    #[must_use]
    pub fn component_key(&self, id: &str) -> Option<ComponentKey> {
        self.ids.get(id).copied()
    }

    #[must_use]
    pub fn component_by_id(&self, id: &str) -> Option<&ComponentRecord> {
        self.component(self.component_key(id)?)
    }

    #[must_use]
    pub fn contains_id(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    /// Live components in registration order.
    #[must_use]
    pub fn components(&self) -> impl Iterator<Item = (ComponentKey, &ComponentRecord)> {
        self.order
            .iter()
            .filter_map(|&key| self.components.get(key).map(|record| (key, record)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // ========================================================================
    // Lights
    // ========================================================================

    #[must_use]
    pub fn light(&self, key: ComponentKey) -> Option<LightView<'_>> {
        let record = self.components.get(key)?;
        let light = record.as_light()?;
        let state = self.light_states.get(light.state_key())?;
        Some(LightView {
            key,
            record,
            light,
            state,
        })
    }

    #[must_use]
    pub fn light_by_id(&self, id: &str) -> Option<LightView<'_>> {
        self.light(*self.lights.get(id)?)
    }

    /// Mutable access to a light's render state through its signalling
    /// setters.
    pub fn light_mut(&mut self, key: ComponentKey) -> Option<LightMut<'_>> {
        let record = self.components.get(key)?;
        let light = record.as_light()?;
        let state = self.light_states.get_mut(light.state_key())?;
        Some(LightMut {
            key,
            record,
            state,
            redraw: self.redraw.as_ref(),
        })
    }

    /// Render state by arena handle.
    #[must_use]
    pub fn light_state(&self, handle: LightStateKey) -> Option<&LightState> {
        self.light_states.get(handle)
    }

    /// Registered lights in registration order.
    ///
    /// The sequence is lazy and finite; call again (or clone it) to restart.
    #[must_use]
    pub fn enumerate_lights(&self) -> Lights<'_> {
        Lights {
            scene: self,
            keys: self.light_order.iter(),
        }
    }

    #[must_use]
    pub fn light_count(&self) -> usize {
        self.light_order.len()
    }
}

/// Iterator over a scene's lights, see [`Scene::enumerate_lights`].
#[derive(Clone)]
pub struct Lights<'a> {
    scene: &'a Scene,
    keys: std::slice::Iter<'a, ComponentKey>,
}

impl<'a> Iterator for Lights<'a> {
    type Item = LightView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let scene: &'a Scene = self.scene;
        self.keys.by_ref().find_map(|&key| scene.light(key))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.keys.len()))
    }
}

impl FusedIterator for Lights<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Meta;

    #[test]
    fn test_register_rejects_duplicate_id() {
        let mut scene = Scene::default();
        let first = scene
            .register(ComponentRecord::new("a".into(), None, Meta::new()))
            .unwrap();

        let err = scene
            .register(ComponentRecord::new("a".into(), None, Meta::new()))
            .unwrap_err();

        assert_eq!(err, SceneError::DuplicateId("a".into()));
        assert_eq!(scene.component_key("a"), Some(first));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_register_light_record_enters_light_map() {
        let mut scene = Scene::default();
        let state = scene.light_states.insert(LightState::new(LightType::Point));
        let mut record = ComponentRecord::new("bulb".into(), None, Meta::new());
        record.body = ComponentBody::Light(Light::new(LightType::Point, state));

        let key = scene.register(record).unwrap();

        assert_eq!(scene.light_count(), 1);
        assert_eq!(scene.light_by_id("bulb").map(|l| l.key()), Some(key));
    }

    #[test]
    fn test_deregister_is_noop_when_absent() {
        let mut scene = Scene::default();
        scene
            .register(ComponentRecord::new("a".into(), None, Meta::new()))
            .unwrap();

        assert!(scene.deregister("missing").is_none());
        assert_eq!(scene.len(), 1);

        assert!(scene.deregister("a").is_some());
        assert!(scene.deregister("a").is_none());
        assert!(scene.is_empty());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let mut scene = Scene::default();
        let a = scene.create_component(None, ComponentConfig::default()).unwrap();
        let b = scene.create_component(None, ComponentConfig::default()).unwrap();

        let id_a = scene.component(a).unwrap().id().to_owned();
        let id_b = scene.component(b).unwrap().id().to_owned();
        assert_ne!(id_a, id_b);
        assert!(!id_a.is_empty());
    }

    #[test]
    fn test_cascade_order_is_depth_first_in_registration_order() {
        let mut scene = Scene::default();
        let root = scene.create_component(None, ComponentConfig::default()).unwrap();
        let mid = scene.create_component(Some(root), ComponentConfig::default()).unwrap();
        let leaf_a = scene
            .create_light(Some(mid), crate::scene::light::AmbientLightConfig::default())
            .unwrap();
        let leaf_b = scene
            .create_light(Some(mid), crate::scene::light::PointLightConfig::default())
            .unwrap();
        let sibling = scene
            .create_light(Some(root), crate::scene::light::DirLightConfig::default())
            .unwrap();

        assert_eq!(scene.cascade_order(root), [root, mid, leaf_a, leaf_b, sibling]);
        assert_eq!(scene.cascade_order(mid), [mid, leaf_a, leaf_b]);
        assert_eq!(scene.cascade_order(sibling), [sibling]);

        scene.destroy(leaf_a);
        assert_eq!(scene.cascade_order(root), [root, mid, leaf_b, sibling]);

        scene.destroy(root);
        assert!(scene.cascade_order(root).is_empty());
        assert!(scene.is_empty());
    }

    #[test]
    fn test_light_state_released_on_destroy() {
        let mut scene = Scene::default();
        let key = scene
            .create_light(None, crate::scene::light::AmbientLightConfig::default())
            .unwrap();
        let handle = scene.light(key).unwrap().state_key();
        assert!(scene.light_state(handle).is_some());

        scene.destroy(key);

        assert!(scene.light_state(handle).is_none());
        assert!(scene.light_states.is_empty());
    }
}
