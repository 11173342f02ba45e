use slotmap::new_key_type;

use crate::core::config::Meta;
use crate::scene::light::Light;

new_key_type! {
    /// Stable handle to a component registered in a [`Scene`](crate::scene::Scene).
    ///
    /// Keys are versioned: once the component is destroyed, its key never
    /// resolves again, even if the slot is reused.
    pub struct ComponentKey;
}

/// Lifecycle of a component. `Destroyed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// Id assigned and registered, variant state not yet installed.
    Constructed,
    /// Fully configured and live.
    Initialized,
    Destroyed,
}

/// Capability shared by every scene component: identity, ownership and
/// lifecycle.
pub trait Component {
    /// Id, unique within the owning scene.
    fn id(&self) -> &str;

    /// Component responsible for destroying this one, if any.
    fn owner(&self) -> Option<ComponentKey>;

    /// Class name, e.g. `"AmbientLight"`.
    fn type_name(&self) -> &'static str;

    fn lifecycle(&self) -> Lifecycle;

    fn is_destroyed(&self) -> bool {
        self.lifecycle() == Lifecycle::Destroyed
    }
}

/// Variant-specific part of a component.
#[derive(Debug, Clone)]
pub enum ComponentBody {
    /// Generic component with no render state; typically used as an owner
    /// grouping other components.
    Plain,
    Light(Light),
}

/// Registry entry for one component.
#[derive(Debug)]
pub struct ComponentRecord {
    pub(crate) id: String,
    pub(crate) owner: Option<ComponentKey>,
    /// Components that named this one as owner, in registration order.
    pub(crate) owned: Vec<ComponentKey>,
    pub(crate) meta: Meta,
    pub(crate) lifecycle: Lifecycle,
    pub(crate) body: ComponentBody,
}

impl ComponentRecord {
    pub(crate) fn new(id: String, owner: Option<ComponentKey>, meta: Meta) -> Self {
        Self {
            id,
            owner,
            owned: Vec::new(),
            meta,
            lifecycle: Lifecycle::Constructed,
            body: ComponentBody::Plain,
        }
    }

    #[must_use]
    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    /// Components this one is responsible for destroying.
    #[must_use]
    pub fn owned(&self) -> &[ComponentKey] {
        &self.owned
    }

    #[must_use]
    pub fn body(&self) -> &ComponentBody {
        &self.body
    }

    #[must_use]
    pub fn as_light(&self) -> Option<&Light> {
        match &self.body {
            ComponentBody::Light(light) => Some(light),
            ComponentBody::Plain => None,
        }
    }

    #[must_use]
    pub fn is_light(&self) -> bool {
        matches!(self.body, ComponentBody::Light(_))
    }
}

impl Component for ComponentRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn owner(&self) -> Option<ComponentKey> {
        self.owner
    }

    fn type_name(&self) -> &'static str {
        match &self.body {
            ComponentBody::Plain => "Component",
            ComponentBody::Light(light) => light.light_type().type_name(),
        }
    }

    fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }
}
