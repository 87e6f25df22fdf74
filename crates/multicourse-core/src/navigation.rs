//! # Navigation Model
//!
//! Pure navigation state: which screens are on a stack, which dialog is
//! shown, and how both survive process restoration.
//!
//! ## Tree Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Root                                                                   │
//! │  ├── "ScreenStack"  Home ─► Favourites / Search / CartNav               │
//! │  │                                              │                       │
//! │  │                                              └── "CartStack"         │
//! │  │                                                  Cart ─► ContactInfo │
//! │  │                                                       ─► PayOrder    │
//! │  │                                                       ─► SuccessOrder│
//! │  ├── "DialogSlot"   Details{id} | About | (none)                        │
//! │  └── BottomBar      observes the active ScreenStack entry               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every target is one variant of [`Configuration`], serialized with a
//! `type` discriminator. Each stack or slot owns a
//! [`ConfigurationSerializer`] listing the discriminators it accepts, so a
//! configuration can never be restored into a container that cannot host it.
//!
//! [`ChildStack`] and [`ChildSlot`] pair configurations with live child
//! instances. Children are created by a caller-supplied factory and dropped
//! when their configuration leaves the container.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

// =============================================================================
// Configuration
// =============================================================================

/// Every navigation target in the app.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Configuration {
    Home,
    Details { id: String },
    BottomBar,
    About,
    Favourites,
    Search,
    CartNav,
    Cart,
    ContactInfo,
    PayOrder { redirect_url: String },
    SuccessOrder,
}

impl Configuration {
    /// The serialized discriminator.
    pub fn kind(&self) -> &'static str {
        match self {
            Configuration::Home => "home",
            Configuration::Details { .. } => "details",
            Configuration::BottomBar => "bottom_bar",
            Configuration::About => "about",
            Configuration::Favourites => "favourites",
            Configuration::Search => "search",
            Configuration::CartNav => "cart_nav",
            Configuration::Cart => "cart",
            Configuration::ContactInfo => "contact_info",
            Configuration::PayOrder { .. } => "pay_order",
            Configuration::SuccessOrder => "success_order",
        }
    }
}

/// Anything that can live on a [`StackNavigation`].
pub trait NavigationTarget: Clone + PartialEq + std::fmt::Debug {
    /// Targets of the same kind replace each other on bring-to-front.
    fn same_kind(&self, other: &Self) -> bool;
}

impl NavigationTarget for Configuration {
    fn same_kind(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// The container does not host this kind of configuration.
    #[error("unsupported configuration '{kind}' for {serializer}")]
    Unsupported {
        serializer: &'static str,
        kind: String,
    },

    /// Saved state could not be parsed.
    #[error("malformed navigation state: {0}")]
    Malformed(String),
}

// =============================================================================
// Serializers
// =============================================================================

/// Polymorphic serializer for one stack or slot.
#[derive(Debug, Clone, Copy)]
pub struct ConfigurationSerializer {
    pub name: &'static str,
    registered: &'static [&'static str],
}

/// Root screen stack and dialog slot.
pub const SCREEN_SERIALIZER: ConfigurationSerializer = ConfigurationSerializer {
    name: "ScreenSerializer",
    registered: &[
        "home",
        "details",
        "bottom_bar",
        "about",
        "favourites",
        "search",
        "cart_nav",
    ],
};

/// Nested checkout stack.
pub const CART_SERIALIZER: ConfigurationSerializer = ConfigurationSerializer {
    name: "CartSerializer",
    registered: &["cart", "contact_info", "pay_order", "success_order"],
};

impl ConfigurationSerializer {
    pub fn is_registered(&self, config: &Configuration) -> bool {
        self.registered.contains(&config.kind())
    }

    fn check(&self, kind: &str) -> Result<(), NavigationError> {
        if self.registered.contains(&kind) {
            Ok(())
        } else {
            Err(NavigationError::Unsupported {
                serializer: self.name,
                kind: kind.to_string(),
            })
        }
    }

    /// Encodes configurations as a JSON array.
    pub fn encode<'a>(
        &self,
        configs: impl IntoIterator<Item = &'a Configuration>,
    ) -> Result<Value, NavigationError> {
        let mut out = Vec::new();
        for config in configs {
            self.check(config.kind())?;
            out.push(
                serde_json::to_value(config)
                    .map_err(|e| NavigationError::Malformed(e.to_string()))?,
            );
        }
        Ok(Value::Array(out))
    }

    /// Decodes a JSON array, rejecting discriminators this container does
    /// not register.
    pub fn decode(&self, value: Value) -> Result<Vec<Configuration>, NavigationError> {
        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(NavigationError::Malformed(format!(
                    "expected array, got {}",
                    other
                )))
            }
        };

        items
            .into_iter()
            .map(|item| {
                let kind = item
                    .get("type")
                    .and_then(Value::as_str)
                    .ok_or_else(|| NavigationError::Malformed("missing type".to_string()))?;
                self.check(kind)?;
                serde_json::from_value(item).map_err(|e| NavigationError::Malformed(e.to_string()))
            })
            .collect()
    }
}

// =============================================================================
// Stack Navigation
// =============================================================================

/// A non-empty stack of configurations.
///
/// ## Invariant
/// The stack always holds at least one entry; `pop` refuses to remove the
/// last one.
#[derive(Debug, Clone, PartialEq)]
pub struct StackNavigation<C> {
    stack: Vec<C>,
}

impl<C: NavigationTarget> StackNavigation<C> {
    /// Seeds the stack with its initial configuration.
    pub fn new(initial: C) -> Self {
        StackNavigation {
            stack: vec![initial],
        }
    }

    /// Rebuilds a stack from restored state. Empty state falls back to `initial`.
    pub fn restore(saved: Vec<C>, initial: C) -> Self {
        if saved.is_empty() {
            Self::new(initial)
        } else {
            StackNavigation { stack: saved }
        }
    }

    pub fn active(&self) -> &C {
        // Non-empty by construction.
        &self.stack[self.stack.len() - 1]
    }

    pub fn items(&self) -> &[C] {
        &self.stack
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn push(&mut self, config: C) {
        self.stack.push(config);
    }

    /// Pops the active entry. Returns `None` when only the root remains.
    pub fn pop(&mut self) -> Option<C> {
        if self.stack.len() > 1 {
            self.stack.pop()
        } else {
            None
        }
    }

    /// Replaces the active entry.
    pub fn replace_current(&mut self, config: C) -> C {
        let last = self.stack.len() - 1;
        std::mem::replace(&mut self.stack[last], config)
    }

    /// Removes every entry of the same kind, then pushes `config`.
    pub fn bring_to_front(&mut self, config: C) {
        self.stack.retain(|c| !c.same_kind(&config));
        self.stack.push(config);
    }

    /// Replaces the whole stack with a single entry.
    pub fn replace_all(&mut self, config: C) {
        self.stack.clear();
        self.stack.push(config);
    }
}

// =============================================================================
// Slot Navigation
// =============================================================================

/// At most one active configuration, e.g. a dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotNavigation<C> {
    active: Option<C>,
}

impl<C> Default for SlotNavigation<C> {
    fn default() -> Self {
        SlotNavigation { active: None }
    }
}

impl<C> SlotNavigation<C> {
    pub fn restore(saved: Option<C>) -> Self {
        SlotNavigation { active: saved }
    }

    /// Shows `config`, replacing whatever was shown.
    pub fn activate(&mut self, config: C) {
        self.active = Some(config);
    }

    pub fn dismiss(&mut self) -> Option<C> {
        self.active.take()
    }

    pub fn active(&self) -> Option<&C> {
        self.active.as_ref()
    }
}

// =============================================================================
// Child Containers
// =============================================================================

/// A [`StackNavigation`] paired with one live child per entry.
///
/// After each navigation the children are reconciled: an entry whose
/// configuration is still present keeps its instance, new entries get a fresh
/// child from the factory, and children whose entry is gone are dropped.
pub struct ChildStack<C, T> {
    navigation: StackNavigation<C>,
    children: Vec<(C, T)>,
}

impl<C: NavigationTarget, T> ChildStack<C, T> {
    pub fn new(navigation: StackNavigation<C>, mut factory: impl FnMut(&C) -> T) -> Self {
        let children = navigation
            .items()
            .iter()
            .map(|c| (c.clone(), factory(c)))
            .collect();
        ChildStack {
            navigation,
            children,
        }
    }

    pub fn navigation(&self) -> &StackNavigation<C> {
        &self.navigation
    }

    pub fn active(&self) -> (&C, &T) {
        let (c, t) = &self.children[self.children.len() - 1];
        (c, t)
    }

    pub fn active_mut(&mut self) -> (&C, &mut T) {
        let last = self.children.len() - 1;
        let (c, t) = &mut self.children[last];
        (&*c, t)
    }

    pub fn children(&self) -> impl Iterator<Item = (&C, &T)> {
        self.children.iter().map(|(c, t)| (c, t))
    }

    /// Applies `op` to the navigation and reconciles the children.
    pub fn navigate<R>(
        &mut self,
        op: impl FnOnce(&mut StackNavigation<C>) -> R,
        mut factory: impl FnMut(&C) -> T,
    ) -> R {
        let result = op(&mut self.navigation);

        let mut old: Vec<Option<(C, T)>> = std::mem::take(&mut self.children)
            .into_iter()
            .map(Some)
            .collect();

        let mut next = Vec::with_capacity(self.navigation.len());
        for config in self.navigation.items() {
            let reused = old
                .iter_mut()
                .find(|slot| matches!(slot, Some((c, _)) if c == config))
                .and_then(Option::take);
            match reused {
                Some(entry) => next.push(entry),
                None => next.push((config.clone(), factory(config))),
            }
        }

        self.children = next;
        // Anything left in `old` is dropped here.
        result
    }
}

/// A [`SlotNavigation`] paired with its live child.
pub struct ChildSlot<C, T> {
    navigation: SlotNavigation<C>,
    child: Option<(C, T)>,
}

impl<C: NavigationTarget, T> ChildSlot<C, T> {
    pub fn new(navigation: SlotNavigation<C>, factory: impl FnOnce(&C) -> T) -> Self {
        let child = navigation.active().map(|c| (c.clone(), factory(c)));
        ChildSlot { navigation, child }
    }

    pub fn navigation(&self) -> &SlotNavigation<C> {
        &self.navigation
    }

    pub fn child(&self) -> Option<(&C, &T)> {
        self.child.as_ref().map(|(c, t)| (c, t))
    }

    /// Shows `config`. Re-activating the shown configuration keeps its child.
    pub fn activate(&mut self, config: C, factory: impl FnOnce(&C) -> T) {
        if matches!(&self.child, Some((c, _)) if *c == config) {
            return;
        }
        self.child = None;
        let child = factory(&config);
        self.navigation.activate(config.clone());
        self.child = Some((config, child));
    }

    pub fn dismiss(&mut self) -> Option<C> {
        self.child = None;
        self.navigation.dismiss()
    }
}

// =============================================================================
// State Keeper
// =============================================================================

/// Root stack key.
pub const SCREEN_STACK_KEY: &str = "ScreenStack";
/// Nested checkout stack key.
pub const CART_STACK_KEY: &str = "CartStack";
/// Dialog slot key.
pub const DIALOG_SLOT_KEY: &str = "DialogSlot";

/// Keyed bag of serialized navigation state.
///
/// Components `save` their configuration lists before the process goes away
/// and `consume` them when they are recreated. Each key is consumed once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateKeeper {
    saved: BTreeMap<String, Value>,
}

impl StateKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(&mut self, key: impl Into<String>, value: Value) {
        self.saved.insert(key.into(), value);
    }

    pub fn consume(&mut self, key: &str) -> Option<Value> {
        self.saved.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.saved.contains_key(key)
    }

    pub fn to_json(&self) -> Result<String, NavigationError> {
        serde_json::to_string(self).map_err(|e| NavigationError::Malformed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, NavigationError> {
        serde_json::from_str(json).map_err(|e| NavigationError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_configuration_discriminator() {
        let value = serde_json::to_value(Configuration::Details { id: "m-1".into() }).unwrap();
        assert_eq!(value, json!({"type": "details", "id": "m-1"}));
        assert_eq!(
            serde_json::to_value(Configuration::Home).unwrap(),
            json!({"type": "home"})
        );
    }

    #[test]
    fn test_stack_never_pops_root() {
        let mut stack = StackNavigation::new(Configuration::Home);
        assert_eq!(stack.pop(), None);

        stack.push(Configuration::Search);
        assert_eq!(stack.active(), &Configuration::Search);
        assert_eq!(stack.pop(), Some(Configuration::Search));
        assert_eq!(stack.items(), &[Configuration::Home]);
    }

    #[test]
    fn test_bring_to_front_moves_existing_entry() {
        let mut stack = StackNavigation::new(Configuration::Home);
        stack.push(Configuration::Favourites);
        stack.push(Configuration::Search);

        stack.bring_to_front(Configuration::Favourites);
        assert_eq!(
            stack.items(),
            &[
                Configuration::Home,
                Configuration::Search,
                Configuration::Favourites
            ]
        );

        stack.bring_to_front(Configuration::Home);
        assert_eq!(stack.active(), &Configuration::Home);
        assert_eq!(stack.len(), 3);
    }

    #[test]
    fn test_slot_activate_and_dismiss() {
        let mut slot = SlotNavigation::default();
        slot.activate(Configuration::About);
        slot.activate(Configuration::Details { id: "m-2".into() });
        assert_eq!(
            slot.active(),
            Some(&Configuration::Details { id: "m-2".into() })
        );
        assert!(slot.dismiss().is_some());
        assert_eq!(slot.active(), None);
    }

    #[test]
    fn test_serializer_round_trips_registered_stack() {
        let stack = [Configuration::Home, Configuration::CartNav];
        let encoded = SCREEN_SERIALIZER.encode(&stack).unwrap();
        assert_eq!(SCREEN_SERIALIZER.decode(encoded).unwrap(), stack.to_vec());
    }

    #[test]
    fn test_serializer_rejects_foreign_configuration() {
        let err = CART_SERIALIZER.encode(&[Configuration::Home]).unwrap_err();
        assert!(matches!(err, NavigationError::Unsupported { .. }));

        let foreign = json!([{"type": "search"}]);
        let err = CART_SERIALIZER.decode(foreign).unwrap_err();
        assert_eq!(
            err,
            NavigationError::Unsupported {
                serializer: "CartSerializer",
                kind: "search".into()
            }
        );

        let unknown = json!([{"type": "checkout_v2"}]);
        assert!(SCREEN_SERIALIZER.decode(unknown).is_err());
        assert!(SCREEN_SERIALIZER.decode(json!({"type": "home"})).is_err());
    }

    #[test]
    fn test_child_stack_reuses_surviving_children() {
        let mut created = Vec::new();
        let mut next_id = 0;
        let mut factory = |c: &Configuration| {
            next_id += 1;
            created.push(c.kind());
            next_id
        };

        let mut stack = ChildStack::new(StackNavigation::new(Configuration::Home), &mut factory);
        stack.navigate(|nav| nav.push(Configuration::Search), &mut factory);
        stack.navigate(|nav| nav.push(Configuration::Favourites), &mut factory);
        assert_eq!(stack.active(), (&Configuration::Favourites, &3));

        // Reordering keeps instances.
        stack.navigate(|nav| nav.bring_to_front(Configuration::Search), &mut factory);
        assert_eq!(stack.active(), (&Configuration::Search, &2));

        let popped = stack.navigate(|nav| nav.pop(), &mut factory);
        assert_eq!(popped, Some(Configuration::Search));
        assert_eq!(stack.active(), (&Configuration::Favourites, &3));

        drop(stack);
        assert_eq!(created, vec!["home", "search", "favourites"]);
    }

    #[test]
    fn test_child_slot_keeps_child_for_same_configuration() {
        let mut built = 0;
        let mut slot: ChildSlot<Configuration, u32> =
            ChildSlot::new(SlotNavigation::default(), |_| unreachable!());
        slot.activate(Configuration::About, |_| {
            built += 1;
            built
        });
        slot.activate(Configuration::About, |_| {
            built += 1;
            built
        });
        assert_eq!(slot.child(), Some((&Configuration::About, &1)));
        assert_eq!(slot.dismiss(), Some(Configuration::About));
        assert!(slot.child().is_none());
    }

    #[test]
    fn test_state_keeper_round_trip() {
        let mut keeper = StateKeeper::new();
        keeper.save(
            SCREEN_STACK_KEY,
            SCREEN_SERIALIZER.encode(&[Configuration::Home]).unwrap(),
        );

        let mut restored = StateKeeper::from_json(&keeper.to_json().unwrap()).unwrap();
        assert!(restored.contains(SCREEN_STACK_KEY));
        assert!(restored.consume(SCREEN_STACK_KEY).is_some());
        assert!(restored.consume(SCREEN_STACK_KEY).is_none());
    }
}
