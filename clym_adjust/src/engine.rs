// Copyright 2026 the Clym Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Engine`] facade.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use clym_dom::{DomEvent, DomPort};
use hashbrown::HashMap;

use crate::adjustment::{Adjustment, Param};
use crate::dispatch::{EffectRuntime, EventOutcome};
use crate::effect::EffectTable;
use crate::error::{EffectError, EngineError};
use crate::navigator::FocusRecord;
use crate::overlay::OverlayConfig;
use crate::profile::{Operation, ProfileCatalog, ProfileState, merge_operations};

/// Snapshot of what is active.
///
/// A key is present in `adjustments` exactly while that adjustment is active;
/// its value is never falsy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineState {
    /// Selected profile id.
    #[cfg_attr(feature = "serde", serde(default))]
    pub profile: Option<String>,
    /// Active adjustments and their parameters.
    #[cfg_attr(feature = "serde", serde(default))]
    pub adjustments: HashMap<Adjustment, Param>,
}

impl EngineState {
    /// Parameter of `adjustment`, [`Param::Off`] when inactive.
    pub fn param(&self, adjustment: Adjustment) -> Param {
        self.adjustments.get(&adjustment).cloned().unwrap_or_default()
    }
}

/// A host request, as delivered to [`Engine::trigger_change`].
///
/// With the `serde` feature this reads and writes
/// `{"actionType": "ADJUSTMENT", "payload": {"adjustment": "FONT_SIZE", "params": 2}}`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        tag = "actionType",
        content = "payload",
        rename_all = "SCREAMING_SNAKE_CASE"
    )
)]
pub enum Action {
    /// Set one adjustment by id.
    Adjustment {
        /// Adjustment id; unknown ids are ignored.
        adjustment: String,
        /// New parameter.
        #[cfg_attr(feature = "serde", serde(default))]
        params: Param,
    },
    /// Select a profile.
    Profile {
        /// Profile id.
        profile: String,
    },
    /// Undo a profile.
    UnsetProfile {
        /// Profile id.
        profile: String,
        /// Operations to apply instead of the profile's own reset config.
        #[cfg_attr(feature = "serde", serde(default, rename = "resetConfig"))]
        reset_config: Option<Vec<Operation>>,
    },
}

/// Engine construction options.
#[derive(Clone, Debug, Default)]
pub struct EngineConfig {
    /// Per-adjustment effects.
    pub effects: EffectTable,
    /// Profiles selectable by id.
    pub profiles: ProfileCatalog,
    /// Overlay geometry.
    pub overlays: OverlayConfig,
    /// State restored at construction.
    pub initial_state: Option<EngineState>,
}

type ChangeListener = Box<dyn FnMut(&EngineState)>;

/// Reversible accessibility adjustments applied to one document.
///
/// The engine owns its [`DomPort`] and every piece of state it installs into
/// the page. Hosts drive it through [`Engine::set_adjustment`],
/// [`Engine::set_profile`] and friends, and forward native events through
/// [`Engine::handle_event`] and [`Engine::flush_mutations`].
///
/// Several engines can run side by side, one per document; none of them
/// share state.
pub struct Engine<D: DomPort> {
    dom: D,
    effects: EffectTable,
    profiles: ProfileCatalog,
    runtime: EffectRuntime<D::Node>,
    state: EngineState,
    on_change: Option<ChangeListener>,
}

impl<D: DomPort + core::fmt::Debug> core::fmt::Debug for Engine<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Engine")
            .field("dom", &self.dom)
            .field("effects", &self.effects)
            .field("profiles", &self.profiles)
            .field("runtime", &self.runtime)
            .field("state", &self.state)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

impl<D: DomPort> Engine<D> {
    /// Attach to `dom`: install the base stylesheet and restore
    /// [`EngineConfig::initial_state`], if any.
    pub fn new(mut dom: D, config: EngineConfig) -> Result<Self, EngineError> {
        let EngineConfig {
            effects,
            profiles,
            overlays,
            initial_state,
        } = config;
        let mut runtime = EffectRuntime::new(&overlays);
        runtime.install(&mut dom);
        let mut engine = Self {
            dom,
            effects,
            profiles,
            runtime,
            state: EngineState::default(),
            on_change: None,
        };
        if let Some(state) = initial_state {
            engine.set_state(state)?;
        }
        Ok(engine)
    }

    /// The document.
    pub fn dom(&self) -> &D {
        &self.dom
    }

    /// The document, mutably. Mutations made here are the page's own.
    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    /// Current state.
    pub fn get_state(&self) -> &EngineState {
        &self.state
    }

    /// Idle, profile-driven, or adjustments without a profile.
    pub fn profile_state(&self) -> ProfileState {
        ProfileState::derive(self.state.profile.as_deref(), !self.state.adjustments.is_empty())
    }

    /// The profile catalog.
    pub fn profiles(&self) -> &ProfileCatalog {
        &self.profiles
    }

    /// Id of the style element currently installed for `adjustment`.
    pub fn style_id(&self, adjustment: Adjustment) -> Option<&str> {
        self.runtime.style_id(adjustment)
    }

    /// The element keyboard navigation last focused, until it loses focus.
    pub fn focus_record(&self) -> Option<&FocusRecord<D::Node>> {
        self.runtime.focus_record()
    }

    /// Register the callback invoked with the new state after every change.
    pub fn set_change_listener(&mut self, listener: impl FnMut(&EngineState) + 'static) {
        self.on_change = Some(Box::new(listener));
    }

    fn notify(&mut self) {
        if let Some(listener) = self.on_change.as_mut() {
            listener(&self.state);
        }
    }

    fn apply(&mut self, adjustment: Adjustment, params: Param) -> Result<(), EffectError> {
        self.runtime.apply(&mut self.dom, &self.effects, adjustment, &params)?;
        if params.is_truthy() {
            self.state.adjustments.insert(adjustment, params);
        } else {
            self.state.adjustments.remove(&adjustment);
        }
        Ok(())
    }

    fn apply_all(&mut self, operations: Vec<Operation>) -> Result<(), EngineError> {
        for op in operations {
            self.apply(op.prop, op.params)?;
        }
        Ok(())
    }

    /// Set an adjustment by id. Unknown ids are ignored.
    pub fn set_adjustment(
        &mut self,
        id: &str,
        params: impl Into<Param>,
    ) -> Result<(), EngineError> {
        let Some(adjustment) = Adjustment::from_id(id) else {
            log::debug!("ignoring unknown adjustment `{id}`");
            return Ok(());
        };
        self.set(adjustment, params)
    }

    /// Set an adjustment. A falsy parameter turns it off.
    pub fn set(
        &mut self,
        adjustment: Adjustment,
        params: impl Into<Param>,
    ) -> Result<(), EngineError> {
        self.apply(adjustment, params.into())?;
        self.notify();
        Ok(())
    }

    /// Select a profile, undoing the active one first. Unknown ids are ignored.
    pub fn set_profile(&mut self, id: &str) -> Result<(), EngineError> {
        let Some(next) = self.profiles.get(id) else {
            log::debug!("ignoring unknown profile `{id}`");
            return Ok(());
        };
        let reset = self
            .state
            .profile
            .as_deref()
            .and_then(|active| self.profiles.get(active))
            .map(|p| p.reset_config())
            .unwrap_or_default();
        let merged = merge_operations(reset, next.set_config());
        let id = String::from(next.id());
        self.apply_all(merged)?;
        self.state.profile = Some(id);
        self.notify();
        Ok(())
    }

    /// Undo a profile with `reset_config`, or with the profile's own reset config.
    ///
    /// The active profile is cleared only when it is `id`.
    pub fn unset_profile(
        &mut self,
        id: &str,
        reset_config: Option<Vec<Operation>>,
    ) -> Result<(), EngineError> {
        let operations = match reset_config {
            Some(ops) => ops,
            None => match self.profiles.get(id) {
                Some(profile) => profile.reset_config().to_vec(),
                None => {
                    log::debug!("ignoring unset of unknown profile `{id}`");
                    return Ok(());
                }
            },
        };
        self.apply_all(operations)?;
        if self.state.profile.as_deref() == Some(id) {
            self.state.profile = None;
        }
        self.notify();
        Ok(())
    }

    /// Run a host action.
    pub fn trigger_change(&mut self, action: Action) -> Result<(), EngineError> {
        match action {
            Action::Adjustment { adjustment, params } => self.set_adjustment(&adjustment, params),
            Action::Profile { profile } => self.set_profile(&profile),
            Action::UnsetProfile {
                profile,
                reset_config,
            } => self.unset_profile(&profile, reset_config),
        }
    }

    /// Move to `state`: adjustments missing from it are turned off, new or
    /// changed ones applied. The profile id is recorded, not re-applied.
    pub fn set_state(&mut self, state: EngineState) -> Result<(), EngineError> {
        let EngineState {
            profile,
            adjustments,
        } = state;
        for &adjustment in Adjustment::ALL {
            let current = self.state.adjustments.get(&adjustment).cloned();
            let wanted = adjustments.get(&adjustment).filter(|p| p.is_truthy());
            match (current.as_ref(), wanted) {
                (Some(_), None) => self.apply(adjustment, Param::Off)?,
                (current, Some(next)) if current != Some(next) => {
                    self.apply(adjustment, next.clone())?;
                }
                _ => {}
            }
        }
        self.state.profile = profile;
        self.notify();
        Ok(())
    }

    /// Deliver a host event. Returns whether the engine was listening for it.
    pub fn handle_event(&mut self, event: DomEvent<D::Node>) -> bool {
        match self.runtime.handle_event(&mut self.dom, &event) {
            EventOutcome::Ignored => false,
            EventOutcome::Handled => true,
            EventOutcome::CloseReadingMode => {
                if let Err(err) = self.set(Adjustment::ReadingMode, Param::Off) {
                    log::warn!("closing reading mode failed: {err}");
                }
                true
            }
        }
    }

    /// Process pending page mutations. Returns whether the magnifier rescanned.
    pub fn flush_mutations(&mut self) -> bool {
        self.runtime.flush_mutations(&mut self.dom)
    }

    /// Turn everything off, remove the base stylesheet, and hand the document back.
    pub fn destroy(mut self) -> D {
        let active: Vec<Adjustment> = Adjustment::ALL
            .iter()
            .copied()
            .filter(|a| self.state.adjustments.contains_key(a))
            .collect();
        for adjustment in active {
            if let Err(err) = self.apply(adjustment, Param::Off) {
                log::warn!("turning {adjustment} off failed: {err}");
            }
        }
        self.state.profile = None;
        self.runtime.teardown(&mut self.dom);
        self.dom
    }
}
