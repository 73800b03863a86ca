// Copyright 2026 the Clym Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Profiles: named bundles of adjustment presets.

use alloc::string::String;
use alloc::vec::Vec;

use crate::adjustment::{Adjustment, Param};
use crate::error::ProfileError;

/// One adjustment operation: set `prop` to `params`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Operation {
    /// Adjustment to change.
    pub prop: Adjustment,
    /// New parameter; falsy resets the adjustment.
    #[cfg_attr(feature = "serde", serde(default))]
    pub params: Param,
}

impl Operation {
    /// Create an operation.
    pub fn new(prop: Adjustment, params: impl Into<Param>) -> Self {
        Self {
            prop,
            params: params.into(),
        }
    }
}

/// A named preset bundle with the operations that undo it.
///
/// Every prop in the set config appears exactly once in the reset config;
/// [`Profile::new`] rejects definitions that break this.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    id: String,
    set_config: Vec<Operation>,
    reset_config: Vec<Operation>,
}

impl Profile {
    /// Validate and create a profile.
    pub fn new(
        id: impl Into<String>,
        set_config: Vec<Operation>,
        reset_config: Vec<Operation>,
    ) -> Result<Self, ProfileError> {
        let id = id.into();
        for op in &set_config {
            match reset_config.iter().filter(|r| r.prop == op.prop).count() {
                0 => {
                    return Err(ProfileError::MissingReset {
                        profile: id,
                        adjustment: op.prop,
                    });
                }
                1 => {}
                _ => {
                    return Err(ProfileError::DuplicateReset {
                        profile: id,
                        adjustment: op.prop,
                    });
                }
            }
        }
        Ok(Self {
            id,
            set_config,
            reset_config,
        })
    }

    /// Create a profile whose reset config turns every prop of `set_config` off.
    pub fn with_neutral_reset(id: impl Into<String>, set_config: Vec<Operation>) -> Self {
        let mut reset_config: Vec<Operation> = Vec::with_capacity(set_config.len());
        for op in &set_config {
            if !reset_config.iter().any(|r| r.prop == op.prop) {
                reset_config.push(Operation::new(op.prop, Param::Off));
            }
        }
        Self {
            id: id.into(),
            set_config,
            reset_config,
        }
    }

    /// Profile id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Operations applied when the profile is selected.
    pub fn set_config(&self) -> &[Operation] {
        &self.set_config
    }

    /// Operations that undo [`Profile::set_config`].
    pub fn reset_config(&self) -> &[Operation] {
        &self.reset_config
    }
}

/// Lookup table of profiles by id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileCatalog {
    profiles: Vec<Profile>,
}

impl Default for ProfileCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl ProfileCatalog {
    /// An empty catalog.
    pub fn empty() -> Self {
        Self {
            profiles: Vec::new(),
        }
    }

    /// The stock profiles.
    pub fn standard() -> Self {
        use Adjustment as A;
        let mut catalog = Self::empty();
        let presets: [(&str, Vec<Operation>); 6] = [
            (
                "SEIZURE_SAFE",
                alloc::vec![
                    Operation::new(A::StopAnimations, true),
                    Operation::new(A::Saturation, "low"),
                ],
            ),
            (
                "VISION_IMPAIRED",
                alloc::vec![
                    Operation::new(A::FontSize, 2),
                    Operation::new(A::Saturation, "high"),
                    Operation::new(A::Cursor, "big-black"),
                ],
            ),
            (
                "ADHD_FRIENDLY",
                alloc::vec![
                    Operation::new(A::StopAnimations, true),
                    Operation::new(A::Saturation, "low"),
                    Operation::new(A::ReadingMask, true),
                ],
            ),
            (
                "COGNITIVE_DISABILITY",
                alloc::vec![
                    Operation::new(A::HighlightTitles, true),
                    Operation::new(A::HighlightLinks, true),
                    Operation::new(A::ReadingGuide, true),
                ],
            ),
            (
                "KEYBOARD_NAVIGATION",
                alloc::vec![
                    Operation::new(A::KeyboardNavigation, true),
                    Operation::new(A::HighlightFocus, true),
                ],
            ),
            (
                "BLIND_USERS",
                alloc::vec![
                    Operation::new(A::ReadingMode, true),
                    Operation::new(A::StopAnimations, true),
                ],
            ),
        ];
        for (id, set_config) in presets {
            catalog.insert(Profile::with_neutral_reset(id, set_config));
        }
        catalog
    }

    /// Add `profile`, replacing any profile with the same id.
    pub fn insert(&mut self, profile: Profile) {
        match self.profiles.iter_mut().find(|p| p.id == profile.id) {
            Some(slot) => *slot = profile,
            None => self.profiles.push(profile),
        }
    }

    /// Profile with the given id.
    pub fn get(&self, id: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// Every profile, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Profile> {
        self.profiles.iter()
    }
}

/// Concatenate `reset` and `set`, keeping one operation per prop.
///
/// A prop keeps the position of its first occurrence and the value of its last,
/// so the incoming profile wins over the reset of the outgoing one.
pub fn merge_operations(reset: &[Operation], set: &[Operation]) -> Vec<Operation> {
    let mut merged: Vec<Operation> = Vec::with_capacity(reset.len() + set.len());
    for op in reset.iter().chain(set) {
        match merged.iter_mut().find(|m| m.prop == op.prop) {
            Some(slot) => slot.params = op.params.clone(),
            None => merged.push(op.clone()),
        }
    }
    merged
}

/// Where the engine stands with respect to profiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProfileState {
    /// No profile and no adjustments.
    Idle,
    /// The named profile is selected.
    ProfileActive(String),
    /// Adjustments are active without a selected profile.
    AdjustmentsOnly,
}

impl ProfileState {
    pub(crate) fn derive(profile: Option<&str>, has_adjustments: bool) -> Self {
        match profile {
            Some(id) => Self::ProfileActive(id.into()),
            None if has_adjustments => Self::AdjustmentsOnly,
            None => Self::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn standard_profiles_are_valid() {
        let catalog = ProfileCatalog::standard();
        assert_eq!(catalog.iter().count(), 6);
        for p in catalog.iter() {
            let revalidated =
                Profile::new(p.id(), p.set_config().to_vec(), p.reset_config().to_vec());
            assert_eq!(revalidated.as_ref(), Ok(p), "{} must validate", p.id());
            assert!(p.reset_config().iter().all(|op| !op.params.is_truthy()));
        }
        let seizure = catalog.get("SEIZURE_SAFE").unwrap();
        assert_eq!(
            seizure.set_config(),
            &[
                Operation::new(Adjustment::StopAnimations, true),
                Operation::new(Adjustment::Saturation, "low"),
            ]
        );
    }

    #[test]
    fn validation_rejects_missing_and_duplicate_resets() {
        let set = vec![Operation::new(Adjustment::Contrast, "high")];
        assert_eq!(
            Profile::new("X", set.clone(), vec![]),
            Err(ProfileError::MissingReset {
                profile: "X".into(),
                adjustment: Adjustment::Contrast,
            })
        );
        let twice = vec![
            Operation::new(Adjustment::Contrast, Param::Off),
            Operation::new(Adjustment::Contrast, false),
        ];
        assert!(matches!(
            Profile::new("X", set, twice),
            Err(ProfileError::DuplicateReset { .. })
        ));
    }

    #[test]
    fn merge_keeps_first_position_and_last_value() {
        let reset = [
            Operation::new(Adjustment::StopAnimations, Param::Off),
            Operation::new(Adjustment::Saturation, Param::Off),
        ];
        let set = [
            Operation::new(Adjustment::FontSize, 2),
            Operation::new(Adjustment::Saturation, "high"),
        ];
        assert_eq!(
            merge_operations(&reset, &set),
            [
                Operation::new(Adjustment::StopAnimations, Param::Off),
                Operation::new(Adjustment::Saturation, "high"),
                Operation::new(Adjustment::FontSize, 2),
            ]
        );
    }

    #[test]
    fn insert_replaces_by_id() {
        let mut catalog = ProfileCatalog::empty();
        let hide = vec![Operation::new(Adjustment::HideImages, true)];
        catalog.insert(Profile::with_neutral_reset("P", hide));
        let mute = vec![Operation::new(Adjustment::MuteSounds, true)];
        catalog.insert(Profile::with_neutral_reset("P", mute));
        assert_eq!(catalog.iter().count(), 1);
        assert_eq!(catalog.get("P").unwrap().set_config()[0].prop, Adjustment::MuteSounds);
        assert!(catalog.get("Q").is_none());
    }

    #[test]
    fn state_is_derived() {
        assert_eq!(ProfileState::derive(None, false), ProfileState::Idle);
        assert_eq!(ProfileState::derive(None, true), ProfileState::AdjustmentsOnly);
        assert_eq!(
            ProfileState::derive(Some("SEIZURE_SAFE"), true),
            ProfileState::ProfileActive("SEIZURE_SAFE".into())
        );
    }
}
