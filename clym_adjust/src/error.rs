// Copyright 2026 the Clym Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.
//!
//! Unknown ids, falsy parameters and missing DOM targets are never errors;
//! they are no-ops. Errors only describe malformed configuration.

use alloc::string::String;

use crate::adjustment::Adjustment;

/// A CSS generator rejected its parameter.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EffectError {
    /// The parameter is not a usable CSS color.
    #[error("malformed color `{value}` for {adjustment}")]
    MalformedColor {
        /// Adjustment whose generator failed.
        adjustment: Adjustment,
        /// Rejected input.
        value: String,
    },
    /// The parameter is not one of the values the adjustment understands.
    #[error("unsupported value `{value}` for {adjustment}")]
    UnsupportedValue {
        /// Adjustment whose generator failed.
        adjustment: Adjustment,
        /// Rejected input.
        value: String,
    },
}

/// A profile definition violates the reset invariant.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    /// A prop in `set_config` has no entry in `reset_config`.
    #[error("profile `{profile}` never resets {adjustment}")]
    MissingReset {
        /// Offending profile.
        profile: String,
        /// Prop without a reset.
        adjustment: Adjustment,
    },
    /// A prop appears more than once in `reset_config`.
    #[error("profile `{profile}` resets {adjustment} more than once")]
    DuplicateReset {
        /// Offending profile.
        profile: String,
        /// Prop reset twice.
        adjustment: Adjustment,
    },
}

/// Errors surfaced by [`Engine`](crate::Engine) operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// A CSS generator failed while applying an adjustment.
    #[error(transparent)]
    Effect(#[from] EffectError),
    /// The profile table is inconsistent.
    #[error(transparent)]
    Profile(#[from] ProfileError),
}
