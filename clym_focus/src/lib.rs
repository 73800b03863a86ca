// Copyright 2026 the Clym Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clym Focus: keyboard landmark navigation primitives.
//!
//! This crate models single-key page navigation as a combination of:
//! - **Landmark groups** ([`LandmarkGroups`]): the page's elements sorted into
//!   menus, headings, forms, buttons, and graphics, in document order.
//! - **Navigation intents** ([`Navigation`]): move to the next or previous member
//!   of a group.
//! - **Cyclic traversal** ([`navigate_group`]): given the currently focused
//!   element, pick the next member, wrapping at both ends.
//! - **Key bindings** ([`KeybindingManager`]): a registry of single-key actions
//!   that reports when the shared key-down listener has to be attached or detached.
//!
//! None of these types touch a document. They are generic over the node key
//! `K`, so callers can use whatever handle their DOM layer provides.
//!
//! ## Minimal example
//!
//! Cycling through two headings:
//!
//! ```rust
//! use clym_focus::{Landmark, LandmarkGroups, Navigation, navigate_group};
//!
//! let page = [(1_u32, "nav"), (2, "h1"), (3, "p"), (4, "h2")];
//! let groups = LandmarkGroups::categorize(page.iter().copied());
//! let headings = groups.group(Landmark::Headings);
//! assert_eq!(headings, &[2, 4]);
//!
//! // Nothing focused yet: start at the first heading.
//! assert_eq!(navigate_group(headings, None, Navigation::Next), Some(2));
//! // …then step and wrap.
//! assert_eq!(navigate_group(headings, Some(2), Navigation::Next), Some(4));
//! assert_eq!(navigate_group(headings, Some(4), Navigation::Next), Some(2));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod keybinding;
mod landmark;

pub use keybinding::{KeybindingManager, ListenerChange};
pub use landmark::{Landmark, LandmarkGroups};

/// Direction of group navigation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// Move to the next member in document order.
    Next,
    /// Move to the previous member in document order.
    Prev,
}

impl Navigation {
    /// Direction implied by the case of a pressed character.
    ///
    /// Lowercase characters step backward; everything else steps forward.
    pub fn from_key_case(key: char) -> Self {
        if key.is_lowercase() { Self::Prev } else { Self::Next }
    }
}

/// Compute the member of `group` that should receive focus.
///
/// - An empty group yields `None`.
/// - If `current` is not a member (or is `None`), the first member is chosen
///   regardless of direction.
/// - Otherwise the index advances by one in `direction`, wrapping at both ends.
pub fn navigate_group<K>(group: &[K], current: Option<K>, direction: Navigation) -> Option<K>
where
    K: Copy + Eq,
{
    if group.is_empty() {
        return None;
    }
    let Some(pos) = current.and_then(|c| group.iter().position(|k| *k == c)) else {
        return Some(group[0]);
    };
    let len = group.len();
    let next = match direction {
        Navigation::Next => (pos + 1) % len,
        Navigation::Prev => (pos + len - 1) % len,
    };
    Some(group[next])
}
