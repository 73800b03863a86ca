// Copyright 2026 the Clym Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-key binding registry.

use smallvec::SmallVec;

/// What the owner of a [`KeybindingManager`] must do with its shared listener
/// after a registry change.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListenerChange {
    /// The registry went from empty to non-empty: attach the key-down listener.
    Attach,
    /// The registry became empty: detach the key-down listener.
    Detach,
    /// Nothing to do.
    Unchanged,
}

/// A registry of single-key → action bindings sharing one key-down listener.
///
/// Keys are matched case-insensitively (ASCII). Binding a key that is already
/// bound replaces its action. The manager does not own the listener itself;
/// it reports transitions through [`ListenerChange`] so the caller can attach
/// the listener on the first binding and detach it once the registry is empty.
///
/// ```rust
/// use clym_focus::{KeybindingManager, ListenerChange};
///
/// let mut keys = KeybindingManager::new();
/// assert_eq!(keys.bind('h', "headings"), ListenerChange::Attach);
/// assert_eq!(keys.bind('m', "menus"), ListenerChange::Unchanged);
/// assert_eq!(keys.action_for('H'), Some(&"headings"));
/// assert_eq!(keys.unbind('h'), ListenerChange::Unchanged);
/// assert_eq!(keys.unbind('m'), ListenerChange::Detach);
/// ```
#[derive(Clone, Debug)]
pub struct KeybindingManager<A> {
    bindings: SmallVec<[(char, A); 8]>,
}

impl<A> Default for KeybindingManager<A> {
    fn default() -> Self {
        Self {
            bindings: SmallVec::new(),
        }
    }
}

impl<A> KeybindingManager<A> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` to `action`, replacing any previous binding of the key.
    pub fn bind(&mut self, key: char, action: A) -> ListenerChange {
        let key = key.to_ascii_lowercase();
        let was_empty = self.bindings.is_empty();
        if let Some(slot) = self.bindings.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = action;
        } else {
            self.bindings.push((key, action));
        }
        if was_empty {
            ListenerChange::Attach
        } else {
            ListenerChange::Unchanged
        }
    }

    /// Remove the binding for `key`.
    pub fn unbind(&mut self, key: char) -> ListenerChange {
        let key = key.to_ascii_lowercase();
        let before = self.bindings.len();
        self.bindings.retain(|(k, _)| *k != key);
        if before > 0 && self.bindings.is_empty() {
            ListenerChange::Detach
        } else {
            ListenerChange::Unchanged
        }
    }

    /// Remove every binding.
    pub fn clear(&mut self) -> ListenerChange {
        if self.bindings.is_empty() {
            return ListenerChange::Unchanged;
        }
        self.bindings.clear();
        ListenerChange::Detach
    }

    /// Action bound to `key`, ignoring case.
    pub fn action_for(&self, key: char) -> Option<&A> {
        let key = key.to_ascii_lowercase();
        self.bindings
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, a)| a)
    }

    /// Number of bound keys.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no key is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebinding_replaces_without_attaching_twice() {
        let mut keys = KeybindingManager::new();
        assert_eq!(keys.bind('b', 1), ListenerChange::Attach);
        assert_eq!(keys.bind('B', 2), ListenerChange::Unchanged);
        assert_eq!(keys.len(), 1);
        assert_eq!(keys.action_for('b'), Some(&2));
    }

    #[test]
    fn unbinding_unknown_key_is_a_no_op() {
        let mut keys: KeybindingManager<u8> = KeybindingManager::new();
        assert_eq!(keys.unbind('z'), ListenerChange::Unchanged);
        keys.bind('a', 0);
        assert_eq!(keys.unbind('z'), ListenerChange::Unchanged);
        assert_eq!(keys.len(), 1);
    }

    #[test]
    fn clear_detaches_once() {
        let mut keys = KeybindingManager::new();
        keys.bind('f', ());
        keys.bind('g', ());
        assert_eq!(keys.clear(), ListenerChange::Detach);
        assert_eq!(keys.clear(), ListenerChange::Unchanged);
        assert!(keys.is_empty());
    }
}
