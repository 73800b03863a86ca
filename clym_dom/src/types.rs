// Copyright 2026 the Clym Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types shared by every [`DomPort`](crate::DomPort) implementation.

use kurbo::Point;

/// Identifier for a node in a [`Document`](crate::Document) (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Coarse classification of a live node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// An element such as `<div>` or `<img>`.
    Element,
    /// A text node.
    Text,
}

/// Event types the port can listen for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Pointer moved anywhere over the target.
    PointerMove,
    /// Pointer entered the target element.
    MouseEnter,
    /// Pointer left the target element.
    MouseLeave,
    /// A key was pressed while the document had focus.
    KeyDown,
    /// The target element lost focus.
    FocusOut,
    /// The target element was activated.
    Click,
}

/// Where a listener is attached.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventTarget<N> {
    /// The document itself (global listeners such as key-down or pointer-move).
    Document,
    /// A single node.
    Node(N),
}

/// Symbol-like identifier naming the owner of a listener.
///
/// A port stores the tag alongside each registration so that the runtime that
/// installed a listener can remove exactly its own registration later. The
/// meaning of individual tags is up to the caller (usually a set of `const`s).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerTag(pub u64);

/// Handle of a subtree mutation watcher created by
/// [`DomPort::observe_mutations`](crate::DomPort::observe_mutations).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(pub u32);

/// An event delivered by the host into a runtime built on the port.
///
/// Hosts translate their native events into this shape; the runtime decides
/// whether it is listening for them.
#[derive(Clone, Debug, PartialEq)]
pub enum DomEvent<N> {
    /// Pointer moved; `position` is in viewport coordinates.
    PointerMove {
        /// Pointer position.
        position: Point,
    },
    /// Pointer entered `target`.
    MouseEnter {
        /// Element entered.
        target: N,
        /// Pointer position at the time of entry.
        position: Point,
    },
    /// Pointer left `target`.
    MouseLeave {
        /// Element left.
        target: N,
    },
    /// A printable key was pressed.
    KeyDown {
        /// The character produced by the key, with case preserved.
        key: char,
        /// Element that had focus, if any.
        target: Option<N>,
    },
    /// `target` lost focus.
    FocusOut {
        /// Element that was blurred.
        target: N,
    },
    /// `target` was clicked.
    Click {
        /// Element clicked.
        target: N,
    },
}

impl<N> DomEvent<N> {
    /// The [`EventKind`] a listener must be registered for to receive this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::PointerMove { .. } => EventKind::PointerMove,
            Self::MouseEnter { .. } => EventKind::MouseEnter,
            Self::MouseLeave { .. } => EventKind::MouseLeave,
            Self::KeyDown { .. } => EventKind::KeyDown,
            Self::FocusOut { .. } => EventKind::FocusOut,
            Self::Click { .. } => EventKind::Click,
        }
    }
}
