// Copyright 2026 the Clym Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clym DOM: a small port over a live document.
//!
//! Runtimes that restyle or annotate a page they do not own need a handful of
//! document operations and nothing else. This crate names that surface as the
//! [`DomPort`] trait, so the runtime can be written once and run against a
//! browser binding, a headless renderer, or the in-memory [`Document`].
//!
//! - Query: [`DomPort::children`], [`DomPort::attribute`], [`DomPort::computed_style`], …
//! - Create and mutate: [`DomPort::create_element`], [`DomPort::append_child`],
//!   [`DomPort::remove`], …
//! - Listen: [`DomPort::add_listener`] / [`DomPort::remove_listener`] keyed by
//!   ([`EventTarget`], [`EventKind`], [`ListenerTag`]).
//! - Observe: [`DomPort::observe_mutations`] and [`DomPort::take_mutation_records`].
//!
//! ## Events flow inward
//!
//! The port never calls back into the runtime. A host translates native events
//! into [`DomEvent`] values and hands them to the runtime, which checks its own
//! registrations. This keeps ownership linear: the runtime owns the port, the
//! host owns the runtime.
//!
//! ## Minimal example
//!
//! ```rust
//! use clym_dom::{Document, DomPort, EventKind, EventTarget, ListenerTag};
//!
//! const HOVER: ListenerTag = ListenerTag(1);
//!
//! let mut doc = Document::new();
//! let heading = doc.append_element(doc.body(), "h1");
//! doc.append_text(heading, "Title");
//!
//! doc.add_class(heading, "highlight");
//! doc.add_listener(EventTarget::Node(heading), EventKind::MouseEnter, HOVER);
//!
//! assert!(doc.has_class(heading, "highlight"));
//! assert_eq!(doc.listener_count(EventTarget::Node(heading), EventKind::MouseEnter), 1);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: `no_std` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod document;
mod port;
pub mod style;
mod types;

pub use document::{Document, Listener};
pub use port::DomPort;
pub use types::{DomEvent, EventKind, EventTarget, ListenerTag, NodeId, NodeKind, ObserverId};
