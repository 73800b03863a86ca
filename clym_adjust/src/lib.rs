// Copyright 2026 the Clym Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clym Adjust: reversible accessibility adjustments for pages you do not own.
//!
//! An [`Engine`] takes a small declarative state (which [`Adjustment`]s are
//! active, with which [`Param`]s, and which profile is selected) and turns it
//! into live mutations of a document reached through a
//! [`DomPort`](clym_dom::DomPort). Every mutation is reversible: applying a
//! falsy parameter restores the page exactly.
//!
//! The pieces:
//! - **Effects** ([`EffectTable`]): one [`AdjustmentEffect`] per adjustment,
//!   either a body class backed by a generated stylesheet, an imperative
//!   [`GlobalEffect`], or both.
//! - **Style elements**: at most one per adjustment, with ids from
//!   [`style_element_id`], plus a single base stylesheet ([`BASE_STYLE_ID`]).
//! - **Text scaling** ([`TextMetric`]): baselines captured once, levels applied
//!   relative to them.
//! - **Reading mode** ([`compile_reading_view`]): a sanitized copy of the page's text.
//! - **Magnifier, reading guide and mask**: kept in sync through
//!   [`Engine::handle_event`] and [`Engine::flush_mutations`].
//! - **Keyboard navigation**: `m`/`h`/`f`/`b`/`g` cycle through menus,
//!   headings, forms, buttons and graphics.
//! - **Profiles** ([`ProfileCatalog`]): named bundles of operations, merged
//!   with the reset of the outgoing profile.
//!
//! ## Minimal example
//!
//! ```rust
//! use clym_adjust::{Adjustment, Engine, EngineConfig};
//! use clym_dom::{Document, DomPort};
//!
//! let mut doc = Document::new();
//! let p = doc.append_element(doc.body(), "p");
//! doc.append_text(p, "Hello");
//! doc.set_computed_style(p, "font-size", "16px");
//!
//! let mut engine = Engine::new(doc, EngineConfig::default()).unwrap();
//! engine.set_adjustment("STOP_ANIMATIONS", true).unwrap();
//! engine.set_adjustment("FONT_SIZE", 3).unwrap();
//!
//! let body = engine.dom().body();
//! assert!(engine.dom().has_class(body, "clym-stop-animations"));
//! assert_eq!(engine.dom().style_property(p, "font-size").as_deref(), Some("20.8px"));
//! assert_eq!(engine.style_id(Adjustment::StopAnimations), Some("style--STOP_ANIMATIONS"));
//!
//! // Falsy parameters undo.
//! engine.set_adjustment("FONT_SIZE", None::<i32>).unwrap();
//! assert_eq!(engine.dom().style_property(p, "font-size"), None);
//! ```
//!
//! ## Events
//!
//! The engine never receives callbacks from the document. Hosts forward
//! pointer, key, focus and click events as [`DomEvent`](clym_dom::DomEvent)s,
//! and call [`Engine::flush_mutations`] when the page's DOM changed.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: `no_std` builds that rely on `libm` for floating-point math.
//! - `serde`: `Serialize`/`Deserialize` for [`Adjustment`], [`Param`],
//!   [`EngineState`], [`Action`] and [`Operation`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod adjustment;
mod dispatch;
mod effect;
mod engine;
mod error;
mod filter;
mod magnifier;
mod media;
mod navigator;
mod overlay;
mod profile;
mod reading_mode;
mod style_registry;
mod text_scale;
mod widget;

pub use adjustment::{Adjustment, Param};
pub use effect::{AdjustmentEffect, ApplicationMode, CssGenerator, EffectTable, GlobalEffect};
pub use engine::{Action, Engine, EngineConfig, EngineState};
pub use error::{EffectError, EngineError, ProfileError};
pub use filter::FilterLayer;
pub use magnifier::TOOLTIP_CLASS;
pub use navigator::{FOCUS_INNER_CLASS, FOCUS_VISIBLE_CLASS, FocusRecord, PREV_TABINDEX_ATTR};
pub use overlay::{GUIDE_CLASS, MASK_BOTTOM_CLASS, MASK_TOP_CLASS, OverlayConfig};
pub use profile::{Operation, Profile, ProfileCatalog, ProfileState, merge_operations};
pub use reading_mode::{READING_MODE_ID, compile as compile_reading_view};
pub use style_registry::{BASE_STYLE_ID, BASE_STYLES, style_element_id};
pub use text_scale::TextMetric;
pub use widget::WIDGET_ATTR;
