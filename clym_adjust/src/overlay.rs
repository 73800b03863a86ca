// Copyright 2026 the Clym Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer-following overlays: the reading guide and the reading mask.
//!
//! Pointer moves only write inline `top`/`height` values on nodes created at
//! enable time. Nothing is queried from layout except the viewport size.

use alloc::format;

use clym_dom::{DomPort, EventKind, EventTarget, ListenerTag};
use kurbo::Point;

use crate::widget::{TAG_READING_GUIDE, TAG_READING_MASK, create_widget};

/// Class of the reading guide bar.
pub const GUIDE_CLASS: &str = "clym-reading-guide";
/// Class of the shade above the mask window.
pub const MASK_TOP_CLASS: &str = "clym-reading-mask-top";
/// Class of the shade below the mask window.
pub const MASK_BOTTOM_CLASS: &str = "clym-reading-mask-bottom";

/// Overlay geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayConfig {
    /// Height in CSS pixels of the clear band the reading mask leaves around the pointer.
    pub mask_window: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self { mask_window: 120.0 }
    }
}

fn px(value: f64) -> alloc::string::String {
    format!("{value}px")
}

fn listen<D: DomPort>(dom: &mut D, tag: ListenerTag) {
    dom.remove_listener(EventTarget::Document, EventKind::PointerMove, tag);
    dom.add_listener(EventTarget::Document, EventKind::PointerMove, tag);
}

/// A fixed bar tracking the pointer's vertical position.
#[derive(Debug)]
pub(crate) struct ReadingGuide<N> {
    bar: Option<N>,
}

impl<N> Default for ReadingGuide<N> {
    fn default() -> Self {
        Self { bar: None }
    }
}

impl<N: Copy> ReadingGuide<N> {
    pub(crate) fn enable<D: DomPort<Node = N>>(&mut self, dom: &mut D) {
        if self.bar.is_none_or(|bar| dom.kind(bar).is_none()) {
            let body = dom.body();
            let bar = create_widget(dom, body, "div");
            dom.set_attribute(bar, "class", GUIDE_CLASS);
            dom.set_attribute(bar, "aria-hidden", "true");
            self.bar = Some(bar);
        }
        listen(dom, TAG_READING_GUIDE);
    }

    pub(crate) fn disable<D: DomPort<Node = N>>(&mut self, dom: &mut D) {
        dom.remove_listener(EventTarget::Document, EventKind::PointerMove, TAG_READING_GUIDE);
        if let Some(bar) = self.bar.take() {
            dom.remove(bar);
        }
    }

    /// Move the bar. Returns whether the guide is shown.
    pub(crate) fn on_pointer_move<D: DomPort<Node = N>>(
        &self,
        dom: &mut D,
        position: Point,
    ) -> bool {
        let Some(bar) = self.bar else {
            return false;
        };
        dom.set_style_property(bar, "top", &px(position.y));
        true
    }
}

/// Two shades leaving a clear band around the pointer.
#[derive(Debug)]
pub(crate) struct ReadingMask<N> {
    shades: Option<(N, N)>,
    window: f64,
}

impl<N> ReadingMask<N> {
    pub(crate) fn new(config: &OverlayConfig) -> Self {
        Self {
            shades: None,
            window: config.mask_window.max(0.0),
        }
    }
}

impl<N: Copy> ReadingMask<N> {
    pub(crate) fn enable<D: DomPort<Node = N>>(&mut self, dom: &mut D) {
        let alive = self
            .shades
            .is_some_and(|(top, bottom)| dom.kind(top).is_some() && dom.kind(bottom).is_some());
        if !alive {
            self.remove_shades(dom);
            let body = dom.body();
            let top = create_widget(dom, body, "div");
            dom.set_attribute(top, "class", MASK_TOP_CLASS);
            dom.set_attribute(top, "aria-hidden", "true");
            let bottom = create_widget(dom, body, "div");
            dom.set_attribute(bottom, "class", MASK_BOTTOM_CLASS);
            dom.set_attribute(bottom, "aria-hidden", "true");
            self.shades = Some((top, bottom));
            // Centre the window until the first pointer move arrives.
            let centre = Point::new(0.0, dom.viewport().height / 2.0);
            self.on_pointer_move(dom, centre);
        }
        listen(dom, TAG_READING_MASK);
    }

    pub(crate) fn disable<D: DomPort<Node = N>>(&mut self, dom: &mut D) {
        dom.remove_listener(EventTarget::Document, EventKind::PointerMove, TAG_READING_MASK);
        self.remove_shades(dom);
    }

    fn remove_shades<D: DomPort<Node = N>>(&mut self, dom: &mut D) {
        if let Some((top, bottom)) = self.shades.take() {
            dom.remove(top);
            dom.remove(bottom);
        }
    }

    /// Move the window. Returns whether the mask is shown.
    pub(crate) fn on_pointer_move<D: DomPort<Node = N>>(
        &self,
        dom: &mut D,
        position: Point,
    ) -> bool {
        let Some((top, bottom)) = self.shades else {
            return false;
        };
        let viewport = dom.viewport().height;
        let half = self.window / 2.0;
        let upper = (position.y - half).clamp(0.0, viewport);
        let lower = (position.y + half).clamp(0.0, viewport);
        dom.set_style_property(top, "height", &px(upper));
        dom.set_style_property(bottom, "top", &px(lower));
        dom.set_style_property(bottom, "height", &px(viewport - lower));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clym_dom::Document;
    use kurbo::Size;

    #[test]
    fn guide_follows_pointer_and_listens_once() {
        let mut doc = Document::new();
        let mut guide = ReadingGuide::default();
        guide.enable(&mut doc);
        guide.enable(&mut doc);
        assert_eq!(doc.elements_with_class(GUIDE_CLASS).len(), 1);
        assert_eq!(doc.listener_count(EventTarget::Document, EventKind::PointerMove), 1);

        assert!(guide.on_pointer_move(&mut doc, Point::new(5.0, 240.5)));
        let bar = doc.elements_with_class(GUIDE_CLASS)[0];
        assert_eq!(doc.style_property(bar, "top").as_deref(), Some("240.5px"));

        guide.disable(&mut doc);
        assert!(doc.elements_with_class(GUIDE_CLASS).is_empty());
        assert!(doc.listeners().is_empty());
    }

    #[test]
    fn mask_leaves_a_window_around_the_pointer() {
        let mut doc = Document::new();
        doc.set_viewport(Size::new(800.0, 600.0));
        let mut mask = ReadingMask::new(&OverlayConfig { mask_window: 100.0 });
        mask.enable(&mut doc);
        let top = doc.elements_with_class(MASK_TOP_CLASS)[0];
        let bottom = doc.elements_with_class(MASK_BOTTOM_CLASS)[0];
        assert_eq!(doc.style_property(top, "height").as_deref(), Some("250px"));

        mask.on_pointer_move(&mut doc, Point::new(0.0, 200.0));
        assert_eq!(doc.style_property(top, "height").as_deref(), Some("150px"));
        assert_eq!(doc.style_property(bottom, "top").as_deref(), Some("250px"));
        assert_eq!(doc.style_property(bottom, "height").as_deref(), Some("350px"));

        // Near the top edge the upper shade collapses.
        mask.on_pointer_move(&mut doc, Point::new(0.0, 10.0));
        assert_eq!(doc.style_property(top, "height").as_deref(), Some("0px"));

        mask.disable(&mut doc);
        assert!(!mask.on_pointer_move(&mut doc, Point::ZERO));
        assert!(doc.elements_with_class(MASK_TOP_CLASS).is_empty());
        assert!(doc.elements_with_class(MASK_BOTTOM_CLASS).is_empty());
        assert!(doc.listeners().is_empty());
    }
}
