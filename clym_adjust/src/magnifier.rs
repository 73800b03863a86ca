// Copyright 2026 the Clym Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover magnifier kept in sync with a mutating page.

use alloc::format;

use clym_dom::{DomPort, EventKind, EventTarget, ObserverId};
use hashbrown::HashSet;
use kurbo::{Point, Vec2};

use crate::widget::{TAG_MAGNIFIER, create_widget, text_elements};

/// Class of the magnifier tooltip.
pub const TOOLTIP_CLASS: &str = "clym-magnifier-tooltip";

const TOOLTIP_OFFSET: Vec2 = Vec2::new(16.0, 16.0);

/// Bound elements, the body watcher, and the visible tooltip.
///
/// While active, every text-bearing page element carries one `MouseEnter` and
/// one `MouseLeave` registration tagged [`TAG_MAGNIFIER`]. Rebinding always
/// removes before it adds, so repeated scans never stack listeners.
#[derive(Debug)]
pub(crate) struct Magnifier<N> {
    bound: HashSet<N>,
    observer: Option<ObserverId>,
    tooltip: Option<N>,
}

impl<N> Default for Magnifier<N> {
    fn default() -> Self {
        Self {
            bound: HashSet::new(),
            observer: None,
            tooltip: None,
        }
    }
}

impl<N: Copy + Eq + core::hash::Hash> Magnifier<N> {
    pub(crate) fn is_active(&self) -> bool {
        self.observer.is_some()
    }

    pub(crate) fn start<D: DomPort<Node = N>>(&mut self, dom: &mut D) {
        self.rebind(dom);
        if self.observer.is_none() {
            let body = dom.body();
            self.observer = Some(dom.observe_mutations(body));
        }
    }

    pub(crate) fn stop<D: DomPort<Node = N>>(&mut self, dom: &mut D) {
        if let Some(observer) = self.observer.take() {
            dom.disconnect_observer(observer);
        }
        self.unbind(dom);
        self.hide(dom);
    }

    /// Rescan if the body changed since the last call. Returns whether it did.
    pub(crate) fn flush_mutations<D: DomPort<Node = N>>(&mut self, dom: &mut D) -> bool {
        let Some(observer) = self.observer else {
            return false;
        };
        if dom.take_mutation_records(observer) == 0 {
            return false;
        }
        self.rebind(dom);
        // Our own rebinding does not count as a page change.
        dom.take_mutation_records(observer);
        true
    }

    fn unbind<D: DomPort<Node = N>>(&mut self, dom: &mut D) {
        for node in self.bound.drain() {
            dom.remove_listener(EventTarget::Node(node), EventKind::MouseEnter, TAG_MAGNIFIER);
            dom.remove_listener(EventTarget::Node(node), EventKind::MouseLeave, TAG_MAGNIFIER);
        }
    }

    fn rebind<D: DomPort<Node = N>>(&mut self, dom: &mut D) {
        self.unbind(dom);
        for node in text_elements(dom) {
            let target = EventTarget::Node(node);
            dom.remove_listener(target, EventKind::MouseEnter, TAG_MAGNIFIER);
            dom.remove_listener(target, EventKind::MouseLeave, TAG_MAGNIFIER);
            dom.add_listener(target, EventKind::MouseEnter, TAG_MAGNIFIER);
            dom.add_listener(target, EventKind::MouseLeave, TAG_MAGNIFIER);
            self.bound.insert(node);
        }
        log::trace!("magnifier bound to {} elements", self.bound.len());
    }

    pub(crate) fn on_enter<D: DomPort<Node = N>>(
        &mut self,
        dom: &mut D,
        target: N,
        position: Point,
    ) {
        if !self.bound.contains(&target) {
            return;
        }
        self.hide(dom);
        let text = dom.text_content(target);
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        let body = dom.body();
        let tooltip = create_widget(dom, body, "div");
        dom.set_attribute(tooltip, "class", TOOLTIP_CLASS);
        dom.set_attribute(tooltip, "role", "tooltip");
        let at = position + TOOLTIP_OFFSET;
        dom.set_style_property(tooltip, "left", &format!("{}px", at.x));
        dom.set_style_property(tooltip, "top", &format!("{}px", at.y));
        dom.set_text_content(tooltip, text);
        self.tooltip = Some(tooltip);
    }

    pub(crate) fn on_leave<D: DomPort<Node = N>>(&mut self, dom: &mut D, target: N) {
        if self.bound.contains(&target) {
            self.hide(dom);
        }
    }

    fn hide<D: DomPort<Node = N>>(&mut self, dom: &mut D) {
        if let Some(tooltip) = self.tooltip.take() {
            dom.remove(tooltip);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clym_dom::Document;

    #[test]
    fn start_twice_binds_once() {
        let mut doc = Document::new();
        let p = doc.append_element(doc.body(), "p");
        doc.append_text(p, "Zoom me");
        let mut m = Magnifier::default();
        m.start(&mut doc);
        m.start(&mut doc);
        assert_eq!(doc.listener_count(EventTarget::Node(p), EventKind::MouseEnter), 1);
        assert_eq!(doc.listener_count(EventTarget::Node(p), EventKind::MouseLeave), 1);
        assert_eq!(doc.observer_count(), 1);
    }

    #[test]
    fn single_tooltip_follows_hover() {
        let mut doc = Document::new();
        let body = doc.body();
        let a = doc.append_element(body, "p");
        doc.append_text(a, "First");
        let b = doc.append_element(body, "p");
        doc.append_text(b, "Second");
        let mut m = Magnifier::default();
        m.start(&mut doc);

        m.on_enter(&mut doc, a, Point::new(10.0, 20.0));
        m.on_enter(&mut doc, b, Point::new(30.0, 40.0));
        let tips = doc.elements_with_class(TOOLTIP_CLASS);
        assert_eq!(tips.len(), 1);
        assert_eq!(doc.text_content(tips[0]), "Second");
        assert_eq!(doc.style_property(tips[0], "left").as_deref(), Some("46px"));
        assert_eq!(doc.style_property(tips[0], "top").as_deref(), Some("56px"));

        m.on_leave(&mut doc, b);
        assert!(doc.elements_with_class(TOOLTIP_CLASS).is_empty());
    }

    #[test]
    fn mutations_trigger_rescan() {
        let mut doc = Document::new();
        let body = doc.body();
        let mut m = Magnifier::default();
        m.start(&mut doc);
        assert!(!m.flush_mutations(&mut doc));

        let late = doc.append_element(body, "p");
        doc.append_text(late, "Inserted later");
        assert!(m.flush_mutations(&mut doc));
        assert_eq!(doc.listener_count(EventTarget::Node(late), EventKind::MouseEnter), 1);
        assert!(!m.flush_mutations(&mut doc));
    }

    #[test]
    fn stop_tears_everything_down() {
        let mut doc = Document::new();
        let p = doc.append_element(doc.body(), "p");
        doc.append_text(p, "Text");
        let mut m = Magnifier::default();
        m.start(&mut doc);
        m.on_enter(&mut doc, p, Point::ZERO);
        m.stop(&mut doc);
        assert!(doc.listeners().is_empty());
        assert_eq!(doc.observer_count(), 0);
        assert!(doc.elements_with_class(TOOLTIP_CLASS).is_empty());
        assert!(!m.is_active());
    }
}
