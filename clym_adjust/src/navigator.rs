// Copyright 2026 the Clym Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard landmark navigation driven through the DOM port.

use alloc::string::String;

use clym_dom::{DomPort, EventKind, EventTarget};
use clym_focus::{
    KeybindingManager, Landmark, LandmarkGroups, ListenerChange, Navigation, navigate_group,
};

use crate::widget::{TAG_FOCUS_RESTORE, TAG_KEYBINDINGS, page_elements};

/// Class marking the element focused by navigation.
pub const FOCUS_VISIBLE_CLASS: &str = "clym-focus-visible";
/// Extra class for focused images, which need an inner ring.
pub const FOCUS_INNER_CLASS: &str = "clym-focus-inner";
/// Attribute holding the tabindex an element had before navigation focused it.
pub const PREV_TABINDEX_ATTR: &str = "data-clym-prev-tabindex";

/// An element focused by navigation and its original `tabindex`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FocusRecord<N> {
    /// Focused element.
    pub element: N,
    /// Its `tabindex` attribute before focusing, if it had one.
    pub previous_tabindex: Option<String>,
}

/// Landmark groups, key bindings, and the pending focus record of one engine.
#[derive(Debug)]
pub(crate) struct Navigator<N> {
    groups: Option<LandmarkGroups<N>>,
    keys: KeybindingManager<Landmark>,
    focus: Option<FocusRecord<N>>,
}

impl<N> Default for Navigator<N> {
    fn default() -> Self {
        Self {
            groups: None,
            keys: KeybindingManager::new(),
            focus: None,
        }
    }
}

fn is_editable<D: DomPort>(dom: &D, node: D::Node) -> bool {
    matches!(
        dom.tag_name(node).as_deref(),
        Some("input" | "textarea" | "select")
    ) || dom
        .attribute(node, "contenteditable")
        .is_some_and(|v| v.is_empty() || v.eq_ignore_ascii_case("true"))
}

impl<N: Copy + Eq> Navigator<N> {
    /// Rebuild the landmark groups and bind one key per landmark.
    pub(crate) fn enable<D: DomPort<Node = N>>(&mut self, dom: &mut D) {
        let body = dom.body();
        let nodes = page_elements(dom, body);
        let tagged: alloc::vec::Vec<(N, String)> = nodes
            .into_iter()
            .filter_map(|n| dom.tag_name(n).map(|t| (n, t)))
            .collect();
        let groups = LandmarkGroups::categorize(tagged.iter().map(|(n, t)| (*n, t.as_str())));
        log::debug!("keyboard navigation found {} landmarks", groups.len());
        self.groups = Some(groups);

        for landmark in Landmark::ALL {
            if self.keys.bind(landmark.key(), landmark) == ListenerChange::Attach {
                dom.remove_listener(EventTarget::Document, EventKind::KeyDown, TAG_KEYBINDINGS);
                dom.add_listener(EventTarget::Document, EventKind::KeyDown, TAG_KEYBINDINGS);
            }
        }
    }

    pub(crate) fn disable<D: DomPort<Node = N>>(&mut self, dom: &mut D) {
        self.restore_focus(dom);
        self.groups = None;
        if self.keys.clear() == ListenerChange::Detach {
            dom.remove_listener(EventTarget::Document, EventKind::KeyDown, TAG_KEYBINDINGS);
        }
    }

    /// Group members for `landmark`, empty when navigation is off.
    pub(crate) fn group(&self, landmark: Landmark) -> &[N] {
        self.groups.as_ref().map(|g| g.group(landmark)).unwrap_or(&[])
    }

    pub(crate) fn focus_record(&self) -> Option<&FocusRecord<N>> {
        self.focus.as_ref()
    }

    /// Handle a key press. Returns the element that received focus.
    pub(crate) fn on_key<D: DomPort<Node = N>>(
        &mut self,
        dom: &mut D,
        key: char,
        target: Option<N>,
    ) -> Option<N> {
        if self.groups.is_none() || target.is_some_and(|t| is_editable(dom, t)) {
            return None;
        }
        let landmark = *self.keys.action_for(key)?;
        let next = navigate_group(
            self.group(landmark),
            dom.active_element(),
            Navigation::from_key_case(key),
        )?;
        self.set_focus_for_element(dom, next);
        Some(next)
    }

    /// Focus `element` with a visible marker and a temporary `tabindex="-1"`.
    pub(crate) fn set_focus_for_element<D: DomPort<Node = N>>(&mut self, dom: &mut D, element: N) {
        if self.focus.as_ref().is_some_and(|r| r.element != element) {
            self.restore_focus(dom);
        }
        dom.add_class(element, FOCUS_VISIBLE_CLASS);
        if dom.is_tag(element, "img") {
            dom.add_class(element, FOCUS_INNER_CLASS);
        }
        if self.focus.is_none() {
            let previous = dom.attribute(element, "tabindex");
            if let Some(prev) = previous.as_deref()
                && prev != "-1"
            {
                dom.set_attribute(element, PREV_TABINDEX_ATTR, prev);
            }
            self.focus = Some(FocusRecord {
                element,
                previous_tabindex: previous,
            });
        }
        dom.set_attribute(element, "tabindex", "-1");
        dom.focus(element);
        let target = EventTarget::Node(element);
        dom.remove_listener(target, EventKind::FocusOut, TAG_FOCUS_RESTORE);
        dom.add_listener(target, EventKind::FocusOut, TAG_FOCUS_RESTORE);
    }

    /// Handle `focusout`; only the recorded element is restored.
    pub(crate) fn on_focus_out<D: DomPort<Node = N>>(&mut self, dom: &mut D, target: N) {
        if self.focus.as_ref().is_some_and(|r| r.element == target) {
            self.restore_focus(dom);
        }
    }

    fn restore_focus<D: DomPort<Node = N>>(&mut self, dom: &mut D) {
        let Some(record) = self.focus.take() else {
            return;
        };
        let element = record.element;
        dom.remove_listener(EventTarget::Node(element), EventKind::FocusOut, TAG_FOCUS_RESTORE);
        match record.previous_tabindex {
            Some(prev) => dom.set_attribute(element, "tabindex", &prev),
            None => dom.remove_attribute(element, "tabindex"),
        }
        dom.remove_attribute(element, PREV_TABINDEX_ATTR);
        dom.remove_class(element, FOCUS_VISIBLE_CLASS);
        dom.remove_class(element, FOCUS_INNER_CLASS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clym_dom::{Document, NodeId};

    fn page() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new();
        let body = doc.body();
        let h1 = doc.append_element(body, "h1");
        doc.append_text(h1, "One");
        let section = doc.append_element(body, "section");
        let h2 = doc.append_element(section, "h2");
        doc.append_text(h2, "Two");
        doc.append_element(body, "nav");
        (doc, h1, h2)
    }

    #[test]
    fn enable_categorizes_and_attaches_one_listener() {
        let (mut doc, h1, h2) = page();
        let mut nav = Navigator::default();
        nav.enable(&mut doc);
        nav.enable(&mut doc);
        assert_eq!(nav.group(Landmark::Headings), &[h1, h2]);
        assert_eq!(nav.group(Landmark::Menus).len(), 1);
        assert_eq!(doc.listener_count(EventTarget::Document, EventKind::KeyDown), 1);

        nav.disable(&mut doc);
        assert!(nav.group(Landmark::Headings).is_empty());
        assert_eq!(doc.listener_count(EventTarget::Document, EventKind::KeyDown), 0);
    }

    #[test]
    fn key_presses_cycle_through_headings() {
        let (mut doc, h1, h2) = page();
        let mut nav = Navigator::default();
        nav.enable(&mut doc);
        assert_eq!(nav.on_key(&mut doc, 'h', None), Some(h1));
        assert_eq!(nav.on_key(&mut doc, 'h', None), Some(h2));
        assert_eq!(nav.on_key(&mut doc, 'H', None), Some(h1));
        assert_eq!(doc.active_element(), Some(h1));
        assert!(doc.has_class(h1, FOCUS_VISIBLE_CLASS));
        assert!(!doc.has_class(h2, FOCUS_VISIBLE_CLASS));
        assert_eq!(nav.on_key(&mut doc, 'x', None), None);
    }

    #[test]
    fn editable_targets_are_ignored() {
        let (mut doc, _, _) = page();
        let input = doc.append_element(doc.body(), "input");
        let editor = doc.append_element(doc.body(), "div");
        doc.set_attribute(editor, "contenteditable", "true");
        let mut nav = Navigator::default();
        nav.enable(&mut doc);
        assert_eq!(nav.on_key(&mut doc, 'h', Some(input)), None);
        assert_eq!(nav.on_key(&mut doc, 'h', Some(editor)), None);
        assert_eq!(doc.active_element(), None);
    }

    #[test]
    fn focus_out_restores_previous_tabindex() {
        let (mut doc, h1, _) = page();
        doc.set_attribute(h1, "tabindex", "3");
        let mut nav = Navigator::default();
        nav.set_focus_for_element(&mut doc, h1);
        assert_eq!(doc.attribute(h1, "tabindex").as_deref(), Some("-1"));
        assert_eq!(doc.attribute(h1, PREV_TABINDEX_ATTR).as_deref(), Some("3"));
        assert_eq!(doc.listener_count(EventTarget::Node(h1), EventKind::FocusOut), 1);

        nav.on_focus_out(&mut doc, h1);
        assert_eq!(doc.attribute(h1, "tabindex").as_deref(), Some("3"));
        assert_eq!(doc.attribute(h1, PREV_TABINDEX_ATTR), None);
        assert_eq!(doc.attribute(h1, "class"), None);
        assert!(doc.listeners().is_empty());
        assert!(nav.focus_record().is_none());
    }

    #[test]
    fn images_get_inner_ring_and_lose_forced_tabindex() {
        let mut doc = Document::new();
        let img = doc.append_element(doc.body(), "img");
        let mut nav = Navigator::default();
        nav.set_focus_for_element(&mut doc, img);
        assert!(doc.has_class(img, FOCUS_INNER_CLASS));
        assert_eq!(
            nav.focus_record(),
            Some(&FocusRecord { element: img, previous_tabindex: None })
        );
        nav.on_focus_out(&mut doc, img);
        assert_eq!(doc.attribute(img, "tabindex"), None);
        assert!(!doc.has_class(img, FOCUS_INNER_CLASS));
    }

    #[test]
    fn existing_minus_one_is_kept_without_a_marker() {
        let (mut doc, h1, _) = page();
        doc.set_attribute(h1, "tabindex", "-1");
        let mut nav = Navigator::default();
        nav.set_focus_for_element(&mut doc, h1);
        assert_eq!(doc.attribute(h1, PREV_TABINDEX_ATTR), None);
        nav.on_focus_out(&mut doc, h1);
        assert_eq!(doc.attribute(h1, "tabindex").as_deref(), Some("-1"));
    }
}
