// Copyright 2026 the Clym Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scoped `<style>` elements in the document head.
//!
//! The registry keeps at most one live style element per [`Adjustment`]. The
//! element id encodes the adjustment and, for value-bearing parameters, the
//! value: `style--SATURATION--low`. Changing the value replaces the element;
//! it never stacks a second one.

use alloc::format;
use alloc::string::String;

use clym_dom::DomPort;
use hashbrown::HashMap;

use crate::adjustment::{Adjustment, Param};
use crate::widget::create_widget;

/// Id of the base stylesheet installed once per document.
pub const BASE_STYLE_ID: &str = "clym-base-styles";

/// Global rules shared by every adjustment: fonts, overlays, tooltip, focus ring
/// and the reading view.
pub const BASE_STYLES: &str = "\
@font-face { font-family: \"Atkinson Hyperlegible\"; src: local(\"Atkinson Hyperlegible\"), local(\"AtkinsonHyperlegible-Regular\"); font-display: swap; }
@font-face { font-family: \"OpenDyslexic\"; src: local(\"OpenDyslexic\"), local(\"OpenDyslexic-Regular\"); font-display: swap; }
.clym-reading-guide { position: fixed; left: 0; width: 100%; height: 12px; margin-top: -6px; background: rgba(255, 213, 0, 0.85); border-top: 2px solid #000; border-bottom: 2px solid #000; pointer-events: none; z-index: 2147483646; }
.clym-reading-mask-top, .clym-reading-mask-bottom { position: fixed; left: 0; width: 100%; background: rgba(0, 0, 0, 0.55); pointer-events: none; z-index: 2147483646; }
.clym-reading-mask-top { top: 0; }
.clym-magnifier-tooltip { position: fixed; max-width: 480px; padding: 8px 12px; font-size: 32px; line-height: 1.3; color: #fff; background: rgba(0, 0, 0, 0.9); border-radius: 6px; pointer-events: none; z-index: 2147483647; }
.clym-focus-visible { outline: 3px solid #0b57d0 !important; outline-offset: 3px !important; }
.clym-focus-inner { box-shadow: inset 0 0 0 3px #0b57d0 !important; }
#clym-reading-mode { max-width: 760px; margin: 0 auto; padding: 32px 24px; font-size: 20px; line-height: 1.6; color: #111; background: #fff; }
#clym-reading-mode .clym-reading-mode-close { float: right; font-size: 16px; }
body.clym-reading-mode > *:not(#clym-reading-mode) { display: none !important; }
";

/// Id of the style element for `adjustment` with parameter `param`.
///
/// ```rust
/// use clym_adjust::{Adjustment, Param, style_element_id};
///
/// let id = style_element_id(Adjustment::StopAnimations, &Param::Flag(true));
/// assert_eq!(id, "style--STOP_ANIMATIONS");
/// assert_eq!(style_element_id(Adjustment::Saturation, &"low".into()), "style--SATURATION--low");
/// ```
pub fn style_element_id(adjustment: Adjustment, param: &Param) -> String {
    match param.id_suffix() {
        Some(value) => format!("style--{}--{value}", adjustment.as_str()),
        None => format!("style--{}", adjustment.as_str()),
    }
}

#[derive(Debug)]
struct StyleEntry<N> {
    node: N,
    id: String,
    css: String,
}

/// Live style elements owned by one engine.
#[derive(Debug)]
pub(crate) struct StyleRegistry<N> {
    entries: HashMap<Adjustment, StyleEntry<N>>,
    base: Option<N>,
    /// Whether `base` was created here rather than adopted.
    owns_base: bool,
}

impl<N> Default for StyleRegistry<N> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            base: None,
            owns_base: false,
        }
    }
}

impl<N: Copy + Eq + core::hash::Hash> StyleRegistry<N> {
    /// Install the base stylesheet, reusing one already present in the document.
    pub(crate) fn install_base<D: DomPort<Node = N>>(&mut self, dom: &mut D) {
        if self.base.is_some_and(|n| dom.kind(n).is_some()) {
            return;
        }
        let (node, owned) = match dom.element_by_id(BASE_STYLE_ID) {
            Some(existing) => (existing, false),
            None => {
                let head = dom.head();
                let node = create_widget(dom, head, "style");
                dom.set_attribute(node, "id", BASE_STYLE_ID);
                dom.set_text_content(node, BASE_STYLES);
                (node, true)
            }
        };
        self.base = Some(node);
        self.owns_base = owned;
    }

    /// Make `css` the only stylesheet for `adjustment`.
    pub(crate) fn upsert<D: DomPort<Node = N>>(
        &mut self,
        dom: &mut D,
        adjustment: Adjustment,
        param: &Param,
        css: String,
    ) {
        let id = style_element_id(adjustment, param);
        if let Some(entry) = self.entries.get_mut(&adjustment)
            && entry.id == id
            && dom.kind(entry.node).is_some()
        {
            if entry.css != css {
                dom.set_text_content(entry.node, &css);
                entry.css = css;
            }
            return;
        }
        self.remove(dom, adjustment);
        let head = dom.head();
        let node = create_widget(dom, head, "style");
        dom.set_attribute(node, "id", &id);
        dom.set_text_content(node, &css);
        log::trace!("installed style element {id}");
        self.entries.insert(adjustment, StyleEntry { node, id, css });
    }

    /// Drop the stylesheet for `adjustment`, if any.
    pub(crate) fn remove<D: DomPort<Node = N>>(&mut self, dom: &mut D, adjustment: Adjustment) {
        if let Some(entry) = self.entries.remove(&adjustment) {
            dom.remove(entry.node);
        }
    }

    /// Id of the live stylesheet for `adjustment`.
    pub(crate) fn id_of(&self, adjustment: Adjustment) -> Option<&str> {
        self.entries.get(&adjustment).map(|e| e.id.as_str())
    }

    /// Remove every stylesheet, the base one included when it was created here.
    pub(crate) fn clear<D: DomPort<Node = N>>(&mut self, dom: &mut D) {
        for (_, entry) in self.entries.drain() {
            dom.remove(entry.node);
        }
        if let Some(base) = self.base.take()
            && core::mem::take(&mut self.owns_base)
        {
            dom.remove(base);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clym_dom::{Document, NodeId};

    fn styles(doc: &Document) -> alloc::vec::Vec<NodeId> {
        doc.elements_by_tag(doc.head(), "style")
    }

    #[test]
    fn base_is_installed_once() {
        let mut doc = Document::new();
        let mut a = StyleRegistry::default();
        a.install_base(&mut doc);
        a.install_base(&mut doc);
        // A second registry on the same document adopts the existing element.
        let mut b = StyleRegistry::default();
        b.install_base(&mut doc);
        assert_eq!(styles(&doc).len(), 1);
        assert!(doc.text_content(styles(&doc)[0]).contains("clym-reading-guide"));
    }

    #[test]
    fn value_change_replaces_instead_of_stacking() {
        let mut doc = Document::new();
        let mut reg = StyleRegistry::default();
        let a = Adjustment::Saturation;
        reg.upsert(&mut doc, a, &"low".into(), "x { }".into());
        reg.upsert(&mut doc, a, &"low".into(), "x { }".into());
        assert_eq!(styles(&doc).len(), 1);
        assert!(doc.element_by_id("style--SATURATION--low").is_some());

        reg.upsert(&mut doc, a, &"high".into(), "y { }".into());
        assert_eq!(styles(&doc).len(), 1);
        assert!(doc.element_by_id("style--SATURATION--low").is_none());
        let tag = doc.element_by_id("style--SATURATION--high").unwrap();
        assert_eq!(doc.text_content(tag), "y { }");
        assert_eq!(reg.id_of(a), Some("style--SATURATION--high"));

        reg.remove(&mut doc, a);
        assert!(styles(&doc).is_empty());
        assert_eq!(reg.id_of(a), None);
    }

    #[test]
    fn element_removed_by_the_page_is_recreated() {
        let mut doc = Document::new();
        let mut reg = StyleRegistry::default();
        let a = Adjustment::HideImages;
        reg.upsert(&mut doc, a, &Param::Flag(true), "img { }".into());
        let tag = doc.element_by_id("style--HIDE_IMAGES").unwrap();
        doc.remove(tag);
        reg.upsert(&mut doc, a, &Param::Flag(true), "img { }".into());
        assert_eq!(styles(&doc).len(), 1);
    }

    #[test]
    fn clear_removes_everything() {
        let mut doc = Document::new();
        let mut reg = StyleRegistry::default();
        reg.install_base(&mut doc);
        reg.upsert(&mut doc, Adjustment::Cursor, &"big-black".into(), "c { }".into());
        reg.clear(&mut doc);
        assert!(styles(&doc).is_empty());
    }

    #[test]
    fn adopted_base_outlives_the_adopter() {
        let mut doc = Document::new();
        let mut owner = StyleRegistry::default();
        owner.install_base(&mut doc);
        let mut guest = StyleRegistry::default();
        guest.install_base(&mut doc);

        guest.clear(&mut doc);
        let base = doc.element_by_id(BASE_STYLE_ID).unwrap();
        assert!(doc.text_content(base).contains("clym-reading-guide"));

        owner.clear(&mut doc);
        assert!(doc.element_by_id(BASE_STYLE_ID).is_none());
    }
}
