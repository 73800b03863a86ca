// Copyright 2026 the Clym Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine-owned nodes and page scanning.
//!
//! Everything the engine inserts into the page carries [`WIDGET_ATTR`]. Scans
//! prune those subtrees so the engine never scales, magnifies, compiles or
//! categorizes its own chrome.

use alloc::vec::Vec;

use clym_dom::{DomPort, ListenerTag, NodeKind};

/// Marker attribute on every engine-owned element.
pub const WIDGET_ATTR: &str = "data-clym-widget";

pub(crate) const TAG_READING_GUIDE: ListenerTag = ListenerTag(1);
pub(crate) const TAG_READING_MASK: ListenerTag = ListenerTag(2);
pub(crate) const TAG_MAGNIFIER: ListenerTag = ListenerTag(3);
pub(crate) const TAG_KEYBINDINGS: ListenerTag = ListenerTag(4);
pub(crate) const TAG_FOCUS_RESTORE: ListenerTag = ListenerTag(5);
pub(crate) const TAG_READING_MODE_CLOSE: ListenerTag = ListenerTag(6);

/// Create an engine-owned element and append it to `parent`.
pub(crate) fn create_widget<D: DomPort>(dom: &mut D, parent: D::Node, tag: &str) -> D::Node {
    let node = dom.create_element(tag);
    dom.set_attribute(node, WIDGET_ATTR, "true");
    dom.append_child(parent, node);
    node
}

pub(crate) fn is_widget<D: DomPort>(dom: &D, node: D::Node) -> bool {
    dom.attribute(node, WIDGET_ATTR).is_some()
}

/// Elements under `root` in depth-first document order, skipping engine-owned subtrees.
pub(crate) fn page_elements<D: DomPort>(dom: &D, root: D::Node) -> Vec<D::Node> {
    let mut out = Vec::new();
    let mut stack = dom.children(root);
    stack.reverse();
    while let Some(node) = stack.pop() {
        if dom.kind(node) != Some(NodeKind::Element) || is_widget(dom, node) {
            continue;
        }
        out.push(node);
        let mut children = dom.children(node);
        children.reverse();
        stack.extend(children);
    }
    out
}

/// Page elements under `<body>` with at least one direct non-whitespace text child.
pub(crate) fn text_elements<D: DomPort>(dom: &D) -> Vec<D::Node> {
    page_elements(dom, dom.body())
        .into_iter()
        .filter(|n| dom.has_direct_text(*n))
        .collect()
}
