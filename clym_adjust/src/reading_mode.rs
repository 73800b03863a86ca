// Copyright 2026 the Clym Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reading mode: an isolated copy of the page's text content.
//!
//! [`compile`] walks the page depth-first and builds a detached, sanitized
//! copy. Text leaves are cloned verbatim, interactive and non-content
//! elements are dropped with their whole subtree, every other element is
//! shallow-cloned without `class`, `id` or `style`, and any clone that ends up
//! without text is discarded.

use alloc::vec::Vec;

use clym_dom::{DomPort, EventKind, EventTarget, NodeKind};

use crate::widget::{TAG_READING_MODE_CLOSE, create_widget, is_widget};

/// Id of the engine-owned container holding the compiled view.
pub const READING_MODE_ID: &str = "clym-reading-mode";

const DROPPED_TAGS: &[&str] = &[
    "script", "input", "textarea", "button", "form", "style", "noscript", "template",
];

const STRIPPED_ATTRIBUTES: &[&str] = &["class", "id", "style"];

fn is_dropped<D: DomPort>(dom: &D, node: D::Node, tag: &str) -> bool {
    if DROPPED_TAGS.contains(&tag) {
        return true;
    }
    match tag {
        "li" => {
            dom.attribute(node, "role").is_some_and(|r| r == "tab")
                || dom.text_content(node).trim().is_empty()
        }
        "a" => {
            let in_page = dom
                .attribute(node, "href")
                .is_none_or(|href| href.is_empty() || href.starts_with('#'));
            in_page || dom.attribute(node, "role").is_some_and(|r| r == "button")
        }
        _ => false,
    }
}

fn keeps_attribute(name: &str) -> bool {
    !STRIPPED_ATTRIBUTES.contains(&name) && !name.starts_with("data-clym-")
}

fn compile_node<D: DomPort>(dom: &mut D, node: D::Node) -> Option<D::Node> {
    match dom.kind(node)? {
        NodeKind::Text => {
            let text = dom.text(node)?;
            if text.trim().is_empty() {
                return None;
            }
            Some(dom.create_text(&text))
        }
        NodeKind::Element => {
            let tag = dom.tag_name(node)?;
            if is_widget(dom, node) || is_dropped(dom, node, &tag) {
                return None;
            }
            let kept: Vec<_> = dom
                .children(node)
                .into_iter()
                .filter_map(|child| compile_node(dom, child))
                .collect();
            // Every kept child holds text, so an empty list means a text-free subtree.
            if kept.is_empty() {
                return None;
            }
            let clone = dom.create_element(&tag);
            for name in dom.attribute_names(node) {
                if keeps_attribute(&name)
                    && let Some(value) = dom.attribute(node, &name)
                {
                    dom.set_attribute(clone, &name, &value);
                }
            }
            for child in kept {
                dom.append_child(clone, child);
            }
            Some(clone)
        }
    }
}

/// Compile the children of `body` into a detached wrapper element.
///
/// The body itself is never cloned. The result is deterministic for a given
/// document and the source page is not modified.
pub fn compile<D: DomPort>(dom: &mut D, body: D::Node) -> D::Node {
    let wrapper = dom.create_element("div");
    dom.set_attribute(wrapper, "class", "clym-reading-mode-content");
    for child in dom.children(body) {
        if let Some(compiled) = compile_node(dom, child) {
            dom.append_child(wrapper, compiled);
        }
    }
    wrapper
}

/// The mounted reading view and its close button.
#[derive(Debug)]
pub(crate) struct ReadingView<N> {
    container: Option<N>,
    close: Option<N>,
}

impl<N> Default for ReadingView<N> {
    fn default() -> Self {
        Self {
            container: None,
            close: None,
        }
    }
}

impl<N: Copy + Eq> ReadingView<N> {
    /// Rebuild the view from the current page.
    pub(crate) fn open<D: DomPort<Node = N>>(&mut self, dom: &mut D) {
        self.close(dom);
        let body = dom.body();
        let content = compile(dom, body);

        let container = create_widget(dom, body, "div");
        dom.set_attribute(container, "id", READING_MODE_ID);
        dom.set_attribute(container, "role", "document");
        let close = create_widget(dom, container, "button");
        dom.set_attribute(close, "class", "clym-reading-mode-close");
        dom.set_attribute(close, "type", "button");
        dom.set_text_content(close, "Close reading mode");
        dom.add_listener(EventTarget::Node(close), EventKind::Click, TAG_READING_MODE_CLOSE);
        dom.append_child(container, content);

        self.container = Some(container);
        self.close = Some(close);
    }

    /// Tear the view down.
    pub(crate) fn close<D: DomPort<Node = N>>(&mut self, dom: &mut D) {
        if let Some(close) = self.close.take() {
            dom.remove_listener(EventTarget::Node(close), EventKind::Click, TAG_READING_MODE_CLOSE);
        }
        if let Some(container) = self.container.take() {
            dom.remove(container);
        }
    }

    /// Whether `target` is the close button.
    pub(crate) fn is_close_button(&self, target: N) -> bool {
        self.close == Some(target)
    }
}
