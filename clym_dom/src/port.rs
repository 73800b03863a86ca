// Copyright 2026 the Clym Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`DomPort`] trait.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use kurbo::Size;

use crate::style;
use crate::types::{EventKind, EventTarget, ListenerTag, NodeKind, ObserverId};

/// Access to one live document.
///
/// This is the only way a runtime built on this crate touches the page. It
/// covers four concerns: querying the tree, creating and mutating nodes,
/// registering listeners, and watching subtrees for mutations.
///
/// Tag names are reported in lowercase. Methods that receive a stale or
/// foreign node must behave as no-ops (or return `None`/empty), never panic.
///
/// Inline style, class list and traversal helpers have default
/// implementations in terms of the raw attribute and child accessors; a port
/// backed by a real browser may override them with native calls.
pub trait DomPort {
    /// Node handle. Cheap to copy and compare.
    type Node: Copy + Eq + Hash + Debug;

    /// The root `<html>` element.
    fn document_element(&self) -> Self::Node;
    /// The `<head>` element.
    fn head(&self) -> Self::Node;
    /// The `<body>` element.
    fn body(&self) -> Self::Node;

    /// Kind of a live node, or `None` if `node` is stale.
    fn kind(&self, node: Self::Node) -> Option<NodeKind>;
    /// Lowercase tag name of an element.
    fn tag_name(&self, node: Self::Node) -> Option<String>;
    /// Data of a text node.
    fn text(&self, node: Self::Node) -> Option<String>;
    /// Child nodes in document order.
    fn children(&self, node: Self::Node) -> Vec<Self::Node>;
    /// Parent node, if attached.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Attribute value.
    fn attribute(&self, node: Self::Node, name: &str) -> Option<String>;
    /// Names of all attributes of an element, in source order.
    fn attribute_names(&self, node: Self::Node) -> Vec<String>;
    /// Set an attribute.
    fn set_attribute(&mut self, node: Self::Node, name: &str, value: &str);
    /// Remove an attribute.
    fn remove_attribute(&mut self, node: Self::Node, name: &str);

    /// Create a detached element.
    fn create_element(&mut self, tag: &str) -> Self::Node;
    /// Create a detached text node.
    fn create_text(&mut self, text: &str) -> Self::Node;
    /// Append `child` as the last child of `parent`, detaching it from any previous parent.
    fn append_child(&mut self, parent: Self::Node, child: Self::Node);
    /// Detach and discard `node` together with its subtree.
    fn remove(&mut self, node: Self::Node);

    /// Computed value of a CSS property.
    fn computed_style(&self, node: Self::Node, property: &str) -> Option<String>;
    /// Viewport size in CSS pixels.
    fn viewport(&self) -> Size;

    /// Move keyboard focus to `node`.
    fn focus(&mut self, node: Self::Node);
    /// Currently focused element.
    fn active_element(&self) -> Option<Self::Node>;

    /// Whether an `<audio>`/`<video>` element is muted.
    fn media_muted(&self, node: Self::Node) -> bool;
    /// Mute or unmute an `<audio>`/`<video>` element.
    fn set_media_muted(&mut self, node: Self::Node, muted: bool);
    /// Whether an `<audio>`/`<video>` element is paused.
    fn media_paused(&self, node: Self::Node) -> bool;
    /// Pause or resume an `<audio>`/`<video>` element.
    fn set_media_paused(&mut self, node: Self::Node, paused: bool);

    /// Register a listener. Registering the same triple twice yields two registrations.
    fn add_listener(&mut self, target: EventTarget<Self::Node>, kind: EventKind, tag: ListenerTag);
    /// Remove every registration matching the triple.
    fn remove_listener(
        &mut self,
        target: EventTarget<Self::Node>,
        kind: EventKind,
        tag: ListenerTag,
    );

    /// Start watching the child lists of `root` and its whole subtree.
    fn observe_mutations(&mut self, root: Self::Node) -> ObserverId;
    /// Stop a watcher and discard its pending records.
    fn disconnect_observer(&mut self, observer: ObserverId);
    /// Drain pending mutation records of a watcher, returning how many there were.
    fn take_mutation_records(&mut self, observer: ObserverId) -> usize;

    // --- provided helpers ---

    /// Whether `node` is a live element with the given lowercase tag.
    fn is_tag(&self, node: Self::Node, tag: &str) -> bool {
        self.tag_name(node).is_some_and(|t| t == tag)
    }

    /// All descendants of `root` in depth-first document order, excluding `root`.
    fn descendants(&self, root: Self::Node) -> Vec<Self::Node> {
        let mut out = Vec::new();
        let mut stack: Vec<Self::Node> = self.children(root);
        stack.reverse();
        while let Some(node) = stack.pop() {
            out.push(node);
            let mut children = self.children(node);
            children.reverse();
            stack.extend(children);
        }
        out
    }

    /// First element under the document element whose `id` attribute equals `id`.
    fn element_by_id(&self, id: &str) -> Option<Self::Node> {
        let root = self.document_element();
        core::iter::once(root)
            .chain(self.descendants(root))
            .find(|n| self.attribute(*n, "id").is_some_and(|v| v == id))
    }

    /// Elements under `root` with the given lowercase tag, in document order.
    fn elements_by_tag(&self, root: Self::Node, tag: &str) -> Vec<Self::Node> {
        self.descendants(root)
            .into_iter()
            .filter(|n| self.is_tag(*n, tag))
            .collect()
    }

    /// Concatenated text of every text node under `node`.
    fn text_content(&self, node: Self::Node) -> String {
        if let Some(text) = self.text(node) {
            return text;
        }
        let mut out = String::new();
        for n in self.descendants(node) {
            if let Some(text) = self.text(n) {
                out.push_str(&text);
            }
        }
        out
    }

    /// Replace all children of `node` with a single text node.
    fn set_text_content(&mut self, node: Self::Node, text: &str) {
        for child in self.children(node) {
            self.remove(child);
        }
        let t = self.create_text(text);
        self.append_child(node, t);
    }

    /// Whether `node` has at least one direct text child with non-whitespace content.
    fn has_direct_text(&self, node: Self::Node) -> bool {
        self.children(node)
            .into_iter()
            .any(|c| self.text(c).is_some_and(|t| !t.trim().is_empty()))
    }

    /// Whether the element's class list contains `class`.
    fn has_class(&self, node: Self::Node, class: &str) -> bool {
        self.attribute(node, "class")
            .is_some_and(|list| style::class_list_contains(&list, class))
    }

    /// Add `class` to the element's class list.
    fn add_class(&mut self, node: Self::Node, class: &str) {
        let list = self.attribute(node, "class").unwrap_or_default();
        if let Some(updated) = style::class_list_add(&list, class) {
            self.set_attribute(node, "class", &updated);
        }
    }

    /// Remove `class` from the element's class list, dropping the attribute once empty.
    fn remove_class(&mut self, node: Self::Node, class: &str) {
        let Some(list) = self.attribute(node, "class") else {
            return;
        };
        if let Some(updated) = style::class_list_remove(&list, class) {
            if updated.is_empty() {
                self.remove_attribute(node, "class");
            } else {
                self.set_attribute(node, "class", &updated);
            }
        }
    }

    /// Add or remove `class` depending on `force`.
    fn toggle_class(&mut self, node: Self::Node, class: &str, force: bool) {
        if force {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }

    /// Inline value of a CSS property.
    fn style_property(&self, node: Self::Node, property: &str) -> Option<String> {
        let text = self.attribute(node, "style")?;
        let decls = style::parse_declarations(&text);
        style::get(&decls, property).map(String::from)
    }

    /// Set an inline CSS property.
    fn set_style_property(&mut self, node: Self::Node, property: &str, value: &str) {
        let text = self.attribute(node, "style").unwrap_or_default();
        let mut decls = style::parse_declarations(&text);
        style::upsert(&mut decls, property, value);
        self.set_attribute(node, "style", &style::serialize_declarations(&decls));
    }

    /// Remove an inline CSS property, dropping the `style` attribute once empty.
    fn remove_style_property(&mut self, node: Self::Node, property: &str) {
        let Some(text) = self.attribute(node, "style") else {
            return;
        };
        let mut decls = style::parse_declarations(&text);
        if !style::remove(&mut decls, property) {
            return;
        }
        if decls.is_empty() {
            self.remove_attribute(node, "style");
        } else {
            self.set_attribute(node, "style", &style::serialize_declarations(&decls));
        }
    }
}
