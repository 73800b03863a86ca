// Copyright 2026 the Clym Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory document: structure, attributes, listeners, mutation records.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Size;
use smallvec::SmallVec;

use crate::port::DomPort;
use crate::style;
use crate::types::{EventKind, EventTarget, ListenerTag, NodeId, NodeKind, ObserverId};

type Attributes = SmallVec<[(String, String); 4]>;

/// A self-contained document tree implementing [`DomPort`].
///
/// The document starts out as `<html><head></head><body></body></html>`.
/// Nodes live in a slot arena with generational identifiers, so handles to
/// removed nodes go stale instead of aliasing newer nodes.
///
/// There is no layout or cascade. [`DomPort::computed_style`] answers from the
/// inline `style` attribute first and then from values seeded with
/// [`Document::set_computed_style`]. Listeners are recorded but never invoked:
/// whoever drives the document delivers events to the runtime directly.
///
/// ## Example
///
/// ```rust
/// use clym_dom::{Document, DomPort};
///
/// let mut doc = Document::new();
/// let body = doc.body();
/// let p = doc.append_element(body, "p");
/// doc.append_text(p, "Hello");
///
/// assert_eq!(doc.text_content(body), "Hello");
/// assert!(doc.has_direct_text(p));
/// ```
pub struct Document {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    html: NodeId,
    head: NodeId,
    body: NodeId,
    active: Option<NodeId>,
    listeners: Vec<Listener>,
    observers: Vec<Observer>,
    next_observer: u32,
    viewport: Size,
}

impl core::fmt::Debug for Document {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Document")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("listeners", &self.listeners.len())
            .field("observers", &self.observers.len())
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// A recorded listener registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Listener {
    /// Where the listener is attached.
    pub target: EventTarget<NodeId>,
    /// Event type.
    pub kind: EventKind,
    /// Owner tag supplied at registration.
    pub tag: ListenerTag,
}

#[derive(Clone, Debug)]
struct Observer {
    id: ObserverId,
    root: NodeId,
    records: usize,
}

#[derive(Clone, Copy, Debug)]
struct MediaState {
    muted: bool,
    paused: bool,
}

impl Default for MediaState {
    fn default() -> Self {
        Self {
            muted: false,
            paused: true,
        }
    }
}

#[derive(Clone, Debug)]
enum NodeData {
    Element {
        tag: String,
        attributes: Attributes,
        computed: Attributes,
        media: MediaState,
    },
    Text(String),
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
}

impl Document {
    /// Create `<html><head></head><body></body></html>` with a 1280×720 viewport.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            html: NodeId::new(0, 0),
            head: NodeId::new(0, 0),
            body: NodeId::new(0, 0),
            active: None,
            listeners: Vec::new(),
            observers: Vec::new(),
            next_observer: 1,
            viewport: Size::new(1280.0, 720.0),
        };
        let html = doc.insert(element_data("html"));
        let head = doc.insert(element_data("head"));
        let body = doc.insert(element_data("body"));
        doc.link_parent(head, html);
        doc.link_parent(body, html);
        doc.html = html;
        doc.head = head;
        doc.body = body;
        doc
    }

    /// Replace the viewport size reported by [`DomPort::viewport`].
    pub fn set_viewport(&mut self, size: Size) {
        self.viewport = size;
    }

    /// Create an element and append it to `parent`.
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let node = self.create_element(tag);
        self.append_child(parent, node);
        node
    }

    /// Create a text node and append it to `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let node = self.create_text(text);
        self.append_child(parent, node);
        node
    }

    /// Seed the value [`DomPort::computed_style`] reports when no inline value is set.
    pub fn set_computed_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(NodeData::Element { computed, .. }) = self.data_mut(node) {
            if let Some(slot) = computed.iter_mut().find(|(p, _)| p == property) {
                slot.1 = value.into();
            } else {
                computed.push((property.into(), value.into()));
            }
        }
    }

    /// Seed the muted/paused state of a media element without going through the port.
    pub fn set_media_state(&mut self, node: NodeId, muted: bool, paused: bool) {
        if let Some(NodeData::Element { media, .. }) = self.data_mut(node) {
            *media = MediaState { muted, paused };
        }
    }

    /// Every live listener registration, in registration order.
    pub fn listeners(&self) -> &[Listener] {
        &self.listeners
    }

    /// Number of registrations on `target` for `kind`, across all tags.
    pub fn listener_count(&self, target: EventTarget<NodeId>, kind: EventKind) -> usize {
        self.listeners
            .iter()
            .filter(|l| l.target == target && l.kind == kind)
            .count()
    }

    /// Number of live watchers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Returns true if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Whether `node` is connected to the document element.
    pub fn is_connected(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == self.html {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    /// Live elements reachable from the document element whose class list contains `class`.
    pub fn elements_with_class(&self, class: &str) -> Vec<NodeId> {
        self.descendants(self.html)
            .into_iter()
            .filter(|n| self.has_class(*n, class))
            .collect()
    }

    // --- internals ---

    fn insert(&mut self, data: NodeData) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, data));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Arena slots are addressed with 32-bit indices."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, data)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Arena slots are addressed with 32-bit indices."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        NodeId::new(idx, generation)
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn data_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.node_mut(id).map(|n| &mut n.data)
    }

    fn attributes(&self, id: NodeId) -> Option<&Attributes> {
        match &self.node(id)?.data {
            NodeData::Element { attributes, .. } => Some(attributes),
            NodeData::Text(_) => None,
        }
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(p) = self.node_mut(parent) {
            p.children.push(id);
        }
        if let Some(n) = self.node_mut(id) {
            n.parent = Some(parent);
        }
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(p) = self.node_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(n) = self.node_mut(id) {
            n.parent = None;
        }
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    /// Bump the record count of every watcher whose subtree contains `parent`.
    fn record_child_list_mutation(&mut self, parent: NodeId) {
        let hits: Vec<usize> = self
            .observers
            .iter()
            .enumerate()
            .filter(|(_, o)| self.is_ancestor_or_self(o.root, parent))
            .map(|(i, _)| i)
            .collect();
        for i in hits {
            self.observers[i].records += 1;
        }
    }

    fn free_subtree(&mut self, id: NodeId) {
        let Some(node) = self.node(id) else {
            return;
        };
        let children = node.children.clone();
        for child in children {
            self.free_subtree(child);
        }
        self.listeners.retain(|l| l.target != EventTarget::Node(id));
        self.observers.retain(|o| o.root != id);
        if self.active == Some(id) {
            self.active = None;
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }
}

impl Node {
    fn new(generation: u32, data: NodeData) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            data,
        }
    }
}

fn element_data(tag: &str) -> NodeData {
    NodeData::Element {
        tag: tag.to_ascii_lowercase(),
        attributes: Attributes::new(),
        computed: Attributes::new(),
        media: MediaState::default(),
    }
}

impl DomPort for Document {
    type Node = NodeId;

    fn document_element(&self) -> NodeId {
        self.html
    }

    fn head(&self) -> NodeId {
        self.head
    }

    fn body(&self) -> NodeId {
        self.body
    }

    fn kind(&self, node: NodeId) -> Option<NodeKind> {
        Some(match self.node(node)?.data {
            NodeData::Element { .. } => NodeKind::Element,
            NodeData::Text(_) => NodeKind::Text,
        })
    }

    fn tag_name(&self, node: NodeId) -> Option<String> {
        match &self.node(node)?.data {
            NodeData::Element { tag, .. } => Some(tag.clone()),
            NodeData::Text(_) => None,
        }
    }

    fn text(&self, node: NodeId) -> Option<String> {
        match &self.node(node)?.data {
            NodeData::Text(text) => Some(text.clone()),
            NodeData::Element { .. } => None,
        }
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node).map(|n| n.children.clone()).unwrap_or_default()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?.parent
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.attributes(node)?
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.clone())
    }

    fn attribute_names(&self, node: NodeId) -> Vec<String> {
        self.attributes(node)
            .map(|attrs| attrs.iter().map(|(n, _)| n.clone()).collect())
            .unwrap_or_default()
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(NodeData::Element { attributes, .. }) = self.data_mut(node) {
            if let Some(slot) = attributes
                .iter_mut()
                .find(|(n, _)| n.eq_ignore_ascii_case(name))
            {
                slot.1 = value.into();
            } else {
                attributes.push((name.to_ascii_lowercase(), value.into()));
            }
        }
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(NodeData::Element { attributes, .. }) = self.data_mut(node) {
            attributes.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        }
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.insert(element_data(tag))
    }

    fn create_text(&mut self, text: &str) -> NodeId {
        self.insert(NodeData::Text(text.into()))
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.is_alive(parent) || !self.is_alive(child) {
            return;
        }
        // Refuse cycles.
        if self.is_ancestor_or_self(child, parent) {
            return;
        }
        if let Some(old) = self.parent(child) {
            self.unlink_parent(child, old);
            self.record_child_list_mutation(old);
        }
        self.link_parent(child, parent);
        self.record_child_list_mutation(parent);
    }

    fn remove(&mut self, node: NodeId) {
        if !self.is_alive(node) || node == self.html {
            return;
        }
        if let Some(parent) = self.parent(node) {
            self.unlink_parent(node, parent);
            self.record_child_list_mutation(parent);
        }
        self.free_subtree(node);
    }

    fn computed_style(&self, node: NodeId, property: &str) -> Option<String> {
        if let Some(inline) = self.style_property(node, property) {
            return Some(inline);
        }
        match &self.node(node)?.data {
            NodeData::Element { computed, .. } => computed
                .iter()
                .find(|(p, _)| p == property)
                .map(|(_, v)| v.clone()),
            NodeData::Text(_) => None,
        }
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn focus(&mut self, node: NodeId) {
        if matches!(self.kind(node), Some(NodeKind::Element)) {
            self.active = Some(node);
        }
    }

    fn active_element(&self) -> Option<NodeId> {
        self.active.filter(|n| self.is_alive(*n))
    }

    fn media_muted(&self, node: NodeId) -> bool {
        match self.node(node).map(|n| &n.data) {
            Some(NodeData::Element { media, .. }) => media.muted,
            _ => false,
        }
    }

    fn set_media_muted(&mut self, node: NodeId, muted: bool) {
        if let Some(NodeData::Element { media, .. }) = self.data_mut(node) {
            media.muted = muted;
        }
    }

    fn media_paused(&self, node: NodeId) -> bool {
        match self.node(node).map(|n| &n.data) {
            Some(NodeData::Element { media, .. }) => media.paused,
            _ => true,
        }
    }

    fn set_media_paused(&mut self, node: NodeId, paused: bool) {
        if let Some(NodeData::Element { media, .. }) = self.data_mut(node) {
            media.paused = paused;
        }
    }

    fn add_listener(&mut self, target: EventTarget<NodeId>, kind: EventKind, tag: ListenerTag) {
        if let EventTarget::Node(n) = target
            && !self.is_alive(n)
        {
            return;
        }
        self.listeners.push(Listener { target, kind, tag });
    }

    fn remove_listener(&mut self, target: EventTarget<NodeId>, kind: EventKind, tag: ListenerTag) {
        self.listeners
            .retain(|l| !(l.target == target && l.kind == kind && l.tag == tag));
    }

    fn observe_mutations(&mut self, root: NodeId) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push(Observer {
            id,
            root,
            records: 0,
        });
        id
    }

    fn disconnect_observer(&mut self, observer: ObserverId) {
        self.observers.retain(|o| o.id != observer);
    }

    fn take_mutation_records(&mut self, observer: ObserverId) -> usize {
        self.observers
            .iter_mut()
            .find(|o| o.id == observer)
            .map(|o| core::mem::take(&mut o.records))
            .unwrap_or(0)
    }

    fn style_property(&self, node: NodeId, property: &str) -> Option<String> {
        let attrs = self.attributes(node)?;
        let (_, text) = attrs.iter().find(|(n, _)| n == "style")?;
        let decls = style::parse_declarations(text);
        style::get(&decls, property).map(String::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn skeleton_is_html_head_body() {
        let doc = Document::new();
        assert_eq!(doc.tag_name(doc.document_element()).as_deref(), Some("html"));
        assert_eq!(
            doc.children(doc.document_element()),
            vec![doc.head(), doc.body()]
        );
        assert!(doc.is_connected(doc.body()));
    }

    #[test]
    fn liveness_insert_remove_reuse() {
        let mut doc = Document::new();
        let body = doc.body();
        let a = doc.append_element(body, "div");
        assert!(doc.is_alive(a));

        doc.remove(a);
        assert!(!doc.is_alive(a));
        assert!(doc.children(body).is_empty());

        // Slot may be reused, but the stale handle must not resolve.
        let b = doc.append_element(body, "span");
        assert!(doc.is_alive(b));
        assert!(!doc.is_alive(a));
        if a.0 == b.0 {
            assert!(b.1 > a.1, "generation must increase on reuse");
        }
        assert_eq!(doc.tag_name(a), None);
    }

    #[test]
    fn remove_frees_subtree_and_its_listeners() {
        let mut doc = Document::new();
        let body = doc.body();
        let div = doc.append_element(body, "div");
        let p = doc.append_element(div, "p");
        doc.add_listener(EventTarget::Node(p), EventKind::MouseEnter, ListenerTag(1));
        doc.focus(p);

        doc.remove(div);
        assert!(!doc.is_alive(p));
        assert!(doc.listeners().is_empty());
        assert_eq!(doc.active_element(), None);
    }

    #[test]
    fn descendants_are_document_order() {
        let mut doc = Document::new();
        let body = doc.body();
        let a = doc.append_element(body, "a");
        let a1 = doc.append_element(a, "b");
        let a2 = doc.append_text(a, "t");
        let c = doc.append_element(body, "c");
        assert_eq!(doc.descendants(body), vec![a, a1, a2, c]);
    }

    #[test]
    fn mutation_records_follow_observed_subtree() {
        let mut doc = Document::new();
        let body = doc.body();
        let head = doc.head();
        let obs = doc.observe_mutations(body);

        let div = doc.append_element(body, "div");
        doc.append_text(div, "x");
        // Outside the observed subtree.
        doc.append_element(head, "style");
        // Detached trees do not count either.
        let detached = doc.create_element("p");
        doc.append_text(detached, "y");

        assert_eq!(doc.take_mutation_records(obs), 2);
        assert_eq!(doc.take_mutation_records(obs), 0);

        doc.disconnect_observer(obs);
        doc.append_element(body, "p");
        assert_eq!(doc.take_mutation_records(obs), 0);
        assert_eq!(doc.observer_count(), 0);
    }

    #[test]
    fn observers_on_freed_subtrees_are_dropped() {
        let mut doc = Document::new();
        let section = doc.append_element(doc.body(), "section");
        let inner = doc.append_element(section, "div");
        let outer = doc.observe_mutations(doc.body());
        let gone = doc.observe_mutations(inner);
        assert_eq!(doc.observer_count(), 2);

        doc.remove(section);
        assert_eq!(doc.observer_count(), 1);
        assert_eq!(doc.take_mutation_records(gone), 0);
        assert_eq!(doc.take_mutation_records(outer), 1);
    }

    #[test]
    fn computed_style_prefers_inline() {
        let mut doc = Document::new();
        let p = doc.append_element(doc.body(), "p");
        assert_eq!(doc.computed_style(p, "font-size"), None);
        doc.set_computed_style(p, "font-size", "16px");
        assert_eq!(doc.computed_style(p, "font-size").as_deref(), Some("16px"));
        doc.set_style_property(p, "font-size", "20px");
        assert_eq!(doc.computed_style(p, "font-size").as_deref(), Some("20px"));
        doc.remove_style_property(p, "font-size");
        assert_eq!(doc.attribute(p, "style"), None);
        assert_eq!(doc.computed_style(p, "font-size").as_deref(), Some("16px"));
    }

    #[test]
    fn class_helpers_round_trip_attribute() {
        let mut doc = Document::new();
        let body = doc.body();
        doc.toggle_class(body, "x", true);
        doc.toggle_class(body, "x", true);
        assert_eq!(doc.attribute(body, "class").as_deref(), Some("x"));
        doc.toggle_class(body, "x", false);
        assert_eq!(doc.attribute(body, "class"), None);
    }

    #[test]
    fn append_refuses_cycles() {
        let mut doc = Document::new();
        let body = doc.body();
        let outer = doc.append_element(body, "div");
        let inner = doc.append_element(outer, "div");
        doc.append_child(inner, outer);
        assert_eq!(doc.parent(outer), Some(body));
    }

    #[test]
    fn duplicate_listeners_are_kept_and_removed_together() {
        let mut doc = Document::new();
        let tag = ListenerTag(7);
        doc.add_listener(EventTarget::Document, EventKind::KeyDown, tag);
        doc.add_listener(EventTarget::Document, EventKind::KeyDown, tag);
        assert_eq!(
            doc.listener_count(EventTarget::Document, EventKind::KeyDown),
            2
        );
        doc.remove_listener(EventTarget::Document, EventKind::KeyDown, tag);
        assert_eq!(
            doc.listener_count(EventTarget::Document, EventKind::KeyDown),
            0
        );
    }
}
