// Copyright 2026 the Clym Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Landmark categories and the per-category element lists.

use alloc::vec::Vec;

/// A category of navigable elements.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Landmark {
    /// `<nav>` elements.
    Menus,
    /// `<h1>` through `<h6>`.
    Headings,
    /// `<form>` elements.
    Forms,
    /// `<button>` elements.
    Buttons,
    /// `<img>` and `<video>` elements.
    Graphics,
}

impl Landmark {
    /// Every landmark, in binding order.
    pub const ALL: [Self; 5] = [
        Self::Menus,
        Self::Headings,
        Self::Forms,
        Self::Buttons,
        Self::Graphics,
    ];

    /// Category of an element with the given lowercase tag name.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "nav" => Some(Self::Menus),
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Some(Self::Headings),
            "form" => Some(Self::Forms),
            "button" => Some(Self::Buttons),
            "img" | "video" => Some(Self::Graphics),
            _ => None,
        }
    }

    /// The lowercase key bound to this landmark.
    pub fn key(self) -> char {
        match self {
            Self::Menus => 'm',
            Self::Headings => 'h',
            Self::Forms => 'f',
            Self::Buttons => 'b',
            Self::Graphics => 'g',
        }
    }

    /// Landmark bound to `key`, ignoring case.
    pub fn from_key(key: char) -> Option<Self> {
        let key = key.to_ascii_lowercase();
        Self::ALL.into_iter().find(|l| l.key() == key)
    }

    const fn index(self) -> usize {
        match self {
            Self::Menus => 0,
            Self::Headings => 1,
            Self::Forms => 2,
            Self::Buttons => 3,
            Self::Graphics => 4,
        }
    }
}

/// Five categorized element lists, each in document order.
///
/// Groups are a snapshot: they are built once (see [`LandmarkGroups::categorize`])
/// and are not maintained as the page changes afterwards.
#[derive(Clone, Debug)]
pub struct LandmarkGroups<K> {
    groups: [Vec<K>; 5],
}

impl<K> Default for LandmarkGroups<K> {
    fn default() -> Self {
        Self {
            groups: [Vec::new(), Vec::new(), Vec::new(), Vec::new(), Vec::new()],
        }
    }
}

impl<K: Copy> LandmarkGroups<K> {
    /// Create empty groups.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort `(node, tag)` pairs, visited in document order, into groups.
    ///
    /// Each node lands in at most one group; nodes with unrelated tags are skipped.
    pub fn categorize<'a>(nodes: impl IntoIterator<Item = (K, &'a str)>) -> Self {
        let mut out = Self::new();
        for (node, tag) in nodes {
            if let Some(landmark) = Landmark::from_tag(tag) {
                out.push(landmark, node);
            }
        }
        out
    }

    /// Append `node` to the group for `landmark`.
    pub fn push(&mut self, landmark: Landmark, node: K) {
        self.groups[landmark.index()].push(node);
    }

    /// Members of one group.
    pub fn group(&self, landmark: Landmark) -> &[K] {
        &self.groups[landmark.index()]
    }

    /// Total number of categorized nodes.
    pub fn len(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    /// Whether no node was categorized.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorize_sorts_by_tag_in_order() {
        let page = [
            (1_u32, "nav"),
            (2, "h1"),
            (3, "div"),
            (4, "form"),
            (5, "button"),
            (6, "img"),
            (7, "h6"),
            (8, "video"),
            (9, "section"),
        ];
        let groups = LandmarkGroups::categorize(page.iter().copied());
        assert_eq!(groups.group(Landmark::Menus), &[1]);
        assert_eq!(groups.group(Landmark::Headings), &[2, 7]);
        assert_eq!(groups.group(Landmark::Forms), &[4]);
        assert_eq!(groups.group(Landmark::Buttons), &[5]);
        assert_eq!(groups.group(Landmark::Graphics), &[6, 8]);
        assert_eq!(groups.len(), 7);
    }

    #[test]
    fn keys_are_case_insensitive() {
        assert_eq!(Landmark::from_key('h'), Some(Landmark::Headings));
        assert_eq!(Landmark::from_key('G'), Some(Landmark::Graphics));
        assert_eq!(Landmark::from_key('x'), None);
        for l in Landmark::ALL {
            assert_eq!(Landmark::from_key(l.key()), Some(l));
        }
    }
}
