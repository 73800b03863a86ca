// Copyright 2026 the Clym Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Muting and pausing page media without disturbing media the page already silenced.

use alloc::vec::Vec;

use clym_dom::DomPort;

fn media_elements<D: DomPort>(dom: &D) -> Vec<D::Node> {
    let body = dom.body();
    dom.descendants(body)
        .into_iter()
        .filter(|n| dom.is_tag(*n, "audio") || dom.is_tag(*n, "video"))
        .collect()
}

/// Media the engine muted or paused, so that exactly those are restored.
#[derive(Debug)]
pub(crate) struct MediaControl<N> {
    muted: Vec<N>,
    paused: Vec<N>,
}

impl<N> Default for MediaControl<N> {
    fn default() -> Self {
        Self {
            muted: Vec::new(),
            paused: Vec::new(),
        }
    }
}

impl<N: Copy + Eq> MediaControl<N> {
    /// Mute every audible media element; repeated calls pick up newly inserted media.
    pub(crate) fn mute<D: DomPort<Node = N>>(&mut self, dom: &mut D) {
        for node in media_elements(dom) {
            if !dom.media_muted(node) {
                dom.set_media_muted(node, true);
                self.muted.push(node);
            }
        }
    }

    pub(crate) fn unmute<D: DomPort<Node = N>>(&mut self, dom: &mut D) {
        for node in self.muted.drain(..) {
            dom.set_media_muted(node, false);
        }
    }

    /// Pause every playing media element.
    pub(crate) fn pause<D: DomPort<Node = N>>(&mut self, dom: &mut D) {
        for node in media_elements(dom) {
            if !dom.media_paused(node) {
                dom.set_media_paused(node, true);
                self.paused.push(node);
            }
        }
    }

    pub(crate) fn resume<D: DomPort<Node = N>>(&mut self, dom: &mut D) {
        for node in self.paused.drain(..) {
            dom.set_media_paused(node, false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clym_dom::Document;

    #[test]
    fn only_media_we_touched_is_restored() {
        let mut doc = Document::new();
        let body = doc.body();
        let loud = doc.append_element(body, "video");
        let quiet = doc.append_element(body, "audio");
        doc.set_media_state(loud, false, false);
        doc.set_media_state(quiet, true, true);

        let mut media = MediaControl::default();
        media.mute(&mut doc);
        media.pause(&mut doc);
        media.mute(&mut doc);
        assert!(doc.media_muted(loud) && doc.media_paused(loud));

        media.unmute(&mut doc);
        media.resume(&mut doc);
        assert!(!doc.media_muted(loud));
        assert!(!doc.media_paused(loud));
        // The page had silenced this one itself.
        assert!(doc.media_muted(quiet));
        assert!(doc.media_paused(quiet));
    }
}
