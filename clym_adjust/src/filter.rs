// Copyright 2026 the Clym Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Root-element `filter` composed from independent layers.

use alloc::string::String;

use clym_dom::DomPort;
use smallvec::SmallVec;

use crate::adjustment::{Adjustment, Param};
use crate::effect::choose;
use crate::error::EffectError;

/// A source of one root filter function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterLayer {
    /// `saturate(..)` / `grayscale(..)`.
    Saturation,
    /// Contrast, inversion and dark/light schemes.
    Contrast,
}

impl FilterLayer {
    /// CSS filter functions for a truthy parameter.
    pub fn filter_for(
        self,
        adjustment: Adjustment,
        param: &Param,
    ) -> Result<&'static str, EffectError> {
        match self {
            Self::Saturation => choose(
                adjustment,
                param,
                &[
                    ("low", "saturate(0.5)"),
                    ("high", "saturate(2)"),
                    ("monochrome", "grayscale(1)"),
                ],
            ),
            Self::Contrast => choose(
                adjustment,
                param,
                &[
                    ("dark", "invert(1) hue-rotate(180deg)"),
                    ("light", "brightness(1.1) contrast(0.9)"),
                    ("high", "contrast(1.5)"),
                    ("inverted", "invert(1)"),
                ],
            ),
        }
    }
}

/// Active filter layers and the page's own inline filter on the root element.
///
/// Layers compose in [`FilterLayer`] order. The page's inline value is saved
/// when the first layer activates and written back when the last one goes.
#[derive(Debug, Default)]
pub(crate) struct FilterStack {
    layers: SmallVec<[(FilterLayer, &'static str); 2]>,
    saved: Option<Option<String>>,
}

impl FilterStack {
    pub(crate) fn apply<D: DomPort>(
        &mut self,
        dom: &mut D,
        layer: FilterLayer,
        adjustment: Adjustment,
        param: &Param,
    ) -> Result<(), EffectError> {
        if param.is_truthy() {
            let filter = layer.filter_for(adjustment, param)?;
            if self.saved.is_none() {
                self.saved = Some(dom.style_property(dom.document_element(), "filter"));
            }
            match self.layers.iter_mut().find(|(l, _)| *l == layer) {
                Some(slot) => slot.1 = filter,
                None => {
                    self.layers.push((layer, filter));
                    self.layers.sort_by_key(|(l, _)| *l);
                }
            }
        } else {
            self.layers.retain(|(l, _)| *l != layer);
        }
        self.write(dom);
        Ok(())
    }

    fn write<D: DomPort>(&mut self, dom: &mut D) {
        let root = dom.document_element();
        if self.layers.is_empty() {
            match self.saved.take() {
                Some(Some(previous)) => dom.set_style_property(root, "filter", &previous),
                Some(None) => dom.remove_style_property(root, "filter"),
                None => {}
            }
            return;
        }
        let mut value = String::new();
        for (i, (_, f)) in self.layers.iter().enumerate() {
            if i > 0 {
                value.push(' ');
            }
            value.push_str(f);
        }
        dom.set_style_property(root, "filter", &value);
    }
}
