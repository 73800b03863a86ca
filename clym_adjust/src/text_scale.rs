// Copyright 2026 the Clym Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Relative text scaling with captured baselines.
//!
//! The first time an element is scaled for a metric, its computed value is
//! stored in a `data-clym-*` attribute. Every later level is computed from that
//! baseline as `baseline * (10 + level) / 10`, so repeated calls never compound.
//! Turning the metric off restores the element and deletes the attribute: the
//! attribute is present exactly while the element is scaled.

use alloc::format;
use alloc::string::String;

use clym_dom::DomPort;

use crate::adjustment::{Adjustment, Param};
use crate::error::EffectError;
use crate::widget::{page_elements, text_elements};

/// A text metric that can be scaled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextMetric {
    /// `font-size`.
    FontSize,
    /// `letter-spacing`.
    LetterSpacing,
    /// `line-height`.
    LineHeight,
}

impl TextMetric {
    /// The CSS property scaled.
    pub const fn property(self) -> &'static str {
        match self {
            Self::FontSize => "font-size",
            Self::LetterSpacing => "letter-spacing",
            Self::LineHeight => "line-height",
        }
    }

    /// Attribute holding the captured baseline.
    pub const fn baseline_attr(self) -> &'static str {
        match self {
            Self::FontSize => "data-clym-font-size",
            Self::LetterSpacing => "data-clym-letter-spacing",
            Self::LineHeight => "data-clym-line-height",
        }
    }

    /// Attribute holding the page's own inline value, when it had one.
    const fn inline_attr(self) -> &'static str {
        match self {
            Self::FontSize => "data-clym-font-size-inline",
            Self::LetterSpacing => "data-clym-letter-spacing-inline",
            Self::LineHeight => "data-clym-line-height-inline",
        }
    }
}

/// Split a CSS length such as `"16px"` or `"1.5"` into number and unit.
fn parse_length(value: &str) -> Option<(f64, &str)> {
    let value = value.trim();
    let split = value
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+')))
        .map(|(i, _)| i)
        .unwrap_or(value.len());
    let (number, unit) = value.split_at(split);
    let number: f64 = number.parse().ok()?;
    Some((number, unit))
}

/// Scaled value for a factor in tenths, formatted with the baseline's unit.
fn scaled(baseline: &str, tenths: i32) -> Option<String> {
    let (number, unit) = parse_length(baseline)?;
    let value = number * f64::from(tenths) / 10.0;
    Some(format!("{value}{unit}"))
}

/// Scale factor in tenths for the requested level.
///
/// Levels whose factor would overflow or turn negative are rejected.
fn factor_of(adjustment: Adjustment, param: &Param) -> Result<i32, EffectError> {
    let unsupported = || EffectError::UnsupportedValue {
        adjustment,
        value: format!("{param}"),
    };
    let level: i32 = match param {
        Param::Level(level) => *level,
        Param::Value(v) => v.trim().parse().map_err(|_| unsupported())?,
        _ => return Err(unsupported()),
    };
    level
        .checked_add(10)
        .filter(|tenths| *tenths >= 0)
        .ok_or_else(unsupported)
}

/// Apply a scaling level to every text-bearing page element, or restore them all.
pub(crate) fn apply<D: DomPort>(
    dom: &mut D,
    metric: TextMetric,
    adjustment: Adjustment,
    param: &Param,
) -> Result<(), EffectError> {
    if !param.is_truthy() {
        restore(dom, metric);
        return Ok(());
    }
    let tenths = factor_of(adjustment, param)?;
    let property = metric.property();
    for node in text_elements(dom) {
        let baseline = match dom.attribute(node, metric.baseline_attr()) {
            Some(b) => b,
            None => {
                let Some(computed) = dom.computed_style(node, property) else {
                    continue;
                };
                if parse_length(&computed).is_none() {
                    // `normal` and friends have no numeric baseline.
                    continue;
                }
                if let Some(inline) = dom.style_property(node, property) {
                    dom.set_attribute(node, metric.inline_attr(), &inline);
                }
                dom.set_attribute(node, metric.baseline_attr(), &computed);
                computed
            }
        };
        if let Some(value) = scaled(&baseline, tenths) {
            dom.set_style_property(node, property, &value);
        }
    }
    log::trace!("scaled {property} to {tenths}/10");
    Ok(())
}

/// Undo scaling on every element that carries a baseline.
pub(crate) fn restore<D: DomPort>(dom: &mut D, metric: TextMetric) {
    let property = metric.property();
    let body = dom.body();
    for node in page_elements(dom, body) {
        if dom.attribute(node, metric.baseline_attr()).is_none() {
            continue;
        }
        match dom.attribute(node, metric.inline_attr()) {
            Some(inline) => dom.set_style_property(node, property, &inline),
            None => dom.remove_style_property(node, property),
        }
        dom.remove_attribute(node, metric.baseline_attr());
        dom.remove_attribute(node, metric.inline_attr());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clym_dom::Document;

    fn paragraph(doc: &mut Document, size: &str) -> clym_dom::NodeId {
        let p = doc.append_element(doc.body(), "p");
        doc.append_text(p, "Some text");
        doc.set_computed_style(p, "font-size", size);
        p
    }

    fn scale(
        doc: &mut Document,
        metric: TextMetric,
        param: impl Into<Param>,
    ) -> Result<(), EffectError> {
        let adjustment = match metric {
            TextMetric::FontSize => Adjustment::FontSize,
            TextMetric::LetterSpacing => Adjustment::LetterSpacing,
            TextMetric::LineHeight => Adjustment::LineHeight,
        };
        apply(doc, metric, adjustment, &param.into())
    }

    #[test]
    fn parse_lengths() {
        assert_eq!(parse_length("16px"), Some((16.0, "px")));
        assert_eq!(parse_length(" 1.5 "), Some((1.5, "")));
        assert_eq!(parse_length("-0.5em"), Some((-0.5, "em")));
        assert_eq!(parse_length("normal"), None);
    }

    #[test]
    fn scales_from_baseline_without_compounding() {
        let mut doc = Document::new();
        let p = paragraph(&mut doc, "16px");

        scale(&mut doc, TextMetric::FontSize, 3).unwrap();
        assert_eq!(doc.style_property(p, "font-size").as_deref(), Some("20.8px"));
        assert_eq!(doc.attribute(p, "data-clym-font-size").as_deref(), Some("16px"));

        // The inline value now reads 20.8px, but the baseline is not recaptured.
        scale(&mut doc, TextMetric::FontSize, 3).unwrap();
        assert_eq!(doc.style_property(p, "font-size").as_deref(), Some("20.8px"));

        scale(&mut doc, TextMetric::FontSize, -2).unwrap();
        assert_eq!(doc.style_property(p, "font-size").as_deref(), Some("12.8px"));
    }

    #[test]
    fn restore_removes_inline_value_and_baseline() {
        let mut doc = Document::new();
        let p = paragraph(&mut doc, "16px");
        scale(&mut doc, TextMetric::FontSize, 3).unwrap();
        scale(&mut doc, TextMetric::FontSize, Param::Off).unwrap();

        assert_eq!(doc.attribute(p, "style"), None);
        assert_eq!(doc.attribute(p, "data-clym-font-size"), None);
        assert_eq!(doc.computed_style(p, "font-size").as_deref(), Some("16px"));
    }

    #[test]
    fn restore_brings_back_page_inline_value() {
        let mut doc = Document::new();
        let p = paragraph(&mut doc, "10px");
        doc.set_style_property(p, "line-height", "20px");

        scale(&mut doc, TextMetric::LineHeight, 5).unwrap();
        assert_eq!(doc.style_property(p, "line-height").as_deref(), Some("30px"));
        restore(&mut doc, TextMetric::LineHeight);
        assert_eq!(doc.style_property(p, "line-height").as_deref(), Some("20px"));
        assert_eq!(doc.attribute(p, "data-clym-line-height-inline"), None);
    }

    #[test]
    fn unparseable_baselines_are_skipped() {
        let mut doc = Document::new();
        let p = paragraph(&mut doc, "16px");
        doc.set_computed_style(p, "letter-spacing", "normal");
        scale(&mut doc, TextMetric::LetterSpacing, 2).unwrap();
        assert_eq!(doc.attribute(p, "data-clym-letter-spacing"), None);
        assert_eq!(doc.style_property(p, "letter-spacing"), None);
    }

    #[test]
    fn out_of_range_levels_are_rejected_before_touching_the_page() {
        let mut doc = Document::new();
        let p = paragraph(&mut doc, "16px");
        for level in [i32::MAX, i32::MAX - 9, -11, i32::MIN] {
            let err = scale(&mut doc, TextMetric::FontSize, level).unwrap_err();
            assert!(matches!(err, EffectError::UnsupportedValue { .. }));
        }
        assert_eq!(doc.attribute(p, "style"), None);
        assert_eq!(doc.attribute(p, "data-clym-font-size"), None);

        // The widest accepted levels still scale.
        scale(&mut doc, TextMetric::FontSize, -10).unwrap();
        assert_eq!(doc.style_property(p, "font-size").as_deref(), Some("0px"));
        let top = i32::MAX - 10;
        scale(&mut doc, TextMetric::FontSize, top).unwrap();
        assert!(doc.style_property(p, "font-size").is_some_and(|v| v.ends_with("px")));
    }

    #[test]
    fn string_levels_are_accepted_and_garbage_rejected() {
        let mut doc = Document::new();
        let p = paragraph(&mut doc, "20px");
        scale(&mut doc, TextMetric::FontSize, "1").unwrap();
        assert_eq!(doc.style_property(p, "font-size").as_deref(), Some("22px"));
        assert!(scale(&mut doc, TextMetric::FontSize, "big").is_err());
    }
}
