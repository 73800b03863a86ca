// Copyright 2026 the Clym Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-adjustment effects: how each adjustment reaches the page.
//!
//! Every [`Adjustment`] maps to exactly one [`AdjustmentEffect`] in an
//! [`EffectTable`]. An effect may toggle a body class backed by a generated
//! stylesheet, run an imperative [`GlobalEffect`], or both.

use alloc::format;
use alloc::string::String;

use crate::adjustment::{Adjustment, Param};
use crate::error::EffectError;
use crate::filter::FilterLayer;
use crate::text_scale::TextMetric;

bitflags::bitflags! {
    /// How an adjustment is applied.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ApplicationMode: u8 {
        /// Toggle the adjustment's body class (and its stylesheet, if any).
        const CLASS  = 0b0000_0001;
        /// Run the adjustment's imperative effect.
        const GLOBAL = 0b0000_0010;
    }
}

/// Turns a truthy parameter into stylesheet text.
pub type CssGenerator = fn(Adjustment, &Param) -> Result<String, EffectError>;

/// Imperative effects that cannot be expressed as a toggled class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GlobalEffect {
    /// Relative text scaling of one metric.
    TextScale(TextMetric),
    /// One layer of the root element's `filter`.
    Filter(FilterLayer),
    /// Mute every audio/video element.
    MuteMedia,
    /// Pause every playing audio/video element.
    PauseMedia,
    /// Hover magnifier bound to every text-bearing element.
    TextMagnifier,
    /// Compiled reading view.
    ReadingMode,
    /// Pointer-following bar.
    ReadingGuide,
    /// Pointer-following mask.
    ReadingMask,
    /// Landmark groups and key bindings.
    KeyboardNavigation,
}

/// Everything the dispatcher needs to apply one adjustment.
#[derive(Clone, Copy, Debug)]
pub struct AdjustmentEffect {
    /// Which application paths run.
    pub mode: ApplicationMode,
    /// Stylesheet generator for the class path.
    pub css: Option<CssGenerator>,
    /// Imperative effect for the global path.
    pub global: Option<GlobalEffect>,
}

impl AdjustmentEffect {
    /// Class toggle backed by a generated stylesheet.
    pub const fn class(css: CssGenerator) -> Self {
        Self {
            mode: ApplicationMode::CLASS,
            css: Some(css),
            global: None,
        }
    }

    /// Imperative effect only.
    pub const fn global(effect: GlobalEffect) -> Self {
        Self {
            mode: ApplicationMode::GLOBAL,
            css: None,
            global: Some(effect),
        }
    }

    /// Class toggle (optionally styled) plus an imperative effect.
    pub const fn both(css: Option<CssGenerator>, effect: GlobalEffect) -> Self {
        Self {
            mode: ApplicationMode::CLASS.union(ApplicationMode::GLOBAL),
            css,
            global: Some(effect),
        }
    }
}

/// Enum-indexed table of effects, one per [`Adjustment`].
///
/// [`EffectTable::standard`] is the stock catalog. Hosts can swap individual
/// generators with [`EffectTable::set_css`] or replace an effect outright.
#[derive(Clone, Debug)]
pub struct EffectTable {
    effects: [AdjustmentEffect; Adjustment::COUNT],
}

impl Default for EffectTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl EffectTable {
    /// The stock catalog.
    pub fn standard() -> Self {
        Self {
            effects: core::array::from_fn(|i| standard_effect(Adjustment::ALL[i])),
        }
    }

    /// Effect for `adjustment`.
    pub fn get(&self, adjustment: Adjustment) -> &AdjustmentEffect {
        &self.effects[adjustment.index()]
    }

    /// Replace the effect for `adjustment`.
    pub fn set(&mut self, adjustment: Adjustment, effect: AdjustmentEffect) {
        self.effects[adjustment.index()] = effect;
    }

    /// Replace only the stylesheet generator for `adjustment`.
    pub fn set_css(&mut self, adjustment: Adjustment, css: Option<CssGenerator>) {
        self.effects[adjustment.index()].css = css;
    }
}

fn standard_effect(adjustment: Adjustment) -> AdjustmentEffect {
    use Adjustment as A;
    match adjustment {
        A::FontSize => AdjustmentEffect::global(GlobalEffect::TextScale(TextMetric::FontSize)),
        A::LetterSpacing => {
            AdjustmentEffect::global(GlobalEffect::TextScale(TextMetric::LetterSpacing))
        }
        A::LineHeight => AdjustmentEffect::global(GlobalEffect::TextScale(TextMetric::LineHeight)),
        A::FontChange => AdjustmentEffect::class(font_change_css),
        A::TextAlign => AdjustmentEffect::class(text_align_css),
        A::HighlightTitles => AdjustmentEffect::class(highlight_titles_css),
        A::HighlightLinks => AdjustmentEffect::class(highlight_links_css),
        A::HighlightFocus => AdjustmentEffect::class(highlight_focus_css),
        A::HideImages => AdjustmentEffect::class(hide_images_css),
        A::MuteSounds => AdjustmentEffect::both(None, GlobalEffect::MuteMedia),
        A::StopAnimations => {
            AdjustmentEffect::both(Some(stop_animations_css), GlobalEffect::PauseMedia)
        }
        A::Cursor => AdjustmentEffect::class(cursor_css),
        A::Saturation => AdjustmentEffect::both(
            Some(saturation_css),
            GlobalEffect::Filter(FilterLayer::Saturation),
        ),
        A::Contrast => AdjustmentEffect::global(GlobalEffect::Filter(FilterLayer::Contrast)),
        A::Brightness => AdjustmentEffect::class(brightness_css),
        A::BackgroundColor => AdjustmentEffect::class(background_color_css),
        A::HeadingsColor => AdjustmentEffect::class(headings_color_css),
        A::ContentColor => AdjustmentEffect::class(content_color_css),
        A::TextMagnifier => AdjustmentEffect::global(GlobalEffect::TextMagnifier),
        A::ReadingMode => AdjustmentEffect::both(None, GlobalEffect::ReadingMode),
        A::ReadingGuide => AdjustmentEffect::global(GlobalEffect::ReadingGuide),
        A::ReadingMask => AdjustmentEffect::global(GlobalEffect::ReadingMask),
        A::KeyboardNavigation => AdjustmentEffect::global(GlobalEffect::KeyboardNavigation),
    }
}

// --- stock generators ---

const HEADINGS: &str = ":is(h1, h2, h3, h4, h5, h6)";

fn unsupported(adjustment: Adjustment, param: &Param) -> EffectError {
    EffectError::UnsupportedValue {
        adjustment,
        value: format!("{param}"),
    }
}

/// Pick the entry of `choices` named by a [`Param::Value`].
pub(crate) fn choose<'a>(
    adjustment: Adjustment,
    param: &Param,
    choices: &[(&str, &'a str)],
) -> Result<&'a str, EffectError> {
    param
        .as_value()
        .and_then(|v| choices.iter().find(|(name, _)| *name == v))
        .map(|(_, out)| *out)
        .ok_or_else(|| unsupported(adjustment, param))
}

/// Validate a CSS color parameter.
pub(crate) fn color<'p>(adjustment: Adjustment, param: &'p Param) -> Result<&'p str, EffectError> {
    let malformed = || EffectError::MalformedColor {
        adjustment,
        value: format!("{param}"),
    };
    let value = param.as_value().ok_or_else(malformed)?.trim();
    if is_css_color(value) {
        Ok(value)
    } else {
        Err(malformed())
    }
}

fn is_css_color(value: &str) -> bool {
    if let Some(hex) = value.strip_prefix('#') {
        return matches!(hex.len(), 3 | 4 | 6 | 8) && hex.bytes().all(|b| b.is_ascii_hexdigit());
    }
    for func in ["rgb(", "rgba(", "hsl(", "hsla("] {
        if let Some(rest) = value.strip_prefix(func) {
            let Some(args) = rest.strip_suffix(')') else {
                return false;
            };
            return !args.trim().is_empty()
                && args
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || " ,.%/-+".contains(c));
        }
    }
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_alphabetic())
}

fn font_change_css(adjustment: Adjustment, param: &Param) -> Result<String, EffectError> {
    let family = choose(
        adjustment,
        param,
        &[
            ("readable", "\"Atkinson Hyperlegible\", Verdana, Arial, sans-serif"),
            ("dyslexic", "\"OpenDyslexic\", \"Comic Sans MS\", sans-serif"),
        ],
    )?;
    Ok(format!(
        "body.clym-font-change *:not([data-clym-widget]) {{ font-family: {family} !important; }}"
    ))
}

fn text_align_css(adjustment: Adjustment, param: &Param) -> Result<String, EffectError> {
    let align = choose(
        adjustment,
        param,
        &[
            ("left", "left"),
            ("center", "center"),
            ("right", "right"),
            ("justify", "justify"),
        ],
    )?;
    Ok(format!(
        "body.clym-text-align *:not([data-clym-widget]) {{ text-align: {align} !important; }}"
    ))
}

fn highlight_titles_css(_: Adjustment, _: &Param) -> Result<String, EffectError> {
    Ok(format!(
        "body.clym-highlight-titles {HEADINGS} {{ outline: 2px solid #0b57d0 !important; outline-offset: 2px !important; }}"
    ))
}

fn highlight_links_css(_: Adjustment, _: &Param) -> Result<String, EffectError> {
    Ok(String::from(
        "body.clym-highlight-links a[href] { outline: 2px solid #e37400 !important; outline-offset: 2px !important; text-decoration: underline !important; }",
    ))
}

fn highlight_focus_css(_: Adjustment, _: &Param) -> Result<String, EffectError> {
    Ok(String::from(
        "body.clym-highlight-focus :focus { outline: 3px solid #0b57d0 !important; outline-offset: 3px !important; }",
    ))
}

fn hide_images_css(_: Adjustment, _: &Param) -> Result<String, EffectError> {
    Ok(String::from(
        "body.clym-hide-images :is(img, svg, picture, video, [role=\"img\"]) { visibility: hidden !important; } \
         body.clym-hide-images *:not([data-clym-widget]) { background-image: none !important; }",
    ))
}

fn stop_animations_css(_: Adjustment, _: &Param) -> Result<String, EffectError> {
    Ok(String::from(
        "body.clym-stop-animations *, body.clym-stop-animations *::before, body.clym-stop-animations *::after { \
         animation-play-state: paused !important; transition: none !important; scroll-behavior: auto !important; }",
    ))
}

fn cursor_css(adjustment: Adjustment, param: &Param) -> Result<String, EffectError> {
    let (fill, stroke) = match choose(
        adjustment,
        param,
        &[("big-black", "black"), ("big-white", "white")],
    )? {
        "black" => ("%23000", "%23fff"),
        _ => ("%23fff", "%23000"),
    };
    Ok(format!(
        "body.clym-cursor, body.clym-cursor * {{ cursor: url(\"data:image/svg+xml;utf8,\
         <svg xmlns='http://www.w3.org/2000/svg' width='48' height='48' viewBox='0 0 24 24'>\
         <path d='M4 2l14 11h-7l4 8-3 1-4-8-4 4z' fill='{fill}' stroke='{stroke}' stroke-width='1'/></svg>\") 4 2, auto !important; }}"
    ))
}

fn saturation_css(adjustment: Adjustment, param: &Param) -> Result<String, EffectError> {
    let filter = FilterLayer::Saturation.filter_for(adjustment, param)?;
    // The inline filter on the root, when present, takes precedence.
    Ok(format!("html:has(> body.clym-saturation) {{ filter: {filter}; }}"))
}

fn brightness_css(adjustment: Adjustment, param: &Param) -> Result<String, EffectError> {
    let amount = choose(adjustment, param, &[("low", "0.8"), ("high", "1.2")])?;
    Ok(format!(
        "body.clym-brightness > *:not([data-clym-widget]) {{ filter: brightness({amount}); }}"
    ))
}

fn background_color_css(adjustment: Adjustment, param: &Param) -> Result<String, EffectError> {
    let c = color(adjustment, param)?;
    Ok(format!(
        "body.clym-background-color, body.clym-background-color *:not([data-clym-widget]) {{ background-color: {c} !important; }}"
    ))
}

fn headings_color_css(adjustment: Adjustment, param: &Param) -> Result<String, EffectError> {
    let c = color(adjustment, param)?;
    Ok(format!(
        "body.clym-headings-color {HEADINGS} {{ color: {c} !important; }}"
    ))
}

fn content_color_css(adjustment: Adjustment, param: &Param) -> Result<String, EffectError> {
    let c = color(adjustment, param)?;
    Ok(format!(
        "body.clym-content-color :is(p, li, span, td, th, dd, dt, label, blockquote, figcaption) {{ color: {c} !important; }}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_adjustment_has_a_path() {
        let table = EffectTable::standard();
        for a in Adjustment::ALL {
            let e = table.get(*a);
            assert!(!e.mode.is_empty(), "{a} has no application mode");
            if e.mode.contains(ApplicationMode::GLOBAL) {
                assert!(e.global.is_some(), "{a} is global without an effect");
            }
            if e.css.is_some() {
                assert!(e.mode.contains(ApplicationMode::CLASS), "{a} has css but no class");
            }
        }
    }

    #[test]
    fn stop_animations_pauses() {
        let css = stop_animations_css(Adjustment::StopAnimations, &Param::Flag(true)).unwrap();
        assert!(css.contains("animation-play-state: paused"));
        assert!(css.contains("body.clym-stop-animations"));
    }

    #[test]
    fn saturation_stylesheet_declares_the_filter() {
        let css = saturation_css(Adjustment::Saturation, &Param::from("monochrome")).unwrap();
        assert_eq!(css, "html:has(> body.clym-saturation) { filter: grayscale(1); }");
        assert!(saturation_css(Adjustment::Saturation, &Param::from("neon")).is_err());
    }

    #[test]
    fn colors_are_validated() {
        let a = Adjustment::BackgroundColor;
        let accepted = [
            "#fff",
            "#A0b1C2",
            "#00000080",
            "rgb(1, 2, 3)",
            "hsla(120, 50%, 50%, 0.5)",
            "teal",
        ];
        for ok in accepted {
            assert!(color(a, &Param::from(ok)).is_ok(), "{ok} should be accepted");
        }
        for bad in ["#ggg", "#12", "red; }", "rgb(1,2,3", "url(x)", "rgb()", "12px"] {
            assert!(
                matches!(
                    color(a, &Param::from(bad)),
                    Err(EffectError::MalformedColor { .. })
                ),
                "{bad} should be rejected"
            );
        }
        assert!(color(a, &Param::Flag(true)).is_err());
    }

    #[test]
    fn enumerated_values_reject_unknowns() {
        let err = text_align_css(Adjustment::TextAlign, &Param::from("diagonal")).unwrap_err();
        assert_eq!(
            err,
            EffectError::UnsupportedValue {
                adjustment: Adjustment::TextAlign,
                value: "diagonal".into(),
            }
        );
        let css = text_align_css(Adjustment::TextAlign, &Param::from("center")).unwrap();
        assert!(css.contains("text-align: center"));
    }

    #[test]
    fn overriding_a_generator() {
        fn plain(_: Adjustment, _: &Param) -> Result<String, EffectError> {
            Ok("body { }".into())
        }
        let mut table = EffectTable::standard();
        table.set_css(Adjustment::HideImages, Some(plain));
        let css = (table.get(Adjustment::HideImages).css.unwrap())(
            Adjustment::HideImages,
            &Param::Flag(true),
        )
        .unwrap();
        assert_eq!(css, "body { }");
    }
}
