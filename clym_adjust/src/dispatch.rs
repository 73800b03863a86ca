// Copyright 2026 the Clym Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Routing adjustments to their class and global paths, and events to the
//! components that registered for them.

use clym_dom::{DomEvent, DomPort};

use crate::adjustment::{Adjustment, Param};
use crate::effect::{ApplicationMode, CssGenerator, EffectTable, GlobalEffect};
use crate::error::EffectError;
use crate::filter::FilterStack;
use crate::magnifier::Magnifier;
use crate::media::MediaControl;
use crate::navigator::{FocusRecord, Navigator};
use crate::overlay::{OverlayConfig, ReadingGuide, ReadingMask};
use crate::reading_mode::ReadingView;
use crate::style_registry::StyleRegistry;
use crate::text_scale;

/// What an event meant to the runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EventOutcome {
    /// No registration matched.
    Ignored,
    /// A component consumed the event.
    Handled,
    /// The reading-mode close button was clicked.
    CloseReadingMode,
}

/// Every piece of page-side state one engine owns.
#[derive(Debug)]
pub(crate) struct EffectRuntime<N> {
    styles: StyleRegistry<N>,
    filters: FilterStack,
    media: MediaControl<N>,
    magnifier: Magnifier<N>,
    reading: ReadingView<N>,
    guide: ReadingGuide<N>,
    mask: ReadingMask<N>,
    navigator: Navigator<N>,
}

impl<N: Copy + Eq + core::hash::Hash> EffectRuntime<N> {
    pub(crate) fn new(overlays: &OverlayConfig) -> Self {
        Self {
            styles: StyleRegistry::default(),
            filters: FilterStack::default(),
            media: MediaControl::default(),
            magnifier: Magnifier::default(),
            reading: ReadingView::default(),
            guide: ReadingGuide::default(),
            mask: ReadingMask::new(overlays),
            navigator: Navigator::default(),
        }
    }

    pub(crate) fn install<D: DomPort<Node = N>>(&mut self, dom: &mut D) {
        self.styles.install_base(dom);
    }

    /// Apply `param` to `adjustment` through every path its effect declares.
    pub(crate) fn apply<D: DomPort<Node = N>>(
        &mut self,
        dom: &mut D,
        table: &EffectTable,
        adjustment: Adjustment,
        param: &Param,
    ) -> Result<(), EffectError> {
        let effect = table.get(adjustment);
        log::trace!("apply {adjustment} = {param} ({:?})", effect.mode);
        if effect.mode.contains(ApplicationMode::CLASS) {
            self.apply_body_class_name(dom, adjustment, effect.css, param)?;
        }
        if effect.mode.contains(ApplicationMode::GLOBAL)
            && let Some(global) = effect.global
        {
            self.apply_global_style(dom, global, adjustment, param)?;
        }
        Ok(())
    }

    /// Keep exactly one stylesheet for `(adjustment, param)` and set the body class.
    fn apply_body_class_name<D: DomPort<Node = N>>(
        &mut self,
        dom: &mut D,
        adjustment: Adjustment,
        css: Option<CssGenerator>,
        param: &Param,
    ) -> Result<(), EffectError> {
        let on = param.is_truthy();
        if on {
            if let Some(generate) = css {
                let text = generate(adjustment, param)?;
                self.styles.upsert(dom, adjustment, param, text);
            }
        } else {
            self.styles.remove(dom, adjustment);
        }
        let body = dom.body();
        dom.toggle_class(body, adjustment.class_name(), on);
        Ok(())
    }

    fn apply_global_style<D: DomPort<Node = N>>(
        &mut self,
        dom: &mut D,
        effect: GlobalEffect,
        adjustment: Adjustment,
        param: &Param,
    ) -> Result<(), EffectError> {
        let on = param.is_truthy();
        match effect {
            GlobalEffect::TextScale(metric) => text_scale::apply(dom, metric, adjustment, param)?,
            GlobalEffect::Filter(layer) => self.filters.apply(dom, layer, adjustment, param)?,
            GlobalEffect::MuteMedia if on => self.media.mute(dom),
            GlobalEffect::MuteMedia => self.media.unmute(dom),
            GlobalEffect::PauseMedia if on => self.media.pause(dom),
            GlobalEffect::PauseMedia => self.media.resume(dom),
            GlobalEffect::TextMagnifier if on => self.magnifier.start(dom),
            GlobalEffect::TextMagnifier => self.magnifier.stop(dom),
            GlobalEffect::ReadingMode if on => self.reading.open(dom),
            GlobalEffect::ReadingMode => self.reading.close(dom),
            GlobalEffect::ReadingGuide if on => self.guide.enable(dom),
            GlobalEffect::ReadingGuide => self.guide.disable(dom),
            GlobalEffect::ReadingMask if on => self.mask.enable(dom),
            GlobalEffect::ReadingMask => self.mask.disable(dom),
            GlobalEffect::KeyboardNavigation if on => self.navigator.enable(dom),
            GlobalEffect::KeyboardNavigation => self.navigator.disable(dom),
        }
        Ok(())
    }

    pub(crate) fn handle_event<D: DomPort<Node = N>>(
        &mut self,
        dom: &mut D,
        event: &DomEvent<N>,
    ) -> EventOutcome {
        let handled = match *event {
            DomEvent::PointerMove { position } => {
                let guide = self.guide.on_pointer_move(dom, position);
                let mask = self.mask.on_pointer_move(dom, position);
                guide || mask
            }
            DomEvent::MouseEnter { target, position } => {
                if !self.magnifier.is_active() {
                    return EventOutcome::Ignored;
                }
                self.magnifier.on_enter(dom, target, position);
                true
            }
            DomEvent::MouseLeave { target } => {
                if !self.magnifier.is_active() {
                    return EventOutcome::Ignored;
                }
                self.magnifier.on_leave(dom, target);
                true
            }
            DomEvent::KeyDown { key, target } => self.navigator.on_key(dom, key, target).is_some(),
            DomEvent::FocusOut { target } => {
                let pending = self.navigator.focus_record().is_some_and(|r| r.element == target);
                self.navigator.on_focus_out(dom, target);
                pending
            }
            DomEvent::Click { target } => {
                if self.reading.is_close_button(target) {
                    return EventOutcome::CloseReadingMode;
                }
                false
            }
        };
        if handled {
            EventOutcome::Handled
        } else {
            EventOutcome::Ignored
        }
    }

    pub(crate) fn flush_mutations<D: DomPort<Node = N>>(&mut self, dom: &mut D) -> bool {
        self.magnifier.flush_mutations(dom)
    }

    pub(crate) fn style_id(&self, adjustment: Adjustment) -> Option<&str> {
        self.styles.id_of(adjustment)
    }

    pub(crate) fn focus_record(&self) -> Option<&FocusRecord<N>> {
        self.navigator.focus_record()
    }

    /// Remove every stylesheet, the base one included.
    pub(crate) fn teardown<D: DomPort<Node = N>>(&mut self, dom: &mut D) {
        self.styles.clear(dom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clym_dom::{Document, EventKind, EventTarget};
    use kurbo::Point;

    #[test]
    fn class_path_styles_and_toggles() {
        let mut doc = Document::new();
        let table = EffectTable::standard();
        let mut rt = EffectRuntime::new(&OverlayConfig::default());
        let body = doc.body();

        rt.apply(&mut doc, &table, Adjustment::HideImages, &Param::Flag(true)).unwrap();
        assert!(doc.has_class(body, "clym-hide-images"));
        assert_eq!(rt.style_id(Adjustment::HideImages), Some("style--HIDE_IMAGES"));

        rt.apply(&mut doc, &table, Adjustment::HideImages, &Param::Off).unwrap();
        assert!(!doc.has_class(body, "clym-hide-images"));
        assert_eq!(rt.style_id(Adjustment::HideImages), None);
        assert!(doc.element_by_id("style--HIDE_IMAGES").is_none());
    }

    #[test]
    fn failing_generator_leaves_the_page_alone() {
        let mut doc = Document::new();
        let table = EffectTable::standard();
        let mut rt = EffectRuntime::new(&OverlayConfig::default());
        let err = rt
            .apply(&mut doc, &table, Adjustment::BackgroundColor, &"red; } body {".into())
            .unwrap_err();
        assert!(matches!(err, EffectError::MalformedColor { .. }));
        assert_eq!(doc.attribute(doc.body(), "class"), None);
        assert!(doc.elements_by_tag(doc.head(), "style").is_empty());
    }

    #[test]
    fn both_paths_run_for_saturation() {
        let mut doc = Document::new();
        let table = EffectTable::standard();
        let mut rt = EffectRuntime::new(&OverlayConfig::default());
        rt.apply(&mut doc, &table, Adjustment::Saturation, &"monochrome".into()).unwrap();
        assert!(doc.has_class(doc.body(), "clym-saturation"));
        assert_eq!(
            doc.style_property(doc.document_element(), "filter").as_deref(),
            Some("grayscale(1)")
        );
        assert!(doc.element_by_id("style--SATURATION--monochrome").is_some());
    }

    #[test]
    fn events_reach_only_active_components() {
        let mut doc = Document::new();
        let table = EffectTable::standard();
        let mut rt = EffectRuntime::new(&OverlayConfig::default());
        let move_event = DomEvent::PointerMove {
            position: Point::new(0.0, 50.0),
        };
        assert_eq!(rt.handle_event(&mut doc, &move_event), EventOutcome::Ignored);

        rt.apply(&mut doc, &table, Adjustment::ReadingGuide, &Param::Flag(true)).unwrap();
        assert_eq!(rt.handle_event(&mut doc, &move_event), EventOutcome::Handled);

        rt.apply(&mut doc, &table, Adjustment::ReadingMode, &Param::Flag(true)).unwrap();
        let close = doc
            .listeners()
            .iter()
            .find_map(|l| match (l.target, l.kind) {
                (EventTarget::Node(n), EventKind::Click) => Some(n),
                _ => None,
            })
            .unwrap();
        assert_eq!(
            rt.handle_event(&mut doc, &DomEvent::Click { target: close }),
            EventOutcome::CloseReadingMode
        );
        let body = doc.body();
        assert_eq!(
            rt.handle_event(&mut doc, &DomEvent::Click { target: body }),
            EventOutcome::Ignored
        );
    }
}
