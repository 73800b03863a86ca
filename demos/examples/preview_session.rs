// Copyright 2026 the Clym Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A preview session: a host drives one engine over an in-memory page.
//!
//! The host:
//! - builds a page in `clym_dom::Document`,
//! - selects a profile and tweaks single adjustments,
//! - forwards pointer and key events, and flushes DOM mutations,
//! - snapshots the engine state as JSON, the way a settings store would.
//!
//! Run:
//! - `cargo run -p clym_demos --example preview_session`

use clym_adjust::{Action, Adjustment, Engine, EngineConfig, GUIDE_CLASS, TOOLTIP_CLASS};
use clym_dom::{Document, DomEvent, DomPort, NodeId};
use kurbo::Point;

fn page() -> (Document, NodeId) {
    let mut doc = Document::new();
    let body = doc.body();
    for (tag, text, size) in [
        ("h1", "Quarterly report", "32px"),
        ("p", "Revenue grew in every region.", "16px"),
        ("h2", "Outlook", "24px"),
        ("p", "We expect the trend to continue.", "16px"),
    ] {
        let node = doc.append_element(body, tag);
        doc.append_text(node, text);
        doc.set_computed_style(node, "font-size", size);
    }
    let lead = doc.elements_by_tag(body, "p")[0];
    (doc, lead)
}

fn main() {
    // Engine diagnostics go through `log`; the subscriber bridges them.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let (doc, lead) = page();
    let mut engine =
        Engine::new(doc, EngineConfig::default()).expect("stock configuration is valid");
    engine.set_change_listener(|state| {
        let mut active: Vec<_> = state.adjustments.keys().map(|a| a.as_str()).collect();
        active.sort_unstable();
        println!("state: profile={:?} active={active:?}", state.profile);
    });

    println!("== Profile ==");
    engine.set_profile("VISION_IMPAIRED").expect("profile applies");
    println!(
        "lead paragraph font-size: {:?}",
        engine.dom().style_property(lead, "font-size")
    );

    println!("\n== Host action ==");
    let action: Action = serde_json::from_str(
        r#"{"actionType":"ADJUSTMENT","payload":{"adjustment":"READING_GUIDE","params":true}}"#,
    )
    .expect("well-formed action");
    engine.trigger_change(action).expect("guide applies");
    engine.handle_event(DomEvent::PointerMove {
        position: Point::new(40.0, 180.0),
    });
    let guide = engine.dom().elements_with_class(GUIDE_CLASS)[0];
    println!("guide top: {:?}", engine.dom().style_property(guide, "top"));

    println!("\n== Magnifier ==");
    engine.set(Adjustment::TextMagnifier, true).expect("magnifier applies");
    let body = engine.dom().body();
    let late = engine.dom_mut().append_element(body, "p");
    engine.dom_mut().append_text(late, "Footnote added by the page");
    println!("rescanned after mutation: {}", engine.flush_mutations());
    engine.handle_event(DomEvent::MouseEnter {
        target: late,
        position: Point::new(12.0, 400.0),
    });
    for tip in engine.dom().elements_with_class(TOOLTIP_CLASS) {
        println!("tooltip: {:?}", engine.dom().text_content(tip));
    }

    println!("\n== Keyboard navigation ==");
    engine.set_adjustment("KEYBOARD_NAVIGATION", true).expect("navigation applies");
    for key in ['H', 'H', 'H'] {
        engine.handle_event(DomEvent::KeyDown { key, target: None });
        let focused = engine.dom().active_element();
        let text = focused.map(|n| engine.dom().text_content(n)).unwrap_or_default();
        println!("{key} -> {text:?}");
    }

    println!("\n== Snapshot ==");
    let json = serde_json::to_string_pretty(engine.get_state()).expect("state serializes");
    println!("{json}");

    let doc = engine.destroy();
    println!(
        "\nafter destroy: {} style elements, {} listeners",
        doc.elements_by_tag(doc.head(), "style").len(),
        doc.listeners().len()
    );
}
