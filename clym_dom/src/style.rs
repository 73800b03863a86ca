// Copyright 2026 the Clym Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parsing and serialization of the `style` and `class` attributes.
//!
//! These helpers back the default inline-style and class-list methods of
//! [`DomPort`](crate::DomPort), so a port only has to expose raw attributes.

use alloc::string::String;
use smallvec::SmallVec;

/// Inline declarations in source order.
pub type Declarations = SmallVec<[(String, String); 4]>;

/// Parse a `style` attribute into `(property, value)` pairs.
///
/// Properties are lowercased; empty or malformed declarations are skipped.
/// A later declaration of the same property replaces an earlier one in place.
pub fn parse_declarations(text: &str) -> Declarations {
    let mut out = Declarations::new();
    for decl in text.split(';') {
        let Some((prop, value)) = decl.split_once(':') else {
            continue;
        };
        let prop = prop.trim().to_ascii_lowercase();
        let value = value.trim();
        if prop.is_empty() || value.is_empty() {
            continue;
        }
        upsert(&mut out, &prop, value);
    }
    out
}

/// Serialize declarations back into `style` attribute text.
pub fn serialize_declarations(decls: &Declarations) -> String {
    let mut out = String::new();
    for (i, (prop, value)) in decls.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(prop);
        out.push_str(": ");
        out.push_str(value);
        out.push(';');
    }
    out
}

/// Look up a property.
pub fn get<'a>(decls: &'a Declarations, prop: &str) -> Option<&'a str> {
    decls
        .iter()
        .find(|(p, _)| p.eq_ignore_ascii_case(prop))
        .map(|(_, v)| v.as_str())
}

/// Insert or replace a property, keeping its original position.
pub fn upsert(decls: &mut Declarations, prop: &str, value: &str) {
    if let Some(slot) = decls.iter_mut().find(|(p, _)| p.eq_ignore_ascii_case(prop)) {
        slot.1 = value.into();
    } else {
        decls.push((prop.to_ascii_lowercase(), value.into()));
    }
}

/// Remove a property; returns whether it was present.
pub fn remove(decls: &mut Declarations, prop: &str) -> bool {
    let before = decls.len();
    decls.retain(|(p, _)| !p.eq_ignore_ascii_case(prop));
    before != decls.len()
}

/// Whether a whitespace-separated class list contains `class`.
pub fn class_list_contains(list: &str, class: &str) -> bool {
    list.split_ascii_whitespace().any(|c| c == class)
}

/// Return `list` with `class` appended, or `None` if it is already present.
pub fn class_list_add(list: &str, class: &str) -> Option<String> {
    if class_list_contains(list, class) {
        return None;
    }
    let mut out = String::from(list.trim());
    if !out.is_empty() {
        out.push(' ');
    }
    out.push_str(class);
    Some(out)
}

/// Return `list` without `class`, or `None` if it was absent.
pub fn class_list_remove(list: &str, class: &str) -> Option<String> {
    if !class_list_contains(list, class) {
        return None;
    }
    let mut out = String::new();
    for c in list.split_ascii_whitespace().filter(|c| *c != class) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(c);
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_skips_garbage_and_dedupes() {
        let decls = parse_declarations("color: red; ; bogus; FONT-SIZE:12px; color: blue");
        assert_eq!(decls.len(), 2);
        assert_eq!(get(&decls, "color"), Some("blue"));
        assert_eq!(get(&decls, "font-size"), Some("12px"));
        assert_eq!(serialize_declarations(&decls), "color: blue; font-size: 12px;");
    }

    #[test]
    fn upsert_keeps_position() {
        let mut decls = parse_declarations("a: 1; b: 2");
        upsert(&mut decls, "a", "3");
        assert_eq!(serialize_declarations(&decls), "a: 3; b: 2;");
        assert!(remove(&mut decls, "a"));
        assert!(!remove(&mut decls, "a"));
        assert_eq!(serialize_declarations(&decls), "b: 2;");
    }

    #[test]
    fn class_list_edits() {
        assert_eq!(class_list_add("", "x").as_deref(), Some("x"));
        assert_eq!(class_list_add("a b", "x").as_deref(), Some("a b x"));
        assert_eq!(class_list_add("a x", "x"), None);
        assert_eq!(class_list_remove("a x b", "x").as_deref(), Some("a b"));
        assert_eq!(class_list_remove("a b", "x"), None);
        // Substrings are not matches.
        assert!(!class_list_contains("xy", "x"));
    }
}
