//! Minimal HTML helpers shared by the static adapter and renderers.

use std::fmt::Write;

use crate::item::Attributes;

/// Escape text for use in HTML content and attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render attributes as ` name="value"` pairs in insertion order.
///
/// The `method` hint becomes `data-method` plus `rel="nofollow"`, which is
/// how unobtrusive scripts pick up non-GET links. An explicit `rel` absorbs
/// `nofollow` so the attribute is written once.
pub(crate) fn render_attributes(attributes: &Attributes) -> String {
    let has_method = attributes.contains_key("method");
    let mut out = String::new();
    for (name, value) in attributes {
        match name.as_str() {
            "method" => {
                let _ = write!(out, r#" data-method="{}""#, escape_html(value));
                if !attributes.contains_key("rel") {
                    out.push_str(r#" rel="nofollow""#);
                }
            }
            "rel" if has_method => {
                let _ = write!(out, r#" rel="{}""#, escape_html(&with_nofollow(value)));
            }
            _ => {
                let _ = write!(out, r#" {}="{}""#, escape_html(name), escape_html(value));
            }
        }
    }
    out
}

fn with_nofollow(rel: &str) -> String {
    let mut values: Vec<&str> = Vec::new();
    for value in rel.split_whitespace().chain(["nofollow"]) {
        if !values.contains(&value) {
            values.push(value);
        }
    }
    values.join(" ")
}
