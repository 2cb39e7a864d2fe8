//! services/web/src/web/page.rs
//!
//! Server-side rendering of the single form page.

use property_writer_core::{
    FieldKind, FieldSpec, PropertyAttributes, WriterSession, FORM_FIELDS,
};
use std::fmt::Write as _;

/// Everything the page shows, copied out of a session so rendering happens
/// without holding the session lock.
#[derive(Debug, Clone)]
pub struct PageView {
    pub attributes: PropertyAttributes,
    pub description: String,
    pub has_credential: bool,
    pub can_generate: bool,
    pub can_regenerate: bool,
    pub busy: bool,
    pub error: Option<String>,
}

impl PageView {
    pub fn from_session(session: &WriterSession) -> Self {
        Self {
            attributes: session.attributes.clone(),
            description: session.description().to_string(),
            has_credential: session.has_credential(),
            can_generate: session.can_generate(),
            can_regenerate: session.can_regenerate(),
            busy: session.is_busy(),
            error: session.last_error().map(ToString::to_string),
        }
    }
}

/// Escapes text for use in HTML element content and double-quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

fn disabled(enabled: bool) -> &'static str {
    if enabled {
        ""
    } else {
        " disabled"
    }
}

pub fn render_page(view: &PageView) -> String {
    let mut html = String::new();
    html.push_str(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>AI Property Description Writer</title>
<style>
body {
  font-family: system-ui, sans-serif; margin: 0; background: #f4f4f8; color: #222;
}
header, footer { padding: 16px 32px; }
main { display: grid; grid-template-columns: 1fr 1fr; gap: 24px; padding: 0 32px; }
section { background: #fff; border-radius: 10px; padding: 20px; }
label { display: block; margin-top: 12px; font-weight: 600; }
input, select, textarea { width: 100%; box-sizing: border-box; padding: 8px; margin-top: 4px; }
button, a.button {
  display: inline-block; padding: 10px 16px; margin-top: 12px; border: none;
  border-radius: 8px; background: #667eea; color: #fff; font: inherit;
  font-weight: bold; text-decoration: none;
}
button[disabled] { background: #bbb; }
.error { background: #fdecea; border-left: 4px solid #e53935; padding: 12px; margin: 12px 32px; }
.notice { background: #fff3cd; border-left: 4px solid #ffc107; padding: 12px; margin: 12px 32px; }
.actions { display: flex; gap: 8px; }
.empty { text-align: center; color: #999; padding: 50px; }
</style>
</head>
<body>
<header>
<h1>AI Land Property Description Writer</h1>
<p>Generate professional land property descriptions instantly using AI</p>
"#,
    );

    render_settings(&mut html, view.has_credential);
    html.push_str("</header>\n");

    if !view.has_credential {
        html.push_str(
            "<div class=\"notice\"><strong>API Key Required.</strong> \
             Enter your API key above to get started.</div>\n",
        );
    }
    if let Some(error) = &view.error {
        let _ = write!(
            html,
            "<div class=\"error\" role=\"alert\">{}\
             <form method=\"post\" action=\"/error/dismiss\">\
             <button type=\"submit\">Dismiss</button></form></div>\n",
            escape_html(error)
        );
    }

    html.push_str("<main>\n");
    render_property_form(&mut html, view);
    render_description(&mut html, view);
    html.push_str(
        "</main>\n<footer><p>Your API key is kept in memory for this browser session only.\
         </p></footer>\n</body>\n</html>\n",
    );
    html
}

fn render_settings(html: &mut String, has_credential: bool) {
    let status = if has_credential {
        "An API key is set for this session."
    } else {
        "No API key set."
    };
    let _ = write!(
        html,
        "<form method=\"post\" action=\"/settings\">\
         <label for=\"api_key\">API Key</label>\
         <input id=\"api_key\" name=\"api_key\" type=\"password\" autocomplete=\"off\">\
         <small>{status}</small>\
         <button type=\"submit\">Save key</button></form>\n"
    );
}

fn render_property_form(html: &mut String, view: &PageView) {
    html.push_str(
        "<section>\n<h2>Property Details</h2>\n<form method=\"post\" action=\"/generate\">\n",
    );
    for field in FORM_FIELDS {
        render_field(html, field, view.attributes.value(field.id));
    }
    let _ = write!(
        html,
        "<div class=\"actions\">\
         <button type=\"submit\" name=\"action\" value=\"generate\"{}>\
         Generate Description</button>\
         <button type=\"submit\" name=\"action\" value=\"regenerate\"{}>\
         Regenerate</button>\
         </div>\n</form>\n</section>\n",
        disabled(view.can_generate),
        disabled(view.can_regenerate),
    );
}

fn render_field(html: &mut String, field: &FieldSpec, value: &str) {
    let marker = if field.required { " *" } else { "" };
    let _ = write!(
        html,
        "<label for=\"{key}\">{label}{marker}</label>\n",
        key = field.key,
        label = escape_html(field.label),
    );
    match field.kind {
        FieldKind::Choice(options) => {
            let _ = write!(html, "<select id=\"{key}\" name=\"{key}\">", key = field.key);
            for option in options {
                let selected = if *option == value { " selected" } else { "" };
                let _ = write!(
                    html,
                    "<option value=\"{o}\"{selected}>{o}</option>",
                    o = escape_html(option)
                );
            }
            html.push_str("</select>\n");
        }
        FieldKind::Text => {
            let _ = write!(
                html,
                "<input id=\"{key}\" name=\"{key}\" type=\"text\" \
                 placeholder=\"{placeholder}\" value=\"{value}\"{required}>\n",
                key = field.key,
                placeholder = escape_html(field.placeholder),
                value = escape_html(value),
                required = if field.required { " required" } else { "" },
            );
        }
        FieldKind::LongText => {
            let _ = write!(
                html,
                "<textarea id=\"{key}\" name=\"{key}\" rows=\"4\" \
                 placeholder=\"{placeholder}\">{value}</textarea>\n",
                key = field.key,
                placeholder = escape_html(field.placeholder),
                value = escape_html(value),
            );
        }
    }
}

fn render_description(html: &mut String, view: &PageView) {
    html.push_str("<section>\n<h2>Generated Description</h2>\n");
    if view.busy {
        html.push_str("<p>Generating description...</p>\n");
    }
    if view.description.is_empty() {
        html.push_str(
            "<div class=\"empty\"><h3>No Description Yet</h3>\
             <p>Fill in the property details and click \"Generate Description\" \
             to create your listing</p></div>\n",
        );
    } else {
        html.push_str(
            "<div class=\"actions\">\
             <a class=\"button\" href=\"/description/copy\" target=\"_blank\">\
             Open text to copy</a>\
             <a class=\"button\" href=\"/description/download\">Download</a>\
             <form method=\"post\" action=\"/description/clear\">\
             <button type=\"submit\">Clear</button></form>\
             </div>\n",
        );
        // A newline right after <textarea> is swallowed by the HTML parser, so one
        // is always emitted to keep leading newlines in the text intact.
        let _ = write!(
            html,
            "<form method=\"post\" action=\"/description\">\
             <label for=\"description\">Edit Description (if needed)</label>\
             <textarea id=\"description\" name=\"description\" rows=\"16\">\n{}</textarea>\
             <button type=\"submit\">Save edits</button></form>\n",
            escape_html(&view.description)
        );
    }
    html.push_str("</section>\n");
}
