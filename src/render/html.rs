use log::warn;

use crate::tag::Tag;
use crate::value::{PropValue, Props, CHILDREN_PROP};

use super::Renderer;

/// Renders a build as compact HTML markup.
///
/// - the key attribute and `children` are not emitted as attributes
/// - properties whose name is not a valid attribute name are skipped
/// - callbacks, `false` and `null` attributes are omitted, `true` is a bare attribute
/// - leaf content is escaped text; `true`, `false` and `null` content renders nothing
#[derive(Clone, Debug)]
pub struct HtmlRenderer {
    key_attribute: String,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self {
            key_attribute: "key".to_string(),
        }
    }
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip `name` instead of `key` when writing attributes.
    pub fn key_attribute(mut self, name: impl Into<String>) -> Self {
        self.key_attribute = name.into();
        self
    }
}

impl Renderer for HtmlRenderer {
    type Output = String;

    fn create_element(&mut self, tag: Tag, props: Props, children: Vec<String>) -> String {
        let mut out = String::new();
        out.push('<');
        out.push_str(tag.as_str());

        for (name, value) in &props {
            if *name == self.key_attribute || name == CHILDREN_PROP {
                continue;
            }
            if !is_attribute_name(name) {
                warn!("<{tag}> property {name:?} is not a valid attribute name, skipped");
                continue;
            }
            match value {
                PropValue::Null | PropValue::Bool(false) | PropValue::Callback(_) => {}
                PropValue::Bool(true) => {
                    out.push(' ');
                    out.push_str(name);
                }
                other => {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    push_scalar(&mut out, other);
                    out.push('"');
                }
            }
        }
        out.push('>');

        if children.is_empty() {
            if let Some(content) = props.children() {
                push_scalar(&mut out, content);
            }
        } else {
            for child in &children {
                out.push_str(child);
            }
        }

        out.push_str("</");
        out.push_str(tag.as_str());
        out.push('>');
        out
    }

    fn fragment(&mut self, children: Vec<String>) -> String {
        children.concat()
    }

    fn use_key_attribute(&mut self, name: &str) {
        self.key_attribute = name.to_string();
    }
}

fn is_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().any(|c| {
            c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '>' | '<' | '/' | '=')
        })
}

fn push_scalar(out: &mut String, value: &PropValue) {
    match value {
        PropValue::Text(text) => push_escaped(out, text),
        PropValue::Int(v) => out.push_str(&v.to_string()),
        PropValue::Float(v) => out.push_str(&v.to_string()),
        PropValue::Null | PropValue::Bool(_) | PropValue::Callback(_) => {}
    }
}

fn push_escaped(out: &mut String, text: &str) {
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
}
