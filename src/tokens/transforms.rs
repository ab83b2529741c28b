use heck::{ToKebabCase, ToUpperCamelCase};
use serde::Serialize;
use serde_json::Value;

use super::dictionary::{replace_references, Token};
use crate::config::TransformGroup;

/// A token after its platform's name and value transforms.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TransformedToken {
    pub name: String,
    pub value: Value,
    pub path: Vec<String>,
    pub original_value: Value,
    pub comment: Option<String>,
}

impl TransformGroup {
    pub fn name(&self, path: &[String]) -> String {
        let joined = path.join(" ");
        match self {
            TransformGroup::Css | TransformGroup::Scss => joined.to_kebab_case(),
            TransformGroup::Js => joined.to_upper_camel_case(),
        }
    }

    pub fn value(&self, token: &Token) -> Value {
        if !is_color(token) {
            return token.value.clone();
        }
        match parse_hex(&token.value) {
            Some(rgba) => Value::String(match self {
                TransformGroup::Css | TransformGroup::Scss => rgba.to_css(),
                TransformGroup::Js => rgba.to_hex(),
            }),
            None => token.value.clone(),
        }
    }

    pub fn transform(&self, token: &Token) -> TransformedToken {
        TransformedToken {
            name: self.name(&token.path),
            value: self.value(token),
            path: token.path.clone(),
            original_value: token.original_value.clone(),
            comment: token.comment.clone(),
        }
    }
}

/// Category/type/item: colors live under a top-level `color` group.
pub fn is_color(token: &Token) -> bool {
    token.path.first().map(String::as_str) == Some("color")
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Rgba {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl Rgba {
    fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    fn to_css(self) -> String {
        if self.a == 255 {
            self.to_hex()
        } else {
            let alpha = (self.a as f64 / 255.0 * 100.0).round() / 100.0;
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
        }
    }
}

/// Accepts `#rgb`, `#rrggbb` and `#rrggbbaa` in any case.
fn parse_hex(value: &Value) -> Option<Rgba> {
    let digits = value.as_str()?.trim().strip_prefix('#')?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 | 8 => digits.to_string(),
        _ => return None,
    };
    let byte = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    Some(Rgba {
        r: byte(0)?,
        g: byte(2)?,
        b: byte(4)?,
        a: if expanded.len() == 8 { byte(6)? } else { 255 },
    })
}

/// Renders a value as it appears in stylesheet output.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// The original value with references rewritten by `reference`, when the
/// token referenced anything.
pub fn referenced_output(
    token: &Token,
    group: TransformGroup,
    reference: impl Fn(&str) -> String,
) -> Option<String> {
    if token.references().is_empty() {
        return None;
    }
    let original = token.original_value.as_str()?;
    Some(replace_references(original, |path| {
        reference(&group.name(path))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn token(path: &str, value: Value) -> Token {
        Token {
            path: path.split('.').map(str::to_string).collect(),
            value: value.clone(),
            original_value: value,
            comment: None,
        }
    }

    #[test]
    fn names_follow_the_transform_group() {
        let path: Vec<String> = vec!["color".into(), "base".into(), "Light Blue".into()];
        assert_eq!(TransformGroup::Css.name(&path), "color-base-light-blue");
        assert_eq!(TransformGroup::Scss.name(&path), "color-base-light-blue");
        assert_eq!(TransformGroup::Js.name(&path), "ColorBaseLightBlue");
    }

    #[test]
    fn colors_are_normalized() {
        let short = token("color.red", json!("#F00"));
        assert_eq!(TransformGroup::Css.value(&short), json!("#ff0000"));
        assert_eq!(TransformGroup::Js.value(&short), json!("#ff0000"));

        let translucent = token("color.overlay", json!("#00000080"));
        assert_eq!(
            TransformGroup::Css.value(&translucent),
            json!("rgba(0, 0, 0, 0.5)")
        );
        assert_eq!(TransformGroup::Js.value(&translucent), json!("#00000080"));
    }

    #[test]
    fn non_colors_pass_through() {
        let size = token("size.small", json!("#F00"));
        assert_eq!(TransformGroup::Css.value(&size), json!("#F00"));

        let named = token("color.brand", json!("rebeccapurple"));
        assert_eq!(TransformGroup::Css.value(&named), json!("rebeccapurple"));
    }

    #[test]
    fn referenced_output_rewrites_references() {
        let mut link = token("color.link", json!("#0000ff"));
        link.original_value = json!("{color.base.blue.value}");

        let css = referenced_output(&link, TransformGroup::Css, |name| format!("var(--{})", name));
        assert_eq!(css.as_deref(), Some("var(--color-base-blue)"));

        let plain = token("color.base.blue", json!("#0000ff"));
        assert!(referenced_output(&plain, TransformGroup::Css, |name| name.to_string()).is_none());
    }

    #[test]
    fn value_to_string_formats_scalars() {
        assert_eq!(value_to_string(&json!("4px")), "4px");
        assert_eq!(value_to_string(&json!(1.5)), "1.5");
        assert_eq!(value_to_string(&json!(true)), "true");
    }
}
