pub mod to_css;
pub mod to_javascript;
pub mod to_scss;
pub mod to_typescript;

use crate::config::{FormatType, OutputOptions, TransformGroup};
use crate::errors::TokenResult;
use crate::tokens::Dictionary;

/// Renders one output file of a platform.
pub fn render(
    format: FormatType,
    dictionary: &Dictionary,
    group: TransformGroup,
    options: &OutputOptions,
) -> TokenResult<String> {
    match format {
        FormatType::CssVariables => to_css::render(dictionary, group, options),
        FormatType::ScssVariables => to_scss::render(dictionary, group, options),
        FormatType::JavascriptModule => to_javascript::render(dictionary, group, options),
        FormatType::TypescriptModuleDeclarations => {
            to_typescript::render(dictionary, group, options)
        }
    }
}

/// Common rendering function used by all formats
pub mod renderer {
    use serde_json::{json, Map, Value};

    use crate::config::{OutputOptions, TransformGroup};
    use crate::errors::TokenResult;
    use crate::tokens::transforms::{referenced_output, value_to_string};
    use crate::tokens::Dictionary;

    pub fn render_template(template: &str, context: &Value) -> TokenResult<String> {
        let handlebars = crate::common::get_handlebars();
        Ok(handlebars.render_template(template, context)?)
    }

    /// One entry per token for the flat variable formats.
    ///
    /// `output` is what goes right of the colon: the transformed value, or the
    /// original value with references rewritten by `reference` when the file
    /// asks for `output_references`.
    pub fn flat_tokens(
        dictionary: &Dictionary,
        group: TransformGroup,
        options: &OutputOptions,
        reference: impl Fn(&str) -> String,
    ) -> Vec<Value> {
        dictionary
            .tokens
            .iter()
            .map(|token| {
                let transformed = group.transform(token);
                let output = options
                    .output_references
                    .then(|| referenced_output(token, group, &reference))
                    .flatten()
                    .unwrap_or_else(|| value_to_string(&transformed.value));
                json!({
                    "name": transformed.name,
                    "output": output,
                    "comment": transformed.comment,
                })
            })
            .collect()
    }

    fn insert_at(tree: &mut Map<String, Value>, path: &[String], leaf: Value) {
        let Some((last, parents)) = path.split_last() else {
            return;
        };
        let mut node = tree;
        for segment in parents {
            let entry = node
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            node = match entry {
                Value::Object(map) => map,
                _ => return,
            };
        }
        node.insert(last.clone(), leaf);
    }

    /// Nested object of transformed tokens for the module formats.
    pub fn token_tree(dictionary: &Dictionary, group: TransformGroup) -> Value {
        let mut tree = Map::new();
        for token in &dictionary.tokens {
            let transformed = group.transform(token);
            let mut leaf = json!({
                "value": transformed.value,
                "name": transformed.name,
                "original": { "value": transformed.original_value },
                "path": transformed.path,
            });
            if let (Some(comment), Value::Object(map)) = (&transformed.comment, &mut leaf) {
                map.insert("comment".to_string(), Value::String(comment.clone()));
            }
            insert_at(&mut tree, &token.path, leaf);
        }
        Value::Object(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn token_tree_nests_by_path() {
        let dictionary = Dictionary::from_tree(json!({
            "color": {
                "base": { "red": { "value": "#FF0000", "comment": "Alert" } },
                "danger": { "value": "{color.base.red}" }
            }
        }))
        .unwrap();

        let tree = renderer::token_tree(&dictionary, TransformGroup::Js);
        assert_eq!(
            tree["color"]["base"]["red"],
            json!({
                "value": "#ff0000",
                "name": "ColorBaseRed",
                "original": { "value": "#FF0000" },
                "path": ["color", "base", "red"],
                "comment": "Alert"
            })
        );
        assert_eq!(tree["color"]["danger"]["original"]["value"], json!("{color.base.red}"));
        assert_eq!(tree["color"]["danger"]["value"], json!("#ff0000"));
    }
}
