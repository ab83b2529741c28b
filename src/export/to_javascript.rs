use serde_json::json;

use crate::config::{OutputOptions, TransformGroup};
use crate::errors::TokenResult;
use crate::tokens::Dictionary;

pub fn get_template() -> String {
    include_str!("to_javascript.hbs").to_string()
}

pub fn render(
    dictionary: &Dictionary,
    group: TransformGroup,
    _options: &OutputOptions,
) -> TokenResult<String> {
    let tree = super::renderer::token_tree(dictionary, group);
    super::renderer::render_template(&get_template(), &json!({ "tree": tree }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_module_exports() {
        let dictionary = Dictionary::from_tree(json!({
            "color": { "Blue": { "value": "#0000ff" } }
        }))
        .unwrap();

        let output = render(&dictionary, TransformGroup::Js, &OutputOptions::default()).unwrap();
        assert!(output.contains("module.exports = {\n"));
        assert!(output.contains("\"name\": \"ColorBlue\""));
        assert!(output.trim_end().ends_with("};"));

        let body = output
            .split_once("module.exports = ")
            .map(|(_, rest)| rest.trim_end().trim_end_matches(';'))
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(parsed["color"]["Blue"]["value"], json!("#0000ff"));
    }
}
