use serde_json::json;

use crate::config::{OutputOptions, TransformGroup};
use crate::errors::TokenResult;
use crate::tokens::Dictionary;

pub fn get_template() -> String {
    include_str!("to_typescript.hbs").to_string()
}

pub fn render(
    dictionary: &Dictionary,
    group: TransformGroup,
    _options: &OutputOptions,
) -> TokenResult<String> {
    let tree = super::renderer::token_tree(dictionary, group);
    super::renderer::render_template(&get_template(), &json!({ "tree": tree }))
}
