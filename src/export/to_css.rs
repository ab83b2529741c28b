use serde_json::json;

use crate::config::{OutputOptions, TransformGroup};
use crate::errors::TokenResult;
use crate::tokens::Dictionary;

pub fn get_template() -> String {
    include_str!("to_css.hbs").to_string()
}

pub fn render(
    dictionary: &Dictionary,
    group: TransformGroup,
    options: &OutputOptions,
) -> TokenResult<String> {
    let tokens = super::renderer::flat_tokens(dictionary, group, options, |name| {
        format!("var(--{})", name)
    });
    super::renderer::render_template(&get_template(), &json!({ "tokens": tokens }))
}
