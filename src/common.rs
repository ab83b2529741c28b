use handlebars::{handlebars_helper, Handlebars};
use serde_json::Value;
use tracing::info;

use std::fs::File;
use std::io::Write;
use std::path::Path;

pub fn create_path_if_not_exists(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating path: {:?}", parent);
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

pub fn write_string_to_file(path: &Path, content: &str) -> std::io::Result<()> {
    create_path_if_not_exists(path)?;
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// Renders the TypeScript type of a token tree node.
///
/// Objects carrying a `value` are tokens; everything else is a group.
fn render_ts_type(node: &Value, depth: usize) -> String {
    match node {
        Value::Object(map) if map.contains_key("value") => "DesignToken".to_string(),
        Value::Object(map) => {
            let indent = "  ".repeat(depth + 1);
            let mut result = String::from("{\n");
            for (key, child) in map {
                result += &format!(
                    "{}{}: {};\n",
                    indent,
                    serde_json::to_string(key).unwrap_or_default(),
                    render_ts_type(child, depth + 1)
                );
            }
            result += &format!("{}}}", "  ".repeat(depth));
            result
        }
        _ => "unknown".to_string(),
    }
}

pub fn get_handlebars() -> Handlebars<'static> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars_helper!(exists: |v: Value| {
        match v {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            _ => true,
        }
    });
    handlebars.register_helper("exists", Box::new(exists));

    handlebars_helper!(json: |v: Value| serde_json::to_string_pretty(&v).unwrap_or_default());
    handlebars.register_helper("json", Box::new(json));

    handlebars_helper!(ts_type: |tree: Value| render_ts_type(&tree, 0));
    handlebars.register_helper("ts_type", Box::new(ts_type));

    handlebars
}
