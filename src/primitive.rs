use icu_collator::{Collator, CollatorOptions, Strength};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::color::rgb_to_hex;
use crate::common::write_string_to_file;
use crate::errors::{FigmaError, FigmaResult};
use crate::figma::types::{NodeDocument, NodesResponse};
use crate::figma::{FigmaClient, Transport};

pub const DEFAULT_OUTPUT: &str = "tokens/color/primitive.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ColorToken {
    pub value: String,
}

/// `{ "color": { "<name>": { "value": "#rrggbb" } } }`, keys in sorted order.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PrimitiveColors {
    pub color: IndexMap<String, ColorToken>,
}

/// Root-locale collator at tertiary strength, the ordering a browser's
/// `localeCompare` applies to style names.
pub fn name_collator() -> FigmaResult<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Tertiary);
    Collator::try_new(&Default::default(), options)
        .map_err(|e| FigmaError::Collation(e.to_string()))
}

/// Turns fetched style nodes into primitive color tokens.
///
/// Later documents in sort order overwrite earlier ones with the same name.
pub fn assemble_primitive_colors(nodes: NodesResponse) -> FigmaResult<PrimitiveColors> {
    let mut documents: Vec<NodeDocument> = nodes
        .nodes
        .into_values()
        .map(|entry| entry.document)
        .collect();
    let collator = name_collator()?;
    documents.sort_by(|a, b| collator.compare(&a.name, &b.name));

    let mut colors = PrimitiveColors::default();
    for document in documents {
        let paint = document
            .first_fill()
            .ok_or_else(|| FigmaError::MissingFill(document.name.clone()))?;
        let hex = rgb_to_hex(paint.color.r, paint.color.g, paint.color.b);
        debug!("{} ({}) -> {}", document.name, document.id, hex);
        colors.color.insert(document.name, ColorToken { value: hex });
    }
    Ok(colors)
}

/// Fetches color styles from Figma and writes them as a token source file.
///
/// Nothing is written unless both requests succeed.
pub async fn generate_primitive_colors<T: Transport>(
    client: &FigmaClient<T>,
    output: &Path,
) -> FigmaResult<PrimitiveColors> {
    let styles = client.fetch_styles().await?;
    let node_ids = styles.node_ids();
    info!("Found {} styles", node_ids.len());

    let nodes = client.fetch_nodes(&node_ids).await?;
    let colors = assemble_primitive_colors(nodes)?;

    let content = serde_json::to_string(&colors)?;
    info!("{}", content);

    write_string_to_file(output, &content)?;
    info!("DONE");
    Ok(colors)
}
