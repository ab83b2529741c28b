//! Response shapes of the Figma REST API.
//!
//! These only declare the fields the tool reads; everything else in the
//! upstream payload is ignored by serde.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// `GET /v1/files/:key/styles`
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct StylesResponse {
    pub meta: StylesMeta,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct StylesMeta {
    pub styles: Vec<StyleEntry>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct StyleEntry {
    pub node_id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// `GET /v1/files/:key/nodes?ids=...`
///
/// Keeps the response's key order so equal names sort stably.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct NodesResponse {
    pub nodes: IndexMap<String, NodeEntry>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NodeEntry {
    pub document: NodeDocument,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NodeDocument {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub fills: Vec<Paint>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy)]
pub struct Paint {
    pub color: Color,
}

/// Normalized channels in `[0, 1]`.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    // Present upstream; primitive tokens are opaque so it is never written.
    #[serde(default)]
    pub a: Option<f64>,
}

impl StylesResponse {
    pub fn node_ids(&self) -> Vec<String> {
        self.meta
            .styles
            .iter()
            .map(|style| style.node_id.clone())
            .collect()
    }
}

impl NodeDocument {
    pub fn first_fill(&self) -> Option<&Paint> {
        self.fills.first()
    }
}
