//! Loads token source files into a single tree and resolves references.
//!
//! A token is any object carrying a `value` key; its path is the chain of
//! keys leading to it. String values may reference other tokens with
//! `{color.base.red}` (a trailing `.value` is accepted).

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::errors::{TokenError, TokenResult};

static REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^{}]+)\}").expect("reference pattern is valid"));

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub path: Vec<String>,
    pub value: Value,
    pub original_value: Value,
    pub comment: Option<String>,
}

impl Token {
    pub fn key(&self) -> String {
        self.path.join(".")
    }

    /// Paths referenced by the original value, in order of appearance.
    pub fn references(&self) -> Vec<Vec<String>> {
        match &self.original_value {
            Value::String(s) => REFERENCE
                .captures_iter(s)
                .map(|caps| reference_path(&caps[1]))
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    pub tree: Value,
    pub tokens: Vec<Token>,
}

/// `color.base.red.value` and `color.base.red` name the same token.
pub fn reference_path(reference: &str) -> Vec<String> {
    let mut path: Vec<String> = reference
        .trim()
        .split('.')
        .map(|segment| segment.to_string())
        .collect();
    if path.len() > 1 && path.last().map(String::as_str) == Some("value") {
        path.pop();
    }
    path
}

/// Replaces every reference in `s` with `replace(path)`.
pub fn replace_references(s: &str, replace: impl Fn(&[String]) -> String) -> String {
    REFERENCE
        .replace_all(s, |caps: &regex::Captures| replace(reference_path(&caps[1]).as_slice()))
        .into_owned()
}

/// Expands the source globs relative to `base_dir`, sorted and deduplicated.
pub fn find_sources(patterns: &[String], base_dir: &Path) -> TokenResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let full_pattern = base_dir.join(pattern);
        let full_pattern = full_pattern.to_string_lossy();
        let mut matched = 0;
        for entry in glob::glob(&full_pattern)? {
            match entry {
                Ok(path) if path.is_file() => {
                    files.push(path);
                    matched += 1;
                }
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable source: {}", e),
            }
        }
        if matched == 0 {
            warn!("Source pattern {} matched no files", pattern);
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Merges `source` into `target`. Colliding leaves take the value from `source`.
pub fn deep_merge(
    target: &mut Map<String, Value>,
    source: Map<String, Value>,
    path: &mut Vec<String>,
) {
    let is_group = |value: Option<&Value>| {
        matches!(value, Some(Value::Object(map)) if !map.contains_key("value"))
    };

    for (key, value) in source {
        path.push(key.clone());
        if is_group(target.get(&key)) && is_group(Some(&value)) {
            if let (Some(Value::Object(existing)), Value::Object(incoming)) =
                (target.get_mut(&key), value)
            {
                deep_merge(existing, incoming, path);
            }
        } else {
            if target.contains_key(&key) {
                warn!(
                    "Token collision at {}, keeping the later definition",
                    path.join(".")
                );
            }
            target.insert(key, value);
        }
        path.pop();
    }
}

pub fn load_tree(files: &[PathBuf]) -> TokenResult<Value> {
    let mut tree = Map::new();
    for file in files {
        debug!("Loading token file {}", file.display());
        let content = std::fs::read_to_string(file)?;
        let parsed: Value = serde_json::from_str(&content).map_err(|source| TokenError::Json {
            path: file.clone(),
            source,
        })?;
        match parsed {
            Value::Object(map) => deep_merge(&mut tree, map, &mut Vec::new()),
            _ => return Err(TokenError::NotAnObject(file.clone())),
        }
    }
    Ok(Value::Object(tree))
}

fn flatten_into(node: &Map<String, Value>, path: &mut Vec<String>, tokens: &mut Vec<Token>) {
    for (key, child) in node {
        if let Value::Object(map) = child {
            path.push(key.clone());
            if let Some(value) = map.get("value") {
                tokens.push(Token {
                    path: path.clone(),
                    value: value.clone(),
                    original_value: value.clone(),
                    comment: map
                        .get("comment")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                });
            } else {
                flatten_into(map, path, tokens);
            }
            path.pop();
        }
    }
}

/// Collects tokens in source order, values still unresolved.
pub fn flatten(tree: &Value) -> Vec<Token> {
    let mut tokens = Vec::new();
    if let Value::Object(map) = tree {
        flatten_into(map, &mut Vec::new(), &mut tokens);
    }
    tokens
}

struct Resolver<'a> {
    tokens: &'a [Token],
    index: HashMap<String, usize>,
    resolved: Vec<Option<Value>>,
    stack: Vec<usize>,
}

impl<'a> Resolver<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        let index = tokens
            .iter()
            .enumerate()
            .map(|(i, token)| (token.key(), i))
            .collect();
        Self {
            tokens,
            index,
            resolved: vec![None; tokens.len()],
            stack: Vec::new(),
        }
    }

    fn resolve_token(&mut self, i: usize) -> TokenResult<Value> {
        if let Some(value) = &self.resolved[i] {
            return Ok(value.clone());
        }
        if let Some(start) = self.stack.iter().position(|&j| j == i) {
            let mut chain: Vec<String> = self.stack[start..]
                .iter()
                .map(|&j| self.tokens[j].key())
                .collect();
            chain.push(self.tokens[i].key());
            return Err(TokenError::CircularReference(chain.join(" -> ")));
        }

        self.stack.push(i);
        let tokens = self.tokens;
        let value = self.resolve_value(&tokens[i].original_value, i)?;
        self.stack.pop();

        self.resolved[i] = Some(value.clone());
        Ok(value)
    }

    fn lookup(&mut self, reference: &str, owner: usize) -> TokenResult<Value> {
        let key = reference_path(reference).join(".");
        match self.index.get(&key) {
            Some(&target) => self.resolve_token(target),
            None => Err(TokenError::UnknownReference {
                token: self.tokens[owner].key(),
                reference: key,
            }),
        }
    }

    fn resolve_value(&mut self, value: &Value, owner: usize) -> TokenResult<Value> {
        match value {
            Value::String(s) => self.resolve_string(s, owner),
            Value::Array(items) => items
                .iter()
                .map(|item| self.resolve_value(item, owner))
                .collect::<TokenResult<Vec<_>>>()
                .map(Value::Array),
            Value::Object(map) => {
                let mut resolved = Map::new();
                for (key, item) in map {
                    resolved.insert(key.clone(), self.resolve_value(item, owner)?);
                }
                Ok(Value::Object(resolved))
            }
            other => Ok(other.clone()),
        }
    }

    fn resolve_string(&mut self, s: &str, owner: usize) -> TokenResult<Value> {
        let references: Vec<(std::ops::Range<usize>, String)> = REFERENCE
            .captures_iter(s)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                Some((whole.range(), caps[1].to_string()))
            })
            .collect();

        if references.is_empty() {
            return Ok(Value::String(s.to_string()));
        }
        // A value that is exactly one reference takes the referenced value as is.
        if references.len() == 1 && references[0].0 == (0..s.len()) {
            return self.lookup(&references[0].1, owner);
        }

        let mut result = String::new();
        let mut last = 0;
        for (range, reference) in references {
            result.push_str(&s[last..range.start]);
            match self.lookup(&reference, owner)? {
                Value::String(text) => result.push_str(&text),
                other => result.push_str(&other.to_string()),
            }
            last = range.end;
        }
        result.push_str(&s[last..]);
        Ok(Value::String(result))
    }
}

/// Resolves every reference; unknown and circular references are errors.
pub fn resolve(tokens: &[Token]) -> TokenResult<Vec<Token>> {
    let mut resolver = Resolver::new(tokens);
    let mut resolved = Vec::with_capacity(tokens.len());
    for (i, token) in tokens.iter().enumerate() {
        let value = resolver.resolve_token(i)?;
        resolved.push(Token {
            value,
            ..token.clone()
        });
    }
    Ok(resolved)
}

impl Dictionary {
    pub fn from_tree(tree: Value) -> TokenResult<Self> {
        let tokens = resolve(&flatten(&tree))?;
        Ok(Self { tree, tokens })
    }

    pub fn load(patterns: &[String], base_dir: &Path) -> TokenResult<Self> {
        let files = find_sources(patterns, base_dir)?;
        info!("Loading {} token file(s)", files.len());
        let dictionary = Self::from_tree(load_tree(&files)?)?;
        info!("Dictionary built with {} tokens", dictionary.tokens.len());
        Ok(dictionary)
    }

    pub fn get(&self, path: &[String]) -> Option<&Token> {
        self.tokens.iter().find(|token| token.path == path)
    }
}
