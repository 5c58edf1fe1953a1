//! Walks a parsed JSON value into a validated [`TaxonomyNode`] tree.
//!
//! Structural problems are collected rather than returned on first sight, so
//! one run reports every broken node. Each diagnostic carries the JSON path of
//! the node it is about.

use log::{debug, trace};
use serde_json::{Map, Value};

use taxograph_core::taxonomy::{NodeContent, TaxonomyNode};

use crate::error::{Diagnostic, DiagnosticCollector, ErrorCode};

const NAME_KEY: &str = "name";
const CHILDREN_KEY: &str = "children";
const PAPERS_KEY: &str = "papers";

/// Stateful walker over the document tree.
pub(crate) struct Elaborator {
    collector: DiagnosticCollector,
}

impl Elaborator {
    pub(crate) fn new() -> Self {
        Self {
            collector: DiagnosticCollector::new(),
        }
    }

    /// Consumes the walker, returning the collected diagnostics.
    pub(crate) fn into_collector(self) -> DiagnosticCollector {
        self.collector
    }

    /// Elaborates the node at `path`.
    ///
    /// Returns `None` if this node or any node below it is invalid. Children
    /// are still walked so that their errors are reported too.
    pub(crate) fn node(&mut self, value: &Value, path: &str) -> Option<TaxonomyNode> {
        trace!(path = path; "Elaborating node");

        let Some(object) = value.as_object() else {
            self.collector.emit(
                Diagnostic::error(format!(
                    "taxonomy node must be an object, found {}",
                    kind_of(value)
                ))
                .with_code(ErrorCode::E100)
                .with_path(path)
                .with_help("write the node as `{\"name\": \"...\"}`"),
            );
            return None;
        };

        for key in object.keys() {
            if !matches!(key.as_str(), NAME_KEY | CHILDREN_KEY | PAPERS_KEY) {
                debug!(path = path, key = key.as_str(); "Ignoring unknown key");
            }
        }

        let name = self.name(object, path);
        let children = self.children(object, path);
        let papers = self.papers(object, path);

        let (Some(children), Some(papers)) = (children, papers) else {
            return None;
        };

        let content = if papers.is_empty() {
            NodeContent::Children(children)
        } else {
            if !children.is_empty() {
                self.collector.emit(
                    Diagnostic::warning("node has both `children` and `papers`")
                        .with_code(ErrorCode::E200)
                        .with_path(path)
                        .with_help("only the papers are drawn; move them into a child category"),
                );
            }
            NodeContent::Papers(papers)
        };

        Some(TaxonomyNode::new(name?, content))
    }

    fn name(&mut self, object: &Map<String, Value>, path: &str) -> Option<String> {
        let Some(value) = object.get(NAME_KEY) else {
            self.collector.emit(
                Diagnostic::error("taxonomy node has no `name`")
                    .with_code(ErrorCode::E101)
                    .with_path(path)
                    .with_help("every node needs a `name` string"),
            );
            return None;
        };

        let Some(name) = value.as_str() else {
            self.collector.emit(
                Diagnostic::error(format!("`name` must be a string, found {}", kind_of(value)))
                    .with_code(ErrorCode::E102)
                    .with_path(path),
            );
            return None;
        };

        if name.trim().is_empty() {
            self.collector.emit(
                Diagnostic::error("`name` must not be empty")
                    .with_code(ErrorCode::E103)
                    .with_path(path),
            );
            return None;
        }

        Some(name.to_string())
    }

    /// Returns the elaborated children, `Some(vec![])` when the key is
    /// absent, or `None` if anything below is invalid.
    fn children(&mut self, object: &Map<String, Value>, path: &str) -> Option<Vec<TaxonomyNode>> {
        let Some(value) = object.get(CHILDREN_KEY) else {
            return Some(Vec::new());
        };

        let Some(entries) = value.as_array() else {
            self.collector.emit(
                Diagnostic::error(format!(
                    "`children` must be an array, found {}",
                    kind_of(value)
                ))
                .with_code(ErrorCode::E104)
                .with_path(path)
                .with_help("use `\"children\": [ ... ]` or remove the key"),
            );
            return None;
        };

        // Walk every entry before giving up so all errors are reported
        let elaborated: Vec<Option<TaxonomyNode>> = entries
            .iter()
            .enumerate()
            .map(|(idx, child)| self.node(child, &format!("{path}.{CHILDREN_KEY}[{idx}]")))
            .collect();
        elaborated.into_iter().collect()
    }

    /// Returns the paper titles, `Some(vec![])` when the key is absent, or
    /// `None` if the list is malformed.
    fn papers(&mut self, object: &Map<String, Value>, path: &str) -> Option<Vec<String>> {
        let Some(value) = object.get(PAPERS_KEY) else {
            return Some(Vec::new());
        };

        let Some(entries) = value.as_array() else {
            self.collector.emit(
                Diagnostic::error(format!("`papers` must be an array, found {}", kind_of(value)))
                    .with_code(ErrorCode::E105)
                    .with_path(path)
                    .with_help("use `\"papers\": [\"Title\", ...]` or remove the key"),
            );
            return None;
        };

        let mut papers = Vec::with_capacity(entries.len());
        let mut valid = true;
        for (idx, entry) in entries.iter().enumerate() {
            match entry.as_str() {
                Some(title) => papers.push(title.to_string()),
                None => {
                    valid = false;
                    self.collector.emit(
                        Diagnostic::error(format!(
                            "paper entry must be a string, found {}",
                            kind_of(entry)
                        ))
                        .with_code(ErrorCode::E106)
                        .with_path(format!("{path}.{PAPERS_KEY}[{idx}]")),
                    );
                }
            }
        }

        valid.then_some(papers)
    }
}

/// Human-readable JSON type name for diagnostics.
fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
