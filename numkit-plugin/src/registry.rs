//! Plugin Registry

use crate::{EvalContext, FunctionMeta, FunctionPlugin};
use numkit_core::{NumkitError, Value};
use serde_json::{json, Map, Value as Json};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

/// Central function registry, keyed by lowercase name
pub struct PluginRegistry {
    functions: HashMap<String, Arc<dyn FunctionPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    pub fn with_function<F: FunctionPlugin + 'static>(mut self, f: F) -> Self {
        let name = f.meta().name.to_lowercase();
        self.functions.insert(name, Arc::new(f));
        self
    }

    pub fn get_function(&self, name: &str) -> Option<&dyn FunctionPlugin> {
        self.functions.get(&name.to_lowercase()).map(|f| f.as_ref())
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Registered names, sorted
    pub fn function_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn call_function(
        &self,
        name: &str,
        args: &[Value],
        ctx: &EvalContext,
    ) -> Result<Value, NumkitError> {
        match self.get_function(name) {
            Some(f) => f.call(args, ctx),
            None => {
                // Find similar function names for better error message
                tracing::debug!(name, "unknown function");
                let similar = self.find_similar_functions(name);
                let mut err = NumkitError::unknown_function(name);
                if !similar.is_empty() {
                    // at most five, best first
                    let suggestions: Vec<&str> =
                        similar.iter().take(5).map(|s| s.as_str()).collect();
                    err = err.with_suggestion(format!(
                        "Similar: {}. Use help() for full list.",
                        suggestions.join(", ")
                    ));
                }
                Err(err)
            }
        }
    }

    /// Find function names similar to the given name (for error suggestions)
    fn find_similar_functions(&self, name: &str) -> Vec<String> {
        let name_lower = name.to_lowercase();
        let mut matches: Vec<(String, usize)> = self
            .functions
            .keys()
            .filter_map(|func_name| {
                let score = Self::similarity_score(&name_lower, func_name);
                if score > 0 {
                    Some((func_name.clone(), score))
                } else {
                    None
                }
            })
            .collect();

        // higher score first, then alphabetical
        matches.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        matches.into_iter().map(|(name, _)| name).collect()
    }

    /// Calculate similarity score between two strings
    fn similarity_score(query: &str, candidate: &str) -> usize {
        let mut score = 0;

        // Exact prefix match is best
        if candidate.starts_with(query) {
            score += 100;
        }
        // Contains the query
        else if candidate.contains(query) {
            score += 50;
        }
        // Query contains the candidate
        else if query.contains(candidate) {
            score += 30;
        }

        // Levenshtein-like: count matching characters
        let query_chars: HashSet<char> = query.chars().collect();
        let candidate_chars: HashSet<char> = candidate.chars().collect();
        let common = query_chars.intersection(&candidate_chars).count();
        score += common * 2;

        // Penalize length difference
        let len_diff = query.len().abs_diff(candidate.len());
        if len_diff < 5 && score > 0 {
            score += 5 - len_diff;
        }

        score
    }

    pub fn help(&self, name: Option<&str>) -> Result<Json, NumkitError> {
        match name {
            Some(n) => self.help_for(n),
            None => Ok(self.general_help()),
        }
    }

    fn help_for(&self, name: &str) -> Result<Json, NumkitError> {
        // same lowercase key as the call path
        match self.functions.get(&name.to_lowercase()) {
            Some(f) => Ok(Self::function_to_help(&f.meta())),
            None => Err(NumkitError::unknown_function(name)
                .with_suggestion("Call help() for the list of functions")),
        }
    }

    fn general_help(&self) -> Json {
        // Group names by category
        let mut by_category: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (name, f) in &self.functions {
            by_category
                .entry(f.meta().category)
                .or_default()
                .push(name.as_str());
        }
        for names in by_category.values_mut() {
            names.sort_unstable();
        }
        json!({
            "functions": by_category,
            "usage": "Call help('function_name') for detailed help.",
        })
    }

    fn function_to_help(meta: &FunctionMeta) -> Json {
        let args: Vec<Json> = meta
            .args
            .iter()
            .map(|a| {
                let mut arg = Map::new();
                arg.insert("name".into(), json!(a.name));
                arg.insert("type".into(), json!(a.typ));
                arg.insert("description".into(), json!(a.description));
                arg.insert("optional".into(), json!(a.optional));
                // only optional args carry a default
                if let Some(default) = a.default {
                    arg.insert("default".into(), json!(default));
                }
                Json::Object(arg)
            })
            .collect();
        json!({
            "name": meta.name,
            "type": "function",
            "description": meta.description,
            "usage": meta.usage,
            "returns": meta.returns,
            "category": meta.category,
            "variadic": meta.is_variadic(),
            "args": args,
            "examples": meta.examples,
            "related": meta.related,
        })
    }

    pub fn list_functions(&self, category: Option<&str>) -> Json {
        let mut metas: Vec<FunctionMeta> = self
            .functions
            .values()
            .map(|f| f.meta())
            // no category means every function
            .filter(|m| category.map_or(true, |c| m.category == c))
            .collect();
        metas.sort_by_key(|m| m.name);
        Json::Array(
            metas
                .iter()
                .map(|m| {
                    json!({
                        "name": m.name,
                        "description": m.description,
                        "usage": m.usage,
                        "category": m.category,
                    })
                })
                .collect(),
        )
    }

    /// Full metadata of every function, sorted by name
    pub fn catalog(&self) -> Json {
        let mut metas: Vec<FunctionMeta> = self.functions.values().map(|f| f.meta()).collect();
        metas.sort_by_key(|m| m.name);
        serde_json::to_value(&metas).unwrap_or_else(|e| json!({ "error": e.to_string() }))
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}
