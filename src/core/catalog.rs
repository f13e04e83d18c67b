//! Static model catalog: descriptors loaded from `config/models.json`
//! (embedded at compile time), provider grouping, and filtering.

use std::sync::OnceLock;

use serde::Deserialize;

use crate::core::util::filter_by_query;

/// Read-only descriptor for a selectable model. Optional metadata fields are
/// absent for models the upstream listing does not document.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    pub id: String,
    pub name: String,
    pub provider: String,
    pub description: String,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub context_window: Option<String>,
    #[serde(default)]
    pub parameters: Option<String>,
    #[serde(default)]
    pub active_parameters: Option<String>,
    #[serde(default)]
    pub features: Option<Vec<String>>,
}

fn load_catalog() -> Vec<ModelDescriptor> {
    let json = include_str!("../../config/models.json");
    serde_json::from_str(json).expect("models.json must be valid")
}

static CATALOG: OnceLock<Vec<ModelDescriptor>> = OnceLock::new();

/// All model descriptors, loading from the embedded catalog on first access.
pub fn models() -> &'static [ModelDescriptor] {
    CATALOG.get_or_init(load_catalog)
}

/// Look up a descriptor by catalog id (e.g. "qwen/qwen3-32b").
pub fn find(id: &str) -> Option<&'static ModelDescriptor> {
    models().iter().find(|m| m.id == id)
}

/// Provider display order for grouped views. Providers not listed here sort
/// alphabetically after the listed ones.
pub const PROVIDER_ORDER: &[&str] = &[
    "OpenAI",
    "Google",
    "MoonshotAI",
    "Qwen",
    "DeepSeek",
    "Z.AI",
    "xAI",
    "NVIDIA",
    "ByteDance Seed",
];

fn provider_sort_key(provider: &str) -> (usize, &str) {
    match PROVIDER_ORDER.iter().position(|p| *p == provider) {
        Some(rank) => (rank, ""),
        None => (PROVIDER_ORDER.len(), provider),
    }
}

/// Group descriptors by provider, providers in preference order, models in
/// catalog order within each group.
pub fn grouped<'a>(models: &[&'a ModelDescriptor]) -> Vec<(&'a str, Vec<&'a ModelDescriptor>)> {
    let mut groups: Vec<(&str, Vec<&ModelDescriptor>)> = Vec::new();
    for model in models {
        match groups.iter_mut().find(|(p, _)| *p == model.provider) {
            Some((_, entries)) => entries.push(model),
            None => groups.push((model.provider.as_str(), vec![model])),
        }
    }
    groups.sort_by(|(a, _), (b, _)| provider_sort_key(a).cmp(&provider_sort_key(b)));
    groups
}

/// Filter descriptors by query (case-insensitive match on id or name).
pub fn filter_models<'a>(
    models: &'a [ModelDescriptor],
    query: &str,
) -> Vec<&'a ModelDescriptor> {
    filter_by_query(models, query, |m| (m.id.as_str(), m.name.as_str()))
}

/// Catalog entries matching `query`, flattened in grouped display order
/// (providers in preference order, catalog order within each provider).
pub fn visible_models(query: &str) -> Vec<&'static ModelDescriptor> {
    let filtered = filter_models(models(), query);
    grouped(&filtered)
        .into_iter()
        .flat_map(|(_, entries)| entries)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_loads_all_entries() {
        assert_eq!(models().len(), 24);
    }

    #[test]
    fn find_by_id() {
        let model = find("qwen/qwen3-32b").expect("catalog entry");
        assert_eq!(model.name, "Qwen3 32B");
        assert_eq!(model.provider, "Qwen");
        assert_eq!(model.parameters.as_deref(), Some("32.8B"));
        assert!(model.context_window.is_none());
        assert!(find("not/a-model").is_none());
    }

    #[test]
    fn grouped_follows_provider_preference_order() {
        let all: Vec<_> = models().iter().collect();
        let groups = grouped(&all);
        let providers: Vec<_> = groups.iter().map(|(p, _)| *p).collect();
        assert_eq!(
            providers,
            vec![
                "OpenAI",
                "Google",
                "MoonshotAI",
                "Qwen",
                "DeepSeek",
                "Z.AI",
                "xAI",
                "NVIDIA",
                "ByteDance Seed",
            ]
        );
        let total: usize = groups.iter().map(|(_, ms)| ms.len()).sum();
        assert_eq!(total, models().len());
    }

    #[test]
    fn grouped_sorts_unlisted_providers_alphabetically_last() {
        let mystery_b = ModelDescriptor {
            id: "b/one".into(),
            name: "B One".into(),
            provider: "Beta Labs".into(),
            description: String::new(),
            max_tokens: None,
            context_window: None,
            parameters: None,
            active_parameters: None,
            features: None,
        };
        let mystery_a = ModelDescriptor {
            provider: "Alpha Labs".into(),
            ..mystery_b.clone()
        };
        let known = find("openai/gpt-5.1").unwrap().clone();
        let list = [&mystery_b, &known, &mystery_a];
        let groups = grouped(&list);
        let providers: Vec<_> = groups.iter().map(|(p, _)| *p).collect();
        assert_eq!(providers, vec!["OpenAI", "Alpha Labs", "Beta Labs"]);
    }

    #[test]
    fn visible_models_follow_grouped_order() {
        let visible = visible_models("");
        assert_eq!(visible.len(), models().len());
        assert_eq!(visible[0].provider, "OpenAI");
        assert_eq!(visible.last().unwrap().provider, "ByteDance Seed");
    }

    #[test]
    fn filter_matches_id_and_name() {
        let by_name = filter_models(models(), "grok");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, "x-ai/grok-4.1-fast");

        let by_id = filter_models(models(), "moonshotai/");
        assert_eq!(by_id.len(), 2);

        assert_eq!(filter_models(models(), "").len(), models().len());
    }
}
