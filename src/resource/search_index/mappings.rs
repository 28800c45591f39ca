//! Search index Model <-> Atlas conversions

use super::model::{Analyzer, Mappings, SearchIndexModel, Synonym, SynonymSource};
use crate::atlas::search_index::{
    ClusterSearchIndex, SearchAnalyzer, SearchMappings, SearchSynonymMappingDefinition,
    SynonymSource as AtlasSynonymSource,
};
use crate::resource::util::present_string;
use anyhow::{Context, Result};
use serde_json::{Map, Value};

/// Build the create/update request. Fails only when `Mappings.Fields` is
/// not a JSON object.
pub fn expand_search_index(model: &SearchIndexModel) -> Result<ClusterSearchIndex> {
    Ok(ClusterSearchIndex {
        analyzer: present_string(&model.analyzer),
        analyzers: model.analyzers.as_ref().map(|a| expand_analyzers(a)),
        collection_name: present_string(&model.collection_name),
        database: present_string(&model.database),
        index_id: None,
        mappings: model.mappings.as_ref().map(expand_mappings).transpose()?,
        name: present_string(&model.name),
        search_analyzer: present_string(&model.search_analyzer),
        status: None,
        synonyms: model.synonyms.as_ref().map(|s| expand_synonyms(s)),
    })
}

pub fn expand_analyzers(analyzers: &[Analyzer]) -> Vec<SearchAnalyzer> {
    analyzers
        .iter()
        .map(|a| SearchAnalyzer {
            char_filters: a.char_filters.clone(),
            name: a.name.clone(),
            token_filters: a.token_filters.clone(),
            tokenizer: a.tokenizer.clone(),
        })
        .collect()
}

pub fn expand_mappings(mappings: &Mappings) -> Result<SearchMappings> {
    let fields = match mappings.fields.as_deref().filter(|f| !f.trim().is_empty()) {
        Some(text) => Some(parse_fields(text)?),
        None => None,
    };
    Ok(SearchMappings {
        dynamic: mappings.dynamic,
        fields,
    })
}

fn parse_fields(text: &str) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_str(text).context("Mappings.Fields is not valid JSON")?;
    match value {
        Value::Object(map) => Ok(map),
        other => anyhow::bail!("Mappings.Fields must be a JSON object, got {}", kind_of(&other)),
    }
}

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

pub fn expand_synonyms(synonyms: &[Synonym]) -> Vec<SearchSynonymMappingDefinition> {
    synonyms
        .iter()
        .map(|s| SearchSynonymMappingDefinition {
            analyzer: s.analyzer.clone(),
            name: s.name.clone(),
            source: s.source.as_ref().map(|src| AtlasSynonymSource {
                collection: src.collection.clone(),
            }),
        })
        .collect()
}

pub fn flatten_analyzers(analyzers: &[SearchAnalyzer]) -> Vec<Analyzer> {
    analyzers
        .iter()
        .map(|a| Analyzer {
            char_filters: a.char_filters.clone(),
            name: a.name.clone(),
            token_filters: a.token_filters.clone(),
            tokenizer: a.tokenizer.clone(),
        })
        .collect()
}

/// Response mappings back to the Model. When the prior `Fields` text
/// describes the same document it is kept verbatim.
pub fn flatten_mappings(mappings: &SearchMappings, prior: Option<&Mappings>) -> Mappings {
    let prior_fields = prior.and_then(|p| p.fields.as_deref());
    let fields = mappings.fields.as_ref().map(|fields| {
        let unchanged = prior_fields
            .and_then(|text| serde_json::from_str::<Value>(text).ok())
            .is_some_and(|v| v.as_object() == Some(fields));
        match prior_fields {
            Some(text) if unchanged => text.to_string(),
            _ => Value::Object(fields.clone()).to_string(),
        }
    });

    Mappings {
        dynamic: mappings.dynamic,
        fields,
    }
}

pub fn flatten_synonyms(synonyms: &[SearchSynonymMappingDefinition]) -> Vec<Synonym> {
    synonyms
        .iter()
        .map(|s| Synonym {
            analyzer: s.analyzer.clone(),
            name: s.name.clone(),
            source: s.source.as_ref().map(|src| SynonymSource {
                collection: src.collection.clone(),
            }),
        })
        .collect()
}

/// Merge a response into the prior model. Fields absent from the response
/// keep their prior value; addressing fields always come from the prior.
pub fn merge_search_index(prior: &SearchIndexModel, index: &ClusterSearchIndex) -> SearchIndexModel {
    let mut model = prior.clone();

    if let Some(v) = &index.analyzer {
        model.analyzer = Some(v.clone());
    }
    if let Some(v) = &index.analyzers {
        model.analyzers = Some(flatten_analyzers(v));
    }
    if let Some(v) = &index.collection_name {
        model.collection_name = Some(v.clone());
    }
    if let Some(v) = &index.database {
        model.database = Some(v.clone());
    }
    if let Some(v) = &index.mappings {
        model.mappings = Some(flatten_mappings(v, prior.mappings.as_ref()));
    }
    if let Some(v) = &index.name {
        model.name = Some(v.clone());
    }
    if let Some(v) = &index.search_analyzer {
        model.search_analyzer = Some(v.clone());
    }
    if let Some(v) = &index.synonyms {
        model.synonyms = Some(flatten_synonyms(v));
    }

    // read-only
    model.index_id = index.index_id.clone().or(model.index_id);
    model.status = index.status.clone();

    model
}
