//! Entrez E-utilities response types
//!
//! Only the parts of the esearch payload gbtag reads are modelled; unknown
//! elements (`TranslationSet`, `QueryTranslation`, ...) are ignored.

use crate::error::Result;
use serde::Deserialize;
use std::fmt;

/// Opaque Entrez UID, as listed in an esearch `IdList`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `<eSearchResult>` root
#[derive(Debug, Deserialize)]
struct ESearchResult {
    #[serde(rename = "Count", default)]
    count: Option<u64>,
    #[serde(rename = "IdList", default)]
    id_list: Option<IdList>,
    #[serde(rename = "ERROR", default)]
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct IdList {
    #[serde(rename = "Id", default)]
    ids: Vec<String>,
}

/// Decoded esearch response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// Total hit count reported by Entrez (may exceed `ids.len()`)
    pub count: Option<u64>,
    /// Candidate records, in document order
    pub ids: Vec<RecordId>,
    /// Error text Entrez embeds in an otherwise successful response
    pub error: Option<String>,
}

impl SearchResult {
    /// Parse an esearch XML body
    pub fn parse(xml: &str) -> Result<Self> {
        let raw: ESearchResult = quick_xml::de::from_str(xml)?;

        let ids = raw
            .id_list
            .unwrap_or_default()
            .ids
            .into_iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .map(RecordId::new)
            .collect();

        Ok(Self {
            count: raw.count,
            ids,
            error: raw.error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_list_in_order() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" ?>
<!DOCTYPE eSearchResult PUBLIC "-//NLM//DTD esearch 20060628//EN" "https://eutils.ncbi.nlm.nih.gov/eutils/dtd/20060628/esearch.dtd">
<eSearchResult><Count>2</Count><RetMax>2</RetMax><RetStart>0</RetStart><IdList>
<Id>556503834</Id>
<Id>49175990</Id>
</IdList><TranslationSet/><QueryTranslation>b0001[All Fields]</QueryTranslation></eSearchResult>
"#;

        let result = SearchResult::parse(xml).unwrap();
        assert_eq!(result.count, Some(2));
        assert_eq!(
            result.ids,
            vec![RecordId::new("556503834"), RecordId::new("49175990")]
        );
        assert!(result.error.is_none());
    }

    #[test]
    fn test_parse_empty_id_list() {
        let xml = "<eSearchResult><Count>0</Count><RetMax>0</RetMax><RetStart>0</RetStart><IdList/></eSearchResult>";
        let result = SearchResult::parse(xml).unwrap();
        assert!(result.ids.is_empty());
        assert_eq!(result.count, Some(0));
    }

    #[test]
    fn test_parse_error_response() {
        let xml = "<eSearchResult><ERROR>Empty term and query_key - nothing todo</ERROR></eSearchResult>";
        let result = SearchResult::parse(xml).unwrap();
        assert!(result.ids.is_empty());
        assert_eq!(result.count, None);
        assert_eq!(
            result.error.as_deref(),
            Some("Empty term and query_key - nothing todo")
        );
    }

    #[test]
    fn test_parse_rejects_malformed_xml() {
        let xml = "<eSearchResult><IdList><Id>1</IdList></eSearchResult>";
        assert!(SearchResult::parse(xml).is_err());
    }
}
