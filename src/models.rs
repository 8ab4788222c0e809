//! Deserialization targets for OpenAlex API records.
//!
//! Upstream records are loosely populated; every leaf field is optional and
//! collections default to empty so a partial record never fails to parse.
//! Fallback values are applied at the formatting layer, not here.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Meta {
    pub count: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupBy {
    pub key: Option<String>,
    pub count: Option<u64>,
}

/// Envelope of every list endpoint: `meta`, `results`, optional `group_by`.
#[derive(Debug, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default)]
    pub meta: Meta,
    #[serde(default)]
    pub results: Vec<T>,
    #[serde(default)]
    pub group_by: Option<Vec<GroupBy>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthorRef {
    pub id: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Authorship {
    pub author: Option<AuthorRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VenueRef {
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub source: Option<VenueRef>,
    pub pdf_url: Option<String>,
    pub is_oa: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Topic {
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct YearCounts {
    pub year: Option<i32>,
    pub works_count: Option<u64>,
    pub cited_by_count: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstitutionRef {
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Work {
    pub id: Option<String>,
    pub doi: Option<String>,
    pub title: Option<String>,
    pub display_name: Option<String>,
    pub publication_year: Option<i32>,
    #[serde(default)]
    pub authorships: Vec<Authorship>,
    pub primary_location: Option<Location>,
    pub best_oa_location: Option<Location>,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub topics: Vec<Topic>,
    pub cited_by_count: Option<u64>,
    #[serde(default)]
    pub referenced_works: Vec<String>,
    pub is_oa: Option<bool>,
    pub abstract_inverted_index: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Author {
    pub id: Option<String>,
    pub orcid: Option<String>,
    pub display_name: Option<String>,
    #[serde(default)]
    pub display_name_alternatives: Vec<String>,
    pub works_count: Option<u64>,
    pub cited_by_count: Option<u64>,
    pub h_index: Option<u64>,
    pub last_known_institution: Option<InstitutionRef>,
    #[serde(default)]
    pub topics: Vec<Topic>,
    #[serde(default)]
    pub counts_by_year: Vec<YearCounts>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Institution {
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub country_code: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub works_count: Option<u64>,
    pub cited_by_count: Option<u64>,
    pub ror: Option<String>,
    pub homepage_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Source {
    pub id: Option<String>,
    pub display_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub issn_l: Option<String>,
    pub is_oa: Option<bool>,
    pub host_organization_name: Option<String>,
    pub works_count: Option<u64>,
    pub cited_by_count: Option<u64>,
    pub h_index: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_work_parses() {
        let work: Work = serde_json::from_str("{}").unwrap();
        assert!(work.id.is_none());
        assert!(work.authorships.is_empty());
        assert!(work.locations.is_empty());
    }

    #[test]
    fn test_list_response_without_meta() {
        let resp: ListResponse<Work> = serde_json::from_str(r#"{"results": [{}]}"#).unwrap();
        assert_eq!(resp.results.len(), 1);
        assert!(resp.meta.count.is_none());
        assert!(resp.group_by.is_none());
    }

    #[test]
    fn test_group_by_parses() {
        let resp: ListResponse<Work> = serde_json::from_str(
            r#"{"meta": {"count": 2}, "results": [], "group_by": [{"key": "true", "count": 2}]}"#,
        )
        .unwrap();
        assert_eq!(resp.meta.count, Some(2));
        assert_eq!(resp.group_by.unwrap()[0].count, Some(2));
    }

    #[test]
    fn test_institution_type_rename() {
        let inst: Institution =
            serde_json::from_str(r#"{"type": "education", "country_code": "US"}"#).unwrap();
        assert_eq!(inst.kind.as_deref(), Some("education"));
    }
}
