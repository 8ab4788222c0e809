//! Translation of tool arguments into the OpenAlex query grammar.
//!
//! Filters are collected as `key:value` pairs and joined into a single
//! comma-separated `filter` parameter. Keys are unique by construction and
//! kept in insertion order so the emitted query string is deterministic.

use crate::config::Config;
use crate::tools::{
    SearchAuthorsParams, SearchInstitutionsParams, SearchSourcesParams, SearchWorksParams,
};

/// One fully-built query against a list endpoint.
#[derive(Debug, Clone)]
pub struct QuerySpec {
    pub search: Option<String>,
    pub filters: Vec<(String, String)>,
    pub sort: Option<String>,
    pub page: u32,
    pub per_page: u32,
    pub select: Option<Vec<String>>,
}

impl QuerySpec {
    /// Start a query with the requested page size, clamped to the
    /// configured maximum. Page defaults to 1.
    pub fn new(per_page: u32, config: &Config) -> Self {
        Self {
            search: None,
            filters: Vec::new(),
            sort: None,
            page: 1,
            per_page: per_page.clamp(1, config.max_page_size),
            select: None,
        }
    }

    pub fn filter(&mut self, key: &str, value: impl Into<String>) {
        self.filters.push((key.to_string(), value.into()));
    }

    /// Render into HTTP query parameters.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("per_page".to_string(), self.per_page.to_string()),
        ];
        if let Some(search) = &self.search {
            params.push(("search".to_string(), search.clone()));
        }
        if let Some(sort) = &self.sort {
            params.push(("sort".to_string(), sort.clone()));
        }
        if let Some(select) = &self.select {
            params.push(("select".to_string(), select.join(",")));
        }
        if !self.filters.is_empty() {
            let joined = self
                .filters
                .iter()
                .map(|(k, v)| format!("{}:{}", k, v))
                .collect::<Vec<_>>()
                .join(",");
            params.push(("filter".to_string(), joined));
        }
        params
    }
}

fn requested_limit(limit: Option<u32>, default: u32) -> u32 {
    limit.unwrap_or(default).min(50)
}

/// Build the works search query. No default sort: OpenAlex ranks by
/// relevance when `sort` is absent.
pub fn works_search(p: &SearchWorksParams, config: &Config) -> QuerySpec {
    let mut q = QuerySpec::new(requested_limit(p.limit, 10), config);
    q.search = Some(p.query.clone());
    q.sort = p.sort.clone();

    if let Some(author) = &p.author {
        q.filter("raw_author_name.search", author.clone());
    }

    // Year range: two bounds become a closed date range, a single bound
    // becomes a one-sided comparison on publication_year.
    match (p.year_from, p.year_to) {
        (Some(from), Some(to)) => {
            q.filter("from_publication_date", format!("{}-01-01", from));
            q.filter("to_publication_date", format!("{}-12-31", to));
        }
        (Some(from), None) => q.filter("publication_year", format!(">={}", from)),
        (None, Some(to)) => q.filter("publication_year", format!("<={}", to)),
        (None, None) => {}
    }

    if let Some(venue) = &p.venue {
        q.filter("primary_location.source.display_name.search", venue.clone());
    }
    if let Some(topic) = &p.topic {
        q.filter("topics.display_name.search", topic.clone());
    }
    if p.open_access == Some(true) {
        q.filter("is_oa", "true");
    }
    q
}

pub fn authors_search(p: &SearchAuthorsParams, config: &Config) -> QuerySpec {
    let mut q = QuerySpec::new(requested_limit(p.limit, 10), config);
    q.search = Some(p.query.clone());
    q.sort = Some(p.sort.clone().unwrap_or_else(|| "cited_by_count".to_string()));

    if let Some(institution) = &p.institution {
        q.filter(
            "last_known_institution.display_name.search",
            institution.clone(),
        );
    }
    if let Some(topic) = &p.topic {
        q.filter("topics.display_name.search", topic.clone());
    }
    if let Some(min) = p.h_index_min {
        q.filter("h_index", format!(">={}", min));
    }
    if let Some(min) = p.works_count_min {
        q.filter("works_count", format!(">={}", min));
    }
    q
}

pub fn institutions_search(p: &SearchInstitutionsParams, config: &Config) -> QuerySpec {
    let mut q = QuerySpec::new(requested_limit(p.limit, 10), config);
    q.search = Some(p.query.clone());
    q.sort = Some(p.sort.clone().unwrap_or_else(|| "cited_by_count".to_string()));

    if let Some(country) = &p.country {
        q.filter("country_code", country.clone());
    }
    if let Some(kind) = &p.institution_type {
        q.filter("type", kind.clone());
    }
    if let Some(min) = p.works_count_min {
        q.filter("works_count", format!(">={}", min));
    }
    q
}

pub fn sources_search(p: &SearchSourcesParams, config: &Config) -> QuerySpec {
    let mut q = QuerySpec::new(requested_limit(p.limit, 10), config);
    q.search = Some(p.query.clone());
    q.sort = Some(p.sort.clone().unwrap_or_else(|| "cited_by_count".to_string()));

    if let Some(kind) = &p.source_type {
        q.filter("type", kind.clone());
    }
    if let Some(publisher) = &p.publisher {
        q.filter("host_organization_name.search", publisher.clone());
    }
    if p.open_access == Some(true) {
        q.filter("is_oa", "true");
    }
    if let Some(min) = p.works_count_min {
        q.filter("works_count", format!(">={}", min));
    }
    q
}

/// Works that cite the given (already normalized) work.
pub fn citations_search(work_id: &str, sort: Option<&str>, limit: Option<u32>, config: &Config) -> QuerySpec {
    let mut q = QuerySpec::new(requested_limit(limit, 20), config);
    q.sort = Some(sort.unwrap_or("publication_date").to_string());
    q.filter("cites", work_id);
    q
}
