//! Tool orchestration: arguments in, one text block out.
//!
//! Every tool here follows the same single-shot sequence: normalize
//! identifiers, build the query, call the gateway, format. Gateway errors
//! never escape; they are rendered into the returned text.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::client::OpenAlexClient;
use crate::config::Config;
use crate::format;
use crate::ident::{self, EntityKind};
use crate::models::{Author, Institution, ListResponse, Source, Work};
use crate::query;

// ── Parameter structs ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchWorksParams {
    #[schemars(description = "Search query for works (title, abstract, keywords)")]
    pub query: String,
    #[schemars(description = "Filter by author name")]
    pub author: Option<String>,
    #[schemars(description = "Filter works from this year onwards")]
    pub year_from: Option<i32>,
    #[schemars(description = "Filter works up to this year")]
    pub year_to: Option<i32>,
    #[schemars(description = "Filter by venue/journal name")]
    pub venue: Option<String>,
    #[schemars(description = "Filter by research topic/field")]
    pub topic: Option<String>,
    #[schemars(description = "Filter for open access works only")]
    pub open_access: Option<bool>,
    #[schemars(description = "Sort order, e.g. cited_by_count or publication_date (default: relevance)")]
    pub sort: Option<String>,
    #[schemars(description = "Number of results to return (default 10, max 50)")]
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchAuthorsParams {
    #[schemars(description = "Search query for author names")]
    pub query: String,
    #[schemars(description = "Filter by institution name")]
    pub institution: Option<String>,
    #[schemars(description = "Filter by research area/topic")]
    pub topic: Option<String>,
    #[schemars(description = "Minimum h-index")]
    pub h_index_min: Option<u32>,
    #[schemars(description = "Minimum number of works")]
    pub works_count_min: Option<u32>,
    #[schemars(description = "Sort order, e.g. cited_by_count, works_count, h_index")]
    pub sort: Option<String>,
    #[schemars(description = "Number of results to return (default 10, max 50)")]
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchInstitutionsParams {
    #[schemars(description = "Search query for institution names")]
    pub query: String,
    #[schemars(description = "Filter by country code (e.g. 'US', 'GB', 'CA')")]
    pub country: Option<String>,
    #[schemars(description = "Filter by institution type (education, healthcare, company, ...)")]
    pub institution_type: Option<String>,
    #[schemars(description = "Minimum number of works")]
    pub works_count_min: Option<u32>,
    #[schemars(description = "Sort order, e.g. cited_by_count or works_count")]
    pub sort: Option<String>,
    #[schemars(description = "Number of results to return (default 10, max 50)")]
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchSourcesParams {
    #[schemars(description = "Search query for source names")]
    pub query: String,
    #[schemars(description = "Filter by source type (journal, conference, repository, ...)")]
    pub source_type: Option<String>,
    #[schemars(description = "Filter by publisher name")]
    pub publisher: Option<String>,
    #[schemars(description = "Filter for open access sources only")]
    pub open_access: Option<bool>,
    #[schemars(description = "Minimum number of works published")]
    pub works_count_min: Option<u32>,
    #[schemars(description = "Sort order, e.g. cited_by_count, works_count, h_index")]
    pub sort: Option<String>,
    #[schemars(description = "Number of results to return (default 10, max 50)")]
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetWorkDetailsParams {
    #[schemars(description = "OpenAlex work ID (e.g. 'W2741809807') or DOI")]
    pub work_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetAuthorProfileParams {
    #[schemars(description = "OpenAlex author ID (e.g. 'A5023888391') or ORCID")]
    pub author_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetCitationsParams {
    #[schemars(description = "OpenAlex work ID or DOI of the work to find citations for")]
    pub work_id: String,
    #[schemars(description = "Sort order for citing works (default: publication_date)")]
    pub sort: Option<String>,
    #[schemars(description = "Number of citing works to return (default 20, max 50)")]
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DownloadPaperParams {
    #[schemars(description = "OpenAlex work ID (e.g. 'W2741809807') or DOI of the work to download")]
    pub work_id: String,
    #[schemars(description = "Directory to save the PDF into (default: current directory)")]
    pub output_path: Option<String>,
    #[schemars(description = "Custom filename for the PDF (auto-generated from the title if omitted)")]
    pub filename: Option<String>,
}

// ── Tools ───────────────────────────────────────────────────────────────────

fn numbered<T>(header: String, items: &[T], summarize: impl Fn(&T) -> String) -> String {
    let mut out = header;
    out.push_str("\n\n");
    for (i, item) in items.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, summarize(item)));
    }
    out
}

pub async fn search_works(client: &OpenAlexClient, config: &Config, p: &SearchWorksParams) -> String {
    let spec = query::works_search(p, config);
    match client.list::<ListResponse<Work>>("works", &spec).await {
        Ok(resp) if resp.results.is_empty() => {
            format!("No works found for query: '{}'", p.query)
        }
        Ok(resp) => {
            let count = resp.meta.count.unwrap_or(resp.results.len() as u64);
            numbered(
                format!("Found {} works for '{}':", count, p.query),
                &resp.results,
                format::work_summary,
            )
        }
        Err(e) => format!("Error searching works: {}", e),
    }
}

pub async fn search_authors(
    client: &OpenAlexClient,
    config: &Config,
    p: &SearchAuthorsParams,
) -> String {
    let spec = query::authors_search(p, config);
    match client.list::<ListResponse<Author>>("authors", &spec).await {
        Ok(resp) if resp.results.is_empty() => {
            format!("No authors found for query: '{}'", p.query)
        }
        Ok(resp) => {
            let count = resp.meta.count.unwrap_or(resp.results.len() as u64);
            numbered(
                format!("Found {} authors for '{}':", count, p.query),
                &resp.results,
                format::author_summary,
            )
        }
        Err(e) => format!("Error searching authors: {}", e),
    }
}

pub async fn search_institutions(
    client: &OpenAlexClient,
    config: &Config,
    p: &SearchInstitutionsParams,
) -> String {
    let spec = query::institutions_search(p, config);
    match client
        .list::<ListResponse<Institution>>("institutions", &spec)
        .await
    {
        Ok(resp) if resp.results.is_empty() => {
            format!("No institutions found for query: '{}'", p.query)
        }
        Ok(resp) => {
            let count = resp.meta.count.unwrap_or(resp.results.len() as u64);
            numbered(
                format!("Found {} institutions for '{}':", count, p.query),
                &resp.results,
                format::institution_summary,
            )
        }
        Err(e) => format!("Error searching institutions: {}", e),
    }
}

pub async fn search_sources(
    client: &OpenAlexClient,
    config: &Config,
    p: &SearchSourcesParams,
) -> String {
    let spec = query::sources_search(p, config);
    match client.list::<ListResponse<Source>>("sources", &spec).await {
        Ok(resp) if resp.results.is_empty() => {
            format!("No sources found for query: '{}'", p.query)
        }
        Ok(resp) => {
            let count = resp.meta.count.unwrap_or(resp.results.len() as u64);
            numbered(
                format!("Found {} sources for '{}':", count, p.query),
                &resp.results,
                format::source_summary,
            )
        }
        Err(e) => format!("Error searching sources: {}", e),
    }
}

pub async fn get_work_details(client: &OpenAlexClient, p: &GetWorkDetailsParams) -> String {
    let work_id = ident::normalize(EntityKind::Work, &p.work_id);
    match client.entity::<Work>(&format!("works/{}", work_id)).await {
        Ok(Some(work)) => format::work_details(&work),
        Ok(None) => format!("Work not found: {}", work_id),
        Err(e) => format!("Error getting work details: {}", e),
    }
}

pub async fn get_author_profile(client: &OpenAlexClient, p: &GetAuthorProfileParams) -> String {
    let author_id = ident::normalize(EntityKind::Author, &p.author_id);
    match client
        .entity::<Author>(&format!("authors/{}", author_id))
        .await
    {
        Ok(Some(author)) => format::author_profile(&author),
        Ok(None) => format!("Author not found: {}", author_id),
        Err(e) => format!("Error getting author profile: {}", e),
    }
}

pub async fn get_citations(client: &OpenAlexClient, config: &Config, p: &GetCitationsParams) -> String {
    let work_id = ident::normalize(EntityKind::Work, &p.work_id);
    let spec = query::citations_search(&work_id, p.sort.as_deref(), p.limit, config);
    match client.list::<ListResponse<Work>>("works", &spec).await {
        Ok(resp) if resp.results.is_empty() => {
            format!("No citations found for work: {}", work_id)
        }
        Ok(resp) => {
            let count = resp.meta.count.unwrap_or(resp.results.len() as u64);
            numbered(
                format!("Found {} works citing {}:", count, work_id),
                &resp.results,
                format::work_summary,
            )
        }
        Err(e) => format!("Error getting citations: {}", e),
    }
}
