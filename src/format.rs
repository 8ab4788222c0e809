//! Rendering of API records into human-readable summaries.
//!
//! All functions are pure: the same record always yields the same text.
//! Absent fields never fail, they fall back to fixed strings ("Unknown
//! Venue", "No topics", 0 for counts, "N/A" for identifiers).

use crate::models::{Author, Institution, Source, Work};

fn topics_line(topics: &[crate::models::Topic]) -> String {
    let names: Vec<&str> = topics
        .iter()
        .take(3)
        .filter_map(|t| t.display_name.as_deref())
        .collect();
    if names.is_empty() {
        "No topics".to_string()
    } else {
        names.join(", ")
    }
}

/// Six-line summary of a work, ending with its OpenAlex ID.
pub fn work_summary(work: &Work) -> String {
    let title = work
        .title
        .as_deref()
        .or(work.display_name.as_deref())
        .unwrap_or("Unknown Title");

    let authors: Vec<&str> = work
        .authorships
        .iter()
        .filter_map(|a| a.author.as_ref())
        .filter_map(|a| a.display_name.as_deref())
        .take(5)
        .collect();
    let mut authors_str = authors.join(", ");
    if work.authorships.len() > 5 {
        authors_str.push_str(" et al.");
    }

    let year = work
        .publication_year
        .map_or_else(|| "Unknown".to_string(), |y| y.to_string());

    let venue = work
        .primary_location
        .as_ref()
        .and_then(|loc| loc.source.as_ref())
        .and_then(|src| src.display_name.as_deref())
        .unwrap_or("Unknown Venue");

    format!(
        "**{}**\nAuthors: {}\nYear: {} | Citations: {}\nVenue: {}\nTopics: {}\nOpenAlex ID: {}\n",
        title,
        authors_str,
        year,
        work.cited_by_count.unwrap_or(0),
        venue,
        topics_line(&work.topics),
        work.id.as_deref().unwrap_or("N/A"),
    )
}

/// Work summary plus DOI, abstract flag, open-access info, and reference
/// count.
pub fn work_details(work: &Work) -> String {
    let mut out = work_summary(work);

    if let Some(doi) = &work.doi {
        out.push_str(&format!("DOI: {}\n", doi));
    }

    if work.abstract_inverted_index.is_some() {
        out.push_str("Has abstract: Yes\n");
    } else {
        out.push_str("Has abstract: No\n");
    }

    if work.is_oa == Some(true) {
        out.push_str("Open Access: Yes\n");
        if let Some(pdf_url) = work
            .best_oa_location
            .as_ref()
            .and_then(|loc| loc.pdf_url.as_deref())
        {
            out.push_str(&format!("PDF URL: {}\n", pdf_url));
        }
    }

    out.push_str(&format!("References: {} works\n", work.referenced_works.len()));
    out
}

pub fn author_summary(author: &Author) -> String {
    let institution = author
        .last_known_institution
        .as_ref()
        .and_then(|inst| inst.display_name.as_deref())
        .unwrap_or("Unknown Institution");

    format!(
        "**{}**\nORCID: {}\nInstitution: {}\nWorks: {} | Citations: {} | h-index: {}\nResearch areas: {}\nOpenAlex ID: {}\n",
        author.display_name.as_deref().unwrap_or("Unknown Author"),
        author.orcid.as_deref().unwrap_or("No ORCID"),
        institution,
        author.works_count.unwrap_or(0),
        author.cited_by_count.unwrap_or(0),
        author.h_index.unwrap_or(0),
        topics_line(&author.topics),
        author.id.as_deref().unwrap_or("N/A"),
    )
}

/// Author summary plus the five most recent per-year counts and up to
/// three alternative display names.
pub fn author_profile(author: &Author) -> String {
    let mut out = author_summary(author);

    if !author.counts_by_year.is_empty() {
        let mut recent = author.counts_by_year.clone();
        recent.sort_by_key(|c| std::cmp::Reverse(c.year.unwrap_or(0)));
        out.push_str("\n**Recent Publication Activity:**\n");
        for counts in recent.iter().take(5) {
            out.push_str(&format!(
                "- {}: {} works, {} citations\n",
                counts.year.unwrap_or(0),
                counts.works_count.unwrap_or(0),
                counts.cited_by_count.unwrap_or(0),
            ));
        }
    }

    if !author.display_name_alternatives.is_empty() {
        let names: Vec<&str> = author
            .display_name_alternatives
            .iter()
            .take(3)
            .map(String::as_str)
            .collect();
        out.push_str(&format!("\n**Alternative names:** {}\n", names.join(", ")));
    }

    out
}

pub fn institution_summary(institution: &Institution) -> String {
    format!(
        "**{}**\nType: {} | Country: {}\nWorks: {} | Citations: {}\nROR: {}\nHomepage: {}\nOpenAlex ID: {}\n",
        institution.display_name.as_deref().unwrap_or("Unknown Institution"),
        institution.kind.as_deref().unwrap_or("Unknown Type"),
        institution.country_code.as_deref().unwrap_or("Unknown"),
        institution.works_count.unwrap_or(0),
        institution.cited_by_count.unwrap_or(0),
        institution.ror.as_deref().unwrap_or("No ROR"),
        institution.homepage_url.as_deref().unwrap_or("No homepage"),
        institution.id.as_deref().unwrap_or("N/A"),
    )
}

pub fn source_summary(source: &Source) -> String {
    format!(
        "**{}**\nType: {} | Publisher: {}\nISSN-L: {} | Open Access: {}\nWorks: {} | Citations: {} | h-index: {}\nOpenAlex ID: {}\n",
        source.display_name.as_deref().unwrap_or("Unknown Source"),
        source.kind.as_deref().unwrap_or("Unknown Type"),
        source.host_organization_name.as_deref().unwrap_or("Unknown Publisher"),
        source.issn_l.as_deref().unwrap_or("No ISSN"),
        if source.is_oa == Some(true) { "Yes" } else { "No" },
        source.works_count.unwrap_or(0),
        source.cited_by_count.unwrap_or(0),
        source.h_index.unwrap_or(0),
        source.id.as_deref().unwrap_or("N/A"),
    )
}
