//! Open-access PDF download flow.
//!
//! Fetch metadata, resolve a PDF URL, derive a filename, then hand the
//! byte fetch and write to the gateway. Each terminal state maps to one
//! fixed text shape; nothing here raises past the tool boundary.

use std::path::Path;

use crate::client::OpenAlexClient;
use crate::ident::{self, EntityKind};
use crate::models::Work;
use crate::tools::DownloadPaperParams;

/// Pick a PDF URL for a work: the best open-access location when the work
/// itself is marked open access, else the first other location that is
/// open access and carries a PDF URL.
pub fn resolve_pdf_url(work: &Work) -> Option<String> {
    if work.is_oa == Some(true) {
        if let Some(url) = work
            .best_oa_location
            .as_ref()
            .and_then(|loc| loc.pdf_url.clone())
        {
            return Some(url);
        }
    }
    work.locations
        .iter()
        .find(|loc| loc.is_oa == Some(true) && loc.pdf_url.is_some())
        .and_then(|loc| loc.pdf_url.clone())
}

/// Derive a filesystem-safe filename from a title: strip reserved
/// characters, underscore the spaces, cap at 50 characters, add `.pdf`.
pub fn derive_filename(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*'))
        .collect();
    let underscored = cleaned.replace(' ', "_");
    let truncated: String = underscored.chars().take(50).collect();
    format!("{}.pdf", truncated)
}

pub async fn download_paper(client: &OpenAlexClient, p: &DownloadPaperParams) -> String {
    let work_id = ident::normalize(EntityKind::Work, &p.work_id);

    let work = match client.entity::<Work>(&format!("works/{}", work_id)).await {
        Ok(Some(work)) => work,
        Ok(None) => return format!("Work not found: {}", work_id),
        Err(e) => return format!("Error downloading paper: {}", e),
    };

    let title = work
        .title
        .as_deref()
        .or(work.display_name.as_deref())
        .unwrap_or("Unknown Title")
        .to_string();

    let Some(pdf_url) = resolve_pdf_url(&work) else {
        return format!(
            "No open access PDF available for: {}\n\
             This paper may be behind a paywall or not available in PDF format.",
            title
        );
    };

    let filename = match &p.filename {
        Some(name) => name.clone(),
        None => derive_filename(&title),
    };
    let output_dir = p.output_path.as_deref().unwrap_or(".");
    if let Err(e) = tokio::fs::create_dir_all(output_dir).await {
        return format!("Error downloading paper: {}", e);
    }
    let file_path = Path::new(output_dir).join(&filename);

    match client.download_pdf(&pdf_url, &file_path).await {
        Ok(bytes_written) => {
            let size_mb = bytes_written as f64 / (1024.0 * 1024.0);
            format!(
                "Successfully downloaded: {}\nFile: {}\nSize: {:.2} MB\nSource: {}",
                title,
                file_path.display(),
                size_mb,
                pdf_url
            )
        }
        Err(e) => {
            tracing::error!("PDF download failed for {}: {}", work_id, e);
            format!(
                "Failed to download PDF for: {}\nURL: {}\nCheck logs for detailed error information.",
                title, pdf_url
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;

    fn oa_location(pdf_url: Option<&str>, is_oa: bool) -> Location {
        Location {
            source: None,
            pdf_url: pdf_url.map(str::to_string),
            is_oa: Some(is_oa),
        }
    }

    #[test]
    fn test_resolve_prefers_best_oa_location() {
        let work = Work {
            is_oa: Some(true),
            best_oa_location: Some(oa_location(Some("https://a.example/best.pdf"), true)),
            locations: vec![oa_location(Some("https://a.example/other.pdf"), true)],
            ..Work::default()
        };
        assert_eq!(
            resolve_pdf_url(&work).as_deref(),
            Some("https://a.example/best.pdf")
        );
    }

    #[test]
    fn test_resolve_falls_back_to_locations() {
        let work = Work {
            is_oa: Some(true),
            best_oa_location: Some(oa_location(None, true)),
            locations: vec![
                oa_location(None, true),
                oa_location(Some("https://a.example/second.pdf"), false),
                oa_location(Some("https://a.example/third.pdf"), true),
            ],
            ..Work::default()
        };
        assert_eq!(
            resolve_pdf_url(&work).as_deref(),
            Some("https://a.example/third.pdf")
        );
    }

    #[test]
    fn test_resolve_ignores_best_location_when_not_oa() {
        let work = Work {
            is_oa: Some(false),
            best_oa_location: Some(oa_location(Some("https://a.example/best.pdf"), true)),
            ..Work::default()
        };
        assert_eq!(resolve_pdf_url(&work), None);
    }

    #[test]
    fn test_resolve_none_when_no_oa_location() {
        let work = Work {
            is_oa: Some(false),
            locations: vec![oa_location(Some("https://a.example/paywalled.pdf"), false)],
            ..Work::default()
        };
        assert_eq!(resolve_pdf_url(&work), None);
    }

    #[test]
    fn test_derive_filename_strips_and_underscores() {
        assert_eq!(
            derive_filename("Attention Is All You Need"),
            "Attention_Is_All_You_Need.pdf"
        );
        assert_eq!(derive_filename(r#"What: "is" <this>?"#), "What_is_this.pdf");
    }

    #[test]
    fn test_derive_filename_truncates_to_fifty_chars() {
        let title = "a".repeat(80);
        let name = derive_filename(&title);
        assert_eq!(name.len(), 54); // 50 chars + ".pdf"
        assert!(name.ends_with(".pdf"));
    }
}
