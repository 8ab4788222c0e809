/// Kinds of entity reference a caller may pass by identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Work,
    Author,
}

/// Rewrite a user-supplied reference into the form the API accepts.
///
/// This only disambiguates the format (bare ID vs DOI vs ORCID vs full
/// URI); a garbled identifier passes through and surfaces as an upstream
/// not-found.
pub fn normalize(kind: EntityKind, raw: &str) -> String {
    match kind {
        EntityKind::Work => {
            if raw.starts_with("10.") {
                format!("https://doi.org/{}", raw)
            } else if raw.starts_with('W')
                || raw.starts_with("https://openalex.org/W")
                || raw.starts_with("https://doi.org/")
            {
                raw.to_string()
            } else {
                format!("W{}", raw)
            }
        }
        EntityKind::Author => {
            if raw.starts_with("0000-") {
                format!("https://orcid.org/{}", raw)
            } else if raw.starts_with('A')
                || raw.starts_with("https://openalex.org/A")
                || raw.starts_with("https://orcid.org/")
            {
                raw.to_string()
            } else {
                format!("A{}", raw)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_doi() {
        assert_eq!(
            normalize(EntityKind::Work, "10.48550/arxiv.1706.03762"),
            "https://doi.org/10.48550/arxiv.1706.03762"
        );
    }

    #[test]
    fn test_work_identity() {
        assert_eq!(normalize(EntityKind::Work, "W2741809807"), "W2741809807");
        assert_eq!(
            normalize(EntityKind::Work, "https://openalex.org/W2741809807"),
            "https://openalex.org/W2741809807"
        );
        assert_eq!(
            normalize(EntityKind::Work, "https://doi.org/10.1234/abc"),
            "https://doi.org/10.1234/abc"
        );
    }

    #[test]
    fn test_work_bare_numeric() {
        assert_eq!(normalize(EntityKind::Work, "2741809807"), "W2741809807");
    }

    #[test]
    fn test_author_orcid() {
        assert_eq!(
            normalize(EntityKind::Author, "0000-0002-1825-0097"),
            "https://orcid.org/0000-0002-1825-0097"
        );
    }

    #[test]
    fn test_author_identity() {
        assert_eq!(normalize(EntityKind::Author, "A5023888391"), "A5023888391");
        assert_eq!(
            normalize(EntityKind::Author, "https://orcid.org/0000-0002-1825-0097"),
            "https://orcid.org/0000-0002-1825-0097"
        );
    }

    #[test]
    fn test_author_bare_numeric() {
        assert_eq!(normalize(EntityKind::Author, "5023888391"), "A5023888391");
    }
}
