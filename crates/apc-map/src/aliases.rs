//! Header-name aliases for the known column roles.

/// Alias sets per role, compared case-insensitively after trimming.
/// Order matters only across roles sharing an alias, which the table
/// avoids; within the header phase, the first matching header cell wins.
const ALIASES: &[(&str, &[&str])] = &[
    ("institution", &["institution", "institute", "university"]),
    ("period", &["period", "year", "jahr"]),
    (
        "euro",
        &["euro", "eur", "apc", "cost", "costs", "kosten", "betrag", "amount"],
    ),
    ("doi", &["doi"]),
    ("is_hybrid", &["is_hybrid", "is hybrid", "hybrid"]),
    ("publisher", &["publisher", "verlag"]),
    (
        "journal_full_title",
        &["journal_full_title", "journal full title", "journal title", "journal"],
    ),
    ("issn", &["issn"]),
    ("issn_print", &["issn_print", "issn print", "issn-print"]),
    (
        "issn_electronic",
        &["issn_electronic", "issn electronic", "issn-electronic", "eissn", "e-issn"],
    ),
    ("url", &["url", "link"]),
    ("license_ref", &["license_ref", "license", "licence"]),
    ("pmid", &["pmid", "pubmed id"]),
    ("pmcid", &["pmcid"]),
    ("ut", &["ut"]),
    ("doaj", &["doaj"]),
];

/// Maps a header cell to the role it names, if any.
pub fn role_for_header(header: &str) -> Option<&'static str> {
    let needle = header.trim();
    if needle.is_empty() {
        return None;
    }
    for (role, aliases) in ALIASES {
        if aliases.iter().any(|alias| needle.eq_ignore_ascii_case(alias)) {
            return Some(role);
        }
    }
    None
}
