//! Domain-guess and search-query generation.
//!
//! Ordering is significant throughout: guesses are emitted in the priority
//! order used for exact-domain scoring and fallback probing, and site-scoped
//! queries run before the broader tail so precise matches surface first.

use crate::normalize;

/// TLD suffixes tried for the compact company name, most likely first.
pub const GUESS_TLDS: &[&str] = &[".com.br", ".com", ".net.br", ".net", ".br", ".org.br", ".org"];

/// TLD suffixes additionally tried for the hyphenated form of multi-word names.
pub const HYPHENATED_GUESS_TLDS: &[&str] = &[".com.br", ".com", ".br"];

/// Broader query terms appended after the site-scoped queries.
const QUERY_TAIL_TERMS: &[&str] = &["site oficial", "homepage", "contato"];

/// Exclusions applied to every tail query.
const QUERY_EXCLUSIONS: &str =
    "-site:facebook.com -site:instagram.com -site:linkedin.com -site:twitter.com -filetype:pdf";

/// Plausible hostnames for a company, in probe/score priority order.
pub fn domain_guesses(company_name: &str) -> Vec<String> {
    let compact = normalize::compact_name(company_name);
    let mut guesses = Vec::new();

    if !compact.is_empty() {
        guesses.extend(GUESS_TLDS.iter().map(|tld| format!("{compact}{tld}")));
    }

    if company_name.trim().contains(' ') {
        let hyphenated = normalize::hyphenated_name(company_name);
        if !hyphenated.is_empty() {
            guesses.extend(HYPHENATED_GUESS_TLDS.iter().map(|tld| format!("{hyphenated}{tld}")));
        }
    }

    guesses
}

/// Ordered search queries for a company: one `site:` query per domain guess,
/// then the broader `.br`-restricted tail.
pub fn search_queries(company_name: &str) -> Vec<String> {
    let exact = format!("\"{company_name}\"");

    let mut queries: Vec<String> = domain_guesses(company_name)
        .iter()
        .map(|domain| format!("site:{domain} {exact}"))
        .collect();

    for term in QUERY_TAIL_TERMS {
        queries.push(format!("{exact} {term} site:.br {QUERY_EXCLUSIONS}"));
    }

    queries
}
