//! Raw search item filtering and link-keyed deduplication.

use std::collections::HashSet;
use url::Url;

use crate::blacklist;
use crate::company::CandidateResult;
use crate::search::SearchItem;

/// Convert raw API items into candidates, dropping incomplete entries,
/// unparseable links, and blacklisted domains.
pub fn filter_items(items: Vec<SearchItem>) -> Vec<CandidateResult> {
    items
        .into_iter()
        .filter_map(to_candidate)
        .filter(|candidate| !blacklist::is_blacklisted(&candidate.domain))
        .collect()
}

fn to_candidate(item: SearchItem) -> Option<CandidateResult> {
    if item.link.is_empty() || item.title.is_empty() {
        return None;
    }
    let domain = domain_of(&item.link)?;
    Some(CandidateResult {
        title: item.title,
        link: item.link,
        snippet: item.snippet,
        domain,
    })
}

/// Hostname of a link, lowercased, with one leading "www." stripped.
pub fn domain_of(link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;
    let host = url.host_str()?.to_ascii_lowercase();
    Some(host.strip_prefix("www.").unwrap_or(&host).to_string())
}

/// Keep the first occurrence per unique link, preserving insertion order so
/// earlier (higher-priority) queries win ties.
pub fn deduplicate(candidates: Vec<CandidateResult>) -> Vec<CandidateResult> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|candidate| seen.insert(candidate.link.clone()))
        .collect()
}
