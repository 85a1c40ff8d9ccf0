//! Heuristic relevance ranking of website candidates.
//!
//! Scores are additive integers computed per candidate and discarded after
//! sorting. The weights below are empirical calibration for Brazilian
//! company sites; tests pin the tier ordering rather than exact totals.

use crate::company::CandidateResult;
use crate::normalize;

/// Candidate domain equals one of the generated domain guesses. Dominant
/// signal: an exact guess match outranks everything short of several
/// combined lesser signals.
pub const SCORE_EXACT_GUESS_MATCH: i32 = 500;

/// Candidate domain contains the compact company name.
pub const SCORE_NAME_IN_DOMAIN: i32 = 200;

/// TLD preference tiers, mutually exclusive, first match wins.
pub const SCORE_TLD_COM_BR: i32 = 80;
pub const SCORE_TLD_BR: i32 = 60;
pub const SCORE_TLD_COM: i32 = 40;

/// Title contains the raw company name.
pub const SCORE_NAME_IN_TITLE: i32 = 50;

/// Official-site wording in the title / snippet.
pub const SCORE_OFFICIAL_TERM_IN_TITLE: i32 = 50;
pub const SCORE_OFFICIAL_TERM_IN_SNIPPET: i32 = 30;

/// Social-network domain penalty, a second line of defense behind the
/// blacklist for aggregator subdomains that slip through.
pub const SCORE_SOCIAL_DOMAIN_PENALTY: i32 = -100;

const OFFICIAL_TERMS: &[&str] = &["oficial", "official", "homepage", "home", "site oficial"];

const SOCIAL_DOMAINS: &[&str] = &["facebook", "instagram", "linkedin", "twitter"];

/// Precomputed per-company inputs shared across all candidates.
pub struct RankContext {
    compact_name: String,
    name_lower: String,
    guesses: Vec<String>,
}

impl RankContext {
    pub fn new(company_name: &str, guesses: &[String]) -> Self {
        Self {
            compact_name: normalize::compact_name(company_name),
            name_lower: company_name.to_lowercase(),
            guesses: guesses.to_vec(),
        }
    }
}

struct ScoredCandidate {
    score: i32,
    candidate: CandidateResult,
}

/// Reorder candidates by descending score. Pure reordering: every input
/// candidate appears exactly once in the output, and ties keep their
/// insertion order (stable sort).
pub fn rank(candidates: Vec<CandidateResult>, ctx: &RankContext) -> Vec<CandidateResult> {
    let mut scored: Vec<ScoredCandidate> = candidates
        .into_iter()
        .map(|candidate| ScoredCandidate { score: score(&candidate, ctx), candidate })
        .collect();
    scored.sort_by_key(|entry| std::cmp::Reverse(entry.score));
    scored.into_iter().map(|entry| entry.candidate).collect()
}

/// Additive score for one candidate.
pub fn score(candidate: &CandidateResult, ctx: &RankContext) -> i32 {
    let domain_lower = candidate.domain.to_lowercase();
    let domain = domain_lower.strip_prefix("www.").unwrap_or(&domain_lower);
    let title = candidate.title.to_lowercase();
    let snippet = candidate.snippet.to_lowercase();
    let mut score = 0;

    if ctx.guesses.iter().any(|guess| guess == domain) {
        score += SCORE_EXACT_GUESS_MATCH;
    }
    if !ctx.compact_name.is_empty() && domain.contains(&ctx.compact_name) {
        score += SCORE_NAME_IN_DOMAIN;
    }
    if domain.ends_with(".com.br") {
        score += SCORE_TLD_COM_BR;
    } else if domain.ends_with(".br") {
        score += SCORE_TLD_BR;
    } else if domain.ends_with(".com") {
        score += SCORE_TLD_COM;
    }
    if title.contains(&ctx.name_lower) {
        score += SCORE_NAME_IN_TITLE;
    }
    if OFFICIAL_TERMS.iter().any(|term| title.contains(term)) {
        score += SCORE_OFFICIAL_TERM_IN_TITLE;
    }
    if OFFICIAL_TERMS.iter().any(|term| snippet.contains(term)) {
        score += SCORE_OFFICIAL_TERM_IN_SNIPPET;
    }
    if SOCIAL_DOMAINS.iter().any(|social| domain.contains(social)) {
        score += SCORE_SOCIAL_DOMAIN_PENALTY;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query;

    fn candidate(title: &str, link: &str, snippet: &str, domain: &str) -> CandidateResult {
        CandidateResult {
            title: title.to_string(),
            link: link.to_string(),
            snippet: snippet.to_string(),
            domain: domain.to_string(),
        }
    }

    fn ctx_for(name: &str) -> RankContext {
        RankContext::new(name, &query::domain_guesses(name))
    }

    #[test]
    fn test_exact_guess_outranks_name_in_domain_outranks_tld() {
        let ctx = ctx_for("Acme Ltda");

        let exact = candidate("x", "https://acmeltda.com.br", "", "acmeltda.com.br");
        let containing = candidate("x", "https://portalacmeltda.net", "", "portalacmeltda.net");
        let tld_only = candidate("x", "https://outra.com.br", "", "outra.com.br");

        let exact_score = score(&exact, &ctx);
        let containing_score = score(&containing, &ctx);
        let tld_score = score(&tld_only, &ctx);

        assert!(exact_score > containing_score);
        assert!(containing_score > tld_score);
        assert!(exact_score >= SCORE_EXACT_GUESS_MATCH);
        assert_eq!(tld_score, SCORE_TLD_COM_BR);
    }

    #[test]
    fn test_tld_tiers_are_mutually_exclusive() {
        let ctx = ctx_for("Outra Empresa");
        assert_eq!(
            score(&candidate("x", "https://a.com.br", "", "a.com.br"), &ctx),
            SCORE_TLD_COM_BR
        );
        assert_eq!(score(&candidate("x", "https://a.br", "", "a.br"), &ctx), SCORE_TLD_BR);
        assert_eq!(score(&candidate("x", "https://a.com", "", "a.com"), &ctx), SCORE_TLD_COM);
        assert_eq!(score(&candidate("x", "https://a.net", "", "a.net"), &ctx), 0);
    }

    #[test]
    fn test_title_and_snippet_terms_score_independently() {
        let ctx = ctx_for("Zeta");
        let both = candidate("Zeta - site oficial", "https://x.org", "homepage da Zeta", "x.org");
        let title_only = candidate("Zeta - site oficial", "https://x.org", "", "x.org");

        assert_eq!(
            score(&both, &ctx),
            SCORE_NAME_IN_TITLE + SCORE_OFFICIAL_TERM_IN_TITLE + SCORE_OFFICIAL_TERM_IN_SNIPPET
        );
        assert_eq!(score(&title_only, &ctx), SCORE_NAME_IN_TITLE + SCORE_OFFICIAL_TERM_IN_TITLE);
    }

    #[test]
    fn test_social_domain_penalty() {
        let ctx = ctx_for("Acme");
        let social = candidate("Acme", "https://pt-br.facebook.com.br", "", "pt-br.facebook.com.br");
        assert_eq!(
            score(&social, &ctx),
            SCORE_TLD_COM_BR + SCORE_NAME_IN_TITLE + SCORE_SOCIAL_DOMAIN_PENALTY
        );
    }

    #[test]
    fn test_rank_is_pure_reordering_and_sorted() {
        let ctx = ctx_for("Acme Ltda");
        let input = vec![
            candidate("c", "https://outra.com", "", "outra.com"),
            candidate("b", "https://portalacmeltda.com.br", "", "portalacmeltda.com.br"),
            candidate("a", "https://acmeltda.com.br", "", "acmeltda.com.br"),
        ];

        let ranked = rank(input.clone(), &ctx);

        assert_eq!(ranked.len(), input.len());
        assert_eq!(ranked[0].domain, "acmeltda.com.br");
        assert_eq!(ranked[1].domain, "portalacmeltda.com.br");
        assert_eq!(ranked[2].domain, "outra.com");

        let mut scores: Vec<i32> = ranked.iter().map(|c| score(c, &ctx)).collect();
        let sorted = scores.clone();
        scores.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(scores, sorted);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let ctx = ctx_for("Acme");
        let first = candidate("x", "https://um.net.br", "", "um.net.br");
        let second = candidate("x", "https://dois.net.br", "", "dois.net.br");
        assert_eq!(score(&first, &ctx), score(&second, &ctx));

        let ranked = rank(vec![first.clone(), second.clone()], &ctx);
        assert_eq!(ranked[0], first);
        assert_eq!(ranked[1], second);
    }
}
