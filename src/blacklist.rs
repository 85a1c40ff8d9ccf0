//! Domain blacklist: hosts that are never a company's own website.

use url::Url;

/// Job boards, social networks, and Brazilian company-data aggregators.
/// Matched exact or as a domain suffix.
pub const BLACKLISTED_DOMAINS: &[&str] = &[
    "tiktok.com",
    "youtube.com",
    "indeed.com",
    "glassdoor.com",
    "twitter.com",
    "serasaexperian.com.br",
    "cnpj.biz",
    "econodata.com.br",
];

/// Search/social platform hosts matched by substring so regional variants
/// (google.com.br, m.facebook.com) are covered too.
pub const PLATFORM_HOSTS: &[&str] = &[
    "google.com",
    "facebook.com",
    "instagram.com",
    "linkedin.com",
    "twitter.com",
    "youtube.com",
    "support.google.com",
    "maps.google.com",
];

/// Case-insensitive check against both host sets.
pub fn is_blacklisted(domain: &str) -> bool {
    let domain = domain.to_ascii_lowercase();
    if PLATFORM_HOSTS.iter().any(|host| domain.contains(host)) {
        return true;
    }
    BLACKLISTED_DOMAINS
        .iter()
        .any(|entry| domain == *entry || domain.ends_with(&format!(".{entry}")))
}

/// Fail-closed check on a raw link: a URL that does not parse to a host is
/// treated as blacklisted.
pub fn is_blacklisted_link(link: &str) -> bool {
    match Url::parse(link).ok().and_then(|url| url.host_str().map(str::to_owned)) {
        Some(host) => {
            let host = host.to_ascii_lowercase();
            let domain = host.strip_prefix("www.").unwrap_or(&host);
            is_blacklisted(domain)
        }
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_hosts_match_by_substring() {
        assert!(is_blacklisted("facebook.com"));
        assert!(is_blacklisted("m.facebook.com"));
        assert!(is_blacklisted("google.com.br"));
        assert!(is_blacklisted("support.google.com"));
    }

    #[test]
    fn test_fixed_list_matches_exact_and_suffix() {
        assert!(is_blacklisted("cnpj.biz"));
        assert!(is_blacklisted("www.cnpj.biz"));
        assert!(is_blacklisted("serasaexperian.com.br"));
        assert!(!is_blacklisted("meucnpj.biz.br"));
    }

    #[test]
    fn test_company_domains_pass() {
        assert!(!is_blacklisted("acme.com.br"));
        assert!(!is_blacklisted("empresa.net"));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(is_blacklisted("Facebook.COM"));
        assert!(is_blacklisted("CNPJ.BIZ"));
    }

    #[test]
    fn test_unparseable_link_is_blacklisted() {
        assert!(is_blacklisted_link("not a url"));
        assert!(is_blacklisted_link(""));
        assert!(is_blacklisted_link("https://www.facebook.com/acme"));
        assert!(!is_blacklisted_link("https://www.acme.com.br/sobre"));
    }
}
