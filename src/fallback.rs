//! Fallback resolution for companies that search could not place: direct
//! HEAD probes of the guessed domains, then a synthesized suggestion URL.

use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::company::CandidateResult;
use crate::normalize;

/// Probes guessed domains and synthesizes suggestion results.
pub struct FallbackResolver {
    client: reqwest::Client,
    probe_base: Option<Url>,
}

impl FallbackResolver {
    pub fn new(probe_timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(probe_timeout_secs))
            .build()
            .expect("Failed to create HTTP client for domain probing");
        Self { client, probe_base: None }
    }

    /// Route probe requests to `<base>/<domain>` instead of
    /// `https://<domain>`, so tests can stand in a local server for the
    /// probed hosts. Synthesized links always use the real domain.
    pub fn with_probe_base(mut self, base: Url) -> Self {
        self.probe_base = Some(base);
        self
    }

    /// Run the fallback chain: first responsive guessed domain wins,
    /// otherwise a suggestion URL is fabricated. Always yields exactly one
    /// candidate.
    pub async fn resolve(&self, company_name: &str, guesses: &[String]) -> CandidateResult {
        match self.probe_domains(company_name, guesses).await {
            Some(hit) => hit,
            None => suggestion(company_name),
        }
    }

    /// HEAD-probe each guess in priority order. Any status below 400 counts
    /// as evidence the domain exists; errors and timeouts move on to the
    /// next guess.
    pub async fn probe_domains(
        &self,
        company_name: &str,
        guesses: &[String],
    ) -> Option<CandidateResult> {
        for domain in guesses {
            let url = self.probe_url(domain);
            match self.client.head(&url).send().await {
                Ok(response) if response.status().as_u16() < 400 => {
                    info!("domain probe hit for \"{company_name}\": {domain}");
                    return Some(CandidateResult {
                        title: format!("{company_name} - Site Oficial"),
                        link: format!("https://{domain}"),
                        snippet: format!("Site oficial da empresa {company_name}."),
                        domain: domain.clone(),
                    });
                }
                Ok(response) => {
                    debug!("domain probe {domain} answered {}", response.status());
                }
                Err(err) => {
                    debug!("domain probe {domain} failed: {err}");
                }
            }
        }
        None
    }

    fn probe_url(&self, domain: &str) -> String {
        match &self.probe_base {
            Some(base) => format!("{}/{domain}", base.as_str().trim_end_matches('/')),
            None => format!("https://{domain}"),
        }
    }
}

/// Fabricate a suggestion result at `https://<alnum-name>.com.br`, marked in
/// title and snippet as unconfirmed.
pub fn suggestion(company_name: &str) -> CandidateResult {
    let domain = format!("{}.com.br", normalize::alnum_name(company_name));
    CandidateResult {
        title: format!("{company_name} - Site Sugerido (Ainda não tem um site oficial.)"),
        link: format!("https://{domain}"),
        snippet: format!("Endereço sugerido para a empresa {company_name}."),
        domain,
    }
}
