//! Core value types for company website resolution.

use serde::{Deserialize, Serialize};

/// A search result or probed URL considered as a possible company website.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CandidateResult {
    pub title: String,
    pub link: String,
    pub snippet: String,
    /// Hostname of `link` with a leading "www." stripped, lowercased.
    pub domain: String,
}

/// Terminal status of one company's resolution.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionStatus {
    Complete,
    Error,
}

/// Result of resolving one company, immutable after construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolutionOutcome {
    pub company_name: String,
    /// Ranked links, never more than the configured maximum per company.
    pub links: Vec<CandidateResult>,
    pub status: ResolutionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ResolutionOutcome {
    pub fn complete(company_name: impl Into<String>, links: Vec<CandidateResult>) -> Self {
        Self {
            company_name: company_name.into(),
            links,
            status: ResolutionStatus::Complete,
            message: None,
        }
    }

    pub fn error(company_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            links: Vec::new(),
            status: ResolutionStatus::Error,
            message: Some(message.into()),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == ResolutionStatus::Complete
    }
}
