//! AI rewrite mode decision
//!
//! Turns the tenant feature flag and an optional per-request override into
//! a rewrite policy. The override is a testing switch and is never written
//! back to tenant configuration; the decision is recorded as an audit fact
//! on the created article.

use newsdesk_common::auth::Role;
use newsdesk_common::errors::{AppError, Result};
use serde::{Deserialize, Serialize};

/// Rewrite mode for one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiMode {
    /// AI rewrites all three formats
    Full,
    /// AI use restricted to SEO metadata and category inference
    Limited,
}

impl AiMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiMode::Full => "full",
            AiMode::Limited => "limited",
        }
    }
}

/// Where the decision came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionSource {
    TenantFlag,
    Override,
}

/// The decided rewrite policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiDecision {
    pub mode: AiMode,
    pub tenant_rewrite_enabled: bool,
    pub source: DecisionSource,
    pub prompts_to_run: Vec<String>,
}

const FULL_PROMPTS: &[&str] = &["newspaper_rewrite", "web_rewrite", "short_news_rewrite"];
const LIMITED_PROMPTS: &[&str] = &["seo_metadata", "category_inference"];

fn prompts_for(mode: AiMode) -> Vec<String> {
    let prompts = match mode {
        AiMode::Full => FULL_PROMPTS,
        AiMode::Limited => LIMITED_PROMPTS,
    };
    prompts.iter().map(|p| p.to_string()).collect()
}

/// Decide the rewrite mode
///
/// Disabling is always permitted; forcing rewrites on is reserved for
/// super admins and fails closed before any write happens.
pub fn decide(
    tenant_rewrite_enabled: bool,
    override_enabled: Option<bool>,
    role: Role,
) -> Result<AiDecision> {
    let decision = match override_enabled {
        None => {
            let mode = if tenant_rewrite_enabled {
                AiMode::Full
            } else {
                AiMode::Limited
            };
            AiDecision {
                mode,
                tenant_rewrite_enabled,
                source: DecisionSource::TenantFlag,
                prompts_to_run: prompts_for(mode),
            }
        }
        Some(false) => AiDecision {
            mode: AiMode::Limited,
            tenant_rewrite_enabled,
            source: DecisionSource::Override,
            prompts_to_run: prompts_for(AiMode::Limited),
        },
        Some(true) => {
            if role != Role::SuperAdmin {
                return Err(AppError::RewriteOverrideDenied);
            }
            AiDecision {
                mode: AiMode::Full,
                tenant_rewrite_enabled,
                source: DecisionSource::Override,
                prompts_to_run: prompts_for(AiMode::Full),
            }
        }
    };

    Ok(decision)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_override_follows_flag() {
        let full = decide(true, None, Role::Reporter).unwrap();
        assert_eq!(full.mode, AiMode::Full);
        assert_eq!(full.source, DecisionSource::TenantFlag);
        assert!(full.prompts_to_run.iter().any(|p| p == "web_rewrite"));

        let limited = decide(false, None, Role::Reporter).unwrap();
        assert_eq!(limited.mode, AiMode::Limited);
        assert_eq!(limited.prompts_to_run, vec!["seo_metadata", "category_inference"]);
    }

    #[test]
    fn test_disable_override_always_permitted() {
        for role in [
            Role::SuperAdmin,
            Role::TenantAdmin,
            Role::Reporter,
            Role::AdminEditor,
            Role::NewsModerator,
        ] {
            let decision = decide(true, Some(false), role).unwrap();
            assert_eq!(decision.mode, AiMode::Limited);
            assert_eq!(decision.source, DecisionSource::Override);
        }
    }

    #[test]
    fn test_enable_override_requires_super_admin() {
        let err = decide(false, Some(true), Role::Reporter).unwrap_err();
        assert!(matches!(err, AppError::RewriteOverrideDenied));

        let decision = decide(false, Some(true), Role::SuperAdmin).unwrap();
        assert_eq!(decision.mode, AiMode::Full);
        assert_eq!(decision.source, DecisionSource::Override);
        // The tenant flag is reported as-is for the audit record.
        assert!(!decision.tenant_rewrite_enabled);
    }
}
