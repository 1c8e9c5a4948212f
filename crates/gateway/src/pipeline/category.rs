//! Category resolution
//!
//! An explicit category id always wins. A supplied name is matched against
//! the tenant's categories (and their translations) by normalized
//! similarity; below the threshold a new category is created. Failures here
//! are swallowed: the article is simply created without a category.

use super::store::PublicationStore;
use newsdesk_common::metrics::record_lookup_degradation;
use newsdesk_common::text::slugify;
use strsim::normalized_levenshtein;
use tracing::{debug, warn};
use uuid::Uuid;

/// Resolve or create the category for a submission. Never fails the request.
pub async fn resolve(
    store: &dyn PublicationStore,
    tenant_id: Uuid,
    category_id: Option<Uuid>,
    category_name: Option<&str>,
    similarity_threshold: f64,
) -> Option<Uuid> {
    if let Some(id) = category_id {
        return Some(id);
    }

    let name = category_name.map(str::trim).filter(|n| !n.is_empty())?;

    match resolve_by_name(store, tenant_id, name, similarity_threshold).await {
        Ok(id) => Some(id),
        Err(e) => {
            warn!(error = %e, name, "Category resolution failed, continuing without category");
            record_lookup_degradation("category");
            None
        }
    }
}

async fn resolve_by_name(
    store: &dyn PublicationStore,
    tenant_id: Uuid,
    name: &str,
    threshold: f64,
) -> newsdesk_common::errors::Result<Uuid> {
    let candidates = store.category_candidates(tenant_id).await?;

    let needle = name.to_lowercase();
    let best = candidates
        .iter()
        .map(|c| (c, normalized_levenshtein(&needle, &c.name.to_lowercase())))
        .max_by(|a, b| a.1.total_cmp(&b.1));

    if let Some((candidate, score)) = best {
        if score >= threshold {
            debug!(
                category_id = %candidate.category_id,
                matched = %candidate.name,
                score,
                "Fuzzy-matched existing category"
            );
            return Ok(candidate.category_id);
        }
    }

    let created = store
        .create_category(tenant_id, name.to_string(), slugify(name))
        .await?;
    debug!(category_id = %created.id, name, "Created new category");

    Ok(created.id)
}
