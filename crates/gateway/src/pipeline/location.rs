//! Location resolution
//!
//! Resolves a loosely-shaped location payload into a canonical reference.
//! Resolution is best-effort: the most specific supplied identifier is
//! resolved first and its ancestor chain fills any levels the caller did
//! not supply. Caller-supplied identifiers are never overwritten. Lookup
//! failures degrade to null; this resolver never returns an error.

use super::store::PublicationStore;
use super::submission::LocationPayload;
use newsdesk_common::metrics::record_lookup_degradation;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

/// Canonical resolved location
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRef {
    pub village_id: Option<Uuid>,
    pub village_name: Option<String>,
    pub mandal_id: Option<Uuid>,
    pub mandal_name: Option<String>,
    pub district_id: Option<Uuid>,
    pub district_name: Option<String>,
    pub state_id: Option<Uuid>,
    pub state_name: Option<String>,

    /// Most specific non-null name, falling back to the free-text city
    pub display_name: Option<String>,

    /// "district, state" when both are known
    pub address: Option<String>,

    /// Most specific identifier available
    pub place_id: Option<Uuid>,

    /// True when at least one lookup fell back to null
    pub degraded: bool,
}

pub struct LocationResolver<'a> {
    store: &'a dyn PublicationStore,
}

impl<'a> LocationResolver<'a> {
    pub fn new(store: &'a dyn PublicationStore) -> Self {
        Self { store }
    }

    /// Resolve a location payload. Worst case is an all-null reference.
    pub async fn resolve(&self, payload: &LocationPayload) -> LocationRef {
        let mut loc = LocationRef {
            village_id: payload.village_id,
            mandal_id: payload.mandal_id,
            district_id: payload.district_id,
            state_id: payload.state_id,
            ..Default::default()
        };

        // Village first; its ancestor chain fills levels the caller omitted.
        if let Some(village_id) = loc.village_id {
            match self.store.find_village(village_id).await {
                Ok(Some(village)) => {
                    loc.village_name = Some(village.name);
                    if loc.mandal_id.is_none() {
                        loc.mandal_id = Some(village.mandal_id);
                    }
                }
                Ok(None) => self.degrade(&mut loc, "village", village_id, None),
                Err(e) => self.degrade(&mut loc, "village", village_id, Some(e)),
            }
        }

        if let Some(mandal_id) = loc.mandal_id {
            match self.store.find_mandal(mandal_id).await {
                Ok(Some(mandal)) => {
                    loc.mandal_name = Some(mandal.name);
                    if loc.district_id.is_none() {
                        loc.district_id = Some(mandal.district_id);
                    }
                }
                Ok(None) => self.degrade(&mut loc, "mandal", mandal_id, None),
                Err(e) => self.degrade(&mut loc, "mandal", mandal_id, Some(e)),
            }
        }

        if let Some(district_id) = loc.district_id {
            match self.store.find_district(district_id).await {
                Ok(Some(district)) => {
                    loc.district_name = Some(district.name);
                    if loc.state_id.is_none() {
                        loc.state_id = Some(district.state_id);
                    }
                }
                Ok(None) => self.degrade(&mut loc, "district", district_id, None),
                Err(e) => self.degrade(&mut loc, "district", district_id, Some(e)),
            }
        }

        if let Some(state_id) = loc.state_id {
            match self.store.find_state(state_id).await {
                Ok(Some(state)) => loc.state_name = Some(state.name),
                Ok(None) => self.degrade(&mut loc, "state", state_id, None),
                Err(e) => self.degrade(&mut loc, "state", state_id, Some(e)),
            }
        }

        loc.display_name = loc
            .village_name
            .clone()
            .or_else(|| loc.mandal_name.clone())
            .or_else(|| loc.district_name.clone())
            .or_else(|| loc.state_name.clone())
            .or_else(|| payload.city.clone());

        loc.address = match (&loc.district_name, &loc.state_name) {
            (Some(district), Some(state)) => Some(format!("{}, {}", district, state)),
            _ => None,
        };

        loc.place_id = loc
            .village_id
            .or(loc.mandal_id)
            .or(loc.district_id)
            .or(loc.state_id);

        loc
    }

    fn degrade(
        &self,
        loc: &mut LocationRef,
        level: &str,
        id: Uuid,
        error: Option<newsdesk_common::errors::AppError>,
    ) {
        match error {
            Some(e) => warn!(level, id = %id, error = %e, "Location lookup failed, degrading to null"),
            None => warn!(level, id = %id, "Location not found, degrading to null"),
        }
        loc.degraded = true;
        record_lookup_degradation("location");
    }
}
