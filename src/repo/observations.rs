//! Logging façade over [`ObservationStore`].

use crate::error::{StoreError, StoreResult};
use crate::model::Observation;
use crate::store::ObservationStore;

pub struct ObservationRepo {
    store: ObservationStore,
}

impl ObservationRepo {
    pub fn new(store: ObservationStore) -> Self {
        Self { store }
    }

    pub fn list_by_hike(&self, hike_id: i64) -> StoreResult<Vec<Observation>> {
        match self.store.list_by_hike(hike_id) {
            Ok(list) => {
                tracing::info!(hike_id, count = list.len(), "observation list_by_hike -> ok");
                Ok(list)
            }
            Err(e) => {
                tracing::error!(hike_id, error = %e, "observation list_by_hike -> failed");
                Err(e)
            }
        }
    }

    /// Fetch one observation; a missing row is a [`StoreError::NotFound`].
    pub fn get(&self, id: i64) -> StoreResult<Observation> {
        match self.store.find_by_id(id) {
            Ok(Some(obs)) => {
                tracing::info!(observation_id = id, "observation get -> ok");
                Ok(obs)
            }
            Ok(None) => {
                tracing::error!(observation_id = id, "observation get -> not found");
                Err(StoreError::not_found("observation", id))
            }
            Err(e) => {
                tracing::error!(observation_id = id, error = %e, "observation get -> failed");
                Err(e)
            }
        }
    }

    pub fn add(&self, obs: &Observation) -> StoreResult<i64> {
        match self.store.insert(obs) {
            Ok(id) => {
                tracing::info!(observation_id = id, hike_id = obs.hike_id, "observation add -> ok");
                Ok(id)
            }
            Err(e) => {
                tracing::error!(hike_id = obs.hike_id, error = %e, "observation add -> failed");
                Err(e)
            }
        }
    }

    pub fn update(&self, obs: &Observation) -> StoreResult<usize> {
        match self.store.update(obs) {
            Ok(rows) => {
                tracing::info!(observation_id = obs.id, rows, "observation update -> ok");
                Ok(rows)
            }
            Err(e) => {
                tracing::error!(observation_id = obs.id, error = %e, "observation update -> failed");
                Err(e)
            }
        }
    }

    pub fn delete(&self, id: i64) -> StoreResult<usize> {
        match self.store.delete(id) {
            Ok(rows) => {
                tracing::info!(observation_id = id, rows, "observation delete -> ok");
                Ok(rows)
            }
            Err(e) => {
                tracing::error!(observation_id = id, error = %e, "observation delete -> failed");
                Err(e)
            }
        }
    }
}
