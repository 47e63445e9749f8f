//! Logging façade over [`HikeStore`].

use crate::error::{StoreError, StoreResult};
use crate::model::Hike;
use crate::store::{HikeSearch, HikeStore};

pub struct HikeRepo {
    store: HikeStore,
}

impl HikeRepo {
    pub fn new(store: HikeStore) -> Self {
        Self { store }
    }

    pub fn get_all(&self) -> StoreResult<Vec<Hike>> {
        match self.store.list_all() {
            Ok(list) => {
                tracing::info!(count = list.len(), "hike get_all -> ok");
                Ok(list)
            }
            Err(e) => {
                tracing::error!(error = %e, "hike get_all -> failed");
                Err(e)
            }
        }
    }

    pub fn get_all_by_owner(&self, user_id: i64) -> StoreResult<Vec<Hike>> {
        match self.store.list_by_owner(user_id) {
            Ok(list) => {
                tracing::info!(user_id, count = list.len(), "hike get_all_by_owner -> ok");
                Ok(list)
            }
            Err(e) => {
                tracing::error!(user_id, error = %e, "hike get_all_by_owner -> failed");
                Err(e)
            }
        }
    }

    /// Fetch one hike; a missing row is a [`StoreError::NotFound`].
    pub fn get(&self, id: i64) -> StoreResult<Hike> {
        match self.store.find_by_id(id) {
            Ok(Some(hike)) => {
                tracing::info!(hike_id = id, "hike get -> ok");
                Ok(hike)
            }
            Ok(None) => {
                let e = StoreError::not_found("hike", id);
                tracing::error!(hike_id = id, "hike get -> not found");
                Err(e)
            }
            Err(e) => {
                tracing::error!(hike_id = id, error = %e, "hike get -> failed");
                Err(e)
            }
        }
    }

    pub fn add(&self, hike: &Hike) -> StoreResult<i64> {
        match self.store.insert(hike) {
            Ok(id) => {
                tracing::info!(hike_id = id, user_id = hike.user_id, "hike add -> ok");
                Ok(id)
            }
            Err(e) => {
                tracing::error!(user_id = hike.user_id, error = %e, "hike add -> failed");
                Err(e)
            }
        }
    }

    pub fn update(&self, hike: &Hike) -> StoreResult<usize> {
        match self.store.update(hike) {
            Ok(rows) => {
                tracing::info!(hike_id = hike.id, rows, "hike update -> ok");
                Ok(rows)
            }
            Err(e) => {
                tracing::error!(hike_id = hike.id, error = %e, "hike update -> failed");
                Err(e)
            }
        }
    }

    pub fn delete(&self, id: i64) -> StoreResult<usize> {
        match self.store.delete(id) {
            Ok(rows) => {
                tracing::info!(hike_id = id, rows, "hike delete -> ok");
                Ok(rows)
            }
            Err(e) => {
                tracing::error!(hike_id = id, error = %e, "hike delete -> failed");
                Err(e)
            }
        }
    }

    pub fn delete_all(&self) -> StoreResult<usize> {
        match self.store.delete_all() {
            Ok(rows) => {
                tracing::warn!(rows, "hike delete_all -> ok");
                Ok(rows)
            }
            Err(e) => {
                tracing::error!(error = %e, "hike delete_all -> failed");
                Err(e)
            }
        }
    }

    pub fn search_by_name(&self, query: &str) -> StoreResult<Option<Hike>> {
        match self.store.search_by_name(query) {
            Ok(hit) => {
                tracing::info!(
                    query,
                    found = hit.is_some(),
                    "hike search_by_name -> ok"
                );
                Ok(hit)
            }
            Err(e) => {
                tracing::error!(query, error = %e, "hike search_by_name -> failed");
                Err(e)
            }
        }
    }

    pub fn search(&self, criteria: &HikeSearch) -> StoreResult<Vec<Hike>> {
        match self.store.search(criteria) {
            Ok(list) => {
                tracing::info!(count = list.len(), "hike search -> ok");
                Ok(list)
            }
            Err(e) => {
                tracing::error!(error = %e, "hike search -> failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::PasswordHasher;
    use crate::db::Database;
    use crate::model::Difficulty;
    use crate::store::UserStore;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn test_repo() -> (TempDir, HikeRepo, i64) {
        let tmp = TempDir::new().unwrap();
        let db = Arc::new(Database::open(&tmp.path().join("trail.db")).unwrap());
        let users = UserStore::with_hasher(db.clone(), PasswordHasher::with_iterations(100));
        let user_id = users
            .create("Test Hiker", "hiker@example.com", "password1", None)
            .unwrap();
        (tmp, HikeRepo::new(HikeStore::new(db)), user_id)
    }

    fn make_hike(user_id: i64, name: &str, date: i64) -> Hike {
        Hike {
            id: None,
            user_id,
            name: name.into(),
            location: "Peak District".into(),
            hike_date: date,
            parking: false,
            length_km: 8.0,
            difficulty: Difficulty::Moderate,
            description: None,
            elevation_gain_m: None,
            max_group_size: None,
            cover_image: None,
        }
    }

    #[test]
    fn add_get_delete_round_trip() {
        let (_tmp, repo, user_id) = test_repo();

        let id = repo.add(&make_hike(user_id, "Kinder Scout", 1_000)).unwrap();
        let hike = repo.get(id).unwrap();
        assert_eq!(hike.name, "Kinder Scout");

        assert_eq!(repo.delete(id).unwrap(), 1);
        let err = repo.get(id).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        assert_eq!(err.to_string(), format!("hike {id} not found"));
    }

    #[test]
    fn update_forwards_rows_affected() {
        let (_tmp, repo, user_id) = test_repo();

        let mut hike = make_hike(user_id, "Mam Tor", 1_000);
        let id = repo.add(&hike).unwrap();
        hike.id = Some(id);
        hike.name = "Mam Tor Circular".into();
        assert_eq!(repo.update(&hike).unwrap(), 1);
        assert_eq!(repo.get(id).unwrap().name, "Mam Tor Circular");
    }

    #[test]
    fn owner_scoped_listing_and_delete_all() {
        let (_tmp, repo, user_id) = test_repo();

        repo.add(&make_hike(user_id, "A", 1)).unwrap();
        repo.add(&make_hike(user_id, "B", 2)).unwrap();
        assert_eq!(repo.get_all_by_owner(user_id).unwrap().len(), 2);
        assert_eq!(repo.get_all().unwrap().len(), 2);

        assert_eq!(repo.delete_all().unwrap(), 2);
        assert!(repo.get_all().unwrap().is_empty());
    }

    #[test]
    fn validation_errors_pass_through_unchanged() {
        let (_tmp, repo, user_id) = test_repo();

        let mut bad = make_hike(user_id, "Bad", 1);
        bad.length_km = 0.0;
        let err = repo.add(&bad).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(err.to_string(), "hike length must be greater than zero");
    }

    #[test]
    fn search_paths_forward_results() {
        let (_tmp, repo, user_id) = test_repo();

        repo.add(&make_hike(user_id, "Stanage Edge", 2_000)).unwrap();
        repo.add(&make_hike(user_id, "Bamford Edge", 1_000)).unwrap();

        assert_eq!(
            repo.search_by_name("edge").unwrap().unwrap().name,
            "Stanage Edge"
        );
        assert_eq!(repo.search(&HikeSearch::default()).unwrap().len(), 2);
        assert!(repo.search_by_name("tor").unwrap().is_none());
    }
}
