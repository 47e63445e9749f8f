//! Observation storage, always scoped to one hike.

use rusqlite::params;
use std::sync::Arc;

use crate::db::Database;
use crate::error::{StoreError, StoreResult};
use crate::model::Observation;

const OBSERVATION_COLUMNS: &str = "id, hike_id, observed_at, note, comments";

pub struct ObservationStore {
    db: Arc<Database>,
}

impl ObservationStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert a new observation. Returns the generated id.
    pub fn insert(&self, obs: &Observation) -> StoreResult<i64> {
        validate(obs)?;
        let conn = self.db.conn();
        conn.execute(
            "INSERT INTO observations (hike_id, observed_at, note, comments)
             VALUES (?1, ?2, ?3, ?4)",
            params![obs.hike_id, obs.observed_at, obs.note, obs.comments],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn update(&self, obs: &Observation) -> StoreResult<usize> {
        let id = obs
            .id
            .ok_or_else(|| StoreError::validation("cannot update an observation without an id"))?;
        validate(obs)?;
        let conn = self.db.conn();
        let rows = conn.execute(
            "UPDATE observations SET hike_id = ?1, observed_at = ?2, note = ?3, comments = ?4
             WHERE id = ?5",
            params![obs.hike_id, obs.observed_at, obs.note, obs.comments, id],
        )?;
        Ok(rows)
    }

    pub fn delete(&self, id: i64) -> StoreResult<usize> {
        let conn = self.db.conn();
        let rows = conn.execute("DELETE FROM observations WHERE id = ?1", params![id])?;
        Ok(rows)
    }

    /// Remove every observation attached to one hike.
    pub fn delete_all_for_hike(&self, hike_id: i64) -> StoreResult<usize> {
        let conn = self.db.conn();
        let rows = conn.execute(
            "DELETE FROM observations WHERE hike_id = ?1",
            params![hike_id],
        )?;
        Ok(rows)
    }

    pub fn find_by_id(&self, id: i64) -> StoreResult<Option<Observation>> {
        let conn = self.db.conn();
        let row = conn.query_row(
            &format!("SELECT {OBSERVATION_COLUMNS} FROM observations WHERE id = ?1"),
            params![id],
            map_observation,
        );
        match row {
            Ok(obs) => Ok(Some(obs)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Observations for one hike, newest first.
    pub fn list_by_hike(&self, hike_id: i64) -> StoreResult<Vec<Observation>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {OBSERVATION_COLUMNS} FROM observations
             WHERE hike_id = ?1 ORDER BY observed_at DESC"
        ))?;
        let observations = stmt
            .query_map(params![hike_id], map_observation)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(observations)
    }

    pub fn count_for_hike(&self, hike_id: i64) -> StoreResult<i64> {
        let conn = self.db.conn();
        let count = conn.query_row(
            "SELECT COUNT(*) FROM observations WHERE hike_id = ?1",
            params![hike_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

fn validate(obs: &Observation) -> StoreResult<()> {
    if obs.note.trim().is_empty() {
        return Err(StoreError::validation("observation note is required"));
    }
    Ok(())
}

fn map_observation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Observation> {
    Ok(Observation {
        id: Some(row.get(0)?),
        hike_id: row.get(1)?,
        observed_at: row.get(2)?,
        note: row.get(3)?,
        comments: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::PasswordHasher;
    use crate::model::{Difficulty, Hike};
    use crate::store::{HikeStore, UserStore};
    use tempfile::TempDir;

    fn test_db_with_hike() -> (TempDir, Arc<Database>, i64) {
        let tmp = TempDir::new().unwrap();
        let db = Arc::new(Database::open(&tmp.path().join("trail.db")).unwrap());
        let users = UserStore::with_hasher(db.clone(), PasswordHasher::with_iterations(100));
        let user_id = users
            .create("Test Hiker", "hiker@example.com", "password1", None)
            .unwrap();
        let hikes = HikeStore::new(db.clone());
        let hike_id = hikes
            .insert(&Hike {
                id: None,
                user_id,
                name: "Cat Bells".into(),
                location: "Keswick".into(),
                hike_date: 1_700_000_000_000,
                parking: true,
                length_km: 5.5,
                difficulty: Difficulty::Easy,
                description: None,
                elevation_gain_m: None,
                max_group_size: None,
                cover_image: None,
            })
            .unwrap();
        (tmp, db, hike_id)
    }

    fn make_obs(hike_id: i64, observed_at: i64, note: &str) -> Observation {
        Observation {
            id: None,
            hike_id,
            observed_at,
            note: note.into(),
            comments: None,
        }
    }

    #[test]
    fn insert_and_find() {
        let (_tmp, db, hike_id) = test_db_with_hike();
        let store = ObservationStore::new(db);

        let mut obs = make_obs(hike_id, 42, "Herdwick sheep on the path");
        obs.comments = Some("a whole flock".into());
        let id = store.insert(&obs).unwrap();

        let found = store.find_by_id(id).unwrap().unwrap();
        assert_eq!(found.hike_id, hike_id);
        assert_eq!(found.observed_at, 42);
        assert_eq!(found.note, "Herdwick sheep on the path");
        assert_eq!(found.comments.as_deref(), Some("a whole flock"));
    }

    #[test]
    fn insert_requires_note() {
        let (_tmp, db, hike_id) = test_db_with_hike();
        let store = ObservationStore::new(db);
        assert!(store.insert(&make_obs(hike_id, 1, "  ")).is_err());
    }

    #[test]
    fn insert_rejects_unknown_hike() {
        let (_tmp, db, _hike_id) = test_db_with_hike();
        let store = ObservationStore::new(db);

        // FK enforcement is on, so a dangling hike_id is a storage error.
        let err = store.insert(&make_obs(9999, 1, "orphan")).unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));
    }

    #[test]
    fn update_and_delete() {
        let (_tmp, db, hike_id) = test_db_with_hike();
        let store = ObservationStore::new(db);

        let mut obs = make_obs(hike_id, 1, "first");
        assert!(store.update(&obs).is_err());

        let id = store.insert(&obs).unwrap();
        obs.id = Some(id);
        obs.note = "revised".into();
        assert_eq!(store.update(&obs).unwrap(), 1);
        assert_eq!(store.find_by_id(id).unwrap().unwrap().note, "revised");

        assert_eq!(store.delete(id).unwrap(), 1);
        assert_eq!(store.delete(id).unwrap(), 0);
        assert!(store.find_by_id(id).unwrap().is_none());
    }

    #[test]
    fn list_by_hike_is_newest_first() {
        let (_tmp, db, hike_id) = test_db_with_hike();
        let store = ObservationStore::new(db);

        store.insert(&make_obs(hike_id, 100, "early")).unwrap();
        store.insert(&make_obs(hike_id, 300, "late")).unwrap();
        store.insert(&make_obs(hike_id, 200, "middle")).unwrap();

        let notes: Vec<String> = store
            .list_by_hike(hike_id)
            .unwrap()
            .into_iter()
            .map(|o| o.note)
            .collect();
        assert_eq!(notes, vec!["late", "middle", "early"]);
        assert_eq!(store.count_for_hike(hike_id).unwrap(), 3);
    }

    #[test]
    fn delete_all_for_hike_clears_only_that_hike() {
        let (_tmp, db, hike_id) = test_db_with_hike();
        let hikes = HikeStore::new(db.clone());
        let store = ObservationStore::new(db);

        let other_hike = hikes
            .insert(&Hike {
                id: None,
                user_id: 1,
                name: "Other".into(),
                location: "Elsewhere".into(),
                hike_date: 1,
                parking: false,
                length_km: 3.0,
                difficulty: Difficulty::Easy,
                description: None,
                elevation_gain_m: None,
                max_group_size: None,
                cover_image: None,
            })
            .unwrap();

        store.insert(&make_obs(hike_id, 1, "a")).unwrap();
        store.insert(&make_obs(hike_id, 2, "b")).unwrap();
        store.insert(&make_obs(other_hike, 3, "c")).unwrap();

        assert_eq!(store.delete_all_for_hike(hike_id).unwrap(), 2);
        assert_eq!(store.count_for_hike(hike_id).unwrap(), 0);
        assert_eq!(store.count_for_hike(other_hike).unwrap(), 1);
    }
}
