//! Hike record storage: CRUD, name search, and criteria-based filtering.

use rusqlite::params;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::now_millis;
use crate::db::Database;
use crate::error::{StoreError, StoreResult};
use crate::model::{Difficulty, Hike};

const HIKE_COLUMNS: &str = "id, user_id, name, location, hike_date, parking, length_km, \
                            difficulty, description, elevation_gain_m, max_group_size, cover_image";

/// Optional search criteria. Omitted fields impose no constraint; supplied
/// ones are combined conjunctively.
///
/// `to_date` is inclusive; callers filtering by calendar day should pass it
/// through [`end_of_day_millis`] first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HikeSearch {
    /// Case-insensitive prefix match on the hike name.
    pub name_prefix: Option<String>,
    /// Earliest hike date, inclusive (epoch millis).
    pub from_date: Option<i64>,
    /// Latest hike date, inclusive (epoch millis).
    pub to_date: Option<i64>,
    /// Minimum trail length, inclusive (km).
    pub min_length_km: Option<f64>,
    /// Maximum trail length, inclusive (km).
    pub max_length_km: Option<f64>,
}

/// Normalize an epoch-millis timestamp to the last millisecond of its UTC
/// calendar day, for use as an inclusive range upper bound.
pub fn end_of_day_millis(epoch_ms: i64) -> i64 {
    const DAY_MS: i64 = 86_400_000;
    epoch_ms.div_euclid(DAY_MS) * DAY_MS + DAY_MS - 1
}

pub struct HikeStore {
    db: Arc<Database>,
}

impl HikeStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert a new hike. Returns the generated id.
    pub fn insert(&self, hike: &Hike) -> StoreResult<i64> {
        validate(hike)?;
        let now = now_millis();
        let conn = self.db.conn();
        conn.execute(
            "INSERT INTO hikes (user_id, name, location, hike_date, parking, length_km,
                                difficulty, description, elevation_gain_m, max_group_size,
                                cover_image, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                hike.user_id,
                hike.name,
                hike.location,
                hike.hike_date,
                hike.parking,
                hike.length_km,
                hike.difficulty.as_str(),
                hike.description,
                hike.elevation_gain_m,
                hike.max_group_size,
                hike.cover_image,
                now,
                now,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Update every mutable column of an existing hike. Returns rows affected.
    pub fn update(&self, hike: &Hike) -> StoreResult<usize> {
        let id = hike
            .id
            .ok_or_else(|| StoreError::validation("cannot update a hike without an id"))?;
        validate(hike)?;
        let conn = self.db.conn();
        let rows = conn.execute(
            "UPDATE hikes SET user_id = ?1, name = ?2, location = ?3, hike_date = ?4,
                              parking = ?5, length_km = ?6, difficulty = ?7, description = ?8,
                              elevation_gain_m = ?9, max_group_size = ?10, cover_image = ?11,
                              updated_at = ?12
             WHERE id = ?13",
            params![
                hike.user_id,
                hike.name,
                hike.location,
                hike.hike_date,
                hike.parking,
                hike.length_km,
                hike.difficulty.as_str(),
                hike.description,
                hike.elevation_gain_m,
                hike.max_group_size,
                hike.cover_image,
                now_millis(),
                id,
            ],
        )?;
        Ok(rows)
    }

    /// Delete one hike. Its observations go with it (FK cascade).
    pub fn delete(&self, id: i64) -> StoreResult<usize> {
        let conn = self.db.conn();
        let rows = conn.execute("DELETE FROM hikes WHERE id = ?1", params![id])?;
        Ok(rows)
    }

    pub fn delete_all(&self) -> StoreResult<usize> {
        let conn = self.db.conn();
        let rows = conn.execute("DELETE FROM hikes", [])?;
        Ok(rows)
    }

    pub fn find_by_id(&self, id: i64) -> StoreResult<Option<Hike>> {
        let conn = self.db.conn();
        let row = conn.query_row(
            &format!("SELECT {HIKE_COLUMNS} FROM hikes WHERE id = ?1"),
            params![id],
            map_hike,
        );
        match row {
            Ok(hike) => Ok(Some(hike)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// All hikes belonging to one user, most recent date first.
    pub fn list_by_owner(&self, user_id: i64) -> StoreResult<Vec<Hike>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {HIKE_COLUMNS} FROM hikes WHERE user_id = ?1 ORDER BY hike_date DESC"
        ))?;
        let hikes = stmt
            .query_map(params![user_id], map_hike)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(hikes)
    }

    pub fn list_all(&self) -> StoreResult<Vec<Hike>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {HIKE_COLUMNS} FROM hikes ORDER BY hike_date DESC"
        ))?;
        let hikes = stmt
            .query_map([], map_hike)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(hikes)
    }

    pub fn count(&self) -> StoreResult<i64> {
        let conn = self.db.conn();
        let count = conn.query_row("SELECT COUNT(*) FROM hikes", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Case-insensitive substring match on the name; returns the most
    /// recently dated match, if any.
    pub fn search_by_name(&self, query: &str) -> StoreResult<Option<Hike>> {
        let pattern = format!("%{}%", query.trim());
        let conn = self.db.conn();
        let row = conn.query_row(
            &format!(
                "SELECT {HIKE_COLUMNS} FROM hikes
                 WHERE name LIKE ?1 COLLATE NOCASE
                 ORDER BY hike_date DESC
                 LIMIT 1"
            ),
            params![pattern],
            map_hike,
        );
        match row {
            Ok(hike) => Ok(Some(hike)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Filtered search built only from the supplied criteria. No criteria
    /// means every hike, date descending.
    pub fn search(&self, criteria: &HikeSearch) -> StoreResult<Vec<Hike>> {
        let mut sql = format!("SELECT {HIKE_COLUMNS} FROM hikes WHERE 1=1");
        let mut bind_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();
        let mut param_idx = 1;

        let prefix = criteria
            .name_prefix
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty());
        if let Some(prefix) = prefix {
            sql.push_str(&format!(" AND name LIKE ?{param_idx} COLLATE NOCASE"));
            bind_values.push(Box::new(format!("{prefix}%")));
            param_idx += 1;
        }
        if let Some(from) = criteria.from_date {
            sql.push_str(&format!(" AND hike_date >= ?{param_idx}"));
            bind_values.push(Box::new(from));
            param_idx += 1;
        }
        if let Some(to) = criteria.to_date {
            sql.push_str(&format!(" AND hike_date <= ?{param_idx}"));
            bind_values.push(Box::new(to));
            param_idx += 1;
        }
        if let Some(min) = criteria.min_length_km {
            sql.push_str(&format!(" AND length_km >= ?{param_idx}"));
            bind_values.push(Box::new(min));
            param_idx += 1;
        }
        if let Some(max) = criteria.max_length_km {
            sql.push_str(&format!(" AND length_km <= ?{param_idx}"));
            bind_values.push(Box::new(max));
        }

        sql.push_str(" ORDER BY hike_date DESC");

        let params_refs: Vec<&dyn rusqlite::types::ToSql> =
            bind_values.iter().map(|b| b.as_ref()).collect();

        let conn = self.db.conn();
        let mut stmt = conn.prepare(&sql)?;
        let hikes = stmt
            .query_map(params_refs.as_slice(), map_hike)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(hikes)
    }

    /// Test seam: force a storage-layer fault so the generic error path can
    /// be exercised without a corrupt database.
    #[cfg(test)]
    pub(crate) fn inject_query_fault(&self) -> StoreResult<Option<Hike>> {
        let conn = self.db.conn();
        let row = conn.query_row("SELECT * FROM __no_such_table__", [], map_hike);
        match row {
            Ok(hike) => Ok(Some(hike)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

fn validate(hike: &Hike) -> StoreResult<()> {
    if hike.name.trim().is_empty() {
        return Err(StoreError::validation("hike name is required"));
    }
    if hike.location.trim().is_empty() {
        return Err(StoreError::validation("hike location is required"));
    }
    if !(hike.length_km > 0.0) {
        return Err(StoreError::validation("hike length must be greater than zero"));
    }
    Ok(())
}

fn map_hike(row: &rusqlite::Row<'_>) -> rusqlite::Result<Hike> {
    Ok(Hike {
        id: Some(row.get(0)?),
        user_id: row.get(1)?,
        name: row.get(2)?,
        location: row.get(3)?,
        hike_date: row.get(4)?,
        parking: row.get::<_, i64>(5)? != 0,
        length_km: row.get(6)?,
        difficulty: Difficulty::from_str_lossy(&row.get::<_, String>(7)?),
        description: row.get(8)?,
        elevation_gain_m: row.get(9)?,
        max_group_size: row.get(10)?,
        cover_image: row.get(11)?,
    })
}
