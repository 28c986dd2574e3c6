use std::str::FromStr;

use rusqlite::{params, Connection};
use uuid::Uuid;

use super::{parse_date, parse_uuid, FrequencyStore};
use crate::db::DatabaseError;
use crate::models::*;

impl FrequencyStore for Connection {
    fn load_frequencies(
        &self,
        episode_id: &Uuid,
        discipline: Discipline,
        status: FrequencyStatus,
    ) -> Result<Vec<Frequency>, DatabaseError> {
        let mut stmt = self.prepare(
            "SELECT id, discipline, status, is_pho, effective_date, unit, occurrence_min,
             occurrence_max, duration, prn_visits, discontinue_date, discontinue_reason,
             discontinue_flag, pending
             FROM frequencies
             WHERE episode_id = ?1 AND discipline = ?2 AND status = ?3 AND active = 1
             ORDER BY effective_date, rowid",
        )?;

        let rows = stmt.query_map(
            params![episode_id.to_string(), discipline.as_str(), status.as_str()],
            |row| Ok(frequency_row_from_rusqlite(row)),
        )?;

        let mut frequencies = Vec::new();
        for row in rows {
            frequencies.push(frequency_from_row(row??)?);
        }
        Ok(frequencies)
    }

    fn save_frequencies(
        &self,
        episode_id: &Uuid,
        frequencies: &[Frequency],
    ) -> Result<Vec<Frequency>, DatabaseError> {
        let tx = self.unchecked_transaction()?;
        let mut saved = Vec::with_capacity(frequencies.len());

        for f in frequencies {
            let stored = Frequency {
                id: Some(f.id.unwrap_or_else(Uuid::new_v4)),
                status: FrequencyStatus::Current,
                ..f.clone()
            };
            upsert_frequency(&tx, episode_id, &stored)?;
            saved.push(stored);
        }

        tx.commit()?;
        tracing::debug!(count = saved.len(), episode = %episode_id, "Saved frequencies");
        Ok(saved)
    }

    fn deactivate_frequencies(&self, ids: &[Uuid]) -> Result<(), DatabaseError> {
        let tx = self.unchecked_transaction()?;
        for id in ids {
            let changed = tx.execute(
                "UPDATE frequencies SET active = 0 WHERE id = ?1",
                params![id.to_string()],
            )?;
            if changed == 0 {
                return Err(DatabaseError::NotFound {
                    entity_type: "Frequency".into(),
                    id: id.to_string(),
                });
            }
        }
        tx.commit()?;
        Ok(())
    }
}

fn upsert_frequency(
    conn: &Connection,
    episode_id: &Uuid,
    f: &Frequency,
) -> Result<(), DatabaseError> {
    let id = f
        .id
        .ok_or_else(|| DatabaseError::ConstraintViolation("frequency saved without id".into()))?;
    conn.execute(
        "INSERT INTO frequencies (id, episode_id, discipline, status, is_pho, effective_date,
         unit, occurrence_min, occurrence_max, duration, prn_visits, discontinue_date,
         discontinue_reason, discontinue_flag, pending)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
         ON CONFLICT(id) DO UPDATE SET
            status = excluded.status,
            is_pho = excluded.is_pho,
            effective_date = excluded.effective_date,
            unit = excluded.unit,
            occurrence_min = excluded.occurrence_min,
            occurrence_max = excluded.occurrence_max,
            duration = excluded.duration,
            prn_visits = excluded.prn_visits,
            discontinue_date = excluded.discontinue_date,
            discontinue_reason = excluded.discontinue_reason,
            discontinue_flag = excluded.discontinue_flag,
            pending = excluded.pending",
        params![
            id.to_string(),
            episode_id.to_string(),
            f.discipline.as_str(),
            f.status.as_str(),
            f.is_pho as i32,
            f.effective_date.to_string(),
            f.unit.as_str(),
            f.occurrence_min,
            f.occurrence_max,
            f.duration,
            f.prn_visits,
            f.discontinue_date.map(|d| d.to_string()),
            f.discontinue_reason,
            f.discontinue_flag as i32,
            f.pending as i32,
        ],
    )?;
    Ok(())
}

struct StoredFrequency {
    id: String,
    discipline: String,
    status: String,
    is_pho: i32,
    effective_date: String,
    unit: String,
    occurrence_min: u32,
    occurrence_max: u32,
    duration: u32,
    prn_visits: Option<u32>,
    discontinue_date: Option<String>,
    discontinue_reason: Option<String>,
    discontinue_flag: i32,
    pending: i32,
}

fn frequency_row_from_rusqlite(row: &rusqlite::Row<'_>) -> Result<StoredFrequency, rusqlite::Error> {
    Ok(StoredFrequency {
        id: row.get(0)?,
        discipline: row.get(1)?,
        status: row.get(2)?,
        is_pho: row.get(3)?,
        effective_date: row.get(4)?,
        unit: row.get(5)?,
        occurrence_min: row.get(6)?,
        occurrence_max: row.get(7)?,
        duration: row.get(8)?,
        prn_visits: row.get(9)?,
        discontinue_date: row.get(10)?,
        discontinue_reason: row.get(11)?,
        discontinue_flag: row.get(12)?,
        pending: row.get(13)?,
    })
}

fn frequency_from_row(row: StoredFrequency) -> Result<Frequency, DatabaseError> {
    Ok(Frequency {
        id: Some(parse_uuid(&row.id)?),
        discipline: Discipline::from_str(&row.discipline)?,
        status: FrequencyStatus::from_str(&row.status)?,
        is_pho: row.is_pho != 0,
        effective_date: parse_date("effective_date", &row.effective_date)?,
        unit: FrequencyUnit::from_str(&row.unit)?,
        occurrence_min: row.occurrence_min,
        occurrence_max: row.occurrence_max,
        duration: row.duration,
        prn_visits: row.prn_visits,
        discontinue_date: row
            .discontinue_date
            .map(|d| parse_date("discontinue_date", &d))
            .transpose()?,
        discontinue_reason: row.discontinue_reason,
        discontinue_flag: row.discontinue_flag != 0,
        pending: row.pending != 0,
    })
}
