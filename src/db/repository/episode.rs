use chrono::Weekday;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::{parse_date, parse_uuid};
use crate::db::DatabaseError;
use crate::models::Episode;

pub fn insert_episode(conn: &Connection, episode: &Episode) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO episodes (id, start_date, end_date, first_work_week_day)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            episode.id.to_string(),
            episode.start_date.to_string(),
            episode.end_date.to_string(),
            episode.first_work_week_day.to_string(),
        ],
    )?;
    Ok(())
}

pub fn get_episode(conn: &Connection, id: &Uuid) -> Result<Option<Episode>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, start_date, end_date, first_work_week_day FROM episodes WHERE id = ?1",
            params![id.to_string()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            },
        )
        .optional()?;

    let Some((id, start, end, first_day)) = row else {
        return Ok(None);
    };

    let first_work_week_day = first_day.parse::<Weekday>().map_err(|_| DatabaseError::InvalidEnum {
        field: "Weekday".into(),
        value: first_day.clone(),
    })?;

    Ok(Some(Episode {
        id: parse_uuid(&id)?,
        start_date: parse_date("start_date", &start)?,
        end_date: parse_date("end_date", &end)?,
        first_work_week_day,
    }))
}
