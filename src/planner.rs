//! Frequency planning: the calls the scheduling screen makes.
//!
//! Rows are validated before anything is written; discontinuations go
//! through the reconciler and the returned record replaces the stored one.

use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::config::SchedulerOptions;
use crate::db::{DatabaseError, FrequencyStore};
use crate::models::{
    Discipline, Episode, Frequency, FrequencyBook, FrequencyRow, FrequencyScope, FrequencyStatus,
};
use crate::schedule::{self, DiscontinueOutcome, Discontinued, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Frequency not found: {0}")]
    FrequencyNotFound(Uuid),
}

pub struct FrequencyPlanner<'a, S: FrequencyStore> {
    store: &'a S,
    options: SchedulerOptions,
}

impl<'a, S: FrequencyStore> FrequencyPlanner<'a, S> {
    pub fn new(store: &'a S, options: SchedulerOptions) -> Self {
        Self { store, options }
    }

    /// Loads a discipline's new and current frequencies into a book.
    pub fn load(&self, episode: &Episode, discipline: Discipline) -> Result<FrequencyBook, SchedulerError> {
        let mut book = FrequencyBook::new();
        for status in FrequencyStatus::ALL {
            for f in self.store.load_frequencies(&episode.id, discipline, status)? {
                book.insert(f);
            }
        }
        Ok(book)
    }

    /// Validates the edited rows together with the stored frequencies they
    /// share a scope with, then saves only the edited rows. Nothing is
    /// written when validation fails.
    pub fn submit(&self, episode: &Episode, rows: &[FrequencyRow]) -> Result<Vec<Frequency>, SchedulerError> {
        let stored = self.stored_alongside(episode, rows)?;
        let mut checked = rows.to_vec();
        checked.extend(stored.iter().map(FrequencyRow::from));

        let mut frequencies = schedule::validate(&checked, episode, &self.options).inspect_err(|e| {
            tracing::warn!(kind = ?e.kind, discipline = ?e.discipline, "Frequency rows rejected");
        })?;
        // Parsed rows come back in input order; the stored tail is not rewritten.
        frequencies.truncate(rows.len());

        let saved = self.store.save_frequencies(&episode.id, &frequencies)?;
        tracing::info!(episode = %episode.id, count = saved.len(), "Frequencies saved");
        Ok(saved)
    }

    /// Discontinues one stored frequency and saves the result. An earlier
    /// discontinuation is kept as is; only a blank reason gets filled.
    pub fn discontinue(
        &self,
        episode: &Episode,
        discipline: Discipline,
        frequency_id: &Uuid,
        date: NaiveDate,
        reason: &str,
    ) -> Result<Discontinued, SchedulerError> {
        let book = self.load(episode, discipline)?;
        let frequency = book
            .find(frequency_id)
            .ok_or(SchedulerError::FrequencyNotFound(*frequency_id))?;

        let weeks = schedule::build_work_weeks(episode);
        let Discontinued { frequency, outcome } =
            schedule::discontinue(frequency, date, reason, &weeks)?;

        let mut saved = self.store.save_frequencies(&episode.id, &[frequency])?;
        let frequency = saved
            .pop()
            .ok_or(SchedulerError::FrequencyNotFound(*frequency_id))?;

        if outcome != DiscontinueOutcome::AlreadyDiscontinued {
            tracing::info!(
                discipline = discipline.code(),
                outcome = ?outcome,
                date = %date,
                "Frequency discontinued"
            );
        }
        Ok(Discontinued { frequency, outcome })
    }

    /// Current frequencies in the scopes `rows` touch that the caller did
    /// not resubmit.
    fn stored_alongside(&self, episode: &Episode, rows: &[FrequencyRow]) -> Result<Vec<Frequency>, SchedulerError> {
        let scopes: BTreeSet<FrequencyScope> = rows
            .iter()
            .map(|r| FrequencyScope {
                discipline: r.discipline,
                is_pho: r.is_pho,
            })
            .collect();
        let submitted: HashSet<Uuid> = rows.iter().filter_map(|r| r.id).collect();
        let disciplines: BTreeSet<Discipline> = scopes.iter().map(|s| s.discipline).collect();

        let mut stored = Vec::new();
        for discipline in disciplines {
            for f in self.store.load_frequencies(&episode.id, discipline, FrequencyStatus::Current)? {
                let resubmitted = f.id.is_some_and(|id| submitted.contains(&id));
                if scopes.contains(&f.scope()) && !resubmitted {
                    stored.push(f);
                }
            }
        }
        Ok(stored)
    }

    pub fn deactivate(&self, ids: &[Uuid]) -> Result<(), SchedulerError> {
        self.store.deactivate_frequencies(ids)?;
        tracing::info!(count = ids.len(), "Frequencies deactivated");
        Ok(())
    }
}
