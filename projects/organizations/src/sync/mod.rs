//! Sync pass: fetch each configured year and insert what is new.
//!
//! Years are processed in order, one at a time. A year that fails to fetch,
//! parse or reach the store is logged and recorded in the [`SyncReport`]; the
//! pass always moves on to the next year and never rolls back. A single row
//! rejected by the database is logged and counted, and the year carries on.

pub mod source;

use interfaces_gsoc_organizations::index::FetchFailureKind;
use tracing::{info, warn};

use crate::db::organization::models::NewOrganization;
use crate::store::OrganizationStore;
pub use source::OrganizationSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearFailureKind {
    FetchFailed,
    ParseFailed,
    StoreFailed,
}

impl From<FetchFailureKind> for YearFailureKind {
    fn from(kind: FetchFailureKind) -> Self {
        match kind {
            FetchFailureKind::FetchFailed => Self::FetchFailed,
            FetchFailureKind::ParseFailed => Self::ParseFailed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearOutcome {
    /// `failed` counts rows the database rejected; the rest of the year
    /// was still stored.
    Synced {
        year: i32,
        fetched: usize,
        inserted: usize,
        skipped: usize,
        failed: usize,
    },
    Failed {
        year: i32,
        kind: YearFailureKind,
        message: String,
    },
}

impl YearOutcome {
    pub fn year(&self) -> i32 {
        match self {
            Self::Synced { year, .. } | Self::Failed { year, .. } => *year,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub years: Vec<YearOutcome>,
}

impl SyncReport {
    pub fn inserted_total(&self) -> usize {
        self.years
            .iter()
            .map(|outcome| match outcome {
                YearOutcome::Synced { inserted, .. } => *inserted,
                YearOutcome::Failed { .. } => 0,
            })
            .sum()
    }

    pub fn failed_years(&self) -> Vec<i32> {
        self.years
            .iter()
            .filter(|outcome| matches!(outcome, YearOutcome::Failed { .. }))
            .map(YearOutcome::year)
            .collect()
    }
}

pub async fn run_sync_pass(
    source: &dyn OrganizationSource,
    store: &dyn OrganizationStore,
    years: &[i32],
) -> SyncReport {
    info!(?years, "Sync pass started");

    let mut report = SyncReport::default();
    for &year in years {
        let outcome = sync_year(source, store, year).await;
        if let YearOutcome::Failed { kind, message, .. } = &outcome {
            warn!(year, ?kind, error = %message, "Skipping year");
        }
        report.years.push(outcome);
    }

    info!(
        inserted = report.inserted_total(),
        failed_years = ?report.failed_years(),
        "Sync pass finished"
    );
    report
}

async fn sync_year(
    source: &dyn OrganizationSource,
    store: &dyn OrganizationStore,
    year: i32,
) -> YearOutcome {
    info!(year, url = %source.describe(year), "Fetching organizations");

    let fetched = match source.fetch_year(year).await {
        Ok(fetched) => fetched,
        Err(err) => {
            return YearOutcome::Failed {
                year,
                kind: err.kind().into(),
                message: err.to_string(),
            }
        }
    };

    let total = fetched.len();
    let mut inserted = 0;
    let mut skipped = 0;
    let mut failed = 0;

    for (name, metadata) in fetched {
        if name.trim().is_empty() {
            warn!(year, "Skipping organization with empty name");
            skipped += 1;
            continue;
        }

        let name_for_log = name.clone();
        let new = NewOrganization {
            name,
            description: metadata.description,
            url: metadata.url,
            year,
        };
        match store.insert_if_absent(new).await {
            Ok(true) => inserted += 1,
            Ok(false) => {}
            Err(err) if err.is_row_error() => {
                warn!(year, name = %name_for_log, error = %err, "Failed to store organization");
                failed += 1;
            }
            Err(err) => {
                return YearOutcome::Failed {
                    year,
                    kind: YearFailureKind::StoreFailed,
                    message: err.to_string(),
                }
            }
        }
    }

    info!(year, fetched = total, inserted, failed, "Year synced");
    YearOutcome::Synced {
        year,
        fetched: total,
        inserted,
        skipped,
        failed,
    }
}
