//! Contest service: time-boxed competitions and entry bookkeeping.

use chrono::{DateTime, Duration, Utc};
use crowdstock_common::{AppError, AppResult, IdGenerator};
use crowdstock_db::{
    entities::{contest, contest_entry},
    repositories::ContestRepository,
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

pub use crowdstock_db::entities::contest::ContestStatus;

/// Length of the upload phase from contest start.
pub const UPLOAD_PHASE_DAYS: i64 = 10;

/// Length of the whole contest (upload + review phases) from start.
pub const REVIEW_PHASE_DAYS: i64 = 20;

/// Default total prize pool in XP.
pub const DEFAULT_PRIZE_POOL: i32 = 16000;

/// Input for creating a contest.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateContestInput {
    #[validate(length(min = 1, max = 256))]
    pub name: String,

    pub start_date: DateTime<Utc>,

    /// Total prize pool in XP; defaults when absent.
    pub total_prize_pool: Option<i32>,
}

/// Externally computed final placement for one entry.
#[derive(Debug, Clone)]
pub struct EntryResult {
    pub entry_id: String,
    pub final_rank: i32,
    pub prize_amount: i32,
}

/// Contest service for business logic.
#[derive(Clone)]
pub struct ContestService {
    contest_repo: ContestRepository,
    id_gen: IdGenerator,
}

impl ContestService {
    /// Create a new contest service.
    #[must_use]
    pub const fn new(contest_repo: ContestRepository) -> Self {
        Self {
            contest_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a contest. Phase boundaries are derived from the start date:
    /// uploads for 10 days, reviews until day 20.
    pub async fn create_contest(&self, input: CreateContestInput) -> AppResult<contest::Model> {
        input.validate()?;

        let model = contest::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(input.name),
            start_date: Set(input.start_date.into()),
            upload_phase_end: Set((input.start_date + Duration::days(UPLOAD_PHASE_DAYS)).into()),
            review_phase_end: Set((input.start_date + Duration::days(REVIEW_PHASE_DAYS)).into()),
            status: Set(ContestStatus::Active),
            total_prize_pool: Set(input.total_prize_pool.unwrap_or(DEFAULT_PRIZE_POOL)),
            created_at: Set(Utc::now().into()),
        };

        self.contest_repo.create(model).await
    }

    /// Get a contest by ID.
    pub async fn get(&self, id: &str) -> AppResult<contest::Model> {
        self.contest_repo.get_by_id(id).await
    }

    /// Get active contests, newest first.
    pub async fn active_contests(&self) -> AppResult<Vec<contest::Model>> {
        self.contest_repo.find_active().await
    }

    /// Count an upload toward an account's contest entry.
    ///
    /// Only valid while the upload phase is open.
    pub async fn record_upload(&self, contest_id: &str, account_id: &str) -> AppResult<()> {
        let contest = self.contest_repo.get_by_id(contest_id).await?;
        if !upload_phase_open(&contest, Utc::now()) {
            return Err(AppError::BadRequest("Upload phase is closed".to_string()));
        }

        let entry = self.get_or_create_entry(contest_id, account_id).await?;
        self.contest_repo.increment_entry_uploads(&entry.id).await
    }

    /// Count a review toward an account's contest entry.
    ///
    /// Valid until the review phase ends.
    pub async fn record_review(&self, contest_id: &str, account_id: &str) -> AppResult<()> {
        let contest = self.contest_repo.get_by_id(contest_id).await?;
        if !review_phase_open(&contest, Utc::now()) {
            return Err(AppError::BadRequest("Review phase is closed".to_string()));
        }

        let entry = self.get_or_create_entry(contest_id, account_id).await?;
        self.contest_repo.increment_entry_reviews(&entry.id).await
    }

    /// Accumulate contest XP on an account's entry.
    pub async fn record_xp(&self, contest_id: &str, account_id: &str, delta: i32) -> AppResult<()> {
        let contest = self.contest_repo.get_by_id(contest_id).await?;
        if contest.status != ContestStatus::Active {
            return Err(AppError::BadRequest("Contest has ended".to_string()));
        }

        let entry = self.get_or_create_entry(contest_id, account_id).await?;
        self.contest_repo.add_entry_xp(&entry.id, delta).await
    }

    /// Close a contest and return its entries ordered by contest XP,
    /// highest first - the aggregate read behind final ranking. The
    /// ranking/payout algorithm itself is external; its output comes back
    /// through [`Self::record_results`].
    pub async fn close_contest(&self, contest_id: &str) -> AppResult<Vec<contest_entry::Model>> {
        let contest = self.contest_repo.get_by_id(contest_id).await?;

        if contest.status != ContestStatus::Active {
            return Err(AppError::BadRequest("Contest already ended".to_string()));
        }

        let mut active: contest::ActiveModel = contest.into();
        active.status = Set(ContestStatus::Ended);
        self.contest_repo.update(active).await?;

        self.contest_repo.find_entries_by_xp(contest_id).await
    }

    /// Persist externally computed final ranks and prize amounts.
    pub async fn record_results(
        &self,
        contest_id: &str,
        results: &[EntryResult],
    ) -> AppResult<()> {
        let contest = self.contest_repo.get_by_id(contest_id).await?;
        if contest.status != ContestStatus::Ended {
            return Err(AppError::BadRequest(
                "Results can only be recorded on an ended contest".to_string(),
            ));
        }

        for result in results {
            let entry = self.contest_repo.get_entry_by_id(&result.entry_id).await?;
            if entry.contest_id != contest_id {
                return Err(AppError::BadRequest(format!(
                    "Entry {} belongs to another contest",
                    result.entry_id
                )));
            }

            let mut active: contest_entry::ActiveModel = entry.into();
            active.final_rank = Set(Some(result.final_rank));
            active.prize_amount = Set(result.prize_amount);
            self.contest_repo.update_entry(active).await?;
        }

        Ok(())
    }

    async fn get_or_create_entry(
        &self,
        contest_id: &str,
        account_id: &str,
    ) -> AppResult<contest_entry::Model> {
        if let Some(entry) = self.contest_repo.find_entry(contest_id, account_id).await? {
            return Ok(entry);
        }

        let model = contest_entry::ActiveModel {
            id: Set(self.id_gen.generate()),
            contest_id: Set(contest_id.to_string()),
            account_id: Set(account_id.to_string()),
            uploads_count: Set(0),
            reviews_count: Set(0),
            xp_earned: Set(0),
            final_rank: Set(None),
            prize_amount: Set(0),
        };

        self.contest_repo.create_entry(model).await
    }
}

/// Whether uploads still count: contest active and inside the upload phase.
fn upload_phase_open(contest: &contest::Model, now: DateTime<Utc>) -> bool {
    contest.status == ContestStatus::Active
        && now >= contest.start_date.with_timezone(&Utc)
        && now < contest.upload_phase_end.with_timezone(&Utc)
}

/// Whether reviews still count: contest active and before the review phase
/// ends.
fn review_phase_open(contest: &contest::Model, now: DateTime<Utc>) -> bool {
    contest.status == ContestStatus::Active
        && now >= contest.start_date.with_timezone(&Utc)
        && now < contest.review_phase_end.with_timezone(&Utc)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn create_test_contest(start: DateTime<Utc>) -> contest::Model {
        contest::Model {
            id: "c1".to_string(),
            name: "August Photo Sprint".to_string(),
            start_date: start.into(),
            upload_phase_end: (start + Duration::days(UPLOAD_PHASE_DAYS)).into(),
            review_phase_end: (start + Duration::days(REVIEW_PHASE_DAYS)).into(),
            status: ContestStatus::Active,
            total_prize_pool: DEFAULT_PRIZE_POOL,
            created_at: start.into(),
        }
    }

    #[test]
    fn test_upload_phase_window() {
        let start = Utc::now() - Duration::days(5);
        let contest = create_test_contest(start);

        assert!(upload_phase_open(&contest, Utc::now()));
        assert!(!upload_phase_open(&contest, start - Duration::hours(1)));
        assert!(!upload_phase_open(&contest, start + Duration::days(11)));
    }

    #[test]
    fn test_review_phase_outlives_upload_phase() {
        let start = Utc::now() - Duration::days(15);
        let contest = create_test_contest(start);

        // Day 15: uploads closed, reviews still open
        assert!(!upload_phase_open(&contest, Utc::now()));
        assert!(review_phase_open(&contest, Utc::now()));

        // Day 21: everything closed
        assert!(!review_phase_open(&contest, start + Duration::days(21)));
    }

    #[test]
    fn test_phases_closed_after_contest_ends() {
        let start = Utc::now() - Duration::days(2);
        let mut contest = create_test_contest(start);
        contest.status = ContestStatus::Ended;

        assert!(!upload_phase_open(&contest, Utc::now()));
        assert!(!review_phase_open(&contest, Utc::now()));
    }
}
