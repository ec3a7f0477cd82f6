//! Business logic services.

#![allow(missing_docs)]

pub mod account;
pub mod badge;
pub mod contest;
pub mod invite;
pub mod review;
pub mod strike;
pub mod upload;
pub mod withdrawal;

pub use account::{
    AccountService, DAILY_UPLOAD_LIMIT, QuotaFallback, QuotaStatus, RegisterAccountInput,
    SubmitKycInput,
};
pub use badge::{
    AwardKind, BadgeKind, BadgeService, BadgeTier, TierFallback, TierStatus,
    WEEKLY_AWARD_XP_BONUS,
};
pub use contest::{
    ContestService, ContestStatus, CreateContestInput, DEFAULT_PRIZE_POOL, EntryResult,
    REVIEW_PHASE_DAYS, UPLOAD_PHASE_DAYS,
};
pub use invite::{CreateInviteInput, InviteService, InviteStatus, REFERRAL_XP_AWARD};
pub use review::{CreateReviewInput, REVIEW_XP_AWARD, ReviewRating, ReviewService};
pub use strike::{StrikeKind, StrikeService};
pub use upload::{
    CreateUploadInput, FREE_DELETION_WINDOW_HOURS, MAX_DELETION_PENALTY_XP, PENALTY_XP_PER_HOUR,
    UploadService, UploadStatus,
};
pub use withdrawal::{CreateWithdrawalInput, WithdrawalService, WithdrawalStatus};
