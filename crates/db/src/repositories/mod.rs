//! Database repositories.

pub mod account;
pub mod admin_action;
pub mod badge;
pub mod contest;
pub mod invite;
pub mod review;
pub mod strike;
pub mod upload;
pub mod withdrawal;

pub use account::AccountRepository;
pub use admin_action::AdminActionRepository;
pub use badge::BadgeRepository;
pub use contest::ContestRepository;
pub use invite::InviteRepository;
pub use review::ReviewRepository;
pub use strike::StrikeRepository;
pub use upload::UploadRepository;
pub use withdrawal::WithdrawalRepository;
