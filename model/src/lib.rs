//! API model representations.

pub mod error;
pub mod identity;
pub mod leaderboard;
pub mod milestone;
pub mod participant;
pub mod request;
pub mod view;

pub use error::ApiError;
pub use identity::{PlaceholderIdentity, ViewerIdentity};
pub use leaderboard::MergeRules;
pub use participant::{Participant, UserSummary};
pub use view::ViewState;
