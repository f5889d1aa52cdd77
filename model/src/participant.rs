//! Participant records.

use serde::{Deserialize, Serialize};

/// A single fundraising participant as reported by the leaderboard endpoint.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub struct Participant {
    /// The display name of the participant.
    pub name: String,
    /// How much the participant has raised, in whole rupees.
    pub donations: u64,
}

impl Participant {
    /// Creates a new `Participant`.
    pub fn new(name: impl Into<String>, donations: u64) -> Participant {
        Participant {
            name: name.into(),
            donations,
        }
    }
}

/// The summary of the current user returned by the user endpoint.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub struct UserSummary {
    /// The name the data source has on file.
    pub name: String,
    /// How much the user has raised, in whole rupees.
    pub donations: u64,
    /// The user's referral code, if the data source issued one.
    #[serde(
        default,
        rename = "referralCode",
        skip_serializing_if = "Option::is_none"
    )]
    pub referral_code: Option<String>,
}
