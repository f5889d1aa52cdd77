//! Fundraising milestones and rewards.

use serde::{Deserialize, Serialize};

/// A donation threshold that unlocks a reward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Milestone {
    /// How much has to be raised to unlock the reward.
    pub threshold: u64,
    /// The name of the reward.
    pub reward: &'static str,
    /// What the "next milestone" hint calls the reward.
    pub short_name: &'static str,
}

/// Every milestone, in ascending order.
pub const MILESTONES: [Milestone; 4] = [
    Milestone {
        threshold: 100,
        reward: "First Achievement Badge",
        short_name: "First Badge",
    },
    Milestone {
        threshold: 500,
        reward: "Exclusive T-shirt",
        short_name: "T-shirt",
    },
    Milestone {
        threshold: 1000,
        reward: "Wall of Fame Feature",
        short_name: "Wall of Fame",
    },
    Milestone {
        threshold: 5000,
        reward: "Premium Badge",
        short_name: "Premium Badge",
    },
];

/// The amount that fills the progress bar.
pub const PROGRESS_CEILING: u64 = 5000;

/// Shown once every milestone is unlocked.
pub const ALL_MILESTONES_ACHIEVED: &str = "🎉 All milestones achieved!";

impl Milestone {
    /// Whether `donations` unlocks this milestone.
    pub fn is_unlocked(&self, donations: u64) -> bool {
        donations >= self.threshold
    }
}

/// Progress towards the top milestone.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
pub struct Progress {
    /// Percent of [`PROGRESS_CEILING`] raised, clamped to `[0, 100]`.
    pub percentage: f64,
    /// [`Progress::percentage`] rounded to the nearest integer.
    pub rounded: u8,
}

impl Progress {
    pub fn of(donations: u64) -> Progress {
        let percentage = (donations as f64 / PROGRESS_CEILING as f64 * 100.0).clamp(0.0, 100.0);

        Progress {
            percentage,
            rounded: percentage.round() as u8,
        }
    }
}

/// A reward and whether it is unlocked.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct RewardStatus {
    pub threshold: u64,
    pub reward: String,
    pub unlocked: bool,
}

/// The next milestone to hit, or `None` if all are unlocked.
pub fn next_milestone(donations: u64) -> Option<&'static Milestone> {
    MILESTONES.iter().find(|m| !m.is_unlocked(donations))
}

/// The "next milestone" hint shown under the progress bar.
pub fn next_milestone_label(donations: u64) -> String {
    match next_milestone(donations) {
        Some(milestone) => format!(
            "Next: ₹{} for {}",
            milestone.threshold, milestone.short_name
        ),
        None => ALL_MILESTONES_ACHIEVED.to_owned(),
    }
}

/// Every reward with its unlocked flag, in ascending order.
pub fn rewards(donations: u64) -> Vec<RewardStatus> {
    MILESTONES
        .iter()
        .map(|milestone| RewardStatus {
            threshold: milestone.threshold,
            reward: milestone.reward.to_owned(),
            unlocked: milestone.is_unlocked(donations),
        })
        .collect()
}

/// The coarse "rewards earned" figure shown on the dashboard.
pub fn rewards_earned_label(donations: u64) -> &'static str {
    if donations >= 1000 {
        "3+"
    } else if donations >= 100 {
        "2+"
    } else {
        "1+"
    }
}
