//! View models served on the portal routes.

use serde::{Deserialize, Serialize};

use crate::{
    identity::ViewerIdentity,
    leaderboard::{self, LeaderboardStats, MergeRules, RankedEntry},
    milestone::{self, Progress, RewardStatus},
    participant::{Participant, UserSummary},
    request::auth::AuthMode,
};

/// A view that depends on the remote data source.
///
/// Views stay [`ViewState::Loading`] until their data arrives. A failed
/// fetch leaves them there.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(tag = "state", content = "view", rename_all = "snake_case")]
pub enum ViewState<T> {
    Loading,
    Ready(T),
}

/// The auth landing view.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct AuthView {
    /// The tab that is active.
    pub mode: AuthMode,
    /// Whether the viewer has chosen a display name.
    pub signed_up: bool,
    /// The display name the viewer chose, if any.
    pub display_name: Option<String>,
}

impl AuthView {
    pub fn new(mode: AuthMode, viewer: &ViewerIdentity) -> AuthView {
        AuthView {
            mode,
            signed_up: viewer.is_overridden(),
            display_name: viewer.display_name().map(ToOwned::to_owned),
        }
    }
}

/// The dashboard view.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct DashboardView {
    /// The name to greet the viewer with.
    pub name: String,
    pub referral_code: Option<String>,
    /// How much the viewer has raised.
    pub donations: u64,
    pub progress: Progress,
    /// Hint for the next milestone to hit.
    pub next_milestone: String,
    /// Every reward, in ascending order of threshold.
    pub rewards: Vec<RewardStatus>,
    pub rewards_earned: String,
}

impl DashboardView {
    /// Builds the dashboard for a viewer from the remote user summary.
    ///
    /// The viewer's display name, if set, replaces the remote name and
    /// determines the referral code.
    pub fn new(
        summary: UserSummary,
        viewer: &ViewerIdentity,
        referral_suffix: &str,
    ) -> DashboardView {
        let donations = summary.donations;

        let (name, referral_code) = match viewer.display_name() {
            Some(display_name) => (
                display_name.to_owned(),
                viewer.referral_code(referral_suffix),
            ),
            None => (summary.name, summary.referral_code),
        };

        DashboardView {
            name,
            referral_code,
            donations,
            progress: Progress::of(donations),
            next_milestone: milestone::next_milestone_label(donations),
            rewards: milestone::rewards(donations),
            rewards_earned: milestone::rewards_earned_label(donations).to_owned(),
        }
    }
}

/// The leaderboard view.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct LeaderboardView {
    /// The top three entries.
    pub podium: Vec<RankedEntry>,
    /// Every entry, podium included.
    pub rankings: Vec<RankedEntry>,
    pub stats: LeaderboardStats,
}

impl LeaderboardView {
    /// Builds the leaderboard for a viewer from the remote records.
    pub fn new(
        participants: Vec<Participant>,
        viewer: &ViewerIdentity,
        rules: &MergeRules,
    ) -> LeaderboardView {
        let ranked = leaderboard::merge_and_rank(participants, viewer, rules);
        let stats = LeaderboardStats::compute(&ranked);
        let rankings = leaderboard::annotate(ranked, viewer, &rules.placeholder);

        LeaderboardView {
            podium: rankings
                .iter()
                .filter(|entry| entry.placement.is_podium())
                .cloned()
                .collect(),
            rankings,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::leaderboard::Placement;

    fn summary() -> UserSummary {
        UserSummary {
            name: "Youssef".into(),
            donations: 4200,
            referral_code: Some("youssef2025".into()),
        }
    }

    #[test]
    fn test_dashboard_without_override() {
        let view = DashboardView::new(summary(), &ViewerIdentity::anonymous(), "2025");

        assert_eq!(view.name, "Youssef");
        assert_eq!(view.referral_code.as_deref(), Some("youssef2025"));
        assert_eq!(view.next_milestone, "Next: ₹5000 for Premium Badge");
        assert_eq!(view.progress.rounded, 84);
        assert_eq!(view.rewards_earned, "3+");
        assert_eq!(view.rewards.iter().filter(|r| r.unlocked).count(), 3);
    }

    #[test]
    fn test_dashboard_with_override() {
        let view = DashboardView::new(summary(), &ViewerIdentity::new("Nadia B"), "2025");

        assert_eq!(view.name, "Nadia B");
        assert_eq!(view.referral_code.as_deref(), Some("nadiab2025"));
        assert_eq!(view.donations, 4200);
    }

    #[test]
    fn test_leaderboard_view() {
        let participants = vec![
            Participant::new("Bob", 800),
            Participant::new("Youssef", 4200),
            Participant::new("Amal", 1200),
            Participant::new("Rami", 100),
        ];

        let view = LeaderboardView::new(
            participants,
            &ViewerIdentity::new("Nadia"),
            &MergeRules::default(),
        );

        assert_eq!(view.podium.len(), 3);
        assert_eq!(view.rankings.len(), 4);
        assert_eq!(view.podium[0].name, "Nadia");
        assert!(view.podium[0].is_viewer);
        assert_eq!(view.rankings[3].placement, Placement::Ranked);
        assert_eq!(view.stats.total_raised, 6300);
        assert_eq!(view.stats.average_raised, 1575);
    }

    #[test]
    fn test_short_leaderboard_podium() {
        let view = LeaderboardView::new(
            Vec::new(),
            &ViewerIdentity::new("Lina"),
            &MergeRules::default(),
        );

        assert_eq!(view.podium.len(), 1);
        assert_eq!(view.rankings[0].name, "Lina");
        assert_eq!(view.rankings[0].donations, 4200);
        assert_eq!(view.stats.participants, 1);
    }

    #[test]
    fn test_view_state_encoding() {
        let loading = serde_json::to_value(ViewState::<AuthView>::Loading).expect("serializable");
        assert_eq!(loading, serde_json::json!({ "state": "loading" }));

        let ready = serde_json::to_value(ViewState::Ready(AuthView::new(
            AuthMode::Signup,
            &ViewerIdentity::anonymous(),
        )))
        .expect("serializable");
        assert_eq!(ready["state"], "ready");
        assert_eq!(ready["view"]["mode"], "signup");
        assert_eq!(ready["view"]["signed_up"], false);
    }
}
