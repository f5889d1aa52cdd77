//! Leaderboard merging and ranking.

use serde::{Deserialize, Serialize};

use crate::{
    identity::{PlaceholderIdentity, ViewerIdentity, eq_ignore_case},
    participant::Participant,
};

/// The rules used to fold a viewer into the remote leaderboard.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct MergeRules {
    /// The names the data source uses for the current user.
    pub placeholder: PlaceholderIdentity,
    /// How much a viewer missing from the leaderboard is credited with when
    /// they are appended to it.
    pub default_donations: u64,
}

impl MergeRules {
    /// The donation value a missing viewer gets by default.
    pub const DEFAULT_DONATIONS: u64 = 4200;
}

impl Default for MergeRules {
    fn default() -> Self {
        MergeRules {
            placeholder: PlaceholderIdentity::default(),
            default_donations: MergeRules::DEFAULT_DONATIONS,
        }
    }
}

/// Merges the viewer into a remote leaderboard and ranks it.
///
/// If the viewer has an override, the record that belongs to them is renamed
/// in place: first a record already carrying the override, then a record
/// under the placeholder identity. If neither exists, a new record with
/// [`MergeRules::default_donations`] is appended.
///
/// The result is sorted by donations, descending. The sort is stable, so
/// records with equal donations keep the order the source gave them.
pub fn merge_and_rank(
    mut participants: Vec<Participant>,
    viewer: &ViewerIdentity,
    rules: &MergeRules,
) -> Vec<Participant> {
    if let Some(display_name) = viewer.display_name() {
        let existing = participants
            .iter()
            .position(|p| eq_ignore_case(&p.name, display_name))
            .or_else(|| {
                participants
                    .iter()
                    .position(|p| rules.placeholder.matches(&p.name))
            });

        match existing {
            Some(ix) => participants[ix].name = display_name.to_owned(),
            None => participants.push(Participant::new(display_name, rules.default_donations)),
        }
    }

    participants.sort_by(|a, b| b.donations.cmp(&a.donations));
    participants
}

/// Where an entry placed on the leaderboard.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Gold,
    Silver,
    Bronze,
    /// Anywhere off the podium.
    Ranked,
}

impl Placement {
    /// The placement for a 1-based rank.
    pub fn from_rank(rank: usize) -> Placement {
        match rank {
            1 => Placement::Gold,
            2 => Placement::Silver,
            3 => Placement::Bronze,
            _ => Placement::Ranked,
        }
    }

    /// Whether this placement is on the podium.
    pub fn is_podium(self) -> bool {
        !matches!(self, Placement::Ranked)
    }
}

/// A single row of a ranked leaderboard.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct RankedEntry {
    /// The 1-based rank of the entry.
    pub rank: usize,
    pub placement: Placement,
    pub name: String,
    pub donations: u64,
    /// Whether this entry belongs to the viewer.
    pub is_viewer: bool,
}

/// Aggregate statistics over a leaderboard.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct LeaderboardStats {
    /// How many participants are on the board.
    pub participants: usize,
    /// How much all participants raised together.
    ///
    /// Saturates at `u64::MAX`.
    pub total_raised: u64,
    /// The average raised per participant, rounded half up.
    ///
    /// This is `0` for an empty leaderboard.
    pub average_raised: u64,
}

impl LeaderboardStats {
    /// Computes the statistics of a leaderboard.
    pub fn compute(participants: &[Participant]) -> LeaderboardStats {
        let count = participants.len();
        // donations are unbounded, so sum wide
        let total = participants
            .iter()
            .map(|p| u128::from(p.donations))
            .sum::<u128>();

        let average_raised = match count as u128 {
            0 => 0,
            n => (total + n / 2) / n,
        };

        LeaderboardStats {
            participants: count,
            total_raised: u64::try_from(total).unwrap_or(u64::MAX),
            // never above the largest donation
            average_raised: u64::try_from(average_raised).unwrap_or(u64::MAX),
        }
    }
}

/// Annotates an already-ranked leaderboard with ranks, placements and the
/// viewer flag.
pub fn annotate(
    ranked: Vec<Participant>,
    viewer: &ViewerIdentity,
    placeholder: &PlaceholderIdentity,
) -> Vec<RankedEntry> {
    ranked
        .into_iter()
        .enumerate()
        .map(|(ix, participant)| RankedEntry {
            rank: ix + 1,
            placement: Placement::from_rank(ix + 1),
            is_viewer: viewer.matches(&participant.name, placeholder),
            name: participant.name,
            donations: participant.donations,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(participants: &[Participant]) -> Vec<&str> {
        participants.iter().map(|p| p.name.as_str()).collect()
    }

    fn scenario() -> Vec<Participant> {
        vec![
            Participant::new("Bob", 800),
            Participant::new("Youssef", 4200),
            Participant::new("Amal", 1200),
        ]
    }

    #[test]
    fn test_rank_without_override() {
        let rules = MergeRules::default();
        let ranked = merge_and_rank(scenario(), &ViewerIdentity::anonymous(), &rules);

        assert_eq!(
            ranked,
            vec![
                Participant::new("Youssef", 4200),
                Participant::new("Amal", 1200),
                Participant::new("Bob", 800),
            ]
        );
    }

    #[test]
    fn test_rank_keeps_multiset() {
        let rules = MergeRules::default();
        let input = vec![
            Participant::new("Zara", 10),
            Participant::new("Omar", 9000),
            Participant::new("Zara", 10),
            Participant::new("Hind", 0),
            Participant::new("Rami", 450),
        ];

        let ranked = merge_and_rank(input.clone(), &ViewerIdentity::anonymous(), &rules);

        assert_eq!(ranked.len(), input.len());
        assert!(ranked.windows(2).all(|w| w[0].donations >= w[1].donations));

        let mut sorted_input = input;
        let mut sorted_output = ranked;
        sorted_input.sort_by(|a, b| a.name.cmp(&b.name).then(a.donations.cmp(&b.donations)));
        sorted_output.sort_by(|a, b| a.name.cmp(&b.name).then(a.donations.cmp(&b.donations)));
        assert_eq!(sorted_input, sorted_output);
    }

    #[test]
    fn test_override_renames_placeholder() {
        let rules = MergeRules::default();
        let ranked = merge_and_rank(scenario(), &ViewerIdentity::new("Nadia"), &rules);

        assert_eq!(
            ranked,
            vec![
                Participant::new("Nadia", 4200),
                Participant::new("Amal", 1200),
                Participant::new("Bob", 800),
            ]
        );
    }

    #[test]
    fn test_override_renames_long_spelling() {
        let rules = MergeRules::default();
        let input = vec![
            Participant::new("Amal", 1200),
            Participant::new("Youssef Elkoumi", 300),
        ];

        let ranked = merge_and_rank(input, &ViewerIdentity::new("Nadia"), &rules);

        assert_eq!(names(&ranked), ["Amal", "Nadia"]);
        assert_eq!(ranked[1].donations, 300);
    }

    #[test]
    fn test_override_appends_missing_viewer() {
        let rules = MergeRules::default();
        let input = vec![
            Participant::new("Amal", 1200),
            Participant::new("Bob", 8000),
        ];

        let ranked = merge_and_rank(input, &ViewerIdentity::new("Nadia"), &rules);

        assert_eq!(ranked.len(), 3);
        assert_eq!(names(&ranked), ["Bob", "Nadia", "Amal"]);
        assert_eq!(ranked[1].donations, MergeRules::DEFAULT_DONATIONS);
    }

    #[test]
    fn test_override_on_empty_board() {
        let rules = MergeRules::default();
        let ranked = merge_and_rank(Vec::new(), &ViewerIdentity::new("Lina"), &rules);

        assert_eq!(ranked, vec![Participant::new("Lina", 4200)]);
    }

    #[test]
    fn test_empty_board_without_override() {
        let rules = MergeRules::default();
        let ranked = merge_and_rank(Vec::new(), &ViewerIdentity::anonymous(), &rules);

        assert!(ranked.is_empty());
    }

    #[test]
    fn test_configured_default_donations() {
        let rules = MergeRules {
            default_donations: 50,
            ..Default::default()
        };
        let ranked = merge_and_rank(
            vec![Participant::new("Amal", 100)],
            &ViewerIdentity::new("Lina"),
            &rules,
        );

        assert_eq!(ranked[1], Participant::new("Lina", 50));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let rules = MergeRules::default();
        let viewer = ViewerIdentity::new("Aisha");

        let once = merge_and_rank(vec![Participant::new("Youssef", 3000)], &viewer, &rules);
        assert_eq!(once, vec![Participant::new("Aisha", 3000)]);

        let twice = merge_and_rank(once.clone(), &viewer, &rules);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_ties_keep_source_order() {
        let rules = MergeRules::default();
        let input = vec![
            Participant::new("Amal", 500),
            Participant::new("Bob", 900),
            Participant::new("Hind", 500),
            Participant::new("Omar", 500),
        ];

        let ranked = merge_and_rank(input, &ViewerIdentity::anonymous(), &rules);
        assert_eq!(names(&ranked), ["Bob", "Amal", "Hind", "Omar"]);

        // appended viewers land behind their ties
        let rules = MergeRules {
            default_donations: 500,
            ..Default::default()
        };
        let ranked = merge_and_rank(ranked, &ViewerIdentity::new("Lina"), &rules);
        assert_eq!(names(&ranked), ["Bob", "Amal", "Hind", "Omar", "Lina"]);
    }

    #[test]
    fn test_annotate() {
        let rules = MergeRules::default();
        let viewer = ViewerIdentity::new("Nadia");

        let mut input = scenario();
        input.push(Participant::new("Rami", 20));
        let ranked = merge_and_rank(input, &viewer, &rules);

        let entries = annotate(ranked, &viewer, &rules.placeholder);

        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].rank, 1);
        assert_eq!(entries[0].placement, Placement::Gold);
        assert!(entries[0].is_viewer);
        assert_eq!(entries[1].placement, Placement::Silver);
        assert!(!entries[1].is_viewer);
        assert_eq!(entries[2].placement, Placement::Bronze);
        assert_eq!(entries[3].rank, 4);
        assert_eq!(entries[3].placement, Placement::Ranked);
        assert!(!entries[3].placement.is_podium());
    }

    #[test]
    fn test_stats() {
        let stats = LeaderboardStats::compute(&scenario());
        assert_eq!(stats.participants, 3);
        assert_eq!(stats.total_raised, 6200);
        // 2066.67
        assert_eq!(stats.average_raised, 2067);

        let stats = LeaderboardStats::compute(&[
            Participant::new("Amal", 1),
            Participant::new("Bob", 2),
        ]);
        // 1.5 rounds up
        assert_eq!(stats.average_raised, 2);

        assert_eq!(LeaderboardStats::compute(&[]), LeaderboardStats::default());
    }

    #[test]
    fn test_stats_with_huge_donations() {
        let stats = LeaderboardStats::compute(&[
            Participant::new("Amal", u64::MAX),
            Participant::new("Bob", 1),
        ]);
        assert_eq!(stats.participants, 2);
        assert_eq!(stats.total_raised, u64::MAX);
        // (2^64 - 1 + 1 + 1) / 2
        assert_eq!(stats.average_raised, 1 << 63);

        let stats = LeaderboardStats::compute(&[
            Participant::new("Amal", u64::MAX),
            Participant::new("Bob", u64::MAX),
        ]);
        assert_eq!(stats.total_raised, u64::MAX);
        assert_eq!(stats.average_raised, u64::MAX);
    }
}
