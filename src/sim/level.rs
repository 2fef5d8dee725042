//! Difficulty progression
//!
//! The current tier is an index into the tier table. It only ever moves
//! forward, and may skip several tiers if the score jumps.

use crate::tuning::DifficultyTier;

/// Advance `current` past every tier whose threshold `score` has reached
pub fn advance_tier(tiers: &[DifficultyTier], current: usize, score: u32) -> usize {
    let mut tier = current;
    while tier + 1 < tiers.len() && score >= tiers[tier + 1].required_score {
        tier += 1;
    }
    tier
}

/// Greatest tier index whose threshold is at or below `score`
pub fn tier_for_score(tiers: &[DifficultyTier], score: u32) -> usize {
    tiers
        .iter()
        .rposition(|t| t.required_score <= score)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::default_tiers;
    use proptest::prelude::*;

    #[test]
    fn test_single_step() {
        let tiers = default_tiers();
        assert_eq!(advance_tier(&tiers, 0, 9), 0);
        assert_eq!(advance_tier(&tiers, 0, 10), 1);
        assert_eq!(advance_tier(&tiers, 1, 19), 1);
    }

    #[test]
    fn test_jump_skips_tiers() {
        let tiers = default_tiers();
        assert_eq!(advance_tier(&tiers, 0, 35), 3);
        assert_eq!(advance_tier(&tiers, 0, 1000), tiers.len() - 1);
    }

    #[test]
    fn test_never_regresses() {
        let tiers = default_tiers();
        assert_eq!(advance_tier(&tiers, 3, 0), 3);
        assert_eq!(advance_tier(&tiers, 4, 5), 4);
    }

    proptest! {
        #[test]
        fn prop_tracks_greatest_reached_tier(increments in proptest::collection::vec(0u32..4, 1..60)) {
            let tiers = default_tiers();
            let mut score = 0u32;
            let mut tier = 0usize;
            for inc in increments {
                score += inc;
                let next = advance_tier(&tiers, tier, score);
                prop_assert!(next >= tier);
                prop_assert_eq!(next, tier_for_score(&tiers, score));
                tier = next;
            }
        }
    }
}
