use game_types::Player;

pub struct ScoringEngine;

impl ScoringEngine {
    pub const ACCEPTED_WORD_POINTS: u32 = 1;
    pub const PENALTY_POINTS: u32 = 1;

    /// Credit an accepted word, returning the new score
    pub fn award(player: &mut Player) -> u32 {
        player.score = player.score.saturating_add(Self::ACCEPTED_WORD_POINTS);
        player.score
    }

    /// Deduct for a rejected word or an expired turn. Scores floor at zero.
    pub fn penalize(player: &mut Player) -> u32 {
        player.score = player.score.saturating_sub(Self::PENALTY_POINTS);
        player.score
    }

    /// The single highest scorer, if one exists with a positive score.
    /// Ties have no leader.
    pub fn leader(players: &[Player]) -> Option<&Player> {
        let max_score = players.iter().map(|p| p.score).max()?;
        if max_score == 0 {
            return None;
        }

        let mut leaders = players.iter().filter(|p| p.score == max_score);
        match (leaders.next(), leaders.next()) {
            (Some(leader), None) => Some(leader),
            _ => None,
        }
    }

    pub fn has_won(player: &Player, points_to_win: Option<u32>) -> bool {
        points_to_win.is_some_and(|threshold| player.score >= threshold)
    }
}
