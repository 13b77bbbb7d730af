use crate::types::*;

/// Final recomputation of scores once the game is decided.
///
/// The pool is the sum of every non-impostor score. An impostor win hands the
/// whole pool to the impostor; a team win splits it evenly (floor division)
/// among the live non-impostors, eliminated players keeping what they had.
pub fn settle_scores(players: &mut [Player], winner: Winner) {
    let pool: u32 = players
        .iter()
        .filter(|p| !p.is_impostor)
        .map(|p| p.score)
        .sum();

    match winner {
        Winner::Impostor => {
            for player in players.iter_mut().filter(|p| p.is_impostor) {
                player.score = pool;
            }
        }
        Winner::Team => {
            let recipients = players
                .iter()
                .filter(|p| p.is_live() && !p.is_impostor)
                .count() as u32;
            if recipients == 0 {
                return;
            }
            let share = pool / recipients;
            for player in players
                .iter_mut()
                .filter(|p| p.is_live() && !p.is_impostor)
            {
                player.score = share;
            }
        }
    }
    tracing::debug!("Settled a pool of {} for {:?}", pool, winner);
}
