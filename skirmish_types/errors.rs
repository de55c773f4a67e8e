use thiserror::Error;
use uuid::Uuid;

pub type Result<T, E = GameError> = std::result::Result<T, E>;

/// Errors for domain logic (game rules).
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Invalid troop tier: {0} (must be 1-4)")]
    InvalidTroopTier(u8),

    #[error("Troop tier {0} listed more than once in the same army")]
    DuplicateTroopTier(u8),

    #[error("Battle {0} has already been resolved")]
    BattleAlreadyResolved(Uuid),
}
