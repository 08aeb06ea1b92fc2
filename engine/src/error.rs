use thiserror::Error;

/// Everything that can stop a battle from starting.
#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("team size mismatch: team 1 has {team1} warrior(s), team 2 has {team2}")]
    TeamSizeMismatch { team1: usize, team2: usize },

    #[error("unsupported team size {0}; battles are 1v1 or 3v3")]
    UnsupportedTeamSize(usize),

    #[error("invalid definition '{record}': {field} {reason}")]
    InvalidDefinition {
        record: String,
        field: String,
        reason: String,
    },

    #[error("unknown warrior '{0}'")]
    UnknownWarrior(String),

    #[error("unknown item '{0}'")]
    UnknownItem(String),

    #[error("warrior '{0}' is selected more than once")]
    DuplicateWarrior(String),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl ArenaError {
    pub(crate) fn invalid(record: &str, field: &str, reason: impl Into<String>) -> Self {
        ArenaError::InvalidDefinition {
            record: record.to_string(),
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
