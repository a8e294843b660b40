//! Runtime configuration assembled from `.env`, the environment and flags.

use slabs::{SlabTable, ValidationPolicy};

/// Environment variable that turns on the sequential-tail rule by default.
pub const STRICT_TAIL_ENV: &str = "SLABCTL_STRICT_TAIL";

/// Settings that apply to every subcommand.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Enforce the sequential-tail rule on new slabs.
    pub strict_tail: bool,
}

impl CliConfig {
    /// Load `.env` if present, then read the environment.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self {
            strict_tail: std::env::var(STRICT_TAIL_ENV)
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        }
    }

    /// Policy for `table` (or the keyed default), with strictness from either
    /// the environment or the command line.
    pub fn policy(&self, table: Option<SlabTable>, strict_tail_flag: bool) -> ValidationPolicy {
        table
            .map(SlabTable::default_policy)
            .unwrap_or_default()
            .with_strict_tail(self.strict_tail || strict_tail_flag)
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
