//! Settlement engine
//!
//! Pure computations over an in-memory snapshot of an occasion: net balance
//! per person, greedy settle-up suggestions and a data integrity report.
//! Nothing in this module performs I/O; the data arrives through
//! [`LedgerSource`] and leaves as plain values.

pub mod balance;
pub mod integrity;
pub mod ledger;
pub mod suggest;
pub mod tolerance;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use balance::{compute_balances, Balance, BalanceCalculator};
pub use integrity::IntegrityIssue;
pub use ledger::{LedgerSnapshot, LedgerSource};
pub use suggest::{suggest_transfers, SuggestedTransfer};
pub use tolerance::{is_settled, SETTLE_TOLERANCE};

/// How expenses and settlements that reference a subgroup are attributed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubgroupPolicy {
    /// Subgroup payers and settlement parties have no effect on balances
    #[default]
    Ignore,
    /// The amount is divided evenly among the subgroup's members
    SplitAmongMembers,
}

impl SubgroupPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ignore => "ignore",
            Self::SplitAmongMembers => "split_among_members",
        }
    }
}

impl fmt::Display for SubgroupPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SubgroupPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "ignore" => Ok(Self::Ignore),
            "split_among_members" | "split" => Ok(Self::SplitAmongMembers),
            other => Err(format!(
                "Unknown subgroup policy '{}'. Use 'ignore' or 'split_among_members'",
                other
            )),
        }
    }
}
