use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use super::format::format_currency;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TierId {
    Tier1,
    Tier2,
    Tier3,
}

impl TierId {
    pub fn as_str(self) -> &'static str {
        match self {
            TierId::Tier1 => "tier1",
            TierId::Tier2 => "tier2",
            TierId::Tier3 => "tier3",
        }
    }
}

impl fmt::Display for TierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TierId {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "tier1" => Ok(TierId::Tier1),
            "tier2" => Ok(TierId::Tier2),
            "tier3" => Ok(TierId::Tier3),
            other => Err(LedgerError::TierNotFound(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    pub id: TierId,
    pub name: &'static str,
    pub deposit_amount: f64,
    pub weekly_rate: f64,
}

impl Tier {
    pub fn weekly_interest(&self) -> f64 {
        self.deposit_amount * self.weekly_rate
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(transparent)]
pub struct MemberId(Uuid);

impl MemberId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for MemberId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub tier_id: TierId,
    pub deposit_amount: f64,
    pub weekly_interest: f64,
    pub join_week: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total_principal: f64,
    pub total_weekly_interest: f64,
    pub total_projected_payout: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    #[error("Please enter the member's name.")]
    EmptyName,

    #[error("Please enter a valid deposit amount.")]
    InvalidAmount,

    #[error("Deposit must be exactly {} for the selected tier.", required_currency(.required))]
    TierMismatch { required: f64 },

    #[error("The group is full. Withdraw a member to free a slot.")]
    CapacityExceeded,

    #[error("Unknown tier: {0}")]
    TierNotFound(String),
}

fn required_currency(required: &f64) -> String {
    format_currency(*required)
}

impl LedgerError {
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerError::EmptyName => "empty_name",
            LedgerError::InvalidAmount => "invalid_amount",
            LedgerError::TierMismatch { .. } => "tier_mismatch",
            LedgerError::CapacityExceeded => "capacity_exceeded",
            LedgerError::TierNotFound(_) => "tier_not_found",
        }
    }
}
