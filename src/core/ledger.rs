use serde::Serialize;
use tracing::{debug, info};

use super::format::{format_currency, tier_description};
use super::tiers::{self, GROUP_CAPACITY, TIERS};
use super::types::{LedgerError, Member, MemberId, TierId, Totals};

#[derive(Debug, Clone)]
pub struct Ledger {
    members: Vec<Member>,
    current_week: u64,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        debug_assert!(tiers::validate_catalog().is_ok(), "tier catalog is malformed");
        Self {
            members: Vec::with_capacity(GROUP_CAPACITY),
            current_week: 1,
        }
    }

    pub fn current_week(&self) -> u64 {
        self.current_week
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn open_slots(&self) -> usize {
        GROUP_CAPACITY - self.members.len()
    }

    pub fn register(
        &mut self,
        name: &str,
        tier_id: &str,
        deposit_amount: &str,
    ) -> Result<Member, LedgerError> {
        let member = self
            .validate_registration(name, tier_id, deposit_amount)
            .inspect_err(|err| debug!(kind = err.kind(), %err, "registration rejected"))?;

        info!(
            member_id = %member.id,
            tier = %member.tier_id,
            join_week = member.join_week,
            "member registered"
        );
        self.members.push(member.clone());
        Ok(member)
    }

    fn validate_registration(
        &self,
        name: &str,
        tier_id: &str,
        deposit_amount: &str,
    ) -> Result<Member, LedgerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::EmptyName);
        }
        let amount = parse_amount(deposit_amount)?;
        let tier = tiers::lookup(tier_id)?;
        if amount != tier.deposit_amount {
            return Err(LedgerError::TierMismatch {
                required: tier.deposit_amount,
            });
        }
        if self.members.len() >= GROUP_CAPACITY {
            return Err(LedgerError::CapacityExceeded);
        }

        Ok(Member {
            id: MemberId::generate(),
            name: name.to_string(),
            tier_id: tier.id,
            deposit_amount: amount,
            weekly_interest: amount * tier.weekly_rate,
            join_week: self.current_week,
        })
    }

    pub fn advance_week(&mut self) -> u64 {
        // saturates at u64::MAX rather than wrapping
        self.current_week = self.current_week.saturating_add(1);
        info!(week = self.current_week, "week advanced");
        self.current_week
    }

    pub fn withdraw(&mut self, id: MemberId) {
        match self.members.iter().position(|m| m.id == id) {
            Some(idx) => {
                let member = self.members.remove(idx);
                info!(
                    member_id = %member.id,
                    payout = projected_payout(&member, self.current_week),
                    "member withdrawn"
                );
            }
            None => debug!(member_id = %id, "withdraw ignored: no such member"),
        }
    }

    pub fn totals(&self) -> Totals {
        totals(&self.members, self.current_week)
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        let week = self.current_week;
        let rows = self.members.iter().map(|m| member_row(m, week)).collect();
        let totals = self.totals();

        DashboardSnapshot {
            current_week: week,
            capacity: GROUP_CAPACITY,
            open_slots: self.open_slots(),
            tiers: tier_infos(),
            totals,
            totals_display: TotalsDisplay {
                total_principal: format_currency(totals.total_principal),
                total_weekly_interest: format_currency(totals.total_weekly_interest),
                total_projected_payout: format_currency(totals.total_projected_payout),
            },
            members: rows,
        }
    }
}

pub fn parse_amount(raw: &str) -> Result<f64, LedgerError> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(LedgerError::InvalidAmount),
    }
}

pub fn weeks_active(member: &Member, current_week: u64) -> u64 {
    current_week
        .saturating_sub(member.join_week)
        .saturating_add(1)
        .max(1)
}

pub fn projected_payout(member: &Member, current_week: u64) -> f64 {
    member.deposit_amount + member.weekly_interest * weeks_active(member, current_week) as f64
}

pub fn totals(members: &[Member], current_week: u64) -> Totals {
    members.iter().fold(Totals::default(), |acc, m| Totals {
        total_principal: acc.total_principal + m.deposit_amount,
        total_weekly_interest: acc.total_weekly_interest + m.weekly_interest,
        total_projected_payout: acc.total_projected_payout + projected_payout(m, current_week),
    })
}

pub fn member_row(member: &Member, current_week: u64) -> MemberRow {
    let tier = tiers::tier(member.tier_id);
    let payout = projected_payout(member, current_week);
    MemberRow {
        id: member.id,
        name: member.name.clone(),
        join_week: member.join_week,
        tier_id: member.tier_id,
        tier_name: tier.name,
        tier_description: tier_description(tier),
        deposit_amount: member.deposit_amount,
        weekly_interest: member.weekly_interest,
        weeks_active: weeks_active(member, current_week),
        projected_payout: payout,
        deposit_display: format_currency(member.deposit_amount),
        weekly_interest_display: format_currency(member.weekly_interest),
        projected_payout_display: format_currency(payout),
    }
}

pub fn tier_infos() -> Vec<TierInfo> {
    TIERS
        .iter()
        .map(|t| TierInfo {
            id: t.id,
            name: t.name,
            deposit_amount: t.deposit_amount,
            weekly_rate: t.weekly_rate,
            weekly_interest: t.weekly_interest(),
            description: tier_description(t),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierInfo {
    pub id: TierId,
    pub name: &'static str,
    pub deposit_amount: f64,
    pub weekly_rate: f64,
    pub weekly_interest: f64,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRow {
    pub id: MemberId,
    pub name: String,
    pub join_week: u64,
    pub tier_id: TierId,
    pub tier_name: &'static str,
    pub tier_description: String,
    pub deposit_amount: f64,
    pub weekly_interest: f64,
    pub weeks_active: u64,
    pub projected_payout: f64,
    pub deposit_display: String,
    pub weekly_interest_display: String,
    pub projected_payout_display: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsDisplay {
    pub total_principal: String,
    pub total_weekly_interest: String,
    pub total_projected_payout: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub current_week: u64,
    pub capacity: usize,
    pub open_slots: usize,
    pub tiers: Vec<TierInfo>,
    pub totals: Totals,
    pub totals_display: TotalsDisplay,
    pub members: Vec<MemberRow>,
}
