mod format;
mod ledger;
mod tiers;
mod types;

pub use format::{format_currency, format_rate, tier_description};
pub use ledger::{
    DashboardSnapshot, Ledger, MemberRow, TierInfo, TotalsDisplay, member_row, parse_amount,
    projected_payout, tier_infos, totals, weeks_active,
};
pub use tiers::{GROUP_CAPACITY, TIERS, default_tier, lookup, tier, validate_catalog};
pub use types::{LedgerError, Member, MemberId, Tier, TierId, Totals};
