use super::types::{LedgerError, Tier, TierId};

pub const GROUP_CAPACITY: usize = 12;

pub static TIERS: [Tier; 3] = [
    Tier {
        id: TierId::Tier1,
        name: "Tier 1",
        deposit_amount: 10_000.0,
        weekly_rate: 0.05,
    },
    Tier {
        id: TierId::Tier2,
        name: "Tier 2",
        deposit_amount: 20_000.0,
        weekly_rate: 0.10,
    },
    Tier {
        id: TierId::Tier3,
        name: "Tier 3",
        deposit_amount: 30_000.0,
        weekly_rate: 0.20,
    },
];

pub fn default_tier() -> &'static Tier {
    &TIERS[0]
}

pub fn tier(id: TierId) -> &'static Tier {
    match id {
        TierId::Tier1 => &TIERS[0],
        TierId::Tier2 => &TIERS[1],
        TierId::Tier3 => &TIERS[2],
    }
}

pub fn lookup(tier_id: &str) -> Result<&'static Tier, LedgerError> {
    tier_id.parse::<TierId>().map(tier)
}

pub fn validate_catalog() -> Result<(), String> {
    validate_tiers(&TIERS)
}

fn validate_tiers(tiers: &[Tier]) -> Result<(), String> {
    if tiers.len() != 3 {
        return Err(format!("expected 3 tiers, found {}", tiers.len()));
    }
    for (idx, t) in tiers.iter().enumerate() {
        if tiers[..idx].iter().any(|prev| prev.id == t.id) {
            return Err(format!("duplicate tier id {}", t.id));
        }
        if !t.deposit_amount.is_finite() || t.deposit_amount <= 0.0 {
            return Err(format!(
                "{} deposit must be positive, got {}",
                t.id, t.deposit_amount
            ));
        }
        if !(t.weekly_rate > 0.0 && t.weekly_rate <= 1.0) {
            return Err(format!(
                "{} weekly rate must be in (0, 1], got {}",
                t.id, t.weekly_rate
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_fixed_amounts_and_rates() {
        let pairs: Vec<(f64, f64)> = TIERS
            .iter()
            .map(|t| (t.deposit_amount, t.weekly_rate))
            .collect();
        assert_eq!(pairs, vec![(10_000.0, 0.05), (20_000.0, 0.10), (30_000.0, 0.20)]);
        assert!(validate_catalog().is_ok());
    }

    #[test]
    fn lookup_resolves_known_ids() {
        assert_eq!(lookup("tier2").expect("tier2").deposit_amount, 20_000.0);
        assert_eq!(lookup(" tier3 ").expect("tier3").id, TierId::Tier3);
        assert_eq!(default_tier().id, TierId::Tier1);
    }

    #[test]
    fn lookup_rejects_unknown_id() {
        let err = lookup("tier4").expect_err("unknown tier");
        assert_eq!(err, LedgerError::TierNotFound("tier4".to_string()));
    }

    #[test]
    fn validate_rejects_bad_rates_and_duplicates() {
        let mut tiers = TIERS;
        tiers[1].weekly_rate = 0.0;
        assert!(validate_tiers(&tiers).unwrap_err().contains("weekly rate"));

        let mut tiers = TIERS;
        tiers[2].deposit_amount = -1.0;
        assert!(validate_tiers(&tiers).unwrap_err().contains("deposit"));

        let mut tiers = TIERS;
        tiers[2].id = TierId::Tier1;
        assert!(validate_tiers(&tiers).unwrap_err().contains("duplicate"));

        assert!(validate_tiers(&TIERS[..2]).is_err());
    }
}
