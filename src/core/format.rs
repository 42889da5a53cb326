use super::types::Tier;

pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}")
}

pub fn format_rate(rate: f64) -> String {
    format!("{}%", (rate * 100.0 * 100.0).round() / 100.0)
}

pub fn tier_description(tier: &Tier) -> String {
    format!(
        "{}: deposit {}, {} weekly interest ({} per week)",
        tier.name,
        format_currency(tier.deposit_amount),
        format_rate(tier.weekly_rate),
        format_currency(tier.weekly_interest()),
    )
}
