/// Monetary amount in the smallest currency unit.
pub type Amount = i64;

/// Apply a multiplier to an amount, rounding to the nearest currency unit.
///
/// Rounding happens here, once, so callers multiplying by a quantity work
/// on an already-rounded per-unit price.
pub fn apply_modifier(amount: Amount, modifier: f64) -> Amount {
    (amount as f64 * modifier).round() as Amount
}

/// Gross amount for a base price and a percentage tax rate.
pub fn net_amount(price: Amount, tax_rate: f64) -> Amount {
    price + (price as f64 * tax_rate / 100.0).round() as Amount
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_modifier_rounds_per_unit() {
        assert_eq!(apply_modifier(270, 1.2), 324);
        assert_eq!(apply_modifier(270, 1.0), 270);
        // 238 * 1.2 = 285.6 -> 286, not truncated
        assert_eq!(apply_modifier(238, 1.2), 286);
    }

    #[test]
    fn test_net_amount_from_tax_rate() {
        assert_eq!(net_amount(250, 8.0), 270);
        assert_eq!(net_amount(220, 8.0), 238);
        assert_eq!(net_amount(280, 8.0), 302);
        assert_eq!(net_amount(100, 0.0), 100);
    }
}
