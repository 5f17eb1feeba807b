use rust_decimal::prelude::ToPrimitive as _;
use rust_decimal::{Decimal, RoundingStrategy};

/// Mocked exchange rate: 1 sat = $0.0004.
pub const USD_PER_SAT: Decimal = Decimal::from_parts(4, 0, 0, false, 4);

/// Groups the digits of a sats amount with thousands separators.
pub fn format_sats(sats: impl Into<i128>) -> String {
    let sats = sats.into();
    let digits = sats.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if sats < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

pub fn sats_to_fiat(sats: i64) -> Decimal {
    Decimal::from(sats) * USD_PER_SAT
}

/// Converts a USD value to the nearest whole number of sats.
pub fn fiat_to_sats(fiat: Decimal) -> Option<i64> {
    fiat.checked_div(USD_PER_SAT)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// Formats the mocked USD value of a sats amount, e.g. `$4.00`.
pub fn format_usd(sats: i64) -> String {
    let usd = sats_to_fiat(sats).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${usd:.2}")
}

/// Keeps the first and last `chars` characters of an address.
pub fn shorten_address(address: &str, chars: usize) -> String {
    let len = address.chars().count();
    if len <= chars * 2 + 3 {
        return address.to_owned();
    }

    let head: String = address.chars().take(chars).collect();
    let tail: String = address.chars().skip(len - chars).collect();

    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sats_are_grouped_by_thousands() {
        assert_eq!(format_sats(1_234_567), "1,234,567");
        assert_eq!(format_sats(542_891), "542,891");
        assert_eq!(format_sats(1_000), "1,000");
        assert_eq!(format_sats(999), "999");
        assert_eq!(format_sats(0), "0");
        assert_eq!(format_sats(-2_150), "-2,150");
        assert_eq!(format_sats(i64::MIN), "-9,223,372,036,854,775,808");
        assert_eq!(format_sats(u64::MAX), "18,446,744,073,709,551,615");
    }

    #[test]
    fn usd_uses_the_mocked_rate() {
        assert_eq!(format_usd(10_000), "$4.00");
        assert_eq!(format_usd(0), "$0.00");
        assert_eq!(format_usd(542_891), "$217.16");
        assert_eq!(format_usd(1), "$0.00");
        assert_eq!(format_usd(13), "$0.01");
    }

    #[test]
    fn fiat_round_trips_to_nearest_sat() {
        assert_eq!(fiat_to_sats(Decimal::new(4, 0)), Some(10_000));
        assert_eq!(fiat_to_sats(Decimal::new(1, 2)), Some(25));
        assert_eq!(fiat_to_sats(Decimal::new(1, 4)), Some(0));
        assert_eq!(fiat_to_sats(Decimal::new(2, 4)), Some(1));
        assert_eq!(sats_to_fiat(25), Decimal::new(1, 2));
    }

    #[test]
    fn addresses_are_shortened_from_both_ends() {
        let address = "bc1q8c6fshw2dhdrhzqndu8hexgzdcmjwqqm9qrqsc";

        assert_eq!(shorten_address(address, 6), "bc1q8c...9qrqsc");
        assert_eq!(shorten_address(address, 4), "bc1q...rqsc");
        assert_eq!(shorten_address("bc1short", 6), "bc1short");
    }
}
