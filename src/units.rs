use crate::error::Error;

/// Smallest units per whole currency unit (wei per ether).
pub const SMALLEST_UNITS_PER_UNIT: u128 = 1_000_000_000_000_000_000;

/// Fractional digits representable on chain.
pub const DECIMALS: usize = 18;

/// Convert a decimal price string (whole currency units) into the chain's
/// smallest unit.
///
/// Accepts plain non-negative decimals like `"15"`, `"14.99"` or `".5"`.
/// More than [`DECIMALS`] fractional digits cannot be represented and are
/// rejected rather than silently truncated.
pub fn to_smallest_unit(price: &str) -> Result<u128, Error> {
    let trimmed = price.trim();
    let (whole, frac) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(Error::Price {
            reason: format!("not a decimal number: {price:?}"),
        });
    }
    if frac.len() > DECIMALS {
        return Err(Error::Price {
            reason: format!("more than {DECIMALS} fractional digits: {price:?}"),
        });
    }

    let whole_value: u128 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| Error::Price {
            reason: format!("not a decimal number: {price:?}"),
        })?
    };
    let frac_value: u128 = if frac.is_empty() {
        0
    } else {
        let padded = format!("{frac:0<DECIMALS$}");
        padded.parse().map_err(|_| Error::Price {
            reason: format!("not a decimal number: {price:?}"),
        })?
    };

    whole_value
        .checked_mul(SMALLEST_UNITS_PER_UNIT)
        .and_then(|v| v.checked_add(frac_value))
        .ok_or_else(|| Error::Price {
            reason: format!("amount overflows the smallest-unit range: {price:?}"),
        })
}

/// Convert a smallest-unit amount back to a decimal string in whole
/// currency units. Trailing fractional zeros are dropped, so the output is
/// canonical: `from_smallest_unit(to_smallest_unit(s)?)` re-parses to the
/// same amount.
pub fn from_smallest_unit(amount: u128) -> String {
    let whole = amount / SMALLEST_UNITS_PER_UNIT;
    let frac = amount % SMALLEST_UNITS_PER_UNIT;
    if frac == 0 {
        return whole.to_string();
    }
    let frac_digits = format!("{frac:0>DECIMALS$}");
    format!("{whole}.{}", frac_digits.trim_end_matches('0'))
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use super::{SMALLEST_UNITS_PER_UNIT, from_smallest_unit, to_smallest_unit};

    fn lcg_next(state: &mut u64) -> u64 {
        *state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1);
        *state
    }

    #[test]
    fn converts_whole_units() {
        assert_eq!(to_smallest_unit("1").unwrap(), SMALLEST_UNITS_PER_UNIT);
        assert_eq!(to_smallest_unit("0").unwrap(), 0);
        assert_eq!(
            to_smallest_unit("15").unwrap(),
            15 * SMALLEST_UNITS_PER_UNIT
        );
    }

    #[test]
    fn converts_fractional_units() {
        assert_eq!(
            to_smallest_unit("14.99").unwrap(),
            14_990_000_000_000_000_000
        );
        assert_eq!(to_smallest_unit(".5").unwrap(), 500_000_000_000_000_000);
        assert_eq!(to_smallest_unit("0.000000000000000001").unwrap(), 1);
    }

    #[test]
    fn formats_smallest_unit_amounts() {
        assert_eq!(from_smallest_unit(0), "0");
        assert_eq!(from_smallest_unit(SMALLEST_UNITS_PER_UNIT), "1");
        assert_eq!(from_smallest_unit(14_990_000_000_000_000_000), "14.99");
        assert_eq!(from_smallest_unit(1), "0.000000000000000001");
    }

    #[test]
    fn rejects_unrepresentable_inputs() {
        assert!(to_smallest_unit("").is_err());
        assert!(to_smallest_unit(".").is_err());
        assert!(to_smallest_unit("abc").is_err());
        assert!(to_smallest_unit("-1").is_err());
        assert!(to_smallest_unit("1.0000000000000000001").is_err());
        assert!(to_smallest_unit("999999999999999999999999999999999999999").is_err());
    }

    #[test]
    fn smallest_unit_roundtrip_holds_for_randomized_amounts() {
        let mut seed = 0x00C0_FFEE_u64;
        for _ in 0..20_000 {
            let amount =
                u128::from(lcg_next(&mut seed)) * u128::from(lcg_next(&mut seed) % 1_000_000);
            let decimal = from_smallest_unit(amount);
            assert_eq!(
                to_smallest_unit(&decimal).unwrap(),
                amount,
                "roundtrip mismatch for {amount} via {decimal:?}"
            );
        }
    }

    #[test]
    fn decimal_roundtrip_is_canonical_for_randomized_prices() {
        let mut seed = 0xDEAD_BEEF_u64;
        for _ in 0..20_000 {
            let whole = lcg_next(&mut seed) % 100_000;
            let cents = lcg_next(&mut seed) % 100;
            let price = format!("{whole}.{cents:02}");
            let wei = to_smallest_unit(&price).unwrap();
            assert_eq!(to_smallest_unit(&from_smallest_unit(wei)).unwrap(), wei);
        }
    }
}
