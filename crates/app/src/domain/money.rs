//! Monetary arithmetic shared by carts and orders.

use rust_decimal::Decimal;

/// Largest total an `orders.total_price NUMERIC(14, 2)` column holds: 999,999,999,999.99.
pub const MAX_ORDER_TOTAL: Decimal = Decimal::from_parts(0x107A_3FFF, 0x5AF3, 0, false, 2);

/// Price of a single line: `price * quantity`, or `None` on overflow.
#[must_use]
pub fn line_total(price: Decimal, quantity: u32) -> Option<Decimal> {
    price.checked_mul(Decimal::from(quantity))
}

/// Sum of `price * quantity` over every line, or `None` on overflow.
pub fn sum_line_totals<I>(lines: I) -> Option<Decimal>
where
    I: IntoIterator<Item = (Decimal, u32)>,
{
    lines
        .into_iter()
        .try_fold(Decimal::ZERO, |total, (price, quantity)| {
            total.checked_add(line_total(price, quantity)?)
        })
}

/// Render an amount with exactly two decimal places.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_price_times_quantity() {
        let total = sum_line_totals([(Decimal::new(10, 0), 2), (Decimal::new(1999, 2), 3)]);

        assert_eq!(total, Some(Decimal::new(7997, 2)));
    }

    #[test]
    fn empty_lines_sum_to_zero() {
        assert_eq!(sum_line_totals(Vec::new()), Some(Decimal::ZERO));
    }

    #[test]
    fn overflow_yields_none() {
        assert_eq!(sum_line_totals([(Decimal::MAX, 2)]), None);
    }

    #[test]
    fn max_order_total_is_just_below_a_trillion() {
        assert_eq!(MAX_ORDER_TOTAL, Decimal::new(99_999_999_999_999, 2));
        assert_eq!(format_amount(MAX_ORDER_TOTAL), "999999999999.99");
    }

    #[test]
    fn formats_two_decimal_places() {
        assert_eq!(format_amount(Decimal::new(20, 0)), "20.00");
        assert_eq!(format_amount(Decimal::new(19_995, 3)), "20.00");
        assert_eq!(format_amount(Decimal::new(1999, 2)), "19.99");
    }
}
