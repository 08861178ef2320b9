//! Cart total calculations.

use crate::cart::ResolvedLine;
use crate::error::CommerceError;
use crate::money::{Currency, Money};

/// Totals over a set of resolved cart lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartTotals {
    /// Sum of `price * quantity` over all lines.
    pub subtotal: Money,
    /// Sum of quantities over all lines.
    pub item_count: i64,
}

/// Calculate cart totals with checked arithmetic.
///
/// Returns an error on a currency mismatch between lines or on overflow.
pub fn cart_totals(lines: &[ResolvedLine], currency: Currency) -> Result<CartTotals, CommerceError> {
    let mut subtotal = Money::zero(currency);
    let mut item_count: i64 = 0;

    for line in lines {
        let line_total = line
            .product
            .price
            .try_multiply(line.quantity)
            .ok_or(CommerceError::Overflow)?;
        subtotal = subtotal
            .try_add(&line_total)
            .ok_or_else(|| CommerceError::CurrencyMismatch {
                expected: currency.code().to_string(),
                got: line.product.price.currency.code().to_string(),
            })?;
        item_count = item_count
            .checked_add(line.quantity)
            .ok_or(CommerceError::Overflow)?;
    }

    Ok(CartTotals {
        subtotal,
        item_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;

    fn line(id: &str, price_cents: i64, quantity: i64) -> ResolvedLine {
        ResolvedLine {
            product: Product::new(
                id,
                "cat-1",
                "Brand",
                "Model",
                format!("Product {id}"),
                Money::new(price_cents, Currency::Ars),
            ),
            quantity,
        }
    }

    #[test]
    fn test_totals() {
        let lines = vec![line("p1", 1000, 2), line("p2", 2500, 1)];
        let totals = cart_totals(&lines, Currency::Ars).unwrap();

        assert_eq!(totals.subtotal.amount_cents, 4500); // 2*1000 + 1*2500
        assert_eq!(totals.item_count, 3);
    }

    #[test]
    fn test_totals_empty() {
        let totals = cart_totals(&[], Currency::Ars).unwrap();
        assert!(totals.subtotal.is_zero());
        assert_eq!(totals.item_count, 0);
    }

    #[test]
    fn test_totals_currency_mismatch() {
        let mut foreign = line("p1", 1000, 1);
        foreign.product.price.currency = Currency::Usd;

        assert!(matches!(
            cart_totals(&[foreign], Currency::Ars),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_totals_overflow() {
        let lines = vec![line("p1", i64::MAX, 2)];
        assert!(matches!(
            cart_totals(&lines, Currency::Ars),
            Err(CommerceError::Overflow)
        ));
    }
}
