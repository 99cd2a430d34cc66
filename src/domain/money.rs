//! Price and amount scalars.
//!
//! Quotes, notionals, fees, and recorded profits all flow through
//! [`Decimal`]; the aliases mark which role a value plays at the signature
//! level. Venue adapters convert at the boundary, so float error never
//! reaches the profit math.

use rust_decimal::Decimal;

/// A quoted price (bid, ask, or mid) in the instrument's quote currency.
pub type Price = Decimal;

/// A notional amount in quote currency: detection sizing, executed size,
/// or profit.
pub type Amount = Decimal;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn fee_adjustment_stays_exact() {
        // 1000 / 100 units, less a 0.1% taker fee: no drift in the base.
        let notional: Amount = dec!(1000);
        let ask: Price = dec!(100);
        let bought = notional / ask * dec!(0.999);
        assert_eq!(bought, dec!(9.99));
    }
}
