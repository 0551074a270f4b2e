//! Settle-up tolerance
//!
//! Equal shares are computed in whole cents, but shares entered by hand can
//! leave a stray cent behind. Anything within one cent of zero counts as
//! settled and is never matched by the suggester.

use crate::models::Money;

/// Largest absolute balance still considered settled
pub const SETTLE_TOLERANCE: Money = Money::from_cents(1);

/// Check whether an amount is within the settle-up tolerance of zero
pub fn is_settled(amount: Money) -> bool {
    amount.abs() <= SETTLE_TOLERANCE
}

/// A balance above the tolerance: the party is owed money
pub(crate) fn is_creditor(amount: Money) -> bool {
    amount > SETTLE_TOLERANCE
}

/// A balance below minus the tolerance: the party owes money
pub(crate) fn is_debtor(amount: Money) -> bool {
    amount < -SETTLE_TOLERANCE
}
