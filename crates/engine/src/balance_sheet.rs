//! Domain values for balance sheets and their line items.
//!
//! A [`BalanceSheet`] owns three ordered collections of [`LineItem`]s. The
//! category of an item is structural (which collection it lives in), not a
//! field. Items do not hold a reverse pointer to their sheet; the
//! back-reference exists only as the `balance_sheet_id` column once
//! persisted.

use crate::Money;

/// One line of a balance sheet: a display name and a monetary value.
///
/// `id` is assigned by the store on persistence and absent before.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineItem {
    pub id: Option<i64>,
    pub name: String,
    pub value: Money,
}

impl LineItem {
    /// A not-yet-persisted item.
    pub fn new(name: impl Into<String>, value: Money) -> Self {
        Self {
            id: None,
            name: name.into(),
            value,
        }
    }
}

/// A named, dated balance sheet partitioned into assets, liabilities and
/// equities.
///
/// `date` is free text (month-day-year expected) and is never validated
/// for calendar correctness. `company_name` may be `None`; creation
/// normalizes it (see [`crate::reconcile`]), updates store it verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BalanceSheet {
    pub id: Option<i64>,
    pub company_name: Option<String>,
    pub date: String,
    pub assets: Vec<LineItem>,
    pub liabilities: Vec<LineItem>,
    pub equities: Vec<LineItem>,
}

impl BalanceSheet {
    /// Sum of asset values in collection order.
    pub fn total_assets(&self) -> Money {
        Money::sum(self.assets.iter().map(|item| item.value))
    }

    /// Sum of liability values in collection order.
    pub fn total_liabilities(&self) -> Money {
        Money::sum(self.liabilities.iter().map(|item| item.value))
    }

    /// Sum of equity values in collection order.
    pub fn total_equities(&self) -> Money {
        Money::sum(self.equities.iter().map(|item| item.value))
    }

    /// `total_assets - (total_liabilities + total_equities)`; zero when
    /// the sheet balances. Saturates at the cent range limits; use
    /// [`BalanceSheet::checked_difference`] when the limit must be
    /// detected.
    pub fn difference(&self) -> Money {
        self.total_assets() - (self.total_liabilities() + self.total_equities())
    }

    /// Like [`BalanceSheet::difference`], but computed wide so extreme
    /// totals cannot wrap or saturate. `None` when the exact difference
    /// leaves the representable cent range.
    pub fn checked_difference(&self) -> Option<Money> {
        let wide = |items: &[LineItem]| -> i128 {
            items
                .iter()
                .map(|item| i128::from(item.value.cents()))
                .sum()
        };
        let difference = wide(&self.assets) - wide(&self.liabilities) - wide(&self.equities);
        i64::try_from(difference).ok().map(Money::new)
    }
}
