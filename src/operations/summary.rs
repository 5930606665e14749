use crate::error::{Error, Result};
use crate::models::budget::MonthlyBudget;
use crate::models::category::Category;
use crate::models::expense::{Expense, format_money};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub total_spent: Decimal,
    pub remaining: Decimal,
    pub days_left: u32,
    pub daily_allowance: Decimal,
    /// Totals per category, in the order each category first appears.
    pub by_category: Vec<(Category, Decimal)>,
}

/// Fails with [`Error::AmountOverflow`] when the totals do not fit in a `Decimal`.
pub fn summarize(expenses: &[Expense], budget: MonthlyBudget, today: NaiveDate) -> Result<Summary> {
    let total_spent = expenses
        .iter()
        .try_fold(Decimal::ZERO, |acc, expense| acc.checked_add(expense.amount))
        .ok_or(Error::AmountOverflow)?;
    let remaining = budget
        .amount
        .checked_sub(total_spent)
        .ok_or(Error::AmountOverflow)?;
    let days_left = days_in_month(today).saturating_sub(today.day());
    let daily_allowance = if days_left > 0 {
        remaining / Decimal::from(days_left)
    } else {
        Decimal::ZERO
    };

    let mut by_category: Vec<(Category, Decimal)> = Vec::new();
    for expense in expenses {
        match by_category.iter_mut().find(|(c, _)| *c == expense.category) {
            // bounded by total_spent, which already fit
            Some((_, total)) => *total += expense.amount,
            None => by_category.push((expense.category, expense.amount)),
        }
    }

    Ok(Summary {
        total_spent,
        remaining,
        days_left,
        daily_allowance,
        by_category,
    })
}

pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(date.day())
}

impl Summary {
    /// The four headline figures, as shown in the summary panel.
    pub fn headline_lines(&self) -> [String; 4] {
        [
            format!("Total Spent: ${}", format_money(self.total_spent)),
            format!("Remaining Budget: ${}", format_money(self.remaining)),
            format!("Remaining Days: {}", self.days_left),
            format!("Daily Budget: ${}", format_money(self.daily_allowance)),
        ]
    }

    pub fn category_lines(&self) -> Vec<String> {
        self.by_category
            .iter()
            .map(|(category, amount)| format!("{}: ${}", category, format_money(*amount)))
            .collect()
    }

    /// Headline figures, a blank line, then one line per category.
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.headline_lines().into_iter().collect();
        lines.push(String::new());
        lines.extend(self.category_lines());
        lines
    }
}
