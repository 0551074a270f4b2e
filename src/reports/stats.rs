//! Occasion statistics
//!
//! Where the money went: totals by category and by payer.

use std::collections::HashMap;

use crate::engine::LedgerSnapshot;
use crate::models::{Money, Party};
use crate::services::PartyNames;

/// Spending in one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Money,
    pub expense_count: usize,
    /// Share of the occasion total
    pub percentage: f64,
}

/// Amount paid by one person or subgroup
#[derive(Debug, Clone, PartialEq)]
pub struct PayerTotal {
    pub payer: Party,
    pub name: String,
    pub amount: Money,
    pub expense_count: usize,
}

/// Spending statistics of an occasion
#[derive(Debug, Clone)]
pub struct OccasionStats {
    pub total_spent: Money,
    pub expense_count: usize,
    /// Largest category first
    pub by_category: Vec<CategoryTotal>,
    /// Largest payer first
    pub by_payer: Vec<PayerTotal>,
}

impl OccasionStats {
    pub fn generate(snapshot: &LedgerSnapshot) -> Self {
        let names = PartyNames::new(&snapshot.people, &snapshot.subgroups);

        let mut categories: Vec<(String, Money, usize)> = Vec::new();
        let mut category_index: HashMap<String, usize> = HashMap::new();
        let mut payers: Vec<(Party, Money, usize)> = Vec::new();
        let mut payer_index: HashMap<Party, usize> = HashMap::new();
        let mut total_spent = Money::zero();

        for expense in &snapshot.expenses {
            total_spent += expense.amount;

            // First spelling of a category wins
            let key = expense.category.to_lowercase();
            let idx = *category_index.entry(key).or_insert_with(|| {
                categories.push((expense.category.clone(), Money::zero(), 0));
                categories.len() - 1
            });
            categories[idx].1 += expense.amount;
            categories[idx].2 += 1;

            let idx = *payer_index.entry(expense.payer).or_insert_with(|| {
                payers.push((expense.payer, Money::zero(), 0));
                payers.len() - 1
            });
            payers[idx].1 += expense.amount;
            payers[idx].2 += 1;
        }

        let mut by_category: Vec<CategoryTotal> = categories
            .into_iter()
            .map(|(category, amount, expense_count)| CategoryTotal {
                category,
                amount,
                expense_count,
                percentage: amount.percentage_of(total_spent),
            })
            .collect();
        by_category.sort_by(|a, b| b.amount.cmp(&a.amount));

        let mut by_payer: Vec<PayerTotal> = payers
            .into_iter()
            .map(|(payer, amount, expense_count)| PayerTotal {
                payer,
                name: names.name(payer),
                amount,
                expense_count,
            })
            .collect();
        by_payer.sort_by(|a, b| b.amount.cmp(&a.amount));

        Self {
            total_spent,
            expense_count: snapshot.expenses.len(),
            by_category,
            by_payer,
        }
    }

    /// Format the statistics for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Total Spent: {}\n",
            self.total_spent.format_with_symbol(currency_symbol)
        ));
        output.push_str(&format!("Expenses: {}\n\n", self.expense_count));

        output.push_str(&format!("{:<30} {:>12} {:>6} {:>7}\n", "Category", "Amount", "Count", "%"));
        output.push_str(&"-".repeat(58));
        output.push('\n');
        for row in &self.by_category {
            output.push_str(&format!(
                "{:<30} {:>12} {:>6} {:>6.1}%\n",
                row.category,
                row.amount.format_with_symbol(currency_symbol),
                row.expense_count,
                row.percentage
            ));
        }

        output.push_str(&format!("\n{:<30} {:>12} {:>6}\n", "Paid by", "Amount", "Count"));
        output.push_str(&"-".repeat(58));
        output.push('\n');
        for row in &self.by_payer {
            output.push_str(&format!(
                "{:<30} {:>12} {:>6}\n",
                row.name,
                row.amount.format_with_symbol(currency_symbol),
                row.expense_count
            ));
        }

        output
    }
}
