//! Expense and settlement display

use tabled::Tabled;

use super::render_table;
use crate::models::{Expense, ExpenseSplit, Money, Party, Settlement};
use crate::services::PartyNames;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Paid by")]
    payer: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format a list of expenses
pub fn format_expense_list(
    expenses: &[Expense],
    names: &PartyNames,
    currency_symbol: &str,
    date_format: &str,
) -> String {
    if expenses.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    let total: Money = expenses.iter().map(|e| e.amount).sum();
    let rows = expenses
        .iter()
        .map(|e| ExpenseRow {
            id: e.id.to_string(),
            date: e.date.format(date_format).to_string(),
            description: e.description.clone(),
            category: e.category.clone(),
            payer: names.name(e.payer),
            amount: e.amount.format_with_symbol(currency_symbol),
        })
        .collect();

    let mut output = render_table(rows, &[5]);
    output.push_str(&format!(
        "{} expense(s), {} in total\n",
        expenses.len(),
        total.format_with_symbol(currency_symbol)
    ));
    output
}

/// Format a single expense with its splits
pub fn format_expense_details(
    expense: &Expense,
    splits: &[ExpenseSplit],
    names: &PartyNames,
    currency_symbol: &str,
    date_format: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense: {}\n", expense.description));
    output.push_str(&format!("  ID:       {}\n", expense.id));
    output.push_str(&format!(
        "  Amount:   {}\n",
        expense.amount.format_with_symbol(currency_symbol)
    ));
    output.push_str(&format!("  Paid by:  {}\n", names.name(expense.payer)));
    output.push_str(&format!("  Category: {}\n", expense.category));
    output.push_str(&format!("  Date:     {}\n", expense.date.format(date_format)));
    if let Some(note) = &expense.note {
        output.push_str(&format!("  Note:     {}\n", note));
    }

    output.push_str(&format!("  Split among {}:\n", splits.len()));
    for split in splits {
        output.push_str(&format!(
            "    {:<20} {:>12}\n",
            names.name(Party::Person(split.person_id)),
            split.amount.format_with_symbol(currency_symbol)
        ));
    }

    output
}

#[derive(Tabled)]
struct SettlementRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format a list of recorded settlements
pub fn format_settlement_list(
    settlements: &[Settlement],
    names: &PartyNames,
    currency_symbol: &str,
    date_format: &str,
) -> String {
    if settlements.is_empty() {
        return "No settlements recorded.\n".to_string();
    }

    let rows = settlements
        .iter()
        .map(|s| SettlementRow {
            id: s.id.to_string(),
            date: s.date.format(date_format).to_string(),
            from: names.name(s.from),
            to: names.name(s.to),
            amount: s.amount.format_with_symbol(currency_symbol),
        })
        .collect();

    render_table(rows, &[4])
}
