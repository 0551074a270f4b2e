//! Balance, suggestion and integrity display

use tabled::Tabled;

use super::render_table;
use crate::engine::{Balance, IntegrityIssue, SuggestedTransfer};
use crate::models::Money;

#[derive(Tabled)]
struct BalanceRow {
    #[tabled(rename = "Person")]
    name: String,
    #[tabled(rename = "Balance")]
    amount: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

/// Format balances, largest creditor first
pub fn format_balances(balances: &[Balance], currency_symbol: &str) -> String {
    if balances.is_empty() {
        return "No people in this occasion.\n".to_string();
    }

    let rows = balances
        .iter()
        .map(|balance| BalanceRow {
            name: balance.person_name.clone(),
            amount: balance.amount.format_with_symbol(currency_symbol),
            status: if balance.is_settled() {
                "settled"
            } else if balance.amount.is_positive() {
                "is owed"
            } else {
                "owes"
            },
        })
        .collect();

    render_table(rows, &[1])
}

#[derive(Tabled)]
struct TransferRow {
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format suggested transfers; an empty list means everyone is settled
pub fn format_suggestions(suggestions: &[SuggestedTransfer], currency_symbol: &str) -> String {
    if suggestions.is_empty() {
        return "Everyone is settled up!\n".to_string();
    }

    let total: Money = suggestions.iter().map(|s| s.amount).sum();
    let rows = suggestions
        .iter()
        .map(|s| TransferRow {
            from: s.from.clone(),
            to: s.to.clone(),
            amount: s.amount.format_with_symbol(currency_symbol),
        })
        .collect();

    let mut output = render_table(rows, &[2]);
    output.push_str(&format!(
        "{} transfer(s), {} in total\n",
        suggestions.len(),
        total.format_with_symbol(currency_symbol)
    ));
    output
}

/// Format an integrity report
pub fn format_issues(issues: &[IntegrityIssue]) -> String {
    if issues.is_empty() {
        return "No integrity issues found.\n".to_string();
    }

    let mut output = format!("{} issue(s) found:\n", issues.len());
    for issue in issues {
        output.push_str(&format!("  - {}\n", issue));
    }
    output
}
