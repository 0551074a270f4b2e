//! Display formatting for terminal output
//!
//! Turns models and engine results into `tabled` tables. Every function
//! returns a `String` so handlers decide where it goes.

pub mod balance;
pub mod expense;
pub mod occasion;

pub use balance::{format_balances, format_issues, format_suggestions};
pub use expense::{format_expense_details, format_expense_list, format_settlement_list};
pub use occasion::{format_audit_entries, format_occasion_list, format_people, format_subgroups};

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

/// Render rows with the shared table style, right-aligning the given columns
pub(crate) fn render_table<R: Tabled>(rows: Vec<R>, right_aligned: &[usize]) -> String {
    let mut table = Table::new(rows);
    table.with(Style::psql());
    for &column in right_aligned {
        table.with(Modify::new(Columns::single(column)).with(Alignment::right()));
    }
    let mut output = table.to_string();
    output.push('\n');
    output
}
