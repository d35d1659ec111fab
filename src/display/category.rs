//! Category listing

use tabled::settings::{object::Columns, Alignment, Style};
use tabled::{Table, Tabled};

use crate::storage::CategoryCount;

#[derive(Tabled)]
struct CategoryRow<'a> {
    #[tabled(rename = "Category")]
    category: &'a str,
    #[tabled(rename = "Count")]
    count: usize,
}

/// Format categories with their transaction counts
pub fn format_category_table(categories: &[CategoryCount]) -> String {
    let rows = categories.iter().map(|c| CategoryRow {
        category: &c.category,
        count: c.count,
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::new(1..), Alignment::right());
    format!("{}\n", table)
}
