//! Report generation: CSV export and the printable financial report.
//!
//! Both outputs are built entirely from the in-memory collections. The CSV
//! uses RFC 4180-style quoting with every field wrapped in double quotes and
//! internal quotes doubled; the printable report is a self-contained HTML
//! document with summary tiles, category breakdowns, task statistics and the
//! most recent transactions.

use serde::Serialize;
use std::collections::HashMap;

use crate::domain::models::{EntryType, MoneyEntry, PaymentStatus, Settings, Todo};
use crate::domain::settings_service::format_amount;

/// Transactions listed in the printable report.
const REPORT_RECENT_LIMIT: usize = 20;

/// Header row of the CSV export.
pub const CSV_HEADER: &str = "Date,Type,Category,Description,Amount,Linked Task";

/// Aggregate payload behind the printable report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportData {
    pub total_income: f64,
    pub total_expense: f64,
    pub net_balance: f64,
    pub total_entries: usize,
    /// `(category, amount)` pairs sorted by amount descending.
    pub income_by_category: Vec<(String, f64)>,
    pub expense_by_category: Vec<(String, f64)>,
    pub task_stats: TaskStats,
    /// The most recent transactions, date descending, capped at 20.
    pub recent_transactions: Vec<MoneyEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub paid: usize,
    /// Completed tasks still awaiting payment.
    pub unpaid: usize,
}

/// Stateless report builders.
#[derive(Clone, Default)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// Render every money entry as CSV, most recent first. A deleted linked
    /// task renders as an empty Linked Task field.
    pub fn csv(&self, entries: &[MoneyEntry], todos: &[Todo]) -> String {
        let title_by_id: HashMap<&str, &str> = todos
            .iter()
            .map(|t| (t.id.as_str(), t.title.as_str()))
            .collect();

        let mut sorted: Vec<&MoneyEntry> = entries.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));

        let mut csv = String::new();
        csv.push_str(CSV_HEADER);
        csv.push('\n');

        for entry in sorted {
            let linked_title = entry
                .linked_todo_id
                .as_deref()
                .and_then(|id| title_by_id.get(id).copied())
                .unwrap_or("");
            let row = [
                entry.date.format("%Y-%m-%d").to_string(),
                entry.entry_type.label().to_string(),
                entry.category.clone(),
                entry.description.clone().unwrap_or_default(),
                entry.amount.to_string(),
                linked_title.to_string(),
            ];
            let quoted: Vec<String> = row.iter().map(|field| quote_csv_field(field)).collect();
            csv.push_str(&quoted.join(","));
            csv.push('\n');
        }
        csv
    }

    /// Aggregate everything the printable report shows.
    pub fn report_data(&self, entries: &[MoneyEntry], todos: &[Todo]) -> ReportData {
        let total_income: f64 = entries
            .iter()
            .filter(|e| e.entry_type == EntryType::Income)
            .map(|e| e.amount)
            .sum();
        let total_expense: f64 = entries
            .iter()
            .filter(|e| e.entry_type == EntryType::Expense)
            .map(|e| e.amount)
            .sum();

        let mut income_by_category: HashMap<String, f64> = HashMap::new();
        let mut expense_by_category: HashMap<String, f64> = HashMap::new();
        for entry in entries {
            let category = if entry.category.is_empty() {
                "Other".to_string()
            } else {
                entry.category.clone()
            };
            let bucket = match entry.entry_type {
                EntryType::Income => &mut income_by_category,
                EntryType::Expense => &mut expense_by_category,
            };
            *bucket.entry(category).or_insert(0.0) += entry.amount;
        }

        let mut recent: Vec<MoneyEntry> = entries.to_vec();
        recent.sort_by(|a, b| b.date.cmp(&a.date));
        recent.truncate(REPORT_RECENT_LIMIT);

        ReportData {
            net_balance: total_income - total_expense,
            total_income,
            total_expense,
            total_entries: entries.len(),
            income_by_category: sorted_breakdown(income_by_category),
            expense_by_category: sorted_breakdown(expense_by_category),
            task_stats: TaskStats {
                total: todos.len(),
                completed: todos.iter().filter(|t| t.completed).count(),
                paid: todos
                    .iter()
                    .filter(|t| t.payment_status == PaymentStatus::Paid)
                    .count(),
                unpaid: todos
                    .iter()
                    .filter(|t| t.completed && t.payment_status == PaymentStatus::Unpaid)
                    .count(),
            },
            recent_transactions: recent,
        }
    }

    /// Render the report payload as a printable HTML document.
    pub fn render_report_html(&self, data: &ReportData, settings: &Settings) -> String {
        let symbol = &settings.currency.symbol;
        let money = |amount: f64| format!("{}{}", symbol, format_amount(amount));

        let category_rows = |breakdown: &[(String, f64)], empty_note: &str| {
            if breakdown.is_empty() {
                return format!("<p class=\"empty\">{}</p>", empty_note);
            }
            breakdown
                .iter()
                .map(|(category, amount)| {
                    format!(
                        "<div class=\"row\"><span>{}</span><span>{}</span></div>",
                        escape_html(category),
                        money(*amount)
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        };

        let transaction_rows = data
            .recent_transactions
            .iter()
            .map(|entry| {
                format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class=\"amount\">{}</td></tr>",
                    entry.date.format("%b %-d, %Y"),
                    entry.entry_type.label(),
                    escape_html(&entry.category),
                    escape_html(entry.description.as_deref().unwrap_or("-")),
                    money(entry.amount)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<title>Financial Report</title>
<style>
body {{ font-family: sans-serif; padding: 40px; color: #1a1a1a; }}
h1 {{ text-align: center; }}
h2 {{ border-bottom: 1px solid #eee; padding-bottom: 8px; }}
.tiles {{ display: grid; grid-template-columns: repeat(4, 1fr); gap: 16px; }}
.tile {{ background: #f9fafb; border-radius: 8px; padding: 16px; text-align: center; }}
.tile .value {{ font-size: 24px; font-weight: 700; }}
.columns {{ display: grid; grid-template-columns: repeat(2, 1fr); gap: 24px; }}
.row {{ display: flex; justify-content: space-between; padding: 8px 0; border-bottom: 1px solid #f0f0f0; }}
.empty {{ color: #999; }}
table {{ width: 100%; border-collapse: collapse; }}
th, td {{ padding: 10px 12px; text-align: left; border-bottom: 1px solid #eee; }}
.amount {{ text-align: right; }}
</style>
</head>
<body>
<h1>Financial Report</h1>
<h2>Summary</h2>
<div class="tiles">
<div class="tile"><div class="value">{income}</div><div>Total Income</div></div>
<div class="tile"><div class="value">{expense}</div><div>Total Expenses</div></div>
<div class="tile"><div class="value">{net}</div><div>Net Balance</div></div>
<div class="tile"><div class="value">{count}</div><div>Transactions</div></div>
</div>
<h2>Category Breakdown</h2>
<div class="columns">
<div><h3>Income by Category</h3>
{income_categories}</div>
<div><h3>Expenses by Category</h3>
{expense_categories}</div>
</div>
<h2>Task Statistics</h2>
<div class="tiles">
<div class="tile"><div class="value">{tasks_total}</div><div>Total Tasks</div></div>
<div class="tile"><div class="value">{tasks_completed}</div><div>Completed</div></div>
<div class="tile"><div class="value">{tasks_paid}</div><div>Paid</div></div>
<div class="tile"><div class="value">{tasks_unpaid}</div><div>Unpaid</div></div>
</div>
<h2>Recent Transactions</h2>
<table>
<thead><tr><th>Date</th><th>Type</th><th>Category</th><th>Description</th><th class="amount">Amount</th></tr></thead>
<tbody>
{transactions}
</tbody>
</table>
</body>
</html>
"#,
            income = money(data.total_income),
            expense = money(data.total_expense),
            net = money(data.net_balance),
            count = data.total_entries,
            income_categories = category_rows(&data.income_by_category, "No income recorded"),
            expense_categories = category_rows(&data.expense_by_category, "No expenses recorded"),
            tasks_total = data.task_stats.total,
            tasks_completed = data.task_stats.completed,
            tasks_paid = data.task_stats.paid,
            tasks_unpaid = data.task_stats.unpaid,
            transactions = transaction_rows,
        )
    }
}

/// Wrap a field in double quotes, doubling any internal quote.
fn quote_csv_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn sorted_breakdown(buckets: HashMap<String, f64>) -> Vec<(String, f64)> {
    let mut breakdown: Vec<(String, f64)> = buckets.into_iter().collect();
    breakdown.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    breakdown
}
