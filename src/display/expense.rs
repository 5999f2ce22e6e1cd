//! Expense display formatting
//!
//! Formats expense listings and per-category summaries for terminal output.

use crate::models::Expense;

/// Format a list of expenses, one summary line each, with a running total
pub fn format_expense_list(expenses: &[Expense]) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    for expense in expenses {
        output.push_str(&expense.to_string());
        output.push('\n');
    }

    let total: f64 = expenses.iter().map(Expense::amount).sum();
    output.push_str(&format!("\nTotal Expenses: ${:.2}\n", total));
    output
}

/// Format the overall summary: total plus per-category breakdown with
/// percentages
pub fn format_summary(total: f64, categories: &[(String, f64)]) -> String {
    let mut output = format!("Total Expenses: ${:.2}\n", total);
    output.push_str("\nBreakdown by Category:\n");

    for (name, category_total) in categories {
        let percentage = if total > 0.0 {
            category_total / total * 100.0
        } else {
            0.0
        };
        output.push_str(&format!(
            "  {}: ${:.2} ({:.2}%)\n",
            name, category_total, percentage
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryDetails, UserId};
    use chrono::NaiveDate;

    fn sample_expense(amount: f64) -> Expense {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        Expense::new(
            UserId::from("user_1"),
            amount,
            ts,
            "",
            CategoryDetails::food("Diner", "Lunch").unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_expense_list(&[]), "No expenses found.\n");
    }

    #[test]
    fn test_list_with_total() {
        let expenses = vec![sample_expense(10.0), sample_expense(2.5)];
        let output = format_expense_list(&expenses);

        assert!(output.contains("Category: Food"));
        assert!(output.contains("Total Expenses: $12.50"));
    }

    #[test]
    fn test_summary_percentages() {
        let output = format_summary(
            100.0,
            &[("Food".to_string(), 75.0), ("Travel".to_string(), 25.0)],
        );

        assert!(output.contains("Total Expenses: $100.00"));
        assert!(output.contains("Food: $75.00 (75.00%)"));
        assert!(output.contains("Travel: $25.00 (25.00%)"));
    }

    #[test]
    fn test_summary_zero_total() {
        let output = format_summary(0.0, &[("Food".to_string(), 0.0)]);
        assert!(output.contains("Food: $0.00 (0.00%)"));
    }
}
