//! Project display formatting
//!
//! Formats projects for terminal output in list and detail views.

use crate::models::Project;
use crate::reports::portfolio::format_percent;

const BAR_WIDTH: usize = 20;

/// Budget consumption bar, clamped to full
pub fn progress_bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

/// Format a list of projects as a table
pub fn format_project_list(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "No projects found.".to_string();
    }

    let title_width = projects
        .iter()
        .map(|p| p.title.chars().count())
        .max()
        .unwrap_or(5)
        .max(5);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<title_width$}  {:>12}  {:>12}  {:>6}  {:<22}  {}\n",
        "ID",
        "Title",
        "Budget",
        "Cost",
        "Used",
        "",
        "Status",
        title_width = title_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<title_width$}  {:->12}  {:->12}  {:->6}  {:-<22}  {:-<6}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        "",
        title_width = title_width,
    ));

    for project in projects {
        let summary = project.summary();
        output.push_str(&format!(
            "{:<12}  {:<title_width$}  {:>12}  {:>12}  {:>6}  {:<22}  {}\n",
            project.id.to_string(),
            project.title,
            project.budget.to_string(),
            summary.total_cost.to_string(),
            format_percent(summary.percent_used),
            progress_bar(project.progress_percent()),
            summary.status,
            title_width = title_width,
        ));
    }

    output
}

/// Format a single project with its expense lines
pub fn format_project_details(project: &Project) -> String {
    let summary = project.summary();
    let mut output = String::new();

    output.push_str(&format!("Project: {}\n", project.title));
    output.push_str(&format!("  ID:           {}\n", project.id));
    output.push_str(&format!("  Created:      {}\n", project.created_at));
    output.push_str(&format!("  Status:       {}\n", summary.status));
    output.push('\n');
    output.push_str(&format!("  Budget:       {}\n", project.budget));
    output.push_str(&format!("  Total Cost:   {}\n", summary.total_cost));
    output.push_str(&format!("  Paid:         {}\n", summary.paid_amount));
    output.push_str(&format!("  Balance Due:  {}\n", summary.balance_due));
    if summary.balance.is_negative() {
        output.push_str(&format!("  Overpaid by:  {}\n", summary.balance.abs()));
    }
    output.push_str(&format!(
        "  Budget Used:  {} {}\n",
        format_percent(summary.percent_used),
        progress_bar(project.progress_percent())
    ));
    output.push('\n');

    if project.expenses.is_empty() {
        output.push_str("  No expense items.\n");
        return output;
    }

    output.push_str(&format!(
        "  {:>3}  {:<12}  {:<28}  {:<14}  {:>4}  {:>11}  {:>11}\n",
        "#", "ID", "Description", "Category", "Qty", "Unit Price", "Amount"
    ));
    for (index, item) in project.expenses.iter().enumerate() {
        output.push_str(&format!(
            "  {:>3}  {:<12}  {:<28}  {:<14}  {:>4}  {:>11}  {:>11}\n",
            index + 1,
            item.id.to_string(),
            item.description,
            item.category,
            item.quantity,
            item.unit_price.to_string(),
            item.line_amount().to_string(),
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_progress_bar_clamps() {
        assert_eq!(progress_bar(0.0), format!("[{}]", ".".repeat(20)));
        assert_eq!(progress_bar(50.0), format!("[{}{}]", "#".repeat(10), ".".repeat(10)));
        assert_eq!(progress_bar(250.0), format!("[{}]", "#".repeat(20)));
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_project_list(&[]), "No projects found.");
    }

    #[test]
    fn test_details_without_budget() {
        let project = Project::new("Open Ended", Money::zero(), "Jan 1, 2025");
        let text = format_project_details(&project);
        assert!(text.contains("Budget Used:  n/a"));
        assert!(text.contains("No expense items."));
    }
}
