//! Project Portfolio Report
//!
//! One row per project with cost against budget, plus grand totals.

use std::io::Write;

use crate::error::{CreatorFlowError, CreatorFlowResult};
use crate::models::{Money, Project, ProjectId, ProjectStatus};
use crate::storage::Storage;

/// A single project's figures
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioRow {
    pub project_id: ProjectId,
    pub title: String,
    pub created_at: String,
    pub budget: Money,
    pub total_cost: Money,
    pub paid: Money,
    /// Floored at zero
    pub balance_due: Money,
    /// `None` when the project has no budget
    pub percent_used: Option<f64>,
    pub status: ProjectStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioReport {
    pub rows: Vec<PortfolioRow>,
    pub total_budget: Money,
    pub total_cost: Money,
    pub total_paid: Money,
    pub total_due: Money,
    pub paid_count: usize,
}

impl PortfolioReport {
    pub fn from_projects(projects: &[Project]) -> Self {
        let rows: Vec<PortfolioRow> = projects
            .iter()
            .map(|p| {
                let summary = p.summary();
                PortfolioRow {
                    project_id: p.id,
                    title: p.title.clone(),
                    created_at: p.created_at.clone(),
                    budget: p.budget,
                    total_cost: summary.total_cost,
                    paid: summary.paid_amount,
                    balance_due: summary.balance_due,
                    percent_used: summary.percent_used,
                    status: summary.status,
                }
            })
            .collect();

        Self {
            total_budget: rows.iter().map(|r| r.budget).sum(),
            total_cost: rows.iter().map(|r| r.total_cost).sum(),
            total_paid: rows.iter().map(|r| r.paid).sum(),
            total_due: rows.iter().map(|r| r.balance_due).sum(),
            paid_count: rows
                .iter()
                .filter(|r| r.status == ProjectStatus::Paid)
                .count(),
            rows,
        }
    }

    pub fn generate(storage: &Storage) -> CreatorFlowResult<Self> {
        Ok(Self::from_projects(&storage.projects.snapshot()?))
    }

    /// Portfolio-wide cost against budget
    pub fn percent_used(&self) -> Option<f64> {
        self.total_cost.percent_of(self.total_budget)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();
        output.push_str("Project Portfolio\n");
        output.push_str(&"=".repeat(78));
        output.push('\n');
        output.push_str(&format!(
            "{:<28} {:>12} {:>12} {:>12} {:>6} {:<6}\n",
            "Project", "Budget", "Cost", "Due", "Used", "Status"
        ));
        output.push_str(&"-".repeat(78));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<28} {:>12} {:>12} {:>12} {:>6} {:<6}\n",
                truncate(&row.title, 28),
                row.budget,
                row.total_cost,
                row.balance_due,
                format_percent(row.percent_used),
                row.status
            ));
        }

        output.push_str(&"-".repeat(78));
        output.push('\n');
        output.push_str(&format!(
            "{:<28} {:>12} {:>12} {:>12} {:>6}\n",
            "TOTAL",
            self.total_budget,
            self.total_cost,
            self.total_due,
            format_percent(self.percent_used())
        ));
        output.push_str(&format!(
            "{} of {} projects paid\n",
            self.paid_count,
            self.rows.len()
        ));
        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> CreatorFlowResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| CreatorFlowError::Export(e.to_string());

        csv.write_record([
            "Project ID", "Project", "Created", "Budget", "Total Cost", "Paid", "Balance Due",
            "Percent Used", "Status",
        ])
        .map_err(export_err)?;

        for row in &self.rows {
            csv.write_record([
                row.project_id.to_string(),
                row.title.clone(),
                row.created_at.clone(),
                row.budget.to_decimal_string(),
                row.total_cost.to_decimal_string(),
                row.paid.to_decimal_string(),
                row.balance_due.to_decimal_string(),
                row.percent_used.map(|p| format!("{:.1}", p)).unwrap_or_default(),
                row.status.to_string(),
            ])
            .map_err(export_err)?;
        }

        csv.flush()
            .map_err(|e| CreatorFlowError::Export(e.to_string()))
    }
}

/// Whole percent, or "n/a" without a budget
pub fn format_percent(percent: Option<f64>) -> String {
    match percent {
        Some(p) => format!("{:.0}%", p),
        None => "n/a".to_string(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max - 3).collect();
        format!("{}...", cut)
    }
}
