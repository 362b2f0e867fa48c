//! Project and ExpenseItem models
//!
//! A project is a budgeted unit of work that owns an ordered list of expense
//! line items. Totals, balance and budget consumption are always derived from
//! the items; only the cumulative paid amount and the cached payment status
//! are stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::DEFAULT_CATEGORY;
use super::ids::{ExpenseItemId, ProjectId};
use super::money::Money;

/// Cached settlement status of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProjectStatus {
    #[default]
    Unpaid,
    Paid,
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unpaid => write!(f, "Unpaid"),
            Self::Paid => write!(f, "Paid"),
        }
    }
}

/// A single billable entry within a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseItem {
    pub id: ExpenseItemId,

    #[serde(default)]
    pub description: String,

    /// Category label; not checked against the registry on write
    pub category: String,

    pub quantity: u32,

    pub unit_price: Money,
}

impl ExpenseItem {
    /// A blank line: one unit at zero cost in the default category
    pub fn new() -> Self {
        Self {
            id: ExpenseItemId::new(),
            description: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            quantity: 1,
            unit_price: Money::zero(),
        }
    }

    /// quantity x unit price
    pub fn line_amount(&self) -> Money {
        self.unit_price.times(self.quantity)
    }

    pub fn checked_line_amount(&self) -> Option<Money> {
        self.unit_price.checked_times(self.quantity)
    }

    /// Apply a partial update
    pub fn apply(&mut self, patch: &ExpenseItemPatch) {
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(unit_price) = patch.unit_price {
            self.unit_price = unit_price;
        }
    }
}

impl Default for ExpenseItem {
    fn default() -> Self {
        Self::new()
    }
}

/// Partial update for an expense line item
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseItemPatch {
    pub description: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<u32>,
    pub unit_price: Option<Money>,
}

impl ExpenseItemPatch {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.category.is_none()
            && self.quantity.is_none()
            && self.unit_price.is_none()
    }

    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        if let Some(price) = self.unit_price {
            if price.is_negative() {
                return Err(ProjectValidationError::NegativeUnitPrice);
            }
        }
        if let Some(category) = &self.category {
            if category.trim().is_empty() {
                return Err(ProjectValidationError::EmptyCategory);
            }
        }
        Ok(())
    }
}

/// A budgeted project with its expense line items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,

    pub title: String,

    pub budget: Money,

    /// Cumulative amount received; only ever increased by payments
    #[serde(default)]
    pub paid_amount: Money,

    /// Display-formatted creation date, fixed at creation
    pub created_at: String,

    /// Recomputed on payment only
    #[serde(default)]
    pub status: ProjectStatus,

    /// Insertion order, never reordered
    #[serde(default)]
    pub expenses: Vec<ExpenseItem>,

    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Create an empty project. `created_at` is the already-formatted date.
    pub fn new(title: impl Into<String>, budget: Money, created_at: impl Into<String>) -> Self {
        Self {
            id: ProjectId::new(),
            title: title.into().trim().to_string(),
            budget,
            paid_amount: Money::zero(),
            created_at: created_at.into(),
            status: ProjectStatus::Unpaid,
            expenses: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    /// Sum of quantity x unit price over every line
    pub fn total_cost(&self) -> Money {
        self.expenses.iter().map(ExpenseItem::line_amount).sum()
    }

    /// Total cost, `None` when a line or the sum leaves the money range
    pub fn checked_total_cost(&self) -> Option<Money> {
        self.expenses.iter().try_fold(Money::zero(), |total, item| {
            total.checked_add(item.checked_line_amount()?)
        })
    }

    /// Reject line edits whose total no longer fits in the money range
    pub fn check_totals(&self) -> Result<(), ProjectValidationError> {
        self.checked_total_cost()
            .map(|_| ())
            .ok_or(ProjectValidationError::AmountTooLarge)
    }

    /// total cost - paid amount; negative when overpaid
    pub fn balance(&self) -> Money {
        self.total_cost() - self.paid_amount
    }

    /// Balance for display: never below zero
    pub fn balance_due(&self) -> Money {
        self.balance().floor_zero()
    }

    /// total cost / budget x 100, `None` when no budget is set
    pub fn percent_used(&self) -> Option<f64> {
        self.total_cost().percent_of(self.budget)
    }

    /// Percent used clamped to 0..=100 for progress bars
    pub fn progress_percent(&self) -> f64 {
        self.percent_used().unwrap_or(0.0).clamp(0.0, 100.0)
    }

    pub fn find_item(&self, id: ExpenseItemId) -> Option<&ExpenseItem> {
        self.expenses.iter().find(|item| item.id == id)
    }

    /// Resolve a line item from user input (id, short id or 1-based position)
    pub fn resolve_item(&self, input: &str) -> Option<ExpenseItemId> {
        if let Ok(position) = input.trim().parse::<usize>() {
            if position >= 1 {
                if let Some(item) = self.expenses.get(position - 1) {
                    return Some(item.id);
                }
            }
        }
        self.expenses
            .iter()
            .find(|item| item.id.matches(input))
            .map(|item| item.id)
    }

    /// Append a line item
    pub fn add_item(&mut self, item: ExpenseItem) {
        self.expenses.push(item);
        self.updated_at = Utc::now();
    }

    /// Patch a line item in place; status is deliberately left as is
    pub fn update_item(&mut self, id: ExpenseItemId, patch: &ExpenseItemPatch) -> bool {
        match self.expenses.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.apply(patch);
                self.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    /// Remove a line item, keeping the order of the rest
    pub fn remove_item(&mut self, id: ExpenseItemId) -> Option<ExpenseItem> {
        let index = self.expenses.iter().position(|item| item.id == id)?;
        self.updated_at = Utc::now();
        Some(self.expenses.remove(index))
    }

    /// Record a payment and recompute the status against the current total
    ///
    /// Non-positive amounts, and payments whose running total or the project
    /// total leave the money range, are rejected and leave the project untouched.
    pub fn record_payment(&mut self, amount: Money) -> Result<ProjectStatus, PaymentError> {
        if !amount.is_positive() {
            return Err(PaymentError::NonPositiveAmount(amount));
        }
        let total = self.checked_total_cost().ok_or(PaymentError::AmountTooLarge)?;
        let paid = self
            .paid_amount
            .checked_add(amount)
            .ok_or(PaymentError::AmountTooLarge)?;

        self.paid_amount = paid;
        self.status = if self.paid_amount >= total {
            ProjectStatus::Paid
        } else {
            ProjectStatus::Unpaid
        };
        self.updated_at = Utc::now();

        Ok(self.status)
    }

    /// Point-in-time figures for display
    pub fn summary(&self) -> ProjectSummary {
        ProjectSummary {
            total_cost: self.total_cost(),
            paid_amount: self.paid_amount,
            balance: self.balance(),
            balance_due: self.balance_due(),
            percent_used: self.percent_used(),
            status: self.status,
            item_count: self.expenses.len(),
        }
    }

    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        if self.title.trim().is_empty() {
            return Err(ProjectValidationError::EmptyTitle);
        }
        if self.budget.is_negative() {
            return Err(ProjectValidationError::NegativeBudget);
        }
        Ok(())
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Derived figures for a project
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectSummary {
    pub total_cost: Money,
    pub paid_amount: Money,
    /// Signed; negative means overpaid
    pub balance: Money,
    pub balance_due: Money,
    pub percent_used: Option<f64>,
    pub status: ProjectStatus,
    pub item_count: usize,
}

/// Rejected payment input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    NonPositiveAmount(Money),
    AmountTooLarge,
}

impl fmt::Display for PaymentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Payment amount must be greater than zero (got {})", amount)
            }
            Self::AmountTooLarge => write!(f, "Paid amount is too large to record"),
        }
    }
}

impl std::error::Error for PaymentError {}

/// Validation errors for projects and line items
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    EmptyTitle,
    NegativeBudget,
    NegativeUnitPrice,
    EmptyCategory,
    AmountTooLarge,
}

impl fmt::Display for ProjectValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Project title cannot be empty"),
            Self::NegativeBudget => write!(f, "Budget cannot be negative"),
            Self::NegativeUnitPrice => write!(f, "Unit price cannot be negative"),
            Self::EmptyCategory => write!(f, "Category cannot be empty"),
            Self::AmountTooLarge => write!(f, "Project total is too large"),
        }
    }
}

impl std::error::Error for ProjectValidationError {}
