//! Invoice model
//!
//! A point-in-time rendering of a project's expense lines plus client and
//! payment metadata. Nothing here is persisted; invoices are rebuilt from the
//! project every time.

use chrono::{Duration, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use super::project::Project;
use crate::config::settings::InvoiceDefaults;

/// Shown when no client name was given
pub const FALLBACK_CLIENT: &str = "General Client";

/// Caller-supplied invoice options; unset fields fall back to defaults
#[derive(Debug, Clone, Default)]
pub struct InvoiceConfig {
    pub client_name: String,
    pub invoice_number: Option<String>,
    pub invoice_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub discount: Option<Money>,
    pub logo_url: Option<String>,
    pub payment_terms: Option<String>,
}

/// One rendered line of an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub description: String,
    pub category: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub amount: Money,
}

/// A fully composed invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDocument {
    pub number: String,
    pub client_name: String,
    pub project_title: String,
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
    pub lines: Vec<InvoiceLine>,
    pub subtotal: Money,
    pub discount: Money,
    pub grand_total: Money,
    pub logo_url: String,
    pub payment_terms: String,
}

/// `prefix` followed by a random five digit number
pub fn generate_invoice_number(prefix: &str) -> String {
    let number: u32 = rand::thread_rng().gen_range(10000..=99999);
    format!("{}{}", prefix, number)
}

impl InvoiceDocument {
    /// Compose an invoice for `project`
    ///
    /// `today` is the default invoice date; the due date defaults to the
    /// invoice date plus `defaults.due_in_days`.
    pub fn build(
        project: &Project,
        config: &InvoiceConfig,
        defaults: &InvoiceDefaults,
        today: NaiveDate,
    ) -> Result<Self, InvoiceError> {
        let discount = config.discount.unwrap_or_default();
        if discount.is_negative() {
            return Err(InvoiceError::NegativeDiscount(discount));
        }

        let invoice_date = config.invoice_date.unwrap_or(today);
        let due_date = config
            .due_date
            .unwrap_or_else(|| invoice_date + Duration::days(defaults.due_in_days));
        if due_date < invoice_date {
            return Err(InvoiceError::DueBeforeIssue {
                invoice_date,
                due_date,
            });
        }

        let lines: Vec<InvoiceLine> = project
            .expenses
            .iter()
            .map(|item| InvoiceLine {
                description: item.description.clone(),
                category: item.category.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
                amount: item.line_amount(),
            })
            .collect();
        let subtotal = project.total_cost();

        let number = match &config.invoice_number {
            Some(number) if !number.trim().is_empty() => number.trim().to_string(),
            _ => generate_invoice_number(&defaults.number_prefix),
        };

        let client_name = match config.client_name.trim() {
            "" => FALLBACK_CLIENT.to_string(),
            name => name.to_string(),
        };

        Ok(Self {
            number,
            client_name,
            project_title: project.title.clone(),
            invoice_date,
            due_date,
            lines,
            subtotal,
            discount,
            grand_total: grand_total(subtotal, discount),
            logo_url: config
                .logo_url
                .clone()
                .unwrap_or_else(|| defaults.logo_url.clone()),
            payment_terms: config
                .payment_terms
                .clone()
                .unwrap_or_else(|| defaults.payment_terms.clone()),
        })
    }

    /// Summary handed to a share target
    pub fn share_text(&self, currency_symbol: &str) -> String {
        format!(
            "Invoice {} for {}\nTotal: {}",
            self.number,
            self.project_title,
            self.grand_total.format_with_symbol(currency_symbol)
        )
    }

    pub fn share_title(&self) -> String {
        format!("Invoice {}", self.number)
    }
}

/// Subtotal less discount, never below zero
pub fn grand_total(subtotal: Money, discount: Money) -> Money {
    (subtotal - discount).floor_zero()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvoiceError {
    NegativeDiscount(Money),
    DueBeforeIssue {
        invoice_date: NaiveDate,
        due_date: NaiveDate,
    },
}

impl fmt::Display for InvoiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeDiscount(amount) => {
                write!(f, "Discount cannot be negative: {}", amount)
            }
            Self::DueBeforeIssue {
                invoice_date,
                due_date,
            } => write!(
                f,
                "Due date {} is before invoice date {}",
                due_date, invoice_date
            ),
        }
    }
}

impl std::error::Error for InvoiceError {}
