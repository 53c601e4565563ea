//! Transaction record and the read-only source trait.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single entry in the transaction log. The log is append-only and owned
/// by the source; the engine only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    /// Signed amount; positive values are income.
    pub amount: f64,
    pub category: String,
    /// Optional customer identifier. When absent, customer counts fall back
    /// to a revenue-based estimate.
    pub customer_id: Option<String>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }
}

/// Aggregate income per category, sorted by income descending. Ties break on
/// category name so ordering stays deterministic.
pub fn income_by_category(transactions: &[Transaction]) -> Vec<(String, f64)> {
    let mut totals: HashMap<&str, f64> = HashMap::new();
    for tx in transactions.iter().filter(|t| t.is_income()) {
        *totals.entry(tx.category.as_str()).or_default() += tx.amount;
    }

    let mut ranked: Vec<(String, f64)> = totals
        .into_iter()
        .map(|(category, total)| (category.to_string(), total))
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal).then_with(|| a.0.cmp(&b.0)));
    ranked
}

/// One category's share of total income, as an integer percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub percentage: u32,
}

/// Pre-aggregated convenience view over a transaction source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceAnalytics {
    pub total_income: f64,
    pub category_breakdown: Vec<CategoryShare>,
}

#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Returns the full transaction log. Ordering is not guaranteed.
    async fn list_all(&self) -> Result<Vec<Transaction>>;

    /// Income total and per-category shares across the whole log.
    async fn analytics(&self) -> Result<SourceAnalytics> {
        let transactions = self.list_all().await?;
        let total_income: f64 = transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount)
            .sum();

        let category_breakdown = if total_income > 0.0 {
            income_by_category(&transactions)
                .into_iter()
                .map(|(category, total)| CategoryShare {
                    category,
                    percentage: ((total / total_income) * 100.0).round() as u32,
                })
                .collect()
        } else {
            Vec::new()
        };

        Ok(SourceAnalytics {
            total_income,
            category_breakdown,
        })
    }
}
