//! KPI aggregation over the transaction log.
//!
//! Partitions transactions into calendar months, derives the trailing
//! six-month series plus headline figures, and ranks category income shares.

use crate::core::transaction::{Transaction, income_by_category};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Gold palette applied to ranked category slices, best first.
pub const CATEGORY_PALETTE: [&str; 4] = ["#D4AF37", "#FFD700", "#B8860B", "#DAA520"];

/// Number of calendar months in the trailing series, current month included.
pub const SERIES_MONTHS: usize = 6;

/// Revenue divisor used to estimate customer counts when no customer
/// identifiers are present in the log.
const REVENUE_PER_CUSTOMER: f64 = 500.0;

/// One calendar-month bucket of the trailing series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    pub label: String,
    pub revenue: f64,
    pub customers: u32,
    pub transactions: u32,
}

/// One ranked slice of the category breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySlice {
    pub category: String,
    pub percentage: u32,
    pub color: String,
}

/// The derived KPI figures returned to presentation components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSnapshot {
    /// Income sum for the current calendar month.
    pub revenue: f64,
    /// Month-over-month revenue change, integer percent. 0 when the previous
    /// month had no income.
    pub growth: i64,
    pub customers: u32,
    /// Data-richness heuristic, clamped to 40..=90. Distinct from the
    /// profile-based investment readiness score.
    pub readiness: u8,
    /// Exactly six entries, oldest month first, ending at the current month.
    pub monthly: Vec<MonthlyPoint>,
    /// Up to four slices, ranked by income share.
    pub categories: Vec<CategorySlice>,
}

impl KpiSnapshot {
    /// The fixed built-in snapshot used when neither live nor cached data
    /// exists: zeroed series ending at `now`, readiness pinned to the floor.
    pub fn default_at(now: DateTime<Utc>) -> Self {
        let monthly = (0..SERIES_MONTHS)
            .rev()
            .map(|back| MonthlyPoint {
                label: month_label(months_back(now.year(), now.month(), back as i32)),
                revenue: 0.0,
                customers: 0,
                transactions: 0,
            })
            .collect();

        KpiSnapshot {
            revenue: 0.0,
            growth: 0,
            customers: 0,
            readiness: 40,
            monthly,
            categories: Vec::new(),
        }
    }
}

/// Aggregates the transaction log into a KPI snapshot relative to `now`.
///
/// Returns `None` for an empty log: the caller substitutes the cached or
/// default snapshot rather than presenting zeroed figures as real data.
pub fn aggregate(transactions: &[Transaction], now: DateTime<Utc>) -> Option<KpiSnapshot> {
    if transactions.is_empty() {
        debug!("No transactions available; nothing to aggregate");
        return None;
    }

    let current = (now.year(), now.month());
    let previous = months_back(now.year(), now.month(), 1);

    let revenue = month_income(transactions, current);
    let previous_revenue = month_income(transactions, previous);

    // Division-by-zero guard: a month with no income baselines growth at 0.
    let growth = if previous_revenue > 0.0 {
        (100.0 * (revenue - previous_revenue) / previous_revenue).round() as i64
    } else {
        0
    };

    let monthly = (0..SERIES_MONTHS)
        .rev()
        .map(|back| monthly_point(transactions, months_back(now.year(), now.month(), back as i32)))
        .collect();

    let categories = category_breakdown(transactions);
    let readiness = data_readiness(transactions.len(), categories_in(transactions));

    Some(KpiSnapshot {
        revenue,
        growth,
        customers: customer_count(transactions),
        readiness,
        monthly,
        categories,
    })
}

/// Distinct customers across the whole log, or the labeled revenue-based
/// estimate when no transaction carries a customer identifier.
fn customer_count(transactions: &[Transaction]) -> u32 {
    let ids: HashSet<&str> = transactions
        .iter()
        .filter_map(|t| t.customer_id.as_deref())
        .collect();
    if !ids.is_empty() {
        return ids.len() as u32;
    }

    let total_income: f64 = transactions
        .iter()
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .sum();
    debug!("No customer identifiers in log; estimating from revenue");
    (total_income / REVENUE_PER_CUSTOMER).floor() as u32
}

fn monthly_point(transactions: &[Transaction], month: (i32, u32)) -> MonthlyPoint {
    let in_month: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| (t.timestamp.year(), t.timestamp.month()) == month)
        .collect();

    let revenue: f64 = in_month
        .iter()
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .sum();

    let ids: HashSet<&str> = in_month
        .iter()
        .filter_map(|t| t.customer_id.as_deref())
        .collect();
    let customers = if !ids.is_empty() {
        ids.len() as u32
    } else {
        (revenue / REVENUE_PER_CUSTOMER).floor() as u32
    };

    MonthlyPoint {
        label: month_label(month),
        revenue,
        customers,
        transactions: in_month.len() as u32,
    }
}

/// Top four categories by income share, colored in rank order.
fn category_breakdown(transactions: &[Transaction]) -> Vec<CategorySlice> {
    let ranked = income_by_category(transactions);
    let total: f64 = ranked.iter().map(|(_, amount)| amount).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    ranked
        .into_iter()
        .take(CATEGORY_PALETTE.len())
        .enumerate()
        .map(|(rank, (category, amount))| CategorySlice {
            category,
            percentage: ((amount / total) * 100.0).round() as u32,
            color: CATEGORY_PALETTE[rank].to_string(),
        })
        .collect()
}

fn categories_in(transactions: &[Transaction]) -> usize {
    transactions
        .iter()
        .map(|t| t.category.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Coarse data-richness heuristic: more transactions and more categories
/// mean the derived figures are better supported.
fn data_readiness(transaction_count: usize, category_count: usize) -> u8 {
    let raw = 50 + 2 * transaction_count as i64 + 5 * category_count as i64;
    raw.clamp(40, 90) as u8
}

fn month_income(transactions: &[Transaction], month: (i32, u32)) -> f64 {
    transactions
        .iter()
        .filter(|t| t.is_income() && (t.timestamp.year(), t.timestamp.month()) == month)
        .map(|t| t.amount)
        .sum()
}

/// Steps `back` calendar months before (`year`, `month`).
fn months_back(year: i32, month: u32, back: i32) -> (i32, u32) {
    let total = year * 12 + month as i32 - 1 - back;
    (total.div_euclid(12), (total.rem_euclid(12) + 1) as u32)
}

fn month_label(month: (i32, u32)) -> String {
    // Day 1 always exists for a valid month.
    NaiveDate::from_ymd_opt(month.0, month.1, 1)
        .map(|d| d.format("%b").to_string())
        .unwrap_or_default()
}
