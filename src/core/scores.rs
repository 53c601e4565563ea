//! Profile scoring: completeness, business health, and investment readiness.
//!
//! All scores are pure functions of the profile record and a reference
//! instant, clamped to the 0-100 range.

use crate::core::profile::{BusinessProfile, present};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Three-level growth category derived from investment readiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthPotential {
    High,
    Medium,
    Low,
}

impl GrowthPotential {
    fn from_readiness(readiness: u8) -> Self {
        if readiness >= 75 {
            GrowthPotential::High
        } else if readiness >= 50 {
            GrowthPotential::Medium
        } else {
            GrowthPotential::Low
        }
    }
}

impl std::fmt::Display for GrowthPotential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                GrowthPotential::High => "High",
                GrowthPotential::Medium => "Medium",
                GrowthPotential::Low => "Low",
            }
        )
    }
}

/// Scores derived from the business profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileScores {
    pub completeness: u8,
    pub business_health: u8,
    pub investment_readiness: u8,
    pub growth_potential: GrowthPotential,
}

impl Default for ProfileScores {
    fn default() -> Self {
        ProfileScores {
            completeness: 0,
            business_health: 0,
            investment_readiness: 0,
            growth_potential: GrowthPotential::Low,
        }
    }
}

/// Computes all profile scores. Callers must not invoke this for an absent
/// profile; `BusinessProfile::is_empty` gates that upstream.
pub fn score_profile(profile: &BusinessProfile, now: DateTime<Utc>) -> ProfileScores {
    let completeness = completeness(profile);
    let business_health = business_health(profile, now);

    let description_len = profile
        .description
        .as_deref()
        .map_or(0, |d| d.trim().len());
    let description_bonus = (description_len as f64 / 10.0).min(100.0);
    let investment_readiness = clamp_score(
        0.4 * completeness as f64 + 0.4 * business_health as f64 + 0.2 * description_bonus,
    );

    ProfileScores {
        completeness,
        business_health,
        investment_readiness,
        growth_potential: GrowthPotential::from_readiness(investment_readiness),
    }
}

/// Weighted completeness: 60 points across the five required fields, 30
/// across the four enhancement fields, plus fixed verification awards
/// (email +3, phone +4, business +3).
fn completeness(profile: &BusinessProfile) -> u8 {
    let required = [
        present(&profile.business_name),
        present(&profile.business_type),
        present(&profile.location),
        present(&profile.region),
        present(&profile.description),
    ];
    let enhancement = [
        profile.year_established.is_some(),
        profile.employee_band.is_some(),
        profile.revenue_band.is_some(),
        profile.funding_needed.is_some(),
    ];

    let required_filled = required.iter().filter(|p| **p).count() as f64;
    let enhancement_filled = enhancement.iter().filter(|p| **p).count() as f64;

    let mut score = 60.0 * required_filled / required.len() as f64
        + 30.0 * enhancement_filled / enhancement.len() as f64;
    if profile.email_verified {
        score += 3.0;
    }
    if profile.phone_verified {
        score += 4.0;
    }
    if profile.business_verified {
        score += 3.0;
    }

    clamp_score(score)
}

/// Business health: up to 25 points for age (5 per full year), plus the
/// fixed band tables for employees and monthly revenue.
fn business_health(profile: &BusinessProfile, now: DateTime<Utc>) -> u8 {
    let age_points = profile
        .year_established
        .map_or(0.0, |year| (5.0 * (now.year() - year).max(0) as f64).min(25.0));
    let employee_points = profile.employee_band.map_or(0.0, |b| b.health_points());
    let revenue_points = profile.revenue_band.map_or(0.0, |b| b.health_points());

    clamp_score(age_points + employee_points + revenue_points)
}

fn clamp_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::{EmployeeBand, RevenueBand};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 15, 9, 0, 0).unwrap()
    }

    fn full_profile() -> BusinessProfile {
        BusinessProfile {
            business_name: Some("Acme".to_string()),
            business_type: Some("Retail".to_string()),
            location: Some("Accra".to_string()),
            region: Some("Greater Accra".to_string()),
            description: Some("x".repeat(1000)),
            year_established: Some(2018),
            employee_band: Some(EmployeeBand::SixToTwenty),
            revenue_band: Some(RevenueBand::TwentyToFiftyK),
            funding_needed: Some(25_000.0),
            email_verified: true,
            phone_verified: true,
            business_verified: true,
        }
    }

    #[test]
    fn test_empty_profile_scores_zero() {
        let scores = score_profile(&BusinessProfile::default(), now());
        assert_eq!(scores.completeness, 0);
        assert_eq!(scores.business_health, 0);
        assert_eq!(scores.investment_readiness, 0);
        assert_eq!(scores.growth_potential, GrowthPotential::Low);
    }

    #[test]
    fn test_full_profile_is_complete() {
        let scores = score_profile(&full_profile(), now());
        assert_eq!(scores.completeness, 100);
    }

    #[test]
    fn test_partial_profile_completeness() {
        // Required fields filled, one verification flag, no enhancements:
        // round(60*5/5 + 30*0/4 + 3) = 63.
        let profile = BusinessProfile {
            business_name: Some("Acme".to_string()),
            business_type: Some("Retail".to_string()),
            location: Some("Accra".to_string()),
            region: Some("Greater Accra".to_string()),
            description: Some("x".repeat(50)),
            email_verified: true,
            ..Default::default()
        };
        let scores = score_profile(&profile, now());
        assert_eq!(scores.completeness, 63);
    }

    #[test]
    fn test_business_health_band_tables() {
        let profile = BusinessProfile {
            year_established: Some(2024), // 2 full years -> 10 points
            employee_band: Some(EmployeeBand::TwentyOneToFifty), // 25
            revenue_band: Some(RevenueBand::OverHundredK), // 45
            ..Default::default()
        };
        let scores = score_profile(&profile, now());
        assert_eq!(scores.business_health, 80);
    }

    #[test]
    fn test_business_age_caps_at_25_points() {
        let profile = BusinessProfile {
            year_established: Some(1990),
            ..Default::default()
        };
        let scores = score_profile(&profile, now());
        assert_eq!(scores.business_health, 25);
    }

    #[test]
    fn test_future_year_established_scores_zero_age() {
        let profile = BusinessProfile {
            year_established: Some(2030),
            ..Default::default()
        };
        let scores = score_profile(&profile, now());
        assert_eq!(scores.business_health, 0);
    }

    #[test]
    fn test_readiness_blends_scores_and_description() {
        let scores = score_profile(&full_profile(), now());
        // completeness 100, health 25+20+30 = 75, description bonus capped at 100:
        // round(0.4*100 + 0.4*75 + 0.2*100) = 90.
        assert_eq!(scores.investment_readiness, 90);
        assert_eq!(scores.growth_potential, GrowthPotential::High);
    }

    #[test]
    fn test_growth_potential_thresholds() {
        assert_eq!(GrowthPotential::from_readiness(75), GrowthPotential::High);
        assert_eq!(GrowthPotential::from_readiness(74), GrowthPotential::Medium);
        assert_eq!(GrowthPotential::from_readiness(50), GrowthPotential::Medium);
        assert_eq!(GrowthPotential::from_readiness(49), GrowthPotential::Low);
    }
}
