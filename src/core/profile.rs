//! Business profile record and the source trait that provides it.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use tracing::warn;

/// Employee head-count band reported on the profile form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EmployeeBand {
    #[serde(rename = "1-5")]
    OneToFive,
    #[serde(rename = "6-20")]
    SixToTwenty,
    #[serde(rename = "21-50")]
    TwentyOneToFifty,
    #[serde(rename = "50+")]
    FiftyPlus,
}

impl EmployeeBand {
    /// Business-health contribution for this band. Absent or unknown bands
    /// contribute 0.
    pub fn health_points(self) -> f64 {
        match self {
            EmployeeBand::OneToFive => 10.0,
            EmployeeBand::SixToTwenty => 20.0,
            EmployeeBand::TwentyOneToFifty => 25.0,
            EmployeeBand::FiftyPlus => 30.0,
        }
    }
}

impl Display for EmployeeBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                EmployeeBand::OneToFive => "1-5",
                EmployeeBand::SixToTwenty => "6-20",
                EmployeeBand::TwentyOneToFifty => "21-50",
                EmployeeBand::FiftyPlus => "50+",
            }
        )
    }
}

impl FromStr for EmployeeBand {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1-5" => Ok(EmployeeBand::OneToFive),
            "6-20" => Ok(EmployeeBand::SixToTwenty),
            "21-50" => Ok(EmployeeBand::TwentyOneToFifty),
            "50+" => Ok(EmployeeBand::FiftyPlus),
            _ => Err(anyhow::anyhow!("Unknown employee band: {}", s)),
        }
    }
}

/// Monthly revenue band reported on the profile form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RevenueBand {
    #[serde(rename = "0-5k")]
    UpToFiveK,
    #[serde(rename = "5k-20k")]
    FiveToTwentyK,
    #[serde(rename = "20k-50k")]
    TwentyToFiftyK,
    #[serde(rename = "50k-100k")]
    FiftyToHundredK,
    #[serde(rename = "100k+")]
    OverHundredK,
}

impl RevenueBand {
    pub fn health_points(self) -> f64 {
        match self {
            RevenueBand::UpToFiveK => 10.0,
            RevenueBand::FiveToTwentyK => 20.0,
            RevenueBand::TwentyToFiftyK => 30.0,
            RevenueBand::FiftyToHundredK => 40.0,
            RevenueBand::OverHundredK => 45.0,
        }
    }
}

impl Display for RevenueBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RevenueBand::UpToFiveK => "0-5k",
                RevenueBand::FiveToTwentyK => "5k-20k",
                RevenueBand::TwentyToFiftyK => "20k-50k",
                RevenueBand::FiftyToHundredK => "50k-100k",
                RevenueBand::OverHundredK => "100k+",
            }
        )
    }
}

impl FromStr for RevenueBand {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0-5k" => Ok(RevenueBand::UpToFiveK),
            "5k-20k" => Ok(RevenueBand::FiveToTwentyK),
            "20k-50k" => Ok(RevenueBand::TwentyToFiftyK),
            "50k-100k" => Ok(RevenueBand::FiftyToHundredK),
            "100k+" => Ok(RevenueBand::OverHundredK),
            _ => Err(anyhow::anyhow!("Unknown revenue band: {}", s)),
        }
    }
}

/// Deserializes a band leniently: unrecognized values score as absent rather
/// than failing the whole profile.
fn lenient_band<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| match s.parse() {
        Ok(band) => Some(band),
        Err(_) => {
            warn!("Ignoring unrecognized band value: {s:?}");
            None
        }
    }))
}

/// The business profile as filled in by the user. Every field is optional;
/// scoring treats empty strings the same as missing values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub business_name: Option<String>,
    pub business_type: Option<String>,
    pub location: Option<String>,
    pub region: Option<String>,
    pub description: Option<String>,
    pub year_established: Option<i32>,
    #[serde(default, deserialize_with = "lenient_band")]
    pub employee_band: Option<EmployeeBand>,
    #[serde(default, deserialize_with = "lenient_band")]
    pub revenue_band: Option<RevenueBand>,
    pub funding_needed: Option<f64>,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub phone_verified: bool,
    #[serde(default)]
    pub business_verified: bool,
}

impl BusinessProfile {
    /// True when no field carries usable data. An all-empty profile is
    /// treated as absent and never scored.
    pub fn is_empty(&self) -> bool {
        !present(&self.business_name)
            && !present(&self.business_type)
            && !present(&self.location)
            && !present(&self.region)
            && !present(&self.description)
            && self.year_established.is_none()
            && self.employee_band.is_none()
            && self.revenue_band.is_none()
            && self.funding_needed.is_none()
            && !self.email_verified
            && !self.phone_verified
            && !self.business_verified
    }
}

/// A string field counts as present only when non-empty after trimming.
pub(crate) fn present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.trim().is_empty())
}

#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Returns the profile record, or `None` when nothing has been filled in.
    async fn load(&self) -> Result<Option<BusinessProfile>>;
}
