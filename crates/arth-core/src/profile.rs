//! User financial profile
//!
//! Wire-compatible with the stored onboarding record, so serde renames
//! preserve the record's field names exactly, including the historic
//! misspellings `employement-status` and `prefered-mode`. All currency
//! amounts are whole INR (non-negative integers).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One user's financial profile.
///
/// The record is immutable for the lifetime of the process: handlers receive
/// it through shared state and only ever read it. `email`, `_id`, and the
/// progress/onboarding blocks are optional on inbound payloads; the insight
/// pipeline only requires the identity, goal, financials, and investments
/// fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,

    /// Age as stored: a string-typed numeral ("21").
    #[serde(rename = "Age")]
    pub age: String,

    #[serde(
        rename = "employement-status",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub employment_status: String,

    #[serde(rename = "Goal")]
    pub goal: Goal,

    pub financials: Financials,

    pub investments: Investments,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<Progress>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onboarding: Option<Onboarding>,
}

/// Opaque record identifier in the stored export format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordId {
    #[serde(rename = "$oid")]
    pub oid: String,
}

/// The user's savings goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Goal description, e.g. "Luxury Car".
    pub goal: String,
    /// Target amount in whole INR.
    #[serde(rename = "target-amt")]
    pub target_amount: u64,
    /// Target horizon in months.
    #[serde(rename = "target-time")]
    pub target_months: u32,
}

/// Monthly cash-flow figures, all in whole INR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Financials {
    #[serde(rename = "monthly-income")]
    pub monthly_income: u64,
    #[serde(rename = "monthly-expenses")]
    pub monthly_expenses: u64,
    pub debt: u64,
    #[serde(rename = "em-fund-opted")]
    pub emergency_fund_opted: bool,
}

/// Investment preferences and current holdings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investments {
    #[serde(rename = "risk-opt")]
    pub risk_profile: RiskProfile,
    #[serde(rename = "prefered-mode", default)]
    pub preferred_mode: Option<ContributionMode>,
    /// Amount already invested, in whole INR.
    #[serde(rename = "invest-amt")]
    pub invested_amount: u64,
}

/// Progress against the goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// Months elapsed since the plan started.
    pub tenure: u32,
    pub start_date: String,
    #[serde(rename = "auto-adjust")]
    pub auto_adjust: bool,
}

/// Onboarding state for the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Onboarding {
    pub status: String,
    pub current_step: Option<String>,
    pub last_updated: String,
}

/// Risk appetite declared during onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskProfile {
    Low,
    Medium,
    High,
}

impl RiskProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskProfile::Low => "Low",
            RiskProfile::Medium => "Medium",
            RiskProfile::High => "High",
        }
    }
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RiskProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(RiskProfile::Low),
            "Medium" => Ok(RiskProfile::Medium),
            "High" => Ok(RiskProfile::High),
            _ => Err(format!("Unknown risk profile: {}", s)),
        }
    }
}

/// Preferred contribution mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContributionMode {
    Lumpsum,
    #[serde(rename = "SIP")]
    Sip,
}

impl ContributionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContributionMode::Lumpsum => "Lumpsum",
            ContributionMode::Sip => "SIP",
        }
    }
}

impl fmt::Display for ContributionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Profile {
    /// The bundled sample profile.
    ///
    /// Pure constructor: returns an identical value on every call. The
    /// server builds it once at startup and passes it to handlers through
    /// shared state.
    pub fn sample() -> Self {
        Profile {
            id: Some(RecordId {
                oid: "6998a8cfcf1b460b34615c33".to_string(),
            }),
            name: "Aditya Sharma".to_string(),
            email: "aditya@example.com".to_string(),
            age: "21".to_string(),
            employment_status: "Salaried".to_string(),
            goal: Goal {
                goal: "Luxury Car".to_string(),
                target_amount: 2_100_000,
                target_months: 24,
            },
            financials: Financials {
                monthly_income: 150_000,
                monthly_expenses: 45_000,
                debt: 12_000,
                emergency_fund_opted: true,
            },
            investments: Investments {
                risk_profile: RiskProfile::Medium,
                preferred_mode: Some(ContributionMode::Lumpsum),
                invested_amount: 500_000,
            },
            progress: Some(Progress {
                tenure: 1,
                start_date: "2024-02-20".to_string(),
                auto_adjust: false,
            }),
            onboarding: Some(Onboarding {
                status: "completed".to_string(),
                current_step: None,
                last_updated: "2024-02-20T18:33:53.678600".to_string(),
            }),
        }
    }
}
