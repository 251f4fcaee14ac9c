//! Mock backend for testing
//!
//! Returns deterministic insight cards derived from the profile, or a
//! configurable failure for exercising the fallback path. Useful for unit
//! tests and development without a Gemini credential.

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::insight::{Impact, Insight, InsightCategory, InsightType};
use crate::profile::Profile;

use super::AiBackend;

/// Mock AI backend for testing
#[derive(Clone)]
pub struct MockBackend {
    /// Whether health_check should return true
    pub healthy: bool,
    /// When set, every generation call fails with this message
    failure: Option<String>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Create a new mock backend (healthy, generation succeeds)
    pub fn new() -> Self {
        Self {
            healthy: true,
            failure: None,
        }
    }

    /// Create a mock whose generation calls always fail
    pub fn failing(message: &str) -> Self {
        Self {
            healthy: false,
            failure: Some(message.to_string()),
        }
    }
}

#[async_trait]
impl AiBackend for MockBackend {
    async fn generate_insights(&self, profile: &Profile) -> Result<Vec<Insight>> {
        if let Some(ref message) = self.failure {
            return Err(Error::Backend(message.clone()));
        }

        let f = &profile.financials;
        let monthly_sip = profile.goal.target_amount / u64::from(profile.goal.target_months.max(1));
        let em_fund_target = f.monthly_expenses * 6;
        let dti_percent = if f.monthly_income > 0 {
            f.debt * 100 / f.monthly_income
        } else {
            100
        };

        Ok(vec![
            Insight {
                title: "Goal SIP Requirement".to_string(),
                description: format!(
                    "Reaching ₹{} for '{}' in {} months needs roughly ₹{} per month before returns.",
                    profile.goal.target_amount,
                    profile.goal.goal,
                    profile.goal.target_months,
                    monthly_sip
                ),
                insight_type: InsightType::Info,
                category: InsightCategory::Goal,
                impact: Impact::High,
            },
            Insight {
                title: "Section 80C Headroom".to_string(),
                description: "Use ELSS or PPF to exhaust the ₹1.5L deduction limit under 80C."
                    .to_string(),
                insight_type: InsightType::Suggestion,
                category: InsightCategory::Tax,
                impact: Impact::Medium,
            },
            Insight {
                title: "Emergency Fund Target".to_string(),
                description: format!(
                    "Keep at least ₹{} (6 months of expenses) in a liquid fund.",
                    em_fund_target
                ),
                insight_type: if f.emergency_fund_opted {
                    InsightType::Positive
                } else {
                    InsightType::Warning
                },
                category: InsightCategory::Savings,
                impact: Impact::High,
            },
            Insight {
                title: "Debt-to-Income Ratio".to_string(),
                description: format!(
                    "Monthly debt of ₹{} is {}% of income.",
                    f.debt, dti_percent
                ),
                insight_type: if dti_percent <= 20 {
                    InsightType::Positive
                } else {
                    InsightType::Warning
                },
                category: InsightCategory::Debt,
                impact: Impact::Medium,
            },
            Insight {
                title: "Asset Allocation".to_string(),
                description: format!(
                    "A {} risk profile suits a balanced equity/debt split.",
                    profile.investments.risk_profile
                ),
                insight_type: InsightType::Suggestion,
                category: InsightCategory::Investment,
                impact: Impact::Medium,
            },
            Insight {
                title: "Savings Rate".to_string(),
                description: format!(
                    "You save ₹{} of ₹{} income each month.",
                    f.monthly_income.saturating_sub(f.monthly_expenses),
                    f.monthly_income
                ),
                insight_type: InsightType::Positive,
                category: InsightCategory::Savings,
                impact: Impact::Low,
            },
        ])
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn generates_six_schema_valid_cards() {
        let backend = MockBackend::new();
        let insights = backend
            .generate_insights(&Profile::sample())
            .await
            .unwrap();

        assert_eq!(insights.len(), 6);
        assert!(insights.iter().any(|i| i.category == InsightCategory::Tax));
        assert!(insights.iter().any(|i| i.category == InsightCategory::Debt));
    }

    #[tokio::test]
    async fn failing_mock_reports_service_error() {
        let backend = MockBackend::failing("boom");
        let err = backend
            .generate_insights(&Profile::sample())
            .await
            .unwrap_err();

        assert!(err.is_service_error());
        assert!(!backend.health_check().await);
    }
}
