//! Insight cards
//!
//! An insight is one advisory card shown on the dashboard. Cards are
//! produced per request, either by the AI backend or by the fixed fallback
//! set, and are never stored.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One financial insight card.
///
/// Anything returned to a caller conforms to this schema; AI output that
/// does not parse into it is replaced by [`fallback_insights`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub title: String,
    /// Free text; may embed currency figures ("₹2.7L").
    pub description: String,
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    pub category: InsightCategory,
    pub impact: Impact,
}

/// Tone of an insight card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightType {
    Positive,
    Warning,
    Info,
    Suggestion,
}

impl InsightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightType::Positive => "positive",
            InsightType::Warning => "warning",
            InsightType::Info => "info",
            InsightType::Suggestion => "suggestion",
        }
    }
}

impl fmt::Display for InsightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(InsightType::Positive),
            "warning" => Ok(InsightType::Warning),
            "info" => Ok(InsightType::Info),
            "suggestion" => Ok(InsightType::Suggestion),
            _ => Err(format!("Unknown insight type: {}", s)),
        }
    }
}

/// Topic area of an insight card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsightCategory {
    Goal,
    Tax,
    Savings,
    Investment,
    Debt,
}

impl InsightCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightCategory::Goal => "Goal",
            InsightCategory::Tax => "Tax",
            InsightCategory::Savings => "Savings",
            InsightCategory::Investment => "Investment",
            InsightCategory::Debt => "Debt",
        }
    }
}

impl fmt::Display for InsightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How much the advice matters for this user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::High => "High",
            Impact::Medium => "Medium",
            Impact::Low => "Low",
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The fixed insight set served when generation or parsing fails.
///
/// Pure function: no inputs, no failure mode, deterministic output. The
/// figures in the descriptions were computed offline for the bundled sample
/// profile (₹21L goal over 24 months, ₹45,000 monthly expenses).
pub fn fallback_insights() -> Vec<Insight> {
    vec![
        Insight {
            title: "Goal Feasibility".to_string(),
            description: "To reach ₹21L in 24 months, you need a monthly SIP of approx ₹75,000 \
                          assuming 12% CAGR."
                .to_string(),
            insight_type: InsightType::Info,
            category: InsightCategory::Goal,
            impact: Impact::High,
        },
        Insight {
            title: "Emergency Fund".to_string(),
            description: "Maintain at least ₹2.7L (6 months of expenses) in a liquid fund."
                .to_string(),
            insight_type: InsightType::Suggestion,
            category: InsightCategory::Savings,
            impact: Impact::High,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_deterministic_and_schema_valid() {
        let a = fallback_insights();
        let b = fallback_insights();
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);

        assert_eq!(a[0].title, "Goal Feasibility");
        assert_eq!(a[0].insight_type, InsightType::Info);
        assert_eq!(a[0].category, InsightCategory::Goal);
        assert_eq!(a[0].impact, Impact::High);

        assert_eq!(a[1].title, "Emergency Fund");
        assert_eq!(a[1].insight_type, InsightType::Suggestion);
        assert_eq!(a[1].category, InsightCategory::Savings);
        assert_eq!(a[1].impact, Impact::High);
    }

    #[test]
    fn wire_format_uses_expected_enum_spellings() {
        let json = serde_json::to_value(fallback_insights()).unwrap();

        assert_eq!(json[0]["type"], "info");
        assert_eq!(json[0]["category"], "Goal");
        assert_eq!(json[0]["impact"], "High");
        assert_eq!(json[1]["type"], "suggestion");
        assert_eq!(json[1]["category"], "Savings");
    }

    #[test]
    fn deserializes_model_shaped_card() {
        let json = serde_json::json!({
            "title": "Debt Check",
            "description": "Debt-to-income ratio is 8%, well within limits.",
            "type": "positive",
            "category": "Debt",
            "impact": "Low"
        });

        let insight: Insight = serde_json::from_value(json).unwrap();
        assert_eq!(insight.insight_type, InsightType::Positive);
        assert_eq!(insight.category, InsightCategory::Debt);
        assert_eq!(insight.impact, Impact::Low);
    }

    #[test]
    fn rejects_out_of_enum_values() {
        let json = serde_json::json!({
            "title": "Bad",
            "description": "Bad",
            "type": "neutral",
            "category": "Goal",
            "impact": "High"
        });
        assert!(serde_json::from_value::<Insight>(json).is_err());

        let json = serde_json::json!({
            "title": "Bad",
            "description": "Bad",
            "type": "info",
            "category": "Crypto",
            "impact": "High"
        });
        assert!(serde_json::from_value::<Insight>(json).is_err());
    }
}
