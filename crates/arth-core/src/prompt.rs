//! Prompt rendering for insight generation
//!
//! The prompt embeds the profile's numeric and categorical fields verbatim
//! and carries fixed instructions: exactly 6 insight objects covering goal
//! SIP sizing, tax saving, emergency-fund adequacy, debt-to-income ratio,
//! and risk-appropriate asset allocation.

use crate::profile::Profile;

/// Render the analysis prompt for a profile.
pub fn render_insight_prompt(profile: &Profile) -> String {
    format!(
        "Analyze the following financial data for a user in India.\n\
         All values are in Indian Rupees (INR).\n\
         User: {name}, Age: {age}\n\
         Monthly Income: {income}\n\
         Monthly Expenses: {expenses}\n\
         Monthly Debt: {debt}\n\
         Emergency Fund Opted: {em_fund}\n\
         Goal: {goal} (Target: {target_amt} in {target_time} months)\n\
         Current Investment: {invested}\n\
         Risk Profile: {risk}\n\
         \n\
         Provide 6 professional financial insights and actionable suggestions.\n\
         Return the response as a JSON array of objects with keys: 'title', \
         'description', 'type' (positive, warning, info, suggestion), 'category' \
         (Goal, Tax, Savings, Investment, Debt), and 'impact' (High, Medium, Low).\n\
         Include specific advice on:\n\
         1. Monthly SIP needed for the goal.\n\
         2. Tax saving (80C/80D).\n\
         3. Emergency fund status.\n\
         4. Debt-to-income ratio.\n\
         5. Asset allocation for a {risk} risk profile.",
        name = profile.name,
        age = profile.age,
        income = profile.financials.monthly_income,
        expenses = profile.financials.monthly_expenses,
        debt = profile.financials.debt,
        em_fund = profile.financials.emergency_fund_opted,
        goal = profile.goal.goal,
        target_amt = profile.goal.target_amount,
        target_time = profile.goal.target_months,
        invested = profile.investments.invested_amount,
        risk = profile.investments.risk_profile,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_profile_fields_verbatim() {
        let prompt = render_insight_prompt(&Profile::sample());

        assert!(prompt.contains("User: Aditya Sharma, Age: 21"));
        assert!(prompt.contains("Monthly Income: 150000"));
        assert!(prompt.contains("Monthly Expenses: 45000"));
        assert!(prompt.contains("Monthly Debt: 12000"));
        assert!(prompt.contains("Emergency Fund Opted: true"));
        assert!(prompt.contains("Goal: Luxury Car (Target: 2100000 in 24 months)"));
        assert!(prompt.contains("Current Investment: 500000"));
        assert!(prompt.contains("Risk Profile: Medium"));
    }

    #[test]
    fn carries_fixed_instructions() {
        let prompt = render_insight_prompt(&Profile::sample());

        assert!(prompt.contains("Provide 6 professional financial insights"));
        assert!(prompt.contains("JSON array"));
        assert!(prompt.contains("Monthly SIP needed for the goal"));
        assert!(prompt.contains("Tax saving (80C/80D)"));
        assert!(prompt.contains("Emergency fund status"));
        assert!(prompt.contains("Debt-to-income ratio"));
        assert!(prompt.contains("Asset allocation for a Medium risk profile"));
    }
}
