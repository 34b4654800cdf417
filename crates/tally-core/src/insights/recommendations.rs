//! Rule-based recommendations and savings plans

use crate::config::InsightConfig;
use crate::error::{ensure_finite_value, Result};
use crate::models::{BudgetEfficiency, CashFlowAnalysis, EfficiencyRating, FinancialRatios};

use super::types::{Priority, Recommendation, RecommendationCategory, SavingsPlan, SavingsTiers};

/// Analysis results recommendations are drawn from
#[derive(Debug, Clone, Copy)]
pub struct RecommendationInput<'a> {
    pub ratios: &'a FinancialRatios,
    pub budget: Option<&'a BudgetEfficiency>,
    pub cash_flow: Option<&'a CashFlowAnalysis>,
}

impl<'a> RecommendationInput<'a> {
    pub fn new(ratios: &'a FinancialRatios) -> Self {
        Self {
            ratios,
            budget: None,
            cash_flow: None,
        }
    }

    pub fn with_budget(mut self, budget: &'a BudgetEfficiency) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn with_cash_flow(mut self, cash_flow: &'a CashFlowAnalysis) -> Self {
        self.cash_flow = Some(cash_flow);
        self
    }
}

/// Prioritized recommendations, high priority first
pub fn generate_recommendations(
    input: &RecommendationInput<'_>,
    config: &InsightConfig,
) -> Vec<Recommendation> {
    let ratios = input.ratios;
    let mut recs = Vec::new();

    if ratios.savings_rate < config.low_savings_rate {
        recs.push(
            Recommendation::new(
                RecommendationCategory::Savings,
                Priority::High,
                "Increase Your Savings Rate",
                format!(
                    "You are saving {:.1}% of your income; aim for at least {:.0}%",
                    ratios.savings_rate, config.low_savings_rate
                ),
            )
            .with_action("Set up an automatic transfer to savings on payday")
            .with_action("Review subscriptions and recurring charges"),
        );
    }

    if ratios.expense_ratio > config.high_expense_ratio {
        recs.push(
            Recommendation::new(
                RecommendationCategory::Spending,
                Priority::High,
                "Reduce Expenses",
                format!(
                    "Expenses take {:.1}% of your income",
                    ratios.expense_ratio
                ),
            )
            .with_action("Identify your three largest discretionary categories")
            .with_action("Set a monthly limit for each of them"),
        );
    }

    if ratios.debt_to_income_ratio > config.high_debt_ratio {
        recs.push(
            Recommendation::new(
                RecommendationCategory::Debt,
                Priority::High,
                "Pay Down Debt",
                format!(
                    "Debt is {:.1}% of your income, above the {:.0}% comfort level",
                    ratios.debt_to_income_ratio, config.high_debt_ratio
                ),
            )
            .with_action("Pay off the highest-interest balance first")
            .with_action("Avoid taking on new debt until the ratio improves"),
        );
    }

    if ratios.emergency_fund_months < config.emergency_fund_target_months {
        recs.push(
            Recommendation::new(
                RecommendationCategory::EmergencyFund,
                Priority::Medium,
                "Build an Emergency Fund",
                format!(
                    "Savings cover {:.1} months of expenses; the target is {:.0}",
                    ratios.emergency_fund_months, config.emergency_fund_target_months
                ),
            )
            .with_action("Keep emergency savings in a separate account"),
        );
    }

    if let Some(budget) = input.budget {
        if budget.over_budget_categories > 0 {
            recs.push(
                Recommendation::new(
                    RecommendationCategory::Budget,
                    Priority::Medium,
                    "Rein In Over-Budget Categories",
                    format!(
                        "{} budget categor{} went over their limit",
                        budget.over_budget_categories,
                        if budget.over_budget_categories == 1 { "y" } else { "ies" }
                    ),
                )
                .with_action("Revisit the limits or the spending in those categories"),
            );
        }

        if matches!(
            budget.efficiency_rating,
            EfficiencyRating::Fair | EfficiencyRating::NeedsImprovement
        ) {
            recs.push(
                Recommendation::new(
                    RecommendationCategory::Budget,
                    Priority::Medium,
                    "Tighten Your Budget",
                    format!(
                        "Budget efficiency is rated {}",
                        budget.efficiency_rating.as_str()
                    ),
                )
                .with_action("Base next month's budget on actual spending"),
            );
        }
    }

    if let Some(cash_flow) = input.cash_flow {
        if cash_flow.negative_periods > cash_flow.positive_periods {
            recs.push(
                Recommendation::new(
                    RecommendationCategory::CashFlow,
                    Priority::High,
                    "Fix Negative Cash Flow",
                    format!(
                        "{} of {} periods ended with more going out than coming in",
                        cash_flow.negative_periods,
                        cash_flow.periods.len()
                    ),
                )
                .with_action("Match large bills to the periods when income arrives"),
            );
        }
    }

    let has_high = recs.iter().any(|r| r.priority == Priority::High);
    if ratios.financial_health >= config.healthy_score && !has_high {
        recs.push(
            Recommendation::new(
                RecommendationCategory::Investment,
                Priority::Low,
                "Invest Your Surplus",
                format!(
                    "A health score of {} leaves room to grow your money",
                    ratios.financial_health
                ),
            )
            .with_action("Consider increasing retirement contributions"),
        );
    }

    // Stable: equal priorities keep rule order
    recs.sort_by_key(|r| r.priority.rank());
    recs
}

/// Monthly savings plan for an income/expense pair and a savings goal
pub fn savings_plan(
    income: f64,
    expenses: f64,
    savings_goal: f64,
    config: &InsightConfig,
) -> Result<SavingsPlan> {
    ensure_finite_value(income, "income")?;
    ensure_finite_value(expenses, "expenses")?;
    ensure_finite_value(savings_goal, "savings goal")?;

    let surplus = income - expenses;
    if surplus <= 0.0 {
        return Ok(SavingsPlan::Deficit {
            shortfall: -surplus,
            message: "Monthly expenses meet or exceed income".to_string(),
            suggestion: "Consider reducing discretionary expenses or increasing income"
                .to_string(),
        });
    }

    let current_savings_rate = if income > 0.0 {
        surplus / income * 100.0
    } else {
        0.0
    };

    Ok(SavingsPlan::Surplus {
        monthly_surplus: surplus,
        current_savings_rate,
        tiers: SavingsTiers {
            conservative: income * config.conservative_savings_percent / 100.0,
            standard: income * config.standard_savings_percent / 100.0,
            aggressive: income * config.aggressive_savings_percent / 100.0,
        },
        months_to_goal: if savings_goal > 0.0 {
            Some(savings_goal / surplus)
        } else {
            None
        },
    })
}
