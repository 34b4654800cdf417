//! Financial ratios, health score and budget efficiency

use tracing::debug;

use crate::config::{BudgetConfig, ScoreBand, ScoringConfig};
use crate::error::{ensure_finite_value, Error, Result};
use crate::models::{
    BudgetCategory, BudgetEfficiency, CashFlowAnalysis, EfficiencyRating, FinancialRatios,
};

/// Maximum health score
pub const MAX_HEALTH_SCORE: u8 = 100;

/// Key ratios for one period, all percentages except the fund months
///
/// With no income there is nothing to divide by, so the savings and debt
/// ratios read 0 and every unit of spending counts as 100% expense ratio.
pub fn calculate_financial_ratios(
    income: f64,
    expenses: f64,
    savings: f64,
    debt: f64,
    config: &ScoringConfig,
) -> Result<FinancialRatios> {
    let mut ratios = raw_ratios(income, expenses, savings, debt, config)?;
    ratios.financial_health = score_ratios(&ratios, config);

    debug!(
        savings_rate = ratios.savings_rate,
        expense_ratio = ratios.expense_ratio,
        health = ratios.financial_health,
        "Calculated financial ratios"
    );

    Ok(ratios)
}

/// Ratios for a cash-flow history, with income and expenses annualized
///
/// Each period's average is scaled to a year using the analysis granularity,
/// so the emergency fund reads as savings over average monthly expenses
/// whatever the bucket size. An empty history counts as no income and no
/// expenses.
pub fn ratios_from_cash_flow(
    analysis: &CashFlowAnalysis,
    savings: f64,
    debt: f64,
    config: &ScoringConfig,
) -> Result<FinancialRatios> {
    let periods = analysis.periods.len();
    let (annual_income, annual_expenses) = if periods == 0 {
        (0.0, 0.0)
    } else {
        let scale = analysis.granularity.periods_per_year() / periods as f64;
        (analysis.total_income * scale, analysis.total_expenses * scale)
    };

    calculate_financial_ratios(annual_income, annual_expenses, savings, debt, config)
}

/// Additive 0-100 score across savings, spending, debt and emergency fund
pub fn calculate_financial_health_score(
    income: f64,
    expenses: f64,
    savings: f64,
    debt: f64,
    config: &ScoringConfig,
) -> Result<u8> {
    let ratios = raw_ratios(income, expenses, savings, debt, config)?;
    Ok(score_ratios(&ratios, config))
}

fn raw_ratios(
    income: f64,
    expenses: f64,
    savings: f64,
    debt: f64,
    config: &ScoringConfig,
) -> Result<FinancialRatios> {
    ensure_finite_value(income, "income")?;
    ensure_finite_value(expenses, "expenses")?;
    ensure_finite_value(savings, "savings")?;
    ensure_finite_value(debt, "debt")?;

    let (savings_rate, expense_ratio, debt_to_income_ratio) = if income <= 0.0 {
        (0.0, 100.0, 0.0)
    } else {
        (
            savings / income * 100.0,
            expenses / income * 100.0,
            debt / income * 100.0,
        )
    };

    let emergency_fund_months = if expenses > 0.0 {
        savings / (expenses / 12.0)
    } else if savings > 0.0 {
        // Nothing to cover: report the best band's threshold
        config
            .emergency_fund_bands
            .iter()
            .map(|band| band.threshold)
            .fold(0.0, f64::max)
    } else {
        0.0
    };

    Ok(FinancialRatios {
        savings_rate,
        expense_ratio,
        debt_to_income_ratio,
        net_worth_growth: income - expenses,
        emergency_fund_months,
        financial_health: 0,
    })
}

fn score_ratios(ratios: &FinancialRatios, config: &ScoringConfig) -> u8 {
    let mut score = at_least(ratios.savings_rate, &config.savings_rate_bands)
        + at_most(ratios.expense_ratio, &config.expense_ratio_bands)
        + at_most(ratios.debt_to_income_ratio, &config.debt_ratio_bands);

    if ratios.emergency_fund_months > 0.0 {
        score += at_least(ratios.emergency_fund_months, &config.emergency_fund_bands);
    }

    score.min(MAX_HEALTH_SCORE as u32) as u8
}

/// Points from the first band whose threshold the value reaches
fn at_least(value: f64, bands: &[ScoreBand]) -> u32 {
    bands
        .iter()
        .find(|band| value >= band.threshold)
        .map(|band| band.points)
        .unwrap_or(0)
}

/// Points from the first band the value stays under
fn at_most(value: f64, bands: &[ScoreBand]) -> u32 {
    bands
        .iter()
        .find(|band| value <= band.threshold)
        .map(|band| band.points)
        .unwrap_or(0)
}

/// How closely actual spending followed the budget
pub fn calculate_budget_efficiency(
    categories: &[BudgetCategory],
    config: &BudgetConfig,
) -> Result<BudgetEfficiency> {
    for category in categories {
        for (value, what) in [(category.budgeted, "budgeted"), (category.spent, "spent")] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::validation(format!(
                    "Budget category '{}' has an invalid {} amount: {}",
                    category.category, what, value
                )));
            }
        }
    }

    let total_budgeted: f64 = categories.iter().map(|c| c.budgeted).sum();
    let total_spent: f64 = categories.iter().map(|c| c.spent).sum();

    let (utilization_rate, accuracy_score) = if total_budgeted <= 0.0 {
        (0.0, 0.0)
    } else {
        let utilization = total_spent / total_budgeted * 100.0;
        let deviation = (total_spent - total_budgeted).abs() / total_budgeted * 100.0;
        (utilization, (100.0 - deviation).max(0.0))
    };

    let over_budget_categories = categories.iter().filter(|c| c.spent > c.budgeted).count();
    let under_budget_categories = categories
        .iter()
        .filter(|c| c.spent < config.under_budget_ratio * c.budgeted)
        .count();

    // Overspending must not lift the rating, so utilization is capped
    let blended = config.utilization_weight * utilization_rate.min(100.0)
        + config.accuracy_weight * accuracy_score;
    let efficiency_rating = rate(blended, config);

    debug!(
        categories = categories.len(),
        utilization = utilization_rate,
        accuracy = accuracy_score,
        rating = efficiency_rating.as_str(),
        "Calculated budget efficiency"
    );

    Ok(BudgetEfficiency {
        utilization_rate,
        accuracy_score,
        over_budget_categories,
        under_budget_categories,
        efficiency_rating,
        total_budgeted,
        total_spent,
    })
}

fn rate(score: f64, config: &BudgetConfig) -> EfficiencyRating {
    if score >= config.excellent {
        EfficiencyRating::Excellent
    } else if score >= config.very_good {
        EfficiencyRating::VeryGood
    } else if score >= config.good {
        EfficiencyRating::Good
    } else if score >= config.fair {
        EfficiencyRating::Fair
    } else {
        EfficiencyRating::NeedsImprovement
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CashFlowPeriod, Granularity, TrendResult};

    fn scoring() -> ScoringConfig {
        ScoringConfig::default()
    }

    #[test]
    fn test_ratios_basic() {
        let ratios = calculate_financial_ratios(5000.0, 4000.0, 500.0, 0.0, &scoring()).unwrap();
        assert!((ratios.savings_rate - 10.0).abs() < 1e-9);
        assert!((ratios.expense_ratio - 80.0).abs() < 1e-9);
        assert_eq!(ratios.debt_to_income_ratio, 0.0);
        assert!((ratios.net_worth_growth - 1000.0).abs() < 1e-9);
        assert!((ratios.emergency_fund_months - 1.5).abs() < 1e-9);
        // 20 (savings) + 5 (expenses) + 25 (no debt) + 10 (1.5 months)
        assert_eq!(ratios.financial_health, 60);
    }

    #[test]
    fn test_ratios_without_income() {
        let ratios = calculate_financial_ratios(0.0, 1200.0, 0.0, 300.0, &scoring()).unwrap();
        assert_eq!(ratios.savings_rate, 0.0);
        assert_eq!(ratios.expense_ratio, 100.0);
        assert_eq!(ratios.debt_to_income_ratio, 0.0);
        assert_eq!(ratios.emergency_fund_months, 0.0);
    }

    #[test]
    fn test_no_expenses_counts_as_fully_funded() {
        let ratios = calculate_financial_ratios(4000.0, 0.0, 1000.0, 0.0, &scoring()).unwrap();
        assert_eq!(ratios.emergency_fund_months, 6.0);
        // 30 + 25 + 25 + 20
        assert_eq!(ratios.financial_health, 100);
    }

    fn cash_flow(granularity: Granularity, income: &[f64], expenses: &[f64]) -> CashFlowAnalysis {
        let periods: Vec<CashFlowPeriod> = income
            .iter()
            .zip(expenses)
            .enumerate()
            .map(|(i, (inc, exp))| CashFlowPeriod {
                period: format!("p{}", i),
                income: *inc,
                expenses: *exp,
                net_flow: inc - exp,
            })
            .collect();
        CashFlowAnalysis {
            granularity,
            total_income: income.iter().sum(),
            total_expenses: expenses.iter().sum(),
            positive_periods: 0,
            negative_periods: 0,
            average_net_flow: 0.0,
            trend: TrendResult::flat(),
            periods,
        }
    }

    #[test]
    fn test_cash_flow_ratios_use_monthly_expenses_for_fund() {
        let analysis = cash_flow(
            Granularity::Monthly,
            &[4000.0, 4000.0, 4000.0, 4000.0],
            &[1800.0, 1820.0, 1840.0, 1860.0],
        );
        let ratios = ratios_from_cash_flow(&analysis, 1000.0, 0.0, &scoring()).unwrap();

        assert!((ratios.emergency_fund_months - 1000.0 / 1830.0).abs() < 1e-9);
        assert!((ratios.expense_ratio - 45.75).abs() < 1e-9);
        // 1000 saved against 48000 a year
        assert!((ratios.savings_rate - 1000.0 / 48000.0 * 100.0).abs() < 1e-9);
        assert!(ratios.financial_health < 100);
    }

    #[test]
    fn test_cash_flow_ratios_scale_with_granularity() {
        let quarterly = cash_flow(Granularity::Quarterly, &[12000.0], &[6000.0]);
        let ratios = ratios_from_cash_flow(&quarterly, 4000.0, 0.0, &scoring()).unwrap();
        // 6000 a quarter is 2000 a month
        assert!((ratios.emergency_fund_months - 2.0).abs() < 1e-9);

        let empty = cash_flow(Granularity::Monthly, &[], &[]);
        let ratios = ratios_from_cash_flow(&empty, 0.0, 0.0, &scoring()).unwrap();
        assert_eq!(ratios.emergency_fund_months, 0.0);
        assert_eq!(ratios.savings_rate, 0.0);
    }

    #[test]
    fn test_health_score_worst_case() {
        let score =
            calculate_financial_health_score(1000.0, 2000.0, -500.0, 5000.0, &scoring()).unwrap();
        assert_eq!(score, 0);
    }

    #[test]
    fn test_health_score_bounded() {
        let inputs = [
            (0.0, 0.0, 0.0, 0.0),
            (1e9, 0.0, 1e9, 0.0),
            (100.0, 1e6, -1e6, 1e6),
            (5000.0, 3000.0, 20000.0, 1000.0),
        ];
        for (income, expenses, savings, debt) in inputs {
            let score =
                calculate_financial_health_score(income, expenses, savings, debt, &scoring())
                    .unwrap();
            assert!(score <= MAX_HEALTH_SCORE);
        }
    }

    #[test]
    fn test_health_score_clamped_with_generous_bands() {
        let mut config = scoring();
        config.savings_rate_bands = vec![ScoreBand::new(0.0, 90)];
        config.debt_ratio_bands = vec![ScoreBand::new(100.0, 90)];
        let score = calculate_financial_health_score(1000.0, 100.0, 500.0, 0.0, &config).unwrap();
        assert_eq!(score, 100);
    }

    #[test]
    fn test_ratios_reject_nan() {
        let result = calculate_financial_ratios(f64::NAN, 1.0, 1.0, 1.0, &scoring());
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_budget_exactly_on_target() {
        let categories = vec![
            BudgetCategory::new("Groceries", 400.0, 400.0),
            BudgetCategory::new("Dining", 200.0, 200.0),
        ];
        let eff = calculate_budget_efficiency(&categories, &BudgetConfig::default()).unwrap();
        assert!((eff.utilization_rate - 100.0).abs() < 1e-9);
        assert!((eff.accuracy_score - 100.0).abs() < 1e-9);
        assert_eq!(eff.over_budget_categories, 0);
        assert_eq!(eff.under_budget_categories, 0);
        assert_eq!(eff.efficiency_rating, EfficiencyRating::Excellent);
    }

    #[test]
    fn test_budget_over_and_under() {
        let categories = vec![
            BudgetCategory::new("Groceries", 400.0, 500.0),
            BudgetCategory::new("Dining", 200.0, 100.0),
            BudgetCategory::new("Transport", 100.0, 90.0),
        ];
        let eff = calculate_budget_efficiency(&categories, &BudgetConfig::default()).unwrap();
        assert_eq!(eff.over_budget_categories, 1);
        assert_eq!(eff.under_budget_categories, 1);
        assert!((eff.total_budgeted - 700.0).abs() < 1e-9);
        assert!((eff.total_spent - 690.0).abs() < 1e-9);
    }

    #[test]
    fn test_overspending_does_not_raise_rating() {
        let config = BudgetConfig::default();
        let on_target =
            calculate_budget_efficiency(&[BudgetCategory::new("All", 100.0, 100.0)], &config)
                .unwrap();
        let over =
            calculate_budget_efficiency(&[BudgetCategory::new("All", 100.0, 150.0)], &config)
                .unwrap();
        assert!((over.utilization_rate - 150.0).abs() < 1e-9);
        assert!((over.accuracy_score - 50.0).abs() < 1e-9);
        // 0.6 * 100 + 0.4 * 50 = 80
        assert_eq!(over.efficiency_rating, EfficiencyRating::VeryGood);
        assert_eq!(on_target.efficiency_rating, EfficiencyRating::Excellent);
    }

    #[test]
    fn test_budget_with_zero_total() {
        let eff = calculate_budget_efficiency(&[], &BudgetConfig::default()).unwrap();
        assert_eq!(eff.utilization_rate, 0.0);
        assert_eq!(eff.accuracy_score, 0.0);
        assert_eq!(eff.efficiency_rating, EfficiencyRating::NeedsImprovement);
    }

    #[test]
    fn test_budget_rejects_negative_amounts() {
        let result = calculate_budget_efficiency(
            &[BudgetCategory::new("Rent", -10.0, 5.0)],
            &BudgetConfig::default(),
        );
        assert!(matches!(result, Err(Error::Validation(_))));
    }
}
