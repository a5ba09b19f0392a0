//! Arrear pro-ration for payroll corrections.
//!
//! Reversing leave-without-pay days pays back each affected component pro
//! rata: its full-period amount divided by the slip's working days, times
//! the days reversed.

use rust_decimal::Decimal;

use crate::config::{ArrearComponent, ComponentType};
use crate::error::{EngineError, EngineResult};
use crate::models::{ArrearDetail, AuditStep, SalaryDetail, SalarySlip};

use super::rounding::round_money;

/// The per-day amount of a component. Working days below one are treated as
/// one.
pub fn daily_amount(component_period_amount: Decimal, total_working_days: Decimal) -> Decimal {
    component_period_amount / total_working_days.max(Decimal::ONE)
}

/// Pro-rates an arrear for `days_to_reverse` days, rounded once at the end.
///
/// A product outside the decimal range yields
/// [`EngineError::AmountOverflow`].
///
/// # Examples
///
/// ```
/// use benefit_ledger::calculation::prorate_arrear;
/// use rust_decimal::Decimal;
///
/// // A slip reporting zero working days is treated as one working day.
/// let arrear = prorate_arrear(Decimal::new(2700, 0), Decimal::ZERO, Decimal::ONE, 2).unwrap();
/// assert_eq!(arrear, Decimal::new(2700, 0));
/// ```
pub fn prorate_arrear(
    component_period_amount: Decimal,
    total_working_days: Decimal,
    days_to_reverse: Decimal,
    precision: u32,
) -> EngineResult<Decimal> {
    daily_amount(component_period_amount, total_working_days)
        .checked_mul(days_to_reverse)
        .map(|amount| round_money(amount, precision))
        .ok_or(EngineError::AmountOverflow {
            context: "arrear amount",
        })
}

/// Checks the running total of reversed days against the slip's unpaid days.
///
/// `already_reversed` is the sum over submitted corrections of the same slip
/// and employee.
pub fn validate_reversible_days(
    requested: Decimal,
    already_reversed: Decimal,
    reversible: Decimal,
) -> EngineResult<()> {
    if requested <= Decimal::ZERO {
        return Err(EngineError::InvalidDaysToReverse { days: requested });
    }
    let total = already_reversed
        .checked_add(requested)
        .ok_or(EngineError::AmountOverflow {
            context: "reversed days",
        })?;
    if total > reversible {
        return Err(EngineError::ExceedsReversibleDays {
            requested,
            already_reversed,
            reversible,
        });
    }
    Ok(())
}

/// Arrear rows for one correction, grouped the way they are paid.
#[derive(Debug, Clone, Default)]
pub struct ArrearBreakup {
    /// Arrears paid as additional earnings.
    pub earning_arrears: Vec<ArrearDetail>,
    /// Arrears paid as additional deductions.
    pub deduction_arrears: Vec<ArrearDetail>,
    /// Arrears re-accrued to the benefit ledger.
    pub accrual_arrears: Vec<ArrearDetail>,
    /// One audit step per arrear row.
    pub audit_steps: Vec<AuditStep>,
}

/// Builds the arrear rows for reversing `days_to_reverse` days of a slip.
///
/// Each earning and deduction line receives a row for every enabled arrear
/// component of the same type mapped to it; lines without a mapping are
/// skipped. Each benefit accrual line receives an accrual arrear for the same
/// component.
pub fn build_arrear_breakup(
    slip: &SalarySlip,
    arrear_components: &[ArrearComponent],
    days_to_reverse: Decimal,
    precision: u32,
    step_number: u32,
) -> EngineResult<ArrearBreakup> {
    let mut breakup = ArrearBreakup::default();
    let mut step = step_number;

    for (lines, component_type) in [
        (&slip.earnings, ComponentType::Earning),
        (&slip.deductions, ComponentType::Deduction),
    ] {
        for line in lines {
            let mapped = arrear_components.iter().filter(|c| {
                !c.disabled
                    && c.component_type == component_type
                    && c.mapping_component == line.salary_component
            });
            for component in mapped {
                let (detail, audit_step) =
                    arrear_row(&component.name, line, slip, days_to_reverse, precision, step)?;
                step += 1;
                breakup.audit_steps.push(audit_step);
                match component_type {
                    ComponentType::Earning => breakup.earning_arrears.push(detail),
                    ComponentType::Deduction => breakup.deduction_arrears.push(detail),
                }
            }
        }
    }

    for accrual in &slip.benefit_accruals {
        let line = SalaryDetail {
            salary_component: accrual.salary_component.clone(),
            amount: accrual.amount,
        };
        let (detail, audit_step) = arrear_row(
            &accrual.salary_component,
            &line,
            slip,
            days_to_reverse,
            precision,
            step,
        )?;
        step += 1;
        breakup.audit_steps.push(audit_step);
        breakup.accrual_arrears.push(detail);
    }

    Ok(breakup)
}

fn arrear_row(
    arrear_component: &str,
    line: &SalaryDetail,
    slip: &SalarySlip,
    days_to_reverse: Decimal,
    precision: u32,
    step_number: u32,
) -> EngineResult<(ArrearDetail, AuditStep)> {
    let working_days = slip.total_working_days.max(Decimal::ONE);
    let amount = prorate_arrear(
        line.amount,
        slip.total_working_days,
        days_to_reverse,
        precision,
    )?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "arrear_proration".to_string(),
        rule_name: "Arrear Pro-Ration".to_string(),
        input: serde_json::json!({
            "salary_slip": slip.id,
            "mapping_component": line.salary_component,
            "period_amount": line.amount.normalize().to_string(),
            "total_working_days": slip.total_working_days.normalize().to_string(),
            "days_to_reverse": days_to_reverse.normalize().to_string(),
        }),
        output: serde_json::json!({
            "salary_component": arrear_component,
            "amount": amount.to_string(),
        }),
        reasoning: format!(
            "${} / {} working days x {} days = ${}",
            line.amount.normalize(),
            working_days.normalize(),
            days_to_reverse.normalize(),
            amount
        ),
    };

    Ok((
        ArrearDetail {
            salary_component: arrear_component.to_string(),
            amount,
        },
        audit_step,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BenefitAccrual;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn detail(component: &str, amount: &str) -> SalaryDetail {
        SalaryDetail {
            salary_component: component.to_string(),
            amount: dec(amount),
        }
    }

    fn arrear(name: &str, mapping: &str, component_type: ComponentType) -> ArrearComponent {
        ArrearComponent {
            name: name.to_string(),
            mapping_component: mapping.to_string(),
            component_type,
            disabled: false,
        }
    }

    fn create_slip(total_working_days: &str) -> SalarySlip {
        SalarySlip {
            id: "Sal Slip/EMP-0001/00001".to_string(),
            employee: "EMP-0001".to_string(),
            posting_date: NaiveDate::from_ymd_opt(2026, 4, 30).unwrap(),
            total_working_days: dec(total_working_days),
            absent_days: Decimal::ZERO,
            leave_without_pay: dec("1"),
            earnings: vec![detail("Basic Salary", "65000"), detail("HRA", "13000")],
            deductions: vec![detail("Professional Tax", "200")],
            benefit_accruals: vec![BenefitAccrual {
                salary_component: "Medical Allowance".to_string(),
                amount: dec("2000"),
                yearly_benefit: Some(dec("24000")),
            }],
        }
    }

    #[test]
    fn test_zero_working_days_floors_to_one() {
        assert_eq!(
            prorate_arrear(dec("2700"), Decimal::ZERO, dec("1"), 2).unwrap(),
            dec("2700")
        );
    }

    #[test]
    fn test_prorate_rounds_once() {
        // 65000 / 27 = 2407.4074...
        assert_eq!(
            prorate_arrear(dec("65000"), dec("27"), dec("1"), 2).unwrap(),
            dec("2407.41")
        );
        // 2000 / 27 * 2 = 148.148..., not 2 * 74.07
        assert_eq!(
            prorate_arrear(dec("2000"), dec("27"), dec("2"), 2).unwrap(),
            dec("148.15")
        );
    }

    #[test]
    fn test_half_day_reversal() {
        assert_eq!(
            prorate_arrear(dec("3000"), dec("30"), dec("0.5"), 2).unwrap(),
            dec("50")
        );
    }

    #[test]
    fn test_reversible_days_within_limit() {
        assert!(validate_reversible_days(dec("1"), dec("1"), dec("2")).is_ok());
    }

    #[test]
    fn test_reversible_days_over_limit() {
        let err = validate_reversible_days(dec("1"), dec("2"), dec("2")).unwrap_err();
        match err {
            EngineError::ExceedsReversibleDays {
                requested,
                already_reversed,
                reversible,
            } => {
                assert_eq!(requested, dec("1"));
                assert_eq!(already_reversed, dec("2"));
                assert_eq!(reversible, dec("2"));
            }
            other => panic!("expected ExceedsReversibleDays, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_days_to_reverse_is_invalid() {
        let err = validate_reversible_days(Decimal::ZERO, Decimal::ZERO, dec("2")).unwrap_err();
        assert!(matches!(err, EngineError::InvalidDaysToReverse { .. }));
    }

    #[test]
    fn test_breakup_maps_only_configured_components() {
        let slip = create_slip("27");
        let components = vec![
            arrear("Arrear Basic", "Basic Salary", ComponentType::Earning),
            arrear("Arrear PT", "Professional Tax", ComponentType::Deduction),
        ];

        let breakup = build_arrear_breakup(&slip, &components, dec("1"), 2, 1).unwrap();

        assert_eq!(
            breakup.earning_arrears,
            vec![ArrearDetail {
                salary_component: "Arrear Basic".to_string(),
                amount: dec("2407.41"),
            }]
        );
        assert_eq!(
            breakup.deduction_arrears,
            vec![ArrearDetail {
                salary_component: "Arrear PT".to_string(),
                amount: dec("7.41"),
            }]
        );
        assert_eq!(
            breakup.accrual_arrears,
            vec![ArrearDetail {
                salary_component: "Medical Allowance".to_string(),
                amount: dec("74.07"),
            }]
        );
        assert_eq!(breakup.audit_steps.len(), 3);
        assert_eq!(breakup.audit_steps[2].step_number, 3);
    }

    #[test]
    fn test_breakup_skips_disabled_and_wrong_type() {
        let slip = create_slip("27");
        let mut disabled = arrear("Arrear HRA", "HRA", ComponentType::Earning);
        disabled.disabled = true;
        let components = vec![
            disabled,
            arrear("Arrear Basic Deduction", "Basic Salary", ComponentType::Deduction),
        ];

        let breakup = build_arrear_breakup(&slip, &components, dec("1"), 2, 1).unwrap();

        assert!(breakup.earning_arrears.is_empty());
        assert!(breakup.deduction_arrears.is_empty());
        assert_eq!(breakup.accrual_arrears.len(), 1);
    }

    #[test]
    fn test_breakup_one_row_per_mapped_component() {
        let slip = create_slip("27");
        let components = vec![
            arrear("Arrear Basic", "Basic Salary", ComponentType::Earning),
            arrear("Arrear Basic Bonus", "Basic Salary", ComponentType::Earning),
        ];

        let breakup = build_arrear_breakup(&slip, &components, dec("1"), 2, 1).unwrap();

        assert_eq!(breakup.earning_arrears.len(), 2);
        assert_eq!(breakup.earning_arrears[1].salary_component, "Arrear Basic Bonus");
    }

    #[test]
    fn test_audit_reasoning_explains_proration() {
        let slip = create_slip("0");
        let components = vec![arrear("Arrear Basic", "Basic Salary", ComponentType::Earning)];

        let breakup = build_arrear_breakup(&slip, &components, dec("1"), 2, 1).unwrap();

        assert_eq!(breakup.earning_arrears[0].amount, dec("65000"));
        assert!(breakup.audit_steps[0].reasoning.contains("/ 1 working days"));
    }

    #[test]
    fn test_arrear_out_of_range_is_an_error() {
        let err = prorate_arrear(Decimal::MAX, dec("1"), dec("2"), 2).unwrap_err();
        assert!(matches!(err, EngineError::AmountOverflow { .. }));
    }
}
