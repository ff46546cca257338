//! End-to-end checks of the pricing engine through its public API.

use chrono::NaiveDate;
use estimator_core::{
    calculate_business_days, calculate_checked, calculate_totals, validate_calculation_input,
    CalculationInput, CalculationResult, CoreError, PersonRow, PricingMode, WorkingWeek,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn team() -> Vec<PersonRow> {
    vec![
        PersonRow::new(dec!(4500), dec!(12), dec!(80)),
        PersonRow::new(dec!(9000), dec!(7.5), dec!(100)).with_weekend_multiplier(dec!(1.25)),
        PersonRow::new(dec!(12000), dec!(3), dec!(50)).non_billable(),
        PersonRow::new(dec!(3333.33), dec!(1), dec!(33.3)).with_holiday_multiplier(dec!(2)),
    ]
}

fn assert_cost_identity(result: &CalculationResult) {
    assert_eq!(result.cost, result.subtotal + result.tax, "{result:?}");
}

#[test]
fn non_billable_rows_never_affect_subtotal() {
    let base = CalculationInput {
        rows: team(),
        ..Default::default()
    };
    let expected = calculate_totals(&base).subtotal;

    let mut changed = base.clone();
    changed.rows[2].price_per_day = dec!(999999);
    changed.rows[2].allocated_days = dec!(365);
    changed.rows[2].weekend_multiplier = Some(dec!(10));

    assert_eq!(calculate_totals(&changed).subtotal, expected);
}

#[test]
fn cost_is_subtotal_plus_tax_in_every_mode() {
    for (mode, tax_percent) in [
        (PricingMode::Direct, dec!(7)),
        (PricingMode::Roi, dec!(12.5)),
        (PricingMode::Margin, dec!(0)),
        (PricingMode::Margin, dec!(100)),
    ] {
        let input = CalculationInput {
            rows: team(),
            tax_enabled: true,
            tax_percent,
            pricing_mode: mode,
            proposed: Some(dec!(250000)),
            target_roi: Some(dec!(15)),
            target_margin: Some(dec!(35)),
        };
        assert!(validate_calculation_input(&input).is_empty());
        assert_cost_identity(&calculate_totals(&input));
    }
}

#[test]
fn disabled_tax_is_zero_regardless_of_percent() {
    for tax_percent in [dec!(0), dec!(7), dec!(100), dec!(250)] {
        let input = CalculationInput {
            rows: team(),
            tax_enabled: false,
            tax_percent,
            ..Default::default()
        };
        let result = calculate_totals(&input);
        assert_eq!(result.tax, Decimal::ZERO);
        assert_eq!(result.cost, result.subtotal);
    }
}

#[test]
fn direct_mode_without_proposed_prices_at_cost() {
    let input = CalculationInput {
        rows: team(),
        pricing_mode: PricingMode::Direct,
        ..Default::default()
    };
    let result = calculate_totals(&input);
    assert_eq!(result.proposed, result.cost);
    assert_eq!(result.roi_percent, Decimal::ZERO);
    assert_eq!(result.margin_percent, Decimal::ZERO);
}

#[test]
fn roi_and_margin_targets_on_a_thousand() {
    let rows = vec![PersonRow::new(dec!(100), dec!(10), dec!(100))];

    let roi = calculate_totals(&CalculationInput {
        rows: rows.clone(),
        pricing_mode: PricingMode::Roi,
        target_roi: Some(dec!(20)),
        ..Default::default()
    });
    assert_eq!(roi.cost, dec!(1000));
    assert_eq!(roi.proposed, dec!(1200));
    assert_eq!(roi.roi_percent, dec!(20));

    let margin = calculate_totals(&CalculationInput {
        rows,
        pricing_mode: PricingMode::Margin,
        target_margin: Some(dec!(25)),
        ..Default::default()
    });
    assert_eq!(margin.cost, dec!(1000));
    assert_eq!(margin.proposed, dec!(1333.33));
    assert_eq!(margin.margin_percent, dec!(25));
}

/// A 25% margin is a 33⅓% ROI; pricing either way lands on the same quote.
#[test]
fn roi_and_margin_modes_agree_on_equivalent_targets() {
    let rows = vec![PersonRow::new(dec!(100), dec!(12), dec!(100))];

    let by_margin = calculate_totals(&CalculationInput {
        rows: rows.clone(),
        pricing_mode: PricingMode::Margin,
        target_margin: Some(dec!(25)),
        ..Default::default()
    });
    let by_roi = calculate_totals(&CalculationInput {
        rows,
        pricing_mode: PricingMode::Roi,
        target_roi: Some(dec!(100) / dec!(3)),
        ..Default::default()
    });

    assert_eq!(by_margin.proposed, dec!(1600));
    assert_eq!(by_roi.proposed, by_margin.proposed);
    assert_eq!(by_roi.roi_percent, by_margin.roi_percent);
    assert_eq!(by_roi.margin_percent, by_margin.margin_percent);
    assert_eq!(by_roi.margin_percent, dec!(25));
    assert_eq!(by_roi.roi_percent, dec!(33.33));
}

#[test]
fn multipliers_compound() {
    let input = CalculationInput {
        rows: vec![PersonRow::new(dec!(100), dec!(10), dec!(100))
            .with_weekend_multiplier(dec!(1.5))
            .with_holiday_multiplier(dec!(2))],
        ..Default::default()
    };
    assert_eq!(calculate_totals(&input).subtotal, dec!(3000));
}

#[test]
fn results_are_deterministic() {
    let input = CalculationInput {
        rows: team(),
        tax_enabled: true,
        tax_percent: dec!(7),
        pricing_mode: PricingMode::Margin,
        target_margin: Some(dec!(18.5)),
        ..Default::default()
    };
    let first = calculate_totals(&input);
    for _ in 0..10 {
        assert_eq!(calculate_totals(&input), first);
    }
}

#[test]
fn every_figure_has_at_most_two_decimals() {
    let input = CalculationInput {
        rows: team(),
        tax_enabled: true,
        tax_percent: dec!(7.25),
        pricing_mode: PricingMode::Margin,
        target_margin: Some(dec!(33.3)),
        ..Default::default()
    };
    let r = calculate_totals(&input);
    for figure in [r.subtotal, r.tax, r.cost, r.proposed, r.roi_percent, r.margin_percent] {
        assert!(figure.scale() <= 2, "{figure}");
    }
}

#[test]
fn business_days() {
    let (mon, fri, sat) = (date(2024, 1, 1), date(2024, 1, 5), date(2024, 1, 6));

    assert_eq!(calculate_business_days(mon, fri, WorkingWeek::MonFri, &[]), 5);
    assert_eq!(
        calculate_business_days(mon, fri, WorkingWeek::MonFri, &[date(2024, 1, 2)]),
        4
    );
    assert_eq!(calculate_business_days(mon, sat, WorkingWeek::MonSat, &[]), 6);
    assert_eq!(calculate_business_days(fri, mon, WorkingWeek::MonFri, &[]), 0);
}

#[test]
fn validator_catches_empty_rows_and_full_margin() {
    let empty = validate_calculation_input(&CalculationInput::default());
    assert!(empty
        .iter()
        .any(|e| e.to_lowercase().contains("at least one person row")));

    let full_margin = CalculationInput {
        rows: vec![PersonRow::new(dec!(100), dec!(10), dec!(100))],
        pricing_mode: PricingMode::Margin,
        target_margin: Some(dec!(100)),
        ..Default::default()
    };
    let errors = validate_calculation_input(&full_margin);
    assert!(errors.iter().any(|e| e.contains("Target margin")));
    assert!(matches!(
        calculate_checked(&full_margin),
        Err(CoreError::InvalidInput(_))
    ));
}

#[test]
fn amounts_beyond_decimal_range_are_rejected_not_panicked() {
    let huge_price = Decimal::from_i128_with_scale(10i128.pow(20), 0);
    let huge_quote = Decimal::from_i128_with_scale(7 * 10i128.pow(26), 0);

    let inputs = [
        CalculationInput {
            rows: vec![PersonRow::new(huge_price, dec!(1000000000), dec!(100))],
            ..Default::default()
        },
        CalculationInput {
            rows: vec![PersonRow::new(dec!(0.01), dec!(1), dec!(100))],
            pricing_mode: PricingMode::Direct,
            proposed: Some(huge_quote),
            ..Default::default()
        },
    ];

    for input in inputs {
        assert_eq!(
            validate_calculation_input(&input),
            vec!["Amounts are too large to calculate".to_string()]
        );
        assert!(matches!(calculate_checked(&input), Err(CoreError::InvalidInput(_))));
        assert_eq!(calculate_totals(&input), CalculationResult::default());
    }
}
