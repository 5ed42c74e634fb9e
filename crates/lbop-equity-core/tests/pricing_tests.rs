use lbop_equity_core::pricing::scale::{
    ParticipationPolicy, PercentTruncation, RawParticipationPolicy, ScaleAnchor, ScaleShape,
    ScaleVariable,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn even_anchor_table(truncation: PercentTruncation) -> ParticipationPolicy {
    // 3000, 5000, ..., 19000 mapping 60.0% down to 42.5% in equal steps
    let anchors = (1..8)
        .map(|i| ScaleAnchor {
            x: dec!(3000) + Decimal::from(i * 2000),
            pct: dec!(0.60) - Decimal::from(i) * dec!(0.021875),
        })
        .collect();
    ParticipationPolicy::new(RawParticipationPolicy {
        lower_breakpoint: dec!(3000),
        upper_breakpoint: dec!(19000),
        max_pct: dec!(0.60),
        min_pct: dec!(0.425),
        shape: ScaleShape::Piecewise { anchors },
        variable: ScaleVariable::AcquisitionPrice,
        truncation,
    })
    .unwrap()
}

fn stepped_anchor_table() -> ParticipationPolicy {
    let anchors = [
        (5000, dec!(0.58)),
        (7000, dec!(0.565)),
        (9000, dec!(0.55)),
        (11000, dec!(0.53)),
        (13000, dec!(0.51)),
        (15000, dec!(0.485)),
        (17000, dec!(0.455)),
    ]
    .into_iter()
    .map(|(x, pct)| ScaleAnchor {
        x: Decimal::from(x),
        pct,
    })
    .collect();
    ParticipationPolicy::new(RawParticipationPolicy {
        lower_breakpoint: dec!(3000),
        upper_breakpoint: dec!(19000),
        max_pct: dec!(0.60),
        min_pct: dec!(0.425),
        shape: ScaleShape::Piecewise { anchors },
        variable: ScaleVariable::AcquisitionPrice,
        truncation: PercentTruncation::OneDecimal,
    })
    .unwrap()
}

fn sample_points() -> Vec<Decimal> {
    let mut xs: Vec<Decimal> = (-4..=44).map(|i| Decimal::from(i * 500)).collect();
    xs.extend([dec!(3000.01), dec!(4321.77), dec!(18999.99), dec!(12345.678)]);
    xs.sort();
    xs
}

// ===========================================================================
// Properties
// ===========================================================================

#[test]
fn test_resolve_stays_within_band() {
    let policies = vec![
        ParticipationPolicy::standard(),
        ParticipationPolicy::standard().with_truncation(PercentTruncation::OneDecimal),
        even_anchor_table(PercentTruncation::None),
        stepped_anchor_table(),
    ];
    for policy in &policies {
        for x in sample_points() {
            let pct = policy.resolve(x);
            assert!(
                pct >= policy.min_pct() && pct <= policy.max_pct(),
                "pct {pct} at x={x} outside band"
            );
        }
    }
}

#[test]
fn test_breakpoints_resolve_exactly() {
    for policy in [
        ParticipationPolicy::standard(),
        even_anchor_table(PercentTruncation::OneDecimal),
        stepped_anchor_table(),
    ] {
        assert_eq!(policy.resolve(policy.lower_breakpoint()), policy.max_pct());
        assert_eq!(policy.resolve(policy.upper_breakpoint()), policy.min_pct());
    }
}

#[test]
fn test_resolve_is_non_increasing() {
    for policy in [
        ParticipationPolicy::standard(),
        even_anchor_table(PercentTruncation::OneDecimal),
        stepped_anchor_table(),
    ] {
        let xs = sample_points();
        for pair in xs.windows(2) {
            assert!(
                policy.resolve(pair[0]) >= policy.resolve(pair[1]),
                "scale rose between {} and {}",
                pair[0],
                pair[1]
            );
        }
    }
}

#[test]
fn test_resolve_is_deterministic() {
    let policy = stepped_anchor_table();
    for x in sample_points() {
        assert_eq!(policy.resolve(x), policy.resolve(x));
    }
}

// ===========================================================================
// Scenarios
// ===========================================================================

#[test]
fn test_scenario_a_linear_interior() {
    let policy = ParticipationPolicy::standard();
    // 0.60 - (5000-3000)/16000 * 0.175
    assert_eq!(policy.resolve(dec!(5000)), dec!(0.578125));
}

#[test]
fn test_scenario_b_below_lower_breakpoint() {
    let policy = ParticipationPolicy::standard();
    for x in [dec!(3000), dec!(2999.99), dec!(500), dec!(0), dec!(-10000)] {
        assert_eq!(policy.resolve(x), dec!(0.60));
    }
}

#[test]
fn test_scenario_c_above_upper_breakpoint() {
    let policy = ParticipationPolicy::standard();
    for x in [dec!(19000), dec!(19000.01), dec!(45000), dec!(1000000)] {
        assert_eq!(policy.resolve(x), dec!(0.425));
    }
}

#[test]
fn test_scenario_e_anchor_table_truncated() {
    let policy = even_anchor_table(PercentTruncation::OneDecimal);
    // anchor at 5000 is 57.8125% -> 57.8%
    assert_eq!(policy.resolve(dec!(5000)), dec!(0.578));
    // between 5000 (57.8125%) and 7000 (55.625%): 56.71875% -> 56.7%
    assert_eq!(policy.resolve(dec!(6000)), dec!(0.567));
    // between 17000 (44.6875%) and 19000 (42.5%): 43.59375% -> 43.5%
    assert_eq!(policy.resolve(dec!(18000)), dec!(0.435));
}

#[test]
fn test_scenario_e_truncation_matches_floor_formula() {
    let truncated = even_anchor_table(PercentTruncation::OneDecimal);
    let full = even_anchor_table(PercentTruncation::None);
    for x in sample_points() {
        let expected_pct_points = (full.resolve(x) * dec!(1000)).floor() / dec!(10);
        let expected = (expected_pct_points / dec!(100))
            .max(full.min_pct())
            .min(full.max_pct());
        if x <= full.lower_breakpoint() || x >= full.upper_breakpoint() {
            assert_eq!(truncated.resolve(x), full.resolve(x));
        } else {
            assert_eq!(truncated.resolve(x), expected, "x={x}");
        }
    }
}

#[test]
fn test_stepped_table_picks_bracketing_pair() {
    let policy = stepped_anchor_table();
    // (9000, 55.0%) -> (11000, 53.0%): midpoint 54.0%
    assert_eq!(policy.resolve(dec!(10000)), dec!(0.54));
    // (15000, 48.5%) -> (17000, 45.5%): 16000 -> 47.0%
    assert_eq!(policy.resolve(dec!(16000)), dec!(0.47));
    // (17000, 45.5%) -> (19000, 42.5%): 17500 -> 44.75% -> 44.7%
    assert_eq!(policy.resolve(dec!(17500)), dec!(0.447));
}

#[test]
fn test_policy_from_json_config() {
    let json = r#"{
        "lower_breakpoint": "3000",
        "upper_breakpoint": "19000",
        "max_pct": "0.60",
        "min_pct": "0.425",
        "shape": { "Piecewise": { "anchors": [ { "x": "11000", "pct": "0.50" } ] } },
        "variable": "NetEquity",
        "truncation": "OneDecimal"
    }"#;
    let policy: ParticipationPolicy = serde_json::from_str(json).unwrap();
    assert_eq!(policy.variable(), ScaleVariable::NetEquity);
    assert_eq!(policy.resolve(dec!(7000)), dec!(0.55));
}
