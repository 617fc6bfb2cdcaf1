//! Property-based tests for the scoring formula

use floodrisk_core::{
    evaluate, CombinationMode, RiskInput, ScoringConfig, SoilType, VegetationConfig,
    VegetationCover,
};
use proptest::prelude::*;

prop_compose! {
    fn arb_soil()(idx in 0..3usize) -> SoilType {
        match idx {
            0 => SoilType::Sandy,
            1 => SoilType::Loam,
            _ => SoilType::Clay,
        }
    }
}

prop_compose! {
    fn arb_cover()(
        tree in 0.0..=100.0f64,
        shrub in 0.0..=100.0f64,
        grass in 0.0..=100.0f64
    ) -> VegetationCover {
        VegetationCover::new(tree, shrub, grass)
    }
}

prop_compose! {
    fn arb_input()(
        elevation in 0.0..500.0f64,
        distance in 0.0..5000.0f64,
        soil in arb_soil(),
        flooded in any::<bool>(),
        rainfall in 0.0..4000.0f64,
        cover in prop::option::of(arb_cover())
    ) -> RiskInput {
        RiskInput {
            elevation_m: elevation,
            distance_from_water_m: distance,
            soil_type: soil,
            previous_flooding: flooded,
            annual_rainfall_mm: rainfall,
            vegetation: cover,
        }
    }
}

// Default additive formula, and a curved multiplicative one with a floor
prop_compose! {
    fn arb_config()(idx in 0..2usize) -> ScoringConfig {
        match idx {
            0 => ScoringConfig::default(),
            _ => ScoringConfig::default().with_vegetation(VegetationConfig {
                mode: CombinationMode::Multiplicative,
                tree_effectiveness: 0.50,
                shrub_effectiveness: 0.30,
                grass_effectiveness: 0.20,
                diminishing_returns: Some(2.0),
                residual_floor: 0.1,
                max_reduction: 0.6,
            }),
        }
    }
}

proptest! {
    #[test]
    fn score_is_bounded_and_classified(input in arb_input(), cfg in arb_config()) {
        let out = evaluate(&input, &cfg);
        prop_assert!((0.0..=100.0).contains(&out.score));
        prop_assert_eq!(out.level, cfg.thresholds.classify(out.score));
    }

    #[test]
    fn evaluation_is_idempotent(input in arb_input(), cfg in arb_config()) {
        let a = evaluate(&input, &cfg);
        let b = evaluate(&input, &cfg);
        prop_assert_eq!(a.score.to_bits(), b.score.to_bits());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn lower_ground_never_lowers_score(
        input in arb_input(),
        cfg in arb_config(),
        fall in 0.0..500.0f64
    ) {
        let lower = RiskInput { elevation_m: input.elevation_m - fall, ..input.clone() };
        prop_assert!(evaluate(&lower, &cfg).score >= evaluate(&input, &cfg).score);
    }

    #[test]
    fn closer_water_never_lowers_score(
        input in arb_input(),
        cfg in arb_config(),
        closer in 0.0..5000.0f64
    ) {
        let near = RiskInput {
            distance_from_water_m: (input.distance_from_water_m - closer).max(0.0),
            ..input.clone()
        };
        prop_assert!(evaluate(&near, &cfg).score >= evaluate(&input, &cfg).score);
    }

    #[test]
    fn flood_history_never_lowers_score(input in arb_input(), cfg in arb_config()) {
        let clear = RiskInput { previous_flooding: false, ..input.clone() };
        let flooded = RiskInput { previous_flooding: true, ..input };
        prop_assert!(evaluate(&flooded, &cfg).score >= evaluate(&clear, &cfg).score);
    }

    #[test]
    fn more_cover_never_raises_score(
        input in arb_input(),
        cfg in arb_config(),
        cover in arb_cover(),
        which in 0..3usize,
        extra in 0.0..=100.0f64
    ) {
        let mut denser = cover;
        match which {
            0 => denser.tree_pct += extra,
            1 => denser.shrub_pct += extra,
            _ => denser.grass_pct += extra,
        }
        let sparse_out = evaluate(&input.clone().with_vegetation(cover), &cfg);
        let dense_out = evaluate(&input.with_vegetation(denser), &cfg);
        prop_assert!(dense_out.score <= sparse_out.score);
        prop_assert!(dense_out.level <= sparse_out.level);
    }

    #[test]
    fn coverage_is_clamped_before_scoring(
        input in arb_input(),
        cfg in arb_config(),
        tree in -200.0..300.0f64,
        shrub in -200.0..300.0f64,
        grass in -200.0..300.0f64
    ) {
        let raw = VegetationCover::new(tree, shrub, grass);
        let a = evaluate(&input.clone().with_vegetation(raw), &cfg);
        let b = evaluate(&input.with_vegetation(raw.clamped()), &cfg);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn tier_is_monotonic_in_score(a in arb_input(), b in arb_input(), cfg in arb_config()) {
        let (x, y) = (evaluate(&a, &cfg), evaluate(&b, &cfg));
        if x.score <= y.score {
            prop_assert!(x.level <= y.level);
        } else {
            prop_assert!(x.level >= y.level);
        }
    }
}
