use linechart_rs::core::LinearScale;
use proptest::prelude::*;

proptest! {
    #[test]
    fn x_scale_preserves_order(
        domain_start in -1.0e6f64..1.0e6,
        span in 1.0e-3f64..1.0e6,
        fraction_a in 0.0f64..1.0,
        fraction_b in 0.0f64..1.0,
        width in 10.0f64..4000.0
    ) {
        let scale = LinearScale::new((domain_start, domain_start + span), (0.0, width))
            .expect("valid scale");

        let lower = domain_start + span * fraction_a.min(fraction_b);
        let upper = domain_start + span * fraction_a.max(fraction_b);
        prop_assert!(scale.map(lower) <= scale.map(upper) + 1.0e-9);
    }

    #[test]
    fn y_scale_maps_larger_values_to_smaller_pixels(
        domain_start in -1.0e6f64..1.0e6,
        span in 1.0e-3f64..1.0e6,
        fraction_a in 0.0f64..1.0,
        fraction_b in 0.0f64..1.0,
        plot_height in 10.0f64..4000.0
    ) {
        let scale = LinearScale::new((domain_start, domain_start + span), (plot_height, 0.0))
            .expect("valid scale");

        let lower = domain_start + span * fraction_a.min(fraction_b);
        let upper = domain_start + span * fraction_a.max(fraction_b);
        prop_assert!(scale.map(upper) <= scale.map(lower) + 1.0e-9);
    }

    #[test]
    fn invert_round_trips_within_tolerance(
        domain_start in -1.0e6f64..1.0e6,
        span in 1.0e-3f64..1.0e6,
        pixel_fraction in 0.0f64..1.0,
        width in 10.0f64..4000.0
    ) {
        let scale = LinearScale::new((domain_start, domain_start + span), (0.0, width))
            .expect("valid scale");

        let pixel = width * pixel_fraction;
        let round_tripped = scale.map(scale.invert(pixel));
        prop_assert!((round_tripped - pixel).abs() <= 1.0e-6 * width.max(1.0));
    }

    #[test]
    fn ticks_are_sorted_and_inside_the_domain(
        domain_start in -1.0e4f64..1.0e4,
        span in 1.0e-2f64..1.0e4,
        count in 2usize..12
    ) {
        let scale = LinearScale::new((domain_start, domain_start + span), (0.0, 500.0))
            .expect("valid scale");

        let ticks = scale.ticks(count);
        for pair in ticks.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
        let tolerance = 1.0e-9 * (1.0 + domain_start.abs() + span);
        for tick in &ticks {
            prop_assert!(*tick >= domain_start - tolerance);
            prop_assert!(*tick <= domain_start + span + tolerance);
        }
    }
}
