use linechart_rs::core::{
    ChartPoint, ContainerSize, DomainOverride, Layout, Margin, ScaleSet, Series, UNKNOWN_UNITS,
    distinct_unit_keys,
};
use linechart_rs::render::Color;

fn layout_for_units(unit_count: usize) -> Layout {
    Layout::calculate(
        ContainerSize::new(800.0, 400.0),
        Margin::default(),
        0.0,
        30.0,
        unit_count,
    )
}

fn series(id: &str, units: Option<&str>, points: Vec<ChartPoint>) -> Series {
    let mut series = Series::new(id, points);
    series.units = units.map(str::to_owned);
    series
}

#[test]
fn x_domain_spans_all_series() {
    let data = vec![
        series("a", Some("m"), vec![ChartPoint::new(2.0, 1.0), ChartPoint::new(5.0, 2.0)]),
        series("b", Some("m"), vec![ChartPoint::new(-3.0, 4.0), ChartPoint::new(4.0, 6.0)]),
    ];
    let scales = ScaleSet::calculate(&layout_for_units(1), None, &data).expect("scales");

    assert_eq!(scales.x.domain(), (-3.0, 5.0));
    assert_eq!(scales.x.range(), (0.0, layout_for_units(1).width));
}

#[test]
fn y_domains_are_computed_per_unit() {
    let data = vec![
        series("a", Some("m"), vec![ChartPoint::new(0.0, 10.0), ChartPoint::new(1.0, 30.0)]),
        series("b", Some("m"), vec![ChartPoint::new(0.0, -5.0), ChartPoint::new(1.0, 15.0)]),
        series("c", Some("kg"), vec![ChartPoint::new(0.0, 100.0), ChartPoint::new(1.0, 200.0)]),
    ];
    let layout = layout_for_units(2);
    let scales = ScaleSet::calculate(&layout, None, &data).expect("scales");

    let meters = scales.y_for_unit("m").expect("m scale");
    assert_eq!(meters.domain(), (-5.0, 30.0));
    let kilos = scales.y_for_unit("kg").expect("kg scale");
    assert_eq!(kilos.domain(), (100.0, 200.0));

    // y ranges are inverted so larger values render higher.
    assert_eq!(meters.range(), (layout.plot_height, 0.0));
    assert!(meters.map(30.0) < meters.map(-5.0));
}

#[test]
fn unit_bucketing_groups_unitless_series_under_the_sentinel() {
    let data = vec![
        series("a", Some("m"), vec![ChartPoint::new(0.0, 1.0)]),
        series("b", Some("m"), vec![ChartPoint::new(0.0, 2.0)]),
        series("c", None, vec![ChartPoint::new(0.0, 3.0)]),
    ];
    let scales = ScaleSet::calculate(&layout_for_units(2), None, &data).expect("scales");

    assert_eq!(scales.y.len(), 2);
    assert!(scales.y_for_unit("m").is_some());
    assert!(scales.y_for_unit(UNKNOWN_UNITS).is_some());
}

#[test]
fn distinct_units_match_scale_keys_each_render() {
    let data = vec![
        series("a", Some("kg"), vec![ChartPoint::new(0.0, 1.0)]),
        series("b", None, vec![ChartPoint::new(0.0, 2.0)]),
        series("c", Some("m"), vec![ChartPoint::new(0.0, 3.0)]),
        series("d", Some("kg"), vec![ChartPoint::new(0.0, 4.0)]),
    ];
    let scales = ScaleSet::calculate(&layout_for_units(3), None, &data).expect("scales");

    let units = distinct_unit_keys(&data);
    let keys: Vec<String> = scales.y.keys().cloned().collect();
    assert_eq!(units, keys);
    assert_eq!(keys, vec!["kg", UNKNOWN_UNITS, "m"]);
}

#[test]
fn domain_override_wins_over_observed_ranges() {
    let data = vec![series(
        "a",
        Some("m"),
        vec![ChartPoint::new(0.0, 1.0), ChartPoint::new(10.0, 9.0)],
    )];
    let domain = DomainOverride::default()
        .with_x(-100.0, 100.0)
        .with_y("m", 0.0, 50.0);
    let scales = ScaleSet::calculate(&layout_for_units(1), Some(&domain), &data).expect("scales");

    assert_eq!(scales.x.domain(), (-100.0, 100.0));
    assert_eq!(scales.y_for_unit("m").expect("m scale").domain(), (0.0, 50.0));
}

#[test]
fn degenerate_domain_still_maps_without_dividing_by_zero() {
    let data = vec![series(
        "flat",
        Some("m"),
        vec![ChartPoint::new(5.0, 7.0), ChartPoint::new(5.0, 7.0)],
    )];
    let scales = ScaleSet::calculate(&layout_for_units(1), None, &data).expect("scales");

    let x_pixel = scales.x.map(5.0);
    let y_pixel = scales.y_for_unit("m").expect("m scale").map(7.0);
    assert!(x_pixel.is_finite());
    assert!(y_pixel.is_finite());
}

#[test]
fn unit_with_only_empty_series_gets_a_fallback_scale() {
    let data = vec![
        series("a", Some("m"), vec![ChartPoint::new(0.0, 1.0)]),
        series("b", Some("kg"), Vec::new()),
    ];
    let scales = ScaleSet::calculate(&layout_for_units(2), None, &data).expect("scales");

    assert_eq!(scales.y.len(), 2);
    assert_eq!(scales.y_for_unit("kg").expect("kg scale").domain(), (0.0, 1.0));
}

#[test]
fn non_finite_points_are_ignored_for_extents() {
    let data = vec![series(
        "a",
        Some("m"),
        vec![
            ChartPoint::new(0.0, 1.0),
            ChartPoint::new(f64::NAN, f64::INFINITY),
            ChartPoint::new(4.0, 3.0),
        ],
    )];
    let scales = ScaleSet::calculate(&layout_for_units(1), None, &data).expect("scales");

    assert_eq!(scales.x.domain(), (0.0, 4.0));
    assert_eq!(scales.y_for_unit("m").expect("m scale").domain(), (1.0, 3.0));
}

#[test]
fn series_color_does_not_affect_scales() {
    let plain = vec![series("a", Some("m"), vec![ChartPoint::new(0.0, 1.0)])];
    let colored = vec![
        series("a", Some("m"), vec![ChartPoint::new(0.0, 1.0)]).with_color(Color::rgb(1.0, 0.0, 0.0)),
    ];
    let left = ScaleSet::calculate(&layout_for_units(1), None, &plain).expect("scales");
    let right = ScaleSet::calculate(&layout_for_units(1), None, &colored).expect("scales");
    assert_eq!(left.x.domain(), right.x.domain());
}
