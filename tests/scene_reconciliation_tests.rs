use linechart_rs::api::{ChartEngine, ChartState};
use linechart_rs::core::{ChartPoint, ContainerSize, DomainOverride, Series, UNKNOWN_UNITS};
use linechart_rs::render::NullRenderer;
use linechart_rs::scene::ElementPhase;

fn series(id: &str, points: &[(f64, f64)]) -> Series {
    Series::new(
        id,
        points.iter().map(|&(x, y)| ChartPoint::new(x, y)).collect(),
    )
}

fn fixed_domain() -> DomainOverride {
    DomainOverride::default()
        .with_x(0.0, 10.0)
        .with_y(UNKNOWN_UNITS, 0.0, 100.0)
}

fn state(data: Vec<Series>, duration_ms: f64) -> ChartState {
    ChartState::new(ContainerSize::new(800.0, 400.0))
        .with_data(data)
        .with_domain(fixed_domain())
        .with_transition_duration(duration_ms)
}

#[test]
fn rendering_the_same_data_twice_yields_only_updates() {
    let data = vec![
        series("a", &[(0.0, 0.0), (10.0, 100.0)]),
        series("b", &[(0.0, 50.0), (10.0, 50.0)]),
    ];
    let chart_state = state(data, 0.0);
    let mut engine =
        ChartEngine::create(NullRenderer::default(), &chart_state).expect("engine init");

    let target_before = engine
        .scene()
        .line("a")
        .expect("line a")
        .path_target()
        .to_vec();

    let diff = engine.update(&chart_state).expect("update");
    assert!(diff.entered.is_empty());
    assert!(diff.exited.is_empty());
    assert_eq!(diff.updated, vec!["a".to_owned(), "b".to_owned()]);

    let target_after = engine
        .scene()
        .line("a")
        .expect("line a")
        .path_target()
        .to_vec();
    assert_eq!(target_before, target_after);
}

#[test]
fn new_ids_enter_and_missing_ids_exit() {
    let mut engine = ChartEngine::create(
        NullRenderer::default(),
        &state(vec![series("a", &[(0.0, 1.0), (10.0, 2.0)])], 0.0),
    )
    .expect("engine init");

    let diff = engine
        .update(&state(
            vec![
                series("a", &[(0.0, 1.0), (10.0, 2.0)]),
                series("b", &[(0.0, 3.0), (10.0, 4.0)]),
            ],
            0.0,
        ))
        .expect("update");
    assert_eq!(diff.entered, vec!["b".to_owned()]);
    assert_eq!(
        engine.scene().line("a").expect("line a").phase(),
        ElementPhase::Updating
    );
    assert_eq!(
        engine.scene().line("b").expect("line b").phase(),
        ElementPhase::Entering
    );

    let diff = engine
        .update(&state(vec![series("b", &[(0.0, 3.0), (10.0, 4.0)])], 0.0))
        .expect("update");
    assert_eq!(diff.exited, vec!["a".to_owned()]);
    // Zero duration removes the exiting element immediately.
    assert!(engine.scene().line("a").is_none());
}

#[test]
fn exiting_lines_fade_out_before_removal() {
    let both = vec![
        series("a", &[(0.0, 1.0), (10.0, 2.0)]),
        series("b", &[(0.0, 3.0), (10.0, 4.0)]),
    ];
    let mut engine =
        ChartEngine::create(NullRenderer::default(), &state(both, 0.0)).expect("engine init");

    let diff = engine
        .update(&state(
            vec![series("a", &[(0.0, 1.0), (10.0, 2.0)])],
            500.0,
        ))
        .expect("update");
    assert_eq!(diff.exited, vec!["b".to_owned()]);

    let exiting = engine.scene().line("b").expect("line b still fading");
    assert_eq!(exiting.phase(), ElementPhase::Exiting);

    engine.advance(250.0);
    let midway = engine.scene().line("b").expect("line b midway");
    assert!(midway.opacity() < 1.0);
    assert!(midway.opacity() > 0.0);

    engine.advance(250.0);
    assert!(engine.scene().line("b").is_none());
}

#[test]
fn first_render_snaps_instead_of_fading_in() {
    let engine = ChartEngine::create(
        NullRenderer::default(),
        &state(vec![series("a", &[(0.0, 1.0), (10.0, 2.0)])], 1000.0),
    )
    .expect("engine init");

    // No initial flash: the very first render lands at final opacity even
    // though a long transition is configured.
    assert_eq!(engine.scene().line("a").expect("line a").opacity(), 1.0);
    assert_eq!(engine.scene().x_axis().opacity(), 1.0);
}

#[test]
fn later_entries_fade_in_over_the_configured_duration() {
    let mut engine = ChartEngine::create(
        NullRenderer::default(),
        &state(vec![series("a", &[(0.0, 1.0), (10.0, 2.0)])], 1000.0),
    )
    .expect("engine init");

    engine
        .update(&state(
            vec![
                series("a", &[(0.0, 1.0), (10.0, 2.0)]),
                series("b", &[(0.0, 3.0), (10.0, 4.0)]),
            ],
            1000.0,
        ))
        .expect("update");

    let entering = engine.scene().line("b").expect("line b");
    assert!(entering.opacity() < 0.01);

    engine.advance(1000.0);
    assert_eq!(engine.scene().line("b").expect("line b").opacity(), 1.0);
}

#[test]
fn a_key_returning_mid_exit_re_enters() {
    let both = vec![
        series("a", &[(0.0, 1.0), (10.0, 2.0)]),
        series("b", &[(0.0, 3.0), (10.0, 4.0)]),
    ];
    let mut engine =
        ChartEngine::create(NullRenderer::default(), &state(both.clone(), 0.0)).expect("engine init");

    engine
        .update(&state(
            vec![series("a", &[(0.0, 1.0), (10.0, 2.0)])],
            500.0,
        ))
        .expect("update");
    assert_eq!(
        engine.scene().line("b").expect("line b").phase(),
        ElementPhase::Exiting
    );

    let diff = engine.update(&state(both, 500.0)).expect("update");
    assert!(diff.entered.contains(&"b".to_owned()));
    assert_eq!(
        engine.scene().line("b").expect("line b").phase(),
        ElementPhase::Entering
    );

    engine.advance(500.0);
    assert_eq!(engine.scene().line("b").expect("line b").opacity(), 1.0);
}

#[test]
fn a_new_render_supersedes_the_path_transition_in_flight() {
    // Fixed domains make the pixel math exact: x maps [0, 10] onto
    // [0, 725], y maps [0, 100] onto [330, 0].
    let mut engine = ChartEngine::create(
        NullRenderer::default(),
        &state(vec![series("a", &[(0.0, 0.0), (10.0, 100.0)])], 0.0),
    )
    .expect("engine init");
    assert_eq!(
        engine.scene().line("a").expect("line a").path_target(),
        &[(0.0, 330.0), (725.0, 0.0)]
    );

    engine
        .update(&state(vec![series("a", &[(0.0, 0.0), (10.0, 50.0)])], 1000.0))
        .expect("update");
    engine.advance(500.0);
    let midway = engine.scene().line("a").expect("line a").path_points();
    assert!((midway[1].1 - 82.5).abs() <= 1e-9);

    // Retarget mid-flight: the old target is abandoned entirely.
    engine
        .update(&state(vec![series("a", &[(0.0, 0.0), (10.0, 25.0)])], 1000.0))
        .expect("update");
    assert_eq!(
        engine.scene().line("a").expect("line a").path_target(),
        &[(0.0, 330.0), (725.0, 247.5)]
    );

    engine.advance(1000.0);
    let settled = engine.scene().line("a").expect("line a").path_points();
    assert!((settled[1].1 - 247.5).abs() <= 1e-9);
}

#[test]
fn render_generation_increases_monotonically() {
    let chart_state = state(vec![series("a", &[(0.0, 1.0), (10.0, 2.0)])], 0.0);
    let mut engine =
        ChartEngine::create(NullRenderer::default(), &chart_state).expect("engine init");

    let first = engine.scene().generation();
    engine.update(&chart_state).expect("update");
    let second = engine.scene().generation();
    engine.update(&chart_state).expect("update");
    let third = engine.scene().generation();

    assert!(first < second);
    assert!(second < third);
}

#[test]
fn y_axes_follow_units_across_renders() {
    let mut engine = ChartEngine::create(
        NullRenderer::default(),
        &state(
            vec![{
                let mut s = series("a", &[(0.0, 1.0), (10.0, 2.0)]);
                s.units = Some("m".to_owned());
                s
            }],
            0.0,
        ),
    )
    .expect("engine init");
    assert!(engine.scene().y_axis("m").is_some());

    engine
        .update(&state(
            vec![{
                let mut s = series("a", &[(0.0, 1.0), (10.0, 2.0)]);
                s.units = Some("kg".to_owned());
                s
            }],
            0.0,
        ))
        .expect("update");

    // Axis identity is the unit string; a vanished unit's axis leaves at
    // once and the new unit's axis appears.
    assert!(engine.scene().y_axis("m").is_none());
    assert!(engine.scene().y_axis("kg").is_some());
}
