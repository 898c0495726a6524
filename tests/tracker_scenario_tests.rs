use approx::assert_relative_eq;
use hike_chart::api::{HikeChart, HikeChartConfig};
use hike_chart::core::{DataSeries, DomainPoint, IntersectionTolerance, SeriesId, Viewport};
use hike_chart::interaction::TrackerPhase;
use hike_chart::overlay::TrackerSettings;
use hike_chart::render::{Color, NullRenderer};

fn series(label: &str, points: &[(f64, f64)]) -> DataSeries {
    DataSeries::new(
        label,
        Color::rgb(0.2, 0.6, 0.3),
        points.iter().map(|(x, y)| DomainPoint::new(*x, *y)).collect(),
    )
}

fn chart(series: Vec<DataSeries>) -> HikeChart<NullRenderer> {
    HikeChart::new(
        NullRenderer::default(),
        Viewport::new(375, 420),
        series,
        HikeChartConfig::default(),
    )
    .expect("chart init")
}

/// Host-space x for a distance, using the chart's own x axis.
fn host_x(chart: &HikeChart<NullRenderer>, distance: f64) -> f64 {
    let frames = chart.frames().expect("frames");
    chart.x_axis().expect("x axis").screen_loc_for_scalar(distance) + frames.chart_frame.x
}

/// Host-space y somewhere inside the plot area.
fn host_y(chart: &HikeChart<NullRenderer>) -> f64 {
    let frames = chart.frames().expect("frames");
    frames.chart_frame.y + frames.plot_frame.y + frames.plot_frame.height / 2.0
}

#[test]
fn two_series_probe_reports_two_distinct_altitudes() {
    let mut chart = chart(vec![
        series("A", &[(0.0, 800.0), (150.0, 790.0)]),
        series("B", &[(0.0, 800.0), (175.0, 810.0)]),
    ]);
    assert!(!chart.is_placeholder());

    let (x, y) = (host_x(&chart, 50.0), host_y(&chart));
    assert_eq!(chart.pointer_began(x, y), TrackerPhase::Tracking);

    let probe = chart.last_probe().expect("probe");
    assert_eq!(probe.hits.len(), 2);
    let a = probe.hit(SeriesId::new(0)).expect("A hit").altitude;
    let b = probe.hit(SeriesId::new(1)).expect("B hit").altitude;
    assert_relative_eq!(a, 800.0 - 10.0 / 3.0, epsilon = 1e-6);
    assert_relative_eq!(b, 800.0 + 10.0 * 50.0 / 175.0, epsilon = 1e-6);
    assert_ne!(a, 800.0);
    assert_ne!(b, 800.0);
    assert_relative_eq!(probe.distance.expect("distance"), 50.0, epsilon = 1e-6);

    let overlay = chart.overlay_state();
    assert!(overlay.visible);
    assert_eq!(overlay.visible_readout_count(), 2);
    assert_eq!(
        overlay.readouts[&SeriesId::new(0)].text.as_deref(),
        Some("Alt : 796m")
    );
    assert_eq!(
        overlay.readouts[&SeriesId::new(1)].text.as_deref(),
        Some("Alt : 802m")
    );

    chart.render().expect("render");
    let texts = chart.renderer().last_texts();
    assert!(texts.contains(&"Alt : 796m"));
    assert!(texts.contains(&"Alt : 802m"));
}

#[test]
fn probe_at_data_x_returns_that_points_altitude() {
    let mut chart = chart(vec![series(
        "track",
        &[(0.0, 800.0), (40.0, 830.0), (90.0, 810.0), (150.0, 790.0)],
    )]);

    for (distance, altitude) in [(40.0, 830.0), (90.0, 810.0), (150.0, 790.0)] {
        let (x, y) = (host_x(&chart, distance), host_y(&chart));
        chart.pointer_moved(x, y);
        let hit = chart
            .last_probe()
            .and_then(|probe| probe.hit(SeriesId::new(0)))
            .expect("hit at data x");
        assert_relative_eq!(hit.altitude, altitude, epsilon = 1e-6);
    }
}

#[test]
fn probe_outside_every_series_hides_overlay() {
    let mut chart = chart(vec![
        series("A", &[(0.0, 800.0), (150.0, 790.0)]),
        series("B", &[(10.0, 800.0), (175.0, 810.0)]),
    ]);
    let y = host_y(&chart);

    chart.pointer_began(host_x(&chart, 60.0), y);
    assert!(chart.overlay_state().visible);
    assert!(!chart.overlay_scene().expect("scene").is_hidden());

    let frames = chart.frames().expect("frames");
    let left_of_plot = frames.chart_frame.x + frames.plot_frame.x - 5.0;
    assert_eq!(chart.pointer_moved(left_of_plot, y), TrackerPhase::TrackingEmpty);

    let probe = chart.last_probe().expect("probe");
    assert_eq!(probe.hit_count(), 0);
    assert_eq!(probe.hits.len(), 2);
    assert!(probe.distance.is_none());
    assert!(!chart.overlay_state().visible);
    assert!(chart.overlay_scene().expect("scene").is_hidden());

    chart.render().expect("render");
    let frame = chart.renderer().last_frame.as_ref().expect("frame");
    assert!(frame.rects.is_empty());
}

#[test]
fn partial_coverage_shows_only_crossed_series() {
    let mut chart = chart(vec![
        series("A", &[(0.0, 800.0), (150.0, 790.0)]),
        series("B", &[(0.0, 800.0), (175.0, 810.0)]),
    ]);
    chart.pointer_began(host_x(&chart, 165.0), host_y(&chart));

    assert_eq!(chart.tracker_phase(), TrackerPhase::Tracking);
    let overlay = chart.overlay_state();
    assert_eq!(overlay.visible_readout_count(), 1);
    assert!(!overlay.readouts[&SeriesId::new(0)].is_visible());
    assert!(overlay.readouts[&SeriesId::new(1)].is_visible());
}

#[test]
fn one_point_series_never_intersects() {
    let mut chart = chart(vec![
        series("single", &[(50.0, 820.0)]),
        series("track", &[(0.0, 800.0), (100.0, 840.0), (200.0, 790.0)]),
    ]);
    for distance in [0.0, 50.0, 120.0, 200.0] {
        chart.pointer_moved(host_x(&chart, distance), host_y(&chart));
        let probe = chart.last_probe().expect("probe");
        assert!(probe.hit(SeriesId::new(0)).is_none());
        assert!(probe.hit(SeriesId::new(1)).is_some());
    }
}

#[test]
fn lone_one_point_series_keeps_tracker_idle() {
    let mut chart = chart(vec![series("single", &[(50.0, 820.0)])]);
    assert!(chart.is_placeholder());

    let y = host_y(&chart);
    for x in [10.0, 100.0, 300.0] {
        assert_eq!(chart.pointer_moved(x, y), TrackerPhase::Idle);
        assert!(chart.last_probe().is_none());
        assert!(!chart.overlay_state().visible);
    }
    assert_eq!(chart.pointer_ended(), TrackerPhase::Idle);
}

#[test]
fn release_clears_tracking_and_fades_overlay() {
    let mut chart = chart(vec![
        series("A", &[(0.0, 800.0), (150.0, 790.0)]),
        series("B", &[(0.0, 800.0), (175.0, 810.0)]),
    ]);
    chart.pointer_began(host_x(&chart, 30.0), host_y(&chart));
    assert!(chart.tracker_phase().is_active());

    assert_eq!(chart.pointer_cancelled(), TrackerPhase::Idle);
    assert!(chart.last_probe().is_none());
    assert!(!chart.overlay_state().visible);
    assert!(chart.overlay_scene().expect("scene").is_hidden());
    assert!(!chart.last_transitions().is_empty());
    assert!(
        chart
            .last_transitions()
            .iter()
            .all(|transition| transition.to.opacity == 0.0)
    );
}

#[test]
fn configured_tolerance_reaches_the_tracker() {
    let profile = vec![
        series("A", &[(0.0, 800.0), (100.0, 820.0), (200.0, 810.0)]),
        series("B", &[(0.0, 805.0), (200.0, 830.0)]),
    ];
    let loose = IntersectionTolerance::new(1e-3);
    let config = HikeChartConfig {
        tracker: TrackerSettings {
            intersection_tolerance: loose,
            ..TrackerSettings::default()
        },
        ..HikeChartConfig::default()
    };
    let mut tolerant = HikeChart::new(
        NullRenderer::default(),
        Viewport::new(375, 420),
        profile.clone(),
        config,
    )
    .expect("chart init");
    let mut exact = chart(profile);
    assert_eq!(tolerant.tracker_tolerance(), Some(loose));
    assert_eq!(exact.tracker_tolerance(), Some(IntersectionTolerance::EXACT));

    // A hair past the last data point: only the tolerant tracker still hits.
    let x = host_x(&exact, 200.0) + 0.01;
    let y = host_y(&exact);
    assert_eq!(exact.pointer_began(x, y), TrackerPhase::TrackingEmpty);
    assert_eq!(tolerant.pointer_began(x, y), TrackerPhase::Tracking);
    assert_eq!(tolerant.last_probe().expect("probe").hit_count(), 2);
}
