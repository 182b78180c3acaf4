use approx::assert_relative_eq;
use catalog_report::ReportError;
use catalog_report::core::{LinearScale, PlotArea, Viewport, format_tick, nice_domain, nice_step};

#[test]
fn linear_scale_round_trip() {
    let scale = LinearScale::new(0.0, 40.0, 100.0, 500.0).expect("scale");

    let px = scale.domain_to_pixel(10.0).expect("to pixel");
    assert_relative_eq!(px, 200.0);
    assert_relative_eq!(scale.pixel_to_domain(px).expect("from pixel"), 10.0);
}

#[test]
fn inverted_pixel_range_grows_upwards() {
    let scale = LinearScale::new(0.0, 10.0, 400.0, 40.0).expect("scale");

    assert_relative_eq!(scale.domain_to_pixel(0.0).expect("bottom"), 400.0);
    assert_relative_eq!(scale.domain_to_pixel(10.0).expect("top"), 40.0);
    assert!(scale.domain_to_pixel(7.0).expect("mid") < scale.domain_to_pixel(3.0).expect("mid"));
}

#[test]
fn degenerate_domain_is_rejected() {
    let err = LinearScale::new(5.0, 5.0, 0.0, 100.0).expect_err("zero span");
    assert!(matches!(err, ReportError::InvalidData(_)));

    let scale = LinearScale::new(0.0, 1.0, 0.0, 100.0).expect("scale");
    assert!(scale.domain_to_pixel(f64::INFINITY).is_err());
}

#[test]
fn nice_steps_use_one_two_five_ladder() {
    assert_relative_eq!(nice_step(10.0, 5), 2.0);
    assert_relative_eq!(nice_step(95.0, 6), 20.0);
    assert_relative_eq!(nice_step(0.9, 3), 0.5);
    assert_relative_eq!(nice_step(0.0, 5), 1.0);
}

#[test]
fn nice_domain_and_ticks_cover_the_peak() {
    let (low, high) = nice_domain(0.0, 37.0, 6);
    assert_relative_eq!(low, 0.0);
    assert_relative_eq!(high, 40.0);

    let ticks = LinearScale::new(low, high, 0.0, 1.0)
        .expect("scale")
        .nice_ticks(6);
    assert_eq!(ticks, vec![0.0, 10.0, 20.0, 30.0, 40.0]);
}

#[test]
fn tick_labels_drop_trailing_zeros() {
    assert_eq!(format_tick(10.0), "10");
    assert_eq!(format_tick(2.5), "2.5");
    assert_eq!(format_tick(0.125), "0.125");
    assert_eq!(format_tick(0.1 + 0.2), "0.3");
    assert_eq!(format_tick(2005.0), "2005");
}

#[test]
fn plot_area_insets_viewport() {
    let area = PlotArea::inset(Viewport::new(640, 480), 60.0, 36.0, 24.0, 52.0);

    assert_relative_eq!(area.width(), 556.0);
    assert_relative_eq!(area.height(), 392.0);

    let cramped = PlotArea::inset(Viewport::new(50, 40), 60.0, 36.0, 24.0, 52.0);
    assert!(cramped.width() > 0.0);
    assert!(cramped.height() > 0.0);
}
