use catalog_report::core::Viewport;
use catalog_report::render::{
    Color, ImageFormat, LinePrimitive, PolylinePrimitive, RectPrimitive, RenderFrame, Renderer,
    SvgRenderer, TextHAlign, TextPrimitive,
};

fn chart_like_frame() -> RenderFrame {
    RenderFrame::new(Viewport::new(200, 120))
        .with_rect(
            RectPrimitive::new(20.0, 30.0, 40.0, 60.0, Color::rgb(1.0, 0.0, 0.0).with_alpha(0.75))
                .with_border(0.6, Color::BLACK),
        )
        .with_line(LinePrimitive::new(20.0, 90.0, 180.0, 90.0, 1.0, Color::BLACK))
        .with_polyline(PolylinePrimitive::new(
            vec![(20.0, 80.0), (60.0, 40.0), (100.0, 70.0)],
            1.8,
            Color::BLACK,
        ))
        .with_text(TextPrimitive::new(
            "Blood & Water <2021>",
            100.0,
            14.0,
            12.0,
            Color::BLACK,
            TextHAlign::Center,
        ))
        .with_text(
            TextPrimitive::new("Count", 10.0, 60.0, 11.0, Color::BLACK, TextHAlign::Center)
                .rotated(-90.0),
        )
}

#[test]
fn writes_standalone_svg_document() {
    let mut renderer = SvgRenderer::new();
    let image = renderer.render(&chart_like_frame()).expect("render");
    let markup = String::from_utf8(image.bytes.clone()).expect("utf-8 svg");

    assert_eq!(image.format, ImageFormat::Svg);
    assert_eq!(renderer.backend_name(), "svg");
    assert!(markup.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(markup.contains(r#"width="200" height="120""#));
    assert!(markup.trim_end().ends_with("</svg>"));
}

#[test]
fn escapes_text_and_applies_rotation() {
    let mut renderer = SvgRenderer::new();
    let image = renderer.render(&chart_like_frame()).expect("render");
    let markup = String::from_utf8(image.bytes).expect("utf-8 svg");

    assert!(markup.contains("Blood &amp; Water &lt;2021&gt;"));
    assert!(markup.contains(r#"transform="rotate(-90.0 10.00 60.00)""#));
    assert!(markup.contains(r#"text-anchor="middle""#));
}

#[test]
fn replaces_characters_outside_xml() {
    let frame = RenderFrame::new(Viewport::new(120, 40)).with_text(TextPrimitive::new(
        "Movie\u{b}\u{0}\u{FFFF}\tend",
        60.0,
        20.0,
        12.0,
        Color::BLACK,
        TextHAlign::Center,
    ));
    let mut renderer = SvgRenderer::new();
    let image = renderer.render(&frame).expect("render");
    let markup = String::from_utf8(image.bytes).expect("utf-8 svg");

    assert!(markup.contains("Movie\u{FFFD}\u{FFFD}\u{FFFD}\tend"));
    assert!(!markup.contains('\u{b}'));
    assert!(!markup.contains('\u{0}'));
}

#[test]
fn emits_opacity_and_polyline_points() {
    let mut renderer = SvgRenderer::new();
    let image = renderer.render(&chart_like_frame()).expect("render");
    let markup = String::from_utf8(image.bytes).expect("utf-8 svg");

    assert!(markup.contains(r##"fill="#ff0000" fill-opacity="0.750""##));
    assert!(markup.contains(r##"stroke="#000000" stroke-width="0.60""##));
    assert!(markup.contains(r#"points="20.00,80.00 60.00,40.00 100.00,70.00""#));
    assert!(markup.contains(r#"fill="none""#));
}

#[test]
fn reports_primitive_counts() {
    let mut renderer = SvgRenderer::new();
    renderer.render(&chart_like_frame()).expect("render");

    let stats = renderer.last_stats();
    assert_eq!(stats.rects_drawn, 1);
    assert_eq!(stats.lines_drawn, 1);
    assert_eq!(stats.polylines_drawn, 1);
    assert_eq!(stats.texts_drawn, 2);
}

#[test]
fn invalid_frame_leaves_previous_stats() {
    let mut renderer = SvgRenderer::new();
    renderer.render(&chart_like_frame()).expect("render");

    let invalid = RenderFrame::new(Viewport::new(0, 0));
    assert!(renderer.render(&invalid).is_err());
    assert_eq!(renderer.last_stats().texts_drawn, 2);
}

#[test]
fn rendering_is_deterministic() {
    let frame = chart_like_frame();
    let first = SvgRenderer::new().render(&frame).expect("first");
    let second = SvgRenderer::new().render(&frame).expect("second");

    assert_eq!(first, second);
}
