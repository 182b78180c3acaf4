use std::sync::Arc;

use catalog_report::chart::RenderedChart;
use catalog_report::core::Dataset;
use catalog_report::render::{EncodedImage, ImageBackend, ImageFormat};
use catalog_report::report::{PageOptions, compose_page};
use catalog_report::{ReportConfig, ReportEngine};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/titles_sample.csv");

fn fake_chart(title: &str, bytes: Vec<u8>) -> RenderedChart {
    RenderedChart {
        title: title.to_owned(),
        image: EncodedImage::new(ImageFormat::Png, bytes),
    }
}

fn fixture_engine(backend: ImageBackend) -> ReportEngine {
    let dataset = Arc::new(Dataset::load(FIXTURE).expect("fixture"));
    let config = ReportConfig {
        backend,
        ..ReportConfig::default()
    };
    config.build_engine(dataset).expect("engine")
}

#[test]
fn embeds_each_chart_in_order() {
    let charts = vec![
        fake_chart("first", vec![1, 2, 3]),
        fake_chart("second", vec![4, 5, 6]),
        fake_chart("third", vec![7, 8, 9]),
    ];
    let page = compose_page(&PageOptions::default(), &charts, "<table></table>");

    assert_eq!(page.matches("<img ").count(), 3);
    let first = page.find("data:image/png;base64,AQID").expect("first chart");
    let second = page.find("data:image/png;base64,BAUG").expect("second chart");
    let third = page.find("data:image/png;base64,BwgJ").expect("third chart");
    assert!(first < second && second < third);
    assert!(page.contains(r#"alt="Plot" title="first""#));
}

#[test]
fn table_markup_is_inserted_verbatim() {
    let table = r#"<table class="dataframe"><tr><td>a &amp; b</td></tr></table>"#;
    let page = compose_page(&PageOptions::default(), &[], table);

    assert!(page.contains(table));
    assert_eq!(page.matches("<img ").count(), 0);
}

#[test]
fn default_page_text_and_stylesheet() {
    let page = compose_page(&PageOptions::default(), &[], "");

    assert!(page.starts_with("<!doctype html>"));
    assert!(page.contains("<title>Netflix Titles</title>"));
    assert!(page.contains("<h2>Plots</h2>"));
    assert!(page.contains("<h2>Netflix Data Table</h2>"));
    assert!(page.contains("bootstrap/4.5.2/css/bootstrap.min.css"));
    assert!(page.trim_end().ends_with("</html>"));
}

#[test]
fn option_strings_are_escaped() {
    let options = PageOptions {
        title: "Films & <Shows>".to_owned(),
        ..PageOptions::default()
    };
    let page = compose_page(&options, &[fake_chart("A \"quoted\" chart", vec![0])], "");

    assert!(page.contains("<title>Films &amp; &lt;Shows&gt;</title>"));
    assert!(page.contains(r#"title="A &quot;quoted&quot; chart""#));
}

#[test]
fn engine_renders_full_page_from_fixture() {
    let engine = fixture_engine(ImageBackend::Png);
    let page = engine.render_page().expect("page");

    assert_eq!(page.matches("<img ").count(), 3);
    assert_eq!(page.matches("data:image/png;base64,iVBORw0KGgo").count(), 3);
    assert_eq!(page.matches("<tr").count(), 17);
    assert!(page.contains("<td>Blood &amp; Water</td>"));
}

#[test]
fn svg_backend_embeds_svg_images() {
    let engine = fixture_engine(ImageBackend::Svg);
    let page = engine.render_page().expect("page");

    assert_eq!(page.matches("data:image/svg+xml;base64,").count(), 3);
}

#[test]
fn engine_output_is_stable_across_calls() {
    let engine = fixture_engine(ImageBackend::Png);

    let first = engine.render_page().expect("first");
    let second = engine.clone().render_page().expect("second");
    assert_eq!(first, second);
    assert_eq!(engine.format_table(), engine.format_table());
    assert_eq!(engine.dataset().row_count(), 16);
}
