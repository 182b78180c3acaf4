use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::chart::RenderedChart;
use crate::report::table::{DEFAULT_TABLE_CLASSES, escape_html};

/// Text and styling knobs of the composed page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageOptions {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_charts_heading")]
    pub charts_heading: String,
    #[serde(default = "default_table_heading")]
    pub table_heading: String,
    #[serde(default = "default_table_classes")]
    pub table_classes: String,
    #[serde(default = "default_stylesheet_url")]
    pub stylesheet_url: String,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            title: default_title(),
            charts_heading: default_charts_heading(),
            table_heading: default_table_heading(),
            table_classes: default_table_classes(),
            stylesheet_url: default_stylesheet_url(),
        }
    }
}

const PAGE_STYLE: &str = r#"            body {
                background-color: #221F1F;
                color: white;
            }
            .container {
                margin-top: 30px;
            }
            h1, h2 {
                color: #E50914;
            }
            .table-container {
                margin-top: 30px;
            }
            .plot-container {
                display: flex;
                justify-content: space-around;
                flex-wrap: wrap;
            }
            .plot-container img {
                margin: 10px;
                max-width: 30%;
            }
            .table th, .table td {
                color: white;
            }
            .table-striped tbody tr:nth-of-type(odd) {
                background-color: #2D2D2D;
            }
            .table-hover tbody tr:hover {
                background-color: #3E3E3E;
            }
"#;

/// Substitutes the charts and the table into the page template.
///
/// `table_html` is trusted markup from the table formatter and is inserted
/// verbatim; option strings are escaped.
#[must_use]
pub fn compose_page(options: &PageOptions, charts: &[RenderedChart], table_html: &str) -> String {
    let title = escape_html(&options.title);
    let mut html = String::with_capacity(
        4096 + table_html.len() + charts.iter().map(|c| c.image.bytes.len() * 4 / 3 + 64).sum::<usize>(),
    );

    // Writing into a String cannot fail.
    let _ = write!(
        html,
        r#"<!doctype html>
<html>
    <head>
        <meta charset="utf-8">
        <title>{title}</title>
        <link rel="stylesheet" href="{stylesheet}">
        <style>
{PAGE_STYLE}        </style>
    </head>
    <body>
        <div class="container">
            <h1>{title}</h1>
            <h2>{charts_heading}</h2>
            <div class="plot-container">
"#,
        stylesheet = escape_html(&options.stylesheet_url),
        charts_heading = escape_html(&options.charts_heading),
    );

    for chart in charts {
        let _ = writeln!(
            html,
            r#"                <img src="data:{};base64,{}" alt="Plot" title="{}">"#,
            chart.image.mime_type(),
            chart.base64(),
            escape_html(&chart.title)
        );
    }

    let _ = write!(
        html,
        r#"            </div>
            <div class="table-container">
                <h2>{table_heading}</h2>
{table_html}
            </div>
        </div>
    </body>
</html>
"#,
        table_heading = escape_html(&options.table_heading),
    );

    html
}

fn default_title() -> String {
    "Netflix Titles".to_owned()
}

fn default_charts_heading() -> String {
    "Plots".to_owned()
}

fn default_table_heading() -> String {
    "Netflix Data Table".to_owned()
}

fn default_table_classes() -> String {
    DEFAULT_TABLE_CLASSES.to_owned()
}

fn default_stylesheet_url() -> String {
    "https://maxcdn.bootstrapcdn.com/bootstrap/4.5.2/css/bootstrap.min.css".to_owned()
}
