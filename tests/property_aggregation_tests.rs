use std::collections::HashSet;

use catalog_report::core::{BinRule, Dataset, build_histogram, count_by_category, top_n_by_frequency};
use catalog_report::report::format_table;
use proptest::prelude::*;

const LABELS: [&str; 6] = ["Movie", "TV Show", "India", "Spain", "Japan", "France"];

fn label_strategy() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(LABELS.to_vec()), 0..80)
}

proptest! {
    #[test]
    fn category_counts_cover_every_value_once(values in label_strategy()) {
        let counts = count_by_category(values.iter().copied());

        prop_assert_eq!(counts.iter().map(|entry| entry.count).sum::<usize>(), values.len());
        let distinct = counts.iter().map(|entry| entry.label.as_str()).collect::<HashSet<_>>();
        prop_assert_eq!(distinct.len(), counts.len());

        let mut seen = Vec::new();
        for value in &values {
            if !seen.contains(value) {
                seen.push(*value);
            }
        }
        let order = counts.iter().map(|entry| entry.label.as_str()).collect::<Vec<_>>();
        prop_assert_eq!(order, seen);
    }

    #[test]
    fn top_n_keeps_the_largest_counts(values in label_strategy(), limit in 1usize..8) {
        let counts = count_by_category(values.iter().copied());
        let top = top_n_by_frequency(counts.clone(), limit);

        prop_assert_eq!(top.len(), limit.min(counts.len()));
        prop_assert!(top.windows(2).all(|pair| pair[0].count >= pair[1].count));

        let smallest_kept = top.last().map_or(0, |entry| entry.count);
        for entry in &counts {
            if !top.contains(entry) {
                prop_assert!(entry.count <= smallest_kept);
            }
        }
    }

    #[test]
    fn histogram_counts_every_value(
        values in prop::collection::vec(-1.0e6f64..1.0e6, 1..200),
        bins in prop::option::of(1usize..50)
    ) {
        let rule = bins.map_or(BinRule::Auto, BinRule::Count);
        let histogram = build_histogram(&values, rule).expect("histogram");

        prop_assert_eq!(histogram.total(), values.len());
        prop_assert_eq!(histogram.edges.len(), histogram.counts.len() + 1);
        prop_assert!(histogram.edges.windows(2).all(|pair| pair[0] <= pair[1]));
        if let Some(count) = bins {
            prop_assert_eq!(histogram.counts.len(), count);
        }
    }

    #[test]
    fn table_has_one_row_per_record(
        rows in prop::collection::vec(prop::collection::vec("[a-z&<>]{0,6}", 3), 0..25)
    ) {
        let mut csv = String::from("a,b,c\n");
        for row in &rows {
            csv.push_str(&row.join(","));
            csv.push('\n');
        }
        let dataset = Dataset::from_reader(csv.as_bytes()).expect("dataset");
        let html = format_table(&dataset, "");

        prop_assert_eq!(html.matches("<tr").count(), dataset.row_count() + 1);
        prop_assert_eq!(html.matches("<td>").count(), dataset.row_count() * 3);
        prop_assert!(!html.contains("<td><"));
    }
}
