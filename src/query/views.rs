// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Thalassa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thalassa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Derived views over the filtered record set.
//!
//! All derivations are pure: they take the filtered records (plus the
//! selection where direction matters) and build fresh view objects. Ordering
//! is fully deterministic; ties are broken by code so equal weights cannot
//! reshuffle between recomputations.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use tracing::debug;

use super::filter::filter_records;
use crate::model::{
    FlowMode, FlowSnapshot, Link, NodeTotal, Record, SelectionState, TimeSeriesPoint,
};
use crate::store::Dataset;

/// Collapses the filtered records onto (source, target) pairs.
///
/// Returns the full per-link list sorted by weight descending (ties by
/// source, then target code) with `link-<index>` ids already assigned;
/// truncation happens in [`derive_snapshot`] so the pre-truncation count
/// stays observable.
pub fn aggregate_by_link(filtered: &[&Record]) -> Vec<Link> {
    let mut grouped: BTreeMap<(&str, &str), Link> = BTreeMap::new();
    for record in filtered {
        let key = (record.source().as_str(), record.target().as_str());
        grouped
            .entry(key)
            .and_modify(|link| link.weight += record.weight())
            .or_insert_with(|| Link {
                id: String::new(),
                source: record.source().as_str().to_owned(),
                target: record.target().as_str().to_owned(),
                source_name: record.source_name().map(str::to_owned),
                target_name: record.target_name().map(str::to_owned),
                weight: record.weight(),
                directed: !record.is_self_link(),
            });
    }

    let mut links: Vec<Link> = grouped.into_values().collect();
    links.sort_by(|a, b| {
        b.weight
            .total_cmp(&a.weight)
            .then_with(|| a.source.cmp(&b.source))
            .then_with(|| a.target.cmp(&b.target))
    });

    let mut buffer = itoa::Buffer::new();
    for (index, link) in links.iter_mut().enumerate() {
        let mut id = String::with_capacity(12);
        id.push_str("link-");
        id.push_str(buffer.format(index));
        link.id = id;
    }
    links
}

/// Per-node totals over the filtered (pre-truncation) set.
///
/// `weight_out` sums by source, `weight_in` by target; the outer join keeps
/// nodes that appear on only one side with a `0.0` on the other. Sorted
/// descending by the flow-mode column, ties by code.
pub fn aggregate_by_node(filtered: &[&Record], flow_mode: FlowMode) -> Vec<NodeTotal> {
    let mut totals: BTreeMap<&str, NodeTotal> = BTreeMap::new();

    for record in filtered {
        let out_entry = totals
            .entry(record.source().as_str())
            .or_insert_with(|| NodeTotal {
                country_code: record.source().as_str().to_owned(),
                country_name: record.source_name().map(str::to_owned),
                weight_in: 0.0,
                weight_out: 0.0,
            });
        out_entry.weight_out += record.weight();

        let in_entry = totals
            .entry(record.target().as_str())
            .or_insert_with(|| NodeTotal {
                country_code: record.target().as_str().to_owned(),
                country_name: record.target_name().map(str::to_owned),
                weight_in: 0.0,
                weight_out: 0.0,
            });
        in_entry.weight_in += record.weight();
    }

    let mut totals: Vec<NodeTotal> = totals.into_values().collect();
    totals.sort_by(|a, b| {
        flow_weight(b, flow_mode)
            .total_cmp(&flow_weight(a, flow_mode))
            .then_with(|| a.country_code.cmp(&b.country_code))
    });
    totals
}

/// The column a color scale reads for the current flow mode.
pub fn flow_weight(total: &NodeTotal, flow_mode: FlowMode) -> f64 {
    match flow_mode {
        FlowMode::Inflow => total.weight_in,
        FlowMode::Outflow | FlowMode::SelfFlow => total.weight_out,
    }
}

/// Per-node-per-year totals, most recent year first.
///
/// The node is the record's source for outflow/self and the target for
/// inflow. Records without a year do not contribute.
pub fn time_series(filtered: &[&Record], flow_mode: FlowMode) -> Vec<TimeSeriesPoint> {
    let mut grouped: BTreeMap<(&str, i32), TimeSeriesPoint> = BTreeMap::new();
    for record in filtered {
        let Some(year) = record.year() else {
            continue;
        };
        let (code, name) = match flow_mode {
            FlowMode::Inflow => (record.target(), record.target_name()),
            FlowMode::Outflow | FlowMode::SelfFlow => (record.source(), record.source_name()),
        };
        grouped
            .entry((code.as_str(), year))
            .and_modify(|point| point.weight += record.weight())
            .or_insert_with(|| TimeSeriesPoint {
                country_code: code.as_str().to_owned(),
                country_name: name.map(str::to_owned),
                year,
                weight: record.weight(),
            });
    }

    let mut points: Vec<TimeSeriesPoint> = grouped.into_values().collect();
    points.sort_by(|a, b| {
        b.year
            .cmp(&a.year)
            .then_with(|| a.country_code.cmp(&b.country_code))
    });
    points
}

/// Runs the whole derivation: filter → by-link (top-N truncated) → by-node →
/// time series, assembled into the renderer's snapshot.
pub fn derive_snapshot(dataset: &Dataset, selection: &SelectionState) -> FlowSnapshot {
    let filtered = filter_records(dataset, selection);
    if filtered.is_empty() {
        return FlowSnapshot::empty();
    }
    let flow_mode = selection.flow_mode();

    let mut links = aggregate_by_link(&filtered);
    let link_count_after_filtering = links.len();
    links.truncate(selection.top_n().effective(link_count_after_filtering));

    // Sorted descending, so the bounds sit at the ends.
    let max_link_weight = links.first().map(|link| link.weight).unwrap_or(0.0);
    let min_link_weight = links.last().map(|link| link.weight).unwrap_or(0.0);

    let totals = aggregate_by_node(&filtered, flow_mode);
    let max_total_weight = totals
        .first()
        .map(|total| flow_weight(total, flow_mode))
        .unwrap_or(0.0);
    let min_total_weight = totals
        .last()
        .map(|total| flow_weight(total, flow_mode))
        .unwrap_or(0.0);

    let mut nodes: Vec<String> = Vec::new();
    {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        for link in &links {
            if seen.insert(&link.source) {
                nodes.push(link.source.clone());
            }
            if seen.insert(&link.target) {
                nodes.push(link.target.clone());
            }
        }
    }

    debug!(
        links = links.len(),
        link_count_after_filtering,
        min_link_weight,
        max_link_weight,
        "derived snapshot"
    );

    FlowSnapshot {
        links,
        nodes,
        totals,
        time_series: time_series(&filtered, flow_mode),
        min_link_weight,
        max_link_weight,
        min_total_weight,
        max_total_weight,
        link_count_after_filtering,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use serde_json::Value;

    use super::{aggregate_by_link, aggregate_by_node, derive_snapshot, time_series};
    use crate::format::rows::Row;
    use crate::geo::StaticLocations;
    use crate::model::fixtures::demo_dataset;
    use crate::model::{FlowMode, LocationCode, Record};
    use crate::query::filter::filter_records;
    use crate::store::Dataset;

    fn row(source: &str, target: &str, weight: f64, product: &str) -> Row {
        Row::from([
            ("source".to_owned(), Value::from(source)),
            ("target".to_owned(), Value::from(target)),
            ("weight".to_owned(), Value::from(weight)),
            ("product".to_owned(), Value::from(product)),
        ])
    }

    fn dataset(rows: Vec<Row>) -> Dataset {
        Dataset::from_rows(rows, &StaticLocations::default()).expect("dataset")
    }

    fn filtered_all(dataset: &Dataset) -> Vec<&Record> {
        let selection = dataset.default_selection();
        filter_records(dataset, &selection)
    }

    #[test]
    fn by_link_collapses_categories_and_sorts_descending() {
        let dataset = dataset(vec![
            row("A", "B", 10.0, "tea"),
            row("A", "B", 5.0, "coffee"),
            row("B", "C", 40.0, "tea"),
        ]);
        let filtered = filtered_all(&dataset);
        let links = aggregate_by_link(&filtered);

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].id, "link-0");
        assert_eq!((links[0].source.as_str(), links[0].weight), ("B", 40.0));
        assert_eq!(links[1].id, "link-1");
        assert_eq!((links[1].source.as_str(), links[1].weight), ("A", 15.0));
        assert!(links.iter().all(|link| link.directed));
    }

    #[test]
    fn by_link_breaks_weight_ties_by_code() {
        let dataset = dataset(vec![
            row("C", "D", 10.0, "tea"),
            row("A", "B", 10.0, "tea"),
        ]);
        let filtered = filtered_all(&dataset);
        let links = aggregate_by_link(&filtered);
        assert_eq!(links[0].source, "A");
        assert_eq!(links[1].source, "C");
    }

    #[test]
    fn by_node_outer_joins_and_zero_fills_the_missing_side() {
        let dataset = dataset(vec![row("A", "B", 10.0, "tea"), row("B", "C", 5.0, "tea")]);
        let filtered = filtered_all(&dataset);
        let totals = aggregate_by_node(&filtered, FlowMode::Outflow);

        let a = totals.iter().find(|t| t.country_code == "A").expect("A");
        assert_eq!((a.weight_in, a.weight_out), (0.0, 10.0));
        let b = totals.iter().find(|t| t.country_code == "B").expect("B");
        assert_eq!((b.weight_in, b.weight_out), (10.0, 5.0));
        let c = totals.iter().find(|t| t.country_code == "C").expect("C");
        assert_eq!((c.weight_in, c.weight_out), (5.0, 0.0));

        // Sorted by weight_out descending in outflow mode.
        let codes: Vec<&str> = totals.iter().map(|t| t.country_code.as_str()).collect();
        assert_eq!(codes, ["A", "B", "C"]);
    }

    #[test]
    fn time_series_groups_by_direction_node_and_sorts_years_descending() {
        let dataset = demo_dataset();
        let selection = dataset.default_selection();
        let filtered = filter_records(&dataset, &selection);

        let outgoing = time_series(&filtered, FlowMode::Outflow);
        assert!(outgoing.windows(2).all(|pair| pair[0].year >= pair[1].year));
        let nl_2020: f64 = outgoing
            .iter()
            .filter(|point| point.country_code == "NL" && point.year == 2020)
            .map(|point| point.weight)
            .sum();
        // NL->BE tulips 120 + NL->DE tulips 200.
        assert_eq!(nl_2020, 320.0);

        let incoming = time_series(&filtered, FlowMode::Inflow);
        let nl_in_2021: f64 = incoming
            .iter()
            .filter(|point| point.country_code == "NL" && point.year == 2021)
            .map(|point| point.weight)
            .sum();
        // BE->NL is 2020, so 2021 inflow is US machines 150 + AU wool 30.
        assert_eq!(nl_in_2021, 180.0);
    }

    #[test]
    fn snapshot_truncates_links_and_takes_bounds_from_the_visible_list() {
        let dataset = dataset(vec![
            row("A", "B", 40.0, "tea"),
            row("B", "C", 30.0, "tea"),
            row("C", "D", 20.0, "tea"),
            row("D", "A", 10.0, "tea"),
        ]);
        let mut selection = dataset.default_selection();
        selection.top_n_mut().set(2, 4);

        let snapshot = derive_snapshot(&dataset, &selection);
        assert_eq!(snapshot.link_count_after_filtering, 4);
        assert_eq!(snapshot.links.len(), 2);
        assert_eq!(snapshot.max_link_weight, 40.0);
        assert_eq!(snapshot.min_link_weight, 30.0);
    }

    #[test]
    fn snapshot_nodes_cover_only_links_that_survive_truncation() {
        let dataset = dataset(vec![
            row("A", "B", 40.0, "tea"),
            row("C", "D", 1.0, "tea"),
        ]);
        let mut selection = dataset.default_selection();
        selection.top_n_mut().set(1, 2);

        let snapshot = derive_snapshot(&dataset, &selection);
        assert_eq!(snapshot.nodes, ["A", "B"]);
        // Totals still cover the whole filtered set.
        assert_eq!(snapshot.totals.len(), 4);
    }

    #[test]
    fn snapshot_total_bounds_follow_the_flow_mode_column() {
        let dataset = dataset(vec![row("A", "B", 10.0, "tea"), row("B", "C", 5.0, "tea")]);

        let mut selection = dataset.default_selection();
        selection.set_flow_mode(FlowMode::Outflow);
        let outflow = derive_snapshot(&dataset, &selection);
        assert_eq!(outflow.max_total_weight, 10.0);
        assert_eq!(outflow.min_total_weight, 0.0);

        selection.set_flow_mode(FlowMode::Inflow);
        let inflow = derive_snapshot(&dataset, &selection);
        assert_eq!(inflow.max_total_weight, 10.0);
        assert_eq!(inflow.min_total_weight, 0.0);
    }

    #[test]
    fn self_links_never_reach_cross_link_totals() {
        let dataset = dataset(vec![row("A", "A", 7.0, "tea"), row("A", "B", 3.0, "tea")]);
        let selection = dataset.default_selection();

        let snapshot = derive_snapshot(&dataset, &selection);
        let a = snapshot
            .totals
            .iter()
            .find(|total| total.country_code == "A")
            .expect("A total");
        assert_eq!(a.weight_out, 3.0, "self weight must not leak into outflow");

        let mut self_selection = dataset.default_selection();
        self_selection.set_flow_mode(FlowMode::SelfFlow);
        let self_snapshot = derive_snapshot(&dataset, &self_selection);
        assert_eq!(self_snapshot.links.len(), 1);
        assert!(!self_snapshot.links[0].directed);
        assert_eq!(self_snapshot.links[0].weight, 7.0);
    }

    #[test]
    fn empty_filter_result_yields_the_empty_snapshot_with_zero_sentinels() {
        let dataset = demo_dataset();
        let mut selection = dataset.default_selection();
        selection.set_sources(BTreeSet::new());

        let snapshot = derive_snapshot(&dataset, &selection);
        assert!(snapshot.links.is_empty());
        assert!(snapshot.nodes.is_empty());
        assert_eq!(snapshot.min_link_weight, 0.0);
        assert_eq!(snapshot.max_total_weight, 0.0);
        assert_eq!(snapshot.link_count_after_filtering, 0);
    }

    #[test]
    fn sticky_top_n_follows_the_filtered_set_across_mutations() {
        let dataset = demo_dataset();
        let mut selection = dataset.default_selection();

        let full = derive_snapshot(&dataset, &selection);
        let full_count = full.link_count_after_filtering;
        assert!(full_count > 1);

        // Stick to the current maximum, then narrow the selection.
        selection.top_n_mut().set(full_count, full_count);
        selection.set_sources(BTreeSet::from([LocationCode::new("NL").expect("code")]));

        let narrowed = derive_snapshot(&dataset, &selection);
        assert!(narrowed.link_count_after_filtering < full_count);
        assert_eq!(
            narrowed.links.len(),
            narrowed.link_count_after_filtering,
            "sticky selector keeps tracking the shrunken maximum"
        );
    }
}
