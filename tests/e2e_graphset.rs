//! End-to-end tests for the graphset aggregate: visibility queries, extents,
//! parallel-edge detection, tag and exclusion overlays, snapshot refresh.

use pretty_assertions::assert_eq;

use graphscene::{
    Edge, EdgeIndicator, EntityId, Exclusion, ExclusionPatch, GraphSnapshot, Graphset, Point3,
    Property, TagPatch, Vertex, VERTEX_RADIUS,
};

fn id(s: &str) -> EntityId {
    EntityId::from(s)
}

fn sample_snapshot() -> GraphSnapshot {
    GraphSnapshot {
        vertices: vec![
            Vertex::new("Q1", "first", Point3::new(0.0, 0.0, 0.0)),
            Vertex::new("Q2", "second", Point3::new(10.0, 5.0, -3.0)),
            Vertex::new("Q3", "third", Point3::new(40.0, -20.0, 12.0)),
        ],
        edges: vec![
            Edge::new("Q1", "Q2", "P1", "s-100"),
            Edge::new("Q2", "Q3", "P2", "s-200"),
        ],
        properties: vec![
            Property::new("P1", "relates to"),
            Property::new("P2", "part of"),
        ],
    }
}

fn sample_graph() -> Graphset {
    let mut graph = Graphset::new();
    graph.replace(sample_snapshot());
    graph
}

// ============================================================================
// 1. Visible subset: hidden/excluded combinations
// ============================================================================

#[test]
fn test_visible_subset_excludes_hidden_and_excluded() {
    // neither flag: visible
    let graph = sample_graph();
    assert_eq!(graph.vertices_by_ids(&[id("Q1")]).len(), 1);

    // vertex hidden flag: not visible
    let mut graph = sample_graph();
    graph.set_vertex_hidden(&id("Q1"), true);
    assert!(graph.vertices_by_ids(&[id("Q1")]).is_empty());

    // exclusion record: not visible
    let mut graph = sample_graph();
    graph.create_exclusion(Exclusion::new("Q1")).unwrap();
    assert!(graph.vertices_by_ids(&[id("Q1")]).is_empty());

    // both: still not visible
    let mut graph = sample_graph();
    graph.set_vertex_hidden(&id("Q1"), true);
    graph.create_exclusion(Exclusion::new("Q1")).unwrap();
    assert!(graph.vertices_by_ids(&[id("Q1")]).is_empty());
}

#[test]
fn test_soft_exclusion_dims_without_removing() {
    let mut graph = sample_graph();
    graph
        .create_exclusion(Exclusion::hidden_only("Q2"))
        .unwrap();

    // still part of the visible subset, but flagged for dimmed rendering
    assert_eq!(graph.vertices_by_ids(&[id("Q2")]).len(), 1);
    assert!(graph.entity_is_dimmed(&id("Q2")));
    assert!(!graph.vertex_is_excluded(graph.vertex(&id("Q2")).unwrap()));
}

#[test]
fn test_visible_vertices_matches_by_ids_filter() {
    let mut graph = sample_graph();
    graph.set_vertex_hidden(&id("Q3"), true);
    let visible: Vec<_> = graph.visible_vertices().map(|v| v.id.clone()).collect();
    assert_eq!(visible, vec![id("Q1"), id("Q2")]);
}

// ============================================================================
// 2. Structural queries: related edges, alternate endpoint
// ============================================================================

#[test]
fn test_related_edges_in_input_order() {
    let graph = sample_graph();
    let q2 = graph.vertex(&id("Q2")).unwrap();
    let related = graph.related_edges(q2);
    let statements: Vec<_> = related.iter().map(|e| e.statement_id.as_str()).collect();
    assert_eq!(statements, vec!["s-100", "s-200"]);
}

#[test]
fn test_alternate_vertex_both_directions() {
    let graph = sample_graph();
    let q1 = graph.vertex(&id("Q1")).unwrap();
    let q2 = graph.vertex(&id("Q2")).unwrap();
    let edge = &graph.edges()[0];

    assert_eq!(graph.alternate_vertex(edge, q1).unwrap().id, id("Q2"));
    assert_eq!(graph.alternate_vertex(edge, q2).unwrap().id, id("Q1"));
}

#[test]
fn test_dangling_edge_endpoint_resolves_to_none() {
    let mut graph = Graphset::new();
    graph.replace(GraphSnapshot {
        vertices: vec![Vertex::new("Q1", "only", Point3::ORIGIN)],
        edges: vec![Edge::new("Q1", "Q404", "P1", "s-1")],
        properties: vec![Property::new("P1", "relates to")],
    });
    let q1 = graph.vertex(&id("Q1")).unwrap();
    let edge = &graph.edges()[0];

    // the edge is listed, but its far endpoint is not loaded yet
    assert_eq!(graph.related_edges(q1).len(), 1);
    assert!(graph.alternate_vertex(edge, q1).is_none());
    assert!(graph.edge_indicator(edge, q1).is_none());
}

// ============================================================================
// 3. Parallel (bidirectional) edge pairs
// ============================================================================

#[test]
fn test_parallel_pair_detected_both_ways() {
    let e1 = Edge::new("Q1", "Q2", "P1", "s-1");
    let e2 = Edge::new("Q2", "Q1", "P1", "s-2");
    let candidates = [&e2];
    assert_eq!(e1.parallel_in(&candidates), Some(&e2));
    let candidates = [&e1];
    assert_eq!(e2.parallel_in(&candidates), Some(&e1));
}

#[test]
fn test_no_parallel_without_counterpart() {
    let e1 = Edge::new("Q1", "Q2", "P1", "s-1");
    let same_direction = Edge::new("Q1", "Q2", "P1", "s-2");
    let swapped_other_property = Edge::new("Q2", "Q1", "P9", "s-3");
    let candidates = [&same_direction, &swapped_other_property];
    assert_eq!(e1.parallel_in(&candidates), None);
}

#[test]
fn test_indicator_draws_exactly_one_of_parallel_pair() {
    let mut graph = Graphset::new();
    graph.replace(GraphSnapshot {
        vertices: vec![
            Vertex::new("Q1", "a", Point3::ORIGIN),
            Vertex::new("Q2", "b", Point3::new(50.0, 0.0, 0.0)),
        ],
        edges: vec![
            Edge::new("Q1", "Q2", "P1", "s-22"),
            Edge::new("Q2", "Q1", "P1", "s-11"),
        ],
        properties: vec![Property::new("P1", "relates to")],
    });
    let q1 = graph.vertex(&id("Q1")).unwrap();
    let forward = &graph.edges()[0];
    let backward = &graph.edges()[1];

    // the lexicographically smaller statement id draws as bidirectional,
    // its counterpart is skipped
    assert_eq!(graph.edge_indicator(forward, q1), None);
    assert_eq!(
        graph.edge_indicator(backward, q1),
        Some(EdgeIndicator::Bidirectional)
    );
}

#[test]
fn test_indicator_skips_excluded_property() {
    let mut graph = sample_graph();
    graph.create_exclusion(Exclusion::new("P1")).unwrap();
    let q1 = graph.vertex(&id("Q1")).unwrap();
    let edge = &graph.edges()[0];
    assert!(graph.property_is_excluded(&id("P1")));
    assert_eq!(graph.edge_indicator(edge, q1), None);
}

// ============================================================================
// 4. Bounding extents
// ============================================================================

#[test]
fn test_extents_known_values() {
    let mut graph = Graphset::new();
    graph.replace(GraphSnapshot {
        vertices: vec![
            Vertex::new("Q1", "a", Point3::new(0.0, 0.0, 0.0)),
            Vertex::new("Q2", "b", Point3::new(10.0, 5.0, -3.0)),
        ],
        ..GraphSnapshot::default()
    });

    let extents = graph.extents_of(None);
    assert_eq!(extents.x.min, 0.0);
    assert_eq!(extents.x.max, 10.0);
    assert_eq!(extents.x.diff, 10.0 + VERTEX_RADIUS);
    assert_eq!(extents.y.diff, 5.0 + VERTEX_RADIUS);
    assert_eq!(extents.z.diff, 3.0 + VERTEX_RADIUS);
}

#[test]
fn test_extents_empty_set_degenerates() {
    let graph = Graphset::new();
    let extents = graph.extents_of(None);
    assert!(extents.is_empty());
    assert_eq!(extents.x.min, f32::INFINITY);
    assert_eq!(extents.x.max, f32::NEG_INFINITY);
    assert_eq!(extents.x.diff, 0.0);
    assert_eq!(extents.y.diff, 0.0);
    assert_eq!(extents.z.diff, 0.0);
}

#[test]
fn test_extents_restricted_to_subset() {
    let graph = sample_graph();
    let extents = graph.extents_of(Some(&[id("Q1"), id("Q2")]));
    assert_eq!(extents.x.max, 10.0);

    // an empty restriction means the whole set, matching the full query
    let full = graph.extents_of(Some(&[]));
    assert_eq!(full, graph.extents_of(None));
}

#[test]
fn test_single_vertex_box_never_zero_volume() {
    let mut graph = Graphset::new();
    graph.replace(GraphSnapshot {
        vertices: vec![Vertex::new("Q1", "solo", Point3::new(7.0, 7.0, 7.0))],
        ..GraphSnapshot::default()
    });
    let extents = graph.extents_of(None);
    assert_eq!(extents.x.diff, VERTEX_RADIUS);
    assert_eq!(extents.y.diff, VERTEX_RADIUS);
    assert_eq!(extents.z.diff, VERTEX_RADIUS);
}

// ============================================================================
// 5. Tags
// ============================================================================

#[test]
fn test_tag_keys_monotonic_and_never_reused() {
    let mut graph = sample_graph();
    let first = graph.create_tag("alpha", "#ff0000", vec![id("Q1")], "");
    let second = graph.create_tag("beta", "#00ff00", vec![id("Q2")], "");
    assert!(second > first);

    // deleting the highest tag must not surrender its key
    assert!(graph.delete_tag(second));
    let third = graph.create_tag("gamma", "#0000ff", vec![], "");
    assert!(third > second);
}

#[test]
fn test_update_tag_merge_patch() {
    let mut graph = sample_graph();
    let key = graph.create_tag("alpha", "#ff0000", vec![id("Q1")], "old notes");

    let patched = graph.update_tag(
        key,
        TagPatch {
            color: Some("#123456".into()),
            show_bounding_box: Some(true),
            ..TagPatch::default()
        },
    );
    assert!(patched);

    let tag = graph.tag(key).unwrap();
    assert_eq!(tag.color, "#123456");
    assert_eq!(tag.label, "alpha");
    assert_eq!(tag.notes, "old notes");
    assert!(tag.show_bounding_box);
    assert!(!tag.show_connecting_edges);
}

#[test]
fn test_delete_tag_leaves_vertices_untouched() {
    let mut graph = sample_graph();
    let key = graph.create_tag("group", "#fff", vec![id("Q1"), id("Q2")], "");
    assert_eq!(graph.tags_by_vertex(&id("Q1")).len(), 1);

    let before = graph.vertex(&id("Q1")).unwrap().clone();
    assert!(graph.delete_tag(key));
    assert!(graph.tags_by_vertex(&id("Q1")).is_empty());
    assert!(graph.tags_by_vertex(&id("Q2")).is_empty());
    assert_eq!(graph.vertex(&id("Q1")).unwrap(), &before);

    // deleting again reports nothing removed
    assert!(!graph.delete_tag(key));
}

#[test]
fn test_vertex_in_multiple_tags() {
    let mut graph = sample_graph();
    let a = graph.create_tag("a", "#111", vec![id("Q1")], "");
    let b = graph.create_tag("b", "#222", vec![id("Q1"), id("Q3")], "");
    let keys: Vec<_> = graph
        .tags_by_vertex(&id("Q1"))
        .iter()
        .map(|t| t.key)
        .collect();
    assert_eq!(keys, vec![a, b]);
}

#[test]
fn test_add_vertex_to_tag_is_idempotent() {
    let mut graph = sample_graph();
    let key = graph.create_tag("group", "#fff", vec![id("Q1")], "");

    assert!(graph.add_vertex_to_tag(&id("Q2"), key));
    assert!(!graph.add_vertex_to_tag(&id("Q2"), key));
    assert_eq!(graph.tag(key).unwrap().vertex_ids.len(), 2);
}

#[test]
fn test_tag_extents_over_members() {
    let mut graph = sample_graph();
    let key = graph.create_tag("pair", "#fff", vec![id("Q1"), id("Q2")], "");
    let extents = graph.tag_extents(key).unwrap();
    assert_eq!(extents.x.max, 10.0);

    // stale member ids do not resolve and contribute nothing
    graph.add_vertex_to_tag(&id("Q404"), key);
    assert_eq!(graph.tag_extents(key).unwrap(), extents);
}

#[test]
fn test_clear_tags() {
    let mut graph = sample_graph();
    graph.create_tag("a", "#111", vec![], "");
    graph.create_tag("b", "#222", vec![], "");
    graph.clear_tags();
    assert!(graph.tags().is_empty());
}

// ============================================================================
// 6. Exclusions
// ============================================================================

#[test]
fn test_duplicate_exclusion_rejected_without_mutation() {
    let mut graph = sample_graph();
    graph
        .create_exclusion(Exclusion::new("Q1").with_notes("first"))
        .unwrap();

    let err = graph
        .create_exclusion(Exclusion::new("Q1").with_notes("second"))
        .unwrap_err();
    assert!(err.to_string().contains("Q1"));

    // the original record is untouched
    let record = graph.exclusion(&id("Q1")).unwrap();
    assert_eq!(record.notes, "first");
    assert_eq!(graph.exclusions().len(), 1);
}

#[test]
fn test_update_and_delete_exclusion() {
    let mut graph = sample_graph();
    graph.create_exclusion(Exclusion::new("Q1")).unwrap();

    assert!(graph.update_exclusion(
        &id("Q1"),
        ExclusionPatch {
            excluded: Some(false),
            hidden: Some(true),
            ..ExclusionPatch::default()
        },
    ));
    // softened to a dim rule: the vertex is queryable again
    assert_eq!(graph.vertices_by_ids(&[id("Q1")]).len(), 1);
    assert!(graph.entity_is_dimmed(&id("Q1")));

    assert!(graph.delete_exclusion(&id("Q1")));
    assert!(graph.exclusion(&id("Q1")).is_none());
    assert!(!graph.delete_exclusion(&id("Q1")));

    // absent ids patch nothing
    assert!(!graph.update_exclusion(&id("Q404"), ExclusionPatch::default()));
}

#[test]
fn test_clear_exclusions_by_kind() {
    let mut graph = sample_graph();
    graph.create_exclusion(Exclusion::new("Q1")).unwrap();
    graph.create_exclusion(Exclusion::new("P1")).unwrap();
    graph.create_exclusion(Exclusion::new("X404")).unwrap();

    graph.clear_vertex_exclusions();
    assert!(graph.exclusion(&id("Q1")).is_none());
    assert!(graph.exclusion(&id("P1")).is_some());
    // unresolvable ids belong to neither kind and stay
    assert!(graph.exclusion(&id("X404")).is_some());

    graph.clear_property_exclusions();
    assert!(graph.exclusion(&id("P1")).is_none());
    assert!(graph.exclusion(&id("X404")).is_some());
}

// ============================================================================
// 7. Snapshot refresh
// ============================================================================

#[test]
fn test_replace_clears_selection_keeps_overlays() {
    let mut graph = sample_graph();
    graph.set_selected(Some(id("Q1")));
    graph.set_hovered(Some(id("Q2")));
    let tag_key = graph.create_tag("kept", "#fff", vec![id("Q1")], "");
    graph.create_exclusion(Exclusion::new("Q3")).unwrap();

    graph.replace(sample_snapshot());

    assert!(graph.selected_id().is_none());
    assert!(graph.hovered_id().is_none());
    assert!(graph.tag(tag_key).is_some());
    assert!(graph.exclusion(&id("Q3")).is_some());
}

#[test]
fn test_selection_carry_over_is_explicit() {
    let mut graph = sample_graph();
    graph.set_selected(Some(id("Q1")));
    let carried = graph.selected_id().cloned();

    graph.replace(sample_snapshot());
    graph.set_selected(carried);
    assert_eq!(graph.selected_vertex().unwrap().id, id("Q1"));
}

#[test]
fn test_selection_of_unloaded_vertex_resolves_to_none() {
    let mut graph = sample_graph();
    graph.set_selected(Some(id("Q404")));
    assert!(graph.selected_vertex().is_none());
    assert_eq!(graph.selected_id(), Some(&id("Q404")));
}

#[test]
fn test_replace_from_json() {
    let mut graph = Graphset::new();
    graph
        .replace_from_json(
            r#"{
                "vertices": [
                    {"id": "Q1", "label": "flat", "position": {"x": 1.0, "y": 2.0}}
                ],
                "edges": [],
                "properties": []
            }"#,
        )
        .unwrap();

    let vertex = graph.vertex(&id("Q1")).unwrap();
    // 2D payloads default the z coordinate
    assert_eq!(vertex.position, Point3::new(1.0, 2.0, 0.0));
    assert!(!vertex.locked);

    assert!(graph.replace_from_json("not json").is_err());
}

// ============================================================================
// 8. Property-based checks
// ============================================================================

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// A vertex is visible iff it is neither hidden nor excluded,
        /// across every flag combination.
        #[test]
        fn visibility_follows_flags(hidden: bool, excluded: bool) {
            let mut graph = Graphset::new();
            let mut vertex = Vertex::new("Q1", "v", Point3::ORIGIN);
            vertex.hidden = hidden;
            graph.replace(GraphSnapshot {
                vertices: vec![vertex],
                ..GraphSnapshot::default()
            });
            if excluded {
                graph.create_exclusion(Exclusion::new("Q1")).unwrap();
            }

            let visible = !graph.vertices_by_ids(&[EntityId::from("Q1")]).is_empty();
            prop_assert_eq!(visible, !hidden && !excluded);
        }

        /// Extents over any non-empty set satisfy min <= max and
        /// diff == max - min + radius on every axis.
        #[test]
        fn extents_are_consistent(
            positions in prop::collection::vec((-1e4f32..1e4, -1e4f32..1e4, -1e4f32..1e4), 1..24)
        ) {
            let vertices = positions
                .iter()
                .enumerate()
                .map(|(i, &(x, y, z))| {
                    Vertex::new(format!("Q{i}"), "v", Point3::new(x, y, z))
                })
                .collect();
            let mut graph = Graphset::new();
            graph.replace(GraphSnapshot { vertices, ..GraphSnapshot::default() });

            let extents = graph.extents_of(None);
            for axis in [extents.x, extents.y, extents.z] {
                prop_assert!(axis.min <= axis.max);
                prop_assert!((axis.diff - (axis.max - axis.min + VERTEX_RADIUS)).abs() < 1e-3);
            }
        }
    }
}
