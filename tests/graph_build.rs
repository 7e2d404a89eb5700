//! Integration tests for the flow-graph builder.

mod helpers;

use helpers::*;
use serde_json::json;
use zis_bundle::graph::{DEFAULT_BRANCH, NodeType, StatePath};
use zis_bundle::parse::{Bundle, parse_bundle};
use zis_bundle::{
    GraphError, GraphOptions, build_bundle_graphs, build_graph, build_graph_with, validate_bundle,
};

fn edge(path: &StatePath) -> (&str, &str, Option<i64>) {
    (
        path.source().name.as_str(),
        path.target().name.as_str(),
        path.source().branch_id,
    )
}

fn edges(paths: &[StatePath]) -> Vec<(&str, &str, Option<i64>)> {
    paths.iter().map(edge).collect()
}

#[test]
fn choice_default_branch_comes_first() {
    let def = definition(
        "Check",
        json!({
            "Check": {
                "Type": "Choice",
                "Choices": [{ "Variable": "$.x", "StringEquals": "a", "Next": "A" }],
                "Default": "B"
            },
            "A": succeed(),
            "B": succeed()
        }),
    );
    let paths = build_graph(&def).expect("graph");
    insta::assert_json_snapshot!(paths, @r#"
    [
      [
        {
          "name": "Check",
          "type": "Choice",
          "branchId": -1,
          "childPaths": [
            [
              {
                "name": "B",
                "type": "Succeed"
              },
              {
                "name": "End",
                "type": "End"
              }
            ]
          ]
        },
        {
          "name": "B",
          "type": "Succeed"
        }
      ],
      [
        {
          "name": "Check",
          "type": "Choice",
          "branchId": 0,
          "childPaths": [
            [
              {
                "name": "A",
                "type": "Succeed"
              },
              {
                "name": "End",
                "type": "End"
              }
            ]
          ]
        },
        {
          "name": "A",
          "type": "Succeed"
        }
      ]
    ]
    "#);
}

#[test]
fn map_iterator_edges_appear_once_as_child_paths() {
    let def = definition(
        "Iterate",
        json!({
            "Iterate": {
                "Type": "Map",
                "ItemsPath": "$.items",
                "Iterator": {
                    "StartAt": "Inner",
                    "States": {
                        "Inner": { "Type": "Pass", "ResultPath": "$.x", "End": true }
                    }
                },
                "ResultPath": "$.results",
                "Next": "Done"
            },
            "Done": succeed()
        }),
    );
    let paths = build_graph(&def).expect("graph");
    assert_eq!(
        edges(&paths),
        vec![("Iterate", "Done", None), ("Done", "End", None)]
    );

    let children = paths[0].source().child_paths.as_ref().expect("iterator edges");
    assert_eq!(edges(children), vec![("Inner", "End", None)]);
    assert_eq!(paths[0].target().node_type, NodeType::Succeed);
}

#[test]
fn catch_targets_become_branches() {
    let def = definition(
        "Work",
        json!({
            "Work": {
                "Type": "Action",
                "ActionName": "zis:crm:action:sync",
                "ResultPath": "$.sync",
                "Next": "Done",
                "Catch": [{ "ErrorEquals": ["States.ALL"], "Next": "Recover" }]
            },
            "Recover": { "Type": "Pass", "ResultPath": "$.recovered", "End": true },
            "Done": succeed()
        }),
    );
    let paths = build_graph(&def).expect("graph");
    assert_eq!(
        edges(&paths),
        vec![
            ("Work", "Done", None),
            ("Work", "Recover", Some(0)),
            ("Done", "End", None),
        ]
    );
    assert_eq!(paths[1].target().node_type, NodeType::Pass);
    let recovery = paths[1].source().child_paths.as_ref().expect("branch edges");
    assert_eq!(edges(recovery), vec![("Recover", "End", None)]);
}

#[test]
fn end_states_point_at_the_end_node() {
    let def = definition(
        "Keep",
        json!({
            "Keep": { "Type": "Pass", "ResultPath": "$.kept", "End": true },
            "Unreached": { "Type": "Fail", "Error": "E", "Cause": "C" }
        }),
    );
    let paths = build_graph(&def).expect("graph");
    assert_eq!(edges(&paths), vec![("Keep", "End", None)]);
    assert_eq!(paths[0].target().node_type, NodeType::End);
}

#[test]
fn fixture_flow_graph() {
    let bundle = parse_bundle(TICKET_SYNC).expect("fixture");
    let graphs = build_bundle_graphs(&bundle).expect("graphs");
    assert_eq!(graphs.len(), 1);
    assert_eq!(graphs[0].flow_name, "sync_ticket");

    let paths = &graphs[0].paths;
    assert_eq!(
        edges(paths),
        vec![
            ("LoadSettings", "Enabled?", None),
            ("Enabled?", "Skipped", Some(DEFAULT_BRANCH)),
            ("Enabled?", "NotifyRecipients", Some(0)),
        ]
    );

    let enabled = paths[2].source().child_paths.as_ref().expect("branch edges");
    assert_eq!(
        edges(enabled),
        vec![
            ("NotifyRecipients", "ShapePayload", None),
            ("ShapePayload", "Pause", None),
            ("ShapePayload", "Failed", Some(0)),
            ("Pause", "Done", None),
            ("Done", "End", None),
        ]
    );
    let iterator = enabled[0].source().child_paths.as_ref().expect("iterator edges");
    assert_eq!(edges(iterator), vec![("PostMessage", "End", None)]);
}

#[test]
fn building_twice_gives_identical_edges() {
    let bundle = parse_bundle(TICKET_SYNC).expect("fixture");
    assert_eq!(
        build_bundle_graphs(&bundle).expect("first"),
        build_bundle_graphs(&bundle).expect("second")
    );
}

#[test]
fn cyclic_flow_is_rejected() {
    let def = definition(
        "A",
        json!({
            "A": { "Type": "Pass", "ResultPath": "$.a", "Next": "B" },
            "B": { "Type": "Pass", "ResultPath": "$.b", "Next": "A" }
        }),
    );
    assert!(matches!(build_graph(&def), Err(GraphError::CycleDetected(_))));
}

#[test]
fn dangling_next_is_rejected() {
    let def = definition(
        "A",
        json!({ "A": { "Type": "Pass", "ResultPath": "$.a", "Next": "Nowhere" } }),
    );
    assert_eq!(
        build_graph(&def),
        Err(GraphError::UnknownState {
            from: "A".to_string(),
            target: "Nowhere".to_string()
        })
    );
}

#[test]
fn missing_transition_is_rejected() {
    let def = definition("A", json!({ "A": { "Type": "Pass", "ResultPath": "$.a" } }));
    assert_eq!(
        build_graph(&def),
        Err(GraphError::MissingTransition("A".to_string()))
    );
}

#[test]
fn nesting_beyond_max_depth_is_rejected() {
    let def = definition(
        "Outer",
        json!({
            "Outer": {
                "Type": "Map",
                "ItemsPath": "$.groups",
                "Iterator": {
                    "StartAt": "Middle",
                    "States": {
                        "Middle": {
                            "Type": "Map",
                            "ItemsPath": "$.items",
                            "Iterator": {
                                "StartAt": "Leaf",
                                "States": { "Leaf": succeed() }
                            },
                            "ResultPath": "$.items",
                            "End": true
                        }
                    }
                },
                "ResultPath": "$.groups",
                "End": true
            }
        }),
    );
    assert!(build_graph(&def).is_ok());
    assert_eq!(
        build_graph_with(&def, &GraphOptions { max_depth: 1, ..GraphOptions::default() }),
        Err(GraphError::DepthExceeded(1))
    );
}

/// Validates `bundle`, then builds its graphs from the typed model.
fn validated_graphs(bundle: &serde_json::Value) -> Result<Vec<StatePath>, GraphError> {
    let report = validate_bundle(bundle);
    assert!(report.valid, "unexpected errors: {:?}", report.errors);
    let typed = Bundle::from_value(bundle).expect("valid bundle deserializes");
    let mut graphs = build_bundle_graphs(&typed)?;
    Ok(graphs.remove(0).paths)
}

#[test]
fn loop_among_unreachable_states_does_not_block_the_graph() {
    let bundle = bundle_with_states(json!({
        "Start": { "Type": "Pass", "ResultPath": "$.a", "Next": "Done" },
        "Done": succeed(),
        "OrphanA": { "Type": "Pass", "ResultPath": "$.b", "Next": "OrphanB" },
        "OrphanB": { "Type": "Pass", "ResultPath": "$.c", "Next": "OrphanA" }
    }));
    let paths = validated_graphs(&bundle).expect("graph");
    assert_eq!(
        edges(&paths),
        vec![("Start", "Done", None), ("Done", "End", None)]
    );
}

#[test]
fn map_catch_back_to_an_earlier_state_is_not_walked() {
    let bundle = bundle_with_states(json!({
        "Prep": { "Type": "Pass", "ResultPath": "$.prep", "Next": "Iterate" },
        "Iterate": {
            "Type": "Map",
            "ItemsPath": "$.items",
            "Iterator": {
                "StartAt": "Inner",
                "States": { "Inner": { "Type": "Pass", "ResultPath": "$.x", "End": true } }
            },
            "ResultPath": "$.results",
            "Next": "Done",
            "Catch": [{ "Next": "Prep" }]
        },
        "Done": succeed()
    }));
    let paths = validated_graphs(&bundle).expect("graph");
    assert_eq!(
        edges(&paths),
        vec![
            ("Prep", "Iterate", None),
            ("Iterate", "Done", None),
            ("Done", "End", None),
        ]
    );
}

#[test]
fn catch_on_an_ending_state_is_not_walked() {
    let bundle = bundle_with_states(json!({
        "Work": {
            "Type": "Action",
            "ActionName": "zis:crm:action:sync",
            "ResultPath": "$.sync",
            "End": true,
            "Catch": [{ "Next": "Work" }]
        }
    }));
    let paths = validated_graphs(&bundle).expect("graph");
    assert_eq!(edges(&paths), vec![("Work", "End", None)]);
}

#[test]
fn converging_choices_are_bounded_by_the_edge_budget() {
    let def = definition(
        "First",
        json!({
            "First": {
                "Type": "Choice",
                "Choices": [{ "Variable": "$.a", "IsPresent": true, "Next": "Second" }],
                "Default": "Second"
            },
            "Second": {
                "Type": "Choice",
                "Choices": [{ "Variable": "$.b", "IsPresent": true, "Next": "Done" }],
                "Default": "Done"
            },
            "Done": succeed()
        }),
    );
    // Each of First's two branches re-walks Second's two branches.
    let paths = build_graph(&def).expect("graph");
    assert_eq!(paths.len(), 2);

    let tight = GraphOptions { max_paths: 4, ..GraphOptions::default() };
    assert_eq!(
        build_graph_with(&def, &tight),
        Err(GraphError::PathLimitExceeded(4))
    );
}
