//! Integration tests for the SessionCommand JSON protocol.
//!
//! Tests the full command pipeline: JSON string -> parse -> execute -> response.

use std::path::PathBuf;

use floorscale_gui_lib::command::{execute_json, execute_json_batch};
use floorscale_gui_lib::session::ToolSession;
use image::{DynamicImage, ImageFormat, RgbImage};

fn write_png(name: &str, width: u32, height: u32) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("floorscale-cmd-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    DynamicImage::ImageRgb8(RgbImage::new(width, height))
        .save_with_format(&path, ImageFormat::Png)
        .unwrap();
    path
}

const SQUARE_ROOM: &str = r#"[
    {"command": "attach", "width": 800, "height": 600},
    {"command": "add_point", "x": 100, "y": 100},
    {"command": "add_point", "x": 300, "y": 100},
    {"command": "add_point", "x": 300, "y": 300},
    {"command": "add_point", "x": 100, "y": 300},
    {"command": "add_point", "x": 104, "y": 96}
]"#;

#[test]
fn test_command_trace_and_close() {
    let mut s = ToolSession::new();
    let responses = execute_json_batch(&mut s, SQUARE_ROOM).unwrap();
    assert!(responses.iter().all(|r| r.success));
    assert_eq!(responses[5].data.as_ref().unwrap()["closed"], true);

    let resp = execute_json(&mut s, r#"{"command": "inspect"}"#).unwrap();
    let data = resp.data.unwrap();
    assert_eq!(data["state"], "closed");
    assert_eq!(data["points"].as_array().unwrap().len(), 4);
    assert_eq!(data["area"], 40000.0);
    assert_eq!(data["centroid"]["x"], 200.0);
}

#[test]
fn test_command_compute_scale_and_drag_grid() {
    let mut s = ToolSession::new();
    execute_json_batch(&mut s, SQUARE_ROOM).unwrap();

    let resp = execute_json(&mut s, r#"{"command": "compute_scale", "area": 4}"#).unwrap();
    assert!(resp.success);
    let data = resp.data.unwrap();
    assert_eq!(data["pixels_per_meter"], 100.0);
    assert_eq!(data["readout"], "1 meter = 100.00 pixels");

    let responses = execute_json_batch(
        &mut s,
        r#"[
            {"command": "begin_grid_drag", "x": 10, "y": 10},
            {"command": "drag_grid", "x": 40, "y": 30},
            {"command": "end_grid_drag"},
            {"command": "inspect"}
        ]"#,
    )
    .unwrap();
    assert!(responses.iter().all(|r| r.success));
    let data = responses[3].data.as_ref().unwrap();
    assert_eq!(data["grid"]["offset"]["x"], 30.0);
    assert_eq!(data["grid"]["offset"]["y"], 20.0);
    assert_eq!(data["grid"]["spacing"], 100.0);
}

#[test]
fn test_command_cancel_grid_drag() {
    let mut s = ToolSession::new();
    execute_json_batch(&mut s, SQUARE_ROOM).unwrap();
    execute_json(&mut s, r#"{"command": "compute_scale", "area": "2 * 2"}"#).unwrap();

    let responses = execute_json_batch(
        &mut s,
        r#"[
            {"command": "begin_grid_drag", "x": 0, "y": 0},
            {"command": "drag_grid", "x": 50, "y": 50},
            {"command": "cancel_grid_drag"},
            {"command": "cancel_grid_drag"},
            {"command": "inspect"}
        ]"#,
    )
    .unwrap();
    assert!(responses[2].success);
    assert!(!responses[3].success);
    let data = responses[4].data.as_ref().unwrap();
    assert_eq!(data["grid"]["offset"]["x"], 0.0);
    assert_eq!(data["notification"]["key"], "notify.drag_cancelled");
}

#[test]
fn test_command_move_vertex_invalidates() {
    let mut s = ToolSession::new();
    execute_json_batch(&mut s, SQUARE_ROOM).unwrap();
    execute_json(&mut s, r#"{"command": "compute_scale", "area": 4}"#).unwrap();

    let resp =
        execute_json(&mut s, r#"{"command": "move_vertex", "index": 2, "x": 320, "y": 320}"#)
            .unwrap();
    assert!(resp.success);
    let data = execute_json(&mut s, r#"{"command": "inspect"}"#).unwrap().data.unwrap();
    assert!(data["scale"].is_null());
    assert!(data["grid"].is_null());

    let resp =
        execute_json(&mut s, r#"{"command": "move_vertex", "index": 9, "x": 0, "y": 0}"#).unwrap();
    assert!(!resp.success);
}

#[test]
fn test_command_toggle_grid() {
    let mut s = ToolSession::new();
    execute_json_batch(&mut s, SQUARE_ROOM).unwrap();
    execute_json(&mut s, r#"{"command": "compute_scale", "area": 4, "unit": "square_meters"}"#)
        .unwrap();
    let resp = execute_json(&mut s, r#"{"command": "toggle_grid"}"#).unwrap();
    assert_eq!(resp.data.unwrap()["visible"], false);
    let resp = execute_json(&mut s, r#"{"command": "begin_grid_drag", "x": 0, "y": 0}"#).unwrap();
    assert!(!resp.success);
}

#[test]
fn test_command_close_needs_three_points() {
    let mut s = ToolSession::new();
    let responses = execute_json_batch(
        &mut s,
        r#"[
            {"command": "attach", "width": 100, "height": 100},
            {"command": "add_point", "x": 0, "y": 0},
            {"command": "add_point", "x": 50, "y": 0},
            {"command": "close_polygon"},
            {"command": "add_point", "x": 50, "y": 50},
            {"command": "close_polygon"}
        ]"#,
    )
    .unwrap();
    assert!(!responses[3].success);
    assert!(responses[5].success);
}

#[test]
fn test_command_load_image_and_reset() {
    let path = write_png("plan.png", 500, 250);
    let mut s = ToolSession::new();
    let json = serde_json::json!({
        "command": "load_image",
        "path": path,
        "container": {"width": 1000.0, "height": 1000.0},
    })
    .to_string();
    let resp = execute_json(&mut s, &json).unwrap();
    assert!(resp.success, "{:?}", resp.error);
    let data = resp.data.unwrap();
    assert_eq!(data["canvas"]["width"], 1000.0);
    assert_eq!(data["canvas"]["height"], 500.0);

    let resp = execute_json(&mut s, r#"{"command": "reset"}"#).unwrap();
    assert!(resp.success);
    let data = execute_json(&mut s, r#"{"command": "inspect"}"#).unwrap().data.unwrap();
    assert!(data["canvas"].is_null());
    assert_eq!(data["image_loaded"], false);
    assert_eq!(data["state"], "empty");
}

#[test]
fn test_command_load_rejects_non_image() {
    let dir = std::env::temp_dir().join(format!("floorscale-cmd-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("notes.txt");
    std::fs::write(&path, "hello").unwrap();

    let mut s = ToolSession::new();
    let json = serde_json::json!({ "command": "load_image", "path": path }).to_string();
    let resp = execute_json(&mut s, &json).unwrap();
    assert!(!resp.success);
    let data = execute_json(&mut s, r#"{"command": "inspect"}"#).unwrap().data.unwrap();
    assert_eq!(data["notification"]["key"], "notify.not_an_image");
    assert_eq!(data["notification"]["severity"], "error");
}

#[test]
fn test_command_invalid_batch() {
    let mut s = ToolSession::new();
    assert!(execute_json_batch(&mut s, r#"{"command": "inspect"}"#).is_err());
    assert!(execute_json_batch(&mut s, r#"[{"command": "explode"}]"#).is_err());
}
