//! JSON command protocol for scripting a session headlessly.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use shared::{AreaUnit, CanvasSize, Point2D};

use crate::session::ToolSession;
use crate::state::polygon::{AddPointOutcome, EditorState, InputKind};

/// Container used by `load_image` when none is given
pub const DEFAULT_CONTAINER: CanvasSize = CanvasSize {
    width: 1024.0,
    height: 768.0,
};

/// Area as a JSON number or as text (plain number or expression)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AreaArg {
    Number(f64),
    Text(String),
}

impl AreaArg {
    fn as_text(&self) -> String {
        match self {
            AreaArg::Number(n) => n.to_string(),
            AreaArg::Text(s) => s.clone(),
        }
    }
}

/// A command a script can execute against a session.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum SessionCommand {
    /// Load a floor plan from disk and fit it to a container
    LoadImage {
        path: PathBuf,
        #[serde(default)]
        container: Option<CanvasSize>,
    },
    /// Bind a bare canvas without an image
    Attach { width: f64, height: f64 },
    /// Move the pointer over the canvas
    Hover {
        x: f64,
        y: f64,
        #[serde(default)]
        input: InputKind,
    },
    /// Click/tap at a canvas position
    AddPoint {
        x: f64,
        y: f64,
        #[serde(default)]
        input: InputKind,
    },
    ClosePolygon,
    MoveVertex { index: usize, x: f64, y: f64 },
    ClearSelection,
    /// Derive the scale from the closed outline and a known area
    ComputeScale {
        area: AreaArg,
        #[serde(default)]
        unit: AreaUnit,
    },
    BeginGridDrag { x: f64, y: f64 },
    DragGrid { x: f64, y: f64 },
    EndGridDrag,
    CancelGridDrag,
    ToggleGrid,
    /// Drop everything and return to the upload state
    Reset,
    /// Report outline, scale, grid and canvas state
    Inspect,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }

    fn from_flag(done: bool, what: &str) -> Self {
        if done {
            Self::ok()
        } else {
            Self::err(format!("{what} rejected"))
        }
    }
}

fn state_name(state: EditorState) -> &'static str {
    match state {
        EditorState::Empty => "empty",
        EditorState::Drawing => "drawing",
        EditorState::Closed => "closed",
    }
}

/// Latest toast message, used as the error text of failed commands
fn last_message(session: &ToolSession) -> String {
    session
        .notifications()
        .current()
        .map(|t| t.message.clone())
        .unwrap_or_default()
}

fn inspect(session: &ToolSession) -> serde_json::Value {
    let editor = session.editor();
    let engine = session.engine();
    let grid = engine.grid().map(|g| {
        serde_json::json!({
            "spacing": g.spacing(),
            "offset": g.offset(),
            "dragging": g.is_dragging(),
        })
    });
    serde_json::json!({
        "state": state_name(editor.state()),
        "points": editor.points(),
        "area": editor.area(),
        "centroid": editor.centroid(),
        "scale": session.scale(),
        "readout": session.scale().map(|s| s.readout()),
        "grid": grid,
        "grid_visible": engine.is_grid_visible(),
        "canvas": session.canvas_size(),
        "image_loaded": session.floor_plan().is_some(),
        "epoch": session.epoch(),
        "notification": session.notifications().current(),
    })
}

/// Execute a single command on the session.
pub fn execute_command(session: &mut ToolSession, cmd: SessionCommand) -> CommandResponse {
    match cmd {
        SessionCommand::LoadImage { path, container } => {
            let container = container.unwrap_or(DEFAULT_CONTAINER);
            if session.load_image_path(&path, container) {
                CommandResponse::ok_with_data(serde_json::json!({
                    "canvas": session.canvas_size(),
                }))
            } else {
                CommandResponse::err(last_message(session))
            }
        }

        SessionCommand::Attach { width, height } => {
            CommandResponse::from_flag(session.attach(CanvasSize::new(width, height)), "attach")
        }

        SessionCommand::Hover { x, y, input } => {
            let closable = session.hover(Point2D::new(x, y), input);
            CommandResponse::ok_with_data(serde_json::json!({ "closable": closable }))
        }

        SessionCommand::AddPoint { x, y, input } => {
            match session.add_point(Point2D::new(x, y), input) {
                AddPointOutcome::Appended { index } => {
                    CommandResponse::ok_with_data(serde_json::json!({ "index": index }))
                }
                AddPointOutcome::Closed => {
                    CommandResponse::ok_with_data(serde_json::json!({ "closed": true }))
                }
                AddPointOutcome::Rejected => CommandResponse::err("add_point rejected"),
            }
        }

        SessionCommand::ClosePolygon => {
            CommandResponse::from_flag(session.close_polygon(), "close_polygon")
        }

        SessionCommand::MoveVertex { index, x, y } => {
            CommandResponse::from_flag(session.move_vertex(index, Point2D::new(x, y)), "move_vertex")
        }

        SessionCommand::ClearSelection => {
            session.clear_selection();
            CommandResponse::ok()
        }

        SessionCommand::ComputeScale { area, unit } => {
            match session.compute_scale(&area.as_text(), unit) {
                Ok(scale) => CommandResponse::ok_with_data(serde_json::json!({
                    "pixels_per_meter": scale.pixels_per_meter,
                    "readout": scale.readout(),
                })),
                Err(e) => CommandResponse::err(e.to_string()),
            }
        }

        SessionCommand::BeginGridDrag { x, y } => CommandResponse::from_flag(
            session.begin_grid_drag(Point2D::new(x, y)),
            "begin_grid_drag",
        ),

        SessionCommand::DragGrid { x, y } => {
            CommandResponse::from_flag(session.continue_grid_drag(Point2D::new(x, y)), "drag_grid")
        }

        SessionCommand::EndGridDrag => {
            CommandResponse::from_flag(session.end_grid_drag(), "end_grid_drag")
        }

        SessionCommand::CancelGridDrag => {
            CommandResponse::from_flag(session.cancel_grid_drag(), "cancel_grid_drag")
        }

        SessionCommand::ToggleGrid => {
            let visible = session.toggle_grid();
            CommandResponse::ok_with_data(serde_json::json!({ "visible": visible }))
        }

        SessionCommand::Reset => {
            session.reset();
            CommandResponse::ok_with_data(serde_json::json!({ "epoch": session.epoch() }))
        }

        SessionCommand::Inspect => CommandResponse::ok_with_data(inspect(session)),
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(session: &mut ToolSession, json: &str) -> Result<CommandResponse, String> {
    let cmd: SessionCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(session, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    session: &mut ToolSession,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<SessionCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(session, cmd))
        .collect())
}
