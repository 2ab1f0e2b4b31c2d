//! JSON schemas of the built-in tools.

use super::ToolName;
use crate::completion::domain::ToolDefinition;
use serde_json::{Value, json};

/// Returns the schemas of all built-in tools, in catalogue order.
#[must_use]
pub fn builtin_tool_definitions() -> Vec<ToolDefinition> {
    ToolName::ALL
        .into_iter()
        .map(|tool| ToolDefinition {
            name: tool.as_str().to_owned(),
            description: description(tool).to_owned(),
            input_schema: schema(tool),
        })
        .collect()
}

const fn description(tool: ToolName) -> &'static str {
    match tool {
        ToolName::ReadFile => "Read the contents of a file",
        ToolName::WriteFile => {
            "Write content to a file, creating parent directories and replacing existing content"
        }
        ToolName::ExecuteCommand => "Execute a shell command and return its combined output",
        ToolName::SearchCode => "Search for a regular expression across files",
        ToolName::ListFiles => "List files in a directory",
    }
}

fn schema(tool: ToolName) -> Value {
    match tool {
        ToolName::ReadFile => object(
            json!({ "file_path": string("Path to the file relative to project root") }),
            &["file_path"],
        ),
        ToolName::WriteFile => object(
            json!({
                "file_path": string("Path to the file relative to project root"),
                "content": string("Content to write to the file")
            }),
            &["file_path", "content"],
        ),
        ToolName::ExecuteCommand => object(
            json!({
                "command": string("Command to execute"),
                "cwd": string("Working directory relative to project root")
            }),
            &["command"],
        ),
        ToolName::SearchCode => object(
            json!({
                "pattern": string("Regular expression to search for"),
                "file_pattern": string("Optional glob restricting searched file names")
            }),
            &["pattern"],
        ),
        ToolName::ListFiles => object(
            json!({
                "directory": string("Directory path relative to project root"),
                "pattern": string("Optional glob pattern to filter files")
            }),
            &["directory"],
        ),
    }
}

fn string(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

fn object(properties: Value, required: &[&str]) -> Value {
    json!({ "type": "object", "properties": properties, "required": required })
}
