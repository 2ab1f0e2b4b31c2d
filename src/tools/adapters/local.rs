//! Tool host confined to a workspace directory.

use crate::tools::domain::{
    ExecuteCommandInput, ListFilesInput, ReadFileInput, SearchCodeInput, ToolExecutionError,
    ToolExecutionResult, WriteFileInput,
};
use crate::tools::ports::ToolHost;
use async_trait::async_trait;
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use globset::{Glob, GlobMatcher};
use regex::Regex;
use std::io;
use tokio::process::Command;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Directory names never descended into by `search_code`.
const SKIPPED_DIRS: [&str; 3] = [".git", "target", "node_modules"];

/// Executes tools inside a workspace root.
///
/// Paths are resolved relative to the root; absolute paths and `..`
/// components are rejected. File access goes through a capability handle on
/// the root. Commands run through `sh -c` without a timeout.
#[derive(Debug, Clone)]
pub struct LocalToolHost {
    root: Utf8PathBuf,
}

impl LocalToolHost {
    /// Creates a host rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the workspace root.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn open_root(&self) -> ToolExecutionResult<Dir> {
        Dir::open_ambient_dir(&self.root, ambient_authority())
            .map_err(|err| io_error("open workspace", self.root.as_str(), &err))
    }
}

/// Normalises a caller-supplied path and rejects escapes from the root.
fn workspace_path(raw: &str) -> ToolExecutionResult<Utf8PathBuf> {
    let path = Utf8Path::new(raw.trim());
    let mut normalized = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::Normal(part) => normalized.push(part),
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir | Utf8Component::RootDir | Utf8Component::Prefix(_) => {
                return Err(ToolExecutionError::PathOutsideWorkspace(raw.to_owned()));
            }
        }
    }
    if normalized.as_str().is_empty() {
        normalized.push(".");
    }
    Ok(normalized)
}

fn io_error(operation: &'static str, path: &str, err: &io::Error) -> ToolExecutionError {
    ToolExecutionError::Io {
        operation,
        path: path.to_owned(),
        reason: err.to_string(),
    }
}

fn glob_matcher(pattern: Option<&str>) -> ToolExecutionResult<Option<GlobMatcher>> {
    pattern
        .map(|raw| {
            Glob::new(raw)
                .map(|glob| glob.compile_matcher())
                .map_err(|err| ToolExecutionError::InvalidPattern {
                    pattern: raw.to_owned(),
                    reason: err.to_string(),
                })
        })
        .transpose()
}

fn is_skipped(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

fn combine_output(stdout: &[u8], stderr: &[u8]) -> String {
    let mut combined = String::from_utf8_lossy(stdout).into_owned();
    let errors = String::from_utf8_lossy(stderr);
    if !errors.is_empty() {
        if !combined.is_empty() && !combined.ends_with('\n') {
            combined.push('\n');
        }
        combined.push_str(&errors);
    }
    combined
}

#[async_trait]
impl ToolHost for LocalToolHost {
    async fn read_file(&self, input: &ReadFileInput) -> ToolExecutionResult<String> {
        let path = workspace_path(&input.file_path)?;
        debug!(path = %path, "reading file");
        self.open_root()?
            .read_to_string(&path)
            .map_err(|err| io_error("read", &input.file_path, &err))
    }

    async fn write_file(&self, input: &WriteFileInput) -> ToolExecutionResult<String> {
        let path = workspace_path(&input.file_path)?;
        debug!(path = %path, bytes = input.content.len(), "writing file");
        let dir = self.open_root()?;
        if let Some(parent) = path.parent()
            && !parent.as_str().is_empty()
        {
            dir.create_dir_all(parent)
                .map_err(|err| io_error("create directory", parent.as_str(), &err))?;
        }
        dir.write(&path, input.content.as_bytes())
            .map_err(|err| io_error("write", &input.file_path, &err))?;
        Ok(format!("Successfully wrote to {}", input.file_path))
    }

    async fn execute_command(&self, input: &ExecuteCommandInput) -> ToolExecutionResult<String> {
        let working_dir = match input.cwd.as_deref() {
            Some(cwd) => self.root.join(workspace_path(cwd)?),
            None => self.root.clone(),
        };
        debug!(command = %input.command, cwd = %working_dir, "executing command");
        let output = Command::new("sh")
            .arg("-c")
            .arg(&input.command)
            .current_dir(working_dir.as_std_path())
            .output()
            .await
            .map_err(|err| ToolExecutionError::Spawn(err.to_string()))?;

        let combined = combine_output(&output.stdout, &output.stderr);
        if output.status.success() {
            Ok(combined)
        } else {
            Err(ToolExecutionError::CommandFailed {
                status: output.status.to_string(),
                output: combined,
            })
        }
    }

    async fn search_code(&self, input: &SearchCodeInput) -> ToolExecutionResult<String> {
        let regex = Regex::new(&input.pattern).map_err(|err| ToolExecutionError::InvalidPattern {
            pattern: input.pattern.clone(),
            reason: err.to_string(),
        })?;
        let filter = glob_matcher(input.file_pattern.as_deref())?;
        debug!(pattern = %input.pattern, "searching workspace");

        let mut matches = Vec::new();
        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_skipped(entry));
        for entry in walker.filter_map(Result::ok) {
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(relative) = entry
                .path()
                .strip_prefix(&self.root)
                .ok()
                .and_then(|path| path.to_str())
            else {
                continue;
            };
            if let Some(matcher) = &filter
                && !matcher.is_match(entry.file_name())
                && !matcher.is_match(relative)
            {
                continue;
            }
            let Ok(text) = std::fs::read_to_string(entry.path()) else {
                continue;
            };
            for (index, line) in text.lines().enumerate() {
                if regex.is_match(line) {
                    matches.push(format!("{relative}:{}:{line}", index + 1));
                }
            }
        }
        Ok(matches.join("\n"))
    }

    async fn list_files(&self, input: &ListFilesInput) -> ToolExecutionResult<String> {
        let path = workspace_path(&input.directory)?;
        let filter = glob_matcher(input.pattern.as_deref())?;
        debug!(directory = %path, "listing directory");
        let entries = self
            .open_root()?
            .read_dir(&path)
            .map_err(|err| io_error("list", &input.directory, &err))?;

        let mut names = Vec::new();
        for item in entries {
            let entry = item.map_err(|err| io_error("list", &input.directory, &err))?;
            let name = entry
                .file_name()
                .map_err(|err| io_error("list", &input.directory, &err))?;
            if let Some(matcher) = &filter
                && !matcher.is_match(&name)
            {
                continue;
            }
            let is_dir = entry
                .file_type()
                .map_err(|err| io_error("list", &input.directory, &err))?
                .is_dir();
            names.push(if is_dir { format!("{name}/") } else { name });
        }
        names.sort();
        Ok(names.join("\n"))
    }
}
