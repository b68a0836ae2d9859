//! Assistant boundary
//!
//! The assistant is an external service: it takes a task and a
//! serialisation of the active sheet and returns text. Nothing here talks
//! to a network; [`CommandAssistant`] pipes the prompt through a local
//! program, and any closure can stand in for the service in tests.
//!
//! Answers are shown in an [`AssistantPanel`] and never written into the
//! workbook.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;

use ledger_sheets_core::{Cell, Sheet, ERROR_PLACEHOLDER};
use thiserror::Error;

/// Shown when the assistant call fails
pub const ASSISTANT_FAILURE_MESSAGE: &str = "Error communicating with AI assistant.";

/// Shown when the assistant returns nothing
pub const EMPTY_RESPONSE_MESSAGE: &str = "No response from AI.";

/// Errors from the assistant boundary
#[derive(Debug, Error)]
pub enum AssistantError {
    /// A request is already outstanding
    #[error("Assistant request already in progress")]
    Busy,

    /// The prompt is blank
    #[error("Prompt is empty")]
    EmptyPrompt,

    /// Spawning or talking to the assistant process failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The assistant reported a failure
    #[error("Assistant failed: {0}")]
    Failed(String),

    /// The sheet context could not be serialised
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// An assistant that answers prompts
pub trait Assistant {
    /// Answer a fully assembled prompt
    fn complete(&self, prompt: &str) -> Result<String, AssistantError>;

    /// Answer a user task about a sheet
    fn ask(&self, task: &str, sheet_context: &str) -> Result<String, AssistantError> {
        self.complete(&build_prompt(task, sheet_context))
    }
}

impl<F> Assistant for F
where
    F: Fn(&str) -> Result<String, AssistantError>,
{
    fn complete(&self, prompt: &str) -> Result<String, AssistantError> {
        self(prompt)
    }
}

/// Assistant backed by an external program
///
/// The prompt is written to the program's stdin and its stdout is the
/// answer. A non-zero exit status is a failure. There is no timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandAssistant {
    program: String,
    args: Vec<String>,
}

impl CommandAssistant {
    pub fn new<S: Into<String>>(program: S) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Add an argument passed to the program
    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Assistant for CommandAssistant {
    fn complete(&self, prompt: &str) -> Result<String, AssistantError> {
        tracing::debug!("Running assistant command {}", self.program);
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Feed stdin from its own thread so a child that writes while it
        // reads cannot fill stdout and block us mid-write.
        let writer = child.stdin.take().map(|mut stdin| {
            let bytes = prompt.as_bytes().to_vec();
            thread::spawn(move || match stdin.write_all(&bytes) {
                // The child may exit without reading everything; its exit status decides.
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
                result => result,
            })
        });

        let output = child.wait_with_output()?;
        if let Some(writer) = writer {
            writer
                .join()
                .map_err(|_| AssistantError::Failed("stdin writer panicked".to_string()))??;
        }
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AssistantError::Failed(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Serialise a sheet's cells as a JSON object keyed by label
///
/// Keys are sorted so the same sheet always gives the same context.
pub fn sheet_context(sheet: &Sheet) -> Result<String, AssistantError> {
    let cells: BTreeMap<&str, &Cell> = sheet.cells().map(|c| (c.label.as_str(), c)).collect();
    Ok(serde_json::to_string(&cells)?)
}

/// Prompt sent for a user task
pub fn build_prompt(task: &str, context: &str) -> String {
    format!(
        "You are a spreadsheet expert assistant.\n\
         Context about the current sheet selection: {}\n\
         User request: {}\n\n\
         Provide a helpful response. If the user asks for a formula, provide it starting with '='.\n\
         If the user asks for analysis, be concise and data-driven.",
        context, task
    )
}

/// Prompt sent to ask for a formula
pub fn formula_prompt(description: &str) -> String {
    format!(
        "Generate a Google Sheets formula for: {}. Output only the formula string.",
        description
    )
}

/// Ask for a formula; failures give `#ERROR!`
pub fn suggest_formula(assistant: &dyn Assistant, description: &str) -> String {
    match assistant.complete(&formula_prompt(description)) {
        Ok(answer) => answer.trim().to_string(),
        Err(e) => {
            tracing::warn!("Formula suggestion failed: {e}");
            ERROR_PLACEHOLDER.to_string()
        }
    }
}

/// Sidebar state for the assistant
///
/// At most one request is outstanding at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssistantPanel {
    prompt: String,
    response: String,
    busy: bool,
}

impl AssistantPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt<S: Into<String>>(&mut self, prompt: S) {
        self.prompt = prompt.into();
    }

    /// The answer currently shown (empty when nothing is shown)
    pub fn response(&self) -> &str {
        &self.response
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Mark a request as outstanding and return the task to send
    pub fn start_request(&mut self) -> Result<String, AssistantError> {
        if self.busy {
            return Err(AssistantError::Busy);
        }
        if self.prompt.trim().is_empty() {
            return Err(AssistantError::EmptyPrompt);
        }
        self.busy = true;
        Ok(self.prompt.clone())
    }

    /// Finish the outstanding request and show its outcome
    pub fn complete(&mut self, result: Result<String, AssistantError>) -> &str {
        self.busy = false;
        self.response = match result {
            Ok(answer) if answer.is_empty() => EMPTY_RESPONSE_MESSAGE.to_string(),
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!("Assistant request failed: {e}");
                ASSISTANT_FAILURE_MESSAGE.to_string()
            }
        };
        &self.response
    }

    /// Send the prompt with the sheet as context and show the answer
    ///
    /// Only `Busy` and `EmptyPrompt` are returned as errors; a failed call
    /// shows the fallback message.
    pub fn ask(&mut self, assistant: &dyn Assistant, sheet: &Sheet) -> Result<&str, AssistantError> {
        let task = self.start_request()?;
        let result = sheet_context(sheet).and_then(|context| assistant.ask(&task, &context));
        Ok(self.complete(result))
    }

    /// Drop the shown response
    pub fn clear(&mut self) {
        self.response.clear();
    }
}
