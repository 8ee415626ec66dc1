// UI layer: an interactive menu with a "Generate" panel and a "Train"
// panel, built on `dialoguer`. Each interaction sends one request and
// renders the answer before returning to the menu.

use crate::api::{ApiClient, ApiReply, TrainRequest, DEFAULT_GENERATE_LENGTH};
use anyhow::{Context, Result};
use crossterm::style::Stylize;
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

const LUT_NAME_FILE: &str = ".lut_cli_name";
const MAX_TOKENS: u32 = 100;

/// Print the status/response pair of a finished exchange.
pub fn print_reply(reply: &ApiReply) {
    println!("Status: {}", reply.status);
    println!("Response: {}", reply.body);
}

/// Training requests already sent during this session. The server trains a
/// label again every time it receives it, so the menu asks before repeating.
#[derive(Debug, Default)]
pub struct TrainingLog {
    sent: HashSet<TrainRequest>,
}

impl TrainingLog {
    /// Whether this exact label, LUT and context was already trained.
    pub fn contains(&self, req: &TrainRequest) -> bool {
        self.sent.contains(req)
    }

    /// Remember a request the server accepted.
    pub fn record(&mut self, req: TrainRequest) {
        self.sent.insert(req);
    }
}

struct Session {
    lut_name: String,
    trained: TrainingLog,
}

/// Main interactive menu. Runs a select loop until the user chooses "Exit".
///
/// `lut_name` pre-fills the LUT prompt; without it the name remembered from
/// a previous run is offered instead.
pub fn main_menu(api: &ApiClient, lut_name: Option<String>) -> Result<()> {
    println!("{}", "GPT x LUTs Demo running on our API!".bold());
    let initial = lut_name.or_else(|| load_lut_name().ok().flatten());
    let mut session = Session {
        lut_name: ask_lut_name(initial)?,
        trained: TrainingLog::default(),
    };

    loop {
        println!("Personal LUT: {}", session.lut_name.as_str().cyan());
        let items = ["Generate", "Train", "Change LUT name", "Exit"];
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => {
                if let Err(e) = handle_generate(api, &session) {
                    println!("{} {:#}", "Generate failed:".red(), e);
                }
            }
            1 => {
                if let Err(e) = handle_train(api, &mut session) {
                    println!("{} {:#}", "Train failed:".red(), e);
                }
            }
            2 => session.lut_name = ask_lut_name(Some(session.lut_name.clone()))?,
            3 => break,
            _ => {}
        }
    }
    Ok(())
}

/// Prompt for the LUT identifier and remember it for the next run.
fn ask_lut_name(initial: Option<String>) -> Result<String> {
    let mut input = Input::<String>::new();
    input
        .with_prompt("Enter a unique ID to store your personal LUT")
        .validate_with(|name: &String| -> Result<(), &'static str> {
            if name.is_empty() {
                Err("The LUT ID cannot be empty")
            } else {
                Ok(())
            }
        });
    if let Some(name) = initial {
        input.with_initial_text(name);
    }
    let name = input.interact_text()?;

    // Failing to remember the name only costs retyping it next time.
    if let Err(e) = persist_lut_name(&name) {
        warn!(error = %e, "could not remember LUT name");
    }
    Ok(name)
}

/// Generate panel: prompt plus a bounded token count.
fn handle_generate(api: &ApiClient, session: &Session) -> Result<()> {
    let prompt: String = Input::new().with_prompt("Enter a prompt").interact_text()?;
    let length: u32 = Input::new()
        .with_prompt("How many tokens to generate?")
        .default(DEFAULT_GENERATE_LENGTH)
        .validate_with(|n: &u32| -> Result<(), String> {
            if *n <= MAX_TOKENS {
                Ok(())
            } else {
                Err(format!("Pick a number between 0 and {}", MAX_TOKENS))
            }
        })
        .interact_text()?;

    let reply = with_spinner("Generating...", || {
        api.generate(&prompt, length, Some(&session.lut_name))
    })??;

    match reply.completion() {
        Some(text) => println!("{} {}", "Output:".green().bold(), text),
        None => println!("{} {}", "Output (no completion field):".yellow(), reply.body),
    }
    Ok(())
}

/// Train panel: context and label, sent to the session's LUT.
fn handle_train(api: &ApiClient, session: &mut Session) -> Result<()> {
    let context: String = Input::new()
        .with_prompt("Train context")
        .allow_empty(true)
        .interact_text()?;
    let label: String = Input::new().with_prompt("Train content").interact_text()?;

    let req = TrainRequest::new(&label, Some(&session.lut_name), non_empty(&context));
    let confirm = || -> Result<bool> {
        Ok(Confirm::new()
            .with_prompt("This exact content was already trained in this session. Train it again?")
            .default(false)
            .interact()?)
    };
    if let Some(reply) = train_once(api, &mut session.trained, req, confirm)? {
        println!("{} {}", "Trained:".green().bold(), reply.body);
    }
    Ok(())
}

/// Send `req` unless it was already trained and `confirm` declines a repeat.
///
/// Returns `None` when nothing was sent. Only a successful request is
/// recorded in `log`.
pub fn train_once(
    api: &ApiClient,
    log: &mut TrainingLog,
    req: TrainRequest,
    confirm: impl FnOnce() -> Result<bool>,
) -> Result<Option<ApiReply>> {
    if log.contains(&req) && !confirm()? {
        return Ok(None);
    }
    let reply = with_spinner("Training...", || api.send_train(&req))??;
    log.record(req);
    Ok(Some(reply))
}

/// Show a spinner while `f` runs. indicatif's spinner ticks on its own
/// thread so it keeps moving while the blocking request waits.
fn with_spinner<T>(message: &'static str, f: impl FnOnce() -> T) -> Result<T> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    let out = f();
    spinner.finish_and_clear();
    Ok(out)
}

fn non_empty(text: &str) -> Option<&str> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

fn lut_name_path() -> PathBuf {
    let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    dir.join(LUT_NAME_FILE)
}

/// Persist the LUT name into a file in the user's home directory.
fn persist_lut_name(name: &str) -> Result<()> {
    persist_lut_name_at(&lut_name_path(), name)
}

/// Load the LUT name remembered by a previous session, if any.
fn load_lut_name() -> Result<Option<String>> {
    load_lut_name_at(&lut_name_path())
}

fn persist_lut_name_at(path: &Path, name: &str) -> Result<()> {
    std::fs::write(path, name).with_context(|| format!("Writing {}", path.display()))
}

fn load_lut_name_at(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let name = std::fs::read_to_string(path).with_context(|| format!("Reading {}", path.display()))?;
    Ok((!name.is_empty()).then_some(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn training_log_matches_exact_requests() {
        let mut log = TrainingLog::default();
        let req = TrainRequest::new("label", Some("lut"), None);
        assert!(!log.contains(&req));
        log.record(req.clone());
        assert!(log.contains(&req));
        assert!(!log.contains(&TrainRequest::new("label", Some("lut"), Some("ctx"))));
        assert!(!log.contains(&TrainRequest::new("label", Some("other"), None)));
    }

    #[test]
    fn blank_context_is_absent() {
        assert_eq!(non_empty(""), None);
        assert_eq!(non_empty("   "), None);
        assert_eq!(non_empty("a firm"), Some("a firm"));
    }

    #[test]
    fn lut_name_survives_a_round_trip_on_disk() {
        let dir = std::env::temp_dir().join(format!("lut-cli-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(LUT_NAME_FILE);

        assert_eq!(load_lut_name_at(&path).unwrap(), None);
        persist_lut_name_at(&path, "myTest02").unwrap();
        assert_eq!(load_lut_name_at(&path).unwrap().as_deref(), Some("myTest02"));

        persist_lut_name_at(&path, " spaced id ").unwrap();
        assert_eq!(load_lut_name_at(&path).unwrap().as_deref(), Some(" spaced id "));

        persist_lut_name_at(&path, "").unwrap();
        assert_eq!(load_lut_name_at(&path).unwrap(), None);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
