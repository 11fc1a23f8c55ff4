//! Command-line host for daybook.
//!
//! This is the thin layer between the terminal and the library: it parses
//! arguments, builds the config, opens the file-backed store and session, and
//! drives the forms with console implementations of the dialog and navigation
//! capabilities.
//!
//! # Lifecycle
//!
//! 1. **Parse**: read arguments with `clap`
//! 2. **Configure**: load `config.toml`, apply `--data-dir` / `--log-level`
//! 3. **Trace**: install the file subscriber
//! 4. **Run**: execute one subcommand against the store
//! 5. **Follow**: print the detail view if a form navigated to one
//!
//! # Commands
//!
//! ```text
//! daybook list [--search TEXT] [--emotion EMOTION|all] [--page N]
//! daybook new --title T --content C --emotion E
//! daybook show <id>
//! daybook edit <id> [--title T] [--content C] [--emotion E]
//! daybook retrospect <id> <text>
//! daybook delete <id> [--yes]
//! daybook login [--token TOKEN]
//! daybook logout
//! ```

#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use daybook::app::{
    AuthCapability, DeleteFlow, EditForm, EmotionFilter, FieldErrors, ListController, ListQuery,
    Modal, ModalCapability, Navigator, RetrospectForm, Route, SubmitOutcome, WriteForm,
};
use daybook::observability::init_tracing;
use daybook::ui::{render_detail, render_list};
use daybook::{Config, DaybookError, Emotion, Result, Store};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Token stored by `login` when none is given.
const LOCAL_TOKEN: &str = "local-session";

#[derive(Debug, Parser)]
#[command(name = "daybook", version, about = "A local-first personal diary")]
struct Cli {
    /// Config file (default: <data dir>/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding diaries and logs
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Tracing filter, e.g. `debug`
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List diaries, 12 per page
    List {
        /// Case-insensitive title search
        #[arg(long, default_value = "")]
        search: String,
        /// Emotion to filter by, or `all`
        #[arg(long, default_value = "all")]
        emotion: EmotionFilter,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Write a new diary
    New {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        emotion: Emotion,
    },
    /// Show one diary
    Show { id: u64 },
    /// Edit fields of a diary
    Edit {
        id: u64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        emotion: Option<Emotion>,
    },
    /// Add a retrospect to a diary
    Retrospect { id: u64, text: String },
    /// Delete a diary (requires login)
    Delete {
        id: u64,
        /// Skip the confirmation question
        #[arg(long)]
        yes: bool,
    },
    /// Log in on this machine
    Login {
        #[arg(long)]
        token: Option<String>,
    },
    /// Log out
    Logout,
}

/// Prints dialogs to the terminal.
#[derive(Debug, Default)]
struct ConsoleModal;

impl ModalCapability for ConsoleModal {
    fn open(&mut self, modal: Modal) {
        match modal {
            Modal::Error { .. } => eprintln!("{modal}"),
            _ => println!("{modal}"),
        }
    }

    fn close(&mut self) {}
}

/// Remembers where the last form wanted to go.
#[derive(Debug, Default)]
struct ConsoleNavigator {
    route: Option<Route>,
}

impl Navigator for ConsoleNavigator {
    fn navigate_to(&mut self, route: Route) {
        tracing::debug!(route = %route, "navigate");
        println!("→ {route}");
        self.route = Some(route);
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match (&cli.config, &cli.data_dir) {
        (Some(path), _) => Config::from_file(path)?,
        (None, Some(dir)) => Config::load_from(dir)?,
        (None, None) => Config::load()?,
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir.clone_from(dir);
    }
    if let Some(level) = &cli.log_level {
        config.log_level = Some(level.clone());
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(&cli)?;
    init_tracing(&config);
    tracing::debug!(command = ?cli.command, "daybook started");

    let mut store = daybook::open_store(&config)?;
    let mut modal = ConsoleModal;
    let mut nav = ConsoleNavigator::default();

    let code = match cli.command {
        Command::List {
            search,
            emotion,
            page,
        } => {
            let mut list = ListController::new(ListQuery {
                search,
                emotion,
                page,
            });
            let view = list.view(&store.load());
            print!("{}", render_list(&view, list.query()));
            ExitCode::SUCCESS
        }
        Command::New {
            title,
            content,
            emotion,
        } => {
            let mut form = WriteForm::new();
            form.set_title(title);
            form.set_content(content);
            form.set_emotion(Some(emotion));
            let outcome = form.submit(&mut store, &mut modal, &mut nav)?;
            report(&outcome, form.errors())
        }
        Command::Show { id } => {
            let record = store.get(id).ok_or(DaybookError::NotFound(id))?;
            print!("{}", render_detail(&record));
            ExitCode::SUCCESS
        }
        Command::Edit {
            id,
            title,
            content,
            emotion,
        } => {
            let record = store.get(id).ok_or(DaybookError::NotFound(id))?;
            let mut form = EditForm::from_record(&record);
            if let Some(title) = title {
                form.set_title(title);
            }
            if let Some(content) = content {
                form.set_content(content);
            }
            if emotion.is_some() {
                form.set_emotion(emotion);
            }
            let outcome = form.submit(&mut store, &mut modal, &mut nav)?;
            report(&outcome, form.errors())
        }
        Command::Retrospect { id, text } => {
            let mut form = RetrospectForm::new(id);
            form.set_text(text);
            if let Some(message) = form.error() {
                eprintln!("{message}");
                return Ok(ExitCode::FAILURE);
            }
            match form.submit(&mut store)? {
                SubmitOutcome::Saved(record) => {
                    print!("{}", render_detail(&record));
                    ExitCode::SUCCESS
                }
                SubmitOutcome::Blocked => return Err(DaybookError::NotFound(id)),
            }
        }
        Command::Delete { id, yes } => {
            let auth = daybook::open_session(&config)?;
            delete_diary(id, yes, &auth, &mut store, &mut modal, &mut nav)?
        }
        Command::Login { token } => {
            let mut auth = daybook::open_session(&config)?;
            auth.login(token.as_deref().unwrap_or(LOCAL_TOKEN))?;
            println!("로그인 되었습니다.");
            ExitCode::SUCCESS
        }
        Command::Logout => {
            let mut auth = daybook::open_session(&config)?;
            auth.logout()?;
            println!("로그아웃 되었습니다.");
            ExitCode::SUCCESS
        }
    };

    follow(&nav, &store);
    Ok(code)
}

/// Runs the delete flow for an existing diary.
///
/// `yes` skips the question on stdin.
fn delete_diary<A: AuthCapability>(
    id: u64,
    yes: bool,
    auth: &A,
    store: &mut dyn Store,
    modal: &mut dyn ModalCapability,
    nav: &mut dyn Navigator,
) -> Result<ExitCode> {
    store.get(id).ok_or(DaybookError::NotFound(id))?;

    let mut flow = DeleteFlow::new(id);
    if !flow.request(auth, modal) {
        return Ok(ExitCode::FAILURE);
    }
    if !yes && !confirm()? {
        flow.cancel(modal);
        return Ok(ExitCode::SUCCESS);
    }
    if flow.confirm(auth, store, modal, nav)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Prints the detail view when a form navigated to one.
fn follow(nav: &ConsoleNavigator, store: &dyn Store) {
    if let Some(Route::DiaryDetail(id)) = nav.route {
        if let Some(record) = store.get(id) {
            print!("{}", render_detail(&record));
        }
    }
}

fn report(outcome: &SubmitOutcome, errors: &FieldErrors) -> ExitCode {
    match outcome {
        SubmitOutcome::Saved(_) => ExitCode::SUCCESS,
        SubmitOutcome::Blocked => {
            for message in [errors.title, errors.content, errors.emotion]
                .into_iter()
                .flatten()
            {
                eprintln!("{message}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Asks the question of the open confirm dialog on stdin.
fn confirm() -> Result<bool> {
    print!("[y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use daybook::app::capability::{RecordingModal, RecordingNavigator, StaticAuth};
    use daybook::{DiaryStore, MemoryArea, NewDiary};

    #[test]
    fn deleting_unknown_id_fails_before_any_dialog() {
        let mut store = DiaryStore::new(MemoryArea::default());
        let mut modal = RecordingModal::default();
        let mut nav = RecordingNavigator::default();

        let err = delete_diary(42, true, &StaticAuth(true), &mut store, &mut modal, &mut nav)
            .unwrap_err();

        assert!(matches!(err, DaybookError::NotFound(42)));
        assert!(modal.opened.is_empty());
        assert!(nav.visited.is_empty());
    }

    #[test]
    fn deleting_existing_id_confirms_and_returns_to_list() {
        let mut store = DiaryStore::new(MemoryArea::default());
        let record = store
            .append(NewDiary::new("제목", "내용", Emotion::Happy))
            .unwrap();
        let mut modal = RecordingModal::default();
        let mut nav = RecordingNavigator::default();

        let code =
            delete_diary(record.id, true, &StaticAuth(true), &mut store, &mut modal, &mut nav)
                .unwrap();

        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(modal.last(), Some(&Modal::success("일기 삭제 완료")));
        assert_eq!(nav.current(), Some(Route::DiaryList));
        assert!(store.load().is_empty());
    }

    #[test]
    fn data_dir_flag_reads_config_from_that_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "storage_key = \"journal\"").unwrap();
        let data_dir = dir.path().to_string_lossy().into_owned();

        let cli =
            Cli::try_parse_from(["daybook", "--data-dir", data_dir.as_str(), "logout"]).unwrap();
        let config = load_config(&cli).unwrap();

        assert_eq!(config.storage_key, "journal");
        assert_eq!(config.data_dir, dir.path());
    }

    #[test]
    fn explicit_config_wins_over_data_dir_lookup() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "storage_key = \"journal\"").unwrap();
        let other = dir.path().join("other.toml");
        std::fs::write(&other, "log_level = \"debug\"").unwrap();
        let data_dir = dir.path().to_string_lossy().into_owned();
        let config_path = other.to_string_lossy().into_owned();

        let cli = Cli::try_parse_from([
            "daybook",
            "--config",
            config_path.as_str(),
            "--data-dir",
            data_dir.as_str(),
            "list",
        ])
        .unwrap();
        let config = load_config(&cli).unwrap();

        assert_eq!(config.storage_key, "diaries");
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.data_dir, dir.path());
    }
}
