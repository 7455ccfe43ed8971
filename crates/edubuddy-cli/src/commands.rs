//! Command implementations.
//!
//! Handlers build an `Output` instead of printing so they can be tested
//! against in-memory stores. User-triggered actions never fail the process:
//! their failures become error notices. Only configuration problems bubble
//! up as `Err`.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use edubuddy_auth::{
    sign_out, AccountService, AuthState, FirebaseIdentity, IdentityConfig, IdentityService,
    RegisterRequest, SessionStore, DEFAULT_USERNAME,
};
use edubuddy_catalog::{FacetSelection, MaterialAction, MaterialBrowser};
use edubuddy_search::{FlattenOptions, SearchIndex, SearchView};
use edubuddy_store::{MaterialStore, MemoryStore, RtdbConfig, RtdbStore};
use edubuddy_types::{MaterialKind, Notice, SearchRecord, Settings};

use crate::cli::{Cli, Commands, FacetArgs};
use crate::notify;

/// What a command shows: plain lines, then notices.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Output {
    pub lines: Vec<String>,
    pub notices: Vec<Notice>,
}

impl Output {
    pub fn notice(notice: Notice) -> Self {
        Self {
            lines: Vec::new(),
            notices: vec![notice],
        }
    }

    pub fn lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            notices: Vec::new(),
        }
    }

    pub fn print(&self) {
        for line in &self.lines {
            println!("{}", line);
        }
        for notice in &self.notices {
            notify::show(notice);
        }
    }
}

/// Load settings and apply CLI overrides.
pub fn load_settings(config_path: Option<&str>, log_level: Option<&str>) -> Result<Settings> {
    let mut settings = Settings::load(config_path).context("Failed to load configuration")?;
    if let Some(level) = log_level {
        settings.log_level = level.to_string();
    }
    Ok(settings)
}

/// Install the stderr log subscriber. `RUST_LOG` wins over the settings.
pub fn init_logging(settings: &Settings) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.log_level)),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}

/// Remote store, or a local JSON export when `store_file` is given.
pub fn open_store(settings: &Settings, store_file: Option<&str>) -> Result<Arc<dyn MaterialStore>> {
    match store_file {
        Some(path) => {
            let store = MemoryStore::from_file(path)
                .with_context(|| format!("Failed to load store export {}", path))?;
            info!(path, "Using local store export");
            Ok(Arc::new(store))
        }
        None => {
            let store = RtdbStore::new(RtdbConfig::from_settings(&settings.database))
                .context("Failed to create store client")?;
            debug!(url = %settings.database.url, "Using remote store");
            Ok(Arc::new(store))
        }
    }
}

fn account_service(settings: &Settings) -> Result<AccountService<dyn IdentityService>> {
    let config = IdentityConfig::from_settings(&settings.identity)?;
    let identity: Arc<dyn IdentityService> =
        Arc::new(FirebaseIdentity::new(config).context("Failed to create identity client")?);
    Ok(AccountService::new(identity, session_store(settings)))
}

fn session_store(settings: &Settings) -> SessionStore {
    SessionStore::new(settings.expanded_session_path())
}

fn selection(facets: &FacetArgs) -> FacetSelection {
    let mut sel = FacetSelection::new();
    if let Some(department) = &facets.department {
        sel = sel.with_department(department.clone());
    }
    if let Some(semester) = &facets.semester {
        sel = sel.with_semester(semester.clone());
    }
    sel
}

/// Subject names, or `No Subjects Found`.
pub async fn subjects<S: MaterialStore>(
    browser: &MaterialBrowser<S>,
    kind: MaterialKind,
    sel: &FacetSelection,
) -> Output {
    match browser.list_subjects(kind, sel).await {
        Ok(subjects) if subjects.is_empty() => Output::lines(vec!["No Subjects Found".to_string()]),
        Ok(subjects) => Output::lines(subjects),
        Err(e) => Output::notice(Notice::error(e.user_message(MaterialAction::LoadSubjects))),
    }
}

/// `<key>: <name>` per unit, or `No Units Found`.
pub async fn units<S: MaterialStore>(browser: &MaterialBrowser<S>, sel: &FacetSelection) -> Output {
    match browser.list_units(MaterialKind::PdfNotes, sel).await {
        Ok(units) if units.is_empty() => Output::lines(vec!["No Units Found".to_string()]),
        Ok(units) => Output::lines(
            units
                .into_iter()
                .map(|u| format!("{}: {}", u.key, u.name))
                .collect(),
        ),
        Err(e) => Output::notice(Notice::error(e.user_message(MaterialAction::LoadUnits))),
    }
}

/// The material link, or the failure notice.
pub async fn get_material<S: MaterialStore>(
    browser: &MaterialBrowser<S>,
    kind: MaterialKind,
    sel: &FacetSelection,
) -> Output {
    match browser.fetch_link(kind, sel).await {
        Ok(link) => Output {
            lines: vec![link.into_string()],
            notices: vec![Notice::success("Material link found! Opening...")],
        },
        Err(e) => Output::notice(Notice::error(e.user_message(MaterialAction::FetchMaterial))),
    }
}

fn result_lines(records: &[SearchRecord]) -> Vec<String> {
    records
        .iter()
        .flat_map(|r| {
            [
                r.name.clone(),
                format!("  {} | {}", r.kind, r.path_display),
                format!("  {}", r.link),
            ]
        })
        .collect()
}

/// Refresh the index from `store`, then run `query`.
pub async fn search<S: MaterialStore + ?Sized>(
    index: &SearchIndex,
    store: &S,
    query: &str,
    json: bool,
) -> Result<Output> {
    let report = index.refresh(store).await;
    let mut output = Output::default();
    output
        .notices
        .extend(report.notices().into_iter().map(Notice::error));

    let view = index.search(query);
    match &view {
        SearchView::Results(records) if json => {
            output.lines.push(serde_json::to_string_pretty(records)?);
        }
        SearchView::Results(records) => output.lines = result_lines(records),
        SearchView::NoResults => {
            if let Some(message) = view.message() {
                output.lines.push(message.to_string());
            }
        }
        SearchView::Hidden | SearchView::Unavailable => {
            debug!(query, "Nothing to show");
        }
    }
    Ok(output)
}

/// Record counts per kind after a refresh.
pub async fn index_summary<S: MaterialStore + ?Sized>(index: &SearchIndex, store: &S) -> Output {
    let report = index.refresh(store).await;
    let mut lines: Vec<String> = report
        .per_kind
        .iter()
        .map(|(kind, count)| format!("{}: {}", kind, count))
        .collect();
    lines.push(format!("Total: {}", report.total));
    Output {
        lines,
        notices: report.notices().into_iter().map(Notice::error).collect(),
    }
}

/// Dashboard username. Sign-in state does not outlive a process, so only
/// the persisted session is consulted.
pub fn whoami(session: &SessionStore) -> Output {
    let name = match session.user_name() {
        Ok(name) => name,
        Err(e) => {
            debug!(error = %e, "Could not read session");
            None
        }
    };
    Output::lines(vec![name.unwrap_or_else(|| DEFAULT_USERNAME.to_string())])
}

/// Local sign-out. Works without identity credentials.
pub fn logout(session: &SessionStore) -> Output {
    Output::notice(sign_out(&AuthState::new(), session))
}

/// Run a parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let settings = load_settings(cli.config.as_deref(), cli.log_level.as_deref())?;
    init_logging(&settings)?;

    let output = match cli.command {
        Commands::Register {
            email,
            username,
            password,
            confirm_password,
        } => {
            let request = RegisterRequest {
                username,
                email,
                password,
                confirm_password,
            };
            Output::notice(account_service(&settings)?.register(&request).await)
        }
        Commands::Login { email, password } => {
            Output::notice(account_service(&settings)?.login(&email, &password).await)
        }
        Commands::Logout => logout(&session_store(&settings)),
        Commands::ResetPassword { email } => {
            Output::notice(account_service(&settings)?.reset_password(&email).await)
        }
        Commands::Whoami => whoami(&session_store(&settings)),
        Commands::Subjects { kind, facets } => {
            let browser = MaterialBrowser::new(open_store(&settings, cli.store_file.as_deref())?);
            subjects(&browser, kind, &selection(&facets)).await
        }
        Commands::Units { facets, subject } => {
            let browser = MaterialBrowser::new(open_store(&settings, cli.store_file.as_deref())?);
            let mut sel = selection(&facets);
            if let Some(subject) = subject {
                sel = sel.with_subject(subject);
            }
            units(&browser, &sel).await
        }
        Commands::Get {
            kind,
            facets,
            subject,
            unit,
            exam_type,
        } => {
            let browser = MaterialBrowser::new(open_store(&settings, cli.store_file.as_deref())?);
            let mut sel = selection(&facets);
            if let Some(subject) = subject {
                sel = sel.with_subject(subject);
            }
            if let Some(unit) = unit {
                sel = sel.with_unit(unit);
            }
            if let Some(exam_type) = exam_type {
                sel = sel.with_exam_type(exam_type);
            }
            get_material(&browser, kind, &sel).await
        }
        Commands::Search { query, json } => {
            let store = open_store(&settings, cli.store_file.as_deref())?;
            let index = SearchIndex::new(FlattenOptions {
                warn_on_malformed: settings.search.warn_on_malformed,
            });
            search(&index, store.as_ref(), &query.join(" "), json).await?
        }
        Commands::Index => {
            let store = open_store(&settings, cli.store_file.as_deref())?;
            let index = SearchIndex::new(FlattenOptions {
                warn_on_malformed: settings.search.warn_on_malformed,
            });
            index_summary(&index, store.as_ref()).await
        }
    };

    output.print();
    Ok(())
}
