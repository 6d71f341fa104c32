use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use leetdash::{
    app::{App, Control},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    dashboard::Dashboard,
    error::Result as DashResult,
    lists::BundledList,
    parser::load_problems,
    problem::ProblemRecord,
    runtime::{CrosstermEventSource, DashEvent, FixedTicker, Runner},
    store::{open_store, KeyValueStore, MemoryStore, StorageBackend},
    ui,
    view::SortKey,
};
use log::{error, info, warn};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use serde::Serialize;
use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, stdin, Write},
    path::PathBuf,
    time::Duration,
};

const TICK_RATE_MS: u64 = 100;

/// terminal dashboard for interview problem lists
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Browse an interview problem list in the terminal: sort by difficulty, frequency or acceptance rate, filter by topic, open problems in the browser and keep a persistent solved checklist."
)]
pub struct Cli {
    /// problems CSV to load instead of a bundled list
    #[clap(short = 'f', long)]
    file: Option<PathBuf>,

    /// bundled problem list to load
    #[clap(short = 'l', long, value_enum)]
    list: Option<BundledList>,

    /// column to sort by at startup
    #[clap(short = 's', long, value_enum)]
    sort: Option<SortKey>,

    /// only show problems tagged with TAG (repeatable, any tag matches)
    #[clap(short = 't', long = "tag", value_name = "TAG")]
    tags: Vec<String>,

    /// where the solved checklist is kept
    #[clap(long, value_enum)]
    storage: Option<StorageBackend>,

    /// print the sorted, filtered problems as JSON and exit
    #[clap(long)]
    print: bool,

    /// enable debug logging
    #[clap(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    /// Command line values win over the saved config
    fn resolve(&self, cfg: &Config) -> Config {
        let problems_file = match (&self.file, self.list) {
            (Some(file), _) => Some(file.clone()),
            (None, Some(_)) => None,
            (None, None) => cfg.problems_file.clone(),
        };
        Config {
            list: self.list.unwrap_or(cfg.list),
            problems_file,
            storage: self.storage.unwrap_or(cfg.storage),
            sort_key: self.sort.unwrap_or(cfg.sort_key),
        }
    }
}

#[derive(Serialize)]
struct PrintedProblem<'a> {
    #[serde(flatten)]
    record: &'a ProblemRecord,
    solved: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_store = FileConfigStore::new();
    let settings = cli.resolve(&config_store.load());

    if !cli.print && !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let mut startup_errors = Vec::new();
    let records = load_records(&settings).unwrap_or_else(|e| {
        error!("failed to load problems: {e}");
        startup_errors.push(format!("Failed to load problems: {e}"));
        Vec::new()
    });
    let store = open_store(settings.storage).unwrap_or_else(|e| {
        error!("failed to open {} store, solved marks will not persist: {e}", settings.storage);
        startup_errors.push(format!("Solved list not persisted: {e}"));
        Box::new(MemoryStore::default()) as Box<dyn KeyValueStore>
    });

    let mut dashboard = Dashboard::new(records, settings.sort_key, store);
    for tag in &cli.tags {
        if !dashboard.tags().contains(tag) {
            warn!("tag {tag:?} matches no problems");
        }
        if !dashboard.is_tag_selected(tag) {
            dashboard.toggle_tag(tag);
        }
    }

    if cli.print {
        return print_view(&dashboard);
    }

    let mut app = App::new(dashboard);
    if !startup_errors.is_empty() {
        app.set_sticky_status(startup_errors.join(" | "), true);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let saved = Config {
        sort_key: app.dashboard.sort().key,
        ..settings
    };
    if let Err(e) = config_store.save(&saved) {
        warn!("could not save config: {e}");
    }
    info!("exiting");

    result
}

/// Log to a file in the state dir; stderr belongs to the terminal UI
fn init_logging(verbose: bool) {
    let path = AppDirs::log_path();
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    let _ = builder
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
}

fn load_records(settings: &Config) -> DashResult<Vec<ProblemRecord>> {
    match &settings.problems_file {
        Some(path) => {
            info!("loading problems from {}", path.display());
            load_problems(path)
        }
        None => {
            info!("loading bundled list {}", settings.list);
            settings.list.load()
        }
    }
}

fn print_view(dashboard: &Dashboard) -> Result<(), Box<dyn Error>> {
    let rows: Vec<PrintedProblem> = dashboard
        .current_view()
        .into_iter()
        .map(|record| PrintedProblem {
            record,
            solved: dashboard.is_solved(&record.link),
        })
        .collect();

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &rows)?;
    writeln!(stdout)?;
    Ok(())
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    terminal.draw(|f| ui::render(app, f))?;

    loop {
        match runner.step() {
            DashEvent::Tick => {
                // only redraw when a status line just expired
                let had_status = app.status.is_some();
                app.on_tick();
                if had_status && app.status.is_none() {
                    terminal.draw(|f| ui::render(app, f))?;
                }
            }
            DashEvent::Resize => {
                terminal.draw(|f| ui::render(app, f))?;
            }
            DashEvent::Key(key) => {
                if app.on_key(key) == Control::Quit {
                    break;
                }
                terminal.draw(|f| ui::render(app, f))?;
            }
        }
    }

    Ok(())
}
