use searchbar::storage::{LocalStore, SqliteBackend};
use searchbar::theme::Theme;
use searchbar::voice::NoDictation;
use searchbar::{config, settings, SearchBar, SearchEngine, Settings, Target};
use std::path::Path;
use std::process::ExitCode;

const USAGE: &str = "\
usage: searchbar [--engine <id>] [--theme <dark|unset>] [--new-tab] [QUERY...]
       searchbar --history [PREFIX]
       searchbar --delete <QUERY>
       searchbar --clear-history";

#[derive(Debug, Default)]
struct Options {
    engine: Option<SearchEngine>,
    theme: Option<Theme>,
    new_tab: bool,
    history: Option<String>,
    delete: Option<String>,
    clear_history: bool,
    query: Vec<String>,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--engine" => {
                let id = iter.next().ok_or("--engine needs a value")?;
                let engine = SearchEngine::from_id(id)
                    .ok_or_else(|| format!("unknown search engine '{}'", id))?;
                options.engine = Some(engine);
            }
            "--theme" => {
                let value = iter.next().ok_or("--theme needs a value")?;
                options.theme = Some(match value.as_str() {
                    "dark" => Theme::Dark,
                    "unset" => Theme::Unset,
                    other => return Err(format!("unknown theme '{}'", other)),
                });
            }
            "--new-tab" => options.new_tab = true,
            "--history" => {
                let prefix: Vec<String> = iter.by_ref().cloned().collect();
                options.history = Some(prefix.join(" "));
            }
            "--delete" => {
                let query: Vec<String> = iter.by_ref().cloned().collect();
                if query.is_empty() {
                    return Err("--delete needs a query".to_string());
                }
                options.delete = Some(query.join(" "));
            }
            "--clear-history" => options.clear_history = true,
            "-h" | "--help" => return Err(String::new()),
            _ => options.query.push(arg.clone()),
        }
    }

    Ok(options)
}

fn open_store(data_dir: &Path) -> LocalStore {
    match SqliteBackend::new(data_dir) {
        Ok(backend) => LocalStore::new(backend),
        Err(e) => {
            log::error!("Failed to open local storage, history will not persist: {}", e);
            LocalStore::in_memory()
        }
    }
}

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting {} v{}", config::APP_NAME, config::APP_VERSION);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            if !message.is_empty() {
                eprintln!("error: {}\n", message);
            }
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    let data_dir = settings::data_dir();
    let settings = Settings::load(&data_dir);
    let mut store = open_store(&data_dir);

    if let Some(theme) = options.theme {
        theme.save(&mut store);
    }

    let mut bar: SearchBar<NoDictation> = SearchBar::new(store, None, &settings);

    if let Some(engine) = options.engine {
        bar.set_search_engine(engine);
    }

    if options.clear_history {
        bar.clear_history();
        return ExitCode::SUCCESS;
    }

    if let Some(query) = options.delete {
        bar.delete_history(&query);
        return ExitCode::SUCCESS;
    }

    if let Some(prefix) = options.history {
        bar.set_input(&prefix);
        for query in bar.dropdown().queries() {
            println!("{}", query);
        }
        return ExitCode::SUCCESS;
    }

    if options.query.is_empty() {
        if options.engine.is_none() && options.theme.is_none() {
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
        return ExitCode::SUCCESS;
    }

    bar.set_input(&options.query.join(" "));
    let target = if options.new_tab {
        Target::NewTab
    } else {
        Target::CurrentTab
    };

    match bar.execute(target) {
        Some(navigation) => {
            match navigation.target {
                Target::CurrentTab => println!("{}", navigation.url),
                Target::NewTab => println!("{}\t(new tab)", navigation.url),
            }
            ExitCode::SUCCESS
        }
        None => ExitCode::from(1),
    }
}
