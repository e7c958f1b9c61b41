use std::{
    fs,
    path::PathBuf,
};

use cardex::{
    catalog::{
        ExactFilters,
        Selection,
        StatMinimums,
    },
    core::{
        extract::extract_directory,
        import::{
            export_catalog,
            import_catalog_file,
        },
        tasks::{
            TaskManager,
            TaskResult,
        },
    },
    display,
    CardFilters,
    CardType,
    CatalogChange,
    CatalogStore,
    LoadState,
    SettingsData,
    SortDirection,
    SortField,
    SortState,
};
use clap::{
    Args,
    Parser,
    Subcommand,
};

/// Browse a tabletop card catalog from the command line
#[derive(Parser, Debug)]
#[command(name = "cardex", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List cards matching the filters
    List {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        filters: FilterArgs,
        /// Free text, may include constraints like `df:6` or `cost=4`
        #[arg(short, long, default_value = "")]
        search: String,
        /// Sort key: name, cost or sp
        #[arg(long)]
        sort: Option<String>,
        /// Sort descending
        #[arg(long)]
        desc: bool,
    },
    /// Show one card in detail
    Show {
        id: String,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print the filter choices available in the catalog
    Options {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Build a catalog from a folder of extracted card text (.txt) files
    Extract {
        dir: PathBuf,
        /// Output file, stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show or update stored settings
    Config {
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        timeout: Option<u64>,
        #[arg(long)]
        sort: Option<String>,
    },
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Catalog endpoint, overrides the stored setting
    #[arg(long, conflicts_with = "file")]
    url: Option<String>,
    /// Load a local JSON catalog instead of fetching
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FilterArgs {
    /// Model, Crew or Upgrade
    #[arg(long = "type")]
    card_type: Option<String>,
    #[arg(long, default_value = "All")]
    faction: String,
    #[arg(long, default_value = "All")]
    subfaction: String,
    #[arg(long, default_value = "All")]
    station: String,
    #[arg(long, default_value_t = 0)]
    cost_min: i64,
    #[arg(long, default_value_t = 20)]
    cost_max: i64,
    #[arg(long, default_value_t = 0)]
    sp_min: i64,
    #[arg(long, default_value_t = 0)]
    df_min: i64,
    #[arg(long, default_value_t = 0)]
    wp_min: i64,
    #[arg(long, default_value_t = 0)]
    sz_min: i64,
    #[arg(long, default_value_t = 0)]
    hp_min: i64,
    /// Base size in mm, compared as text
    #[arg(long, default_value = "All")]
    base: String,
    #[arg(long, default_value = "All")]
    tag: String,
    #[arg(long)]
    df: Option<i64>,
    #[arg(long)]
    sp: Option<i64>,
    #[arg(long)]
    wp: Option<i64>,
    #[arg(long)]
    sz: Option<i64>,
    #[arg(long)]
    hp: Option<i64>,
    #[arg(long)]
    base_exact: Option<i64>,
    #[arg(long)]
    soulstone: Option<bool>,
}

impl FilterArgs {
    fn into_filters(self) -> Result<CardFilters, Box<dyn std::error::Error>> {
        let card_type = match self.card_type.as_deref() {
            None | Some("All") => None,
            Some(label) => Some(
                CardType::parse(label).ok_or_else(|| format!("Unknown card type: {label}"))?,
            ),
        };

        Ok(CardFilters {
            card_type,
            faction: Selection::from(self.faction.as_str()),
            subfaction: Selection::from(self.subfaction.as_str()),
            station: Selection::from(self.station.as_str()),
            cost_min: self.cost_min,
            cost_max: self.cost_max,
            minimums: StatMinimums {
                sp: self.sp_min,
                df: self.df_min,
                wp: self.wp_min,
                sz: self.sz_min,
                hp: self.hp_min,
            },
            base_size: Selection::from(self.base.as_str()),
            tag: Selection::from(self.tag.as_str()),
            exact: ExactFilters {
                df: self.df,
                sp: self.sp,
                wp: self.wp,
                sz: self.sz,
                hp: self.hp,
                base: self.base_exact,
                soulstone: self.soulstone,
            },
        })
    }
}

fn load_store(
    source: SourceArgs,
    settings: &SettingsData,
) -> Result<CatalogStore, Box<dyn std::error::Error>> {
    let mut store = CatalogStore::default();
    store.apply_change(CatalogChange::SetSort(settings.initial_sort()));

    if let Some(path) = source.file {
        store.apply_change(CatalogChange::ReplaceCatalog(import_catalog_file(&path)?));
        return Ok(store);
    }

    let endpoint = source.url.unwrap_or_else(|| settings.data_url.clone());
    let mut tasks = TaskManager::new()?;
    let ticket = store.begin_fetch();
    tasks.fetch_catalog(ticket, endpoint, settings.request_timeout());

    let wait = settings.request_timeout() * 2;
    while *store.load_state() == LoadState::Loading {
        match tasks.wait_result(wait) {
            Some(result) => {
                if let TaskResult::LoadingMessage(message) = &result {
                    eprintln!("{message}");
                }
                store.handle_task_result(result);
            }
            None => return Err("Timed out waiting for the catalog".into()),
        }
    }

    if let LoadState::Failed(message) = store.load_state() {
        return Err(format!("Failed to load catalog: {message}").into());
    }
    Ok(store)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut settings = SettingsData::load();

    match cli.command {
        Command::List { source, filters, search, sort, desc } => {
            let mut store = load_store(source, &settings)?;
            store.apply_change(CatalogChange::SetFilters(filters.into_filters()?));
            store.apply_change(CatalogChange::SetSearch(search));

            let direction = if desc { SortDirection::Descending } else { SortDirection::Ascending };
            let field = match sort {
                Some(key) => SortField::from_key(&key),
                None => store.sort_state().field,
            };
            store.apply_change(CatalogChange::SetSort(SortState::new(field, direction)));

            println!("{}", display::render_grid(&store.view()));
        }
        Command::Show { id, source } => {
            let store = load_store(source, &settings)?;
            println!("{}", display::render_detail(store.card(&id)?));
        }
        Command::Options { source } => {
            let store = load_store(source, &settings)?;
            println!("{}", display::render_options(&store.options()));
        }
        Command::Extract { dir, output } => {
            let cards = extract_directory(&dir)?;
            let json = export_catalog(&cards)?;
            match output {
                Some(path) => {
                    fs::write(&path, json)?;
                    println!("Extracted {} cards to {}", cards.len(), path.display());
                }
                None => println!("{json}"),
            }
        }
        Command::Config { url, timeout, sort } => {
            let changed = url.is_some() || timeout.is_some() || sort.is_some();
            if let Some(url) = url {
                settings.data_url = url;
            }
            if let Some(timeout) = timeout {
                settings.request_timeout_secs = timeout;
            }
            if let Some(sort) = sort {
                settings.default_sort = sort;
            }
            if changed {
                settings.save()?;
            }
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }

    Ok(())
}
