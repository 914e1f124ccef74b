mod args;
mod output;

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use moji::expand::{Engine, Outcome};
use moji::prelude::*;
use moji::text::{AttributedString, Style, StyledText};
use rayon::prelude::*;
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::{DirEntry, WalkDir};

pub use args::{Arguments, Command};

/// File extensions picked up when walking a directory.
const EXTENSIONS: [&str; 2] = ["md", "txt"];

/// Sets up `tracing` (filtered through [`LOG_ENV_VAR`], `info` by default) and `color-eyre`.
pub fn install_logging() -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(ErrorLayer::default())
        .init();

    color_eyre::install()
}

/// Loads the configuration at `path`, or failing that the nearest `moji.toml`.
/// Falls back on defaults if there is none.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::from_path(path);
    }

    match try_locate_config(&env::current_dir()?) {
        Some(path) => {
            debug!("Using configuration at {}.", path.display());
            Config::from_path(&path)
        }
        None => {
            debug!("No {CONFIG_FILENAME} found, using defaults.");
            Ok(Config::default())
        }
    }
}

fn try_locate_config(start: &Path) -> Option<PathBuf> {
    let mut path: PathBuf = start.into();
    let target = Path::new(CONFIG_FILENAME);

    loop {
        path.push(target);

        if path.is_file() {
            break Some(path);
        }

        if !(path.pop() && path.pop()) {
            break None;
        }
    }
}

/// An expanded file, ready to print.
struct Expanded {
    path: PathBuf,
    rendered: String,
    outcome: Outcome,
    unresolved: Vec<String>,
}

pub fn expand(config: &Config, paths: &[PathBuf], scale: Option<f64>) -> Result<()> {
    let mut rendering = config.rendering;
    if let Some(scale) = scale {
        rendering.scale = scale;
        rendering.validate()?;
    }

    let catalog = config.catalog();
    let engine = Engine::new(&catalog, rendering).with_code_spans(config.code.detector());
    let style = config.style();

    let files = collect_files(paths)?;
    info!("Expanding {} file(s)...", files.len());

    let expanded: Vec<Expanded> = files
        .into_par_iter()
        .map(|path| expand_file(&engine, path, style.clone()))
        .collect::<Result<_>>()?;

    for file in &expanded {
        if !file.unresolved.is_empty() {
            warn!(
                "{}: unresolved shortcode(s) {}",
                file.path.display(),
                file.unresolved.iter().unique().join(", ")
            );
        }

        output::header(&file.path, file.outcome.substituted, file.outcome.unresolved.len());
        println!("{}", file.rendered);
    }

    let total: usize = expanded.iter().map(|file| file.outcome.substituted).sum();
    info!("Done, expanded {total} shortcode(s) across {} file(s).", expanded.len());
    Ok(())
}

fn expand_file(engine: &Engine<'_>, path: PathBuf, style: Option<Style>) -> Result<Expanded> {
    let raw = std::fs::read_to_string(&path)
        .wrap_err_with(|| format!("Could not read {}.", path.display()))?;

    let mut text = AttributedString::new(&raw, style);
    let outcome = engine
        .run(&mut text)
        .wrap_err_with(|| format!("Failed to expand {}.", path.display()))?;

    debug!("Expanded {} ({} substitution(s)).", path.display(), outcome.substituted);

    let unresolved = outcome
        .unresolved
        .iter()
        .map(|range| text.substring(range.clone()).as_str().to_owned())
        .collect();

    let rendered = output::render(&text, engine.encoder())?;

    Ok(Expanded {
        path,
        rendered,
        outcome,
        unresolved,
    })
}

/// Expands `paths` into a sorted list of files, walking directories for [`EXTENSIONS`].
fn collect_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }

        ensure!(path.is_dir(), "No such file or directory: {}.", path.display());

        for entry in WalkDir::new(path) {
            let entry = entry.wrap_err("Failed to walk input directory.")?;
            if is_text_file(&entry) {
                files.push(entry.into_path());
            }
        }
    }

    files.sort_unstable();
    files.dedup();
    Ok(files)
}

fn is_text_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file()
        && entry
            .path()
            .extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| EXTENSIONS.contains(&ext))
}

pub fn lookup(config: &Config, name: &str) -> Result<()> {
    let name = name.trim_matches(':');
    let catalog = config.catalog();

    let (Some(source), Some(resolved)) = (catalog.get(name), catalog.resolve(name)) else {
        let err = eyre!("No emoji is named :{name}:.")
            .suggestion("Shortcode names are case-sensitive. Custom emoji can be added under [emoji] in moji.toml.");
        return Err(err);
    };

    output::lookup(name, &source, &resolved);
    Ok(())
}
