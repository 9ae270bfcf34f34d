use anyhow::{Context, Result};
use nevula_config::{Config, expand_path};
use nevula_syntax::{Entity, add_text_spans, parse_markup_with};
use std::{env, fs, path::PathBuf, process};

const USAGE: &str = "Usage: nevula <input> [--format tree|json] [--config <path>] [--output <path>]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Tree,
    Json,
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    input: PathBuf,
    format: Format,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
}

impl Args {
    fn parse(args: &[String]) -> Result<Self, String> {
        let mut input = None;
        let mut format = Format::Tree;
        let mut config = None;
        let mut output = None;

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--format" => {
                    format = match iter.next().map(String::as_str) {
                        Some("tree") => Format::Tree,
                        Some("json") => Format::Json,
                        Some(other) => return Err(format!("unknown format '{other}'")),
                        None => return Err("--format needs a value".to_string()),
                    };
                }
                "--config" => {
                    let path = iter.next().ok_or("--config needs a path")?;
                    config = Some(expand_path(path.as_ref()));
                }
                "--output" => {
                    let path = iter.next().ok_or("--output needs a path")?;
                    output = Some(expand_path(path.as_ref()));
                }
                flag if flag.starts_with("--") => return Err(format!("unknown option '{flag}'")),
                path if input.is_none() => input = Some(expand_path(path.as_ref())),
                extra => return Err(format!("unexpected argument '{extra}'")),
            }
        }

        let input = input.ok_or("no input file given")?;
        Ok(Self {
            input,
            format,
            config,
            output,
        })
    }
}

/// Explicit config must exist; the default location is optional.
fn load_config(explicit: Option<&PathBuf>) -> Result<Config> {
    match explicit {
        Some(path) => Config::load_from_path(path)?
            .with_context(|| format!("Config file '{}' does not exist", path.display())),
        None => {
            let config_path = Config::config_path();
            match Config::load_from_path(&config_path)? {
                Some(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    Ok(config)
                }
                None => Ok(Config::default()),
            }
        }
    }
}

fn render(text: &str, tree: &Entity, format: Format) -> Result<String> {
    match format {
        Format::Tree => Ok(tree.dump(text)),
        Format::Json => {
            let mut json = serde_json::to_string_pretty(tree)?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_ref())?;

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read '{}'", args.input.display()))?;
    log::info!("Read {} bytes from {}", text.len(), args.input.display());

    let tree = add_text_spans(parse_markup_with(&text, &config.parse_options()));
    let rendered = render(&text, &tree, args.format)?;

    match &args.output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            log::info!("Wrote {:?} output to {}", args.format, path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let args = match Args::parse(&args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(2);
        }
    };

    run(args)
}
