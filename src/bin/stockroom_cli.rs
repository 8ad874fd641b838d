//! Command-line front end for the catalog query engine.
//!
//! Maps subcommands onto the query operations and prints results as compact
//! JSON on stdout, so scripts and probes can consume them without scraping.
//! Lookups that find nothing print `null` and exit zero; "no match" is a
//! normal outcome, not a failure. Only load errors and bad invocations exit
//! nonzero.

use anyhow::{Context, Result, bail};
use stockroom::{CatalogStore, Page, ProductFilter, QueryEngine, resolve_catalog_path, split_list};
use std::env;
use std::path::PathBuf;

const DEFAULT_PAGE_SIZE: usize = 24;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = CliArgs::parse()?;

    let catalog_path = match &cli.catalog {
        Some(path) => path.clone(),
        None => resolve_catalog_path()?,
    };
    let store = CatalogStore::load(&catalog_path)?;
    let engine = QueryEngine::new(&store);

    let output = match &cli.command {
        Command::Products { page, filter, sort_by } => {
            let listed = engine.list_products(*page, sort_by.as_deref(), filter);
            serde_json::to_value(&listed)?
        }
        Command::Count { filter } => serde_json::to_value(engine.count_products(filter))?,
        Command::Product { slug } => serde_json::to_value(engine.product(slug))?,
        Command::Manufacturers => serde_json::to_value(engine.manufacturers())?,
        Command::Manufacturer { id } => serde_json::to_value(engine.manufacturer(id))?,
        Command::Categories => serde_json::to_value(engine.categories())?,
        Command::Category { slug } => serde_json::to_value(engine.category(slug))?,
        Command::Formats { slugs } => serde_json::to_value(engine.formats(slugs.as_deref()))?,
        Command::Format { slug } => serde_json::to_value(engine.format(slug))?,
        Command::SortOptions => serde_json::to_value(engine.sort_options())?,
    };

    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

enum Command {
    Products {
        page: Page,
        sort_by: Option<String>,
        filter: ProductFilter,
    },
    Count {
        filter: ProductFilter,
    },
    Product {
        slug: String,
    },
    Manufacturers,
    Manufacturer {
        id: String,
    },
    Categories,
    Category {
        slug: String,
    },
    Formats {
        slugs: Option<Vec<String>>,
    },
    Format {
        slug: String,
    },
    SortOptions,
}

struct CliArgs {
    catalog: Option<PathBuf>,
    command: Command,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let command_name = match args.next() {
            Some(raw) => into_string(raw)?,
            None => {
                print_usage();
                std::process::exit(2);
            }
        };

        if matches!(command_name.as_str(), "--help" | "-h" | "help") {
            print_usage();
            std::process::exit(0);
        }

        let mut catalog: Option<PathBuf> = None;
        let mut positional: Option<String> = None;
        let mut page_number: usize = 1;
        let mut page_size: usize = DEFAULT_PAGE_SIZE;
        let mut sort_by: Option<String> = None;
        let mut category: Option<String> = None;
        let mut formats: Option<Vec<String>> = None;
        let mut manufacturers: Option<Vec<String>> = None;
        let mut slugs: Option<Vec<String>> = None;

        while let Some(arg_os) = args.next() {
            let arg = into_string(arg_os)?;
            match arg.as_str() {
                "--catalog" => {
                    catalog = Some(PathBuf::from(next_value(&mut args, "--catalog")?));
                }
                "--page" => {
                    page_number = parse_positive(&next_value(&mut args, "--page")?, "--page")?;
                }
                "--per-page" => {
                    page_size =
                        parse_positive(&next_value(&mut args, "--per-page")?, "--per-page")?;
                }
                "--sort-by" => {
                    sort_by = Some(next_value(&mut args, "--sort-by")?);
                }
                "--category" => {
                    category = Some(next_value(&mut args, "--category")?);
                }
                "--formats" => {
                    formats = Some(split_list(&next_value(&mut args, "--formats")?));
                }
                "--manufacturers" => {
                    manufacturers = Some(split_list(&next_value(&mut args, "--manufacturers")?));
                }
                "--slugs" => {
                    slugs = Some(split_list(&next_value(&mut args, "--slugs")?));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other if other.starts_with('-') => bail!("unknown flag: {other}"),
                other => {
                    if positional.is_some() {
                        bail!("unexpected extra argument: {other}");
                    }
                    positional = Some(other.to_string());
                }
            }
        }

        let filter = ProductFilter {
            category,
            formats,
            manufacturers,
        };

        let command = match command_name.as_str() {
            "products" => Command::Products {
                page: Page::new(page_number, page_size),
                sort_by,
                filter,
            },
            "count" => Command::Count { filter },
            "product" => Command::Product {
                slug: required_positional(positional, "product", "slug")?,
            },
            "manufacturers" => Command::Manufacturers,
            "manufacturer" => Command::Manufacturer {
                id: required_positional(positional, "manufacturer", "id")?,
            },
            "categories" => Command::Categories,
            "category" => Command::Category {
                slug: required_positional(positional, "category", "slug")?,
            },
            "formats" => Command::Formats { slugs },
            "format" => Command::Format {
                slug: required_positional(positional, "format", "slug")?,
            },
            "sort-options" => Command::SortOptions,
            other => bail!("unknown command: {other} (see --help)"),
        };

        Ok(CliArgs { catalog, command })
    }
}

fn required_positional(value: Option<String>, command: &str, what: &str) -> Result<String> {
    value.ok_or_else(|| anyhow::anyhow!("'{command}' requires a {what} argument"))
}

fn parse_positive(raw: &str, flag: &str) -> Result<usize> {
    let value: usize = raw
        .parse()
        .with_context(|| format!("{flag} expects a positive integer, got '{raw}'"))?;
    if value == 0 {
        bail!("{flag} must be at least 1");
    }
    Ok(value)
}

fn into_string(raw: std::ffi::OsString) -> Result<String> {
    raw.into_string()
        .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))
}

fn next_value(args: &mut impl Iterator<Item = std::ffi::OsString>, flag: &str) -> Result<String> {
    args.next()
        .map(into_string)
        .transpose()?
        .ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))
}

fn usage() -> &'static str {
    "Usage: stockroom <command> [--catalog PATH] [flags]\n\
Commands:\n\
  products        [--page N] [--per-page N] [--sort-by KEY] [--category SLUG] [--formats LIST] [--manufacturers LIST]\n\
  count           [--category SLUG] [--formats LIST] [--manufacturers LIST]\n\
  product SLUG\n\
  manufacturers\n\
  manufacturer ID\n\
  categories\n\
  category SLUG\n\
  formats         [--slugs LIST]\n\
  format SLUG\n\
  sort-options\n\
Lists are comma- or whitespace-delimited. Omitting a facet flag means no\n\
filter; passing an empty list filters to nothing. Results print as compact\n\
JSON; absent lookups print null.\n"
}

fn print_usage() {
    print!("{}", usage());
}
