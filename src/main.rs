use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use dinewise::prelude::*;
use dinewise_core::format_cost;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Recommend similar restaurants from a static catalog
#[derive(Parser, Debug)]
#[command(name = "dinewise")]
#[command(about = "Content-based restaurant recommender", long_about = None)]
struct Args {
    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recommend restaurants similar to a seed, or a random pick with --seed All
    Recommend(RecommendArgs),
    /// List the cities, cuisines and cost bounds available as filters
    Options {
        /// Path to the catalog JSON file
        #[arg(short, long)]
        catalog: PathBuf,

        /// Report cost bounds and currency for this city, or "All"
        #[arg(long, default_value = "All")]
        city: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(ClapArgs, Debug)]
struct RecommendArgs {
    /// Path to the catalog JSON file
    #[arg(short, long)]
    catalog: PathBuf,

    /// Seed restaurant name, or "All" for a random selection
    #[arg(short, long, default_value = "All")]
    seed: String,

    /// City filter, or "All"
    #[arg(long, default_value = "All")]
    city: String,

    /// Cuisine filter, or "All"
    #[arg(long, default_value = "All")]
    cuisine: String,

    /// Lowest average cost for two (defaults to the city's minimum)
    #[arg(long)]
    min_cost: Option<f64>,

    /// Highest average cost for two (defaults to the city's maximum)
    #[arg(long)]
    max_cost: Option<f64>,

    /// Number of restaurants to return
    #[arg(short = 'n', long, default_value_t = 3)]
    top_n: usize,

    /// Seed for the random source, for reproducible random picks
    #[arg(long)]
    rng_seed: Option<u64>,

    /// Match the cuisine anywhere in a restaurant's cuisine list instead of exactly
    #[arg(long)]
    substring_cuisine: bool,

    /// List the shared terms behind each similarity score
    #[arg(long)]
    explain: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::Recommend(cmd) => run_recommend(cmd),
        Command::Options { catalog, city, json } => run_options(catalog, &city, json),
    }
}

fn run_recommend(cmd: RecommendArgs) -> anyhow::Result<()> {
    let catalog = CatalogLoader::from_path(&cmd.catalog)
        .with_context(|| format!("failed to load catalog {}", cmd.catalog.display()))?;
    let index = build_index(&catalog)?;

    let city = Selector::parse(&cmd.city);
    let bounds = catalog.cost_bounds_in(&city).unwrap_or_default();
    let constraints = QueryConstraints::default()
        .with_city(city)
        .with_cuisine(cmd.cuisine.as_str())
        .with_cost(CostRange::new(
            cmd.min_cost.unwrap_or(bounds.min),
            cmd.max_cost.unwrap_or(bounds.max),
        ))
        .with_top_n(cmd.top_n);

    let engine = Recommender::new(RecommenderConfig {
        cuisine_match: if cmd.substring_cuisine {
            CuisineMatch::Substring
        } else {
            CuisineMatch::Exact
        },
    });

    let mut rng = match cmd.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let seed = Seed::parse(&cmd.seed);
    info!(?seed, ?constraints, "Running recommendation query");
    let results = engine.recommend(&seed, &index, &catalog, &constraints, &mut rng)?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else if results.is_empty() {
        println!("No restaurants match the selected filters.");
    } else {
        print_table(&results);
        if cmd.explain {
            if let Seed::Restaurant(name) = &seed {
                print_explanation(&index, name, &results)?;
            }
        }
    }

    Ok(())
}

fn run_options(path: PathBuf, city_name: &str, json: bool) -> anyhow::Result<()> {
    let catalog = CatalogLoader::from_path(&path)
        .with_context(|| format!("failed to load catalog {}", path.display()))?;
    let city = Selector::parse(city_name);
    let bounds = catalog
        .cost_bounds_in(&city)
        .with_context(|| format!("no restaurants in city '{}'", city_name.trim()))?;
    let currency = catalog.currency_in(&city);

    if json {
        let options = serde_json::json!({
            "cities": catalog.cities(),
            "cuisines": catalog.cuisines(),
            "city": city,
            "cost": { "min": bounds.min, "max": bounds.max },
            "currency": currency,
        });
        println!("{}", serde_json::to_string_pretty(&options)?);
    } else {
        println!("Cities:   {}", catalog.cities().join(", "));
        println!("Cuisines: {}", catalog.cuisines().join(", "));
        println!(
            "Cost:     {} - {} ({})",
            format_cost(bounds.min),
            format_cost(bounds.max),
            currency.unwrap_or("Mixed Currencies")
        );
    }

    Ok(())
}

fn print_explanation(index: &FeatureIndex, seed: &str, results: &[RestaurantSummary]) -> anyhow::Result<()> {
    let seed_row = index.resolve(seed)?;
    println!();
    for r in results {
        let row = index.resolve(&r.name)?;
        let terms = index
            .shared_terms(seed_row, row)
            .unwrap_or_default()
            .iter()
            .map(|(term, weight)| format!("{} {:.3}", term, weight))
            .collect::<Vec<_>>();
        println!("{:<32} {}", r.name, terms.join(", "));
    }
    Ok(())
}

fn print_table(results: &[RestaurantSummary]) {
    println!(
        "{:<32} {:<20} {:<36} {:>10} {:<8} {:>6}",
        "Restaurant", "City", "Cuisines", "Cost", "Currency", "Score"
    );
    for r in results {
        let score = r.score.map(|s| format!("{:.3}", s)).unwrap_or_else(|| "-".to_string());
        println!(
            "{:<32} {:<20} {:<36} {:>10} {:<8} {:>6}",
            r.name,
            r.city,
            r.cuisines.join(", "),
            format_cost(r.average_cost_for_two),
            r.currency,
            score
        );
    }
}
