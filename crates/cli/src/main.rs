use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use dashboard::{
    DashboardDefaults, DashboardInputs, DashboardOrchestrator, DashboardSnapshot, PanelResult,
    UpdateOutcome,
};
use data_loader::{BaseTable, Year};
use pipeline::{filter, FilterState, FilteredView, YearRange};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use transforms::{
    distribution, ranking, summarize, top_per_region, trend, Kpis, Metric, RankedActor,
    RatingDistribution, TopMovie, TopN, TrendSeries,
};

/// imdb-dash - IMDb 2011-2020 movie analytics
#[derive(Parser)]
#[command(name = "imdb-dash")]
#[command(about = "Ratings and runtimes by genre and region, computed from the IMDb dataset", long_about = None)]
struct Cli {
    /// Path to the movies CSV
    #[arg(long, default_value = "data/imdb_2011-2020.csv", global = true)]
    movies: PathBuf,

    /// Path to the region code CSV
    #[arg(long, default_value = "data/country_codes.csv", global = true)]
    regions: PathBuf,

    /// Print panels as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(flatten)]
    selection: SelectionArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Filter and parameter flags; anything left out uses the dashboard defaults
#[derive(Args)]
struct SelectionArgs {
    /// Genre to include (repeatable)
    #[arg(long = "genre", global = true)]
    genres: Vec<String>,

    /// Region name to include (repeatable)
    #[arg(long = "region", global = true)]
    region_names: Vec<String>,

    /// First year of the range, inclusive
    #[arg(long, default_value_t = DashboardDefaults::YEAR_MIN, global = true)]
    year_min: Year,

    /// Last year of the range, inclusive
    #[arg(long, default_value_t = DashboardDefaults::YEAR_MAX, global = true)]
    year_max: Year,

    /// Trend metric: averageRating or runtimeMinutes
    #[arg(long, default_value = "averageRating", global = true)]
    metric: String,

    /// Number of actors in the ranking (1-15)
    #[arg(long, default_value_t = TopN::DEFAULT, global = true)]
    top_n: usize,
}

impl SelectionArgs {
    /// Validate the flags into dashboard inputs
    fn to_inputs(&self) -> Result<DashboardInputs> {
        let year_range = YearRange::checked(self.year_min, self.year_max)
            .context("Invalid --year-min/--year-max")?;
        let metric: Metric = self.metric.parse().context("Invalid --metric")?;
        let top_n = TopN::new(self.top_n).context("Invalid --top-n")?;

        let genres: Vec<String> = if self.genres.is_empty() {
            DashboardDefaults::GENRES.iter().map(|g| g.to_string()).collect()
        } else {
            self.genres.clone()
        };
        let regions: Vec<String> = if self.region_names.is_empty() {
            DashboardDefaults::REGIONS.iter().map(|r| r.to_string()).collect()
        } else {
            self.region_names.clone()
        };

        Ok(DashboardInputs::new(
            FilterState::new(genres, regions, year_range),
            metric,
            top_n,
        ))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List the genres, regions and years that can be selected
    Options,

    /// Movie and actor counts, mean runtime and rating
    Summary,

    /// Rating distribution per genre
    Distribution,

    /// Yearly mean of the metric per genre
    Trend,

    /// Top actors by mean rating
    Ranking,

    /// Top rated movie in each region (ignores the selection)
    Geo,

    /// Every panel, computed through the dashboard orchestrator
    Dashboard,

    /// Run random concurrent dashboard updates
    Benchmark {
        /// Number of updates to make
        #[arg(long, default_value = "100")]
        requests: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Validate flags before the (slower) load
    let inputs = cli.selection.to_inputs()?;
    tracing::debug!("Selection: {:?}", inputs);

    if !cli.json {
        println!("Loading IMDb dataset from {}...", cli.movies.display());
    }
    let start = Instant::now();
    let base = Arc::new(
        BaseTable::load_from_files(&cli.movies, &cli.regions)
            .context("Failed to load IMDb dataset")?,
    );
    if !cli.json {
        let (rows, titles, actors) = base.counts();
        println!(
            "{} Loaded {} rows ({} movies, {} actors) in {:?}",
            "✓".green(),
            rows,
            titles,
            actors,
            start.elapsed()
        );
    }

    match cli.command {
        Commands::Options => handle_options(&base, cli.json)?,
        Commands::Summary => {
            let kpis = summarize(&select(&base, &inputs));
            emit(cli.json, &kpis, print_kpis)?
        }
        Commands::Distribution => {
            let dist = distribution(&select(&base, &inputs));
            emit(cli.json, &dist, print_distribution)?
        }
        Commands::Trend => {
            let series = trend(&select(&base, &inputs), inputs.metric);
            emit(cli.json, &series, print_trend)?
        }
        Commands::Ranking => {
            let ranked = ranking(&select(&base, &inputs), inputs.top_n);
            emit(cli.json, &ranked, |r| print_ranking(r))?
        }
        Commands::Geo => {
            let geo = top_per_region(&base);
            emit(cli.json, &geo, print_geo)?
        }
        Commands::Dashboard => handle_dashboard(base, inputs, cli.json).await?,
        Commands::Benchmark { requests } => handle_benchmark(base, requests).await?,
    }

    Ok(())
}

fn select(base: &Arc<BaseTable>, inputs: &DashboardInputs) -> FilteredView {
    filter(base, &inputs.filter)
}

/// Print `value` as JSON or with the panel's text printer
fn emit<T: serde::Serialize + ?Sized>(json: bool, value: &T, print: impl Fn(&T)) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print(value);
    }
    Ok(())
}

/// Handle the 'options' command
fn handle_options(base: &BaseTable, json: bool) -> Result<()> {
    let genres = base.genres();
    let regions = base.region_names();
    let years = base.year_bounds();

    if json {
        let value = json!({
            "genres": genres,
            "regions": regions,
            "years": years.map(|(min, max)| json!({ "min": min, "max": max })),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", "Genres:".bold().blue());
    println!("  {}", genres.join(", "));
    println!("{}", "Regions:".bold().blue());
    for region in &regions {
        println!("  {}", region);
    }
    if let Some((min, max)) = years {
        println!("{} {} - {}", "Years:".bold().blue(), min, max);
    }
    Ok(())
}

/// Handle the 'dashboard' command
async fn handle_dashboard(base: Arc<BaseTable>, inputs: DashboardInputs, json: bool) -> Result<()> {
    let orchestrator = DashboardOrchestrator::new(base).await?;

    let snapshot = match orchestrator.update(inputs).await? {
        UpdateOutcome::Published(snapshot) => snapshot,
        UpdateOutcome::Superseded { generation } => {
            bail!("Dashboard update {} was superseded", generation)
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot_json(&snapshot)?)?);
        return Ok(());
    }

    println!(
        "{}",
        format!("IMDb dashboard ({} rows selected)", snapshot.view_rows).bold().blue()
    );
    print_panel("Summary", &snapshot.kpis, print_kpis);
    print_panel("Rating distribution", &snapshot.distribution, print_distribution);
    print_panel("Trend", &snapshot.trend, print_trend);
    print_panel("Top actors", &snapshot.ranking, |r: &Vec<RankedActor>| print_ranking(r));
    println!();
    print_geo(&snapshot.geo);
    Ok(())
}

fn panel_json<T: serde::Serialize>(panel: &PanelResult<T>) -> Result<Value> {
    Ok(match panel {
        Ok(value) => serde_json::to_value(&**value)?,
        Err(err) => json!({ "error": err.to_string() }),
    })
}

fn snapshot_json(snapshot: &DashboardSnapshot) -> Result<Value> {
    Ok(json!({
        "generation": snapshot.generation,
        "inputs": serde_json::to_value(&snapshot.inputs)?,
        "viewRows": snapshot.view_rows,
        "kpis": panel_json(&snapshot.kpis)?,
        "distribution": panel_json(&snapshot.distribution)?,
        "trend": panel_json(&snapshot.trend)?,
        "ranking": panel_json(&snapshot.ranking)?,
        "geo": serde_json::to_value(&*snapshot.geo)?,
    }))
}

fn print_panel<T>(name: &str, panel: &PanelResult<T>, print: impl Fn(&T)) {
    println!();
    match panel {
        Ok(value) => print(&**value),
        Err(err) => println!("{} {}: {}", "✗".red(), name, err),
    }
}

fn print_kpis(kpis: &Kpis) {
    let dash = || "-".to_string();
    println!("{}", "Summary:".bold().blue());
    println!("{}Movies: {}", "• ".green(), kpis.movie_count);
    println!("{}Actors: {}", "• ".green(), kpis.actor_count);
    println!(
        "{}Average runtime: {}",
        "• ".cyan(),
        kpis.avg_runtime.map(|m| format!("{} min", m)).unwrap_or_else(dash)
    );
    println!(
        "{}Average rating: {}",
        "• ".cyan(),
        kpis.avg_rating.map(|r| format!("{:.1}", r)).unwrap_or_else(dash)
    );
}

fn print_distribution(dist: &RatingDistribution) {
    println!("{}", "Rating distribution by genre:".bold().blue());
    if dist.is_empty() {
        println!("  (no data)");
    }
    for genre in &dist.summaries {
        let s = &genre.summary;
        println!(
            "  {:<12} n={:<5} min {:.1}  q1 {:.2}  median {:.2}  q3 {:.2}  max {:.1}",
            genre.genre, genre.count, s.min, s.q1, s.median, s.q3, s.max
        );
    }
}

fn print_trend(series: &TrendSeries) {
    println!(
        "{}",
        format!("{} by Genre over Time", series.metric.title()).bold().blue()
    );
    println!("  ({})", series.metric.axis_label());
    if series.is_empty() {
        println!("  (no data)");
    }
    for genre in series.genres() {
        let points = series
            .series(genre)
            .map(|p| format!("{}: {:.2}", p.year, p.value))
            .collect::<Vec<_>>()
            .join(", ");
        println!("  {:<12} {}", genre, points);
    }
}

fn print_ranking(ranked: &[RankedActor]) {
    println!("{}", "Top actors by mean rating:".bold().blue());
    if ranked.is_empty() {
        println!("  (no data)");
    }
    for (i, actor) in ranked.iter().enumerate() {
        println!(
            "{}. {} - {:.1} ({}, mean {:.2})",
            (i + 1).to_string().green(),
            actor.actor_name,
            actor.movie_rating,
            actor.title,
            actor.avg_rating
        );
    }
}

fn print_geo(geo: &BTreeMap<String, TopMovie>) {
    println!("{}", "Top rated movie in each region:".bold().blue());
    for (code, movie) in geo {
        println!(
            "  {} {:<28} {} ({:.1})",
            code,
            movie.region_name,
            movie.title,
            movie.average_rating
        );
    }
}

/// Pick `1..=len` distinct random entries of `options`
fn random_subset(rng: &mut impl Rng, options: &[String]) -> Vec<String> {
    if options.is_empty() {
        return Vec::new();
    }
    let count = rng.random_range(1..=options.len());
    options.choose_multiple(rng, count).cloned().collect()
}

/// Handle the 'benchmark' command
async fn handle_benchmark(base: Arc<BaseTable>, requests: usize) -> Result<()> {
    if requests == 0 {
        bail!("--requests must be at least 1");
    }
    let orchestrator = Arc::new(DashboardOrchestrator::new(base.clone()).await?);

    // Random selections over the real options
    let genres = base.genres();
    let regions = base.region_names();
    let (first_year, last_year) = base.year_bounds().unwrap_or((
        DashboardDefaults::YEAR_MIN,
        DashboardDefaults::YEAR_MAX,
    ));
    let all_inputs: Vec<DashboardInputs> = {
        let mut rng = rand::rng();
        (0..requests)
            .map(|_| {
                let min = rng.random_range(first_year..=last_year);
                let max = rng.random_range(min..=last_year);
                let metric = Metric::ALL[rng.random_range(0..Metric::ALL.len())];
                let top_n = TopN::new(rng.random_range(TopN::MIN..=TopN::MAX)).unwrap_or_default();
                DashboardInputs::new(
                    FilterState::new(
                        random_subset(&mut rng, &genres),
                        random_subset(&mut rng, &regions),
                        YearRange::new(min, max),
                    ),
                    metric,
                    top_n,
                )
            })
            .collect()
    };

    // Use tokio::spawn to make concurrent updates
    let total_start = Instant::now();
    let mut handles = vec![];
    for inputs in all_inputs {
        let orchestrator = orchestrator.clone();
        let handle = tokio::spawn(async move {
            let start = Instant::now();
            let outcome = orchestrator.update(inputs).await?;
            Ok::<_, anyhow::Error>((start.elapsed(), outcome.is_superseded()))
        });
        handles.push(handle);
    }

    let mut timings: Vec<Duration> = vec![];
    let mut superseded = 0usize;
    for handle in handles {
        let (elapsed, was_superseded) = handle.await??;
        timings.push(elapsed);
        if was_superseded {
            superseded += 1;
        }
    }
    let wall_time = total_start.elapsed();

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let percentile = |p: f64| timings[((timings.len() - 1) as f64 * p) as usize];
    let (hits, misses) = orchestrator.cache_stats();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Wall time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!(
        "Throughput: {:.2} updates/second",
        requests as f64 / wall_time.as_secs_f64()
    );
    println!(
        "Published: {}, superseded: {}",
        requests - superseded,
        superseded
    );
    println!("View cache: {} hits, {} misses", hits, misses);

    Ok(())
}
