use anyhow::Context;
use data_loader::BaseTable;
use std::path::Path;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    let movies = Path::new("data/imdb_2011-2020.csv");
    let regions = Path::new("data/country_codes.csv");

    println!("Loading IMDb 2011-2020 dataset...\n");

    let start = Instant::now();
    let table = BaseTable::load_from_files(movies, regions)
        .context("Failed to load dataset")?;
    let elapsed = start.elapsed();

    let (rows, titles, actors) = table.counts();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Rows: {}", rows);
    println!("Movies: {}", titles);
    println!("Actors: {}", actors);
    println!("Genres: {}", table.genres().len());
    println!("Regions: {}", table.region_names().len());
    println!("\nPerformance: {:.0} rows/second",
             rows as f64 / elapsed.as_secs_f64());
    Ok(())
}
