use journey_engine::board::{BoardClient, BoardConfig};
use journey_engine::cache::{CacheConfig, CachedBoardClient};
use journey_engine::domain::Crs;
use journey_engine::favourites::{FavouritesFile, FavouritesStore};
use journey_engine::results::{JourneyQuery, ResultsEngine};
use journey_engine::stations::{DEFAULT_SUGGESTION_LIMIT, Station, StationCatalog};

/// Default location of the static station catalog.
const DEFAULT_STATIONS_PATH: &str = "data/stations.json";

/// Default location of the saved favourites file.
const DEFAULT_FAVOURITES_PATH: &str = "favourites.json";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let base_url = std::env::var("BOARD_API_URL").unwrap_or_else(|_| {
        eprintln!("Warning: BOARD_API_URL not set. Fetches will fail.");
        String::new()
    });

    let stations_path =
        std::env::var("STATIONS_PATH").unwrap_or_else(|_| DEFAULT_STATIONS_PATH.to_string());
    let favourites_path =
        std::env::var("FAVOURITES_PATH").unwrap_or_else(|_| DEFAULT_FAVOURITES_PATH.to_string());

    let mut args = std::env::args().skip(1);
    let (Some(from_query), Some(to_query)) = (args.next(), args.next()) else {
        eprintln!("Usage: journey-engine <from> <to>");
        eprintln!();
        eprintln!("  <from>, <to>  station name, CRS code, or airport code");
        eprintln!();
        eprintln!("Environment:");
        eprintln!("  BOARD_API_URL    departures endpoint (required)");
        eprintln!("  BOARD_API_KEY    api key passed through to the endpoint");
        eprintln!("  STATIONS_PATH    station catalog (default {DEFAULT_STATIONS_PATH})");
        eprintln!("  FAVOURITES_PATH  saved journeys (default {DEFAULT_FAVOURITES_PATH})");
        std::process::exit(2);
    };

    // Load the station catalog (fail fast if unavailable)
    let catalog = StationCatalog::load(&stations_path).expect("Failed to load station catalog");
    println!("Loaded {} stations", catalog.len());

    let from = resolve_station(&catalog, &from_query);
    let to = resolve_station(&catalog, &to_query);

    // Build the board client
    let mut config = BoardConfig::new(&base_url);
    if let Ok(key) = std::env::var("BOARD_API_KEY") {
        config = config.with_api_key(key);
    }
    let client = BoardClient::new(config).expect("Failed to create board client");
    let cached = CachedBoardClient::new(client, &CacheConfig::default());
    let engine = ResultsEngine::new(cached);

    let favourites = FavouritesStore::open(FavouritesFile::new(&favourites_path));

    let from_crs = Crs::parse(&from.crs_code).expect("catalog produced an invalid CRS code");
    let to_crs = Crs::parse(&to.crs_code).expect("catalog produced an invalid CRS code");

    println!();
    println!(
        "{} ({}) -> {} ({})",
        from.station_name, from.crs_code, to.station_name, to.crs_code
    );
    if favourites.is_favourite(&from_crs, &to_crs) {
        println!("(saved journey)");
    }
    println!();

    let query = JourneyQuery::new(from_crs, to_crs);
    let results = match engine.get_results(&query).await {
        Ok(results) => results,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    if results.is_empty() {
        println!(
            "No direct services found between {} and {} in the next few hours.",
            from.crs_code, to.crs_code
        );
        return;
    }

    for result in &results {
        let dep = &result.departure;
        println!(
            "{:>5}  {:<28} plat {:<4} {}",
            dep.aimed_departure_time.as_deref().unwrap_or("--:--"),
            dep.destination_name.as_deref().unwrap_or("Unknown"),
            dep.platform_display(),
            result.status,
        );

        if let Some(reason) = result.status.reason() {
            println!("       {reason}");
        }
        if result.status.compensation_eligible() {
            println!("       Delay compensation may be available from your operator.");
        }
    }

    println!();
    println!("Updates can be delayed. Check before you travel.");
}

/// Resolve free-text input to a station, trying an exact CRS code first
/// and falling back to catalog search.
fn resolve_station<'a>(catalog: &'a StationCatalog, query: &str) -> &'a Station {
    if let Ok(crs) = Crs::parse(query)
        && let Some(station) = catalog.resolve(&crs)
    {
        return station;
    }

    let suggestions = catalog.search(query, DEFAULT_SUGGESTION_LIMIT);
    match suggestions.first().copied() {
        Some(station) => station,
        None => {
            eprintln!("No station matches '{query}'.");
            std::process::exit(2);
        }
    }
}
