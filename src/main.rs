use anyhow::{Context, Result, bail};
use moviedeck::{
    AppConfig, MovieStore, SearchDebouncer, TmdbClient,
    catalog::{ImageConfig, Movie, MovieDetails, MovieSection, format},
    logging,
    store::FileStorage,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

const USAGE: &str = "\
Usage: moviedeck [--config <file>] <command>

Commands:
  popular [section]   list popular movies (trending, recommended, latest, top-rated)
  search <query>      search movies by title
  watch               search as you type, one query per line
  details <id>        show one movie
  favorite <id>       add or remove a favorite
  favorites           list favorites
  theme               toggle dark mode
  config              print the effective configuration";

enum Command {
    Popular(MovieSection),
    Search(String),
    Watch,
    Details(i64),
    Favorite(i64),
    Favorites,
    Theme,
}

impl Command {
    fn parse(args: &[String]) -> Result<Self> {
        let Some((name, rest)) = args.split_first() else {
            bail!("{USAGE}");
        };

        let command = match name.as_str() {
            "popular" => Self::Popular(
                rest.first()
                    .map(|s| MovieSection::from_route(s))
                    .unwrap_or_default(),
            ),
            "search" if !rest.is_empty() => Self::Search(rest.join(" ")),
            "watch" => Self::Watch,
            "details" => Self::Details(parse_id(rest)?),
            "favorite" => Self::Favorite(parse_id(rest)?),
            "favorites" => Self::Favorites,
            "theme" => Self::Theme,
            _ => bail!("{USAGE}"),
        };
        Ok(command)
    }
}

fn parse_id(rest: &[String]) -> Result<i64> {
    let raw = rest.first().context("missing movie id")?;
    raw.parse()
        .with_context(|| format!("invalid movie id '{raw}'"))
}

/// Remove `--flag value` from `args`, returning the value
fn take_flag(args: &mut Vec<String>, flag: &str) -> Option<String> {
    let index = args.iter().position(|a| a == flag)?;
    args.remove(index);
    (index < args.len()).then(|| args.remove(index))
}

fn print_movies(store: &MovieStore, movies: &[Movie]) {
    if movies.is_empty() {
        println!("  (no movies)");
        return;
    }
    for movie in movies {
        let year = movie
            .release_year()
            .map(|y| y.to_string())
            .unwrap_or_else(|| "----".to_string());
        let marker = if store.is_favorite(movie.id) { "♥" } else { " " };
        println!(
            "{marker} {:>8}  {} ({year})  ★ {}",
            movie.id,
            movie.title,
            format::format_rating(movie.vote_average)
        );
    }
}

fn print_details(details: &MovieDetails, images: &ImageConfig) {
    let movie = &details.movie;
    match movie.release_year() {
        Some(year) => println!("{} ({year})", movie.title),
        None => println!("{}", movie.title),
    }
    if let Some(runtime) = details.runtime {
        println!("Runtime: {}", format::format_runtime(runtime));
    }
    println!("Rating:  {} ({} votes)", format::format_rating(movie.vote_average), movie.vote_count);
    println!("Genres:  {}", details.genre_names().join(", "));
    println!("Director: {}", details.directors().join(", "));
    if let Some(url) = images.poster_url(movie.poster_path.as_deref()) {
        println!("Poster:  {url}");
    }
    if let Some(url) = details.trailer_url() {
        println!("Trailer: {url}");
    }
    println!();
    println!("{}", movie.overview);
    println!();
    println!("Cast:");
    for cast in details.top_cast(10) {
        println!("  {} as {}", cast.name, cast.character);
    }
}

async fn run(
    command: Command,
    store: &Arc<MovieStore>,
    images: &ImageConfig,
    config: &AppConfig,
) -> Result<()> {
    match command {
        Command::Popular(section) => {
            store.fetch_popular_movies().await;
            report_error(store);
            println!("{section}");
            print_movies(store, section.select(&store.popular_movies()));
        }
        Command::Search(query) => {
            store.search_movies(&query).await;
            report_error(store);
            print_movies(store, &store.search_results());
        }
        Command::Watch => watch(store, config).await?,
        Command::Details(id) => {
            store.fetch_movie_details(id).await;
            report_error(store);
            if let Some(details) = store.movie_details() {
                print_details(&details, images);
            }
        }
        Command::Favorite(id) => {
            store.fetch_movie_details(id).await;
            match store.movie_details() {
                Some(details) => {
                    let title = details.movie.title.clone();
                    if store.toggle_favorite(details.to_movie()) {
                        println!("Added '{title}' to favorites");
                    } else {
                        println!("Removed '{title}' from favorites");
                    }
                }
                None => report_error(store),
            }
        }
        Command::Favorites => print_movies(store, &store.favorites()),
        Command::Theme => {
            let dark = store.toggle_theme();
            println!("Theme: {}", if dark { "dark" } else { "light" });
        }
    }
    Ok(())
}

fn report_error(store: &MovieStore) {
    if let Some(error) = store.error() {
        eprintln!("error: {error}");
    }
}

/// Feed stdin lines through the debouncer and print results as they change
async fn watch(store: &Arc<MovieStore>, config: &AppConfig) -> Result<()> {
    let debouncer = SearchDebouncer::with_delay(store.clone(), config.search_debounce());
    let mut updates = store.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut shown: Vec<i64> = Vec::new();

    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => debouncer.on_input(&line),
                None => break,
            },
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let results = updates.borrow_and_update().session.search_results.clone();
                let ids: Vec<i64> = results.iter().map(|m| m.id).collect();
                if ids != shown {
                    shown = ids;
                    print_movies(store, &results);
                }
            }
        }
    }

    debouncer.cancel();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let config_path = take_flag(&mut args, "--config").map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref()).context("loading configuration")?;
    let _guard = logging::init(&config.logging)?;

    // Needs neither an API key nor storage
    if args.first().is_some_and(|a| a == "config") {
        print!("{}", config.to_toml()?);
        return Ok(());
    }
    let command = Command::parse(&args)?;

    let client = TmdbClient::new(config.provider_config())?;
    let images = client.images().clone();
    let storage_dir = config.storage_dir();
    info!("Using storage at {:?}", storage_dir);

    let store = Arc::new(
        MovieStore::open(
            Arc::new(client),
            Arc::new(FileStorage::new(storage_dir)),
            config.storage.store_name.clone(),
        )
        .await,
    );

    if !store.has_seen_onboarding().await {
        println!("Welcome to moviedeck! Browse popular movies, search, and keep favorites.");
        store.mark_onboarding_complete().await;
    }

    let result = run(command, &store, &images, &config).await;
    store.shutdown().await?;
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_commands() {
        assert!(matches!(
            Command::parse(&args(&["popular", "top-rated"])),
            Ok(Command::Popular(MovieSection::TopRated))
        ));
        assert!(matches!(
            Command::parse(&args(&["search", "star", "wars"])),
            Ok(Command::Search(q)) if q == "star wars"
        ));
        assert!(matches!(Command::parse(&args(&["details", "603"])), Ok(Command::Details(603))));
        assert!(Command::parse(&args(&["details", "abc"])).is_err());
        assert!(Command::parse(&args(&["search"])).is_err());
    }

    #[test]
    fn test_config_is_not_a_store_command() {
        assert!(Command::parse(&args(&["config"])).is_err());
    }

    #[test]
    fn test_take_flag() {
        let mut raw = args(&["--config", "app.toml", "popular"]);
        assert_eq!(take_flag(&mut raw, "--config").as_deref(), Some("app.toml"));
        assert_eq!(raw, args(&["popular"]));
        assert_eq!(take_flag(&mut raw, "--config"), None);
    }
}
