//! Integration tests for moviedb.
//!
//! Drives the interactive menu end to end against a JSON file in a temporary
//! directory.
#![allow(clippy::unwrap_used, clippy::panic, clippy::too_many_lines)]

use moviedb::cli::{BANNER, ScriptedConsole, run_menu};
use moviedb::config::{OmdbConfig, SiteConfig};
use moviedb::{
    CatalogBackend, CatalogService, DuplicateCheck, Error, FetchedMovie, JsonFileBackend,
    MetadataProvider, OmdbClient, Rating, Result, SiteGenerator,
};
use std::collections::HashMap;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::Path;
use std::thread;
use tempfile::TempDir;

const TEMPLATE: &str = "<html><head><title>__TEMPLATE_TITLE__</title></head>\n<body><h1>__TEMPLATE_TITLE__</h1>\n<ol class=\"movie-grid\">\n__TEMPLATE_MOVIE_GRID__</ol></body></html>\n";

/// Provider backed by a fixed table of OMDb-style records.
struct TableProvider(HashMap<String, FetchedMovie>);

impl TableProvider {
    fn new() -> Self {
        let rows = [
            ("inception", "Inception", "2010", "8.8", "tt1375666"),
            ("heat", "Heat", "1995", "8.3", "tt0113277"),
            ("the matrix", "The Matrix", "1999", "8.7", "tt0133093"),
        ];
        Self(
            rows.into_iter()
                .map(|(key, title, year, rating, id)| {
                    let movie = FetchedMovie {
                        title: title.to_string(),
                        year: Some(year.to_string()),
                        rating: Some(rating.to_string()),
                        poster: format!("https://img.example.com/{id}.jpg"),
                        actors: "Various".to_string(),
                        imdb_id: Some(id.to_string()),
                    };
                    (key.to_string(), movie)
                })
                .collect(),
        )
    }
}

impl MetadataProvider for TableProvider {
    fn name(&self) -> &'static str {
        "table"
    }

    fn fetch(&self, title: &str) -> Result<FetchedMovie> {
        self.0
            .get(&title.to_lowercase())
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("could not fetch details for movie '{title}'")))
    }
}

struct Fixture {
    dir: TempDir,
    service: CatalogService<JsonFileBackend, TableProvider>,
    generator: SiteGenerator,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::with_create(dir.path().join("data").join("data.json")).unwrap();
        fs::write(dir.path().join("index_template.html"), TEMPLATE).unwrap();

        let site = SiteConfig {
            template_path: dir.path().join("index_template.html"),
            output_path: dir.path().join("index.html"),
            ..SiteConfig::default()
        };

        Self {
            service: CatalogService::new(backend, TableProvider::new()),
            generator: SiteGenerator::from_config(&site),
            dir,
        }
    }

    fn run(&self, inputs: &[&str]) -> ScriptedConsole {
        let mut console = ScriptedConsole::new(inputs.iter().copied());
        run_menu(&mut console, &self.service, &self.generator).unwrap();
        console
    }

    fn data_file(&self) -> &Path {
        self.service.backend().path()
    }
}

#[test]
fn test_new_store_is_seeded() {
    let fixture = Fixture::new();
    let contents = fs::read_to_string(fixture.data_file()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(json, serde_json::json!({"movies": []}));
}

#[test]
fn test_menu_session() {
    let fixture = Fixture::new();

    let console = fixture.run(&[
        "2", "Inception",
        "2", "heat",
        "2", "Unknown Film",
        "1", "",
        "4", "INCEPTION", "9.0", "",
        "8", "",
        "7", "incep", "",
        "5", "",
        "9",
        "3", "heat", "",
        "5", "",
        "0",
    ]);

    assert!(console.printed(BANNER));
    assert!(console.printed("Added movie: Inception"));
    assert!(console.printed("Added movie: Heat"));
    assert!(console.printed("Error: could not fetch details for movie 'Unknown Film'"));
    assert!(console.printed("2 movies found:"));
    assert!(console.printed("Inception: 8.8 (2010)"));
    assert!(console.printed("Rating for movie 'Inception' successfully updated to 9.0."));
    assert!(console.printed("9.0: Inception (2010)"));
    assert!(console.printed("Movie found: 'Inception'"));
    assert!(console.printed("2 movies in the database."));
    assert!(console.printed("Website generated successfully."));
    assert!(console.printed("Movie 'Heat' successfully deleted."));
    assert!(console.printed("1 movies in the database."));
    assert_eq!(console.output().last().map(String::as_str), Some("Bye!"));
    assert_eq!(console.remaining_inputs(), 0);

    let sort_header = console
        .output()
        .iter()
        .position(|l| l == "Movies sorted by rating (high to low):")
        .unwrap();
    assert_eq!(console.output()[sort_header + 1], "9.0: Inception (2010)");
    assert_eq!(console.output()[sort_header + 2], "8.3: Heat (1995)");

    let catalog = fixture.service.backend().read().unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.movies[0].title, "Inception");
    assert_eq!(catalog.movies[0].rating, Some(Rating::from("9.0")));
    assert_eq!(catalog.movies[0].imdb_id.as_deref(), Some("tt1375666"));

    assert_eq!(fixture.generator.output_path(), fixture.dir.path().join("index.html"));
    let html = fs::read_to_string(fixture.generator.output_path()).unwrap();
    assert!(html.contains("<title>MOVIE APP</title>"));
    assert!(html.contains("https://www.imdb.com/title/tt1375666/"));
    assert!(html.contains("https://www.imdb.com/title/tt0113277/"));
    assert!(!html.contains("__TEMPLATE_MOVIE_GRID__"));
}

#[test]
fn test_stored_document_shape() {
    let fixture = Fixture::new();
    fixture.run(&["2", "The Matrix", "0"]);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(fixture.data_file()).unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "movies": [{
                "title": "The Matrix",
                "year": "1999",
                "rating": "8.7",
                "poster": "https://img.example.com/tt0133093.jpg",
                "actors": "Various",
                "imdbID": "tt0133093"
            }]
        })
    );
}

#[test]
fn test_unknown_fields_survive_rewrites() {
    let fixture = Fixture::new();
    fs::write(
        fixture.data_file(),
        r#"{"owner": "sam", "movies": [{"title": "Heat", "year": 1995, "rating": 8.3, "poster": "", "actors": "", "watched": true}]}"#,
    )
    .unwrap();

    fixture.run(&["4", "heat", "8.5", "", "0"]);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(fixture.data_file()).unwrap()).unwrap();
    assert_eq!(json["owner"], "sam");
    assert_eq!(json["movies"][0]["watched"], true);
    assert_eq!(json["movies"][0]["year"], 1995);
    assert_eq!(json["movies"][0]["rating"], "8.5");
}

#[test]
fn test_legacy_duplicate_check_quirk() {
    let fixture = Fixture::new();
    fixture.run(&["2", "Heat", "2", "Heat", "0"]);
    assert_eq!(fixture.service.status().unwrap(), 2);

    let console = fixture.run(&["2", "movies", "0"]);
    assert!(console.printed("Error: The movie 'movies' already exists in the database."));
}

#[test]
fn test_title_duplicate_check() {
    let dir = TempDir::new().unwrap();
    let backend = JsonFileBackend::with_create(dir.path().join("data.json")).unwrap();
    let service = CatalogService::new(backend, TableProvider::new())
        .with_duplicate_check(DuplicateCheck::Title);
    let generator = SiteGenerator::from_config(&SiteConfig::default());

    let mut console = ScriptedConsole::new(["2", "Heat", "2", "HEAT", "0"]);
    run_menu(&mut console, &service, &generator).unwrap();

    assert!(console.printed("Error: The movie 'HEAT' already exists in the database."));
    assert_eq!(service.status().unwrap(), 1);
}

#[test]
fn test_corrupt_store_is_reported_not_fatal() {
    let fixture = Fixture::new();
    fs::write(fixture.data_file(), "{ not json").unwrap();

    let console = fixture.run(&["1", "", "0"]);

    assert!(
        console
            .output()
            .iter()
            .any(|l| l.starts_with("Error: failed to parse catalog"))
    );
    assert_eq!(console.output().last().map(String::as_str), Some("Bye!"));
}

#[test]
fn test_generate_website_without_template() {
    let fixture = Fixture::new();
    fs::remove_file(fixture.dir.path().join("index_template.html")).unwrap();

    let console = fixture.run(&["9", "0"]);

    assert!(console.output().iter().any(|l| l.starts_with("Error: ") && l.contains("template")));
    assert!(!fixture.generator.output_path().exists());
}

#[test]
fn test_generate_website_without_movie_list() {
    let fixture = Fixture::new();
    fs::write(fixture.data_file(), r#"{"owner": "sam"}"#).unwrap();

    let console = fixture.run(&["9", "0"]);

    assert!(console.printed("Error: No movie data found."));
    assert!(!console.printed("Website generated successfully."));
    assert!(!fixture.generator.output_path().exists());
    assert_eq!(console.remaining_inputs(), 0);
}

#[test]
fn test_add_and_generate_skip_the_pause() {
    let fixture = Fixture::new();

    let console = fixture.run(&["2", "Heat", "9", "5", "", "0"]);

    assert_eq!(
        console.prompts(),
        [
            "Enter choice (0-9): ",
            "Add movie name: ",
            "Enter choice (0-9): ",
            "Enter choice (0-9): ",
            "Press Enter to return.",
            "Enter choice (0-9): ",
        ]
    );
    assert!(fixture.generator.output_path().exists());
}

/// Serves a single OMDb lookup response.
fn serve_omdb_once(body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut line = String::new();
        while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
            line.clear();
        }
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
    });

    format!("http://{addr}/")
}

#[test]
fn test_add_through_omdb_client() {
    let url = serve_omdb_once(
        r#"{"Title":"Inception","Year":"2010","imdbRating":"8.8","Poster":"https://img.example.com/inception.jpg","Actors":"Leonardo DiCaprio","imdbID":"tt1375666","Response":"True"}"#,
    );
    let dir = TempDir::new().unwrap();
    let backend = JsonFileBackend::with_create(dir.path().join("data.json")).unwrap();
    let client = OmdbClient::new(&OmdbConfig::default())
        .with_base_url(url)
        .with_api_key("test-key");
    let service = CatalogService::new(backend, client);

    let added = service.add_movie("inception").unwrap();

    assert_eq!(added.title, "Inception");
    assert_eq!(added.rating_label(), "8.8");
    assert_eq!(service.list_movies().unwrap(), vec![added]);
}
