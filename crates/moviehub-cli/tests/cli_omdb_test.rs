#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use std::path::Path;

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::*;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_BATMAN: &str = include_str!("../../../fixtures/omdb/search_batman.json");
const SEARCH_NOT_FOUND: &str = include_str!("../../../fixtures/omdb/search_not_found.json");
const TITLE_BATMAN_BEGINS: &str = include_str!("../../../fixtures/omdb/title_tt0372784.json");
const TITLE_NOT_FOUND: &str = include_str!("../../../fixtures/omdb/title_not_found.json");

/// Points the config in `dir` at the mock server.
fn write_config(dir: &Path, server: &MockServer) {
    std::fs::write(
        dir.join("config.toml"),
        format!(
            "[omdb]\napi_key = \"test-key\"\nbase_url = \"{}/\"\n",
            server.uri()
        ),
    )
    .unwrap();
}

#[tokio::test]
async fn test_movies_popular_lists_results() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("apikey", "test-key"))
        .and(query_param("s", "action"))
        .and(query_param("type", "movie"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_BATMAN))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &server);

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("moviehub");
    cmd.arg("--dir")
        .arg(dir.path())
        .args(["movies", "--category", "popular"])
        .env_remove("OMDB_API_KEY")
        .assert()
        .success()
        .stdout(predicate::str::contains("Popular Movies"))
        .stdout(predicate::str::contains("Batman Begins"))
        .stdout(predicate::str::contains("Total: 4 movies"));
}

#[tokio::test]
async fn test_movies_search_not_found_shows_empty_state() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("s", "zzzz"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_NOT_FOUND))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &server);

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("moviehub");
    cmd.arg("--dir")
        .arg(dir.path())
        .args(["movies", "--search", "zzzz"])
        .env_remove("OMDB_API_KEY")
        .assert()
        .success()
        .stdout(predicate::str::contains("Search results for \"zzzz\""))
        .stdout(predicate::str::contains("No Movies Found"));
}

#[tokio::test]
async fn test_movies_provider_error_degrades_to_empty_state() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_string(r#"{"Response":"False","Error":"Invalid API key!"}"#),
        )
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &server);

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("moviehub");
    cmd.arg("--dir")
        .arg(dir.path())
        .arg("movies")
        .env_remove("OMDB_API_KEY")
        .assert()
        .success()
        .stdout(predicate::str::contains("Popular Movies"))
        .stdout(predicate::str::contains("No Results"))
        .stdout(predicate::str::contains("Reason:").and(predicate::str::contains("Invalid API key!")))
        .stdout(predicate::str::contains("No Movies Found").not());
}

#[tokio::test]
async fn test_unknown_category_warns_and_lists_fallback_term() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("s", "movie"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_NOT_FOUND))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &server);

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("moviehub");
    cmd.arg("--dir")
        .arg(dir.path())
        .args(["movies", "--category", "latest"])
        .env_remove("OMDB_API_KEY")
        .assert()
        .success()
        .stdout(predicate::str::contains("unknown category 'latest'"))
        .stdout(predicate::str::contains("expected one of: popular, top, new"))
        .stdout(predicate::str::contains("No Results"))
        .stdout(predicate::str::contains("Reason: Movie not found!"));
}

#[tokio::test]
async fn test_featured_provider_miss_shows_no_results() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_NOT_FOUND))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &server);

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("moviehub");
    cmd.arg("--dir")
        .arg(dir.path())
        .arg("featured")
        .env_remove("OMDB_API_KEY")
        .assert()
        .success()
        .stdout(predicate::str::contains("No Results"))
        .stdout(predicate::str::contains("No Movies Found").not());
}

#[tokio::test]
async fn test_movies_filters_narrow_results() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_BATMAN))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &server);

    // Act & Assert
    let mut by_year = cargo_bin_cmd!("moviehub");
    by_year
        .arg("--dir")
        .arg(dir.path())
        .args(["movies", "--year", "2005"])
        .env_remove("OMDB_API_KEY")
        .assert()
        .success()
        .stdout(predicate::str::contains("Batman Begins"))
        .stdout(predicate::str::contains("Total: 1 of 4 movies"));

    let mut by_genre = cargo_bin_cmd!("moviehub");
    by_genre
        .arg("--dir")
        .arg(dir.path())
        .args(["movies", "--genre", "Romance"])
        .env_remove("OMDB_API_KEY")
        .assert()
        .success()
        .stdout(predicate::str::contains("No Results"));
}

#[tokio::test]
async fn test_featured_lists_first_results() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("s", "action"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_BATMAN))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &server);

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("moviehub");
    cmd.arg("--dir")
        .arg(dir.path())
        .arg("featured")
        .env_remove("OMDB_API_KEY")
        .assert()
        .success()
        .stdout(predicate::str::contains("Featured"))
        .stdout(predicate::str::contains("Batman Begins"));
}

#[tokio::test]
async fn test_details_shows_full_record() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("i", "tt0372784"))
        .and(query_param("plot", "full"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TITLE_BATMAN_BEGINS))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &server);

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("moviehub");
    cmd.arg("--dir")
        .arg(dir.path())
        .args(["details", "--id", "tt0372784"])
        .env_remove("OMDB_API_KEY")
        .assert()
        .success()
        .stdout(predicate::str::contains("Batman Begins (2005)"))
        .stdout(predicate::str::contains("Director: Christopher Nolan"))
        .stdout(predicate::str::contains("IMDb Rating: 8.2/10"))
        .stdout(predicate::str::contains("Favorite: no"));
}

#[tokio::test]
async fn test_details_unknown_id_shows_not_found() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TITLE_NOT_FOUND))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &server);

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("moviehub");
    cmd.arg("--dir")
        .arg(dir.path())
        .args(["details", "--id", "tt0000000"])
        .env_remove("OMDB_API_KEY")
        .assert()
        .success()
        .stdout(predicate::str::contains("Movie not found"))
        .stdout(predicate::str::contains("Reason: Incorrect IMDb ID."));
}

#[tokio::test]
async fn test_favorites_toggle_add_then_remove() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("i", "tt0372784"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TITLE_BATMAN_BEGINS))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &server);

    // Act & Assert: add fetches the record
    let mut add = cargo_bin_cmd!("moviehub");
    add.arg("--dir")
        .arg(dir.path())
        .args(["favorites", "toggle", "--id", "tt0372784"])
        .env_remove("OMDB_API_KEY")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added \"Batman Begins\" to favorites"))
        .stdout(predicate::str::contains("Favorites: 1"));

    let mut list = cargo_bin_cmd!("moviehub");
    list.arg("--dir")
        .arg(dir.path())
        .args(["favorites", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Batman Begins"))
        .stdout(predicate::str::contains("Total: 1 favorites"));

    // Act & Assert: remove uses the stored record
    let mut remove = cargo_bin_cmd!("moviehub");
    remove
        .arg("--dir")
        .arg(dir.path())
        .args(["favorites", "toggle", "--id", "tt0372784"])
        .env_remove("OMDB_API_KEY")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed \"Batman Begins\" from favorites"))
        .stdout(predicate::str::contains("Favorites: 0"));
}
