use chrono::{DateTime, TimeZone, Utc};
use mockito::{Matcher, Server};
use nashboard::config::{LeagueConfig, SportsConfig};
use nashboard::models::{FallbackReason, SlateOutcome, SlateSource, Sport};
use nashboard::player::resolve_player;
use nashboard::SlateService;
use reqwest::Client;
use serde_json::json;

const API_KEY: &str = "test-key";
const DATE: &str = "2025-03-01";

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 17, 0, 0).unwrap()
}

/// Keyed config with every league pointed at `base_url`
fn live_config(base_url: &str) -> SportsConfig {
    SportsConfig {
        api_key: Some(API_KEY.to_string()),
        date_override: Some(DATE.to_string()),
        nfl: LeagueConfig::new(base_url).with_league("1", "2024"),
        nba: LeagueConfig::new(base_url).with_league("12", "2024-2025"),
        mlb: LeagueConfig::new(base_url).with_league("1", "2025"),
        espn_base_url: base_url.to_string(),
        ..SportsConfig::default()
    }
}

fn service(config: SportsConfig) -> SlateService {
    SlateService::new(Client::new(), config)
}

fn games_query(league: &str, season: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("date".into(), DATE.into()),
        Matcher::UrlEncoded("timezone".into(), "America/New_York".into()),
        Matcher::UrlEncoded("league".into(), league.into()),
        Matcher::UrlEncoded("season".into(), season.into()),
    ])
}

#[tokio::test]
async fn test_missing_api_key_serves_mock_for_every_sport() {
    let slates = service(SportsConfig::default());

    for sport in Sport::ALL {
        let outcome = slates.tonight_at(sport, now()).await;
        assert!(outcome.is_fallback(), "{} should fall back", sport);
        assert!(!outcome.games().is_empty());
        assert!(outcome.games().iter().all(|g| g.league == sport));

        let result = outcome.into_fetch_result();
        assert_eq!(result.source, SlateSource::Mock);
        assert!(result.message.unwrap().contains("SPORTS_API_KEY"));
    }
}

#[tokio::test]
async fn test_mlb_mock_slate_is_yankees_red_sox() {
    let outcome = service(SportsConfig::default())
        .tonight_at(Sport::Mlb, now())
        .await;
    let games = outcome.games();
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].home_team, "Yankees");
    assert_eq!(games[0].away_team, "Red Sox");
    assert_eq!(games[0].venue.as_deref(), Some("Yankee Stadium"));
}

#[tokio::test]
async fn test_missing_league_config_skips_network() {
    let mut server = Server::new_async().await;
    let never = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let mut config = live_config(&server.url());
    config.nba = LeagueConfig::new(server.url());

    let outcome = service(config).tonight_at(Sport::Nba, now()).await;
    match &outcome {
        SlateOutcome::Fallback { reason, .. } => {
            assert_eq!(reason, &FallbackReason::MissingLeagueConfig)
        }
        other => panic!("expected fallback, got {:?}", other),
    }
    assert_eq!(outcome.games().len(), 9);
    never.assert_async().await;
}

#[tokio::test]
async fn test_live_nfl_slate() {
    let mut server = Server::new_async().await;
    let games = server
        .mock("GET", "/games")
        .match_query(games_query("1", "2024"))
        .match_header("x-apisports-key", API_KEY)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "response": [{
                    "game": {
                        "id": 4521,
                        "venue": { "name": "Lincoln Financial Field" }
                    },
                    "date": { "timezone": "UTC", "timestamp": 1740859200 },
                    "teams": {
                        "home": { "name": "Philadelphia Eagles" },
                        "away": { "name": "Dallas Cowboys" }
                    }
                }]
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let outcome = service(live_config(&server.url()))
        .tonight_at(Sport::Nfl, now())
        .await;
    games.assert_async().await;

    assert!(outcome.is_live());
    let result = outcome.into_fetch_result();
    assert_eq!(result.source, SlateSource::ApiSports);
    assert!(result.message.is_none());
    assert_eq!(result.games.len(), 1);

    let game = &result.games[0];
    assert_eq!(game.id, "4521");
    assert_eq!(game.home_team, "Philadelphia Eagles");
    assert_eq!(game.away_team, "Dallas Cowboys");
    assert_eq!(game.venue.as_deref(), Some("Lincoln Financial Field"));
    assert_eq!(game.start_time, "2025-03-01T20:00:00.000Z");
}

#[tokio::test]
async fn test_upstream_error_falls_back_with_status() {
    let mut server = Server::new_async().await;
    let failing = server
        .mock("GET", "/games")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("upstream exploded")
        .expect(1)
        .create_async()
        .await;

    let result = service(live_config(&server.url()))
        .tonight_at(Sport::Mlb, now())
        .await
        .into_fetch_result();
    failing.assert_async().await;

    assert_eq!(result.source, SlateSource::Mock);
    assert!(result.message.unwrap().contains("500"));
    assert_eq!(result.games[0].home_team, "Yankees");
}

fn assert_request_failed(outcome: SlateOutcome, sport: Sport, mock_len: usize) {
    match &outcome {
        SlateOutcome::Fallback {
            reason: FallbackReason::RequestFailed(_),
            ..
        } => {}
        other => panic!("expected request failure fallback, got {:?}", other),
    }
    let result = outcome.into_fetch_result();
    assert_eq!(result.source, SlateSource::Mock);
    assert_eq!(result.games.len(), mock_len);
    assert!(result.games.iter().all(|g| g.league == sport));
    assert!(result.message.unwrap().contains("request failed"));
}

#[tokio::test]
async fn test_undecodable_body_falls_back_to_mock() {
    let mut server = Server::new_async().await;
    let garbled = server
        .mock("GET", "/games")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html>maintenance</html>")
        .expect(1)
        .create_async()
        .await;

    let outcome = service(live_config(&server.url()))
        .tonight_at(Sport::Nba, now())
        .await;
    garbled.assert_async().await;

    assert_request_failed(outcome, Sport::Nba, 9);
}

#[tokio::test]
async fn test_unreachable_provider_falls_back_to_mock() {
    // nothing listens on port 1
    let outcome = service(live_config("http://127.0.0.1:1"))
        .tonight_at(Sport::Nba, now())
        .await;

    assert_request_failed(outcome, Sport::Nba, 9);
}

#[tokio::test]
async fn test_empty_response_is_not_a_fallback() {
    let mut server = Server::new_async().await;
    let empty = server
        .mock("GET", "/games")
        .match_query(games_query("1", "2025"))
        .with_status(200)
        .with_body(r#"{"response": []}"#)
        .expect(1)
        .create_async()
        .await;

    let result = service(live_config(&server.url()))
        .tonight_at(Sport::Mlb, now())
        .await
        .into_fetch_result();
    empty.assert_async().await;

    assert_eq!(result.source, SlateSource::ApiSports);
    assert!(result.games.is_empty());
    assert!(result.message.unwrap().starts_with("No MLB games scheduled today"));
}

#[tokio::test]
async fn test_data_envelope_is_read() {
    let mut server = Server::new_async().await;
    let _games = server
        .mock("GET", "/games")
        .match_query(games_query("1", "2025"))
        .with_status(200)
        .with_body(
            json!({
                "data": [{
                    "id": "mlb-77",
                    "date": "2025-03-01T18:05:00+00:00",
                    "teams": {
                        "home": { "nickname": "Cubs" },
                        "away": { "name": "Cardinals" }
                    }
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let outcome = service(live_config(&server.url()))
        .tonight_at(Sport::Mlb, now())
        .await;
    let games = outcome.games();
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].id, "mlb-77");
    assert_eq!(games[0].home_team, "Cubs");
    assert_eq!(games[0].away_team, "Cardinals");
    assert_eq!(games[0].start_time, "2025-03-01T18:05:00+00:00");
}

#[tokio::test]
async fn test_nba_retries_without_season_when_empty() {
    let mut server = Server::new_async().await;
    let first = server
        .mock("GET", "/games")
        .match_query(games_query("12", "2024-2025"))
        .with_status(200)
        .with_body(r#"{"response": []}"#)
        .expect(1)
        .create_async()
        .await;
    let retry = server
        .mock("GET", "/games")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("date".into(), DATE.into()),
            Matcher::UrlEncoded("live".into(), "all".into()),
        ]))
        .with_status(200)
        .with_body(
            json!({
                "response": [
                    {
                        "id": 1,
                        "teams": {
                            "home": { "name": "Lakers" },
                            "visitors": { "name": "Warriors" }
                        },
                        "arena": { "name": "Crypto.com Arena" },
                        "status": { "long": "Scheduled" }
                    },
                    {
                        "id": 2,
                        "teams": { "home": { "name": "Celtics" }, "away": { "name": "Heat" } }
                    }
                ]
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let outcome = service(live_config(&server.url()))
        .tonight_at(Sport::Nba, now())
        .await;
    first.assert_async().await;
    retry.assert_async().await;

    let games = outcome.games();
    assert_eq!(games.len(), 2);
    assert_eq!(games[0].away_team, "Warriors");
    assert_eq!(games[0].venue.as_deref(), Some("Crypto.com Arena"));
    assert_eq!(games[0].status.as_deref(), Some("Scheduled"));
    assert_eq!(games[1].away_team, "Heat");
    assert_eq!(games[1].status.as_deref(), Some("SCHEDULED"));
}

#[tokio::test]
async fn test_nfl_does_not_retry() {
    let mut server = Server::new_async().await;
    let only = server
        .mock("GET", "/games")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"response": []}"#)
        .expect(1)
        .create_async()
        .await;

    let outcome = service(live_config(&server.url()))
        .tonight_at(Sport::Nfl, now())
        .await;
    only.assert_async().await;
    assert!(matches!(outcome, SlateOutcome::Empty { .. }));
}

#[tokio::test]
async fn test_same_inputs_give_same_slate() {
    let mut server = Server::new_async().await;
    let _games = server
        .mock("GET", "/games")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!({
                "response": [{
                    "teams": { "home": { "name": "Mets" }, "away": { "name": "Braves" } },
                    "date": { "timestamp": 1740859200 }
                }]
            })
            .to_string(),
        )
        .expect(2)
        .create_async()
        .await;

    let slates = service(live_config(&server.url()));
    let first = slates.tonight_at(Sport::Mlb, now()).await;
    let second = slates.tonight_at(Sport::Mlb, now()).await;
    assert_eq!(first, second);
    assert_eq!(first.games()[0].id, "mlb-0");
}

#[tokio::test]
async fn test_espn_tier_replaces_mock_when_enabled() {
    let mut server = Server::new_async().await;
    let scoreboard = server
        .mock("GET", "/apis/site/v2/sports/basketball/nba/scoreboard")
        .match_query(Matcher::UrlEncoded("dates".into(), "20250301".into()))
        .with_status(200)
        .with_body(
            json!({
                "events": [{
                    "id": "401705000",
                    "date": "2025-03-02T00:30Z",
                    "competitions": [{
                        "competitors": [
                            { "homeAway": "home", "team": { "shortDisplayName": "Knicks" } },
                            { "homeAway": "away", "team": { "shortDisplayName": "76ers" } }
                        ]
                    }]
                }]
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let config = SportsConfig {
        date_override: Some(DATE.to_string()),
        espn_base_url: server.url(),
        espn_slate_fallback: true,
        ..SportsConfig::default()
    };

    let result = service(config)
        .tonight_at(Sport::Nba, now())
        .await
        .into_fetch_result();
    scoreboard.assert_async().await;

    assert_eq!(result.source, SlateSource::Espn);
    assert_eq!(result.games.len(), 1);
    assert_eq!(result.games[0].home_team, "Knicks");
    assert_eq!(result.games[0].away_team, "76ers");
}

#[tokio::test]
async fn test_espn_tier_is_off_by_default() {
    let mut server = Server::new_async().await;
    let never = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let config = SportsConfig {
        espn_base_url: server.url(),
        ..SportsConfig::default()
    };
    let outcome = service(config).tonight_at(Sport::Nfl, now()).await;
    never.assert_async().await;
    assert!(outcome.is_fallback());
}

#[tokio::test]
async fn test_player_card_from_espn_search() {
    let mut server = Server::new_async().await;
    let search = server
        .mock("GET", "/apis/common/v3/sports/basketball/nba/athletes")
        .match_query(Matcher::UrlEncoded("search".into(), "lebron james".into()))
        .with_status(200)
        .with_body(
            json!({
                "items": [{
                    "id": "1966",
                    "displayName": "LeBron James",
                    "team": { "displayName": "Los Angeles Lakers" },
                    "position": { "abbreviation": "F" }
                }]
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let client = Client::new();
    let player = resolve_player(&client, &server.url(), Some(Sport::Nba), " lebron james ").await;
    search.assert_async().await;

    assert_eq!(player.id, "1966");
    assert_eq!(player.name, "LeBron James");
    assert_eq!(player.team.as_deref(), Some("Los Angeles Lakers"));
    assert_eq!(player.position.as_deref(), Some("F"));
    assert_eq!(player.provider, "espn");
}

#[tokio::test]
async fn test_player_card_falls_back_on_upstream_error() {
    let mut server = Server::new_async().await;
    let _search = server
        .mock("GET", "/apis/common/v3/sports/football/nfl/athletes")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let client = Client::new();
    let player = resolve_player(&client, &server.url(), Some(Sport::Nfl), "jalen hurts").await;
    assert_eq!(player.provider, "fallback");
    assert_eq!(player.name, "Jalen Hurts");
    assert_eq!(player.source_label, "Fallback (no ESPN match)");
}

#[tokio::test]
async fn test_per_sport_entry_points() {
    let client = Client::new();
    let config = SportsConfig::default();

    let nfl = nashboard::api::nfl::fetch_tonight_nfl_slate(&client, &config).await;
    let nba = nashboard::api::nba::fetch_tonight_nba_slate(&client, &config).await;
    let mlb = nashboard::api::mlb::fetch_tonight_mlb_slate(&client, &config).await;

    assert_eq!(nfl.games()[0].home_team, "Giants");
    assert_eq!(nba.games().len(), 9);
    assert_eq!(mlb.games()[0].away_team, "Red Sox");
    assert!([nfl, nba, mlb].iter().all(SlateOutcome::is_fallback));
}
