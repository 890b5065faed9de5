//! Command-line harness for the EventPass recommendation engine.
//!
//! Loads events and an optional interest profile from JSON files, runs the
//! scoring pass, and prints either the ranked list (`score`) or the
//! assembled feed sections (`feed`) as JSON. A development and demo surface;
//! the engine itself stays a library.
#![forbid(unsafe_code)]

mod error;

pub use error::CliError;

use std::io::Write;

use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use geo::Coord;

use eventpass_core::{Event, InterestProfile};
use eventpass_feed::{DiscoveryFeedBuilder, FeedConfig};
use eventpass_scorer::RecommendationEngine;

/// Run the EventPass CLI with the current process arguments.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let output = match cli.command {
        Command::Score(args) => run_score(&args)?,
        Command::Feed(args) => run_feed(&args)?,
    };
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{output}").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[derive(Debug, Parser)]
#[command(
    name = "eventpass",
    about = "Score events and assemble discovery feeds from JSON inputs",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank events for a profile and print the scored list.
    Score(ScoreArgs),
    /// Rank events for a profile and print the feed sections.
    Feed(FeedArgs),
}

#[derive(Debug, Args)]
struct ScoreArgs {
    #[command(flatten)]
    inputs: InputArgs,
}

#[derive(Debug, Args)]
struct FeedArgs {
    #[command(flatten)]
    inputs: InputArgs,
    /// Maximum events per feed section.
    #[arg(long, value_name = "count", default_value_t = 10)]
    section_cap: usize,
    /// Length of the "Recommended for You" section.
    #[arg(long, value_name = "count", default_value_t = 10)]
    recommended_len: usize,
}

#[derive(Debug, Args)]
struct InputArgs {
    /// Path to the events JSON file (an array of events).
    #[arg(long, value_name = "path")]
    events: Utf8PathBuf,
    /// Path to the profile JSON file; omit for a new user.
    #[arg(long, value_name = "path")]
    profile: Option<Utf8PathBuf>,
    /// Reference time as RFC 3339; defaults to the current time.
    #[arg(long, value_name = "timestamp")]
    now: Option<String>,
    /// User latitude in degrees.
    #[arg(long, value_name = "degrees", requires = "lon")]
    lat: Option<f64>,
    /// User longitude in degrees.
    #[arg(long, value_name = "degrees", requires = "lat")]
    lon: Option<f64>,
}

struct ScoringInputs {
    events: Vec<Event>,
    profile: InterestProfile,
    now: DateTime<Utc>,
    location: Option<Coord<f64>>,
}

impl InputArgs {
    fn load(&self) -> Result<ScoringInputs, CliError> {
        let events_text = read_input("events", &self.events)?;
        let events: Vec<Event> =
            serde_json::from_str(&events_text).map_err(|source| CliError::ParseEvents {
                path: self.events.clone(),
                source,
            })?;
        let profile = match &self.profile {
            Some(path) => {
                let profile_text = read_input("profile", path)?;
                serde_json::from_str(&profile_text).map_err(|source| CliError::ParseProfile {
                    path: path.clone(),
                    source,
                })?
            }
            None => InterestProfile::new(),
        };
        let now = match &self.now {
            Some(value) => parse_timestamp(value)?,
            None => Utc::now(),
        };
        let location = match (self.lon, self.lat) {
            (Some(x), Some(y)) => Some(Coord { x, y }),
            _ => None,
        };
        Ok(ScoringInputs {
            events,
            profile,
            now,
            location,
        })
    }
}

fn run_score(args: &ScoreArgs) -> Result<String, CliError> {
    let inputs = args.inputs.load()?;
    let ranked = RecommendationEngine::with_defaults().score(
        &inputs.events,
        &inputs.profile,
        inputs.now,
        inputs.location,
    );
    serde_json::to_string_pretty(&ranked).map_err(CliError::SerializeOutput)
}

fn run_feed(args: &FeedArgs) -> Result<String, CliError> {
    let inputs = args.inputs.load()?;
    let ranked = RecommendationEngine::with_defaults().score(
        &inputs.events,
        &inputs.profile,
        inputs.now,
        inputs.location,
    );
    let config = FeedConfig {
        section_cap: args.section_cap,
        recommended_len: args.recommended_len,
        ..FeedConfig::default()
    };
    let sections = DiscoveryFeedBuilder::new(config).build_sections(
        &ranked,
        inputs.now,
        inputs.profile.confidence(),
    );
    serde_json::to_string_pretty(&sections).map_err(CliError::SerializeOutput)
}

fn read_input(field: &'static str, path: &Utf8PathBuf) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::ReadInput {
        field,
        path: path.clone(),
        source,
    })
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, CliError> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|source| CliError::ParseTimestamp {
            value: value.to_owned(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use eventpass_core::test_support::sample_event;
    use eventpass_core::{Category, Interaction};
    use rstest::{fixture, rstest};
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 9, 1, 12, 0, 0).unwrap()
    }

    fn write_json(value: &impl serde::Serialize) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        let text = serde_json::to_string(value).unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    fn path_of(file: &NamedTempFile) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(file.path().to_path_buf()).unwrap()
    }

    fn inputs_for(events: &NamedTempFile, profile: Option<&NamedTempFile>) -> InputArgs {
        InputArgs {
            events: path_of(events),
            profile: profile.map(path_of),
            now: Some("2026-09-01T12:00:00Z".to_owned()),
            lat: None,
            lon: None,
        }
    }

    #[rstest]
    fn score_outputs_ranked_events(now: DateTime<Utc>) {
        let events = vec![
            sample_event(1, Category::Music, now + Duration::days(1)),
            sample_event(2, Category::Sports, now + Duration::days(1)),
        ];
        let mut profile = InterestProfile::new().with_preferred_category(Category::Music);
        profile.record_interaction(Category::Music, Interaction::Purchase);
        let events_file = write_json(&events);
        let profile_file = write_json(&profile);

        let output = run_score(&ScoreArgs {
            inputs: inputs_for(&events_file, Some(&profile_file)),
        })
        .unwrap();

        let ranked: Vec<serde_json::Value> = serde_json::from_str(&output).unwrap();
        assert_eq!(ranked.len(), 2);
        let first = ranked.first().unwrap();
        assert_eq!(first["event"]["id"], 1);
        assert!(first["score"].as_f64().unwrap() > 0.0);
    }

    #[rstest]
    fn feed_outputs_named_sections(now: DateTime<Utc>) {
        let events = vec![
            sample_event(1, Category::Music, now - Duration::hours(1)),
            sample_event(2, Category::Arts, now + Duration::days(2)),
        ];
        let events_file = write_json(&events);

        let output = run_feed(&FeedArgs {
            inputs: inputs_for(&events_file, None),
            section_cap: 10,
            recommended_len: 10,
        })
        .unwrap();

        let sections: Vec<serde_json::Value> = serde_json::from_str(&output).unwrap();
        assert_eq!(sections.first().unwrap()["title"], "Happening Now");
    }

    #[rstest]
    fn missing_events_file_is_reported() {
        let args = ScoreArgs {
            inputs: InputArgs {
                events: Utf8PathBuf::from("/nonexistent/events.json"),
                profile: None,
                now: None,
                lat: None,
                lon: None,
            },
        };
        assert!(matches!(
            run_score(&args),
            Err(CliError::ReadInput { field: "events", .. })
        ));
    }

    #[rstest]
    #[case("not-a-timestamp")]
    #[case("2026-13-01T00:00:00Z")]
    fn invalid_timestamps_are_rejected(#[case] value: &str) {
        assert!(matches!(
            parse_timestamp(value),
            Err(CliError::ParseTimestamp { .. })
        ));
    }

    #[rstest]
    fn malformed_events_json_is_reported() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();
        let args = ScoreArgs {
            inputs: InputArgs {
                events: path_of(&file),
                profile: None,
                now: None,
                lat: None,
                lon: None,
            },
        };
        assert!(matches!(run_score(&args), Err(CliError::ParseEvents { .. })));
    }
}
