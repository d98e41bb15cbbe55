//! Query command - run a permission-scoped find against the event log.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use garnet_authz::{CallerQuery, QueryAuthorizer};
use garnet_config::GarnetConfig;
use garnet_query::{EventStore, JsonFileEventStore};
use garnet_store::JsonFilePermissionStore;
use serde_json::json;

pub fn run(
    project_dir: &str,
    user: &str,
    filter_json: &str,
    since: Option<&str>,
    until: Option<&str>,
    limit: Option<usize>,
) -> Result<()> {
    if user.is_empty() {
        anyhow::bail!("User identity must not be empty");
    }

    let config = GarnetConfig::load_from_dir(project_dir)
        .with_context(|| format!("Failed to load configuration from {project_dir}"))?;

    // Default window: events in the last 24 hours, like an audit review.
    let until = parse_timestamp("--until", until)?.unwrap_or_else(Utc::now);
    let since = parse_timestamp("--since", since)?.unwrap_or(until - Duration::hours(24));

    let raw_filter: serde_json::Value = serde_json::from_str(filter_json)
        .context("--filter is not valid JSON")?;
    let mut query = CallerQuery::from_json(raw_filter, user)?;
    if !query.filter.contains_field("eventDateTime") {
        query.filter.insert(
            "eventDateTime",
            json!({"$gt": since.to_rfc3339(), "$lt": until.to_rfc3339()}),
        );
    }

    let authorizer = QueryAuthorizer::new(JsonFilePermissionStore::new(
        config.store.permissions_path(),
    ));
    let effective = authorizer.authorize(&query)?;

    println!("Query Object");
    println!("{}", serde_json::to_string_pretty(&effective.filter)?);
    println!();
    println!("Projection Object");
    println!("{}", serde_json::to_string_pretty(&effective.projection)?);
    println!();

    let events = JsonFileEventStore::new(config.store.events_path());
    let limit = limit.unwrap_or(config.query.default_limit);
    let results = events.find(&effective, Some(limit))?;

    for result in &results {
        println!("{}", serde_json::to_string_pretty(result)?);
    }
    println!();
    println!("{} result(s)", results.len());

    Ok(())
}

fn parse_timestamp(flag: &str, value: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    value
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw)
                .map(|t| t.with_timezone(&Utc))
                .with_context(|| format!("{flag} is not a valid RFC 3339 timestamp: {raw}"))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp() {
        let parsed = parse_timestamp("--since", Some("2020-05-10T00:00:00Z"))
            .unwrap()
            .unwrap();
        assert_eq!(parsed.to_rfc3339(), "2020-05-10T00:00:00+00:00");

        assert!(parse_timestamp("--since", None).unwrap().is_none());
        assert!(parse_timestamp("--since", Some("yesterday")).is_err());
    }

    #[test]
    fn test_query_against_initialized_project() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let project = temp_dir.path().join("demo");
        crate::commands::init::run(project.to_str().unwrap(), true).expect("init failed");

        // Alice has a record: the query runs (the sample window may be empty).
        run(
            project.to_str().unwrap(),
            "alice",
            "{}",
            Some("2020-05-10T00:00:00Z"),
            Some("2020-05-11T00:00:00Z"),
            None,
        )
        .expect("alice's query should be authorized");

        // Bob has no record: hard failure.
        let err = run(project.to_str().unwrap(), "bob", "{}", None, None, None).unwrap_err();
        assert!(err.to_string().contains("bob"));
    }
}
