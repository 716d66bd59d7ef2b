//! `moviesync inspect`

use std::path::Path;

use anyhow::{Context, Result};
use moviesync_core::dataset::Dataset;
use moviesync_core::inspect::{format_report, inspect, DatasetReport};

use crate::cli::OutputFormat;

pub fn run(data: &Path, format: OutputFormat) -> Result<()> {
    let dataset = Dataset::from_path(data)
        .with_context(|| format!("Failed to load dataset from {}", data.display()))?;
    let report = inspect(&dataset)?;

    println!("{}", render(&report, format)?);
    Ok(())
}

/// Renders the report in the requested format.
pub fn render(report: &DatasetReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Pretty => Ok(format_report(report).join("\n")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn sample_dataset() -> Dataset {
        Dataset::from_value(json!({
            "movies": [
                {"id": "tt1", "titleText": {"text": "Foo"}},
                {"id": "tt1", "titleText": {"text": "Foo again"}},
            ],
            "actors": [{"nconst": "nm1", "knownForTitles": ["tt1", "tt9"]}],
            "genres": ["Drama", null],
            "titleTypes": ["movie"],
        }))
        .unwrap()
    }

    #[test]
    fn test_render_pretty() {
        let report = inspect(&sample_dataset()).unwrap();
        let text = render(&report, OutputFormat::Pretty).unwrap();

        assert!(text.starts_with("Top-level keys: movies, actors, genres, titleTypes"));
        assert!(text.contains("movies: 2 records"));
        assert!(text.contains("knownForTitles matched: 1 / 2"));
    }

    #[test]
    fn test_render_json() {
        let report = inspect(&sample_dataset()).unwrap();
        let text = render(&report, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["uniqueness"]["movie_ids_unique"], json!(false));
        assert_eq!(value["uniqueness"]["actor_ids_unique"], json!(true));
        assert_eq!(value["known_for"], json!({"matched": 1, "total": 2}));
    }

    #[test]
    fn test_run_missing_category() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"movies": []}}"#).unwrap();

        let err = run(file.path(), OutputFormat::Pretty).unwrap_err();
        assert!(err.to_string().contains("actors"));
    }

    #[test]
    fn test_run_missing_file() {
        let err = run(Path::new("/nonexistent/data.json"), OutputFormat::Json).unwrap_err();
        assert!(err.to_string().contains("Failed to load dataset"));
    }
}
