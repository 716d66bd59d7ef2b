//! Human-readable rendering of a `DatasetReport`.

use super::report::{DatasetReport, Shape};

/// Pure function: Format a report as output lines.
pub fn format_report(report: &DatasetReport) -> Vec<String> {
    let mut lines = vec![format!(
        "Top-level keys: {}",
        report.top_level_keys.join(", ")
    )];

    for size in &report.sizes {
        lines.push(match &size.shape {
            Shape::Records(n) => format!("{}: {} records", size.key, n),
            Shape::Scalar(type_name) => format!("{}: type={}", size.key, type_name),
        });
    }

    for sample in &report.samples {
        lines.push(String::new());
        lines.push("=".repeat(30));
        lines.push(format!("{} sample", sample.key));
        lines.push("=".repeat(30));
        match &sample.sample {
            Some(value) => lines.extend(
                serde_json::to_string_pretty(value)
                    .unwrap_or_default()
                    .lines()
                    .map(str::to_string),
            ),
            None => lines.push("(empty)".to_string()),
        }
    }

    for frequencies in &report.field_frequencies {
        lines.push(String::new());
        lines.push(format!("== {} keys ==", frequencies.category));
        for (field, count) in &frequencies.fields {
            lines.push(format!("{}: {}", field, count));
        }
    }

    lines.push(String::new());
    lines.push("[Uniqueness]".to_string());
    lines.push(format!(
        "movies.id unique: {}",
        report.uniqueness.movie_ids_unique
    ));
    lines.push(format!(
        "actors.nconst unique: {}",
        report.uniqueness.actor_ids_unique
    ));

    lines.push(String::new());
    lines.push("[Relations]".to_string());
    lines.push(format!(
        "knownForTitles matched: {} / {}",
        report.known_for.matched, report.known_for.total
    ));

    for vocabulary in &report.vocabularies {
        lines.push(String::new());
        lines.push(format!("== {} ==", vocabulary.category));
        lines.push(format!("type: {}", vocabulary.shape));
        lines.push(match vocabulary.len {
            Some(len) => format!("len: {}", len),
            None => "len: -".to_string(),
        });
        if let Some(first) = &vocabulary.first {
            lines.push(format!("first element: {}", first));
        }
    }

    for vocabulary in &report.vocabularies {
        lines.push(String::new());
        lines.push(format!("== {} unique values ==", vocabulary.category));
        lines.extend(vocabulary.values.iter().cloned());
    }

    lines
}
