//! Reading the activity log back for `adpilot activity`.

use std::collections::HashMap;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{ActivityEntry, EventKind, Level};

/// Read all entries, silently skipping malformed lines. A missing file
/// yields an empty list.
pub fn read_entries(path: &Path) -> Vec<ActivityEntry> {
    let Ok(file) = fs::File::open(path) else {
        return Vec::new();
    };

    BufReader::new(file)
        .lines()
        .map_while(Result::ok)
        .filter_map(|line| serde_json::from_str::<ActivityEntry>(&line).ok())
        .collect()
}

/// The most recent `limit` entries at or above `min_level`, oldest first.
pub fn recent(path: &Path, limit: usize, min_level: Level) -> Vec<ActivityEntry> {
    let entries: Vec<ActivityEntry> = read_entries(path)
        .into_iter()
        .filter(|e| e.level >= min_level)
        .collect();
    let skip = entries.len().saturating_sub(limit);
    entries.into_iter().skip(skip).collect()
}

/// Entry counts per event kind, most frequent first.
pub fn counts_by_kind(entries: &[ActivityEntry]) -> Vec<(EventKind, usize)> {
    let mut counts: HashMap<EventKind, usize> = HashMap::new();
    for entry in entries {
        *counts.entry(entry.kind).or_default() += 1;
    }
    let mut sorted: Vec<(EventKind, usize)> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.to_string().cmp(&b.0.to_string())));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_lines(path: &Path, lines: &[&str]) {
        let mut file = fs::File::create(path).unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("activity.jsonl");
        write_lines(
            &path,
            &[
                r#"{"timestamp":"2026-01-01T00:00:00Z","level":"info","kind":"deploy","message":"ok"}"#,
                "not json",
                r#"{"timestamp":"2026-01-01T00:00:01Z","level":"loud","kind":"deploy","message":"bad level"}"#,
            ],
        );
        let entries = read_entries(&path);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, EventKind::Deploy);
    }

    #[test]
    fn missing_file_is_empty() {
        assert!(read_entries(Path::new("/nonexistent/adpilot/activity.jsonl")).is_empty());
    }

    #[test]
    fn recent_keeps_tail_and_filters_level() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("activity.jsonl");
        write_lines(
            &path,
            &[
                r#"{"timestamp":"t1","level":"info","kind":"upload","message":"a"}"#,
                r#"{"timestamp":"t2","level":"debug","kind":"upload","message":"b"}"#,
                r#"{"timestamp":"t3","level":"warn","kind":"chart","message":"c"}"#,
                r#"{"timestamp":"t4","level":"info","kind":"upload","message":"d"}"#,
            ],
        );

        let tail = recent(&path, 2, Level::Info);
        let messages: Vec<&str> = tail.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["c", "d"]);

        let counts = counts_by_kind(&read_entries(&path));
        assert_eq!(counts[0], (EventKind::Upload, 3));
        assert_eq!(counts[1], (EventKind::Chart, 1));
    }
}
