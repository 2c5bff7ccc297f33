/// Playlist files: a JSON array of playable items
use crate::error::{PlayerError, Result};
use std::collections::HashSet;
use std::path::Path;
use swyphex_playback::{format_clock, PlayableItem};

/// Read and validate a playlist file
pub fn load_playlist(path: &Path) -> Result<Vec<PlayableItem>> {
    let contents = std::fs::read_to_string(path)?;
    parse_playlist(&contents)
}

/// Parse and validate playlist JSON
pub fn parse_playlist(contents: &str) -> Result<Vec<PlayableItem>> {
    let items: Vec<PlayableItem> = serde_json::from_str(contents)?;

    if items.is_empty() {
        return Err(PlayerError::Playlist("playlist has no items".to_string()));
    }

    let mut ids = HashSet::new();
    for (index, item) in items.iter().enumerate() {
        if item.media_uri.trim().is_empty() {
            return Err(PlayerError::Playlist(format!(
                "item {} ({}) has no media URI",
                index, item.id
            )));
        }
        if !ids.insert(item.id.as_str()) {
            tracing::warn!("Duplicate item id {} at index {}", item.id, index);
        }
    }

    Ok(items)
}

/// One display line per item, marking `current` with an arrow
pub fn describe(items: &[PlayableItem], current: Option<usize>) -> Vec<String> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let marker = if Some(index) == current { "▶" } else { " " };
            let length = item
                .duration_hint
                .map(format_clock)
                .unwrap_or_else(|| "-:--".to_string());
            format!(
                "{} {:>3}  {} - {}  [{}]  {}",
                marker, index, item.title, item.artist, length, item.media_uri
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"id": "1", "title": "Intro", "artist": "Band", "media_uri": "/uploads/intro.mp3", "duration_hint": 65.0},
        {"id": "2", "title": "Outro", "artist": "Band", "media_uri": "/uploads/outro.mp3", "artwork_uri": "/art/2.jpg"}
    ]"#;

    #[test]
    fn parses_items() {
        let items = parse_playlist(SAMPLE).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].duration_hint, Some(65.0));
        assert_eq!(items[1].artwork_uri.as_deref(), Some("/art/2.jpg"));
        assert_eq!(items[1].duration_hint, None);
    }

    #[test]
    fn rejects_empty_playlist() {
        assert!(matches!(parse_playlist("[]"), Err(PlayerError::Playlist(_))));
    }

    #[test]
    fn rejects_missing_uri() {
        let json = r#"[{"id": "1", "title": "A", "artist": "B", "media_uri": " "}]"#;
        assert!(matches!(parse_playlist(json), Err(PlayerError::Playlist(_))));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(parse_playlist("{"), Err(PlayerError::Json(_))));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.json");
        std::fs::write(&path, SAMPLE).unwrap();
        assert_eq!(load_playlist(&path).unwrap().len(), 2);
    }

    #[test]
    fn describe_marks_current() {
        let items = parse_playlist(SAMPLE).unwrap();
        let lines = describe(&items, Some(1));
        assert!(lines[0].starts_with("    0  Intro - Band  [1:05]"));
        assert!(lines[1].starts_with("▶   1  Outro - Band  [-:--]"));
    }
}
