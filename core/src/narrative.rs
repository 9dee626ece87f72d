//! Flavor text shown alongside each hole. The source is a small INI-style file with one section per
//! course id and `hole=text` lines, keyed by 1-based hole number:
//!
//! ```text
//! # comments start with '#' or ';'
//! [dragon]
//! 1=A sleeping dragon guards the first green.
//! ```
//!
//! Parsing never fails. Lines that don't fit are skipped, and a missing entry falls back to a
//! placeholder.

use std::collections::HashMap;

use crate::types::CourseId;

pub const PLACEHOLDER: &str = "The next challenge awaits...";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Narrative {
    sections: HashMap<String, HashMap<String, String>>,
}

impl Narrative {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn parse(text: &str) -> Self {
        let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut current: Option<String> = None;

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }
            if line.starts_with('[') && line.ends_with(']') && line.len() >= 2 {
                let name = line[1..line.len() - 1].trim().to_string();
                sections.entry(name.clone()).or_insert_with(HashMap::new);
                current = Some(name);
                continue;
            }
            let section = match &current {
                Some(name) => name,
                None => continue,
            };
            if let Some((key, value)) = line.split_once('=') {
                if let Some(entries) = sections.get_mut(section) {
                    entries.insert(key.trim().to_string(), value.trim().to_string());
                }
            }
        }

        Self { sections }
    }

    /// Text for the hole at `hole` (0-based), or the placeholder.
    pub fn line(&self, course: CourseId, hole: usize) -> &str {
        self.sections
            .get(course.as_str())
            .and_then(|entries| entries.get(&(hole + 1).to_string()))
            .map(String::as_str)
            .unwrap_or(PLACEHOLDER)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.values().all(HashMap::is_empty)
    }
}
