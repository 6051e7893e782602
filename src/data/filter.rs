// filter.rs - Sequence id filtering

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use regex::Regex;
use crate::data::sequence::Alignment;

/// Include/exclude rules applied to sequence ids
#[derive(Debug, Default)]
pub struct IdFilter {
    pub include_regex: Option<Regex>,
    pub exclude_regex: Option<Regex>,
    pub include_set: Option<HashSet<String>>,
    pub exclude_set: Option<HashSet<String>>,
}

impl IdFilter {
    pub fn is_active(&self) -> bool {
        self.include_regex.is_some()
            || self.exclude_regex.is_some()
            || self.include_set.is_some()
            || self.exclude_set.is_some()
    }

    pub fn accepts(&self, id: &str) -> bool {
        if let Some(regex) = &self.include_regex {
            if !regex.is_match(id) {
                return false;
            }
        }
        if let Some(regex) = &self.exclude_regex {
            if regex.is_match(id) {
                return false;
            }
        }
        if let Some(set) = &self.include_set {
            if !set.contains(id) {
                return false;
            }
        }
        if let Some(set) = &self.exclude_set {
            if set.contains(id) {
                return false;
            }
        }
        true
    }
}

impl Alignment {
    /// Drop sequences rejected by `filter`; returns how many were removed
    pub fn apply_id_filter(&mut self, filter: &IdFilter) -> usize {
        if !filter.is_active() {
            return 0;
        }
        let before = self.sequences.len();
        self.sequences.retain(|seq| filter.accepts(&seq.id));
        let removed = before - self.sequences.len();
        if removed > 0 {
            println!(
                "Sequence filters: kept {} sequences (removed {})",
                self.sequences.len(),
                removed
            );
        }
        removed
    }
}

/// Load a set of strings from a file (one per line)
pub fn load_set_from_file(file_path: &str) -> Result<HashSet<String>, String> {
    let file = File::open(file_path)
        .map_err(|e| format!("Failed to open filter file '{}': {}", file_path, e))?;

    let reader = BufReader::new(file);
    let mut set = HashSet::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| {
            format!("Failed to read line {} from '{}': {}", line_num + 1, file_path, e)
        })?;
        let trimmed = line.trim();
        if !trimmed.is_empty() && !trimmed.starts_with('#') {
            set.insert(trimmed.to_string());
        }
    }

    println!("📋 Loaded {} items from filter file '{}'", set.len(), file_path);
    Ok(set)
}
