//! # Launch plan: which components start at which level.
//!
//! A [`LevelPlan`] is read from a properties-style text where every
//! `auto.start.<N>` key lists the components admitted at start level `N`:
//!
//! ```text
//! # core services first
//! auto.start.1 = logging config
//! auto.start.2 = net
//! auto.start.4 = ui shell
//! ```
//!
//! The highest level present is the plan's beginning level, the level the
//! sequencer is asked to reach by [`StartLevelSequencer::launch`](crate::StartLevelSequencer::launch).
//!
//! ## Parsing rules
//! The text follows the usual properties-file layout:
//! - `key=value`, `key: value` and `key value` lines are accepted
//! - lines starting with `#` or `!` are comments
//! - a line ending in an odd number of `\` continues on the next line, whose
//!   leading blanks are dropped
//! - `\t`, `\n`, `\r`, `\f` and `\uXXXX` escapes are decoded, any other `\x` reads as `x`
//! - a key given twice keeps its last value
//!
//! Of the resulting entries, only keys starting with `auto.start.` and followed by a
//! non-negative integer count. Component tokens starting with `#` are skipped and
//! levels that list no components are omitted.

use std::collections::BTreeMap;
use std::fs;
use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;

use tracing::debug;

use crate::error::PlanError;
use crate::level::Level;

const KEY_PREFIX: &str = "auto.start.";

/// Components grouped by the start level at which they may be activated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelPlan {
    by_level: BTreeMap<Level, Vec<String>>,
}

impl LevelPlan {
    /// Parses plan text. Malformed lines are skipped, never rejected.
    pub fn parse(text: &str) -> Self {
        let mut entries: BTreeMap<String, String> = BTreeMap::new();
        for line in logical_lines(text) {
            let (key, value) = split_entry(&line);
            entries.insert(key, value);
        }

        let mut by_level = BTreeMap::new();
        for (key, value) in &entries {
            let Some(level) = level_of(key) else {
                if key.starts_with(KEY_PREFIX) {
                    debug!(key = key.as_str(), "ignoring plan key without a numeric level");
                }
                continue;
            };

            let components: Vec<String> = value
                .split_whitespace()
                .filter(|tok| !tok.starts_with('#'))
                .map(str::to_owned)
                .collect();
            if !components.is_empty() {
                by_level.insert(level, components);
            }
        }

        Self { by_level }
    }

    /// Reads and parses a plan file.
    ///
    /// # Errors
    /// [`PlanError::Io`] if the file cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PlanError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| PlanError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    /// Highest level listed, or `None` for an empty plan.
    pub fn beginning_level(&self) -> Option<Level> {
        self.by_level.keys().next_back().copied()
    }

    /// Components listed for exactly `level`.
    pub fn components_at(&self, level: Level) -> &[String] {
        self.by_level.get(&level).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Levels that list at least one component, ascending.
    pub fn levels(&self) -> impl Iterator<Item = Level> + '_ {
        self.by_level.keys().copied()
    }

    /// Components allowed to run while the framework sits at `framework_level`,
    /// lowest level first.
    pub fn active_at(&self, framework_level: Level) -> impl Iterator<Item = (Level, &str)> + '_ {
        self.by_level
            .range(..=framework_level)
            .flat_map(|(level, names)| names.iter().map(move |n| (*level, n.as_str())))
    }

    /// True if a component at `component_level` may be active at `framework_level`.
    pub fn admits(component_level: Level, framework_level: Level) -> bool {
        component_level <= framework_level
    }

    pub fn is_empty(&self) -> bool {
        self.by_level.is_empty()
    }
}

/// Joins continued physical lines and drops blanks and comments.
fn logical_lines(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut pending: Option<String> = None;

    for raw in text.lines() {
        let line = raw.trim_start_matches(is_blank);
        if pending.is_none() && (line.is_empty() || line.starts_with('#') || line.starts_with('!')) {
            continue;
        }
        let (body, continues) = match line.strip_suffix('\\') {
            Some(head) if trailing_backslashes(line) % 2 == 1 => (head, true),
            _ => (line, false),
        };
        pending.get_or_insert_with(String::new).push_str(body);
        if !continues {
            out.extend(pending.take());
        }
    }
    out.extend(pending);
    out
}

fn trailing_backslashes(line: &str) -> usize {
    line.len() - line.trim_end_matches('\\').len()
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{c}')
}

fn split_entry(line: &str) -> (String, String) {
    let mut chars = line.chars().peekable();
    let key = unescape_until(&mut chars, |c| c == '=' || c == ':' || is_blank(c));

    skip_blanks(&mut chars);
    if matches!(chars.peek(), Some('=' | ':')) {
        chars.next();
        skip_blanks(&mut chars);
    }
    let value = unescape_until(&mut chars, |_| false);
    (key, value)
}

fn skip_blanks(chars: &mut Peekable<Chars<'_>>) {
    while chars.next_if(|c| is_blank(*c)).is_some() {}
}

fn unescape_until(chars: &mut Peekable<Chars<'_>>, stop: impl Fn(char) -> bool) -> String {
    let mut out = String::new();
    while let Some(c) = chars.next_if(|c| !stop(*c)) {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                if let Some(decoded) = u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    out.push(decoded);
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

fn level_of(key: &str) -> Option<Level> {
    key.trim()
        .strip_prefix(KEY_PREFIX)?
        .parse::<u32>()
        .ok()
        .map(Level::new)
}
