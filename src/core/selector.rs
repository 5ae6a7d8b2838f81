//! # Target Selectors
//!
//! Who a command applies to: either a player name or a selector such as
//! `@a[tag=vip,limit=3]`.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectorBase {
    /// `@p`: nearest player
    Nearest,
    /// `@a`: all players
    #[default]
    AllPlayers,
    /// `@r`: random player
    Random,
    /// `@e`: all entities
    AllEntities,
    /// `@s`: executing entity
    Executor,
    /// `@n`: nearest entity
    NearestEntity,
}

impl SelectorBase {
    pub const ALL: [SelectorBase; 6] = [
        SelectorBase::Nearest,
        SelectorBase::AllPlayers,
        SelectorBase::Random,
        SelectorBase::AllEntities,
        SelectorBase::Executor,
        SelectorBase::NearestEntity,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SelectorBase::Nearest => "@p",
            SelectorBase::AllPlayers => "@a",
            SelectorBase::Random => "@r",
            SelectorBase::AllEntities => "@e",
            SelectorBase::Executor => "@s",
            SelectorBase::NearestEntity => "@n",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    UnknownBase(String),
    MalformedArgument(String),
    UnclosedBracket(String),
    InvalidPlayerName(String),
}

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorError::UnknownBase(s) => write!(f, "unknown selector '{s}'"),
            SelectorError::MalformedArgument(s) => write!(f, "malformed selector argument '{s}'"),
            SelectorError::UnclosedBracket(s) => write!(f, "unclosed '[' in selector '{s}'"),
            SelectorError::InvalidPlayerName(s) => write!(f, "invalid player name '{s}'"),
        }
    }
}

impl std::error::Error for SelectorError {}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TargetSelector {
    pub base: SelectorBase,
    pub arguments: Vec<(String, String)>,
}

impl TargetSelector {
    pub fn new(base: SelectorBase) -> Self {
        Self {
            base,
            arguments: Vec::new(),
        }
    }

    pub fn arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.arguments.push((key.into(), value.into()));
        self
    }

    pub fn limit(self, n: u32) -> Self {
        self.arg("limit", n.to_string())
    }

    /// `nearest`, `furthest`, `random` or `arbitrary`.
    pub fn sort(self, order: &str) -> Self {
        self.arg("sort", order)
    }

    pub fn name(self, name: &str) -> Self {
        self.arg("name", name)
    }

    pub fn tag(self, tag: &str) -> Self {
        self.arg("tag", tag)
    }

    pub fn entity_type(self, entity: &str) -> Self {
        self.arg("type", entity)
    }

    /// Range syntax: `..10`, `5..`, `3..8` or an exact value.
    pub fn distance(self, range: &str) -> Self {
        self.arg("distance", range)
    }
}

impl fmt::Display for TargetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base.as_str())?;
        if self.arguments.is_empty() {
            return Ok(());
        }
        let args: Vec<String> = self
            .arguments
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        write!(f, "[{}]", args.join(","))
    }
}

/// Splits selector arguments on commas that are not nested in `{}`/`[]` or quotes.
fn split_arguments(body: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut in_quotes = false;
    let mut start = 0;
    for (i, c) in body.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '{' | '[' if !in_quotes => depth += 1,
            '}' | ']' if !in_quotes => depth -= 1,
            ',' if !in_quotes && depth == 0 => {
                parts.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&body[start..]);
    parts
}

impl FromStr for TargetSelector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (head, body) = match s.find('[') {
            Some(open) => {
                let body = s[open + 1..]
                    .strip_suffix(']')
                    .ok_or_else(|| SelectorError::UnclosedBracket(s.to_string()))?;
                (&s[..open], Some(body))
            }
            None => (s, None),
        };

        let base = SelectorBase::ALL
            .iter()
            .copied()
            .find(|b| b.as_str() == head)
            .ok_or_else(|| SelectorError::UnknownBase(head.to_string()))?;

        let mut selector = TargetSelector::new(base);
        if let Some(body) = body.filter(|b| !b.trim().is_empty()) {
            for part in split_arguments(body) {
                let (key, value) = part
                    .split_once('=')
                    .ok_or_else(|| SelectorError::MalformedArgument(part.to_string()))?;
                let key = key.trim();
                if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                    return Err(SelectorError::MalformedArgument(part.to_string()));
                }
                selector = selector.arg(key, value.trim());
            }
        }
        Ok(selector)
    }
}

/// A command target: a selector or a literal player name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Selector(TargetSelector),
    Player(String),
}

impl Default for Target {
    fn default() -> Self {
        Target::Selector(TargetSelector::default())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Selector(sel) => write!(f, "{sel}"),
            Target::Player(name) => f.write_str(name),
        }
    }
}

fn is_valid_player_name(name: &str) -> bool {
    (1..=16).contains(&name.len())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl FromStr for Target {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('@') {
            return s.parse().map(Target::Selector);
        }
        if is_valid_player_name(s) {
            Ok(Target::Player(s.to_string()))
        } else {
            Err(SelectorError::InvalidPlayerName(s.to_string()))
        }
    }
}

impl From<TargetSelector> for Target {
    fn from(selector: TargetSelector) -> Self {
        Target::Selector(selector)
    }
}
