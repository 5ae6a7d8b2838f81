//! # Command Builders
//!
//! Embeds serialized text components into complete commands. Each builder is a
//! pure function of its inputs and the version tier.
//!
//! ```text
//! tellraw  /tellraw <target> <component>
//! title    /title <target> title|subtitle|actionbar <component>
//! sign     /setblock ~ ~ ~ <sign block>{<per-tier text NBT>}
//! book     /give <target> written_book<per-tier data>
//! ```
//!
//! From 1.20.5 on, item data moved from NBT to components, and from 1.21.5 on,
//! text inside NBT is an inline compound rather than a quoted JSON string. The
//! tier decides which of those shapes is produced.

use serde_json::Value;

use crate::Tool;
use crate::core::selector::{SelectorBase, Target, TargetSelector};
use crate::core::serializer::{SerializeOptions, serialize};
use crate::core::text::TextSegment;
use crate::core::version::VersionTier;

/// Wraps `s` in single quotes for SNBT, escaping `\` and `'`.
pub fn quote_snbt(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\\' || c == '\'' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

/// Wraps `s` in double quotes with JSON escaping.
fn quote_json(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

fn component(segments: &[TextSegment], tier: VersionTier) -> String {
    serialize(segments, &SerializeOptions::new(tier))
}

// ============================================================================
// Chat
// ============================================================================

pub fn tellraw(target: &Target, segments: &[TextSegment], options: &SerializeOptions) -> String {
    format!("/tellraw {} {}", target, serialize(segments, options))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitleSlot {
    #[default]
    Title,
    Subtitle,
    Actionbar,
}

impl TitleSlot {
    pub fn as_str(self) -> &'static str {
        match self {
            TitleSlot::Title => "title",
            TitleSlot::Subtitle => "subtitle",
            TitleSlot::Actionbar => "actionbar",
        }
    }
}

pub fn title(
    target: &Target,
    slot: TitleSlot,
    segments: &[TextSegment],
    options: &SerializeOptions,
) -> String {
    format!("/title {} {} {}", target, slot.as_str(), serialize(segments, options))
}

/// Fade-in, stay and fade-out durations, in ticks.
pub fn title_times(target: &Target, fade_in: u32, stay: u32, fade_out: u32) -> String {
    format!("/title {target} times {fade_in} {stay} {fade_out}")
}

// ============================================================================
// Signs
// ============================================================================

pub const SIGN_LINES: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct SignSpec {
    /// Up to four lines; extra lines are ignored, missing ones are blank.
    pub lines: Vec<Vec<TextSegment>>,
    /// Wood type, e.g. `oak`, `spruce`, `cherry`.
    pub wood: String,
    pub glowing: bool,
}

impl Default for SignSpec {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            wood: "oak".to_string(),
            glowing: false,
        }
    }
}

impl SignSpec {
    fn line_components(&self, tier: VersionTier) -> Vec<String> {
        (0..SIGN_LINES)
            .map(|i| component(self.lines.get(i).map(Vec::as_slice).unwrap_or(&[]), tier))
            .collect()
    }
}

pub fn sign(spec: &SignSpec, tier: VersionTier) -> String {
    let lines = spec.line_components(tier);
    match tier {
        VersionTier::V1_21_5 | VersionTier::V1_20 => {
            let messages: Vec<String> = if tier == VersionTier::V1_21_5 {
                lines
            } else {
                lines.iter().map(|l| quote_snbt(l)).collect()
            };
            let glow = if spec.glowing { ",has_glowing_text:1b" } else { "" };
            format!(
                "/setblock ~ ~ ~ minecraft:{}_sign{{front_text:{{messages:[{}]{}}}}}",
                spec.wood,
                messages.join(","),
                glow
            )
        }
        VersionTier::V1_16 | VersionTier::V1_13 => {
            let block = if tier == VersionTier::V1_16 {
                format!("minecraft:{}_sign", spec.wood)
            } else {
                "minecraft:sign".to_string()
            };
            let mut fields: Vec<String> = lines
                .iter()
                .enumerate()
                .map(|(i, l)| format!("Text{}:{}", i + 1, quote_snbt(l)))
                .collect();
            if spec.glowing && tier == VersionTier::V1_16 {
                fields.push("GlowingText:1b".to_string());
            }
            format!("/setblock ~ ~ ~ {}{{{}}}", block, fields.join(","))
        }
        VersionTier::Pre1_13 => {
            let fields: Vec<String> = lines
                .iter()
                .enumerate()
                .map(|(i, l)| format!("Text{}:{}", i + 1, quote_json(l)))
                .collect();
            format!(
                "/setblock ~ ~ ~ minecraft:standing_sign 0 replace {{{}}}",
                fields.join(",")
            )
        }
    }
}

// ============================================================================
// Books
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct BookSpec {
    pub target: Target,
    pub title: String,
    pub author: String,
    pub pages: Vec<Vec<TextSegment>>,
}

impl Default for BookSpec {
    fn default() -> Self {
        Self {
            target: TargetSelector::new(SelectorBase::Nearest).into(),
            title: "Untitled".to_string(),
            author: "Anonymous".to_string(),
            pages: Vec::new(),
        }
    }
}

/// Pages with several runs use the `["", ...]` layout.
fn page_component(page: &[TextSegment], tier: VersionTier) -> String {
    let options = SerializeOptions::new(tier).with_array_format(page.len() > 1);
    serialize(page, &options)
}

pub fn book(spec: &BookSpec, tier: VersionTier) -> String {
    let pages: Vec<String> = spec
        .pages
        .iter()
        .map(|page| page_component(page, tier))
        .collect();
    let title = quote_json(&spec.title);
    let author = quote_json(&spec.author);

    match tier {
        VersionTier::V1_21_5 => format!(
            "/give {} minecraft:written_book[written_book_content={{title:{},author:{},pages:[{}]}}]",
            spec.target,
            title,
            author,
            pages.join(",")
        ),
        VersionTier::V1_20 => {
            let quoted: Vec<String> = pages.iter().map(|p| quote_snbt(p)).collect();
            format!(
                "/give {} minecraft:written_book[written_book_content={{title:{},author:{},pages:[{}]}}]",
                spec.target,
                title,
                author,
                quoted.join(",")
            )
        }
        VersionTier::V1_16 | VersionTier::V1_13 => {
            let quoted: Vec<String> = pages.iter().map(|p| quote_snbt(p)).collect();
            format!(
                "/give {} minecraft:written_book{{title:{},author:{},pages:[{}]}}",
                spec.target,
                title,
                author,
                quoted.join(",")
            )
        }
        VersionTier::Pre1_13 => {
            let quoted: Vec<String> = pages.iter().map(|p| quote_json(p)).collect();
            format!(
                "/give {} minecraft:written_book 1 0 {{title:{},author:{},pages:[{}]}}",
                spec.target,
                title,
                author,
                quoted.join(",")
            )
        }
    }
}

// ============================================================================
// Dispatch
// ============================================================================

/// Builds a command for `tool` from a single segment sequence. Signs put the
/// sequence on the first line; books make it the only page. `array_format`
/// only applies to the chat tools; sign lines and book pages pick their own.
pub fn build(tool: Tool, target: &Target, segments: &[TextSegment], options: &SerializeOptions) -> String {
    let tier = options.version;
    match tool {
        Tool::Tellraw => tellraw(target, segments, options),
        Tool::Title => title(target, TitleSlot::Title, segments, options),
        Tool::Subtitle => title(target, TitleSlot::Subtitle, segments, options),
        Tool::Actionbar => title(target, TitleSlot::Actionbar, segments, options),
        Tool::Sign => sign(
            &SignSpec {
                lines: vec![segments.to_vec()],
                ..Default::default()
            },
            tier,
        ),
        Tool::Book => book(
            &BookSpec {
                target: target.clone(),
                pages: vec![segments.to_vec()],
                ..Default::default()
            },
            tier,
        ),
    }
}
