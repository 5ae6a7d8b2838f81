//! # Legacy Formatting Codes
//!
//! Converts between segments and the `§`-prefixed formatting codes used by
//! chat before JSON components existed (and still accepted in many places).
//! Writing `&` instead of `§` is a common convention for typed input.
//!
//! | code      | effect         |
//! |-----------|----------------|
//! | `0`..`f`  | color (resets formatting) |
//! | `k`       | obfuscated     |
//! | `l`       | bold           |
//! | `m`       | strikethrough  |
//! | `n`       | underlined     |
//! | `o`       | italic         |
//! | `r`       | reset          |

use crate::core::text::{NamedColor, StyleFlag, TextColor, TextSegment};

pub const SECTION_SIGN: char = '§';

/// Prefixes accepted by [`parse_legacy`] for typed input.
pub const DEFAULT_PREFIXES: [char; 2] = [SECTION_SIGN, '&'];

enum Code {
    Color(NamedColor),
    Style(StyleFlag),
    Reset,
}

impl Code {
    fn from_char(c: char) -> Option<Code> {
        if let Some(color) = NamedColor::from_code(c) {
            return Some(Code::Color(color));
        }
        match c.to_ascii_lowercase() {
            'k' => Some(Code::Style(StyleFlag::Obfuscated)),
            'l' => Some(Code::Style(StyleFlag::Bold)),
            'm' => Some(Code::Style(StyleFlag::Strikethrough)),
            'n' => Some(Code::Style(StyleFlag::Underlined)),
            'o' => Some(Code::Style(StyleFlag::Italic)),
            'r' => Some(Code::Reset),
            _ => None,
        }
    }
}

struct LegacyParser<'a> {
    prefixes: &'a [char],
    current: TextSegment,
    done: Vec<TextSegment>,
}

impl<'a> LegacyParser<'a> {
    fn new(prefixes: &'a [char]) -> Self {
        Self {
            prefixes,
            current: TextSegment::default(),
            done: Vec::new(),
        }
    }

    fn parse(mut self, input: &str) -> Vec<TextSegment> {
        let mut chars = input.chars().peekable();
        while let Some(c) = chars.next() {
            if self.prefixes.contains(&c)
                && let Some(code) = chars.peek().copied().and_then(Code::from_char)
            {
                chars.next();
                self.apply(code);
            } else {
                self.current.text.push(c);
            }
        }
        self.finish_current();
        self.done
    }

    fn apply(&mut self, code: Code) {
        self.finish_current();
        match code {
            Code::Color(color) => {
                self.current = TextSegment {
                    color: Some(TextColor::Named(color)),
                    ..Default::default()
                };
            }
            Code::Style(flag) => self.current.set_flag(flag, true),
            Code::Reset => self.current = TextSegment::default(),
        }
    }

    /// Pushes the current run (if any) and starts a new one with the same style.
    fn finish_current(&mut self) {
        if self.current.text.is_empty() {
            return;
        }
        let next = TextSegment {
            text: String::new(),
            ..self.current.clone()
        };
        self.done.push(std::mem::replace(&mut self.current, next));
    }
}

/// Splits a code-formatted string into styled segments.
pub fn parse_legacy(input: &str, prefixes: &[char]) -> Vec<TextSegment> {
    LegacyParser::new(prefixes).parse(input)
}

/// Renders segments with `§` codes. Hex colors have no legacy code and are
/// dropped; events are dropped.
pub fn to_legacy(segments: &[TextSegment]) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        let styled = segment.color.is_some()
            || StyleFlag::ALL.iter().any(|&flag| segment.is_set(flag));
        if i > 0 && (styled || !out.is_empty()) {
            out.push(SECTION_SIGN);
            out.push('r');
        }
        if let Some(color) = segment.color.as_ref().and_then(TextColor::named) {
            out.push(SECTION_SIGN);
            out.push(color.code());
        }
        for flag in StyleFlag::ALL {
            if segment.is_set(flag) {
                out.push(SECTION_SIGN);
                out.push(style_code(flag));
            }
        }
        out.push_str(&segment.text);
    }
    out
}

fn style_code(flag: StyleFlag) -> char {
    match flag {
        StyleFlag::Bold => 'l',
        StyleFlag::Italic => 'o',
        StyleFlag::Underlined => 'n',
        StyleFlag::Strikethrough => 'm',
        StyleFlag::Obfuscated => 'k',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Vec<TextSegment> {
        parse_legacy(s, &DEFAULT_PREFIXES)
    }

    #[test]
    fn test_plain_text_is_one_segment() {
        let segs = parse("Hello world");
        assert_eq!(segs, vec![TextSegment::plain("Hello world")]);
    }

    #[test]
    fn test_color_starts_new_segment() {
        let segs = parse("Hi &cthere");
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].text, "Hi ");
        assert!(segs[0].color.is_none());
        assert_eq!(segs[1].text, "there");
        assert_eq!(segs[1].color, Some(TextColor::Named(NamedColor::Red)));
    }

    #[test]
    fn test_styles_accumulate_and_color_resets_them() {
        let segs = parse("§l§oboth§9blue");
        assert_eq!(segs[0].text, "both");
        assert!(segs[0].is_set(StyleFlag::Bold));
        assert!(segs[0].is_set(StyleFlag::Italic));
        assert_eq!(segs[1].text, "blue");
        assert!(!segs[1].is_set(StyleFlag::Bold));
    }

    #[test]
    fn test_style_mid_run_keeps_color() {
        let segs = parse("&aa&lb");
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[1].color, Some(TextColor::Named(NamedColor::Green)));
        assert!(segs[1].is_set(StyleFlag::Bold));
    }

    #[test]
    fn test_reset_clears_everything() {
        let segs = parse("&c&lx&ry");
        assert_eq!(segs[1], TextSegment::plain("y"));
    }

    #[test]
    fn test_unknown_code_and_trailing_prefix_are_literal() {
        assert_eq!(parse("a&zb&"), vec![TextSegment::plain("a&zb&")]);
    }

    #[test]
    fn test_ampersand_ignored_without_prefix() {
        let segs = parse_legacy("R&D", &[SECTION_SIGN]);
        assert_eq!(segs, vec![TextSegment::plain("R&D")]);
    }

    #[test]
    fn test_to_legacy() {
        let segs = parse("&6Gold &l&nLoud&rplain");
        assert_eq!(to_legacy(&segs), "§6Gold §r§6§l§nLoud§rplain");
    }

    #[test]
    fn test_to_legacy_plain_runs_need_no_codes() {
        let segs = vec![TextSegment::plain("a"), TextSegment::plain("b")];
        assert_eq!(to_legacy(&segs), "a§rb");
        assert_eq!(to_legacy(&[TextSegment::plain("a")]), "a");
    }
}
