use indexmap::IndexMap;
use serde::Deserialize;
use serde_with::{MapPreventDuplicates, serde_as};

use changeset_core::{BumpType, ChangeCategory, Changeset, PackageRelease};

use crate::error::{FormatError, FrontMatterError, Result, ValidationError};

const DELIMITER: &str = "---";

/// File extension of changeset files inside the changeset directory.
pub const CHANGESET_EXTENSION: &str = "md";

pub const MAX_INPUT_SIZE: usize = 100 * 1024 * 1024;

#[serde_as]
#[derive(Deserialize)]
struct FrontMatter {
    #[serde(default)]
    category: Option<ChangeCategory>,
    #[serde(flatten)]
    #[serde_as(as = "MapPreventDuplicates<_, _>")]
    releases: IndexMap<String, BumpType>,
}

fn skip_newline(s: &str) -> &str {
    s.strip_prefix("\r\n")
        .or_else(|| s.strip_prefix('\n'))
        .unwrap_or(s)
}

/// Byte offset of the closing delimiter line within `s`.
fn closing_delimiter_offset(s: &str) -> Option<usize> {
    if s.starts_with(DELIMITER) {
        return Some(0);
    }
    s.find("\n---").map(|pos| pos + 1)
}

fn split_front_matter(content: &str) -> Result<(&str, &str)> {
    let Some(rest) = content.trim_start().strip_prefix(DELIMITER) else {
        return Err(FrontMatterError::MissingOpeningDelimiter.into());
    };
    let rest = skip_newline(rest);

    let offset =
        closing_delimiter_offset(rest).ok_or(FrontMatterError::MissingClosingDelimiter)?;

    let yaml = rest[..offset].trim_end_matches(['\r', '\n']);
    if yaml.trim().is_empty() {
        return Err(FrontMatterError::EmptyFrontMatter.into());
    }

    let body = skip_newline(&rest[offset + DELIMITER.len()..]);
    Ok((yaml, body))
}

/// Parses the changeset stored under `id`.
///
/// Releases keep the order in which they appear in the front matter. A
/// `none` bump is accepted and kept; it contributes a changelog entry but
/// no version change of its own.
///
/// # Errors
///
/// Returns a [`FormatError`] when the input is too large, the front matter
/// is malformed, a package is listed twice, a bump or category is unknown,
/// or no package is listed at all.
#[must_use = "parsing result should be handled"]
pub fn parse_changeset(id: &str, content: &str) -> Result<Changeset> {
    if id.trim().is_empty() {
        return Err(ValidationError::EmptyId.into());
    }
    if content.len() > MAX_INPUT_SIZE {
        return Err(ValidationError::InputTooLarge {
            max_bytes: MAX_INPUT_SIZE,
        }
        .into());
    }

    let (yaml, body) = split_front_matter(content)?;
    let front_matter: FrontMatter = serde_yml::from_str(yaml)?;

    if front_matter.releases.is_empty() {
        return Err(FormatError::Validation(ValidationError::NoReleases {
            id: id.to_string(),
        }));
    }

    Ok(Changeset {
        id: id.to_string(),
        summary: body.trim().to_string(),
        releases: front_matter
            .releases
            .into_iter()
            .map(|(name, bump_type)| PackageRelease { name, bump_type })
            .collect(),
        category: front_matter.category.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Changeset {
        parse_changeset("quiet-lakes-sing", content).expect("should parse")
    }

    fn parse_err(content: &str) -> String {
        parse_changeset("quiet-lakes-sing", content)
            .expect_err("should fail")
            .to_string()
    }

    #[test]
    fn single_package_with_summary() {
        let changeset = parse("---\n\"pkg-a\": patch\n---\nFix overflow in the tokenizer.\n");

        assert_eq!(changeset.id, "quiet-lakes-sing");
        assert_eq!(
            changeset.releases,
            vec![PackageRelease {
                name: "pkg-a".to_string(),
                bump_type: BumpType::Patch,
            }]
        );
        assert_eq!(changeset.summary, "Fix overflow in the tokenizer.");
        assert_eq!(changeset.category, ChangeCategory::Changed);
    }

    #[test]
    fn releases_keep_declaration_order() {
        let changeset = parse(
            r#"---
"pkg-c": major
"pkg-a": minor
"pkg-b": none
---
Reshuffle.
"#,
        );

        let names: Vec<_> = changeset.releases.iter().map(|r| r.name.as_str()).collect();
        let bumps: Vec<_> = changeset.releases.iter().map(|r| r.bump_type).collect();
        assert_eq!(names, ["pkg-c", "pkg-a", "pkg-b"]);
        assert_eq!(bumps, [BumpType::Major, BumpType::Minor, BumpType::None]);
    }

    #[test]
    fn category_key_is_not_a_release() {
        let changeset = parse("---\ncategory: fixed\n\"pkg-a\": patch\n---\nFixed a leak.\n");

        assert_eq!(changeset.category, ChangeCategory::Fixed);
        assert_eq!(changeset.releases.len(), 1);
        assert!(changeset.names("pkg-a"));
    }

    #[test]
    fn multiline_summary_is_trimmed() {
        let changeset = parse(
            r#"---
"pkg-a": minor
---

Adds streaming support.

- new `Stream` type
- `read_all` helper

"#,
        );

        assert!(changeset.summary.starts_with("Adds streaming support."));
        assert!(changeset.summary.ends_with("`read_all` helper"));
    }

    #[test]
    fn empty_body_gives_empty_summary() {
        assert!(parse("---\n\"pkg-a\": patch\n---\n").summary.is_empty());
        assert!(parse("---\n\"pkg-a\": patch\n---\n  \n\t\n").summary.is_empty());
    }

    #[test]
    fn delimiter_inside_body_is_kept() {
        let changeset = parse("---\n\"pkg-a\": patch\n---\nbefore --- after\n");

        assert_eq!(changeset.summary, "before --- after");
    }

    #[test]
    fn windows_line_endings() {
        let changeset = parse("---\r\n\"pkg-a\": patch\r\n\"pkg-b\": minor\r\n---\r\nCRLF body.\r\n");

        assert_eq!(changeset.releases.len(), 2);
        assert_eq!(changeset.summary, "CRLF body.");
    }

    #[test]
    fn missing_opening_delimiter() {
        assert!(parse_err("\"pkg-a\": patch\n---\nBody.\n").contains("opening delimiter"));
    }

    #[test]
    fn missing_closing_delimiter() {
        assert!(parse_err("---\n\"pkg-a\": patch\nBody.\n").contains("closing delimiter"));
    }

    #[test]
    fn empty_front_matter() {
        assert!(parse_err("---\n---\nBody.\n").contains("empty"));
    }

    #[test]
    fn unknown_bump_type() {
        assert!(parse_err("---\n\"pkg-a\": huge\n---\n").contains("YAML"));
    }

    #[test]
    fn unknown_category() {
        assert!(parse_err("---\ncategory: misc\n\"pkg-a\": patch\n---\n").contains("YAML"));
    }

    #[test]
    fn no_releases() {
        let message = parse_err("---\ncategory: added\n---\nNothing.\n");

        assert!(message.contains("at least one release"));
        assert!(message.contains("quiet-lakes-sing"));
    }

    #[test]
    fn duplicate_package_is_rejected() {
        let message = parse_err("---\n\"pkg-a\": major\n\"pkg-a\": patch\n---\n");

        assert!(message.contains("duplicate"), "unexpected error: {message}");
    }

    #[test]
    fn empty_id_is_rejected() {
        let err = parse_changeset(" ", "---\n\"pkg-a\": patch\n---\n").expect_err("should fail");

        assert!(matches!(
            err,
            FormatError::Validation(ValidationError::EmptyId)
        ));
    }

    #[test]
    fn oversized_input_is_rejected() {
        let content = "a".repeat(MAX_INPUT_SIZE + 1);

        let err = parse_changeset("big", &content).expect_err("should fail");

        assert!(err.to_string().contains("maximum size"));
    }
}
