//! Element → markup rules.
//!
//! A pure mapping from what an element declares (its tag, link target and
//! inline font styles) to [`Directive`]s. Nothing here touches a tree.

use crate::markup::MarkupType;
use crate::tree::TreeNode;

/// One markup instruction derived from an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Apply {
        kind: MarkupType,
        href: Option<String>,
    },
    /// Explicitly removes a type, e.g. `font-weight: normal`.
    Clear(MarkupType),
}

/// How `Clear` directives are treated during extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StyleMode {
    /// Styles only ever add formatting; `Clear` directives are ignored.
    #[default]
    Additive,
    /// Inline styles can undo formatting declared further out.
    Subtractive,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    pub style_mode: StyleMode,
}

impl ExtractOptions {
    pub fn subtractive() -> Self {
        Self {
            style_mode: StyleMode::Subtractive,
        }
    }
}

/// The parts of an element that can imply markups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Declared<'a> {
    pub tag: &'a str,
    pub href: Option<&'a str>,
    pub font_weight: Option<&'a str>,
    pub font_style: Option<&'a str>,
}

impl<'a> Declared<'a> {
    /// Reads the declarations off a tree node.
    pub fn of<N: TreeNode>(node: &'a N) -> Self {
        Self {
            tag: node.tag_name().unwrap_or(""),
            href: node.attribute("href"),
            font_weight: node.style_property("font-weight"),
            font_style: node.style_property("font-style"),
        }
    }
}

/// Directives for one element: tag first, then `font-style`, then
/// `font-weight`.
pub fn directives(declared: &Declared<'_>, mode: StyleMode) -> Vec<Directive> {
    let mut out = Vec::with_capacity(3);

    let apply = |kind: MarkupType| Directive::Apply { kind, href: None };
    let tag = declared.tag.to_ascii_lowercase();
    match tag.as_str() {
        "a" => out.push(Directive::Apply {
            kind: MarkupType::Link,
            href: declared.href.map(str::to_owned),
        }),
        "code" => out.push(apply(MarkupType::Code)),
        "strong" | "b" => out.push(apply(MarkupType::Bold)),
        "em" | "i" => out.push(apply(MarkupType::Italic)),
        _ => {}
    }

    if let Some(style) = declared.font_style.map(str::trim) {
        if style.contains("italic") || style.contains("oblique") {
            out.push(apply(MarkupType::Italic));
        } else if style == "normal" {
            out.push(Directive::Clear(MarkupType::Italic));
        }
    }

    if let Some(weight) = declared.font_weight.map(str::trim) {
        if is_bold(weight) {
            out.push(apply(MarkupType::Bold));
        } else if is_light(weight) {
            out.push(Directive::Clear(MarkupType::Bold));
        }
    }

    if mode == StyleMode::Additive {
        out.retain(|directive| matches!(directive, Directive::Apply { .. }));
    }
    out
}

/// Numeric weight when the value contains a `N00` run and is a number.
fn numeric_weight(weight: &str) -> Option<u32> {
    let has_hundreds = weight
        .as_bytes()
        .windows(3)
        .any(|w| w[0].is_ascii_digit() && w[1] == b'0' && w[2] == b'0');
    if !has_hundreds {
        return None;
    }
    weight.parse().ok()
}

fn is_bold(weight: &str) -> bool {
    weight.contains("bold") || numeric_weight(weight).is_some_and(|n| n >= 700)
}

fn is_light(weight: &str) -> bool {
    weight.contains("light")
        || weight.contains("normal")
        || numeric_weight(weight).is_some_and(|n| n < 700)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn apply(kind: MarkupType) -> Directive {
        Directive::Apply { kind, href: None }
    }

    fn tag(tag: &str) -> Declared<'_> {
        Declared {
            tag,
            ..Declared::default()
        }
    }

    #[rstest]
    #[case("code", vec![apply(MarkupType::Code)])]
    #[case("strong", vec![apply(MarkupType::Bold)])]
    #[case("b", vec![apply(MarkupType::Bold)])]
    #[case("em", vec![apply(MarkupType::Italic)])]
    #[case("I", vec![apply(MarkupType::Italic)])]
    #[case("span", vec![])]
    #[case("p", vec![])]
    fn tags(#[case] name: &str, #[case] expected: Vec<Directive>) {
        assert_eq!(directives(&tag(name), StyleMode::Additive), expected);
    }

    #[test]
    fn links_carry_their_href() {
        let declared = Declared {
            tag: "a",
            href: Some("/somewhere"),
            ..Declared::default()
        };
        assert_eq!(
            directives(&declared, StyleMode::Additive),
            vec![Directive::Apply {
                kind: MarkupType::Link,
                href: Some("/somewhere".into())
            }]
        );
    }

    #[rstest]
    #[case("italic", Some(apply(MarkupType::Italic)))]
    #[case("oblique 10deg", Some(apply(MarkupType::Italic)))]
    #[case("normal", Some(Directive::Clear(MarkupType::Italic)))]
    #[case("inherit", None)]
    fn font_style(#[case] style: &str, #[case] expected: Option<Directive>) {
        let declared = Declared {
            tag: "span",
            font_style: Some(style),
            ..Declared::default()
        };
        assert_eq!(
            directives(&declared, StyleMode::Subtractive),
            expected.into_iter().collect::<Vec<_>>()
        );
    }

    #[rstest]
    #[case("bold", Some(apply(MarkupType::Bold)))]
    #[case("bolder", Some(apply(MarkupType::Bold)))]
    #[case("700", Some(apply(MarkupType::Bold)))]
    #[case("900", Some(apply(MarkupType::Bold)))]
    #[case("600", Some(Directive::Clear(MarkupType::Bold)))]
    #[case("400", Some(Directive::Clear(MarkupType::Bold)))]
    #[case("normal", Some(Directive::Clear(MarkupType::Bold)))]
    #[case("lighter", Some(Directive::Clear(MarkupType::Bold)))]
    #[case("750", None)]
    #[case("inherit", None)]
    fn font_weight(#[case] weight: &str, #[case] expected: Option<Directive>) {
        let declared = Declared {
            tag: "span",
            font_weight: Some(weight),
            ..Declared::default()
        };
        assert_eq!(
            directives(&declared, StyleMode::Subtractive),
            expected.into_iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn additive_mode_drops_clears() {
        let declared = Declared {
            tag: "em",
            font_style: Some("normal"),
            font_weight: Some("400"),
            ..Declared::default()
        };
        assert_eq!(
            directives(&declared, StyleMode::Additive),
            vec![apply(MarkupType::Italic)]
        );
        assert_eq!(
            directives(&declared, StyleMode::Subtractive),
            vec![
                apply(MarkupType::Italic),
                Directive::Clear(MarkupType::Italic),
                Directive::Clear(MarkupType::Bold),
            ]
        );
    }

    #[test]
    fn tag_and_style_combine() {
        let declared = Declared {
            tag: "code",
            font_style: Some("italic"),
            font_weight: Some("bold"),
            ..Declared::default()
        };
        assert_eq!(
            directives(&declared, StyleMode::Additive),
            vec![
                apply(MarkupType::Code),
                apply(MarkupType::Italic),
                apply(MarkupType::Bold),
            ]
        );
    }
}
