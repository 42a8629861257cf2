//! Field extraction with ordered selector fallbacks.
//!
//! A [`FieldRule`] is an ordered list of [`Strategy`] values plus the sentinel
//! to report when none of them yields text. Each strategy is a [`Probe`] (how
//! to read a value out of the DOM) followed by a [`Refine`] step (how to turn
//! the raw value into the field's text). The first strategy producing a
//! non-empty value wins, so list order encodes which markup variant is
//! preferred when several are present.
//!
//! Rules operate on an [`ElementRef`] scope: the document root for product
//! pages, or the root of one parsed result-item fragment for search pages.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

/// How to read a raw value from the scope.
#[derive(Debug, Clone, Copy)]
pub enum Probe {
    /// Whitespace-collapsed text content of the first match.
    Text(&'static str),
    /// Attribute value of the first match.
    Attr {
        css: &'static str,
        name: &'static str,
    },
    /// Inner HTML of the first match, trimmed.
    Markup(&'static str),
    /// Text of two matches joined with `.`, for prices rendered as separate
    /// whole and fractional parts. A trailing `.` on the whole part is dropped.
    Joined {
        whole: &'static str,
        fraction: &'static str,
    },
}

/// Post-processing applied to a probed value.
#[derive(Debug, Clone, Copy)]
pub enum Refine {
    /// Keep the value as read.
    Keep,
    /// Token before the first whitespace, e.g. `"4.5 out of 5 stars"` → `"4.5"`.
    FirstToken,
    /// Remove a leading label, e.g. eBay's legacy `"Details about"` title prefix.
    StripPrefix(&'static str),
    /// Review count; see [`leading_count`].
    LeadingCount,
    /// Count written in parentheses after other text, e.g. `"4.3 out of 5(120)"` → `"120"`.
    ParenCount,
    /// Jumia star bar; see [`star_rating_from_style`].
    StarWidth,
}

/// One way of locating a field's value.
#[derive(Debug, Clone, Copy)]
pub struct Strategy {
    pub probe: Probe,
    pub refine: Refine,
}

impl Strategy {
    #[must_use]
    pub const fn text(css: &'static str) -> Self {
        Self {
            probe: Probe::Text(css),
            refine: Refine::Keep,
        }
    }

    #[must_use]
    pub const fn attr(css: &'static str, name: &'static str) -> Self {
        Self {
            probe: Probe::Attr { css, name },
            refine: Refine::Keep,
        }
    }

    #[must_use]
    pub const fn markup(css: &'static str) -> Self {
        Self {
            probe: Probe::Markup(css),
            refine: Refine::Keep,
        }
    }

    #[must_use]
    pub const fn joined(whole: &'static str, fraction: &'static str) -> Self {
        Self {
            probe: Probe::Joined { whole, fraction },
            refine: Refine::Keep,
        }
    }

    #[must_use]
    pub const fn then(self, refine: Refine) -> Self {
        Self {
            probe: self.probe,
            refine,
        }
    }

    /// Runs the probe and refine step, returning `None` unless the result is
    /// non-empty.
    #[must_use]
    pub fn apply(&self, scope: ElementRef<'_>) -> Option<String> {
        let raw = self.probe.read(scope)?;
        self.refine.apply(&raw).filter(|value| !value.is_empty())
    }
}

impl Probe {
    fn read(self, scope: ElementRef<'_>) -> Option<String> {
        match self {
            Probe::Text(css) => select_first(scope, css).map(element_text),
            Probe::Attr { css, name } => select_first(scope, css)
                .and_then(|el| el.value().attr(name))
                .map(|v| v.trim().to_string()),
            Probe::Markup(css) => {
                select_first(scope, css).map(|el| el.inner_html().trim().to_string())
            }
            Probe::Joined { whole, fraction } => {
                let whole = element_text(select_first(scope, whole)?);
                let fraction = element_text(select_first(scope, fraction)?);
                let whole = whole.trim_end_matches('.');
                if whole.is_empty() || fraction.is_empty() {
                    return None;
                }
                Some(format!("{whole}.{fraction}"))
            }
        }
    }
}

impl Refine {
    fn apply(self, raw: &str) -> Option<String> {
        match self {
            Refine::Keep => Some(raw.trim().to_string()),
            Refine::FirstToken => raw.split_whitespace().next().map(str::to_string),
            Refine::StripPrefix(prefix) => {
                let trimmed = raw.trim();
                Some(
                    trimmed
                        .strip_prefix(prefix)
                        .unwrap_or(trimmed)
                        .trim()
                        .to_string(),
                )
            }
            Refine::LeadingCount => leading_count(raw),
            Refine::ParenCount => PAREN_COUNT
                .captures(raw)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string()),
            Refine::StarWidth => star_rating_from_style(raw),
        }
    }
}

/// A field's ordered strategies and the sentinel reported when all fail.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub strategies: &'static [Strategy],
    pub sentinel: &'static str,
}

impl FieldRule {
    /// Returns the first strategy's value, or the sentinel.
    #[must_use]
    pub fn extract(&self, scope: ElementRef<'_>) -> String {
        first_match(self.strategies, scope).unwrap_or_else(|| {
            tracing::debug!(field = self.name, "no selector matched; using sentinel");
            self.sentinel.to_string()
        })
    }
}

/// First-match-wins combinator over `strategies`.
#[must_use]
pub fn first_match(strategies: &[Strategy], scope: ElementRef<'_>) -> Option<String> {
    strategies.iter().find_map(|strategy| strategy.apply(scope))
}

/// First descendant of `scope` matching `css`. An unparsable selector is
/// treated as a non-match.
pub(crate) fn select_first<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => scope.select(&selector).next(),
        Err(e) => {
            tracing::warn!(selector = css, error = %e, "invalid css selector");
            None
        }
    }
}

/// Concatenated text nodes with runs of whitespace collapsed to one space.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

static NUMBER_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:[.,]\d+)*").expect("valid number-run regex"));

static PAREN_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d+(?:[.,]\d+)*)\)").expect("valid paren-count regex"));

static STYLE_WIDTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"width:\s*(\d+(?:\.\d+)?)%").expect("valid style-width regex")
});

/// Review count from a counter label.
///
/// Returns the leading whitespace-delimited token when it is purely numeric
/// (digits plus `,`/`.` group separators), e.g. `"1,234 ratings"` → `"1,234"`.
/// Otherwise returns the first digit run anywhere in the text, e.g.
/// `"(87)"` → `"87"` or `"Reviews: 12"` → `"12"`. `None` if the text has no
/// digits at all.
#[must_use]
pub fn leading_count(text: &str) -> Option<String> {
    let token = text.split_whitespace().next()?;
    let is_numeric = token.chars().any(|c| c.is_ascii_digit())
        && token.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.');
    if is_numeric {
        return Some(token.to_string());
    }
    NUMBER_RUN.find(text).map(|m| m.as_str().to_string())
}

/// Converts a Jumia star-bar inline style into a 5-point rating.
///
/// The filled bar is styled `width: N%`; the rating is `N / 20`, rendered with
/// at least one decimal place (`"width: 80%"` → `"4.0"`, `"width: 85%"` →
/// `"4.25"`). Returns `None` when no `width:` percentage is present.
#[must_use]
pub fn star_rating_from_style(style: &str) -> Option<String> {
    let caps = STYLE_WIDTH.captures(style)?;
    let percent: f64 = caps.get(1)?.as_str().parse().ok()?;
    let rating = percent / 20.0;
    if rating.fract().abs() < f64::EPSILON {
        Some(format!("{rating:.1}"))
    } else {
        Some(rating.to_string())
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
