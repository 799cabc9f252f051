//! Events DSL parser
//!
//! ```text
//! event Students "Orientation Day" {
//!     date = 2025-03-01
//!     start = "09:00"
//!     end = "10:00"
//!     location = REC
//! }
//! ```
//!
//! Every key is mandatory and must appear in this order. Times are kept as
//! written; checking their format is left to scheduling validation.

use crate::error::{ParseError, Result};
use crate::lexer::{bare_token, identifier, keyword, quoted_string, sp, text_value, Res};
use crate::DslParser;
use chrono::NaiveDate;
use kairos_core::ast::{EventDraft, EventsDocument};
use nom::{
    branch::alt,
    bytes::complete::take_while_m_n,
    character::complete::char,
    combinator::{cut, eof, map, map_res, recognize},
    error::context,
    multi::many0,
    sequence::{preceded, tuple},
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parser for events documents
#[derive(Debug, Clone, Copy, Default)]
pub struct EventsParser;

impl EventsParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse events source text into an [`EventsDocument`]
    pub fn parse(&self, source: &str) -> Result<EventsDocument> {
        match document(source) {
            Ok((_, doc)) => {
                log::debug!("Parsed events document with {} event(s)", doc.len());
                Ok(doc)
            }
            Err(err) => Err(ParseError::from_nom(source, err)),
        }
    }
}

impl DslParser for EventsParser {
    type Document = EventsDocument;

    fn parse(&self, source: &str) -> Result<EventsDocument> {
        EventsParser::parse(self, source)
    }
}

fn document(input: &str) -> Res<'_, EventsDocument> {
    let (input, events) = many0(preceded(sp, event_block))(input)?;
    let (input, _) = preceded(sp, cut(context("expected 'event' block", eof)))(input)?;
    Ok((input, EventsDocument::new(events)))
}

fn event_block(input: &str) -> Res<'_, EventDraft> {
    let (input, _) = keyword("event")(input)?;
    let (input, requester) =
        preceded(sp, cut(context("expected requester type after 'event'", identifier)))(input)?;
    let (input, name) =
        preceded(sp, cut(context("expected quoted event name", quoted_string)))(input)?;
    let (input, _) = preceded(sp, cut(context("expected '{' to open event", char('{'))))(input)?;

    let (input, date) = entry("date", "expected 'date = YYYY-MM-DD'", date_value)(input)?;
    let (input, start) = entry("start", "expected 'start = HH:MM'", time_value)(input)?;
    let (input, end) = entry("end", "expected 'end = HH:MM'", time_value)(input)?;
    let (input, location) = entry("location", "expected 'location = <name>'", text_value)(input)?;

    let (input, _) = preceded(sp, cut(context("expected '}' to close event", char('}'))))(input)?;

    Ok((
        input,
        EventDraft::new(name, requester, date, start, end, location),
    ))
}

/// `key = value`, required; any mismatch is a hard failure
fn entry<'a, T>(
    key: &'static str,
    expected: &'static str,
    mut value: impl FnMut(&'a str) -> Res<'a, T>,
) -> impl FnMut(&'a str) -> Res<'a, T> {
    move |input| {
        let (input, _) = preceded(sp, cut(context(expected, keyword(key))))(input)?;
        let (input, _) = preceded(sp, cut(context(expected, char('='))))(input)?;
        let (input, _) = sp(input)?;
        cut(context(expected, |i| value(i)))(input)
    }
}

fn date_value(input: &str) -> Res<'_, NaiveDate> {
    context(
        "expected a valid calendar date",
        map_res(
            recognize(tuple((digits(4), char('-'), digits(2), char('-'), digits(2)))),
            |text: &str| NaiveDate::parse_from_str(text, DATE_FORMAT),
        ),
    )(input)
}

fn digits<'a>(n: usize) -> impl FnMut(&'a str) -> Res<'a, &'a str> {
    take_while_m_n(n, n, |c: char| c.is_ascii_digit())
}

fn time_value(input: &str) -> Res<'_, String> {
    alt((quoted_string, map(bare_token, str::to_string)))(input)
}
