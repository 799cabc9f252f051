//! Token-level combinators shared by both DSL grammars
//!
//! Whitespace includes `#` and `//` line comments. Keywords only match when
//! not followed by an identifier character, so `event` does not match the
//! prefix of `event_form`.

use nom::{
    branch::alt,
    bytes::complete::{escaped_transform, tag, take_while, take_while1},
    character::complete::{char, multispace1, none_of, not_line_ending, satisfy},
    combinator::{cut, map, not, opt, recognize, value},
    error::{context, VerboseError},
    multi::many0_count,
    sequence::{delimited, pair, preceded, terminated},
    IResult,
};

pub(crate) type Res<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Skip whitespace and comments
pub(crate) fn sp(input: &str) -> Res<'_, &str> {
    recognize(many0_count(alt((multispace1, line_comment))))(input)
}

fn line_comment(input: &str) -> Res<'_, &str> {
    recognize(pair(alt((tag("#"), tag("//"))), not_line_ending))(input)
}

/// `[A-Za-z_][A-Za-z0-9_-]*`
pub(crate) fn identifier(input: &str) -> Res<'_, &str> {
    recognize(pair(satisfy(is_ident_start), take_while(is_ident_char)))(input)
}

/// Match `kw` as a whole word
pub(crate) fn keyword<'a>(kw: &'static str) -> impl FnMut(&'a str) -> Res<'a, &'a str> {
    terminated(tag(kw), not(satisfy(is_ident_char)))
}

/// `"..."` with `\n`, `\t`, `\\` and `\"` escapes
pub(crate) fn quoted_string(input: &str) -> Res<'_, String> {
    map(
        delimited(
            char('"'),
            opt(escaped_transform(
                none_of("\"\\"),
                '\\',
                alt((
                    value('\n', char('n')),
                    value('\r', char('r')),
                    value('\t', char('t')),
                    value('\\', char('\\')),
                    value('"', char('"')),
                )),
            )),
            cut(context("expected closing '\"'", char('"'))),
        ),
        Option::unwrap_or_default,
    )(input)
}

/// Quoted string or bare identifier
pub(crate) fn text_value(input: &str) -> Res<'_, String> {
    alt((quoted_string, map(identifier, str::to_string)))(input)
}

/// `yes` / `no` as a boolean
pub(crate) fn yes_no(input: &str) -> Res<'_, bool> {
    alt((value(true, keyword("yes")), value(false, keyword("no"))))(input)
}

/// Unquoted token such as `09:00`
pub(crate) fn bare_token(input: &str) -> Res<'_, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == ':' || c == '.')(input)
}

/// `key =` with surrounding whitespace; fails hard if the `=` is missing
pub(crate) fn assignment<'a>(
    key: &'static str,
    missing_equals: &'static str,
) -> impl FnMut(&'a str) -> Res<'a, ()> {
    move |input| {
        let (input, _) = keyword(key)(input)?;
        let (input, _) = preceded(sp, cut(context(missing_equals, char('='))))(input)?;
        let (input, _) = sp(input)?;
        Ok((input, ()))
    }
}
