//! Rules DSL parser
//!
//! ```text
//! initialize_runtime = yes
//! event_form Students {
//!     event_name { visible = yes required = yes label = "Event name" }
//!     location   { required = yes, options = [REC, "Main Hall"] }
//! }
//! ```
//!
//! Field attributes may come in any order, optionally comma separated, each
//! at most once. `visible` defaults to yes and `required` to no.

use crate::error::{ParseError, Result};
use crate::lexer::{assignment, identifier, keyword, quoted_string, sp, text_value, yes_no, Res};
use crate::DslParser;
use kairos_core::ast::{FieldSpec, FormSpec, RulesDocument};
use nom::{
    branch::alt,
    character::complete::char,
    combinator::{cut, eof, map, opt},
    error::{context, VerboseError, VerboseErrorKind},
    multi::many0,
    sequence::preceded,
};

/// Parser for rules documents
#[derive(Debug, Clone, Copy, Default)]
pub struct RulesParser;

impl RulesParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse rules source text into a [`RulesDocument`]
    pub fn parse(&self, source: &str) -> Result<RulesDocument> {
        match document(source) {
            Ok((_, doc)) => {
                log::debug!(
                    "Parsed rules document: runtime_enabled={}, {} form(s)",
                    doc.runtime_enabled,
                    doc.forms.len()
                );
                Ok(doc)
            }
            Err(err) => Err(ParseError::from_nom(source, err)),
        }
    }
}

impl DslParser for RulesParser {
    type Document = RulesDocument;

    fn parse(&self, source: &str) -> Result<RulesDocument> {
        RulesParser::parse(self, source)
    }
}

fn document(input: &str) -> Res<'_, RulesDocument> {
    let (input, _) = sp(input)?;
    let (input, runtime_enabled) = cut(context(
        "expected 'initialize_runtime = yes|no' declaration",
        runtime_declaration,
    ))(input)?;
    let (input, forms) = many0(preceded(sp, event_form))(input)?;
    let (input, _) = preceded(sp, cut(context("expected 'event_form' block", eof)))(input)?;

    let mut doc = RulesDocument::new(runtime_enabled);
    doc.forms = forms;
    Ok((input, doc))
}

fn runtime_declaration(input: &str) -> Res<'_, bool> {
    let (input, _) = assignment("initialize_runtime", "expected '=' after initialize_runtime")(input)?;
    cut(context("expected yes or no", yes_no))(input)
}

fn event_form(input: &str) -> Res<'_, FormSpec> {
    let (input, _) = keyword("event_form")(input)?;
    let (input, requester) =
        preceded(sp, cut(context("expected requester type after 'event_form'", identifier)))(input)?;
    let (input, _) = preceded(sp, cut(context("expected '{' to open event_form", char('{'))))(input)?;
    let (input, fields) = many0(preceded(sp, field_block))(input)?;
    let (input, _) = preceded(
        sp,
        cut(context("expected field block or '}' to close event_form", char('}'))),
    )(input)?;

    let mut form = FormSpec::new(requester);
    form.fields = fields;
    Ok((input, form))
}

#[derive(Debug)]
enum Attribute {
    Visible(bool),
    Required(bool),
    Label(String),
    Options(Vec<String>),
}

impl Attribute {
    fn key(&self) -> &'static str {
        match self {
            Attribute::Visible(_) => "visible",
            Attribute::Required(_) => "required",
            Attribute::Label(_) => "label",
            Attribute::Options(_) => "options",
        }
    }

    fn apply(self, field: &mut FieldSpec) {
        match self {
            Attribute::Visible(v) => field.visible = v,
            Attribute::Required(v) => field.required = v,
            Attribute::Label(label) => field.label = Some(label),
            Attribute::Options(options) => field.options = Some(options),
        }
    }
}

fn field_block(input: &str) -> Res<'_, FieldSpec> {
    let (input, name) = identifier(input)?;
    let (mut input, _) =
        preceded(sp, cut(context("expected '{' after field name", char('{'))))(input)?;

    let mut field = FieldSpec::new(name);
    let mut seen: Vec<&'static str> = Vec::new();

    loop {
        let (rest, _) = sp(input)?;
        if let Ok((rest, _)) = char::<_, VerboseError<&str>>('}')(rest) {
            return Ok((rest, field));
        }

        let (after, attr) = cut(context(
            "expected visible, required, label, options or '}'",
            attribute,
        ))(rest)?;
        if seen.contains(&attr.key()) {
            return Err(nom::Err::Failure(VerboseError {
                errors: vec![(rest, VerboseErrorKind::Context("duplicate attribute"))],
            }));
        }
        seen.push(attr.key());
        attr.apply(&mut field);

        let (after, _) = opt(preceded(sp, char(',')))(after)?;
        input = after;
    }
}

fn attribute(input: &str) -> Res<'_, Attribute> {
    alt((
        map(
            preceded(
                assignment("visible", "expected '=' after visible"),
                cut(context("expected yes or no", yes_no)),
            ),
            Attribute::Visible,
        ),
        map(
            preceded(
                assignment("required", "expected '=' after required"),
                cut(context("expected yes or no", yes_no)),
            ),
            Attribute::Required,
        ),
        map(
            preceded(
                assignment("label", "expected '=' after label"),
                cut(context("expected quoted label", quoted_string)),
            ),
            Attribute::Label,
        ),
        map(
            preceded(
                assignment("options", "expected '=' after options"),
                cut(context("expected '[' to open options", option_list)),
            ),
            Attribute::Options,
        ),
    ))(input)
}

fn option_list(input: &str) -> Res<'_, Vec<String>> {
    let (mut input, _) = char('[')(input)?;
    let mut options = Vec::new();

    loop {
        let (rest, _) = sp(input)?;
        if let Ok((rest, _)) = char::<_, VerboseError<&str>>(']')(rest) {
            return Ok((rest, options));
        }

        let (rest, item) = cut(context("expected option value or ']'", text_value))(rest)?;
        options.push(item);

        let (rest, _) = sp(rest)?;
        let (rest, comma) = opt(char(','))(rest)?;
        if comma.is_none() {
            let (rest, _) = cut(context("expected ',' or ']' in options", char(']')))(rest)?;
            return Ok((rest, options));
        }
        input = rest;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Result<RulesDocument> {
        RulesParser::new().parse(src)
    }

    #[test]
    fn test_minimal_document() {
        let doc = parse("initialize_runtime = yes").unwrap();
        assert!(doc.runtime_enabled);
        assert!(doc.forms.is_empty());

        let doc = parse("  initialize_runtime=no\n").unwrap();
        assert!(!doc.runtime_enabled);
    }

    #[test]
    fn test_field_attributes() {
        let doc = parse(
            r#"initialize_runtime = yes
            event_form Students {
                event_name { visible = no required = yes label = "Title" }
                location { options = [REC, "Main Hall"], required = yes }
                submit_button {}
            }"#,
        )
        .unwrap();

        let form = &doc.forms[0];
        assert_eq!(form.requester_type, "Students");
        let names: Vec<_> = form.fields.iter().map(|f| f.field_name.as_str()).collect();
        assert_eq!(names, ["event_name", "location", "submit_button"]);

        let name = &form.fields[0];
        assert!(!name.visible);
        assert!(name.required);
        assert_eq!(name.label.as_deref(), Some("Title"));

        let location = &form.fields[1];
        assert!(location.visible);
        assert_eq!(
            location.options,
            Some(vec!["REC".to_string(), "Main Hall".to_string()])
        );

        let submit = &form.fields[2];
        assert!(submit.visible);
        assert!(!submit.required);
    }

    #[test]
    fn test_options_trailing_comma_and_empty() {
        let doc = parse(
            "initialize_runtime = yes event_form A { location { options = [x, y,] } requester_unit { options = [] } }",
        )
        .unwrap();
        assert_eq!(doc.forms[0].fields[0].options.as_ref().map(Vec::len), Some(2));
        assert_eq!(doc.forms[0].fields[1].options, Some(vec![]));
        assert!(!doc.forms[0].fields[1].has_options());
    }

    #[test]
    fn test_missing_runtime_declaration() {
        let err = parse("event_form Students {}").unwrap_err();
        assert_eq!((err.line(), err.column()), (1, 1));
        assert!(err.message().contains("initialize_runtime"));
    }

    #[test]
    fn test_duplicate_attribute_is_syntax_error() {
        let err = parse("initialize_runtime = yes\nevent_form A {\n  f { visible = yes visible = no }\n}")
            .unwrap_err();
        assert_eq!(err.line(), 3);
        assert_eq!(err.column(), 21);
        assert!(err.message().starts_with("duplicate attribute"));
    }

    #[test]
    fn test_unknown_top_level_construct() {
        let err = parse("initialize_runtime = yes\nevent_forms A {}").unwrap_err();
        assert_eq!(err.line(), 2);
        assert_eq!(err.column(), 1);
        assert!(err.message().contains("event_form"));
    }

    #[test]
    fn test_bad_boolean() {
        let err = parse("initialize_runtime = yes event_form A { f { required = maybe } }").unwrap_err();
        assert!(err.message().contains("yes or no"), "{}", err);
    }
}
