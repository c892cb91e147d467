//! `@media` prelude parsing.

use cssparser::{ParseError as CssParseError, Parser, ParserInput, Token};
use cssx_core::logging::targets;

use crate::media::{MediaFeature, MediaQuery, Orientation};

/// Parse an `@media` prelude into one query per comma-separated
/// alternative.
///
/// Anything that cannot be understood becomes [`MediaFeature::Unknown`], so
/// the affected alternative never matches.
pub fn parse_media_prelude(prelude: &str) -> Vec<MediaQuery> {
    let mut input = ParserInput::new(prelude);
    let mut parser = Parser::new(&mut input);

    parser
        .parse_comma_separated(media_query)
        .unwrap_or_else(|_: CssParseError<'_, ()>| {
            vec![MediaQuery::new(vec![MediaFeature::Unknown(prelude.trim().to_string())])]
        })
}

fn media_query<'i>(parser: &mut Parser<'i, '_>) -> Result<MediaQuery, CssParseError<'i, ()>> {
    let mut features = vec![];

    while let Ok(token) = parser.next().cloned() {
        match token {
            Token::Ident(ident) => match ident.to_ascii_lowercase().as_str() {
                "and" | "only" => {}
                "not" => features.push(MediaFeature::Unknown("not".to_string())),
                media_type => features.push(MediaFeature::MediaType(media_type.to_string())),
            },
            Token::ParenthesisBlock => features.push(parser.parse_nested_block(feature_block)?),
            other => features.push(MediaFeature::Unknown(format!("{:?}", other))),
        }
    }

    if features.is_empty() {
        features.push(MediaFeature::Unknown(String::new()));
    }
    Ok(MediaQuery::new(features))
}

fn feature_block<'i>(parser: &mut Parser<'i, '_>) -> Result<MediaFeature, CssParseError<'i, ()>> {
    let start = parser.position();
    if let Some(feature) = parse_feature(parser) {
        if parser.is_exhausted() {
            return Ok(feature);
        }
    }

    while parser.next().is_ok() {}
    let raw = format!("({})", parser.slice_from(start).trim());
    tracing::debug!(target: targets::MEDIA, feature = %raw, "unsupported media feature");
    Ok(MediaFeature::Unknown(raw))
}

fn parse_feature(parser: &mut Parser<'_, '_>) -> Option<MediaFeature> {
    let name = parser.expect_ident().ok()?.to_ascii_lowercase();
    parser.expect_colon().ok()?;

    let feature = match name.as_str() {
        "min-width" => MediaFeature::MinWidth(parse_length(parser)?),
        "max-width" => MediaFeature::MaxWidth(parse_length(parser)?),
        "min-height" => MediaFeature::MinHeight(parse_length(parser)?),
        "max-height" => MediaFeature::MaxHeight(parse_length(parser)?),
        "orientation" => {
            let value = parser.expect_ident().ok()?.to_ascii_lowercase();
            match value.as_str() {
                "landscape" => MediaFeature::Orientation(Orientation::Landscape),
                "portrait" => MediaFeature::Orientation(Orientation::Portrait),
                _ => return None,
            }
        }
        "aspect-ratio" => MediaFeature::AspectRatio(parse_ratio(parser)?),
        "min-aspect-ratio" => MediaFeature::MinAspectRatio(parse_ratio(parser)?),
        "max-aspect-ratio" => MediaFeature::MaxAspectRatio(parse_ratio(parser)?),
        _ => return None,
    };
    Some(feature)
}

fn parse_length(parser: &mut Parser<'_, '_>) -> Option<f64> {
    match parser.next().ok()? {
        Token::Dimension { value, unit, .. } if unit.eq_ignore_ascii_case("px") => Some(f64::from(*value)),
        Token::Number { value, .. } => Some(f64::from(*value)),
        _ => None,
    }
}

fn parse_number(parser: &mut Parser<'_, '_>) -> Option<f64> {
    match parser.next().ok()? {
        Token::Number { value, .. } => Some(f64::from(*value)),
        _ => None,
    }
}

/// `w/h` or a single number.
fn parse_ratio(parser: &mut Parser<'_, '_>) -> Option<f64> {
    let width = parse_number(parser)?;
    let height = if parser.try_parse(|p| p.expect_delim('/')).is_ok() {
        parse_number(parser)?
    } else {
        1.0
    };
    (height != 0.0).then(|| width / height)
}
