//! Compiled selector keys.
//!
//! The stylesheet compiler emits one key per rule: a compound of classes,
//! optionally scoped to a part. A bare leading identifier is a class too,
//! so `root.active` and `.root.active` are the same selector.

use cssparser::{ParseError as CssParseError, Parser, ParserInput, Token};

use crate::selector::ClassSelector;
use crate::{Error, Result};

/// Parse a selector key such as `.root.active` or `root::part(header)`.
pub fn parse_selector(text: &str) -> Result<ClassSelector> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    parse_selector_tokens(&mut parser).map_err(|message| Error::invalid_selector(text, message))
}

fn parse_selector_tokens(parser: &mut Parser<'_, '_>) -> std::result::Result<ClassSelector, String> {
    let mut classes = vec![];
    let mut part: Option<String> = None;
    let mut expect_class = false;
    let mut first = true;

    parser.skip_whitespace();

    loop {
        let token = match parser.next_including_whitespace() {
            Ok(t) => t.clone(),
            Err(_) => break,
        };

        match token {
            Token::Ident(name) if expect_class || first => {
                classes.push(name.to_string());
                expect_class = false;
            }
            Token::Delim('.') if !expect_class && part.is_none() => expect_class = true,
            Token::Colon if !expect_class && part.is_none() && !classes.is_empty() => {
                part = Some(parse_part(parser)?);
            }
            Token::WhiteSpace(_) => {
                parser.skip_whitespace();
                if !parser.is_exhausted() {
                    return Err("combinators are not supported".to_string());
                }
            }
            other => return Err(format!("unexpected token {:?}", other)),
        }
        first = false;
    }

    if expect_class {
        return Err("expected a class name after '.'".to_string());
    }
    if classes.is_empty() {
        return Err("selector has no class".to_string());
    }

    Ok(ClassSelector::new(classes).with_part(part.unwrap_or_default()))
}

/// Parse the rest of `::part(name)` after the first colon.
fn parse_part(parser: &mut Parser<'_, '_>) -> std::result::Result<String, String> {
    let expected = || "expected '::part(<name>)'".to_string();

    match parser.next_including_whitespace() {
        Ok(Token::Colon) => {}
        _ => return Err(expected()),
    }
    match parser.next_including_whitespace() {
        Ok(Token::Function(name)) if name.eq_ignore_ascii_case("part") => {}
        _ => return Err(expected()),
    }

    parser
        .parse_nested_block(|block| {
            let name = block.expect_ident_cloned()?;
            block.expect_exhausted()?;
            Ok(name.to_string())
        })
        .map_err(|e: CssParseError<'_, ()>| format!("invalid part name: {:?}", e.kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_and_dotted_classes() {
        assert_eq!(parse_selector("root").unwrap(), ClassSelector::class("root"));
        assert_eq!(
            parse_selector(".root.active").unwrap(),
            ClassSelector::new(["root", "active"])
        );
        assert_eq!(
            parse_selector("root.active").unwrap(),
            ClassSelector::new(["active", "root"])
        );
        assert_eq!(parse_selector("  card-1 ").unwrap(), ClassSelector::class("card-1"));
    }

    #[test]
    fn part_selectors() {
        let selector = parse_selector("root::part(header)").unwrap();
        assert_eq!(selector.part(), "header");
        assert_eq!(selector.classes(), ["root".to_string()]);

        let selector = parse_selector(".root.active::part( title )").unwrap();
        assert_eq!(selector.part(), "title");
        assert_eq!(selector.classes().len(), 2);
    }

    #[test]
    fn invalid_selectors() {
        for bad in [
            "",
            ".",
            "root active",
            "root > child",
            "#id",
            "root::part()",
            "root::before",
            "root::part(a).b",
            "::part(header)",
        ] {
            let err = parse_selector(bad).unwrap_err();
            assert!(
                matches!(err, Error::InvalidSelector { .. }),
                "expected selector error for {:?}",
                bad
            );
        }
    }
}
