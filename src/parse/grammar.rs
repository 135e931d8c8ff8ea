use winnow::combinator::{alt, cut_err, delimited, opt, preceded, repeat, separated};
use winnow::error::{ErrMode, ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{any, take_till, take_while};

use crate::types::{Expr, Literal};

// -- Whitespace -------------------------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_ascii_whitespace())
        .void()
        .parse_next(input)
}

// -- Identifiers ------------------------------------------------------------

fn ident<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        take_while(1.., |c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .take()
        .parse_next(input)
}

// -- Literals ---------------------------------------------------------------

// Double-quoted string. Plain text is consumed in chunks up to the next
// quote or backslash; \", \\, \n and \t decode, any other escape keeps its
// backslash.
fn string_literal(input: &mut &str) -> ModalResult<String> {
    let mut text = String::new();
    '"'.parse_next(input)?;
    loop {
        text.push_str(take_till(0.., ['"', '\\']).parse_next(input)?);
        if any.parse_next(input)? == '"' {
            return Ok(text);
        }
        match any.parse_next(input)? {
            'n' => text.push('\n'),
            't' => text.push('\t'),
            quoted @ ('"' | '\\') => text.push(quoted),
            unknown => {
                text.push('\\');
                text.push(unknown);
            }
        }
    }
}

fn number(input: &mut &str) -> ModalResult<Literal> {
    let text = (
        opt('-'),
        take_while(1.., |c: char| c.is_ascii_digit()),
        opt(('.', take_while(1.., |c: char| c.is_ascii_digit()))),
    )
        .take()
        .parse_next(input)?;
    if text.contains('.') {
        match text.parse::<f64>() {
            Ok(f) => Ok(Literal::Float(f)),
            Err(_) => Err(ErrMode::from_input(input).cut()),
        }
    } else {
        match text.parse::<i64>() {
            Ok(i) => Ok(Literal::Int(i)),
            Err(_) => Err(ErrMode::from_input(input).cut()),
        }
    }
}

fn literal(input: &mut &str) -> ModalResult<Literal> {
    alt((string_literal.map(Literal::Str), number))
        .context(StrContext::Expected(StrContextValue::Description("literal")))
        .parse_next(input)
}

// -- Expressions (precedence: "||" < "&&" < "==" < primary) -----------------

fn primary(input: &mut &str) -> ModalResult<Expr> {
    ws.parse_next(input)?;
    alt((
        delimited('(', expr, (ws, cut_err(')'))),
        literal.map(Expr::Literal),
        call_or_ident,
    ))
    .context(StrContext::Expected(StrContextValue::Description(
        "expression",
    )))
    .parse_next(input)
}

fn call_or_ident(input: &mut &str) -> ModalResult<Expr> {
    let name = ident.parse_next(input)?;
    let checkpoint = input.checkpoint();
    ws.parse_next(input)?;
    if opt('(').parse_next(input)?.is_some() {
        let args: Vec<Expr> = separated(0.., expr, (ws, ',')).parse_next(input)?;
        ws.parse_next(input)?;
        cut_err(')')
            .context(StrContext::Expected(StrContextValue::CharLiteral(')')))
            .parse_next(input)?;
        Ok(Expr::Call {
            name: name.to_owned(),
            args,
        })
    } else {
        input.reset(&checkpoint);
        Ok(Expr::Ident(name.to_owned()))
    }
}

fn cmp(input: &mut &str) -> ModalResult<Expr> {
    let first = primary(input)?;
    let checkpoint = input.checkpoint();
    ws.parse_next(input)?;
    if opt("==").parse_next(input)?.is_some() {
        let second = cut_err(primary).parse_next(input)?;
        Ok(Expr::Eq(Box::new(first), Box::new(second)))
    } else {
        input.reset(&checkpoint);
        Ok(first)
    }
}

fn and_expr(input: &mut &str) -> ModalResult<Expr> {
    let first = cmp(input)?;
    let rest: Vec<Expr> = repeat(0.., preceded((ws, "&&"), cut_err(cmp))).parse_next(input)?;
    Ok(rest
        .into_iter()
        .fold(first, |acc, r| Expr::And(Box::new(acc), Box::new(r))))
}

fn or_expr(input: &mut &str) -> ModalResult<Expr> {
    let first = and_expr(input)?;
    let rest: Vec<Expr> = repeat(0.., preceded((ws, "||"), cut_err(and_expr))).parse_next(input)?;
    Ok(rest
        .into_iter()
        .fold(first, |acc, r| Expr::Or(Box::new(acc), Box::new(r))))
}

fn expr(input: &mut &str) -> ModalResult<Expr> {
    ws.parse_next(input)?;
    or_expr(input)
}

// -- Top-level parser -------------------------------------------------------

pub fn rule(input: &mut &str) -> ModalResult<Expr> {
    let e = expr(input)?;
    ws.parse_next(input)?;
    Ok(e)
}

#[cfg(test)]
mod tests {
    use crate::parse::parse;

    use super::*;

    #[test]
    fn parse_bare_identifier() {
        assert_eq!(parse("zero").unwrap(), Expr::Ident("zero".to_owned()));
    }

    #[test]
    fn parse_zero_arg_call() {
        assert_eq!(
            parse("zero()").unwrap(),
            Expr::Call {
                name: "zero".to_owned(),
                args: vec![],
            }
        );
    }

    #[test]
    fn parse_call_with_literals() {
        assert_eq!(
            parse("ranger(1, 10)").unwrap(),
            Expr::Call {
                name: "ranger".to_owned(),
                args: vec![
                    Expr::Literal(Literal::Int(1)),
                    Expr::Literal(Literal::Int(10)),
                ],
            }
        );
    }

    #[test]
    fn parse_negative_and_float_literals() {
        let result = parse("ranger(-1, 1.5)").unwrap();
        match result {
            Expr::Call { args, .. } => {
                assert_eq!(args[0], Expr::Literal(Literal::Int(-1)));
                assert_eq!(args[1], Expr::Literal(Literal::Float(1.5)));
            }
            other => panic!("expected Call, got {other:?}"),
        }
    }

    #[test]
    fn parse_string_literal_arg() {
        assert_eq!(
            parse(r#"regexp("[a-z]+")"#).unwrap(),
            Expr::Call {
                name: "regexp".to_owned(),
                args: vec![Expr::Literal(Literal::Str("[a-z]+".to_owned()))],
            }
        );
    }

    #[test]
    fn parse_string_escapes() {
        let result = parse(r#"oneof("a\"b\\c", "d\ne")"#).unwrap();
        match result {
            Expr::Call { args, .. } => {
                assert_eq!(args[0], Expr::Literal(Literal::Str("a\"b\\c".to_owned())));
                assert_eq!(args[1], Expr::Literal(Literal::Str("d\ne".to_owned())));
            }
            other => panic!("expected Call, got {other:?}"),
        }
    }

    #[test]
    fn parse_and_expression() {
        let result = parse("min(1) && max(10)").unwrap();
        assert!(matches!(result, Expr::And(_, _)));
    }

    #[test]
    fn parse_or_expression() {
        let result = parse("zero || notzero").unwrap();
        assert!(matches!(result, Expr::Or(_, _)));
    }

    #[test]
    fn parse_precedence_and_before_or() {
        let result = parse("a || b && c").unwrap();
        match result {
            Expr::Or(left, right) => {
                assert!(matches!(left.as_ref(), Expr::Ident(n) if n == "a"));
                assert!(matches!(right.as_ref(), Expr::And(_, _)));
            }
            other => panic!("expected Or, got {other:?}"),
        }
    }

    #[test]
    fn parse_eq_binds_tighter_than_and() {
        let result = parse("min == 3 && max == 10").unwrap();
        match result {
            Expr::And(left, right) => {
                assert!(matches!(left.as_ref(), Expr::Eq(_, _)));
                assert!(matches!(right.as_ref(), Expr::Eq(_, _)));
            }
            other => panic!("expected And, got {other:?}"),
        }
    }

    #[test]
    fn parse_eq_both_orders() {
        let a = parse("min == 3").unwrap();
        let b = parse("3 == min").unwrap();
        match (a, b) {
            (Expr::Eq(al, ar), Expr::Eq(bl, br)) => {
                assert!(matches!(al.as_ref(), Expr::Ident(n) if n == "min"));
                assert!(matches!(ar.as_ref(), Expr::Literal(Literal::Int(3))));
                assert!(matches!(bl.as_ref(), Expr::Literal(Literal::Int(3))));
                assert!(matches!(br.as_ref(), Expr::Ident(n) if n == "min"));
            }
            other => panic!("expected two Eq nodes, got {other:?}"),
        }
    }

    #[test]
    fn parse_parenthesized_grouping() {
        let result = parse("(a || b) && c").unwrap();
        match result {
            Expr::And(left, right) => {
                assert!(matches!(left.as_ref(), Expr::Or(_, _)));
                assert!(matches!(right.as_ref(), Expr::Ident(n) if n == "c"));
            }
            other => panic!("expected And, got {other:?}"),
        }
    }

    #[test]
    fn parse_nested_call_args() {
        let result = parse("array(min(1), max(10))").unwrap();
        match result {
            Expr::Call { name, args } => {
                assert_eq!(name, "array");
                assert_eq!(args.len(), 2);
                assert!(matches!(&args[0], Expr::Call { name, .. } if name == "min"));
            }
            other => panic!("expected Call, got {other:?}"),
        }
    }

    #[test]
    fn parse_sub_expression_arg() {
        let result = parse("mapv(min == 10 && max == 100)").unwrap();
        match result {
            Expr::Call { name, args } => {
                assert_eq!(name, "mapv");
                assert_eq!(args.len(), 1);
                assert!(matches!(&args[0], Expr::And(_, _)));
            }
            other => panic!("expected Call, got {other:?}"),
        }
    }

    #[test]
    fn parse_whitespace_insignificant() {
        assert_eq!(
            parse("  zero||(min==3&&max==10)  ").unwrap(),
            parse("zero || ( min == 3 && max == 10 )").unwrap()
        );
    }

    #[test]
    fn parse_rejects_trailing_garbage() {
        assert!(parse("zero )").is_err());
        assert!(parse("min(1) extra").is_err());
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(parse("min(").is_err());
        assert!(parse("&& zero").is_err());
        assert!(parse("min(1,)").is_err());
        assert!(parse(r#"regexp("unterminated"#).is_err());
    }
}
