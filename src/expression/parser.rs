//! Parser for catalog-free arithmetic expressions
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! comparison := additive ( "==" additive )?
//! additive   := term ( ("+" | "-") term )*
//! term       := power ( ("*" | "/") power )*
//! power      := unary ( "^" power )?
//! unary      := "-" unary | primary
//! primary    := call | identifier | number | "(" comparison ")"
//! ```

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, multispace0},
    combinator::{opt, recognize},
    multi::{many0, separated_list0},
    number::complete::double,
    sequence::{delimited, pair, preceded},
    IResult, Parser,
};

use super::{BinaryOp, ExprResult, Expression, ExpressionError, UnaryOp};

type Error<'a> = nom::error::Error<&'a str>;

pub(super) fn parse(input: &str) -> ExprResult<Expression> {
    match comparison(input) {
        Ok((remainder, expr)) if remainder.trim().is_empty() => Ok(expr),
        Ok((remainder, _)) => Err(ExpressionError::ParseError {
            message: format!("Unexpected trailing characters: '{}'", remainder),
        }),
        Err(e) => Err(ExpressionError::ParseError {
            message: format!("{:?}", e),
        }),
    }
}

/// Surround a parser with optional whitespace
fn ws<'a, O, P>(inner: P) -> impl Parser<&'a str, Output = O, Error = Error<'a>>
where
    P: Parser<&'a str, Output = O, Error = Error<'a>>,
{
    delimited(multispace0, inner, multispace0)
}

fn binary(op: BinaryOp, left: Expression, right: Expression) -> Expression {
    Expression::Binary(op, Box::new(left), Box::new(right))
}

fn comparison(input: &str) -> IResult<&str, Expression> {
    let (input, left) = additive(input)?;
    let (input, right) = opt(preceded(ws(tag("==")), additive)).parse(input)?;
    Ok(match right {
        Some(right) => (input, binary(BinaryOp::Equal, left, right)),
        None => (input, left),
    })
}

fn additive(input: &str) -> IResult<&str, Expression> {
    let (input, first) = term(input)?;
    let (input, rest) = many0(pair(ws(alt((char('+'), char('-')))), term)).parse(input)?;
    let expr = rest.into_iter().fold(first, |acc, (op, rhs)| match op {
        '+' => binary(BinaryOp::Add, acc, rhs),
        _ => binary(BinaryOp::Sub, acc, rhs),
    });
    Ok((input, expr))
}

fn term(input: &str) -> IResult<&str, Expression> {
    let (input, first) = power(input)?;
    let (input, rest) = many0(pair(ws(alt((char('*'), char('/')))), power)).parse(input)?;
    let expr = rest.into_iter().fold(first, |acc, (op, rhs)| match op {
        '*' => binary(BinaryOp::Mul, acc, rhs),
        _ => binary(BinaryOp::Div, acc, rhs),
    });
    Ok((input, expr))
}

/// Exponentiation is right-associative
fn power(input: &str) -> IResult<&str, Expression> {
    let (input, base) = unary(input)?;
    let (input, exponent) = opt(preceded(ws(char('^')), power)).parse(input)?;
    Ok(match exponent {
        Some(exponent) => (input, binary(BinaryOp::Pow, base, exponent)),
        None => (input, base),
    })
}

fn unary(input: &str) -> IResult<&str, Expression> {
    let (input, _) = multispace0(input)?;
    if let Ok((input, expr)) = preceded(char('-'), unary).parse(input) {
        return Ok((input, Expression::Unary(UnaryOp::Neg, Box::new(expr))));
    }
    primary(input)
}

fn primary(input: &str) -> IResult<&str, Expression> {
    ws(alt((call, variable, number, parens))).parse(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))
    .parse(input)
}

fn call(input: &str) -> IResult<&str, Expression> {
    let (input, name) = identifier(input)?;
    let (input, args) = delimited(
        ws(char('(')),
        separated_list0(ws(char(',')), comparison),
        ws(char(')')),
    )
    .parse(input)?;
    Ok((input, Expression::Function(name.to_string(), args)))
}

fn variable(input: &str) -> IResult<&str, Expression> {
    let (input, name) = identifier(input)?;
    Ok((input, Expression::Variable(name.to_string())))
}

fn number(input: &str) -> IResult<&str, Expression> {
    let (input, value) = double(input)?;
    Ok((input, Expression::Number(value)))
}

fn parens(input: &str) -> IResult<&str, Expression> {
    delimited(char('('), comparison, ws(char(')'))).parse(input)
}
