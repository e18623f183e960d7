use nom::{
    branch::alt,
    bytes::complete::{tag, take_till, take_while},
    character::complete::{alphanumeric1, char, digit0, one_of},
    combinator::{all_consuming, map, map_opt, map_res, opt, recognize, value},
    sequence::{delimited, pair, preceded, terminated},
    IResult,
};

use crate::typ::{Color, Command};

pub type Span<'a> = nom_locate::LocatedSpan<&'a str>;

// Any Unicode whitespace, to agree with `str::trim`.
fn space0(input: Span) -> IResult<Span, Span> {
    take_while(char::is_whitespace)(input)
}

fn ws<'a, F: 'a, O>(inner: F) -> impl FnMut(Span<'a>) -> IResult<Span<'a>, O>
where
    F: FnMut(Span<'a>) -> IResult<Span<'a>, O>,
{
    delimited(space0, inner, space0)
}

/// A keyword followed by exactly one space and an argument.
fn keyword<'a, F: 'a, O>(
    name: &'static str,
    arg: F,
) -> impl FnMut(Span<'a>) -> IResult<Span<'a>, O>
where
    F: FnMut(Span<'a>) -> IResult<Span<'a>, O>,
{
    preceded(pair(tag(name), char(' ')), arg)
}

fn digits(input: Span) -> IResult<Span, Span> {
    recognize(pair(one_of("123456789"), digit0))(input)
}

/// A strictly positive integer without leading zeros.
pub fn count(input: Span) -> IResult<Span, u32> {
    map_res(digits, |s: Span| s.fragment().parse::<u32>())(input)
}

/// A non-zero integer without leading zeros, possibly negative.
pub fn degrees(input: Span) -> IResult<Span, i32> {
    map_res(recognize(pair(opt(char('-')), digits)), |s: Span| {
        s.fragment().parse::<i32>()
    })(input)
}

pub fn color(input: Span) -> IResult<Span, Color> {
    map_opt(alphanumeric1, |s: Span| Color::try_from(*s.fragment()).ok())(input)
}

pub fn command(input: Span) -> IResult<Span, Command> {
    alt((
        map(keyword("forward", count), Command::Forward),
        map(keyword("backward", count), Command::Backward),
        map(keyword("left", degrees), Command::Left),
        map(keyword("right", degrees), Command::Right),
        map(keyword("loop", count), Command::Loop),
        value(Command::LoopEnd, tag("loopend")),
        value(Command::Draw, tag("draw")),
        value(Command::NoDraw, tag("nodraw")),
        map(keyword("color", color), Command::Color),
        map(keyword("bgcolor", color), Command::BgColor),
    ))(input)
}

/// Classifies one line of a script.
///
/// A blank line classifies as `None`. Anything that isn't exactly one command (give or take
/// surrounding whitespace) is an error.
pub fn statement(input: Span) -> IResult<Span, Option<Command>> {
    all_consuming(ws(opt(command)))(input)
}

fn line(input: Span) -> IResult<Span, Span> {
    terminated(take_till(|c: char| c == '\n'), opt(char('\n')))(input)
}

/// Splits a script into its lines. Each line remembers where it came from.
pub fn script(input: &str) -> Vec<Span<'_>> {
    let mut rest = Span::new(input);
    let mut lines = Vec::new();
    while !rest.fragment().is_empty() {
        let Ok((remaining, l)) = line(rest) else {
            break;
        };
        lines.push(l);
        rest = remaining;
    }
    lines
}
