//! Parser for the plain-text character table format.
//!
//! The format is a fixed sequence of lines of whitespace separated integers:
//!  1. `classes size`
//!  2. the `classes` centralizer sizes
//!  3. the `classes` class sizes
//!  4. `classes` lines of `classes` integers, the rows of the character table.
//!
//! Anything after the last row is ignored.

use nom::{
    character::complete::{i64 as integer, space0, space1},
    combinator::all_consuming,
    error::VerboseError,
    multi::separated_list0,
    sequence::delimited,
    Finish, IResult as IResultBase,
};

use crate::{Result, RingError};

type IResult<I, O> = IResultBase<I, O, VerboseError<I>>;

pub(crate) struct RawTable {
    pub size: i64,
    pub centralizer_sizes: Vec<i64>,
    pub class_sizes: Vec<i64>,
    pub rows: Vec<Vec<i64>>,
}

fn integers(i: &str) -> IResult<&str, Vec<i64>> {
    delimited(space0, separated_list0(space1, integer), space0)(i)
}

fn malformed(line: usize, reason: impl Into<String>) -> RingError {
    RingError::MalformedTable {
        line,
        reason: reason.into(),
    }
}

struct Lines<'a> {
    inner: std::iter::Enumerate<std::str::Lines<'a>>,
    last: usize,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.lines().enumerate(),
            last: 0,
        }
    }

    /// Parses the next line, which must consist of exactly `len` integers if `len` is given.
    fn next_integers(&mut self, what: &str, len: Option<usize>) -> Result<Vec<i64>> {
        let (idx, line) = self
            .inner
            .next()
            .ok_or_else(|| malformed(self.last + 1, format!("missing {what}")))?;
        let line_no = idx + 1;
        self.last = line_no;

        let (_, values) = all_consuming(integers)(line)
            .finish()
            .map_err(|_| malformed(line_no, format!("expected integers for {what}, found {line:?}")))?;

        match len {
            Some(len) if values.len() != len => Err(malformed(
                line_no,
                format!("expected {len} entries for {what}, found {}", values.len()),
            )),
            _ => Ok(values),
        }
    }
}

pub(crate) fn parse_table(text: &str) -> Result<RawTable> {
    let mut lines = Lines::new(text);

    let header = lines.next_integers("header `classes size`", Some(2))?;
    let (classes, size) = (header[0], header[1]);
    if classes <= 0 {
        return Err(malformed(1, format!("number of classes must be positive, got {classes}")));
    }
    if size <= 0 {
        return Err(malformed(1, format!("group order must be positive, got {size}")));
    }
    let classes = usize::try_from(classes).map_err(|_| malformed(1, "too many classes"))?;

    let centralizer_sizes = lines.next_integers("centralizer sizes", Some(classes))?;
    let class_sizes = lines.next_integers("class sizes", Some(classes))?;
    let rows = (0..classes)
        .map(|i| lines.next_integers(&format!("row {i} of the character table"), Some(classes)))
        .collect::<Result<Vec<_>>>()?;

    Ok(RawTable {
        size,
        centralizer_sizes,
        class_sizes,
        rows,
    })
}
