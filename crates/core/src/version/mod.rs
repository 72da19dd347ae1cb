//! Maven-style version ordering.
//!
//! Versions split into numeric and qualifier tokens on `.`, `-` and
//! digit/letter boundaries. Numeric tokens compare numerically and rank
//! above any qualifier; qualifiers compare through a fixed precedence table
//! (`alpha < beta < milestone < rc < SNAPSHOT < release < sp`), with unknown
//! qualifiers last, lexicographically. Remaining ties fall back to the raw
//! string so the order is total and stable.

use std::cmp::Ordering;
use std::fmt;

mod resolver;

pub use resolver::{MAVEN_METADATA, VersionResolver};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    raw: String,
    tokens: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Number(u64),
    Qualifier(String),
}

impl Version {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let tokens = tokenize(&raw);
        Self { raw, tokens }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn into_raw(self) -> String {
        self.raw
    }

    pub fn is_snapshot(&self) -> bool {
        self.tokens
            .iter()
            .any(|t| matches!(t, Token::Qualifier(q) if q == "snapshot"))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.tokens.len().max(other.tokens.len());
        for i in 0..len {
            let ord = cmp_tokens(self.tokens.get(i), other.tokens.get(i));
            if ord != Ordering::Equal {
                return ord;
            }
        }
        self.raw.cmp(&other.raw)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// An exhausted side pads as zero against a number and as the unqualified
/// release against a qualifier, so `1.0 == 1.0.0` and `2.0-SNAPSHOT < 2.0`.
fn cmp_tokens(a: Option<&Token>, b: Option<&Token>) -> Ordering {
    use Token::*;
    match (a, b) {
        (None, None) => Ordering::Equal,
        (Some(Number(n)), Some(Number(m))) => n.cmp(m),
        (Some(Number(n)), None) => n.cmp(&0),
        (None, Some(Number(n))) => 0.cmp(n),
        (Some(Number(_)), Some(Qualifier(_))) => Ordering::Greater,
        (Some(Qualifier(_)), Some(Number(_))) => Ordering::Less,
        (Some(Qualifier(q)), Some(Qualifier(r))) => cmp_qualifiers(q, r),
        (Some(Qualifier(q)), None) => cmp_qualifiers(q, ""),
        (None, Some(Qualifier(q))) => cmp_qualifiers("", q),
    }
}

fn cmp_qualifiers(a: &str, b: &str) -> Ordering {
    let (rank_a, rank_b) = (qualifier_rank(a), qualifier_rank(b));
    rank_a.cmp(&rank_b).then_with(|| {
        if rank_a == UNKNOWN_RANK {
            a.cmp(b)
        } else {
            Ordering::Equal
        }
    })
}

const UNKNOWN_RANK: u8 = 7;

fn qualifier_rank(qualifier: &str) -> u8 {
    match qualifier {
        "alpha" | "a" => 0,
        "beta" | "b" => 1,
        "milestone" | "m" => 2,
        "rc" | "cr" => 3,
        "snapshot" => 4,
        "" | "final" | "ga" | "release" => 5,
        "sp" => 6,
        _ => UNKNOWN_RANK,
    }
}

fn tokenize(raw: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut current_is_digit = None;

    let flush = |buf: &mut String, is_digit: Option<bool>, tokens: &mut Vec<Token>| {
        if buf.is_empty() {
            return;
        }
        let token = match is_digit {
            Some(true) => buf
                .parse::<u64>()
                .map(Token::Number)
                .unwrap_or_else(|_| Token::Qualifier(std::mem::take(buf))),
            _ => Token::Qualifier(std::mem::take(buf)),
        };
        buf.clear();
        tokens.push(token);
    };

    for ch in raw.chars() {
        if ch == '.' || ch == '-' {
            flush(&mut current, current_is_digit, &mut tokens);
            current_is_digit = None;
            continue;
        }
        let is_digit = ch.is_ascii_digit();
        if current_is_digit.is_some_and(|d| d != is_digit) {
            flush(&mut current, current_is_digit, &mut tokens);
        }
        current_is_digit = Some(is_digit);
        current.push(ch.to_ascii_lowercase());
    }
    flush(&mut current, current_is_digit, &mut tokens);

    tokens
}
