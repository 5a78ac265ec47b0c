//! This crate teaches [`clap`] to accept negative numbers as option and
//! positional values.  Argument parsers classify a token starting with `-`
//! as an option before they ever look at what the option binds to, so a
//! perfectly reasonable command line like `accumulate 1 -2 3` dies with an
//! "unexpected argument" error.  This crate works around that without
//! touching the parsing engine itself.
//!
//! The goal of this crate is that it stays a thin, predictable layer: it
//! never defines its own argument grammar and it never second-guesses the
//! parser.  It rewrites tokens, hands them over, and undoes the rewrite
//! when the parser asks for the value.
//!
//! # Example
//!
//! Parsing happens through the [`NegativeCommand`] wrapper:
//!
//! ```
//! use clap::{Arg, Command};
//! use negarg_parser::{neg_int, NegativeCommand};
//!
//! let matches = NegativeCommand::new(
//!     Command::new("accumulate")
//!         .arg(Arg::new("integers").num_args(1..).value_parser(neg_int)),
//! )
//! .get_matches_from(["accumulate", "1", "-2", "3"]);
//!
//! let integers: Vec<i64> = matches.get_many::<i64>("integers").unwrap().copied().collect();
//! assert_eq!(integers, [1, -2, 3]);
//! ```
//!
//! Here is what's happening:
//!
//! * [`NegativeCommand::new`] wraps an ordinary [`clap::Command`].  The
//!   wrapper holds the command by composition and intercepts only the
//!   matching entry points; everything else about the command (help,
//!   subcommands, exit behavior) is untouched `clap`.
//! * Before the tokens reach `clap`, every token shaped like a negative
//!   number (`-` followed by a digit) has its leading minus sign replaced
//!   by the [`SENTINEL`] marker.  `clap`'s tokenizer then sees an ordinary
//!   value instead of an option.
//! * [`neg_int`] is registered as the value parser for the argument.  When
//!   `clap` converts the token, the parser strips one leading sentinel
//!   occurrence back to a minus sign and parses the result as an integer.
//!   [`neg_float`] and [`neg_string`] do the same for floats and strings.
//!
//! The rewrite is opt-in per argument: only arguments registered with one
//! of the `neg_*` value parsers (or a custom parser built on
//! [`strip_sentinel`]) get the minus sign back.  An argument parsed with a
//! plain `String` parser will observe the raw sentinel-marked token.
//!
//! # The sentinel contract
//!
//! [`SENTINEL`] is a reserved namespace.  Any caller-supplied argument
//! value that happens to begin with the literal text `__minussign__` will
//! be misinterpreted by the coercion step.  This is a documented contract,
//! not something the crate validates; pick a different marker with
//! [`mark_negative_args_with`] if your inputs can collide.
//!
//! Rewriting happens before the token list reaches the parser, which means
//! it also happens before `--` end-of-options handling.  `["--", "-1"]`
//! binds a `neg_string` positional to the literal `-1`.
//!
//! # Escaping instead of sentinels
//!
//! For callers that control both ends of the round trip there is the
//! generalized [`Escaper`]: an ordered list of regex substitution rules per
//! direction, with the guarantee that `unescape(escape(s)) == s` whenever
//! the two rule sets are true inverses.  [`negative_number_escaper`] is a
//! preset instance that hides a leading minus-digit construct behind a
//! backslash and escalates pre-existing backslash runs so already-escaped
//! input survives:
//!
//! ```
//! let escaper = negarg_parser::negative_number_escaper();
//! assert_eq!(escaper.escape("-2"), r"\-2");
//! assert_eq!(escaper.escape(r"\-1"), r"\\-1");
//! assert_eq!(escaper.unescape(r"\-2"), "-2");
//! ```
//!
//! The sentinel scheme is what drives parser integration, because its
//! escaped form survives `clap`'s tokenization and the per-argument value
//! parsers can undo it without seeing the rest of the command line.  The
//! escaper is the right tool when you serialize argument-like text through
//! a channel of your own.
use std::borrow::Cow;
use std::convert::Infallible;
use std::ffi::OsString;
use std::num::{ParseFloatError, ParseIntError};
use std::sync::OnceLock;

use clap::{ArgMatches, Command};
use regex::Regex;
use tracing::trace;

/// The marker substituted for the leading minus sign of a negative number.
///
/// This is a reserved namespace: argument values that naturally begin with
/// this text will be mangled by the coercion wrappers.  See the crate
/// documentation for the full contract.
pub const SENTINEL: &str = "__minussign__";

/// Full-string shape of a token that must be hidden from option parsing:
/// a minus sign, a digit, then anything (not crossing newlines).
fn negative_number_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\A-\d.*\z").unwrap())
}

/// Rewrites negative-number shaped tokens in place using [`SENTINEL`].
///
/// A token consisting of a minus sign immediately followed by a digit has
/// the minus sign replaced by the marker.  Everything else passes through
/// untouched: a lone `-`, short options like `-x` or `-O3`, and tokens
/// with embedded minus signs.  Tokens that already begin with the marker
/// text are marked again without further ado; that collision is part of
/// the sentinel contract.
///
/// This must run before the token sequence reaches the parser, because
/// the option-versus-value decision is made during tokenization.
/// [`NegativeCommand`] does this for you.
///
/// ```
/// let mut args = vec!["-o".to_string(), "-2".to_string()];
/// negarg_parser::mark_negative_args(&mut args);
/// assert_eq!(args, ["-o", "__minussign__2"]);
/// ```
pub fn mark_negative_args(args: &mut [String]) {
    mark_negative_args_with(args, SENTINEL)
}

/// Rewrites negative-number shaped tokens in place with a custom marker.
///
/// This behaves like [`mark_negative_args`] but lets the caller pick the
/// marker text.  The caller is responsible for undoing the substitution;
/// the `neg_*` value parsers only know about [`SENTINEL`].
pub fn mark_negative_args_with(args: &mut [String], sentinel: &str) {
    for arg in args.iter_mut() {
        if let Some(marked) = mark_token(arg, sentinel) {
            *arg = marked;
        }
    }
}

fn mark_token(token: &str, sentinel: &str) -> Option<String> {
    if !negative_number_pattern().is_match(token) {
        return None;
    }
    trace!("hiding negative number token {:?} behind {:?}", token, sentinel);
    Some(format!("{}{}", sentinel, &token[1..]))
}

/// Strips one leading [`SENTINEL`] occurrence back to a minus sign.
///
/// At most one occurrence is removed; a token without the marker is
/// returned borrowed and unchanged.  The `neg_*` parsers are built on this
/// and it's public so you can register sentinel-aware parsers for your own
/// value types:
///
/// ```
/// use negarg_parser::strip_sentinel;
///
/// fn neg_i32(value: &str) -> Result<i32, std::num::ParseIntError> {
///     strip_sentinel(value).parse()
/// }
///
/// assert_eq!(neg_i32("__minussign__7"), Ok(-7));
/// ```
pub fn strip_sentinel(value: &str) -> Cow<'_, str> {
    match value.strip_prefix(SENTINEL) {
        Some(rest) => Cow::Owned(format!("-{}", rest)),
        None => Cow::Borrowed(value),
    }
}

/// Sentinel-aware integer value parser.
///
/// Strips one leading sentinel occurrence and parses the rest as `i64`
/// with the standard library's normal failure behavior.  Register it per
/// argument with [`clap::Arg::value_parser`].
pub fn neg_int(value: &str) -> Result<i64, ParseIntError> {
    strip_sentinel(value).parse()
}

/// Sentinel-aware floating point value parser.
///
/// The counterpart of [`neg_int`] for `f64` values, including scientific
/// notation like `-1.34e-1`.
pub fn neg_float(value: &str) -> Result<f64, ParseFloatError> {
    strip_sentinel(value).parse()
}

/// Sentinel-aware string value parser.
///
/// Undoes the sentinel substitution and returns the text otherwise
/// unchanged.  This never fails.
pub fn neg_string(value: &str) -> Result<String, Infallible> {
    Ok(strip_sentinel(value).into_owned())
}

/// Error returned when an [`Escaper`] is configured with a pattern that
/// does not compile.
#[derive(Debug, thiserror::Error)]
pub enum EscaperError {
    /// One of the configured rule patterns is not a valid regex.
    #[error("invalid escape rule pattern {pattern:?}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Clone)]
struct Rule {
    pattern: Regex,
    replacement: String,
}

/// A reversible, rule-based text substitution engine.
///
/// An escaper owns an ordered list of `(pattern, replacement)` rules for
/// each direction.  [`escape`](Self::escape) applies every escaping rule
/// in order, each as a global substitution over the entire current string,
/// so later rules operate on the output of earlier ones.
/// [`unescape`](Self::unescape) chains the unescaping rules the same way.
///
/// The central property is the round-trip law: for every input,
/// `unescape(escape(s)) == s`.  The escaper cannot check that the two rule
/// sets are actually inverses of each other; a configuration that is not
/// violates the law silently.  Picking inverse rule sets is the caller's
/// obligation.  The one failure this type does detect is a pattern that
/// fails to compile.
///
/// ```
/// use negarg_parser::Escaper;
///
/// let escaper = Escaper::new([("&", "&amp;"), ("<", "&lt;")], [("&lt;", "<"), ("&amp;", "&")])?;
/// assert_eq!(escaper.escape("a < b"), "a &lt; b");
/// assert_eq!(escaper.unescape("a &lt; b"), "a < b");
/// # Ok::<(), negarg_parser::EscaperError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Escaper {
    escape_rules: Vec<Rule>,
    unescape_rules: Vec<Rule>,
}

impl Escaper {
    /// Creates an escaper from one rule list per direction.
    ///
    /// Patterns use standard regex syntax and are compiled eagerly;
    /// replacements may reference capture groups (`$1`).  Rule order is
    /// significant in both lists.
    pub fn new<I, J, S>(escape_rules: I, unescape_rules: J) -> Result<Escaper, EscaperError>
    where
        I: IntoIterator<Item = (S, S)>,
        J: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        Ok(Escaper {
            escape_rules: compile_rules(escape_rules)?,
            unescape_rules: compile_rules(unescape_rules)?,
        })
    }

    /// Applies every escaping rule in order and returns the result.
    pub fn escape(&self, text: &str) -> String {
        apply_rules(&self.escape_rules, text)
    }

    /// Applies every unescaping rule in order and returns the result.
    pub fn unescape(&self, text: &str) -> String {
        apply_rules(&self.unescape_rules, text)
    }
}

fn compile_rules<I, S>(rules: I) -> Result<Vec<Rule>, EscaperError>
where
    I: IntoIterator<Item = (S, S)>,
    S: AsRef<str>,
{
    rules
        .into_iter()
        .map(|(pattern, replacement)| {
            let pattern = pattern.as_ref();
            Ok(Rule {
                pattern: Regex::new(pattern).map_err(|source| EscaperError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                })?,
                replacement: replacement.as_ref().to_string(),
            })
        })
        .collect()
}

fn apply_rules(rules: &[Rule], text: &str) -> String {
    let mut current = text.to_string();
    for rule in rules {
        current = rule
            .pattern
            .replace_all(&current, rule.replacement.as_str())
            .into_owned();
    }
    current
}

/// The backslash escaping scheme for leading minus-digit constructs.
///
/// Escaping inserts a single backslash in front of a minus sign that
/// starts a negative-number shaped string.  A minus-digit construct that
/// the caller had already backslash-escaped gets its backslash run
/// extended by one instead, so the caller's escaping is distinguishable
/// from this crate's own after the round trip:
///
/// ```
/// let escaper = negarg_parser::negative_number_escaper();
/// assert_eq!(escaper.escape("-2fix"), r"\-2fix");
/// assert_eq!(escaper.escape(r"\-d"), r"\-d");
/// assert_eq!(escaper.escape(r"\-1"), r"\\-1");
/// assert_eq!(escaper.unescape(r"\\-1"), r"\-1");
/// ```
///
/// Unescaping removes exactly one backslash from such a run, which makes
/// the two directions inverses for every input.
pub fn negative_number_escaper() -> &'static Escaper {
    static ESCAPER: OnceLock<Escaper> = OnceLock::new();
    ESCAPER.get_or_init(|| {
        Escaper::new(
            [(r"^(\\*)-(\d)", r"$1\-$2")],
            [(r"^(\\*)\\-(\d)", r"$1-$2")],
        )
        .unwrap()
    })
}

/// A [`clap::Command`] wrapper that understands negative numbers.
///
/// The wrapper holds the command by composition and intercepts only the
/// matching entry points.  Each entry point runs [`mark_negative_args`]
/// over the incoming token sequence and then delegates to the inner
/// command, so everything about argument registration, help output and
/// error formatting stays plain `clap`.
///
/// The first token of the sequence is treated as the binary name and left
/// alone, unless `no_binary_name` is set on the inner command.  Tokens
/// that are not valid unicode are passed through unrewritten; a negative
/// number is always valid unicode.
#[derive(Debug, Clone)]
pub struct NegativeCommand {
    command: Command,
}

impl NegativeCommand {
    /// Wraps a fully configured command.
    pub fn new(command: Command) -> NegativeCommand {
        NegativeCommand { command }
    }

    /// Returns a reference to the wrapped command.
    pub fn inner(&self) -> &Command {
        &self.command
    }

    /// Returns a mutable reference to the wrapped command.
    pub fn inner_mut(&mut self) -> &mut Command {
        &mut self.command
    }

    /// Unwraps the command, losing the negative number handling.
    pub fn into_inner(self) -> Command {
        self.command
    }

    /// Parses the process command line, exiting on error.
    ///
    /// Like [`clap::Command::get_matches`] this prints the diagnostic and
    /// terminates the process with a non-zero status when parsing fails.
    pub fn get_matches(self) -> ArgMatches {
        self.try_get_matches().unwrap_or_else(|err| err.exit())
    }

    /// Parses the process command line, returning errors to the caller.
    pub fn try_get_matches(self) -> Result<ArgMatches, clap::Error> {
        self.try_get_matches_from(std::env::args_os())
    }

    /// Parses the given token sequence, exiting on error.
    pub fn get_matches_from<I, T>(self, itr: I) -> ArgMatches
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        self.try_get_matches_from(itr)
            .unwrap_or_else(|err| err.exit())
    }

    /// Parses the given token sequence, returning errors to the caller.
    ///
    /// The sequence follows `clap`'s convention: the first item is the
    /// binary name (unless `no_binary_name` is set) and is not rewritten.
    /// Every remaining token shaped like a negative number is sentinel
    /// marked before the inner command tokenizes, which also means the
    /// rewrite happens before `--` end-of-options handling.
    pub fn try_get_matches_from<I, T>(self, itr: I) -> Result<ArgMatches, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut args: Vec<OsString> = itr.into_iter().map(Into::into).collect();
        let skip = if self.command.is_no_binary_name_set() {
            0
        } else {
            1
        };
        for arg in args.iter_mut().skip(skip) {
            if let Some(marked) = arg.to_str().and_then(|s| mark_token(s, SENTINEL)) {
                *arg = marked.into();
            }
        }
        self.command.try_get_matches_from(args)
    }
}

impl From<Command> for NegativeCommand {
    fn from(command: Command) -> NegativeCommand {
        NegativeCommand::new(command)
    }
}
