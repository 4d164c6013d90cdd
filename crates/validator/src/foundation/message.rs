//! Error-message templates
//!
//! A [`MessageTemplate`] is parsed once, when the constraint that owns it is
//! built, and rendered for every failure. Two placeholder roots exist:
//!
//! - `{member}` / `{member.full_name}` - the failing member's full name,
//!   `{member.name}` - its short name;
//! - `{arg.KEY}` - an argument supplied by the failed constraint.
//!
//! `{{` and `}}` produce literal braces.
//!
//! # Examples
//!
//! ```rust,ignore
//! use verity_validator::foundation::{InvariantFormat, MessageTemplate, MessageArgs};
//! use verity_validator::member::MemberPath;
//!
//! let template = MessageTemplate::parse("{member} must be at least {arg.min}")?;
//! let mut args = MessageArgs::new();
//! args.push(("min".into(), 18.into()));
//!
//! let text = template.format(&MemberPath::root("age"), &args, &InvariantFormat);
//! assert_eq!(text, "age must be at least 18");
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::foundation::ContractError;
use crate::member::MemberPath;

/// Ordered key/value arguments of a failed constraint (typically 0-3 entries).
pub type MessageArgs = SmallVec<[(Cow<'static, str>, ArgValue); 4]>;

// ============================================================================
// ARGUMENT VALUES
// ============================================================================

/// A single message argument.
///
/// Arguments keep their type until rendering so a [`FormatProvider`] can
/// apply culture-specific formatting to numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Str(Cow<'static, str>),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
        }
    }
}

impl From<&'static str> for ArgValue {
    fn from(value: &'static str) -> Self {
        Self::Str(Cow::Borrowed(value))
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        Self::Str(Cow::Owned(value))
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! arg_from_int {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for ArgValue {
                fn from(value: $source) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

arg_from_int!(Int as i64: i8, i16, i32, i64);
arg_from_int!(UInt as u64: u8, u16, u32, u64);
arg_from_int!(Float as f64: f32, f64);

impl From<usize> for ArgValue {
    fn from(value: usize) -> Self {
        Self::UInt(value as u64)
    }
}

impl From<isize> for ArgValue {
    fn from(value: isize) -> Self {
        Self::Int(value as i64)
    }
}

// ============================================================================
// FORMAT PROVIDERS
// ============================================================================

/// Culture hook used when rendering arguments.
pub trait FormatProvider: Send + Sync {
    /// Renders one argument value.
    fn format_arg(&self, value: &ArgValue) -> String;
}

/// Culture-invariant formatting (plain `Display`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvariantFormat;

impl FormatProvider for InvariantFormat {
    fn format_arg(&self, value: &ArgValue) -> String {
        value.to_string()
    }
}

// ============================================================================
// TEMPLATE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(Box<str>),
    MemberFullName,
    MemberName,
    Arg(Box<str>),
}

/// A parsed error-message template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    source: Arc<str>,
    segments: Arc<[Segment]>,
}

impl MessageTemplate {
    /// Parses a template, rejecting malformed placeholders.
    pub fn parse(text: impl Into<String>) -> Result<Self, ContractError> {
        let text = text.into();
        let segments = parse_segments(&text)?;
        Ok(Self {
            source: Arc::from(text),
            segments: segments.into(),
        })
    }

    /// A template that renders `text` verbatim, braces included.
    pub fn literal(text: impl Into<String>) -> Self {
        let text: String = text.into();
        let segments: Arc<[Segment]> = Arc::new([Segment::Text(text.as_str().into())]);
        Self {
            source: Arc::from(text),
            segments,
        }
    }

    /// Returns the original template text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Iterates over the argument keys this template references.
    pub fn arg_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Arg(key) => Some(&**key),
            _ => None,
        })
    }

    /// Returns true if the template mentions the member at all.
    #[must_use]
    pub fn mentions_member(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::MemberFullName | Segment::MemberName))
    }

    /// Renders the template for a member and the failed constraint's arguments.
    ///
    /// Argument keys missing from `args` render as the empty string.
    pub fn format(
        &self,
        member: &MemberPath,
        args: &[(Cow<'static, str>, ArgValue)],
        provider: &dyn FormatProvider,
    ) -> String {
        let mut out = String::with_capacity(self.source.len() + member.full_name().len());
        for segment in self.segments.iter() {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::MemberFullName => out.push_str(member.full_name()),
                Segment::MemberName => out.push_str(member.name()),
                Segment::Arg(key) => {
                    if let Some((_, value)) = args.iter().find(|(k, _)| k.as_ref() == &**key) {
                        out.push_str(&provider.format_arg(value));
                    }
                }
            }
        }
        out
    }
}

impl fmt::Display for MessageTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Parses a template built into this crate.
///
/// Builtin templates are covered by tests; should one ever fail to parse it is
/// rendered verbatim instead of aborting.
pub(crate) fn builtin(text: &'static str) -> MessageTemplate {
    match MessageTemplate::parse(text) {
        Ok(template) => template,
        Err(error) => {
            tracing::warn!(%error, "builtin message template rendered verbatim");
            MessageTemplate::literal(text)
        }
    }
}

fn parse_segments(text: &str) -> Result<Vec<Segment>, ContractError> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = text.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        match ch {
            '{' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                literal.push('{');
            }
            '}' if matches!(chars.peek(), Some((_, '}'))) => {
                chars.next();
                literal.push('}');
            }
            '}' => {
                return Err(ContractError::malformed_template(
                    text,
                    offset,
                    "unmatched '}'",
                ));
            }
            '{' => {
                let mut key = String::new();
                let mut closed = false;
                for (_, next) in chars.by_ref() {
                    match next {
                        '}' => {
                            closed = true;
                            break;
                        }
                        '{' => {
                            return Err(ContractError::malformed_template(
                                text,
                                offset,
                                "nested '{' inside placeholder",
                            ));
                        }
                        other => key.push(other),
                    }
                }
                if !closed {
                    return Err(ContractError::malformed_template(
                        text,
                        offset,
                        "unclosed placeholder",
                    ));
                }
                if !literal.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut literal).into()));
                }
                segments.push(placeholder(text, offset, &key)?);
            }
            other => literal.push(other),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Text(literal.into()));
    }
    Ok(segments)
}

fn placeholder(text: &str, offset: usize, key: &str) -> Result<Segment, ContractError> {
    match key {
        "member" | "member.full_name" => Ok(Segment::MemberFullName),
        "member.name" => Ok(Segment::MemberName),
        _ => match key.strip_prefix("arg.") {
            Some(name) if is_identifier(name) => Ok(Segment::Arg(name.into())),
            Some(_) => Err(ContractError::malformed_template(
                text,
                offset,
                "argument key must be a non-empty identifier",
            )),
            None => Err(ContractError::malformed_template(
                text,
                offset,
                format!("unknown placeholder '{key}'"),
            )),
        },
    }
}

fn is_identifier(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// ============================================================================
// TESTS
// ============================================================================
