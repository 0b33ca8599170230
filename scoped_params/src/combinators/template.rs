//! String interpolation over resolved parameters.
//!
//! A [`Template`] interleaves literal fragments with references. Each
//! reference names a parameter, resolved with [`Scope::get_evaluated`], or
//! the inherited placeholder, bound to the value an outer frame resolved for
//! the parameter the template is assigned to.
//!
//! Rendering rules: strings are inserted verbatim, `null` (and an unset
//! inherited placeholder) renders as the text `null`, and every other value
//! renders as its compact JSON text.

use serde_json::Value;
use tracing::trace;

use crate::{InheritedOp, Lazy, ParamError, ParamResult, Scope};

/// Text rendered for `null` values.
pub const NULL_TEXT: &str = "null";

/// Placeholder name standing for the inherited value in [`template_str`].
pub const INHERITED_PLACEHOLDER: &str = "^";

/// A reference interpolated between template fragments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TemplateRef {
    /// The evaluated value of the named parameter.
    Param(String),
    /// The value inherited by the template itself.
    Inherited,
}

impl TemplateRef {
    /// Reference a parameter by name.
    #[must_use]
    pub fn param(name: impl Into<String>) -> Self {
        Self::Param(name.into())
    }
}

/// Literal fragments interleaved with references.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    fragments: Vec<String>,
    refs: Vec<TemplateRef>,
}

impl Template {
    /// Build a template. Rendering emits `fragments[0]`, `refs[0]`,
    /// `fragments[1]`, `refs[1]` and so on; surplus fragments or references
    /// follow in order.
    #[must_use]
    pub fn new<F, S>(fragments: F, refs: Vec<TemplateRef>) -> Self
    where
        F: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fragments: fragments.into_iter().map(Into::into).collect(),
            refs,
        }
    }

    /// Parse a pattern such as `"{title} ({genre})"`.
    ///
    /// `{name}` references a parameter, `{^}` the inherited value, and `{{` or
    /// `}}` produce literal braces.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::TemplateSyntax`] for unbalanced braces, nested
    /// braces or empty placeholders.
    ///
    /// # Examples
    ///
    /// ```
    /// use scoped_params::{Template, TemplateRef};
    ///
    /// let parsed = Template::parse("{{{title}}} by {^}")?;
    /// assert_eq!(parsed.fragments(), ["{", "} by ", ""]);
    /// assert_eq!(parsed.refs(), [TemplateRef::param("title"), TemplateRef::Inherited]);
    /// # Ok::<_, std::sync::Arc<scoped_params::ParamError>>(())
    /// ```
    pub fn parse(pattern: &str) -> ParamResult<Self> {
        let mut fragments = Vec::new();
        let mut refs = Vec::new();
        let mut literal = String::new();
        let mut chars = pattern.char_indices().peekable();
        while let Some((pos, c)) = chars.next() {
            let doubled = chars.peek().is_some_and(|&(_, next)| next == c);
            match c {
                '{' | '}' if doubled => {
                    chars.next();
                    literal.push(c);
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, next) in chars.by_ref() {
                        match next {
                            '}' => {
                                closed = true;
                                break;
                            }
                            '{' => {
                                return Err(syntax(
                                    pattern,
                                    format!("nested '{{' at position {pos}"),
                                ));
                            }
                            other => name.push(other),
                        }
                    }
                    if !closed {
                        return Err(syntax(pattern, format!("unclosed '{{' at position {pos}")));
                    }
                    refs.push(placeholder(pattern, pos, name.trim())?);
                    fragments.push(std::mem::take(&mut literal));
                }
                '}' => return Err(syntax(pattern, format!("unmatched '}}' at position {pos}"))),
                other => literal.push(other),
            }
        }
        fragments.push(literal);
        Ok(Self { fragments, refs })
    }

    /// Literal fragments.
    #[must_use]
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Interpolated references.
    #[must_use]
    pub fn refs(&self) -> &[TemplateRef] {
        &self.refs
    }

    /// Render the template. Each reference is evaluated exactly once, in
    /// order.
    ///
    /// # Errors
    ///
    /// Propagates any failure raised while resolving a referenced parameter.
    pub fn render(&self, scope: &Scope, inherited: Option<&Value>) -> ParamResult<String> {
        let mut out = String::new();
        let slots = self.fragments.len().max(self.refs.len());
        for index in 0..slots {
            if let Some(fragment) = self.fragments.get(index) {
                out.push_str(fragment);
            }
            match self.refs.get(index) {
                Some(TemplateRef::Param(name)) => {
                    push_rendered(&mut out, &scope.get_evaluated(name)?);
                }
                Some(TemplateRef::Inherited) => {
                    push_rendered(&mut out, inherited.unwrap_or(&Value::Null));
                }
                None => {}
            }
        }
        trace!(refs = self.refs.len(), "rendered template");
        Ok(out)
    }

    /// Convert the template into an inherited operator producing a string.
    #[must_use]
    pub fn into_op(self) -> InheritedOp {
        InheritedOp::new(move |scope, inherited| {
            self.render(scope, inherited.as_ref()).map(Lazy::from)
        })
    }
}

fn placeholder(pattern: &str, pos: usize, name: &str) -> ParamResult<TemplateRef> {
    match name {
        "" => Err(syntax(pattern, format!("empty placeholder at position {pos}"))),
        INHERITED_PLACEHOLDER => Ok(TemplateRef::Inherited),
        _ => Ok(TemplateRef::param(name)),
    }
}

fn syntax(pattern: &str, message: String) -> std::sync::Arc<ParamError> {
    ParamError::TemplateSyntax {
        pattern: pattern.to_owned(),
        message,
    }
    .into()
}

fn push_rendered(out: &mut String, value: &Value) {
    match value {
        Value::String(text) => out.push_str(text),
        Value::Null => out.push_str(NULL_TEXT),
        other => out.push_str(&other.to_string()),
    }
}

/// An inherited operator interpolating `refs` between `fragments`.
///
/// # Examples
///
/// ```
/// use scoped_params::{Engine, Lazy, TemplateRef, frame, template};
///
/// let summary = template(
///     ["", " (", ")"],
///     vec![TemplateRef::param("title"), TemplateRef::param("genre")],
/// );
/// let out = Engine::new().evaluate_in(
///     &frame! { "title" => "Bridesmaids", "genre" => "comedy" },
///     &Lazy::from(summary),
/// )?;
/// assert_eq!(out, "Bridesmaids (comedy)");
/// # Ok::<_, std::sync::Arc<scoped_params::ParamError>>(())
/// ```
#[must_use]
pub fn template<F, S>(fragments: F, refs: Vec<TemplateRef>) -> InheritedOp
where
    F: IntoIterator<Item = S>,
    S: Into<String>,
{
    Template::new(fragments, refs).into_op()
}

/// Parse `pattern` with [`Template::parse`] and convert it into an inherited
/// operator.
///
/// # Errors
///
/// Returns [`ParamError::TemplateSyntax`] when the pattern is malformed.
pub fn template_str(pattern: &str) -> ParamResult<InheritedOp> {
    Template::parse(pattern).map(Template::into_op)
}
