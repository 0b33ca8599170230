//! Combinators for composing parameterised trees.
//!
//! [`with`] activates a frame for the dynamic extent of one evaluation,
//! [`wrap`] and [`wrap_with_defaults`] turn a tree into a reusable template,
//! [`objectify`] binds parameter names to lookups, and the [`merge`] and
//! [`template`] operators combine inherited values.

mod merge;
mod template;

pub use merge::{merge, merge_values};
pub use template::{Template, TemplateRef, template, template_str};

use indexmap::IndexMap;

use crate::{Frame, Lazy, Thunk, evaluate, get};

/// Evaluate `tree` with `frame` pushed on top of the active scope.
///
/// The frame is only visible while `tree` is being forced; the caller's scope
/// is never modified.
///
/// # Examples
///
/// ```
/// use scoped_params::{Engine, frame, get, with};
///
/// let tree = with(frame! { "title" => "Heat" }, get("title"));
/// let out = Engine::new().evaluate_in(&frame! { "title" => "Ronin" }, &tree)?;
/// assert_eq!(out, "Heat");
/// # Ok::<_, std::sync::Arc<scoped_params::ParamError>>(())
/// ```
#[must_use]
pub fn with(frame: Frame, tree: impl Into<Lazy>) -> Lazy {
    let body = tree.into();
    Lazy::Thunk(Thunk::new(move |scope| {
        let inner = scope.push(&frame)?;
        evaluate(&inner, &body).map(Lazy::Literal)
    }))
}

/// A reusable tree that takes its parameters from the frame supplied at each
/// call.
#[derive(Clone, Debug)]
pub struct Wrapped {
    tree: Lazy,
}

impl Wrapped {
    /// Instantiate the template with `frame`.
    #[must_use]
    pub fn call(&self, frame: Frame) -> Lazy {
        with(frame, self.tree.clone())
    }

    /// Instantiate the template with an empty frame.
    #[must_use]
    pub fn call_default(&self) -> Lazy {
        self.call(Frame::new())
    }

    /// The wrapped tree.
    #[must_use]
    pub const fn tree(&self) -> &Lazy {
        &self.tree
    }
}

/// Turn `tree` into a reusable template.
///
/// # Examples
///
/// ```
/// use scoped_params::{Engine, Lazy, frame, get, wrap};
///
/// let movie = wrap(Lazy::mapping([("title", get("title"))]));
/// let both = Lazy::sequence([
///     movie.call(frame! { "title" => "Heat" }),
///     movie.call(frame! { "title" => "Ronin" }),
/// ]);
/// let out = Engine::new().evaluate(&both)?;
/// assert_eq!(out, serde_json::json!([{"title": "Heat"}, {"title": "Ronin"}]));
/// # Ok::<_, std::sync::Arc<scoped_params::ParamError>>(())
/// ```
#[must_use]
pub fn wrap(tree: impl Into<Lazy>) -> Wrapped {
    Wrapped { tree: tree.into() }
}

/// Turn `tree` into a reusable template whose `defaults` apply unless the
/// caller's frame, or any enclosing frame, sets the parameter first.
///
/// Each call pushes two frames: the defaults (as [`crate::default`]
/// operators) and then the caller's frame.
#[must_use]
pub fn wrap_with_defaults(defaults: &Frame, tree: impl Into<Lazy>) -> Wrapped {
    wrap(with(defaults.as_defaults(), tree))
}

/// A mapping binding each name in `names` to [`get`] of the same name, with
/// `extra` entries layered on top.
///
/// On collision the `extra` value wins and the key keeps its original
/// position.
///
/// # Examples
///
/// ```
/// use scoped_params::{Engine, Lazy, frame, objectify};
///
/// let tree = objectify(["title", "genre"], [("genre", Lazy::from("drama"))]);
/// let out = Engine::new().evaluate_in(&frame! { "title" => "Heat", "genre" => "crime" }, &tree)?;
/// assert_eq!(out, serde_json::json!({"title": "Heat", "genre": "drama"}));
/// # Ok::<_, std::sync::Arc<scoped_params::ParamError>>(())
/// ```
#[must_use]
pub fn objectify<N, S, E, K, V>(names: N, extra: E) -> Lazy
where
    N: IntoIterator<Item = S>,
    S: Into<String>,
    E: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Lazy>,
{
    let mut entries: IndexMap<String, Lazy> = names
        .into_iter()
        .map(|name| {
            let key: String = name.into();
            (key.clone(), get(key))
        })
        .collect();
    for (key, value) in extra {
        entries.insert(key.into(), value.into());
    }
    Lazy::Mapping(entries)
}

/// [`objectify`] without extra entries.
#[must_use]
pub fn objectify_names<N, S>(names: N) -> Lazy
where
    N: IntoIterator<Item = S>,
    S: Into<String>,
{
    objectify(names, std::iter::empty::<(String, Lazy)>())
}
