//! Engine options and their loading.
//!
//! Options are layered with Figment: serialised defaults first, then
//! environment variables prefixed with [`ENV_PREFIX`].

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{ParamOptionsExt, ParamResult};

/// Prefix for environment variables read by [`EngineOptions::load`].
pub const ENV_PREFIX: &str = "SCOPED_PARAMS_";

/// Default limit on nested forces, see [`EngineOptions::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Tunables for an [`crate::Engine`].
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineOptions {
    /// Maximum number of nested thunk or operator invocations in a single
    /// evaluation. Cyclic references fail once they exceed it.
    pub max_depth: usize,
    /// Reject names outside a closed schema. When `false` the schema is kept
    /// for documentation only.
    pub reject_unknown: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            reject_unknown: true,
        }
    }
}

impl EngineOptions {
    /// Replace the depth limit.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Toggle rejection of undeclared names.
    #[must_use]
    pub const fn with_reject_unknown(mut self, reject_unknown: bool) -> Self {
        self.reject_unknown = reject_unknown;
        self
    }

    /// The provider stack used by [`EngineOptions::load`].
    #[must_use]
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load options from defaults and `SCOPED_PARAMS_*` environment
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ParamError::Options`] when a provider yields a value
    /// of the wrong type.
    pub fn load() -> ParamResult<Self> {
        Self::load_from(&Self::figment())
    }

    /// Extract options from a caller-supplied figment.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ParamError::Options`] when extraction fails.
    pub fn load_from(figment: &Figment) -> ParamResult<Self> {
        let options: Self = figment.extract().into_param_options()?;
        debug!(
            max_depth = options.max_depth,
            reject_unknown = options.reject_unknown,
            "loaded engine options"
        );
        Ok(options)
    }
}
