//! Registry-backed value parsing for clap.
//!
//! [`RegistryValueParser`] lets a clap argument take its value through a
//! [`ParserRegistry`], so custom strategies registered once are used by every
//! command that asks for the type.
//!
//! ```rust,ignore
//! use clap::{Arg, Command};
//! use argvalue_core::cli::RegistryValueParser;
//!
//! let cmd = Command::new("app")
//!     .arg(Arg::new("color").value_parser(RegistryValueParser::<Color>::new()));
//! ```

use std::ffi::OsStr;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use clap::builder::TypedValueParser;
use clap::error::ErrorKind;
use clap::{Arg, Command};

use crate::key::ArgType;
use crate::registry::ParserRegistry;

#[derive(Clone)]
enum RegistrySource {
    Global,
    Shared(Arc<ParserRegistry>),
}

/// A clap value parser that resolves `T` in a [`ParserRegistry`].
///
/// Parse failures and missing strategies are reported as
/// [`ErrorKind::ValueValidation`]; non-UTF-8 input as
/// [`ErrorKind::InvalidUtf8`]. The clap argument id is used as the argument
/// name in messages.
pub struct RegistryValueParser<T> {
    source: RegistrySource,
    _marker: PhantomData<fn() -> T>,
}

impl<T: ArgType> RegistryValueParser<T> {
    /// Resolves through [`ParserRegistry::global`].
    pub fn new() -> Self {
        Self {
            source: RegistrySource::Global,
            _marker: PhantomData,
        }
    }

    /// Resolves through `registry`.
    pub fn with_registry(registry: Arc<ParserRegistry>) -> Self {
        Self {
            source: RegistrySource::Shared(registry),
            _marker: PhantomData,
        }
    }

    fn registry(&self) -> &ParserRegistry {
        match &self.source {
            RegistrySource::Global => ParserRegistry::global(),
            RegistrySource::Shared(registry) => registry.as_ref(),
        }
    }
}

impl<T: ArgType> Default for RegistryValueParser<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for RegistryValueParser<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for RegistryValueParser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match self.source {
            RegistrySource::Global => "global",
            RegistrySource::Shared(_) => "shared",
        };
        f.debug_struct("RegistryValueParser")
            .field("registry", &source)
            .finish()
    }
}

impl<T> TypedValueParser for RegistryValueParser<T>
where
    T: ArgType + Clone + Sync,
{
    type Value = T;

    fn parse_ref(
        &self,
        cmd: &Command,
        arg: Option<&Arg>,
        value: &OsStr,
    ) -> Result<Self::Value, clap::Error> {
        let value = value
            .to_str()
            .ok_or_else(|| clap::Error::new(ErrorKind::InvalidUtf8).with_cmd(cmd))?;
        let arg_name = arg.map_or("value", |arg| arg.get_id().as_str());

        self.registry()
            .parse::<T>(arg_name, value)
            .map_err(|err| cmd.clone().error(ErrorKind::ValueValidation, err))
    }
}
