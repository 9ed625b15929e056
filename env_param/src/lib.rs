//! A small helper for parameters whose default can be overridden through an environment variable.
//!
//! Typical usage is a `static` that is read once, lazily, the first time it is dereferenced:
//!
//! ```
//! use env_param::EnvParam;
//! static MAX_OVERLOAD_RETRIES: EnvParam<u32> = EnvParam::new("AGRI_MAX_OVERLOAD_RETRIES", "3");
//! assert_eq!(*MAX_OVERLOAD_RETRIES.get(), 3);
//! ```

use std::env;
use std::fmt::Debug;
use std::str::FromStr;
use std::sync::OnceLock;

/// A value of type `T` whose default can be overridden by the environment variable `key`.
///
/// The environment is read exactly once, on first access, and cached for the lifetime of the
/// process. If the variable is set but fails to parse as `T`, construction panics with a message
/// naming the variable and the offending value: this is a configuration error, not a runtime one,
/// and should be caught immediately rather than silently falling back to the default.
pub struct EnvParam<T> {
    key: &'static str,
    default: &'static str,
    value: OnceLock<T>,
}

impl<T: FromStr + Clone> EnvParam<T>
where
    T::Err: Debug,
{
    pub const fn new(key: &'static str, default: &'static str) -> Self {
        EnvParam {
            key,
            default,
            value: OnceLock::new(),
        }
    }

    /// Returns the parameter's value, reading and parsing the environment on first access.
    pub fn get(&self) -> &T {
        self.value.get_or_init(|| {
            let raw = env::var(self.key).unwrap_or_else(|_| self.default.to_string());
            raw.parse().unwrap_or_else(|e| {
                panic!("invalid value for environment variable {}: {raw:?} ({e:?})", self.key)
            })
        })
    }

    /// Returns the raw default string this parameter falls back to when unset.
    pub fn default_str(&self) -> &'static str {
        self.default
    }

    /// Returns the environment variable name backing this parameter.
    pub fn key(&self) -> &'static str {
        self.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_used_when_unset() {
        static P: EnvParam<u32> = EnvParam::new("ENV_PARAM_TEST_UNSET_VAR_XYZ", "7");
        assert_eq!(*P.get(), 7);
    }
}
