//! Credential resolution for the provider configure step.
//!
//! The API key comes from exactly one place: the declared `key` attribute
//! when it is present and non-null, otherwise the `TMDB_KEY` environment
//! value. The environment value is passed in by the caller so resolution
//! stays a pure function.

use tmdb_core::{Credential, Diagnostics, Error, Value};

/// Resolve the API key from the declared configuration value and the
/// environment fallback.
///
/// Returns the credential with no diagnostics on success. Otherwise returns
/// `None` with exactly one error diagnostic:
/// - the declared value is not yet known (fatal for this cycle), or
/// - the resolved key is empty.
pub fn resolve(declared: &Value<String>, env_value: &str) -> (Option<Credential>, Diagnostics) {
    let mut diags = Diagnostics::new();

    if declared.is_unknown() {
        diags.push(Error::unknown_credential().into());
        return (None, diags);
    }

    // A declared value, even an empty one, overrides the environment.
    let api_key = declared.known().map_or(env_value, String::as_str);

    if api_key.is_empty() {
        diags.push(Error::missing_credential().into());
        return (None, diags);
    }

    (Some(Credential::new(api_key)), diags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tmdb_core::AttributePath;

    fn known(s: &str) -> Value<String> {
        Value::Known(s.to_string())
    }

    #[test]
    fn declared_overrides_environment() {
        for env in ["", "env-key", "another"] {
            let (cred, diags) = resolve(&known("declared-key"), env);
            assert!(diags.is_empty());
            assert_eq!(cred.unwrap().expose(), "declared-key");
        }
    }

    #[test]
    fn null_falls_back_to_environment() {
        let (cred, diags) = resolve(&Value::Null, "env-key");
        assert!(diags.is_empty());
        assert_eq!(cred.unwrap().expose(), "env-key");
    }

    #[test]
    fn both_empty_is_one_error() {
        let (cred, diags) = resolve(&Value::Null, "");
        assert!(cred.is_none());
        assert_eq!(diags.len(), 1);
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.summary, "Missing TMDB API Key");
        assert_eq!(diag.path, Some(AttributePath::root("key")));
    }

    #[test]
    fn declared_empty_string_wins_over_environment() {
        let (cred, diags) = resolve(&known(""), "env-key");
        assert!(cred.is_none());
        assert_eq!(diags.len(), 1);
        assert!(diags.has_error());
    }

    #[test]
    fn unknown_is_fatal_even_with_environment() {
        let (cred, diags) = resolve(&Value::Unknown, "env-key");
        assert!(cred.is_none());
        assert_eq!(diags.len(), 1);
        assert_eq!(diags.iter().next().unwrap().summary, "Unknown TMDB API Key");
    }
}
