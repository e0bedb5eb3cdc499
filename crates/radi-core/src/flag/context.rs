use std::time::Duration;

use clap::{ArgMatches, parser::ValueSource};

use crate::{FlagError, FlagResult};

/// Pre-parsed CLI context queried by the resolver.
///
/// The resolver never parses argv itself. Typed accessors return `Ok(None)` for flags that
/// carry no value and a [`FlagError::Access`] when the flag exists with a different type.
pub trait FlagContext {
    /// Returns `true` only if the user supplied the flag (a parser default does not count).
    fn is_set(&self, name: &str) -> bool;

    fn string(&self, name: &str) -> FlagResult<Option<String>>;

    fn string_list(&self, name: &str) -> FlagResult<Option<Vec<String>>>;

    fn int(&self, name: &str) -> FlagResult<Option<i32>>;

    fn int64(&self, name: &str) -> FlagResult<Option<i64>>;

    fn bool(&self, name: &str) -> FlagResult<Option<bool>>;

    fn duration(&self, name: &str) -> FlagResult<Option<Duration>>;

    /// Raw textual value of a flag, for kinds without a typed accessor.
    fn generic(&self, name: &str) -> Option<String>;
}

/// [`FlagContext`] over clap's [`ArgMatches`].
#[derive(Debug, Clone, Copy)]
pub struct ClapContext<'a> {
    matches: &'a ArgMatches,
}

impl<'a> ClapContext<'a> {
    pub fn new(matches: &'a ArgMatches) -> Self {
        Self { matches }
    }

    fn access(name: &str, e: clap::parser::MatchesError) -> FlagError {
        FlagError::Access {
            flag: name.to_string(),
            reason: e.to_string(),
        }
    }
}

impl FlagContext for ClapContext<'_> {
    fn is_set(&self, name: &str) -> bool {
        match self.matches.try_contains_id(name) {
            Ok(true) => matches!(
                self.matches.value_source(name),
                Some(ValueSource::CommandLine | ValueSource::EnvVariable)
            ),
            _ => false,
        }
    }

    fn string(&self, name: &str) -> FlagResult<Option<String>> {
        self.matches
            .try_get_one::<String>(name)
            .map(|v| v.cloned())
            .map_err(|e| Self::access(name, e))
    }

    fn string_list(&self, name: &str) -> FlagResult<Option<Vec<String>>> {
        self.matches
            .try_get_many::<String>(name)
            .map(|vals| vals.map(|v| v.cloned().collect()))
            .map_err(|e| Self::access(name, e))
    }

    fn int(&self, name: &str) -> FlagResult<Option<i32>> {
        self.matches
            .try_get_one::<i32>(name)
            .map(|v| v.copied())
            .map_err(|e| Self::access(name, e))
    }

    fn int64(&self, name: &str) -> FlagResult<Option<i64>> {
        self.matches
            .try_get_one::<i64>(name)
            .map(|v| v.copied())
            .map_err(|e| Self::access(name, e))
    }

    fn bool(&self, name: &str) -> FlagResult<Option<bool>> {
        self.matches
            .try_get_one::<bool>(name)
            .map(|v| v.copied())
            .map_err(|e| Self::access(name, e))
    }

    fn duration(&self, name: &str) -> FlagResult<Option<Duration>> {
        self.matches
            .try_get_one::<Duration>(name)
            .map(|v| v.copied())
            .map_err(|e| Self::access(name, e))
    }

    fn generic(&self, name: &str) -> Option<String> {
        let mut raw = self.matches.try_get_raw(name).ok().flatten()?;
        raw.next().map(|v| v.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{Arg, ArgAction, Command, value_parser};

    fn command() -> Command {
        Command::new("test")
            .no_binary_name(true)
            .arg(
                Arg::new("name")
                    .long("name")
                    .default_value("fallback")
                    .value_parser(value_parser!(String)),
            )
            .arg(Arg::new("count").long("count").value_parser(value_parser!(i32)))
            .arg(Arg::new("force").long("force").action(ArgAction::SetTrue))
    }

    #[test]
    fn default_value_is_not_explicitly_set() {
        let m = command().try_get_matches_from(Vec::<&str>::new()).unwrap();
        let ctx = ClapContext::new(&m);

        assert!(!ctx.is_set("name"));
        assert_eq!(ctx.string("name").unwrap().as_deref(), Some("fallback"));
        assert!(!ctx.is_set("force"));
        assert!(!ctx.is_set("count"));
    }

    #[test]
    fn explicit_zero_value_counts_as_set() {
        let m = command().try_get_matches_from(["--count", "0"]).unwrap();
        let ctx = ClapContext::new(&m);

        assert!(ctx.is_set("count"));
        assert_eq!(ctx.int("count").unwrap(), Some(0));
    }

    #[test]
    fn explicit_value_equal_to_default_counts_as_set() {
        let m = command().try_get_matches_from(["--name", "fallback"]).unwrap();
        assert!(ClapContext::new(&m).is_set("name"));
    }

    #[test]
    fn unknown_flag_is_unset_not_panic() {
        let m = command().try_get_matches_from(Vec::<&str>::new()).unwrap();
        let ctx = ClapContext::new(&m);

        assert!(!ctx.is_set("ghost"));
        assert!(ctx.generic("ghost").is_none());
    }

    #[test]
    fn wrong_type_is_access_error() {
        let m = command().try_get_matches_from(["--count", "3"]).unwrap();
        let err = ClapContext::new(&m).string("count").unwrap_err();
        assert!(matches!(err, FlagError::Access { ref flag, .. } if flag == "count"));
    }

    #[test]
    fn generic_returns_raw_text() {
        let m = command().try_get_matches_from(["--count", "42"]).unwrap();
        assert_eq!(ClapContext::new(&m).generic("count").as_deref(), Some("42"));
    }
}
