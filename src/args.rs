//! Typed `-P key=value` properties for build scripts.
//!
//! Preferable to environment variables for pipelines: every value is explicit on
//! the command line and has a declared default.
//!
//! ```text
//! git-autoversion -P testEnv=B -P appHardening=TRUE -P adminEmail=supfoos@aol args
//! ```

use crate::error::{AutoVersionError, Result};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Free-form key/value overrides
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    values: HashMap<String, String>,
}

impl Properties {
    /// Parse `key=value` pairs; later pairs override earlier ones
    pub fn parse<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values = HashMap::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                AutoVersionError::configuration(format!(
                    "Property '{}' must have the form key=value",
                    pair
                ))
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(AutoVersionError::configuration(format!(
                    "Property '{}' has an empty key",
                    pair
                )));
            }
            values.insert(key.to_string(), value.to_string());
        }
        Ok(Properties { values })
    }

    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn string(&self, key: &str, default: Option<&str>) -> Option<String> {
        match self.values.get(key) {
            Some(value) => Some(value.clone()),
            None => default.map(str::to_string),
        }
    }

    /// Comma separated list
    pub fn string_list(&self, key: &str, default: Option<&[&str]>) -> Option<Vec<String>> {
        match self.values.get(key) {
            Some(value) => Some(value.split(',').map(str::to_string).collect()),
            None => default.map(|items| items.iter().map(|s| s.to_string()).collect()),
        }
    }

    pub fn int(&self, key: &str, default: Option<i64>) -> Result<Option<i64>> {
        match self.values.get(key) {
            Some(value) => value.trim().parse::<i64>().map(Some).map_err(|_| {
                AutoVersionError::configuration(format!(
                    "Property '{}' expects an integer, got '{}'",
                    key, value
                ))
            }),
            None => Ok(default),
        }
    }

    /// `true` in any letter case is true, anything else is false
    pub fn bool(&self, key: &str, default: Option<bool>) -> Option<bool> {
        match self.values.get(key) {
            Some(value) => Some(value.eq_ignore_ascii_case("true")),
            None => default,
        }
    }

    pub fn enum_by_name<T>(&self, key: &str, default: Option<T>) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        match self.values.get(key) {
            Some(value) => value.parse::<T>().map(Some).map_err(|e| {
                AutoVersionError::configuration(format!("Property '{}': {}", key, e))
            }),
            None => Ok(default),
        }
    }
}

/// Sample enum property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestEnv {
    A,
    B,
    C,
    D,
}

impl FromStr for TestEnv {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "A" => Ok(TestEnv::A),
            "B" => Ok(TestEnv::B),
            "C" => Ok(TestEnv::C),
            "D" => Ok(TestEnv::D),
            other => Err(format!("unknown test environment '{}'", other)),
        }
    }
}

impl fmt::Display for TestEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TestEnv::A => "A",
            TestEnv::B => "B",
            TestEnv::C => "C",
            TestEnv::D => "D",
        };
        f.write_str(name)
    }
}

/// The example properties, one per supported type
#[derive(Debug, Clone, PartialEq)]
pub struct ExampleArgs {
    pub simple_default: Option<String>,
    pub test_env: Option<TestEnv>,
    pub app_hardening_enabled: Option<bool>,
    pub admin_email: Option<String>,
    pub user_emails: Option<Vec<String>>,
}

impl ExampleArgs {
    pub fn from_properties(props: &Properties) -> Result<Self> {
        Ok(ExampleArgs {
            simple_default: props.string("simpleDefault", Some("myDefaultValue")),
            test_env: props.enum_by_name("testEnv", Some(TestEnv::A))?,
            app_hardening_enabled: props.bool("appHardening", None),
            admin_email: props.string("adminEmail", None),
            user_emails: props
                .string_list("userEmails", Some(&["person1@yahoo", "person2@hotmail"])),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_properties() {
        let args = ExampleArgs::from_properties(&Properties::default()).unwrap();
        assert_eq!(args.simple_default.as_deref(), Some("myDefaultValue"));
        assert_eq!(args.test_env, Some(TestEnv::A));
        assert_eq!(args.app_hardening_enabled, None);
        assert_eq!(args.admin_email, None);
        assert_eq!(
            args.user_emails,
            Some(vec!["person1@yahoo".to_string(), "person2@hotmail".to_string()])
        );
    }

    #[test]
    fn test_overrides_are_coerced() {
        let props = Properties::parse([
            "testEnv=B",
            "appHardening=TRUE",
            "adminEmail=supfoos@aol.com",
            "userEmails=a@x,b@y,c@z",
        ])
        .unwrap();
        let args = ExampleArgs::from_properties(&props).unwrap();
        assert_eq!(args.test_env, Some(TestEnv::B));
        assert_eq!(args.app_hardening_enabled, Some(true));
        assert_eq!(args.admin_email.as_deref(), Some("supfoos@aol.com"));
        assert_eq!(args.user_emails.map(|v| v.len()), Some(3));
    }

    #[test]
    fn test_value_may_contain_equals() {
        let props = Properties::parse(["query=a=b"]).unwrap();
        assert_eq!(props.string("query", None).as_deref(), Some("a=b"));
    }

    #[test]
    fn test_malformed_pair_is_rejected() {
        assert!(Properties::parse(["novalue"]).is_err());
        assert!(Properties::parse(["=value"]).is_err());
    }

    #[test]
    fn test_int_coercion() {
        let props = Properties::parse(["retries=3", "bad=three"]).unwrap();
        assert_eq!(props.int("retries", None).unwrap(), Some(3));
        assert_eq!(props.int("missing", Some(7)).unwrap(), Some(7));
        assert!(props.int("bad", None).is_err());
    }

    #[test]
    fn test_bool_is_false_unless_true() {
        let props = Properties::parse(["a=yes", "b=True"]).unwrap();
        assert_eq!(props.bool("a", None), Some(false));
        assert_eq!(props.bool("b", None), Some(true));
        assert_eq!(props.bool("c", Some(true)), Some(true));
    }

    #[test]
    fn test_enum_names_are_case_sensitive() {
        let props = Properties::parse(["testEnv=b"]).unwrap();
        assert!(props.enum_by_name::<TestEnv>("testEnv", None).is_err());
    }

    #[test]
    fn test_later_pairs_override() {
        let props = Properties::parse(["testEnv=B", "testEnv=C"]).unwrap();
        assert_eq!(
            props.enum_by_name("testEnv", Some(TestEnv::A)).unwrap(),
            Some(TestEnv::C)
        );
        assert!(props.has("testEnv"));
    }
}
