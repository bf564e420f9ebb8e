use std::{
    env,
    ffi::OsString,
    fmt::{self, Display, Formatter},
};

use super::error::DemoError;

/// The environment variable read when none is configured.
pub const DEFAULT_VARIABLE: &str = "NAME";

/// A greeting built from a successfully probed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Greeting {
    name: String,
}

impl Greeting {
    /// Greet the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Greet a name passed as a command line argument.
    pub fn from_arg(arg: Option<String>) -> Result<Self, DemoError> {
        arg.map(Self::new)
            .ok_or_else(|| DemoError::MissingConfiguration {
                name: "name".to_owned(),
            })
    }

    /// The greeted name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for Greeting {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Hello {} !", self.name)
    }
}

/// Reads a single named variable from the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentProbe {
    name: String,
}

impl Default for EnvironmentProbe {
    fn default() -> Self {
        Self::new(DEFAULT_VARIABLE)
    }
}

impl EnvironmentProbe {
    /// Create a probe for the variable `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Look the variable up in the process environment.
    pub fn probe(&self) -> Result<Greeting, DemoError> {
        self.probe_with(|name| env::var_os(name))
    }

    /// Look the variable up with a custom lookup. Values which are not valid
    /// UTF-8 are converted lossily.
    pub fn probe_with<F>(&self, lookup: F) -> Result<Greeting, DemoError>
    where
        F: FnOnce(&str) -> Option<OsString>,
    {
        match lookup(&self.name) {
            Some(value) => {
                tracing::debug!(variable = %self.name, "variable present");
                Ok(Greeting::new(value.to_string_lossy()))
            }
            None => Err(DemoError::MissingConfiguration {
                name: self.name.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_value_is_embedded() {
        for value in ["test", "", "  spaced  ", "ünïcödé", "Hello !"] {
            let greeting = EnvironmentProbe::new("NAME")
                .probe_with(|_| Some(OsString::from(value)))
                .unwrap();
            assert_eq!(greeting.name(), value);
            assert_eq!(greeting.to_string(), format!("Hello {} !", value));
        }
    }

    #[test]
    fn lookup_receives_the_name() {
        let probe = EnvironmentProbe::new("GREETING_TARGET");
        let greeting = probe
            .probe_with(|name| Some(OsString::from(name.to_lowercase())))
            .unwrap();
        assert_eq!(greeting.name(), "greeting_target");
    }

    #[test]
    fn absent_value_fails() {
        let err = EnvironmentProbe::default().probe_with(|_| None).unwrap_err();
        assert!(matches!(
            err,
            DemoError::MissingConfiguration { ref name } if name == DEFAULT_VARIABLE
        ));
    }

    #[test]
    fn argument_greeting() {
        assert_eq!(
            Greeting::from_arg(Some("test".into())).unwrap().to_string(),
            "Hello test !"
        );
        assert!(Greeting::from_arg(None).is_err());
    }
}
