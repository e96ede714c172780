use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Test {
    pub name: String,
}

impl Test {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A named group of tests and nested suites.
///
/// `origin` is the path or URL the suite was read from; it stays empty for
/// suites declared inside a source and for hand-built suites.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suite {
    pub name: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub suites: Vec<Suite>,
    #[serde(default)]
    pub tests: Vec<Test>,
}

impl Suite {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    /// Suite whose origin is its own name. Directory nodes are built this way.
    pub fn with_origin(name: impl Into<String>) -> Self {
        let name = name.into();
        Self { origin: name.clone(), name, ..Default::default() }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.origin.is_empty() && self.suites.is_empty() && self.tests.is_empty()
    }

    /// Independent copy of this suite named after where it came from.
    pub fn renamed_to_origin(&self) -> Suite {
        Suite { name: self.origin.clone(), ..self.clone() }
    }
}
