//! Dependency specification.
//!
//! A `DependencySpec` names one library file and where to download it from.
//! The full set of libraries is a fixed, ordered `DependencyTable`.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;
use url::Url;

/// Base URL of the maven mirror that hosts the builtin libraries.
pub const MAVEN_MIRROR: &str = "https://files.minecraftforge.net/maven/";

/// The Scala 2.11 runtime, as (file name, path below [`MAVEN_MIRROR`]).
///
/// Order matters: libraries are registered in exactly this order.
const SCALA_LIBRARIES: &[(&str, &str)] = &[
    (
        "akka-actor_2.11-2.3.3.jar",
        "com/typesafe/akka/akka-actor_2.11/2.3.3/akka-actor_2.11-2.3.3.jar",
    ),
    (
        "scala-actors-migration_2.11-1.1.0.jar",
        "org/scala-lang/scala-actors-migration_2.11/1.1.0/scala-actors-migration_2.11-1.1.0.jar",
    ),
    (
        "scala-compiler-2.11.1.jar",
        "org/scala-lang/scala-compiler/2.11.1/scala-compiler-2.11.1.jar",
    ),
    (
        "scala-continuations-library_2.11-1.0.2.jar",
        "org/scala-lang/plugins/scala-continuations-library_2.11/1.0.2/scala-continuations-library_2.11-1.0.2.jar",
    ),
    (
        "scala-continuations-plugin_2.11.1-1.0.2.jar",
        "org/scala-lang/plugins/scala-continuations-plugin_2.11.1/1.0.2/scala-continuations-plugin_2.11.1-1.0.2.jar",
    ),
    (
        "scala-library-2.11.1.jar",
        "org/scala-lang/scala-library/2.11.1/scala-library-2.11.1.jar",
    ),
    (
        "scala-parser-combinators_2.11-1.0.1.jar",
        "org/scala-lang/scala-parser-combinators_2.11/1.0.1/scala-parser-combinators_2.11-1.0.1.jar",
    ),
    (
        "scala-reflect-2.11.1.jar",
        "org/scala-lang/scala-reflect/2.11.1/scala-reflect-2.11.1.jar",
    ),
    (
        "scala-swing_2.11-1.0.1.jar",
        "org/scala-lang/scala-swing_2.11/1.0.1/scala-swing_2.11-1.0.1.jar",
    ),
    (
        "scala-xml_2.11-1.0.2.jar",
        "org/scala-lang/scala-xml_2.11/1.0.2/scala-xml_2.11-1.0.2.jar",
    ),
];

/// Error building a dependency table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("dependency `{name}` is declared more than once")]
    DuplicateName { name: String },

    #[error("invalid source URL for `{name}`: {url}")]
    InvalidUrl {
        name: String,
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid dependency name `{name}`: must be a plain file name")]
    InvalidName { name: String },
}

/// One library to make available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencySpec {
    /// File name in the cache directory, also matched against the search path.
    name: String,

    /// Where to download the library from.
    source: Url,
}

impl DependencySpec {
    /// Create a new dependency spec.
    pub fn new(name: impl Into<String>, source: Url) -> Self {
        DependencySpec {
            name: name.into(),
            source,
        }
    }

    /// Get the dependency name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the download location.
    pub fn source(&self) -> &Url {
        &self.source
    }
}

/// An ordered, immutable list of dependencies with unique names.
#[derive(Debug, Clone, Default)]
pub struct DependencyTable {
    specs: Vec<DependencySpec>,
}

impl DependencyTable {
    /// Build a table, rejecting duplicate names.
    pub fn new(specs: Vec<DependencySpec>) -> Result<Self, TableError> {
        let mut seen = HashSet::with_capacity(specs.len());
        for spec in &specs {
            validate_name(spec.name())?;
            if !seen.insert(spec.name()) {
                return Err(TableError::DuplicateName {
                    name: spec.name().to_string(),
                });
            }
        }
        Ok(DependencyTable { specs })
    }

    /// Build a table from (name, url) string pairs.
    pub fn from_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, TableError> {
        let specs = pairs
            .into_iter()
            .map(|(name, url)| {
                let source = Url::parse(url).map_err(|source| TableError::InvalidUrl {
                    name: name.to_string(),
                    url: url.to_string(),
                    source,
                })?;
                Ok(DependencySpec::new(name, source))
            })
            .collect::<Result<Vec<_>, TableError>>()?;

        Self::new(specs)
    }

    /// The builtin Scala 2.11 runtime libraries.
    pub fn builtin() -> Result<Self, TableError> {
        let urls: Vec<(&str, String)> = SCALA_LIBRARIES
            .iter()
            .map(|(name, path)| (*name, format!("{}{}", MAVEN_MIRROR, path)))
            .collect();

        Self::from_pairs(urls.iter().map(|(name, url)| (*name, url.as_str())))
    }

    /// Iterate over the dependencies in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, DependencySpec> {
        self.specs.iter()
    }

    /// Get the dependencies as a slice.
    pub fn specs(&self) -> &[DependencySpec] {
        &self.specs
    }

    /// Number of dependencies.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl<'a> IntoIterator for &'a DependencyTable {
    type Item = &'a DependencySpec;
    type IntoIter = std::slice::Iter<'a, DependencySpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.specs.iter()
    }
}

/// Names become file names under the cache directory, so no separators.
fn validate_name(name: &str) -> Result<(), TableError> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\');

    if bad {
        return Err(TableError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}
