//! Phenotype derivations.
//!
//! Each supported phenotype implements [`PhenotypeSpec`]: it names the fields
//! it needs and turns the retrieved participant table into analysis-ready
//! rows. Specs are registered in a [`PhenotypeRegistry`] and looked up by
//! name; adding a phenotype means adding a spec, not editing a dispatch chain.
//!
//! # Supported Phenotypes
//!
//! | Name | Description | Output columns |
//! |------|-------------|----------------|
//! | ldl | LDL cholesterol with statin adjustment | s, LDL, cholesterol_med, LDL_adj |

mod ldl;

pub use ldl::{LDL_ADJUSTED_COLUMN, LDL_COLUMN, LdlConfig, LdlPhenotype, MEDICATION_COLUMN};

use std::collections::BTreeMap;
use std::sync::OnceLock;

use polars::prelude::DataFrame;
use serde::Serialize;

use cohort_ingest::{DataSource, retrieve_fields};
use cohort_model::{ExclusionSet, FieldId, SOURCE_ID_COLUMN};

use crate::error::{Result, TransformError};
use crate::exclusion::apply_exclusions;

/// Trait for phenotype-specific derivation logic.
///
/// # Implementing a Phenotype
///
/// 1. Implement this trait for a struct holding the phenotype's configuration
/// 2. Register it in [`default_registry()`]
pub trait PhenotypeSpec: Send + Sync {
    /// Lowercase name used for lookup and default output file names.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Fields to retrieve from the participant table.
    fn fields(&self) -> Vec<FieldId>;

    /// Derives cohort rows from the retrieved table (`eid` plus resolved columns).
    ///
    /// # Errors
    ///
    /// Returns an error when a required field or column is absent.
    fn transform(&self, raw: &DataFrame) -> Result<PhenotypeFrame>;
}

/// Derived phenotype table plus diagnostic counts.
#[derive(Debug, Clone)]
pub struct PhenotypeFrame {
    pub data: DataFrame,
    pub counts: Vec<ValueCount>,
}

/// Number of participants holding `value` in `column`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub column: String,
    pub value: String,
    pub count: usize,
}

/// Registry of phenotype specs indexed by name.
#[derive(Default)]
pub struct PhenotypeRegistry {
    specs: BTreeMap<&'static str, Box<dyn PhenotypeSpec>>,
}

impl PhenotypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a spec under its name, replacing any previous one.
    pub fn register(&mut self, spec: Box<dyn PhenotypeSpec>) {
        self.specs.insert(spec.name(), spec);
    }

    /// Looks up a spec by case-insensitive name.
    pub fn get(&self, name: &str) -> Result<&dyn PhenotypeSpec> {
        let key = name.trim().to_lowercase();
        self.specs
            .get(key.as_str())
            .map(|spec| spec.as_ref())
            .ok_or_else(|| TransformError::UnsupportedPhenotype {
                name: name.to_string(),
                supported: self.names().collect::<Vec<_>>().join(", "),
            })
    }

    /// Registered names in alphabetical order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.specs.keys().copied()
    }

    pub fn specs(&self) -> impl Iterator<Item = &dyn PhenotypeSpec> + '_ {
        self.specs.values().map(|spec| spec.as_ref())
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

static DEFAULT_REGISTRY: OnceLock<PhenotypeRegistry> = OnceLock::new();

/// Returns the registry of built-in phenotypes.
pub fn default_registry() -> &'static PhenotypeRegistry {
    DEFAULT_REGISTRY.get_or_init(|| {
        let mut registry = PhenotypeRegistry::new();
        registry.register(Box::new(LdlPhenotype::default()));
        registry
    })
}

/// Retrieves, filters, and derives the named phenotype.
///
/// The name is resolved before the source is touched, so an unsupported
/// phenotype fails without any retrieval.
pub fn extract_phenotype<S>(
    name: &str,
    source: &S,
    exclusions: Option<&ExclusionSet>,
) -> Result<PhenotypeFrame>
where
    S: DataSource + ?Sized,
{
    let spec = default_registry().get(name)?;
    extract_with_spec(spec, source, exclusions)
}

/// Retrieves the spec's fields, removes excluded samples, and derives rows.
pub fn extract_with_spec<S>(
    spec: &dyn PhenotypeSpec,
    source: &S,
    exclusions: Option<&ExclusionSet>,
) -> Result<PhenotypeFrame>
where
    S: DataSource + ?Sized,
{
    let raw = retrieve_fields(&spec.fields(), source)?;
    let raw = match exclusions {
        Some(set) => apply_exclusions(&raw, set, SOURCE_ID_COLUMN)?,
        None => raw,
    };
    spec.transform(&raw)
}
