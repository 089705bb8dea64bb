//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading country
//! statutory configuration from YAML files into an in-memory reference
//! repository.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::calculation::{sorted_schedule, validate_schedule};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    CountryTaxSettings, RateBand, StatutoryDeductionType, TaxReliefRule, TaxReliefScheme,
};
use crate::repository::InMemoryReferenceRepository;

use super::types::{CountryConfigFile, ReliefEntry, StatutoryTypeEntry};

/// Loads country statutory configuration from a directory of YAML files.
///
/// # Directory Structure
///
/// One file per country, named freely (`jm.yaml`, `tt.yaml`, ...):
/// ```text
/// config/countries/
/// ├── jm.yaml   # settings, statutory types + bands, relief rules/schemes
/// └── tt.yaml
/// ```
///
/// Every type's band schedule is validated on load; a malformed schedule
/// fails the load rather than surfacing later inside a payroll run.
///
/// # Example
///
/// ```no_run
/// use statutory_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/countries").unwrap();
/// let repository = loader.into_repository();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    repository: InMemoryReferenceRepository,
    countries: Vec<String>,
}

impl ConfigLoader {
    /// Loads all country configuration files from the given directory.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] when the directory (or a file
    ///   within it) cannot be read;
    /// - [`EngineError::ConfigParse`] when a file is not valid YAML for the
    ///   country schema;
    /// - [`EngineError::InvalidBandSchedule`] when a type's bands do not
    ///   form a contiguous progressive schedule.
    pub fn load<P: AsRef<Path>>(dir: P) -> EngineResult<Self> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir.display().to_string(),
        })?;

        let mut repository = InMemoryReferenceRepository::new();
        let mut countries = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| EngineError::ConfigParse {
                path: dir.display().to_string(),
                message: e.to_string(),
            })?;
            let path = entry.path();
            let is_yaml = path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml");
            if !is_yaml {
                continue;
            }

            let file = Self::load_yaml::<CountryConfigFile>(&path)?;
            countries.push(file.country_code.clone());
            Self::install(file, &mut repository)?;
        }

        countries.sort();
        Ok(Self {
            repository,
            countries,
        })
    }

    /// Loads and parses a single YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParse {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn install(
        file: CountryConfigFile,
        repository: &mut InMemoryReferenceRepository,
    ) -> EngineResult<()> {
        let country = file.country_code;

        for settings in file.settings {
            repository.add_country_tax_settings(CountryTaxSettings {
                country_code: country.clone(),
                method: settings.method,
                allow_mid_year_refunds: settings.allow_mid_year_refunds,
                pay_periods_per_year: settings.pay_periods_per_year,
                validity: settings.validity,
            });
        }

        for entry in file.statutory_types {
            let bands = Self::bands_for_type(&country, &entry)?;
            for band in bands {
                repository.add_rate_band(band);
            }
            repository.add_statutory_type(StatutoryDeductionType {
                code: entry.code,
                name: entry.name,
                country_code: country.clone(),
                kind: entry.kind,
                has_employee_portion: entry.has_employee_portion,
                has_employer_portion: entry.has_employer_portion,
                annual_cap_employee: entry.annual_cap_employee,
                annual_cap_employer: entry.annual_cap_employer,
                min_age: entry.min_age,
                max_age: entry.max_age,
                weekly_basis: entry.weekly_basis,
                validity: entry.validity,
            });
        }

        for entry in file.relief_rules {
            repository.add_relief_rule(rule_from_entry(&country, entry));
        }
        for entry in file.relief_schemes {
            repository.add_relief_scheme(scheme_from_entry(&country, entry));
        }

        Ok(())
    }

    /// Converts a type entry's bands, validating the schedule at every
    /// distinct effective start date.
    fn bands_for_type(
        country: &str,
        entry: &StatutoryTypeEntry,
    ) -> EngineResult<Vec<RateBand>> {
        let bands: Vec<RateBand> = entry
            .bands
            .iter()
            .map(|b| RateBand {
                type_code: entry.code.clone(),
                country_code: country.to_string(),
                lower: b.lower,
                upper: b.upper,
                employee_rate: b.employee_rate,
                employer_rate: b.employer_rate,
                flat_employee: b.flat_employee,
                flat_employer: b.flat_employer,
                validity: b.validity.unwrap_or(entry.validity),
            })
            .collect();

        if bands.is_empty() {
            return Ok(bands);
        }

        let start_dates: BTreeSet<_> = bands.iter().map(|b| b.validity.from).collect();
        for date in start_dates {
            let effective: Vec<RateBand> = bands
                .iter()
                .filter(|b| b.validity.contains(date))
                .cloned()
                .collect();
            let schedule = sorted_schedule(&effective);
            validate_schedule(&entry.code, &schedule)?;
        }

        Ok(bands)
    }

    /// The country codes loaded, sorted.
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    /// Borrows the loaded reference repository.
    pub fn repository(&self) -> &InMemoryReferenceRepository {
        &self.repository
    }

    /// Consumes the loader, returning the reference repository.
    pub fn into_repository(self) -> InMemoryReferenceRepository {
        self.repository
    }
}

fn rule_from_entry(country: &str, entry: ReliefEntry) -> TaxReliefRule {
    TaxReliefRule {
        id: entry.id,
        name: entry.name,
        country_code: country.to_string(),
        benefit: entry.benefit,
        scope: entry.scope,
        annual_cap: entry.annual_cap,
        validity: entry.validity,
    }
}

fn scheme_from_entry(country: &str, entry: ReliefEntry) -> TaxReliefScheme {
    TaxReliefScheme {
        id: entry.id,
        name: entry.name,
        country_code: country.to_string(),
        benefit: entry.benefit,
        scope: entry.scope,
        annual_cap: entry.annual_cap,
        validity: entry.validity,
    }
}
