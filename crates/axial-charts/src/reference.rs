//! Sex-specific reference percentile tables.
//!
//! A table is a CSV file whose first column is `Age` (years, 365.25-day
//! convention) and whose remaining columns are percentile labels holding
//! axial lengths in millimetres. Rows must already be in strictly ascending
//! age order; the loader rejects anything else and nothing here re-sorts.

use axial_common::{AxialError, Result, Sex};
use axial_config::ReferenceConfig;
use once_cell::sync::OnceCell;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

const BUILTIN_MALES: &str = include_str!("../data/males.csv");
const BUILTIN_FEMALES: &str = include_str!("../data/females.csv");

static BUILTIN: OnceCell<Arc<ReferenceSet>> = OnceCell::new();

/// One age row of a reference table.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceRow {
    /// Age in years.
    pub age: f64,
    /// Axial length per percentile column, in column order.
    pub values: Vec<f64>,
}

/// One percentile trajectory extracted from a table.
#[derive(Debug, Clone, PartialEq)]
pub struct PercentileCurve {
    /// Column label as written in the table header, e.g. `50`.
    pub label: String,
    /// `(age, axial length)` points in ascending age order.
    pub points: Vec<(f64, f64)>,
}

impl PercentileCurve {
    /// Legend text, e.g. `50th Percentile`.
    pub fn legend_label(&self) -> String {
        format!("{} Percentile", ordinal(&self.label))
    }
}

/// Ordered rows keyed by age with one column per percentile.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTable {
    sex: Sex,
    percentiles: Vec<String>,
    rows: Vec<ReferenceRow>,
}

impl ReferenceTable {
    /// Parses a table from CSV.
    pub fn from_reader<R: Read>(sex: Sex, reader: R) -> Result<Self> {
        let mut csv = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv.headers()?.clone();
        let mut columns = headers.iter();
        match columns.next() {
            Some(first) if first.eq_ignore_ascii_case("age") => {}
            other => {
                return Err(AxialError::reference(format!(
                    "{sex} table must start with an 'Age' column, found {:?}",
                    other.unwrap_or("")
                )))
            }
        }
        let percentiles: Vec<String> = columns.map(str::to_string).collect();
        if percentiles.is_empty() {
            return Err(AxialError::reference(format!(
                "{sex} table has no percentile columns"
            )));
        }

        let mut rows: Vec<ReferenceRow> = Vec::new();
        for (index, record) in csv.records().enumerate() {
            let record = record?;
            // Header is line 1.
            let line = index + 2;
            let mut fields = record.iter().map(|field| {
                field
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| {
                        AxialError::reference(format!(
                            "{sex} table line {line}: '{field}' is not a number"
                        ))
                    })
            });

            let age = fields
                .next()
                .ok_or_else(|| AxialError::reference(format!("{sex} table line {line} is empty")))??;
            let values = fields.collect::<Result<Vec<f64>>>()?;

            if let Some(previous) = rows.last() {
                if age <= previous.age {
                    return Err(AxialError::reference(format!(
                        "{sex} table line {line}: age {age} does not follow {}; rows must be in ascending age order",
                        previous.age
                    )));
                }
            }

            rows.push(ReferenceRow { age, values });
        }

        if rows.is_empty() {
            return Err(AxialError::reference(format!("{sex} table has no rows")));
        }

        debug!(%sex, rows = rows.len(), percentiles = percentiles.len(), "Parsed reference table");
        Ok(Self {
            sex,
            percentiles,
            rows,
        })
    }

    /// Loads a table from a CSV file.
    pub fn from_path(sex: Sex, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            AxialError::reference_with_source(
                format!("Failed to open {sex} reference table '{}'", path.display()),
                e,
            )
        })?;
        let table = Self::from_reader(sex, file)?;
        info!(%sex, path = %path.display(), "Loaded reference table");
        Ok(table)
    }

    /// Which sex this table describes.
    pub const fn sex(&self) -> Sex {
        self.sex
    }

    /// Percentile column labels, excluding `Age`.
    pub fn percentiles(&self) -> &[String] {
        &self.percentiles
    }

    /// Rows in ascending age order.
    pub fn rows(&self) -> &[ReferenceRow] {
        &self.rows
    }

    /// One curve per percentile column, in column order.
    pub fn curves(&self) -> Vec<PercentileCurve> {
        self.percentiles
            .iter()
            .enumerate()
            .map(|(column, label)| PercentileCurve {
                label: label.clone(),
                points: self
                    .rows
                    .iter()
                    .map(|row| (row.age, row.values[column]))
                    .collect(),
            })
            .collect()
    }
}

/// The male and female tables, read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceSet {
    male: ReferenceTable,
    female: ReferenceTable,
}

impl ReferenceSet {
    /// Pairs two tables, checking each is filed under the right sex.
    pub fn new(male: ReferenceTable, female: ReferenceTable) -> Result<Self> {
        if male.sex() != Sex::Male || female.sex() != Sex::Female {
            return Err(AxialError::reference(
                "reference tables were swapped between sexes",
            ));
        }
        Ok(Self { male, female })
    }

    /// The tables shipped with the crate, parsed once per process.
    pub fn builtin() -> Result<Arc<Self>> {
        BUILTIN
            .get_or_try_init(|| {
                let set = Self::new(
                    ReferenceTable::from_reader(Sex::Male, BUILTIN_MALES.as_bytes())?,
                    ReferenceTable::from_reader(Sex::Female, BUILTIN_FEMALES.as_bytes())?,
                )?;
                info!("Initialized built-in reference tables");
                Ok(Arc::new(set))
            })
            .cloned()
    }

    /// Loads both tables from CSV files.
    pub fn from_paths(male: impl AsRef<Path>, female: impl AsRef<Path>) -> Result<Self> {
        Self::new(
            ReferenceTable::from_path(Sex::Male, male)?,
            ReferenceTable::from_path(Sex::Female, female)?,
        )
    }

    /// Uses configured files where given and built-in tables elsewhere.
    pub fn from_config(config: &ReferenceConfig) -> Result<Arc<Self>> {
        if config.male_table.is_none() && config.female_table.is_none() {
            return Self::builtin();
        }

        let builtin = Self::builtin()?;
        let male = match &config.male_table {
            Some(path) => ReferenceTable::from_path(Sex::Male, path)?,
            None => builtin.male.clone(),
        };
        let female = match &config.female_table {
            Some(path) => ReferenceTable::from_path(Sex::Female, path)?,
            None => builtin.female.clone(),
        };
        Ok(Arc::new(Self::new(male, female)?))
    }

    /// The table for a sex.
    pub const fn table(&self, sex: Sex) -> &ReferenceTable {
        match sex {
            Sex::Male => &self.male,
            Sex::Female => &self.female,
        }
    }

    /// The table for free-text sex input, case-insensitive.
    ///
    /// Anything other than male or female yields the "Invalid sex entered."
    /// validation error.
    pub fn reference_for(&self, sex: &str) -> Result<&ReferenceTable> {
        Ok(self.table(sex.parse()?))
    }
}

/// `1` -> `1st`, `50` -> `50th`; non-numeric labels pass through.
fn ordinal(label: &str) -> String {
    let Ok(n) = label.parse::<u32>() else {
        return label.to_string();
    };
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}
