// Cat Catalog - the fixed collection of cats plus the Birth-Date Index
//
// Both collections are built once at startup and never mutated.
// Handlers only see the CatRepository trait, so tests can swap in fixture data.

use crate::models::{BirthDateEntry, Cat};
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

// ============================================================================
// REPOSITORY TRAIT
// ============================================================================

/// Read-only access to cats and their birth dates
pub trait CatRepository: Send + Sync {
    /// Every cat, in catalog order
    fn all(&self) -> &[Cat];

    /// Birth date of a cat (first matching entry)
    fn birth_date_of(&self, cat_id: i64) -> Option<NaiveDate>;

    /// First cat with this id
    fn find_by_id(&self, id: i64) -> Option<&Cat> {
        self.all().iter().find(|cat| cat.id == id)
    }

    /// Cats matching a predicate, in catalog order
    fn find_by_predicate(&self, predicate: &dyn Fn(&Cat) -> bool) -> Vec<&Cat> {
        self.all().iter().filter(|cat| predicate(cat)).collect()
    }
}

// ============================================================================
// IN-MEMORY CATALOG
// ============================================================================

/// Dataset file layout
#[derive(Debug, Deserialize)]
struct Dataset {
    cats: Vec<Cat>,
    #[serde(default)]
    birth_dates: Vec<BirthDateEntry>,
}

/// Catalog held entirely in memory
#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    cats: Vec<Cat>,
    birth_dates: Vec<BirthDateEntry>,
}

impl InMemoryCatalog {
    /// Create catalog with the built-in cats
    pub fn new() -> Self {
        let mut catalog = InMemoryCatalog {
            cats: Vec::new(),
            birth_dates: Vec::new(),
        };

        catalog.register_default_cats();
        catalog
    }

    /// Build a catalog from explicit data
    ///
    /// Rejects duplicate cat ids and birth dates for unknown cats.
    /// Duplicate birth-date ids are allowed (lookups use the first one).
    pub fn from_parts(cats: Vec<Cat>, birth_dates: Vec<BirthDateEntry>) -> Result<Self> {
        let mut ids = HashSet::new();
        for cat in &cats {
            if !ids.insert(cat.id) {
                bail!("duplicate cat id {}", cat.id);
            }
        }

        if let Some(orphan) = birth_dates.iter().find(|entry| !ids.contains(&entry.cat_id)) {
            bail!("birth date references unknown cat id {}", orphan.cat_id);
        }

        Ok(InMemoryCatalog { cats, birth_dates })
    }

    /// Parse a JSON dataset: `{"cats": [...], "birth_dates": [...]}`
    pub fn from_json(json: &str) -> Result<Self> {
        let dataset: Dataset = serde_json::from_str(json).context("invalid cat dataset JSON")?;
        Self::from_parts(dataset.cats, dataset.birth_dates)
    }

    /// Load a JSON dataset from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read dataset {}", path.display()))?;

        Self::from_json(&json).with_context(|| format!("failed to load dataset {}", path.display()))
    }

    /// Dataset file when given, built-in cats otherwise
    pub fn load(data_file: Option<&Path>) -> Result<Self> {
        match data_file {
            Some(path) => Self::from_file(path),
            None => Ok(Self::new()),
        }
    }

    pub fn birth_dates(&self) -> &[BirthDateEntry] {
        &self.birth_dates
    }

    pub fn count(&self) -> usize {
        self.cats.len()
    }

    /// Built-in cats: 20 records, 18 with birth dates (19 and 20 have none)
    fn register_default_cats(&mut self) {
        const CATS: &[(i64, &str, &str, u32)] = &[
            (1, "Mia", "Siamês", 3),
            (2, "Felix", "Persa", 4),
            (3, "Tom", "Maine Coon", 5),
            (4, "Garfield", "Exótico", 6),
            (5, "Salem", "Bombay", 7),
            (6, "Luna", "Ragdoll", 1),
            (7, "Simba", "Bengal", 5),
            (8, "Oliver", "British Shorthair", 6),
            (9, "Nala", "Siberiano", 6),
            (10, "Chloe", "Sphynx", 1),
            (11, "Bella", "Scottish Fold", 3),
            (12, "Loki", "Abyssinian", 4),
            (13, "Oscar", "Birman", 7),
            (14, "Tiger", "Savannah", 3),
            (15, "Misty", "Norwegian Forest", 6),
            (16, "Shadow", "Chartreux", 4),
            (17, "Ginger", "Russian Blue", 5),
            (18, "Smokey", "American Shorthair", 6),
            (19, "Toby", "Devon Rex", 4),
            (20, "Kitty", "Manx", 5),
        ];

        const BIRTH_DATES: &[(i64, i32, u32, u32)] = &[
            (1, 2021, 5, 1),
            (2, 2020, 4, 15),
            (3, 2019, 3, 20),
            (4, 2018, 2, 10),
            (5, 2017, 1, 5),
            (6, 2022, 6, 25),
            (7, 2019, 3, 18),
            (8, 2018, 2, 9),
            (9, 2018, 2, 11),
            (10, 2022, 7, 3),
            (11, 2021, 5, 28),
            (12, 2020, 4, 13),
            (13, 2017, 1, 7),
            (14, 2021, 5, 2),
            (15, 2018, 2, 9),
            (16, 2020, 4, 14),
            (17, 2019, 3, 19),
            (18, 2018, 2, 9),
        ];

        self.cats = CATS
            .iter()
            .map(|&(id, name, breed, age)| Cat::new(id, name, breed, age))
            .collect();

        self.birth_dates = BIRTH_DATES
            .iter()
            .filter_map(|&(id, year, month, day)| {
                NaiveDate::from_ymd_opt(year, month, day).map(|date| BirthDateEntry::new(id, date))
            })
            .collect();
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl CatRepository for InMemoryCatalog {
    fn all(&self) -> &[Cat] {
        &self.cats
    }

    fn birth_date_of(&self, cat_id: i64) -> Option<NaiveDate> {
        self.birth_dates
            .iter()
            .find(|entry| entry.cat_id == cat_id)
            .map(|entry| entry.birth_date)
    }
}

// ============================================================================
// TESTS
// ============================================================================
