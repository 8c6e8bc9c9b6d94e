// Cat Models - records, birth dates, and the shapes the API returns
//
// Field names on the wire are Portuguese (nome, raca, idade, data_nascimento),
// Rust names are English.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// STORED RECORDS
// ============================================================================

/// One entry of the cat catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cat {
    /// Stable identity - unique within a catalog
    pub id: i64,

    #[serde(rename = "nome")]
    pub name: String,

    #[serde(rename = "raca")]
    pub breed: String,

    /// Age in years
    #[serde(rename = "idade")]
    pub age: u32,
}

impl Cat {
    pub fn new(id: i64, name: &str, breed: &str, age: u32) -> Self {
        Cat {
            id,
            name: name.to_string(),
            breed: breed.to_string(),
            age,
        }
    }

    /// Merge this cat with its birth date
    pub fn with_birth_date(&self, birth_date: NaiveDate) -> CatDetail {
        CatDetail {
            id: self.id,
            name: self.name.clone(),
            breed: self.breed.clone(),
            age: self.age,
            birth_date,
        }
    }

    /// Projection without age or birth date
    pub fn summary(&self) -> CatSummary {
        CatSummary {
            id: self.id,
            name: self.name.clone(),
            breed: self.breed.clone(),
        }
    }
}

/// Birth date of one cat
///
/// Not every cat has one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthDateEntry {
    #[serde(rename = "id")]
    pub cat_id: i64,

    #[serde(rename = "data_nascimento")]
    pub birth_date: NaiveDate,
}

impl BirthDateEntry {
    pub fn new(cat_id: i64, birth_date: NaiveDate) -> Self {
        BirthDateEntry { cat_id, birth_date }
    }
}

// ============================================================================
// RESPONSE SHAPES
// ============================================================================

/// Cat merged with its birth date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatDetail {
    pub id: i64,

    #[serde(rename = "nome")]
    pub name: String,

    #[serde(rename = "raca")]
    pub breed: String,

    #[serde(rename = "idade")]
    pub age: u32,

    /// Serialized as ISO-8601 (YYYY-MM-DD)
    #[serde(rename = "data_nascimento")]
    pub birth_date: NaiveDate,
}

/// Cat listed without birth date context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatSummary {
    pub id: i64,

    #[serde(rename = "nome")]
    pub name: String,

    #[serde(rename = "raca")]
    pub breed: String,
}

/// Result of a name or breed search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(rename = "gatos_encontrados")]
    pub found: Vec<CatDetail>,
}

// ============================================================================
// REQUEST BODIES
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameQuery {
    #[serde(rename = "nome")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreedQuery {
    #[serde(rename = "raca")]
    pub breed: String,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_detail_wire_format() {
        let cat = Cat::new(5, "Salem", "Bombay", 7);
        let detail = cat.with_birth_date(date(2017, 1, 5));

        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 5,
                "nome": "Salem",
                "raca": "Bombay",
                "idade": 7,
                "data_nascimento": "2017-01-05"
            })
        );
    }

    #[test]
    fn test_summary_omits_age_and_birth_date() {
        let cat = Cat::new(19, "Toby", "Devon Rex", 4);
        let value = serde_json::to_value(cat.summary()).unwrap();

        assert_eq!(value, json!({"id": 19, "nome": "Toby", "raca": "Devon Rex"}));
    }

    #[test]
    fn test_search_results_key() {
        let results = SearchResults { found: vec![] };
        let value = serde_json::to_value(&results).unwrap();
        assert_eq!(value, json!({"gatos_encontrados": []}));
    }

    #[test]
    fn test_query_bodies_use_portuguese_keys() {
        let by_name: NameQuery = serde_json::from_value(json!({"nome": "Mia"})).unwrap();
        assert_eq!(by_name.name, "Mia");

        let by_breed: BreedQuery = serde_json::from_value(json!({"raca": "Persa"})).unwrap();
        assert_eq!(by_breed.breed, "Persa");

        assert!(serde_json::from_value::<NameQuery>(json!({"name": "Mia"})).is_err());
    }

    #[test]
    fn test_birth_date_entry_parses_iso_date() {
        let entry: BirthDateEntry =
            serde_json::from_value(json!({"id": 3, "data_nascimento": "2019-03-20"})).unwrap();
        assert_eq!(entry, BirthDateEntry::new(3, date(2019, 3, 20)));
    }
}
