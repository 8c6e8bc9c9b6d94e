// Cat Queries - the five read operations behind the API
//
// Each query scans the catalog, joins against the Birth-Date Index,
// and classifies failures as NotFound / UnprocessableEntity / Internal.
// All of them are pure reads: the same repository always gives the same answer.

use crate::catalog::CatRepository;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{Cat, CatDetail, CatSummary, SearchResults};

// ============================================================================
// MESSAGES
// ============================================================================

pub const CAT_NOT_FOUND: &str = "O gato não foi encontrado";
pub const CAT_MISSING_BIRTH_DATE: &str = "Data de nascimento não encontrada para o gato";
pub const OLDEST_MISSING_BIRTH_DATE: &str = "Os gatos não possuem data de nascimento";

/// Field a search matches on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Name,
    Breed,
}

impl SearchField {
    fn value<'a>(&self, cat: &'a Cat) -> &'a str {
        match self {
            SearchField::Name => &cat.name,
            SearchField::Breed => &cat.breed,
        }
    }

    pub fn missing_birth_date_message(&self) -> &'static str {
        match self {
            SearchField::Name => "Data de nascimento não encontrada para o gato com esse nome",
            SearchField::Breed => "Data de nascimento não encontrada para o gato com essa raça",
        }
    }

    pub fn not_found_message(&self) -> &'static str {
        match self {
            SearchField::Name => "Nenhum gato com esse nome foi encontrado",
            SearchField::Breed => "Nenhum gato dessa raça foi encontrado",
        }
    }
}

// ============================================================================
// QUERIES
// ============================================================================

/// Merge a cat with its birth date, or fail with the given message
fn detail_of(repo: &dyn CatRepository, cat: &Cat, missing_message: &str) -> CatalogResult<CatDetail> {
    repo.birth_date_of(cat.id)
        .map(|birth_date| cat.with_birth_date(birth_date))
        .ok_or_else(|| CatalogError::unprocessable(missing_message))
}

/// One cat with its birth date
///
/// NotFound when no cat has this id, UnprocessableEntity when it has no birth date.
pub fn get_cat_by_id(repo: &dyn CatRepository, id: i64) -> CatalogResult<CatDetail> {
    let cat = repo
        .find_by_id(id)
        .ok_or_else(|| CatalogError::not_found(CAT_NOT_FOUND))?;

    detail_of(repo, cat, CAT_MISSING_BIRTH_DATE)
}

/// Cats with no birth date, without age
///
/// An empty list is a valid answer.
pub fn list_cats_without_birth_date(repo: &dyn CatRepository) -> Vec<CatSummary> {
    repo.find_by_predicate(&|cat: &Cat| repo.birth_date_of(cat.id).is_none())
        .into_iter()
        .map(Cat::summary)
        .collect()
}

/// Every cat sharing the maximum age, in catalog order
///
/// All-or-nothing: if any of them has no birth date the whole call fails.
pub fn list_oldest_cats(repo: &dyn CatRepository) -> CatalogResult<Vec<CatDetail>> {
    let max_age = repo
        .all()
        .iter()
        .map(|cat| cat.age)
        .max()
        .ok_or_else(|| CatalogError::internal("cannot compute oldest cats of an empty catalog"))?;

    repo.find_by_predicate(&|cat: &Cat| cat.age == max_age)
        .into_iter()
        .map(|cat| detail_of(repo, cat, OLDEST_MISSING_BIRTH_DATE))
        .collect()
}

/// Cats whose field equals the term, ignoring case
///
/// Exact match after lowercasing, not substring.
pub fn search_cats(repo: &dyn CatRepository, field: SearchField, term: &str) -> CatalogResult<SearchResults> {
    let term = term.to_lowercase();

    let found = repo
        .find_by_predicate(&|cat: &Cat| field.value(cat).to_lowercase() == term)
        .into_iter()
        .map(|cat| detail_of(repo, cat, field.missing_birth_date_message()))
        .collect::<CatalogResult<Vec<CatDetail>>>()?;

    if found.is_empty() {
        return Err(CatalogError::not_found(field.not_found_message()));
    }

    Ok(SearchResults { found })
}

pub fn search_cats_by_name(repo: &dyn CatRepository, name: &str) -> CatalogResult<SearchResults> {
    search_cats(repo, SearchField::Name, name)
}

pub fn search_cats_by_breed(repo: &dyn CatRepository, breed: &str) -> CatalogResult<SearchResults> {
    search_cats(repo, SearchField::Breed, breed)
}

// ============================================================================
// TESTS
// ============================================================================
