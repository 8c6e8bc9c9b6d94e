use anyhow::{anyhow, bail, Context, Result};
use cat_catalog::config::has_flag;
use cat_catalog::{
    get_cat_by_id, init_tracing, list_cats_without_birth_date, list_oldest_cats,
    search_cats_by_breed, search_cats_by_name, CatRepository, CatalogError, CatalogResult,
    InMemoryCatalog,
};
use serde::Serialize;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "cat-catalog\n\nUSAGE:\n  cat-catalog [--data-file PATH] <COMMAND>\n\nCOMMANDS:\n  get <id>               Cat with its birth date\n  without-birth-date     Cats with no birth date\n  oldest                 Oldest cats\n  search-name <name>     Cats with this name (case-insensitive)\n  search-breed <breed>   Cats of this breed (case-insensitive)\n";

/// Result of one command
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    /// Pretty JSON for stdout
    Printed(String),
    /// Classified query failure for stderr
    Failed(String),
}

fn main() -> Result<ExitCode> {
    let args: Vec<String> = env::args().skip(1).collect();

    if has_flag(&args, "--help") || has_flag(&args, "-h") {
        print!("{}", USAGE);
        return Ok(ExitCode::SUCCESS);
    }

    let (data_file, command) = split_args(&args)?;
    if command.is_empty() {
        print!("{}", USAGE);
        return Ok(ExitCode::SUCCESS);
    }

    init_tracing();

    let catalog = InMemoryCatalog::load(data_file.as_deref())?;
    tracing::debug!(cats = catalog.count(), "catalog loaded");

    match run(&command, &catalog)? {
        Outcome::Printed(json) => {
            println!("{}", json);
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Failed(message) => {
            eprintln!("{}", message);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Pull `--data-file PATH` out of the arguments, wherever it appears
fn split_args(args: &[String]) -> Result<(Option<PathBuf>, Vec<String>)> {
    let mut data_file = None;
    let mut command = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--data-file" {
            let path = iter
                .next()
                .filter(|value| !value.starts_with("--"))
                .ok_or_else(|| anyhow!("--data-file requires a value"))?;
            data_file = Some(PathBuf::from(path));
        } else {
            command.push(arg.clone());
        }
    }

    Ok((data_file, command))
}

/// Dispatch a command (without program name or flags) against a repository
fn run(command: &[String], repo: &dyn CatRepository) -> Result<Outcome> {
    let name = command.first().ok_or_else(|| anyhow!("missing command\n\n{}", USAGE))?;

    match name.as_str() {
        "get" => {
            let id = required_arg(command)?;
            let id: i64 = id.parse().with_context(|| format!("'{}' is not a valid cat id", id))?;
            outcome(get_cat_by_id(repo, id))
        }
        "without-birth-date" => outcome(Ok(list_cats_without_birth_date(repo))),
        "oldest" => outcome(list_oldest_cats(repo)),
        "search-name" => outcome(search_cats_by_name(repo, required_arg(command)?)),
        "search-breed" => outcome(search_cats_by_breed(repo, required_arg(command)?)),
        other => bail!("unknown command '{}'\n\n{}", other, USAGE),
    }
}

/// Positional argument following the command
fn required_arg(command: &[String]) -> Result<&str> {
    match command.get(1) {
        Some(value) => Ok(value.as_str()),
        None => bail!("{} requires an argument", command[0]),
    }
}

fn outcome<T: Serialize>(result: CatalogResult<T>) -> Result<Outcome> {
    match result {
        Ok(value) => {
            let json = serde_json::to_string_pretty(&value).context("failed to encode result")?;
            Ok(Outcome::Printed(json))
        }
        Err(CatalogError::Internal(detail)) => {
            tracing::error!(detail = %detail, "query failed");
            Ok(Outcome::Failed(cat_catalog::INTERNAL_ERROR_MESSAGE.to_string()))
        }
        Err(err) => Ok(Outcome::Failed(format!("{} ({})", err.public_message(), err.http_status()))),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn run_on_defaults(list: &[&str]) -> Result<Outcome> {
        run(&args(list), &InMemoryCatalog::new())
    }

    fn printed_json(outcome: Outcome) -> Value {
        match outcome {
            Outcome::Printed(json) => serde_json::from_str(&json).unwrap(),
            Outcome::Failed(message) => panic!("expected success, got: {}", message),
        }
    }

    #[test]
    fn test_get_prints_cat() {
        let outcome = run_on_defaults(&["get", "1"]).unwrap();

        let cat = printed_json(outcome);
        assert_eq!(cat["nome"], "Mia");
        assert_eq!(cat["data_nascimento"], "2021-05-01");
    }

    #[test]
    fn test_get_output_is_pretty() {
        match run_on_defaults(&["get", "1"]).unwrap() {
            Outcome::Printed(json) => assert!(json.contains('\n')),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_get_without_birth_date_fails() {
        let outcome = run_on_defaults(&["get", "19"]).unwrap();

        assert_eq!(
            outcome,
            Outcome::Failed("Data de nascimento não encontrada para o gato (422)".to_string())
        );
    }

    #[test]
    fn test_get_unknown_cat_fails() {
        let outcome = run_on_defaults(&["get", "999"]).unwrap();
        assert_eq!(outcome, Outcome::Failed("O gato não foi encontrado (404)".to_string()));
    }

    #[test]
    fn test_get_invalid_id() {
        let err = run_on_defaults(&["get", "abc"]).unwrap_err();
        assert!(err.to_string().contains("'abc' is not a valid cat id"));
    }

    #[test]
    fn test_search_name() {
        let found = printed_json(run_on_defaults(&["search-name", "MIA"]).unwrap());

        assert_eq!(found["gatos_encontrados"][0]["id"], 1);
        assert_eq!(found["gatos_encontrados"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_search_breed() {
        let found = printed_json(run_on_defaults(&["search-breed", "siamês"]).unwrap());
        assert_eq!(found["gatos_encontrados"][0]["raca"], "Siamês");
    }

    #[test]
    fn test_without_birth_date_and_oldest() {
        let missing = printed_json(run_on_defaults(&["without-birth-date"]).unwrap());
        assert_eq!(missing.as_array().unwrap().len(), 2);

        let oldest = printed_json(run_on_defaults(&["oldest"]).unwrap());
        assert_eq!(oldest[0]["nome"], "Salem");
        assert_eq!(oldest[1]["nome"], "Oscar");
    }

    #[test]
    fn test_oldest_on_empty_catalog_hides_detail() {
        let catalog = InMemoryCatalog::from_parts(vec![], vec![]).unwrap();
        let outcome = run(&args(&["oldest"]), &catalog).unwrap();

        assert_eq!(outcome, Outcome::Failed(cat_catalog::INTERNAL_ERROR_MESSAGE.to_string()));
    }

    #[test]
    fn test_unknown_command() {
        let err = run_on_defaults(&["adopt"]).unwrap_err();
        assert!(err.to_string().contains("unknown command 'adopt'"));
    }

    #[test]
    fn test_missing_argument() {
        let err = run_on_defaults(&["search-name"]).unwrap_err();
        assert!(err.to_string().contains("search-name requires an argument"));

        assert!(run_on_defaults(&["get"]).is_err());
    }

    #[test]
    fn test_data_file_before_command() {
        let (data_file, command) = split_args(&args(&["--data-file", "/tmp/cats.json", "get", "1"])).unwrap();

        assert_eq!(data_file, Some(PathBuf::from("/tmp/cats.json")));
        assert_eq!(command, args(&["get", "1"]));
    }

    #[test]
    fn test_data_file_between_command_and_argument() {
        let (data_file, command) =
            split_args(&args(&["search-name", "--data-file", "/tmp/cats.json", "Mia"])).unwrap();

        assert_eq!(data_file, Some(PathBuf::from("/tmp/cats.json")));
        assert_eq!(command, args(&["search-name", "Mia"]));
    }

    #[test]
    fn test_data_file_requires_value() {
        let err = split_args(&args(&["oldest", "--data-file"])).unwrap_err();
        assert!(err.to_string().contains("--data-file requires a value"));
    }

    #[test]
    fn test_no_data_file() {
        let (data_file, command) = split_args(&args(&["oldest"])).unwrap();

        assert_eq!(data_file, None);
        assert_eq!(command, args(&["oldest"]));
    }
}
