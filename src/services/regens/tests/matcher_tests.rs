use super::*;
use crate::types::errors::ModError;

#[test]
fn test_selects_exact_type_and_version() {
    let names = ["db_fixed_pa_2024.edt", "db_random_pa_2024.edt"];
    let selected = select_regens_file(names, "fixed_pa").unwrap();

    assert_eq!(selected.file_name, "db_fixed_pa_2024.edt");
    assert_eq!(selected.version.as_deref(), Some("2024"));
}

#[test]
fn test_ignores_non_edt_files() {
    let names = ["readme_fixed_pa.txt", "db_fixed_pa_2300.edt", "fixed_pa.zip"];
    let selected = select_regens_file(names, "fixed_pa").unwrap();

    assert_eq!(selected.file_name, "db_fixed_pa_2300.edt");
    assert_eq!(selected.version.as_deref(), Some("2300"));
}

#[test]
fn test_two_candidates_are_ambiguous() {
    let names = ["db_random_pa_2024.edt", "old_random_pa_2023.edt"];
    match select_regens_file(names, "random_pa") {
        Err(ModError::AmbiguousRegensFile(kind)) => assert_eq!(kind, "random_pa"),
        other => panic!("Expected AmbiguousRegensFile, got {other:?}"),
    }
}

#[test]
fn test_shared_suffix_type_is_ambiguous() {
    let names = ["db_fixed_pa_2024.edt", "db_random_pa_2024.edt"];
    assert!(matches!(
        select_regens_file(names, "pa"),
        Err(ModError::AmbiguousRegensFile(_))
    ));
}

#[test]
fn test_no_candidate() {
    let names = ["db_fixed_pa_2024.edt", "notes.txt"];
    match select_regens_file(names, "random_pa") {
        Err(ModError::NoRegensFile(kind)) => assert_eq!(kind, "random_pa"),
        other => panic!("Expected NoRegensFile, got {other:?}"),
    }
}

#[test]
fn test_nonconforming_name_has_no_version() {
    let names = ["fixed_pa_regens.edt"];
    let selected = select_regens_file(names, "fixed_pa").unwrap();
    assert_eq!(selected.file_name, "fixed_pa_regens.edt");
    assert_eq!(selected.version, None);
}

#[test]
fn test_extract_version_rules() {
    assert_eq!(
        extract_version("db_fixed_pa_2024.edt", "fixed_pa").as_deref(),
        Some("2024")
    );
    // Wrong digit count
    assert_eq!(extract_version("db_fixed_pa_24.edt", "fixed_pa"), None);
    assert_eq!(extract_version("db_fixed_pa_20245.edt", "fixed_pa"), None);
    // Type must be delimited by underscores
    assert_eq!(extract_version("dbfixed_pa_2024.edt", "fixed_pa"), None);
    // Regex metacharacters in the type are taken literally
    assert_eq!(extract_version("db_a.b_2024.edt", "a.b").as_deref(), Some("2024"));
    assert_eq!(extract_version("db_axb_2024.edt", "a.b"), None);
}
