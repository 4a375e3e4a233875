use super::REGENS_EXTENSION;
use crate::types::errors::{ModError, ModResult};
use regex::Regex;

/// The single regens file chosen for a regens type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegensMatch {
    pub file_name: String,
    /// Four digit version from `<anything>_<type>_<version>.edt`, if the
    /// name follows that convention.
    pub version: Option<String>,
}

/// Pick the one `.edt` file whose name contains `regens_type`.
///
/// Zero candidates is `NoRegensFile`, more than one is
/// `AmbiguousRegensFile`; there is no best-guess selection.
pub fn select_regens_file<'a, I>(file_names: I, regens_type: &str) -> ModResult<RegensMatch>
where
    I: IntoIterator<Item = &'a str>,
{
    let candidates: Vec<&str> = file_names
        .into_iter()
        .filter(|name| name.ends_with(REGENS_EXTENSION) && name.contains(regens_type))
        .collect();

    match candidates.as_slice() {
        [] => Err(ModError::NoRegensFile(regens_type.to_string())),
        [single] => Ok(RegensMatch {
            file_name: single.to_string(),
            version: extract_version(single, regens_type),
        }),
        _ => {
            log::warn!(
                "Regens type '{}' matches {} files: {}",
                regens_type,
                candidates.len(),
                candidates.join(", ")
            );
            Err(ModError::AmbiguousRegensFile(regens_type.to_string()))
        }
    }
}

/// Version token of a regens file named `<anything>_<regens_type>_<dddd>.edt`.
pub fn extract_version(file_name: &str, regens_type: &str) -> Option<String> {
    let pattern = format!(r"^.*_{}_(\d{{4}})\.edt$", regex::escape(regens_type));
    let re = Regex::new(&pattern).ok()?;
    re.captures(file_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
