use std::{fs, path::Path};

use anyhow::{Context, Result};

use crate::core::{Contract, ContractSet};

/// Loads contract definitions handed over by the host.
pub fn load_contracts(path: &Path) -> Result<Vec<Contract>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read contracts file: {:?}", path))?;
    let set: ContractSet = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse contracts file: {:?}", path))?;
    Ok(set.contracts)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_contracts() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("contracts.json");
        fs::write(
            &path,
            r#"{"contracts": [{"name": "bot.Greetings", "file": "greetings"}]}"#,
        )
        .unwrap();

        let contracts = load_contracts(&path).unwrap();
        assert_eq!(contracts.len(), 1);
        assert_eq!(contracts[0].name, "bot.Greetings");
        assert_eq!(contracts[0].file.as_deref(), Some("greetings"));
        assert!(contracts[0].methods.is_empty());
    }

    #[test]
    fn test_load_contracts_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_contracts(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read contracts file"));
    }

    #[test]
    fn test_load_contracts_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("contracts.json");
        fs::write(&path, "{").unwrap();
        let err = load_contracts(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse contracts file"));
    }
}
