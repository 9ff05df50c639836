use super::ManifestFormat;
use crate::domain::DependencyId;
use crate::error::{Result, UpdateError};
use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use toml_edit::{DocumentMut, InlineTable, Item, Table, Value};

/// `lakefile.toml`, Lake's declarative manifest
///
/// Edited with `toml_edit` so comments, ordering and formatting of every
/// other entry survive the rewrite.
pub struct LakefileToml;

impl ManifestFormat for LakefileToml {
    fn file_name(&self) -> &'static str {
        "lakefile.toml"
    }

    fn pin_dependency(&self, path: &Path, dependency: &DependencyId, rev: &str) -> Result<()> {
        let mut file = OpenOptions::new().read(true).write(true).open(path)?;

        let mut content = String::new();
        file.read_to_string(&mut content)?;

        let updated = pin_in_document(&content, dependency, rev)?;

        // Truncate first so a shorter document leaves no trailing bytes.
        file.set_len(0)?;
        file.seek(SeekFrom::Start(0))?;
        file.write_all(updated.as_bytes())?;
        file.flush()?;

        Ok(())
    }
}

/// Set `rev` on the single `require` entry matching `dependency`.
///
/// Handles both `[[require]]` tables and an inline `require = [{ ... }]`
/// array. Zero or several matching entries is an error.
pub fn pin_in_document(content: &str, dependency: &DependencyId, rev: &str) -> Result<String> {
    let mut doc = content.parse::<DocumentMut>()?;

    let require = doc
        .get_mut("require")
        .ok_or_else(|| UpdateError::manifest("lakefile.toml has no `require` entries"))?;

    let matched = match require {
        Item::ArrayOfTables(tables) => pin_matching(
            tables.iter_mut(),
            table_key,
            dependency,
            rev,
            set_table_rev,
        ),
        Item::Value(Value::Array(entries)) => pin_matching(
            entries.iter_mut().filter_map(Value::as_inline_table_mut),
            inline_key,
            dependency,
            rev,
            set_inline_rev,
        ),
        _ => {
            return Err(UpdateError::manifest(
                "`require` in lakefile.toml is not a list of tables",
            ))
        }
    };

    match matched {
        1 => Ok(doc.to_string()),
        0 => Err(UpdateError::manifest(format!(
            "lakefile.toml does not require {}",
            dependency
        ))),
        n => Err(UpdateError::manifest(format!(
            "lakefile.toml requires {} {} times; refusing to guess which entry to pin",
            dependency, n
        ))),
    }
}

/// Pins the first matching entry and returns how many entries matched.
fn pin_matching<'a, T: 'a>(
    entries: impl Iterator<Item = &'a mut T>,
    key: fn(&T) -> (Option<&str>, Option<&str>),
    dependency: &DependencyId,
    rev: &str,
    set_rev: fn(&mut T, &str),
) -> usize {
    let mut matched = 0;
    for entry in entries {
        let (scope, name) = key(entry);
        if dependency.matches(scope, name) {
            matched += 1;
            if matched == 1 {
                set_rev(entry, rev);
            }
        }
    }
    matched
}

fn table_key(table: &Table) -> (Option<&str>, Option<&str>) {
    (
        table.get("scope").and_then(Item::as_str),
        table.get("name").and_then(Item::as_str),
    )
}

fn inline_key(table: &InlineTable) -> (Option<&str>, Option<&str>) {
    (
        table.get("scope").and_then(Value::as_str),
        table.get("name").and_then(Value::as_str),
    )
}

/// Replace a value, keeping its surrounding whitespace and comments
fn replace_string(value: &mut Value, rev: &str) {
    let decor = value.decor().clone();
    *value = Value::from(rev);
    *value.decor_mut() = decor;
}

fn set_table_rev(table: &mut Table, rev: &str) {
    if let Some(Item::Value(value)) = table.get_mut("rev") {
        replace_string(value, rev);
    } else {
        table.insert("rev", toml_edit::value(rev));
    }
}

fn set_inline_rev(table: &mut InlineTable, rev: &str) {
    if let Some(value) = table.get_mut("rev") {
        replace_string(value, rev);
    } else {
        table.insert("rev", Value::from(rev));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mathlib() -> DependencyId {
        DependencyId::new("leanprover-community", "mathlib")
    }

    #[test]
    fn test_pin_array_of_tables() {
        let input = r#"name = "MyProject"
defaultTargets = ["MyProject"]

[[require]]
name = "batteries"
scope = "leanprover-community"
rev = "main"

[[require]]
name = "mathlib"
scope = "leanprover-community"
rev = "v1.0"

[[lean_lib]]
name = "MyProject"
"#;
        let output = pin_in_document(input, &mathlib(), "v1.1").unwrap();
        assert_eq!(output, input.replace("rev = \"v1.0\"", "rev = \"v1.1\""));
    }

    #[test]
    fn test_pin_preserves_trailing_comment() {
        let input = "[[require]]\nname = \"mathlib\"\nscope = \"leanprover-community\"\nrev = \"v1.0\" # pinned\n";
        let output = pin_in_document(input, &mathlib(), "master").unwrap();
        assert_eq!(output, input.replace("v1.0", "master"));
    }

    #[test]
    fn test_pin_inserts_missing_rev() {
        let input = "[[require]]\nname = \"mathlib\"\nscope = \"leanprover-community\"\n";
        let output = pin_in_document(input, &mathlib(), "v2.0").unwrap();
        let doc = output.parse::<DocumentMut>().unwrap();
        assert_eq!(doc["require"][0]["rev"].as_str(), Some("v2.0"));
    }

    #[test]
    fn test_pin_inline_array() {
        let input = "require = [{ name = \"mathlib\", scope = \"leanprover-community\", rev = \"v1.0\" }]\n";
        let output = pin_in_document(input, &mathlib(), "v1.1").unwrap();
        assert_eq!(output, input.replace("v1.0", "v1.1"));
    }

    #[test]
    fn test_scope_must_match() {
        let input = "[[require]]\nname = \"mathlib\"\nscope = \"someone-else\"\nrev = \"v1.0\"\n";
        let err = pin_in_document(input, &mathlib(), "v1.1").unwrap_err();
        assert!(err.to_string().contains("does not require"));
    }

    #[test]
    fn test_duplicate_entries_rejected() {
        let entry = "[[require]]\nname = \"mathlib\"\nscope = \"leanprover-community\"\n";
        let input = format!("{entry}\n{entry}");
        let err = pin_in_document(&input, &mathlib(), "v1.1").unwrap_err();
        assert!(err.to_string().contains("2 times"));
    }

    #[test]
    fn test_missing_require() {
        let err = pin_in_document("name = \"x\"\n", &mathlib(), "v1.1").unwrap_err();
        assert!(matches!(err, UpdateError::Manifest(_)));
    }

    #[test]
    fn test_invalid_toml() {
        let err = pin_in_document("[[require]\n", &mathlib(), "v1.1").unwrap_err();
        assert!(matches!(err, UpdateError::Toml(_)));
    }
}
