use crate::core::GenResult;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Serializer;
use std::fs::File;
use std::path::Path;

/// One downloadable source in the flatpak-builder manifest.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SourceRecord {
    #[serde(rename = "type")]
    pub source_type: String,
    pub url: String,
    pub sha512: String,
    pub dest: String,
    #[serde(rename = "dest-filename")]
    pub dest_filename: String,
    #[serde(rename = "only-arches", skip_serializing_if = "Option::is_none")]
    pub only_arches: Option<Vec<String>>,
}

/// Sort records by destination filename and write them to `output` as
/// 4-space-indented JSON. An existing file is overwritten.
pub fn write_manifest(output: &Path, mut records: Vec<SourceRecord>) -> GenResult<()> {
    records.sort_by(|a, b| a.dest_filename.cmp(&b.dest_filename));

    let file = File::create(output)?;
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(file, formatter);
    records.serialize(&mut serializer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn record(filename: &str, arches: Option<Vec<String>>) -> SourceRecord {
        SourceRecord {
            source_type: "file".to_string(),
            url: format!("https://example.com/{}", filename),
            sha512: "616263".to_string(),
            dest: "nuget-sources".to_string(),
            dest_filename: filename.to_string(),
            only_arches: arches,
        }
    }

    #[test]
    fn test_manifest_is_sorted_by_dest_filename() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("sources.json");

        write_manifest(
            &output,
            vec![record("b.nupkg", None), record("a.nupkg", None)],
        )
        .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        let filenames: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|entry| entry["dest-filename"].as_str().unwrap())
            .collect();
        assert_eq!(filenames, ["a.nupkg", "b.nupkg"]);
    }

    #[test]
    fn test_manifest_is_byte_for_byte_idempotent() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("first.json");
        let second = temp.path().join("second.json");

        let records = vec![record("b.nupkg", None), record("a.nupkg", None)];
        let reversed: Vec<SourceRecord> = records.iter().rev().cloned().collect();

        write_manifest(&first, records).unwrap();
        write_manifest(&second, reversed).unwrap();

        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    }

    #[test]
    fn test_manifest_uses_four_space_indent() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("sources.json");

        write_manifest(&output, vec![record("a.nupkg", None)]).unwrap();

        let text = fs::read_to_string(&output).unwrap();
        assert!(text.contains("\n    {"));
        assert!(text.contains("\n        \"type\": \"file\""));
    }

    #[test]
    fn test_only_arches_omitted_when_none() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("sources.json");

        write_manifest(&output, vec![record("a.nupkg", None)]).unwrap();

        let text = fs::read_to_string(&output).unwrap();
        assert!(!text.contains("only-arches"));
    }

    #[test]
    fn test_only_arches_serialized_when_present() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("sources.json");

        write_manifest(
            &output,
            vec![record("a.nupkg", Some(vec!["x86_64".to_string()]))],
        )
        .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(json[0]["only-arches"], serde_json::json!(["x86_64"]));
    }

    #[test]
    fn test_overwrites_existing_file() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("sources.json");
        fs::write(&output, "stale contents").unwrap();

        write_manifest(&output, vec![]).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "[]");
    }
}
