use bacprop_core::encoding::reader::Reader;
use bacprop_core::types::{ObjectType, PropertyId};
use bacprop_core::{ConstructedData, PropertyArgs};
use std::fs;
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .canonicalize()
        .expect("workspace root should be resolvable")
}

/// Bytes and `# key: value` header lines of one fixture.
struct Fixture {
    bytes: Vec<u8>,
    headers: Vec<(String, String)>,
}

impl Fixture {
    fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn number(&self, key: &str, path: &Path) -> Option<u64> {
        self.header(key).map(|v| {
            v.parse()
                .unwrap_or_else(|_| panic!("header '{key}' in {} must be a number", path.display()))
        })
    }

    fn args(&self, path: &Path) -> PropertyArgs {
        let object_type = self
            .number("object-type", path)
            .unwrap_or_else(|| panic!("{} has no object-type header", path.display()));
        let property = self
            .number("property", path)
            .unwrap_or_else(|| panic!("{} has no property header", path.display()));
        let args = PropertyArgs::new(
            ObjectType::from_u16(object_type as u16),
            PropertyId::from_u32(property as u32),
        )
        .with_array_index(self.number("array-index", path));
        match self.number("tag", path) {
            Some(tag) => args.with_tag_number(tag as u8),
            None => args,
        }
    }
}

fn parse_hex_fixture(path: &Path) -> Fixture {
    let content = fs::read_to_string(path).expect("fixture must be readable");
    let mut bytes = Vec::new();
    let mut headers = Vec::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(comment) = trimmed.strip_prefix('#') {
            if let Some((key, value)) = comment.split_once(':') {
                headers.push((key.trim().to_string(), value.trim().to_string()));
            }
            continue;
        }
        for token in trimmed.split_whitespace() {
            let byte = u8::from_str_radix(token, 16)
                .unwrap_or_else(|_| panic!("invalid hex token '{token}' in {}", path.display()));
            bytes.push(byte);
        }
    }
    Fixture { bytes, headers }
}

#[test]
fn golden_corpus_fixtures_round_trip() {
    let fixture_dir = workspace_root().join("fixtures/golden");
    let mut fixture_files = fs::read_dir(&fixture_dir)
        .expect("fixtures directory should exist")
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "hex"))
        .collect::<Vec<_>>();
    fixture_files.sort();
    assert!(
        !fixture_files.is_empty(),
        "expected at least one corpus fixture in {}",
        fixture_dir.display()
    );

    for fixture_path in fixture_files {
        let fixture = parse_hex_fixture(&fixture_path);
        assert!(
            !fixture.bytes.is_empty(),
            "fixture {} must contain at least one byte",
            fixture_path.display()
        );

        let args = fixture.args(&fixture_path);
        let mut r = Reader::new(&fixture.bytes);
        let data = ConstructedData::decode(&mut r, args).unwrap_or_else(|e| {
            panic!("fixture {} failed to decode: {e}", fixture_path.display())
        });
        assert!(
            r.is_empty(),
            "fixture {} has {} trailing bytes",
            fixture_path.display(),
            r.remaining()
        );

        assert_eq!(
            data.codec().map(|c| c.type_name),
            fixture.header("codec"),
            "fixture {} dispatched to the wrong codec",
            fixture_path.display()
        );

        assert_eq!(data.encoded_len(), fixture.bytes.len());
        let encoded = data
            .to_vec()
            .unwrap_or_else(|e| panic!("fixture {} failed to encode: {e}", fixture_path.display()));
        assert_eq!(
            encoded,
            fixture.bytes,
            "fixture {} did not round-trip",
            fixture_path.display()
        );
    }
}
