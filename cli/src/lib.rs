//! File loading shared by the `arena` and `arena-sim` binaries.

use anyhow::Context;
use arena_engine::Roster;
use encoding_rs::Encoding;
use std::{fs, path::Path};

/// Read a text file, honouring a UTF-8 or UTF-16 byte order mark.
pub fn read_text_auto(path: &Path) -> anyhow::Result<String> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    decode_text(&bytes).with_context(|| format!("failed to decode {}", path.display()))
}

fn decode_text(bytes: &[u8]) -> anyhow::Result<String> {
    if let Some((enc, bom_len)) = Encoding::for_bom(bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes.to_vec())?)
    }
}

/// Load the roster from the given CSVs, falling back to the built-in table
/// for whichever is absent.
pub fn load_roster(warriors: Option<&Path>, items: Option<&Path>) -> anyhow::Result<Roster> {
    let warriors = match warriors {
        Some(p) => read_text_auto(p)?,
        None => arena_engine::content::builtin_warriors().to_string(),
    };
    let items = match items {
        Some(p) => read_text_auto(p)?,
        None => arena_engine::content::builtin_items().to_string(),
    };
    Ok(Roster::from_csv_str(&warriors, &items)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16le_with_bom(text: &str) -> Vec<u8> {
        let mut out = vec![0xFF, 0xFE];
        out.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
        out
    }

    #[test]
    fn decodes_utf16_with_bom() {
        let bytes = utf16le_with_bom("name,title\nGrok,the Wall\n");
        assert_eq!(decode_text(&bytes).unwrap(), "name,title\nGrok,the Wall\n");
    }

    #[test]
    fn strips_utf8_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"name\n");
        assert_eq!(decode_text(&bytes).unwrap(), "name\n");
        assert_eq!(decode_text(b"plain").unwrap(), "plain");
    }

    #[test]
    fn builtin_tables_fill_in_missing_paths() {
        let roster = load_roster(None, None).unwrap();
        assert!(roster.warrior("Grok").is_some());
        assert!(roster.item("Iron Plate").is_some());
    }
}
