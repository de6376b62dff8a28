use getrandom::getrandom;
use serde::{Deserialize, Serialize};

const DOCUMENT_ID_PREFIX: &str = "chat_";
const DOCUMENT_ID_BYTES: usize = 12;

/// Store-generated identifier of a chat document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn generate() -> Result<Self, String> {
        let mut bytes = [0_u8; DOCUMENT_ID_BYTES];
        getrandom(&mut bytes).map_err(|err| format!("failed to generate document id: {err}"))?;
        Ok(Self(format!("{DOCUMENT_ID_PREFIX}{}", to_hex(&bytes))))
    }

    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    const HEX: &[u8; 16] = b"0123456789abcdef";
    for byte in bytes {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::DocumentId;

    #[test]
    fn generated_ids_are_prefixed_hex_and_distinct() {
        let first = DocumentId::generate().expect("id");
        let second = DocumentId::generate().expect("id");
        assert!(first.as_str().starts_with("chat_"));
        assert_eq!(first.as_str().len(), "chat_".len() + 24);
        assert!(first.as_str()["chat_".len()..]
            .chars()
            .all(|ch| ch.is_ascii_hexdigit()));
        assert_ne!(first, second);
    }
}
