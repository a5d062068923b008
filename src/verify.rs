use sha2::Digest as _;

use crate::model::{Anchor, AnchorDocument};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verification {
    Match { anchor: Anchor, digest: String },
    Mismatch { expected: String, digest: String },
    UnknownExpediente { expediente_id: String },
    NotAnchored { digest: String },
}

impl Verification {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match { .. })
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

/// Check a document's bytes against the anchored hashes.
///
/// With an expediente id only that anchor is consulted; otherwise any anchor with an equal hash
/// counts as a match.
pub fn verify_bytes(
    doc: &AnchorDocument,
    bytes: &[u8],
    expediente_id: Option<&str>,
) -> Verification {
    let digest = sha256_hex(bytes);

    match expediente_id {
        Some(id) => match doc.find_expediente(id) {
            None => Verification::UnknownExpediente {
                expediente_id: id.to_string(),
            },
            Some(anchor) if anchor.sha256.eq_ignore_ascii_case(&digest) => Verification::Match {
                anchor: anchor.clone(),
                digest,
            },
            Some(anchor) => Verification::Mismatch {
                expected: anchor.sha256.clone(),
                digest,
            },
        },
        None => match doc
            .anchors()
            .iter()
            .find(|a| a.sha256.eq_ignore_ascii_case(&digest))
        {
            Some(anchor) => Verification::Match {
                anchor: anchor.clone(),
                digest,
            },
            None => Verification::NotAnchored { digest },
        },
    }
}
