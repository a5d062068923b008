use crate::error::BoardResult;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Anchor {
    pub expediente_id: String,
    pub categoria: String,
    pub sha256: String, // hex digest of the anchored document
    #[serde(alias = "tx_id")]
    pub txid: String,
    pub network: String,
    pub timestamp: i64, // unix seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// The `anchors.json` envelope.
///
/// `anchors` may be absent or `null`; both render as "no data". Unknown keys are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnchorDocument {
    #[serde(default)]
    pub anchors: Option<Vec<Anchor>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl AnchorDocument {
    pub fn from_slice(bytes: &[u8]) -> BoardResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn anchors(&self) -> &[Anchor] {
        self.anchors.as_deref().unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.anchors().is_empty()
    }

    /// Declared `total`, or the number of anchors when the producer omitted it.
    pub fn total(&self) -> u64 {
        self.total.unwrap_or(self.anchors().len() as u64)
    }

    pub fn find_expediente(&self, expediente_id: &str) -> Option<&Anchor> {
        self.anchors()
            .iter()
            .find(|a| a.expediente_id == expediente_id)
    }
}
