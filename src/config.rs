use std::path::{Path, PathBuf};

use crate::{
    datefmt::{DateFormatter, Locale},
    error::{BoardError, BoardResult},
    render::{DEFAULT_CONTAINER_ID, DEFAULT_RESULTS_ID, RenderSettings},
    source::{AnchorSource, DEFAULT_SOURCE},
};

const MAX_OFFSET_MINUTES: i32 = 18 * 60;

/// Board configuration. Every field has a default, so `{}` is a valid config file.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    /// Path or `http(s)://` URL of `anchors.json`.
    pub source: String,
    /// Base for relative `source` paths. Defaults to the current directory.
    pub base_dir: Option<PathBuf>,
    pub locale: Locale,
    pub utc_offset_minutes: i32,
    pub container_id: String,
    pub results_id: String,
    /// Shown in the dashboard footer.
    pub network_label: String,
    pub out: PathBuf,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            base_dir: None,
            locale: Locale::default(),
            utc_offset_minutes: 0,
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            results_id: DEFAULT_RESULTS_ID.to_string(),
            network_label: "Ethereum Mainnet (Simulated)".to_string(),
            out: PathBuf::from("dashboard_live.html"),
        }
    }
}

impl BoardConfig {
    pub fn from_json_str(s: &str) -> BoardResult<Self> {
        serde_json::from_str(s).map_err(|e| BoardError::config(format!("parse config: {e}")))
    }

    pub async fn load(path: &Path) -> BoardResult<Self> {
        let s = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| BoardError::config(format!("read '{}': {e}", path.display())))?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> BoardResult<()> {
        if self.source.trim().is_empty() {
            return Err(BoardError::validation("source must be non-empty"));
        }
        if self.container_id.trim().is_empty() {
            return Err(BoardError::validation("container_id must be non-empty"));
        }
        if self.results_id.trim().is_empty() {
            return Err(BoardError::validation("results_id must be non-empty"));
        }
        if !(-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&self.utc_offset_minutes) {
            return Err(BoardError::validation(format!(
                "utc_offset_minutes must be within ±{MAX_OFFSET_MINUTES}"
            )));
        }
        Ok(())
    }

    pub fn anchor_source(&self) -> AnchorSource {
        let base = self.base_dir.as_deref().unwrap_or_else(|| Path::new("."));
        AnchorSource::parse(&self.source, base)
    }

    pub fn render_settings(&self) -> BoardResult<RenderSettings> {
        self.validate()?;
        Ok(RenderSettings {
            dates: DateFormatter::new(self.locale, self.utc_offset_minutes)?,
            container_id: self.container_id.clone(),
            results_id: self.results_id.clone(),
            source_label: self.anchor_source().label(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        let cfg = BoardConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, BoardConfig::default());
        cfg.validate().unwrap();
    }

    #[test]
    fn partial_override() {
        let cfg = BoardConfig::from_json_str(
            r#"{"locale":"en-US","utc_offset_minutes":-300,"source":"https://h/anchors.json"}"#,
        )
        .unwrap();
        assert_eq!(cfg.locale, Locale::EnUs);
        assert_eq!(cfg.container_id, "transactions");
        assert!(matches!(cfg.anchor_source(), AnchorSource::Http(_)));

        let settings = cfg.render_settings().unwrap();
        assert_eq!(settings.dates.format(0), "12/31/1969, 7:00:00 PM");
        assert_eq!(settings.source_label, "anchors.json");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(BoardConfig::from_json_str(r#"{"sorce":"x"}"#).is_err());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut cfg = BoardConfig::default();
        cfg.container_id = " ".to_string();
        assert!(cfg.validate().is_err());

        let mut cfg = BoardConfig::default();
        cfg.utc_offset_minutes = 19 * 60;
        assert!(cfg.render_settings().is_err());

        for offset in [i32::MIN, i32::MAX, -MAX_OFFSET_MINUTES - 1] {
            let cfg = BoardConfig {
                utc_offset_minutes: offset,
                ..BoardConfig::default()
            };
            assert!(
                matches!(cfg.validate(), Err(BoardError::Validation(_))),
                "{offset}"
            );
        }
        let cfg = BoardConfig {
            utc_offset_minutes: -MAX_OFFSET_MINUTES,
            ..BoardConfig::default()
        };
        cfg.validate().unwrap();
    }

    #[tokio::test]
    async fn load_reads_file_and_reports_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.json");
        tokio::fs::write(&path, r#"{"results_id":"panel"}"#)
            .await
            .unwrap();
        let cfg = BoardConfig::load(&path).await.unwrap();
        assert_eq!(cfg.results_id, "panel");

        let err = BoardConfig::load(&dir.path().join("absent.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::Config(_)), "{err}");
    }

    #[test]
    fn relative_source_uses_base_dir() {
        let cfg = BoardConfig {
            base_dir: Some(PathBuf::from("site")),
            ..BoardConfig::default()
        };
        assert_eq!(
            cfg.anchor_source(),
            AnchorSource::File(PathBuf::from("site").join(DEFAULT_SOURCE))
        );
    }
}
