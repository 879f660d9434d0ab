use std::path::PathBuf;

use egui::{Color32, Vec2, vec2};
use serde::{Deserialize, Serialize};

use crate::error::{BoardError, BoardResult};

/// Name of the optional config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "vision_board.json";

/// How a failure that the board absorbs gets reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Drop the failure without a trace.
    Silent,
    /// Log it as a warning.
    Log,
    /// Log it and show it in the status line.
    Notify,
}

impl FailurePolicy {
    /// Report `err` according to the policy. Returns the message to show in
    /// the UI, if any.
    pub fn report(self, err: &BoardError) -> Option<String> {
        match self {
            FailurePolicy::Silent => None,
            FailurePolicy::Log => {
                log::warn!("{err}");
                None
            }
            FailurePolicy::Notify => {
                log::warn!("{err}");
                Some(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing fields fall back to the defaults below
pub struct BoardConfig {
    /// Logical size of the board in points
    pub board_width: f32,
    pub board_height: f32,
    /// Initial board background as `#rrggbb`
    pub background: String,
    /// Supersampling factor applied when exporting
    pub export_scale: f32,
    pub export_file_name: String,
    /// Where native builds write exports
    pub export_dir: PathBuf,
    /// Directory (or URL prefix on the web) holding the sticker gallery
    pub sticker_dir: String,
    pub missing_item_policy: FailurePolicy,
    pub decode_failure_policy: FailurePolicy,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            board_width: 900.0,
            board_height: 600.0,
            background: "#ffeaa3".to_owned(),
            export_scale: 3.0,
            export_file_name: "vision-board.png".to_owned(),
            export_dir: PathBuf::from("."),
            sticker_dir: "assets/stickers".to_owned(),
            missing_item_policy: FailurePolicy::Silent,
            decode_failure_policy: FailurePolicy::Log,
        }
    }
}

impl BoardConfig {
    pub fn from_json(json: &str) -> BoardResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| BoardError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> BoardResult<()> {
        if !(self.board_width > 0.0 && self.board_height > 0.0) {
            return Err(BoardError::Config(format!(
                "board size must be positive, got {}x{}",
                self.board_width, self.board_height
            )));
        }
        if !(self.export_scale > 0.0) {
            return Err(BoardError::Config(format!(
                "export_scale must be positive, got {}",
                self.export_scale
            )));
        }
        if self.export_file_name.is_empty() {
            return Err(BoardError::Config("export_file_name is empty".to_owned()));
        }
        self.background_color()?;
        Ok(())
    }

    pub fn board_size(&self) -> Vec2 {
        vec2(self.board_width, self.board_height)
    }

    pub fn background_color(&self) -> BoardResult<Color32> {
        Color32::from_hex(&self.background).map_err(|err| {
            BoardError::Config(format!("bad background color '{}': {err:?}", self.background))
        })
    }

    /// Read [`CONFIG_FILE_NAME`] from the working directory, falling back to
    /// the defaults when it is missing or invalid.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_default() -> Self {
        let path = std::path::Path::new(CONFIG_FILE_NAME);
        if !path.exists() {
            log::debug!("No {CONFIG_FILE_NAME} found, using default configuration");
            return Self::default();
        }

        let loaded = std::fs::read_to_string(path)
            .map_err(|source| BoardError::Io {
                path: path.display().to_string(),
                source,
            })
            .and_then(|json| Self::from_json(&json));

        match loaded {
            Ok(config) => {
                log::info!("Loaded configuration from {}", path.display());
                config
            }
            Err(err) => {
                log::error!("Ignoring {}: {err}", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = BoardConfig::from_json(r#"{ "export_scale": 2.0 }"#).unwrap();
        assert_eq!(config.export_scale, 2.0);
        assert_eq!(config.export_file_name, "vision-board.png");
        assert_eq!(config.missing_item_policy, FailurePolicy::Silent);
    }

    #[test]
    fn policies_parse_lowercase() {
        let config = BoardConfig::from_json(
            r#"{ "missing_item_policy": "notify", "decode_failure_policy": "silent" }"#,
        )
        .unwrap();
        assert_eq!(config.missing_item_policy, FailurePolicy::Notify);
        assert_eq!(config.decode_failure_policy, FailurePolicy::Silent);
    }

    #[test]
    fn rejects_non_positive_scale() {
        assert!(matches!(
            BoardConfig::from_json(r#"{ "export_scale": 0.0 }"#),
            Err(BoardError::Config(_))
        ));
    }

    #[test]
    fn rejects_bad_background() {
        assert!(BoardConfig::from_json(r#"{ "background": "yellow" }"#).is_err());
    }

    #[test]
    fn default_background_parses() {
        let color = BoardConfig::default().background_color().unwrap();
        assert_eq!(color, Color32::from_rgb(0xff, 0xea, 0xa3));
    }

    #[test]
    fn notify_returns_message() {
        let err = BoardError::UnknownItem(crate::element::ItemId(9));
        assert_eq!(FailurePolicy::Silent.report(&err), None);
        assert_eq!(FailurePolicy::Log.report(&err), None);
        assert_eq!(
            FailurePolicy::Notify.report(&err).as_deref(),
            Some("no item with id #9")
        );
    }
}
