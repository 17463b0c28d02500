// File: crates/traffic-core/src/config.rs
// Summary: Dashboard card configuration as supplied by the user (JSON).

use serde::{Deserialize, Deserializer};

use crate::chart::RenderOptions;
use crate::error::{Error, Result};
use crate::theme;
use crate::window::Window;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CardConfig {
    /// Camera entity ids shown in the list, in display order.
    #[serde(default)]
    pub cameras: Vec<String>,
    /// Initial statistics window; unknown tokens fall back like UI input does.
    #[serde(default, deserialize_with = "lenient_window")]
    pub window: Window,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_theme() -> String {
    "dark".to_string()
}

fn lenient_window<'de, D: Deserializer<'de>>(de: D) -> std::result::Result<Window, D::Error> {
    let token = String::deserialize(de)?;
    Ok(Window::from_token(&token))
}

impl CardConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: CardConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cameras.is_empty() {
            return Err(Error::MissingCameras);
        }
        Ok(())
    }

    /// Rows the card occupies: one per camera plus the header.
    pub fn card_size(&self) -> usize {
        self.cameras.len() + 1
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions { theme: theme::find(&self.theme), ..RenderOptions::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config_with_defaults() {
        let c = CardConfig::from_json(r#"{"cameras": ["camera.a", "camera.b"]}"#).unwrap();
        assert_eq!(c.cameras, vec!["camera.a", "camera.b"]);
        assert_eq!(c.window, Window::Day);
        assert_eq!(c.theme, "dark");
        assert_eq!(c.card_size(), 3);
    }

    #[test]
    fn cameras_are_required() {
        assert!(matches!(CardConfig::from_json("{}"), Err(Error::MissingCameras)));
        assert!(matches!(CardConfig::from_json(r#"{"cameras": []}"#), Err(Error::MissingCameras)));
    }

    #[test]
    fn malformed_json_is_a_payload_error() {
        assert!(matches!(CardConfig::from_json("{cameras"), Err(Error::Payload(_))));
    }

    #[test]
    fn window_and_theme_are_read() {
        let c = CardConfig::from_json(r#"{"cameras": ["camera.a"], "window": "week", "theme": "light"}"#).unwrap();
        assert_eq!(c.window, Window::Week);
        assert_eq!(c.render_options().theme.name, "light");

        let c = CardConfig::from_json(r#"{"cameras": ["camera.a"], "window": "decade"}"#).unwrap();
        assert_eq!(c.window, Window::Hour);
    }
}
