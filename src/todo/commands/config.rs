use crate::commands::{CmdMessage, CmdResult, TodoPaths};
use crate::config::TodoConfig;
use crate::error::Result;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &TodoPaths, action: ConfigAction) -> Result<CmdResult> {
    let dir = &paths.data_dir;
    match action {
        ConfigAction::ShowAll => {
            let config = TodoConfig::load(dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = TodoConfig::load(dir)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = TodoConfig::load(dir)?;
            if let Err(e) = config.set(&key, &value) {
                let mut res = CmdResult::default();
                res.add_message(CmdMessage::error(e));
                return Ok(res);
            }
            config.save(dir)?;
            let display_val = config.get(&key).unwrap_or_else(|| value.clone());
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!(
                "{} set to {} (takes effect on next start)",
                key, display_val
            )));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use tempfile::TempDir;

    fn paths(dir: &TempDir) -> TodoPaths {
        TodoPaths::new(dir.path().to_path_buf())
    }

    #[test]
    fn show_all_returns_defaults() {
        let dir = TempDir::new().unwrap();
        let result = run(&paths(&dir), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(TodoConfig::default()));
    }

    #[test]
    fn set_persists_value() {
        let dir = TempDir::new().unwrap();
        let result = run(
            &paths(&dir),
            ConfigAction::Set("max-attempts".into(), "5".into()),
        )
        .unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Success);

        let shown = run(&paths(&dir), ConfigAction::ShowKey("max-attempts".into())).unwrap();
        assert_eq!(shown.messages[0].content, "5");
    }

    #[test]
    fn invalid_set_reports_error_without_saving() {
        let dir = TempDir::new().unwrap();
        let result = run(
            &paths(&dir),
            ConfigAction::Set("max-attempts".into(), "zero".into()),
        )
        .unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert!(!dir.path().join("config.json").exists());
    }

    #[test]
    fn unknown_key_is_reported() {
        let dir = TempDir::new().unwrap();
        let result = run(&paths(&dir), ConfigAction::ShowKey("colour".into())).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
    }
}
