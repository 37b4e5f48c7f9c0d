//! Model profiles — documented context windows for known completion
//! models, plus serde-loadable profile records for everything else.
//!
//! There is deliberately no fallback window: a model outside this table
//! needs an explicit `context_window` from the caller or a loaded profile.

use serde::{Deserialize, Serialize};

/// Documented context window for a known model, in the unit the budget
/// check uses.
pub fn known_context_window(model: &str) -> Option<usize> {
    match model {
        "text-davinci-003" => Some(4097),
        "text-curie-001" => Some(2048),
        "text-babbage-001" => Some(2048),
        "text-ada-001" => Some(2048),
        "code-davinci-002" => Some(8000),
        "code-cushman-001" => Some(2048),
        "gpt-3.5-turbo" => Some(4097),
        "gpt-3.5-turbo-instruct" => Some(4097),
        _ => None,
    }
}

/// A configured model profile, loadable from YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelProfile {
    pub model: String,
    pub context_window: usize,
}

/// Load a list of profiles from a YAML document.
pub fn load_profiles(yaml: &str) -> Result<Vec<ModelProfile>, serde_yaml::Error> {
    serde_yaml::from_str(yaml)
}

/// Find a model's window among loaded profiles, falling back to the
/// known-model table.
pub fn resolve_context_window(model: &str, profiles: &[ModelProfile]) -> Option<usize> {
    profiles
        .iter()
        .find(|p| p.model == model)
        .map(|p| p.context_window)
        .or_else(|| known_context_window(model))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_models_have_windows() {
        assert_eq!(known_context_window("text-davinci-003"), Some(4097));
        assert_eq!(known_context_window("code-davinci-002"), Some(8000));
        assert_eq!(known_context_window("made-up-model"), None);
    }

    #[test]
    fn profiles_load_from_yaml() {
        let yaml = "\
- model: in-house-7b
  context_window: 2048
- model: in-house-70b
  context_window: 8192
";
        let profiles = load_profiles(yaml).unwrap();
        assert_eq!(profiles.len(), 2);
        assert_eq!(
            profiles[1],
            ModelProfile {
                model: "in-house-70b".into(),
                context_window: 8192
            }
        );
    }

    #[test]
    fn loaded_profiles_override_nothing_but_extend() {
        let profiles = vec![ModelProfile {
            model: "in-house-7b".into(),
            context_window: 2048,
        }];
        assert_eq!(resolve_context_window("in-house-7b", &profiles), Some(2048));
        assert_eq!(
            resolve_context_window("text-davinci-003", &profiles),
            Some(4097)
        );
        assert_eq!(resolve_context_window("unknown", &profiles), None);
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(load_profiles("model: [unclosed").is_err());
    }
}
