//! Methodological flow diagram form state

use crate::error::{GuidelineError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DIAGRAM_TITLE: &str = "Methodological Flow Diagram";

macro_rules! diagram_form {
    ($($field:ident => $key:literal),+ $(,)?) => {
        /// Values entered on the diagram page. Every field is optional text;
        /// an absent or empty value renders as a single space.
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct DiagramForm {
            #[serde(rename = "diagramTitle")]
            pub diagram_title: Option<String>,
            $(
                #[serde(rename = $key)]
                pub $field: Option<String>,
            )+
        }

        impl DiagramForm {
            /// Form keys as they appear in the JSON document
            pub const FIELD_NAMES: &'static [&'static str] = &["diagramTitle", $($key),+];

            fn slot(&mut self, key: &str) -> Option<&mut Option<String>> {
                match key {
                    "diagramTitle" => Some(&mut self.diagram_title),
                    $($key => Some(&mut self.$field),)+
                    _ => None,
                }
            }

            /// Raw value of a field by key
            pub fn get(&self, key: &str) -> Result<Option<&str>> {
                let value = match key {
                    "diagramTitle" => &self.diagram_title,
                    $($key => &self.$field,)+
                    _ => return Err(GuidelineError::UnknownField(key.to_string())),
                };
                Ok(value.as_deref())
            }
        }
    };
}

diagram_form! {
    total_chatbots => "totalChatbots",
    chatbot_names => "chatbotNames",
    base_model => "baseModel",
    novel_base_model => "novelBaseModel",
    tuned_model => "tunedModel",
    fine_tuned_model => "fineTunedModel",
    open_source => "openSource",
    closed_source => "closedSource",
    subscription => "subscription",
    api => "api",
    other => "other",
    prompt_engineers => "promptEngineers",
    investigator_derived => "investigatorDerived",
    clinician_derived => "clinicianDerived",
    patient_derived => "patientDerived",
    prompt_sources => "promptSources",
    total_prompts => "totalPrompts",
    follow_up_prompts => "followUpPrompts",
    query_dates => "queryDates",
    chat_sessions => "chatSessions",
    locations => "locations",
    languages => "languages",
    evaluators => "evaluators",
    patient_public => "patientPublic",
    automated => "automated",
    model_output_responses => "modelOutputResponses",
    valid => "valid",
    missing_invalid => "missingInvalid",
    repeat_queries => "repeatQueries",
    reproducibility_dates => "reproducibilityDates",
    reproducibility_locations => "reproducibilityLocations",
    discrepancies => "discrepancies",
}

impl DiagramForm {
    /// A fresh form with the default title filled in
    pub fn new() -> Self {
        Self {
            diagram_title: Some(DEFAULT_DIAGRAM_TITLE.to_string()),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Title shown above the diagram; falls back to the default when blank
    pub fn title(&self) -> &str {
        match self.diagram_title.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => DEFAULT_DIAGRAM_TITLE,
        }
    }

    /// Update a field by its form key
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        let slot = self
            .slot(key)
            .ok_or_else(|| GuidelineError::UnknownField(key.to_string()))?;
        *slot = Some(value.into());
        Ok(())
    }

    /// Parse and apply a `key=value` assignment
    pub fn apply_assignment(&mut self, assignment: &str) -> Result<()> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| GuidelineError::UnknownField(assignment.to_string()))?;
        self.set(key.trim(), value)
    }

    /// Clear every field back to the initial state
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Value for display: the entered text or a single space
    pub fn display(value: &Option<String>) -> &str {
        match value.as_deref() {
            Some(v) if !v.is_empty() => v,
            _ => " ",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_title() {
        let mut form = DiagramForm::new();
        assert_eq!(form.title(), DEFAULT_DIAGRAM_TITLE);
        form.set("diagramTitle", "").unwrap();
        assert_eq!(form.title(), DEFAULT_DIAGRAM_TITLE);
        form.set("diagramTitle", "My Study").unwrap();
        assert_eq!(form.title(), "My Study");
    }

    #[test]
    fn test_set_and_get_by_key() {
        let mut form = DiagramForm::new();
        form.set("totalChatbots", "3").unwrap();
        assert_eq!(form.total_chatbots.as_deref(), Some("3"));
        assert_eq!(form.get("totalChatbots").unwrap(), Some("3"));
        assert_eq!(form.get("discrepancies").unwrap(), None);
        assert!(matches!(
            form.set("nonsense", "1"),
            Err(GuidelineError::UnknownField(_))
        ));
    }

    #[test]
    fn test_every_field_name_is_settable() {
        let mut form = DiagramForm::new();
        for key in DiagramForm::FIELD_NAMES {
            form.set(key, "x").unwrap();
            assert_eq!(form.get(key).unwrap(), Some("x"));
        }
        assert_eq!(DiagramForm::FIELD_NAMES.len(), 33);
    }

    #[test]
    fn test_apply_assignment() {
        let mut form = DiagramForm::new();
        form.apply_assignment("chatbotNames=GPT-4 (v0613)").unwrap();
        assert_eq!(form.chatbot_names.as_deref(), Some("GPT-4 (v0613)"));
        assert!(form.apply_assignment("noequals").is_err());
    }

    #[test]
    fn test_reset() {
        let mut form = DiagramForm::new();
        form.set("valid", "10").unwrap();
        form.set("diagramTitle", "Custom").unwrap();
        form.reset();
        assert_eq!(form, DiagramForm::new());
    }

    #[test]
    fn test_from_json_uses_form_keys() {
        let form = DiagramForm::from_json(r#"{"diagramTitle": "T", "followUpPrompts": "2"}"#).unwrap();
        assert_eq!(form.title(), "T");
        assert_eq!(form.follow_up_prompts.as_deref(), Some("2"));
        assert_eq!(form.valid, None);
    }

    #[test]
    fn test_display_blank_as_space() {
        assert_eq!(DiagramForm::display(&None), " ");
        assert_eq!(DiagramForm::display(&Some(String::new())), " ");
        assert_eq!(DiagramForm::display(&Some("4".into())), "4");
    }
}
