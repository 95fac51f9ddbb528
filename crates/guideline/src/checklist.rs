//! Abstract checklist content and page-number responses

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const CHECKLIST_TITLE: &str = "CHART Abstract Checklist";
pub const CHECKLIST_SUBTITLE: &str = "Reporting Checklist for Chatbot Health Advice Study Abstracts";

/// A table column: header text and share of the table width in percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChecklistColumn {
    pub header: &'static str,
    pub width_percent: u8,
}

pub const CHECKLIST_COLUMNS: [ChecklistColumn; 4] = [
    ChecklistColumn { header: "Heading", width_percent: 18 },
    ChecklistColumn { header: "Item #", width_percent: 8 },
    ChecklistColumn { header: "Item", width_percent: 46 },
    ChecklistColumn { header: "Page #", width_percent: 28 },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistItem {
    pub number: &'static str,
    /// Topic label; empty for continuation items
    pub label: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistSection {
    pub name: &'static str,
    pub items: &'static [ChecklistItem],
}

const fn item(number: &'static str, label: &'static str, description: &'static str) -> ChecklistItem {
    ChecklistItem { number, label, description }
}

static ABSTRACT_SECTIONS: [ChecklistSection; 3] = [
    ChecklistSection {
        name: "Background",
        items: &[
            item("2a", "", "State the scientific background, rationale, and healthcare context for evaluating the generative AI-driven chatbot(s), referencing relevant literature when applicable."),
            item("2b", "", "State the aims and research questions including the target audience, intervention, comparator(s), and outcome(s)."),
        ],
    },
    ChecklistSection {
        name: "Methods",
        items: &[
            item("3a", "Model Identifiers", "State the name and version identifier(s) of the generative AI model(s) and chatbot(s) under evaluation, as well as their date of release or last update."),
            item("3b", "", "State whether generative AI model(s) and chatbot(s) are open-source versus closed-source/proprietary."),
            item("4a", "Model Details", "State whether the generative AI model was a base model or a novel base model, tuned model, or fine-tuned model."),
            item("5a", "Prompt Engineering", "Describe the evolution of study prompt development."),
            item("5ai", "", "Describe the sources of prompts."),
            item("5aii", "", "State the number and characteristics of the individual(s) involved in prompt engineering."),
            item("5aiii", "", "Provide details of any patient and public involvement during prompt engineering."),
            item("6a", "Query Strategy", "State route of access to generative AI model."),
            item("6b", "", "State the date(s) and location(s) of queries for the generative AI-driven chatbot(s) including the day, month, and year as well as city and country."),
            item("7a", "Performance Evaluation", "Define the ground truth or reference standard used to define successful generative AI-driven chatbot performance."),
            item("7b", "", "Describe the process undertaken for the performance evaluation of the generative AI-driven chatbot(s)."),
            item("8", "Sample Size", "Report how the sample size was determined."),
            item("9a", "Data Analysis", "Describe statistical analysis methods, including any evaluation of reproducibility of generative AI-driven chatbot responses."),
        ],
    },
    ChecklistSection {
        name: "Results",
        items: &[
            item("10a", "", "Report the alignment between generative AI-driven chatbot output and ground truth or reference standard using quantitative or mixed methods approaches as applicable."),
        ],
    },
];

/// The CHART abstract checklist
pub fn abstract_checklist() -> &'static [ChecklistSection] {
    &ABSTRACT_SECTIONS
}

/// Iterate every item of a checklist in order
pub fn checklist_items(sections: &[ChecklistSection]) -> impl Iterator<Item = &ChecklistItem> {
    sections.iter().flat_map(|s| s.items.iter())
}

/// Page numbers entered against checklist items, keyed by item number
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChecklistResponses {
    entries: BTreeMap<String, String>,
}

impl ChecklistResponses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Record a response; an empty value clears it
    pub fn set(&mut self, item_number: &str, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.entries.remove(item_number);
        } else {
            self.entries.insert(item_number.to_string(), value);
        }
    }

    /// The response for an item, or an empty string
    pub fn get(&self, item_number: &str) -> &str {
        self.entries.get(item_number).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
