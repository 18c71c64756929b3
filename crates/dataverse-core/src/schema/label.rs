//! Localized metadata labels.

use serde::Serialize;

const LABEL_TYPE: &str = "Microsoft.Dynamics.CRM.Label";
const LOCALIZED_LABEL_TYPE: &str = "Microsoft.Dynamics.CRM.LocalizedLabel";

/// A label with a single localization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Label {
    #[serde(rename = "@odata.type")]
    odata_type: &'static str,
    localized_labels: Vec<LocalizedLabel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LocalizedLabel {
    #[serde(rename = "@odata.type")]
    odata_type: &'static str,
    label: String,
    language_code: u32,
}

impl Label {
    pub fn new(text: impl Into<String>, language_code: u32) -> Self {
        Self {
            odata_type: LABEL_TYPE,
            localized_labels: vec![LocalizedLabel {
                odata_type: LOCALIZED_LABEL_TYPE,
                label: text.into(),
                language_code,
            }],
        }
    }

    /// Text of the first localization.
    pub fn text(&self) -> &str {
        self.localized_labels
            .first()
            .map(|l| l.label.as_str())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_odata_types() {
        let label = Label::new("Sample", 1031);
        assert_eq!(
            serde_json::to_value(&label).unwrap(),
            json!({
                "@odata.type": "Microsoft.Dynamics.CRM.Label",
                "LocalizedLabels": [{
                    "@odata.type": "Microsoft.Dynamics.CRM.LocalizedLabel",
                    "Label": "Sample",
                    "LanguageCode": 1031
                }]
            })
        );
        assert_eq!(label.text(), "Sample");
    }
}
