use serde::Deserialize;

use crate::errors::AppError;

/// Raw form submission. Every field is optional on the wire so a missing
/// field surfaces as our own validation error instead of an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportForm {
    pub report_title: Option<String>,
    pub company_name: Option<String>,
    pub prepared_by: Option<String>,
    pub target_unit: Option<String>,
    pub report_date: Option<String>,
    pub report_version: Option<String>,
    pub sector: Option<String>,
    pub problem: Option<String>,
    pub requested_service: Option<String>,
}

/// A complete proposal request. All fields are present and non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    pub report_title: String,
    pub company_name: String,
    pub prepared_by: String,
    pub target_unit: String,
    pub report_date: String,
    pub report_version: String,
    pub sector: String,
    pub problem: String,
    pub requested_service: String,
}

/// The content fields the prompt is built from.
#[derive(Debug, Clone, Copy)]
pub struct ProposalBrief<'a> {
    pub company_name: &'a str,
    pub sector: &'a str,
    pub problem: &'a str,
    pub requested_service: &'a str,
}

impl ReportForm {
    /// Checks field presence in form order and reports the first missing one.
    pub fn validate(self) -> Result<ReportRequest, AppError> {
        Ok(ReportRequest {
            report_title: required("report_title", self.report_title)?,
            company_name: required("company_name", self.company_name)?,
            prepared_by: required("prepared_by", self.prepared_by)?,
            target_unit: required("target_unit", self.target_unit)?,
            report_date: required("report_date", self.report_date)?,
            report_version: required("report_version", self.report_version)?,
            sector: required("sector", self.sector)?,
            problem: required("problem", self.problem)?,
            requested_service: required("requested_service", self.requested_service)?,
        })
    }
}

impl ReportRequest {
    pub fn brief(&self) -> ProposalBrief<'_> {
        ProposalBrief {
            company_name: &self.company_name,
            sector: &self.sector,
            problem: &self.problem,
            requested_service: &self.requested_service,
        }
    }
}

fn required(field: &str, value: Option<String>) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!("{field} is required"))),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn complete_form() -> ReportForm {
        ReportForm {
            report_title: Some("Dijital Dönüşüm Teklifi".to_string()),
            company_name: Some("Anadolu Lojistik A.Ş.".to_string()),
            prepared_by: Some("Ayşe Yılmaz".to_string()),
            target_unit: Some("Bilgi İşlem Müdürlüğü".to_string()),
            report_date: Some("17.10.2026".to_string()),
            report_version: Some("v1.0".to_string()),
            sector: Some("Lojistik".to_string()),
            problem: Some("Depo stok takibi manuel yürütülüyor".to_string()),
            requested_service: Some("Depo yönetim sistemi danışmanlığı".to_string()),
        }
    }

    #[test]
    fn test_complete_form_validates() {
        let request = complete_form().validate().unwrap();
        assert_eq!(request.company_name, "Anadolu Lojistik A.Ş.");
        assert_eq!(request.report_version, "v1.0");
    }

    #[test]
    fn test_each_missing_field_is_named() {
        let fields = [
            "report_title",
            "company_name",
            "prepared_by",
            "target_unit",
            "report_date",
            "report_version",
            "sector",
            "problem",
            "requested_service",
        ];
        for field in fields {
            let mut form = complete_form();
            match field {
                "report_title" => form.report_title = None,
                "company_name" => form.company_name = None,
                "prepared_by" => form.prepared_by = None,
                "target_unit" => form.target_unit = None,
                "report_date" => form.report_date = None,
                "report_version" => form.report_version = None,
                "sector" => form.sector = None,
                "problem" => form.problem = None,
                _ => form.requested_service = None,
            }
            match form.validate() {
                Err(AppError::Validation(msg)) => assert_eq!(msg, format!("{field} is required")),
                other => panic!("expected validation error for {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_blank_field_counts_as_missing() {
        let mut form = complete_form();
        form.sector = Some("   ".to_string());
        assert!(matches!(form.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_values_are_kept_verbatim() {
        let mut form = complete_form();
        form.report_date = Some(" yarın ".to_string());
        let request = form.validate().unwrap();
        assert_eq!(request.report_date, " yarın ");
    }

    #[test]
    fn test_form_deserializes_with_missing_fields() {
        let form: ReportForm = serde_json::from_value(serde_json::json!({
            "report_title": "Teklif"
        }))
        .unwrap();
        assert_eq!(form.report_title.as_deref(), Some("Teklif"));
        assert!(form.company_name.is_none());
    }
}
