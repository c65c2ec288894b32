//! Shared record definitions
//!
//! [`CustomerRecord`] is the unit of data flowing through the whole
//! pipeline: produced by ingestion, partitioned by the splitter, encoded
//! by the feature pipeline and scored by the service. Serde renames keep
//! the original PascalCase column and wire names.

use serde::{Deserialize, Serialize};

/// Column order of the cleaned CSV. Ingestion always emits this header.
pub const CLEAN_HEADER: [&str; 8] = [
    "CustomerID",
    "Gender",
    "Tenure",
    "MonthlyCharges",
    "TotalCharges",
    "Contract",
    "InternetService",
    "Churn",
];

/// One customer row after cleaning.
///
/// Invariants established by ingestion: `customer_id` is non-empty,
/// `tenure` is in `[0, 120]` and `monthly_charges` is positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    #[serde(rename = "CustomerID")]
    pub customer_id: String,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Tenure")]
    pub tenure: f64,
    #[serde(rename = "MonthlyCharges")]
    pub monthly_charges: f64,
    #[serde(rename = "TotalCharges")]
    pub total_charges: f64,
    #[serde(rename = "Contract")]
    pub contract: String,
    #[serde(rename = "InternetService")]
    pub internet_service: String,
    /// "Yes"/"No" after normalization; unused during scoring.
    #[serde(rename = "Churn")]
    pub churn: String,
}

/// Scoring result for one customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChurnPrediction {
    #[serde(rename = "Predicted")]
    pub predicted: bool,
    #[serde(rename = "Probability")]
    pub probability: f64,
    /// Raw decision-function value (log-odds).
    #[serde(rename = "Score")]
    pub score: f64,
}

/// A customer record paired with its derived boolean label.
/// Built once per record; immutable thereafter.
#[derive(Debug, Clone)]
pub struct LabeledExample {
    pub record: CustomerRecord,
    pub label: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serializes_pascal_case() {
        let record = CustomerRecord {
            customer_id: "C1".into(),
            gender: "Female".into(),
            tenure: 3.0,
            monthly_charges: 120.0,
            total_charges: 360.0,
            contract: "Month-to-month".into(),
            internet_service: "Fiber optic".into(),
            churn: "No".into(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["CustomerID"], "C1");
        assert_eq!(json["MonthlyCharges"], 120.0);
        assert!(json.get("customer_id").is_none());
    }

    #[test]
    fn test_header_matches_field_order() {
        // The CSV writer relies on struct field order matching CLEAN_HEADER.
        let record = CustomerRecord {
            customer_id: "C1".into(),
            gender: "Male".into(),
            tenure: 1.0,
            monthly_charges: 10.0,
            total_charges: 10.0,
            contract: "Two year".into(),
            internet_service: "DSL".into(),
            churn: "Yes".into(),
        };

        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.serialize(&record).unwrap();
        let out = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
        let header = out.lines().next().unwrap();
        assert_eq!(header, CLEAN_HEADER.join(","));
    }
}
