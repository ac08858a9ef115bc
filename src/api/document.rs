//! Document Types for the Introduce-Goods Operation
//!
//! Wire types for the CRPT document-creation endpoint. Field names follow
//! the endpoint's JSON contract, which is snake_case except for the
//! `importRequest` flag.

use serde::{Deserialize, Serialize};

/// Document describing goods produced in Russia being introduced into
/// circulation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoodsIntroductionDocument {
    pub description: String,
    pub doc_id: String,
    pub doc_status: String,
    pub doc_type: String,
    #[serde(rename = "importRequest")]
    pub import_request: bool,
    pub owner_inn: String,
    pub participant_inn: String,
    pub producer_inn: String,
    pub production_date: String,
    pub production_type: String,
    pub products: Vec<Product>,
    pub reg_date: String,
    pub reg_number: String,
}

/// One product entry within a goods-introduction document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub certificate_document: String,
    pub certificate_document_date: String,
    pub certificate_document_number: String,
    pub owner_inn: String,
    pub producer_inn: String,
    pub production_date: String,
    pub tnved_code: String,
    pub uit_code: String,
    pub uitu_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_request_wire_name() {
        let doc = GoodsIntroductionDocument {
            import_request: true,
            ..Default::default()
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["importRequest"], serde_json::Value::Bool(true));
        assert!(json.get("import_request").is_none());
    }

    #[test]
    fn test_document_round_trip() {
        let doc = GoodsIntroductionDocument {
            doc_id: "doc-001".to_string(),
            doc_type: "LP_INTRODUCE_GOODS".to_string(),
            owner_inn: "1234567890".to_string(),
            products: vec![Product {
                tnved_code: "6401".to_string(),
                uit_code: "010463003407001221".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let json = serde_json::to_string(&doc).unwrap();
        let parsed: GoodsIntroductionDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, parsed);
    }
}
