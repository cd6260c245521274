use serde::{Deserialize, Serialize};

pub mod balance_sheet {
    use super::*;

    /// A line item as sent by clients: a display name and a decimal value
    /// in major units (dollars).
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct LineItemNew {
        pub name: String,
        pub value: f64,
    }

    /// Request body for `POST /balancesheets` and `PUT /balancesheets/{id}`.
    ///
    /// `date` is mandatory; missing it fails deserialization. The three
    /// collections accept `null` (treated as empty) for compatibility with
    /// clients that omit unused categories.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct BalanceSheetNew {
        pub company_name: Option<String>,
        pub date: String,
        #[serde(default)]
        pub assets: Option<Vec<LineItemNew>>,
        #[serde(default)]
        pub liabilities: Option<Vec<LineItemNew>>,
        #[serde(default)]
        pub equities: Option<Vec<LineItemNew>>,
    }

    /// A persisted line item. The owning sheet is implied by nesting; no
    /// reverse reference is serialized.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct LineItemView {
        pub id: i64,
        pub name: String,
        pub value: f64,
    }

    /// A persisted balance sheet with its line items nested per category.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct BalanceSheetView {
        pub id: i64,
        pub company_name: Option<String>,
        pub date: String,
        pub assets: Vec<LineItemView>,
        pub liabilities: Vec<LineItemView>,
        pub equities: Vec<LineItemView>,
    }
}
