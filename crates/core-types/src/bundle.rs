use crate::error::CoreError;
use crate::structs::{Customer, Product, PurchaseRecord, Seller};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The complete batch of sales data fed to the analyzer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesData {
    pub customers: Vec<Customer>,
    pub sellers: Vec<Seller>,
    pub products: Vec<Product>,
    pub purchase_records: Vec<PurchaseRecord>,
}

impl SalesData {
    /// Parses a bundle from JSON text. See [`SalesData::from_json_value`].
    pub fn from_json_str(raw: &str) -> Result<Self, CoreError> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_json_value(&value)
    }

    /// Builds a bundle from an already parsed JSON document.
    ///
    /// The document must be an object holding the four collections as arrays.
    /// A `null` document, a missing key, or a key that is not an array is
    /// rejected with `CoreError::InvalidInput` before any element is decoded.
    pub fn from_json_value(value: &Value) -> Result<Self, CoreError> {
        let object = value.as_object().ok_or_else(|| {
            CoreError::InvalidInput(
                "data".to_string(),
                "expected an object holding the sales collections".to_string(),
            )
        })?;

        Ok(Self {
            customers: decode_all("customers", collection(object, "customers")?)?,
            sellers: decode_all("sellers", collection(object, "sellers")?)?,
            products: decode_all("products", collection(object, "products")?)?,
            purchase_records: decode_all(
                "purchase_records",
                collection(object, "purchase_records")?,
            )?,
        })
    }

    /// Fails with `CoreError::InvalidInput` naming the first empty collection.
    pub fn ensure_non_empty(&self) -> Result<(), CoreError> {
        let lengths = [
            ("customers", self.customers.len()),
            ("sellers", self.sellers.len()),
            ("products", self.products.len()),
            ("purchase_records", self.purchase_records.len()),
        ];
        match lengths.iter().find(|(_, len)| *len == 0) {
            Some((name, _)) => Err(CoreError::InvalidInput(
                (*name).to_string(),
                "must not be empty".to_string(),
            )),
            None => Ok(()),
        }
    }
}

fn collection<'a>(object: &'a Map<String, Value>, key: &str) -> Result<&'a [Value], CoreError> {
    object
        .get(key)
        .ok_or_else(|| CoreError::InvalidInput(key.to_string(), "missing".to_string()))?
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| CoreError::InvalidInput(key.to_string(), "expected an array".to_string()))
}

fn decode_all<T: DeserializeOwned>(name: &str, values: &[Value]) -> Result<Vec<T>, CoreError> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            T::deserialize(value).map_err(|e| {
                CoreError::InvalidInput(format!("{name}[{index}]"), e.to_string())
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const BUNDLE: &str = r#"{
        "customers": [{ "id": "c1", "first_name": "Ann", "last_name": "Lee" }],
        "sellers": [{ "id": "s1", "first_name": "Bob", "last_name": "Stone", "start_date": "2023-01-15" }],
        "products": [{ "sku": "SKU_001", "purchase_price": 12.5, "name": "Kettle" }],
        "purchase_records": [{
            "receipt_id": "r1",
            "date": "2023-12-04",
            "seller_id": "s1",
            "customer_id": "c1",
            "items": [{ "sku": "SKU_001", "quantity": 2, "sale_price": 20, "discount": 10 }],
            "total_amount": 36,
            "total_discount": 4
        }]
    }"#;

    #[test]
    fn parses_a_well_formed_bundle() {
        let data = SalesData::from_json_str(BUNDLE).unwrap();
        assert_eq!(data.sellers[0].display_name(), "Bob Stone");
        assert_eq!(data.products[0].purchase_price, dec!(12.5));
        let item = &data.purchase_records[0].items[0];
        assert_eq!(item.quantity, 2);
        assert_eq!(item.discount, dec!(10));
        assert!(data.ensure_non_empty().is_ok());
    }

    #[test]
    fn rejects_null_bundle() {
        let err = SalesData::from_json_str("null").unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(ref name, _) if name == "data"));
    }

    #[test]
    fn rejects_collection_that_is_not_an_array() {
        let raw = r#"{ "customers": [], "sellers": {}, "products": [], "purchase_records": [] }"#;
        let err = SalesData::from_json_str(raw).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(ref name, _) if name == "sellers"));
    }

    #[test]
    fn rejects_missing_collection() {
        let raw = r#"{ "customers": [], "sellers": [], "products": [] }"#;
        let err = SalesData::from_json_str(raw).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(ref name, _) if name == "purchase_records"));
    }

    #[test]
    fn reports_the_offending_element() {
        let raw = r#"{ "customers": [], "sellers": [{ "id": "s1" }], "products": [], "purchase_records": [] }"#;
        let err = SalesData::from_json_str(raw).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(ref name, _) if name == "sellers[0]"));
    }

    #[test]
    fn empty_collection_is_named() {
        let mut data = SalesData::from_json_str(BUNDLE).unwrap();
        data.products.clear();
        let err = data.ensure_non_empty().unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(ref name, _) if name == "products"));
    }
}
