//! The storage shape of a piece.
//!
//! A `PieceRecord` is exactly what a storage row carries, column for column.
//! Column names follow the existing `pecas` table so records written by older
//! versions of the studio tools load unchanged.
//!
//! Rows coming back from a remote table are loose JSON objects, so
//! [PieceRecord::from_value] defines how one is read: optional columns default
//! when absent (or null), required columns fail loudly.
//!
//! [PieceRecord::from_value]: struct.PieceRecord.html#method.from_value

use crate::{
    error::{Error, Result},
    models::{
        piece::{ClaySource, PieceID},
        user::UserID,
    },
};
use serde::{Serialize, Deserialize};
use serde_json::{Map, Value};

/// One stored piece.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PieceRecord {
    pub id: PieceID,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserID>,
    #[serde(rename = "data_producao")]
    pub production_date: String,
    #[serde(rename = "nome_pessoa")]
    pub person_name: String,
    #[serde(rename = "tipo_peca")]
    pub piece_type: String,
    #[serde(rename = "peso_kg", default)]
    pub weight_kg: f64,
    #[serde(rename = "altura_cm", default)]
    pub height_cm: f64,
    #[serde(rename = "largura_cm", default)]
    pub width_cm: f64,
    #[serde(rename = "profundidade_cm", default)]
    pub depth_cm: f64,
    #[serde(rename = "tipo_argila", default)]
    pub clay_source: ClaySource,
    #[serde(rename = "preco_argila_propria", default)]
    pub own_clay_price_per_kg: f64,
    #[serde(rename = "data_registro")]
    pub registration_date: String,
    #[serde(rename = "image_path", default)]
    pub photo_path: Option<String>,
    #[serde(rename = "custo_argila", default)]
    pub clay_cost: f64,
    #[serde(rename = "custo_biscoito", default)]
    pub firing_cost: f64,
    #[serde(rename = "custo_esmalte", default)]
    pub glaze_cost: f64,
    #[serde(rename = "total", default)]
    pub total_cost: f64,
}

/// Grab a field, treating `null` the same as absent.
fn field<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    match map.get(key) {
        Some(Value::Null) | None => None,
        Some(val) => Some(val),
    }
}

fn required_str(map: &Map<String, Value>, key: &str) -> Result<String> {
    match field(map, key) {
        Some(Value::String(val)) => Ok(val.clone()),
        Some(other) => Err(Error::InvalidField(key.into(), format!("expected text, got {}", other))),
        None => Err(Error::MissingField(key.into())),
    }
}

fn optional_str(map: &Map<String, Value>, key: &str) -> Result<Option<String>> {
    match field(map, key) {
        Some(Value::String(val)) => Ok(Some(val.clone())),
        Some(other) => Err(Error::InvalidField(key.into(), format!("expected text, got {}", other))),
        None => Ok(None),
    }
}

/// Numbers may come back as JSON numbers or as numeric text (some backends
/// return `numeric` columns as strings). Absent means zero.
fn optional_f64(map: &Map<String, Value>, key: &str) -> Result<f64> {
    match field(map, key) {
        Some(Value::Number(num)) => num.as_f64()
            .ok_or_else(|| Error::InvalidField(key.into(), format!("{} is not representable", num))),
        Some(Value::String(text)) => text.trim().parse::<f64>()
            .map_err(|_| Error::InvalidField(key.into(), format!("{:?} is not a number", text))),
        Some(other) => Err(Error::InvalidField(key.into(), format!("expected a number, got {}", other))),
        None => Ok(0.0),
    }
}

impl PieceRecord {
    /// Read a record from an arbitrary stored field mapping.
    ///
    /// Required: `id`, `data_producao`, `nome_pessoa`, `tipo_peca`,
    /// `data_registro`. Everything else defaults: measurements, prices and
    /// costs to `0.0`, `tipo_argila` to `nenhuma`, `user_id` and `image_path`
    /// to none. Unknown columns (`created_at` and friends) are ignored.
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = value.as_object()
            .ok_or_else(|| Error::InvalidField("record".into(), "expected an object".into()))?;
        let clay_source = match optional_str(map, "tipo_argila")? {
            Some(val) => ClaySource::from_stored(&val)
                .ok_or_else(|| Error::InvalidField("tipo_argila".into(), format!("unknown clay source {:?}", val)))?,
            None => ClaySource::None,
        };
        Ok(Self {
            id: PieceID::new(required_str(map, "id")?),
            user_id: optional_str(map, "user_id")?.map(UserID::new),
            production_date: required_str(map, "data_producao")?,
            person_name: required_str(map, "nome_pessoa")?,
            piece_type: required_str(map, "tipo_peca")?,
            weight_kg: optional_f64(map, "peso_kg")?,
            height_cm: optional_f64(map, "altura_cm")?,
            width_cm: optional_f64(map, "largura_cm")?,
            depth_cm: optional_f64(map, "profundidade_cm")?,
            clay_source,
            own_clay_price_per_kg: optional_f64(map, "preco_argila_propria")?,
            registration_date: required_str(map, "data_registro")?,
            photo_path: optional_str(map, "image_path")?,
            clay_cost: optional_f64(map, "custo_argila")?,
            firing_cost: optional_f64(map, "custo_biscoito")?,
            glaze_cost: optional_f64(map, "custo_esmalte")?,
            total_cost: optional_f64(map, "total")?,
        })
    }

    /// Convert this record into a JSON object for storage.
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self)
            .map_err(|e| Error::InvalidField("record".into(), e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_row() -> Value {
        json!({
            "id": "0c9b6a1e-7d43-4bde-9d6c-5c3c1f0b8e11",
            "user_id": "u-33",
            "created_at": "2024-01-02T10:00:00+00:00",
            "data_producao": "01/01/2024",
            "nome_pessoa": "Ana",
            "tipo_peca": "vase",
            "peso_kg": 2.0,
            "altura_cm": 10,
            "largura_cm": "10.0",
            "profundidade_cm": 5.0,
            "tipo_argila": "propria",
            "preco_argila_propria": 5.0,
            "data_registro": "02/01/2024",
            "image_path": "0c9b6a1e-7d43-4bde-9d6c-5c3c1f0b8e11.jpg",
            "custo_argila": 10.0,
            "custo_biscoito": 26.0,
            "custo_esmalte": 6.5,
            "total": 42.5,
        })
    }

    #[test]
    fn reads_full_row() {
        let record = PieceRecord::from_value(&full_row()).unwrap();
        assert_eq!(record.id, PieceID::new("0c9b6a1e-7d43-4bde-9d6c-5c3c1f0b8e11"));
        assert_eq!(record.user_id, Some(UserID::new("u-33")));
        assert_eq!(record.production_date, "01/01/2024");
        assert_eq!(record.person_name, "Ana");
        assert_eq!(record.piece_type, "vase");
        assert_eq!(record.height_cm, 10.0);
        assert_eq!(record.width_cm, 10.0);
        assert_eq!(record.clay_source, ClaySource::Own);
        assert_eq!(record.own_clay_price_per_kg, 5.0);
        assert_eq!(record.photo_path, Some("0c9b6a1e-7d43-4bde-9d6c-5c3c1f0b8e11.jpg".into()));
        assert_eq!(record.total_cost, 42.5);
    }

    #[test]
    fn optional_fields_default() {
        let row = json!({
            "id": "p-1",
            "data_producao": "01/01/2024",
            "nome_pessoa": "Ana",
            "tipo_peca": "cup",
            "data_registro": "01/01/2024",
            "image_path": null,
        });
        let record = PieceRecord::from_value(&row).unwrap();
        assert_eq!(record.user_id, None);
        assert_eq!(record.weight_kg, 0.0);
        assert_eq!(record.clay_source, ClaySource::None);
        assert_eq!(record.own_clay_price_per_kg, 0.0);
        assert_eq!(record.photo_path, None);
        assert_eq!(record.clay_cost, 0.0);
        assert_eq!(record.total_cost, 0.0);
    }

    #[test]
    fn required_fields_fail() {
        for key in vec!["id", "data_producao", "nome_pessoa", "tipo_peca", "data_registro"] {
            let mut row = full_row();
            row.as_object_mut().unwrap().remove(key);
            assert_eq!(PieceRecord::from_value(&row), Err(Error::MissingField(key.into())));
        }
    }

    #[test]
    fn bad_values_fail() {
        let mut row = full_row();
        row["peso_kg"] = json!("heavy");
        assert!(matches!(PieceRecord::from_value(&row), Err(Error::InvalidField(ref f, _)) if f == "peso_kg"));

        let mut row = full_row();
        row["tipo_argila"] = json!("granite");
        assert!(matches!(PieceRecord::from_value(&row), Err(Error::InvalidField(ref f, _)) if f == "tipo_argila"));

        let mut row = full_row();
        row["nome_pessoa"] = json!(12);
        assert!(matches!(PieceRecord::from_value(&row), Err(Error::InvalidField(ref f, _)) if f == "nome_pessoa"));

        assert!(PieceRecord::from_value(&json!([1, 2, 3])).is_err());
    }

    #[test]
    fn writes_table_columns() {
        let record = PieceRecord::from_value(&full_row()).unwrap();
        let value = record.to_value().unwrap();
        assert_eq!(value["data_producao"], json!("01/01/2024"));
        assert_eq!(value["tipo_argila"], json!("propria"));
        assert_eq!(value["custo_biscoito"], json!(26.0));
        assert_eq!(value["total"], json!(42.5));
        assert!(value.get("created_at").is_none());
        assert_eq!(PieceRecord::from_value(&value).unwrap(), record);
    }
}
