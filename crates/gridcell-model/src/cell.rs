//! The typed GridCell record

use geo_types::Geometry;
use gridcell_core::{GridError, Projection, RecordId, Result, Shape};
use gridcell_schema::{geometry_to_wkt, grid_cell_schema, parse_geometry, validate_record};
use serde_json::{Map, Value};

/// One cell of a spatial grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    /// Row id assigned by a store, if the cell has been persisted
    pub id: Option<RecordId>,
    /// Shape class code (see [`Shape`])
    pub shape: i32,
    pub level: i32,
    /// Cell boundary
    pub geom: Geometry<f64>,
    /// SRID of the grid the cell was generated in
    pub proj: i32,
    /// Identity key; unique within a cell set
    pub hash: i64,
    /// Free-form metadata
    pub info: Option<Map<String, Value>>,
}

impl GridCell {
    pub fn new(shape: Shape, level: i32, geom: Geometry<f64>, proj: Projection, hash: i64) -> Self {
        Self {
            id: None,
            shape: shape.code(),
            level,
            geom,
            proj: proj.srid(),
            hash,
            info: None,
        }
    }

    pub fn with_info(mut self, info: Map<String, Value>) -> Self {
        self.info = Some(info);
        self
    }

    pub fn with_id(mut self, id: RecordId) -> Self {
        self.id = Some(id);
        self
    }

    /// The shape class, when `shape` is one of the known codes
    pub fn shape_kind(&self) -> Option<Shape> {
        Shape::from_code(self.shape)
    }

    pub fn projection(&self) -> Projection {
        Projection::from_srid(self.proj)
    }

    /// Build a cell from its JSON document form.
    ///
    /// The document is validated against the `GridCell` schema first, so a
    /// missing required field surfaces as `MissingField`. A positive `id` is
    /// kept; other unknown keys are ignored.
    pub fn from_json(doc: &Value) -> Result<Self> {
        validate_record(grid_cell_schema(), doc)?;
        let table = doc
            .as_object()
            .ok_or_else(|| GridError::InvalidRecord("GridCell record must be a JSON object".into()))?;

        let geom_text = table
            .get("geom")
            .and_then(Value::as_str)
            .ok_or_else(|| GridError::MissingField("geom".into()))?;

        Ok(Self {
            id: table
                .get("id")
                .and_then(Value::as_i64)
                .and_then(RecordId::from_signed),
            shape: int32_field(table, "shape")?,
            level: int32_field(table, "level")?,
            geom: parse_geometry("geom", geom_text)?,
            proj: int32_field(table, "proj")?,
            hash: int64_field(table, "hash")?,
            info: table.get("info").and_then(Value::as_object).cloned(),
        })
    }

    /// JSON document form: integers as numbers, `geom` as WKT text, `info`
    /// only when present.
    pub fn to_json(&self) -> Value {
        let mut table = Map::new();
        if let Some(id) = self.id {
            table.insert("id".into(), Value::from(id.raw()));
        }
        table.insert("shape".into(), Value::from(self.shape));
        table.insert("level".into(), Value::from(self.level));
        table.insert("geom".into(), Value::String(geometry_to_wkt(&self.geom)));
        table.insert("proj".into(), Value::from(self.proj));
        table.insert("hash".into(), Value::from(self.hash));
        if let Some(info) = &self.info {
            table.insert("info".into(), Value::Object(info.clone()));
        }
        Value::Object(table)
    }

    /// Overwrite the fields present in a JSON document.
    ///
    /// The update is applied to a copy and validated as a whole; on error the
    /// cell is left unchanged. A null `info` clears it; a null required field
    /// is rejected. A non-positive `id` keeps the current one.
    pub fn update(&mut self, doc: &Value) -> Result<()> {
        let changes = doc
            .as_object()
            .ok_or_else(|| GridError::InvalidRecord("GridCell update must be a JSON object".into()))?;

        let mut merged = match self.to_json() {
            Value::Object(table) => table,
            _ => Map::new(),
        };
        for (key, value) in changes {
            merged.insert(key.clone(), value.clone());
        }

        let mut updated = Self::from_json(&Value::Object(merged))?;
        if updated.id.is_none() {
            updated.id = self.id;
        }
        *self = updated;
        Ok(())
    }
}

fn int64_field(table: &Map<String, Value>, name: &str) -> Result<i64> {
    let value = table
        .get(name)
        .ok_or_else(|| GridError::MissingField(name.to_string()))?;
    value.as_i64().ok_or_else(|| GridError::ValueOutOfRange {
        field: name.to_string(),
        value: value.to_string(),
    })
}

fn int32_field(table: &Map<String, Value>, name: &str) -> Result<i32> {
    let wide = int64_field(table, name)?;
    i32::try_from(wide).map_err(|_| GridError::ValueOutOfRange {
        field: name.to_string(),
        value: wide.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{polygon, Point};
    use serde_json::json;

    fn square() -> Geometry<f64> {
        Geometry::Polygon(polygon![
            (x: -77.0, y: 38.0),
            (x: -76.0, y: 38.0),
            (x: -76.0, y: 39.0),
            (x: -77.0, y: 39.0),
            (x: -77.0, y: 38.0),
        ])
    }

    fn document() -> Value {
        json!({
            "shape": 1,
            "level": 2,
            "geom": "POLYGON((-77 38,-76 38,-76 39,-77 39,-77 38))",
            "proj": 4326,
            "hash": 123456
        })
    }

    #[test]
    fn test_from_json() {
        let cell = GridCell::from_json(&document()).unwrap();
        assert_eq!(cell.shape_kind(), Some(Shape::Square));
        assert_eq!(cell.level, 2);
        assert_eq!(cell.projection(), Projection::WGS84);
        assert_eq!(cell.hash, 123456);
        assert_eq!(cell.geom, square());
        assert!(cell.info.is_none());
        assert!(cell.id.is_none());
    }

    #[test]
    fn test_from_json_missing_hash() {
        let mut doc = document();
        doc.as_object_mut().unwrap().remove("hash");
        assert!(matches!(
            GridCell::from_json(&doc),
            Err(GridError::MissingField(f)) if f == "hash"
        ));
    }

    #[test]
    fn test_from_json_keeps_positive_id() {
        let mut doc = document();
        doc["id"] = json!(99);
        assert_eq!(GridCell::from_json(&doc).unwrap().id, RecordId::new(99));

        doc["id"] = json!(0);
        assert!(GridCell::from_json(&doc).unwrap().id.is_none());
    }

    #[test]
    fn test_level_out_of_i32_range() {
        let mut doc = document();
        doc["level"] = json!(i64::from(i32::MAX) + 1);
        assert!(matches!(
            GridCell::from_json(&doc),
            Err(GridError::ValueOutOfRange { field, .. }) if field == "level"
        ));
    }

    #[test]
    fn test_hash_beyond_i64() {
        let mut doc = document();
        doc["hash"] = json!(u64::MAX);
        assert!(matches!(
            GridCell::from_json(&doc),
            Err(GridError::ValueOutOfRange { field, .. }) if field == "hash"
        ));
    }

    #[test]
    fn test_to_json_revalidates() {
        let mut info = Map::new();
        info.insert("source".into(), json!("builder"));
        let cell = GridCell::new(Shape::Hexagon, 4, square(), Projection::BEHRMANN, -42)
            .with_info(info)
            .with_id(RecordId::new(7).unwrap());

        let doc = cell.to_json();
        assert_eq!(doc["shape"], 2);
        assert_eq!(doc["proj"], 54017);
        assert_eq!(doc["id"], 7);
        assert!(validate_record(grid_cell_schema(), &doc).is_ok());
        assert_eq!(GridCell::from_json(&doc).unwrap(), cell);
    }

    #[test]
    fn test_unknown_shape_code_is_kept() {
        let mut doc = document();
        doc["shape"] = json!(6);
        let cell = GridCell::from_json(&doc).unwrap();
        assert_eq!(cell.shape, 6);
        assert_eq!(cell.shape_kind(), None);
    }

    #[test]
    fn test_update_partial() {
        let mut cell = GridCell::from_json(&document()).unwrap().with_id(RecordId::new(3).unwrap());
        cell.update(&json!({ "level": 5, "info": { "note": "resampled" }, "geom": "POINT(1 2)" }))
            .unwrap();

        assert_eq!(cell.level, 5);
        assert_eq!(cell.hash, 123456);
        assert_eq!(cell.geom, Geometry::Point(Point::new(1.0, 2.0)));
        assert_eq!(cell.info.as_ref().unwrap()["note"], "resampled");
        assert_eq!(cell.id, RecordId::new(3));

        cell.update(&json!({ "info": null })).unwrap();
        assert!(cell.info.is_none());
    }

    #[test]
    fn test_update_rejects_null_required_and_leaves_cell() {
        let mut cell = GridCell::from_json(&document()).unwrap();
        let before = cell.clone();

        assert!(matches!(
            cell.update(&json!({ "level": 9, "hash": null })),
            Err(GridError::MissingField(f)) if f == "hash"
        ));
        assert_eq!(cell, before);
    }
}
