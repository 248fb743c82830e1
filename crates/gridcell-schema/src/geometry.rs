//! WKT text form of geometry fields

use geo_types::Geometry;
use gridcell_core::{GridError, Result};
use wkt::{ToWkt, TryFromWkt};

/// Parse the WKT text of a geometry field.
///
/// The geometry must carry at least one coordinate; `GEOMETRYCOLLECTION
/// EMPTY` and friends are rejected.
pub fn parse_geometry(field: &str, text: &str) -> Result<Geometry<f64>> {
    let geom = <Geometry<f64> as TryFromWkt<f64>>::try_from_wkt_str(text.trim()).map_err(|e| {
        GridError::InvalidGeometry {
            field: field.to_string(),
            reason: e.to_string(),
        }
    })?;

    check_geometry(field, &geom)?;
    Ok(geom)
}

/// Reject a geometry with no coordinates
pub fn check_geometry(field: &str, geom: &Geometry<f64>) -> Result<()> {
    if has_coordinates(geom) {
        Ok(())
    } else {
        Err(GridError::InvalidGeometry {
            field: field.to_string(),
            reason: "geometry is empty".to_string(),
        })
    }
}

/// Render a geometry as WKT text
pub fn geometry_to_wkt(geom: &Geometry<f64>) -> String {
    geom.wkt_string()
}

fn has_coordinates(geom: &Geometry<f64>) -> bool {
    match geom {
        Geometry::Point(_) | Geometry::Line(_) | Geometry::Rect(_) | Geometry::Triangle(_) => true,
        Geometry::LineString(ls) => !ls.0.is_empty(),
        Geometry::Polygon(p) => !p.exterior().0.is_empty(),
        Geometry::MultiPoint(mp) => !mp.0.is_empty(),
        Geometry::MultiLineString(mls) => mls.0.iter().any(|ls| !ls.0.is_empty()),
        Geometry::MultiPolygon(mp) => mp.0.iter().any(|p| !p.exterior().0.is_empty()),
        Geometry::GeometryCollection(gc) => gc.0.iter().any(has_coordinates),
    }
}
