//! Projection (spatial reference system) codes

use crate::error::{GridError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An EPSG spatial reference identifier, as stored in the `proj` field.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Projection(i32);

/// A catalogue entry for a projection worth knowing by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KnownProjection {
    pub srid: i32,
    pub name: &'static str,
    /// Short alias accepted by [`Projection::from_str`], if any
    pub alias: Option<&'static str>,
}

/// Polar, southern and global projections commonly used for global grids.
pub const KNOWN_PROJECTIONS: &[KnownProjection] = &[
    // Northern/polar
    KnownProjection { srid: 3408, name: "NSIDC EASE-Grid North", alias: None },
    KnownProjection { srid: 3411, name: "NSIDC Sea Ice Polar Stereographic North", alias: None },
    // Southern/polar
    KnownProjection { srid: 3031, name: "Antarctic Polar Stereographic", alias: None },
    KnownProjection { srid: 3409, name: "NSIDC EASE-Grid South", alias: None },
    KnownProjection { srid: 3412, name: "NSIDC Sea Ice Polar Stereographic South", alias: None },
    KnownProjection { srid: 32761, name: "UPS South", alias: None },
    // Global
    KnownProjection { srid: 3410, name: "NSIDC EASE-Grid Global", alias: None },
    KnownProjection { srid: 4326, name: "WGS 84 (geographic)", alias: Some("wgs84") },
    KnownProjection { srid: 3395, name: "World Mercator", alias: Some("mercator") },
    KnownProjection { srid: 3857, name: "Web Mercator", alias: Some("google") },
    KnownProjection { srid: 54017, name: "Behrmann Cylindrical Equal Area", alias: Some("behrmann") },
    KnownProjection { srid: 900913, name: "Google (legacy Web Mercator)", alias: None },
];

impl Projection {
    pub const WGS84: Projection = Projection(4326);
    pub const WEB_MERCATOR: Projection = Projection(3857);
    pub const BEHRMANN: Projection = Projection(54017);

    pub const fn from_srid(srid: i32) -> Self {
        Self(srid)
    }

    pub const fn srid(self) -> i32 {
        self.0
    }

    /// Catalogue entry for this SRID, if it is a well-known one
    pub fn known(self) -> Option<&'static KnownProjection> {
        KNOWN_PROJECTIONS.iter().find(|p| p.srid == self.0)
    }

    /// Display name, falling back to `EPSG:<srid>`
    pub fn display_name(self) -> String {
        match self.known() {
            Some(p) => p.name.to_string(),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.0)
    }
}

impl FromStr for Projection {
    type Err = GridError;

    /// Resolves a projection alias (`behrmann`, `google`, ...), an
    /// `EPSG:<n>` code, or a bare SRID.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();

        if let Some(p) = KNOWN_PROJECTIONS
            .iter()
            .find(|p| p.alias == Some(lower.as_str()))
        {
            return Ok(Self(p.srid));
        }

        let code = lower.strip_prefix("epsg:").unwrap_or(&lower);
        code.parse::<i32>()
            .ok()
            .filter(|srid| *srid > 0)
            .map(Self)
            .ok_or_else(|| GridError::UnknownProjection(trimmed.to_string()))
    }
}
