//! Projection lookup command

use anyhow::Result;
use gridcell_core::{Projection, KNOWN_PROJECTIONS};

pub fn run(name: Option<&str>, list: bool) -> Result<()> {
    if list {
        for p in KNOWN_PROJECTIONS {
            let alias = p.alias.map(|a| format!(" ({})", a)).unwrap_or_default();
            println!("  EPSG:{:<7} {}{}", p.srid, p.name, alias);
        }
        return Ok(());
    }

    let Some(name) = name else {
        anyhow::bail!("Give a projection name or EPSG code, or pass --list");
    };

    let projection: Projection = name.parse()?;
    println!("{}  {}", projection, projection.display_name());
    Ok(())
}
