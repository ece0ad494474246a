//! # Material Library Parser
//!
//! Reads the `.mtl` companion format into a table of named diffuse-color
//! records. Only `newmtl` and `Kd` are understood; everything else is
//! ignored. Duplicate `newmtl` names overwrite the earlier entry.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use cgmath::Vector3;

use crate::error::{Error, Result};

/// One named material record from a library file.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub diffuse: Vector3<f32>,
}

impl Material {
    fn named(name: String) -> Self {
        Material {
            name,
            diffuse: Vector3::new(0.0, 0.0, 0.0),
        }
    }
}

/// Parses a material library file into a name -> material table.
///
/// An unopenable file fails with [`Error::FileUnreadable`]; the geometry
/// parser downgrades that to a warning and continues with an empty table.
pub fn load_mtl(path: &Path) -> Result<HashMap<String, Material>> {
    let file = File::open(path).map_err(|source| Error::FileUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    parse(BufReader::new(file))
}

pub(crate) fn parse<R: BufRead>(reader: R) -> Result<HashMap<String, Material>> {
    let mut table = HashMap::new();
    let mut current: Option<Material> = None;

    for line in reader.lines() {
        let line = line?;
        let mut tokens = line.split_whitespace();
        let Some(token) = tokens.next() else {
            continue;
        };

        if token.starts_with('#') {
            continue;
        }

        match token {
            "newmtl" => {
                if let Some(material) = current.take() {
                    table.insert(material.name.clone(), material);
                }
                let Some(name) = tokens.next() else {
                    continue;
                };
                current = Some(Material::named(name.to_string()));
            }
            "Kd" => {
                // A Kd before any newmtl has nothing to apply to.
                if let Some(material) = current.as_mut() {
                    material.diffuse = Vector3::new(
                        parse_component(tokens.next()),
                        parse_component(tokens.next()),
                        parse_component(tokens.next()),
                    );
                }
            }
            _ => {}
        }
    }

    if let Some(material) = current.take() {
        table.insert(material.name.clone(), material);
    }

    Ok(table)
}

fn parse_component(token: Option<&str>) -> f32 {
    token.and_then(|t| t.parse().ok()).unwrap_or(0.0)
}
