//! # Geometry Parser
//!
//! Line-oriented OBJ parsing: vertex positions plus per-group triangle
//! index lists. Faces carry `v[/vt][/vn]` references but only the vertex
//! index is consumed; texture and normal indices are parsed past and
//! discarded. Unrecognized directives are ignored so newer files still
//! import. Grouping and n-gon behavior follow the [`ImportOptions`] policy
//! pair.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use cgmath::Vector3;
use log::warn;

use crate::error::{Error, Result};
use crate::import::mtl::{self, Material};
use crate::import::{GroupPolicy, ImportOptions, NgonPolicy};

/// A parsed mesh group: its marker name, bound material name, and the
/// triangle indices into the shared position buffer.
///
/// Import-time intermediate only; it dissolves into a scene entity once the
/// pipeline finishes.
#[derive(Debug, Default)]
pub(crate) struct MeshNode {
    pub name: String,
    pub material: Option<String>,
    pub indices: Vec<u32>,
}

/// Everything one OBJ file parses into, before normal synthesis.
#[derive(Debug, Default)]
pub(crate) struct ObjModel {
    pub positions: Vec<Vector3<f32>>,
    pub nodes: Vec<MeshNode>,
    pub materials: HashMap<String, Material>,
}

/// Parses the file at `path`, resolving `mtllib` references relative to its
/// parent directory.
pub(crate) fn parse_file(path: &Path, options: &ImportOptions) -> Result<ObjModel> {
    let file = File::open(path).map_err(|source| Error::FileUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    parse_lines(BufReader::new(file), path.parent(), options)
}

pub(crate) fn parse_lines<R: BufRead>(
    reader: R,
    base_dir: Option<&Path>,
    options: &ImportOptions,
) -> Result<ObjModel> {
    let mut model = ObjModel::default();
    let mut current: Option<MeshNode> = None;
    // Most recent o/g name; material-switch grouping reuses it for every
    // node it opens.
    let mut group_name = String::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = number + 1;
        let mut tokens = line.split_whitespace();
        let Some(token) = tokens.next() else {
            continue;
        };

        if token.starts_with('#') {
            continue;
        }

        match token {
            "mtllib" => {
                let Some(library) = tokens.next() else {
                    continue;
                };
                let library_path = match base_dir {
                    Some(dir) => dir.join(library),
                    None => Path::new(library).to_path_buf(),
                };
                match mtl::load_mtl(&library_path) {
                    Ok(table) => model.materials.extend(table),
                    Err(err) => {
                        // Missing material libraries degrade to defaults.
                        warn!("skipping material library: {err}");
                    }
                }
            }
            "o" | "g" => {
                group_name = tokens.next().unwrap_or("").to_string();
                if options.grouping == GroupPolicy::Markers {
                    close_node(&mut current, &mut model.nodes);
                    current = Some(MeshNode {
                        name: group_name.clone(),
                        ..Default::default()
                    });
                }
            }
            "usemtl" => {
                let material = tokens.next().unwrap_or("").to_string();
                match options.grouping {
                    GroupPolicy::Markers => {
                        open_node(&mut current, &group_name).material = Some(material);
                    }
                    GroupPolicy::MaterialSwitch => {
                        close_node(&mut current, &mut model.nodes);
                        current = Some(MeshNode {
                            name: group_name.clone(),
                            material: Some(material),
                            indices: Vec::new(),
                        });
                    }
                }
            }
            "v" => {
                // Fourth (w) component is accepted and ignored.
                model.positions.push(Vector3::new(
                    parse_coordinate(tokens.next()),
                    parse_coordinate(tokens.next()),
                    parse_coordinate(tokens.next()),
                ));
            }
            "f" => {
                let node = open_node(&mut current, &group_name);
                parse_face(
                    tokens,
                    line_no,
                    model.positions.len(),
                    options.ngons,
                    &mut node.indices,
                )?;
            }
            _ => {}
        }
    }

    close_node(&mut current, &mut model.nodes);
    Ok(model)
}

/// Makes sure a node is open, for files whose faces or material binding
/// precede any `o`/`g` marker.
fn open_node<'a>(current: &'a mut Option<MeshNode>, group_name: &str) -> &'a mut MeshNode {
    current.get_or_insert_with(|| MeshNode {
        name: group_name.to_string(),
        ..Default::default()
    })
}

/// Appends the open node to the finished list. Nodes that never received a
/// face are dropped so they cannot become empty entities.
fn close_node(current: &mut Option<MeshNode>, nodes: &mut Vec<MeshNode>) {
    if let Some(node) = current.take() {
        if !node.indices.is_empty() {
            nodes.push(node);
        }
    }
}

fn parse_coordinate(token: Option<&str>) -> f32 {
    token.and_then(|t| t.parse().ok()).unwrap_or(0.0)
}

/// Parses one face directive, fan-triangulating n-gons (or rejecting them
/// in strict mode) and appending the resulting triangles to `out`.
fn parse_face<'a>(
    references: impl Iterator<Item = &'a str>,
    line: usize,
    vertex_count: usize,
    ngons: NgonPolicy,
    out: &mut Vec<u32>,
) -> Result<()> {
    let mut first = 0u32;
    let mut previous = 0u32;
    let mut count = 0usize;

    for reference in references {
        let index = resolve_reference(reference, line, vertex_count)?;
        match count {
            0 => first = index,
            1 => previous = index,
            2 => {
                out.extend_from_slice(&[first, previous, index]);
                previous = index;
            }
            _ => {
                if ngons == NgonPolicy::Reject {
                    return Err(Error::NonTriangularFace { line });
                }
                // Fan expansion: (first, previous, current) per extra corner.
                out.extend_from_slice(&[first, previous, index]);
                previous = index;
            }
        }
        count += 1;
    }

    if count < 3 {
        return Err(Error::MalformedFace { line, found: count });
    }

    debug_assert!(out.len() % 3 == 0, "triangulation must end on a triangle");
    Ok(())
}

/// Resolves one `v[/vt][/vn]` reference to a zero-based vertex index.
fn resolve_reference(reference: &str, line: usize, vertex_count: usize) -> Result<u32> {
    let vertex_part = reference.split('/').next().unwrap_or("");
    let index: i64 = vertex_part.parse().map_err(|_| Error::InvalidFaceIndex {
        line,
        reference: reference.to_string(),
        vertex_count,
    })?;

    // One-based in the file; zero and negative (relative) references are
    // outside the supported grammar.
    if index < 1 || index as usize > vertex_count {
        return Err(Error::InvalidFaceIndex {
            line,
            reference: reference.to_string(),
            vertex_count,
        });
    }
    Ok((index - 1) as u32)
}
