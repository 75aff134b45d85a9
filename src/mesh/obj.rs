use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::flatten::{FaceVertex, IndexedMesh};

#[derive(Error, Debug)]
pub enum MeshLoadError {
    #[error("failed to open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: tobj::LoadError,
    },
    #[error("{} contains no shapes", .path.display())]
    NoShapes { path: PathBuf },
    #[error("{} has faces without {attribute}", .path.display())]
    MissingAttribute {
        path: PathBuf,
        attribute: &'static str,
    },
}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: false,
        triangulate: true,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

pub fn load_indexed_mesh(path: &Path) -> Result<IndexedMesh, MeshLoadError> {
    let file = File::open(path).map_err(|source| MeshLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_indexed_mesh(&mut BufReader::new(file), path)
}

/// Parses OBJ source and merges every shape into one set of pools, keeping
/// the shapes in file order.
pub fn parse_indexed_mesh<R: BufRead>(
    reader: &mut R,
    path: &Path,
) -> Result<IndexedMesh, MeshLoadError> {
    let (models, _materials) =
        tobj::load_obj_buf(reader, &load_options(), |_| Ok((Vec::new(), Default::default())))
            .map_err(|source| MeshLoadError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

    let mut merged = IndexedMesh::default();

    // tobj reports a single faceless model for sources with no `f` lines
    for model in models.iter().filter(|m| !m.mesh.indices.is_empty()) {
        let mesh = &model.mesh;
        let corners = mesh.indices.len();

        if mesh.normal_indices.len() != corners {
            return Err(MeshLoadError::MissingAttribute {
                path: path.to_path_buf(),
                attribute: "normals",
            });
        }
        if mesh.texcoord_indices.len() != corners {
            return Err(MeshLoadError::MissingAttribute {
                path: path.to_path_buf(),
                attribute: "texture coordinates",
            });
        }

        let position_base = merged.positions.len() as u32;
        let normal_base = merged.normals.len() as u32;
        let texcoord_base = merged.texcoords.len() as u32;

        merged
            .positions
            .extend(mesh.positions.chunks_exact(3).map(|p| [p[0], p[1], p[2]]));
        merged
            .normals
            .extend(mesh.normals.chunks_exact(3).map(|n| [n[0], n[1], n[2]]));
        merged
            .texcoords
            .extend(mesh.texcoords.chunks_exact(2).map(|t| [t[0], t[1]]));

        merged.face_vertices.extend(
            mesh.indices
                .iter()
                .zip(&mesh.normal_indices)
                .zip(&mesh.texcoord_indices)
                .map(|((&p, &n), &t)| {
                    FaceVertex::new(p + position_base, n + normal_base, t + texcoord_base)
                }),
        );

        log::debug!(
            "{}: shape '{}' with {} face-vertices",
            path.display(),
            model.name,
            corners
        );
    }

    if merged.face_vertices.is_empty() {
        return Err(MeshLoadError::NoShapes {
            path: path.to_path_buf(),
        });
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::flatten;

    fn parse(source: &str) -> Result<IndexedMesh, MeshLoadError> {
        parse_indexed_mesh(&mut source.as_bytes(), Path::new("test.obj"))
    }

    const TRIANGLE: &str = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 0
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1
";

    #[test]
    fn triangle_keeps_independent_streams() {
        let mesh = parse(TRIANGLE).unwrap();

        assert_eq!(mesh.face_vertices.len(), 3);
        assert_eq!(mesh.normals.len(), 1);
        assert!(mesh.face_vertices.iter().all(|fv| fv.normal == 0));

        let flat = flatten(&mesh).unwrap();
        assert_eq!(
            flat.positions,
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]
        );
        assert_eq!(flat.texcoords, vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
    }

    #[test]
    fn quads_are_triangulated() {
        let source = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1 4/4/1
";
        let flat = flatten(&parse(source).unwrap()).unwrap();

        assert_eq!(flat.vertex_count(), 6);
        assert!(flat.normals.iter().all(|n| *n == [0.0, 0.0, 1.0]));
        assert!(flat.positions.iter().all(|p| p[2] == 0.0));
    }

    #[test]
    fn shapes_are_merged_in_file_order() {
        let source = "\
o first
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vn 0 0 1
f 1/1/1 2/1/1 3/1/1
o second
v 5 5 5
v 6 5 5
v 5 6 5
vt 1 1
vn 0 1 0
f 4/2/2 5/2/2 6/2/2
";
        let mesh = parse(source).unwrap();
        assert_eq!(mesh.face_vertices.len(), 6);

        let flat = flatten(&mesh).unwrap();
        assert_eq!(flat.positions[0], [0.0, 0.0, 0.0]);
        assert_eq!(flat.positions[3], [5.0, 5.0, 5.0]);
        assert_eq!(flat.normals[3], [0.0, 1.0, 0.0]);
        assert_eq!(flat.texcoords[5], [1.0, 1.0]);
    }

    #[test]
    fn faces_without_normals_are_rejected() {
        let source = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
f 1/1 2/1 3/1
";
        let err = parse(source).unwrap_err();
        assert!(matches!(
            err,
            MeshLoadError::MissingAttribute {
                attribute: "normals",
                ..
            }
        ));
    }

    #[test]
    fn faces_without_texcoords_are_rejected() {
        let source = "\
v 0 0 0
v 1 0 0
v 0 1 0
vn 0 0 1
f 1//1 2//1 3//1
";
        let err = parse(source).unwrap_err();
        assert!(matches!(
            err,
            MeshLoadError::MissingAttribute {
                attribute: "texture coordinates",
                ..
            }
        ));
    }

    #[test]
    fn empty_source_has_no_shapes() {
        let err = parse("").unwrap_err();
        assert!(matches!(err, MeshLoadError::NoShapes { .. }));
    }

    #[test]
    fn vertices_without_faces_have_no_shapes() {
        let source = "\
# just a point cloud
v 0 0 0
v 1 0 0
vn 0 0 1
vt 0 0
";
        let err = parse(source).unwrap_err();
        assert!(matches!(err, MeshLoadError::NoShapes { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_indexed_mesh(Path::new("does/not/exist.obj")).unwrap_err();
        assert!(matches!(err, MeshLoadError::Io { .. }));
    }
}
