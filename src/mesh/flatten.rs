use std::fmt;

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceVertex {
    pub position: u32,
    pub normal: u32,
    pub texcoord: u32,
}

impl FaceVertex {
    pub fn new(position: u32, normal: u32, texcoord: u32) -> Self {
        Self {
            position,
            normal,
            texcoord,
        }
    }
}

/// Attribute pools as an OBJ file stores them: each face-vertex carries its
/// own index into every pool.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IndexedMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub texcoords: Vec<[f32; 2]>,
    pub face_vertices: Vec<FaceVertex>,
}

/// One entry per face-vertex in draw order, ready for a non-indexed draw.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlatMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub texcoords: Vec<[f32; 2]>,
}

impl FlatMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pool {
    Positions,
    Normals,
    Texcoords,
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Pool::Positions => "position",
            Pool::Normals => "normal",
            Pool::Texcoords => "texcoord",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FlattenError {
    #[error("{pool} index {index} out of range (pool has {len} entries) at face-vertex {occurrence}")]
    IndexOutOfRange {
        pool: Pool,
        occurrence: usize,
        index: u32,
        len: usize,
    },
}

fn fetch<T: Copy>(pool: Pool, items: &[T], index: u32, occurrence: usize) -> Result<T, FlattenError> {
    items
        .get(index as usize)
        .copied()
        .ok_or(FlattenError::IndexOutOfRange {
            pool,
            occurrence,
            index,
            len: items.len(),
        })
}

pub fn flatten(mesh: &IndexedMesh) -> Result<FlatMesh, FlattenError> {
    let count = mesh.face_vertices.len();
    let mut flat = FlatMesh {
        positions: Vec::with_capacity(count),
        normals: Vec::with_capacity(count),
        texcoords: Vec::with_capacity(count),
    };

    for (occurrence, fv) in mesh.face_vertices.iter().enumerate() {
        flat.positions
            .push(fetch(Pool::Positions, &mesh.positions, fv.position, occurrence)?);
        flat.normals
            .push(fetch(Pool::Normals, &mesh.normals, fv.normal, occurrence)?);
        flat.texcoords
            .push(fetch(Pool::Texcoords, &mesh.texcoords, fv.texcoord, occurrence)?);
    }

    Ok(flat)
}
