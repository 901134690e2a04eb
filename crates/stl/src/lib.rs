use byteorder::{LittleEndian, ReadBytesExt};
use meshdiff_mesh::{DefaultMesh, Triangle, TriangleMesh, Vector3};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

const HEADER_LEN: u64 = 80;
const TRIANGLE_LEN: u64 = 50;

fn invalid_data<E>(error: E) -> std::io::Error
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    std::io::Error::new(std::io::ErrorKind::InvalidData, error)
}

fn read_vector<T: Read>(f: &mut T) -> std::io::Result<Vector3> {
    Ok(Vector3 {
        x: f.read_f32::<LittleEndian>()? as f64,
        y: f.read_f32::<LittleEndian>()? as f64,
        z: f.read_f32::<LittleEndian>()? as f64,
    })
}

fn read_binary<M: TriangleMesh, T: Read + Seek>(f: &mut T) -> std::io::Result<M> {
    let len = f.seek(SeekFrom::End(0))?;

    // Binary files start with an 80 byte header. There is no defined structure for this
    // header but some implementations will stash some metadata in this header. For now
    // we'll just skip the header and load the geometry.
    f.seek(SeekFrom::Start(HEADER_LEN))?;

    // Immediately following the header is an unsigned 32-bit integer that indicates the
    // number of triagles that follow.
    let n_triangles = f.read_u32::<LittleEndian>()? as usize;

    // The count is untrusted; it must fit in what is left of the stream before anything is
    // allocated for it.
    let available = len.saturating_sub(HEADER_LEN + 4) / TRIANGLE_LEN;
    if n_triangles as u64 > available {
        return Err(invalid_data(format!(
            "header declares {n_triangles} triangles but the file holds at most {available}"
        )));
    }

    let mut data = Vec::<Triangle>::with_capacity(n_triangles);
    for _ in 0..n_triangles {
        // Each triangle is specified by a normal vector followed by 3 verticies of the
        // triangle. While the normal vector may be included, it is generally expected
        // that verticies be listed in counter-clockwise order and so the normal vector
        // maybe specified as (0, 0, 0). We derive normals from the winding instead.
        let _normal = read_vector(f)?;
        data.push(Triangle {
            p0: read_vector(f)?,
            p1: read_vector(f)?,
            p2: read_vector(f)?,
        });
        // After the triangle geometry there is a 2-byte unsigned integer called the
        // "attribute byte count". There is no standard structure of this field, but
        // some applications use this for color data.
        let _attribute_byte_count = f.read_u16::<LittleEndian>()?;
    }
    Ok(M::from_triangles(data))
}

fn parse_coordinate(token: Option<&str>, line: usize) -> std::io::Result<f64> {
    let token = token.ok_or_else(|| invalid_data(format!("line {line}: missing coordinate")))?;
    token
        .parse::<f64>()
        .map_err(|e| invalid_data(format!("line {line}: bad coordinate {token:?}: {e}")))
}

fn read_ascii<M: TriangleMesh, T: BufRead>(f: T) -> std::io::Result<M> {
    // ASCII files are a sequence of blocks of the form:
    //
    //   facet normal nx ny nz
    //     outer loop
    //       vertex x y z
    //       vertex x y z
    //       vertex x y z
    //     endloop
    //   endfacet
    //
    // wrapped in `solid <name>` / `endsolid <name>`. Keywords are matched without regard
    // to case since exporters disagree on it.
    let mut data = Vec::<Triangle>::new();
    let mut corners = Vec::<Vector3>::with_capacity(3);
    let mut in_facet = false;
    for (i, line) in f.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;
        let mut tokens = line.split_whitespace();
        let Some(keyword) = tokens.next() else {
            continue;
        };
        match keyword.to_ascii_lowercase().as_str() {
            "facet" => {
                in_facet = true;
                corners.clear();
            }
            "vertex" => {
                if !in_facet {
                    return Err(invalid_data(format!(
                        "line {line_no}: vertex outside of a facet"
                    )));
                }
                corners.push(Vector3 {
                    x: parse_coordinate(tokens.next(), line_no)?,
                    y: parse_coordinate(tokens.next(), line_no)?,
                    z: parse_coordinate(tokens.next(), line_no)?,
                });
            }
            "endfacet" => {
                if corners.len() != 3 {
                    return Err(invalid_data(format!(
                        "line {line_no}: facet has {} vertices, expected 3",
                        corners.len()
                    )));
                }
                data.push(Triangle::new(corners[0], corners[1], corners[2]));
                in_facet = false;
            }
            "endsolid" => break,
            // `solid`, `outer loop` and `endloop` carry no geometry.
            _ => (),
        }
    }
    Ok(M::from_triangles(data))
}

/// Returns true if the stream holds an ASCII STL.
///
/// Binary headers are free-form and some exporters write `solid` into them, so a leading
/// `solid` only counts when the stream length does not match the binary layout implied by
/// the triangle count.
fn is_ascii<T: Read + Seek>(f: &mut T) -> std::io::Result<bool> {
    let len = f.seek(SeekFrom::End(0))?;
    f.seek(SeekFrom::Start(0))?;

    let mut header = Vec::with_capacity(HEADER_LEN as usize + 4);
    f.by_ref()
        .take(HEADER_LEN + 4)
        .read_to_end(&mut header)?;
    f.seek(SeekFrom::Start(0))?;

    let starts_with_solid = header
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .and_then(|start| header.get(start..start + 5))
        .map_or(false, |keyword| keyword.eq_ignore_ascii_case(b"solid"));
    if !starts_with_solid {
        return Ok(false);
    }
    if header.len() < HEADER_LEN as usize + 4 {
        return Ok(true);
    }
    let count_bytes = &header[HEADER_LEN as usize..];
    let count = u32::from_le_bytes([
        count_bytes[0],
        count_bytes[1],
        count_bytes[2],
        count_bytes[3],
    ]) as u64;
    Ok(len != HEADER_LEN + 4 + count * TRIANGLE_LEN)
}

fn read_any<M: TriangleMesh, T: Read + Seek>(f: &mut T) -> std::io::Result<M> {
    if is_ascii(f)? {
        read_ascii(BufReader::new(f))
    } else {
        read_binary(f)
    }
}

pub fn read_stl<M: TriangleMesh, P: AsRef<Path>>(p: P) -> std::io::Result<M> {
    let mut f = std::fs::File::open(p)?;
    read_any(&mut f)
}

pub fn parse_stl<M: TriangleMesh>(data: &[u8]) -> std::io::Result<M> {
    let mut c = std::io::Cursor::new(data);
    read_any(&mut c)
}

/// Loads an STL file into the default mesh type.
///
/// With `process` set, duplicate vertices are merged and winding is made consistent (see
/// [`DefaultMesh::process`]); STL stores every facet corner separately so this is what
/// turns the triangle soup into a connected mesh.
pub fn load_mesh<P: AsRef<Path>>(p: P, process: bool) -> std::io::Result<DefaultMesh> {
    let path = p.as_ref();
    let mesh = read_stl::<DefaultMesh, _>(path)?;
    log::debug!(
        "read {} triangles from {}",
        mesh.triangle_count(),
        path.display()
    );
    Ok(if process { mesh.process() } else { mesh })
}

pub trait StlReader: Read {
    fn read_stl<M: TriangleMesh>(&mut self) -> std::io::Result<M>;
}

impl<T: Read + Seek> StlReader for T {
    fn read_stl<M: TriangleMesh>(&mut self) -> std::io::Result<M> {
        read_any(self)
    }
}
