//! Reading and writing diagrams in a simple line based text format.
//!
//! The file stores the sites in insertion order together with the topology of
//! the diagram. Reading a file re-inserts the sites in the same order (which
//! reproduces the same diagram) and then checks that the resulting topology
//! matches the stored one. Example for the diagram of three sites:
//!
//! ```text
//! voronoi-hds 1
//! sites 3
//! 0 0
//! 4 0
//! 0 4
//! faces 3
//! 0 2 1 2
//! 1 2 0 2
//! 2 2 0 1
//! vertices 1
//! 2 2 0 1 2
//! end
//! ```
//!
//! - A face line holds the face's site, the number of half-edges on its
//!   boundary and the sites of the neighboring faces in boundary order,
//!   starting with the smallest one.
//! - A vertex line holds the position and the three sites of the dual
//!   triangle in ascending order. Vertices are sorted by these sites.
//! - Coordinates are written in the shortest form that parses back to the
//!   same `f64`.
//! - Empty lines and lines starting with `#` are ignored.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::Path,
    str::FromStr,
};

use failure::Fail;
use tracing::debug;

use crate::{
    diagram::{Circulator, Config, VoronoiDiagram},
    handle::{FaceHandle, SiteHandle},
    math::Point,
};




const MAGIC: &str = "voronoi-hds";
const VERSION: u32 = 1;

/// Upper bound for preallocating from counts stored in a file.
const MAX_PREALLOC: usize = 1 << 16;


#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "IO error: {}", _0)]
    Io(io::Error),

    #[fail(display = "parse error in line {}: {}", line, msg)]
    Parse {
        line: usize,
        msg: String,
    },

    #[fail(display = "file does not match the rebuilt diagram: {}", _0)]
    TopologyMismatch(String),
}

impl From<io::Error> for Error {
    fn from(src: io::Error) -> Self {
        Error::Io(src)
    }
}

fn mismatch<T>(msg: String) -> Result<T, Error> {
    Err(Error::TopologyMismatch(msg))
}


/// Everything stored in a file.
#[derive(Debug, Default, PartialEq)]
struct Contents {
    sites: Vec<Point>,
    faces: Vec<(SiteHandle, Vec<SiteHandle>)>,
    vertices: Vec<(Point, [SiteHandle; 3])>,
}

impl<C: Config> VoronoiDiagram<C> {
    /// Writes the diagram to the file given by the path. Overwrites the file
    /// if it already exists.
    pub fn file_output(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let mut w = BufWriter::new(File::create(path)?);
        self.write_to(&mut w)?;
        w.flush()?;
        Ok(())
    }

    /// Replaces the contents of this diagram with the diagram stored in the
    /// file given by the path.
    ///
    /// The diagram is cleared first. If an error occurs, the diagram contains
    /// whatever was read up to that point.
    pub fn file_input(&mut self, path: impl AsRef<Path>) -> Result<(), Error> {
        self.read_from(BufReader::new(File::open(path)?))
    }

    /// Writes the diagram into the given `Write` instance.
    pub fn write_to(&self, mut w: impl Write) -> Result<(), Error> {
        let contents = self.contents();

        writeln!(w, "{} {}", MAGIC, VERSION)?;
        writeln!(w, "sites {}", contents.sites.len())?;
        for p in &contents.sites {
            writeln!(w, "{} {}", p.x, p.y)?;
        }

        writeln!(w, "faces {}", contents.faces.len())?;
        for (site, neighbors) in &contents.faces {
            write!(w, "{} {}", site.idx(), neighbors.len())?;
            for n in neighbors {
                write!(w, " {}", n.idx())?;
            }
            writeln!(w)?;
        }

        writeln!(w, "vertices {}", contents.vertices.len())?;
        for (p, [a, b, c]) in &contents.vertices {
            writeln!(w, "{} {} {} {} {}", p.x, p.y, a.idx(), b.idx(), c.idx())?;
        }
        writeln!(w, "end")?;

        Ok(())
    }

    /// Replaces the contents of this diagram with the diagram read from the
    /// given reader. See [`file_input`](Self::file_input).
    pub fn read_from(&mut self, r: impl BufRead) -> Result<(), Error> {
        let stored = parse(r)?;

        self.clear();
        for (i, &p) in stored.sites.iter().enumerate() {
            if !p.x.is_finite() || !p.y.is_finite() {
                return mismatch(format!("site {} has non-finite coordinates", i));
            }
            let before = self.number_of_faces();
            self.insert(p);
            if self.number_of_faces() == before {
                return mismatch(format!("site {} is a duplicate", i));
            }
        }

        let rebuilt = self.contents();
        if rebuilt.faces.len() != stored.faces.len() {
            return mismatch(format!(
                "{} faces stored, but {} rebuilt",
                stored.faces.len(),
                rebuilt.faces.len(),
            ));
        }
        for (stored, rebuilt) in stored.faces.iter().zip(&rebuilt.faces) {
            if stored != rebuilt {
                return mismatch(format!(
                    "boundary of the face of {:?} is {:?}, but stored as {:?}",
                    rebuilt.0,
                    rebuilt.1,
                    stored,
                ));
            }
        }

        if rebuilt.vertices.len() != stored.vertices.len() {
            return mismatch(format!(
                "{} vertices stored, but {} rebuilt",
                stored.vertices.len(),
                rebuilt.vertices.len(),
            ));
        }
        for (stored, rebuilt) in stored.vertices.iter().zip(&rebuilt.vertices) {
            if stored != rebuilt {
                return mismatch(format!("vertex {:?} stored as {:?}", rebuilt, stored));
            }
        }

        debug!(
            sites = self.number_of_faces(),
            vertices = self.number_of_vertices(),
            "read Voronoi diagram",
        );
        Ok(())
    }

    fn contents(&self) -> Contents {
        let sites = self.tri.sites().map(|(_, p)| p).collect();

        let faces = self.site_faces.iter()
            .map(|&fh| (self.faces[fh].site, self.boundary_sites(fh)))
            .collect();

        let mut vertices = self.vertices.values()
            .map(|v| {
                let mut sites = self.tri.face_vertices(v.dual);
                sites.sort();
                (v.position, sites)
            })
            .collect::<Vec<_>>();
        vertices.sort_by_key(|&(_, sites)| sites);

        Contents { sites, faces, vertices }
    }

    /// The sites of the neighboring faces in boundary order, starting with
    /// the smallest.
    fn boundary_sites(&self, fh: FaceHandle) -> Vec<SiteHandle> {
        let mut out = match self.ccb_halfedges(fh) {
            None => return vec![],
            Some(ccb) => ccb.lap().map(|he| self.halfedges[he].dual.to).collect::<Vec<_>>(),
        };

        let min_pos = out.iter()
            .enumerate()
            .min_by_key(|&(_, s)| s)
            .map(|(i, _)| i)
            .unwrap_or(0);
        out.rotate_left(min_pos);
        out
    }
}


// ===============================================================================================
// ===== Parsing
// ===============================================================================================

struct Lines<R> {
    inner: io::Lines<R>,
    line: usize,
}

impl<R: BufRead> Lines<R> {
    fn error<T>(&self, msg: impl Into<String>) -> Result<T, Error> {
        Err(Error::Parse { line: self.line, msg: msg.into() })
    }

    /// Returns the next line that is neither empty nor a comment.
    fn next_line(&mut self) -> Result<String, Error> {
        loop {
            let line = match self.inner.next() {
                Some(line) => line?,
                None => return self.error("unexpected end of file"),
            };
            self.line += 1;

            let trimmed = line.trim();
            if !trimmed.is_empty() && !trimmed.starts_with('#') {
                return Ok(trimmed.to_string());
            }
        }
    }

    /// Parses a line of the form `<keyword> <count>`.
    fn counted(&mut self, keyword: &str) -> Result<usize, Error> {
        let line = self.next_line()?;
        let mut parts = line.split_whitespace();
        if parts.next() != Some(keyword) {
            return self.error(format!("expected '{} <count>', found '{}'", keyword, line));
        }

        match (parts.next().map(str::parse), parts.next()) {
            (Some(Ok(count)), None) => Ok(count),
            _ => self.error(format!("expected '{} <count>', found '{}'", keyword, line)),
        }
    }

    /// Parses a line of whitespace separated values.
    fn values<T: FromStr>(&mut self) -> Result<Vec<T>, Error> {
        let line = self.next_line()?;
        let mut out = Vec::new();
        for part in line.split_whitespace() {
            match part.parse() {
                Ok(v) => out.push(v),
                Err(_) => return self.error(format!("invalid value '{}'", part)),
            }
        }
        Ok(out)
    }
}

fn site_handle(idx: u64, num_sites: usize, line: usize) -> Result<SiteHandle, Error> {
    if idx < num_sites as u64 {
        Ok(SiteHandle::from_usize(idx as usize))
    } else {
        Err(Error::Parse { line, msg: format!("site index {} out of range", idx) })
    }
}

fn parse(r: impl BufRead) -> Result<Contents, Error> {
    let mut lines = Lines { inner: r.lines(), line: 0 };

    let header = lines.next_line()?;
    if header != format!("{} {}", MAGIC, VERSION) {
        return lines.error(format!("expected header '{} {}', found '{}'", MAGIC, VERSION, header));
    }

    let num_sites = lines.counted("sites")?;
    let mut sites = Vec::with_capacity(num_sites.min(MAX_PREALLOC));
    for _ in 0..num_sites {
        match lines.values::<f64>()?[..] {
            [x, y] => sites.push(Point::new(x, y)),
            _ => return lines.error("expected two coordinates"),
        }
    }

    let num_faces = lines.counted("faces")?;
    let mut faces = Vec::with_capacity(num_faces.min(MAX_PREALLOC));
    for _ in 0..num_faces {
        let values = lines.values::<u64>()?;
        let (s, degree) = match values[..] {
            [s, degree, ..] => (s, degree),
            _ => return lines.error("expected site and degree"),
        };
        let found = values.len() - 2;
        if degree != found as u64 {
            return lines.error(format!("expected {} neighbors, found {}", degree, found));
        }

        let neighbors = values[2..].iter()
            .map(|&n| site_handle(n, num_sites, lines.line))
            .collect::<Result<Vec<_>, _>>()?;
        faces.push((site_handle(s, num_sites, lines.line)?, neighbors));
    }

    let num_vertices = lines.counted("vertices")?;
    let mut vertices = Vec::with_capacity(num_vertices.min(MAX_PREALLOC));
    for _ in 0..num_vertices {
        let values = lines.values::<String>()?;
        let line_no = lines.line;
        let parsed = match &values[..] {
            [x, y, a, b, c] => {
                let coords = (x.parse::<f64>(), y.parse::<f64>());
                let sites = (a.parse::<u64>(), b.parse::<u64>(), c.parse::<u64>());
                match (coords, sites) {
                    ((Ok(x), Ok(y)), (Ok(a), Ok(b), Ok(c))) => Some((x, y, a, b, c)),
                    _ => None,
                }
            }
            _ => None,
        };

        match parsed {
            Some((x, y, a, b, c)) => {
                let sites = [
                    site_handle(a, num_sites, line_no)?,
                    site_handle(b, num_sites, line_no)?,
                    site_handle(c, num_sites, line_no)?,
                ];
                vertices.push((Point::new(x, y), sites));
            }
            None => {
                return Err(Error::Parse {
                    line: line_no,
                    msg: "expected 'x y a b c' for vertex".into(),
                });
            }
        }
    }

    if lines.next_line()? != "end" {
        return lines.error("expected 'end'");
    }

    Ok(Contents { sites, faces, vertices })
}
