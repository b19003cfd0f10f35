//! Point location: which face, edge or vertex contains a query point.

use failure::Fail;
use fxhash::FxHashSet;

use crate::{
    handle::{FaceHandle, HalfedgeHandle, SiteHandle, TriEdge, VertexHandle},
    math::{distance2, lex_cmp, Pos2Like},
};
use super::{Config, VoronoiDiagram};


/// The result of [`VoronoiDiagram::locate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocateResult {
    /// The point lies strictly inside the face.
    Face(FaceHandle),

    /// The point lies on the edge (but not on one of its endpoints). The
    /// returned half-edge is the one on the boundary of the face whose site
    /// is lexicographically smallest.
    Halfedge(HalfedgeHandle),

    /// The point coincides with the vertex.
    Vertex(VertexHandle),
}

#[derive(Debug, Fail, Clone, Copy, PartialEq, Eq)]
pub enum LocateError {
    #[fail(display = "cannot locate a point in an empty Voronoi diagram")]
    EmptyDiagram,
}

impl<C: Config> VoronoiDiagram<C> {
    /// Finds the element of the diagram containing `p`.
    ///
    /// The point lies in the face of its nearest site. If several sites are
    /// equally near, it lies on the boundary between their faces: on an edge
    /// for two sites, on a vertex for three or more. Distances are compared
    /// exactly, without tolerance.
    ///
    /// For four or more cocircular sites, several vertices may coincide with
    /// `p`. Then the vertex of the first triangle (in counter-clockwise order
    /// around the lexicographically smallest of those sites) spanned by three
    /// of them is returned. Repeating a query on an unchanged diagram always
    /// returns the same result.
    pub fn locate(&self, p: impl Pos2Like) -> Result<LocateResult, LocateError> {
        let p = p.to_point();
        let nearest = self.tri.nearest_site(p).ok_or(LocateError::EmptyDiagram)?;
        let best = distance2(self.tri.position(nearest), p);

        // All sites at the same distance are connected by Delaunay edges, as
        // they lie on a circle around `p` with no site inside.
        let mut tied = vec![nearest];
        let mut visited = FxHashSet::default();
        visited.insert(nearest);
        let mut stack = vec![nearest];
        while let Some(s) = stack.pop() {
            for (n, _) in self.tri.ring(s) {
                if n.is_infinite() || visited.contains(&n) {
                    continue;
                }
                visited.insert(n);
                if distance2(self.tri.position(n), p) == best {
                    tied.push(n);
                    stack.push(n);
                }
            }
        }

        tied.sort_by(|&a, &b| lex_cmp(self.tri.position(a), self.tri.position(b)));
        let first = tied[0];
        let face = self.site_faces[first.to_usize()];

        let out = match tied.len() {
            1 => LocateResult::Face(face),
            2 => match self.edges.get(&TriEdge::new(first, tied[1])) {
                Some(&he) => LocateResult::Halfedge(he),
                None => LocateResult::Face(face),
            },
            _ => self.tied_vertex(first, &tied)
                .map(LocateResult::Vertex)
                .unwrap_or(LocateResult::Face(face)),
        };

        Ok(out)
    }

    /// Returns the vertex of the first finite triangle around `center` whose
    /// three sites are all in `tied`.
    fn tied_vertex(&self, center: SiteHandle, tied: &[SiteHandle]) -> Option<VertexHandle> {
        self.tri.ring(center).into_iter()
            .filter_map(|(_, tf)| tf)
            .find(|&tf| {
                self.tri.face_vertices(tf).iter().all(|v| !v.is_infinite() && tied.contains(v))
            })
            .and_then(|tf| self.tri_vertices.get(&tf).copied())
    }
}
