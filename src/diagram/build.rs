//! Keeping the half-edge structure in sync with the triangulation.
//!
//! After the triangulation reports what an insertion changed (an
//! [`InsertionDelta`]), the cells of all touched sites are patched:
//!
//! 1. Half-edge pairs whose Delaunay edge disappeared are removed.
//! 2. Vertices dual to removed triangles are removed, vertices for new finite
//!    triangles are created.
//! 3. The boundary of each touched cell is re-linked from the ring of
//!    triangles around its site, creating twin pairs for new Delaunay edges.
//!
//! All other cells are not affected by the insertion and are left alone.

use optional::{Noned, Optioned as Opt};
use smallvec::SmallVec;
use tracing::trace;

use crate::{
    delaunay::{InsertionDelta, Ring},
    handle::{FaceHandle, HalfedgeHandle, SiteHandle, TriEdge, TriFaceHandle, VertexHandle},
};
use super::{Config, Face, Halfedge, Vertex, VoronoiDiagram};


impl<C: Config> VoronoiDiagram<C> {
    /// Builds the whole half-edge structure from the triangulation. The
    /// diagram has to be empty apart from the triangulation.
    pub(super) fn build_all(&mut self) {
        let sites = self.tri.sites().map(|(s, _)| s).collect::<Vec<_>>();
        for &s in &sites {
            self.add_face(s);
        }

        let created = self.tri.finite_faces().collect::<Vec<_>>();
        self.create_vertices(&created);
        for &s in &sites {
            let ring = self.tri.ring(s);
            self.relink_cell(s, &ring);
        }
    }

    /// Patches the structure after an insertion into the triangulation.
    pub(super) fn apply_delta(&mut self, delta: &InsertionDelta) {
        debug_assert!(delta.inserted);
        debug_assert_eq!(delta.site.to_usize(), self.site_faces.len());
        self.add_face(delta.site);

        let rings = delta.touched_sites.iter()
            .map(|&s| (s, self.tri.ring(s)))
            .collect::<Vec<_>>();

        // Phase 1: find and remove all half-edges whose Delaunay edge is gone.
        // All old boundaries are walked before anything is removed.
        let mut stale = Vec::new();
        for (s, ring) in &rings {
            let fh = self.site_faces[s.to_usize()];
            let start = match self.faces[fh].halfedge.into_option() {
                Some(he) => he,
                None => continue,
            };

            let mut he = start;
            loop {
                let rec = &self.halfedges[he];
                if !ring.iter().any(|&(n, _)| n == rec.dual.to) {
                    stale.push(he);
                }
                he = rec.next;
                if he == start {
                    break;
                }
            }
        }
        for &he in &stale {
            self.remove_pair(he);
        }

        // Phase 2: vertices.
        for tf in &delta.removed_faces {
            if let Some(vh) = self.tri_vertices.remove(tf) {
                self.vertices.remove(vh);
            }
        }
        self.create_vertices(&delta.created_faces);

        // Phase 3: re-link the boundaries of all touched cells.
        for (s, ring) in &rings {
            self.relink_cell(*s, ring);
        }

        trace!(
            site = ?delta.site,
            removed_halfedges = stale.len() * 2,
            touched = rings.len(),
            "patched Voronoi diagram",
        );
    }

    fn add_face(&mut self, site: SiteHandle) -> FaceHandle {
        let fh = self.faces.push(Face {
            halfedge: Opt::none(),
            site,
        });
        self.site_faces.push(fh);
        fh
    }

    /// Creates vertices for all finite triangles in `faces`.
    fn create_vertices(&mut self, faces: &[TriFaceHandle]) {
        for &tf in faces {
            if let Some(position) = self.tri.circumcenter(tf) {
                let vh = self.vertices.push(Vertex {
                    position,
                    outgoing: Opt::none(),
                    dual: tf,
                });
                self.tri_vertices.insert(tf, vh);
            }
        }
    }

    /// Removes the half-edge and its twin, if they still exist.
    fn remove_pair(&mut self, he: HalfedgeHandle) {
        if let Some(rec) = self.halfedges.remove(he) {
            self.halfedges.remove(rec.twin);
            self.edges.remove(&rec.dual);
            self.edges.remove(&rec.dual.reversed());
        }
    }

    /// Returns the half-edge dual to `from -> to`, creating a new twin pair if
    /// it doesn't exist yet. New half-edges are only partially initialized:
    /// their links have to be set by `relink_cell` for both sites.
    fn halfedge_between(&mut self, from: SiteHandle, to: SiteHandle) -> HalfedgeHandle {
        let edge = TriEdge::new(from, to);
        if let Some(&he) = self.edges.get(&edge) {
            return he;
        }

        let dummy = HalfedgeHandle::get_none();
        let partial = |face, dual| Halfedge {
            source: Opt::none(),
            target: Opt::none(),
            next: dummy,
            prev: dummy,
            twin: dummy,
            face,
            dual,
        };

        let out = self.halfedges.push(partial(self.site_faces[from.to_usize()], edge));
        let twin = self.halfedges.push(partial(self.site_faces[to.to_usize()], edge.reversed()));
        self.halfedges[out].twin = twin;
        self.halfedges[twin].twin = out;
        self.edges.insert(edge, out);
        self.edges.insert(edge.reversed(), twin);

        out
    }

    /// Sets up the boundary of the cell of `site` from the ring of neighbors
    /// and triangles around it.
    ///
    /// With neighbors `n_0 .. n_{k-1}` in counter-clockwise order and
    /// triangles `t_i = (site, n_i, n_{i+1})`, the half-edge dual to
    /// `site -> n_i` goes from the vertex of `t_{i-1}` to the vertex of `t_i`.
    /// Neighbors at infinity don't have a half-edge.
    fn relink_cell(&mut self, site: SiteHandle, ring: &Ring) {
        let fh = self.site_faces[site.to_usize()];
        let k = ring.len();

        let mut boundary = SmallVec::<[HalfedgeHandle; 8]>::new();
        for i in 0..k {
            let (neighbor, tri) = ring[i];
            if neighbor.is_infinite() {
                continue;
            }

            let prev_tri = ring[(i + k - 1) % k].1;
            let source = self.vertex_of(prev_tri);
            let target = self.vertex_of(tri);

            let he = self.halfedge_between(site, neighbor);
            let rec = &mut self.halfedges[he];
            rec.source = source;
            rec.target = target;
            rec.face = fh;

            if let Some(vh) = source.into_option() {
                self.vertices[vh].outgoing = Opt::some(he);
            }
            boundary.push(he);
        }

        let m = boundary.len();
        for j in 0..m {
            let rec = &mut self.halfedges[boundary[j]];
            rec.next = boundary[(j + 1) % m];
            rec.prev = boundary[(j + m - 1) % m];
        }

        self.faces[fh].halfedge = match boundary.first() {
            Some(&he) => Opt::some(he),
            None => Opt::none(),
        };
    }

    fn vertex_of(&self, tri: Option<TriFaceHandle>) -> Opt<VertexHandle> {
        match tri.and_then(|tf| self.tri_vertices.get(&tf)) {
            Some(&vh) => Opt::some(vh),
            None => Opt::none(),
        }
    }
}
