//! Mapping elements of the diagram to elements of the dual triangulation and
//! back.

use crate::{
    diagram::{Config, VoronoiDiagram},
    handle::{FaceHandle, HalfedgeHandle, SiteHandle, TriEdge, TriFaceHandle, VertexHandle},
};


/// Types that can map handles of type `H` to the corresponding dual element.
///
/// [`VoronoiDiagram`] implements this for all its own handles and for the
/// handles of its triangulation:
///
/// | from             | to                        |
/// |------------------|---------------------------|
/// | `FaceHandle`     | `SiteHandle`              |
/// | `SiteHandle`     | `FaceHandle`              |
/// | `VertexHandle`   | `TriFaceHandle`           |
/// | `TriFaceHandle`  | `Option<VertexHandle>`    |
/// | `HalfedgeHandle` | `TriEdge`                 |
/// | `TriEdge`        | `Option<HalfedgeHandle>`  |
///
/// Infinite triangles and edges to the infinite vertex have no dual.
///
/// All implementations panic if the given handle does not refer to an
/// existing element.
pub trait Dual<H> {
    type Output;

    fn dual(&self, handle: H) -> Self::Output;
}

impl<C: Config> Dual<FaceHandle> for VoronoiDiagram<C> {
    type Output = SiteHandle;

    fn dual(&self, fh: FaceHandle) -> Self::Output {
        self.face_data(fh).site
    }
}

impl<C: Config> Dual<SiteHandle> for VoronoiDiagram<C> {
    type Output = FaceHandle;

    fn dual(&self, site: SiteHandle) -> Self::Output {
        match self.site_faces.get(site.to_usize()) {
            Some(&fh) if !site.is_infinite() => fh,
            _ => panic!("{:?} is not a site of this Voronoi diagram", site),
        }
    }
}

impl<C: Config> Dual<VertexHandle> for VoronoiDiagram<C> {
    type Output = TriFaceHandle;

    fn dual(&self, vh: VertexHandle) -> Self::Output {
        self.vertex_data(vh).dual
    }
}

impl<C: Config> Dual<TriFaceHandle> for VoronoiDiagram<C> {
    type Output = Option<VertexHandle>;

    fn dual(&self, tf: TriFaceHandle) -> Self::Output {
        if !self.tri.contains_face(tf) {
            panic!("{:?} is not a triangle of this Voronoi diagram's triangulation", tf);
        }
        self.tri_vertices.get(&tf).copied()
    }
}

impl<C: Config> Dual<HalfedgeHandle> for VoronoiDiagram<C> {
    type Output = TriEdge;

    fn dual(&self, he: HalfedgeHandle) -> Self::Output {
        self.halfedge_data(he).dual
    }
}

impl<C: Config> Dual<TriEdge> for VoronoiDiagram<C> {
    type Output = Option<HalfedgeHandle>;

    fn dual(&self, edge: TriEdge) -> Self::Output {
        if edge.is_infinite() {
            return None;
        }
        if !self.tri.has_edge(edge) {
            panic!("{:?} is not an edge of this Voronoi diagram's triangulation", edge);
        }
        self.edges.get(&edge).copied()
    }
}
