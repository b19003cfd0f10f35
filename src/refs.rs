//! Types for references to elements within a diagram.

use std::fmt;

use crate::{
    diagram::{CcbCirculator, Circulator, Config, DefaultConfig, VertexCirculator, VoronoiDiagram},
    handle::{FaceHandle, HalfedgeHandle, SiteHandle, TriEdge, TriFaceHandle, VertexHandle},
    math::Point,
};


/// A reference to an element within a diagram.
///
/// This is just a handle paired with a reference to the diagram associated
/// with that handle. It offers convenient navigation: methods like
/// [`HalfedgeRef::next`] return references again.
pub struct ElementRef<'a, HandleT, C: Config = DefaultConfig> {
    handle: HandleT,
    diagram: &'a VoronoiDiagram<C>,
}

/// A reference to a vertex within a diagram. See [`ElementRef`].
pub type VertexRef<'a, C = DefaultConfig> = ElementRef<'a, VertexHandle, C>;

/// A reference to a half-edge within a diagram. See [`ElementRef`].
pub type HalfedgeRef<'a, C = DefaultConfig> = ElementRef<'a, HalfedgeHandle, C>;

/// A reference to a face within a diagram. See [`ElementRef`].
pub type FaceRef<'a, C = DefaultConfig> = ElementRef<'a, FaceHandle, C>;


impl<'a, HandleT: Copy, C: Config> ElementRef<'a, HandleT, C> {
    /// Creates a new reference. The handle is not checked; use
    /// [`VoronoiDiagram::vertex`] and friends to get checked references.
    pub fn new(diagram: &'a VoronoiDiagram<C>, handle: HandleT) -> Self {
        Self { diagram, handle }
    }

    /// Returns the stored handle.
    pub fn handle(&self) -> HandleT {
        self.handle
    }

    /// Returns a reference to the linked diagram.
    pub fn diagram(&self) -> &'a VoronoiDiagram<C> {
        self.diagram
    }
}

impl<'a, HandleT: Copy, C: Config> Clone for ElementRef<'a, HandleT, C> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle,
            diagram: self.diagram,
        }
    }
}

impl<'a, HandleT: Copy, C: Config> Copy for ElementRef<'a, HandleT, C> {}

impl<'a, HandleT: fmt::Debug, C: Config> fmt::Debug for ElementRef<'a, HandleT, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("ElementRef").field(&self.handle).finish()
    }
}

impl<'a, HandleT: Copy + PartialEq, C: Config> PartialEq for ElementRef<'a, HandleT, C> {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle && std::ptr::eq(self.diagram, other.diagram)
    }
}


// ===========================================================================
// ===== With VertexHandle
// ===========================================================================
impl<'a, C: Config> VertexRef<'a, C> {
    pub fn position(&self) -> Point {
        self.diagram.position(self.handle)
    }

    /// Returns some half-edge leaving this vertex.
    pub fn outgoing(&self) -> HalfedgeRef<'a, C> {
        HalfedgeRef::new(self.diagram, self.diagram.outgoing(self.handle))
    }

    /// Returns a circulator over all half-edges leaving this vertex.
    pub fn incident_halfedges(&self) -> VertexCirculator<'a, C> {
        self.diagram.incident_halfedges(self.handle)
    }

    /// Number of edges incident to this vertex. At least 3.
    pub fn degree(&self) -> usize {
        self.incident_halfedges().lap().count()
    }

    /// Returns the Delaunay triangle this vertex is the circumcenter of.
    pub fn dual(&self) -> TriFaceHandle {
        self.diagram.vertex_data(self.handle).dual
    }
}


// ===========================================================================
// ===== With HalfedgeHandle
// ===========================================================================
impl<'a, C: Config> HalfedgeRef<'a, C> {
    pub fn next(&self) -> HalfedgeRef<'a, C> {
        HalfedgeRef::new(self.diagram, self.diagram.next(self.handle))
    }

    pub fn prev(&self) -> HalfedgeRef<'a, C> {
        HalfedgeRef::new(self.diagram, self.diagram.prev(self.handle))
    }

    pub fn twin(&self) -> HalfedgeRef<'a, C> {
        HalfedgeRef::new(self.diagram, self.diagram.twin(self.handle))
    }

    /// The face on the left of this half-edge.
    pub fn face(&self) -> FaceRef<'a, C> {
        FaceRef::new(self.diagram, self.diagram.incident_face(self.handle))
    }

    /// The source vertex, or `None` if this half-edge comes from infinity.
    pub fn source(&self) -> Option<VertexRef<'a, C>> {
        let diagram = self.diagram;
        diagram.source(self.handle).map(|vh| VertexRef::new(diagram, vh))
    }

    /// The target vertex, or `None` if this half-edge goes to infinity.
    pub fn target(&self) -> Option<VertexRef<'a, C>> {
        let diagram = self.diagram;
        diagram.target(self.handle).map(|vh| VertexRef::new(diagram, vh))
    }

    pub fn has_source(&self) -> bool {
        self.diagram.source(self.handle).is_some()
    }

    pub fn has_target(&self) -> bool {
        self.diagram.target(self.handle).is_some()
    }

    /// Returns `true` if this half-edge starts or ends at infinity.
    pub fn is_unbounded(&self) -> bool {
        self.diagram.is_unbounded_halfedge(self.handle)
    }

    /// Returns the Delaunay edge crossed by this half-edge, pointing from the
    /// site of `self.face()` to the site on the other side.
    pub fn dual(&self) -> TriEdge {
        self.diagram.halfedge_data(self.handle).dual
    }
}


// ===========================================================================
// ===== With FaceHandle
// ===========================================================================
impl<'a, C: Config> FaceRef<'a, C> {
    /// The position of this face's site.
    pub fn site(&self) -> Point {
        self.diagram.site_position(self.handle)
    }

    /// The site of this face as vertex of the triangulation.
    pub fn dual(&self) -> SiteHandle {
        self.diagram.face_data(self.handle).site
    }

    /// Returns some half-edge of the boundary, or `None` if the boundary is
    /// empty.
    pub fn halfedge(&self) -> Option<HalfedgeRef<'a, C>> {
        let diagram = self.diagram;
        diagram.face_halfedge(self.handle).map(|he| HalfedgeRef::new(diagram, he))
    }

    /// Returns a circulator over the boundary, or `None` if it is empty.
    pub fn ccb(&self) -> Option<CcbCirculator<'a, C>> {
        self.diagram.ccb_halfedges(self.handle)
    }

    /// Number of half-edges on the boundary.
    ///
    /// ```
    /// use voronoi_hds::VoronoiDiagram;
    ///
    /// let diagram = VoronoiDiagram::<voronoi_hds::DefaultConfig>::from_points(
    ///     vec![(0.0, 0.0), (4.0, 0.0), (0.0, 4.0)],
    /// );
    /// for fh in diagram.faces() {
    ///     assert_eq!(diagram.face(fh).degree(), 2);
    /// }
    /// ```
    pub fn degree(&self) -> usize {
        self.ccb().map(|ccb| ccb.lap().count()).unwrap_or(0)
    }

    /// Returns `true` if this face's cell is unbounded.
    pub fn is_unbounded(&self) -> bool {
        self.diagram.is_unbounded_face(self.handle)
    }

    /// See [`VoronoiDiagram::is_valid_face`].
    pub fn is_valid(&self) -> bool {
        self.diagram.is_valid_face(self.handle)
    }
}
