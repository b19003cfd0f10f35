//! Everything related to the `VoronoiDiagram`.

// # Some notes for developers about this implementation
//
// - Every face is the cell of exactly one site. `site_faces` maps sites (by
//   insertion index) to faces, `Face::site` is the way back.
// - Every vertex is the circumcenter of one finite Delaunay triangle,
//   `tri_vertices` maps the triangle to the vertex. Infinite triangles have no
//   vertex: their "circumcenter" is the single point at infinity, which is
//   represented by `None` source/target handles.
// - Half-edges are created in twin pairs, one pair per finite Delaunay edge.
//   `edges` maps the directed Delaunay edge `s -> n` to the half-edge on the
//   boundary of `s`'s cell. Twins are stored explicitly, as slots are reused
//   in arbitrary order.
// - The diagram is never rebuilt: after each insertion, `build` patches only
//   the cells of the sites the triangulation reports as touched.

use std::{
    fmt,
    marker::PhantomData,
    mem,
};

use failure::Fail;
use fxhash::FxHashMap;
use optional::Optioned as Opt;
use tracing::{debug, warn};

use crate::{
    delaunay::{DelaunayTriangulation, InvalidTriangulation},
    handle::{FaceHandle, Handle, HalfedgeHandle, SiteHandle, TriEdge, TriFaceHandle, VertexHandle},
    map::Arena,
    math::{distance2, orient2d, Point, Pos2Like},
    refs::{FaceRef, HalfedgeRef, VertexRef},
};


mod adj;
mod build;
mod locate;

pub use self::{
    adj::{CcbCirculator, Circulator, Lap, VertexCirculator},
    locate::{LocateError, LocateResult},
};



// ===============================================================================================
// ===== Compile time configuration of VoronoiDiagram
// ===============================================================================================

/// Compile-time configuration for [`VoronoiDiagram`].
///
/// To configure a diagram, either use one of the existing types implementing
/// this trait, or create your own (preferably inhabitable) type and implement
/// this trait.
pub trait Config: 'static {
    /// If `true`, the whole diagram is validated after every insertion and a
    /// violation results in a panic. This is slow (linear time per
    /// insertion) and meant for debugging and tests.
    const CHECK_AFTER_INSERT: bool;
}

/// The standard configuration: no additional checks.
#[allow(missing_debug_implementations)]
pub enum DefaultConfig {}
impl Config for DefaultConfig {
    const CHECK_AFTER_INSERT: bool = false;
}

/// Validates the diagram after every insertion.
#[allow(missing_debug_implementations)]
pub enum DebugConfig {}
impl Config for DebugConfig {
    const CHECK_AFTER_INSERT: bool = true;
}


// ===============================================================================================
// ===== Definition of types stored inside the data structure
// ===============================================================================================

/// A Voronoi vertex.
#[derive(Clone, Copy)]
pub(crate) struct Vertex {
    pub(crate) position: Point,

    /// One half-edge leaving this vertex. Only `None` temporarily while the
    /// diagram is patched.
    pub(crate) outgoing: Opt<HalfedgeHandle>,

    /// The finite Delaunay triangle this vertex is the circumcenter of.
    pub(crate) dual: TriFaceHandle,
}

/// A directed Voronoi edge with its face on the left.
#[derive(Clone, Copy)]
pub(crate) struct Halfedge {
    /// `None` means the point at infinity.
    pub(crate) source: Opt<VertexHandle>,
    pub(crate) target: Opt<VertexHandle>,

    pub(crate) next: HalfedgeHandle,
    pub(crate) prev: HalfedgeHandle,
    pub(crate) twin: HalfedgeHandle,
    pub(crate) face: FaceHandle,

    /// The Delaunay edge from the face's site to the neighboring site.
    pub(crate) dual: TriEdge,
}

/// The cell of one site.
#[derive(Clone, Copy)]
pub(crate) struct Face {
    /// One half-edge of the boundary. `None` iff the diagram consists of a
    /// single site.
    pub(crate) halfedge: Opt<HalfedgeHandle>,
    pub(crate) site: SiteHandle,
}

impl fmt::Debug for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Vertex {{ position: ({}, {}), outgoing: {:?}, dual: {:?} }}",
            self.position.x,
            self.position.y,
            self.outgoing,
            self.dual,
        )
    }
}

impl fmt::Debug for Halfedge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Halfedge {{ {:?} -> {:?}, next: {:?}, prev: {:?}, twin: {:?}, face: {:?}, dual: {:?} }}",
            self.source,
            self.target,
            self.next,
            self.prev,
            self.twin,
            self.face,
            self.dual,
        )
    }
}

impl fmt::Debug for Face {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Face {{ halfedge: {:?}, site: {:?} }}", self.halfedge, self.site)
    }
}


/// Returned by [`VoronoiDiagram::validate`], describing the first violated
/// invariant.
#[derive(Debug, Fail)]
pub enum ValidityError {
    #[fail(display = "broken half-edge structure: {}", _0)]
    Structure(String),

    #[fail(display = "bridge to the triangulation is inconsistent: {}", _0)]
    Bridge(String),

    #[fail(display = "Euler's formula violated: V' - E + F = {}, but 2C = {}", lhs, rhs)]
    Euler {
        lhs: i64,
        rhs: i64,
    },

    #[fail(display = "{}", _0)]
    Triangulation(#[cause] InvalidTriangulation),
}

impl From<InvalidTriangulation> for ValidityError {
    fn from(src: InvalidTriangulation) -> Self {
        ValidityError::Triangulation(src)
    }
}

fn structure<T>(msg: String) -> Result<T, ValidityError> {
    Err(ValidityError::Structure(msg))
}

fn bridge<T>(msg: String) -> Result<T, ValidityError> {
    Err(ValidityError::Bridge(msg))
}


// ===============================================================================================
// ===== The diagram
// ===============================================================================================

/// The Voronoi diagram of a set of point sites, stored as a half-edge data
/// structure (DCEL).
///
/// Faces correspond to sites, vertices to circumcenters of finite Delaunay
/// triangles and half-edges to Voronoi edges oriented such that their face
/// lies on their left. All rays end in one implicit point at infinity which
/// is not a stored vertex. The diagram owns its dual
/// [`DelaunayTriangulation`] and is updated locally after each insertion.
///
/// The diagram can be configured at compile time via the type parameter `C`,
/// see [`Config`].
pub struct VoronoiDiagram<C: Config = DefaultConfig> {
    pub(crate) tri: DelaunayTriangulation,

    pub(crate) vertices: Arena<VertexHandle, Vertex>,
    pub(crate) halfedges: Arena<HalfedgeHandle, Halfedge>,
    pub(crate) faces: Arena<FaceHandle, Face>,

    /// Indexed by site.
    pub(crate) site_faces: Vec<FaceHandle>,
    pub(crate) tri_vertices: FxHashMap<TriFaceHandle, VertexHandle>,
    pub(crate) edges: FxHashMap<TriEdge, HalfedgeHandle>,

    _config: PhantomData<fn() -> C>,
}

impl<C: Config> VoronoiDiagram<C> {
    /// Creates an empty diagram.
    pub fn new() -> Self {
        Self {
            tri: DelaunayTriangulation::new(),
            vertices: Arena::new(),
            halfedges: Arena::new(),
            faces: Arena::new(),
            site_faces: Vec::new(),
            tri_vertices: FxHashMap::default(),
            edges: FxHashMap::default(),
            _config: PhantomData,
        }
    }

    /// Creates the diagram of the given points. Duplicates are ignored.
    pub fn from_points<P: Pos2Like>(points: impl IntoIterator<Item = P>) -> Self {
        let mut out = Self::new();
        out.insert_range(points);
        out
    }

    /// Creates the diagram dual to an existing triangulation, taking
    /// ownership of it.
    pub fn from_triangulation(tri: DelaunayTriangulation) -> Self {
        let mut out = Self::new();
        out.tri = tri;
        out.build_all();
        out
    }

    /// Returns the dual Delaunay triangulation.
    pub fn dual_triangulation(&self) -> &DelaunayTriangulation {
        &self.tri
    }

    /// Drops the half-edge structure and returns the dual triangulation.
    pub fn into_triangulation(self) -> DelaunayTriangulation {
        self.tri
    }

    /// Inserts a new site and returns its face.
    ///
    /// If `pos` coincides with an existing site, nothing changes and the face
    /// of that site is returned.
    ///
    /// # Panics
    ///
    /// Panics if a coordinate of `pos` is not finite.
    pub fn insert(&mut self, pos: impl Pos2Like) -> FaceHandle {
        self.insert_impl(pos.to_point()).0
    }

    /// Inserts all given sites and returns the number of sites that produced
    /// a new face (i.e. duplicates are not counted).
    pub fn insert_range<P: Pos2Like>(&mut self, points: impl IntoIterator<Item = P>) -> usize {
        let mut count = 0;
        for p in points {
            if self.insert_impl(p.to_point()).1 {
                count += 1;
            }
        }

        debug!(
            inserted = count,
            faces = self.number_of_faces(),
            vertices = self.number_of_vertices(),
            "inserted range of sites",
        );
        count
    }

    fn insert_impl(&mut self, p: Point) -> (FaceHandle, bool) {
        let delta = self.tri.insert(p);
        if !delta.inserted {
            return (self.site_faces[delta.site.to_usize()], false);
        }

        self.apply_delta(&delta);

        if C::CHECK_AFTER_INSERT {
            if let Err(e) = self.validate() {
                panic!("diagram invalid after inserting ({}, {}): {}", p.x, p.y, e);
            }
        }

        (self.site_faces[delta.site.to_usize()], true)
    }

    /// Removes all sites, vertices, half-edges and faces.
    ///
    /// All handles obtained before are stale afterwards, even if new elements
    /// are inserted later.
    pub fn clear(&mut self) {
        self.tri.clear();
        self.vertices.clear();
        self.halfedges.clear();
        self.faces.clear();
        self.site_faces.clear();
        self.tri_vertices.clear();
        self.edges.clear();
    }

    /// Exchanges the contents of two diagrams in constant time. Handles keep
    /// their values, but now refer to the elements of the other diagram.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }


    // ===== Counts ==============================================================================

    /// Number of Voronoi vertices (the point at infinity is not counted).
    pub fn number_of_vertices(&self) -> usize {
        self.vertices.num_elements() as usize
    }

    pub fn number_of_halfedges(&self) -> usize {
        self.halfedges.num_elements() as usize
    }

    /// Number of undirected edges, i.e. half the number of half-edges.
    pub fn number_of_edges(&self) -> usize {
        self.number_of_halfedges() / 2
    }

    pub fn number_of_faces(&self) -> usize {
        self.faces.num_elements() as usize
    }

    /// Number of connected components of the diagram's graph, where all
    /// rays are connected through the point at infinity.
    ///
    /// This is 0 for the empty diagram and 1 otherwise: a single site forms
    /// one component without any edges, and with two or more sites, every
    /// vertex is connected to infinity.
    pub fn number_of_connected_components(&self) -> usize {
        if self.halfedges.is_empty() {
            return self.number_of_faces().min(1);
        }

        // Union-find over vertex slots plus one extra node for infinity.
        let slots = self.vertices.handles().map(|vh| vh.to_usize() + 1).max().unwrap_or(0);
        let infinity = slots;
        let mut parent = (0..=slots).collect::<Vec<_>>();

        fn find(parent: &mut [usize], mut x: usize) -> usize {
            while parent[x] != x {
                parent[x] = parent[parent[x]];
                x = parent[x];
            }
            x
        }

        let mut uses_infinity = false;
        for (_, he) in self.halfedges.iter() {
            let a = he.source.into_option().map(|v| v.to_usize()).unwrap_or(infinity);
            let b = he.target.into_option().map(|v| v.to_usize()).unwrap_or(infinity);
            uses_infinity |= a == infinity || b == infinity;

            let (ra, rb) = (find(&mut parent, a), find(&mut parent, b));
            if ra != rb {
                parent[ra] = rb;
            }
        }

        let mut roots = self.vertices.handles()
            .map(|vh| find(&mut parent, vh.to_usize()))
            .collect::<Vec<_>>();
        if uses_infinity {
            roots.push(find(&mut parent, infinity));
        }
        roots.sort();
        roots.dedup();
        roots.len()
    }


    // ===== Representatives =====================================================================

    /// Returns some unbounded face, if there is one.
    pub fn unbounded_face(&self) -> Option<FaceHandle> {
        self.faces.handles().find(|&fh| self.is_unbounded_face(fh))
    }

    /// Returns some bounded face, if there is one.
    pub fn bounded_face(&self) -> Option<FaceHandle> {
        self.faces.handles().find(|&fh| !self.is_unbounded_face(fh))
    }

    /// Returns some half-edge whose source or target is at infinity, if there
    /// is one.
    pub fn unbounded_halfedge(&self) -> Option<HalfedgeHandle> {
        self.halfedges.iter().find(|(_, he)| is_unbounded(he)).map(|(h, _)| h)
    }

    /// Returns some half-edge between two finite vertices, if there is one.
    pub fn bounded_halfedge(&self) -> Option<HalfedgeHandle> {
        self.halfedges.iter().find(|(_, he)| !is_unbounded(he)).map(|(h, _)| h)
    }


    // ===== Element access ======================================================================

    /// Returns `true` if `vh` refers to a vertex of this diagram. Stale
    /// handles (e.g. obtained before `clear`) return `false`.
    pub fn contains_vertex(&self, vh: VertexHandle) -> bool {
        self.vertices.contains_handle(vh)
    }

    pub fn contains_halfedge(&self, he: HalfedgeHandle) -> bool {
        self.halfedges.contains_handle(he)
    }

    pub fn contains_face(&self, fh: FaceHandle) -> bool {
        self.faces.contains_handle(fh)
    }

    /// Returns a reference to the vertex, which offers convenient access to
    /// its neighborhood.
    ///
    /// # Panics
    ///
    /// Panics if `vh` does not refer to a vertex of this diagram.
    pub fn vertex(&self, vh: VertexHandle) -> VertexRef<'_, C> {
        self.check_vertex(vh);
        VertexRef::new(self, vh)
    }

    /// Returns a reference to the half-edge.
    ///
    /// # Panics
    ///
    /// Panics if `he` does not refer to a half-edge of this diagram.
    pub fn halfedge(&self, he: HalfedgeHandle) -> HalfedgeRef<'_, C> {
        self.check_halfedge(he);
        HalfedgeRef::new(self, he)
    }

    /// Returns a reference to the face.
    ///
    /// # Panics
    ///
    /// Panics if `fh` does not refer to a face of this diagram.
    pub fn face(&self, fh: FaceHandle) -> FaceRef<'_, C> {
        self.check_face(fh);
        FaceRef::new(self, fh)
    }

    pub fn position(&self, vh: VertexHandle) -> Point {
        self.vertex_data(vh).position
    }

    /// Returns the position of the site of the given face.
    pub fn site_position(&self, fh: FaceHandle) -> Point {
        self.tri.position(self.face_data(fh).site)
    }

    pub fn next(&self, he: HalfedgeHandle) -> HalfedgeHandle {
        self.halfedge_data(he).next
    }

    pub fn prev(&self, he: HalfedgeHandle) -> HalfedgeHandle {
        self.halfedge_data(he).prev
    }

    pub fn twin(&self, he: HalfedgeHandle) -> HalfedgeHandle {
        self.halfedge_data(he).twin
    }

    /// Returns the face on the left of the half-edge.
    pub fn incident_face(&self, he: HalfedgeHandle) -> FaceHandle {
        self.halfedge_data(he).face
    }

    /// Returns the source vertex or `None` if the half-edge comes from
    /// infinity.
    pub fn source(&self, he: HalfedgeHandle) -> Option<VertexHandle> {
        self.halfedge_data(he).source.into_option()
    }

    /// Returns the target vertex or `None` if the half-edge goes to infinity.
    pub fn target(&self, he: HalfedgeHandle) -> Option<VertexHandle> {
        self.halfedge_data(he).target.into_option()
    }

    /// Returns some half-edge leaving the given vertex.
    pub fn outgoing(&self, vh: VertexHandle) -> HalfedgeHandle {
        match self.vertex_data(vh).outgoing.into_option() {
            Some(he) => he,
            None => panic!("internal diagram error: {:?} has no outgoing half-edge", vh),
        }
    }

    /// Returns some half-edge of the face's boundary or `None` if the
    /// boundary is empty (diagram with a single site).
    pub fn face_halfedge(&self, fh: FaceHandle) -> Option<HalfedgeHandle> {
        self.face_data(fh).halfedge.into_option()
    }

    /// Returns `true` if the half-edge starts or ends at infinity.
    pub fn is_unbounded_halfedge(&self, he: HalfedgeHandle) -> bool {
        is_unbounded(self.halfedge_data(he))
    }

    /// Returns `true` if the face's cell is unbounded, i.e. if its site lies
    /// on the convex hull of all sites.
    pub fn is_unbounded_face(&self, fh: FaceHandle) -> bool {
        match self.ccb_halfedges(fh) {
            None => true,
            Some(ccb) => ccb.lap().any(|he| self.is_unbounded_halfedge(he)),
        }
    }

    /// Checks that the face exists and that its boundary is a closed cycle
    /// (or empty, for the single site diagram) on which every half-edge
    /// refers back to the face.
    pub fn is_valid_face(&self, fh: FaceHandle) -> bool {
        self.check_face_boundary(fh).is_ok()
    }


    // ===== Validation ==========================================================================

    /// Checks all invariants of the diagram and returns `false` if any is
    /// violated. The violation is logged as warning.
    pub fn is_valid(&self) -> bool {
        match self.validate() {
            Ok(()) => true,
            Err(e) => {
                warn!("invalid Voronoi diagram: {}", e);
                false
            }
        }
    }

    /// Checks all invariants of the diagram, returning the first violation.
    ///
    /// This includes the consistency of all half-edge links, face and vertex
    /// back-pointers, the bridge to the triangulation, the triangulation
    /// itself and Euler's formula.
    pub fn validate(&self) -> Result<(), ValidityError> {
        self.tri.validate()?;
        self.validate_counts()?;

        for (h, he) in self.halfedges.iter() {
            self.validate_halfedge(h, he)?;
        }

        for (vh, v) in self.vertices.iter() {
            self.validate_vertex(vh, v)?;
        }

        for fh in self.faces.handles() {
            self.check_face_boundary(fh)?;
        }

        if !self.halfedges.is_empty() {
            let any_infinite = self.halfedges.values().any(is_unbounded);
            let v = self.number_of_vertices() as i64 + if any_infinite { 1 } else { 0 };
            let lhs = v - self.number_of_edges() as i64 + self.number_of_faces() as i64;
            let rhs = 2 * self.number_of_connected_components() as i64;
            if lhs != rhs {
                return Err(ValidityError::Euler { lhs, rhs });
            }
        }

        Ok(())
    }

    fn validate_counts(&self) -> Result<(), ValidityError> {
        if self.site_faces.len() != self.tri.num_vertices() {
            return bridge(format!(
                "{} faces mapped for {} sites",
                self.site_faces.len(),
                self.tri.num_vertices(),
            ));
        }
        if self.number_of_faces() != self.site_faces.len() {
            return bridge(format!(
                "{} faces, but {} sites",
                self.number_of_faces(),
                self.site_faces.len(),
            ));
        }
        if self.number_of_vertices() != self.tri.num_finite_faces()
            || self.tri_vertices.len() != self.number_of_vertices()
        {
            return bridge(format!(
                "{} vertices ({} mapped) for {} finite triangles",
                self.number_of_vertices(),
                self.tri_vertices.len(),
                self.tri.num_finite_faces(),
            ));
        }
        if self.edges.len() != self.number_of_halfedges() {
            return bridge(format!(
                "{} half-edges, but {} mapped Delaunay edges",
                self.number_of_halfedges(),
                self.edges.len(),
            ));
        }

        for (i, &fh) in self.site_faces.iter().enumerate() {
            match self.faces.get(fh) {
                Some(face) if face.site.to_usize() == i => {}
                _ => return bridge(format!("site {} is not mapped to its face {:?}", i, fh)),
            }
        }

        Ok(())
    }

    fn validate_halfedge(&self, h: HalfedgeHandle, he: &Halfedge) -> Result<(), ValidityError> {
        let twin = match self.halfedges.get(he.twin) {
            Some(twin) => twin,
            None => return structure(format!("twin of {:?} does not exist", h)),
        };
        if he.twin == h || twin.twin != h {
            return structure(format!("{:?} and {:?} are not mutual twins", h, he.twin));
        }

        let next = match self.halfedges.get(he.next) {
            Some(next) => next,
            None => return structure(format!("next of {:?} does not exist", h)),
        };
        if next.prev != h {
            return structure(format!("next({:?}).prev is {:?}", h, next.prev));
        }
        if next.face != he.face {
            return structure(format!("{:?} and its next {:?} have different faces", h, he.next));
        }
        if next.source != he.target {
            return structure(format!(
                "target of {:?} ({:?}) is not the source of its next ({:?})",
                h,
                he.target,
                next.source,
            ));
        }

        match self.halfedges.get(he.prev) {
            Some(prev) if prev.next == h => {}
            _ => return structure(format!("prev({:?}).next is not {:?}", h, h)),
        }

        for v in he.source.into_option().into_iter().chain(he.target.into_option()) {
            if !self.vertices.contains_handle(v) {
                return structure(format!("{:?} refers to non-existing vertex {:?}", h, v));
            }
        }

        let face = match self.faces.get(he.face) {
            Some(face) => face,
            None => return structure(format!("face of {:?} does not exist", h)),
        };
        if he.dual.from != face.site || twin.dual != he.dual.reversed() {
            return bridge(format!("dual edge {:?} of {:?} doesn't match its faces", he.dual, h));
        }
        if self.edges.get(&he.dual) != Some(&h) {
            return bridge(format!("{:?} is not mapped to {:?}", he.dual, h));
        }
        if !self.tri.has_edge(he.dual) {
            return bridge(format!("{:?} is not an edge of the triangulation", he.dual));
        }

        Ok(())
    }

    fn validate_vertex(&self, vh: VertexHandle, v: &Vertex) -> Result<(), ValidityError> {
        match v.outgoing.into_option().and_then(|he| self.halfedges.get(he)) {
            Some(out) if out.source == Opt::some(vh) => {}
            _ => return structure(format!("outgoing half-edge of {:?} does not leave it", vh)),
        }

        if self.tri_vertices.get(&v.dual) != Some(&vh) || !self.tri.contains_face(v.dual) {
            return bridge(format!("{:?} is not the dual of its triangle {:?}", vh, v.dual));
        }

        // The vertex has to be equidistant to the three sites. The
        // circumcenter is rounded, so a relative tolerance is needed. The
        // rounding error grows as the triangle gets flatter.
        let [a, b, c] = self.tri.face_vertices(v.dual);
        let (pa, pb, pc) = (self.tri.position(a), self.tri.position(b), self.tri.position(c));
        let spread = (distance2(pa, pb) * distance2(pa, pc)).sqrt();
        let flatness = (spread / orient2d(pa, pb, pc).abs()).max(1.0);
        let d = [pa, pb, pc].iter()
            .map(|&p| distance2(p, v.position))
            .collect::<Vec<_>>();
        let max = d.iter().cloned().fold(0.0, f64::max);
        let min = d.iter().cloned().fold(std::f64::INFINITY, f64::min);
        if max - min > 1e-9 * flatness * max.max(1.0) {
            return bridge(format!(
                "{:?} is not equidistant to the sites of {:?} (squared distances {:?})",
                vh,
                v.dual,
                d,
            ));
        }

        Ok(())
    }

    /// Walks the boundary of `fh` and checks that it's a closed cycle
    /// consisting of half-edges of `fh`.
    fn check_face_boundary(&self, fh: FaceHandle) -> Result<(), ValidityError> {
        let face = match self.faces.get(fh) {
            Some(face) => face,
            None => return structure(format!("{:?} does not exist", fh)),
        };

        let start = match face.halfedge.into_option() {
            Some(he) => he,
            None if self.number_of_faces() == 1 && self.halfedges.is_empty() => return Ok(()),
            None => return structure(format!("{:?} has an empty boundary", fh)),
        };

        let mut current = start;
        for _ in 0..=self.number_of_halfedges() {
            let he = match self.halfedges.get(current) {
                Some(he) => he,
                None => return structure(format!("boundary of {:?} contains dead {:?}", fh, current)),
            };
            if he.face != fh {
                return structure(format!(
                    "{:?} on the boundary of {:?} refers to {:?}",
                    current,
                    fh,
                    he.face,
                ));
            }

            current = he.next;
            if current == start {
                return Ok(());
            }
        }

        structure(format!("boundary of {:?} is not closed", fh))
    }


    // ===== Internal helpers ====================================================================

    /// Makes sure the given handle points to an existing element. If that's
    /// not the case, this method panics.
    pub(crate) fn check_vertex(&self, vh: VertexHandle) {
        if !self.vertices.contains_handle(vh) {
            panic!(
                "{:?} was passed to a Voronoi diagram, but this vertex does not exist in this diagram",
                vh,
            );
        }
    }

    /// Makes sure the given handle points to an existing element. If that's
    /// not the case, this method panics.
    pub(crate) fn check_halfedge(&self, he: HalfedgeHandle) {
        if !self.halfedges.contains_handle(he) {
            panic!(
                "{:?} was passed to a Voronoi diagram, but this half-edge does not exist in this diagram",
                he,
            );
        }
    }

    /// Makes sure the given handle points to an existing element. If that's
    /// not the case, this method panics.
    pub(crate) fn check_face(&self, fh: FaceHandle) {
        if !self.faces.contains_handle(fh) {
            panic!(
                "{:?} was passed to a Voronoi diagram, but this face does not exist in this diagram",
                fh,
            );
        }
    }

    pub(crate) fn vertex_data(&self, vh: VertexHandle) -> &Vertex {
        self.check_vertex(vh);
        &self.vertices[vh]
    }

    pub(crate) fn halfedge_data(&self, he: HalfedgeHandle) -> &Halfedge {
        self.check_halfedge(he);
        &self.halfedges[he]
    }

    pub(crate) fn face_data(&self, fh: FaceHandle) -> &Face {
        self.check_face(fh);
        &self.faces[fh]
    }
}

fn is_unbounded(he: &Halfedge) -> bool {
    he.source.is_none() || he.target.is_none()
}

impl<C: Config> Default for VoronoiDiagram<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Config> Clone for VoronoiDiagram<C> {
    fn clone(&self) -> Self {
        Self {
            tri: self.tri.clone(),
            vertices: self.vertices.clone(),
            halfedges: self.halfedges.clone(),
            faces: self.faces.clone(),
            site_faces: self.site_faces.clone(),
            tri_vertices: self.tri_vertices.clone(),
            edges: self.edges.clone(),
            _config: PhantomData,
        }
    }
}

impl<C: Config> fmt::Debug for VoronoiDiagram<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("VoronoiDiagram")
            .field("vertices", &self.vertices)
            .field("halfedges", &self.halfedges)
            .field("faces", &self.faces)
            .field("triangulation", &self.tri)
            .finish()
    }
}
