//! The dual of every Voronoi diagram: an incremental Delaunay triangulation.
//!
//! # Some notes for developers about this implementation
//!
//! - The triangulation is closed up with one *infinite vertex*
//!   ([`SiteHandle::INFINITE`]): every convex hull edge forms a triangle with
//!   it. That way, every site is surrounded by a closed ring of triangles and
//!   the triangulation is a triangulation of the sphere.
//! - Triangles store their vertices in counter-clockwise order and three
//!   neighbor links. Neighbor `i` lies opposite of vertex `i`, i.e. it shares
//!   the edge `(v[i + 1], v[i + 2])` (indices mod 3).
//! - As long as all sites are collinear, there are no triangles at all. The
//!   sites are then kept in a list sorted along their common line. The first
//!   site off that line turns this list into a fan of triangles.
//! - Insertion is Bowyer-Watson: find all triangles whose circumcircle
//!   strictly contains the new site (the *cavity*), remove them and connect
//!   the new site to the cavity's rim. For infinite triangles, "circumcircle"
//!   means the open half plane beyond the hull edge (plus the open hull edge
//!   itself).
//! - Triangle indices are never reused. Thus a removed triangle's handle
//!   stays unique forever, which the diagram relies on when it maps triangles
//!   to Voronoi vertices.

use std::{fmt, mem};

use failure::Fail;
use fxhash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use stable_vec::StableVec;
use tracing::{trace, warn};

use crate::{
    handle::{SiteHandle, TriEdge, TriFaceHandle},
    math::{
        Orientation, Point, Pos2Like,
        circumcenter, distance2, incircle, lex_cmp, orientation, strictly_between,
    },
};


#[cfg(test)]
mod tests;


/// Index of the vertex after `i` in counter-clockwise order.
#[inline(always)]
fn ccw(i: usize) -> usize {
    (i + 1) % 3
}

/// Index of the vertex after `i` in clockwise order.
#[inline(always)]
fn cw(i: usize) -> usize {
    (i + 2) % 3
}

/// The neighbors of a site in counter-clockwise order, each paired with the
/// triangle `(site, neighbor, next neighbor)`. In the collinear case there
/// are no triangles and the pairs contain `None`.
pub(crate) type Ring = SmallVec<[(SiteHandle, Option<TriFaceHandle>); 8]>;


/// The affine dimension of the set of sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    /// No sites.
    Empty,
    /// Exactly one site.
    Point,
    /// At least two sites, all on one line.
    Line,
    /// At least three sites that are not collinear.
    Plane,
}

/// Describes what changed in the triangulation through one insertion.
///
/// This is what the diagram needs to patch its half-edge structure locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionDelta {
    /// The new site or, if the point coincided with an existing site, that
    /// existing site.
    pub site: SiteHandle,

    /// `false` if the point coincided with an existing site. In that case,
    /// nothing changed and all other lists are empty.
    pub inserted: bool,

    /// Triangles that don't exist anymore.
    pub removed_faces: Vec<TriFaceHandle>,

    /// Triangles that were created.
    pub created_faces: Vec<TriFaceHandle>,

    /// All sites whose ring of neighbors changed, including `site` itself.
    pub touched_sites: Vec<SiteHandle>,
}

impl InsertionDelta {
    fn unchanged(site: SiteHandle) -> Self {
        Self {
            site,
            inserted: false,
            removed_faces: vec![],
            created_faces: vec![],
            touched_sites: vec![],
        }
    }
}

/// Returned by [`DelaunayTriangulation::validate`].
#[derive(Debug, Fail)]
#[fail(display = "invalid triangulation: {}", reason)]
pub struct InvalidTriangulation {
    pub reason: String,
}

fn invalid<T>(reason: String) -> Result<T, InvalidTriangulation> {
    Err(InvalidTriangulation { reason })
}


/// Data stored per triangle.
#[derive(Clone, Copy)]
struct Face {
    /// Vertices in counter-clockwise order. At most one is infinite.
    vertices: [SiteHandle; 3],

    /// `neighbors[i]` is the triangle on the other side of the edge opposite
    /// of `vertices[i]`.
    neighbors: [TriFaceHandle; 3],
}

impl Face {
    fn new(vertices: [SiteHandle; 3]) -> Self {
        Self {
            vertices,
            neighbors: [TriFaceHandle::DANGLING; 3],
        }
    }

    fn index_of(&self, v: SiteHandle) -> Option<usize> {
        self.vertices.iter().position(|&x| x == v)
    }

    fn neighbor_index(&self, f: TriFaceHandle) -> Option<usize> {
        self.neighbors.iter().position(|&x| x == f)
    }

    fn infinite_index(&self) -> Option<usize> {
        self.index_of(SiteHandle::INFINITE)
    }
}

impl fmt::Debug for Face {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Face {{ vertices: {:?}, neighbors: {:?} }}", self.vertices, self.neighbors)
    }
}


/// A Delaunay triangulation of a set of sites, built incrementally.
///
/// Points coinciding with an existing site are ignored on insertion.
#[derive(Clone)]
pub struct DelaunayTriangulation {
    positions: Vec<Point>,

    /// One triangle adjacent to each site. Only used in `Dimension::Plane`.
    incident: Vec<Option<TriFaceHandle>>,
    infinite_incident: Option<TriFaceHandle>,

    faces: StableVec<Face>,

    /// All sites sorted along their common line. Only used while the
    /// dimension is smaller than `Plane`.
    line: Vec<SiteHandle>,

    /// The site where nearest-site walks start.
    hint: Option<SiteHandle>,
}

impl DelaunayTriangulation {
    /// Creates an empty triangulation.
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            incident: Vec::new(),
            infinite_incident: None,
            faces: StableVec::new(),
            line: Vec::new(),
            hint: None,
        }
    }

    /// Creates a triangulation of the given points.
    pub fn from_points<P: Pos2Like>(points: impl IntoIterator<Item = P>) -> Self {
        let mut out = Self::new();
        for p in points {
            out.insert(p);
        }
        out
    }

    pub fn dimension(&self) -> Dimension {
        match self.positions.len() {
            0 => Dimension::Empty,
            1 => Dimension::Point,
            _ if self.faces.num_elements() == 0 => Dimension::Line,
            _ => Dimension::Plane,
        }
    }

    /// Number of (finite) vertices, i.e. sites.
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles, including the infinite ones.
    pub fn num_faces(&self) -> usize {
        self.faces.num_elements()
    }

    /// Number of triangles not adjacent to the infinite vertex.
    pub fn num_finite_faces(&self) -> usize {
        self.finite_faces().count()
    }

    /// Returns the position of the given site.
    ///
    /// # Panics
    ///
    /// Panics if `site` is infinite or does not exist.
    pub fn position(&self, site: SiteHandle) -> Point {
        match self.positions.get(site.to_usize()) {
            Some(&p) => p,
            None => panic!("{:?} is not a site of this triangulation", site),
        }
    }

    pub fn contains_site(&self, site: SiteHandle) -> bool {
        site.to_usize() < self.positions.len()
    }

    /// Iterates over all sites in insertion order.
    pub fn sites(&self) -> impl Iterator<Item = (SiteHandle, Point)> + '_ {
        self.positions.iter().enumerate().map(|(i, &p)| (SiteHandle::from_usize(i), p))
    }

    pub fn contains_face(&self, face: TriFaceHandle) -> bool {
        self.faces.has_element_at(face.to_usize())
    }

    /// Iterates over all triangles, including the infinite ones.
    pub fn faces(&self) -> impl Iterator<Item = TriFaceHandle> + '_ {
        self.faces.indices().map(TriFaceHandle::from_usize)
    }

    /// Iterates over all triangles not adjacent to the infinite vertex.
    pub fn finite_faces(&self) -> impl Iterator<Item = TriFaceHandle> + '_ {
        self.faces().filter(move |&f| !self.is_infinite_face(f))
    }

    /// Returns the three vertices of the triangle in counter-clockwise order.
    pub fn face_vertices(&self, face: TriFaceHandle) -> [SiteHandle; 3] {
        self.face(face).vertices
    }

    /// Returns the three neighbors of the triangle. Neighbor `i` is opposite
    /// of vertex `i`.
    pub fn face_neighbors(&self, face: TriFaceHandle) -> [TriFaceHandle; 3] {
        self.face(face).neighbors
    }

    pub fn is_infinite_face(&self, face: TriFaceHandle) -> bool {
        self.face(face).infinite_index().is_some()
    }

    /// Returns the circumcenter of a finite triangle or `None` if the triangle
    /// is infinite.
    pub fn circumcenter(&self, face: TriFaceHandle) -> Option<Point> {
        let [a, b, c] = self.face(face).vertices;
        if a.is_infinite() || b.is_infinite() || c.is_infinite() {
            None
        } else {
            Some(circumcenter(self.position(a), self.position(b), self.position(c)))
        }
    }

    /// Returns the Delaunay neighbors of `site` in counter-clockwise order
    /// (in the collinear case: the previous and next site along the line).
    /// The infinite vertex is included if `site` is on the convex hull.
    pub fn neighbors(&self, site: SiteHandle) -> Vec<SiteHandle> {
        self.ring(site).into_iter().map(|(n, _)| n).collect()
    }

    /// Returns `true` if the triangulation has an edge between `a` and `b`.
    pub fn has_edge(&self, edge: TriEdge) -> bool {
        self.contains_site(edge.from) && self.ring(edge.from).iter().any(|&(n, _)| n == edge.to)
    }

    /// Returns the triangle to the left of the directed edge, if the
    /// triangulation has any triangles and the edge exists.
    pub fn left_face(&self, edge: TriEdge) -> Option<TriFaceHandle> {
        if !self.contains_site(edge.from) {
            return None;
        }
        self.ring(edge.from).iter()
            .find(|&&(n, _)| n == edge.to)
            .and_then(|&(_, f)| f)
    }

    /// Returns the site closest to `p`, or `None` if the triangulation is
    /// empty. Ties are broken arbitrarily.
    ///
    /// This is a greedy walk along Delaunay edges starting at the most
    /// recently inserted site: as long as a neighbor is closer to `p`, the
    /// walk moves there. On a Delaunay triangulation, this always ends at a
    /// nearest site.
    pub fn nearest_site(&self, p: Point) -> Option<SiteHandle> {
        if self.positions.is_empty() {
            return None;
        }

        let mut current = self.hint.unwrap_or_else(|| SiteHandle::from_usize(0));
        let mut best = distance2(self.position(current), p);
        loop {
            let mut improved = false;
            for (n, _) in self.ring(current) {
                if n.is_infinite() {
                    continue;
                }
                let d = distance2(self.position(n), p);
                if d < best {
                    best = d;
                    current = n;
                    improved = true;
                }
            }

            if !improved {
                return Some(current);
            }
        }
    }

    /// Inserts a new site and returns what changed.
    ///
    /// If `pos` coincides with an existing site, nothing happens and the
    /// returned delta has `inserted == false`.
    ///
    /// # Panics
    ///
    /// Panics if a coordinate of `pos` is not finite.
    pub fn insert(&mut self, pos: impl Pos2Like) -> InsertionDelta {
        let p = pos.to_point();
        assert!(
            p.x.is_finite() && p.y.is_finite(),
            "site coordinates must be finite, but got {:?}",
            p,
        );

        let nearest = self.nearest_site(p);
        if let Some(nearest) = nearest {
            if self.position(nearest) == p {
                trace!(site = ?nearest, "point coincides with existing site");
                return InsertionDelta::unchanged(nearest);
            }
        }

        let delta = match (self.dimension(), nearest) {
            (Dimension::Plane, Some(nearest)) => self.insert_in_plane(p, nearest),
            _ => self.insert_low_dim(p),
        };

        self.hint = Some(delta.site);
        trace!(
            site = ?delta.site,
            removed = delta.removed_faces.len(),
            created = delta.created_faces.len(),
            touched = delta.touched_sites.len(),
            "inserted site into triangulation",
        );
        delta
    }

    /// Removes all sites.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Checks all structural invariants and the Delaunay property.
    pub fn validate(&self) -> Result<(), InvalidTriangulation> {
        if self.incident.len() != self.positions.len() {
            return invalid(format!(
                "{} incidence entries for {} sites",
                self.incident.len(),
                self.positions.len(),
            ));
        }

        if self.dimension() != Dimension::Plane {
            return self.validate_line();
        }

        let n = self.positions.len();
        if self.faces.num_elements() != 2 * n - 2 {
            return invalid(format!(
                "{} triangles for {} sites (expected {})",
                self.faces.num_elements(),
                n,
                2 * n - 2,
            ));
        }

        for fh in self.faces() {
            let face = self.face(fh);
            let infinite_count = face.vertices.iter().filter(|v| v.is_infinite()).count();
            if infinite_count > 1 {
                return invalid(format!("{:?} has more than one infinite vertex", fh));
            }

            if infinite_count == 0 {
                let [a, b, c] = face.vertices.map_pos(self);
                if orientation(a, b, c) != Orientation::CounterClockwise {
                    return invalid(format!("{:?} is not counter-clockwise", fh));
                }
            }

            for i in 0..3 {
                let nh = face.neighbors[i];
                if !self.contains_face(nh) {
                    return invalid(format!("{:?} has a dangling neighbor link {:?}", fh, nh));
                }
                let neighbor = self.face(nh);
                let j = match neighbor.neighbor_index(fh) {
                    Some(j) => j,
                    None => return invalid(format!("{:?} and {:?} are not mutual neighbors", fh, nh)),
                };

                if neighbor.vertices[ccw(j)] != face.vertices[cw(i)]
                    || neighbor.vertices[cw(j)] != face.vertices[ccw(i)]
                {
                    return invalid(format!("{:?} and {:?} don't share an edge", fh, nh));
                }

                let opposite = neighbor.vertices[j];
                if infinite_count == 0 && !opposite.is_infinite() {
                    let [a, b, c] = face.vertices.map_pos(self);
                    if incircle(a, b, c, self.position(opposite)) > 0.0 {
                        return invalid(format!(
                            "{:?} lies inside the circumcircle of {:?}",
                            opposite,
                            fh,
                        ));
                    }
                }
            }
        }

        for (i, incident) in self.incident.iter().enumerate() {
            let site = SiteHandle::from_usize(i);
            match incident {
                Some(f) if self.contains_face(*f) && self.face(*f).index_of(site).is_some() => {}
                _ => return invalid(format!("{:?} has no valid incident triangle", site)),
            }
        }

        Ok(())
    }

    /// Returns `true` if `validate` doesn't find any problems.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    fn validate_line(&self) -> Result<(), InvalidTriangulation> {
        if self.line.len() != self.positions.len() {
            return invalid(format!(
                "line contains {} of {} sites",
                self.line.len(),
                self.positions.len(),
            ));
        }

        for w in self.line.windows(2) {
            if lex_cmp(self.position(w[0]), self.position(w[1])) != std::cmp::Ordering::Less {
                return invalid(format!("line is not sorted at {:?}, {:?}", w[0], w[1]));
            }
        }

        if let (Some(&first), Some(&last)) = (self.line.first(), self.line.last()) {
            for &s in &self.line {
                let o = orientation(self.position(first), self.position(last), self.position(s));
                if o != Orientation::Collinear {
                    return invalid(format!("{:?} is not on the line of all sites", s));
                }
            }
        }

        Ok(())
    }


    // ===========================================================================================
    // ===== Internal helpers
    // ===========================================================================================

    fn face(&self, face: TriFaceHandle) -> &Face {
        match self.faces.get(face.to_usize()) {
            Some(f) => f,
            None => panic!("{:?} is not a triangle of this triangulation", face),
        }
    }

    fn face_mut(&mut self, face: TriFaceHandle) -> &mut Face {
        match self.faces.get_mut(face.to_usize()) {
            Some(f) => f,
            None => panic!("{:?} is not a triangle of this triangulation", face),
        }
    }

    fn push_face(&mut self, face: Face) -> TriFaceHandle {
        TriFaceHandle::from_usize(self.faces.push(face))
    }

    fn push_site(&mut self, p: Point) -> SiteHandle {
        let site = SiteHandle::from_usize(self.positions.len());
        self.positions.push(p);
        self.incident.push(None);
        site
    }

    /// Returns the ring of neighbors (with the triangles between them) around
    /// `site` in counter-clockwise order.
    pub(crate) fn ring(&self, site: SiteHandle) -> Ring {
        let mut out = Ring::new();
        match self.dimension() {
            Dimension::Empty | Dimension::Point => {}
            Dimension::Line => {
                if site.is_infinite() {
                    return out;
                }
                let p = self.position(site);
                if let Ok(i) = self.line.binary_search_by(|&s| lex_cmp(self.position(s), p)) {
                    if i > 0 {
                        out.push((self.line[i - 1], None));
                    }
                    if let Some(&next) = self.line.get(i + 1) {
                        out.push((next, None));
                    }
                }
            }
            Dimension::Plane => {
                let start = if site.is_infinite() {
                    self.infinite_incident
                } else {
                    self.incident[site.to_usize()]
                };
                let start = match start {
                    Some(f) => f,
                    None => return out,
                };

                // A site can't be adjacent to more triangles than there are.
                let mut fh = start;
                for _ in 0..self.faces.num_elements() {
                    let face = self.face(fh);
                    let i = face.index_of(site)
                        .expect("internal triangulation error: site not in adjacent triangle");
                    out.push((face.vertices[ccw(i)], Some(fh)));
                    fh = face.neighbors[ccw(i)];
                    if fh == start {
                        return out;
                    }
                }
                panic!("internal triangulation error: triangles around {:?} don't form a cycle", site);
            }
        }

        out
    }

    /// Checks if the circumcircle of `face` strictly contains `p`.
    fn in_conflict(&self, face: TriFaceHandle, p: Point) -> bool {
        let face = self.face(face);
        match face.infinite_index() {
            None => {
                let [a, b, c] = face.vertices.map_pos(self);
                incircle(a, b, c, p) > 0.0
            }
            Some(i) => {
                // The finite edge `a -> b` has the outside of the convex hull
                // on its left.
                let a = self.position(face.vertices[ccw(i)]);
                let b = self.position(face.vertices[cw(i)]);
                match orientation(a, b, p) {
                    Orientation::CounterClockwise => true,
                    Orientation::Collinear => strictly_between(a, b, p),
                    Orientation::Clockwise => false,
                }
            }
        }
    }

    /// Sets the neighbor links between all given triangles via their shared
    /// edges.
    fn link_faces(&mut self, faces: &[TriFaceHandle]) {
        let mut edges = FxHashMap::default();
        for &fh in faces {
            let face = self.face(fh);
            for i in 0..3 {
                edges.insert((face.vertices[ccw(i)], face.vertices[cw(i)]), (fh, i));
            }
        }

        for (&(a, b), &(fh, i)) in &edges {
            if let Some(&(other, _)) = edges.get(&(b, a)) {
                self.face_mut(fh).neighbors[i] = other;
            }
        }
    }

    fn update_incidence(&mut self, faces: &[TriFaceHandle]) {
        for &fh in faces {
            let vertices = self.face(fh).vertices;
            for &v in &vertices {
                if v.is_infinite() {
                    self.infinite_incident = Some(fh);
                } else {
                    self.incident[v.to_usize()] = Some(fh);
                }
            }
        }
    }

    /// Insertion while all existing sites are collinear (or there are less
    /// than two).
    fn insert_low_dim(&mut self, p: Point) -> InsertionDelta {
        let stays_collinear = match (self.line.first(), self.line.last()) {
            (Some(&first), Some(&last)) if first != last => {
                orientation(self.position(first), self.position(last), p) == Orientation::Collinear
            }
            _ => true,
        };

        let site = self.push_site(p);
        if stays_collinear {
            let idx = {
                let positions = &self.positions;
                match self.line.binary_search_by(|&s| lex_cmp(positions[s.to_usize()], p)) {
                    Ok(i) | Err(i) => i,
                }
            };
            self.line.insert(idx, site);

            let mut touched = vec![site];
            if idx > 0 {
                touched.push(self.line[idx - 1]);
            }
            if let Some(&next) = self.line.get(idx + 1) {
                touched.push(next);
            }

            InsertionDelta {
                site,
                inserted: true,
                removed_faces: vec![],
                created_faces: vec![],
                touched_sites: touched,
            }
        } else {
            let created = self.build_fan(site);
            let touched = (0..self.positions.len()).map(SiteHandle::from_usize).collect();

            InsertionDelta {
                site,
                inserted: true,
                removed_faces: vec![],
                created_faces: created,
                touched_sites: touched,
            }
        }
    }

    /// Turns the collinear sites into a fan of triangles around `apex` (which
    /// is not on their line). This is the only triangulation of such a point
    /// set.
    fn build_fan(&mut self, apex: SiteHandle) -> Vec<TriFaceHandle> {
        let mut chain = mem::take(&mut self.line);
        let first = self.position(chain[0]);
        let last = self.position(chain[chain.len() - 1]);
        if orientation(first, last, self.position(apex)) == Orientation::Clockwise {
            chain.reverse();
        }

        let mut created = Vec::with_capacity(2 * chain.len());
        for w in chain.windows(2) {
            created.push(self.push_face(Face::new([w[0], w[1], apex])));
        }

        // The convex hull in counter-clockwise order is the chain followed by
        // the apex. Each hull edge `a -> b` gets the infinite triangle
        // `(b, a, ∞)`.
        let inf = SiteHandle::INFINITE;
        for w in chain.windows(2) {
            created.push(self.push_face(Face::new([w[1], w[0], inf])));
        }
        created.push(self.push_face(Face::new([apex, chain[chain.len() - 1], inf])));
        created.push(self.push_face(Face::new([chain[0], apex, inf])));

        self.link_faces(&created);
        self.update_incidence(&created);
        created
    }

    /// Bowyer-Watson insertion into a two dimensional triangulation.
    /// `nearest` is the site nearest to `p` (and doesn't coincide with it).
    fn insert_in_plane(&mut self, p: Point, nearest: SiteHandle) -> InsertionDelta {
        // The nearest site will be a neighbor of the new site, so one of its
        // triangles has to be in conflict with `p`.
        let start = self.ring(nearest).into_iter()
            .filter_map(|(_, f)| f)
            .find(|&f| self.in_conflict(f, p));
        let start = match start {
            Some(f) => f,
            None => {
                warn!(?p, ?nearest, "no conflicting triangle around nearest site, scanning all");
                match self.faces().find(|&f| self.in_conflict(f, p)) {
                    Some(f) => f,
                    None => panic!("internal triangulation error: no triangle in conflict with {:?}", p),
                }
            }
        };

        // Collect the cavity.
        let mut cavity = vec![start];
        let mut in_cavity = FxHashSet::default();
        in_cavity.insert(start);
        let mut stack = vec![start];
        while let Some(fh) = stack.pop() {
            for &nh in &self.face(fh).neighbors {
                if !in_cavity.contains(&nh) && self.in_conflict(nh, p) {
                    in_cavity.insert(nh);
                    cavity.push(nh);
                    stack.push(nh);
                }
            }
        }

        // Collect the rim of the cavity: edges `a -> b` (counter-clockwise
        // around the cavity) with the triangle outside and the index of the
        // link in that triangle pointing into the cavity.
        let mut rim = Vec::new();
        for &fh in &cavity {
            let face = *self.face(fh);
            for i in 0..3 {
                let outside = face.neighbors[i];
                if !in_cavity.contains(&outside) {
                    let j = self.face(outside).neighbor_index(fh)
                        .expect("internal triangulation error: neighbor links not mutual");
                    rim.push((face.vertices[ccw(i)], face.vertices[cw(i)], outside, j));
                }
            }
        }

        // Connect the new site to every rim edge.
        let site = self.push_site(p);
        let mut by_first = FxHashMap::default();
        let mut by_second = FxHashMap::default();
        let mut created = Vec::with_capacity(rim.len());
        for &(a, b, outside, j) in &rim {
            let mut face = Face::new([a, b, site]);
            face.neighbors[2] = outside;
            let fh = self.push_face(face);
            self.face_mut(outside).neighbors[j] = fh;

            by_first.insert(a, fh);
            by_second.insert(b, fh);
            created.push(fh);
        }

        // The triangle `(a, b, site)` shares the edge `(b, site)` with the
        // triangle starting at `b` and the edge `(site, a)` with the one
        // ending at `a`.
        for &fh in &created {
            let [a, b, _] = self.face(fh).vertices;
            let (opposite_a, opposite_b) = match (by_first.get(&b), by_second.get(&a)) {
                (Some(&oa), Some(&ob)) => (oa, ob),
                _ => panic!("internal triangulation error: cavity around {:?} is not a disk", p),
            };
            let face = self.face_mut(fh);
            face.neighbors[0] = opposite_a;
            face.neighbors[1] = opposite_b;
        }

        for &fh in &cavity {
            self.faces.remove(fh.to_usize());
        }
        self.update_incidence(&created);

        let mut touched = vec![site];
        touched.extend(rim.iter().map(|&(a, ..)| a).filter(|a| !a.is_infinite()));

        InsertionDelta {
            site,
            inserted: true,
            removed_faces: cavity,
            created_faces: created,
            touched_sites: touched,
        }
    }
}

impl Default for DelaunayTriangulation {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DelaunayTriangulation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("DelaunayTriangulation")
            .field("dimension", &self.dimension())
            .field("positions", &self.positions)
            .field("faces", &self.faces().map(|fh| (fh, *self.face(fh))).collect::<Vec<_>>())
            .field("line", &self.line)
            .finish()
    }
}


/// Maps the three vertices of a finite triangle to their positions.
trait MapPositions {
    fn map_pos(self, tri: &DelaunayTriangulation) -> [Point; 3];
}

impl MapPositions for [SiteHandle; 3] {
    fn map_pos(self, tri: &DelaunayTriangulation) -> [Point; 3] {
        let [a, b, c] = self;
        [tri.position(a), tri.position(b), tri.position(c)]
    }
}
