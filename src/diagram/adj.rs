//! Circulators around faces and vertices and iterators over all elements.

use std::fmt;

use crate::{
    handle::{FaceHandle, HalfedgeHandle, VertexHandle},
    math::Point,
};
use super::{Config, VoronoiDiagram};


// ===============================================================================================
// ===== Circulators
// ===============================================================================================

/// A cursor on a cyclic sequence of half-edges.
///
/// Circulators never end on their own: after as many calls to `succ` as the
/// cycle is long, the circulator is back at its start. Use [`lap`] to iterate
/// over exactly one revolution.
///
/// [`lap`]: Circulator::lap
pub trait Circulator: Copy {
    /// The half-edge the circulator currently points to.
    fn halfedge(&self) -> HalfedgeHandle;

    /// The half-edge the circulator was created with.
    fn start(&self) -> HalfedgeHandle;

    /// Returns the circulator advanced by one step.
    #[must_use]
    fn succ(self) -> Self;

    /// Returns the circulator moved back by one step.
    #[must_use]
    fn pred(self) -> Self;

    fn is_at_start(&self) -> bool {
        self.halfedge() == self.start()
    }

    /// Returns an iterator over one revolution, starting at the current
    /// half-edge.
    fn lap(self) -> Lap<Self> {
        Lap {
            next: Some(self),
            first: self.halfedge(),
        }
    }
}

/// Iterator over one revolution of a circulator. See [`Circulator::lap`].
#[derive(Debug, Clone)]
pub struct Lap<T> {
    next: Option<T>,
    first: HalfedgeHandle,
}

impl<T: Circulator> Iterator for Lap<T> {
    type Item = HalfedgeHandle;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let succ = current.succ();
        self.next = if succ.halfedge() == self.first { None } else { Some(succ) };
        Some(current.halfedge())
    }
}


/// Circulates over the boundary of a face in counter-clockwise order
/// (following `next`).
pub struct CcbCirculator<'a, C: Config> {
    diagram: &'a VoronoiDiagram<C>,
    start: HalfedgeHandle,
    current: HalfedgeHandle,
}

impl<C: Config> Circulator for CcbCirculator<'_, C> {
    fn halfedge(&self) -> HalfedgeHandle {
        self.current
    }

    fn start(&self) -> HalfedgeHandle {
        self.start
    }

    fn succ(self) -> Self {
        Self {
            current: self.diagram.halfedges[self.current].next,
            ..self
        }
    }

    fn pred(self) -> Self {
        Self {
            current: self.diagram.halfedges[self.current].prev,
            ..self
        }
    }
}

/// Circulates over the half-edges leaving a vertex. One step goes from `he`
/// to `he.twin().next()`, which is clockwise around the vertex (`pred` goes
/// counter-clockwise).
pub struct VertexCirculator<'a, C: Config> {
    diagram: &'a VoronoiDiagram<C>,
    start: HalfedgeHandle,
    current: HalfedgeHandle,
}

impl<C: Config> Circulator for VertexCirculator<'_, C> {
    fn halfedge(&self) -> HalfedgeHandle {
        self.current
    }

    fn start(&self) -> HalfedgeHandle {
        self.start
    }

    fn succ(self) -> Self {
        let twin = self.diagram.halfedges[self.current].twin;
        Self {
            current: self.diagram.halfedges[twin].next,
            ..self
        }
    }

    fn pred(self) -> Self {
        let prev = self.diagram.halfedges[self.current].prev;
        Self {
            current: self.diagram.halfedges[prev].twin,
            ..self
        }
    }
}

// Trait impls shared by both circulators. They are written by hand, since
// deriving would require `C: Clone` and friends.
macro_rules! circulator_impls {
    ($($name:ident),*) => {
        $(
            impl<C: Config> Clone for $name<'_, C> {
                fn clone(&self) -> Self {
                    *self
                }
            }

            impl<C: Config> Copy for $name<'_, C> {}

            impl<C: Config> PartialEq for $name<'_, C> {
                fn eq(&self, other: &Self) -> bool {
                    self.current == other.current
                }
            }

            impl<C: Config> Eq for $name<'_, C> {}

            impl<C: Config> fmt::Debug for $name<'_, C> {
                fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                    write!(
                        f,
                        concat!(stringify!($name), " {{ current: {:?}, start: {:?} }}"),
                        self.current,
                        self.start,
                    )
                }
            }
        )*
    }
}

circulator_impls!(CcbCirculator, VertexCirculator);


// ===============================================================================================
// ===== Entry points
// ===============================================================================================

impl<C: Config> VoronoiDiagram<C> {
    /// Returns a circulator over the boundary of `face`, or `None` if the
    /// boundary is empty (only the case for a diagram with a single site).
    ///
    /// # Panics
    ///
    /// Panics if `face` does not exist.
    pub fn ccb_halfedges(&self, face: FaceHandle) -> Option<CcbCirculator<'_, C>> {
        self.face_data(face).halfedge.into_option().map(|start| CcbCirculator {
            diagram: self,
            start,
            current: start,
        })
    }

    /// Returns a circulator over the boundary of `face` starting at `start`.
    ///
    /// # Panics
    ///
    /// Panics if `face` does not exist or `start` is not on its boundary.
    pub fn ccb_halfedges_from(&self, face: FaceHandle, start: HalfedgeHandle) -> CcbCirculator<'_, C> {
        self.check_face(face);
        if self.halfedge_data(start).face != face {
            panic!("{:?} is not on the boundary of {:?}", start, face);
        }

        CcbCirculator {
            diagram: self,
            start,
            current: start,
        }
    }

    /// Returns a circulator over all half-edges leaving `vertex`.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` does not exist.
    pub fn incident_halfedges(&self, vertex: VertexHandle) -> VertexCirculator<'_, C> {
        let start = self.outgoing(vertex);
        VertexCirculator {
            diagram: self,
            start,
            current: start,
        }
    }

    /// Returns a circulator over all half-edges leaving `vertex`, starting at
    /// `start`.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` does not exist or `start` does not leave it.
    pub fn incident_halfedges_from(
        &self,
        vertex: VertexHandle,
        start: HalfedgeHandle,
    ) -> VertexCirculator<'_, C> {
        self.check_vertex(vertex);
        if self.source(start) != Some(vertex) {
            panic!("{:?} does not leave {:?}", start, vertex);
        }

        VertexCirculator {
            diagram: self,
            start,
            current: start,
        }
    }


    // ===== Iterators ===========================================================================

    /// Iterates over all vertices in storage order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexHandle> + '_ {
        self.vertices.handles()
    }

    pub fn halfedges(&self) -> impl Iterator<Item = HalfedgeHandle> + '_ {
        self.halfedges.handles()
    }

    /// Iterates over all undirected edges, represented by the half-edge with
    /// the smaller handle of each twin pair.
    pub fn edges(&self) -> impl Iterator<Item = HalfedgeHandle> + '_ {
        self.halfedges.iter().filter(|(h, he)| *h < he.twin).map(|(h, _)| h)
    }

    pub fn faces(&self) -> impl Iterator<Item = FaceHandle> + '_ {
        self.faces.handles()
    }

    /// Iterates over the sites, one per face (in the order of `faces`).
    pub fn sites(&self) -> impl Iterator<Item = Point> + '_ {
        self.faces.values().map(move |f| self.tri.position(f.site))
    }

    pub fn bounded_faces(&self) -> impl Iterator<Item = FaceHandle> + '_ {
        self.faces().filter(move |&fh| !self.is_unbounded_face(fh))
    }

    pub fn unbounded_faces(&self) -> impl Iterator<Item = FaceHandle> + '_ {
        self.faces().filter(move |&fh| self.is_unbounded_face(fh))
    }

    /// Iterates over all half-edges between two finite vertices.
    pub fn bounded_halfedges(&self) -> impl Iterator<Item = HalfedgeHandle> + '_ {
        self.halfedges().filter(move |&he| !self.is_unbounded_halfedge(he))
    }

    /// Iterates over all half-edges coming from or going to infinity.
    pub fn unbounded_halfedges(&self) -> impl Iterator<Item = HalfedgeHandle> + '_ {
        self.halfedges().filter(move |&he| self.is_unbounded_halfedge(he))
    }
}
