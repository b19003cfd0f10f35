//! Handles to refer to elements of the diagram and of its dual triangulation.
//!
//! Diagram handles (`VertexHandle`, `HalfedgeHandle`, `FaceHandle`) consist of
//! a slot index and a generation. The generation is bumped every time a slot
//! is emptied, so a handle outliving its element (e.g. after
//! `VoronoiDiagram::clear`) can be detected by `contains_*`. Handles are just
//! numbers: they don't borrow the diagram and don't know which diagram they
//! belong to.
//!
//! Triangulation handles (`SiteHandle`, `TriFaceHandle`) are plain indices:
//! sites are never removed and triangle indices are never reused.

use std::{
    fmt,
    hash::Hash,
};

use static_assertions::assert_eq_size;


/// The integer type used for handle indices.
///
/// This is `u32` by default. With the `large-handle` feature, it's `u64`.
#[cfg(not(feature = "large-handle"))]
#[allow(non_camel_case_types)]
pub type hsize = u32;

/// The integer type used for handle indices.
///
/// This is `u32` by default. With the `large-handle` feature, it's `u64`.
#[cfg(feature = "large-handle")]
#[allow(non_camel_case_types)]
pub type hsize = u64;


/// Types that are handles to some element.
pub trait Handle: 'static + Copy + fmt::Debug + Eq + Ord + Hash {
    /// Creates a handle from a raw slot index and a generation.
    fn new(idx: hsize, generation: hsize) -> Self;

    /// Returns the slot index of this handle.
    fn idx(&self) -> hsize;

    /// Returns the generation of this handle.
    fn generation(&self) -> hsize;

    /// Helper to create a handle from a `usize` slot index (with generation
    /// 0).
    ///
    /// # Panics
    ///
    /// Panics if `raw` does not fit into `hsize`.
    #[inline(always)]
    fn from_usize(raw: usize) -> Self {
        assert!(raw <= hsize::max_value() as usize, "handle index out of range: {}", raw);
        Self::new(raw as hsize, 0)
    }

    /// Returns the slot index as `usize`.
    #[inline(always)]
    fn to_usize(&self) -> usize {
        self.idx() as usize
    }
}

macro_rules! make_handle_type {
    ($(#[$attr:meta])* $name:ident, $short:expr) => {
        $(#[$attr])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name {
            idx: hsize,
            generation: hsize,
        }

        impl Handle for $name {
            #[inline(always)]
            fn new(idx: hsize, generation: hsize) -> Self {
                Self { idx, generation }
            }

            #[inline(always)]
            fn idx(&self) -> hsize {
                self.idx
            }

            #[inline(always)]
            fn generation(&self) -> hsize {
                self.generation
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}{}", $short, self.idx)?;
                if self.generation != 0 {
                    write!(f, "'{}", self.generation)?;
                }
                Ok(())
            }
        }

        // A handle with the maximum index is used as "none" value so that
        // `Optioned<Handle>` doesn't need extra space.
        impl optional::Noned for $name {
            #[inline(always)]
            fn is_none(&self) -> bool {
                self.idx == hsize::max_value()
            }

            #[inline(always)]
            fn get_none() -> Self {
                Self { idx: hsize::max_value(), generation: 0 }
            }
        }

        impl optional::OptEq for $name {
            fn opt_eq(&self, other: &Self) -> bool {
                self == other
            }
        }
    }
}

make_handle_type!(
    /// Handle to a Voronoi vertex (the circumcenter of a finite Delaunay
    /// triangle).
    VertexHandle, "V"
);
make_handle_type!(
    /// Handle to a directed Voronoi edge.
    HalfedgeHandle, "H"
);
make_handle_type!(
    /// Handle to a Voronoi face (the cell of one site).
    FaceHandle, "F"
);

assert_eq_size!(VertexHandle, [hsize; 2]);
assert_eq_size!(HalfedgeHandle, [hsize; 2]);
assert_eq_size!(FaceHandle, [hsize; 2]);


/// Handle to a site, i.e. a vertex of the dual Delaunay triangulation.
///
/// Sites are numbered in insertion order, starting at 0. The special value
/// [`SiteHandle::INFINITE`] denotes the infinite vertex of the triangulation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SiteHandle(hsize);

impl SiteHandle {
    /// The infinite vertex of the triangulation. All convex hull edges form a
    /// triangle with it.
    pub const INFINITE: SiteHandle = SiteHandle(hsize::max_value());

    pub(crate) fn from_usize(raw: usize) -> Self {
        assert!(raw < hsize::max_value() as usize, "too many sites");
        SiteHandle(raw as hsize)
    }

    /// Returns the insertion index of this site.
    pub fn idx(self) -> hsize {
        self.0
    }

    #[inline(always)]
    pub(crate) fn to_usize(self) -> usize {
        self.0 as usize
    }

    /// Returns `true` if this is the infinite vertex.
    pub fn is_infinite(self) -> bool {
        self == Self::INFINITE
    }
}

impl fmt::Debug for SiteHandle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_infinite() {
            f.write_str("S∞")
        } else {
            write!(f, "S{}", self.0)
        }
    }
}


/// Handle to a triangle of the dual Delaunay triangulation (finite or
/// infinite).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriFaceHandle(hsize);

impl TriFaceHandle {
    /// Placeholder for neighbor links that are not set yet.
    pub(crate) const DANGLING: TriFaceHandle = TriFaceHandle(hsize::max_value());

    pub(crate) fn from_usize(raw: usize) -> Self {
        assert!(raw < hsize::max_value() as usize, "too many triangles");
        TriFaceHandle(raw as hsize)
    }

    /// Returns the raw index of this triangle.
    pub fn idx(self) -> hsize {
        self.0
    }

    #[inline(always)]
    pub(crate) fn to_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for TriFaceHandle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}


/// A directed edge of the dual Delaunay triangulation, from one site to
/// another.
///
/// The half-edge dual to `from -> to` lies on the boundary of the cell of
/// `from`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriEdge {
    pub from: SiteHandle,
    pub to: SiteHandle,
}

impl TriEdge {
    pub fn new(from: SiteHandle, to: SiteHandle) -> Self {
        Self { from, to }
    }

    /// Returns the same edge pointing in the other direction.
    pub fn reversed(self) -> Self {
        Self { from: self.to, to: self.from }
    }

    /// Returns `true` if one of the endpoints is the infinite vertex.
    pub fn is_infinite(self) -> bool {
        self.from.is_infinite() || self.to.is_infinite()
    }
}

impl fmt::Debug for TriEdge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}->{:?}", self.from, self.to)
    }
}
