//! Voronoi diagrams of point sites as half-edge data structures.
//!
//! The main type is [`VoronoiDiagram`]: a doubly connected edge list (DCEL)
//! whose faces are the cells of the sites, whose vertices are the
//! circumcenters of the finite triangles of the dual Delaunay triangulation
//! and whose half-edges are the Voronoi edges, oriented such that their face
//! lies on their left. Rays end in one implicit point at infinity, which is
//! represented by `None` wherever a vertex handle is returned.
//!
//! Sites are inserted incrementally. Each insertion updates the
//! [`DelaunayTriangulation`] and then patches only the part of the diagram
//! that changed.
//!
//! ```
//! use voronoi_hds::prelude::*;
//!
//! let mut diagram = VoronoiDiagram::<DefaultConfig>::new();
//! let a = diagram.insert((0.0, 0.0));
//! diagram.insert((4.0, 0.0));
//! diagram.insert((0.0, 4.0));
//!
//! assert_eq!(diagram.number_of_faces(), 3);
//! assert_eq!(diagram.number_of_vertices(), 1);
//! assert_eq!(diagram.locate((1.0, 1.0)), Ok(LocateResult::Face(a)));
//!
//! for he in diagram.ccb_halfedges(a).unwrap().lap() {
//!     assert_eq!(diagram.incident_face(he), a);
//! }
//! ```
//!
//! # Features
//!
//! - `io` (default): reading and writing diagrams, see [`io`].
//! - `large-handle`: use `u64` instead of `u32` as handle index type.


pub mod delaunay;
pub mod diagram;
pub mod dual;
pub mod handle;
#[cfg(feature = "io")]
pub mod io;
pub mod map;
pub mod math;
pub mod prelude;
pub mod refs;

pub use self::{
    delaunay::{DelaunayTriangulation, Dimension, InsertionDelta},
    diagram::{
        Config, DebugConfig, DefaultConfig, LocateError, LocateResult, ValidityError,
        VoronoiDiagram,
    },
    dual::Dual,
    handle::{FaceHandle, HalfedgeHandle, SiteHandle, TriEdge, TriFaceHandle, VertexHandle},
};
