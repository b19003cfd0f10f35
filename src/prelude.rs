//! Reexports of all important types and traits of this library for
//! convenience.
//!
//! As with every prelude, the main usage is to glob import everything from
//! this module:
//!
//! ```
//! use voronoi_hds::prelude::*;
//! ```

pub use crate::{
    DelaunayTriangulation, VoronoiDiagram, Config, DefaultConfig, DebugConfig,
    LocateResult, LocateError,
    diagram::Circulator,
    dual::Dual,
    handle::{FaceHandle, HalfedgeHandle, SiteHandle, TriEdge, TriFaceHandle, VertexHandle},
    math::{Point, Pos2Like},
};
