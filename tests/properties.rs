//! Randomized checks of the structural invariants.
//!
//! Most strategies use small integer coordinates, so that duplicates,
//! collinear and cocircular sites are frequent. The others use arbitrary
//! floats and sites on (or very close to) a circle.

use proptest::prelude::*;

use voronoi_hds::prelude::*;


type Diagram = VoronoiDiagram<DebugConfig>;

fn points() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-20i32..20, -20i32..20), 0..40)
        .prop_map(|v| v.into_iter().map(|(x, y)| (x as f64, y as f64)).collect())
}

fn float_points() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 0..60)
}

/// `n` sites on a circle, starting at some angle, each moved along the
/// radius by at most `jitter` (relative).
fn circle_points() -> impl Strategy<Value = Vec<(f64, f64)>> {
    (3usize..80, 0.1f64..1000.0, 0.0f64..6.3, 0.0f64..1e-12)
        .prop_flat_map(|(n, radius, offset, jitter)| {
            prop::collection::vec(-1.0f64..1.0, n).prop_map(move |noise| {
                noise.iter()
                    .enumerate()
                    .map(|(i, e)| {
                        let angle = offset + i as f64 * 2.0 * std::f64::consts::PI / n as f64;
                        let r = radius * (1.0 + jitter * e);
                        (r * angle.cos(), r * angle.sin())
                    })
                    .collect()
            })
        })
}

fn distance2(a: Point, b: Point) -> f64 {
    (a.x - b.x) * (a.x - b.x) + (a.y - b.y) * (a.y - b.y)
}

/// Number of distinct sites nearest to `q`, and that distance.
fn nearest(diagram: &Diagram, q: Point) -> (usize, f64) {
    let best = diagram.sites()
        .map(|s| distance2(s, q))
        .fold(f64::INFINITY, f64::min);
    let count = diagram.sites().filter(|&s| distance2(s, q) == best).count();
    (count, best)
}


fn assert_links(diagram: &Diagram) -> Result<(), TestCaseError> {
    prop_assert_eq!(diagram.number_of_halfedges(), 2 * diagram.number_of_edges());

    for he in diagram.halfedges() {
        let twin = diagram.twin(he);
        let next = diagram.next(he);
        prop_assert_eq!(diagram.twin(twin), he);
        prop_assert_ne!(twin, he);
        prop_assert_eq!(diagram.prev(next), he);
        prop_assert_eq!(diagram.next(diagram.prev(he)), he);
        prop_assert_eq!(diagram.incident_face(next), diagram.incident_face(he));
        prop_assert_ne!(diagram.incident_face(twin), diagram.incident_face(he));
        prop_assert_eq!(diagram.target(he), diagram.source(next));
        prop_assert_eq!(diagram.source(twin), diagram.target(he));
    }

    for v in diagram.vertices() {
        prop_assert!(diagram.vertex(v).degree() >= 3);
        for he in diagram.incident_halfedges(v).lap() {
            prop_assert_eq!(diagram.source(he), Some(v));
        }
    }
    Ok(())
}


proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn counts_are_order_independent(points in points()) {
        let forward = Diagram::from_points(points.clone());
        let backward = Diagram::from_points(points.into_iter().rev());

        prop_assert!(forward.is_valid());
        prop_assert!(backward.is_valid());
        prop_assert_eq!(forward.number_of_faces(), backward.number_of_faces());
        prop_assert_eq!(forward.number_of_vertices(), backward.number_of_vertices());
        prop_assert_eq!(forward.number_of_edges(), backward.number_of_edges());
        prop_assert_eq!(forward.bounded_faces().count(), backward.bounded_faces().count());
    }

    #[test]
    fn float_sites_stay_valid(points in float_points()) {
        // Every insertion is validated by the config.
        let diagram = Diagram::from_points(points.clone());
        prop_assert!(diagram.is_valid());
        prop_assert!(diagram.dual_triangulation().is_valid());
        assert_links(&diagram)?;

        let backward = Diagram::from_points(points.into_iter().rev());
        prop_assert_eq!(backward.number_of_vertices(), diagram.number_of_vertices());
        prop_assert_eq!(backward.number_of_edges(), diagram.number_of_edges());
    }

    #[test]
    fn sites_on_circle_stay_valid(points in circle_points()) {
        let n = points.len();
        let mut diagram = Diagram::from_points(points);
        prop_assert!(diagram.is_valid());
        prop_assert_eq!(diagram.number_of_faces(), n);
        prop_assert_eq!(diagram.bounded_faces().count(), 0);

        let center = diagram.insert((0.0, 0.0));
        prop_assert!(diagram.is_valid());
        prop_assert_eq!(diagram.face(center).degree(), n);
    }

    #[test]
    fn halfedge_links(points in points()) {
        let diagram = Diagram::from_points(points);
        assert_links(&diagram)?;
    }

    #[test]
    fn duplicates_are_ignored(points in points()) {
        let mut diagram = Diagram::from_points(points.clone());
        let faces = diagram.number_of_faces();
        let vertices = diagram.number_of_vertices();

        prop_assert_eq!(diagram.insert_range(points), 0);
        prop_assert_eq!(diagram.number_of_faces(), faces);
        prop_assert_eq!(diagram.number_of_vertices(), vertices);
    }

    #[test]
    fn locate_finds_nearest_sites(
        points in points(),
        queries in prop::collection::vec((-25i32..25, -25i32..25), 1..10),
    ) {
        let diagram = Diagram::from_points(points);

        for (x, y) in queries {
            let q = Point::new(x as f64, y as f64);
            let result = diagram.locate(q);
            prop_assert_eq!(result, diagram.locate(q));
            if diagram.number_of_faces() == 0 {
                prop_assert_eq!(result, Err(LocateError::EmptyDiagram));
                continue;
            }

            let (tied, best) = nearest(&diagram, q);
            match result {
                Ok(LocateResult::Face(f)) => {
                    prop_assert_eq!(tied, 1);
                    prop_assert_eq!(distance2(diagram.site_position(f), q), best);
                }
                Ok(LocateResult::Halfedge(he)) => {
                    prop_assert_eq!(tied, 2);
                    let a = diagram.site_position(diagram.incident_face(he));
                    let b = diagram.site_position(diagram.incident_face(diagram.twin(he)));
                    prop_assert_eq!(distance2(a, q), best);
                    prop_assert_eq!(distance2(b, q), best);
                }
                Ok(LocateResult::Vertex(v)) => {
                    prop_assert!(tied >= 3);
                    for he in diagram.incident_halfedges(v).lap() {
                        let site = diagram.site_position(diagram.incident_face(he));
                        prop_assert_eq!(distance2(site, q), best);
                    }
                }
                Err(e) => prop_assert!(false, "unexpected error: {}", e),
            }
        }
    }

    #[test]
    fn io_round_trip(points in points()) {
        let original = Diagram::from_points(points);
        let mut written = Vec::new();
        original.write_to(&mut written).unwrap();

        let mut read = Diagram::new();
        read.read_from(&written[..]).unwrap();
        let mut rewritten = Vec::new();
        read.write_to(&mut rewritten).unwrap();

        prop_assert_eq!(written, rewritten);
        prop_assert_eq!(read.number_of_vertices(), original.number_of_vertices());
    }
}
