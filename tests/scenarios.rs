//! Concrete diagrams built through the public API.

use voronoi_hds::{prelude::*, Dimension};


type Diagram = VoronoiDiagram<DebugConfig>;

fn close(a: Point, x: f64, y: f64) -> bool {
    (a.x - x).abs() < 1e-9 && (a.y - y).abs() < 1e-9
}


#[test]
fn three_sites() {
    let mut diagram = Diagram::new();
    let a = diagram.insert((0.0, 0.0));
    let b = diagram.insert((4.0, 0.0));
    let c = diagram.insert((0.0, 4.0));

    assert!(diagram.is_valid());
    assert_eq!(diagram.number_of_faces(), 3);
    assert_eq!(diagram.number_of_vertices(), 1);
    assert_eq!(diagram.number_of_edges(), 3);
    assert!(diagram.unbounded_face().is_some());
    assert_eq!(diagram.bounded_face(), None);

    let v = diagram.vertices().next().unwrap();
    assert!(close(diagram.position(v), 2.0, 2.0));

    // Three rays: every edge has exactly one finite endpoint.
    for he in diagram.edges() {
        let finite = diagram.source(he).is_some() as u8 + diagram.target(he).is_some() as u8;
        assert_eq!(finite, 1);
    }

    assert_eq!(diagram.locate((1.0, 1.0)), Ok(LocateResult::Face(a)));
    assert_eq!(diagram.locate((5.0, 0.0)), Ok(LocateResult::Face(b)));
    assert_eq!(diagram.locate((0.0, 5.0)), Ok(LocateResult::Face(c)));
}

#[test]
fn octagon_around_center() {
    let mut diagram = Diagram::new();
    diagram.insert_range(vec![
        (10.0, 0.0), (7.0, 7.0), (0.0, 10.0), (-7.0, 7.0),
        (-10.0, 0.0), (-7.0, -7.0), (0.0, -10.0), (7.0, -7.0),
    ]);
    let center = diagram.insert((0.0, 0.0));
    assert!(diagram.is_valid());

    assert_eq_bounded(&diagram, center);
    assert_eq!(diagram.face(center).degree(), 8);
    assert_eq!(diagram.locate((0.5, -0.5)), Ok(LocateResult::Face(center)));

    // Every neighbor of the center is on the hull.
    for he in diagram.ccb_halfedges(center).unwrap().lap() {
        let other = diagram.incident_face(diagram.twin(he));
        assert!(diagram.is_unbounded_face(other));
    }
}

fn assert_eq_bounded(diagram: &Diagram, center: FaceHandle) {
    assert_eq!(diagram.bounded_faces().collect::<Vec<_>>(), vec![center]);
    assert!(!diagram.is_unbounded_face(center));
}

#[test]
fn euler_characteristic() {
    let points = [
        (0.0, 0.0), (10.0, 1.0), (3.0, 7.0), (-4.0, 2.0), (5.0, -3.0),
        (1.0, 1.0), (6.0, 4.0), (-2.0, -5.0), (8.0, 8.0), (2.0, -1.0),
    ];
    let mut diagram = Diagram::new();
    for &p in &points {
        diagram.insert(p);
        if diagram.number_of_halfedges() == 0 {
            // A single site has an empty boundary.
            assert_eq!(diagram.number_of_connected_components(), 1);
            continue;
        }

        let v = diagram.number_of_vertices() as i64;
        let e = diagram.number_of_edges() as i64;
        let f = diagram.number_of_faces() as i64;
        let v_inf = if diagram.unbounded_halfedge().is_some() { 1 } else { 0 };
        let c = diagram.number_of_connected_components() as i64;
        assert_eq!(v + v_inf - e + f, 2 * c);
    }
}

#[test]
fn collinear_then_plane() {
    let mut diagram = Diagram::new();
    diagram.insert_range((0..5).map(|i| (i as f64, 2.0 * i as f64)));
    assert_eq!(diagram.dual_triangulation().dimension(), Dimension::Line);
    assert_eq!(diagram.number_of_vertices(), 0);
    assert_eq!(diagram.number_of_edges(), 4);
    assert_eq!(diagram.unbounded_halfedges().count(), 8);

    diagram.insert((0.0, 5.0));
    assert_eq!(diagram.dual_triangulation().dimension(), Dimension::Plane);
    assert!(diagram.is_valid());
    assert_eq!(diagram.number_of_vertices(), diagram.dual_triangulation().num_finite_faces());
}

#[test]
fn dual_of_every_element() {
    let diagram = Diagram::from_points(vec![
        (0.0, 0.0), (4.0, 0.5), (1.5, 3.5), (5.0, 5.0), (-2.0, 3.0),
    ]);
    let tri = diagram.dual_triangulation();

    for f in diagram.faces() {
        let site: SiteHandle = diagram.dual(f);
        assert_eq!(tri.position(site), diagram.site_position(f));
    }
    for v in diagram.vertices() {
        let tf: TriFaceHandle = diagram.dual(v);
        assert!(close(tri.circumcenter(tf).unwrap(), diagram.position(v).x, diagram.position(v).y));
    }
    for he in diagram.halfedges() {
        let edge: TriEdge = diagram.dual(he);
        assert_eq!(diagram.dual(edge.from), diagram.incident_face(he));
        assert_eq!(diagram.dual(edge.to), diagram.incident_face(diagram.twin(he)));
    }
}

#[test]
fn nearest_site_of_triangulation() {
    let diagram = Diagram::from_points(vec![(0.0, 0.0), (10.0, 0.0), (0.0, 10.0), (10.0, 10.0)]);
    let tri = diagram.dual_triangulation();
    let s = tri.nearest_site(Point::new(9.0, 8.0)).unwrap();
    assert_eq!(tri.position(s), Point::new(10.0, 10.0));
    assert!(tri.is_valid());
}
