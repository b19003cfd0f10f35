use crate::{
    handle::{SiteHandle, TriEdge},
    math::Point,
};
use super::{DelaunayTriangulation, Dimension};


fn s(i: usize) -> SiteHandle {
    SiteHandle::from_usize(i)
}

fn check(tri: &DelaunayTriangulation) {
    if let Err(e) = tri.validate() {
        panic!("{}\n{:#?}", e, tri);
    }
}

#[test]
fn empty() {
    let tri = DelaunayTriangulation::new();
    assert_eq!(tri.dimension(), Dimension::Empty);
    assert_eq!(tri.num_vertices(), 0);
    assert_eq!(tri.nearest_site(Point::new(1.0, 2.0)), None);
    check(&tri);
}

#[test]
fn single_site() {
    let mut tri = DelaunayTriangulation::new();
    let delta = tri.insert((1.0, 1.0));

    assert!(delta.inserted);
    assert_eq!(delta.site, s(0));
    assert_eq!(delta.touched_sites, vec![s(0)]);
    assert_eq!(tri.dimension(), Dimension::Point);
    assert!(tri.neighbors(s(0)).is_empty());
    check(&tri);
}

#[test]
fn duplicate_is_ignored() {
    let mut tri = DelaunayTriangulation::from_points(vec![(0.0, 0.0), (4.0, 0.0), (0.0, 4.0)]);
    let faces_before = tri.faces().collect::<Vec<_>>();

    let delta = tri.insert((4.0, 0.0));
    assert!(!delta.inserted);
    assert_eq!(delta.site, s(1));
    assert!(delta.created_faces.is_empty());
    assert!(delta.removed_faces.is_empty());
    assert!(delta.touched_sites.is_empty());

    assert_eq!(tri.num_vertices(), 3);
    assert_eq!(tri.faces().collect::<Vec<_>>(), faces_before);
}

#[test]
fn collinear_sites_are_sorted_along_line() {
    let tri = DelaunayTriangulation::from_points(vec![
        (2.0, 2.0),
        (0.0, 0.0),
        (3.0, 3.0),
        (1.0, 1.0),
    ]);

    assert_eq!(tri.dimension(), Dimension::Line);
    assert_eq!(tri.num_faces(), 0);
    assert_eq!(tri.neighbors(s(1)), vec![s(3)]);
    assert_eq!(tri.neighbors(s(3)), vec![s(1), s(0)]);
    assert_eq!(tri.neighbors(s(2)), vec![s(0)]);
    check(&tri);
}

#[test]
fn vertical_line() {
    let tri = DelaunayTriangulation::from_points(vec![(0.0, 5.0), (0.0, -1.0), (0.0, 2.0)]);
    assert_eq!(tri.dimension(), Dimension::Line);
    assert_eq!(tri.neighbors(s(2)), vec![s(1), s(0)]);
    check(&tri);
}

#[test]
fn first_triangle() {
    let mut tri = DelaunayTriangulation::from_points(vec![(0.0, 0.0), (4.0, 0.0)]);
    let delta = tri.insert((0.0, 4.0));

    assert_eq!(tri.dimension(), Dimension::Plane);
    assert_eq!(delta.created_faces.len(), 4);
    assert_eq!(delta.touched_sites.len(), 3);
    assert_eq!(tri.num_faces(), 4);
    assert_eq!(tri.num_finite_faces(), 1);
    check(&tri);

    let f = tri.finite_faces().next().unwrap();
    assert_eq!(tri.circumcenter(f), Some(Point::new(2.0, 2.0)));

    // Every site is on the hull and thus adjacent to the infinite vertex.
    for i in 0..3 {
        assert!(tri.neighbors(s(i)).contains(&SiteHandle::INFINITE));
        assert_eq!(tri.neighbors(s(i)).len(), 3);
    }
}

#[test]
fn fan_over_long_line() {
    // Apex below the line: the chain has to be reversed to get
    // counter-clockwise triangles.
    let tri = DelaunayTriangulation::from_points(vec![
        (0.0, 0.0),
        (1.0, 0.0),
        (2.0, 0.0),
        (3.0, 0.0),
        (1.5, -2.0),
    ]);

    assert_eq!(tri.num_finite_faces(), 3);
    assert_eq!(tri.num_faces(), 2 * 5 - 2);
    check(&tri);
}

#[test]
fn square_with_center() {
    let mut tri = DelaunayTriangulation::from_points(vec![
        (0.0, 0.0),
        (2.0, 0.0),
        (2.0, 2.0),
        (0.0, 2.0),
    ]);
    check(&tri);
    assert_eq!(tri.num_finite_faces(), 2);

    let delta = tri.insert((1.0, 1.0));
    check(&tri);

    // The two triangles of the square share the center on their
    // circumcircle, so both are in conflict.
    assert_eq!(delta.removed_faces.len(), 2);
    assert_eq!(delta.created_faces.len(), 4);
    assert_eq!(tri.num_finite_faces(), 4);

    let mut around_center = tri.neighbors(s(4));
    around_center.sort();
    assert_eq!(around_center, vec![s(0), s(1), s(2), s(3)]);
    for edge in &[TriEdge::new(s(4), s(0)), TriEdge::new(s(2), s(4))] {
        assert!(tri.has_edge(*edge));
        assert!(tri.left_face(*edge).is_some());
    }
    assert!(!tri.has_edge(TriEdge::new(s(0), s(2))));
}

#[test]
fn neighbors_are_counter_clockwise() {
    let tri = DelaunayTriangulation::from_points(vec![
        (0.0, 0.0),
        (10.0, 0.0),
        (0.0, 10.0),
        (-10.0, 0.0),
        (0.0, -10.0),
    ]);
    check(&tri);

    let ring = tri.neighbors(s(0));
    assert_eq!(ring.len(), 4);
    let start = ring.iter().position(|&n| n == s(1)).unwrap();
    let rotated = ring[start..].iter().chain(&ring[..start]).copied().collect::<Vec<_>>();
    assert_eq!(rotated, vec![s(1), s(2), s(3), s(4)]);
}

#[test]
fn point_on_hull_edge() {
    let mut tri = DelaunayTriangulation::from_points(vec![(0.0, 0.0), (4.0, 0.0), (2.0, 3.0)]);
    let delta = tri.insert((2.0, 0.0));
    check(&tri);

    assert_eq!(tri.num_finite_faces(), 2);
    assert!(delta.removed_faces.len() >= 2);
    assert!(tri.neighbors(s(3)).contains(&SiteHandle::INFINITE));
}

#[test]
fn point_outside_hull() {
    let mut tri = DelaunayTriangulation::from_points(vec![(0.0, 0.0), (4.0, 0.0), (0.0, 4.0)]);
    tri.insert((10.0, 10.0));
    check(&tri);

    assert_eq!(tri.num_finite_faces(), 2);
    assert_eq!(tri.num_faces(), 2 * 4 - 2);
}

#[test]
fn nearest_site_walk() {
    let points = (0..6)
        .flat_map(|x| (0..6).map(move |y| (x as f64 * 3.0 + (y % 2) as f64, y as f64 * 2.0)))
        .collect::<Vec<_>>();
    let tri = DelaunayTriangulation::from_points(points.clone());
    check(&tri);

    for &(qx, qy) in &[(0.2, 0.1), (7.9, 5.3), (16.0, 11.0), (-3.0, 4.0), (8.0, 100.0)] {
        let q = Point::new(qx, qy);
        let found = tri.nearest_site(q).unwrap();
        let best = points.iter()
            .map(|&(x, y)| (x - qx).powi(2) + (y - qy).powi(2))
            .fold(std::f64::INFINITY, f64::min);
        let d = (tri.position(found).x - qx).powi(2) + (tri.position(found).y - qy).powi(2);
        assert_eq!(d, best, "query {:?}", q);
    }
}

#[test]
fn cocircular_grid_stays_valid() {
    let mut tri = DelaunayTriangulation::new();
    for x in 0..5 {
        for y in 0..5 {
            tri.insert((x as f64, y as f64));
            check(&tri);
        }
    }

    assert_eq!(tri.num_vertices(), 25);
    assert_eq!(tri.num_faces(), 2 * 25 - 2);

    // Every unit square is split into two triangles.
    assert_eq!(tri.num_finite_faces(), 32);
}

fn circle(n: usize, radius: f64) -> Vec<(f64, f64)> {
    (0..n)
        .map(|i| {
            let angle = i as f64 * 2.0 * std::f64::consts::PI / n as f64;
            (radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

#[test]
fn sites_on_circle() {
    for &n in &[5, 6, 7, 13, 62, 100, 257] {
        let tri = DelaunayTriangulation::from_points(circle(n, 10.0));
        check(&tri);
        assert_eq!(tri.num_vertices(), n);

        // All sites are on the hull.
        assert_eq!(tri.num_finite_faces(), n - 2);
        for i in 0..n {
            assert!(tri.neighbors(s(i)).contains(&s((i + 1) % n)));
        }
    }
}

#[test]
fn sites_on_circle_with_center() {
    let mut points = circle(64, 3.7);
    points.push((0.0, 0.0));
    points.extend(circle(64, 1e-3));

    let mut tri = DelaunayTriangulation::new();
    for p in points {
        tri.insert(p);
        check(&tri);
    }
    assert_eq!(tri.num_vertices(), 129);
}

#[test]
fn tiny_lattice_next_to_far_sites() {
    // Neighboring floats around (0.5, 0.5): every predicate on these is
    // decided by the last bits.
    let ulp = 2.0f64.powi(-53);
    let mut tri = DelaunayTriangulation::new();
    tri.insert((12.0, 12.0));
    tri.insert((24.0, 24.0));
    for i in 0..6 {
        for j in 0..6 {
            tri.insert((0.5 + i as f64 * ulp, 0.5 + j as f64 * ulp));
            check(&tri);
        }
    }
    tri.insert((-3.0, 7.0));
    check(&tri);
    assert_eq!(tri.num_vertices(), 39);
}

#[test]
fn removed_faces_are_gone() {
    let mut tri = DelaunayTriangulation::from_points(vec![
        (0.0, 0.0),
        (5.0, 0.0),
        (5.0, 5.0),
        (0.0, 5.0),
    ]);
    let delta = tri.insert((2.0, 3.0));

    for f in &delta.removed_faces {
        assert!(!tri.contains_face(*f));
    }
    for f in &delta.created_faces {
        assert!(tri.contains_face(*f));
        assert!(tri.face_vertices(*f).contains(&delta.site));
    }
}

#[test]
fn clear_resets() {
    let mut tri = DelaunayTriangulation::from_points(vec![(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
    tri.clear();
    assert_eq!(tri.dimension(), Dimension::Empty);
    assert_eq!(tri.num_faces(), 0);

    let delta = tri.insert((3.0, 3.0));
    assert_eq!(delta.site, s(0));
}

#[test]
#[should_panic(expected = "must be finite")]
fn nan_is_rejected() {
    let mut tri = DelaunayTriangulation::new();
    tri.insert((std::f64::NAN, 0.0));
}
