//! Demonstrates bulk-loading an `RPlusTree` and running report/count range
//! queries against it.

use rplus_tree::geometry::Point2D;
use rplus_tree::r_plus_tree::RPlusTree;
use rplus_tree::range_search::RangeSearch;
use tracing::info;

fn main() {
    let points: Vec<Point2D<&str>> = vec![
        Point2D::new(11.0, 11.0, Some("A")),
        Point2D::new(51.0, 51.0, Some("B")),
        Point2D::new(31.0, 41.0, Some("C")),
        Point2D::new(71.0, 81.0, Some("D")),
        Point2D::new(81.0, 91.0, Some("E")),
        Point2D::new(21.0, 21.0, Some("F")),
        Point2D::new(22.0, 22.0, Some("G")),
        Point2D::new(23.0, 23.0, Some("H")),
    ];

    let mut tree: RPlusTree<Point2D<&str>> = RPlusTree::new(4);
    info!("Bulk-loading {} points", points.len());
    tree.assign(points);

    let min = Point2D::new(20.0, 20.0, None);
    let max = Point2D::new(60.0, 60.0, None);

    let results = tree.report_range_vec(&min, &max);
    println!("Points within ({:.0},{:.0})-({:.0},{:.0}):", min.x, min.y, max.x, max.y);
    for p in &results {
        println!("  {:?} at ({:.1}, {:.1})", p.data, p.x, p.y);
    }

    println!("countRange == {}", tree.count_range(&min, &max));
}
