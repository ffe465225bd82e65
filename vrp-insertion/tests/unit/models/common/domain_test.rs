use super::*;

parameterized_test! {can_check_time_window_intersection, (first, second, expected), {
    let first = TimeWindow::new(first.0, first.1);
    let second = TimeWindow::new(second.0, second.1);

    assert_eq!(first.intersects(&second), expected);
    assert_eq!(second.intersects(&first), expected);
}}

can_check_time_window_intersection! {
    case01: ((0., 10.), (5., 15.), true),
    case02: ((0., 10.), (10., 15.), true),
    case03: ((0., 10.), (11., 15.), false),
    case04: ((5., 6.), (0., 100.), true),
    case05: ((0., 0.), (0., 0.), true),
}

parameterized_test! {can_check_whether_time_window_contains_time, (time, expected), {
    assert_eq!(TimeWindow::new(10., 20.).contains(time), expected);
}}

can_check_whether_time_window_contains_time! {
    case01: (9.9, false),
    case02: (10., true),
    case03: (15., true),
    case04: (20., true),
    case05: (20.1, false),
}

#[test]
fn can_compare_time_windows() {
    assert_eq!(TimeWindow::new(0., 10.), TimeWindow::new(0., 10.));
    assert_ne!(TimeWindow::new(0., 10.), TimeWindow::new(0., 11.));
    assert_eq!(TimeWindow::new(5., 15.).duration(), 10.);
}

#[test]
fn can_calculate_distance_between_coordinates() {
    let distance = Coordinate::new(0., 0.).distance_to(&Coordinate::new(3., 4.));

    assert_eq!(distance, 5.);
}
