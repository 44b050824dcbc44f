use super::*;

fn all_curves() -> Vec<Ease> {
    vec![
        Ease::Linear,
        Ease::quadratic(Point::new(0.25, 0.0)),
        Ease::quadratic(Point::new(0.5, 0.5)),
        Ease::quadratic(Point::new(0.9, 1.0)),
        Ease::quadratic_influence(0.33),
        Ease::cubic(Point::new(0.42, 0.0), Point::new(0.58, 1.0)),
        Ease::cubic(Point::new(0.0, 0.0), Point::new(1.0, 1.0)),
        Ease::cubic_influence(0.75, 0.1),
    ]
}

#[test]
fn endpoints_are_exact() {
    for ease in all_curves() {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
    }
}

#[test]
fn quadratic_with_centered_control_is_identity() {
    let ease = Ease::quadratic(Point::new(0.5, 0.5));
    for i in 0..=16 {
        let x = f64::from(i) / 16.0;
        assert_eq!(ease.apply(x), x);
    }
}

#[test]
fn quadratic_closed_form_lands_on_requested_x() {
    let ease = Ease::quadratic(Point::new(0.2, 0.8));
    let Ease::Quadratic { control } = ease else {
        unreachable!()
    };
    for x in [0.1, 0.3, 0.5, 0.7, 0.95] {
        let t = quadratic_t_for_x(control.x, x);
        assert!((ease.point_at(t).x - x).abs() < 1e-12);
    }
}

#[test]
fn out_of_range_input_returns_sentinel() {
    for ease in all_curves() {
        assert_eq!(ease.apply(-0.01), EASE_SENTINEL);
        assert_eq!(ease.apply(1.5), EASE_SENTINEL);
        assert!(ease.try_apply(2.0).is_err());
    }
}

#[test]
fn cubic_search_matches_closed_form_solver() {
    let ease = Ease::cubic(Point::new(0.42, 0.0), Point::new(0.58, 1.0));
    for i in 1..20 {
        let x = f64::from(i) / 20.0;
        let searched = ease.apply(x);
        let exact = ease.apply_exact(x);
        assert!(
            (searched - exact).abs() < 1e-4,
            "x = {x}: {searched} vs {exact}"
        );
    }
}

#[test]
fn cubic_search_follows_fixed_halving_schedule() {
    let ease = Ease::cubic(Point::new(0.42, 0.0), Point::new(0.58, 1.0));

    // Sixteen steps of 0.5^(i + 1) land on odd multiples of 2^-17.
    let t = ease.search_t_for_x(0.3);
    assert_eq!(t, 36277.0 / 131072.0);
    assert_eq!(ease.search_t_for_x(0.7), 94795.0 / 131072.0);

    assert_eq!(ease.apply(0.3), ease.point_at(t).y);
}

#[test]
fn cubic_ease_in_out_is_symmetric_and_monotonic() {
    let ease = Ease::cubic_influence(0.5, 0.5);
    assert!((ease.apply(0.5) - 0.5).abs() < 1e-4);
    let mut prev = 0.0;
    for i in 1..=10 {
        let y = ease.apply(f64::from(i) / 10.0);
        assert!(y >= prev);
        prev = y;
    }
    assert!(ease.apply(0.1) < 0.1);
    assert!(ease.apply(0.9) > 0.9);
}

#[test]
fn influence_constructors_place_control_points() {
    assert_eq!(
        Ease::cubic_influence(0.3, 0.2),
        Ease::Cubic {
            c1: Point::new(0.3, 0.0),
            c2: Point::new(0.8, 1.0),
        }
    );
    assert_eq!(
        Ease::quadratic_influence(0.4),
        Ease::Quadratic {
            control: Point::new(0.4, 0.0),
        }
    );
}

#[test]
fn out_of_range_control_point_is_reported_not_fatal() {
    let ease = Ease::quadratic(Point::new(1.5, 0.0));
    assert!(ease.validate().is_err());
    let ease = Ease::cubic(Point::new(0.2, 0.0), Point::new(-0.1, 1.0));
    assert!(ease.validate().is_err());
    assert!(Ease::Linear.validate().is_ok());
}

#[test]
fn point_at_rejects_parameter_outside_unit_interval() {
    let ease = Ease::cubic_influence(0.3, 0.3);
    assert_eq!(ease.point_at(1.2), Point::new(0.0, 0.0));
    assert_eq!(ease.point_at(1.0), Point::new(1.0, 1.0));
}
