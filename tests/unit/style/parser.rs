use super::*;

#[test]
fn weights_and_radii_are_checked() {
    let p = BasicStyleParser::default();
    assert_eq!(p.weight(&2.0.into()).unwrap(), 2.0);
    assert_eq!(p.weight(&0.0.into()).unwrap(), 0.0);
    assert!(p.weight(&(-1.0).into()).is_err());
    assert!(p.weight(&f64::INFINITY.into()).is_err());
    assert_eq!(p.radius(&5.0.into()).unwrap(), 5.0);
    assert!(p.radius(&0.0.into()).is_err());
    assert!(matches!(
        p.radius(&crate::value::sym("r")),
        Err(ToonError::Resolution(_))
    ));
}

#[test]
fn dashes_by_name_or_lengths() {
    let p = BasicStyleParser::default();
    assert!(p.dash(&Value::Null).unwrap().is_solid());
    assert_eq!(p.dash(&"dotted".into()).unwrap(), Dash(vec![1.0, 1.0]));
    assert!(p.dash(&"wavy".into()).is_err());
    let lengths = Value::List(vec![3.0.into(), 2.0.into()]);
    assert_eq!(p.dash(&lengths).unwrap(), Dash(vec![3.0, 2.0]));
    let odd = Value::List(vec![3.0.into()]);
    assert!(p.dash(&odd).is_err());
    let negative = Value::List(vec![3.0.into(), (-2.0).into()]);
    assert!(p.dash(&negative).is_err());
}

#[test]
fn grayscale_parser_converts_colors() {
    let gray = BasicStyleParser::new(true);
    assert_eq!(gray.color(&"red".into()).unwrap(), Color::rgb(54, 54, 54));
    assert_eq!(
        BasicStyleParser::new(false).color(&"red".into()).unwrap(),
        Color::rgb(255, 0, 0)
    );
}

#[test]
fn gradient_stops_rise_through_percentages() {
    let p = BasicStyleParser::new(true);
    let pair = |pct: f64, c: &str| Value::List(vec![pct.into(), c.into()]);
    let stops = p
        .stops(&Value::List(vec![pair(0.0, "red"), pair(100.0, "none")]))
        .unwrap();
    assert_eq!(stops.len(), 2);
    assert_eq!(stops[0].color, Color::rgb(54, 54, 54));
    assert!(stops[1].color.is_none());

    assert!(
        p.stops(&Value::List(vec![pair(60.0, "red"), pair(40.0, "blue")]))
            .is_err()
    );
    assert!(p.stops(&Value::List(vec![pair(120.0, "red")])).is_err());
    assert!(p.stops(&Value::List(vec![])).is_err());
    assert!(p.stops(&Value::List(vec!["red".into()])).is_err());
}
