use super::*;
use crate::style::Color;

#[test]
fn line_defaults_and_bare_fields() {
    assert_eq!(LineFields::classify(&Value::Null).unwrap(), LineFields::default());

    let weight = LineFields::classify(&3.0.into()).unwrap();
    assert_eq!(weight.weight, Value::Number(3.0));
    assert_eq!(weight.color, Value::from("black"));

    let off = LineFields::classify(&false.into()).unwrap();
    assert_eq!(off.weight, Value::Number(0.0));

    let dashed = LineFields::classify(&"dashed".into()).unwrap();
    assert_eq!(dashed.dash, Value::from("dashed"));
    assert_eq!(dashed.color, Value::from("black"));

    let red = LineFields::classify(&Color::rgb(255, 0, 0).into()).unwrap();
    assert_eq!(red.color, Value::Color(Color::rgb(255, 0, 0)));
}

#[test]
fn list_fields_in_any_order() {
    let v = Value::List(vec!["dotted".into(), 2.0.into(), "red".into()]);
    let l = LineFields::classify(&v).unwrap();
    assert_eq!(l.color, Value::from("red"));
    assert_eq!(l.weight, Value::Number(2.0));
    assert_eq!(l.dash, Value::from("dotted"));

    // A list of numbers alone is a dash pattern.
    let pattern = Value::List(vec![3.0.into(), 1.0.into()]);
    assert_eq!(LineFields::classify(&pattern).unwrap().dash, pattern);

    let nested = Value::List(vec!["blue".into(), pattern.clone()]);
    assert_eq!(LineFields::classify(&nested).unwrap().dash, pattern);
}

#[test]
fn map_fields_and_unknown_keys() {
    let v = Value::map([("color", Value::from("navy")), ("weight", Value::from(4.0))]);
    let l = LineFields::classify(&v).unwrap();
    assert_eq!(l.color, Value::from("navy"));
    assert_eq!(l.weight, Value::Number(4.0));
    assert_eq!(l.dash, Value::from("solid"));

    let bad = Value::map([("thickness", 4.0)]);
    assert!(matches!(
        LineFields::classify(&bad),
        Err(ToonError::Validation(_))
    ));
}

#[test]
fn unrecognized_and_placeholder_fields() {
    let point: Value = (1.0, 2.0).into();
    assert!(matches!(
        LineFields::classify(&point),
        Err(ToonError::Validation(_))
    ));
    let placeholder = Value::List(vec!["red".into(), crate::value::sym("w")]);
    assert!(matches!(
        LineFields::classify(&placeholder),
        Err(ToonError::Resolution(_))
    ));
}

#[test]
fn animated_line_style_splits_per_field() {
    let style = Animated::over_time(1.0, |t| {
        if t < 1.0 {
            Value::from("red")
        } else {
            Value::List(vec!["blue".into(), 5.0.into()])
        }
    });
    let l = LineFields::classify(&style.into()).unwrap();
    let (Value::Animated(color), Value::Animated(weight)) = (&l.color, &l.weight) else {
        panic!("expected animated fields");
    };
    assert_eq!(color.at(Some(0.0)).unwrap(), Value::from("red"));
    assert_eq!(color.at(Some(1.0)).unwrap(), Value::from("blue"));
    assert_eq!(weight.at(Some(0.0)).unwrap(), Value::Number(1.0));
    assert_eq!(weight.at(Some(1.0)).unwrap(), Value::Number(5.0));
    assert_eq!(color.dt().unwrap(), Some(1.0));
}

#[test]
fn fill_shorthands() {
    assert_eq!(FillFields::classify(&Value::Null).unwrap(), FillFields::None);
    assert_eq!(FillFields::classify(&false.into()).unwrap(), FillFields::None);
    assert_eq!(FillFields::classify(&"clear".into()).unwrap(), FillFields::None);
    assert_eq!(
        FillFields::classify(&"salmon".into()).unwrap(),
        FillFields::Solid {
            color: "salmon".into()
        }
    );
}

#[test]
fn fill_maps_take_defaults_per_kind() {
    let radial = FillFields::classify(&Value::map([("fill", "radialgradient")])).unwrap();
    assert_eq!(
        radial,
        FillFields::RadialGradient {
            radius: 100.into(),
            begin: "black".into(),
            end: "transparent".into(),
        }
    );

    let linear = Value::map([
        ("fill", Value::from("lineargradient")),
        ("orientation", Value::from("left-right")),
    ]);
    let FillFields::LinearGradient { stops, orientation } = FillFields::classify(&linear).unwrap()
    else {
        panic!("expected a linear gradient");
    };
    assert_eq!(orientation, "left-right");
    let Value::List(stops) = stops else {
        panic!("expected default stops");
    };
    assert_eq!(stops.len(), 2);

    let solid = Value::map([("fill", "solid"), ("color", "gold")]);
    assert_eq!(
        FillFields::classify(&solid).unwrap(),
        FillFields::Solid { color: "gold".into() }
    );
}

#[test]
fn fill_kind_must_be_literal() {
    let animated_kind = Value::map([(
        "fill",
        Value::from(Animated::over_time(1.0, |_| "solid")),
    )]);
    assert!(matches!(
        FillFields::classify(&animated_kind),
        Err(ToonError::Validation(_))
    ));
    let whole = Value::from(Animated::over_time(1.0, |_| "red"));
    assert!(matches!(
        FillFields::classify(&whole),
        Err(ToonError::Validation(_))
    ));
    assert!(FillFields::classify(&Value::map([("color", "red")])).is_err());
    assert!(FillFields::classify(&Value::map([("fill", "hatched")])).is_err());
    assert!(matches!(
        FillFields::classify(&Value::map([("fill", crate::value::sym("kind"))])),
        Err(ToonError::Resolution(_))
    ));
}
