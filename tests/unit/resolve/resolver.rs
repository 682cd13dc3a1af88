use super::*;
use crate::entity::circle;
use crate::value::{ParamFn, sym};

fn radius_fn() -> Value {
    Value::Func(ParamFn::unary("size", |v| Ok(Value::Number(v.number("size")? * 10.0))))
}

#[test]
fn symbols_are_replaced_and_text_is_not() {
    let b = Bindings::one("r", 5.0);
    assert_eq!(sym("r").resolve(&b).unwrap(), Value::Number(5.0));
    assert_eq!(sym("q").resolve(&b).unwrap(), sym("q"));
    assert_eq!(Value::from("r").resolve(&b).unwrap(), Value::from("r"));
}

#[test]
fn containers_resolve_elementwise_and_keep_shape() {
    let b = Bindings::one("r", 5.0);
    let v = Value::map([
        ("a", Value::List(vec![sym("r"), 1.into()])),
        ("b", sym("r")),
    ]);
    let expected = Value::map([
        ("a", Value::List(vec![5.into(), 1.into()])),
        ("b", 5.into()),
    ]);
    assert_eq!(v.resolve(&b).unwrap(), expected);
}

#[test]
fn function_called_with_its_single_bound_argument() {
    let b = Bindings::one("size", 3.0).with("other", 1.0);
    assert_eq!(radius_fn().resolve(&b).unwrap(), Value::Number(30.0));
    let untouched = radius_fn().resolve(&Bindings::one("other", 1.0)).unwrap();
    assert!(matches!(untouched, Value::Func(_)));
}

#[test]
fn two_matching_arguments_are_ambiguous() {
    let f = Value::Func(ParamFn::new(["a", "b"], |_, v| Ok(v.clone())));
    let err = f
        .resolve(&Bindings::one("a", 1.0).with("b", 2.0))
        .unwrap_err();
    assert!(matches!(err, ToonError::Resolution(_)));
    assert!(err.to_string().contains("ambiguous"));
}

#[test]
fn empty_bindings_are_identity() {
    let v = Value::List(vec![sym("r"), radius_fn(), 1.into()]);
    assert_eq!(v.resolve(&Bindings::new()).unwrap(), v);
    let e = Value::Entity(circle().set("radius", sym("r")));
    assert_eq!(e.resolve(&Bindings::new()).unwrap(), e);
}

#[test]
fn entities_take_bindings_as_overrides() {
    let e = circle().set("radius", sym("r"));
    let Value::Entity(resolved) = Value::Entity(e.clone())
        .resolve(&Bindings::one("r", 7.0))
        .unwrap()
    else {
        panic!("expected an entity");
    };
    assert_eq!(resolved.resolver().depth(), 1);
    assert_eq!(e.resolver().depth(), 0);
}

#[test]
fn inner_layers_run_before_outer_layers() {
    // The inner layer maps r -> s, the outer one s -> 4.
    let chain = Resolver::identity()
        .layer(Bindings::one("r", sym("s")))
        .layer(Bindings::one("s", 4.0));
    assert_eq!(chain.apply(&sym("r")).unwrap(), Value::Number(4.0));
    assert_eq!(chain.depth(), 2);

    let closest = Resolver::identity()
        .layer(Bindings::one("r", 1.0))
        .layer(Bindings::one("r", 2.0));
    assert_eq!(closest.apply(&sym("r")).unwrap(), Value::Number(1.0));
}

#[test]
fn nest_runs_inner_chain_first() {
    let inner = Resolver::identity().layer(Bindings::one("a", sym("b")));
    let outer = Resolver::identity().layer(Bindings::one("b", 9.0));
    let nested = Resolver::nest(&outer, &inner);
    assert_eq!(nested.apply(&sym("a")).unwrap(), Value::Number(9.0));
    assert_eq!(Resolver::nest(&Resolver::identity(), &inner), inner);
    assert!(Resolver::identity().layer(Bindings::new()).is_identity());
}
