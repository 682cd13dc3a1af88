use super::*;

fn keys(values: &[f64]) -> Sampled<f64> {
    let n = (values.len() - 1).max(1) as f64;
    Sampled::Keys(
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Key {
                frac: i as f64 / n,
                value: *v,
            })
            .collect(),
    )
}

#[test]
fn collapse_keeps_varying_sequences() {
    let varying = keys(&[1.0, 2.0, 3.0]);
    assert_eq!(varying.clone().collapsed(), varying);
}

#[test]
fn collapse_reduces_agreeing_samples_to_constant() {
    let flat = keys(&[2.0, 2.0 * (1.0 + 1e-16), 2.0]);
    assert_eq!(flat.collapsed(), Sampled::Const(2.0));
}

#[test]
fn deanimated_fails_on_keyframes() {
    assert_eq!(Sampled::Const(3.0).deanimated().unwrap(), 3.0);
    assert!(matches!(
        keys(&[1.0, 2.0]).deanimated(),
        Err(ToonError::Animation(_))
    ));
}

#[test]
fn zip_broadcasts_constants() {
    let zipped = zip(Sampled::Const(1.0), keys(&[5.0, 6.0])).unwrap();
    let Sampled::Keys(k) = zipped else {
        panic!("expected keyframes");
    };
    assert_eq!(k.len(), 2);
    assert_eq!(k[1].value, (1.0, 6.0));
    assert_eq!(
        zip(Sampled::Const(1.0), Sampled::Const(2.0)).unwrap(),
        Sampled::Const((1.0, 2.0))
    );
}

#[test]
fn zip_rejects_mismatched_grids() {
    let err = zip(keys(&[1.0, 2.0]), keys(&[1.0, 2.0, 3.0])).unwrap_err();
    assert!(matches!(err, ToonError::Animation(_)));
    assert!(err.to_string().contains("mismatched sample keys"));
    assert!(zip(keys(&[1.0, 2.0]), keys(&[3.0, 4.0])).is_ok());
}

#[test]
fn keyframes_serialize_with_fractions() {
    let json = serde_json::to_value(keys(&[0.0, 1.0])).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"keys": [{"frac": 0.0, "value": 0.0}, {"frac": 1.0, "value": 1.0}]})
    );
    let json = serde_json::to_value(Sampled::Const(2.0)).unwrap();
    assert_eq!(json, serde_json::json!({"const": 2.0}));
}
