use super::*;

#[test]
fn parses_hex_names_and_no_color() {
    assert_eq!(Color::parse("#FA8072").unwrap(), Color::rgb(0xFA, 0x80, 0x72));
    assert_eq!(Color::parse("Salmon").unwrap(), Color::rgb(0xFA, 0x80, 0x72));
    for none in NO_COLOR {
        assert!(Color::parse(none).unwrap().is_none());
    }
    assert!(Color::parse("#12345").is_err());
    assert!(Color::parse("#GG0000").is_err());
    assert!(Color::parse("#ééé").is_err());
    assert!(Color::parse("chartreuse-ish").is_err());
}

#[test]
fn alpha_multiplier_notation() {
    let c = Color::parse("0.8 * green").unwrap();
    assert_eq!(c.rgb, Some([0x00, 0x80, 0x00]));
    assert_eq!(c.alpha, Some(0.8));
    assert_eq!(Color::parse("green*0.5").unwrap().alpha, Some(0.5));
    assert!(Color::parse("0.5 * none").unwrap().is_none());
    assert!(Color::parse("1.5 * green").is_err());
    assert!(Color::parse("red * green").is_err());
    assert!(Color::parse("0.1 * 0.2 * red").is_err());
}

#[test]
fn from_value_promotes_text_and_null() {
    assert_eq!(
        Color::from_value(&Value::from("red")).unwrap(),
        Color::rgb(255, 0, 0)
    );
    assert!(Color::from_value(&Value::Null).unwrap().is_none());
    assert!(Color::from_value(&Value::Number(1.0)).is_err());
}

#[test]
fn grayscale_uses_luma_and_keeps_grays() {
    assert_eq!(Color::rgb(255, 0, 0).grayscale(), Color::rgb(54, 54, 54));
    assert_eq!(Color::rgb(0, 255, 0).grayscale(), Color::rgb(182, 182, 182));
    assert_eq!(Color::rgb(7, 7, 7).grayscale(), Color::rgb(7, 7, 7));
    assert!(Color::NONE.grayscale().is_none());
}

#[test]
fn blend_interpolates_channels_and_alpha() {
    let mid = Color::rgb(0, 0, 0).blend(Color::rgb(200, 100, 50), 0.5);
    assert_eq!(mid, Color::rgb(100, 50, 25));
    let fade = Color::rgb(255, 0, 0).blend(Color::NONE, 0.5);
    assert_eq!(fade.rgb, Some([255, 0, 0]));
    assert_eq!(fade.alpha, Some(0.5));
}

#[test]
fn hex_round_trips_rgb() {
    assert_eq!(Color::rgb(250, 128, 114).hex().as_deref(), Some("#FA8072"));
    assert_eq!(Color::NONE.hex(), None);
}
