use super::*;

#[test]
fn same_block_path_gives_same_id() {
    let a = IdPath::root("sidebar").push_str("b1").push_str("header").finish();
    let b = IdPath::root("sidebar").push_str("b1").push_str("header").finish();
    assert_eq!(a, b);
}

#[test]
fn parts_are_separated() {
    let a = IdPath::root("sidebar").push_str("b1").push_str("0").finish();
    let b = IdPath::root("sidebar").push_str("b10").finish();
    assert_ne!(a, b);

    let c = IdPath::root("sidebar").push_u64(1).finish();
    let d = IdPath::root("sidebar").push_u64(2).finish();
    assert_ne!(c, d);
}

#[test]
fn namespaces_differ_and_display_is_hex() {
    let a = IdPath::root("sidebar").finish();
    let b = IdPath::root("inspector").finish();
    assert_ne!(a, b);
    assert_eq!(Id::raw(255).to_string(), "#00000000000000ff");
}
