use super::*;

#[test]
fn default_is_opaque_black() {
    assert_eq!(Rgba::default(), Rgba::new(0.0, 0.0, 0.0, 1.0));
}

#[test]
fn channel_indexing_and_sentinel() {
    let px = Rgba::new(0.1, 0.2, 0.3, 0.4);
    assert_eq!(px.channel(0), 0.1);
    assert_eq!(px.channel(3), 0.4);
    assert_eq!(px.channel(4), CHANNEL_SENTINEL);

    let mut px = px;
    *px.channel_mut(1).unwrap() = 0.9;
    assert_eq!(px.g, 0.9);
    assert!(px.channel_mut(7).is_none());
}

#[test]
fn addition_sums_colors_without_clamping() {
    let a = Rgba::new(0.75, 0.5, 0.0, 0.2);
    let b = Rgba::new(0.75, 0.25, 0.0, 0.3);
    let mut sum = a + b;
    assert_eq!(sum, Rgba::rgb(1.5, 0.75, 0.0));
    sum += Rgba::RED;
    assert_eq!(sum.r, 2.5);
    assert_eq!(sum.a, 1.0);
}
