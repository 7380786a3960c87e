use super::*;

#[test]
fn trailing_zero_padding_compares_equal() {
    let a: FixedKey<8> = FixedKey::new("abc").unwrap();
    let b: FixedKey<8> = FixedKey::new("abc\0\0\0\0\0").unwrap();
    assert_eq!(a, b);
    assert_eq!(a.cmp(&b), Ordering::Equal);
}

#[test]
fn embedded_nul_is_significant() {
    let a = FixedKey::<8>::from_bytes(b"ab\0cd").unwrap();
    let b = FixedKey::<8>::from_bytes(b"abcd").unwrap();
    assert_ne!(a, b);
}

#[test]
fn ordering_is_lexicographic_on_raw_bytes() {
    let a: FixedKey<4> = FixedKey::new("aa").unwrap();
    let b: FixedKey<4> = FixedKey::new("ab").unwrap();
    assert!(a < b);
}

#[test]
fn oversize_input_is_rejected() {
    let err = FixedKey::<4>::new("toolong").unwrap_err();
    match err {
        KeyError::TooLong { input_len, capacity } => {
            assert_eq!(input_len, 7);
            assert_eq!(capacity, 4);
        }
    }
}

#[test]
fn as_str_lossy_trims_at_first_nul() {
    let k: FixedKey<16> = FixedKey::new("hi").unwrap();
    assert_eq!(k.as_str_lossy(), "hi");
}

#[test]
fn default_is_all_zero() {
    let k: FixedKey<8> = FixedKey::default();
    assert_eq!(k.as_bytes(), &[0u8; 8]);
}
