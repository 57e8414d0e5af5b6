use super::*;

#[test]
fn whence_from_numeric_convention() {
    assert_eq!(Whence::try_from(0).unwrap(), Whence::Absolute);
    assert_eq!(Whence::try_from(1).unwrap(), Whence::Current);
    assert_eq!(Whence::try_from(2).unwrap(), Whence::End);

    let err = Whence::try_from(3).unwrap_err();
    assert!(matches!(err, VecVidError::Value(_)));
    assert!(Whence::try_from(-1).is_err());
}

#[test]
fn resolve_each_whence() {
    assert_eq!(resolve_seek_target(4, 10, 7, Whence::Absolute).unwrap(), 7);
    assert_eq!(resolve_seek_target(4, 10, -3, Whence::Current).unwrap(), 1);
    assert_eq!(resolve_seek_target(4, 10, 2, Whence::Current).unwrap(), 6);
    assert_eq!(resolve_seek_target(4, 10, 1, Whence::End).unwrap(), 9);
    assert_eq!(resolve_seek_target(4, 10, 0, Whence::End).unwrap(), 10);
}

#[test]
fn resolve_rejects_out_of_range_targets() {
    assert!(matches!(
        resolve_seek_target(0, 10, 11, Whence::Absolute),
        Err(VecVidError::Value(_))
    ));
    assert!(resolve_seek_target(2, 10, -3, Whence::Current).is_err());
    assert!(resolve_seek_target(2, 10, 11, Whence::End).is_err());
    assert!(resolve_seek_target(0, 10, i64::MIN, Whence::End).is_err());
}
