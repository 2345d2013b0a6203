use std::convert::TryFrom;

use crate::Kind;

#[allow(clippy::float_cmp)]
mod de;



macro_rules! check_kinds {
    {$($kind:ident = $val:literal),* $(,)?} => {
        $(
            assert_eq!(u8::from(Kind::$kind), $val);
            assert_eq!(Kind::try_from($val as u8), Ok(Kind::$kind));
        )*
    };
}

#[test]
fn exhaustive_kind_check() {
    check_kinds! {
        End = 0,
        Byte = 1,
        Short = 2,
        Int = 3,
        Long = 4,
        Float = 5,
        Double = 6,
        ByteArray = 7,
        String = 8,
        List = 9,
        Compound = 10,
        IntArray = 11,
        LongArray = 12,
    }

    for value in 13..=u8::MAX {
        assert!(Kind::try_from(value).is_err())
    }
}
