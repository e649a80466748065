#[macro_export]
macro_rules! pair {
    ( $key: expr, $value: expr) => {
        $crate::table::Pair {
            key: $key.into(),
            value: $value.into(),
        }
    };
}
