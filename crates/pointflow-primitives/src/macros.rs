#[macro_export]
macro_rules! dimension_kind_registry_entries {
    ($macro:ident $(, @args $($args:tt)+ )?) => {
        $macro! {
            $(
                @args $($args)+;
            )?
            @entries
            (Int8, size_bytes = 1, is_signed = true, is_float = false),
            (Int16, size_bytes = 2, is_signed = true, is_float = false),
            (Int32, size_bytes = 4, is_signed = true, is_float = false),
            (Int64, size_bytes = 8, is_signed = true, is_float = false),
            (Uint8, size_bytes = 1, is_signed = false, is_float = false),
            (Uint16, size_bytes = 2, is_signed = false, is_float = false),
            (Uint32, size_bytes = 4, is_signed = false, is_float = false),
            (Uint64, size_bytes = 8, is_signed = false, is_float = false),
            (Float32, size_bytes = 4, is_signed = true, is_float = true),
            (Float64, size_bytes = 8, is_signed = true, is_float = true),
        }
    };
}

#[macro_export]
macro_rules! dimension_kind_registry {
    ($macro:ident) => {
        $crate::dimension_kind_registry_entries!($macro)
    };
    ($macro:ident, $($args:tt)+) => {
        $crate::dimension_kind_registry_entries!($macro, @args $($args)+)
    };
}

macro_rules! metadata_from_registry {
    ( @args $kind:expr; @entries $( ($dim:ident, size_bytes = $size:expr, is_signed = $signed:expr, is_float = $float:expr) ),* $(,)? ) => {
        match $kind {
            $(
                $crate::DimensionKind::$dim => $crate::DimensionMetadata {
                    size_bytes: $size,
                    is_signed: $signed,
                    is_float: $float,
                },
            )*
        }
    };
}

macro_rules! all_kinds_from_registry {
    ( @entries $( ($dim:ident, size_bytes = $size:expr, is_signed = $signed:expr, is_float = $float:expr) ),* $(,)? ) => {
        [ $( $crate::DimensionKind::$dim ),* ]
    };
}

macro_rules! label_from_registry {
    ( @args $kind:expr; @entries $( ($dim:ident, size_bytes = $size:expr, is_signed = $signed:expr, is_float = $float:expr) ),* $(,)? ) => {
        match $kind {
            $(
                $crate::DimensionKind::$dim => stringify!($dim),
            )*
        }
    };
}
