//! Field Mapping
//!
//! Conversion between entity, DTO and form shapes. [`map_fields!`] generates a
//! [`MapTo`] impl that copies the listed fields by name; the compiler checks
//! that each listed field exists on both sides with the same type. Target
//! fields that are not listed keep their `Default` value.
//!
//! ```rust,ignore
//! map_fields!(Client => ClientDto { id, client_name, email });
//! let dto: ClientDto = client.map_to();
//! ```

/// Conversion of `&self` into another shape.
pub trait MapTo<T> {
    fn map_to(&self) -> T;
}

/// Implement [`MapTo`] by copying same-named fields.
#[macro_export]
macro_rules! map_fields {
    ($src:ty => $dst:ty { $($field:ident),* $(,)? }) => {
        impl $crate::shared::mapping::MapTo<$dst> for $src {
            #[allow(clippy::field_reassign_with_default)]
            fn map_to(&self) -> $dst {
                let mut target = <$dst as ::std::default::Default>::default();
                $( target.$field = ::std::clone::Clone::clone(&self.$field); )*
                target
            }
        }
    };
}
