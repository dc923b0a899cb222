//! Declarative helpers shared by the entity modules

/// Defines a field-less enum stored as one byte, with name lookup both ways.
macro_rules! named_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:expr),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $value),+
        }

        impl $name {
            /// Every variant in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Byte tag used by the binary codec
            pub const fn as_u8(self) -> u8 {
                self as u8
            }

            /// Inverse of [`Self::as_u8`]
            pub fn from_u8(value: u8) -> Option<Self> {
                match value {
                    $(v if v == $value => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// Variant name as written in source
            pub const fn name(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }

            /// Look a variant up by its name
            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.name() == name)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

/// Implements [`SceneEntity`] for a struct with `id` and `name` fields.
macro_rules! impl_scene_entity {
    ($entity:ty, $id:ty, $kind:ident) => {
        impl $crate::scene::entities::SceneEntity for $entity {
            type Id = $id;
            const KIND: $crate::scene::entities::EntityKind =
                $crate::scene::entities::EntityKind::$kind;

            fn id(&self) -> $id {
                self.id
            }

            fn set_id(&mut self, id: $id) {
                self.id = id;
            }

            fn name(&self) -> &str {
                &self.name
            }
        }
    };
}
