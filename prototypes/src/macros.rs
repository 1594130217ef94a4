#[macro_export]
macro_rules! prototype_id {
    ($id:ident => $proto:ty) => {
        #[derive(
            Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
        )]
        pub struct $id(pub(crate) u64);

        impl core::fmt::Debug for $id {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> std::fmt::Result {
                if let Some(v) = $crate::try_prototype(*self) {
                    return write!(f, "{}({:?})", stringify!($id), $crate::Prototype::name(v));
                }
                write!(f, "{}({})", stringify!($id), self.0)
            }
        }

        impl $id {
            #[inline]
            pub fn new(v: &str) -> $id {
                Self(common::hash_u64(v))
            }

            #[inline]
            pub fn prototype(self) -> &'static $proto {
                $crate::prototype(self)
            }

            #[inline]
            pub fn hash(&self) -> u64 {
                self.0
            }
        }

        impl<'a> From<&'a str> for $id {
            fn from(v: &'a str) -> Self {
                Self(common::hash_u64(v))
            }
        }

        impl<'a> From<&'a String> for $id {
            fn from(v: &'a String) -> Self {
                Self(common::hash_u64(&*v))
            }
        }

        impl $crate::PrototypeID for $id {
            type Prototype = $proto;
        }
    };
}
