/// Defines a model along with its ID newtype.
///
/// Models get read-only getters and serialize into their storage shape. There
/// are deliberately no setters: a model is constructed (or reconstructed)
/// whole, and replaced rather than edited.
#[macro_export]
macro_rules! studio_model {
    (
        $(#[$struct_meta:meta])*
        pub struct $name:ident {
            id: <<$id:ident>>,
            $($fields:tt)*
        }
    ) => {
        /// The identifier for this model.
        #[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $id(String);

        impl $id {
            pub fn new<T: Into<String>>(id: T) -> Self {
                Self(id.into())
            }

            /// Generate a fresh, random ID
            pub fn create() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            /// Return a string ref for this ID
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl std::convert::From<$id> for String {
            fn from(id: $id) -> Self {
                let $id(val) = id;
                val
            }
        }

        impl std::convert::From<String> for $id {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl std::convert::From<&str> for $id {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl std::fmt::Display for $id {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        $(#[$struct_meta])*
        #[derive(Clone, Debug, PartialEq, getset::Getters, serde::Serialize)]
        #[getset(get = "pub")]
        pub struct $name {
            id: $id,
            $($fields)*
        }
    }
}
