//! Macro for defining back-office resources
//!
//! Every manageable resource shares the same skeleton (id, name, optional
//! display order, timestamps). `impl_resource!` generates the struct, the
//! [`Resource`](crate::core::resource::Resource) implementation and a `new`
//! constructor; the payload type and the `Editable`/`Queryable`
//! implementations stay hand-written per resource because that is where the
//! resource-specific rules live.

/// Define a resource entity with the shared back-office shape
///
/// # Example
///
/// ```rust,ignore
/// impl_resource!(
///     /// A bookable city destination.
///     Destination, "destination",
///     {
///         description: Option<String>,
///     }
/// );
/// ```
#[macro_export]
macro_rules! impl_resource {
    (
        $(#[$meta:meta])*
        $type:ident, $singular:expr,
        {
            $( $(#[$fmeta:meta])* $field:ident : $fty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $type {
            /// Opaque unique identifier, immutable once created
            pub id: ::uuid::Uuid,

            /// Display name
            pub name: String,

            /// Display-order field; lower values sort first, missing sorts
            /// as the default sentinel
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub order: Option<i64>,

            /// When this resource was created (display-only for clients)
            pub created_at: ::chrono::DateTime<::chrono::Utc>,

            /// When this resource was last updated (display-only for clients)
            pub updated_at: ::chrono::DateTime<::chrono::Utc>,

            $( $(#[$fmeta])* pub $field : $fty ),*
        }

        impl $crate::core::resource::Resource for $type {
            fn resource_name() -> &'static str {
                use std::sync::OnceLock;
                static PLURAL: OnceLock<String> = OnceLock::new();
                PLURAL
                    .get_or_init(|| $crate::core::pluralize::Pluralizer::pluralize($singular))
                    .as_str()
            }

            fn resource_name_singular() -> &'static str {
                $singular
            }

            fn id(&self) -> ::uuid::Uuid {
                self.id
            }

            fn name(&self) -> &str {
                &self.name
            }

            fn order(&self) -> Option<i64> {
                self.order
            }

            fn set_order(&mut self, order: Option<i64>) {
                self.order = order;
            }

            fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.created_at
            }

            fn updated_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.updated_at
            }

            fn touch(&mut self) {
                self.updated_at = ::chrono::Utc::now();
            }
        }

        impl $type {
            /// Create a new instance with a fresh id and timestamps
            pub fn new(
                name: String,
                order: Option<i64>,
                $( $field: $fty ),*
            ) -> Self {
                let now = ::chrono::Utc::now();
                Self {
                    id: ::uuid::Uuid::new_v4(),
                    name,
                    order,
                    created_at: now,
                    updated_at: now,
                    $( $field ),*
                }
            }
        }
    };
}
