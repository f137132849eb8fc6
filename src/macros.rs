// ABOUTME: This module provides macros backing the static command table
// ABOUTME: Includes the descriptor-table generator and param-bag setter generator

/// Macro generating the command id enum and its descriptor table.
///
/// Each entry declares one protocol command: its enum variant, wire code,
/// human-readable name, kind (query or action), addressing mode, the ordered
/// parameter keys that follow the fixed `V`,`C` prefix, and the reply shape.
/// The `V` and `C` keys are prepended by the macro itself, so no entry can
/// violate the version-first, command-second frame invariant.
///
/// # Arguments
/// * `$name` - The CommandId variant (e.g., RecallSceneGroup)
/// * `$code` - The numeric wire code (e.g., 11)
/// * `$label` - The operation name used in logs and errors
/// * `$kind` - CommandKind variant: Query or Action
/// * `$addressing` - Addressing variant: Router, Cluster, Group, or Device
/// * `[$($param),*]` - Ordered ParamKey variants after Version and Command
/// * `$reply` - ReplyShape variant: None, Scalar, Boolean, or List
///
/// # Generated code
/// - `CommandId` enum with `TryFromPrimitive` over the u16 wire codes
/// - `CommandId::ALL` listing every variant in table order
/// - `CommandId::descriptor()` returning the `&'static CommandDescriptor`
macro_rules! command_table {
    (
        $(
            $(#[$meta:meta])*
            $name:ident = $code:literal, $label:literal, $kind:ident, $addressing:ident,
                [$($param:ident),* $(,)?], $reply:ident;
        )+
    ) => {
        /// Numeric command codes understood by the router, one variant per
        /// table entry. Converts from raw wire codes via `TryFrom<u16>`.
        #[derive(num_enum::TryFromPrimitive)]
        #[repr(u16)]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum CommandId {
            $(
                $(#[$meta])*
                $name = $code,
            )+
        }

        impl CommandId {
            /// Every command in table order.
            pub const ALL: &'static [CommandId] = &[
                $(CommandId::$name,)+
            ];

            /// The numeric code sent in the `C` parameter.
            pub const fn code(self) -> u16 {
                self as u16
            }

            /// The static descriptor for this command.
            pub fn descriptor(self) -> &'static CommandDescriptor {
                match self {
                    $(
                        CommandId::$name => {
                            const DESCRIPTOR: &CommandDescriptor = &CommandDescriptor {
                                id: CommandId::$name,
                                name: $label,
                                kind: CommandKind::$kind,
                                addressing: Addressing::$addressing,
                                params: &[
                                    $crate::datatypes::ParamKey::Version,
                                    $crate::datatypes::ParamKey::Command,
                                    $($crate::datatypes::ParamKey::$param,)*
                                ],
                                reply: $crate::codec::ReplyShape::$reply,
                            };
                            DESCRIPTOR
                        }
                    )+
                }
            }
        }
    };
}

/// Macro for generating parameter-bag setter methods
///
/// Each generated method takes a bare value, stores it as `Some(value)`,
/// and returns self for chaining.
///
/// # Arguments
/// * `$($field:ident: $type:ty),*` - Field name and type pairs
///
/// # Generated code
/// For each field, generates:
/// ```ignore
/// pub(crate) fn $field(mut self, $field: $type) -> Self {
///     self.$field = Some($field);
///     self
/// }
/// ```
macro_rules! param_setters {
    ($($field:ident: $type:ty),* $(,)?) => {
        $(
            pub(crate) fn $field(mut self, $field: $type) -> Self {
                self.$field = Some($field);
                self
            }
        )*
    };
}

// Make macros available to the rest of the crate
pub(crate) use {command_table, param_setters};
