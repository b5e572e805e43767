//! The framework message classes carried by the RPC envelope.
//!
//! Each message keeps its members in a [`PropertyMap`] with every known
//! member present from allocation, so a decoded message always serializes the
//! full member list. They are registered in every [`ClassRegistry::new`] and
//! mapped in every [`MappingSet::new`](crate::mapping::MappingSet::new).
//!
//! Member names are the wire names. Inbound case translation never applies to
//! these classes.

use crate::class::{Class, ClassRegistry, ClassTraitMessage, Model};
use crate::value::{PropertyMap, Value};

// -----------------------------------------------------------------------------
// Member lists

const ABSTRACT: &[&str] = &[
    "body",
    "clientId",
    "destination",
    "headers",
    "messageId",
    "timestamp",
    "timeToLive",
];

const REMOTING: &[&str] = &[
    "body",
    "clientId",
    "destination",
    "headers",
    "messageId",
    "timestamp",
    "timeToLive",
    "operation",
    "source",
];

const ASYNC: &[&str] = &[
    "body",
    "clientId",
    "destination",
    "headers",
    "messageId",
    "timestamp",
    "timeToLive",
    "correlationId",
];

const COMMAND: &[&str] = &[
    "body",
    "clientId",
    "destination",
    "headers",
    "messageId",
    "timestamp",
    "timeToLive",
    "correlationId",
    "operation",
];

const ERROR: &[&str] = &[
    "body",
    "clientId",
    "destination",
    "headers",
    "messageId",
    "timestamp",
    "timeToLive",
    "correlationId",
    "extendedData",
    "faultCode",
    "faultDetail",
    "faultString",
    "rootCause",
];

// -----------------------------------------------------------------------------
// Message classes

macro_rules! define_messages {
    ($($(#[$attr:meta])* $name:ident => $wire:literal, $members:ident;)*) => {
        $(
            $(#[$attr])*
            #[derive(Clone, Debug, PartialEq)]
            pub struct $name {
                members: PropertyMap,
            }

            impl $name {
                /// The member names, in wire order.
                pub const MEMBERS: &'static [&'static str] = $members;

                /// Returns the member `name`.
                #[inline]
                pub fn get(&self, name: &str) -> Option<&Value> {
                    self.members.get_str(name)
                }

                /// Sets a known member, returning the value back for unknown names.
                pub fn set_member(&mut self, name: &str, value: Value) -> Result<(), Value> {
                    match Self::MEMBERS.iter().find(|member| **member == name) {
                        Some(member) => {
                            self.members.insert(*member, value);
                            Ok(())
                        }
                        None => Err(value),
                    }
                }

                #[inline]
                pub fn members(&self) -> &PropertyMap {
                    &self.members
                }
            }

            impl Default for $name {
                fn default() -> Self {
                    Self {
                        members: Self::MEMBERS.iter().map(|member| (*member, Value::Null)).collect(),
                    }
                }
            }

            impl Model for $name {
                fn type_path(&self) -> &'static str {
                    Self::TYPE_PATH
                }

                fn attributes(&self) -> Option<PropertyMap> {
                    Some(self.members.clone())
                }

                fn assign_attributes(&mut self, attrs: PropertyMap) -> Result<(), PropertyMap> {
                    for (key, value) in attrs {
                        // Populate only hands over names found in `attributes`.
                        let _ = self.set_member(key.as_str(), value);
                    }
                    Ok(())
                }

                fn readers(&self) -> &'static [&'static str] {
                    Self::MEMBERS
                }

                fn call(&self, name: &str) -> Option<Value> {
                    self.get(name).cloned()
                }

                fn set(&mut self, name: &str, value: Value) -> Result<(), Value> {
                    self.set_member(name, value)
                }
            }

            impl Class for $name {
                const TYPE_PATH: &'static str = concat!("amf_mapping::messages::", stringify!($name));

                fn allocate() -> Self {
                    Self::default()
                }
            }
        )*

        /// `(native, wire)` for every message class.
        pub(crate) const DEFAULT_MAPPINGS: &[(&str, &str)] = &[
            $( (<$name as Class>::TYPE_PATH, $wire), )*
        ];

        pub(crate) fn register_messages(registry: &mut ClassRegistry) {
            $( registry.register_trait::<$name, ClassTraitMessage>(); )*
        }
    };
}

define_messages! {
    /// Base members shared by every message.
    AbstractMessage => "flex.messaging.messages.AbstractMessage", ABSTRACT;
    /// A remote procedure call.
    RemotingMessage => "flex.messaging.messages.RemotingMessage", REMOTING;
    /// A publish/subscribe message.
    AsyncMessage => "flex.messaging.messages.AsyncMessage", ASYNC;
    /// The compact (externalized) form of [`AsyncMessage`].
    AsyncMessageExt => "DSA", ASYNC;
    /// A control message such as ping or login.
    CommandMessage => "flex.messaging.messages.CommandMessage", COMMAND;
    /// The compact (externalized) form of [`CommandMessage`].
    CommandMessageExt => "DSC", COMMAND;
    /// A reply to a successful request.
    AcknowledgeMessage => "flex.messaging.messages.AcknowledgeMessage", ASYNC;
    /// The compact (externalized) form of [`AcknowledgeMessage`].
    AcknowledgeMessageExt => "DSK", ASYNC;
    /// A reply to a failed request.
    ErrorMessage => "flex.messaging.messages.ErrorMessage", ERROR;
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{DEFAULT_MAPPINGS, ErrorMessage, RemotingMessage};
    use crate::class::{Class, Model};
    use crate::value::Value;

    #[test]
    fn allocate_fills_members() {
        let message = RemotingMessage::allocate();
        assert_eq!(message.members().len(), RemotingMessage::MEMBERS.len());
        assert_eq!(message.call("operation"), Some(Value::Null));
        assert_eq!(message.call("faultCode"), None);
    }

    #[test]
    fn unknown_members_are_rejected() {
        let mut message = ErrorMessage::allocate();
        assert!(message.set("faultString", "boom".into()).is_ok());
        assert_eq!(message.get("faultString"), Some(&Value::from("boom")));
        assert_eq!(message.set("nope", Value::Null), Err(Value::Null));
    }

    #[test]
    fn default_mapping_paths() {
        assert_eq!(DEFAULT_MAPPINGS.len(), 9);
        assert!(DEFAULT_MAPPINGS.contains(&("amf_mapping::messages::CommandMessageExt", "DSC")));
        assert_eq!(RemotingMessage::TYPE_PATH, "amf_mapping::messages::RemotingMessage");
    }
}
