//! The three D-Bus primitives the client is built on.

use std::{collections::HashMap, future::Future, time::Duration};

use async_trait::async_trait;
use tracing::{debug, instrument};
use zbus::{
    Connection,
    message::Message,
    zvariant::{OwnedObjectPath, OwnedValue, Signature, StructureBuilder},
};

use super::{
    ModemError,
    paths::SERVICE,
    value::{PropertyMap, WireValue, convert_map},
};

const PROPERTIES_INTERFACE: &str = "org.freedesktop.DBus.Properties";

/// Remote object access used by [`Client`](super::Client).
///
/// Errors should keep the D-Bus error name available through
/// [`ModemError::remote_name`] so callers can classify them.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Reads one property of `interface` on the object at `path`.
    async fn get_property(
        &self,
        path: &OwnedObjectPath,
        interface: &str,
        property: &str,
    ) -> Result<WireValue, ModemError>;

    /// Reads every property of `interface` on the object at `path`.
    async fn get_all_properties(
        &self,
        path: &OwnedObjectPath,
        interface: &str,
    ) -> Result<PropertyMap, ModemError>;

    /// Calls `method`, given as `interface.Member`, with positional `args`.
    ///
    /// Returns `None` for methods that reply without a value.
    async fn call_method(
        &self,
        path: &OwnedObjectPath,
        method: &str,
        args: &[WireValue],
    ) -> Result<Option<WireValue>, ModemError>;
}

/// [`Transport`] over a zbus connection to the daemon.
#[derive(Debug, Clone)]
pub struct DbusTransport {
    connection: Connection,
    timeout: Duration,
}

impl DbusTransport {
    /// Connects to the system bus.
    ///
    /// # Errors
    ///
    /// Returns `ModemError::DbusError` if the bus cannot be reached.
    pub async fn system(timeout: Duration) -> Result<Self, ModemError> {
        let connection = Connection::system().await?;
        Ok(Self::new(connection, timeout))
    }

    /// Wraps an existing connection. Each call fails after `timeout`.
    pub fn new(connection: Connection, timeout: Duration) -> Self {
        Self {
            connection,
            timeout,
        }
    }

    async fn call<B>(
        &self,
        path: &OwnedObjectPath,
        interface: &str,
        member: &str,
        body: &B,
    ) -> Result<Message, ModemError>
    where
        B: serde::Serialize + zbus::zvariant::DynamicType + Sync,
    {
        let reply = self.connection.call_method(
            Some(SERVICE),
            path,
            Some(interface),
            member,
            body,
        );

        self.deadline(reply).await?.map_err(remote_error)
    }

    async fn deadline<T>(&self, call: impl Future<Output = T>) -> Result<T, ModemError> {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| ModemError::Timeout(self.timeout))
    }
}

#[async_trait]
impl Transport for DbusTransport {
    #[instrument(skip(self, path), fields(path = %path))]
    async fn get_property(
        &self,
        path: &OwnedObjectPath,
        interface: &str,
        property: &str,
    ) -> Result<WireValue, ModemError> {
        let fetch = async {
            let reply = self
                .call(path, PROPERTIES_INTERFACE, "Get", &(interface, property))
                .await?;
            let value: OwnedValue = reply.body().deserialize()?;
            WireValue::try_from(&value)
        };

        fetch.await.map_err(|err| ModemError::GetProperty {
            interface: interface.to_owned(),
            property: property.to_owned(),
            source: Box::new(err),
        })
    }

    #[instrument(skip(self, path), fields(path = %path))]
    async fn get_all_properties(
        &self,
        path: &OwnedObjectPath,
        interface: &str,
    ) -> Result<PropertyMap, ModemError> {
        let fetch = async {
            let reply = self
                .call(path, PROPERTIES_INTERFACE, "GetAll", &(interface,))
                .await?;
            let properties: HashMap<String, OwnedValue> = reply.body().deserialize()?;
            debug!(count = properties.len(), "fetched properties");
            convert_map(&properties)
        };

        fetch.await.map_err(|err| ModemError::GetAllProperties {
            interface: interface.to_owned(),
            source: Box::new(err),
        })
    }

    #[instrument(skip(self, path, args), fields(path = %path, args = args.len()))]
    async fn call_method(
        &self,
        path: &OwnedObjectPath,
        method: &str,
        args: &[WireValue],
    ) -> Result<Option<WireValue>, ModemError> {
        let invoke = async {
            let (interface, member) = method
                .rsplit_once('.')
                .ok_or_else(|| zbus::Error::Failure(format!("bad method name {method:?}")))?;

            let reply = if args.is_empty() {
                self.call(path, interface, member, &()).await?
            } else {
                let body = args
                    .iter()
                    .try_fold(StructureBuilder::new(), |builder, arg| {
                        Ok::<_, ModemError>(builder.append_field(arg.to_value()?))
                    })?
                    .build()?;
                self.call(path, interface, member, &body).await?
            };

            decode_reply(&reply)
        };

        invoke.await.map_err(|err| ModemError::CallFailed {
            method: method.to_owned(),
            source: Box::new(err),
        })
    }
}

/// Turns a method reply body into zero, one or several values.
fn decode_reply(reply: &Message) -> Result<Option<WireValue>, ModemError> {
    let body = reply.body();
    if matches!(body.signature(), Signature::Unit) {
        return Ok(None);
    }

    let fields: zbus::zvariant::Structure<'_> = body.deserialize()?;
    let value = match fields.fields() {
        [] => None,
        [single] => Some(WireValue::try_from(single)?),
        many => Some(WireValue::Struct(
            many.iter()
                .map(WireValue::try_from)
                .collect::<Result<_, _>>()?,
        )),
    };

    Ok(value)
}

/// Keeps D-Bus error replies as named errors so they can be classified.
fn remote_error(err: zbus::Error) -> ModemError {
    match err {
        zbus::Error::MethodError(name, message, _) => ModemError::Remote {
            name: name.to_string(),
            message: message.unwrap_or_default(),
        },
        other => ModemError::DbusError(other),
    }
}
