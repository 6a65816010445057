// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema registry.
//!
//! [`RfcMapper`] associates application record types with the ordered list
//! of remote fields they map to. Each record type is registered once through
//! [`RfcMapper::register`]; the encoder and decoder then look the schema up
//! by type identity.
//!
//! # Layering
//!
//! A process normally builds one [`SharedMapper`] at startup. A single call
//! may bring its own [`RfcMapper`] which takes precedence, record type by
//! record type, over the shared one (see [`FunctionCall`](crate::FunctionCall)).

mod access;
mod builder;
mod descriptor;
mod value;
mod wire_type;

pub(crate) use access::{Decoded, Slot};
pub use builder::{PropertyBuilder, Selector, TypeBuilder};
pub use descriptor::{Alignment, FieldDescriptor, DEFAULT_PADDING};
pub use value::{FieldValue, RecordType, Scalar, ScalarKind, ScalarValue, ValueKind};
pub use wire_type::WireType;

use crate::config::{FieldOverride, MarshalConfig};
use crate::error::{MarshalError, Result};
use access::Access;
use parking_lot::{RwLock, RwLockReadGuard};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

/// Types that can be registered as records.
///
/// Decoding starts from `T::default()`, so fields the container leaves
/// absent keep their default value.
pub trait Record: Default + 'static {}

impl<T: Default + 'static> Record for T {}

// ----------------------------------------------------------------------------
// Schema
// ----------------------------------------------------------------------------

pub(crate) struct Member {
    pub(crate) descriptor: FieldDescriptor,
    pub(crate) access: Box<dyn Access>,
}

impl Member {
    pub(crate) fn kind(&self) -> ValueKind {
        self.access.kind()
    }

    /// Assigned wire type, if it suits the field's value kind.
    pub(crate) fn wire_type(&self) -> Result<WireType> {
        match self.descriptor.wire_type() {
            Some(wire_type) if self.kind().accepts(wire_type) => Ok(wire_type),
            other => Err(MarshalError::UnsupportedWireType {
                field: (&self.descriptor).into(),
                wire_type: other,
            }),
        }
    }

    /// Length of a fixed-width field; zero is a configuration error.
    pub(crate) fn fixed_length(&self) -> Result<usize> {
        match self.descriptor.length() {
            0 => Err(MarshalError::MissingLength {
                field: (&self.descriptor).into(),
            }),
            length => Ok(length),
        }
    }

    /// Record type behind a `structure` or `table` field.
    pub(crate) fn nested(&self) -> Result<RecordType> {
        match self.kind() {
            ValueKind::Record(record) | ValueKind::Rows(record) => Ok(record),
            ValueKind::Scalar(_) => Err(MarshalError::UnsupportedWireType {
                field: (&self.descriptor).into(),
                wire_type: self.descriptor.wire_type(),
            }),
        }
    }
}

/// Registered fields of one record type.
pub(crate) struct RecordSchema {
    record: RecordType,
    create: fn() -> Box<dyn Any>,
    members: Vec<Member>,
}

fn create_default<T: Record>() -> Box<dyn Any> {
    Box::new(T::default())
}

impl RecordSchema {
    fn new<T: Record>() -> Self {
        Self {
            record: RecordType::of::<T>(),
            create: create_default::<T>,
            members: Vec::new(),
        }
    }

    pub(crate) fn record(&self) -> RecordType {
        self.record
    }

    /// Fresh default-initialized instance of the record type.
    pub(crate) fn instantiate(&self) -> Box<dyn Any> {
        (self.create)()
    }

    pub(crate) fn members(&self) -> &[Member] {
        &self.members
    }

    pub(crate) fn members_mut(&mut self) -> &mut Vec<Member> {
        &mut self.members
    }
}

// ----------------------------------------------------------------------------
// Registry
// ----------------------------------------------------------------------------

/// Schema registry.
#[derive(Default)]
pub struct RfcMapper {
    schemas: HashMap<TypeId, RecordSchema>,
    config: MarshalConfig,
}

impl RfcMapper {
    /// Empty registry with default probe sizes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry using the probe sizes of `config`. Field overrides of the
    /// config are not applied; call [`apply_config`](Self::apply_config)
    /// once the types are registered.
    pub fn with_config(config: MarshalConfig) -> Self {
        Self {
            schemas: HashMap::new(),
            config,
        }
    }

    /// Start or continue registering record type `T`.
    pub fn register<T: Record>(&mut self) -> TypeBuilder<'_, T> {
        let schema = self
            .schemas
            .entry(TypeId::of::<T>())
            .or_insert_with(RecordSchema::new::<T>);
        TypeBuilder::new(schema)
    }

    /// True if `T` has been registered.
    pub fn contains<T: 'static>(&self) -> bool {
        self.schemas.contains_key(&TypeId::of::<T>())
    }

    /// Descriptors of `T` in registration order.
    pub fn descriptors<T: 'static>(&self) -> Result<Vec<&FieldDescriptor>> {
        let schema = self
            .schema(TypeId::of::<T>())
            .ok_or_else(|| MarshalError::schema_not_found(std::any::type_name::<T>()))?;
        Ok(schema.members.iter().map(|m| &m.descriptor).collect())
    }

    /// Number of registered record types.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// True if no record type is registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Probe sizes and the overrides applied so far.
    pub fn config(&self) -> &MarshalConfig {
        &self.config
    }

    /// Adopt the probe sizes of `config` and apply its field overrides to
    /// the registered types.
    ///
    /// Records are matched by full type path or, when unique, by short type
    /// name; fields by Rust field name. The first unknown record or field
    /// aborts with `SchemaNotFound` or `InvalidFieldSelector`, as does a
    /// short name shared by several registered types. Overrides before it
    /// stay applied.
    pub fn apply_config(&mut self, config: &MarshalConfig) -> Result<()> {
        self.config.string_probe_len = config.string_probe_len;
        self.config.xstring_probe_len = config.xstring_probe_len;

        for ov in &config.overrides {
            let id = self.override_target(ov)?;
            let schema = self
                .schemas
                .get_mut(&id)
                .ok_or_else(|| MarshalError::schema_not_found(ov.record.as_str()))?;

            let type_name = schema.record.name();
            let member = schema
                .members
                .iter_mut()
                .find(|m| m.descriptor.property() == ov.property)
                .ok_or_else(|| MarshalError::InvalidFieldSelector {
                    type_name: type_name.to_string(),
                    selector: ov.property.clone(),
                    reason: "field is not mapped".into(),
                })?;

            let d = &mut member.descriptor;
            if let Some(name) = &ov.wire_name {
                d.set_wire_name(name.clone());
            }
            if let Some(wire_type) = ov.wire_type {
                d.set_wire_type(wire_type);
            }
            if let Some(length) = ov.length {
                d.set_length(length);
            }
            if ov.alignment.is_some() || ov.padding.is_some() {
                let alignment = ov.alignment.unwrap_or(d.alignment());
                let padding = ov.padding.unwrap_or(d.padding());
                d.set_alignment(alignment, padding);
            }
            log::debug!(
                "[RfcMapper::apply_config] {}.{} -> {}",
                ov.record,
                ov.property,
                d.wire_name()
            );
        }

        self.config.overrides.extend(config.overrides.iter().cloned());
        Ok(())
    }

    fn override_target(&self, ov: &FieldOverride) -> Result<TypeId> {
        if let Some(schema) = self.schemas.values().find(|s| s.record.name() == ov.record) {
            return Ok(schema.record.id());
        }
        let mut candidates = self
            .schemas
            .values()
            .filter(|s| s.record.short_name() == ov.record);
        match (candidates.next(), candidates.next()) {
            (Some(schema), None) => Ok(schema.record.id()),
            (None, _) => Err(MarshalError::schema_not_found(ov.record.as_str())),
            (Some(_), Some(_)) => Err(MarshalError::InvalidFieldSelector {
                type_name: ov.record.clone(),
                selector: ov.property.clone(),
                reason: "record name matches several registered types, use the full type path"
                    .into(),
            }),
        }
    }

    pub(crate) fn schema(&self, id: TypeId) -> Option<&RecordSchema> {
        self.schemas.get(&id)
    }
}

impl std::fmt::Debug for RfcMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut types: Vec<_> = self.schemas.values().map(|s| s.record.name()).collect();
        types.sort_unstable();
        f.debug_struct("RfcMapper")
            .field("types", &types)
            .field("config", &self.config)
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Shared registry
// ----------------------------------------------------------------------------

/// Process-wide registry shared between threads.
///
/// Cloning yields another handle to the same registry.
#[derive(Clone, Default)]
pub struct SharedMapper {
    inner: Arc<RwLock<RfcMapper>>,
}

impl SharedMapper {
    /// Share `mapper` between threads.
    pub fn new(mapper: RfcMapper) -> Self {
        Self {
            inner: Arc::new(RwLock::new(mapper)),
        }
    }

    /// Read access for encoding and decoding.
    pub fn read(&self) -> RwLockReadGuard<'_, RfcMapper> {
        self.inner.read()
    }

    /// Exclusive access for registration.
    pub fn configure<R>(&self, f: impl FnOnce(&mut RfcMapper) -> R) -> R {
        let mut mapper = self.inner.write();
        f(&mut mapper)
    }
}

impl From<RfcMapper> for SharedMapper {
    fn from(mapper: RfcMapper) -> Self {
        Self::new(mapper)
    }
}

impl std::fmt::Debug for SharedMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SharedMapper").field(&*self.inner.read()).finish()
    }
}

// ----------------------------------------------------------------------------
// Layered lookup
// ----------------------------------------------------------------------------

/// Call-scoped registry over the shared one; lookups try `local` first.
#[derive(Clone, Copy)]
pub(crate) struct Layers<'a> {
    local: Option<&'a RfcMapper>,
    shared: &'a RfcMapper,
}

impl<'a> Layers<'a> {
    pub(crate) fn new(shared: &'a RfcMapper, local: Option<&'a RfcMapper>) -> Self {
        Self { local, shared }
    }

    pub(crate) fn schema(&self, record: RecordType) -> Result<&'a RecordSchema> {
        self.local
            .and_then(|m| m.schema(record.id()))
            .or_else(|| self.shared.schema(record.id()))
            .ok_or_else(|| MarshalError::schema_not_found(record.name()))
    }

    /// Probe sizes come from the call-scoped registry when there is one.
    pub(crate) fn config(&self) -> &'a MarshalConfig {
        self.local.unwrap_or(self.shared).config()
    }
}
