// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Converter cache.
//!
//! A [`ConverterRegistry`] stores compiled converters keyed by
//! `(Direction, TypeId)` in a sharded [`DashMap`]. Lookups take a shard read
//! lock only long enough to clone the `Arc`. Builds run with no lock held:
//! inbound builds call into a caller-supplied row accessor and may be slow.
//!
//! # Publication
//!
//! Two threads that miss on the same key both build. The first to reach
//! [`DashMap::entry`] publishes; the other drops its own converter and returns
//! the published one. Every caller therefore observes the same `Arc`, and a
//! converter is visible only once fully built. A failed build publishes
//! nothing, so the next request tries again.
//!
//! # Global Instance
//!
//! [`ConverterRegistry::global`] is created empty on first use with the
//! default [`MapperConfig`] and lives for the rest of the process. Tests and
//! applications with other dialects create their own registries.

use std::{
    any::{Any, TypeId},
    fmt,
    sync::{Arc, LazyLock}
};

use dashmap::DashMap;
use tracing::debug;

use crate::{
    config::MapperConfig,
    error::{Error, Result},
    inbound::{InboundConverter, compile_inbound},
    mapping::Entity,
    outbound::{OutboundConverter, ParameterRecord, compile_outbound},
    row::RowAccessor
};

/// Conversion direction of a cached converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Entity to parameters.
    Outbound,
    /// Row to entity.
    Inbound
}

type Published = Arc<dyn Any + Send + Sync>;

static GLOBAL: LazyLock<ConverterRegistry> = LazyLock::new(ConverterRegistry::new);

/// Type-keyed store of compiled converters.
pub struct ConverterRegistry {
    config:  MapperConfig,
    entries: DashMap<(Direction, TypeId), Published>
}

impl ConverterRegistry {
    /// Empty registry with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MapperConfig::default())
    }

    /// Empty registry with a configuration.
    #[must_use]
    pub fn with_config(config: MapperConfig) -> Self {
        Self {
            config,
            entries: DashMap::new()
        }
    }

    /// Process-wide registry.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Outbound converter for `T`, built on first request.
    ///
    /// # Errors
    ///
    /// Mapping configuration errors from the build.
    pub fn outbound<T: Entity>(&self) -> Result<Arc<OutboundConverter<T>>> {
        let dialect = self.config.dialect;
        self.get_or_build::<T, _, _>(Direction::Outbound, || compile_outbound::<T>(dialect))
    }

    /// Inbound converter for `T`, built against `sample` on first request.
    ///
    /// Once published, `sample` is ignored: column presence is fixed by the
    /// row that triggered the build.
    ///
    /// # Errors
    ///
    /// Mapping configuration errors and probing errors from the build.
    pub fn inbound<T: Entity + Default>(
        &self,
        sample: &dyn RowAccessor
    ) -> Result<Arc<InboundConverter<T>>> {
        self.get_or_build::<T, _, _>(Direction::Inbound, || compile_inbound::<T>(sample))
    }

    /// Published inbound converter for `T`, without building.
    #[must_use]
    pub fn cached_inbound<T: Entity>(&self) -> Option<Arc<InboundConverter<T>>> {
        self.lookup::<T>(Direction::Inbound)
            .and_then(|entry| entry.downcast().ok())
    }

    /// Convert an instance to parameters.
    ///
    /// # Errors
    ///
    /// See [`outbound`](Self::outbound).
    pub fn to_parameters<T: Entity>(&self, entity: &T) -> Result<ParameterRecord> {
        Ok(self.outbound::<T>()?.convert(entity))
    }

    /// Convert rows to instances.
    ///
    /// The first row serves as the sample when no converter is cached yet.
    /// No rows, no build.
    ///
    /// # Errors
    ///
    /// Build errors and per-row conversion errors.
    pub fn to_entities<T, R>(&self, rows: &[R]) -> Result<Vec<T>>
    where
        T: Entity + Default,
        R: RowAccessor
    {
        let Some(first) = rows.first() else {
            return Ok(Vec::new());
        };
        self.inbound::<T>(first)?.convert_all(rows)
    }

    /// Check if a converter is published for `T` in `direction`.
    #[must_use]
    pub fn contains<T: 'static>(&self, direction: Direction) -> bool {
        self.entries.contains_key(&(direction, TypeId::of::<T>()))
    }

    /// Number of published converters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is published.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the published converter for `(direction, T)` or build one.
    ///
    /// `build` runs with no lock held and may run on several threads at once
    /// for the same key; exactly one result is kept.
    ///
    /// # Errors
    ///
    /// Whatever `build` returns. Nothing is cached in that case.
    pub fn get_or_build<T, C, F>(&self, direction: Direction, build: F) -> Result<Arc<C>>
    where
        T: 'static,
        C: Any + Send + Sync,
        F: FnOnce() -> Result<C>
    {
        if let Some(existing) = self.lookup::<T>(direction) {
            return downcast::<T, C>(existing);
        }

        let candidate: Published = Arc::new(build()?);
        let published = Arc::clone(
            self.entries
                .entry((direction, TypeId::of::<T>()))
                .or_insert_with(|| Arc::clone(&candidate))
                .value()
        );

        if Arc::ptr_eq(&published, &candidate) {
            debug!(entity = std::any::type_name::<T>(), ?direction, "converter published");
        } else {
            debug!(
                entity = std::any::type_name::<T>(),
                ?direction,
                "concurrent build lost publication race, using published converter"
            );
        }

        downcast::<T, C>(published)
    }

    fn lookup<T: 'static>(&self, direction: Direction) -> Option<Published> {
        self.entries
            .get(&(direction, TypeId::of::<T>()))
            .map(|entry| Arc::clone(entry.value()))
    }
}

fn downcast<T, C: Any + Send + Sync>(entry: Published) -> Result<Arc<C>> {
    entry
        .downcast::<C>()
        .map_err(|_| Error::configuration::<T>("cached converter has an unexpected type"))
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("config", &self.config)
            .field("converters", &self.entries.len())
            .finish()
    }
}

/// Convert an instance to parameters through the global registry.
///
/// # Errors
///
/// See [`ConverterRegistry::outbound`].
pub fn to_parameters<T: Entity>(entity: &T) -> Result<ParameterRecord> {
    ConverterRegistry::global().to_parameters(entity)
}

/// Convert rows to instances through the global registry.
///
/// # Errors
///
/// See [`ConverterRegistry::to_entities`].
pub fn to_entities<T, R>(rows: &[R]) -> Result<Vec<T>>
where
    T: Entity + Default,
    R: RowAccessor
{
    ConverterRegistry::global().to_entities(rows)
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Barrier,
        atomic::{AtomicUsize, Ordering}
    };

    use super::*;
    use crate::{
        dialect::Dialect,
        mapping::FieldMapping,
        row::ValueRow,
        value::{FromValue, ToValue, Value}
    };

    #[derive(Debug, Default, PartialEq)]
    struct Order {
        id:    i64,
        total: f64
    }

    impl Entity for Order {
        fn field_mappings() -> Vec<FieldMapping<Self>> {
            vec![
                FieldMapping::new(
                    "id",
                    <i64 as FromValue>::KIND,
                    |o: &Self| o.id.to_value(),
                    |o: &mut Self, v| {
                        o.id = FromValue::from_value(v)?;
                        Ok(())
                    }
                ),
                FieldMapping::new(
                    "total",
                    <f64 as FromValue>::KIND,
                    |o: &Self| o.total.to_value(),
                    |o: &mut Self, v| {
                        o.total = FromValue::from_value(v)?;
                        Ok(())
                    }
                ),
            ]
        }
    }

    #[derive(Default)]
    struct Broken {
        a: i32
    }

    impl Entity for Broken {
        fn field_mappings() -> Vec<FieldMapping<Self>> {
            vec![
                FieldMapping::new(
                    "a",
                    <i32 as FromValue>::KIND,
                    |b: &Self| b.a.to_value(),
                    |_, _| Ok(())
                )
                .with_column(" "),
            ]
        }
    }

    #[test]
    fn outbound_is_cached() {
        let registry = ConverterRegistry::new();
        let first = registry.outbound::<Order>().unwrap();
        let second = registry.outbound::<Order>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(registry.contains::<Order>(Direction::Outbound));
        assert!(!registry.contains::<Order>(Direction::Inbound));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn directions_are_separate_entries() {
        let registry = ConverterRegistry::new();
        let row = ValueRow::new().with("id", 1_i64).with("total", 2.0_f64);
        registry.outbound::<Order>().unwrap();
        registry.inbound::<Order>(&row).unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn failed_build_is_not_cached() {
        let registry = ConverterRegistry::new();
        assert!(registry.outbound::<Broken>().unwrap_err().is_configuration());
        assert!(registry.is_empty());
        assert!(registry.outbound::<Broken>().is_err());
    }

    #[test]
    fn dialect_comes_from_config() {
        let registry = ConverterRegistry::with_config(MapperConfig::new(Dialect::Oracle));
        let record = registry.to_parameters(&Order::default()).unwrap();
        assert_eq!(record.iter().next().unwrap().name, ":id");
    }

    #[test]
    fn first_sample_is_kept() {
        let registry = ConverterRegistry::new();
        let without_total = ValueRow::new().with("id", 1_i64);
        let with_total = ValueRow::new().with("id", 2_i64).with("total", 9.5_f64);

        registry.inbound::<Order>(&without_total).unwrap();
        let order = registry
            .inbound::<Order>(&with_total)
            .unwrap()
            .convert(&with_total)
            .unwrap();
        assert_eq!(
            order,
            Order {
                id:    2,
                total: 0.0
            }
        );
    }

    #[test]
    fn empty_rows_build_nothing() {
        let registry = ConverterRegistry::new();
        let orders: Vec<Order> = registry.to_entities::<Order, ValueRow>(&[]).unwrap();
        assert!(orders.is_empty());
        assert!(registry.cached_inbound::<Order>().is_none());
    }

    #[test]
    fn concurrent_first_requests_converge() {
        let registry = ConverterRegistry::new();
        let barrier = Barrier::new(16);
        let builds = AtomicUsize::new(0);

        let (registry_ref, barrier, builds_ref) = (&registry, &barrier, &builds);

        let converters: Vec<Arc<OutboundConverter<Order>>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..16)
                .map(move |_| {
                    scope.spawn(move || {
                        barrier.wait();
                        registry_ref
                            .get_or_build::<Order, _, _>(Direction::Outbound, || {
                                builds_ref.fetch_add(1, Ordering::SeqCst);
                                compile_outbound::<Order>(Dialect::SqlServer)
                            })
                            .unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(builds.load(Ordering::SeqCst) >= 1);
        assert!(converters.iter().all(|c| Arc::ptr_eq(c, &converters[0])));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn round_trip_through_registry() {
        let registry = ConverterRegistry::new();
        let order = Order {
            id:    7,
            total: 12.5
        };
        let record = registry.to_parameters(&order).unwrap();
        let row: ValueRow = record
            .into_iter()
            .map(|p| (Dialect::SqlServer.bare_name(&p.name).to_owned(), p.value))
            .collect();
        let back: Vec<Order> = registry.to_entities(&[row]).unwrap();
        assert_eq!(back, vec![order]);
    }

    #[test]
    fn global_is_shared() {
        assert!(std::ptr::eq(ConverterRegistry::global(), ConverterRegistry::global()));
        let record = to_parameters(&Order::default()).unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("@total").unwrap().value, Value::F64(0.0));
    }
}
