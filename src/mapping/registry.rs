//! The typed mapper registry.
//!
//! Where the convention mapper copies same-named properties automatically, the
//! registry locates a hand-written [`Mapper`] implementation for a concrete
//! (from, to) type pair. The two are alternative strategies, not layers.
//!
//! # Initialization
//!
//! Collecting the registrations is the one genuinely expensive, one-time operation
//! in this subsystem, so the registration table is built lazily behind a
//! double-checked lock: an unguarded fast-path read of the published table, then
//! the write lock, then a re-check before running the providers exactly once. The
//! outcome - success or a duplicate-registration failure - is memoized either way,
//! so the scan can never run twice.
//!
//! After initialization every resolve is a pure table read.

use std::any::{type_name, Any, TypeId};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::{Error, Result};

/// A hand-written mapping from one concrete type to another.
///
/// One implementation type may implement `Mapper` for several type pairs; its
/// provider registers each pair it wants resolvable.
pub trait Mapper<F: 'static, T: 'static>: Send + Sync + 'static {
    /// Maps `from` onto `to` in place.
    fn map(&self, from: &F, to: &mut T);
}

/// Type-erased view of a registered mapper, as stored in the registry table.
pub trait ErasedMapper: Send + Sync {
    /// `TypeId` of the source type.
    fn from_type(&self) -> TypeId;

    /// `TypeId` of the destination type.
    fn to_type(&self) -> TypeId;

    /// Source type name, for diagnostics.
    fn from_name(&self) -> &'static str;

    /// Destination type name, for diagnostics.
    fn to_name(&self) -> &'static str;

    /// Maps between erased instances.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] when either instance is not of the registered type.
    fn map_any(&self, from: &dyn Any, to: &mut dyn Any) -> Result<()>;
}

struct TypedMapper<F, T, M> {
    inner: M,
    _pair: PhantomData<fn(&F, &mut T)>,
}

impl<F: Any, T: Any, M: Mapper<F, T>> ErasedMapper for TypedMapper<F, T, M> {
    fn from_type(&self) -> TypeId {
        TypeId::of::<F>()
    }

    fn to_type(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn from_name(&self) -> &'static str {
        type_name::<F>()
    }

    fn to_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn map_any(&self, from: &dyn Any, to: &mut dyn Any) -> Result<()> {
        let from = from.downcast_ref::<F>().ok_or(Error::TypeMismatch {
            expected: type_name::<F>(),
        })?;
        let to = to.downcast_mut::<T>().ok_or(Error::TypeMismatch {
            expected: type_name::<T>(),
        })?;
        self.inner.map(from, to);
        Ok(())
    }
}

/// The mutable registration surface handed to each [`MapperProvider`].
#[derive(Default)]
pub struct MapperSet {
    entries: HashMap<(TypeId, TypeId), Arc<dyn ErasedMapper>>,
}

impl MapperSet {
    /// Registers a mapper for the (F, T) pair.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateMapping`] when the pair is already claimed - a
    /// configuration error, reported at build time rather than first resolve.
    pub fn register<F: Any, T: Any, M: Mapper<F, T>>(&mut self, mapper: M) -> Result<()> {
        self.insert(Arc::new(TypedMapper::<F, T, M> {
            inner: mapper,
            _pair: PhantomData,
        }))
    }

    /// Registers an already-erased mapper.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateMapping`] when the pair is already claimed.
    pub fn insert(&mut self, mapper: Arc<dyn ErasedMapper>) -> Result<()> {
        let key = (mapper.from_type(), mapper.to_type());
        match self.entries.entry(key) {
            Entry::Occupied(_) => Err(Error::DuplicateMapping {
                from: mapper.from_name(),
                to: mapper.to_name(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(mapper);
                Ok(())
            }
        }
    }

    /// The number of registered pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A registration hook: receives the set once, during the one-time build.
pub type MapperProvider = fn(&mut MapperSet) -> Result<()>;

enum BuildState {
    Ready(HashMap<(TypeId, TypeId), Arc<dyn ErasedMapper>>),
    Failed(Error),
}

/// One-time, lazily-initialized directory of typed mappers.
///
/// Construction stores the providers without running them; the first resolve
/// builds the table under a double-checked lock. Resolution after initialization
/// is a lock-free-read table lookup.
pub struct MapperRegistry {
    providers: Vec<MapperProvider>,
    table: RwLock<Option<Arc<BuildState>>>,
}

impl MapperRegistry {
    /// Creates a registry over the given providers. Nothing runs until the first
    /// resolve.
    #[must_use]
    pub fn new(providers: Vec<MapperProvider>) -> Self {
        MapperRegistry {
            providers,
            table: RwLock::new(None),
        }
    }

    /// Resolves the mapper registered for the (F, T) pair, if any.
    ///
    /// # Errors
    ///
    /// The memoized build failure, when the one-time build detected a duplicate
    /// registration.
    pub fn resolve<F: Any, T: Any>(&self) -> Result<Option<Arc<dyn ErasedMapper>>> {
        self.resolve_dyn(TypeId::of::<F>(), TypeId::of::<T>())
    }

    /// Resolves by runtime type ids.
    ///
    /// # Errors
    ///
    /// The memoized build failure, when the one-time build detected a duplicate
    /// registration.
    pub fn resolve_dyn(&self, from: TypeId, to: TypeId) -> Result<Option<Arc<dyn ErasedMapper>>> {
        match self.state().as_ref() {
            BuildState::Ready(table) => Ok(table.get(&(from, to)).cloned()),
            BuildState::Failed(error) => Err(error.clone()),
        }
    }

    /// Resolves the (F, T) mapper and applies it.
    ///
    /// # Errors
    ///
    /// [`Error::MapperNotFound`] when no mapper is registered for the pair, plus
    /// the failure modes of [`MapperRegistry::resolve`].
    pub fn map_with<F: Any, T: Any>(&self, from: &F, to: &mut T) -> Result<()> {
        match self.resolve::<F, T>()? {
            Some(mapper) => mapper.map_any(from, to),
            None => Err(Error::MapperNotFound {
                from: type_name::<F>(),
                to: type_name::<T>(),
            }),
        }
    }

    /// Returns `true` if the one-time build has already run.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        read_lock!(self.table).is_some()
    }

    /// Double-checked lazy initialization: unguarded check, lock, re-check, build,
    /// publish. The build runs at most once per registry, success or failure.
    fn state(&self) -> Arc<BuildState> {
        if let Some(state) = read_lock!(self.table).as_ref() {
            return state.clone();
        }
        let mut guard = write_lock!(self.table);
        if let Some(state) = guard.as_ref() {
            return state.clone();
        }
        debug!(
            providers = self.providers.len(),
            "building mapper registration table"
        );
        let state = Arc::new(match self.build() {
            Ok(set) => BuildState::Ready(set.entries),
            Err(error) => BuildState::Failed(error),
        });
        *guard = Some(state.clone());
        state
    }

    fn build(&self) -> Result<MapperSet> {
        let mut set = MapperSet::default();
        for provider in &self.providers {
            provider(&mut set)?;
        }
        Ok(set)
    }
}

impl std::fmt::Debug for MapperRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapperRegistry")
            .field("providers", &self.providers.len())
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, PartialEq)]
    struct OrderModel {
        total: f64,
    }

    #[derive(Debug, Default, PartialEq)]
    struct OrderEntity {
        total: f64,
    }

    #[derive(Debug, Default, PartialEq)]
    struct OrderDto {
        total: f64,
    }

    /// One implementation type claiming two (from, to) pairs.
    struct OrderMappers;

    impl Mapper<OrderModel, OrderEntity> for OrderMappers {
        fn map(&self, from: &OrderModel, to: &mut OrderEntity) {
            to.total = from.total;
        }
    }

    impl Mapper<OrderEntity, OrderDto> for OrderMappers {
        fn map(&self, from: &OrderEntity, to: &mut OrderDto) {
            to.total = from.total;
        }
    }

    fn order_provider(set: &mut MapperSet) -> crate::Result<()> {
        set.register::<OrderModel, OrderEntity, OrderMappers>(OrderMappers)?;
        set.register::<OrderEntity, OrderDto, OrderMappers>(OrderMappers)?;
        Ok(())
    }

    fn duplicate_provider(set: &mut MapperSet) -> crate::Result<()> {
        set.register::<OrderModel, OrderEntity, OrderMappers>(OrderMappers)?;
        set.register::<OrderModel, OrderEntity, OrderMappers>(OrderMappers)?;
        Ok(())
    }

    #[test]
    fn test_lazy_build_and_resolve() {
        let registry = MapperRegistry::new(vec![order_provider]);
        assert!(!registry.is_initialized());

        let mapper = registry.resolve::<OrderModel, OrderEntity>().unwrap();
        assert!(mapper.is_some());
        assert!(registry.is_initialized());

        // unknown pair resolves to nothing, not an error
        assert!(registry.resolve::<OrderDto, OrderModel>().unwrap().is_none());
    }

    #[test]
    fn test_one_implementation_many_pairs() {
        let registry = MapperRegistry::new(vec![order_provider]);

        let mut entity = OrderEntity::default();
        registry
            .map_with(&OrderModel { total: 12.5 }, &mut entity)
            .unwrap();
        assert_eq!(entity.total, 12.5);

        let mut dto = OrderDto::default();
        registry.map_with(&entity, &mut dto).unwrap();
        assert_eq!(dto.total, 12.5);
    }

    #[test]
    fn test_missing_mapper_is_reported() {
        let registry = MapperRegistry::new(vec![order_provider]);
        let mut model_like = OrderEntity::default();
        let result = registry.map_with(&OrderDto { total: 1.0 }, &mut model_like);
        assert!(matches!(result, Err(Error::MapperNotFound { .. })));
    }

    #[test]
    fn test_duplicate_registration_fails_fast() {
        let registry = MapperRegistry::new(vec![duplicate_provider]);

        let first = registry.resolve::<OrderModel, OrderEntity>();
        assert!(matches!(first, Err(Error::DuplicateMapping { .. })));

        // the failed build is memoized, not retried
        let second = registry.resolve::<OrderEntity, OrderDto>();
        assert!(matches!(second, Err(Error::DuplicateMapping { .. })));
        assert!(registry.is_initialized());
    }

    #[test]
    fn test_empty_registry() {
        let registry = MapperRegistry::new(Vec::new());
        assert!(registry.resolve::<OrderModel, OrderEntity>().unwrap().is_none());
    }

    #[test]
    fn test_build_runs_exactly_once_under_contention() {
        use std::sync::Arc;
        use std::thread;

        static BUILD_COUNT: AtomicUsize = AtomicUsize::new(0);

        fn counting_provider(set: &mut MapperSet) -> crate::Result<()> {
            BUILD_COUNT.fetch_add(1, Ordering::SeqCst);
            set.register::<OrderModel, OrderEntity, OrderMappers>(OrderMappers)
        }

        let registry = Arc::new(MapperRegistry::new(vec![counting_provider]));
        let mut handles = Vec::new();
        for _ in 0..8 {
            let registry = Arc::clone(&registry);
            handles.push(thread::spawn(move || {
                for _ in 0..50 {
                    registry.resolve::<OrderModel, OrderEntity>().unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(BUILD_COUNT.load(Ordering::SeqCst), 1);
    }
}
