use core::marker::PhantomData;

use crate::context::Store;
use crate::types::{Height, Path, RawHeight};
use crate::utils::{BinCodec, Codec, NullCodec, ProtobufCodec};

/// Values of type `V` stored as the protobuf encoding of `R`.
pub type ProtobufStore<S, K, V, R> = TypedStore<S, K, ProtobufCodec<V, R>>;

/// Keys without a meaningful value.
pub type TypedSet<S, K> = TypedStore<S, K, NullCodec>;

/// Values stored as their raw bytes.
pub type BinStore<S, K, V> = TypedStore<S, K, BinCodec<V>>;

/// A view of `S` restricted to keys of type `K` and values encoded by `C`.
#[derive(Clone, Debug)]
pub struct TypedStore<S, K, C> {
    store: S,
    _key: PhantomData<K>,
    _codec: PhantomData<C>,
}

impl<S, K, C, V> TypedStore<S, K, C>
where
    S: Store,
    C: Codec<Type = V>,
    K: Into<Path> + Clone,
{
    #[inline]
    pub fn new(store: S) -> Self {
        Self {
            store,
            _codec: PhantomData,
            _key: PhantomData,
        }
    }

    /// Returns the previous value, if it still decodes.
    #[inline]
    pub fn set(&mut self, path: K, value: V) -> Result<Option<V>, S::Error> {
        self.store
            .set(path.into(), C::encode(&value))
            .map(|prev| prev.and_then(|v| C::decode(&v)))
    }

    #[inline]
    pub fn delete(&mut self, path: K) -> Option<V> {
        self.store
            .delete(&path.into())
            .and_then(|v| C::decode(&v))
    }

    #[inline]
    pub fn get(&self, height: Height, path: &K) -> Option<V> {
        self.store
            .get(height, &path.clone().into())
            .and_then(|v| C::decode(&v))
    }

    #[inline]
    pub fn has(&self, height: Height, path: &K) -> bool {
        self.store.has(height, &path.clone().into())
    }

    #[inline]
    pub fn get_keys(&self, key_prefix: &Path) -> Vec<Path> {
        self.store.get_keys(key_prefix)
    }

    #[inline]
    pub fn current_height(&self) -> RawHeight {
        self.store.current_height()
    }
}

impl<S, K> TypedStore<S, K, NullCodec>
where
    S: Store,
    K: Into<Path> + Clone,
{
    #[inline]
    pub fn set_path(&mut self, path: K) -> Result<(), S::Error> {
        self.store
            .set(path.into(), NullCodec::encode(&()))
            .map(|_| ())
    }

    #[inline]
    pub fn is_path_set(&self, height: Height, path: &K) -> bool {
        self.has(height, path)
    }
}
