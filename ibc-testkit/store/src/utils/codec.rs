use core::marker::PhantomData;

/// How a typed value is turned into store bytes and back.
pub trait Codec {
    type Type;

    fn encode(d: &Self::Type) -> Vec<u8>;

    /// `None` when the bytes are not a valid encoding.
    fn decode(bytes: &[u8]) -> Option<Self::Type>;
}

/// For keys whose presence is the only information. The stored byte is
/// `0x01`, so the value is never empty.
#[derive(Clone, Debug)]
pub struct NullCodec;

impl Codec for NullCodec {
    type Type = ();

    fn encode(_d: &Self::Type) -> Vec<u8> {
        vec![0x01]
    }

    fn decode(bytes: &[u8]) -> Option<Self::Type> {
        match bytes {
            [0x01] => Some(()),
            _ => None,
        }
    }
}

/// Encodes the domain type `T` through its protobuf representation `R`.
#[derive(Clone, Debug)]
pub struct ProtobufCodec<T, R> {
    domain_type: PhantomData<T>,
    raw_type: PhantomData<R>,
}

impl<T, R> Codec for ProtobufCodec<T, R>
where
    T: Into<R> + Clone,
    R: TryInto<T> + Default + prost::Message,
{
    type Type = T;

    fn encode(d: &Self::Type) -> Vec<u8> {
        let raw: R = d.clone().into();
        raw.encode_to_vec()
    }

    fn decode(bytes: &[u8]) -> Option<Self::Type> {
        R::decode(bytes).ok()?.try_into().ok()
    }
}

#[derive(Clone, Debug)]
pub struct BinCodec<T>(PhantomData<T>);

impl<T> Codec for BinCodec<T>
where
    T: AsRef<[u8]> + From<Vec<u8>>,
{
    type Type = T;

    fn encode(d: &Self::Type) -> Vec<u8> {
        d.as_ref().to_vec()
    }

    fn decode(bytes: &[u8]) -> Option<Self::Type> {
        Some(bytes.to_vec().into())
    }
}
