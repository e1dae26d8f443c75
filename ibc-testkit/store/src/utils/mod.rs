mod codec;
mod sync;

pub use codec::{BinCodec, Codec, NullCodec, ProtobufCodec};
pub use sync::{Async, SharedRw};
