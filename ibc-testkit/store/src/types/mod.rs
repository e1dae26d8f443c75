mod height;
mod path;
mod store;

pub use height::{Height, RawHeight};
pub use path::Path;
pub use store::{BinStore, ProtobufStore, TypedSet, TypedStore};
